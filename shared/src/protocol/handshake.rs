use log::info;

use crate::transport::Transport;

use super::{error::ProtocolError, markers, message::ProtocolMessage, message_channel::MessageChannel};

/// Waits for `expected` within `attempts` receive chunks.
///
/// Used for both halves of the handshake: the simulator waits for
/// `"AI ACTIVE"`, the black box for `"OK"`.
pub fn await_token<T: Transport>(
    channel: &mut MessageChannel<T>,
    expected: ProtocolMessage,
    attempts: usize,
) -> Result<(), ProtocolError> {
    match channel.await_message_within(attempts)? {
        Some(message) if message == expected => Ok(()),
        Some(message) => Err(ProtocolError::HandshakeFailed {
            expected: token_name(&expected),
            got: message.to_string(),
        }),
        None => Err(ProtocolError::HandshakeTimeout { attempts }),
    }
}

/// Simulator half: expect `"AI ACTIVE"`, answer `"OK"`
pub fn accept_handshake<T: Transport>(
    channel: &mut MessageChannel<T>,
    attempts: usize,
) -> Result<(), ProtocolError> {
    await_token(channel, ProtocolMessage::Handshake, attempts)?;
    channel.send(&ProtocolMessage::Ok)?;
    info!("Handshake complete");
    Ok(())
}

/// Black-box half: send `"AI ACTIVE"`, expect `"OK"`
pub fn open_handshake<T: Transport>(
    channel: &mut MessageChannel<T>,
    attempts: usize,
) -> Result<(), ProtocolError> {
    channel.send(&ProtocolMessage::Handshake)?;
    await_token(channel, ProtocolMessage::Ok, attempts)?;
    info!("Handshake complete");
    Ok(())
}

fn token_name(message: &ProtocolMessage) -> &'static str {
    match message {
        ProtocolMessage::Handshake => markers::HANDSHAKE,
        ProtocolMessage::Stop => markers::STOP,
        _ => markers::OK,
    }
}
