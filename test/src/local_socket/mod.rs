/// In-memory transport for E2E testing
/// Routes whole chunks between simulator and black box without network I/O

use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};

use blackbox_shared::{ReceiveState, SocketError, Transport, BUFFER_SIZE};

/// Pair of connected in-memory transports
pub struct LocalSocketPair {
    pub server: LocalTransport,
    pub client: LocalTransport,
}

impl LocalSocketPair {
    pub fn new() -> Self {
        Self::with_buffer_size(BUFFER_SIZE)
    }

    pub fn with_buffer_size(buffer_size: usize) -> Self {
        let (server_to_client, client_inbox) = unbounded();
        let (client_to_server, server_inbox) = unbounded();
        Self {
            server: LocalTransport::new(server_to_client, server_inbox, buffer_size),
            client: LocalTransport::new(client_to_server, client_inbox, buffer_size),
        }
    }
}

impl Default for LocalSocketPair {
    fn default() -> Self {
        Self::new()
    }
}

/// One end of a `LocalSocketPair`.
///
/// Sends never block. Dropping or disconnecting one end makes the other
/// end's receives fail with `ConnectionClosed`.
pub struct LocalTransport {
    outbox: Option<Sender<Vec<u8>>>,
    inbox: Option<Receiver<Vec<u8>>>,
    state: ReceiveState,
    buffer_size: usize,
}

impl LocalTransport {
    fn new(outbox: Sender<Vec<u8>>, inbox: Receiver<Vec<u8>>, buffer_size: usize) -> Self {
        Self {
            outbox: Some(outbox),
            inbox: Some(inbox),
            state: ReceiveState::Empty,
            buffer_size,
        }
    }

    fn receive_outcome(&mut self, outcome: Result<Vec<u8>, SocketError>) -> Result<Vec<u8>, SocketError> {
        match outcome {
            Ok(chunk) => {
                self.state = ReceiveState::Empty;
                Ok(chunk)
            }
            Err(error) => {
                self.state = ReceiveState::Error;
                Err(error)
            }
        }
    }
}

impl Transport for LocalTransport {
    fn send_data(&mut self, data: &[u8]) -> Result<(), SocketError> {
        if self.state == ReceiveState::Error {
            return Err(SocketError::ErrorLatched);
        }
        if data.len() > self.buffer_size {
            return Err(SocketError::MessageTooLarge {
                size: data.len(),
                max: self.buffer_size,
            });
        }
        let outbox = self.outbox.as_ref().ok_or(SocketError::NotConnected)?;
        outbox
            .send(data.to_vec())
            .map_err(|_| SocketError::ConnectionClosed)
    }

    fn receive_data_async(&mut self) -> Result<(), SocketError> {
        match self.state {
            ReceiveState::Empty => {}
            ReceiveState::Error => return Err(SocketError::ErrorLatched),
            _ => return Err(SocketError::ReceiveInProgress),
        }
        if self.inbox.is_none() {
            return Err(SocketError::NotConnected);
        }
        self.state = ReceiveState::Receiving;
        Ok(())
    }

    fn await_data(&mut self) -> Result<Vec<u8>, SocketError> {
        match self.state {
            ReceiveState::Receiving => {}
            ReceiveState::Error => return Err(SocketError::ErrorLatched),
            _ => return Err(SocketError::ReceiveNotStarted),
        }
        let inbox = self.inbox.as_ref().ok_or(SocketError::NotConnected)?;
        let outcome = inbox.recv().map_err(|_| SocketError::ConnectionClosed);
        self.receive_outcome(outcome)
    }

    fn get_data(&mut self) -> Result<Option<Vec<u8>>, SocketError> {
        match self.state {
            ReceiveState::Receiving => {}
            ReceiveState::Error => return Err(SocketError::ErrorLatched),
            _ => return Ok(None),
        }
        let inbox = self.inbox.as_ref().ok_or(SocketError::NotConnected)?;
        let outcome = match inbox.try_recv() {
            Ok(chunk) => Ok(chunk),
            Err(TryRecvError::Empty) => return Ok(None),
            Err(TryRecvError::Disconnected) => Err(SocketError::ConnectionClosed),
        };
        self.receive_outcome(outcome).map(Some)
    }

    fn receive_state(&self) -> ReceiveState {
        self.state
    }

    fn is_connected(&self) -> bool {
        self.outbox.is_some()
    }

    fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    fn disconnect(&mut self) {
        self.outbox = None;
        self.inbox = None;
        self.state = ReceiveState::Empty;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunks_flow_both_ways() {
        let LocalSocketPair {
            mut server,
            mut client,
        } = LocalSocketPair::new();

        client.send_data(b"up").unwrap();
        server.receive_data_async().unwrap();
        assert_eq!(server.await_data().unwrap(), b"up".to_vec());

        client.receive_data_async().unwrap();
        assert_eq!(client.get_data(), Ok(None));
        server.send_data(b"down").unwrap();
        assert_eq!(client.get_data(), Ok(Some(b"down".to_vec())));
    }

    #[test]
    fn disconnect_closes_peer() {
        let LocalSocketPair {
            mut server,
            mut client,
        } = LocalSocketPair::new();
        client.disconnect();
        client.disconnect();

        server.receive_data_async().unwrap();
        assert_eq!(server.await_data(), Err(SocketError::ConnectionClosed));
        assert_eq!(server.receive_state(), ReceiveState::Error);
    }
}
