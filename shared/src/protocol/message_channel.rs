use log::debug;

use crate::transport::{receive_state::ReceiveState, Transport};

use super::{error::ProtocolError, message::ProtocolMessage, message_reader::MessageReader};

/// Whole-message send/receive over a `Transport`.
pub struct MessageChannel<T: Transport> {
    transport: T,
    reader: MessageReader,
}

impl<T: Transport> MessageChannel<T> {
    pub fn new(transport: T) -> Self {
        let reader = MessageReader::new(transport.buffer_size());
        Self { transport, reader }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn into_transport(self) -> T {
        self.transport
    }

    pub fn is_connected(&self) -> bool {
        self.transport.is_connected()
    }

    pub fn send(&mut self, message: &ProtocolMessage) -> Result<(), ProtocolError> {
        debug!("Sending {message}");
        self.transport.send_data(&message.encode())?;
        Ok(())
    }

    /// Blocks until a complete message has arrived. No timeout.
    pub fn await_message(&mut self) -> Result<ProtocolMessage, ProtocolError> {
        loop {
            if let Some(message) = self.reader.next_message()? {
                debug!("Received {message}");
                return Ok(message);
            }
            self.receive_chunk()?;
        }
    }

    /// Like `await_message`, but gives up after `attempts` receive chunks
    /// without a complete message.
    pub fn await_message_within(
        &mut self,
        attempts: usize,
    ) -> Result<Option<ProtocolMessage>, ProtocolError> {
        if let Some(message) = self.reader.next_message()? {
            return Ok(Some(message));
        }
        for _ in 0..attempts {
            self.receive_chunk()?;
            if let Some(message) = self.reader.next_message()? {
                debug!("Received {message}");
                return Ok(Some(message));
            }
        }
        Ok(None)
    }

    /// Returns a complete message if one has arrived, without blocking.
    /// Leaves a receive outstanding so the next poll can pick up later data.
    pub fn poll_message(&mut self) -> Result<Option<ProtocolMessage>, ProtocolError> {
        loop {
            if let Some(message) = self.reader.next_message()? {
                debug!("Received {message}");
                return Ok(Some(message));
            }
            self.start_receive()?;
            match self.transport.get_data()? {
                Some(chunk) => self.reader.push(&chunk),
                None => return Ok(None),
            }
        }
    }

    /// Closes the transport and drops any partially received message
    pub fn close(&mut self) {
        self.transport.disconnect();
        self.reader.clear();
    }

    fn start_receive(&mut self) -> Result<(), ProtocolError> {
        if self.transport.receive_state() == ReceiveState::Empty {
            self.transport.receive_data_async()?;
        }
        Ok(())
    }

    fn receive_chunk(&mut self) -> Result<(), ProtocolError> {
        self.start_receive()?;
        let chunk = self.transport.await_data()?;
        self.reader.push(&chunk);
        Ok(())
    }
}
