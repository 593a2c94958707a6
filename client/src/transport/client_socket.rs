use blackbox_shared::{Socket, SocketConfig, SocketError};

/// Blocking client socket
pub struct ClientSocket {
    config: SocketConfig,
    socket: Socket,
}

impl ClientSocket {
    pub fn new(config: SocketConfig) -> Self {
        let socket = Socket::new(config.buffer_size());
        Self { config, socket }
    }

    /// Connects to the configured address. A no-op when already connected.
    pub fn initialize(&mut self) -> Result<(), SocketError> {
        if !self.socket.is_connected() {
            self.socket.attach(super::connect(&self.config)?);
        }
        Ok(())
    }

    pub fn is_connected(&self) -> bool {
        self.socket.is_connected()
    }

    pub fn send_data(&mut self, data: &[u8]) -> Result<(), SocketError> {
        self.socket.send_data(data)
    }

    /// Blocks on one `recv()`
    pub fn receive_data(&mut self) -> Result<&[u8], SocketError> {
        self.socket.receive_data()
    }

    /// Idempotent
    pub fn disconnect(&mut self) {
        self.socket.disconnect();
    }
}
