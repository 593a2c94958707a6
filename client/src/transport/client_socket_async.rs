use blackbox_shared::{ReceiveState, SocketAsync, SocketConfig, SocketError, Transport};

/// Client socket whose receives run on a background worker
pub struct ClientSocketAsync {
    config: SocketConfig,
    socket: SocketAsync,
}

impl ClientSocketAsync {
    pub fn new(config: SocketConfig) -> Self {
        let socket = SocketAsync::new(config.buffer_size());
        Self { config, socket }
    }

    /// Connects to the configured address. A no-op when already connected.
    pub fn initialize(&mut self) -> Result<(), SocketError> {
        if !self.socket.is_connected() {
            self.socket.attach(super::connect(&self.config)?);
        }
        Ok(())
    }

    pub fn state(&self) -> ReceiveState {
        self.socket.state()
    }

    pub fn await_data_into(&mut self, buffer: &mut [u8]) -> Result<usize, SocketError> {
        self.socket.await_data_into(buffer)
    }

    pub fn get_data_into(&mut self, buffer: &mut [u8]) -> Result<Option<usize>, SocketError> {
        self.socket.get_data_into(buffer)
    }
}

impl Transport for ClientSocketAsync {
    fn send_data(&mut self, data: &[u8]) -> Result<(), SocketError> {
        self.socket.send_data(data)
    }

    fn receive_data_async(&mut self) -> Result<(), SocketError> {
        self.socket.receive_data_async()
    }

    fn await_data(&mut self) -> Result<Vec<u8>, SocketError> {
        self.socket.await_data()
    }

    fn get_data(&mut self) -> Result<Option<Vec<u8>>, SocketError> {
        self.socket.get_data()
    }

    fn receive_state(&self) -> ReceiveState {
        self.socket.state()
    }

    fn is_connected(&self) -> bool {
        self.socket.is_connected()
    }

    fn buffer_size(&self) -> usize {
        self.config.buffer_size()
    }

    fn disconnect(&mut self) {
        self.socket.disconnect();
    }
}
