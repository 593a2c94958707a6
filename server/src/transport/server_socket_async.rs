use std::net::{SocketAddr, TcpListener, TcpStream};

use blackbox_shared::{
    ReceiveState, ReceivingThread, SocketAsync, SocketConfig, SocketError, Transport,
};
use log::info;

type AcceptOutcome = Result<(TcpStream, SocketAddr), SocketError>;

/// Server socket whose accept and receives run on background workers.
///
/// The accept worker cannot be cancelled: once `accept()` is blocked it
/// returns only when a client connects or the process exits. `close_server`
/// detaches it.
pub struct ServerSocketAsync {
    config: SocketConfig,
    listener: Option<TcpListener>,
    socket: SocketAsync,
    acceptor: Option<ReceivingThread<AcceptOutcome>>,
}

impl ServerSocketAsync {
    pub fn new(config: SocketConfig) -> Self {
        let socket = SocketAsync::new(config.buffer_size());
        Self {
            config,
            listener: None,
            socket,
            acceptor: None,
        }
    }

    /// Binds and starts listening. Returns without waiting for a client.
    pub fn initialize(&mut self) -> Result<(), SocketError> {
        if self.listener.is_none() {
            self.listener = Some(super::listen(&self.config)?);
        }
        Ok(())
    }

    pub fn is_listening(&self) -> bool {
        self.listener.is_some()
    }

    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.listener.as_ref().and_then(super::local_addr)
    }

    /// Starts a background `accept()`
    pub fn connect_async(&mut self) -> Result<(), SocketError> {
        if self.acceptor.is_some() {
            return Err(SocketError::AcceptInProgress);
        }
        let listener = self
            .listener
            .as_ref()
            .ok_or(SocketError::ServerNotListening)?
            .try_clone()
            .map_err(|error| SocketError::accept_failed(&error))?;

        let acceptor = ReceivingThread::spawn("blackbox-accept", move || {
            listener
                .accept()
                .map_err(|error| SocketError::accept_failed(&error))
        })?;
        self.acceptor = Some(acceptor);
        Ok(())
    }

    /// Blocks until a client has connected, starting the accept if needed
    pub fn await_client_connection(&mut self) -> Result<SocketAddr, SocketError> {
        if let Some(peer) = self.socket.socket().peer_addr() {
            return Ok(peer);
        }
        if self.acceptor.is_none() {
            self.connect_async()?;
        }
        let acceptor = self.acceptor.take().ok_or(SocketError::WorkerLost)?;
        let outcome = acceptor.wait().and_then(|outcome| outcome);
        self.finish_accept(outcome)
    }

    /// Returns the client address once connected, without blocking
    pub fn poll_client_connection(&mut self) -> Result<Option<SocketAddr>, SocketError> {
        let outcome = match &self.acceptor {
            None => return Ok(self.socket.socket().peer_addr()),
            Some(acceptor) => match acceptor.try_take()? {
                None => return Ok(None),
                Some(outcome) => outcome,
            },
        };
        self.acceptor = None;
        self.finish_accept(outcome).map(Some)
    }

    fn finish_accept(&mut self, outcome: AcceptOutcome) -> Result<SocketAddr, SocketError> {
        let (stream, peer) = outcome?;
        info!("Black box connected from {peer}");
        self.socket.attach(stream);
        Ok(peer)
    }

    pub fn state(&self) -> ReceiveState {
        self.socket.state()
    }

    pub fn is_connected(&self) -> bool {
        self.socket.is_connected()
    }

    /// Drops the client connection, keeps listening
    pub fn disconnect(&mut self) {
        self.socket.disconnect();
    }

    /// Drops the client connection and the listener. Idempotent.
    pub fn close_server(&mut self) {
        self.socket.disconnect();
        self.acceptor = None;
        if self.listener.take().is_some() {
            info!("Server socket closed");
        }
    }
}

impl Transport for ServerSocketAsync {
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
        self.close_server();
    }
}
