use std::net::{SocketAddr, TcpListener};

use blackbox_shared::{Socket, SocketConfig, SocketError};
use log::info;

/// Blocking server socket. Accepts exactly one client.
pub struct ServerSocket {
    config: SocketConfig,
    listener: Option<TcpListener>,
    socket: Socket,
}

impl ServerSocket {
    pub fn new(config: SocketConfig) -> Self {
        let socket = Socket::new(config.buffer_size());
        Self {
            config,
            listener: None,
            socket,
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

    /// Bound address, with the OS-assigned port when configured with port 0
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.listener.as_ref().and_then(super::local_addr)
    }

    /// Blocks until a client connects
    pub fn wait_for_connection(&mut self) -> Result<SocketAddr, SocketError> {
        if let Some(peer) = self.socket.peer_addr() {
            return Ok(peer);
        }
        let listener = self.listener.as_ref().ok_or(SocketError::ServerNotListening)?;
        let (stream, peer) = listener
            .accept()
            .map_err(|error| SocketError::accept_failed(&error))?;
        info!("Black box connected from {peer}");
        self.socket.attach(stream);
        Ok(peer)
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

    /// Drops the client connection, keeps listening
    pub fn disconnect(&mut self) {
        self.socket.disconnect();
    }

    /// Drops the client connection and the listener. Idempotent.
    pub fn close_server(&mut self) {
        self.socket.disconnect();
        if self.listener.take().is_some() {
            info!("Server socket closed");
        }
    }
}
