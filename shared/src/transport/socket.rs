use std::{
    io::{Read, Write},
    net::{Shutdown, SocketAddr, TcpStream},
};

use log::{debug, info};

use super::error::SocketError;

/// One end of a connected TCP stream with a fixed-size receive buffer.
///
/// Blocking operations only; `SocketAsync` layers the background receive on
/// top of this. The socket owns its stream and buffer exclusively.
pub struct Socket {
    stream: Option<TcpStream>,
    buffer: Box<[u8]>,
}

impl Socket {
    pub fn new(buffer_size: usize) -> Self {
        Self {
            stream: None,
            buffer: vec![0; buffer_size].into_boxed_slice(),
        }
    }

    /// Takes ownership of an established connection, replacing any previous one
    pub fn attach(&mut self, stream: TcpStream) {
        if let Err(error) = stream.set_nodelay(true) {
            debug!("Could not disable Nagle on socket: {error}");
        }
        self.disconnect();
        self.stream = Some(stream);
    }

    pub fn is_connected(&self) -> bool {
        self.stream.is_some()
    }

    pub fn buffer_size(&self) -> usize {
        self.buffer.len()
    }

    pub fn peer_addr(&self) -> Option<SocketAddr> {
        self.stream.as_ref().and_then(|stream| stream.peer_addr().ok())
    }

    /// Sends one whole message.
    pub fn send_data(&mut self, data: &[u8]) -> Result<(), SocketError> {
        let max = self.buffer.len();
        if data.len() > max {
            return Err(SocketError::MessageTooLarge {
                size: data.len(),
                max,
            });
        }
        let stream = self.stream.as_mut().ok_or(SocketError::NotConnected)?;
        stream
            .write_all(data)
            .map_err(|error| SocketError::send_failed(&error))
    }

    /// Blocks on a single `recv()` into the socket's buffer and returns the
    /// bytes read. A zero-byte read means the peer hung up.
    pub fn receive_data(&mut self) -> Result<&[u8], SocketError> {
        let stream = self.stream.as_mut().ok_or(SocketError::NotConnected)?;
        let count = stream
            .read(&mut self.buffer)
            .map_err(|error| SocketError::receive_failed(&error))?;
        if count == 0 {
            return Err(SocketError::ConnectionClosed);
        }
        Ok(&self.buffer[..count])
    }

    /// A second handle to the same connection, for a receive worker
    pub fn try_clone_stream(&self) -> Result<TcpStream, SocketError> {
        let stream = self.stream.as_ref().ok_or(SocketError::NotConnected)?;
        stream
            .try_clone()
            .map_err(|error| SocketError::receive_failed(&error))
    }

    /// Closes the connection. Shutting the stream down also unblocks any
    /// worker still sitting in `recv()` on a cloned handle. Idempotent.
    pub fn disconnect(&mut self) {
        if let Some(stream) = self.stream.take() {
            // the peer may already be gone
            let _ = stream.shutdown(Shutdown::Both);
            info!("Socket disconnected");
        }
    }
}

impl Drop for Socket {
    fn drop(&mut self) {
        self.disconnect();
    }
}
