mod client_socket;
mod client_socket_async;

pub use client_socket::ClientSocket;
pub use client_socket_async::ClientSocketAsync;

use std::net::TcpStream;

use blackbox_shared::{SocketConfig, SocketError};
use log::info;

fn connect(config: &SocketConfig) -> Result<TcpStream, SocketError> {
    let address = config.socket_addr();
    let stream =
        TcpStream::connect(address).map_err(|error| SocketError::connect_failed(address, &error))?;
    info!("Connected to simulator at {address}");
    Ok(stream)
}
