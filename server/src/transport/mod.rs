mod server_socket;
mod server_socket_async;

pub use server_socket::ServerSocket;
pub use server_socket_async::ServerSocketAsync;

use std::net::{SocketAddr, TcpListener};

use blackbox_shared::{SocketConfig, SocketError};
use log::info;

/// Binds and listens on the configured address.
///
/// `std` does not expose the listen backlog, so the platform default applies.
/// Only one black box is ever served: the socket accepts a single connection
/// and never calls `accept` again.
fn listen(config: &SocketConfig) -> Result<TcpListener, SocketError> {
    let address = config.socket_addr();
    let listener =
        TcpListener::bind(address).map_err(|error| SocketError::bind_failed(address, &error))?;
    info!("Listening for a black box on {}", local_addr(&listener).unwrap_or(address));
    Ok(listener)
}

fn local_addr(listener: &TcpListener) -> Option<SocketAddr> {
    listener.local_addr().ok()
}
