pub mod error;
pub mod receive_state;
pub mod receiving_thread;
pub mod socket;
pub mod socket_async;
pub mod socket_config;

use error::SocketError;
use receive_state::ReceiveState;

/// The seam between the protocol layer and a connected byte transport.
///
/// Implemented by the TCP sockets on both ends and by the in-memory pair
/// used in tests. At most one receive is outstanding at a time.
pub trait Transport: Send {
    /// Sends one whole message
    fn send_data(&mut self, data: &[u8]) -> Result<(), SocketError>;
    /// Starts a background receive. Fails if one is already outstanding.
    fn receive_data_async(&mut self) -> Result<(), SocketError>;
    /// Blocks until the outstanding receive completes
    fn await_data(&mut self) -> Result<Vec<u8>, SocketError>;
    /// Non-blocking; `Ok(None)` until the outstanding receive completes
    fn get_data(&mut self) -> Result<Option<Vec<u8>>, SocketError>;
    fn receive_state(&self) -> ReceiveState;
    fn is_connected(&self) -> bool;
    /// Per-message byte budget
    fn buffer_size(&self) -> usize;
    /// Closes the connection. Idempotent.
    fn disconnect(&mut self);
}
