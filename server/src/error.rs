use blackbox_shared::{ProtocolError, SocketError};
use thiserror::Error;

use crate::recorder::error::RecorderError;

/// Errors surfaced to the application driving the simulator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlackBoxError {
    /// Transport or protocol failure. The session has been torn down.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The recording sink failed
    #[error(transparent)]
    Recorder(#[from] RecorderError),

    /// No session is running
    #[error("Black box is not initialized. Call initialize() first")]
    NotInitialized,

    /// A session is already running
    #[error("Black box is already initialized. Call shutdown_black_box() first")]
    AlreadyInitialized,
}

impl From<SocketError> for BlackBoxError {
    fn from(error: SocketError) -> Self {
        BlackBoxError::Protocol(ProtocolError::Socket(error))
    }
}
