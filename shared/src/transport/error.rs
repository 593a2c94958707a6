use std::{
    io::{Error as IoError, ErrorKind},
    net::SocketAddr,
};

use thiserror::Error;

/// Errors that can occur during socket operations.
///
/// OS failures keep the `ErrorKind` and the raw platform error code so the
/// caller can decide whether to retry or abort the connection attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SocketError {
    /// `connect()` failed
    #[error("Could not connect to {address}: {kind:?} (os error {code:?})")]
    ConnectFailed {
        address: SocketAddr,
        kind: ErrorKind,
        code: Option<i32>,
    },

    /// `bind()` + `listen()` failed
    #[error("Could not listen on {address}: {kind:?} (os error {code:?})")]
    BindFailed {
        address: SocketAddr,
        kind: ErrorKind,
        code: Option<i32>,
    },

    /// `accept()` failed
    #[error("Could not accept a client connection: {kind:?} (os error {code:?})")]
    AcceptFailed { kind: ErrorKind, code: Option<i32> },

    /// `send()` failed
    #[error("Could not send data: {kind:?} (os error {code:?})")]
    SendFailed { kind: ErrorKind, code: Option<i32> },

    /// `recv()` failed
    #[error("Could not receive data: {kind:?} (os error {code:?})")]
    ReceiveFailed { kind: ErrorKind, code: Option<i32> },

    /// A worker thread could not be started
    #[error("Could not spawn socket worker thread: {kind:?} (os error {code:?})")]
    WorkerSpawnFailed { kind: ErrorKind, code: Option<i32> },

    /// A worker thread went away without reporting a result
    #[error("Socket worker thread exited without reporting a result")]
    WorkerLost,

    /// The peer closed the connection (`recv()` returned 0)
    #[error("Connection was closed by the remote endpoint")]
    ConnectionClosed,

    /// No connection is currently open on this socket
    #[error("Socket is not connected")]
    NotConnected,

    /// The server socket has not been initialized with `bind()` + `listen()`
    #[error("Server socket is not listening. Call initialize() first")]
    ServerNotListening,

    /// An accept is already pending on this server socket
    #[error("A client connection is already being awaited")]
    AcceptInProgress,

    /// `await_data` was called without a prior `receive_data_async`
    #[error("await_data called without a prior receive_data_async")]
    ReceiveNotStarted,

    /// `receive_data_async` was called while a receive was still outstanding
    #[error("A receive is already outstanding on this socket")]
    ReceiveInProgress,

    /// A previous error left the connection unusable. Disconnect and reconnect.
    #[error("Socket is in the error state and must be torn down")]
    ErrorLatched,

    /// Outgoing payload does not fit the per-message budget
    #[error("Message of {size} bytes exceeds the buffer size of {max} bytes")]
    MessageTooLarge { size: usize, max: usize },
}

impl SocketError {
    pub fn connect_failed(address: SocketAddr, error: &IoError) -> Self {
        Self::ConnectFailed {
            address,
            kind: error.kind(),
            code: error.raw_os_error(),
        }
    }

    pub fn bind_failed(address: SocketAddr, error: &IoError) -> Self {
        Self::BindFailed {
            address,
            kind: error.kind(),
            code: error.raw_os_error(),
        }
    }

    pub fn accept_failed(error: &IoError) -> Self {
        Self::AcceptFailed {
            kind: error.kind(),
            code: error.raw_os_error(),
        }
    }

    pub fn send_failed(error: &IoError) -> Self {
        Self::SendFailed {
            kind: error.kind(),
            code: error.raw_os_error(),
        }
    }

    pub fn receive_failed(error: &IoError) -> Self {
        Self::ReceiveFailed {
            kind: error.kind(),
            code: error.raw_os_error(),
        }
    }

    pub fn worker_spawn_failed(error: &IoError) -> Self {
        Self::WorkerSpawnFailed {
            kind: error.kind(),
            code: error.raw_os_error(),
        }
    }

    /// Platform socket error code, when the failure came from the OS
    pub fn code(&self) -> Option<i32> {
        match self {
            Self::ConnectFailed { code, .. }
            | Self::BindFailed { code, .. }
            | Self::AcceptFailed { code, .. }
            | Self::SendFailed { code, .. }
            | Self::ReceiveFailed { code, .. }
            | Self::WorkerSpawnFailed { code, .. } => *code,
            _ => None,
        }
    }

    /// Usage errors are programmer mistakes, not connection failures
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            Self::ReceiveNotStarted
                | Self::ReceiveInProgress
                | Self::AcceptInProgress
                | Self::ServerNotListening
        )
    }
}
