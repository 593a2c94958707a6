use blackbox_serde::SerdeErr;
use thiserror::Error;

use crate::{protocol::session_state::SessionState, transport::error::SocketError};

/// Errors that can occur during protocol operations.
///
/// Transport failures and framing violations are fatal for the session.
/// Unparsable decision values are never reported here; they decode to NaN.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// The underlying connection failed
    #[error(transparent)]
    Socket(#[from] SocketError),

    /// Bytes on the wire did not form a valid message
    #[error("Malformed message: {0}")]
    Serde(#[from] SerdeErr),

    /// The peer answered the handshake with something other than the expected token
    #[error("Handshake failed: expected {expected}, got {got}")]
    HandshakeFailed { expected: &'static str, got: String },

    /// No complete handshake message arrived within the allowed receive attempts
    #[error("Handshake timed out: no complete message after {attempts} receive attempt(s)")]
    HandshakeTimeout { attempts: usize },

    /// Negotiation did not start with a DATAORDER message
    #[error("Expected DATAORDER before any other negotiation message, got {got}")]
    MissingDataOrder { got: String },

    /// DATAORDER was not followed by an ACTIONORDER message
    #[error("Expected ACTIONORDER after DATAORDER, got {got}")]
    MissingActionOrder { got: String },

    /// An order message arrived after the orders were already fixed
    #[error("Variable orders are already negotiated and cannot be changed")]
    AlreadyNegotiated,

    /// A message that is not valid in the current session state
    #[error("Unexpected message {got} while {state}")]
    UnexpectedMessage { state: SessionState, got: String },

    /// A values message did not match the length of its negotiated order
    #[error("Expected {expected} value(s) per the negotiated order, got {got}")]
    FieldCountMismatch { expected: usize, got: usize },

    /// An ACTIONORDER entry that does not name a decision axis
    #[error("Unknown action {name:?}. Valid actions are Accel, Brake, Steer, Gear, Lights")]
    UnknownAction { name: String },

    /// A name listed twice in one order
    #[error("{order} lists {name:?} more than once")]
    DuplicateName { order: &'static str, name: String },

    /// An order with no entries
    #[error("{order} must list at least one field")]
    EmptyOrder { order: &'static str },

    /// The snapshot does not provide a field listed in DATAORDER
    #[error("Snapshot has no field named {name:?}")]
    MissingField { name: String },

    /// A field name the reference decoder does not know
    #[error("Unknown field {name:?}")]
    UnknownField { name: String },

    /// A field value the reference decoder could not parse
    #[error("Field {name:?} has unparsable value {value:?}")]
    InvalidFieldValue { name: String, value: String },

    /// Pending bytes exceed the per-message budget without forming a message
    #[error("Incoming message exceeds the buffer size: {size} bytes pending, max {max}")]
    MessageTooLarge { size: usize, max: usize },

    /// The operation needs a session in a different state
    #[error("Operation not valid while {state}")]
    NotReady { state: SessionState },

    /// A tick request is still waiting for its reply
    #[error("A decision request is already outstanding")]
    RequestInFlight,
}

impl ProtocolError {
    /// The peer went away
    pub fn is_connection_closed(&self) -> bool {
        matches!(self, ProtocolError::Socket(SocketError::ConnectionClosed))
    }

    /// Programmer errors, as opposed to connection or framing failures
    pub fn is_usage_error(&self) -> bool {
        match self {
            ProtocolError::NotReady { .. } | ProtocolError::RequestInFlight => true,
            ProtocolError::Socket(error) => error.is_usage_error(),
            _ => false,
        }
    }
}
