//! # Blackbox Shared
//! Transport, wire protocol and decision model shared between the
//! blackbox-server (simulator host) & blackbox-client (black box) crates.

#![deny(trivial_casts, trivial_numeric_casts, unstable_features, unused_import_braces)]

pub use blackbox_serde::{
    read_array_len, write_array_len, ByteCounter, ByteReader, ByteWrite, ByteWriter, Scalar, Serde,
    SerdeErr,
};

mod constants;
mod decision;
mod protocol;
mod snapshot;
mod transport;

pub use constants::{
    BUFFER_SIZE, DEFAULT_ADDRESS, DEFAULT_HANDSHAKE_ATTEMPTS, DEFAULT_PORT, MAX_BUFFER_SIZE,
    MIN_BUFFER_SIZE, POLICY_DISTRIBUTOR_PORT,
};
pub use decision::{
    allowed_actions::AllowedActions,
    axis::{DecisionAxis, DecisionAxisParseError},
    decision::Decision,
    decision_tuple::DecisionTuple,
    intervention_sink::{ControlCommand, Indication, InterventionSink},
};
pub use protocol::{
    error::ProtocolError,
    handshake::{accept_handshake, await_token, open_handshake},
    markers,
    message::ProtocolMessage,
    message_channel::MessageChannel,
    message_reader::MessageReader,
    negotiation::{receive_orders, send_orders},
    session_state::SessionState,
    values::{decode_decisions, encode_snapshot, parse_decision_value, resolve_action_order},
    variable_order::{OrderSource, VariableOrder},
};
pub use snapshot::{CarState, DrivingSnapshot};
pub use transport::{
    error::SocketError, receive_state::ReceiveState, receiving_thread::ReceivingThread,
    socket::Socket, socket_async::SocketAsync, socket_config::SocketConfig, Transport,
};
