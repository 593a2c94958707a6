pub mod error;
pub mod handshake;
pub mod markers;
pub mod message;
pub mod message_channel;
pub mod message_reader;
pub mod negotiation;
pub mod session_state;
pub mod values;
pub mod variable_order;
