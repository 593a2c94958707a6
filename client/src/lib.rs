//! # Blackbox Client
//! Black-box side of the decision protocol. Connects to a simulator over TCP,
//! receives one driving-state frame per tick and replies with decisions.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

pub mod shared {
    pub use blackbox_shared::{
        CarState, Decision, DecisionAxis, DecisionTuple, DrivingSnapshot, OrderSource,
        ProtocolError, SessionState, SocketConfig, SocketError, Transport, VariableOrder,
    };
}

mod client;
mod transport;

pub use client::{BlackBoxClient, ClientConfig, DataFrame, DecisionPolicy, Request};
pub use transport::{ClientSocket, ClientSocketAsync};
