//! # Blackbox Server
//! Simulator side of the black-box decision protocol. Accepts one black box
//! over TCP, exchanges driving state and decisions once per tick, and turns
//! the decisions into indications and interventions on the car.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

pub mod shared {
    pub use blackbox_shared::{
        AllowedActions, CarState, ControlCommand, Decision, DecisionAxis, DecisionTuple,
        DrivingSnapshot, Indication, InterventionSink, OrderSource, ProtocolError, SessionState,
        SocketConfig, SocketError, Transport, VariableOrder,
    };
}

mod decision_maker;
mod error;
mod intervention;
mod recorder;
mod session;
mod transport;

pub use decision_maker::{DecisionMaker, DecisionMakerConfig};
pub use error::BlackBoxError;
pub use intervention::{
    AutonomousAIExecutor, CompleteTakeoverExecutor, InterventionExecutor, InterventionFactory,
    InterventionType, NoSignalsExecutor, OnlySignalsExecutor, SharedControlExecutor,
    UnknownInterventionType,
};
pub use recorder::{DataCollectionSettings, FileRecorder, Recorder, RecorderError};
pub use session::{BlackBoxSession, DecisionReply, SessionConfig, SessionMode, TickExchange};
pub use transport::{ServerSocket, ServerSocketAsync};
