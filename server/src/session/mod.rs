mod black_box_session;
mod session_config;

pub use black_box_session::{BlackBoxSession, DecisionReply, TickExchange};
pub use session_config::{SessionConfig, SessionMode};
