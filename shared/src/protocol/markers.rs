//! Reserved first-element strings of the wire protocol.

/// Sent by the black box to open a session
pub const HANDSHAKE: &str = "AI ACTIVE";
/// Acknowledges a handshake or a stop
pub const OK: &str = "OK";
/// Sent by the simulator to end a session
pub const STOP: &str = "STOP";
/// Prefixes the list of fields sent every tick
pub const DATA_ORDER: &str = "DATAORDER";
/// Prefixes the list of decision fields returned every tick
pub const ACTION_ORDER: &str = "ACTIONORDER";
