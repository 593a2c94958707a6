use blackbox_shared::{OrderSource, VariableOrder, DEFAULT_HANDSHAKE_ATTEMPTS};

/// How the simulator waits for decisions
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SessionMode {
    /// Every tick blocks until its reply arrives
    #[default]
    Synchronous,
    /// The simulator may run one tick ahead; "no decision yet" is a normal outcome
    Asynchronous,
}

/// Contains Config properties which will be used by a `BlackBoxSession`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    pub mode: SessionMode,
    /// Whether the simulator proposes the variable orders or accepts the black box's
    pub orders: OrderSource,
    /// Receive attempts allowed while waiting for `"AI ACTIVE"`
    pub handshake_attempts: usize,
}

impl SessionConfig {
    /// Orders the simulator proposes when nothing else is configured
    pub fn default_order() -> VariableOrder {
        VariableOrder::new(
            ["Speed", "Gear", "Steer", "ToMiddle", "Yaw", "TrackWidth"],
            ["Steer", "Accel", "Brake"],
        )
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            mode: SessionMode::default(),
            orders: OrderSource::Local(Self::default_order()),
            handshake_attempts: DEFAULT_HANDSHAKE_ATTEMPTS,
        }
    }
}
