use blackbox_shared::{OrderSource, DEFAULT_HANDSHAKE_ATTEMPTS};

/// Contains Config properties which will be used by a `BlackBoxClient`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Whether the black box proposes the variable orders or accepts the simulator's
    pub orders: OrderSource,
    /// Receive attempts allowed while waiting for `"OK"`
    pub handshake_attempts: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            orders: OrderSource::Remote,
            handshake_attempts: DEFAULT_HANDSHAKE_ATTEMPTS,
        }
    }
}
