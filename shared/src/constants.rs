// Transport sizing and endpoints

/// Per-message byte budget. One receive call never reads more than this,
/// and no protocol message may encode to more than this.
pub const BUFFER_SIZE: usize = 512;

/// Smallest buffer a socket may be configured with. The largest fixed
/// protocol message ("ACTIONORDER" plus five axis names) fits easily.
pub const MIN_BUFFER_SIZE: usize = 64;

/// Largest buffer a socket may be configured with
pub const MAX_BUFFER_SIZE: usize = 65_536;

/// Loopback address used when nothing else is configured
pub const DEFAULT_ADDRESS: [u8; 4] = [127, 0, 0, 1];

/// Port of the generic client/server pair
pub const DEFAULT_PORT: u16 = 8888;

/// Port the simulator's policy distributor listens on
pub const POLICY_DISTRIBUTOR_PORT: u16 = 8889;

/// Receive attempts allowed while waiting for a handshake token
pub const DEFAULT_HANDSHAKE_ATTEMPTS: usize = 5;
