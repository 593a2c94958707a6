use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use crate::constants::{
    BUFFER_SIZE, DEFAULT_ADDRESS, DEFAULT_PORT, MAX_BUFFER_SIZE, MIN_BUFFER_SIZE,
    POLICY_DISTRIBUTOR_PORT,
};

/// Contains Config properties which will be used by a client or server socket
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SocketConfig {
    /// Address to connect to (client) or listen on (server)
    pub address: IpAddr,
    /// Port to connect to (client) or listen on (server). 0 lets the OS pick.
    pub port: u16,
    buffer_size: usize,
}

impl SocketConfig {
    pub fn new(address: IpAddr, port: u16) -> Self {
        Self {
            address,
            port,
            buffer_size: BUFFER_SIZE,
        }
    }

    /// Endpoint of the simulator's policy distributor
    pub fn policy_distributor() -> Self {
        Self::new(default_address(), POLICY_DISTRIBUTOR_PORT)
    }

    /// Sets the per-message byte budget, clamped to the supported range
    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size.clamp(MIN_BUFFER_SIZE, MAX_BUFFER_SIZE);
        self
    }

    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.address, self.port)
    }
}

impl Default for SocketConfig {
    fn default() -> Self {
        Self::new(default_address(), DEFAULT_PORT)
    }
}

fn default_address() -> IpAddr {
    let [a, b, c, d] = DEFAULT_ADDRESS;
    IpAddr::V4(Ipv4Addr::new(a, b, c, d))
}
