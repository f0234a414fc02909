use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use crate::domain::errors::{DomainError, Result};
use crate::domain::ports::ReachabilityProbe;
use crate::domain::value_objects::Endpoint;

/// Default connect timeout for a single probe
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// Liveness probe that opens and immediately drops a TCP connection
#[derive(Debug, Clone)]
pub struct TcpProbe {
    timeout: Duration,
}

impl TcpProbe {
    pub fn new(timeout: Duration) -> Result<Self> {
        if timeout.is_zero() {
            return Err(DomainError::InvalidProbeTimeout);
        }
        Ok(Self { timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for TcpProbe {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }
}

impl ReachabilityProbe for TcpProbe {
    fn probe(&self, endpoint: &Endpoint) -> bool {
        let Some(host) = endpoint.host() else {
            tracing::debug!("Skipping probe of unparsed endpoint {}", endpoint);
            return false;
        };

        let addrs = match (host, endpoint.port()).to_socket_addrs() {
            Ok(addrs) => addrs,
            Err(e) => {
                tracing::debug!("Failed to resolve {}: {}", endpoint, e);
                return false;
            }
        };

        for addr in addrs {
            match TcpStream::connect_timeout(&addr, self.timeout) {
                // Dropping the stream closes it; nothing is sent
                Ok(_stream) => return true,
                Err(e) => tracing::debug!("Probe of {} ({}) failed: {}", endpoint, addr, e),
            }
        }

        false
    }
}
