mod tcp_probe;

pub use tcp_probe::{TcpProbe, DEFAULT_PROBE_TIMEOUT};
