pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

// Re-exports for convenience
pub use application::services::SupervisorService;
pub use config::Config;
pub use domain::entities::{RelayExit, RelayLifecycle, RelaySession, StateTransition};
pub use domain::errors::{DomainError, Result};
pub use domain::ports::{
    MetricsReporter, ReachabilityProbe, RelayHandle, RelayLauncher, Sleeper, ThreadSleeper,
};
pub use domain::value_objects::{
    Backoff, BackoffPolicy, Endpoint, EndpointRole, RelayConfig, RelayProfile, RelayState,
    DEFAULT_RTMP_PORT, DEFAULT_RTSP_PORT,
};
pub use infrastructure::metrics::{routes, serve_metrics, PrometheusReporter};
pub use infrastructure::network::{TcpProbe, DEFAULT_PROBE_TIMEOUT};
pub use infrastructure::process::{ChildRelay, CommandBuilder, ProcessLauncher};
