mod metrics_reporter;
mod reachability_probe;
mod relay_launcher;
mod sleeper;

pub use metrics_reporter::MetricsReporter;
pub use reachability_probe::ReachabilityProbe;
pub use relay_launcher::{RelayHandle, RelayLauncher};
pub use sleeper::{Sleeper, ThreadSleeper};
