mod metrics_server;
mod prometheus_reporter;

pub use metrics_server::{routes, serve_metrics};
pub use prometheus_reporter::PrometheusReporter;
