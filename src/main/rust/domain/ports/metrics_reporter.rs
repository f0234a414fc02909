use crate::domain::value_objects::{EndpointRole, RelayState};

/// Port for metrics reporting
pub trait MetricsReporter: Send + Sync {
    fn report_state_change(&self, state: &RelayState);
    fn report_probe_failure(&self, role: EndpointRole);
    fn report_relay_launch(&self);
    fn report_relay_exit(&self, uptime_secs: f64);
    fn report_backoff(&self, delay_secs: f64);
}
