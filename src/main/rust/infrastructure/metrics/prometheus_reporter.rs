use lazy_static::lazy_static;
use prometheus::{Encoder, Gauge, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

use crate::domain::ports::MetricsReporter;
use crate::domain::value_objects::{EndpointRole, RelayState};

lazy_static! {
    pub static ref REGISTRY: Registry = Registry::new();

    // Loop state (0=ProbingSource, 1=ProbingDestination, 2=Streaming, 3=Stopped)
    pub static ref RELAY_STATE: Gauge = Gauge::new(
        "relay_state",
        "Current supervision loop state"
    ).expect("metric can be created");

    pub static ref PROBE_FAILURES: IntCounterVec = IntCounterVec::new(
        Opts::new("relay_probe_failures_total", "Failed reachability probes by endpoint"),
        &["endpoint"]
    ).expect("metric can be created");

    pub static ref RELAY_LAUNCHES: IntCounter = IntCounter::new(
        "relay_launches_total",
        "Total relay process launches"
    ).expect("metric can be created");

    pub static ref RELAY_EXITS: IntCounter = IntCounter::new(
        "relay_exits_total",
        "Total relay process exits (every exit is a lost stream)"
    ).expect("metric can be created");

    // Current backoff delay in seconds
    pub static ref BACKOFF_SECONDS: Gauge = Gauge::new(
        "relay_backoff_seconds",
        "Current retry backoff delay"
    ).expect("metric can be created");

    pub static ref SESSION_UPTIME_SECONDS: Gauge = Gauge::new(
        "relay_session_uptime_seconds",
        "Duration of the last finished relay session"
    ).expect("metric can be created");
}

pub struct PrometheusReporter;

impl PrometheusReporter {
    pub fn new() -> Self {
        Self
    }

    pub fn init_metrics() -> Result<(), prometheus::Error> {
        REGISTRY.register(Box::new(RELAY_STATE.clone()))?;
        REGISTRY.register(Box::new(PROBE_FAILURES.clone()))?;
        REGISTRY.register(Box::new(RELAY_LAUNCHES.clone()))?;
        REGISTRY.register(Box::new(RELAY_EXITS.clone()))?;
        REGISTRY.register(Box::new(BACKOFF_SECONDS.clone()))?;
        REGISTRY.register(Box::new(SESSION_UPTIME_SECONDS.clone()))?;
        Ok(())
    }

    /// Loop state as last reported through `RELAY_STATE`
    pub fn current_state() -> RelayState {
        RelayState::from_metric(RELAY_STATE.get()).unwrap_or_default()
    }

    pub fn gather_metrics() -> Vec<u8> {
        let encoder = TextEncoder::new();
        let metric_families = REGISTRY.gather();
        let mut buffer = vec![];
        if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
            tracing::error!("Failed to encode metrics: {}", e);
            return b"# Error encoding metrics\n".to_vec();
        }
        buffer
    }
}

impl Default for PrometheusReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsReporter for PrometheusReporter {
    fn report_state_change(&self, state: &RelayState) {
        RELAY_STATE.set(state.as_metric());
    }

    fn report_probe_failure(&self, role: EndpointRole) {
        PROBE_FAILURES.with_label_values(&[role.as_str()]).inc();
    }

    fn report_relay_launch(&self) {
        RELAY_LAUNCHES.inc();
    }

    fn report_relay_exit(&self, uptime_secs: f64) {
        RELAY_EXITS.inc();
        SESSION_UPTIME_SECONDS.set(uptime_secs);
    }

    fn report_backoff(&self, delay_secs: f64) {
        BACKOFF_SECONDS.set(delay_secs);
    }
}
