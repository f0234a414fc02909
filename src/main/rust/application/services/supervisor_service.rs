use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::domain::entities::RelayLifecycle;
use crate::domain::errors::Result;
use crate::domain::ports::{MetricsReporter, ReachabilityProbe, RelayLauncher, Sleeper, ThreadSleeper};
use crate::domain::value_objects::{Backoff, BackoffPolicy, EndpointRole, RelayConfig, RelayState};

/// Application service running the supervision loop.
///
/// Probes the source, then the destination, then launches the relay and
/// blocks until it exits. Every failure waits for the current backoff delay
/// and goes back to probing the source. The loop only ends when the running
/// flag is cleared, and the flag is only checked between steps.
pub struct SupervisorService {
    config: RelayConfig,
    probe: Box<dyn ReachabilityProbe>,
    launcher: Box<dyn RelayLauncher>,
    sleeper: Box<dyn Sleeper>,
    lifecycle: RelayLifecycle,
    backoff: Backoff,
    metrics: Arc<dyn MetricsReporter>,
    running: Arc<AtomicBool>,
}

impl SupervisorService {
    pub fn new(
        config: RelayConfig,
        probe: Box<dyn ReachabilityProbe>,
        launcher: Box<dyn RelayLauncher>,
        backoff_policy: BackoffPolicy,
        metrics: Arc<dyn MetricsReporter>,
    ) -> Self {
        Self {
            config,
            probe,
            launcher,
            sleeper: Box::new(ThreadSleeper),
            lifecycle: RelayLifecycle::new(),
            backoff: Backoff::new(backoff_policy),
            metrics,
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn with_sleeper(mut self, sleeper: Box<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// Share an externally owned running flag, e.g. one a signal handler holds
    pub fn with_running_flag(mut self, running: Arc<AtomicBool>) -> Self {
        self.running = running;
        self
    }

    pub fn running_flag(&self) -> Arc<AtomicBool> {
        self.running.clone()
    }

    pub fn current_state(&self) -> RelayState {
        *self.lifecycle.current_state()
    }

    pub fn lifecycle(&self) -> &RelayLifecycle {
        &self.lifecycle
    }

    pub fn backoff(&self) -> &Backoff {
        &self.backoff
    }

    fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Run the supervision loop until the running flag is cleared
    pub fn run(&mut self) -> Result<()> {
        self.running.store(true, Ordering::SeqCst);

        tracing::info!(
            "RTSP source: {} | RTMP destination: {} | profile: {}",
            self.config.source(),
            self.config.destination(),
            self.config.profile()
        );

        self.metrics.report_state_change(self.lifecycle.current_state());
        self.metrics.report_backoff(self.backoff.current_delay().as_secs_f64());

        while self.is_running() {
            self.step();
        }

        tracing::info!("Supervisor stopped");

        self.lifecycle.transition_to_stopped(Some("Stopped".to_string()));
        self.metrics.report_state_change(self.lifecycle.current_state());

        Ok(())
    }

    /// Stop the loop at the next step boundary
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// Execute exactly one state of the machine
    fn step(&mut self) {
        match *self.lifecycle.current_state() {
            RelayState::ProbingSource => self.probe_source(),
            RelayState::ProbingDestination => self.probe_destination(),
            RelayState::Streaming => self.stream(),
            RelayState::Stopped => self.stop(),
        }
    }

    fn probe_source(&mut self) {
        let source = self.config.source();
        tracing::debug!("Probing RTSP source {}", source);

        if self.probe.probe(source) {
            self.lifecycle.transition_to_probing_destination();
            self.metrics.report_state_change(self.lifecycle.current_state());
            return;
        }

        tracing::warn!(
            endpoint = %EndpointRole::Source,
            "Camera offline ({}). Retry in {}s...",
            source,
            self.backoff.current_delay().as_secs_f64()
        );
        self.metrics.report_probe_failure(EndpointRole::Source);
        self.back_off();
    }

    fn probe_destination(&mut self) {
        let destination = self.config.destination();
        tracing::debug!("Probing RTMP destination {}", destination);

        if self.probe.probe(destination) {
            self.lifecycle.transition_to_streaming();
            self.metrics.report_state_change(self.lifecycle.current_state());
            return;
        }

        tracing::warn!(
            endpoint = %EndpointRole::Destination,
            "RTMP server unreachable ({}). Retry in {}s...",
            destination,
            self.backoff.current_delay().as_secs_f64()
        );
        self.metrics.report_probe_failure(EndpointRole::Destination);

        self.lifecycle
            .transition_to_probing_source(Some("destination unreachable".to_string()));
        self.metrics.report_state_change(self.lifecycle.current_state());
        self.back_off();
    }

    fn stream(&mut self) {
        tracing::info!("Streaming RTSP -> RTMP...");

        let reason = match self.launcher.launch(&self.config) {
            Ok(handle) => {
                self.metrics.report_relay_launch();
                let session = handle.session().clone();
                tracing::info!(
                    session_id = %session.id(),
                    pid = ?session.pid(),
                    "Relay process started"
                );

                // Blocks for as long as the stream stays healthy
                let outcome = handle.wait();
                let uptime = session.uptime();
                self.metrics.report_relay_exit(uptime.as_secs_f64());

                match outcome {
                    Ok(exit) => {
                        tracing::warn!(
                            session_id = %session.id(),
                            uptime_secs = uptime.as_secs(),
                            "Stream stopped or lost ({}). Reconnecting in {}s...",
                            exit,
                            self.backoff.current_delay().as_secs_f64()
                        );
                        format!("stream lost: {}", exit)
                    }
                    Err(e) => {
                        tracing::error!(
                            session_id = %session.id(),
                            "Relay process could not be waited on: {}. Reconnecting in {}s...",
                            e,
                            self.backoff.current_delay().as_secs_f64()
                        );
                        format!("stream lost: {}", e)
                    }
                }
            }
            Err(e) => {
                tracing::error!(
                    "{}. Retry in {}s...",
                    e,
                    self.backoff.current_delay().as_secs_f64()
                );
                e.to_string()
            }
        };

        self.lifecycle.transition_to_probing_source(Some(reason));
        self.metrics.report_state_change(self.lifecycle.current_state());
        self.back_off();
    }

    /// Wait for the current delay and advance the backoff.
    /// Skipped entirely once shutdown has been requested.
    fn back_off(&mut self) {
        if !self.is_running() {
            return;
        }

        let delay = self.backoff.next_delay();
        self.metrics.report_backoff(delay.as_secs_f64());
        self.sleeper.sleep(delay);
    }
}
