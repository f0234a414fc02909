use std::time::Instant;

use crate::domain::value_objects::RelayState;

/// State transition record
#[derive(Debug, Clone)]
pub struct StateTransition {
    pub from: RelayState,
    pub to: RelayState,
    pub timestamp: Instant,
    pub reason: Option<String>,
}

/// Domain entity tracking the supervision loop's state machine
#[derive(Debug)]
pub struct RelayLifecycle {
    current_state: RelayState,
    state_history: Vec<StateTransition>,
    streaming_since: Option<Instant>,
    stream_attempts: u64,
}

impl RelayLifecycle {
    pub fn new() -> Self {
        Self {
            current_state: RelayState::ProbingSource,
            state_history: Vec::new(),
            streaming_since: None,
            stream_attempts: 0,
        }
    }

    pub fn current_state(&self) -> &RelayState {
        &self.current_state
    }

    /// Time spent in the current streaming session, if any
    pub fn uptime(&self) -> Option<std::time::Duration> {
        self.streaming_since.map(|start| start.elapsed())
    }

    pub fn stream_attempts(&self) -> u64 {
        self.stream_attempts
    }

    pub fn last_transition(&self) -> Option<&StateTransition> {
        self.state_history.last()
    }

    pub fn history(&self) -> &[StateTransition] {
        &self.state_history
    }

    pub fn transition_to_probing_source(&mut self, reason: Option<String>) {
        self.streaming_since = None;
        self.record_transition(RelayState::ProbingSource, reason);
    }

    pub fn transition_to_probing_destination(&mut self) {
        self.record_transition(RelayState::ProbingDestination, None);
    }

    pub fn transition_to_streaming(&mut self) {
        self.record_transition(RelayState::Streaming, None);
        self.streaming_since = Some(Instant::now());
        self.stream_attempts += 1;
    }

    pub fn transition_to_stopped(&mut self, reason: Option<String>) {
        self.streaming_since = None;
        self.record_transition(RelayState::Stopped, reason);
    }

    fn record_transition(&mut self, new_state: RelayState, reason: Option<String>) {
        let transition = StateTransition {
            from: self.current_state,
            to: new_state,
            timestamp: Instant::now(),
            reason,
        };

        self.state_history.push(transition);
        self.current_state = new_state;
    }
}

impl Default for RelayLifecycle {
    fn default() -> Self {
        Self::new()
    }
}
