use std::time::Duration;

use super::BackoffPolicy;

/// Retry delay tracker driven by the supervision loop.
///
/// Starts at the policy floor and only ever climbs towards the ceiling.
/// The supervisor never calls [`Backoff::reset`]: once the delay has grown it
/// stays elevated for the rest of the run, including across streaming
/// sessions that ran successfully.
#[derive(Debug, Clone)]
pub struct Backoff {
    policy: BackoffPolicy,
    current_delay: Duration,
}

impl Backoff {
    pub fn new(policy: BackoffPolicy) -> Self {
        Self {
            current_delay: policy.initial_delay(),
            policy,
        }
    }

    pub fn policy(&self) -> &BackoffPolicy {
        &self.policy
    }

    /// Delay the next failure will wait for
    pub fn current_delay(&self) -> Duration {
        self.current_delay
    }

    /// Returns the delay to wait for this failure and advances the tracker.
    pub fn next_delay(&mut self) -> Duration {
        let delay = self.current_delay;
        self.current_delay = self.policy.next_delay(delay);
        delay
    }

    pub fn reset(&mut self) {
        self.current_delay = self.policy.initial_delay();
    }
}
