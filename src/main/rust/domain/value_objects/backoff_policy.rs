use std::time::Duration;

use crate::domain::errors::{DomainError, Result};

/// Backoff configuration for probe and relay retries
#[derive(Debug, Clone, PartialEq)]
pub struct BackoffPolicy {
    initial_delay: Duration,
    max_delay: Duration,
    multiplier: f64,
}

impl BackoffPolicy {
    pub fn new(initial_delay: Duration, max_delay: Duration, multiplier: f64) -> Result<Self> {
        if multiplier <= 1.0 {
            return Err(DomainError::InvalidBackoffMultiplier);
        }

        if initial_delay.is_zero() || max_delay < initial_delay {
            return Err(DomainError::InvalidBackoffBounds {
                initial_secs: initial_delay.as_secs_f64(),
                max_secs: max_delay.as_secs_f64(),
            });
        }

        Ok(Self {
            initial_delay,
            max_delay,
            multiplier,
        })
    }

    /// Doubling policy between `initial_delay` and `max_delay`
    pub fn doubling(initial_delay: Duration, max_delay: Duration) -> Result<Self> {
        Self::new(initial_delay, max_delay, 2.0)
    }

    pub fn initial_delay(&self) -> Duration {
        self.initial_delay
    }

    pub fn max_delay(&self) -> Duration {
        self.max_delay
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    /// Calculate the next backoff delay based on current delay.
    /// Saturates at `max_delay` when the product overflows `Duration`.
    pub fn next_delay(&self, current: Duration) -> Duration {
        let next = if self.multiplier.fract() == 0.0 && self.multiplier <= u32::MAX as f64 {
            // Integral multipliers stay in exact integer arithmetic
            current.checked_mul(self.multiplier as u32)
        } else {
            Duration::try_from_secs_f64(current.as_secs_f64() * self.multiplier).ok()
        };

        next.unwrap_or(self.max_delay).min(self.max_delay)
    }
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(5),
            max_delay: Duration::from_secs(60),
            multiplier: 2.0,
        }
    }
}
