use std::fmt;

/// Supervision loop states (pure domain)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayState {
    /// Checking the camera is reachable
    ProbingSource,
    /// Checking the ingest server is reachable
    ProbingDestination,
    /// Relay process running
    Streaming,
    /// Loop exited after a shutdown request
    Stopped,
}

impl fmt::Display for RelayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProbingSource => write!(f, "PROBING_SOURCE"),
            Self::ProbingDestination => write!(f, "PROBING_DEST"),
            Self::Streaming => write!(f, "STREAMING"),
            Self::Stopped => write!(f, "STOPPED"),
        }
    }
}

impl RelayState {
    /// Convert state to numeric value for metrics
    pub fn as_metric(&self) -> f64 {
        match self {
            Self::ProbingSource => 0.0,
            Self::ProbingDestination => 1.0,
            Self::Streaming => 2.0,
            Self::Stopped => 3.0,
        }
    }

    /// Inverse of [`RelayState::as_metric`]
    pub fn from_metric(value: f64) -> Option<Self> {
        match value as i64 {
            0 => Some(Self::ProbingSource),
            1 => Some(Self::ProbingDestination),
            2 => Some(Self::Streaming),
            3 => Some(Self::Stopped),
            _ => None,
        }
    }

    pub fn is_streaming(&self) -> bool {
        matches!(self, Self::Streaming)
    }
}

impl Default for RelayState {
    fn default() -> Self {
        Self::ProbingSource
    }
}
