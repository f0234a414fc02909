use std::fmt;
use std::time::{Duration, Instant};

use uuid::Uuid;

/// One launched relay process, from spawn until it is reaped
#[derive(Debug, Clone)]
pub struct RelaySession {
    id: String,
    pid: Option<u32>,
    started_at: Instant,
}

impl RelaySession {
    pub fn new(pid: Option<u32>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            pid,
            started_at: Instant::now(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn pid(&self) -> Option<u32> {
        self.pid
    }

    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }
}

/// Opaque termination status of a relay process.
///
/// The supervisor never interprets it: every exit counts as a lost stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RelayExit {
    code: Option<i32>,
    signal: Option<i32>,
}

impl RelayExit {
    pub fn with_code(code: i32) -> Self {
        Self {
            code: Some(code),
            signal: None,
        }
    }

    pub fn with_signal(signal: i32) -> Self {
        Self {
            code: None,
            signal: Some(signal),
        }
    }

    pub fn code(&self) -> Option<i32> {
        self.code
    }

    pub fn signal(&self) -> Option<i32> {
        self.signal
    }
}

impl fmt::Display for RelayExit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.code, self.signal) {
            (Some(code), _) => write!(f, "exit code {}", code),
            (None, Some(signal)) => write!(f, "terminated by signal {}", signal),
            (None, None) => write!(f, "unknown exit status"),
        }
    }
}
