use std::fmt;
use std::str::FromStr;

use crate::domain::errors::DomainError;

/// Relay tool invocation variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayProfile {
    /// Regenerate timestamps from the wall clock (`-use_wallclock_as_timestamps`)
    Wallclock,
    /// Let the relay tool reconnect on its own (`-reconnect*`)
    Reconnect,
}

impl RelayProfile {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelayProfile::Wallclock => "wallclock",
            RelayProfile::Reconnect => "reconnect",
        }
    }
}

impl Default for RelayProfile {
    fn default() -> Self {
        RelayProfile::Wallclock
    }
}

impl fmt::Display for RelayProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RelayProfile {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wallclock" => Ok(RelayProfile::Wallclock),
            "reconnect" => Ok(RelayProfile::Reconnect),
            other => Err(DomainError::UnknownRelayProfile(other.to_string())),
        }
    }
}
