use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid RTSP URL: {0}")]
    InvalidRtspUrl(String),

    #[error("Invalid RTMP URL: {0}")]
    InvalidRtmpUrl(String),

    #[error("Invalid backoff multiplier: must be > 1.0")]
    InvalidBackoffMultiplier,

    #[error("Invalid backoff bounds: initial {initial_secs}s, max {max_secs}s")]
    InvalidBackoffBounds { initial_secs: f64, max_secs: f64 },

    #[error("Invalid probe timeout: timeout cannot be zero")]
    InvalidProbeTimeout,

    #[error("Unknown relay profile: {0}")]
    UnknownRelayProfile(String),

    #[error("Relay launch failed: {0}")]
    RelayLaunchFailed(String),

    #[error("Relay wait failed: {0}")]
    RelayWaitFailed(String),
}

pub type Result<T> = std::result::Result<T, DomainError>;
