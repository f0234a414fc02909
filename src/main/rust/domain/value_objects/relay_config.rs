use super::{Endpoint, RelayProfile, DEFAULT_RTMP_PORT, DEFAULT_RTSP_PORT};
use crate::domain::errors::{DomainError, Result};

/// Source and destination of the relay, plus the invocation profile
#[derive(Debug, Clone, PartialEq)]
pub struct RelayConfig {
    rtsp_url: String,
    rtmp_url: String,
    profile: RelayProfile,
    source: Endpoint,
    destination: Endpoint,
}

impl RelayConfig {
    pub fn new(rtsp_url: String, rtmp_url: String) -> Result<Self> {
        if rtsp_url.trim().is_empty() {
            return Err(DomainError::InvalidRtspUrl(rtsp_url));
        }
        if rtmp_url.trim().is_empty() {
            return Err(DomainError::InvalidRtmpUrl(rtmp_url));
        }

        // Endpoints are derived once and never re-parsed during the run
        let source = Endpoint::parse(&rtsp_url, DEFAULT_RTSP_PORT);
        let destination = Endpoint::parse(&rtmp_url, DEFAULT_RTMP_PORT);

        Ok(Self {
            rtsp_url,
            rtmp_url,
            profile: RelayProfile::default(),
            source,
            destination,
        })
    }

    pub fn with_profile(mut self, profile: RelayProfile) -> Self {
        self.profile = profile;
        self
    }

    pub fn rtsp_url(&self) -> &str {
        &self.rtsp_url
    }

    pub fn rtmp_url(&self) -> &str {
        &self.rtmp_url
    }

    pub fn profile(&self) -> RelayProfile {
        self.profile
    }

    pub fn source(&self) -> &Endpoint {
        &self.source
    }

    pub fn destination(&self) -> &Endpoint {
        &self.destination
    }
}
