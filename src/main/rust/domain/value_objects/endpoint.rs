use std::fmt;

/// Default RTSP port used when the source URL omits one
pub const DEFAULT_RTSP_PORT: u16 = 554;

/// Default RTMP port used when the destination URL omits one
pub const DEFAULT_RTMP_PORT: u16 = 1935;

/// A (host, port) pair extracted from a connection URL.
///
/// `host` is `None` when the URL could not be parsed. Such an endpoint is
/// never reachable, so a malformed URL drives the normal backoff path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    host: Option<String>,
    port: u16,
}

impl Endpoint {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: Some(host.into()),
            port,
        }
    }

    pub fn unparsed(default_port: u16) -> Self {
        Self {
            host: None,
            port: default_port,
        }
    }

    /// Best-effort extraction of `host[:port]` from
    /// `scheme://[user[:pass]@]host[:port]/path`.
    ///
    /// Credentials are stripped up to the first `@`, so colons inside the
    /// password never reach the port split. The port is taken after the
    /// rightmost colon of the authority. Any failure yields
    /// [`Endpoint::unparsed`] with `default_port`.
    pub fn parse(url: &str, default_port: u16) -> Self {
        Self::try_parse(url, default_port).unwrap_or_else(|| Self::unparsed(default_port))
    }

    fn try_parse(url: &str, default_port: u16) -> Option<Self> {
        let (_, after_scheme) = url.split_once("//")?;

        let without_credentials = match after_scheme.split_once('@') {
            Some((_, rest)) => rest,
            None => after_scheme,
        };

        let authority = without_credentials
            .split('/')
            .next()
            .unwrap_or(without_credentials);

        let (host, port) = match authority.rsplit_once(':') {
            Some((host, port)) => (host, port.parse::<u16>().ok()?),
            None => (authority, default_port),
        };

        if host.is_empty() || port == 0 {
            return None;
        }

        Some(Self::new(host, port))
    }

    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn is_parsed(&self) -> bool {
        self.host.is_some()
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.host {
            Some(host) => write!(f, "{}:{}", host, self.port),
            None => write!(f, "<unparsed>:{}", self.port),
        }
    }
}

/// Which side of the relay an endpoint sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointRole {
    Source,
    Destination,
}

impl EndpointRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            EndpointRole::Source => "source",
            EndpointRole::Destination => "destination",
        }
    }
}

impl fmt::Display for EndpointRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
