use crate::domain::value_objects::Endpoint;

/// Port for endpoint liveness checks
pub trait ReachabilityProbe: Send {
    /// True if a TCP connection to the endpoint could be opened.
    /// Every failure cause collapses to `false`, including an unparsed endpoint.
    fn probe(&self, endpoint: &Endpoint) -> bool;
}
