mod backoff;
mod backoff_policy;
mod endpoint;
mod relay_config;
mod relay_profile;
mod relay_state;

pub use backoff::Backoff;
pub use backoff_policy::BackoffPolicy;
pub use endpoint::{Endpoint, EndpointRole, DEFAULT_RTMP_PORT, DEFAULT_RTSP_PORT};
pub use relay_config::RelayConfig;
pub use relay_profile::RelayProfile;
pub use relay_state::RelayState;
