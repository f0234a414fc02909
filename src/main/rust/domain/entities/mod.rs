mod relay_lifecycle;
mod relay_session;

pub use relay_lifecycle::{RelayLifecycle, StateTransition};
pub use relay_session::{RelayExit, RelaySession};
