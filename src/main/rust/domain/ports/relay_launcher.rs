use crate::domain::entities::{RelayExit, RelaySession};
use crate::domain::errors::Result;
use crate::domain::value_objects::RelayConfig;

/// Port for starting the external relay tool
pub trait RelayLauncher: Send {
    /// Spawn one relay process for `config`
    fn launch(&mut self, config: &RelayConfig) -> Result<Box<dyn RelayHandle>>;
}

/// A live relay process.
///
/// `wait` consumes the handle, so a session cannot be waited on twice and the
/// caller cannot hold a second one before the first has been reaped.
pub trait RelayHandle: Send {
    fn session(&self) -> &RelaySession;

    /// Block until the process terminates for any reason
    fn wait(self: Box<Self>) -> Result<RelayExit>;
}
