use std::process::{Child, Command, ExitStatus, Stdio};

use super::{CommandBuilder, DEFAULT_RELAY_PROGRAM};
use crate::domain::entities::{RelayExit, RelaySession};
use crate::domain::errors::{DomainError, Result};
use crate::domain::ports::{RelayHandle, RelayLauncher};
use crate::domain::value_objects::RelayConfig;

/// Spawns the relay tool as a child process.
///
/// stdout and stderr are inherited so the tool's own error output reaches
/// the service log unchanged.
#[derive(Debug, Clone)]
pub struct ProcessLauncher {
    program: String,
}

impl ProcessLauncher {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn build_command(&self, config: &RelayConfig) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(CommandBuilder::build_args(config))
            .stdin(Stdio::null());
        command
    }
}

impl Default for ProcessLauncher {
    fn default() -> Self {
        Self::new(DEFAULT_RELAY_PROGRAM)
    }
}

impl RelayLauncher for ProcessLauncher {
    fn launch(&mut self, config: &RelayConfig) -> Result<Box<dyn RelayHandle>> {
        let child = self.build_command(config).spawn().map_err(|e| {
            DomainError::RelayLaunchFailed(format!("failed to spawn {}: {}", self.program, e))
        })?;

        let session = RelaySession::new(Some(child.id()));
        tracing::debug!(
            session_id = %session.id(),
            pid = child.id(),
            program = %self.program,
            "Relay process spawned"
        );

        Ok(Box::new(ChildRelay { session, child }))
    }
}

/// Relay process owned for its whole lifetime
pub struct ChildRelay {
    session: RelaySession,
    child: Child,
}

impl RelayHandle for ChildRelay {
    fn session(&self) -> &RelaySession {
        &self.session
    }

    fn wait(mut self: Box<Self>) -> Result<RelayExit> {
        let status = self
            .child
            .wait()
            .map_err(|e| DomainError::RelayWaitFailed(e.to_string()))?;
        Ok(exit_from_status(status))
    }
}

fn exit_from_status(status: ExitStatus) -> RelayExit {
    if let Some(code) = status.code() {
        return RelayExit::with_code(code);
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return RelayExit::with_signal(signal);
        }
    }

    RelayExit::default()
}
