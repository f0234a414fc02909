use std::time::Duration;

use clap::Parser;

use crate::domain::value_objects::{BackoffPolicy, RelayConfig, RelayProfile};
use crate::infrastructure::network::TcpProbe;
use crate::infrastructure::process::DEFAULT_RELAY_PROGRAM;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "rtsp-rtmp-relay",
    version,
    about = "Keeps an RTSP camera relayed to an RTMP ingest, restarting the relay tool on failure"
)]
pub struct Config {
    /// RTSP source URL (credentials allowed)
    #[arg(long, env = "RTSP_URL")]
    pub rtsp_url: String,

    /// RTMP destination URL
    #[arg(long, env = "RTMP_URL")]
    pub rtmp_url: String,

    /// Initial retry delay in seconds
    #[arg(long, env = "RETRY_INITIAL", default_value = "5")]
    pub retry_initial: u64,

    /// Maximum retry delay in seconds
    #[arg(long, env = "RETRY_MAX", default_value = "60")]
    pub retry_max: u64,

    /// TCP reachability probe timeout in seconds
    #[arg(long, env = "PROBE_TIMEOUT", default_value = "3")]
    pub probe_timeout: u64,

    /// Relay tool invocation profile: wallclock or reconnect
    #[arg(long, env = "RELAY_PROFILE", default_value = "wallclock")]
    pub relay_profile: RelayProfile,

    /// Relay tool executable
    #[arg(long, env = "RELAY_PROGRAM", default_value = DEFAULT_RELAY_PROGRAM)]
    pub relay_program: String,

    /// Metrics server port (disabled when unset)
    #[arg(long, env = "METRICS_PORT")]
    pub metrics_port: Option<u16>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Minimum allowed port (ports below 1024 are privileged)
const MIN_USER_PORT: u16 = 1024;

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.rtsp_url.trim().is_empty() {
            anyhow::bail!("RTSP_URL must be defined");
        }

        if self.rtmp_url.trim().is_empty() {
            anyhow::bail!("RTMP_URL must be defined");
        }

        if self.retry_initial == 0 {
            anyhow::bail!("Initial retry delay cannot be 0");
        }

        if self.retry_max < self.retry_initial {
            anyhow::bail!(
                "Maximum retry delay ({}) cannot be less than initial delay ({})",
                self.retry_max,
                self.retry_initial
            );
        }

        if self.probe_timeout == 0 {
            anyhow::bail!("Probe timeout cannot be 0");
        }

        if self.relay_program.trim().is_empty() {
            anyhow::bail!("Relay program cannot be empty");
        }

        if let Some(port) = self.metrics_port {
            Self::validate_port(port, "metrics")?;
        }

        Ok(())
    }

    fn validate_port(port: u16, name: &str) -> anyhow::Result<()> {
        if port == 0 {
            anyhow::bail!("Invalid {} port: port cannot be 0", name);
        }
        if port < MIN_USER_PORT {
            anyhow::bail!(
                "Invalid {} port: {} is a privileged port (< {}). Use a port >= {}",
                name,
                port,
                MIN_USER_PORT,
                MIN_USER_PORT
            );
        }
        Ok(())
    }

    pub fn to_relay_config(&self) -> crate::domain::errors::Result<RelayConfig> {
        Ok(RelayConfig::new(self.rtsp_url.clone(), self.rtmp_url.clone())?
            .with_profile(self.relay_profile))
    }

    pub fn to_backoff_policy(&self) -> crate::domain::errors::Result<BackoffPolicy> {
        BackoffPolicy::doubling(
            Duration::from_secs(self.retry_initial),
            Duration::from_secs(self.retry_max),
        )
    }

    pub fn to_probe(&self) -> crate::domain::errors::Result<TcpProbe> {
        TcpProbe::new(Duration::from_secs(self.probe_timeout))
    }
}
