use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tokio::signal;
use tracing::{error, info};

use rtsp_rtmp_relay::{
    serve_metrics, Config, ProcessLauncher, PrometheusReporter, SupervisorService,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse configuration
    let config = Config::parse();

    // Initialize logging
    let filter = if config.verbose { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();

    if let Err(e) = config.validate() {
        error!("Configuration validation failed: {}", e);
        return Err(e);
    }

    PrometheusReporter::init_metrics()?;

    // Convert CLI config to domain configs
    let relay_config = config
        .to_relay_config()
        .map_err(|e| anyhow::anyhow!("{}", e))?;
    let backoff_policy = config
        .to_backoff_policy()
        .map_err(|e| anyhow::anyhow!("{}", e))?;
    let probe = config.to_probe().map_err(|e| anyhow::anyhow!("{}", e))?;

    info!("Starting RTSP to RTMP relay v{}", env!("CARGO_PKG_VERSION"));
    info!("  RTSP endpoint: {}", relay_config.source());
    info!("  RTMP endpoint: {}", relay_config.destination());
    info!("  Relay: {} ({} profile)", config.relay_program, relay_config.profile());
    info!(
        "  Retry delay: {}s .. {}s",
        backoff_policy.initial_delay().as_secs(),
        backoff_policy.max_delay().as_secs()
    );

    if let Some(metrics_port) = config.metrics_port {
        tokio::spawn(async move {
            serve_metrics(metrics_port).await;
        });
        info!("  Metrics: http://0.0.0.0:{}/metrics", metrics_port);
    }

    // Create infrastructure implementations (dependency injection)
    let launcher = Box::new(ProcessLauncher::new(config.relay_program.clone()));
    let metrics_reporter = Arc::new(PrometheusReporter::new());
    let running = Arc::new(AtomicBool::new(false));

    let mut supervisor = SupervisorService::new(
        relay_config,
        Box::new(probe),
        launcher,
        backoff_policy,
        metrics_reporter,
    )
    .with_running_flag(running.clone());

    // SIGINT/SIGTERM stop the service at once. The relay child is not waited
    // for; it is left to the OS and whatever supervises this process.
    // Handlers are registered here, before the loop can start a relay.
    let shutdown = shutdown_signal()?;
    tokio::spawn(async move {
        shutdown.await;
        running.store(false, Ordering::SeqCst);
        info!("Service stopped by user");
        std::process::exit(0);
    });

    // The loop blocks on probes, sleeps and the relay process
    let supervisor_handle = tokio::task::spawn_blocking(move || {
        if let Err(e) = supervisor.run() {
            error!("Supervisor error: {}", e);
        }
    });

    supervisor_handle.await?;

    info!("Relay shutdown complete");
    Ok(())
}

/// Register SIGINT and SIGTERM handlers; the returned future resolves on either
#[cfg(unix)]
fn shutdown_signal() -> std::io::Result<impl Future<Output = ()>> {
    use signal::unix::{signal, SignalKind};

    let mut interrupt = signal(SignalKind::interrupt())?;
    let mut terminate = signal(SignalKind::terminate())?;

    Ok(async move {
        tokio::select! {
            _ = interrupt.recv() => {},
            _ = terminate.recv() => {},
        }
    })
}

#[cfg(not(unix))]
fn shutdown_signal() -> std::io::Result<impl Future<Output = ()>> {
    Ok(async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    })
}
