use std::path::Path;
use std::path::PathBuf;

use tokio::signal::unix::signal;
use tokio::signal::unix::SignalKind;
use tokio::sync::watch;
use tracing::error;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Layer;
use twinstream::utils::file_io::open_file_for_append;
use twinstream::Error;
use twinstream::Result;
use twinstream::TelemetryConfig;
use twinstream::TelemetryEngine;
use twinstream::TelemetryEngineBuilder;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> Result<()> {
    let settings = TelemetryConfig::load(None)?;

    // Initializing Logs
    let _guard = init_observability(settings.log_dir.clone())?;

    // Initializing Shutdown Signal
    let (graceful_tx, mut graceful_rx) = watch::channel(());

    // Build Engine
    let engine = TelemetryEngineBuilder::from_config(settings).build()?;

    // Demo consumers standing in for the chart/list/heatmap panels
    spawn_consumers(&engine);

    engine.start();
    info!("Telemetry engine started. Waiting for CTRL+C signal...");

    // Listen on Shutdown Signal
    tokio::spawn(async {
        if let Err(e) = graceful_shutdown(graceful_tx).await {
            error!("Failed to shutdown: {:?}", e);
        }
    });

    if graceful_rx.changed().await.is_err() {
        error!("shutdown channel closed unexpectedly");
    }
    engine.stop();

    println!("Exiting program.");
    Ok(())
}

fn spawn_consumers(engine: &TelemetryEngine) {
    let (_time_handle, mut time_rx) = engine.subscribe_time_advanced();
    tokio::spawn(async move {
        while let Some(timestamp_ms) = time_rx.recv().await {
            info!("time advanced to {}", timestamp_ms);
        }
    });

    let (_values_handle, mut values_rx) = engine.subscribe_values_changed();
    tokio::spawn(async move {
        while let Some(latest) = values_rx.recv().await {
            info!("{} sensors reported new values", latest.len());
        }
    });
}

async fn graceful_shutdown(graceful_tx: watch::Sender<()>) -> Result<()> {
    info!("Shutdown server..");
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;
    tokio::select! {
        _ = sigint.recv() => {
            info!("SIGINT detected.");
        },
        _ = sigterm.recv() => {
            info!("SIGTERM detected.");
        },
        _ = tokio::signal::ctrl_c() => {
            info!("Ctrl+C detected.");
        },
    }

    graceful_tx.send(()).map_err(|e| {
        error!("Failed to send shutdown signal: {}", e);
        Error::SignalSenderClosed(format!("Failed to send shutdown signal: {}", e))
    })?;

    info!("Shutdown completed");
    Ok(())
}

pub fn init_observability(log_dir: Option<PathBuf>) -> Result<Option<WorkerGuard>> {
    match log_dir {
        Some(dir) => {
            let log_file = open_file_for_append(Path::new(&dir).join("twinstream.log"))?;

            let (non_blocking, guard) = tracing_appender::non_blocking(log_file);
            let base_subscriber = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_filter(EnvFilter::from_default_env());
            tracing_subscriber::registry().with(base_subscriber).init();

            Ok(Some(guard))
        }
        None => {
            let base_subscriber =
                tracing_subscriber::fmt::layer().with_filter(EnvFilter::from_default_env());
            tracing_subscriber::registry().with(base_subscriber).init();

            Ok(None)
        }
    }
}
