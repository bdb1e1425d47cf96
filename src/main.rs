use anyhow::{Context, Result};
use awair_exporter::collector::AirCollector;
use awair_exporter::config::Config;
use awair_exporter::exposition::Exposition;
use awair_exporter::{cli, http};
use clap::Parser;
use std::sync::Arc;
use tokio::net::TcpListener;

fn init_tracing() -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,awair_exporter=info".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .try_init()
        .map_err(|err| anyhow::anyhow!(err.to_string()))?;
    Ok(())
}

async fn bind_listener(addr: &str) -> Result<TcpListener> {
    match TcpListener::bind(addr).await {
        Ok(listener) => Ok(listener),
        Err(err) if err.kind() == std::io::ErrorKind::AddrInUse => {
            anyhow::bail!(
                "Failed to bind awair-exporter listener on {addr}: port already in use. Re-run with --address to choose another address.",
            );
        }
        Err(err) => {
            Err(err).with_context(|| format!("failed to bind awair-exporter listener on {addr}"))
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Args::parse();
    init_tracing()?;
    let config = Config::from_args(args)?;

    for device in config.registry.iter() {
        tracing::info!(sensor=%device.name, address=%device.address, "registered sensor");
    }

    let collector = AirCollector::new(config.registry.clone(), config.request_timeout)
        .context("failed to build HTTP client")?;
    let exposition = Arc::new(Exposition::new(collector.describe())?);
    let app = http::router(http::HttpState {
        collector,
        exposition,
    });

    let listener = bind_listener(&config.listen_address).await?;
    tracing::info!(
        bind=%config.listen_address,
        sensors=config.registry.len(),
        "awair exporter listening"
    );
    let http_handle = tokio::spawn(async move { axum::serve(listener, app).await });

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("shutdown signal received");
        }
        res = http_handle => {
            match res {
                Ok(Ok(())) => tracing::warn!("HTTP server exited"),
                Ok(Err(err)) => return Err(err).context("HTTP server failed"),
                Err(err) => return Err(err).context("HTTP server task failed"),
            }
        }
    }

    Ok(())
}
