//! strokecast agent
//!
//! - Counts keystrokes reported by the host over stdin (JSON lines)
//! - Streams counts to the telemetry endpoint over a reconnecting WebSocket
//! - Status line + confirmations on stdout, logs on stderr

use std::sync::Arc;

use tracing_subscriber::{fmt, EnvFilter};

use strokecast_agent::config;
use strokecast_agent::host::{stdio, StdioHost};
use strokecast_agent::link::Controller;
use strokecast_agent::transport::WsTransport;
use strokecast_core::error::{Result, StrokecastError};

const CONFIG_ENV: &str = "STROKECAST_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "strokecast.yaml";

#[tokio::main]
async fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let path = std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let cfg = config::load_or_default(&path)?;

    let host = Arc::new(StdioHost::new());
    let (controller, handle) = Controller::new(cfg.link, host.clone(), Arc::new(WsTransport::new()));
    let link = tokio::spawn(controller.run());

    tracing::info!(config = %path, "strokecast-agent started");
    tokio::select! {
        res = stdio::pump_stdin(&host, &handle) => {
            if let Err(e) = res {
                tracing::error!(code = e.code().as_str(), error = %e, "host input stopped");
            }
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("interrupted");
        }
    }

    handle.shutdown().await;
    link.await
        .map_err(|e| StrokecastError::Internal(format!("link task failed: {e}")))?;
    tracing::info!("strokecast-agent stopped");
    Ok(())
}
