//! Agent config loader (strict parsing).

pub mod schema;

use std::fs;
use std::io::ErrorKind;

use strokecast_core::error::{Result, StrokecastError};

pub use schema::{AgentConfig, LinkSection};

pub fn load_from_file(path: &str) -> Result<AgentConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| StrokecastError::BadConfig(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<AgentConfig> {
    let cfg: AgentConfig = serde_yaml::from_str(s)
        .map_err(|e| StrokecastError::BadConfig(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Like [`load_from_file`], but a missing file yields the built-in defaults.
pub fn load_or_default(path: &str) -> Result<AgentConfig> {
    match fs::metadata(path) {
        Ok(_) => load_from_file(path),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::info!(%path, "config file not found, using defaults");
            Ok(AgentConfig::default())
        }
        Err(e) => Err(StrokecastError::BadConfig(format!("stat config failed: {e}"))),
    }
}
