use std::time::Duration;

use serde::Deserialize;
use strokecast_core::error::{Result, StrokecastError};

pub const DEFAULT_ENDPOINT: &str = "ws://localhost:8080";

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    pub version: u32,

    #[serde(default)]
    pub link: LinkSection,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            version: 1,
            link: LinkSection::default(),
        }
    }
}

impl AgentConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(StrokecastError::BadConfig(format!(
                "unsupported config version: {}",
                self.version
            )));
        }
        self.link.validate()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LinkSection {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_reconnect_delay_ms")]
    pub reconnect_delay_ms: u64,

    /// Outbound frames buffered per connection before new ones are dropped.
    #[serde(default = "default_outbound_queue")]
    pub outbound_queue: usize,
}

impl Default for LinkSection {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            reconnect_delay_ms: default_reconnect_delay_ms(),
            outbound_queue: default_outbound_queue(),
        }
    }
}

impl LinkSection {
    pub fn validate(&self) -> Result<()> {
        match self.endpoint.strip_prefix("ws://") {
            Some(rest) if !rest.is_empty() => {}
            _ => {
                return Err(StrokecastError::BadConfig(
                    "link.endpoint must be a ws:// url".into(),
                ))
            }
        }
        if !(100..=600_000).contains(&self.reconnect_delay_ms) {
            return Err(StrokecastError::BadConfig(
                "link.reconnect_delay_ms must be between 100 and 600000".into(),
            ));
        }
        if !(1..=65_536).contains(&self.outbound_queue) {
            return Err(StrokecastError::BadConfig(
                "link.outbound_queue must be between 1 and 65536".into(),
            ));
        }
        Ok(())
    }

    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_millis(self.reconnect_delay_ms)
    }
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.into()
}
fn default_reconnect_delay_ms() -> u64 {
    5000
}
fn default_outbound_queue() -> usize {
    1024
}
