use crate::domain::range::RangeSpec;
use anyhow::{Context, anyhow};
use chrono_tz::Tz;
use serde::Deserialize;
use std::net::SocketAddr;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AuthMode {
    /// Whatever identity the Azure CLI is logged in as.
    #[default]
    AzureCli,
    Static,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GatewayConfig {
    pub cluster_url: String,
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_table")]
    pub table: String,
    #[serde(default)]
    pub auth: AuthMode,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default = "default_listen_addr")]
    pub listen_addr: SocketAddr,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PollerConfig {
    #[serde(default = "default_gateway_url")]
    pub gateway_url: String,
    #[serde(default)]
    pub range: RangeSpec,
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

fn default_database() -> String {
    "iotdb".to_string()
}

fn default_table() -> String {
    "telemetry".to_string()
}

fn default_listen_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}

fn default_gateway_url() -> String {
    "http://127.0.0.1:8080".to_string()
}

fn default_interval_secs() -> u64 {
    30
}

fn default_timezone() -> String {
    "UTC".to_string()
}

impl GatewayConfig {
    fn validate(self) -> anyhow::Result<Self> {
        if self.cluster_url.trim().is_empty() {
            anyhow::bail!("cluster_url must not be empty");
        }
        if self.auth == AuthMode::Static && self.access_token.as_deref().unwrap_or("").is_empty() {
            anyhow::bail!("access_token is required when auth = \"static\"");
        }
        Ok(self)
    }
}

impl PollerConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn timezone(&self) -> anyhow::Result<Tz> {
        self.timezone
            .parse()
            .map_err(|e| anyhow!("Invalid timezone {}: {}", self.timezone, e))
    }

    fn validate(self) -> anyhow::Result<Self> {
        if self.interval_secs == 0 {
            anyhow::bail!("interval_secs must be greater than zero");
        }
        self.timezone()?;
        Ok(self)
    }
}

pub fn load_gateway_config() -> anyhow::Result<GatewayConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/gateway").required(false))
        .add_source(config::Environment::with_prefix("ADX"))
        .build()?;

    parse_gateway_config(settings)
}

pub fn load_poller_config() -> anyhow::Result<PollerConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/poller").required(false))
        .add_source(config::Environment::with_prefix("POLLER"))
        .build()?;

    parse_poller_config(settings)
}

fn parse_gateway_config(settings: config::Config) -> anyhow::Result<GatewayConfig> {
    let config: GatewayConfig = settings
        .try_deserialize()
        .context("Invalid gateway configuration")?;
    config.validate()
}

fn parse_poller_config(settings: config::Config) -> anyhow::Result<PollerConfig> {
    let config: PollerConfig = settings
        .try_deserialize()
        .context("Invalid poller configuration")?;
    config.validate()
}
