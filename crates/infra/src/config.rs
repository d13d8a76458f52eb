//! Process configuration read from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use lineforge_sales::{EngineConfig, ScanPolicy};

pub const BIND_ADDR_VAR: &str = "LINEFORGE_BIND_ADDR";
pub const SCAN_POLICY_VAR: &str = "LINEFORGE_SCAN_POLICY";
pub const FIXTURES_VAR: &str = "LINEFORGE_FIXTURES";

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var}: invalid socket address '{value}'")]
    InvalidBindAddr { var: &'static str, value: String },
    #[error("{var}: {message}")]
    InvalidScanPolicy { var: &'static str, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub engine: EngineConfig,
    /// Catalog fixture file; `None` starts with an empty catalog.
    pub fixtures: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let raw_addr = get(BIND_ADDR_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_addr
            .trim()
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidBindAddr {
                var: BIND_ADDR_VAR,
                value: raw_addr.clone(),
            })?;

        let scan_policy = match get(SCAN_POLICY_VAR) {
            Some(raw) => raw
                .parse::<ScanPolicy>()
                .map_err(|e| ConfigError::InvalidScanPolicy {
                    var: SCAN_POLICY_VAR,
                    message: e.to_string(),
                })?,
            None => ScanPolicy::default(),
        };

        Ok(Self {
            bind_addr,
            engine: EngineConfig::default().with_scan_policy(scan_policy),
            fixtures: get(FIXTURES_VAR).map(PathBuf::from),
        })
    }
}
