use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use leafid_core::InfoSource;
use leafid_engine::{MockSettings, RemoteSettings};
use serde::Deserialize;

use super::logging::LogDestination;

pub const DEFAULT_CONFIG_FILE: &str = "leafid.ron";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub enum BackendConfig {
    /// Fabricated predictions after a random delay.
    Mock { min_delay_ms: u64, max_delay_ms: u64 },
    /// The HTTP classification service.
    Remote {
        base_url: String,
        #[serde(default = "default_request_timeout_ms")]
        request_timeout_ms: u64,
        #[serde(default)]
        remote_plant_info: bool,
    },
}

impl Default for BackendConfig {
    fn default() -> Self {
        BackendConfig::Mock {
            min_delay_ms: 1500,
            max_delay_ms: 3000,
        }
    }
}

fn default_request_timeout_ms() -> u64 {
    60_000
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub backend: BackendConfig,
    pub log_destination: LogDestination,
    pub tick_interval_ms: u64,
    /// Flag mock results as simulated. Ignored for the remote backend.
    pub demo_notice: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
            log_destination: LogDestination::default(),
            tick_interval_ms: 500,
            demo_notice: true,
        }
    }
}

impl AppConfig {
    pub fn info_source(&self) -> InfoSource {
        match self.backend {
            BackendConfig::Remote {
                remote_plant_info: true,
                ..
            } => InfoSource::Remote,
            _ => InfoSource::Static,
        }
    }

    pub fn demo_notice_enabled(&self) -> bool {
        self.demo_notice && matches!(self.backend, BackendConfig::Mock { .. })
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }

    pub fn mock_settings(&self) -> Option<MockSettings> {
        match self.backend {
            BackendConfig::Mock {
                min_delay_ms,
                max_delay_ms,
            } => Some(MockSettings {
                min_delay: Duration::from_millis(min_delay_ms),
                max_delay: Duration::from_millis(max_delay_ms),
                ..MockSettings::default()
            }),
            BackendConfig::Remote { .. } => None,
        }
    }

    pub fn remote_settings(&self) -> Option<RemoteSettings> {
        match &self.backend {
            BackendConfig::Remote {
                base_url,
                request_timeout_ms,
                ..
            } => Some(RemoteSettings {
                base_url: base_url.clone(),
                request_timeout: Duration::from_millis(*request_timeout_ms),
                ..RemoteSettings::default()
            }),
            BackendConfig::Mock { .. } => None,
        }
    }
}

/// Reads the config file. `Ok(None)` when it does not exist.
pub fn load(path: &Path) -> anyhow::Result<Option<AppConfig>> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read config {}", path.display()))
        }
    };
    let config = ron::from_str(&content)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    Ok(Some(config))
}
