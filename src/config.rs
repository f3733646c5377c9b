use std::time::Duration;

use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub api: ApiConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = ApiConfig::default();
        let api = ApiConfig {
            base_url: std::env::var("ECOCART_BASE_URL").unwrap_or(defaults.base_url),
            timeout_secs: std::env::var("ECOCART_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(defaults.timeout_secs),
            connect_timeout_secs: std::env::var("ECOCART_CONNECT_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(defaults.connect_timeout_secs),
        };
        anyhow::ensure!(!api.base_url.trim().is_empty(), "ECOCART_BASE_URL is empty");
        Ok(Self { api })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_local_service() {
        let cfg = ApiConfig::default();
        assert_eq!(cfg.base_url, "http://127.0.0.1:8000");
        assert_eq!(cfg.timeout(), Duration::from_secs(30));
        assert_eq!(cfg.connect_timeout(), Duration::from_secs(10));
    }
}
