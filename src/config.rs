use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub latency: LatencyConfig,
    #[serde(default)]
    pub mock: MockConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Simulated round-trip time per mock endpoint, in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatencyConfig {
    #[serde(default = "default_products_ms")]
    pub products_ms: u64,
    #[serde(default = "default_write_ms")]
    pub add_product_ms: u64,
    #[serde(default = "default_write_ms")]
    pub metrics_ms: u64,
    #[serde(default = "default_write_ms")]
    pub chart_ms: u64,
    #[serde(default = "default_products_ms")]
    pub data_sources_ms: u64,
    #[serde(default = "default_chat_ms")]
    pub chat_ms: u64,
    #[serde(default = "default_write_ms")]
    pub settings_ms: u64,
    #[serde(default = "default_write_ms")]
    pub auth_ms: u64,
}

fn default_products_ms() -> u64 {
    800
}

fn default_write_ms() -> u64 {
    1000
}

fn default_chat_ms() -> u64 {
    1500
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            products_ms: default_products_ms(),
            add_product_ms: default_write_ms(),
            metrics_ms: default_write_ms(),
            chart_ms: default_write_ms(),
            data_sources_ms: default_products_ms(),
            chat_ms: default_chat_ms(),
            settings_ms: default_write_ms(),
            auth_ms: default_write_ms(),
        }
    }
}

impl LatencyConfig {
    /// Every endpoint answers immediately. Handy for scripted runs.
    pub fn instant() -> Self {
        Self {
            products_ms: 0,
            add_product_ms: 0,
            metrics_ms: 0,
            chart_ms: 0,
            data_sources_ms: 0,
            chat_ms: 0,
            settings_ms: 0,
            auth_ms: 0,
        }
    }

    pub fn auth(&self) -> Duration {
        Duration::from_millis(self.auth_ms)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MockConfig {
    /// Fixed seed for ids and assistant replies. Unset means entropy-seeded.
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_report_path")]
    pub path: String,
}

fn default_report_path() -> String {
    "output/dashboard.html".into()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_report_path(),
        }
    }
}

/// Upper bound on any single simulated delay.
const MAX_LATENCY_MS: u64 = 60_000;

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    /// Like [`Config::load`], but a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::config(format!("parse config: {e}")))
    }

    pub fn validate(&self) -> Result<()> {
        let l = &self.latency;
        let delays = [
            ("products_ms", l.products_ms),
            ("add_product_ms", l.add_product_ms),
            ("metrics_ms", l.metrics_ms),
            ("chart_ms", l.chart_ms),
            ("data_sources_ms", l.data_sources_ms),
            ("chat_ms", l.chat_ms),
            ("settings_ms", l.settings_ms),
            ("auth_ms", l.auth_ms),
        ];
        for (name, ms) in delays {
            if ms > MAX_LATENCY_MS {
                return Err(Error::config(format!(
                    "latency.{name} = {ms} exceeds {MAX_LATENCY_MS} ms"
                )));
            }
        }
        if self.output.path.trim().is_empty() {
            return Err(Error::config("output.path must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let cfg = Config::from_toml("").unwrap();
        assert_eq!(cfg.latency.products_ms, 800);
        assert_eq!(cfg.latency.chat_ms, 1500);
        assert_eq!(cfg.latency.auth_ms, 1000);
        assert!(cfg.mock.seed.is_none());
        assert_eq!(cfg.output.path, "output/dashboard.html");
        cfg.validate().unwrap();
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = Config::from_toml("[latency]\nchat_ms = 10\n\n[mock]\nseed = 7\n").unwrap();
        assert_eq!(cfg.latency.chat_ms, 10);
        assert_eq!(cfg.latency.metrics_ms, 1000);
        assert_eq!(cfg.mock.seed, Some(7));
    }

    #[test]
    fn rejects_absurd_latency() {
        let cfg = Config::from_toml("[latency]\nmetrics_ms = 120000\n").unwrap();
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("metrics_ms"));
    }

    #[test]
    fn rejects_blank_output_path() {
        let cfg = Config::from_toml("[output]\npath = \"  \"\n").unwrap();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn malformed_toml_is_config_error() {
        let err = Config::from_toml("[latency\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let cfg = Config::load_or_default(Path::new("/nonexistent/bizdash.toml")).unwrap();
        assert_eq!(cfg.latency.data_sources_ms, 800);
    }
}
