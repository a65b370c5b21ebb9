use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use grammarlite_core::overlay::{Anchor, Association, Rect, DEFAULT_OFFSET_PX};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct DaemonConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub check: CheckConfig,
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub overlay: OverlayConfig,
    #[serde(default)]
    pub indicator: IndicatorConfig,
}

impl DaemonConfig {
    pub fn load() -> Result<Self> {
        let config_path = resolve_config_path();
        if config_path.exists() {
            let raw = fs::read_to_string(&config_path)
                .with_context(|| format!("failed to read config file {}", config_path.display()))?;
            return Self::parse(&raw)
                .with_context(|| format!("failed to parse TOML from {}", config_path.display()));
        }

        Ok(DaemonConfig::default())
    }

    pub fn parse(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }
}

fn resolve_config_path() -> PathBuf {
    if let Ok(path) = env::var("GRAMMARLITE_CONFIG") {
        return Path::new(&path).to_path_buf();
    }

    if let Some(base) = dirs::config_dir() {
        return base.join("grammarlite").join("config.toml");
    }

    Path::new("/tmp/grammarlite.toml").to_path_buf()
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_socket_path")]
    pub socket_path: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            socket_path: default_socket_path(),
        }
    }
}

fn default_socket_path() -> PathBuf {
    Path::new("/tmp/grammarlite.sock").to_path_buf()
}

#[derive(Debug, Clone, Deserialize)]
pub struct CheckConfig {
    #[serde(default = "default_check_enabled")]
    pub enable: bool,
    #[serde(default = "default_trigger_delay_ms")]
    pub trigger_delay_ms: u64,
    #[serde(default = "default_min_chars")]
    pub min_chars: usize,
    #[serde(default = "default_dismiss_grace_ms")]
    pub dismiss_grace_ms: u64,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            enable: default_check_enabled(),
            trigger_delay_ms: default_trigger_delay_ms(),
            min_chars: default_min_chars(),
            dismiss_grace_ms: default_dismiss_grace_ms(),
        }
    }
}

fn default_check_enabled() -> bool {
    true
}

fn default_trigger_delay_ms() -> u64 {
    1500
}

fn default_min_chars() -> usize {
    grammarlite_core::check::DEFAULT_MIN_CHARS
}

fn default_dismiss_grace_ms() -> u64 {
    200
}

#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Zero leaves requests unbounded.
    #[serde(default)]
    pub request_timeout_ms: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            request_timeout_ms: 0,
        }
    }
}

fn default_endpoint() -> String {
    "http://127.0.0.1:8000/correct".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct OverlayConfig {
    #[serde(default)]
    pub association: Association,
    #[serde(default)]
    pub anchor: Anchor,
    #[serde(default = "default_offset_px")]
    pub offset_px: f64,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            association: Association::default(),
            anchor: Anchor::default(),
            offset_px: default_offset_px(),
        }
    }
}

fn default_offset_px() -> f64 {
    DEFAULT_OFFSET_PX
}

#[derive(Debug, Clone, Deserialize)]
pub struct IndicatorConfig {
    #[serde(default)]
    pub enable: bool,
    #[serde(default = "default_indicator_left")]
    pub left: f64,
    #[serde(default = "default_indicator_top")]
    pub top: f64,
    #[serde(default = "default_indicator_size")]
    pub width: f64,
    #[serde(default = "default_indicator_size")]
    pub height: f64,
}

impl IndicatorConfig {
    pub fn rect(&self) -> Rect {
        Rect {
            left: self.left,
            top: self.top,
            width: self.width,
            height: self.height,
        }
    }
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            enable: false,
            left: default_indicator_left(),
            top: default_indicator_top(),
            width: default_indicator_size(),
            height: default_indicator_size(),
        }
    }
}

fn default_indicator_left() -> f64 {
    20.0
}

fn default_indicator_top() -> f64 {
    20.0
}

fn default_indicator_size() -> f64 {
    28.0
}
