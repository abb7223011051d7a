use std::fs;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

/// Line speed of the accessory link.
pub const DEFAULT_BAUD_RATE: u32 = 19200;

/// Suffix on a `--port` value marking the device as obfuscated.
const OBFUSCATED_SUFFIX: &str = "obfuscated";

/// Monitor configuration, loaded from TOML.
///
/// ```toml
/// baud_rate = 19200
///
/// [[source]]
/// path = "/dev/ttyUSB2"
/// obfuscated = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_baud_rate")]
    pub baud_rate: u32,
    #[serde(default, rename = "source")]
    pub sources: Vec<SourceConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    pub path: String,
    /// Label printed with each frame; defaults to the last character of
    /// the device path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub obfuscated: bool,
}

fn default_baud_rate() -> u32 {
    DEFAULT_BAUD_RATE
}

impl Default for Config {
    /// Two plain and two obfuscated adapters on the first four USB serial
    /// ports.
    fn default() -> Self {
        let sources = (0..4)
            .map(|idx| SourceConfig {
                path: format!("/dev/ttyUSB{idx}"),
                label: None,
                obfuscated: idx >= 2,
            })
            .collect();
        Self {
            baud_rate: DEFAULT_BAUD_RATE,
            sources,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path.display(), e))?;
        Ok(config)
    }
}

impl SourceConfig {
    pub fn label(&self) -> String {
        match &self.label {
            Some(label) => label.clone(),
            None => self
                .path
                .chars()
                .last()
                .map(String::from)
                .unwrap_or_default(),
        }
    }
}

/// Parses `PATH` or `PATH:obfuscated`.
impl FromStr for SourceConfig {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (path, obfuscated) = match value.rsplit_once(':') {
            Some((path, OBFUSCATED_SUFFIX)) => (path, true),
            _ => (value, false),
        };
        if path.is_empty() {
            return Err("device path must not be empty".to_string());
        }
        Ok(Self {
            path: path.to_string(),
            label: None,
            obfuscated,
        })
    }
}
