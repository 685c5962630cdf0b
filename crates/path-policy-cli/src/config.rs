use serde::Deserialize;
use std::path::{Path, PathBuf};

use path_policy::Platform;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Optional YAML file adjusting the built-in tool table.
    #[serde(default)]
    pub overrides_file: Option<PathBuf>,
    /// Pin the platform instead of detecting the host.
    #[serde(default)]
    pub platform: Option<Platform>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_usage_log_path")]
    pub usage_log_path: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            usage_log_path: default_usage_log_path(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_usage_log_path() -> PathBuf {
    PathBuf::from("tool_usage.jsonl")
}

/// Load configuration from a YAML file.
///
/// Returns `None` when the file does not exist; the caller falls back to
/// [`Config::default`] and warns once logging is up.
pub fn load(path: &Path) -> anyhow::Result<Option<Config>> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

    parse(&contents)
        .map(Some)
        .map_err(|e| anyhow::anyhow!("failed to parse config file {}: {e}", path.display()))
}

fn parse(yaml: &str) -> Result<Config, serde_yml::Error> {
    serde_yml::from_str(yaml)
}
