use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Runtime configuration stored in ~/.castaudio/config.toml. Every field has
/// a default, and a missing file means all defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CastConfig {
    #[serde(default = "default_service_type")]
    pub service_type: String,
    /// Discovery read deadline; callers use values between 1 and 5 seconds.
    #[serde(default = "default_discovery_timeout")]
    pub discovery_timeout_secs: u64,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_true")]
    pub cache_enabled: bool,
}

impl Default for CastConfig {
    fn default() -> Self {
        Self {
            service_type: default_service_type(),
            discovery_timeout_secs: default_discovery_timeout(),
            language: default_language(),
            cache_enabled: true,
        }
    }
}

fn default_service_type() -> String {
    "_googlecast._tcp".to_string()
}

fn default_discovery_timeout() -> u64 {
    5
}

fn default_language() -> String {
    "de".to_string()
}

fn default_true() -> bool {
    true
}

/// Returns the path to the config/cache directory (~/.castaudio/).
pub fn config_dir() -> PathBuf {
    let home = directories::BaseDirs::new()
        .expect("Could not determine home directory")
        .home_dir()
        .to_path_buf();
    home.join(".castaudio")
}

/// Returns the path to the config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Load the config from disk, falling back to defaults when absent.
pub fn load_config() -> anyhow::Result<CastConfig> {
    let path = config_path();
    if !path.exists() {
        return Ok(CastConfig::default());
    }
    let content = std::fs::read_to_string(&path)
        .map_err(|e| anyhow::anyhow!("Failed to read config at {}: {}", path.display(), e))?;
    let config: CastConfig = toml::from_str(&content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let config: CastConfig = toml::from_str("").unwrap();
        assert_eq!(config.service_type, "_googlecast._tcp");
        assert_eq!(config.discovery_timeout_secs, 5);
        assert_eq!(config.language, "de");
        assert!(config.cache_enabled);
    }

    #[test]
    fn partial_toml_keeps_remaining_defaults() {
        let config: CastConfig =
            toml::from_str("language = \"en\"\ndiscovery_timeout_secs = 2\n").unwrap();
        assert_eq!(config.language, "en");
        assert_eq!(config.discovery_timeout_secs, 2);
        assert_eq!(config.service_type, "_googlecast._tcp");
    }

    #[test]
    fn config_round_trips_through_toml() {
        let config = CastConfig::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let reparsed: CastConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(reparsed.service_type, config.service_type);
        assert_eq!(reparsed.cache_enabled, config.cache_enabled);
    }
}
