use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_timer_seconds")]
    pub timer_seconds: u32,
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

fn default_theme() -> String {
    "dark".to_string()
}
fn default_timer_seconds() -> u32 {
    120
}
fn default_debounce_ms() -> u64 {
    500
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            timer_seconds: default_timer_seconds(),
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("starcard")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.theme, "dark");
        assert_eq!(config.timer_seconds, 120);
        assert_eq!(config.debounce_ms, 500);
    }

    #[test]
    fn partial_file_keeps_defaults_for_the_rest() {
        let config: Config = toml::from_str("theme = \"light\"").unwrap();
        assert_eq!(config.theme, "light");
        assert_eq!(config.timer_seconds, 120);
    }

    #[test]
    fn round_trips_through_toml() {
        let config = Config {
            theme: "light".to_string(),
            timer_seconds: 90,
            debounce_ms: 250,
        };
        let serialized = toml::to_string_pretty(&config).unwrap();
        let back: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(back.theme, config.theme);
        assert_eq!(back.timer_seconds, config.timer_seconds);
        assert_eq!(back.debounce_ms, config.debounce_ms);
    }
}
