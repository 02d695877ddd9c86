//! Configuration management

use serde::{Deserialize, Serialize};

use crate::application::errors::ConfigError;

/// Bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub bot: BotConfig,
    pub dispatch: DispatchConfig,
    pub adapters: AdaptersConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct BotConfig {
    pub name: String,
    pub prefix: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct DispatchConfig {
    /// Log silent rejections (unknown alias, bare prefix) at debug level
    pub log_rejections: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct AdaptersConfig {
    pub console: Option<ConsoleConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ConsoleConfig {
    pub enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bot: BotConfig {
                name: "parrot-bot".to_string(),
                prefix: "!".to_string(),
            },
            dispatch: DispatchConfig {
                log_rejections: false,
            },
            adapters: AdaptersConfig {
                console: Some(ConsoleConfig { enabled: true }),
            },
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Build configuration from environment variables, with defaults
    pub fn load_env() -> Self {
        let mut config = Config::default();
        if let Ok(prefix) = std::env::var("PARROT_PREFIX") {
            config.bot.prefix = prefix;
        }
        if let Ok(name) = std::env::var("PARROT_NAME") {
            config.bot.name = name;
        }
        config
    }

    /// Save configuration to a YAML file
    pub fn save(&self, path: &str) -> Result<(), ConfigError> {
        let yaml = serde_yaml::to_string(self).map_err(|e| ConfigError::Parse(e.to_string()))?;
        std::fs::write(path, yaml)?;
        Ok(())
    }
}
