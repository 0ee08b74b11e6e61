//! Bot connection configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::application::errors::ConfigError;

/// Connection settings: who the bot logs in as and which transports are on.
/// Channel and commands live in the user config aggregate, not here.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub bot: BotConfig,
    pub adapters: AdaptersConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct BotConfig {
    /// Twitch login name of the bot account
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct AdaptersConfig {
    pub twitch: Option<TwitchConfig>,
    pub console: Option<ConsoleConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct TwitchConfig {
    pub enabled: bool,
    /// OAuth token, with or without the `oauth:` prefix
    pub token: Option<String>,
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
                name: "botspark".to_string(),
            },
            adapters: AdaptersConfig {
                twitch: Some(TwitchConfig {
                    enabled: false,
                    token: None,
                }),
                console: Some(ConsoleConfig { enabled: true }),
            },
        }
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))
    }

    pub fn load_env() -> Self {
        let mut config = Config::default();

        if let Ok(token) = std::env::var("TWITCH_TOKEN") {
            if let Some(ref mut twitch) = config.adapters.twitch {
                twitch.token = Some(token);
                twitch.enabled = true;
            }
        }

        if let Ok(name) = std::env::var("BOT_NAME") {
            config.bot.name = name;
        }

        config
    }

    /// Token of the enabled Twitch adapter, if any.
    pub fn twitch_token(&self) -> Option<String> {
        self.adapters
            .twitch
            .as_ref()
            .filter(|t| t.enabled)
            .and_then(|t| t.token.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_yaml() {
        let yaml = serde_yaml::to_string(&Config::default()).unwrap();
        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();

        assert_eq!(parsed.bot.name, "botspark");
        assert_eq!(parsed.twitch_token(), None);
    }

    #[test]
    fn disabled_twitch_adapter_yields_no_token() {
        let mut config = Config::default();
        if let Some(ref mut twitch) = config.adapters.twitch {
            twitch.token = Some("oauth:abc".to_string());
        }
        assert_eq!(config.twitch_token(), None);

        if let Some(ref mut twitch) = config.adapters.twitch {
            twitch.enabled = true;
        }
        assert_eq!(config.twitch_token(), Some("oauth:abc".to_string()));
    }
}
