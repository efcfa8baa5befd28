//! Application configuration
//!
//! A small TOML file carries the provider API key and, optionally, a
//! pre-authenticated profile to show in the header. Loading happens
//! once at startup; a missing key is unrecoverable at that point, so
//! it panics with instructions rather than limping along.

use std::env;
use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

const CONFIG_FILE: &str = "config.toml";

/// Environment override for the provider credential
const API_KEY_ENV: &str = "PEXELS_API_KEY";

#[derive(Debug, Deserialize)]
pub struct Config {
    /// Static credential attached to every provider request
    #[serde(default)]
    pub api_key: String,
    /// Identity supplied by the external auth provider, if any
    #[serde(default)]
    pub profile: Option<Profile>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Profile {
    pub display_name: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl Config {
    /// Load the configuration at startup.
    ///
    /// Looks in the platform config directory first, then the working
    /// directory. `PEXELS_API_KEY` in the environment overrides the
    /// file. Panics when no API key can be found since the app cannot
    /// talk to the provider without one.
    pub fn build() -> Self {
        let mut config = Self::locate()
            .and_then(|path| fs::read_to_string(path).ok())
            .map(|raw| Self::from_toml(&raw).expect("config.toml is not valid TOML"))
            .unwrap_or(Config {
                api_key: String::new(),
                profile: None,
            });

        if let Ok(key) = env::var(API_KEY_ENV) {
            config.api_key = key;
        }

        assert!(
            !config.api_key.is_empty(),
            "No Pexels API key. Set `api_key` in config.toml or the {API_KEY_ENV} environment variable."
        );

        config
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    /// First existing config file, preferring the platform config dir:
    /// - Linux: ~/.config/visual-vault/config.toml
    /// - macOS: ~/Library/Application Support/visual-vault/config.toml
    /// - Windows: %APPDATA%\visual-vault\config.toml
    fn locate() -> Option<PathBuf> {
        let mut candidates = Vec::new();
        if let Some(mut dir) = dirs::config_dir() {
            dir.push("visual-vault");
            dir.push(CONFIG_FILE);
            candidates.push(dir);
        }
        candidates.push(PathBuf::from(CONFIG_FILE));
        candidates.into_iter().find(|path| path.exists())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_key_and_profile() {
        let config = Config::from_toml(
            r#"
            api_key = "abc123"

            [profile]
            display_name = "Ada Lovelace"
            avatar_url = "https://example.com/ada.png"
            "#,
        )
        .unwrap();

        assert_eq!(config.api_key, "abc123");
        let profile = config.profile.unwrap();
        assert_eq!(profile.display_name, "Ada Lovelace");
        assert_eq!(profile.avatar_url.as_deref(), Some("https://example.com/ada.png"));
    }

    #[test]
    fn profile_is_optional() {
        let config = Config::from_toml("api_key = \"abc123\"").unwrap();
        assert!(config.profile.is_none());
    }

    #[test]
    fn rejects_invalid_toml() {
        assert!(Config::from_toml("api_key = ").is_err());
    }
}
