//! Provider endpoint configuration
//!
//! Resolution order, first hit wins per value:
//! 1. `FLIPDECK_SUPABASE_URL` / `FLIPDECK_SUPABASE_ANON_KEY` in the environment
//! 2. `[provider]` table of the config file (`~/.config/flipdeck/config.toml`)
//! 3. the same variables captured at build time

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

pub const URL_VAR: &str = "FLIPDECK_SUPABASE_URL";
pub const ANON_KEY_VAR: &str = "FLIPDECK_SUPABASE_ANON_KEY";

const BUILD_URL: Option<&str> = option_env!("FLIPDECK_SUPABASE_URL");
const BUILD_ANON_KEY: Option<&str> = option_env!("FLIPDECK_SUPABASE_ANON_KEY");

const APP_DIR: &str = "flipdeck";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Missing configuration value {0} (set it in the environment or config file)")]
    Missing(&'static str),

    #[error("Invalid provider URL: {0}")]
    InvalidUrl(String),

    #[error("Could not determine {0} directory")]
    NoDirectory(&'static str),
}

/// Where the provider lives and the public key used to reach it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Project URL without trailing slash
    pub url: String,
    pub anon_key: String,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    provider: ProviderSection,
}

#[derive(Debug, Default, Deserialize)]
struct ProviderSection {
    url: Option<String>,
    anon_key: Option<String>,
}

impl ProviderConfig {
    /// Load from the environment, an optional explicit file, and build-time values
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match config_path {
            Some(p) => Some(p.to_path_buf()),
            None => default_config_path(),
        };

        let file = match path {
            Some(ref p) if p.exists() => {
                log::debug!("Reading config from {}", p.display());
                let content = fs::read_to_string(p)?;
                toml::from_str(&content)?
            }
            Some(ref p) if config_path.is_some() => {
                return Err(ConfigError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("config file {} not found", p.display()),
                )));
            }
            _ => ConfigFile::default(),
        };

        Self::resolve(|key| std::env::var(key).ok(), file)
    }

    fn resolve<F>(env: F, file: ConfigFile) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |var: &str, from_file: Option<String>, built: Option<&str>| {
            env(var)
                .or(from_file)
                .or_else(|| built.map(str::to_string))
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let url = pick(URL_VAR, file.provider.url, BUILD_URL).ok_or(ConfigError::Missing(URL_VAR))?;
        let anon_key = pick(ANON_KEY_VAR, file.provider.anon_key, BUILD_ANON_KEY)
            .ok_or(ConfigError::Missing(ANON_KEY_VAR))?;

        Self::new(url, anon_key)
    }

    /// Validate and normalise a URL/key pair
    pub fn new(url: String, anon_key: String) -> Result<Self, ConfigError> {
        let url = url.trim_end_matches('/').to_string();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::InvalidUrl(format!(
                "{} (URL must start with http:// or https://)",
                url
            )));
        }
        Ok(Self { url, anon_key })
    }
}

/// Default config file location
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
}

/// Default directory for the persisted session and log file
pub fn default_data_dir() -> Result<PathBuf, ConfigError> {
    dirs::data_dir()
        .map(|d| d.join(APP_DIR))
        .ok_or(ConfigError::NoDirectory("data"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn file_with(url: Option<&str>, key: Option<&str>) -> ConfigFile {
        ConfigFile {
            provider: ProviderSection {
                url: url.map(str::to_string),
                anon_key: key.map(str::to_string),
            },
        }
    }

    #[test]
    fn test_env_overrides_file() {
        let env = env_of(&[(URL_VAR, "https://env.example.co/")]);
        let config = ProviderConfig::resolve(
            env,
            file_with(Some("https://file.example.co"), Some("file-key")),
        )
        .unwrap();

        assert_eq!(config.url, "https://env.example.co");
        assert_eq!(config.anon_key, "file-key");
    }

    #[test]
    fn test_rejects_non_http_url() {
        let env = env_of(&[(URL_VAR, "ftp://nope"), (ANON_KEY_VAR, "k")]);
        let err = ProviderConfig::resolve(env, ConfigFile::default()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl(_)));
    }

    #[test]
    fn test_blank_values_count_as_missing() {
        if BUILD_ANON_KEY.is_some() {
            return;
        }
        let env = env_of(&[(URL_VAR, "https://x.co"), (ANON_KEY_VAR, "   ")]);
        let err = ProviderConfig::resolve(env, ConfigFile::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Missing(ANON_KEY_VAR)));
    }

    #[test]
    fn test_parse_config_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[provider]\nurl = \"https://abc.supabase.co\"\nanon_key = \"public-anon\"\n",
        )
        .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let file: ConfigFile = toml::from_str(&content).unwrap();
        let config = ProviderConfig::resolve(env_of(&[]), file).unwrap();
        assert_eq!(config.url, "https://abc.supabase.co");
        assert_eq!(config.anon_key, "public-anon");
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("absent.toml");
        assert!(matches!(
            ProviderConfig::load(Some(&missing)),
            Err(ConfigError::Io(_))
        ));
    }
}
