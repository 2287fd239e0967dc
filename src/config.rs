//! Runtime configuration from environment variables
//!
//! | Variable       | Default                          |
//! |----------------|----------------------------------|
//! | `PREDICT_URL`  | `http://127.0.0.1:8000/predict`  |
//! | `PREDICT_LANG` | `es`                             |
//! | `PORT`         | `3000`                           |
//! | `STATIC_DIR`   | `static`                         |

use thiserror::Error;

use crate::client::DEFAULT_LANG;

pub const DEFAULT_PREDICT_URL: &str = "http://127.0.0.1:8000/predict";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_STATIC_DIR: &str = "static";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be a valid port number, got '{value}'")]
    InvalidPort { name: &'static str, value: String },
    #[error("{name} must not be empty")]
    Empty { name: &'static str },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdvisorConfig {
    pub predict_url: String,
    pub lang: String,
    pub port: u16,
    pub static_dir: String,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            predict_url: DEFAULT_PREDICT_URL.to_string(),
            lang: DEFAULT_LANG.to_string(),
            port: DEFAULT_PORT,
            static_dir: DEFAULT_STATIC_DIR.to_string(),
        }
    }
}

impl AdvisorConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable lookup (unset variables keep their defaults)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("PREDICT_URL") {
            config.predict_url = non_empty("PREDICT_URL", url)?;
        }
        if let Some(lang) = lookup("PREDICT_LANG") {
            config.lang = non_empty("PREDICT_LANG", lang)?;
        }
        if let Some(port) = lookup("PORT") {
            config.port = port.trim().parse().map_err(|_| ConfigError::InvalidPort {
                name: "PORT",
                value: port.clone(),
            })?;
        }
        if let Some(dir) = lookup("STATIC_DIR") {
            config.static_dir = non_empty("STATIC_DIR", dir)?;
        }

        Ok(config)
    }
}

fn non_empty(name: &'static str, value: String) -> Result<String, ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ConfigError::Empty { name })
    } else {
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = AdvisorConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, AdvisorConfig::default());
        assert_eq!(config.lang, "es");
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn test_overrides() {
        let config = AdvisorConfig::from_lookup(lookup(&[
            ("PREDICT_URL", "http://model:8000/predict"),
            ("PREDICT_LANG", "en"),
            ("PORT", " 8080 "),
        ]))
        .unwrap();
        assert_eq!(config.predict_url, "http://model:8000/predict");
        assert_eq!(config.lang, "en");
        assert_eq!(config.port, 8080);
        assert_eq!(config.static_dir, DEFAULT_STATIC_DIR);
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(
            AdvisorConfig::from_lookup(lookup(&[("PORT", "http")])),
            Err(ConfigError::InvalidPort {
                name: "PORT",
                value: "http".to_string()
            })
        );
        assert_eq!(
            AdvisorConfig::from_lookup(lookup(&[("PREDICT_URL", "  ")])),
            Err(ConfigError::Empty { name: "PREDICT_URL" })
        );
    }
}
