//! Configuration for Phonebook

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::types::{sample_persons, Person};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Interface to bind
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port
    #[serde(default = "default_http_port")]
    pub port: u16,

    /// Start with the four sample entries
    #[serde(default = "default_seed_sample")]
    pub seed_sample: bool,

    /// JSON file with an array of entries to start with (overrides `seed_sample`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed_file: Option<PathBuf>,

    /// Largest accepted request body, in bytes
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,

    /// Include the request body in access log lines
    #[serde(default = "default_log_request_body")]
    pub log_request_body: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_http_port(),
            seed_sample: default_seed_sample(),
            seed_file: None,
            max_body_bytes: default_max_body_bytes(),
            log_request_body: default_log_request_body(),
        }
    }
}

impl Config {
    /// Load config from the default location or fall back to defaults
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from_file(&path),
            _ => Ok(Config::default()),
        }
    }

    /// Load config from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Apply `HOST` and `PORT` from the environment
    pub fn apply_env(&mut self) -> Result<()> {
        if let Ok(host) = std::env::var("HOST") {
            self.host = host;
        }
        if let Ok(port) = std::env::var("PORT") {
            self.port = port
                .parse()
                .map_err(|_| Error::Config(format!("Invalid PORT value: {}", port)))?;
        }
        Ok(())
    }

    /// Render the config as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }

    /// Get the default config path
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("phonebook").join("config.toml"))
    }

    /// Socket address string to bind
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Entries the store starts with
    pub fn initial_persons(&self) -> Result<Vec<Person>> {
        if let Some(path) = &self.seed_file {
            let content = std::fs::read_to_string(path)?;
            let persons: Vec<Person> = serde_json::from_str(&content)?;
            return Ok(persons);
        }

        if self.seed_sample {
            Ok(sample_persons())
        } else {
            Ok(Vec::new())
        }
    }
}

// Default value functions

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_http_port() -> u16 {
    3001
}

fn default_seed_sample() -> bool {
    true
}

fn default_max_body_bytes() -> usize {
    100 * 1024
}

fn default_log_request_body() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.port, 3001);
        assert_eq!(config.bind_addr(), "0.0.0.0:3001");
        assert!(config.seed_sample);
        assert_eq!(config.max_body_bytes, 102400);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "port = 8080\nseed_sample = false\n").unwrap();

        let config = Config::load_from_file(&path).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "0.0.0.0");
        assert!(!config.seed_sample);
        assert!(config.initial_persons().unwrap().is_empty());
    }

    #[test]
    fn test_seed_file_overrides_sample() {
        let temp_dir = TempDir::new().unwrap();
        let seed_path = temp_dir.path().join("seed.json");
        std::fs::write(&seed_path, r#"[{"id": "10", "name": "Grace Hopper", "number": "1"}]"#)
            .unwrap();

        let config = Config {
            seed_file: Some(seed_path),
            ..Config::default()
        };

        let persons = config.initial_persons().unwrap();
        assert_eq!(persons, vec![Person::new("10", "Grace Hopper", "1")]);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "port = \"not a number\"").unwrap();

        assert!(matches!(Config::load_from_file(&path), Err(Error::Toml(_))));
    }

    #[test]
    fn test_toml_round_trip_keeps_port() {
        let config = Config {
            port: 4000,
            ..Config::default()
        };
        let rendered = config.to_toml().unwrap();
        let parsed: Config = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed.port, 4000);
    }
}
