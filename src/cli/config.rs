// ABOUTME: Configuration management for the sweeper application
// ABOUTME: Handles loading configuration from YAML files and merging environment overrides

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::backend::StoreOptions;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Objects processed at once; zero means all of them
    #[serde(default = "default_parallelism")]
    pub parallelism: usize,

    #[serde(default)]
    pub storage: StoreOptions,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,

    #[serde(default = "default_format")]
    pub format: String,
}

fn default_parallelism() -> usize {
    1
}

fn default_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "pretty".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            parallelism: default_parallelism(),
            storage: StoreOptions::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
        }
    }
}

impl Config {
    /// Load configuration from file path or default locations
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p,
            None => Self::find_config_file(),
        };

        let mut config = if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            serde_yaml::from_str(&contents)?
        } else {
            Config::default()
        };

        config.merge_env()?;
        Ok(config)
    }

    /// Find configuration file in standard locations
    fn find_config_file() -> PathBuf {
        let possible_paths = [
            PathBuf::from("sweeper.yaml"),
            PathBuf::from("sweeper.yml"),
            PathBuf::from(".sweeper.yaml"),
            PathBuf::from(".sweeper.yml"),
        ];

        for path in possible_paths {
            if path.exists() {
                return path;
            }
        }

        if let Some(home_dir) = dirs::home_dir() {
            let home_config = home_dir.join(".sweeper").join("config.yaml");
            if home_config.exists() {
                return home_config;
            }
        }

        // Default path (may not exist)
        PathBuf::from("sweeper.yaml")
    }

    /// Merge environment variables into configuration
    fn merge_env(&mut self) -> Result<()> {
        if let Ok(parallelism) = std::env::var("SWEEPER_PARALLELISM") {
            self.parallelism = parallelism.parse()?;
        }

        if let Ok(region) = std::env::var("AWS_REGION") {
            self.storage.aws_region = Some(region);
        }
        if let Ok(endpoint) = std::env::var("AWS_ENDPOINT") {
            self.storage.aws_endpoint = Some(endpoint);
        }
        if let Ok(allow_http) = std::env::var("SWEEPER_ALLOW_HTTP") {
            self.storage.allow_http = allow_http.parse()?;
        }

        if let Ok(level) = std::env::var("SWEEPER_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("SWEEPER_LOG_FORMAT") {
            self.logging.format = format;
        }

        Ok(())
    }
}
