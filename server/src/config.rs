//! Server configuration.
//!
//! Loaded from (in order of precedence):
//! 1. Environment variables (`TODO_*`)
//! 2. Config file (`todo.toml`, or the path in `TODO_CONFIG`)
//! 3. Default values

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Interface to bind.
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Fallback log filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit logs as JSON lines.
    #[serde(default)]
    pub json_logs: bool,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            json_logs: false,
        }
    }
}

impl Config {
    /// Loads configuration from all sources, falling back to defaults when
    /// the sources do not extract cleanly.
    pub fn load() -> Self {
        let path = Self::config_path();
        match Self::figment(&path).extract::<Config>() {
            Ok(config) => config,
            Err(e) => {
                // Logging is not up yet.
                eprintln!("warning: configuration error, using defaults");
                eprintln!("  config file: {}", path.display());
                eprintln!("  error: {e}");
                Config::default()
            }
        }
    }

    pub fn figment(path: &Path) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("TODO_").ignore(&["config"]))
    }

    pub fn config_path() -> PathBuf {
        std::env::var_os("TODO_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("todo.toml"))
    }

    /// `host:port`, suitable for `TcpListener::bind`.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
