//! Configuration for the edgepoll binary.
//!
//! TOML file + `EDGEPOLL_*` environment overrides, default values for
//! everything the device does not strictly require, and translation to
//! `edgepoll_api::ConnectionConfig`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;

use edgepoll_api::{ConnectionConfig, TlsMode};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Config struct ───────────────────────────────────────────────────

/// Validated polling configuration for one EdgeSwitch.
///
/// `username`, `password`, and `host` are required; everything else
/// carries the defaults the device firmware expects.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Management API username.
    pub username: String,

    /// Management API password.
    pub password: String,

    /// Switch hostname or IP address.
    pub host: String,

    /// Management HTTPS port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Verify the switch's TLS certificate.
    #[serde(default = "default_verify_ssl")]
    pub verify_ssl: bool,

    /// Interface names to expose as port entities (e.g. `["eth0"]`).
    #[serde(default)]
    pub interfaces: Vec<String>,

    /// Poll interval in seconds.
    #[serde(default = "default_interval")]
    pub interval: u64,
}

fn default_port() -> u16 {
    443
}
fn default_timeout() -> u64 {
    10
}
fn default_verify_ssl() -> bool {
    true
}
fn default_interval() -> u64 {
    30
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the default config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "edgepoll", "edgepoll").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("edgepoll");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load config from an explicit file path plus `EDGEPOLL_*` env vars.
///
/// Environment variables win over the file, so `EDGEPOLL_PASSWORD`
/// keeps the secret out of the TOML.
pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Toml::file(path))
        .merge(Env::prefixed("EDGEPOLL_"));

    let config: Config = figment.extract()?;
    config.validate()?;
    Ok(config)
}

/// Load config from the canonical path (see [`config_path`]).
pub fn load() -> Result<Config, ConfigError> {
    load_from(&config_path())
}

impl Config {
    /// Reject values figment accepts but the device cannot use.
    ///
    /// `load_from` runs this automatically; callers that assemble or
    /// override a `Config` by hand should re-run it.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::Validation {
                field: "host".into(),
                reason: "must not be empty".into(),
            });
        }
        if self.username.trim().is_empty() {
            return Err(ConfigError::Validation {
                field: "username".into(),
                reason: "must not be empty".into(),
            });
        }
        if self.password.is_empty() {
            return Err(ConfigError::Validation {
                field: "password".into(),
                reason: "must not be empty".into(),
            });
        }
        if self.timeout == 0 {
            return Err(ConfigError::Validation {
                field: "timeout".into(),
                reason: "must be at least 1 second".into(),
            });
        }
        if self.interval == 0 {
            return Err(ConfigError::Validation {
                field: "interval".into(),
                reason: "must be at least 1 second".into(),
            });
        }
        Ok(())
    }

    /// The poll cadence as a `Duration`.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.interval)
    }

    /// Translate into the api crate's `ConnectionConfig`.
    pub fn connection(&self) -> Result<ConnectionConfig, ConfigError> {
        let tls = if self.verify_ssl {
            TlsMode::System
        } else {
            TlsMode::DangerAcceptInvalid
        };

        ConnectionConfig::new(
            &self.host,
            self.port,
            self.username.clone(),
            SecretString::from(self.password.clone()),
            Duration::from_secs(self.timeout),
            tls,
        )
        .map_err(|e| ConfigError::Validation {
            field: "host".into(),
            reason: e.to_string(),
        })
    }
}

// ── Tests ───────────────────────────────────────────────────────────
