//! Configuration loading
//!
//! Each setting is resolved in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable (1 and 2 arrive together through clap's `env`)
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! SMTP settings have no command-line flags and are read from the
//! environment here.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const APP_DIR: &str = "scripture-daily";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_BIND_HOST: &str = "0.0.0.0";
const DEFAULT_BASE_URL: &str = "http://localhost:8080";
const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
const DEFAULT_SMTP_PORT: u16 = 587;
const DEFAULT_FROM_EMAIL: &str = "noreply@scripturedaily.com";
const DEFAULT_FROM_NAME: &str = "Scripture Daily";

/// Values supplied on the command line or through clap-managed env vars
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub config_file: Option<PathBuf>,
    pub database_path: Option<PathBuf>,
    pub port: Option<u16>,
    pub bind_host: Option<String>,
    pub base_url: Option<String>,
}

/// Contents of `config.toml`; every key is optional
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub database_path: Option<PathBuf>,
    pub port: Option<u16>,
    pub bind_host: Option<String>,
    pub base_url: Option<String>,
    pub email: TomlEmailConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TomlEmailConfig {
    pub smtp_host: Option<String>,
    pub smtp_port: Option<u16>,
    pub smtp_user: Option<String>,
    pub smtp_password: Option<String>,
    pub from_email: Option<String>,
    pub from_name: Option<String>,
}

/// Outgoing mail settings
///
/// SMTP host, port and credentials are resolved so they can be reported at
/// startup; no SMTP transport is built in, so mail is only logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_user: String,
    pub smtp_password: String,
    pub from_email: String,
    pub from_name: String,
}

impl EmailConfig {
    /// SMTP user and password were both supplied
    pub fn has_smtp_credentials(&self) -> bool {
        !self.smtp_user.is_empty() && !self.smtp_password.is_empty()
    }

    /// Resolve from environment lookups, then the TOML table, then defaults
    pub fn resolve_with<F>(file: &TomlEmailConfig, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |key: &str, from_file: &Option<String>| {
            env(key)
                .filter(|v| !v.is_empty())
                .or_else(|| from_file.clone())
        };

        let smtp_user = pick("SMTP_USER", &file.smtp_user).unwrap_or_default();
        let smtp_port = match env("SMTP_PORT").map(|p| p.parse::<u16>()) {
            Some(Ok(port)) => port,
            Some(Err(_)) => {
                warn!("Ignoring invalid SMTP_PORT, using {}", DEFAULT_SMTP_PORT);
                file.smtp_port.unwrap_or(DEFAULT_SMTP_PORT)
            }
            None => file.smtp_port.unwrap_or(DEFAULT_SMTP_PORT),
        };

        // Sender defaults to the SMTP account when one is set
        let from_email = pick("FROM_EMAIL", &file.from_email).unwrap_or_else(|| {
            if smtp_user.is_empty() {
                DEFAULT_FROM_EMAIL.to_string()
            } else {
                smtp_user.clone()
            }
        });

        Self {
            smtp_host: pick("SMTP_HOST", &file.smtp_host)
                .unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string()),
            smtp_port,
            smtp_password: pick("SMTP_PASSWORD", &file.smtp_password).unwrap_or_default(),
            from_email,
            from_name: pick("FROM_NAME", &file.from_name)
                .unwrap_or_else(|| DEFAULT_FROM_NAME.to_string()),
            smtp_user,
        }
    }
}

/// Fully resolved settings shared by both binaries
#[derive(Debug, Clone)]
pub struct Settings {
    pub database_path: PathBuf,
    pub port: u16,
    pub bind_host: String,
    pub base_url: String,
    pub email: EmailConfig,
}

impl Settings {
    /// Resolve settings from overrides, the config file and process env
    ///
    /// A missing default config file is not an error; an explicitly named
    /// one that cannot be read or parsed is.
    pub fn resolve(overrides: &Overrides) -> Result<Self> {
        let file = match &overrides.config_file {
            Some(path) => load_toml_config(path)?,
            None => match default_config_path() {
                Some(path) => {
                    info!("Loading config file: {}", path.display());
                    load_toml_config(&path)?
                }
                None => TomlConfig::default(),
            },
        };

        Ok(Self::resolve_with(overrides, file, |k| std::env::var(k).ok()))
    }

    /// Resolution without touching the filesystem or process environment
    pub fn resolve_with<F>(overrides: &Overrides, file: TomlConfig, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            database_path: overrides
                .database_path
                .clone()
                .or(file.database_path)
                .unwrap_or_else(default_database_path),
            port: overrides.port.or(file.port).unwrap_or(DEFAULT_PORT),
            bind_host: overrides
                .bind_host
                .clone()
                .or(file.bind_host)
                .unwrap_or_else(|| DEFAULT_BIND_HOST.to_string()),
            base_url: overrides
                .base_url
                .clone()
                .or(file.base_url)
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            email: EmailConfig::resolve_with(&file.email, env),
        }
    }
}

/// Parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Cannot read {}: {}", path.display(), e)))?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Invalid config {}: {}", path.display(), e)))
}

/// First existing config file: user config dir, then /etc on Linux
fn default_config_path() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"));
    if let Some(path) = user_config.filter(|p| p.exists()) {
        return Some(path);
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc").join(APP_DIR).join("config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}

/// OS-dependent default database location
pub fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join(APP_DIR).join("scripture.db"))
        .unwrap_or_else(|| PathBuf::from("./scripture.db"))
}
