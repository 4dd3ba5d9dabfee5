//! Application configuration
//!
//! Loaded from environment variables (and a `.env` file when present) using
//! the `config` and `dotenvy` crates. Variables use the `WATHIQA` prefix and a
//! double underscore between sections:
//!
//! - `WATHIQA__SERVER__PORT=8080` -> `server.port`
//! - `WATHIQA__DATABASE__PATH=/var/lib/wathiqa.sqlite` -> `database.path`
//! - `WATHIQA__ADMIN__EMAIL=...`, `WATHIQA__ADMIN__PASSWORD=...`
//! - `WATHIQA__PDF__DEFAULTS__PAPER=letter` -> `pdf.defaults.paper`
//!
//! Every value has a default, so the binary starts with no environment at all.
//! The server binds to `127.0.0.1` unless `WATHIQA__SERVER__HOST` says
//! otherwise; see [`ServerConfig::host`] before exposing it.

mod error;

pub use error::{ConfigError, ValidationError};

use std::net::IpAddr;
use std::path::PathBuf;

use serde::Deserialize;

use crate::pdf::PdfOptions;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    /// Credentials for the admin panel.
    #[serde(default)]
    pub admin: AdminConfig,

    #[serde(default)]
    pub pdf: PdfConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address. Identity is read from `X-User-*` headers without
    /// verification, so anything other than loopback must sit behind the
    /// authenticating proxy that sets them.
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Open the UI in the default browser once the server is up.
    #[serde(default = "default_open_browser")]
    pub open_browser: bool,

    /// Maximum JSON body size in bytes.
    #[serde(default = "default_json_limit")]
    pub json_limit: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_path")]
    pub path: PathBuf,
}

/// Empty credentials disable the admin panel.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminConfig {
    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PdfConfig {
    /// Directory holding the TTF files of the font families below.
    #[serde(default = "default_fonts_dir")]
    pub fonts_dir: PathBuf,

    #[serde(default = "default_font_family")]
    pub font_family: String,

    /// Tried when `font_family` cannot be loaded.
    #[serde(default = "default_fallback_font_family")]
    pub fallback_font_family: String,

    /// Page options applied to every export.
    #[serde(default)]
    pub defaults: PdfOptions,
}

impl AppConfig {
    /// Load configuration from `.env` and the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a value cannot be parsed into its type.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("WATHIQA")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.admin.validate()?;
        self.pdf.defaults.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// True when only local processes can reach the server.
    pub fn is_loopback(&self) -> bool {
        self.host.eq_ignore_ascii_case("localhost")
            || self.host.parse::<IpAddr>().is_ok_and(|ip| ip.is_loopback())
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        Ok(())
    }
}

impl DatabaseConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.path.as_os_str().is_empty() {
            return Err(ValidationError::EmptyDatabasePath);
        }
        Ok(())
    }
}

impl AdminConfig {
    pub fn is_enabled(&self) -> bool {
        !self.email.trim().is_empty() && !self.password.is_empty()
    }

    /// Exact comparison of both parts of the pair; always false when the
    /// panel is disabled.
    pub fn accepts(&self, email: &str, password: &str) -> bool {
        self.is_enabled() && self.email.trim() == email.trim() && self.password == password
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.email.trim().is_empty() != self.password.is_empty() {
            return Err(ValidationError::IncompleteAdminCredentials);
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            open_browser: default_open_browser(),
            json_limit: default_json_limit(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
        }
    }
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            fonts_dir: default_fonts_dir(),
            font_family: default_font_family(),
            fallback_font_family: default_fallback_font_family(),
            defaults: PdfOptions::default(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_open_browser() -> bool {
    true
}

fn default_json_limit() -> usize {
    10 * 1024 * 1024
}

fn default_database_path() -> PathBuf {
    PathBuf::from("wathiqa.sqlite")
}

fn default_fonts_dir() -> PathBuf {
    PathBuf::from("./fonts")
}

fn default_font_family() -> String {
    "Arial".to_string()
}

fn default_fallback_font_family() -> String {
    "LiberationSans".to_string()
}
