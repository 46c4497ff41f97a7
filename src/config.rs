//! Application configuration
//!
//! Loaded from a TOML file (`$TCTRAVEL_CONFIG` or
//! `~/.config/tctravel/config.toml`). Every section has defaults, so a
//! missing file or a partial file both produce a usable configuration.
//! `DATABASE_URL` and `JWT_SECRET` override the file when set.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

/// Default location of the configuration file
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tctravel")
        .join("config.toml")
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSection,
    pub security: SecurityConfig,
    pub email: EmailConfig,
    pub admin: AdminConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from `path`, falling back to defaults when the
    /// file does not exist, then apply environment overrides.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::load_with(path, |key| std::env::var(key).ok())
    }

    /// Like [`AppConfig::load`], reading overrides through `var`.
    pub fn load_with<F>(path: &Path, var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = if path.exists() {
            let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.display().to_string(),
                source,
            })?;
            Self::from_toml(&raw).map_err(|source| ConfigError::Parse {
                path: path.display().to_string(),
                source,
            })?
        } else {
            Self::default()
        };
        cfg.apply_overrides(var);
        Ok(cfg)
    }

    pub fn from_toml(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    fn apply_overrides<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = var("DATABASE_URL") {
            self.database.url = url;
        }
        if let Some(secret) = var("JWT_SECRET") {
            self.security.jwt_secret = secret;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub api_host: String,
    pub api_port: u16,
    /// Seconds to wait for in-flight work on shutdown
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            api_host: "0.0.0.0".to_string(),
            api_port: 8080,
            shutdown_timeout: 30,
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    /// Connection URL, e.g. `sqlite://./tctravel.db?mode=rwc`
    pub url: String,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            url: "sqlite://./tctravel.db?mode=rwc".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub jwt_audience: String,
    pub jwt_expiration_hours: i64,
    /// Reject logins for accounts whose email has not been verified
    pub require_confirmed_email: bool,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "super-secret-key-change-in-production".to_string(),
            jwt_issuer: "tctravel".to_string(),
            jwt_audience: "tctravel-api".to_string(),
            jwt_expiration_hours: 24,
            require_confirmed_email: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailConfig {
    pub from: String,
    /// Base URL used to build the verification callback link
    pub public_base_url: String,
    /// HTTP mail relay endpoint. Without it messages are only logged.
    pub relay_url: Option<String>,
    pub relay_token: Option<String>,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            from: "no-reply@tctravel.local".to_string(),
            public_base_url: "http://localhost:8080".to_string(),
            relay_url: None,
            relay_token: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub email: String,
    pub password: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            email: "admin@tctravel.local".to_string(),
            password: "Admin123!".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let cfg = AppConfig::from_toml(
            r#"
            [server]
            api_port = 9090

            [security]
            jwt_expiration_hours = 2
            "#,
        )
        .unwrap();

        assert_eq!(cfg.server.api_port, 9090);
        assert_eq!(cfg.server.api_host, "0.0.0.0");
        assert_eq!(cfg.security.jwt_expiration_hours, 2);
        assert_eq!(cfg.security.jwt_issuer, "tctravel");
        assert!(cfg.security.require_confirmed_email);
        assert!(cfg.email.relay_url.is_none());
    }

    #[test]
    fn empty_file_is_default() {
        let cfg = AppConfig::from_toml("").unwrap();
        assert_eq!(cfg.server.address(), "0.0.0.0:8080");
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn invalid_toml_is_an_error() {
        assert!(AppConfig::from_toml("[server\napi_port = ").is_err());
    }

    fn overrides(key: &str) -> Option<String> {
        match key {
            "JWT_SECRET" => Some("from-env".to_string()),
            "DATABASE_URL" => Some("sqlite::memory:".to_string()),
            _ => None,
        }
    }

    fn scratch_file(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("tctravel-{}-{name}.toml", std::process::id()))
    }

    #[test]
    fn missing_file_still_applies_env_overrides() {
        let path = scratch_file("absent");

        let cfg = AppConfig::load_with(&path, overrides).unwrap();

        assert_eq!(cfg.security.jwt_secret, "from-env");
        assert_eq!(cfg.database.url, "sqlite::memory:");
        assert_eq!(cfg.server.api_port, 8080);
    }

    #[test]
    fn env_overrides_win_over_the_file() {
        let path = scratch_file("override");
        std::fs::write(&path, "[security]\njwt_secret = \"from-file\"\n").unwrap();

        let cfg = AppConfig::load_with(&path, overrides).unwrap();
        let untouched = AppConfig::load_with(&path, |_| None).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(cfg.security.jwt_secret, "from-env");
        assert_eq!(untouched.security.jwt_secret, "from-file");
    }

    #[test]
    fn broken_file_is_reported_not_defaulted() {
        let path = scratch_file("broken");
        std::fs::write(&path, "[security\njwt_secret = ").unwrap();

        let result = AppConfig::load_with(&path, overrides);
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }
}
