// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses port, database, admin token, LLM, upload and CORS settings from env vars
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Environment-based configuration management
//!
//! The persistence mode is decided here: a blank or absent `DATABASE_URL` means
//! the server runs on its in-memory store. A present but malformed URL is a
//! configuration error, not a silent fallback.

use crate::constants::{defaults, env_vars};
use crate::errors::{AppError, AppResult};
use std::env;
use std::fmt;
use std::path::PathBuf;
use tracing::{info, warn};

/// Environment type for security and other configurations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Deployed; secrets are mandatory
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// TLS preference for the database connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DatabaseSsl {
    /// Never use TLS
    Disable,
    /// Use TLS when the server offers it
    #[default]
    Prefer,
    /// Refuse to connect without TLS
    Require,
}

impl DatabaseSsl {
    /// Resolve `DATABASE_SSL`; unset means `Require` in production and `Prefer` elsewhere
    #[must_use]
    pub fn resolve(setting: Option<&str>, environment: Environment) -> Self {
        match setting.map(str::to_lowercase).as_deref() {
            Some("disable" | "false") => Self::Disable,
            Some("require" | "true") => Self::Require,
            Some(other) => {
                warn!(value = other, "Unrecognized DATABASE_SSL value, using default");
                Self::default_for(environment)
            }
            None => Self::default_for(environment),
        }
    }

    const fn default_for(environment: Environment) -> Self {
        if environment.is_production() {
            Self::Require
        } else {
            Self::Prefer
        }
    }
}

/// Relational store settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Postgres connection string; `None` selects the in-memory store
    pub url: Option<String>,
    /// TLS preference
    pub ssl: DatabaseSsl,
    /// Pool size
    pub max_connections: u32,
}

impl DatabaseConfig {
    /// Whether a database is configured
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.url.is_some()
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            ssl: DatabaseSsl::default(),
            max_connections: defaults::DATABASE_MAX_CONNECTIONS,
        }
    }
}

/// Admin credential settings
#[derive(Clone, PartialEq, Eq)]
pub struct AuthConfig {
    /// Shared bearer secret gating mutating product operations
    pub admin_token: String,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("admin_token", &"[REDACTED]")
            .finish()
    }
}

/// Generative AI settings for the chat widget
#[derive(Clone, PartialEq, Eq)]
pub struct LlmConfig {
    /// API key; `None` disables the chat endpoint
    pub gemini_api_key: Option<String>,
    /// Model name
    pub model: String,
    /// Company name substituted into the persona prompt when the request omits one
    pub company_name: String,
    /// Persona name
    pub persona_name: String,
}

impl fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmConfig")
            .field(
                "gemini_api_key",
                &self.gemini_api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field("model", &self.model)
            .field("company_name", &self.company_name)
            .field("persona_name", &self.persona_name)
            .finish()
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            model: defaults::GEMINI_MODEL.to_owned(),
            company_name: defaults::CHAT_COMPANY_NAME.to_owned(),
            persona_name: defaults::CHAT_PERSONA_NAME.to_owned(),
        }
    }
}

/// Thumbnail storage settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadConfig {
    /// Directory thumbnails are written to and served from
    pub directory: PathBuf,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(defaults::UPLOAD_DIR),
        }
    }
}

/// CORS settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsConfig {
    /// `*` or a comma-separated origin list
    pub allowed_origins: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: "*".to_owned(),
        }
    }
}

/// Complete server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// HTTP API port
    pub http_port: u16,
    /// Deployment environment
    pub environment: Environment,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Authentication configuration
    pub auth: AuthConfig,
    /// Chat provider configuration
    pub llm: LlmConfig,
    /// Upload configuration
    pub uploads: UploadConfig,
    /// CORS configuration
    pub cors: CorsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: defaults::HOST.to_owned(),
            http_port: defaults::HTTP_PORT,
            environment: Environment::Development,
            database: DatabaseConfig::default(),
            auth: AuthConfig {
                admin_token: defaults::DEV_ADMIN_TOKEN.to_owned(),
            },
            llm: LlmConfig::default(),
            uploads: UploadConfig::default(),
            cors: CorsConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables, reading `.env` first if present
    ///
    /// # Errors
    ///
    /// Returns an error if the port is not a number, `DATABASE_URL` is not a
    /// Postgres URL, or `ADMIN_TOKEN` is missing in production.
    pub fn from_env() -> AppResult<Self> {
        info!("Loading configuration from environment variables");

        if let Err(e) = dotenvy::dotenv() {
            info!("No .env file loaded: {}", e);
        }

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source
    ///
    /// # Errors
    ///
    /// Same conditions as [`Self::from_env`].
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Blank values count as unset
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty())
        };

        let environment = get(env_vars::ENVIRONMENT)
            .or_else(|| get(env_vars::NODE_ENV))
            .map_or_else(Environment::default, |v| {
                Environment::from_str_or_default(&v)
            });

        let http_port = match get(env_vars::PORT).or_else(|| get(env_vars::HTTP_PORT)) {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|e| AppError::config(format!("Invalid PORT value '{raw}': {e}")))?,
            None => defaults::HTTP_PORT,
        };

        let url = get(env_vars::DATABASE_URL);
        if let Some(url) = &url {
            if !(url.starts_with("postgres://") || url.starts_with("postgresql://")) {
                return Err(AppError::config(
                    "DATABASE_URL must be a PostgreSQL connection string (postgres://...)",
                ));
            }
        }

        let max_connections = match get(env_vars::DATABASE_MAX_CONNECTIONS) {
            Some(raw) => raw.parse::<u32>().map_err(|e| {
                AppError::config(format!("Invalid DATABASE_MAX_CONNECTIONS value '{raw}': {e}"))
            })?,
            None => defaults::DATABASE_MAX_CONNECTIONS,
        };

        let admin_token = match get(env_vars::ADMIN_TOKEN) {
            Some(token) => token,
            None if environment.is_production() => {
                return Err(AppError::config_missing(
                    "ADMIN_TOKEN must be set in production",
                ));
            }
            None => {
                warn!("ADMIN_TOKEN not set, using the development admin token");
                defaults::DEV_ADMIN_TOKEN.to_owned()
            }
        };

        Ok(Self {
            host: get(env_vars::HOST).unwrap_or_else(|| defaults::HOST.to_owned()),
            http_port,
            environment,
            database: DatabaseConfig {
                url,
                ssl: DatabaseSsl::resolve(get(env_vars::DATABASE_SSL).as_deref(), environment),
                max_connections,
            },
            auth: AuthConfig { admin_token },
            llm: LlmConfig {
                gemini_api_key: get(env_vars::GEMINI_API_KEY),
                model: get(env_vars::GEMINI_MODEL)
                    .unwrap_or_else(|| defaults::GEMINI_MODEL.to_owned()),
                company_name: get(env_vars::CHAT_COMPANY_NAME)
                    .unwrap_or_else(|| defaults::CHAT_COMPANY_NAME.to_owned()),
                persona_name: defaults::CHAT_PERSONA_NAME.to_owned(),
            },
            uploads: UploadConfig {
                directory: PathBuf::from(
                    get(env_vars::UPLOAD_DIR).unwrap_or_else(|| defaults::UPLOAD_DIR.to_owned()),
                ),
            },
            cors: CorsConfig {
                allowed_origins: get(env_vars::CORS_ALLOWED_ORIGINS)
                    .unwrap_or_else(|| "*".to_owned()),
            },
        })
    }

    /// One-line summary safe for logs (no secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "environment={} bind={}:{} persistence={} uploads={} chat={}",
            self.environment,
            self.host,
            self.http_port,
            if self.database.is_enabled() {
                "postgres"
            } else {
                "memory"
            },
            self.uploads.directory.display(),
            if self.llm.gemini_api_key.is_some() {
                "enabled"
            } else {
                "disabled"
            },
        )
    }
}
