// ABOUTME: System-wide constants and configuration defaults for the storefront API
// ABOUTME: Environment variable names, upload limits, route paths and service identity
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! # Constants Module
//!
//! Application constants and the names of the environment variables read by
//! [`crate::config::environment::ServerConfig::from_env`].

/// Environment variable names
pub mod env_vars {
    /// Listen port
    pub const PORT: &str = "PORT";
    /// Alternative listen port name
    pub const HTTP_PORT: &str = "HTTP_PORT";
    /// Bind address
    pub const HOST: &str = "HOST";
    /// Deployment environment
    pub const ENVIRONMENT: &str = "ENVIRONMENT";
    /// Deployment environment as set by Node-style tooling
    pub const NODE_ENV: &str = "NODE_ENV";
    /// Postgres connection string; absence selects the in-memory store
    pub const DATABASE_URL: &str = "DATABASE_URL";
    /// TLS preference for the database connection
    pub const DATABASE_SSL: &str = "DATABASE_SSL";
    /// Pool size
    pub const DATABASE_MAX_CONNECTIONS: &str = "DATABASE_MAX_CONNECTIONS";
    /// Admin bearer secret
    pub const ADMIN_TOKEN: &str = "ADMIN_TOKEN";
    /// Generative AI key
    pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";
    /// Generative AI model
    pub const GEMINI_MODEL: &str = "GEMINI_MODEL";
    /// Company name substituted into the chat persona
    pub const CHAT_COMPANY_NAME: &str = "CHAT_COMPANY_NAME";
    /// Thumbnail directory
    pub const UPLOAD_DIR: &str = "UPLOAD_DIR";
    /// CORS origin list
    pub const CORS_ALLOWED_ORIGINS: &str = "CORS_ALLOWED_ORIGINS";
    /// API base URL used by the client
    pub const SITE_API_BASE_URL: &str = "SITE_API_BASE_URL";
}

/// Default configuration values
pub mod defaults {
    /// Listen port
    pub const HTTP_PORT: u16 = 5000;
    /// Bind address
    pub const HOST: &str = "0.0.0.0";
    /// Database pool size
    pub const DATABASE_MAX_CONNECTIONS: u32 = 5;
    /// Seconds to wait for a database connection at startup
    pub const DATABASE_CONNECT_TIMEOUT_SECS: u64 = 10;
    /// Admin token accepted outside production when none is configured
    pub const DEV_ADMIN_TOKEN: &str = "admin-token";
    /// Generative AI model
    pub const GEMINI_MODEL: &str = "gemini-2.5-flash";
    /// Company name used by the chat persona
    pub const CHAT_COMPANY_NAME: &str = "your company";
    /// Name of the chat persona
    pub const CHAT_PERSONA_NAME: &str = "Oishy";
    /// Thumbnail directory
    pub const UPLOAD_DIR: &str = "./uploads";
    /// API base URL used by the client
    pub const SITE_API_BASE_URL: &str = "http://127.0.0.1:5000";
}

/// Upload and request limits
pub mod limits {
    /// Maximum thumbnail size in bytes (5 MB)
    pub const MAX_THUMBNAIL_BYTES: usize = 5 * 1024 * 1024;
    /// Headroom above the thumbnail size allowed for the other form fields
    pub const MULTIPART_FORM_OVERHEAD_BYTES: usize = 256 * 1024;
    /// Seconds before an outbound HTTP call is abandoned
    pub const HTTP_CLIENT_TIMEOUT_SECS: u64 = 30;
}

/// Thumbnail upload policy
pub mod uploads {
    /// Multipart field carrying the thumbnail
    pub const THUMBNAIL_FIELD: &str = "thumbnail";
    /// URL prefix under which stored thumbnails are served
    pub const PUBLIC_PATH: &str = "/uploads";
    /// Accepted MIME types with the file extension used on disk
    pub const ALLOWED_IMAGE_TYPES: [(&str, &str); 5] = [
        ("image/jpeg", "jpg"),
        ("image/jpg", "jpg"),
        ("image/png", "png"),
        ("image/webp", "webp"),
        ("image/svg+xml", "svg"),
    ];
    /// Message returned for oversized files
    pub const FILE_TOO_LARGE: &str = "File too large. Maximum size is 5MB.";
    /// Message returned for disallowed types
    pub const INVALID_FILE_TYPE: &str =
        "Invalid file type. Only JPEG, PNG, WebP, and SVG are allowed.";
    /// Message returned for file parts outside the thumbnail field
    pub const UNEXPECTED_FILE_FIELD: &str = "Unexpected file field.";
}

/// Service identity for logging
pub mod service_names {
    /// Service name in structured logs
    pub const SITE_SERVER: &str = "ai-solutions-server";
}
