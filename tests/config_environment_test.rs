// ABOUTME: Integration tests for configuration loaded from the process environment
// ABOUTME: Serialized because they mutate environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use ai_solutions_site::config::environment::{DatabaseSsl, Environment, ServerConfig};
use ai_solutions_site::constants::{defaults, env_vars};
use ai_solutions_site::logging::{LogFormat, LoggingConfig};
use serial_test::serial;
use std::env;

const MANAGED_VARS: [&str; 8] = [
    env_vars::PORT,
    env_vars::ENVIRONMENT,
    env_vars::NODE_ENV,
    env_vars::DATABASE_URL,
    env_vars::DATABASE_SSL,
    env_vars::ADMIN_TOKEN,
    env_vars::GEMINI_API_KEY,
    "LOG_FORMAT",
];

fn clear_env() {
    for var in MANAGED_VARS {
        env::remove_var(var);
    }
}

#[test]
fn test_environment_parsing() {
    assert_eq!(
        Environment::from_str_or_default("PROD"),
        Environment::Production
    );
    assert_eq!(Environment::from_str_or_default("test"), Environment::Testing);
    assert_eq!(
        Environment::from_str_or_default("anything"),
        Environment::Development
    );
}

#[test]
#[serial]
fn test_defaults_without_environment() {
    clear_env();

    let config = ServerConfig::from_env().unwrap();

    assert_eq!(config.http_port, defaults::HTTP_PORT);
    assert!(!config.database.is_enabled());
    assert_eq!(config.auth.admin_token, defaults::DEV_ADMIN_TOKEN);
    assert!(config.llm.gemini_api_key.is_none());
}

#[test]
#[serial]
fn test_production_settings_from_environment() {
    clear_env();
    env::set_var(env_vars::ENVIRONMENT, "production");
    env::set_var(env_vars::PORT, "8080");
    env::set_var(env_vars::DATABASE_URL, "postgres://site:pw@db/site");
    env::set_var(env_vars::ADMIN_TOKEN, "prod-secret");

    let config = ServerConfig::from_env().unwrap();
    clear_env();

    assert!(config.environment.is_production());
    assert_eq!(config.http_port, 8080);
    assert!(config.database.is_enabled());
    assert_eq!(config.database.ssl, DatabaseSsl::Require);
    assert_eq!(config.auth.admin_token, "prod-secret");
    assert!(!config.summary().contains("prod-secret"));
}

#[test]
#[serial]
fn test_production_without_admin_token_fails() {
    clear_env();
    env::set_var(env_vars::NODE_ENV, "production");

    let result = ServerConfig::from_env();
    clear_env();

    assert!(result.is_err());
}

#[test]
#[serial]
fn test_logging_defaults_to_json_in_production() {
    clear_env();
    env::set_var(env_vars::ENVIRONMENT, "production");
    let production = LoggingConfig::from_env();

    env::set_var("LOG_FORMAT", "compact");
    let overridden = LoggingConfig::from_env();
    clear_env();

    assert_eq!(production.format, LogFormat::Json);
    assert!(production.include_location);
    assert_eq!(overridden.format, LogFormat::Compact);
}
