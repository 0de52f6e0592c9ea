// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides in-memory resource builders, a stub chat provider and quiet logging
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `ai_solutions_site`

use ai_solutions_site::{
    config::environment::ServerConfig,
    database_plugins::factory::Database,
    errors::{AppError, AppResult},
    llm::{ChatRequest, ChatResponse, LlmProvider},
    resources::ServerResources,
    routes::build_router,
};
use async_trait::async_trait;
use axum::Router;
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;
use tempfile::TempDir;

static INIT_LOGGER: Once = Once::new();

/// Admin token configured on every test server
pub const TEST_ADMIN_TOKEN: &str = "test-admin-token";

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// Chat provider double that records requests and returns a canned reply
pub struct StubLlm {
    reply: Result<Option<String>, String>,
    delay: Option<Duration>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl StubLlm {
    /// Always answer with `text`
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(Some(text.to_owned())),
            delay: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Answer with no text at all
    pub fn silent() -> Self {
        Self {
            reply: Ok(None),
            delay: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Fail every call as an upstream error
    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_owned()),
            delay: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Take `delay` to answer, so overlapping turns really overlap
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().expect("stub lock poisoned").clone()
    }
}

#[async_trait]
impl LlmProvider for StubLlm {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn complete(&self, request: &ChatRequest) -> AppResult<ChatResponse> {
        self.requests
            .lock()
            .expect("stub lock poisoned")
            .push(request.clone());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match &self.reply {
            Ok(content) => Ok(ChatResponse {
                content: content.clone(),
                model: "stub-model".to_owned(),
            }),
            Err(message) => Err(AppError::external_service("Stub", message.clone())),
        }
    }
}

/// A running in-memory server: keep `uploads` alive for the test's duration
pub struct TestServer {
    pub resources: Arc<ServerResources>,
    pub uploads: TempDir,
}

impl TestServer {
    /// Fresh router over the shared resources
    pub fn router(&self) -> Router {
        build_router(&self.resources)
    }

    /// Names of files written to the upload directory
    pub fn uploaded_files(&self) -> Vec<String> {
        std::fs::read_dir(self.uploads.path())
            .expect("read upload dir")
            .filter_map(Result::ok)
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect()
    }
}

/// Test configuration with a temporary upload directory
pub fn test_config(uploads: &TempDir) -> ServerConfig {
    let mut config = ServerConfig::default();
    config.auth.admin_token = TEST_ADMIN_TOKEN.to_owned();
    config.uploads.directory = uploads.path().to_path_buf();
    config
}

/// Seeded in-memory server with resources adjusted by `customize`
pub fn create_test_server_from(
    customize: impl FnOnce(ServerResources) -> ServerResources,
) -> TestServer {
    init_test_logging();
    let uploads = tempfile::tempdir().expect("create upload dir");
    let resources = ServerResources::new(Database::memory(), test_config(&uploads))
        .expect("build resources");
    TestServer {
        resources: Arc::new(customize(resources)),
        uploads,
    }
}

/// Seeded in-memory server without a chat provider
pub fn create_test_server() -> TestServer {
    create_test_server_from(|resources| resources)
}

/// Seeded in-memory server answering chat through `llm`
pub fn create_test_server_with_llm(llm: Arc<StubLlm>) -> TestServer {
    create_test_server_from(|resources| resources.with_llm(llm))
}
