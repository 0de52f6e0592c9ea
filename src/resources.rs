// ABOUTME: Shared server resources injected into every route handler
// ABOUTME: Bundles the store, admin authenticator, chat provider, upload store and config
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use crate::auth::{Authenticator, StaticTokenAuthenticator};
use crate::config::environment::ServerConfig;
use crate::database_plugins::factory::Database;
use crate::errors::AppResult;
use crate::llm::{GeminiProvider, LlmProvider};
use crate::uploads::UploadStore;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use tracing::warn;

/// Per-key async locks serializing read-modify-write cycles on one record
///
/// Entries nobody holds or waits on are pruned on the next `lock` call.
#[derive(Debug, Default)]
pub struct KeyedLocks {
    locks: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl KeyedLocks {
    /// Wait for exclusive access to `key`; released when the guard drops
    pub async fn lock(&self, key: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            locks.entry(key.to_owned()).or_default().clone()
        };
        lock.lock_owned().await
    }

    /// Number of keys currently tracked
    #[must_use]
    pub fn tracked(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// Centralized resource container for dependency injection
///
/// Built once at startup and shared behind an `Arc`; handlers never reach for
/// global state.
#[derive(Clone)]
pub struct ServerResources {
    /// Persistence backend chosen at boot
    pub database: Arc<Database>,
    /// Admin credential check for mutating product routes
    pub authenticator: Arc<dyn Authenticator>,
    /// Chat backend; `None` when no API key is configured
    pub llm: Option<Arc<dyn LlmProvider>>,
    /// Thumbnail storage
    pub uploads: UploadStore,
    /// One lock per chat session, held for a whole turn
    pub chat_locks: Arc<KeyedLocks>,
    /// Loaded configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Wire resources from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the chat provider's HTTP client cannot be built
    pub fn new(database: Database, config: ServerConfig) -> AppResult<Self> {
        let llm: Option<Arc<dyn LlmProvider>> = match &config.llm.gemini_api_key {
            Some(key) => Some(Arc::new(GeminiProvider::new(
                key.clone(),
                config.llm.model.clone(),
            )?)),
            None => {
                warn!("GEMINI_API_KEY not set: /api/chat will report a configuration error");
                None
            }
        };

        Ok(Self {
            database: Arc::new(database),
            authenticator: Arc::new(StaticTokenAuthenticator::new(
                config.auth.admin_token.clone(),
            )),
            llm,
            uploads: UploadStore::new(config.uploads.directory.clone()),
            chat_locks: Arc::new(KeyedLocks::default()),
            config: Arc::new(config),
        })
    }

    /// Replace the chat provider
    #[must_use]
    pub fn with_llm(mut self, provider: Arc<dyn LlmProvider>) -> Self {
        self.llm = Some(provider);
        self
    }

    /// Replace the admin authenticator
    #[must_use]
    pub fn with_authenticator(mut self, authenticator: Arc<dyn Authenticator>) -> Self {
        self.authenticator = authenticator;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_same_key_waits_for_release() {
        let locks = Arc::new(KeyedLocks::default());
        let guard = locks.lock("s1").await;

        let contender = {
            let locks = locks.clone();
            tokio::spawn(async move {
                let _guard = locks.lock("s1").await;
            })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!contender.is_finished());

        // Other keys are independent
        drop(locks.lock("s2").await);

        drop(guard);
        contender.await.unwrap();
    }

    #[tokio::test]
    async fn test_released_keys_are_pruned() {
        let locks = KeyedLocks::default();
        drop(locks.lock("a").await);
        drop(locks.lock("b").await);
        drop(locks.lock("c").await);
        assert_eq!(locks.tracked(), 1);
    }
}
