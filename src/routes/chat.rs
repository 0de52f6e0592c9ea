// ABOUTME: Route handler for the chat widget backend
// ABOUTME: Keeps a per-session transcript and relays it to the language model persona
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Chat routes
//!
//! Unknown or missing session ids start a new session. The transcript is saved
//! only after the model has answered, so a failed call leaves no half turn behind.
//! Turns on the same session are serialized from load to save.

use super::json_body;
use crate::database_plugins::SiteStore;
use crate::errors::{AppError, AppResult};
use crate::llm::{persona_prompt, ChatRequest};
use crate::resources::ServerResources;
use crate::validation::{validate_chat, ChatPayload};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use site_core::constants::EMPTY_CHAT_REPLY;
use site_core::models::{ChatMessage, ChatSession};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// Reply sent back to the widget
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    /// Assistant text
    pub response: String,
    /// Session to send with the next message
    pub session_id: String,
}

/// Chat routes implementation
pub struct ChatRoutes;

impl ChatRoutes {
    /// Create the chat route
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/chat", post(Self::send_message))
            .with_state(resources)
    }

    async fn load_or_start_session(
        resources: &ServerResources,
        session_id: Option<&str>,
    ) -> AppResult<ChatSession> {
        if let Some(id) = session_id {
            if let Some(session) = resources.database.get_chat_session(id).await? {
                return Ok(session);
            }
            debug!(session.id = %id, "Unknown chat session, starting a new one");
        }

        Ok(ChatSession {
            id: Uuid::new_v4().to_string(),
            messages: Vec::new(),
            created_at: Utc::now(),
        })
    }

    async fn send_message(
        State(resources): State<Arc<ServerResources>>,
        payload: Result<Json<ChatPayload>, JsonRejection>,
    ) -> AppResult<Json<ChatReply>> {
        let input = validate_chat(&json_body(payload)?)?;
        let provider = resources
            .llm
            .clone()
            .ok_or_else(|| AppError::config_missing("Chat provider is not configured"))?;

        // Held until the reply is saved so concurrent turns on one session queue up
        let _turn = match input.session_id.as_deref() {
            Some(id) => Some(resources.chat_locks.lock(id).await),
            None => None,
        };

        let mut session =
            Self::load_or_start_session(&resources, input.session_id.as_deref()).await?;
        session.messages.push(ChatMessage::user(input.message));

        let llm_config = &resources.config.llm;
        let company = input
            .company_name
            .as_deref()
            .unwrap_or(&llm_config.company_name);
        let request = ChatRequest::new(
            persona_prompt(&llm_config.persona_name, company),
            session.messages.clone(),
        );

        let reply = provider
            .complete(&request)
            .await?
            .content
            .filter(|text| !text.trim().is_empty())
            .unwrap_or_else(|| EMPTY_CHAT_REPLY.to_owned());

        session.messages.push(ChatMessage::assistant(reply.clone()));
        resources.database.save_chat_session(&session).await?;

        info!(
            session.id = %session.id,
            turns = session.messages.len(),
            provider = provider.name(),
            "Chat reply generated"
        );
        Ok(Json(ChatReply {
            response: reply,
            session_id: session.id,
        }))
    }
}
