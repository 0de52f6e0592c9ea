// ABOUTME: Google Gemini provider for the chat widget
// ABOUTME: Calls the generateContent REST endpoint with a system instruction and transcript
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! # Gemini Provider
//!
//! Configure with `GEMINI_API_KEY` and optionally `GEMINI_MODEL`
//! (default `gemini-2.5-flash`).

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use super::{ChatRequest, ChatResponse, LlmProvider};
use crate::constants::limits;
use crate::errors::{AppError, AppResult};
use site_core::models::{ChatMessage, ChatRole};

/// Base URL for the Gemini API
const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Service name used in error messages
const SERVICE: &str = "Gemini";

// ============================================================================
// API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<ContentPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ContentPart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<GeminiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<GeminiContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    message: String,
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Google Gemini LLM provider
pub struct GeminiProvider {
    api_key: String,
    client: Client,
    model: String,
    base_url: String,
}

impl Debug for GeminiProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GeminiProvider")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl GeminiProvider {
    /// Create a provider for `model`
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(limits::HTTP_CLIENT_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            api_key: api_key.into(),
            client,
            model: model.into(),
            base_url: API_BASE_URL.to_owned(),
        })
    }

    /// Point the provider at a different API root
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    /// Gemini calls the assistant role "model"
    const fn convert_role(role: ChatRole) -> &'static str {
        match role {
            ChatRole::User => "user",
            ChatRole::Assistant => "model",
        }
    }

    fn build_request(request: &ChatRequest) -> GeminiRequest {
        let text_content = |role: Option<String>, text: &str| GeminiContent {
            role,
            parts: vec![ContentPart {
                text: Some(text.to_owned()),
            }],
        };

        GeminiRequest {
            contents: request
                .messages
                .iter()
                .map(|ChatMessage { role, content }| {
                    text_content(Some(Self::convert_role(*role).to_owned()), content)
                })
                .collect(),
            system_instruction: (!request.system_prompt.is_empty())
                .then(|| text_content(None, &request.system_prompt)),
        }
    }

    /// First non-blank text of the first candidate
    fn extract_text(response: GeminiResponse) -> Option<String> {
        response
            .candidates?
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .filter_map(|part| part.text)
            .find(|text| !text.trim().is_empty())
    }

    fn api_error(status: u16, body: &str) -> AppError {
        let detail = serde_json::from_str::<GeminiResponse>(body)
            .ok()
            .and_then(|parsed| parsed.error)
            .map_or_else(|| format!("HTTP {status}"), |e| e.message);
        AppError::external_service(SERVICE, format!("API error ({status}): {detail}"))
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    #[instrument(skip(self, request), fields(model = %self.model, turns = request.messages.len()))]
    async fn complete(&self, request: &ChatRequest) -> AppResult<ChatResponse> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        debug!("Sending request to Gemini API");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&Self::build_request(request))
            .send()
            .await
            .map_err(|e| {
                AppError::external_service(SERVICE, format!("HTTP request failed: {e}"))
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            AppError::external_service(SERVICE, format!("Failed to read response: {e}"))
        })?;

        if !status.is_success() {
            error!(status = %status, "Gemini API error");
            return Err(Self::api_error(status.as_u16(), &body));
        }

        let parsed: GeminiResponse = serde_json::from_str(&body).map_err(|e| {
            error!(error = %e, "Failed to parse Gemini response");
            AppError::external_service(SERVICE, format!("Failed to parse response: {e}"))
        })?;

        if let Some(api_error) = parsed.error {
            return Err(AppError::external_service(SERVICE, api_error.message));
        }

        Ok(ChatResponse {
            content: Self::extract_text(parsed),
            model: self.model.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_maps_roles_and_system_instruction() {
        let request = ChatRequest::new(
            "be nice".to_owned(),
            vec![ChatMessage::user("hi"), ChatMessage::assistant("hello")],
        );
        let body = serde_json::to_value(GeminiProvider::build_request(&request)).unwrap();

        assert_eq!(body["system_instruction"]["parts"][0]["text"], "be nice");
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][1]["role"], "model");
        assert_eq!(body["contents"][1]["parts"][0]["text"], "hello");
    }

    #[test]
    fn test_extract_text_skips_empty_parts() {
        let response: GeminiResponse = serde_json::from_value(json!({
            "candidates": [{"content": {"parts": [{"text": ""}, {"text": "Hi there"}]}}]
        }))
        .unwrap();
        assert_eq!(
            GeminiProvider::extract_text(response).as_deref(),
            Some("Hi there")
        );

        let empty: GeminiResponse = serde_json::from_value(json!({"candidates": []})).unwrap();
        assert_eq!(GeminiProvider::extract_text(empty), None);
    }

    #[test]
    fn test_api_error_surfaces_message() {
        let err = GeminiProvider::api_error(
            403,
            r#"{"error": {"message": "API key not valid"}}"#,
        );
        assert_eq!(err.http_status(), 502);
        assert!(err.message.contains("API key not valid"));
    }
}
