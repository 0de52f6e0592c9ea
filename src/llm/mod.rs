// ABOUTME: Language model abstraction backing the chat widget
// ABOUTME: Defines the LlmProvider trait, request/response types and the persona prompt
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! # LLM Provider Module
//!
//! The chat endpoint treats the model as an opaque text-in/text-out service:
//! a system prompt plus the ordered transcript go in, one reply comes out.
//!
//! ```rust,no_run
//! use ai_solutions_site::llm::{ChatRequest, GeminiProvider, LlmProvider, persona_prompt};
//! use site_core::models::ChatMessage;
//!
//! # async fn example() -> Result<(), ai_solutions_site::errors::AppError> {
//! let provider = GeminiProvider::new("api-key", "gemini-2.5-flash")?;
//! let request = ChatRequest::new(
//!     persona_prompt("Oishy", "Acme"),
//!     vec![ChatMessage::user("What do you sell?")],
//! );
//! let reply = provider.complete(&request).await?;
//! # Ok(())
//! # }
//! ```

mod gemini;

pub use gemini::GeminiProvider;

use crate::errors::AppResult;
use async_trait::async_trait;
use site_core::models::ChatMessage;

/// Persona prompt template; `{persona}` and `{company}` are substituted
const PERSONA_TEMPLATE: &str = "You are {persona}, a friendly, helpful, and realistic human assistant from {company}.\n\
Speak naturally, use casual language, and always sound human.\n\
If asked about the company, refer to it as {company}.";

/// Render the fixed chat persona for `company`
#[must_use]
pub fn persona_prompt(persona: &str, company: &str) -> String {
    PERSONA_TEMPLATE
        .replace("{persona}", persona)
        .replace("{company}", company)
}

/// A completion request
#[derive(Debug, Clone)]
pub struct ChatRequest {
    /// System instruction
    pub system_prompt: String,
    /// Ordered transcript, ending with the visitor's latest message
    pub messages: Vec<ChatMessage>,
}

impl ChatRequest {
    /// Create a request
    #[must_use]
    pub const fn new(system_prompt: String, messages: Vec<ChatMessage>) -> Self {
        Self {
            system_prompt,
            messages,
        }
    }
}

/// A completion result
#[derive(Debug, Clone)]
pub struct ChatResponse {
    /// Generated text; `None` when the model produced nothing usable
    pub content: Option<String>,
    /// Model that answered
    pub model: String,
}

/// Text generation backend
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Provider identifier used in logs and error messages
    fn name(&self) -> &'static str;

    /// Generate the assistant's next turn
    ///
    /// Transport and API failures are reported as external service errors.
    async fn complete(&self, request: &ChatRequest) -> AppResult<ChatResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persona_prompt_substitutes_every_placeholder() {
        let prompt = persona_prompt("Oishy", "Acme Robotics");
        assert!(prompt.starts_with("You are Oishy,"));
        assert_eq!(prompt.matches("Acme Robotics").count(), 2);
        assert!(!prompt.contains('{'));
    }
}
