// ABOUTME: Lead capture models - demo bookings and chat widget sessions
// ABOUTME: Chat sessions keep the full ordered transcript sent to the language model
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A captured demo request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoBooking {
    /// Generated identifier
    pub id: String,
    /// Contact name
    pub full_name: String,
    /// Contact email
    pub email: String,
    /// Company, if given
    pub company: Option<String>,
    /// Which product the lead asked about
    pub product_interest: String,
    /// Follow-up state, `pending` on creation
    pub status: String,
    /// Capture time
    pub created_at: DateTime<Utc>,
}

/// Validated booking request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDemoBooking {
    /// Contact name
    pub full_name: String,
    /// Contact email
    pub email: String,
    /// Company, if given
    pub company: Option<String>,
    /// Which product the lead asked about
    pub product_interest: String,
}

/// Speaker of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// Site visitor
    User,
    /// Language model persona
    Assistant,
}

/// One turn of a chat transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Speaker
    pub role: ChatRole,
    /// Message text
    pub content: String,
}

impl ChatMessage {
    /// Visitor message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    /// Persona reply
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// A chat widget conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSession {
    /// Session identifier handed back to the widget
    pub id: String,
    /// Ordered transcript
    pub messages: Vec<ChatMessage>,
    /// Creation time
    pub created_at: DateTime<Utc>,
}
