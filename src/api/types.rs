//! API request and response types

use crate::interview::SessionId;
use serde::{Deserialize, Serialize};

/// Request to answer the pending question
#[derive(Debug, Deserialize)]
pub struct ContinueRequest {
    #[serde(default)]
    pub answer: Option<String>,
    /// Omitted by single-session clients; the latest session is used then
    #[serde(default)]
    pub session_id: Option<SessionId>,
}

/// Request to end the interview
#[derive(Debug, Deserialize)]
pub struct FinishRequest {
    #[serde(default)]
    pub session_id: Option<SessionId>,
}

/// Response carrying the investor's next question
#[derive(Debug, Serialize)]
pub struct QuestionResponse {
    pub question: String,
    pub session_id: SessionId,
}

/// Response carrying the final review
#[derive(Debug, Serialize)]
pub struct ReviewResponse {
    pub review: String,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
