//! Angel-investor interview orchestration
//!
//! Turns an extracted pitch deck, or a founder's answer, into the next model
//! turn. Every call ships the full history because the model API is
//! stateless.

mod prompt;
pub mod session;
pub mod state;

#[cfg(test)]
mod proptests;

pub use session::{SessionHandle, SessionId, SessionStore};
pub use state::{Event, Role, TransitionError, Turn};

use crate::llm::{LlmError, LlmMessage, LlmRequest, LlmService};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InterviewError {
    #[error("no interview in progress")]
    NoActiveInterview,
    #[error("unknown interview session {0}")]
    UnknownSession(SessionId),
    #[error("interview session {0} is busy with another request")]
    Busy(SessionId),
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error("model request failed: {0}")]
    Model(#[from] LlmError),
}

/// Model output for one founder action
#[derive(Debug, Clone)]
pub struct Reply {
    pub session_id: SessionId,
    pub text: String,
}

/// Drives interviews against the model
pub struct Interviewer {
    llm: Arc<dyn LlmService>,
    sessions: SessionStore,
    max_output_tokens: Option<u32>,
}

impl Interviewer {
    pub fn new(
        llm: Arc<dyn LlmService>,
        sessions: SessionStore,
        max_output_tokens: Option<u32>,
    ) -> Self {
        Self {
            llm,
            sessions,
            max_output_tokens,
        }
    }

    /// Open a new session seeded with the deck text; returns the first question.
    pub async fn begin(&self, document_text: &str) -> Result<Reply, InterviewError> {
        if document_text.trim().is_empty() {
            tracing::warn!("Starting interview from a document without text");
        }
        let (session_id, handle) = self.sessions.create().await;
        let event = Event::Begin {
            document_text: document_text.to_string(),
        };
        let text = self.exchange(&session_id, &handle, event).await?;
        tracing::info!(session = %session_id, "Interview started");
        Ok(Reply { session_id, text })
    }

    /// Send the founder's answer verbatim; returns the next question.
    pub async fn answer(
        &self,
        session: Option<&SessionId>,
        answer: &str,
    ) -> Result<Reply, InterviewError> {
        let (session_id, handle) = self.sessions.resolve(session).await?;
        let event = Event::Answer {
            text: answer.to_string(),
        };
        let text = self.exchange(&session_id, &handle, event).await?;
        Ok(Reply { session_id, text })
    }

    /// Ask for the final review and close the session.
    pub async fn finish(&self, session: Option<&SessionId>) -> Result<Reply, InterviewError> {
        let (session_id, handle) = self.sessions.resolve(session).await?;
        let text = self.exchange(&session_id, &handle, Event::Finish).await?;
        drop(handle);
        self.sessions.remove(&session_id).await;
        tracing::info!(session = %session_id, "Interview finished");
        Ok(Reply { session_id, text })
    }

    /// One model round trip. The session stays locked until the reply is
    /// recorded; a second request for the same session is turned away.
    async fn exchange(
        &self,
        session_id: &SessionId,
        handle: &SessionHandle,
        event: Event,
    ) -> Result<String, InterviewError> {
        let mut interview = handle
            .try_lock()
            .map_err(|_| InterviewError::Busy(session_id.clone()))?;

        let pending = interview.start(event)?;
        let request = LlmRequest {
            messages: interview.outgoing(&pending).map(to_message).collect(),
            max_tokens: self.max_output_tokens,
        };
        tracing::debug!(
            session = %session_id,
            exchange = ?pending.exchange,
            turns = request.messages.len(),
            "Requesting model turn"
        );

        let response = self.llm.complete(&request).await?;
        interview.commit(pending, &response.text);
        Ok(response.text)
    }
}

fn to_message(turn: &Turn) -> LlmMessage {
    match turn.role {
        Role::User => LlmMessage::user(turn.text.clone()),
        Role::Model => LlmMessage::model(turn.text.clone()),
    }
}
