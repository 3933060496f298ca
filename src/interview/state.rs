//! Interview state machine
//!
//! `transition` is pure: it decides whether an event is valid in the current
//! state and what the next user turn is. `Interview` owns the history and
//! only records turns once the model has replied, so a failed round trip
//! leaves nothing half-written.

use super::prompt::{opening_prompt, CLOSING_PROMPT};
use std::iter;
use thiserror::Error;

/// Who produced a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Model,
}

/// One role-tagged entry in the conversation history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            text: text.into(),
        }
    }
}

/// Interview lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterviewState {
    /// Nothing asked yet; history is empty
    Idle,
    /// The investor asked `questions` questions and waits for the founder
    AwaitingAnswer { questions: u32 },
    /// Final review delivered; history was cleared
    Done,
}

/// Founder-side events
#[derive(Debug, Clone)]
pub enum Event {
    Begin { document_text: String },
    Answer { text: String },
    Finish,
}

/// Kind of model round trip an event asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exchange {
    /// First question; history is reset to the seed turn
    Opening,
    FollowUp,
    Review,
}

/// A validated event, waiting for the model's reply
#[derive(Debug, Clone)]
pub struct Transition {
    pub exchange: Exchange,
    pub prompt: Turn,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("no interview in progress; upload a pitch deck first")]
    NotStarted,
}

/// Pure transition function
pub fn transition(state: InterviewState, event: Event) -> Result<Transition, TransitionError> {
    match (state, event) {
        // Begin restarts from any state
        (_, Event::Begin { document_text }) => Ok(Transition {
            exchange: Exchange::Opening,
            prompt: Turn::user(opening_prompt(&document_text)),
        }),

        (InterviewState::AwaitingAnswer { .. }, Event::Answer { text }) => Ok(Transition {
            exchange: Exchange::FollowUp,
            prompt: Turn::user(text),
        }),

        (InterviewState::AwaitingAnswer { .. }, Event::Finish) => Ok(Transition {
            exchange: Exchange::Review,
            prompt: Turn::user(CLOSING_PROMPT),
        }),

        (InterviewState::Idle | InterviewState::Done, Event::Answer { .. } | Event::Finish) => {
            Err(TransitionError::NotStarted)
        }
    }
}

/// One interview conversation
#[derive(Debug, Clone)]
pub struct Interview {
    state: InterviewState,
    history: Vec<Turn>,
}

impl Default for Interview {
    fn default() -> Self {
        Self::new()
    }
}

impl Interview {
    pub fn new() -> Self {
        Self {
            state: InterviewState::Idle,
            history: Vec::new(),
        }
    }

    pub fn state(&self) -> InterviewState {
        self.state
    }

    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    /// Validate `event`. An opening exchange resets the conversation right
    /// away, so the model always sees exactly the seed turn.
    pub fn start(&mut self, event: Event) -> Result<Transition, TransitionError> {
        let pending = transition(self.state, event)?;
        if pending.exchange == Exchange::Opening {
            self.history.clear();
            self.state = InterviewState::Idle;
        }
        Ok(pending)
    }

    /// Everything the model must see for `pending`: history plus the new turn.
    pub fn outgoing<'a>(&'a self, pending: &'a Transition) -> impl Iterator<Item = &'a Turn> {
        self.history.iter().chain(iter::once(&pending.prompt))
    }

    /// Record the model's reply to `pending`.
    pub fn commit(&mut self, pending: Transition, reply: &str) {
        match pending.exchange {
            Exchange::Opening | Exchange::FollowUp => {
                let asked = match self.state {
                    InterviewState::AwaitingAnswer { questions } => questions,
                    InterviewState::Idle | InterviewState::Done => 0,
                };
                self.history.push(pending.prompt);
                self.history.push(Turn::model(reply));
                self.state = InterviewState::AwaitingAnswer {
                    questions: asked + 1,
                };
            }
            Exchange::Review => {
                self.history.clear();
                self.state = InterviewState::Done;
            }
        }
    }
}
