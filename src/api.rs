//! HTTP API for the interview

mod handlers;
mod types;

pub use handlers::create_router;

use crate::interview::Interviewer;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub interviewer: Arc<Interviewer>,
}

impl AppState {
    pub fn new(interviewer: Interviewer) -> Self {
        Self {
            interviewer: Arc::new(interviewer),
        }
    }
}
