//! Interview sessions
//!
//! Each upload opens its own session so that concurrent founders never share
//! a history. Requests that carry no session id fall back to the most recent
//! session.

use super::state::Interview;
use super::InterviewError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, RwLock};

/// Opaque session identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl From<String> for SessionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Shared handle to one session's interview
pub type SessionHandle = Arc<Mutex<Interview>>;

struct Entry {
    interview: SessionHandle,
    last_used: Instant,
}

#[derive(Default)]
struct Sessions {
    entries: HashMap<SessionId, Entry>,
    latest: Option<SessionId>,
}

/// All live sessions
pub struct SessionStore {
    sessions: RwLock<Sessions>,
    ttl: Duration,
}

impl SessionStore {
    /// Sessions unused for longer than `ttl` are dropped when new ones open.
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(Sessions::default()),
            ttl,
        }
    }

    /// Open a fresh session and make it the most recent one.
    pub async fn create(&self) -> (SessionId, SessionHandle) {
        let mut sessions = self.sessions.write().await;
        let now = Instant::now();
        self.prune(&mut sessions, now);

        let id = SessionId::generate();
        let interview: SessionHandle = Arc::new(Mutex::new(Interview::new()));
        sessions.entries.insert(
            id.clone(),
            Entry {
                interview: interview.clone(),
                last_used: now,
            },
        );
        sessions.latest = Some(id.clone());
        tracing::debug!(session = %id, live = sessions.entries.len(), "Session created");
        (id, interview)
    }

    /// Look up `id`, or the most recent session when no id is given.
    pub async fn resolve(
        &self,
        id: Option<&SessionId>,
    ) -> Result<(SessionId, SessionHandle), InterviewError> {
        let mut sessions = self.sessions.write().await;
        let id = match id {
            Some(id) => id.clone(),
            None => sessions
                .latest
                .clone()
                .ok_or(InterviewError::NoActiveInterview)?,
        };
        let entry = sessions
            .entries
            .get_mut(&id)
            .ok_or_else(|| InterviewError::UnknownSession(id.clone()))?;
        entry.last_used = Instant::now();
        Ok((id, entry.interview.clone()))
    }

    pub async fn remove(&self, id: &SessionId) {
        let mut sessions = self.sessions.write().await;
        sessions.entries.remove(id);
        if sessions.latest.as_ref() == Some(id) {
            sessions.latest = None;
        }
        tracing::debug!(session = %id, live = sessions.entries.len(), "Session closed");
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.sessions.read().await.entries.len()
    }

    fn prune(&self, sessions: &mut Sessions, now: Instant) {
        let before = sessions.entries.len();
        // A handle held elsewhere means a request is still using the session
        sessions.entries.retain(|_, entry| {
            now.duration_since(entry.last_used) < self.ttl
                || Arc::strong_count(&entry.interview) > 1
        });
        if let Some(latest) = &sessions.latest {
            if !sessions.entries.contains_key(latest) {
                sessions.latest = None;
            }
        }
        let expired = before - sessions.entries.len();
        if expired > 0 {
            tracing::info!(expired, "Pruned idle interview sessions");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOUR: Duration = Duration::from_hours(1);

    #[tokio::test]
    async fn test_create_and_resolve_by_id() {
        let store = SessionStore::new(HOUR);
        let (a, handle_a) = store.create().await;
        let (b, _) = store.create().await;
        assert_ne!(a, b);

        let (resolved, handle) = store.resolve(Some(&a)).await.unwrap();
        assert_eq!(resolved, a);
        assert!(Arc::ptr_eq(&handle, &handle_a));
    }

    #[tokio::test]
    async fn test_resolve_without_id_uses_latest() {
        let store = SessionStore::new(HOUR);
        assert!(matches!(
            store.resolve(None).await,
            Err(InterviewError::NoActiveInterview)
        ));

        store.create().await;
        let (latest, _) = store.create().await;
        let (resolved, _) = store.resolve(None).await.unwrap();
        assert_eq!(resolved, latest);
    }

    #[tokio::test]
    async fn test_unknown_session() {
        let store = SessionStore::new(HOUR);
        let missing = SessionId::from("nope".to_string());
        assert!(matches!(
            store.resolve(Some(&missing)).await,
            Err(InterviewError::UnknownSession(id)) if id == missing
        ));
    }

    #[tokio::test]
    async fn test_remove_clears_latest() {
        let store = SessionStore::new(HOUR);
        let (first, _) = store.create().await;
        let (second, _) = store.create().await;

        store.remove(&second).await;
        assert!(matches!(
            store.resolve(None).await,
            Err(InterviewError::NoActiveInterview)
        ));
        // Older sessions stay reachable by id
        assert!(store.resolve(Some(&first)).await.is_ok());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_prune_skips_sessions_in_use() {
        let store = SessionStore::new(Duration::ZERO);
        let (idle, idle_handle) = store.create().await;
        drop(idle_handle);
        let (busy, busy_handle) = store.create().await;

        // Opening a third session prunes the idle one only
        store.create().await;
        assert!(store.resolve(Some(&idle)).await.is_err());
        assert!(store.resolve(Some(&busy)).await.is_ok());
        drop(busy_handle);
    }
}
