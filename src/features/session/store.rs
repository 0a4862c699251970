use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{Mutex, RwLock};

use super::review_session::ReviewSession;

/// Shared handle to a live session. Holding the lock serialises answers for
/// that session.
pub type SessionHandle = Arc<Mutex<ReviewSession>>;

type SessionKey = (i32, String);

/// Storage for in-flight review sessions, addressed by owner and id.
pub trait SessionRepository: Send + Sync {
    fn insert(&self, session: ReviewSession) -> SessionHandle;
    fn get(&self, user_id: i32, session_id: &str) -> Option<SessionHandle>;
    fn remove(&self, user_id: i32, session_id: &str) -> bool;
    /// Drops sessions untouched for longer than `ttl`; returns how many.
    fn evict_idle(&self, ttl: Duration) -> usize;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<SessionKey, SessionHandle>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn evict_older_than(&self, cutoff: Instant) -> usize {
        let mut sessions = self.sessions.write();
        let before = sessions.len();
        // a session locked right now is in use, so it stays
        sessions.retain(|_, handle| match handle.try_lock() {
            Some(session) => session.last_activity() >= cutoff,
            None => true,
        });
        before - sessions.len()
    }
}

impl SessionRepository for InMemorySessionStore {
    fn insert(&self, session: ReviewSession) -> SessionHandle {
        let key = (session.user_id(), session.id().to_string());
        let handle = Arc::new(Mutex::new(session));
        self.sessions.write().insert(key, Arc::clone(&handle));
        handle
    }

    fn get(&self, user_id: i32, session_id: &str) -> Option<SessionHandle> {
        self.sessions
            .read()
            .get(&(user_id, session_id.to_string()))
            .cloned()
    }

    fn remove(&self, user_id: i32, session_id: &str) -> bool {
        self.sessions
            .write()
            .remove(&(user_id, session_id.to_string()))
            .is_some()
    }

    fn evict_idle(&self, ttl: Duration) -> usize {
        match Instant::now().checked_sub(ttl) {
            Some(cutoff) => self.evict_older_than(cutoff),
            None => 0,
        }
    }

    fn len(&self) -> usize {
        self.sessions.read().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use crate::data::models::{ReviewFlashcard, ReviewMode};

    fn session_for(user_id: i32) -> ReviewSession {
        let card = ReviewFlashcard {
            id: 1,
            question: "Q".into(),
            answer: "A".into(),
            difficulty: "easy".into(),
            interval_days: 1,
            last_review_date: None,
            next_review_date: None,
        };
        ReviewSession::new(user_id, ReviewMode::Flashcard, vec![card], Utc::now().naive_utc())
            .unwrap()
    }

    #[test]
    fn sessions_are_scoped_to_their_owner() {
        let store = InMemorySessionStore::new();
        let handle = store.insert(session_for(1));
        let id = handle.lock().id().to_string();

        assert!(store.get(1, &id).is_some());
        assert!(store.get(2, &id).is_none());
        assert!(!store.remove(2, &id));
        assert!(store.remove(1, &id));
        assert!(store.is_empty());
    }

    #[test]
    fn idle_sessions_are_evicted() {
        let store = InMemorySessionStore::new();
        store.insert(session_for(1));
        store.insert(session_for(2));

        assert_eq!(store.evict_idle(Duration::from_secs(3600)), 0);
        assert_eq!(store.evict_older_than(Instant::now() + Duration::from_secs(1)), 2);
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn locked_sessions_survive_eviction() {
        let store = InMemorySessionStore::new();
        let handle = store.insert(session_for(1));
        let _guard = handle.lock();

        assert_eq!(store.evict_older_than(Instant::now() + Duration::from_secs(1)), 0);
        assert_eq!(store.len(), 1);
    }
}
