use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;

use crate::conversation::ProfileSession;
use crate::input::UserId;
use crate::matching::SwipeDeck;

pub const DEFAULT_IDLE_TTL: Duration = Duration::from_secs(30 * 60);

/// Per-user scratch state for an interactive flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Session {
    Profile(ProfileSession),
    Swiping(SwipeDeck),
}

#[derive(Debug)]
struct Entry {
    session: Session,
    touched: Instant,
}

/// Sessions keyed by user. Handlers take a session out, work on it, and put
/// it back, so no map guard is ever held across an await.
///
/// A session untouched for longer than the idle TTL is treated as abandoned:
/// `take` no longer returns it and `sweep` frees it.
#[derive(Debug, Clone)]
pub struct SessionRegistry {
    sessions: Arc<DashMap<UserId, Entry>>,
    idle_ttl: Duration,
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_IDLE_TTL)
    }
}

impl SessionRegistry {
    pub fn new(idle_ttl: Duration) -> Self {
        Self { sessions: Arc::new(DashMap::new()), idle_ttl }
    }

    pub fn take(&self, user_id: UserId) -> Option<Session> {
        let (_, entry) = self.sessions.remove(&user_id)?;
        if entry.touched.elapsed() > self.idle_ttl {
            tracing::debug!(user_id, "idle session expired");
            return None;
        }
        Some(entry.session)
    }

    pub fn put(&self, user_id: UserId, session: Session) {
        self.sessions.insert(user_id, Entry { session, touched: Instant::now() });
    }

    pub fn clear(&self, user_id: UserId) {
        self.sessions.remove(&user_id);
    }

    pub fn contains(&self, user_id: UserId) -> bool {
        self.sessions.contains_key(&user_id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Drop every idle session. Returns how many were removed.
    pub fn sweep(&self) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|_, entry| entry.touched.elapsed() <= self.idle_ttl);
        before.saturating_sub(self.sessions.len())
    }
}

/// Sweep `registry` every `every` until the task is aborted.
pub async fn run_sweeper(registry: SessionRegistry, every: Duration) {
    let mut ticker = tokio::time::interval(every);
    loop {
        ticker.tick().await;
        let removed = registry.sweep();
        if removed > 0 {
            tracing::debug!(removed, remaining = registry.len(), "idle sessions swept");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_removes_and_put_restores() {
        let registry = SessionRegistry::default();
        assert!(registry.take(1).is_none());

        registry.put(1, Session::Profile(ProfileSession::register()));
        assert!(registry.contains(1));
        assert_eq!(registry.len(), 1);

        let taken = registry.take(1);
        assert_eq!(taken, Some(Session::Profile(ProfileSession::register())));
        assert!(registry.is_empty());
    }

    #[test]
    fn sessions_are_independent_per_user() {
        let registry = SessionRegistry::default();
        let shared = registry.clone();

        registry.put(1, Session::Profile(ProfileSession::register()));
        shared.put(2, Session::Swiping(SwipeDeck::new("Al", Vec::new())));
        shared.clear(1);

        assert!(!registry.contains(1));
        assert!(matches!(registry.take(2), Some(Session::Swiping(_))));
    }

    #[test]
    fn idle_sessions_expire_and_are_swept() {
        let registry = SessionRegistry::new(Duration::from_millis(20));
        registry.put(1, Session::Profile(ProfileSession::register()));
        registry.put(2, Session::Swiping(SwipeDeck::new("Al", Vec::new())));
        std::thread::sleep(Duration::from_millis(40));

        assert!(registry.take(1).is_none());
        assert!(!registry.contains(1));

        registry.put(3, Session::Profile(ProfileSession::register()));
        assert_eq!(registry.sweep(), 1);
        assert!(!registry.contains(2));
        assert!(registry.take(3).is_some());
    }
}
