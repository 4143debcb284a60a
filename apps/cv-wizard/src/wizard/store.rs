//! In-memory session registry. Sessions idle for longer than the configured
//! TTL are dropped by a periodic sweep.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::info;
use uuid::Uuid;

use crate::wizard::session::WizardSession;

pub type SharedSession = Arc<Mutex<WizardSession>>;

struct StoredSession {
    session: SharedSession,
    last_access: Instant,
}

#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, StoredSession>>>,
}

impl SessionStore {
    pub async fn insert(&self, session: WizardSession) -> (Uuid, SharedSession) {
        let id = session.id();
        let shared = Arc::new(Mutex::new(session));
        self.sessions.write().await.insert(
            id,
            StoredSession {
                session: shared.clone(),
                last_access: Instant::now(),
            },
        );
        (id, shared)
    }

    /// Looks a session up and marks it as accessed.
    pub async fn get(&self, id: Uuid) -> Option<SharedSession> {
        let mut sessions = self.sessions.write().await;
        let stored = sessions.get_mut(&id)?;
        stored.last_access = Instant::now();
        Some(stored.session.clone())
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Drops every session not accessed within `ttl`. Returns how many were removed.
    ///
    /// A request already holding a session keeps working on its `Arc`; only
    /// later lookups miss.
    pub async fn evict_idle(&self, ttl: Duration) -> usize {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, stored| now.duration_since(stored.last_access) < ttl);
        before - sessions.len()
    }

    /// Spawns the background sweep: every `period`, evicts sessions idle for `ttl`.
    pub fn spawn_sweeper(&self, ttl: Duration, period: Duration) -> JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.tick().await; // skip immediate first tick

            loop {
                interval.tick().await;
                let evicted = store.evict_idle(ttl).await;
                if evicted > 0 {
                    info!(
                        "Evicted {evicted} idle session(s), {} live",
                        store.len().await
                    );
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(60);

    #[tokio::test]
    async fn test_insert_then_get_returns_same_session() {
        let store = SessionStore::default();
        let (id, shared) = store.insert(WizardSession::new(None)).await;

        let fetched = store.get(id).await.unwrap();
        assert!(Arc::ptr_eq(&shared, &fetched));
        assert_eq!(fetched.lock().await.id(), id);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_unknown_id_is_none() {
        let store = SessionStore::default();
        assert!(store.get(Uuid::new_v4()).await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_session_is_evicted() {
        let store = SessionStore::default();
        let (stale, _) = store.insert(WizardSession::new(None)).await;
        let (active, _) = store.insert(WizardSession::new(None)).await;

        tokio::time::advance(Duration::from_secs(45)).await;
        assert!(store.get(active).await.is_some());
        tokio::time::advance(Duration::from_secs(30)).await;

        assert_eq!(store.evict_idle(TTL).await, 1);
        assert!(store.get(stale).await.is_none());
        assert!(store.get(active).await.is_some());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_recent_sessions_survive_eviction() {
        let store = SessionStore::default();
        store.insert(WizardSession::new(None)).await;

        tokio::time::advance(Duration::from_secs(59)).await;
        assert_eq!(store.evict_idle(TTL).await, 0);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_removes_expired_sessions() {
        let store = SessionStore::default();
        let (id, _) = store.insert(WizardSession::new(None)).await;
        let sweeper = store.spawn_sweeper(TTL, Duration::from_secs(10));

        tokio::time::sleep(Duration::from_secs(75)).await;

        assert_eq!(store.len().await, 0);
        assert!(store.get(id).await.is_none());
        sweeper.abort();
    }
}
