//! Login sessions
//!
//! Server-side sessions keyed by an opaque cookie id, plus the short-lived
//! `state` values issued when a login starts. Expired entries are dropped
//! on access and by [`purge_loop`].

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

/// How long a started login may take before its `state` is rejected.
const LOGIN_WINDOW: Duration = Duration::from_secs(600);

/// Identity returned by the provider's userinfo endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub sub: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Session {
    pub id: String,
    pub user: UserProfile,
    pub access_token: String,
    pub id_token: Option<String>,
    pub expires_at: Instant,
}

impl Session {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

pub struct SessionStore {
    sessions: RwLock<HashMap<String, Session>>,
    pending_logins: RwLock<HashMap<String, Instant>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            pending_logins: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Issue a `state` value for a login redirect.
    pub async fn begin_login(&self) -> String {
        let state = Uuid::new_v4().simple().to_string();
        self.pending_logins
            .write()
            .await
            .insert(state.clone(), Instant::now() + LOGIN_WINDOW);
        state
    }

    /// Consume a `state` value. False if it was never issued, already used
    /// or too old.
    pub async fn finish_login(&self, state: &str) -> bool {
        match self.pending_logins.write().await.remove(state) {
            Some(deadline) => Instant::now() < deadline,
            None => false,
        }
    }

    pub async fn create(&self, user: UserProfile, access_token: String, id_token: Option<String>) -> Session {
        let session = Session {
            id: Uuid::new_v4().to_string(),
            user,
            access_token,
            id_token,
            expires_at: Instant::now() + self.ttl,
        };
        self.sessions.write().await.insert(session.id.clone(), session.clone());
        info!(session_id = %session.id, sub = %session.user.sub, "session created");
        session
    }

    pub async fn get(&self, id: &str) -> Option<Session> {
        let sessions = self.sessions.read().await;
        sessions.get(id).filter(|s| !s.is_expired(Instant::now())).cloned()
    }

    pub async fn find_by_access_token(&self, token: &str) -> Option<Session> {
        let now = Instant::now();
        let sessions = self.sessions.read().await;
        sessions
            .values()
            .find(|s| s.access_token == token && !s.is_expired(now))
            .cloned()
    }

    pub async fn remove(&self, id: &str) -> Option<Session> {
        let removed = self.sessions.write().await.remove(id);
        if let Some(session) = &removed {
            info!(session_id = %session.id, "session closed");
        }
        removed
    }

    /// Drop expired sessions and stale login states; returns how many
    /// sessions were removed.
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();

        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired(now));
        let removed = before - sessions.len();
        drop(sessions);

        self.pending_logins.write().await.retain(|_, deadline| now < *deadline);
        removed
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

/// Periodically purge expired sessions.
pub async fn purge_loop(store: Arc<SessionStore>, every: Duration) {
    let mut interval = tokio::time::interval(every);
    loop {
        interval.tick().await;
        let removed = store.purge_expired().await;
        if removed > 0 {
            info!(removed, "expired sessions purged");
        } else {
            debug!("session purge found nothing to remove");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserProfile {
        UserProfile {
            sub: "auth0|1".to_string(),
            name: Some("Sam Lee".to_string()),
            email: Some("sam@example.com".to_string()),
            picture: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_lookup() {
        let store = SessionStore::new(Duration::from_secs(60));
        let session = store.create(user(), "tok".to_string(), None).await;

        assert_eq!(store.get(&session.id).await.unwrap().user, user());
        assert_eq!(store.find_by_access_token("tok").await.unwrap().id, session.id);
        assert!(store.find_by_access_token("other").await.is_none());
    }

    #[tokio::test]
    async fn test_expired_sessions_are_invisible_and_purged() {
        let store = SessionStore::new(Duration::ZERO);
        let session = store.create(user(), "tok".to_string(), None).await;

        assert!(store.get(&session.id).await.is_none());
        assert!(store.find_by_access_token("tok").await.is_none());
        assert_eq!(store.purge_expired().await, 1);
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn test_login_state_is_single_use() {
        let store = SessionStore::new(Duration::from_secs(60));
        let state = store.begin_login().await;

        assert!(store.finish_login(&state).await);
        assert!(!store.finish_login(&state).await);
        assert!(!store.finish_login("forged").await);
    }

    #[tokio::test]
    async fn test_remove() {
        let store = SessionStore::new(Duration::from_secs(60));
        let session = store.create(user(), "tok".to_string(), None).await;

        assert!(store.remove(&session.id).await.is_some());
        assert!(store.get(&session.id).await.is_none());
    }
}
