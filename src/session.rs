use crate::models::EntryLog;
use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "fitness_session";

#[derive(Debug)]
struct Session {
    log: EntryLog,
    last_seen: Instant,
}

#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<Uuid, Session>>>,
    idle_timeout: Duration,
}

impl SessionStore {
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            idle_timeout,
        }
    }

    /// Runs `f` against the log of session `id`, starting a fresh session when
    /// `id` is absent or no longer live. Returns the id actually used.
    pub async fn with_log<T>(&self, id: Option<Uuid>, f: impl FnOnce(&mut EntryLog) -> T) -> (Uuid, T) {
        self.with_log_at(Instant::now(), id, f).await
    }

    async fn with_log_at<T>(
        &self,
        now: Instant,
        id: Option<Uuid>,
        f: impl FnOnce(&mut EntryLog) -> T,
    ) -> (Uuid, T) {
        let mut sessions = self.sessions.lock().await;

        let before = sessions.len();
        sessions.retain(|_, session| now.saturating_duration_since(session.last_seen) <= self.idle_timeout);
        let expired = before - sessions.len();
        if expired > 0 {
            debug!(expired, "discarded idle sessions");
        }

        let id = match id {
            Some(id) if sessions.contains_key(&id) => id,
            _ => {
                let id = Uuid::new_v4();
                debug!(%id, "starting session");
                id
            }
        };

        let session = sessions.entry(id).or_insert_with(|| Session {
            log: EntryLog::new(),
            last_seen: now,
        });
        session.last_seen = now;
        let result = f(&mut session.log);

        (id, result)
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Entry, Gender};

    fn entry() -> Entry {
        Entry {
            date: "2024-01-05".parse().unwrap(),
            height_cm: 170.0,
            age_years: 25,
            gender: Gender::Male,
            weight_kg: 70.0,
            calories: 2000,
            steps: 5000,
        }
    }

    #[tokio::test]
    async fn missing_id_starts_a_session() {
        let store = SessionStore::new(Duration::from_secs(60));
        let (id, len) = store.with_log(None, |log| log.len()).await;

        assert_eq!(len, 0);
        assert_eq!(store.len().await, 1);

        let (same, _) = store.with_log(Some(id), |log| log.push(entry())).await;
        assert_eq!(same, id);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn sessions_do_not_share_logs() {
        let store = SessionStore::new(Duration::from_secs(60));
        let (first, _) = store.with_log(None, |log| log.push(entry())).await;
        let (second, len) = store.with_log(None, |log| log.len()).await;

        assert_ne!(first, second);
        assert_eq!(len, 0);
        let (_, len) = store.with_log(Some(first), |log| log.len()).await;
        assert_eq!(len, 1);
    }

    #[tokio::test]
    async fn unknown_id_gets_a_fresh_session() {
        let store = SessionStore::new(Duration::from_secs(60));
        let stale = Uuid::new_v4();
        let (id, _) = store.with_log(Some(stale), |_| ()).await;

        assert_ne!(id, stale);
    }

    #[tokio::test]
    async fn idle_sessions_are_discarded() {
        let store = SessionStore::new(Duration::from_secs(60));
        let start = Instant::now();
        let (id, _) = store.with_log_at(start, None, |log| log.push(entry())).await;

        let later = start + Duration::from_secs(61);
        let (next, len) = store.with_log_at(later, Some(id), |log| log.len()).await;

        assert_ne!(next, id);
        assert_eq!(len, 0);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn activity_keeps_a_session_alive() {
        let store = SessionStore::new(Duration::from_secs(60));
        let start = Instant::now();
        let (id, _) = store.with_log_at(start, None, |log| log.push(entry())).await;
        store
            .with_log_at(start + Duration::from_secs(50), Some(id), |_| ())
            .await;

        let (same, len) = store
            .with_log_at(start + Duration::from_secs(100), Some(id), |log| log.len())
            .await;
        assert_eq!(same, id);
        assert_eq!(len, 1);
    }
}
