//! Session registry: one Strategy Store per interactive session.
//!
//! Sessions live in process memory only and end on `DELETE` or after sitting
//! idle longer than the configured TTL. Each session sits behind its own
//! `RwLock`: generation and credential changes take it exclusively, reads share
//! it. A request that cannot get the lock it needs is rejected, not queued.

pub mod handlers;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{OwnedRwLockReadGuard, OwnedRwLockWriteGuard, RwLock};
use tokio::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::llm_client::ApiKey;
use crate::strategy::store::StrategyStore;

/// Idle time after which a session is dropped, unless configured otherwise.
pub const DEFAULT_IDLE_TTL: Duration = Duration::from_secs(60 * 60);

#[derive(Debug)]
pub struct Session {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub api_key: Option<ApiKey>,
    /// Product name of the generation that produced `store`'s current result.
    pub product_name: Option<String>,
    pub store: StrategyStore,
}

impl Session {
    fn new(api_key: Option<ApiKey>) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            api_key,
            product_name: None,
            store: StrategyStore::new(),
        }
    }
}

pub type SessionHandle = Arc<RwLock<Session>>;

struct Entry {
    handle: SessionHandle,
    last_used: Instant,
}

#[derive(Clone)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<Uuid, Entry>>>,
    idle_ttl: Duration,
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::with_idle_ttl(DEFAULT_IDLE_TTL)
    }
}

impl SessionRegistry {
    pub fn with_idle_ttl(idle_ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            idle_ttl,
        }
    }

    pub fn idle_ttl(&self) -> Duration {
        self.idle_ttl
    }

    pub async fn create(&self, api_key: Option<ApiKey>) -> Uuid {
        let session = Session::new(api_key);
        let id = session.id;
        self.sessions.write().await.insert(
            id,
            Entry {
                handle: Arc::new(RwLock::new(session)),
                last_used: Instant::now(),
            },
        );
        info!("Session {} created", id);
        id
    }

    /// Shared access for reads. Fails with `SessionBusy` only while a writer holds it.
    pub async fn acquire_read(
        &self,
        id: Uuid,
    ) -> Result<OwnedRwLockReadGuard<Session>, AppError> {
        self.touch(id)
            .await?
            .try_read_owned()
            .map_err(|_| AppError::SessionBusy)
    }

    /// Exclusive access for generation and credential changes. Fails with
    /// `SessionBusy` instead of waiting.
    pub async fn acquire_write(
        &self,
        id: Uuid,
    ) -> Result<OwnedRwLockWriteGuard<Session>, AppError> {
        self.touch(id)
            .await?
            .try_write_owned()
            .map_err(|_| AppError::SessionBusy)
    }

    /// Looks the session up and marks it used. An entry already past its TTL is
    /// dropped here rather than waiting for the next sweep.
    async fn touch(&self, id: Uuid) -> Result<SessionHandle, AppError> {
        let mut sessions = self.sessions.write().await;
        let now = Instant::now();

        let expired = match sessions.get(&id) {
            None => return Err(not_found(id)),
            Some(entry) => is_idle(entry, now, self.idle_ttl),
        };
        if expired {
            sessions.remove(&id);
            info!("Session {} expired after idling", id);
            return Err(not_found(id));
        }

        let entry = sessions.get_mut(&id).ok_or_else(|| not_found(id))?;
        entry.last_used = now;
        Ok(entry.handle.clone())
    }

    /// Ends a session; its store and key are dropped with it.
    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        let removed = self.sessions.write().await.remove(&id);
        match removed {
            Some(_) => {
                info!("Session {} ended", id);
                Ok(())
            }
            None => Err(not_found(id)),
        }
    }

    /// Drops every idle session. Returns how many were removed.
    pub async fn evict_idle(&self) -> usize {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| !is_idle(entry, now, self.idle_ttl));
        let evicted = before - sessions.len();
        if evicted > 0 {
            info!("Evicted {} idle sessions", evicted);
        } else {
            debug!("Session sweep: nothing idle");
        }
        evicted
    }

    /// Runs `evict_idle` forever at the given period. Spawn once from `main`.
    pub async fn run_sweeper(self, period: Duration) {
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            self.evict_idle().await;
        }
    }

    pub async fn active_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

/// A session in use (any lock held) is never idle, however old its timestamp.
fn is_idle(entry: &Entry, now: Instant, ttl: Duration) -> bool {
    now.duration_since(entry.last_used) > ttl && entry.handle.try_write().is_ok()
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Session {id} not found"))
}
