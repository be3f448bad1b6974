//! TTL-bounded map from session id to a shared conversation session
//!
//! Every operation takes the same map lock for its whole duration and never
//! awaits while holding it. Sessions are handed out as `Arc<tokio::sync::Mutex<T>>`:
//! the store lock only covers the lookup, while the per-session mutex
//! serializes the (possibly slow) work a request does on one conversation.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tokio::sync::OwnedMutexGuard;
use tracing::{debug, info};

use super::clock::{Clock, SystemClock};
use crate::utils::preview;

/// Idle time after which a session is considered expired
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

/// Shared, individually lockable session
pub type SessionHandle<T> = Arc<tokio::sync::Mutex<T>>;

/// Constructor invoked when a session id is seen for the first time
pub type SessionFactory<T> = Arc<dyn Fn() -> crate::Result<T> + Send + Sync>;

struct Entry<T> {
    session: SessionHandle<T>,
    last_touched: DateTime<Utc>,
}

/// Result of [`SessionStore::lookup`]
pub struct Lookup<T> {
    pub session: SessionHandle<T>,
    /// Lock on a session built by this call, taken before the session became
    /// visible to anyone else. `None` when the session already existed.
    pub first_turn: Option<OwnedMutexGuard<T>>,
}

impl<T> Lookup<T> {
    /// True when this call constructed the session
    pub fn created(&self) -> bool {
        self.first_turn.is_some()
    }
}

/// In-memory session cache with idle expiry
pub struct SessionStore<T> {
    entries: Mutex<HashMap<String, Entry<T>>>,
    ttl: Duration,
    factory: SessionFactory<T>,
    clock: Arc<dyn Clock>,
}

impl<T> SessionStore<T> {
    /// Create a store whose new sessions come from `factory`
    pub fn new<F>(ttl: Duration, factory: F) -> Self
    where
        F: Fn() -> crate::Result<T> + Send + Sync + 'static,
    {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
            factory: Arc::new(factory),
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the clock used for timestamps
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Strictly-greater comparison: an entry exactly `ttl` old is still live.
    fn is_expired(&self, last_touched: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        match (now - last_touched).to_std() {
            Ok(idle) => idle > self.ttl,
            // last_touched is in the future (clock stepped back)
            Err(_) => false,
        }
    }

    /// Refresh and return the live entry for `id`, if any
    fn touch_live(
        &self,
        entries: &mut HashMap<String, Entry<T>>,
        id: &str,
    ) -> Option<SessionHandle<T>> {
        let now = self.clock.now();
        let entry = entries.get_mut(id)?;
        if self.is_expired(entry.last_touched, now) {
            return None;
        }
        entry.last_touched = now;
        Some(Arc::clone(&entry.session))
    }

    /// Return the live session for `id`, creating it if absent or expired.
    ///
    /// A live hit refreshes the entry's timestamp.
    pub fn get_or_create(&self, id: &str) -> crate::Result<SessionHandle<T>> {
        self.lookup(id).map(|lookup| lookup.session)
    }

    /// Same as [`get_or_create`](Self::get_or_create), also handing the
    /// creator a lock on the new session.
    ///
    /// The factory runs without the map lock held. The entry is re-checked
    /// before insertion, so of two concurrent first requests for an id exactly
    /// one gets `first_turn`, and it holds the session lock before the other
    /// can reach the session.
    pub fn lookup(&self, id: &str) -> crate::Result<Lookup<T>> {
        if let Some(session) = self.touch_live(&mut self.entries.lock(), id) {
            return Ok(Lookup {
                session,
                first_turn: None,
            });
        }

        let session = Arc::new(tokio::sync::Mutex::new((self.factory)()?));
        let guard = Arc::clone(&session)
            .try_lock_owned()
            .map_err(|_| crate::Error::Internal("new session already locked".to_string()))?;

        let mut entries = self.entries.lock();
        if let Some(existing) = self.touch_live(&mut entries, id) {
            debug!(session = %preview(id, 64), "Session created concurrently, discarding ours");
            return Ok(Lookup {
                session: existing,
                first_turn: None,
            });
        }

        let replaced = entries.insert(
            id.to_string(),
            Entry {
                session: Arc::clone(&session),
                last_touched: self.clock.now(),
            },
        );
        drop(entries);

        if replaced.is_some() {
            info!(session = %preview(id, 64), "Session expired, replaced it");
        } else {
            info!(session = %preview(id, 64), "Created new session");
        }

        Ok(Lookup {
            session,
            first_turn: Some(guard),
        })
    }

/// Insert or overwrite `id`, stamped with the current time
    pub fn put(&self, id: &str, session: SessionHandle<T>) {
        let now = self.clock.now();
        self.entries.lock().insert(
            id.to_string(),
            Entry {
                session,
                last_touched: now,
            },
        );
        debug!(session = %preview(id, 64), "Stored session");
    }

    /// Whether `id` is present and live. Never refreshes the timestamp.
    pub fn exists(&self, id: &str) -> bool {
        let now = self.clock.now();
        self.entries
            .lock()
            .get(id)
            .is_some_and(|entry| !self.is_expired(entry.last_touched, now))
    }

    /// Remove every expired entry and return how many were dropped
    pub fn cleanup_expired(&self) -> usize {
        let now = self.clock.now();
        let mut entries = self.entries.lock();
        let before = entries.len();
        entries.retain(|_, entry| !self.is_expired(entry.last_touched, now));
        let removed = before - entries.len();

        if removed > 0 {
            info!("Cleaned up {} expired sessions", removed);
        }
        removed
    }

    /// Number of entries, including expired ones not yet swept
    pub fn size(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Timestamp of the last successful access to `id`
    pub fn last_touched(&self, id: &str) -> Option<DateTime<Utc>> {
        self.entries.lock().get(id).map(|entry| entry.last_touched)
    }
}
