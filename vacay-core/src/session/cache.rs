//! Session store bundled with its expiry sweeper

use std::ops::Deref;
use std::sync::Arc;
use std::time::Duration;

use super::store::SessionStore;
use super::sweeper::ExpirySweeper;
use crate::config::schema::SessionConfig;

/// A [`SessionStore`] plus the background sweep that keeps it bounded.
///
/// Hosts with a lifecycle call [`start`](Self::start) after construction and
/// [`stop`](Self::stop) on shutdown. [`spawn`](Self::spawn) does both steps
/// of construction at once for hosts that have no startup hook.
pub struct SessionCache<T> {
    store: Arc<SessionStore<T>>,
    sweeper: ExpirySweeper,
}

impl<T: Send + 'static> SessionCache<T> {
    pub fn new(store: SessionStore<T>, sweep_interval: Duration) -> Self {
        Self {
            store: Arc::new(store),
            sweeper: ExpirySweeper::new(sweep_interval),
        }
    }

    /// Build a cache from the `sessions` config section
    pub fn from_config<F>(config: &SessionConfig, factory: F) -> Self
    where
        F: Fn() -> crate::Result<T> + Send + Sync + 'static,
    {
        Self::new(
            SessionStore::new(config.ttl(), factory),
            config.sweep_interval(),
        )
    }

    /// Construct and immediately start sweeping. Needs a running tokio runtime.
    pub fn spawn(store: SessionStore<T>, sweep_interval: Duration) -> Self {
        let cache = Self::new(store, sweep_interval);
        cache.start();
        cache
    }

    pub fn store(&self) -> &Arc<SessionStore<T>> {
        &self.store
    }

    /// Start the sweeper. Returns `false` if it was already running.
    pub fn start(&self) -> bool {
        self.sweeper.start(self.store.clone())
    }

    pub async fn stop(&self) -> bool {
        self.sweeper.stop().await
    }

    pub fn is_sweeping(&self) -> bool {
        self.sweeper.is_running()
    }

    pub fn sweep_interval(&self) -> Duration {
        self.sweeper.interval()
    }
}

impl<T> Deref for SessionCache<T> {
    type Target = SessionStore<T>;

    fn deref(&self) -> &Self::Target {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::clock::ManualClock;

    #[tokio::test(start_paused = true)]
    async fn test_cache_lifecycle_from_config() {
        let config = SessionConfig {
            ttl_secs: 60,
            sweep_interval_secs: 30,
        };
        let cache = SessionCache::from_config(&config, || Ok(0u32));

        assert_eq!(cache.ttl(), Duration::from_secs(60));
        assert_eq!(cache.sweep_interval(), Duration::from_secs(30));
        assert!(!cache.is_sweeping());

        assert!(cache.start());
        assert!(!cache.start());
        assert!(cache.is_sweeping());

        assert!(cache.stop().await);
        assert!(!cache.is_sweeping());
    }

    #[tokio::test(start_paused = true)]
    async fn test_spawned_cache_evicts_in_background() {
        let clock = Arc::new(ManualClock::starting_now());
        let store =
            SessionStore::new(Duration::from_secs(10), || Ok(0u32)).with_clock(clock.clone());
        let cache = SessionCache::spawn(store, Duration::from_secs(5));
        assert!(cache.is_sweeping());

        cache.get_or_create("a").unwrap();
        clock.advance(Duration::from_secs(11));
        assert_eq!(cache.size(), 1);

        tokio::time::advance(Duration::from_secs(5)).await;
        for _ in 0..16 {
            tokio::task::yield_now().await;
        }
        assert_eq!(cache.size(), 0);

        assert!(cache.stop().await);
    }
}
