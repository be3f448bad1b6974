//! Background task that periodically evicts expired sessions

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::store::SessionStore;

/// How often the sweeper runs unless configured otherwise
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(300);

/// Something the sweeper can clean
pub trait SweepTarget: Send + Sync {
    /// Remove expired entries, returning how many were dropped
    fn cleanup_expired(&self) -> usize;

    /// Entries remaining
    fn size(&self) -> usize;
}

impl<T: Send + 'static> SweepTarget for SessionStore<T> {
    fn cleanup_expired(&self) -> usize {
        SessionStore::cleanup_expired(self)
    }

    fn size(&self) -> usize {
        SessionStore::size(self)
    }
}

struct Running {
    handle: JoinHandle<()>,
    cancel: CancellationToken,
}

/// Periodic expiry sweep with explicit start/stop
///
/// The first sweep happens one full interval after `start`. Dropping the
/// sweeper cancels a running task.
pub struct ExpirySweeper {
    interval: Duration,
    task: Mutex<Option<Running>>,
}

impl ExpirySweeper {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            task: Mutex::new(None),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Spawn the sweep loop on the current tokio runtime.
    ///
    /// Returns `false` without spawning anything if a sweep loop is already
    /// running for this sweeper.
    pub fn start(&self, target: Arc<dyn SweepTarget>) -> bool {
        let mut task = self.task.lock();
        if task
            .as_ref()
            .is_some_and(|running| !running.handle.is_finished())
        {
            debug!("Session sweeper already running");
            return false;
        }

        let cancel = CancellationToken::new();
        let handle = tokio::spawn(sweep_loop(target, self.interval, cancel.clone()));
        *task = Some(Running { handle, cancel });

        info!(
            "Session sweeper started (every {}s)",
            self.interval.as_secs_f64()
        );
        true
    }

    /// Cancel the sweep loop and wait for it to exit.
    ///
    /// Returns `false` if nothing was running.
    pub async fn stop(&self) -> bool {
        let Some(running) = self.task.lock().take() else {
            return false;
        };

        running.cancel.cancel();
        if let Err(e) = running.handle.await {
            if !e.is_cancelled() {
                warn!("Session sweeper exited abnormally: {}", e);
            }
        }
        info!("Session sweeper stopped");
        true
    }

    pub fn is_running(&self) -> bool {
        self.task
            .lock()
            .as_ref()
            .is_some_and(|running| !running.handle.is_finished())
    }
}

impl Default for ExpirySweeper {
    fn default() -> Self {
        Self::new(DEFAULT_SWEEP_INTERVAL)
    }
}

impl Drop for ExpirySweeper {
    fn drop(&mut self) {
        if let Some(running) = self.task.get_mut().take() {
            running.cancel.cancel();
        }
    }
}

async fn sweep_loop(target: Arc<dyn SweepTarget>, period: Duration, cancel: CancellationToken) {
    let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {
                let removed = target.cleanup_expired();
                info!(
                    removed,
                    remaining = target.size(),
                    "Session sweep complete"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio_test::assert_ok;

    #[derive(Default)]
    struct CountingTarget {
        sweeps: AtomicUsize,
    }

    impl CountingTarget {
        fn sweeps(&self) -> usize {
            self.sweeps.load(Ordering::SeqCst)
        }
    }

    impl SweepTarget for CountingTarget {
        fn cleanup_expired(&self) -> usize {
            self.sweeps.fetch_add(1, Ordering::SeqCst);
            0
        }

        fn size(&self) -> usize {
            0
        }
    }

    async fn settle() {
        for _ in 0..16 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_sweep_before_first_interval() {
        let target = Arc::new(CountingTarget::default());
        let sweeper = ExpirySweeper::new(Duration::from_secs(300));

        assert!(sweeper.start(target.clone()));
        settle().await;
        assert_eq!(target.sweeps(), 0);

        tokio::time::advance(Duration::from_secs(299)).await;
        settle().await;
        assert_eq!(target.sweeps(), 0);

        tokio::time::advance(Duration::from_secs(1)).await;
        settle().await;
        assert_eq!(target.sweeps(), 1);

        tokio::time::advance(Duration::from_secs(300)).await;
        settle().await;
        assert_eq!(target.sweeps(), 2);

        assert!(sweeper.stop().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_start_is_rejected() {
        let target = Arc::new(CountingTarget::default());
        let sweeper = ExpirySweeper::new(Duration::from_secs(300));

        assert!(sweeper.start(target.clone()));
        assert!(!sweeper.start(target.clone()));
        assert!(sweeper.is_running());

        tokio::time::advance(Duration::from_secs(300)).await;
        settle().await;
        // one loop, one sweep
        assert_eq!(target.sweeps(), 1);

        assert!(sweeper.stop().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_halts_sweeps_and_allows_restart() {
        let target = Arc::new(CountingTarget::default());
        let sweeper = ExpirySweeper::new(Duration::from_secs(60));

        assert!(!sweeper.stop().await);
        assert!(sweeper.start(target.clone()));
        assert!(sweeper.stop().await);
        assert!(!sweeper.is_running());

        tokio::time::advance(Duration::from_secs(600)).await;
        settle().await;
        assert_eq!(target.sweeps(), 0);

        assert!(sweeper.start(target.clone()));
        tokio::time::advance(Duration::from_secs(60)).await;
        settle().await;
        assert_eq!(target.sweeps(), 1);
        assert!(sweeper.stop().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_loop() {
        let target = Arc::new(CountingTarget::default());
        {
            let sweeper = ExpirySweeper::new(Duration::from_secs(60));
            assert!(sweeper.start(target.clone()));
        }

        tokio::time::advance(Duration::from_secs(600)).await;
        settle().await;
        assert_eq!(target.sweeps(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeps_session_store() {
        use crate::session::clock::ManualClock;

        let clock = Arc::new(ManualClock::starting_now());
        let store = Arc::new(
            SessionStore::new(Duration::from_secs(60), || Ok(Vec::<String>::new()))
                .with_clock(clock.clone()),
        );
        assert_ok!(store.get_or_create("stale"));

        let sweeper = ExpirySweeper::new(Duration::from_secs(300));
        assert!(sweeper.start(store.clone()));

        clock.advance(Duration::from_secs(120));
        assert_ok!(store.get_or_create("fresh"));

        tokio::time::advance(Duration::from_secs(300)).await;
        settle().await;

        assert_eq!(store.size(), 1);
        assert!(store.exists("fresh"));
        assert!(sweeper.stop().await);
    }
}
