//! IdleSessionSweeper - Background eviction of abandoned sessions.
//!
//! Sessions otherwise live as long as the process. When an idle TTL is
//! configured, the sweeper wakes every `sweep_interval` and asks the store
//! to drop sessions untouched for longer than `idle_ttl`.
//!
//! ## Graceful Shutdown
//!
//! The sweeper listens on a watch channel and stops between sweeps.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time;

use crate::ports::{SessionStore, SessionStoreError};

/// Configuration for the IdleSessionSweeper.
#[derive(Debug, Clone)]
pub struct IdleSessionSweeperConfig {
    /// Sessions idle for longer than this are evicted.
    pub idle_ttl: Duration,

    /// How often to sweep.
    pub sweep_interval: Duration,
}

impl IdleSessionSweeperConfig {
    pub fn new(idle_ttl: Duration) -> Self {
        Self {
            idle_ttl,
            sweep_interval: Duration::from_secs(60),
        }
    }

    pub fn with_sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = interval;
        self
    }
}

/// Background task that evicts idle sessions.
pub struct IdleSessionSweeper {
    store: Arc<dyn SessionStore>,
    config: IdleSessionSweeperConfig,
}

impl IdleSessionSweeper {
    pub fn new(store: Arc<dyn SessionStore>, config: IdleSessionSweeperConfig) -> Self {
        Self { store, config }
    }

    /// Run the sweep loop until shutdown signal is received.
    ///
    /// Storage errors are logged and the loop keeps going.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        let mut interval = time::interval(self.config.sweep_interval);
        // The first tick completes immediately; nothing can be idle yet.
        interval.tick().await;

        loop {
            tokio::select! {
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        tracing::debug!("Idle session sweeper stopping");
                        return;
                    }
                }

                _ = interval.tick() => {
                    if let Err(err) = self.sweep_once().await {
                        tracing::error!(error = %err, "Idle session sweep failed");
                    }
                }
            }
        }
    }

    /// Evict idle sessions once, returning how many were removed.
    pub async fn sweep_once(&self) -> Result<usize, SessionStoreError> {
        self.store.evict_idle(self.config.idle_ttl).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemorySessionStore;
    use crate::domain::foundation::Timestamp;

    async fn stale_session(store: &InMemorySessionStore) {
        let id = store.create_session().await.unwrap();
        let handle = store.checkout(id).await.unwrap();
        handle.lock().await.last_updated = Timestamp::now().minus_secs(3600);
    }

    #[tokio::test]
    async fn sweep_once_evicts_stale_sessions() {
        let store = Arc::new(InMemorySessionStore::new());
        stale_session(&store).await;
        store.create_session().await.unwrap();

        let sweeper = IdleSessionSweeper::new(
            store.clone(),
            IdleSessionSweeperConfig::new(Duration::from_secs(60)),
        );

        assert_eq!(sweeper.sweep_once().await.unwrap(), 1);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn run_sweeps_until_shutdown() {
        let store = Arc::new(InMemorySessionStore::new());
        let config = IdleSessionSweeperConfig::new(Duration::from_secs(60))
            .with_sweep_interval(Duration::from_millis(10));
        let sweeper = IdleSessionSweeper::new(store.clone(), config);

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = tokio::spawn(async move { sweeper.run(shutdown_rx).await });

        stale_session(&store).await;
        for _ in 0..100 {
            if store.len().await == 0 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(store.len().await, 0);

        shutdown_tx.send(true).unwrap();
        handle.await.unwrap();
    }

    #[test]
    fn config_defaults_to_one_minute_interval() {
        let config = IdleSessionSweeperConfig::new(Duration::from_secs(900));

        assert_eq!(config.idle_ttl, Duration::from_secs(900));
        assert_eq!(config.sweep_interval, Duration::from_secs(60));
    }
}
