use crate::store::TokenStore;
use slog_scope::{debug, info, warn};
use std::time::{Duration, Instant};

/// Background reclamation pass over a [`TokenStore`]. Each tick drains the
/// expired records (fast, under the store lock) and then deletes their
/// backing files (slow, I/O) with the lock already released, so register
/// and redeem latency never waits on the disk.
pub struct Sweeper {
    store: TokenStore,
    interval: Duration,
}

impl Sweeper {
    pub fn new(store: TokenStore, interval: Duration) -> Sweeper {
        Sweeper { store, interval }
    }

    /// Runs sweep passes forever. Intended to be `tokio::spawn`ed exactly
    /// once and abandoned at process exit.
    pub async fn run(self) {
        let mut ticker = tokio::time::interval(self.interval);
        loop {
            ticker.tick().await;
            self.sweep_once().await;
        }
    }

    /// One reclamation pass. Returns how many records were drained.
    /// A file that cannot be deleted is logged and skipped: its record is
    /// already gone from the store, so the failure leaks a file but never
    /// a live token.
    pub async fn sweep_once(&self) -> usize {
        let expired = self.store.drain_expired(Instant::now());
        if expired.is_empty() {
            debug!("sweep: nothing expired");
            return 0;
        }
        info!("sweep: reclaiming {} expired artifact(s)", expired.len());
        for record in &expired {
            match tokio::fs::remove_file(&record.filename).await {
                Ok(()) => debug!("sweep: deleted {}", record.filename.display()),
                Err(err) => warn!(
                    "sweep: failed to delete {}: {}",
                    record.filename.display(),
                    err
                ),
            }
        }
        expired.len()
    }
}
