// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Draft Sweeper
//!
//! Background task that evicts property drafts nobody has touched for the
//! configured TTL. Covers forms closed by a successful submission as well as
//! drafts a client simply walked away from; evicting a form drops its
//! previews.
//!
//! ## Shutdown
//!
//! Stops when the shared `tokio_util::sync::CancellationToken` is cancelled.

use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeDelta, Utc};
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::sessions::DraftSessions;

/// Default interval between sweeps.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Periodically evicts expired drafts.
pub struct DraftSweeper {
    sessions: Arc<DraftSessions>,
    ttl: TimeDelta,
    sweep_interval: Duration,
}

impl DraftSweeper {
    pub fn new(sessions: Arc<DraftSessions>, ttl: TimeDelta) -> Self {
        Self {
            sessions,
            ttl,
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
        }
    }

    pub fn with_interval(mut self, sweep_interval: Duration) -> Self {
        self.sweep_interval = sweep_interval;
        self
    }

    /// Run until `shutdown` is cancelled.
    ///
    /// ```rust,ignore
    /// tokio::spawn(sweeper.run(shutdown.clone()));
    /// ```
    pub async fn run(self, shutdown: CancellationToken) {
        info!(
            ttl_secs = self.ttl.num_seconds(),
            interval_secs = self.sweep_interval.as_secs(),
            "Draft sweeper starting"
        );

        let mut ticker = tokio::time::interval(self.sweep_interval);
        loop {
            tokio::select! {
                _ = ticker.tick() => self.sweep().await,
                _ = shutdown.cancelled() => {
                    info!("Draft sweeper shutting down");
                    return;
                }
            }
        }
    }

    async fn sweep(&self) {
        let evicted = self.sessions.evict_expired(Utc::now(), self.ttl).await;
        if evicted > 0 {
            let remaining = self.sessions.len().await;
            info!(evicted, remaining, "Evicted expired drafts");
        }
    }
}
