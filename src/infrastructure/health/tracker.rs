//! Best-effort, rate-limited view of whether the database is reachable.

use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use super::probe::HealthProbe;

/// Last known reachability of the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    Connected,
    Disconnected,
    /// No check has completed yet.
    Checking,
}

impl ConnectionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Connected => "connected",
            Self::Disconnected => "disconnected",
            Self::Checking => "checking",
        }
    }

    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected)
    }
}

struct TrackerState {
    status: ConnectionStatus,
    last_checked: Option<Instant>,
}

/// Tracks database reachability without flooding it with probes.
///
/// A check is started by whoever first notices that the last one is older
/// than `interval`. That caller claims the slot by writing `last_checked`
/// before probing, so callers arriving while the probe is in flight see the
/// fresh timestamp and return the last known status instead of probing again.
/// The state lock is never held across the probe.
pub struct HealthTracker {
    probe: Arc<dyn HealthProbe>,
    interval: Duration,
    timeout: Duration,
    state: Mutex<TrackerState>,
}

impl HealthTracker {
    /// Creates a tracker that has not checked yet.
    ///
    /// # Arguments
    ///
    /// - `probe` - request used to test reachability
    /// - `interval` - minimum spacing between two checks
    /// - `timeout` - a probe running longer counts as a failure
    pub fn new(probe: Arc<dyn HealthProbe>, interval: Duration, timeout: Duration) -> Self {
        Self {
            probe,
            interval,
            timeout,
            state: Mutex::new(TrackerState {
                status: ConnectionStatus::Checking,
                last_checked: None,
            }),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns the last known status without checking.
    pub fn current(&self) -> ConnectionStatus {
        self.lock().status
    }

    /// When the most recent check was started.
    pub fn last_checked(&self) -> Option<Instant> {
        self.lock().last_checked
    }

    /// Returns the last known status, checking first if it is stale.
    ///
    /// Suspends only when this call is the one that starts the check.
    pub async fn status(&self) -> ConnectionStatus {
        if self.claim_if_due() {
            self.check().await
        } else {
            self.current()
        }
    }

    /// Checks now, regardless of when the last check ran.
    pub async fn refresh(&self) -> ConnectionStatus {
        self.lock().last_checked = Some(Instant::now());
        self.check().await
    }

    /// Spawns the background monitor that keeps the status fresh.
    ///
    /// The first check runs immediately, so the status leaves `checking` as
    /// soon as the first probe completes. Each following check is due one
    /// interval after the latest check started, whoever started it, so the
    /// status is never older than one interval plus the probe time.
    pub fn spawn_monitor(self: Arc<Self>) -> JoinHandle<()> {
        info!(
            "Health monitor started (interval: {:?}, timeout: {:?})",
            self.interval, self.timeout
        );

        tokio::spawn(async move {
            loop {
                self.status().await;

                let next = self
                    .last_checked()
                    .map_or_else(Instant::now, |at| at + self.interval);
                tokio::time::sleep_until(next).await;
            }
        })
    }

    fn lock(&self) -> MutexGuard<'_, TrackerState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn claim_if_due(&self) -> bool {
        let now = Instant::now();
        let mut state = self.lock();

        let due = match state.last_checked {
            None => true,
            Some(at) => now.duration_since(at) >= self.interval,
        };
        if due {
            state.last_checked = Some(now);
        }
        due
    }

    async fn check(&self) -> ConnectionStatus {
        let (next, reason) = match tokio::time::timeout(self.timeout, self.probe.ping()).await {
            Ok(Ok(())) => (ConnectionStatus::Connected, None),
            Ok(Err(e)) => (ConnectionStatus::Disconnected, Some(e.to_string())),
            Err(_) => (
                ConnectionStatus::Disconnected,
                Some(format!("probe timed out after {:?}", self.timeout)),
            ),
        };

        let previous = std::mem::replace(&mut self.lock().status, next);

        metrics::gauge!("connection_status").set(if next.is_connected() { 1.0 } else { 0.0 });

        match (previous, next) {
            (ConnectionStatus::Disconnected, ConnectionStatus::Connected) => {
                info!("Database connection recovered");
            }
            (prev, ConnectionStatus::Disconnected) if prev != ConnectionStatus::Disconnected => {
                warn!(
                    "Database connection lost: {}",
                    reason.as_deref().unwrap_or("unknown")
                );
            }
            _ => debug!("Health check: {}", next.as_str()),
        }

        next
    }
}
