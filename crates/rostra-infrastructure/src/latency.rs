//! Artificial store latency.
//!
//! Every repository call pauses briefly before touching the file, so the
//! UI layer sees the same network-shaped loading states it would against
//! a remote backend, even though the medium is local.

use std::time::Duration;

/// The pause applied before each store operation.
#[derive(Debug, Clone, Copy)]
pub struct Latency(Duration);

impl Latency {
    /// The default pause.
    pub const DEFAULT_MILLIS: u64 = 200;

    pub fn new(duration: Duration) -> Self {
        Self(duration)
    }

    /// No pause; used by tests.
    pub fn none() -> Self {
        Self(Duration::ZERO)
    }

    pub async fn pause(&self) {
        if !self.0.is_zero() {
            tokio::time::sleep(self.0).await;
        }
    }
}

impl Default for Latency {
    fn default() -> Self {
        Self(Duration::from_millis(Self::DEFAULT_MILLIS))
    }
}
