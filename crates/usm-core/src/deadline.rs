// ── Deadline and cancellation ──
//
// Every wait in a long-running flow goes through a `Deadline`, which pairs
// an optional instant with a cancellation token. Waits end early with
// `Cancelled` or `Timeout`; no wait ever blocks past either.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::CoreError;

#[derive(Debug, Clone)]
pub struct Deadline {
    started: Instant,
    expires_at: Option<Instant>,
    cancel: CancellationToken,
}

impl Deadline {
    /// Expire `budget` from now.
    pub fn after(budget: Duration) -> Self {
        let started = Instant::now();
        Self {
            started,
            expires_at: Some(started + budget),
            cancel: CancellationToken::new(),
        }
    }

    /// Never expire; only cancellation ends waits.
    pub fn unbounded() -> Self {
        Self {
            started: Instant::now(),
            expires_at: None,
            cancel: CancellationToken::new(),
        }
    }

    /// Tie this deadline to an external cancellation token.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Time left, or `None` when unbounded.
    pub fn remaining(&self) -> Option<Duration> {
        self.expires_at
            .map(|at| at.saturating_duration_since(Instant::now()))
    }

    fn timeout(&self) -> CoreError {
        CoreError::Timeout {
            after: self.started.elapsed(),
        }
    }

    /// Fail immediately if cancelled or expired.
    pub fn check(&self) -> Result<(), CoreError> {
        if self.cancel.is_cancelled() {
            return Err(CoreError::Cancelled);
        }
        match self.expires_at {
            Some(at) if Instant::now() >= at => Err(self.timeout()),
            _ => Ok(()),
        }
    }

    async fn expired(&self) {
        match self.expires_at {
            Some(at) => tokio::time::sleep_until(at).await,
            None => std::future::pending().await,
        }
    }

    /// Sleep for `interval`, waking early on cancellation or expiry.
    pub async fn pause(&self, interval: Duration) -> Result<(), CoreError> {
        self.bound(tokio::time::sleep(interval)).await
    }

    /// Run `fut` to completion unless cancellation or expiry come first.
    pub async fn bound<F: Future>(&self, fut: F) -> Result<F::Output, CoreError> {
        self.check()?;
        tokio::select! {
            biased;
            () = self.cancel.cancelled() => Err(CoreError::Cancelled),
            () = self.expired() => Err(self.timeout()),
            out = fut => Ok(out),
        }
    }
}
