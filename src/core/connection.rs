//! Connection health bookkeeping.
//!
//! Health never blocks a call. It only stretches the timeout of the next attempt while the
//! backend keeps failing, and reports whether the client currently looks offline.

use std::time::Duration;

use chrono::{DateTime, Utc};

/// Multiplier growth per consecutive failure.
const MULTIPLIER_STEP: f64 = 0.5;
/// Upper bound for the timeout multiplier.
pub const MAX_BACKOFF_MULTIPLIER: f64 = 3.0;
/// Failures tolerated before the connection is reported unhealthy.
const UNHEALTHY_AFTER: u32 = 3;

/// A snapshot of the client's view of the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionHealth {
    /// `false` once `UNHEALTHY_AFTER` attempts in a row have failed.
    pub is_healthy: bool,
    /// Attempts that failed since the last success.
    pub consecutive_failures: u32,
    /// When the backend last answered.
    pub last_success: Option<DateTime<Utc>>,
    /// Factor applied to the base request timeout.
    pub backoff_multiplier: f64,
    /// `false` after a transport-level failure, until the backend answers again.
    pub is_online: bool,
}

impl Default for ConnectionHealth {
    fn default() -> Self {
        Self {
            is_healthy: true,
            consecutive_failures: 0,
            last_success: None,
            backoff_multiplier: 1.0,
            is_online: true,
        }
    }
}

impl ConnectionHealth {
    /// Records an attempt that reached the backend and was not a server error.
    pub fn record_success(&mut self) {
        self.is_healthy = true;
        self.consecutive_failures = 0;
        self.last_success = Some(Utc::now());
        self.backoff_multiplier = 1.0;
        self.is_online = true;
    }

    /// Records a failed attempt. `transport` marks failures that never reached the backend.
    pub fn record_failure(&mut self, transport: bool) {
        self.consecutive_failures = self.consecutive_failures.saturating_add(1);
        self.backoff_multiplier =
            (self.backoff_multiplier + MULTIPLIER_STEP).min(MAX_BACKOFF_MULTIPLIER);
        self.is_healthy = self.consecutive_failures < UNHEALTHY_AFTER;
        if transport {
            self.is_online = false;
        }
    }

    /// The timeout to use for the next attempt.
    pub fn scaled_timeout(&self, base: Duration) -> Duration {
        base.mul_f64(self.backoff_multiplier)
    }

    /// Whether served data is likely synthesized right now.
    pub const fn is_degraded(&self) -> bool {
        !self.is_online || !self.is_healthy
    }
}
