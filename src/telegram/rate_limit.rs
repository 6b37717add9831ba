//! Sliding-window rate limiting for outbound notifications.
//!
//! One limiter instance exists per process, owned by the notifier. A
//! slot is consumed the moment a send is attempted, whether or not the
//! send later succeeds, so transient platform errors cannot cause
//! bursts. Nothing is persisted across restarts.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Counts calls within a trailing time window.
#[derive(Debug)]
pub struct RateLimiter {
    quota: usize,
    window: Duration,
    calls: VecDeque<Instant>,
}

impl RateLimiter {
    /// Creates a limiter allowing `quota` calls per trailing `window`.
    #[must_use]
    pub const fn new(quota: usize, window: Duration) -> Self {
        Self {
            quota,
            window,
            calls: VecDeque::new(),
        }
    }

    /// Takes a slot if one is available. Returns `false` when the quota
    /// for the current window is exhausted; the caller must not send.
    pub fn allow(&mut self) -> bool {
        self.allow_at(Instant::now())
    }

    fn allow_at(&mut self, now: Instant) -> bool {
        while let Some(&oldest) = self.calls.front() {
            if now.duration_since(oldest) >= self.window {
                self.calls.pop_front();
            } else {
                break;
            }
        }

        if self.calls.len() >= self.quota {
            return false;
        }

        self.calls.push_back(now);
        true
    }
}
