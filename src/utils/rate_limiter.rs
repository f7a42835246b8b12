//! Fixed-window request counting per client key.
//!
//! Used for both anonymous creation (keyed by IP) and authenticated
//! creation (keyed by user id). The window resets lazily on the next
//! request after it expires; there is no background sweeper.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Per-key fixed-window counter.
pub struct RateLimiter {
    /// `-1` disables limiting entirely, `0` refuses every request.
    limit: i32,
    window: Duration,
    counts: Mutex<HashMap<String, (u32, Instant)>>,
}

impl RateLimiter {
    pub fn new(limit: i32, window: Duration) -> Self {
        Self {
            limit,
            window,
            counts: Mutex::new(HashMap::new()),
        }
    }

    /// Records an attempt for `key` and returns whether it is allowed.
    pub fn check(&self, key: &str) -> bool {
        if self.limit < 0 {
            return true;
        }
        if self.limit == 0 {
            return false;
        }

        let now = Instant::now();
        let mut counts = self.counts.lock().expect("rate limiter lock poisoned");

        match counts.get(key).copied() {
            Some((_, started)) if now.duration_since(started) > self.window => {
                counts.insert(key.to_string(), (1, now));
                true
            }
            Some((count, started)) => {
                if count >= self.limit as u32 {
                    false
                } else {
                    counts.insert(key.to_string(), (count + 1, started));
                    true
                }
            }
            None => {
                counts.insert(key.to_string(), (1, now));
                true
            }
        }
    }
}
