//! Request rate limiter
//!
//! Process-wide, per-client-IP fixed-window request counting, applied ahead
//! of every route. When a client exceeds the per-window budget, further
//! requests are rejected until the window rolls over.

use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Configuration for the rate limiter
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum requests per client within one window
    pub max_requests: u32,

    /// Window length
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 100,
            window: Duration::from_secs(900), // 15 minutes
        }
    }
}

/// Entry tracking requests for one client
#[derive(Debug, Clone)]
struct WindowEntry {
    /// Requests seen in the current window
    count: u32,

    /// When the current window opened
    window_start: Instant,
}

/// Request rate limiter
///
/// Thread-safe; tracks request counts per client IP.
pub struct RateLimiter {
    config: RateLimitConfig,
    entries: RwLock<HashMap<IpAddr, WindowEntry>>,
}

impl RateLimiter {
    /// Create a new rate limiter with the given configuration
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Create a new rate limiter with default configuration
    pub fn with_defaults() -> Self {
        Self::new(RateLimitConfig::default())
    }

    /// Record one request for a client
    ///
    /// Returns `true` if the request is within the budget, `false` if the
    /// client has exhausted the current window.
    pub fn check(&self, ip: IpAddr) -> bool {
        let mut entries = self.entries.write().unwrap();
        let now = Instant::now();

        let entry = entries.entry(ip).or_insert_with(|| WindowEntry {
            count: 0,
            window_start: now,
        });

        // Roll the window over when it has elapsed
        if now.duration_since(entry.window_start) >= self.config.window {
            entry.count = 0;
            entry.window_start = now;
        }

        if entry.count >= self.config.max_requests {
            return false;
        }

        entry.count += 1;
        true
    }

    /// Remaining budget for a client in the current window
    pub fn remaining(&self, ip: IpAddr) -> u32 {
        let entries = self.entries.read().unwrap();
        let now = Instant::now();

        match entries.get(&ip) {
            Some(entry) if now.duration_since(entry.window_start) < self.config.window => {
                self.config.max_requests.saturating_sub(entry.count)
            }
            _ => self.config.max_requests,
        }
    }

    /// Clean up expired entries
    ///
    /// Should be called periodically to free memory
    pub fn cleanup(&self) {
        let mut entries = self.entries.write().unwrap();
        let now = Instant::now();

        entries.retain(|_, entry| now.duration_since(entry.window_start) < self.config.window);
    }

    /// Get current number of tracked IPs
    pub fn tracked_ips_count(&self) -> usize {
        self.entries.read().unwrap().len()
    }
}
