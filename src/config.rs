use log::warn;
use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::simulation::{
    DEFAULT_BLOCK_DELAY_MS, DEFAULT_COIN_AGE_THRESHOLD, DEFAULT_DETAIL_LINGER_MS,
    DEFAULT_TICK_MS, PendingPolicy,
};

/// Timing knobs for the scheduler and the detail panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub tick: Duration,
    pub block_delay: Duration,
    pub detail_linger: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(DEFAULT_TICK_MS),
            block_delay: Duration::from_millis(DEFAULT_BLOCK_DELAY_MS),
            detail_linger: Duration::from_millis(DEFAULT_DETAIL_LINGER_MS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub timing: Timing,
    pub threshold: u64,
    pub pending_policy: PendingPolicy,
}

impl Settings {
    /// Read settings from the process environment (after `.env` is loaded).
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = parse_or(&lookup, "PORT", 8080);

        let timing = Timing {
            tick: millis_or(&lookup, "SIM_TICK_MS", DEFAULT_TICK_MS),
            block_delay: millis_or(&lookup, "SIM_BLOCK_DELAY_MS", DEFAULT_BLOCK_DELAY_MS),
            detail_linger: millis_or(&lookup, "SIM_DETAIL_LINGER_MS", DEFAULT_DETAIL_LINGER_MS),
        };

        let mut threshold = parse_or(&lookup, "SIM_COIN_AGE_THRESHOLD", DEFAULT_COIN_AGE_THRESHOLD);
        if threshold == 0 {
            warn!("SIM_COIN_AGE_THRESHOLD must be > 0, using {DEFAULT_COIN_AGE_THRESHOLD}");
            threshold = DEFAULT_COIN_AGE_THRESHOLD;
        }

        let pending_policy = if parse_or(&lookup, "SIM_CANCEL_PENDING_ON_STOP", false) {
            PendingPolicy::Cancel
        } else {
            PendingPolicy::Complete
        };

        Self {
            host,
            port,
            timing,
            threshold,
            pending_policy,
        }
    }
}

fn parse_or<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("ignoring invalid {key}={raw:?}");
            default
        }),
    }
}

// Zero periods would spin the ticker.
fn millis_or(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: u64) -> Duration {
    let ms = parse_or(lookup, key, default);
    if ms == 0 {
        warn!("{key} must be > 0, using {default}");
        return Duration::from_millis(default);
    }
    Duration::from_millis(ms)
}
