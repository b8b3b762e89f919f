//! Client configuration structures.
//!
//! All configuration is explicit and passed into driver/client constructors.
//! There is no process-wide mutable state: two drivers with different targets
//! can coexist in one process.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// The bot a conversation is addressed to: bot, alias, and locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotTarget {
    pub bot_id: String,
    pub alias_id: String,
    pub locale_id: String,
}

impl BotTarget {
    pub fn new(
        bot_id: impl Into<String>,
        alias_id: impl Into<String>,
        locale_id: impl Into<String>,
    ) -> Self {
        Self {
            bot_id: bot_id.into(),
            alias_id: alias_id.into(),
            locale_id: locale_id.into(),
        }
    }
}

/// Polling behavior for asynchronous control-plane operations.
///
/// `backoff_multiplier` of 1.0 keeps a fixed interval between polls; a value
/// above 1.0 stretches the delay after each attempt, capped at
/// `max_interval_ms`. The wall-clock `timeout_ms` bounds the whole wait.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollConfig {
    #[serde(default = "default_poll_interval_ms")]
    pub interval_ms: u64,
    #[serde(default = "default_poll_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,
    #[serde(default = "default_max_interval_ms")]
    pub max_interval_ms: u64,
}

impl PollConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn max_interval(&self) -> Duration {
        Duration::from_millis(self.max_interval_ms)
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_poll_interval_ms(),
            timeout_ms: default_poll_timeout_ms(),
            backoff_multiplier: default_backoff_multiplier(),
            max_interval_ms: default_max_interval_ms(),
        }
    }
}

fn default_poll_interval_ms() -> u64 {
    15_000
}

fn default_poll_timeout_ms() -> u64 {
    300_000
}

fn default_backoff_multiplier() -> f64 {
    1.0
}

fn default_max_interval_ms() -> u64 {
    60_000
}
