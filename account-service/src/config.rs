//! Configuration for the account service

use std::env;
use std::time::Duration;

/// Configuration for the account service
#[derive(Debug, Clone)]
pub struct AccountServiceConfig {
    /// Longest wait for a single account lock before the transfer fails
    pub lock_timeout: Duration,
    /// Longest wait for one notification call while the locks are held
    pub notification_timeout: Duration,
    /// Enable transaction logging
    pub transaction_logging: bool,
}

impl Default for AccountServiceConfig {
    fn default() -> Self {
        Self {
            lock_timeout: env_millis("LOCK_TIMEOUT_MS").unwrap_or(Duration::from_millis(5000)),
            notification_timeout: env_millis("NOTIFICATION_TIMEOUT_MS")
                .unwrap_or(Duration::from_millis(1000)),
            transaction_logging: env::var("TRANSACTION_LOGGING")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        }
    }
}

impl AccountServiceConfig {
    /// Create a new configuration using environment variables
    pub fn from_env() -> Self {
        Self::default()
    }

    /// Create a new configuration with custom values
    pub fn new(lock_timeout: Duration, notification_timeout: Duration, transaction_logging: bool) -> Self {
        Self {
            lock_timeout,
            notification_timeout,
            transaction_logging,
        }
    }
}

fn env_millis(key: &str) -> Option<Duration> {
    env::var(key)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
}
