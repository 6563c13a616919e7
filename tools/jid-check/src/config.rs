//! Tool configuration (env-driven).

use anyhow::{Context, Result};
use sms2xmpp_jid::{JidCacheConfig, DEFAULT_CAPACITY};

/// Upper bound on the cache capacity accepted from the environment.
const MAX_CACHE_CAPACITY: usize = 1 << 20;

/// jid-check configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of parsed JIDs kept for reuse.
    pub cache_capacity: usize,

    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let cache_capacity: usize = lookup("SMS2XMPP_JID_CACHE_CAPACITY")
            .map(|v| v.trim().parse())
            .transpose()
            .context("SMS2XMPP_JID_CACHE_CAPACITY must be a positive integer.")?
            .unwrap_or(DEFAULT_CAPACITY)
            .clamp(1, MAX_CACHE_CAPACITY);

        let log_level = lookup("SMS2XMPP_LOG_LEVEL").unwrap_or_else(|| "warn".to_string());

        Ok(Self {
            cache_capacity,
            log_level,
        })
    }

    /// Cache settings for [`sms2xmpp_jid::JidCache`].
    pub fn cache_config(&self) -> JidCacheConfig {
        JidCacheConfig {
            capacity: self.cache_capacity,
        }
    }
}
