//! Client configuration with environment overrides.

use std::time::Duration;

use crate::RetryPolicy;

/// Quote endpoint; the provider symbol is appended verbatim.
pub const DEFAULT_ENDPOINT: &str = "https://qt.gtimg.cn/q=";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub const ENDPOINT_ENV: &str = "FERROQUOTE_ENDPOINT";
pub const TIMEOUT_MS_ENV: &str = "FERROQUOTE_TIMEOUT_MS";

/// Settings for [`crate::QuoteFetcher`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteClientConfig {
    pub endpoint: String,
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

impl Default for QuoteClientConfig {
    fn default() -> Self {
        Self {
            endpoint: String::from(DEFAULT_ENDPOINT),
            timeout: DEFAULT_TIMEOUT,
            retry: RetryPolicy::default(),
        }
    }
}

impl QuoteClientConfig {
    /// Defaults overlaid with `FERROQUOTE_ENDPOINT` and
    /// `FERROQUOTE_TIMEOUT_MS`. Unset, empty or unparseable values are ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(endpoint) = lookup(ENDPOINT_ENV).filter(|value| !value.trim().is_empty()) {
            config.endpoint = endpoint.trim().to_owned();
        }

        match lookup(TIMEOUT_MS_ENV).map(|value| value.trim().parse::<u64>()) {
            Some(Ok(ms)) if ms > 0 => config.timeout = Duration::from_millis(ms),
            Some(_) => tracing::warn!("ignoring invalid {TIMEOUT_MS_ENV}"),
            None => {}
        }

        config
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}
