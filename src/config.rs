//! Resolver configuration.
//!
//! Keys come from the environment (`NUMVERIFY_API_KEY`, `ABSTRACT_API_KEY`)
//! and may be overridden on the command line. A blank key counts as absent,
//! which leaves that provider out of the chain.

use crate::location::phone::ParserOptions;
use std::fmt;
use std::time::Duration;
use tracing::warn;

pub const NUMVERIFY_URL: &str = "http://apilayer.net/api/validate";
pub const ABSTRACT_URL: &str = "https://phonevalidation.abstractapi.com/v1/";

/// Per-request bound on every remote provider call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

pub const ENV_NUMVERIFY_KEY: &str = "NUMVERIFY_API_KEY";
pub const ENV_ABSTRACT_KEY: &str = "ABSTRACT_API_KEY";
pub const ENV_TIMEOUT_SECS: &str = "AREACODE_TIMEOUT_SECS";

#[derive(Clone)]
pub struct ResolverConfig {
    pub numverify_api_key: Option<String>,
    pub abstract_api_key: Option<String>,
    pub numverify_url: String,
    pub abstract_url: String,
    pub timeout: Duration,
    pub parser: ParserOptions,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            numverify_api_key: None,
            abstract_api_key: None,
            numverify_url: NUMVERIFY_URL.to_string(),
            abstract_url: ABSTRACT_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            parser: ParserOptions::default(),
        }
    }
}

impl ResolverConfig {
    /// Read the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source (for testing).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let timeout = match lookup(ENV_TIMEOUT_SECS) {
            Some(raw) => parse_timeout(&raw).unwrap_or_else(|| {
                warn!(value = %raw, "ignoring invalid {}", ENV_TIMEOUT_SECS);
                DEFAULT_TIMEOUT
            }),
            None => DEFAULT_TIMEOUT,
        };

        Self {
            numverify_api_key: non_blank(lookup(ENV_NUMVERIFY_KEY)),
            abstract_api_key: non_blank(lookup(ENV_ABSTRACT_KEY)),
            timeout,
            ..Self::default()
        }
    }

    /// Replace the NumVerify key when `key` is given.
    pub fn with_numverify_key(mut self, key: Option<String>) -> Self {
        if key.is_some() {
            self.numverify_api_key = non_blank(key);
        }
        self
    }

    /// Replace the Abstract API key when `key` is given.
    pub fn with_abstract_key(mut self, key: Option<String>) -> Self {
        if key.is_some() {
            self.abstract_api_key = non_blank(key);
        }
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_parser(mut self, parser: ParserOptions) -> Self {
        self.parser = parser;
        self
    }

    pub fn has_providers(&self) -> bool {
        self.numverify_api_key.is_some() || self.abstract_api_key.is_some()
    }
}

// Keys stay out of logs.
impl fmt::Debug for ResolverConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |k: &Option<String>| k.as_ref().map(|_| "<redacted>");
        f.debug_struct("ResolverConfig")
            .field("numverify_api_key", &redact(&self.numverify_api_key))
            .field("abstract_api_key", &redact(&self.abstract_api_key))
            .field("numverify_url", &self.numverify_url)
            .field("abstract_url", &self.abstract_url)
            .field("timeout", &self.timeout)
            .field("parser", &self.parser)
            .finish()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn parse_timeout(raw: &str) -> Option<Duration> {
    timeout_from_secs(raw.trim().parse().ok()?)
}

/// A positive, representable number of seconds as a timeout.
pub fn timeout_from_secs(secs: f64) -> Option<Duration> {
    if secs > 0.0 {
        Duration::try_from_secs_f64(secs).ok()
    } else {
        None
    }
}
