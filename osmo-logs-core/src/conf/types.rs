use crate::compute::HistogramOptions;
use crate::conf::error::ConfigError;
use crate::stream::{DEFAULT_FLUSH_INTERVAL, DEFAULT_MAX_ENTRIES, StreamConfig};
use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

pub const BASE_URL_ENV: &str = "OSMO_LOGS_BASE_URL";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AdapterConfig {
    #[serde(default)]
    pub endpoint: EndpointConfig,

    #[serde(default)]
    pub stream: StreamSection,

    #[serde(default)]
    pub histogram: HistogramSection,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EndpointConfig {
    /// e.g. "https://osmo.example.com"
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Applies to one-shot fetches only; tails stay open indefinitely.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StreamSection {
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,

    #[serde(default = "default_flush_interval_ms")]
    pub flush_interval_ms: u64,
}

impl Default for StreamSection {
    fn default() -> Self {
        Self {
            max_entries: default_max_entries(),
            flush_interval_ms: default_flush_interval_ms(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HistogramSection {
    #[serde(default = "default_target_buckets")]
    pub target_buckets: u32,

    #[serde(default = "default_min_interval_secs")]
    pub min_interval_secs: u32,
}

impl Default for HistogramSection {
    fn default() -> Self {
        Self {
            target_buckets: default_target_buckets(),
            min_interval_secs: default_min_interval_secs(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_max_entries() -> usize {
    DEFAULT_MAX_ENTRIES
}

fn default_flush_interval_ms() -> u64 {
    DEFAULT_FLUSH_INTERVAL.as_millis() as u64
}

fn default_target_buckets() -> u32 {
    crate::compute::DEFAULT_TARGET_BUCKETS
}

fn default_min_interval_secs() -> u32 {
    crate::compute::DEFAULT_MIN_INTERVAL.num_seconds() as u32
}

impl AdapterConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.base_url()?;

        if self.endpoint.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidRequestTimeout);
        }
        if self.stream.max_entries == 0 {
            return Err(ConfigError::InvalidMaxEntries);
        }
        if self.stream.flush_interval_ms == 0 {
            return Err(ConfigError::InvalidFlushInterval);
        }
        if self.histogram.target_buckets == 0 {
            return Err(ConfigError::InvalidTargetBuckets);
        }
        if self.histogram.min_interval_secs == 0 {
            return Err(ConfigError::InvalidMinInterval);
        }
        Ok(())
    }

    /// Apply `OSMO_LOGS_BASE_URL` when it is set and non-empty.
    pub fn apply_env(&mut self) {
        self.override_base_url(std::env::var(BASE_URL_ENV).ok());
    }

    pub(crate) fn override_base_url(&mut self, url: Option<String>) {
        let Some(url) = url.filter(|u| !u.trim().is_empty()) else {
            return;
        };
        tracing::debug!(base_url = %url, "endpoint base url overridden from environment");
        self.endpoint.base_url = url;
    }

    pub fn base_url(&self) -> Result<Url, ConfigError> {
        let raw = &self.endpoint.base_url;
        let url = Url::parse(raw).map_err(|e| ConfigError::InvalidBaseUrl {
            url: raw.clone(),
            reason: e.to_string(),
        })?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ConfigError::InvalidBaseUrl {
                url: raw.clone(),
                reason: format!("unsupported scheme '{other}', expected http or https"),
            }),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.endpoint.request_timeout_secs)
    }

    pub fn stream_config(&self) -> StreamConfig {
        StreamConfig {
            max_entries: self.stream.max_entries,
            flush_interval: Duration::from_millis(self.stream.flush_interval_ms),
        }
    }

    pub fn histogram_options(&self) -> HistogramOptions {
        HistogramOptions {
            target_buckets: self.histogram.target_buckets,
            min_interval: TimeDelta::seconds(i64::from(self.histogram.min_interval_secs)),
            range: None,
        }
    }
}
