use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    //-------------------------------------------------------------------------
    // IO / Parsing
    //-------------------------------------------------------------------------
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration file: {path}\n\n{source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    //-------------------------------------------------------------------------
    // Endpoint
    //-------------------------------------------------------------------------
    #[error("invalid endpoint base url '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("endpoint.request_timeout_secs must be greater than zero")]
    InvalidRequestTimeout,

    //-------------------------------------------------------------------------
    // Stream / Histogram
    //-------------------------------------------------------------------------
    #[error("stream.max_entries must be greater than zero")]
    InvalidMaxEntries,

    #[error("stream.flush_interval_ms must be greater than zero")]
    InvalidFlushInterval,

    #[error("histogram.target_buckets must be greater than zero")]
    InvalidTargetBuckets,

    #[error("histogram.min_interval_secs must be greater than zero")]
    InvalidMinInterval,
}

impl ConfigError {
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadFile {
            path: path.into(),
            source,
        }
    }

    pub fn parse(path: impl Into<PathBuf>, source: toml::de::Error) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }
}
