use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "http://localhost:9876";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid base_url {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("{field} must be greater than zero")]
    ZeroDuration { field: &'static str },

    #[error("max_context_files must be at least 1 (set include_context to false to send none)")]
    ZeroContextFiles,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DictateConfig {
    pub base_url: String,
    pub poll_interval_ms: u64,
    pub transcription_timeout_ms: u64,

    // Independent of `transcription_timeout_ms`; starts once a raw result is seen.
    pub post_process_timeout_ms: u64,

    pub request_timeout_ms: u64,
    pub connect_timeout_ms: u64,
    pub include_context: bool,
    pub max_context_files: usize,
    pub notice_title: String,
}

impl Default for DictateConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            poll_interval_ms: 500,
            transcription_timeout_ms: 60_000,
            post_process_timeout_ms: 15_000,
            request_timeout_ms: 10_000,
            connect_timeout_ms: 3_000,
            include_context: true,
            max_context_files: 50,
            notice_title: "Dictation".into(),
        }
    }
}

impl DictateConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let parsed = url::Url::parse(&self.base_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: self.base_url.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBaseUrl {
                url: self.base_url.clone(),
                reason: format!("unsupported scheme {}", parsed.scheme()),
            });
        }
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::ZeroDuration {
                field: "poll_interval_ms",
            });
        }
        if self.transcription_timeout_ms == 0 {
            return Err(ConfigError::ZeroDuration {
                field: "transcription_timeout_ms",
            });
        }
        if self.include_context && self.max_context_files == 0 {
            return Err(ConfigError::ZeroContextFiles);
        }
        Ok(())
    }

    pub fn poll(&self) -> PollConfig {
        PollConfig {
            poll_interval: Duration::from_millis(self.poll_interval_ms),
            transcription_timeout: Duration::from_millis(self.transcription_timeout_ms),
            post_process_timeout: Duration::from_millis(self.post_process_timeout_ms),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }
}

/// Timing knobs of the history poller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    pub poll_interval: Duration,
    pub transcription_timeout: Duration,
    pub post_process_timeout: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        DictateConfig::default().poll()
    }
}
