use std::time::Duration;
use thiserror::Error;

/// Every failure talking to the speech-to-text service collapses into one of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("speech-to-text service unreachable: {detail}")]
    Unreachable { detail: String },

    #[error("speech-to-text request failed: {detail}")]
    RequestFailed { detail: String },
}

impl ServiceError {
    pub fn unreachable(detail: impl Into<String>) -> Self {
        Self::Unreachable {
            detail: detail.into(),
        }
    }

    pub fn request_failed(detail: impl Into<String>) -> Self {
        Self::RequestFailed {
            detail: detail.into(),
        }
    }

    /// Any service failure observed by a health probe means the service is unreachable.
    pub fn into_unreachable(self) -> Self {
        match self {
            Self::Unreachable { .. } => self,
            Self::RequestFailed { detail } => Self::Unreachable { detail },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DictateError {
    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("no new transcription arrived within {}s", .waited.as_secs())]
    PollTimeout { waited: Duration },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_failures_become_unreachable() {
        let e = ServiceError::request_failed("HTTP 500").into_unreachable();
        assert_eq!(e, ServiceError::unreachable("HTTP 500"));
    }

    #[test]
    fn poll_timeout_message_names_the_wait() {
        let e = DictateError::PollTimeout {
            waited: Duration::from_secs(60),
        };
        assert_eq!(e.to_string(), "no new transcription arrived within 60s");
    }
}
