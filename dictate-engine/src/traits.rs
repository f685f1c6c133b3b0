use async_trait::async_trait;
use dictate_core::error::ServiceError;
use dictate_core::types::{ResultEntry, Severity};

/// The speech-to-text service as seen by the state machine and the poller.
#[async_trait]
pub trait DictationService: Send + Sync {
    async fn check_health(&self) -> Result<(), ServiceError>;

    /// Newest history entry, `None` when the service has no history yet.
    async fn latest_entry(&self) -> Result<Option<ResultEntry>, ServiceError>;

    /// Starts recording when idle, stops (and transcribes) when active.
    async fn toggle(&self, context: Option<&str>) -> Result<(), ServiceError>;
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn show_notice(&self, message: &str, severity: Severity, title: &str)
    -> anyhow::Result<()>;
}

#[async_trait]
pub trait PromptSink: Send + Sync {
    async fn append_to_prompt(&self, text: &str) -> anyhow::Result<()>;
}

/// Project state lookups. Each one may fail independently.
#[async_trait]
pub trait ContextSource: Send + Sync {
    async fn branch(&self) -> anyhow::Result<Option<String>>;
    async fn modified_files(&self) -> anyhow::Result<Vec<String>>;
}
