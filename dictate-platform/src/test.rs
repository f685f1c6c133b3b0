use std::sync::Arc;
use dictate_core::context::ProjectContext;
use dictate_core::types::Severity;
use dictate_engine::traits::{ContextSource, Notifier, PromptSink};

#[derive(Debug, Clone, Default)]
pub struct TestContextSource {
    context: ProjectContext,
}

impl TestContextSource {
    pub fn new(context: ProjectContext) -> Self {
        Self { context }
    }

    pub fn boxed(self) -> Arc<dyn ContextSource> {
        Arc::new(self)
    }
}

#[async_trait::async_trait]
impl ContextSource for TestContextSource {
    async fn branch(&self) -> anyhow::Result<Option<String>> {
        Ok(self.context.branch.clone())
    }

    async fn modified_files(&self) -> anyhow::Result<Vec<String>> {
        Ok(self.context.modified_files.clone())
    }
}

#[derive(Debug, Default)]
pub struct MemoryNotifier {
    pub notices: std::sync::Mutex<Vec<(String, Severity)>>,
}

#[async_trait::async_trait]
impl Notifier for MemoryNotifier {
    async fn show_notice(
        &self,
        message: &str,
        severity: Severity,
        _title: &str,
    ) -> anyhow::Result<()> {
        self.notices
            .lock()
            .unwrap()
            .push((message.to_string(), severity));
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemoryPrompt {
    pub appended: std::sync::Mutex<Vec<String>>,
}

#[async_trait::async_trait]
impl PromptSink for MemoryPrompt {
    async fn append_to_prompt(&self, text: &str) -> anyhow::Result<()> {
        self.appended.lock().unwrap().push(text.to_string());
        Ok(())
    }
}
