use anyhow::anyhow;
use dictate_core::types::Severity;
use dictate_engine::traits::{Notifier, PromptSink};
use std::io::Write;
use std::sync::Mutex;

/// Renders notices on stderr as `[severity] title: message`.
#[derive(Debug, Default)]
pub struct TerminalNotifier;

pub fn format_notice(message: &str, severity: Severity, title: &str) -> String {
    format!("[{severity}] {title}: {message}")
}

#[async_trait::async_trait]
impl Notifier for TerminalNotifier {
    async fn show_notice(
        &self,
        message: &str,
        severity: Severity,
        title: &str,
    ) -> anyhow::Result<()> {
        let mut err = std::io::stderr().lock();
        writeln!(err, "{}", format_notice(message, severity, title))?;
        Ok(())
    }
}

/// The host's prompt: dictated text accumulates here until the user takes it.
#[derive(Debug, Default)]
pub struct PromptBuffer {
    text: Mutex<String>,
}

impl PromptBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        self.text.lock().map(|t| t.clone()).unwrap_or_default()
    }

    pub fn take(&self) -> String {
        self.text
            .lock()
            .map(|mut t| std::mem::take(&mut *t))
            .unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl PromptSink for PromptBuffer {
    async fn append_to_prompt(&self, text: &str) -> anyhow::Result<()> {
        let mut buf = self
            .text
            .lock()
            .map_err(|_| anyhow!("prompt buffer poisoned"))?;
        if !buf.is_empty() && !buf.ends_with(char::is_whitespace) {
            buf.push(' ');
        }
        buf.push_str(text);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notice_format() {
        assert_eq!(
            format_notice("Recording started.", Severity::Info, "Dictation"),
            "[info] Dictation: Recording started."
        );
    }

    #[tokio::test]
    async fn prompt_buffer_appends_with_separator() {
        let prompt = PromptBuffer::new();
        prompt.append_to_prompt("Fix the parser.").await.unwrap();
        prompt.append_to_prompt("Then add tests.").await.unwrap();
        assert_eq!(prompt.contents(), "Fix the parser. Then add tests.");

        assert_eq!(prompt.take(), "Fix the parser. Then add tests.");
        assert_eq!(prompt.contents(), "");
    }
}
