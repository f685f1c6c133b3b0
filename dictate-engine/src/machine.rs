use crate::context::gather_context;
use crate::poller::HistoryPoller;
use crate::session::{PolledEntry, RecordingState, Refinement, ToggleReport};
use crate::traits::{ContextSource, DictationService, Notifier, PromptSink};
use dictate_core::config::{DictateConfig, PollConfig};
use dictate_core::error::DictateError;
use dictate_core::types::{Baseline, CommandSpec, Severity, TriggerOutcome};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct MachineConfig {
    pub poll: PollConfig,
    pub include_context: bool,
    pub max_context_files: usize,
    pub notice_title: String,

    // Shown in "unreachable" notices so the user knows where we looked.
    pub service_label: String,
}

impl MachineConfig {
    pub fn from_config(cfg: &DictateConfig) -> Self {
        Self {
            poll: cfg.poll(),
            include_context: cfg.include_context,
            max_context_files: cfg.max_context_files,
            notice_title: cfg.notice_title.clone(),
            service_label: cfg.base_url.clone(),
        }
    }
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self::from_config(&DictateConfig::default())
    }
}

/// Start/stop toggle driven by the host's `dictate` command.
///
/// The machine owns the recording state; `&mut self` on the trigger path keeps one trigger
/// fully handled before the next can start.
pub struct DictationMachine {
    cfg: MachineConfig,
    command: CommandSpec,
    service: Arc<dyn DictationService>,
    poller: HistoryPoller,
    notifier: Arc<dyn Notifier>,
    prompt: Arc<dyn PromptSink>,
    context: Option<Arc<dyn ContextSource>>,
    state: RecordingState,
}

impl DictationMachine {
    pub fn new(
        cfg: MachineConfig,
        service: Arc<dyn DictationService>,
        notifier: Arc<dyn Notifier>,
        prompt: Arc<dyn PromptSink>,
    ) -> Self {
        let poller = HistoryPoller::new(service.clone(), cfg.poll);
        Self {
            cfg,
            command: CommandSpec::dictate(),
            service,
            poller,
            notifier,
            prompt,
            context: None,
            state: RecordingState::Idle,
        }
    }

    pub fn with_context_source(mut self, source: Arc<dyn ContextSource>) -> Self {
        self.context = Some(source);
        self
    }

    pub fn command(&self) -> &CommandSpec {
        &self.command
    }

    pub fn state(&self) -> RecordingState {
        self.state
    }

    pub fn is_recording(&self) -> bool {
        self.state.is_recording()
    }

    /// Host intake: handles `dictate`, lets every other command through untouched.
    pub async fn on_command(&mut self, invoked: &str) -> TriggerOutcome {
        if !self.command.matches(invoked) {
            return TriggerOutcome::PassThrough;
        }
        self.on_trigger().await;
        TriggerOutcome::Handled
    }

    pub async fn on_trigger(&mut self) -> ToggleReport {
        match self.state {
            RecordingState::Idle => self.on_trigger_while_idle().await,
            RecordingState::Recording { baseline } => {
                self.on_trigger_while_recording(baseline).await
            }
        }
    }

    async fn on_trigger_while_idle(&mut self) -> ToggleReport {
        if let Err(e) = self.service.check_health().await {
            log::warn!("health probe failed: {e}");
            self.notify(
                Severity::Error,
                &format!(
                    "Speech-to-text service is not reachable at {}. Is it running?",
                    self.cfg.service_label
                ),
            )
            .await;
            return ToggleReport::StartFailed { error: e.into() };
        }

        let baseline = match self.service.latest_entry().await {
            Ok(latest) => Baseline::from_latest(latest.as_ref()),
            Err(e) => {
                log::error!("history snapshot failed: {e}");
                self.notify(
                    Severity::Error,
                    &format!("Could not read transcription history: {e}"),
                )
                .await;
                return ToggleReport::StartFailed { error: e.into() };
            }
        };

        if let Err(e) = self.service.toggle(None).await {
            log::error!("start recording failed: {e}");
            self.notify(Severity::Error, &format!("Failed to start recording: {e}"))
                .await;
            return ToggleReport::StartFailed { error: e.into() };
        }

        self.state = RecordingState::Recording { baseline };
        log::info!("recording started (baseline {})", baseline.id());
        self.notify(
            Severity::Info,
            &format!(
                "Recording started. Run /{} again to stop.",
                self.command.name
            ),
        )
        .await;
        ToggleReport::Started { baseline }
    }

    async fn on_trigger_while_recording(&mut self, baseline: Baseline) -> ToggleReport {
        let context = self.build_context().await;

        if let Err(e) = self.service.toggle(context.as_deref()).await {
            // Stay in Recording so the next trigger retries the stop instead of starting a
            // second, overlapping session.
            log::error!("stop recording failed: {e}");
            self.notify(
                Severity::Error,
                &format!(
                    "Failed to stop recording: {e}. Run /{} again to retry.",
                    self.command.name
                ),
            )
            .await;
            return ToggleReport::StopFailed { error: e.into() };
        }

        self.state = RecordingState::Idle;
        log::info!("recording stopped, waiting for transcription");
        self.notify(Severity::Info, "Recording stopped. Transcribing…")
            .await;

        match self
            .poller
            .await_new_entry(baseline, self.cfg.poll.transcription_timeout)
            .await
        {
            Ok(result) => self.deliver(result).await,
            Err(error) => {
                log::error!("transcription failed: {error}");
                let message = match &error {
                    DictateError::PollTimeout { waited } => format!(
                        "No transcription received within {}s.",
                        waited.as_secs()
                    ),
                    DictateError::Service(e) => format!("Transcription failed: {e}"),
                };
                self.notify(Severity::Error, &message).await;
                ToggleReport::TranscriptionFailed { error }
            }
        }
    }

    async fn deliver(&self, result: PolledEntry) -> ToggleReport {
        if let Err(e) = self.prompt.append_to_prompt(result.text()).await {
            log::error!("prompt insertion failed: {e:#}");
            // Include the text so the transcription is not lost.
            self.notify(
                Severity::Error,
                &format!(
                    "Could not insert the transcription into the prompt: {e}\n\n{}",
                    result.text()
                ),
            )
            .await;
            return ToggleReport::InsertFailed {
                result,
                error: e.to_string(),
            };
        }

        match result.refinement {
            Refinement::Refined => {
                self.notify(Severity::Success, "Transcription added to the prompt.")
                    .await;
            }
            Refinement::Skipped => {
                self.notify(
                    Severity::Warning,
                    "Post-processing did not finish in time; added the raw transcription.",
                )
                .await;
            }
        }
        ToggleReport::Transcribed { result }
    }

    async fn build_context(&self) -> Option<String> {
        if !self.cfg.include_context {
            return None;
        }
        let source = self.context.as_ref()?;
        gather_context(source.as_ref())
            .await
            .render(self.cfg.max_context_files)
    }

    async fn notify(&self, severity: Severity, message: &str) {
        // Best-effort: a broken notification channel must not affect the toggle.
        if let Err(e) = self
            .notifier
            .show_notice(message, severity, &self.cfg.notice_title)
            .await
        {
            log::warn!("notification failed: {e:#}");
        }
    }
}
