use serde::{Deserialize, Serialize};

/// One completed transcription as listed by the service history endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultEntry {
    pub id: u64,
    #[serde(default)]
    pub raw_text: String,
    #[serde(default)]
    pub refined_text: Option<String>,
}

impl ResultEntry {
    pub fn new(id: u64, raw_text: impl Into<String>) -> Self {
        Self {
            id,
            raw_text: raw_text.into(),
            refined_text: None,
        }
    }

    pub fn with_refined_text(mut self, refined_text: impl Into<String>) -> Self {
        self.refined_text = Some(refined_text.into());
        self
    }

    pub fn has_raw_text(&self) -> bool {
        !self.raw_text.trim().is_empty()
    }

    /// Refined text, ignoring blank values the service may publish before post-processing ends.
    pub fn refined(&self) -> Option<&str> {
        self.refined_text
            .as_deref()
            .filter(|t| !t.trim().is_empty())
    }

    pub fn is_refined(&self) -> bool {
        self.refined().is_some()
    }

    /// Text to hand to the prompt: refined when present, raw otherwise.
    pub fn best_text(&self) -> &str {
        self.refined().unwrap_or(&self.raw_text)
    }
}

/// Id of the newest history entry observed right before a recording session started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Baseline(pub u64);

impl Baseline {
    /// Sentinel used when the service had no history at start time.
    pub const EMPTY: Baseline = Baseline(0);

    pub fn from_latest(latest: Option<&ResultEntry>) -> Self {
        latest.map(|e| Baseline(e.id)).unwrap_or(Self::EMPTY)
    }

    pub fn id(self) -> u64 {
        self.0
    }

    /// Whether `entry` is the awaited result of the session that started at this baseline.
    pub fn is_new_candidate(self, entry: &ResultEntry) -> bool {
        entry.id != self.0 && entry.has_raw_text()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of offering a host command to the dictation handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// The command was ours; the host must not process it any further.
    Handled,
    PassThrough,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    pub name: String,
    pub template: String,
    pub description: String,
}

pub const DICTATE_COMMAND: &str = "dictate";

impl CommandSpec {
    pub fn dictate() -> Self {
        Self {
            name: DICTATE_COMMAND.into(),
            template: "Toggle voice dictation (start recording, or stop and insert the transcription)".into(),
            description: "Start/stop voice dictation via the local speech-to-text service".into(),
        }
    }

    /// Matches an invoked command name, tolerating surrounding whitespace and a leading `/`.
    pub fn matches(&self, invoked: &str) -> bool {
        let invoked = invoked.trim();
        let invoked = invoked.strip_prefix('/').unwrap_or(invoked);
        invoked == self.name
    }
}
