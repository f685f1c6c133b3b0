use dictate_core::error::DictateError;
use dictate_core::types::{Baseline, ResultEntry};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Recording state of one dictation handler. The baseline only exists while recording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RecordingState {
    #[default]
    Idle,
    Recording { baseline: Baseline },
}

impl RecordingState {
    pub fn is_recording(&self) -> bool {
        matches!(self, RecordingState::Recording { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            RecordingState::Idle => "idle",
            RecordingState::Recording { .. } => "recording",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Refinement {
    Refined,
    // Post-processing did not finish inside its window; raw text only.
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolledEntry {
    pub entry: ResultEntry,
    pub refinement: Refinement,
}

impl PolledEntry {
    pub fn refined(entry: ResultEntry) -> Self {
        Self {
            entry,
            refinement: Refinement::Refined,
        }
    }

    pub fn raw(entry: ResultEntry) -> Self {
        Self {
            entry,
            refinement: Refinement::Skipped,
        }
    }

    pub fn text(&self) -> &str {
        self.entry.best_text()
    }
}

pub fn ms(d: Duration) -> u64 {
    d.as_millis().try_into().unwrap_or(u64::MAX)
}

/// What a single trigger did. Every variant has already been surfaced to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleReport {
    Started { baseline: Baseline },
    StartFailed { error: DictateError },
    StopFailed { error: DictateError },
    Transcribed { result: PolledEntry },
    TranscriptionFailed { error: DictateError },
    InsertFailed { result: PolledEntry, error: String },
}

impl ToggleReport {
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            ToggleReport::Started { .. } | ToggleReport::Transcribed { .. }
        )
    }
}
