use crate::session::{PolledEntry, ms};
use crate::traits::DictationService;
use dictate_core::config::PollConfig;
use dictate_core::error::DictateError;
use dictate_core::types::{Baseline, ResultEntry};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{Instant, sleep};

/// Waits for the transcription produced by a stop request to show up in the service history.
///
/// Detection and refinement use two independent deadlines: the overall timeout bounds how long
/// we wait for *any* new entry, and `post_process_timeout` starts fresh once a raw entry is
/// found. A refinement that never arrives degrades to the raw text instead of failing.
#[derive(Clone)]
pub struct HistoryPoller {
    service: Arc<dyn DictationService>,
    cfg: PollConfig,
}

impl HistoryPoller {
    pub fn new(service: Arc<dyn DictationService>, cfg: PollConfig) -> Self {
        Self { service, cfg }
    }

    pub async fn await_new_entry(
        &self,
        baseline: Baseline,
        overall_timeout: Duration,
    ) -> Result<PolledEntry, DictateError> {
        let started = Instant::now();
        let deadline = started + overall_timeout;

        loop {
            if let Some(entry) = self.service.latest_entry().await? {
                if baseline.is_new_candidate(&entry) {
                    log::info!(
                        "new history entry {} after {}ms (baseline {})",
                        entry.id,
                        ms(started.elapsed()),
                        baseline.id()
                    );
                    return Ok(self.await_refinement(entry).await);
                }
            }

            let now = Instant::now();
            if now >= deadline {
                return Err(DictateError::PollTimeout {
                    waited: now - started,
                });
            }
            sleep(self.cfg.poll_interval.min(deadline - now)).await;
        }
    }

    async fn await_refinement(&self, candidate: ResultEntry) -> PolledEntry {
        if candidate.is_refined() {
            return PolledEntry::refined(candidate);
        }

        let deadline = Instant::now() + self.cfg.post_process_timeout;
        while Instant::now() < deadline {
            sleep(self.cfg.poll_interval).await;

            match self.service.latest_entry().await {
                Ok(Some(entry)) if entry.id == candidate.id && entry.is_refined() => {
                    return PolledEntry::refined(entry);
                }
                Ok(_) => {}
                // The raw candidate is already in hand; keep waiting out the window.
                Err(e) => log::warn!("refinement poll for entry {} failed: {e}", candidate.id),
            }
        }

        log::info!(
            "post-processing for entry {} did not finish within {}ms",
            candidate.id,
            ms(self.cfg.post_process_timeout)
        );
        PolledEntry::raw(candidate)
    }
}
