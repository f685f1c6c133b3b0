use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use dictate_core::config::DictateConfig;
use dictate_engine::machine::{DictationMachine, MachineConfig};
use dictate_engine::traits::{DictationService, Notifier, PromptSink};
use dictate_platform::git::GitContextSource;
use dictate_providers::ServiceClient;

use crate::service::HttpDictationService;

/// Build the HTTP-backed service adapter described by `cfg`.
pub fn build_service(cfg: &DictateConfig) -> anyhow::Result<HttpDictationService> {
    cfg.validate().context("invalid configuration")?;
    let client = ServiceClient::new(
        cfg.base_url.clone(),
        cfg.connect_timeout(),
        cfg.request_timeout(),
    )?;
    Ok(HttpDictationService::new(client))
}

/// Build a runnable machine from config + host adapters.
///
/// This keeps the host layer thin. Context is gathered from `project_dir` via git when
/// enabled in `cfg`.
pub fn build_machine_from_config(
    cfg: &DictateConfig,
    notifier: Arc<dyn Notifier>,
    prompt: Arc<dyn PromptSink>,
    project_dir: Option<PathBuf>,
) -> anyhow::Result<DictationMachine> {
    let service: Arc<dyn DictationService> = Arc::new(build_service(cfg)?);
    let machine = DictationMachine::new(MachineConfig::from_config(cfg), service, notifier, prompt);

    let machine = match project_dir {
        Some(dir) if cfg.include_context => {
            log::debug!("gathering stop context from {}", dir.display());
            machine.with_context_source(Arc::new(GitContextSource::new(dir)))
        }
        _ => machine,
    };
    Ok(machine)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dictate_core::context::ProjectContext;
    use dictate_core::types::Severity;
    use dictate_platform::test::{MemoryNotifier, MemoryPrompt, TestContextSource};
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn rejects_invalid_config() {
        let cfg = DictateConfig {
            base_url: "not a url".into(),
            ..Default::default()
        };
        let err = build_machine_from_config(
            &cfg,
            Arc::new(MemoryNotifier::default()),
            Arc::new(MemoryPrompt::default()),
            None,
        )
        .err()
        .unwrap();
        assert!(format!("{err:#}").contains("invalid configuration"));
    }

    #[tokio::test]
    async fn built_machine_talks_to_configured_service() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/health"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                r#"{"ok":true,"data":{"status":"ready"}}"#,
                "application/json",
            ))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/history"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                r#"{"ok":true,"data":[{"id":41,"rawText":"before"}]}"#,
                "application/json",
            ))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/transcription/toggle-post-process"))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw(r#"{"ok":true}"#, "application/json"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let cfg = DictateConfig {
            base_url: server.uri(),
            ..Default::default()
        };
        let notifier = Arc::new(MemoryNotifier::default());
        let dir = tempfile::tempdir().unwrap();
        let mut machine = build_machine_from_config(
            &cfg,
            notifier.clone(),
            Arc::new(MemoryPrompt::default()),
            Some(dir.path().to_path_buf()),
        )
        .unwrap();

        let report = machine.on_trigger().await;
        assert!(report.is_success(), "{report:?}");
        assert!(machine.is_recording());
        assert_eq!(
            *notifier.notices.lock().unwrap(),
            vec![(
                "Recording started. Run /dictate again to stop.".to_string(),
                Severity::Info
            )]
        );
    }

    fn ok_json(body: &str) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_raw(body.to_string(), "application/json")
    }

    #[tokio::test]
    async fn stop_sends_rendered_project_context() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/health"))
            .respond_with(ok_json(r#"{"ok":true,"data":{"status":"ready"}}"#))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/history"))
            .respond_with(ok_json(r#"{"ok":true,"data":[{"id":41,"rawText":"before"}]}"#))
            .up_to_n_times(1)
            .with_priority(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/history"))
            .respond_with(ok_json(
                r#"{"ok":true,"data":[{"id":42,"rawText":"hello","refinedText":"Hello."}]}"#,
            ))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/transcription/toggle-post-process"))
            .and(body_json(serde_json::json!({})))
            .respond_with(ok_json(r#"{"ok":true}"#))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/transcription/toggle-post-process"))
            .and(body_json(serde_json::json!({
                "context": "Git branch: feature/x\nModified files:\n- src/a.rs\n- … (1 more)"
            })))
            .respond_with(ok_json(r#"{"ok":true}"#))
            .expect(1)
            .mount(&server)
            .await;

        let cfg = DictateConfig {
            base_url: server.uri(),
            max_context_files: 1,
            ..Default::default()
        };
        let prompt = Arc::new(MemoryPrompt::default());
        let context = TestContextSource::new(ProjectContext {
            branch: Some("feature/x".into()),
            modified_files: vec!["src/a.rs".into(), "src/b.rs".into()],
        });
        let mut machine = build_machine_from_config(
            &cfg,
            Arc::new(MemoryNotifier::default()),
            prompt.clone(),
            None,
        )
        .unwrap()
        .with_context_source(context.boxed());

        assert!(machine.on_trigger().await.is_success());
        let report = machine.on_trigger().await;
        assert!(report.is_success(), "{report:?}");
        assert!(!machine.is_recording());
        assert_eq!(*prompt.appended.lock().unwrap(), vec!["Hello.".to_string()]);
    }
}
