use anyhow::{Context, bail};
use dictate_core::config::DictateConfig;
use std::path::{Path, PathBuf};

pub const ENV_BASE_URL: &str = "DICTATE_BASE_URL";
pub const ENV_POLL_INTERVAL_MS: &str = "DICTATE_POLL_INTERVAL_MS";
pub const ENV_TRANSCRIPTION_TIMEOUT_MS: &str = "DICTATE_TRANSCRIPTION_TIMEOUT_MS";
pub const ENV_POST_PROCESS_TIMEOUT_MS: &str = "DICTATE_POST_PROCESS_TIMEOUT_MS";
pub const ENV_INCLUDE_CONTEXT: &str = "DICTATE_INCLUDE_CONTEXT";

#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> anyhow::Result<DictateConfig> {
        let bytes = std::fs::read(&self.path)
            .with_context(|| format!("read config: {}", self.path.display()))?;
        let cfg: DictateConfig = serde_json::from_slice(&bytes).context("decode config JSON")?;
        Ok(cfg)
    }

    /// Like [`ConfigStore::load`], but a missing file yields the defaults.
    pub fn load_or_default(&self) -> anyhow::Result<DictateConfig> {
        if !self.path.exists() {
            log::debug!("no config at {}, using defaults", self.path.display());
            return Ok(DictateConfig::default());
        }
        self.load()
    }

    pub fn save(&self, cfg: &DictateConfig) -> anyhow::Result<()> {
        let json = serde_json::to_vec_pretty(cfg).context("encode config JSON")?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create config directory: {}", parent.display()))?;
        }

        // Atomic-ish write: write temp then replace.
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json).with_context(|| format!("write temp: {}", tmp.display()))?;
        std::fs::rename(&tmp, &self.path)
            .with_context(|| format!("replace file: {}", self.path.display()))?;
        Ok(())
    }
}

/// Applies `DICTATE_*` overrides. `lookup` is `std::env::var(..).ok()` outside of tests.
pub fn apply_env_overrides(
    cfg: &mut DictateConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<()> {
    if let Some(url) = lookup(ENV_BASE_URL).filter(|v| !v.trim().is_empty()) {
        cfg.base_url = url.trim().to_string();
    }
    if let Some(v) = lookup(ENV_POLL_INTERVAL_MS) {
        cfg.poll_interval_ms = parse_millis(ENV_POLL_INTERVAL_MS, &v)?;
    }
    if let Some(v) = lookup(ENV_TRANSCRIPTION_TIMEOUT_MS) {
        cfg.transcription_timeout_ms = parse_millis(ENV_TRANSCRIPTION_TIMEOUT_MS, &v)?;
    }
    if let Some(v) = lookup(ENV_POST_PROCESS_TIMEOUT_MS) {
        cfg.post_process_timeout_ms = parse_millis(ENV_POST_PROCESS_TIMEOUT_MS, &v)?;
    }
    if let Some(v) = lookup(ENV_INCLUDE_CONTEXT) {
        cfg.include_context = parse_flag(ENV_INCLUDE_CONTEXT, &v)?;
    }
    Ok(())
}

fn parse_millis(name: &str, value: &str) -> anyhow::Result<u64> {
    value
        .trim()
        .parse()
        .with_context(|| format!("{name} must be a number of milliseconds, got {value:?}"))
}

fn parse_flag(name: &str, value: &str) -> anyhow::Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("{name} must be a boolean, got {other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn round_trips_config() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::at_path(dir.path().join("nested").join("config.json"));

        let cfg = DictateConfig {
            base_url: "http://127.0.0.1:9999".into(),
            post_process_timeout_ms: 2_500,
            include_context: false,
            ..Default::default()
        };

        store.save(&cfg).unwrap();
        assert_eq!(store.load().unwrap(), cfg);
    }

    #[test]
    fn missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::at_path(dir.path().join("config.json"));

        assert!(store.load().is_err());
        assert_eq!(store.load_or_default().unwrap(), DictateConfig::default());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = ConfigStore::at_path(path).load_or_default().unwrap_err();
        assert!(format!("{err:#}").contains("decode config JSON"));
    }

    #[test]
    fn env_overrides_win() {
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_BASE_URL, " http://10.0.0.2:9876 "),
            (ENV_POLL_INTERVAL_MS, "250"),
            (ENV_INCLUDE_CONTEXT, "off"),
        ]);
        let mut cfg = DictateConfig::default();
        apply_env_overrides(&mut cfg, |k| env.get(k).map(|v| v.to_string())).unwrap();

        assert_eq!(cfg.base_url, "http://10.0.0.2:9876");
        assert_eq!(cfg.poll_interval_ms, 250);
        assert!(!cfg.include_context);
        assert_eq!(cfg.transcription_timeout_ms, 60_000);
    }

    #[test]
    fn bad_env_values_are_rejected() {
        let mut cfg = DictateConfig::default();
        let err = apply_env_overrides(&mut cfg, |k| {
            (k == ENV_TRANSCRIPTION_TIMEOUT_MS).then(|| "soon".to_string())
        })
        .unwrap_err();
        assert!(err.to_string().contains(ENV_TRANSCRIPTION_TIMEOUT_MS));

        let err = apply_env_overrides(&mut cfg, |k| {
            (k == ENV_INCLUDE_CONTEXT).then(|| "maybe".to_string())
        })
        .unwrap_err();
        assert!(err.to_string().contains("boolean"));
    }
}
