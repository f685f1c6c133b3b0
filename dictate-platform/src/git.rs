// Project context from the `git` CLI.
//
// Every lookup is independent; a missing `git` binary or a non-repository directory only
// makes the corresponding part of the context disappear.

use anyhow::{Context, bail};
use dictate_engine::traits::ContextSource;
use std::path::PathBuf;
use std::time::Duration;
use tokio::process::Command;

/// Upper bound for a single `git` invocation; a locked index must not stall the stop trigger.
pub const GIT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct GitContextSource {
    repo_dir: PathBuf,
    timeout: Duration,
}

impl GitContextSource {
    pub fn new(repo_dir: impl Into<PathBuf>) -> Self {
        Self {
            repo_dir: repo_dir.into(),
            timeout: GIT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn git(&self, args: &[&str]) -> anyhow::Result<String> {
        log::debug!("git {} in {}", args.join(" "), self.repo_dir.display());

        let child = Command::new("git")
            .arg("-C")
            .arg(&self.repo_dir)
            .args(args)
            .kill_on_drop(true)
            .output();

        let out = tokio::time::timeout(self.timeout, child)
            .await
            .map_err(|_| anyhow::anyhow!("git {} timed out", args.join(" ")))?
            .with_context(|| format!("spawn git {}", args.join(" ")))?;

        if !out.status.success() {
            bail!(
                "git {} failed: {}",
                args.join(" "),
                String::from_utf8_lossy(&out.stderr).trim()
            );
        }
        Ok(String::from_utf8_lossy(&out.stdout).into_owned())
    }
}

#[async_trait::async_trait]
impl ContextSource for GitContextSource {
    async fn branch(&self) -> anyhow::Result<Option<String>> {
        let out = self.git(&["rev-parse", "--abbrev-ref", "HEAD"]).await?;
        Ok(parse_branch(&out))
    }

    async fn modified_files(&self) -> anyhow::Result<Vec<String>> {
        let out = self.git(&["status", "--porcelain", "-z"]).await?;
        Ok(parse_porcelain(&out))
    }
}

/// `rev-parse --abbrev-ref HEAD` prints `HEAD` when detached; that is not a branch name.
pub fn parse_branch(out: &str) -> Option<String> {
    let name = out.trim();
    if name.is_empty() || name == "HEAD" {
        None
    } else {
        Some(name.to_string())
    }
}

/// Paths from `git status --porcelain -z`. Paths are verbatim (no quoting); renames and copies
/// are followed by an extra record holding the source path, which is skipped.
pub fn parse_porcelain(out: &str) -> Vec<String> {
    let mut files = Vec::new();
    let mut records = out.split('\0');
    while let Some(record) = records.next() {
        if record.len() < 4 || !record.is_char_boundary(3) {
            continue;
        }
        let (status, path) = record.split_at(3);
        files.push(path.to_string());
        if status.contains(['R', 'C']) {
            records.next();
        }
    }
    files
}
