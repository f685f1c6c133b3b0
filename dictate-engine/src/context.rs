use crate::traits::ContextSource;
use dictate_core::context::ProjectContext;

/// Gathers whatever project state is available. Lookup failures are dropped, never raised.
pub async fn gather_context(source: &dyn ContextSource) -> ProjectContext {
    let branch = match source.branch().await {
        Ok(branch) => branch.filter(|b| !b.trim().is_empty()),
        Err(e) => {
            log::debug!("branch lookup failed, omitting: {e:#}");
            None
        }
    };

    let modified_files = match source.modified_files().await {
        Ok(files) => files,
        Err(e) => {
            log::debug!("file status lookup failed, omitting: {e:#}");
            Vec::new()
        }
    };

    ProjectContext {
        branch,
        modified_files,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct HalfBroken;

    #[async_trait::async_trait]
    impl ContextSource for HalfBroken {
        async fn branch(&self) -> anyhow::Result<Option<String>> {
            Err(anyhow::anyhow!("not a git repository"))
        }

        async fn modified_files(&self) -> anyhow::Result<Vec<String>> {
            Ok(vec!["src/main.rs".into()])
        }
    }

    #[tokio::test]
    async fn failed_lookup_is_omitted() {
        let ctx = gather_context(&HalfBroken).await;
        assert_eq!(ctx.branch, None);
        assert_eq!(ctx.modified_files, vec!["src/main.rs".to_string()]);
        assert_eq!(ctx.render(10).unwrap(), "Modified files:\n- src/main.rs");
    }
}
