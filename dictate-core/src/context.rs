use serde::{Deserialize, Serialize};

/// Project state attached to the stop request so the service can bias post-processing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProjectContext {
    pub branch: Option<String>,
    pub modified_files: Vec<String>,
}

impl ProjectContext {
    pub fn is_empty(&self) -> bool {
        self.branch.is_none() && self.modified_files.is_empty()
    }

    /// Renders the payload text, or `None` when nothing was gathered.
    pub fn render(&self, max_files: usize) -> Option<String> {
        if self.is_empty() {
            return None;
        }

        let mut lines = Vec::new();
        if let Some(branch) = &self.branch {
            lines.push(format!("Git branch: {branch}"));
        }
        if !self.modified_files.is_empty() {
            lines.push("Modified files:".to_string());
            for path in self.modified_files.iter().take(max_files) {
                lines.push(format!("- {path}"));
            }
            let hidden = self.modified_files.len().saturating_sub(max_files);
            if hidden > 0 {
                lines.push(format!("- … ({hidden} more)"));
            }
        }
        Some(lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_context_renders_nothing() {
        assert_eq!(ProjectContext::default().render(10), None);
    }

    #[test]
    fn renders_branch_and_files() {
        let ctx = ProjectContext {
            branch: Some("main".into()),
            modified_files: vec!["src/lib.rs".into(), "README.md".into()],
        };
        assert_eq!(
            ctx.render(10).unwrap(),
            "Git branch: main\nModified files:\n- src/lib.rs\n- README.md"
        );
    }

    #[test]
    fn omits_missing_branch_and_caps_files() {
        let ctx = ProjectContext {
            branch: None,
            modified_files: vec!["a".into(), "b".into(), "c".into()],
        };
        assert_eq!(
            ctx.render(2).unwrap(),
            "Modified files:\n- a\n- b\n- … (1 more)"
        );
    }
}
