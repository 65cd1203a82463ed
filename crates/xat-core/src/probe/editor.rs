//! Interactive editor detection

use std::env;

/// Variables set by editors that spawn the linter
const EDITOR_VARS: &[&str] = &["VSCODE_PID", "VSCODE_CWD", "JETBRAINS_IDE", "VIM", "NVIM"];

/// Decides editor mode from an environment lookup
pub struct EditorDetector<F> {
    lookup: F,
}

impl<F> EditorDetector<F>
where
    F: Fn(&str) -> Option<String>,
{
    pub fn new(lookup: F) -> Self {
        Self { lookup }
    }

    fn is_set(&self, key: &str) -> bool {
        (self.lookup)(key).is_some()
    }

    fn in_git_hooks_or_lint_staged(&self) -> bool {
        self.is_set("GIT_PARAMS")
            || self.is_set("VSCODE_GIT_COMMAND")
            || (self.lookup)("npm_lifecycle_script").is_some_and(|s| s.starts_with("lint-staged"))
    }

    pub fn detect(&self) -> bool {
        if self.is_set("CI") || self.in_git_hooks_or_lint_staged() {
            return false;
        }
        EDITOR_VARS.iter().any(|k| self.is_set(k))
    }
}

/// Whether the current process runs inside an interactive editor
pub fn is_in_editor_env() -> bool {
    EditorDetector::new(|key| env::var(key).ok()).detect()
}
