//! Environment probes used for feature auto-detection
//!
//! Probes are pure existence checks. They never fail: an unreadable
//! manifest is an empty manifest, an unknown environment is "not an editor".

pub mod editor;
pub mod manifest;

pub use editor::{EditorDetector, is_in_editor_env};
pub use manifest::ProjectManifest;

/// Answers whether the host project declares a dependency
pub trait DependencyProbe: Send + Sync {
    fn has_dependency(&self, name: &str) -> bool;

    fn has_any_dependency(&self, names: &[&str]) -> bool {
        names.iter().any(|name| self.has_dependency(name))
    }
}
