//! Editor-mode autofix suppression

use crate::fragment::FragmentSequence;
use indexmap::IndexSet;
use tracing::debug;

/// Rules whose fixes get in the way while a file is being edited
pub const DEFAULT_EDITOR_SUPPRESSIONS: &[&str] = &[
    "unused-imports/no-unused-imports",
    "test/no-only-tests",
    "prefer-const",
];

/// Ordered set of rule ids whose autofix is turned off in editor mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuppressionSet {
    rules: IndexSet<String>,
}

impl SuppressionSet {
    pub fn new<I, S>(rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rules: rules.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, rule: &str) -> bool {
        self.rules.contains(rule)
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(String::as_str)
    }
}

impl Default for SuppressionSet {
    fn default() -> Self {
        Self::new(DEFAULT_EDITOR_SUPPRESSIONS.iter().copied())
    }
}

/// Disable autofix for active entries listed in `set`.
///
/// Severity, options, `off` entries and fragment order are left alone.
pub fn suppress_autofix(sequence: FragmentSequence, set: &SuppressionSet) -> FragmentSequence {
    let mut suppressed = 0usize;
    let fragments: Vec<_> = sequence
        .into_vec()
        .into_iter()
        .map(|mut fragment| {
            for (id, entry) in fragment.rules.iter_mut() {
                if entry.is_active() && set.contains(id) {
                    entry.autofix = false;
                    suppressed += 1;
                }
            }
            fragment
        })
        .collect();

    debug!("Suppressed autofix on {} rule entries", suppressed);
    fragments.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fragment::ConfigFragment;
    use crate::rule::{RuleEntry, RuleSeverity};
    use serde_json::json;

    fn sequence() -> FragmentSequence {
        vec![
            ConfigFragment::named("a")
                .files(["**/*.ts"])
                .rule("prefer-const", RuleEntry::error().with_option(json!({ "destructuring": "all" })))
                .rule("no-console", RuleEntry::warn()),
            ConfigFragment::named("b").rule("test/no-only-tests", RuleEntry::off()),
        ]
        .into()
    }

    #[test]
    fn test_only_autofix_changes() {
        let before = sequence();
        let after = suppress_autofix(before.clone(), &SuppressionSet::default());

        let prefer_const = &after.get(0).unwrap().rules["prefer-const"];
        assert!(!prefer_const.autofix);
        assert_eq!(prefer_const.severity, RuleSeverity::Error);
        assert_eq!(prefer_const.options, vec![json!({ "destructuring": "all" })]);

        assert!(after.get(0).unwrap().rules["no-console"].autofix);
        assert_eq!(after.names(), before.names());
        assert_eq!(after.get(0).unwrap().files, before.get(0).unwrap().files);
    }

    #[test]
    fn test_off_entries_untouched() {
        let after = suppress_autofix(sequence(), &SuppressionSet::default());
        assert_eq!(
            after.get(1).unwrap().rules["test/no-only-tests"],
            RuleEntry::off()
        );
    }

    #[test]
    fn test_empty_set_is_noop() {
        let before = sequence();
        let after = suppress_autofix(before.clone(), &SuppressionSet::new(Vec::<String>::new()));
        assert_eq!(after, before);
    }
}
