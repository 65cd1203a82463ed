//! Plugin-namespace renaming

use crate::error::XatError;
use crate::fragment::{ConfigFragment, FragmentSequence};
use crate::result::Result;
use crate::rule::RuleTable;
use indexmap::IndexMap;
use std::borrow::Cow;
use tracing::debug;

/// Prefixes upstream plugins register under, mapped to the short names
/// used throughout the composed configuration
pub const DEFAULT_PLUGIN_RENAMES: &[(&str, &str)] = &[
    ("@eslint-react", "react"),
    ("@eslint-react/dom", "react-dom"),
    ("@eslint-react/hooks-extra", "react-hooks-extra"),
    ("@eslint-react/naming-convention", "react-naming-convention"),
    ("@stylistic", "style"),
    ("@typescript-eslint", "ts"),
    ("import-lite", "import"),
    ("n", "node"),
    ("vitest", "test"),
    ("yml", "yaml"),
];

/// Ordered old-prefix to new-prefix map.
///
/// No target may also be a source, so a single pass leaves nothing to
/// rename and renaming twice equals renaming once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameTable {
    entries: IndexMap<String, String>,
}

impl RenameTable {
    pub fn new<I, K, V>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let entries: IndexMap<String, String> = entries
            .into_iter()
            .map(|(from, to)| (from.into(), to.into()))
            .collect();

        // a renamed id must never start with another source prefix
        let reenters = |to: &str| {
            entries.keys().any(|from| {
                from.strip_prefix(to)
                    .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
            })
        };
        if let Some((from, to)) = entries.iter().find(|(_, to)| reenters(to.as_str())) {
            return Err(XatError::config_error(format!(
                "rename table maps '{from}' to '{to}', which is itself renamed"
            )));
        }
        if entries.keys().any(String::is_empty) {
            return Err(XatError::config_error("rename table has an empty prefix"));
        }

        Ok(Self { entries })
    }

    /// Table that renames nothing
    pub fn empty() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// New name of a plugin key, if the key is renamed
    pub fn target(&self, prefix: &str) -> Option<&str> {
        self.entries.get(prefix).map(String::as_str)
    }

    /// Rewrite the prefix of a rule id.
    ///
    /// The longest table key followed by `/` wins, so `@eslint-react/dom/x`
    /// goes through `@eslint-react/dom` and `@stylistic/jsx/indent` through
    /// `@stylistic`.
    pub fn rename_rule_id<'a>(&self, id: &'a str) -> Cow<'a, str> {
        let matched = self
            .entries
            .iter()
            .filter(|(from, _)| {
                id.strip_prefix(from.as_str())
                    .is_some_and(|rest| rest.starts_with('/'))
            })
            .max_by_key(|(from, _)| from.len());

        match matched {
            Some((from, to)) => Cow::Owned(format!("{to}{}", &id[from.len()..])),
            None => Cow::Borrowed(id),
        }
    }
}

impl Default for RenameTable {
    fn default() -> Self {
        Self {
            entries: DEFAULT_PLUGIN_RENAMES
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect(),
        }
    }
}

/// Rename the rule ids of one table.
///
/// When two ids collapse onto the same name the later entry's value wins;
/// the key stays where it first appeared.
pub fn rename_rules(rules: &RuleTable, table: &RenameTable) -> RuleTable {
    let mut renamed = RuleTable::with_capacity(rules.len());
    for (id, entry) in rules {
        renamed.insert(table.rename_rule_id(id).into_owned(), entry.clone());
    }
    renamed
}

fn rename_fragment(mut fragment: ConfigFragment, table: &RenameTable) -> ConfigFragment {
    if !fragment.plugins.is_empty() {
        let plugins = std::mem::take(&mut fragment.plugins);
        for (key, handle) in plugins {
            let key = table.target(&key).map(str::to_string).unwrap_or(key);
            fragment.plugins.insert(key, handle);
        }
    }
    fragment.rules = rename_rules(&fragment.rules, table);
    fragment
}

/// Rename every plugin key and rule id across a composed sequence
pub fn rename_sequence(sequence: FragmentSequence, table: &RenameTable) -> FragmentSequence {
    if table.is_empty() {
        return sequence;
    }
    debug!(
        "Renaming plugin prefixes across {} fragments",
        sequence.len()
    );
    sequence
        .into_vec()
        .into_iter()
        .map(|fragment| rename_fragment(fragment, table))
        .collect::<Vec<_>>()
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use crate::fragment::PluginHandle;
    use crate::rule::{RuleEntry, RuleSeverity};

    #[test]
    fn test_rename_rule_id_prefers_longest_prefix() {
        let table = RenameTable::default();
        assert_eq!(table.rename_rule_id("@typescript-eslint/no-explicit-any"), "ts/no-explicit-any");
        assert_eq!(table.rename_rule_id("@eslint-react/dom/no-danger"), "react-dom/no-danger");
        assert_eq!(table.rename_rule_id("n/no-new-require"), "node/no-new-require");
        assert_eq!(table.rename_rule_id("no-console"), "no-console");
        assert_eq!(table.rename_rule_id("unknown/rule"), "unknown/rule");
        assert_eq!(table.rename_rule_id("nx/rule"), "nx/rule");
    }

    #[test]
    fn test_rename_rule_id_keeps_nested_rule_names() {
        let table = RenameTable::default();
        assert_eq!(table.rename_rule_id("@stylistic/jsx/indent"), "style/jsx/indent");
        assert_eq!(
            table.rename_rule_id("@eslint-react/dom/sub/rule"),
            "react-dom/sub/rule"
        );

        let table = RenameTable::new([("x", "y")]).unwrap();
        let fragment = ConfigFragment::named("a").rule("x/sub/r", RuleEntry::error());
        let renamed = rename_sequence(vec![fragment].into(), &table);
        let ids: Vec<&String> = renamed.get(0).unwrap().rules.keys().collect();
        assert_eq!(ids, vec!["y/sub/r"]);
    }

    #[test]
    fn test_chains_and_identities_rejected() {
        let err = RenameTable::new([("a", "b"), ("b", "c")]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
        assert!(RenameTable::new([("a", "a")]).is_err());
        assert!(RenameTable::new([("x", "a"), ("a/b", "c")]).is_err());
        assert!(RenameTable::new([("x", "a"), ("ab", "c")]).is_ok());
        assert!(RenameTable::new([("a", "c"), ("b", "c")]).is_ok());
    }

    #[test]
    fn test_collision_later_wins() {
        let table = RenameTable::new([("a", "z"), ("b", "z")]).unwrap();
        let mut rules = RuleTable::new();
        rules.insert("a/r".to_string(), RuleEntry::error());
        rules.insert("b/r".to_string(), RuleEntry::warn());

        let renamed = rename_rules(&rules, &table);
        assert_eq!(renamed.len(), 1);
        assert_eq!(renamed["z/r"].severity, RuleSeverity::Warn);
    }

    #[test]
    fn test_sequence_renames_plugins_and_rules() {
        let fragment = ConfigFragment::named("style")
            .plugin("@stylistic", PluginHandle::new("@stylistic/eslint-plugin"))
            .rule("@stylistic/semi", RuleEntry::error());
        let renamed = rename_sequence(vec![fragment].into(), &RenameTable::default());

        let fragment = renamed.get(0).unwrap();
        assert_eq!(
            fragment.plugins["style"].package,
            "@stylistic/eslint-plugin"
        );
        assert!(!fragment.plugins.contains_key("@stylistic"));
        assert!(fragment.rules.contains_key("style/semi"));
    }

    #[test]
    fn test_rename_is_idempotent() {
        let fragment = ConfigFragment::named("mixed")
            .plugin("yml", PluginHandle::new("eslint-plugin-yml"))
            .rule("yml/indent", RuleEntry::error())
            .rule("vitest/no-only-tests", RuleEntry::warn());
        let table = RenameTable::default();

        let once = rename_sequence(vec![fragment].into(), &table);
        let twice = rename_sequence(once.clone(), &table);
        assert_eq!(once, twice);
    }
}
