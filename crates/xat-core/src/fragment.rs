//! Configuration fragments and the composed fragment sequence

use crate::globs::{glob_matches, ignored_by};
use crate::rule::{RuleEntry, RuleTable};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Resolved implementation handle of a lint plugin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawPluginHandle")]
pub struct PluginHandle {
    /// Package the plugin implementation comes from
    pub package: String,
    /// Version declared by the host project, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl PluginHandle {
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            version: None,
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPluginHandle {
    Package(String),
    Handle {
        package: String,
        #[serde(default)]
        version: Option<String>,
    },
}

impl From<RawPluginHandle> for PluginHandle {
    fn from(raw: RawPluginHandle) -> Self {
        match raw {
            RawPluginHandle::Package(package) => PluginHandle::new(package),
            RawPluginHandle::Handle { package, version } => PluginHandle { package, version },
        }
    }
}

/// One named slice of configuration: where it applies, which plugins it
/// registers and which rules it sets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigFragment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignores: Vec<String>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub plugins: IndexMap<String, PluginHandle>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub rules: RuleTable,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_options: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linter_options: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processor: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<Value>,
}

impl ConfigFragment {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn files<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.files = files.into_iter().map(Into::into).collect();
        self
    }

    pub fn ignores<I, S>(mut self, ignores: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignores = ignores.into_iter().map(Into::into).collect();
        self
    }

    pub fn plugin(mut self, key: impl Into<String>, handle: PluginHandle) -> Self {
        self.plugins.insert(key.into(), handle);
        self
    }

    pub fn rules(mut self, rules: RuleTable) -> Self {
        self.rules = rules;
        self
    }

    pub fn rule(mut self, id: impl Into<String>, entry: RuleEntry) -> Self {
        self.rules.insert(id.into(), entry);
        self
    }

    pub fn language_options(mut self, options: Value) -> Self {
        self.language_options = Some(options);
        self
    }

    pub fn linter_options(mut self, options: Value) -> Self {
        self.linter_options = Some(options);
        self
    }

    pub fn processor(mut self, processor: impl Into<String>) -> Self {
        self.processor = Some(processor.into());
        self
    }

    pub fn settings(mut self, settings: Value) -> Self {
        self.settings = Some(settings);
        self
    }

    /// A fragment carrying only `ignores` excludes files for every fragment
    pub fn is_global_ignore(&self) -> bool {
        !self.ignores.is_empty()
            && self.files.is_empty()
            && self.plugins.is_empty()
            && self.rules.is_empty()
            && self.language_options.is_none()
            && self.linter_options.is_none()
            && self.processor.is_none()
            && self.settings.is_none()
    }

    /// Whether this fragment applies to a file at `path` (relative, `/`-separated)
    pub fn applies_to(&self, path: &str) -> bool {
        let included = self.files.is_empty() || self.files.iter().any(|g| glob_matches(g, path));
        included && !ignored_by(&self.ignores, path)
    }
}

/// Ordered, immutable list of fragments.
///
/// Order is significant: a consumer applies fragments front to back and a
/// later fragment overrides an earlier one for the files both match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FragmentSequence {
    fragments: Vec<ConfigFragment>,
}

impl FragmentSequence {
    pub fn new(fragments: Vec<ConfigFragment>) -> Self {
        Self { fragments }
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ConfigFragment> {
        self.fragments.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ConfigFragment> {
        self.fragments.iter()
    }

    pub fn as_slice(&self) -> &[ConfigFragment] {
        &self.fragments
    }

    pub fn into_vec(self) -> Vec<ConfigFragment> {
        self.fragments
    }

    /// Fragment names in order, skipping unnamed fragments
    pub fn names(&self) -> Vec<&str> {
        self.fragments
            .iter()
            .filter_map(|f| f.name.as_deref())
            .collect()
    }

    /// Find a fragment by name
    pub fn find(&self, name: &str) -> Option<&ConfigFragment> {
        self.fragments
            .iter()
            .find(|f| f.name.as_deref() == Some(name))
    }

    /// Last-applied rule table across every fragment, ignoring file scoping
    pub fn effective_rules(&self) -> RuleTable {
        let mut effective = RuleTable::new();
        for fragment in &self.fragments {
            for (id, entry) in &fragment.rules {
                effective.insert(id.clone(), entry.clone());
            }
        }
        effective
    }

    /// Last-applied rule table for one file path.
    ///
    /// A path excluded by a global-ignore fragment gets an empty table.
    pub fn effective_rules_for(&self, path: &str) -> RuleTable {
        let globally_ignored = self
            .fragments
            .iter()
            .filter(|f| f.is_global_ignore())
            .any(|f| ignored_by(&f.ignores, path));
        if globally_ignored {
            return RuleTable::new();
        }

        let mut effective = RuleTable::new();
        for fragment in self.fragments.iter().filter(|f| f.applies_to(path)) {
            for (id, entry) in &fragment.rules {
                effective.insert(id.clone(), entry.clone());
            }
        }
        effective
    }
}

impl From<Vec<ConfigFragment>> for FragmentSequence {
    fn from(fragments: Vec<ConfigFragment>) -> Self {
        Self::new(fragments)
    }
}

impl FromIterator<ConfigFragment> for FragmentSequence {
    fn from_iter<T: IntoIterator<Item = ConfigFragment>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for FragmentSequence {
    type Item = ConfigFragment;
    type IntoIter = std::vec::IntoIter<ConfigFragment>;

    fn into_iter(self) -> Self::IntoIter {
        self.fragments.into_iter()
    }
}

impl<'a> IntoIterator for &'a FragmentSequence {
    type Item = &'a ConfigFragment;
    type IntoIter = std::slice::Iter<'a, ConfigFragment>;

    fn into_iter(self) -> Self::IntoIter {
        self.fragments.iter()
    }
}
