//! The user-facing options bag

use super::features::{
    FormattersOptions, GitignoreOptions, NextjsOptions, OverridesOptions, ProjectType,
    RegexpOptions, StylisticOptions, TypeScriptOptions, UnicornOptions,
};
use super::toggle::FeatureToggle;
use crate::fragment::PluginHandle;
use crate::rule::RuleTable;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Top-level options accepted by the factory.
///
/// Every feature key is optional; an absent key takes the feature default.
/// Besides feature switches the bag may carry flat-config properties
/// (`name`, `languageOptions`, `rules`, ...) that are fused into one global
/// fragment appended after everything else.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ComposeOptions {
    // Global knobs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_in_editor: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_rename_plugins: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub component_exts: Vec<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub project_type: Option<ProjectType>,

    // Features
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gitignore: Option<FeatureToggle<GitignoreOptions>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ignores: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub javascript: Option<OverridesOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imports: Option<FeatureToggle<OverridesOptions>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unicorn: Option<FeatureToggle<UnicornOptions>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jsx: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub typescript: Option<FeatureToggle<TypeScriptOptions>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stylistic: Option<FeatureToggle<StylisticOptions>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regexp: Option<FeatureToggle<RegexpOptions>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test: Option<FeatureToggle<OverridesOptions>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub react: Option<FeatureToggle<OverridesOptions>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nextjs: Option<FeatureToggle<NextjsOptions>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub astro: Option<FeatureToggle<OverridesOptions>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paths: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jsonc: Option<FeatureToggle<OverridesOptions>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaml: Option<FeatureToggle<OverridesOptions>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toml: Option<FeatureToggle<OverridesOptions>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markdown: Option<FeatureToggle<OverridesOptions>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatters: Option<FeatureToggle<FormattersOptions>>,

    // Flat-config properties fused into the global fragment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_options: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linter_options: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugins: Option<IndexMap<String, PluginHandle>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rules: Option<RuleTable>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<Value>,

    /// Present only to be rejected: global options cannot be file-scoped.
    /// Any value, `null` included, counts as present.
    #[serde(
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub files: Option<Value>,
}

fn deserialize_present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

impl ComposeOptions {
    /// Parse an options object from a JSON value
    pub fn from_value(value: Value) -> crate::Result<Self> {
        serde_json::from_value(value)
            .map_err(|e| crate::XatError::config_error(format!("Invalid options: {e}")))
    }

    /// Whether any flat-config property destined for the global fragment is set
    pub fn has_global_properties(&self) -> bool {
        self.name.is_some()
            || self.language_options.is_some()
            || self.linter_options.is_some()
            || self.processor.is_some()
            || self.plugins.is_some()
            || self.rules.is_some()
            || self.settings.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_mixed_options() {
        let options = ComposeOptions::from_value(json!({
            "typescript": { "tsconfigPath": "tsconfig.json" },
            "react": false,
            "stylistic": true,
            "type": "lib",
            "rules": { "no-console": "warn" }
        }))
        .unwrap();

        assert!(matches!(options.typescript, Some(FeatureToggle::Configured(_))));
        assert_eq!(options.react, Some(FeatureToggle::Disabled));
        assert_eq!(options.stylistic, Some(FeatureToggle::DefaultEnabled));
        assert_eq!(options.project_type, Some(ProjectType::Lib));
        assert!(options.unicorn.is_none());
        assert!(options.has_global_properties());
        assert!(options.files.is_none());
    }

    #[test]
    fn test_files_null_counts_as_present() {
        let options = ComposeOptions::from_value(json!({ "files": null })).unwrap();
        assert_eq!(options.files, Some(Value::Null));
    }

    #[test]
    fn test_invalid_feature_shape_is_config_error() {
        let err = ComposeOptions::from_value(json!({ "stylistic": { "indent": "space" } }))
            .unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Config);
    }
}
