use super::{FragmentProvider, ProviderContext, fragment_name};
use crate::compose::{RenameTable, rename_rules};
use crate::fragment::ConfigFragment;
use crate::globs::{GLOB_SRC, GLOB_TS, GLOB_TSX};
use crate::result::Result;
use crate::rule::{RuleEntry, RuleTable, apply_overrides, parse_rule_table};
use async_trait::async_trait;
use serde_json::json;

/// React, hooks and fast-refresh rules
pub struct ReactProvider {
    overrides: RuleTable,
    tsconfig_path: Option<String>,
}

impl ReactProvider {
    pub fn new(overrides: RuleTable, tsconfig_path: Option<String>) -> Self {
        Self {
            overrides,
            tsconfig_path,
        }
    }
}

/// Upstream `@eslint-react` recommended preset, in its own namespaces
fn recommended_preset() -> Result<RuleTable> {
    parse_rule_table(json!({
        "@eslint-react/dom/no-dangerously-set-innerhtml": "warn",
        "@eslint-react/dom/no-dangerously-set-innerhtml-with-children": "error",
        "@eslint-react/dom/no-missing-button-type": "warn",
        "@eslint-react/dom/no-render-return-value": "error",
        "@eslint-react/dom/no-script-url": "warn",
        "@eslint-react/dom/no-unsafe-target-blank": "warn",
        "@eslint-react/hooks-extra/no-direct-set-state-in-use-effect": "warn",
        "@eslint-react/naming-convention/context-name": "warn",
        "@eslint-react/no-access-state-in-setstate": "error",
        "@eslint-react/no-array-index-key": "warn",
        "@eslint-react/no-children-count": "warn",
        "@eslint-react/no-direct-mutation-state": "error",
        "@eslint-react/no-duplicate-key": "error",
        "@eslint-react/no-missing-key": "error",
        "@eslint-react/no-nested-component-definitions": "error",
        "@eslint-react/no-unstable-context-value": "warn",
        "@eslint-react/no-unstable-default-props": "warn",
        "@eslint-react/no-unused-state": "warn"
    }))
}

#[async_trait]
impl FragmentProvider for ReactProvider {
    fn name(&self) -> &'static str {
        "react"
    }

    async fn provide(&self, ctx: &ProviderContext) -> Result<Vec<ConfigFragment>> {
        let (react, hooks, refresh) = futures::try_join!(
            ctx.plugin("react", "@eslint-react/eslint-plugin"),
            ctx.plugin("react", "eslint-plugin-react-hooks"),
            ctx.plugin("react", "eslint-plugin-react-refresh"),
        )?;

        let upstream = RenameTable::new([
            ("@eslint-react", "react"),
            ("@eslint-react/dom", "react-dom"),
            ("@eslint-react/hooks-extra", "react-hooks-extra"),
            ("@eslint-react/naming-convention", "react-naming-convention"),
        ])?;

        let mut rules = rename_rules(&recommended_preset()?, &upstream);
        apply_overrides(
            &mut rules,
            &parse_rule_table(json!({
                "react-hooks/exhaustive-deps": "warn",
                "react-hooks/rules-of-hooks": "error",
                "react-refresh/only-export-components": ["warn", { "allowConstantExport": true }]
            }))?,
        );
        apply_overrides(&mut rules, &self.overrides);

        let mut fragments = vec![
            ConfigFragment::named(fragment_name("react", "setup"))
                .plugin("react", react.clone())
                .plugin("react-dom", react.clone())
                .plugin("react-hooks-extra", react.clone())
                .plugin("react-naming-convention", react)
                .plugin("react-hooks", hooks)
                .plugin("react-refresh", refresh),
            ConfigFragment::named(fragment_name("react", "rules"))
                .files([GLOB_SRC])
                .language_options(json!({
                    "parserOptions": { "ecmaFeatures": { "jsx": true } },
                    "sourceType": "module"
                }))
                .rules(rules),
        ];

        if self.tsconfig_path.is_some() {
            fragments.push(
                ConfigFragment::named(fragment_name("react", "type-aware-rules"))
                    .files([GLOB_TS, GLOB_TSX])
                    .rule("react/no-leaked-conditional-rendering", RuleEntry::warn()),
            );
        }

        Ok(fragments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::StaticPluginLoader;
    use crate::probe::ProjectManifest;
    use crate::providers::tests::test_context;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_upstream_namespaces_are_shortened() {
        let fragments = ReactProvider::new(RuleTable::new(), None)
            .provide(&test_context())
            .await
            .unwrap();

        let rules = &fragments[1].rules;
        assert!(rules.contains_key("react-dom/no-script-url"));
        assert!(rules.contains_key("react/no-missing-key"));
        assert!(rules.keys().all(|id| !id.starts_with('@')));
        assert_eq!(fragments.len(), 2);
    }

    #[tokio::test]
    async fn test_missing_react_plugin() {
        let ctx = ProviderContext::new(
            Arc::new(StaticPluginLoader::permissive().deny("@eslint-react/eslint-plugin")),
            Arc::new(ProjectManifest::empty()),
            std::env::temp_dir(),
        );
        let err = ReactProvider::new(RuleTable::new(), None)
            .provide(&ctx)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Dependency);
    }
}
