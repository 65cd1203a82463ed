use super::{FragmentProvider, ProviderContext, fragment_name};
use crate::fragment::ConfigFragment;
use crate::globs::GLOB_SRC;
use crate::options::NextjsOptions;
use crate::result::Result;
use crate::rule::{RuleTable, apply_overrides, parse_rule_table};
use async_trait::async_trait;
use serde_json::json;

pub struct NextjsProvider {
    options: NextjsOptions,
}

impl NextjsProvider {
    pub fn new(options: NextjsOptions) -> Self {
        Self { options }
    }
}

fn recommended() -> Result<RuleTable> {
    parse_rule_table(json!({
        "@next/next/google-font-display": ["warn"],
        "@next/next/google-font-preconnect": ["warn"],
        "@next/next/inline-script-id": ["error"],
        "@next/next/next-script-for-ga": ["warn"],
        "@next/next/no-assign-module-variable": ["error"],
        "@next/next/no-async-client-component": ["warn"],
        "@next/next/no-before-interactive-script-outside-document": ["warn"],
        "@next/next/no-css-tags": ["warn"],
        "@next/next/no-document-import-in-page": ["error"],
        "@next/next/no-duplicate-head": ["error"],
        "@next/next/no-head-element": ["warn"],
        "@next/next/no-head-import-in-document": ["error"],
        "@next/next/no-html-link-for-pages": ["warn"],
        "@next/next/no-img-element": ["warn"],
        "@next/next/no-page-custom-font": ["warn"],
        "@next/next/no-script-component-in-head": ["error"],
        "@next/next/no-styled-jsx-in-document": ["warn"],
        "@next/next/no-sync-scripts": ["warn"],
        "@next/next/no-title-in-document-head": ["warn"],
        "@next/next/no-typos": ["warn"],
        "@next/next/no-unwanted-polyfillio": ["warn"]
    }))
}

fn core_web_vitals() -> Result<RuleTable> {
    parse_rule_table(json!({
        "@next/next/no-html-link-for-pages": ["error"],
        "@next/next/no-sync-scripts": ["error"]
    }))
}

#[async_trait]
impl FragmentProvider for NextjsProvider {
    fn name(&self) -> &'static str {
        "nextjs"
    }

    async fn provide(&self, ctx: &ProviderContext) -> Result<Vec<ConfigFragment>> {
        let plugin = ctx.plugin("nextjs", "@next/eslint-plugin-next").await?;

        let files = self
            .options
            .files
            .clone()
            .unwrap_or_else(|| vec![GLOB_SRC.to_string()]);

        let mut rules = recommended()?;
        apply_overrides(&mut rules, &core_web_vitals()?);
        apply_overrides(&mut rules, &self.options.overrides);

        Ok(vec![
            ConfigFragment::named(fragment_name("nextjs", "setup")).plugin("@next/next", plugin),
            ConfigFragment::named(fragment_name("nextjs", "rules"))
                .files(files)
                .language_options(json!({
                    "parserOptions": { "ecmaFeatures": { "jsx": true } },
                    "sourceType": "module"
                }))
                .rules(rules)
                .settings(json!({ "react": { "version": "detect" } })),
        ])
    }
}
