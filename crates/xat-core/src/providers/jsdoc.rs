use super::{FragmentProvider, ProviderContext, fragment_name};
use crate::fragment::ConfigFragment;
use crate::result::Result;
use crate::rule::{RuleEntry, parse_rule_table};
use async_trait::async_trait;
use serde_json::json;

/// JSDoc comment rules
pub struct JsdocProvider {
    stylistic: bool,
}

impl JsdocProvider {
    pub fn new(stylistic: bool) -> Self {
        Self { stylistic }
    }
}

#[async_trait]
impl FragmentProvider for JsdocProvider {
    fn name(&self) -> &'static str {
        "jsdoc"
    }

    async fn provide(&self, ctx: &ProviderContext) -> Result<Vec<ConfigFragment>> {
        let plugin = ctx.plugin("jsdoc", "eslint-plugin-jsdoc").await?;

        let mut rules = parse_rule_table(json!({
            "jsdoc/check-access": "warn",
            "jsdoc/check-param-names": "warn",
            "jsdoc/check-property-names": "warn",
            "jsdoc/check-types": "warn",
            "jsdoc/empty-tags": "warn",
            "jsdoc/implements-on-classes": "warn",
            "jsdoc/no-defaults": "warn",
            "jsdoc/no-multi-asterisks": "warn",
            "jsdoc/require-param-name": "warn",
            "jsdoc/require-property": "warn",
            "jsdoc/require-property-description": "warn",
            "jsdoc/require-property-name": "warn",
            "jsdoc/require-returns-check": "warn",
            "jsdoc/require-returns-description": "warn",
            "jsdoc/require-yields-check": "warn"
        }))?;

        if self.stylistic {
            rules.insert("jsdoc/check-alignment".to_string(), RuleEntry::warn());
            rules.insert("jsdoc/multiline-blocks".to_string(), RuleEntry::warn());
        }

        Ok(vec![
            ConfigFragment::named(fragment_name("jsdoc", "rules"))
                .plugin("jsdoc", plugin)
                .rules(rules),
        ])
    }
}
