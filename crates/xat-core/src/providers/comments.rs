use super::{FragmentProvider, ProviderContext, fragment_name};
use crate::fragment::ConfigFragment;
use crate::result::Result;
use crate::rule::parse_rule_table;
use async_trait::async_trait;
use serde_json::json;

/// Rules for `eslint-disable` directive comments
pub struct CommentsProvider;

#[async_trait]
impl FragmentProvider for CommentsProvider {
    fn name(&self) -> &'static str {
        "comments"
    }

    async fn provide(&self, ctx: &ProviderContext) -> Result<Vec<ConfigFragment>> {
        let plugin = ctx
            .plugin("comments", "@eslint-community/eslint-plugin-eslint-comments")
            .await?;

        let rules = parse_rule_table(json!({
            "eslint-comments/no-aggregating-enable": "error",
            "eslint-comments/no-duplicate-disable": "error",
            "eslint-comments/no-unlimited-disable": "error",
            "eslint-comments/no-unused-enable": "error"
        }))?;

        Ok(vec![
            ConfigFragment::named(fragment_name("comments", "rules"))
                .plugin("eslint-comments", plugin)
                .rules(rules),
        ])
    }
}
