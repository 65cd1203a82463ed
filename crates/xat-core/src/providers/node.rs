use super::{FragmentProvider, ProviderContext, fragment_name};
use crate::fragment::ConfigFragment;
use crate::result::Result;
use crate::rule::parse_rule_table;
use async_trait::async_trait;
use serde_json::json;

/// Node.js runtime rules
pub struct NodeProvider;

#[async_trait]
impl FragmentProvider for NodeProvider {
    fn name(&self) -> &'static str {
        "node"
    }

    async fn provide(&self, ctx: &ProviderContext) -> Result<Vec<ConfigFragment>> {
        let plugin = ctx.plugin("node", "eslint-plugin-n").await?;

        let rules = parse_rule_table(json!({
            "node/handle-callback-err": ["error", "^(err|error)$"],
            "node/no-deprecated-api": "error",
            "node/no-exports-assign": "error",
            "node/no-new-require": "error",
            "node/no-path-concat": "error",
            "node/prefer-global/buffer": ["error", "never"],
            "node/prefer-global/process": ["error", "never"],
            "node/process-exit-as-throw": "error"
        }))?;

        Ok(vec![
            ConfigFragment::named(fragment_name("node", "rules"))
                .plugin("node", plugin)
                .rules(rules),
        ])
    }
}
