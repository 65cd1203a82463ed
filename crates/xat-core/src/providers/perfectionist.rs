use super::{FragmentProvider, ProviderContext, fragment_name};
use crate::fragment::ConfigFragment;
use crate::result::Result;
use crate::rule::parse_rule_table;
use async_trait::async_trait;
use serde_json::json;

/// Sorting of imports, exports, object keys, types and JSX props
pub struct PerfectionistProvider;

#[async_trait]
impl FragmentProvider for PerfectionistProvider {
    fn name(&self) -> &'static str {
        "perfectionist"
    }

    async fn provide(&self, ctx: &ProviderContext) -> Result<Vec<ConfigFragment>> {
        let plugin = ctx
            .plugin("perfectionist", "eslint-plugin-perfectionist")
            .await?;

        let natural = json!({ "order": "asc", "type": "natural" });
        let rules = parse_rule_table(json!({
            "perfectionist/sort-enums": ["error", natural],
            "perfectionist/sort-exports": ["error", natural],
            "perfectionist/sort-imports": ["error", {
                "groups": [
                    "type",
                    "builtin-type",
                    "external-type",
                    ["parent-type", "sibling-type", "index-type", "internal-type"],
                    "builtin",
                    "external",
                    "internal",
                    ["parent", "sibling", "index", "internal"],
                    ["side-effect", "side-effect-style"],
                    "object",
                    "unknown"
                ],
                "internalPattern": ["^~/.*", "^@/.*", "^#/.*"],
                "newlinesBetween": "always",
                "order": "asc",
                "type": "natural"
            }],
            "perfectionist/sort-interfaces": ["error", natural],
            "perfectionist/sort-intersection-types": ["error", { "order": "asc", "type": "line-length" }],
            "perfectionist/sort-jsx-props": ["error", {
                "groups": ["multiline", "shorthand", "unknown"],
                "order": "asc",
                "type": "natural"
            }],
            "perfectionist/sort-named-exports": ["error", natural],
            "perfectionist/sort-named-imports": ["error", natural],
            "perfectionist/sort-object-types": ["error", natural],
            "perfectionist/sort-objects": ["error", natural],
            "perfectionist/sort-union-types": ["error", natural]
        }))?;

        Ok(vec![
            ConfigFragment::named(fragment_name("perfectionist", "setup"))
                .plugin("perfectionist", plugin)
                .rules(rules),
        ])
    }
}
