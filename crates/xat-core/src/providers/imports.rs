use super::{FragmentProvider, ProviderContext, fragment_name};
use crate::fragment::ConfigFragment;
use crate::result::Result;
use crate::rule::{RuleEntry, RuleTable, apply_overrides, parse_rule_table};
use async_trait::async_trait;
use serde_json::json;

/// Import statement hygiene
pub struct ImportsProvider {
    stylistic: bool,
    overrides: RuleTable,
}

impl ImportsProvider {
    pub fn new(stylistic: bool, overrides: RuleTable) -> Self {
        Self {
            stylistic,
            overrides,
        }
    }
}

#[async_trait]
impl FragmentProvider for ImportsProvider {
    fn name(&self) -> &'static str {
        "imports"
    }

    async fn provide(&self, ctx: &ProviderContext) -> Result<Vec<ConfigFragment>> {
        let (antfu, import) = futures::try_join!(
            ctx.plugin("imports", "eslint-plugin-antfu"),
            ctx.plugin("imports", "eslint-plugin-import-lite"),
        )?;

        let mut rules = parse_rule_table(json!({
            "antfu/import-dedupe": "error",
            "antfu/no-import-dist": "error",
            "antfu/no-import-node-modules-by-path": "error",
            "import/consistent-type-specifier-style": ["error", "top-level"],
            "import/first": "error",
            "import/no-duplicates": "error",
            "import/no-mutable-exports": "error",
            "import/no-named-default": "error"
        }))?;

        if self.stylistic {
            rules.insert(
                "import/newline-after-import".to_string(),
                RuleEntry::error().with_option(json!({ "count": 1 })),
            );
        }
        apply_overrides(&mut rules, &self.overrides);

        Ok(vec![
            ConfigFragment::named(fragment_name("imports", "rules"))
                .plugin("antfu", antfu)
                .plugin("import", import)
                .rules(rules),
        ])
    }
}
