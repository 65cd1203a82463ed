use super::{FragmentProvider, ProviderContext, fragment_name};
use crate::fragment::ConfigFragment;
use crate::options::UnicornOptions;
use crate::result::Result;
use crate::rule::{apply_overrides, parse_rule_table};
use async_trait::async_trait;
use serde_json::json;

pub struct UnicornProvider {
    options: UnicornOptions,
}

impl UnicornProvider {
    pub fn new(options: UnicornOptions) -> Self {
        Self { options }
    }
}

#[async_trait]
impl FragmentProvider for UnicornProvider {
    fn name(&self) -> &'static str {
        "unicorn"
    }

    async fn provide(&self, ctx: &ProviderContext) -> Result<Vec<ConfigFragment>> {
        let plugin = ctx.plugin("unicorn", "eslint-plugin-unicorn").await?;

        let mut rules = if self.options.all_recommended {
            parse_rule_table(json!({
                "unicorn/better-regex": "error",
                "unicorn/catch-error-name": "error",
                "unicorn/consistent-function-scoping": "error",
                "unicorn/error-message": "error",
                "unicorn/escape-case": "error",
                "unicorn/filename-case": ["error", { "case": "kebabCase" }],
                "unicorn/no-array-for-each": "error",
                "unicorn/no-array-reduce": "error",
                "unicorn/no-instanceof-array": "error",
                "unicorn/no-new-array": "error",
                "unicorn/no-new-buffer": "error",
                "unicorn/no-null": "error",
                "unicorn/no-useless-undefined": "error",
                "unicorn/number-literal-case": "error",
                "unicorn/prefer-dom-node-text-content": "error",
                "unicorn/prefer-includes": "error",
                "unicorn/prefer-node-protocol": "error",
                "unicorn/prefer-number-properties": "error",
                "unicorn/prefer-string-starts-ends-with": "error",
                "unicorn/prefer-type-error": "error",
                "unicorn/prevent-abbreviations": "error",
                "unicorn/throw-new-error": "error"
            }))?
        } else {
            parse_rule_table(json!({
                "unicorn/consistent-empty-array-spread": "error",
                "unicorn/error-message": "error",
                "unicorn/escape-case": "error",
                "unicorn/new-for-builtins": "error",
                "unicorn/no-instanceof-builtins": "error",
                "unicorn/no-new-array": "error",
                "unicorn/no-new-buffer": "error",
                "unicorn/number-literal-case": "error",
                "unicorn/prefer-dom-node-text-content": "error",
                "unicorn/prefer-includes": "error",
                "unicorn/prefer-node-protocol": "error",
                "unicorn/prefer-number-properties": "error",
                "unicorn/prefer-string-starts-ends-with": "error",
                "unicorn/prefer-type-error": "error",
                "unicorn/throw-new-error": "error"
            }))?
        };
        apply_overrides(&mut rules, &self.options.overrides);

        Ok(vec![
            ConfigFragment::named(fragment_name("unicorn", "rules"))
                .plugin("unicorn", plugin)
                .rules(rules),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::tests::test_context;

    #[tokio::test]
    async fn test_all_recommended_switches_table() {
        let curated = UnicornProvider::new(UnicornOptions::default())
            .provide(&test_context())
            .await
            .unwrap();
        let all = UnicornProvider::new(UnicornOptions {
            all_recommended: true,
            ..Default::default()
        })
        .provide(&test_context())
        .await
        .unwrap();

        assert!(!curated[0].rules.contains_key("unicorn/prevent-abbreviations"));
        assert!(all[0].rules.contains_key("unicorn/prevent-abbreviations"));
    }
}
