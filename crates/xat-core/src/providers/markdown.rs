use super::{FragmentProvider, ProviderContext, fragment_name};
use crate::fragment::ConfigFragment;
use crate::globs::{GLOB_MARKDOWN, GLOB_MARKDOWN_CODE, GLOB_MARKDOWN_IN_MARKDOWN};
use crate::result::Result;
use crate::rule::{RuleTable, apply_overrides, parse_rule_table};
use async_trait::async_trait;
use serde_json::json;

/// Markdown files and the code blocks embedded in them
pub struct MarkdownProvider {
    overrides: RuleTable,
    component_exts: Vec<String>,
}

impl MarkdownProvider {
    pub fn new(overrides: RuleTable, component_exts: Vec<String>) -> Self {
        Self {
            overrides,
            component_exts,
        }
    }
}

#[async_trait]
impl FragmentProvider for MarkdownProvider {
    fn name(&self) -> &'static str {
        "markdown"
    }

    async fn provide(&self, ctx: &ProviderContext) -> Result<Vec<ConfigFragment>> {
        let plugin = ctx.plugin("markdown", "@eslint/markdown").await?;

        let code_files: Vec<String> = std::iter::once(GLOB_MARKDOWN_CODE.to_string())
            .chain(
                self.component_exts
                    .iter()
                    .map(|ext| format!("{GLOB_MARKDOWN}/**/*.{ext}")),
            )
            .collect();

        // Snippets are fragments of real code: relax rules that need the whole file
        let mut rules = parse_rule_table(json!({
            "antfu/no-top-level-await": "off",
            "no-alert": "off",
            "no-console": "off",
            "no-labels": "off",
            "no-lone-blocks": "off",
            "no-restricted-syntax": "off",
            "no-undef": "off",
            "no-unused-expressions": "off",
            "no-unused-labels": "off",
            "no-unused-vars": "off",
            "node/prefer-global/process": "off",
            "style/comma-dangle": "off",
            "style/eol-last": "off",
            "style/padding-line-between-statements": "off",
            "ts/consistent-type-imports": "off",
            "ts/explicit-function-return-type": "off",
            "ts/no-namespace": "off",
            "ts/no-redeclare": "off",
            "ts/no-require-imports": "off",
            "ts/no-unused-expressions": "off",
            "ts/no-unused-vars": "off",
            "ts/no-use-before-define": "off",
            "unicode-bom": "off",
            "unused-imports/no-unused-imports": "off",
            "unused-imports/no-unused-vars": "off"
        }))?;
        apply_overrides(&mut rules, &self.overrides);

        Ok(vec![
            ConfigFragment::named(fragment_name("markdown", "setup")).plugin("markdown", plugin),
            ConfigFragment::named(fragment_name("markdown", "processor"))
                .files([GLOB_MARKDOWN])
                .ignores([GLOB_MARKDOWN_IN_MARKDOWN])
                .processor("markdown/markdown"),
            ConfigFragment::named(fragment_name("markdown", "disables/code"))
                .files(code_files)
                .language_options(json!({
                    "parserOptions": { "ecmaFeatures": { "impliedStrict": true } }
                }))
                .rules(rules),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::tests::test_context;

    #[tokio::test]
    async fn test_component_exts_extend_code_globs() {
        let fragments = MarkdownProvider::new(RuleTable::new(), vec!["vue".to_string()])
            .provide(&test_context())
            .await
            .unwrap();
        let code = &fragments[2];

        assert!(code.applies_to("README.md/0.ts"));
        assert!(code.applies_to("docs/guide.md/1.vue"));
        assert!(!code.applies_to("src/main.ts"));
        assert_eq!(fragments[1].processor.as_deref(), Some("markdown/markdown"));
    }
}
