use super::{FragmentProvider, ProviderContext, fragment_name};
use crate::fragment::ConfigFragment;
use crate::globs::GLOB_YAML;
use crate::options::{Quotes, StylisticOptions};
use crate::result::Result;
use crate::rule::{RuleTable, apply_overrides, parse_rule_table};
use async_trait::async_trait;
use serde_json::json;

pub struct YamlProvider {
    overrides: RuleTable,
    stylistic: Option<StylisticOptions>,
}

impl YamlProvider {
    pub fn new(overrides: RuleTable, stylistic: Option<StylisticOptions>) -> Self {
        Self {
            overrides,
            stylistic,
        }
    }
}

#[async_trait]
impl FragmentProvider for YamlProvider {
    fn name(&self) -> &'static str {
        "yaml"
    }

    async fn provide(&self, ctx: &ProviderContext) -> Result<Vec<ConfigFragment>> {
        let (plugin, parser) = futures::try_join!(
            ctx.plugin("yaml", "eslint-plugin-yml"),
            ctx.plugin("yaml", "yaml-eslint-parser"),
        )?;

        let mut rules = parse_rule_table(json!({
            "style/spaced-comment": "off",
            "yaml/block-mapping": "error",
            "yaml/block-sequence": "error",
            "yaml/no-empty-key": "error",
            "yaml/no-empty-sequence-entry": "error",
            "yaml/no-irregular-whitespace": "error",
            "yaml/plain-scalar": "error",
            "yaml/vue-custom-block/no-parsing-error": "error"
        }))?;

        if let Some(stylistic) = &self.stylistic {
            // YAML cannot be indented with tabs
            let width = stylistic.indent.width();
            let quote = match stylistic.quotes {
                Quotes::Double => "double",
                Quotes::Single | Quotes::Backtick => "single",
            };
            apply_overrides(
                &mut rules,
                &parse_rule_table(json!({
                    "yaml/block-mapping-question-indicator-newline": "error",
                    "yaml/block-sequence-hyphen-indicator-newline": "error",
                    "yaml/flow-mapping-curly-newline": "error",
                    "yaml/flow-mapping-curly-spacing": "error",
                    "yaml/flow-sequence-bracket-newline": "error",
                    "yaml/flow-sequence-bracket-spacing": "error",
                    "yaml/indent": ["error", width],
                    "yaml/key-spacing": "error",
                    "yaml/no-tab-indent": "error",
                    "yaml/quotes": ["error", { "avoidEscape": true, "prefer": quote }],
                    "yaml/spaced-comment": "error"
                }))?,
            );
        }
        apply_overrides(&mut rules, &self.overrides);

        Ok(vec![
            ConfigFragment::named(fragment_name("yaml", "setup")).plugin("yaml", plugin),
            ConfigFragment::named(fragment_name("yaml", "rules"))
                .files([GLOB_YAML])
                .language_options(json!({ "parser": parser.package }))
                .rules(rules),
        ])
    }
}
