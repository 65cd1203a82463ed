use super::{FragmentProvider, ProviderContext, fragment_name};
use crate::fragment::ConfigFragment;
use crate::globs::GLOB_TOML;
use crate::options::StylisticOptions;
use crate::result::Result;
use crate::rule::{RuleTable, apply_overrides, parse_rule_table};
use async_trait::async_trait;
use serde_json::json;

pub struct TomlProvider {
    overrides: RuleTable,
    stylistic: Option<StylisticOptions>,
}

impl TomlProvider {
    pub fn new(overrides: RuleTable, stylistic: Option<StylisticOptions>) -> Self {
        Self {
            overrides,
            stylistic,
        }
    }
}

#[async_trait]
impl FragmentProvider for TomlProvider {
    fn name(&self) -> &'static str {
        "toml"
    }

    async fn provide(&self, ctx: &ProviderContext) -> Result<Vec<ConfigFragment>> {
        let (plugin, parser) = futures::try_join!(
            ctx.plugin("toml", "eslint-plugin-toml"),
            ctx.plugin("toml", "toml-eslint-parser"),
        )?;

        let mut rules = parse_rule_table(json!({
            "style/spaced-comment": "off",
            "toml/comma-style": "error",
            "toml/keys-order": "error",
            "toml/no-space-dots": "error",
            "toml/no-unreadable-number-separator": "error",
            "toml/precision-of-fractional-seconds": "error",
            "toml/precision-of-integer": "error",
            "toml/tables-order": "error",
            "toml/vue-custom-block/no-parsing-error": "error"
        }))?;

        if let Some(stylistic) = &self.stylistic {
            apply_overrides(
                &mut rules,
                &parse_rule_table(json!({
                    "toml/array-bracket-newline": "error",
                    "toml/array-bracket-spacing": "error",
                    "toml/array-element-newline": "error",
                    "toml/indent": ["error", stylistic.indent.to_value()],
                    "toml/inline-table-curly-spacing": "error",
                    "toml/key-spacing": "error",
                    "toml/padding-line-between-pairs": "error",
                    "toml/padding-line-between-tables": "error",
                    "toml/quoted-keys": "error",
                    "toml/spaced-comment": "error",
                    "toml/table-bracket-spacing": "error"
                }))?,
            );
        }
        apply_overrides(&mut rules, &self.overrides);

        Ok(vec![
            ConfigFragment::named(fragment_name("toml", "setup")).plugin("toml", plugin),
            ConfigFragment::named(fragment_name("toml", "rules"))
                .files([GLOB_TOML])
                .language_options(json!({ "parser": parser.package }))
                .rules(rules),
        ])
    }
}
