use super::{FragmentProvider, ProviderContext, fragment_name};
use crate::fragment::ConfigFragment;
use crate::globs::GLOB_ASTRO;
use crate::result::Result;
use crate::rule::{RuleEntry, RuleTable, apply_overrides, parse_rule_table};
use async_trait::async_trait;
use serde_json::json;

pub struct AstroProvider {
    overrides: RuleTable,
    stylistic: bool,
}

impl AstroProvider {
    pub fn new(overrides: RuleTable, stylistic: bool) -> Self {
        Self {
            overrides,
            stylistic,
        }
    }
}

#[async_trait]
impl FragmentProvider for AstroProvider {
    fn name(&self) -> &'static str {
        "astro"
    }

    async fn provide(&self, ctx: &ProviderContext) -> Result<Vec<ConfigFragment>> {
        let (plugin, parser) = futures::try_join!(
            ctx.plugin("astro", "eslint-plugin-astro"),
            ctx.plugin("astro", "astro-eslint-parser"),
        )?;

        let mut rules = parse_rule_table(json!({
            "astro/missing-client-only-directive-value": "error",
            "astro/no-conflict-set-directives": "error",
            "astro/no-deprecated-astro-canonicalurl": "error",
            "astro/no-deprecated-astro-fetchcontent": "error",
            "astro/no-deprecated-astro-resolve": "error",
            "astro/no-deprecated-getentrybyslug": "error",
            "astro/no-set-html-directive": "off",
            "astro/no-unused-define-vars-in-style": "error",
            "astro/semi": "off",
            "astro/valid-compile": "error"
        }))?;

        if self.stylistic {
            for id in [
                "style/indent",
                "style/jsx-closing-tag-location",
                "style/jsx-one-expression-per-line",
                "style/no-multiple-empty-lines",
            ] {
                rules.insert(id.to_string(), RuleEntry::off());
            }
        }
        apply_overrides(&mut rules, &self.overrides);

        Ok(vec![
            ConfigFragment::named(fragment_name("astro", "setup")).plugin("astro", plugin),
            ConfigFragment::named(fragment_name("astro", "rules"))
                .files([GLOB_ASTRO])
                .language_options(json!({
                    "parser": parser.package,
                    "parserOptions": {
                        "extraFileExtensions": [".astro"],
                        "parser": "@typescript-eslint/parser"
                    },
                    "sourceType": "module"
                }))
                .processor("astro/client-side-ts")
                .rules(rules),
        ])
    }
}
