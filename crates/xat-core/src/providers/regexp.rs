use super::{FragmentProvider, ProviderContext, fragment_name};
use crate::fragment::ConfigFragment;
use crate::options::{RegexpLevel, RegexpOptions};
use crate::result::Result;
use crate::rule::{RuleSeverity, apply_overrides, parse_rule_table};
use async_trait::async_trait;
use serde_json::json;

/// Regular expression correctness and style
pub struct RegexpProvider {
    options: RegexpOptions,
}

impl RegexpProvider {
    pub fn new(options: RegexpOptions) -> Self {
        Self { options }
    }
}

#[async_trait]
impl FragmentProvider for RegexpProvider {
    fn name(&self) -> &'static str {
        "regexp"
    }

    async fn provide(&self, ctx: &ProviderContext) -> Result<Vec<ConfigFragment>> {
        let plugin = ctx.plugin("regexp", "eslint-plugin-regexp").await?;

        let mut rules = parse_rule_table(json!({
            "regexp/confusing-quantifier": "warn",
            "regexp/control-character-escape": "error",
            "regexp/match-any": "error",
            "regexp/negation": "error",
            "regexp/no-contradiction-with-assertion": "error",
            "regexp/no-dupe-characters-character-class": "error",
            "regexp/no-empty-alternative": "warn",
            "regexp/no-empty-capturing-group": "error",
            "regexp/no-empty-group": "error",
            "regexp/no-invalid-regexp": "error",
            "regexp/no-lazy-ends": "warn",
            "regexp/no-misleading-unicode-character": "error",
            "regexp/no-super-linear-backtracking": "error",
            "regexp/no-useless-escape": "error",
            "regexp/no-useless-quantifier": "error",
            "regexp/optimal-quantifier-concatenation": "error",
            "regexp/prefer-character-class": "error",
            "regexp/prefer-d": "error",
            "regexp/prefer-plus-quantifier": "error",
            "regexp/prefer-question-quantifier": "error",
            "regexp/prefer-star-quantifier": "error",
            "regexp/prefer-w": "error",
            "regexp/strict": "error"
        }))?;

        if let Some(level) = self.options.level {
            let forced = match level {
                RegexpLevel::Error => RuleSeverity::Error,
                RegexpLevel::Warn => RuleSeverity::Warn,
            };
            for entry in rules.values_mut().filter(|entry| entry.is_active()) {
                entry.severity = forced;
            }
        }
        apply_overrides(&mut rules, &self.options.overrides);

        Ok(vec![
            ConfigFragment::named(fragment_name("regexp", "rules"))
                .plugin("regexp", plugin)
                .rules(rules),
        ])
    }
}
