//! Code style rules built from indent, quote and semicolon preferences

use super::{FragmentProvider, ProviderContext, fragment_name};
use crate::fragment::ConfigFragment;
use crate::options::{Indent, StylisticOptions};
use crate::result::Result;
use crate::rule::{RuleEntry, RuleTable, apply_overrides, parse_rule_table};
use async_trait::async_trait;
use serde_json::json;

pub struct StylisticProvider {
    options: StylisticOptions,
}

impl StylisticProvider {
    pub fn new(options: StylisticOptions) -> Self {
        Self { options }
    }

    /// Rules derived from the style preferences, under the `style` namespace
    fn customized(&self) -> Result<RuleTable> {
        let StylisticOptions {
            indent,
            quotes,
            semi,
            ..
        } = &self.options;

        let mut rules = parse_rule_table(json!({
            "style/array-bracket-spacing": ["error", "never"],
            "style/arrow-parens": ["error", "as-needed", { "requireForBlockBody": true }],
            "style/arrow-spacing": ["error", { "after": true, "before": true }],
            "style/block-spacing": ["error", "always"],
            "style/brace-style": ["error", "stroustrup", { "allowSingleLine": true }],
            "style/comma-dangle": ["error", "always-multiline"],
            "style/comma-spacing": ["error", { "after": true, "before": false }],
            "style/comma-style": ["error", "last"],
            "style/computed-property-spacing": ["error", "never", { "enforceForClassMembers": true }],
            "style/dot-location": ["error", "property"],
            "style/eol-last": "error",
            "style/indent": ["error", indent.to_value(), {
                "ignoreComments": false,
                "offsetTernaryExpressions": true,
                "SwitchCase": 1
            }],
            "style/indent-binary-ops": ["error", indent.to_value()],
            "style/key-spacing": ["error", { "afterColon": true, "beforeColon": false }],
            "style/keyword-spacing": ["error", { "after": true, "before": true }],
            "style/lines-between-class-members": ["error", "always", { "exceptAfterSingleLine": true }],
            "style/max-statements-per-line": ["error", { "max": 1 }],
            "style/member-delimiter-style": ["error", {
                "multiline": { "delimiter": if *semi { "semi" } else { "none" }, "requireLast": *semi },
                "singleline": { "delimiter": if *semi { "semi" } else { "comma" }, "requireLast": false }
            }],
            "style/multiline-ternary": ["error", "always-multiline"],
            "style/no-mixed-operators": "error",
            "style/no-mixed-spaces-and-tabs": "error",
            "style/no-multi-spaces": "error",
            "style/no-multiple-empty-lines": ["error", { "max": 1, "maxBOF": 0, "maxEOF": 0 }],
            "style/no-trailing-spaces": "error",
            "style/object-curly-spacing": ["error", "always"],
            "style/operator-linebreak": ["error", "before"],
            "style/padded-blocks": ["error", { "blocks": "never", "classes": "never", "switches": "never" }],
            "style/quote-props": ["error", "consistent-as-needed"],
            "style/quotes": ["error", quotes.as_str(), {
                "allowTemplateLiterals": "always",
                "avoidEscape": false
            }],
            "style/rest-spread-spacing": ["error", "never"],
            "style/semi": ["error", if *semi { "always" } else { "never" }],
            "style/semi-spacing": ["error", { "after": true, "before": false }],
            "style/space-before-blocks": ["error", "always"],
            "style/space-before-function-paren": ["error", {
                "anonymous": "always",
                "asyncArrow": "always",
                "named": "never"
            }],
            "style/space-in-parens": ["error", "never"],
            "style/space-infix-ops": "error",
            "style/space-unary-ops": ["error", { "nonwords": false, "words": true }],
            "style/spaced-comment": ["error", "always"],
            "style/template-curly-spacing": "error",
            "style/type-annotation-spacing": ["error", {}]
        }))?;

        let no_tabs = match indent {
            Indent::Tab => RuleEntry::off(),
            Indent::Spaces(_) => RuleEntry::error(),
        };
        rules.insert("style/no-tabs".to_string(), no_tabs);

        if self.options.jsx_enabled() {
            apply_overrides(
                &mut rules,
                &parse_rule_table(json!({
                    "style/jsx-closing-bracket-location": "error",
                    "style/jsx-closing-tag-location": "error",
                    "style/jsx-curly-brace-presence": ["error", { "propElementValues": "always" }],
                    "style/jsx-curly-newline": "error",
                    "style/jsx-curly-spacing": ["error", "never"],
                    "style/jsx-equals-spacing": "error",
                    "style/jsx-first-prop-new-line": "error",
                    "style/jsx-function-call-newline": ["error", "multiline"],
                    "style/jsx-indent-props": ["error", indent.to_value()],
                    "style/jsx-max-props-per-line": ["error", { "maximum": 1, "when": "multiline" }],
                    "style/jsx-one-expression-per-line": ["error", { "allow": "single-child" }],
                    "style/jsx-quotes": "error",
                    "style/jsx-tag-spacing": ["error", {
                        "afterOpening": "never",
                        "beforeClosing": "never",
                        "beforeSelfClosing": "always",
                        "closingSlash": "never"
                    }],
                    "style/jsx-wrap-multilines": ["error", {
                        "arrow": "parens-new-line",
                        "assignment": "parens-new-line",
                        "condition": "parens-new-line",
                        "declaration": "parens-new-line",
                        "logical": "parens-new-line",
                        "prop": "parens-new-line",
                        "propertyValue": "parens-new-line",
                        "return": "parens-new-line"
                    }]
                }))?,
            );
        }

        Ok(rules)
    }
}

#[async_trait]
impl FragmentProvider for StylisticProvider {
    fn name(&self) -> &'static str {
        "stylistic"
    }

    async fn provide(&self, ctx: &ProviderContext) -> Result<Vec<ConfigFragment>> {
        let (antfu, style) = futures::try_join!(
            ctx.plugin("stylistic", "eslint-plugin-antfu"),
            ctx.plugin("stylistic", "@stylistic/eslint-plugin"),
        )?;

        let mut rules = self.customized()?;
        apply_overrides(
            &mut rules,
            &parse_rule_table(json!({
                "antfu/consistent-chaining": "error",
                "antfu/consistent-list-newline": "error",
                "antfu/curly": "error",
                "antfu/if-newline": "error",
                "antfu/top-level-function": "error",
                "style/generator-star-spacing": ["error", { "after": true, "before": false }],
                "style/padding-line-between-statements": [
                    "error",
                    { "blankLine": "always", "next": "*", "prev": "import" },
                    { "blankLine": "any", "next": "import", "prev": "import" }
                ],
                "style/yield-star-spacing": ["error", { "after": true, "before": false }]
            }))?,
        );
        apply_overrides(&mut rules, &self.options.overrides);

        Ok(vec![
            ConfigFragment::named(fragment_name("stylistic", "rules"))
                .plugin("antfu", antfu)
                .plugin("style", style)
                .rules(rules),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Quotes;
    use crate::providers::tests::test_context;
    use crate::rule::RuleSeverity;

    async fn rules_for(options: StylisticOptions) -> RuleTable {
        let mut fragments = StylisticProvider::new(options)
            .provide(&test_context())
            .await
            .unwrap();
        fragments.remove(0).rules
    }

    #[tokio::test]
    async fn test_defaults() {
        let rules = rules_for(StylisticOptions::default()).await;

        assert_eq!(rules["style/indent"].options[0], "tab");
        assert_eq!(rules["style/quotes"].options[0], "single");
        assert_eq!(rules["style/semi"].options[0], "never");
        assert_eq!(rules["style/no-tabs"].severity, RuleSeverity::Off);
        assert!(rules.contains_key("style/jsx-quotes"));
        assert!(rules.contains_key("antfu/top-level-function"));
    }

    #[tokio::test]
    async fn test_custom_preferences() {
        let rules = rules_for(StylisticOptions {
            indent: Indent::Spaces(4),
            quotes: Quotes::Double,
            semi: true,
            jsx: Some(false),
            ..Default::default()
        })
        .await;

        assert_eq!(rules["style/indent"].options[0], 4);
        assert_eq!(rules["style/quotes"].options[0], "double");
        assert_eq!(rules["style/semi"].options[0], "always");
        assert_eq!(rules["style/no-tabs"].severity, RuleSeverity::Error);
        assert!(!rules.contains_key("style/jsx-quotes"));
    }

    #[tokio::test]
    async fn test_overrides_win() {
        let mut options = StylisticOptions::default();
        options
            .overrides
            .insert("style/semi".to_string(), RuleEntry::off());
        let rules = rules_for(options).await;
        assert_eq!(rules["style/semi"].severity, RuleSeverity::Off);
    }
}
