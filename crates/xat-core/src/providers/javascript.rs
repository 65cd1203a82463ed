use super::{FragmentProvider, ProviderContext, fragment_name};
use crate::fragment::ConfigFragment;
use crate::result::Result;
use crate::rule::{RuleTable, apply_overrides, parse_rule_table};
use async_trait::async_trait;
use serde_json::json;

/// Core JavaScript rules, language globals and unused-import cleanup
pub struct JavascriptProvider {
    overrides: RuleTable,
}

impl JavascriptProvider {
    pub fn new(overrides: RuleTable) -> Self {
        Self { overrides }
    }
}

#[async_trait]
impl FragmentProvider for JavascriptProvider {
    fn name(&self) -> &'static str {
        "javascript"
    }

    async fn provide(&self, ctx: &ProviderContext) -> Result<Vec<ConfigFragment>> {
        let unused_imports = ctx
            .plugin("javascript", "eslint-plugin-unused-imports")
            .await?;
        let antfu = ctx.plugin("javascript", "eslint-plugin-antfu").await?;

        let mut rules = parse_rule_table(json!({
            "accessor-pairs": ["error", { "enforceForClassMembers": true, "setWithoutGet": true }],
            "array-callback-return": "error",
            "block-scoped-var": "error",
            "constructor-super": "error",
            "default-case-last": "error",
            "dot-notation": ["error", { "allowKeywords": true }],
            "eqeqeq": ["error", "smart"],
            "new-cap": ["error", { "capIsNew": false, "newIsCap": true, "properties": true }],
            "no-alert": "error",
            "no-array-constructor": "error",
            "no-async-promise-executor": "error",
            "no-caller": "error",
            "no-case-declarations": "error",
            "no-class-assign": "error",
            "no-compare-neg-zero": "error",
            "no-cond-assign": ["error", "always"],
            "no-console": ["error", { "allow": ["warn", "error"] }],
            "no-const-assign": "error",
            "no-debugger": "error",
            "no-dupe-class-members": "error",
            "no-dupe-keys": "error",
            "no-duplicate-case": "error",
            "no-empty": ["error", { "allowEmptyCatch": true }],
            "no-eval": "error",
            "no-fallthrough": "error",
            "no-implied-eval": "error",
            "no-new-func": "error",
            "no-redeclare": ["error", { "builtinGlobals": false }],
            "no-restricted-globals": [
                "error",
                { "message": "Use `globalThis` instead.", "name": "global" },
                { "message": "Use `globalThis` instead.", "name": "self" }
            ],
            "no-self-compare": "error",
            "no-shadow-restricted-names": "error",
            "no-throw-literal": "error",
            "no-undef": "error",
            "no-unreachable": "error",
            "no-unused-expressions": [
                "error",
                { "allowShortCircuit": true, "allowTaggedTemplates": true, "allowTernary": true }
            ],
            "no-unused-vars": "off",
            "no-use-before-define": ["error", { "classes": false, "functions": false, "variables": true }],
            "no-useless-constructor": "error",
            "no-var": "error",
            "object-shorthand": ["error", "always", { "avoidQuotes": true, "ignoreConstructors": false }],
            "one-var": ["error", { "initialized": "never" }],
            "prefer-arrow-callback": ["error", { "allowNamedFunctions": false, "allowUnboundThis": true }],
            "prefer-const": ["error", { "destructuring": "all", "ignoreReadBeforeAssign": true }],
            "prefer-rest-params": "error",
            "prefer-spread": "error",
            "prefer-template": "error",
            "symbol-description": "error",
            "unused-imports/no-unused-imports": "error",
            "unused-imports/no-unused-vars": [
                "error",
                {
                    "args": "after-used",
                    "argsIgnorePattern": "^_",
                    "ignoreRestSiblings": true,
                    "vars": "all",
                    "varsIgnorePattern": "^_"
                }
            ],
            "use-isnan": ["error", { "enforceForIndexOf": true, "enforceForSwitchCase": true }],
            "valid-typeof": ["error", { "requireStringLiterals": true }],
            "vars-on-top": "error",
            "yoda": ["error", "never"]
        }))?;
        apply_overrides(&mut rules, &self.overrides);

        Ok(vec![
            ConfigFragment::named(fragment_name("javascript", "setup")).language_options(json!({
                "ecmaVersion": "latest",
                "sourceType": "module",
                "parserOptions": {
                    "ecmaFeatures": { "jsx": true },
                    "ecmaVersion": "latest",
                    "sourceType": "module"
                }
            })),
            ConfigFragment::named(fragment_name("javascript", "rules"))
                .linter_options(json!({ "reportUnusedDisableDirectives": true }))
                .plugin("antfu", antfu)
                .plugin("unused-imports", unused_imports)
                .rules(rules),
        ])
    }
}
