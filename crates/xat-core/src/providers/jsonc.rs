//! JSON, JSON5 and JSONC files, plus key ordering for `package.json` and
//! `tsconfig.json`

use super::{FragmentProvider, ProviderContext, fragment_name};
use crate::fragment::ConfigFragment;
use crate::globs::{GLOB_JSON, GLOB_JSON5, GLOB_JSONC};
use crate::options::StylisticOptions;
use crate::result::Result;
use crate::rule::{RuleEntry, RuleTable, apply_overrides, parse_rule_table};
use async_trait::async_trait;
use serde_json::json;

pub struct JsoncProvider {
    overrides: RuleTable,
    stylistic: Option<StylisticOptions>,
}

impl JsoncProvider {
    pub fn new(overrides: RuleTable, stylistic: Option<StylisticOptions>) -> Self {
        Self {
            overrides,
            stylistic,
        }
    }
}

#[async_trait]
impl FragmentProvider for JsoncProvider {
    fn name(&self) -> &'static str {
        "jsonc"
    }

    async fn provide(&self, ctx: &ProviderContext) -> Result<Vec<ConfigFragment>> {
        let (plugin, parser) = futures::try_join!(
            ctx.plugin("jsonc", "eslint-plugin-jsonc"),
            ctx.plugin("jsonc", "jsonc-eslint-parser"),
        )?;

        let mut rules = parse_rule_table(json!({
            "jsonc/no-bigint-literals": "error",
            "jsonc/no-binary-expression": "error",
            "jsonc/no-binary-numeric-literals": "error",
            "jsonc/no-dupe-keys": "error",
            "jsonc/no-escape-sequence-in-identifier": "error",
            "jsonc/no-floating-decimal": "error",
            "jsonc/no-hexadecimal-numeric-literals": "error",
            "jsonc/no-infinity": "error",
            "jsonc/no-multi-str": "error",
            "jsonc/no-nan": "error",
            "jsonc/no-number-props": "error",
            "jsonc/no-numeric-separators": "error",
            "jsonc/no-octal": "error",
            "jsonc/no-octal-escape": "error",
            "jsonc/no-octal-numeric-literals": "error",
            "jsonc/no-parenthesized": "error",
            "jsonc/no-plus-sign": "error",
            "jsonc/no-regexp-literals": "error",
            "jsonc/no-sparse-arrays": "error",
            "jsonc/no-template-literals": "error",
            "jsonc/no-undefined-value": "error",
            "jsonc/no-unicode-codepoint-escapes": "error",
            "jsonc/no-useless-escape": "error",
            "jsonc/space-unary-ops": "error",
            "jsonc/valid-json-number": "error",
            "jsonc/vue-custom-block/no-parsing-error": "error"
        }))?;

        if let Some(stylistic) = &self.stylistic {
            apply_overrides(
                &mut rules,
                &parse_rule_table(json!({
                    "jsonc/array-bracket-spacing": ["error", "never"],
                    "jsonc/comma-dangle": ["error", "never"],
                    "jsonc/comma-style": ["error", "last"],
                    "jsonc/indent": ["error", stylistic.indent.to_value()],
                    "jsonc/key-spacing": ["error", { "afterColon": true, "beforeColon": false }],
                    "jsonc/object-curly-newline": ["error", { "consistent": true, "multiline": true }],
                    "jsonc/object-curly-spacing": ["error", "always"],
                    "jsonc/object-property-newline": ["error", { "allowMultiplePropertiesPerLine": true }],
                    "jsonc/quote-props": "error",
                    "jsonc/quotes": "error"
                }))?,
            );
        }
        apply_overrides(&mut rules, &self.overrides);

        Ok(vec![
            ConfigFragment::named(fragment_name("jsonc", "setup")).plugin("jsonc", plugin),
            ConfigFragment::named(fragment_name("jsonc", "rules"))
                .files([GLOB_JSON, GLOB_JSON5, GLOB_JSONC])
                .language_options(json!({ "parser": parser.package }))
                .rules(rules),
        ])
    }
}

fn sort_keys(order: serde_json::Value, path_pattern: &str) -> RuleEntry {
    RuleEntry::error()
        .with_option(json!({ "order": order, "pathPattern": path_pattern }))
}

/// Canonical key order for `package.json`
pub struct SortPackageJsonProvider;

#[async_trait]
impl FragmentProvider for SortPackageJsonProvider {
    fn name(&self) -> &'static str {
        "jsonc/sort-package-json"
    }

    async fn provide(&self, _ctx: &ProviderContext) -> Result<Vec<ConfigFragment>> {
        let mut sort_keys_rule = sort_keys(
            json!([
                "publisher", "name", "displayName", "type", "version", "private",
                "packageManager", "description", "author", "contributors", "license",
                "funding", "homepage", "repository", "bugs", "keywords", "categories",
                "sideEffects", "imports", "exports", "main", "module", "unpkg", "jsdelivr",
                "types", "typesVersions", "bin", "icon", "files", "engines",
                "activationEvents", "contributes", "scripts", "peerDependencies",
                "peerDependenciesMeta", "dependencies", "optionalDependencies",
                "devDependencies", "pnpm", "overrides", "resolutions", "husky",
                "simple-git-hooks", "lint-staged", "eslintConfig"
            ]),
            "^$",
        );
        for (pattern, order) in [
            (
                "^(?:dev|peer|optional|bundled)?[Dd]ependencies(Meta)?$",
                json!({ "type": "asc" }),
            ),
            ("^(?:resolutions|overrides|pnpm.overrides)$", json!({ "type": "asc" })),
            (
                "^exports.*$",
                json!(["types", "import", "require", "default"]),
            ),
            (
                "^(?:gitHooks|husky|simple-git-hooks)$",
                json!([
                    "pre-commit", "prepare-commit-msg", "commit-msg", "post-commit",
                    "pre-rebase", "post-rewrite", "post-checkout", "post-merge",
                    "pre-push", "pre-auto-gc"
                ]),
            ),
        ] {
            sort_keys_rule = sort_keys_rule
                .with_option(json!({ "order": order, "pathPattern": pattern }));
        }

        Ok(vec![
            ConfigFragment::named("xat/jsonc/sort-package-json")
                .files(["**/package.json"])
                .rule(
                    "jsonc/sort-array-values",
                    RuleEntry::error().with_option(json!({
                        "order": { "type": "asc" },
                        "pathPattern": "^files$"
                    })),
                )
                .rule("jsonc/sort-keys", sort_keys_rule),
        ])
    }
}

/// Canonical key order for `tsconfig.json`
pub struct SortTsconfigProvider;

#[async_trait]
impl FragmentProvider for SortTsconfigProvider {
    fn name(&self) -> &'static str {
        "jsonc/sort-tsconfig"
    }

    async fn provide(&self, _ctx: &ProviderContext) -> Result<Vec<ConfigFragment>> {
        let rule = sort_keys(
            json!(["extends", "compilerOptions", "references", "files", "include", "exclude"]),
            "^$",
        )
        .with_option(json!({
            "order": [
                "incremental", "composite", "tsBuildInfoFile", "target", "jsx", "lib",
                "experimentalDecorators", "emitDecoratorMetadata", "baseUrl", "rootDir",
                "module", "moduleResolution", "paths", "resolveJsonModule", "types",
                "allowJs", "checkJs", "strict", "noImplicitAny", "strictNullChecks",
                "noUnusedLocals", "noUnusedParameters", "declaration", "declarationMap",
                "sourceMap", "outDir", "noEmit", "importHelpers", "isolatedModules",
                "verbatimModuleSyntax", "esModuleInterop", "forceConsistentCasingInFileNames",
                "skipLibCheck"
            ],
            "pathPattern": "^compilerOptions$"
        }));

        Ok(vec![
            ConfigFragment::named("xat/jsonc/sort-tsconfig")
                .files(["**/tsconfig.json", "**/tsconfig.*.json"])
                .rule("jsonc/sort-keys", rule),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::tests::test_context;

    #[tokio::test]
    async fn test_stylistic_rules_follow_indent() {
        let fragments = JsoncProvider::new(RuleTable::new(), Some(StylisticOptions::default()))
            .provide(&test_context())
            .await
            .unwrap();
        assert_eq!(fragments[1].rules["jsonc/indent"].options[0], "tab");

        let plain = JsoncProvider::new(RuleTable::new(), None)
            .provide(&test_context())
            .await
            .unwrap();
        assert!(!plain[1].rules.contains_key("jsonc/indent"));
    }

    #[tokio::test]
    async fn test_sort_package_json_scoped() {
        let fragments = SortPackageJsonProvider.provide(&test_context()).await.unwrap();
        let fragment = &fragments[0];

        assert!(fragment.applies_to("package.json"));
        assert!(fragment.applies_to("packages/a/package.json"));
        assert!(!fragment.applies_to("tsconfig.json"));
        assert_eq!(fragment.rules["jsonc/sort-keys"].options.len(), 5);
    }
}
