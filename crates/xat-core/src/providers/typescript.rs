//! TypeScript parser setup and rules, with optional type-aware linting

use super::{FragmentProvider, ProviderContext, fragment_name};
use crate::compose::{RenameTable, rename_rules};
use crate::fragment::ConfigFragment;
use crate::globs::{GLOB_ASTRO_TS, GLOB_MARKDOWN, GLOB_TS, GLOB_TSX};
use crate::options::{ProjectType, TypeScriptOptions};
use crate::probe::DependencyProbe;
use crate::result::Result;
use crate::rule::{RuleEntry, RuleTable, apply_overrides, parse_rule_table};
use async_trait::async_trait;
use serde_json::{Map, Value, json};

const NESTJS_PACKAGES: &[&str] = &[
    "@nestjs/common",
    "@nestjs/core",
    "@nestjs/platform-express",
    "@nestjs/platform-fastify",
];

pub struct TypeScriptProvider {
    options: TypeScriptOptions,
    component_exts: Vec<String>,
    project_type: ProjectType,
}

impl TypeScriptProvider {
    pub fn new(
        options: TypeScriptOptions,
        component_exts: Vec<String>,
        project_type: ProjectType,
    ) -> Self {
        Self {
            options,
            component_exts,
            project_type,
        }
    }

    fn files(&self) -> Vec<String> {
        self.options.files.clone().unwrap_or_else(|| {
            [GLOB_TS.to_string(), GLOB_TSX.to_string()]
                .into_iter()
                .chain(self.component_exts.iter().map(|ext| format!("**/*.{ext}")))
                .collect()
        })
    }

    fn files_type_aware(&self) -> Vec<String> {
        self.options
            .files_type_aware
            .clone()
            .unwrap_or_else(|| vec![GLOB_TS.to_string(), GLOB_TSX.to_string()])
    }

    fn ignores_type_aware(&self) -> Vec<String> {
        self.options.ignores_type_aware.clone().unwrap_or_else(|| {
            vec![format!("{GLOB_MARKDOWN}/**"), GLOB_ASTRO_TS.to_string()]
        })
    }

    fn parser_fragment(
        &self,
        ctx: &ProviderContext,
        parser: &str,
        type_aware: bool,
        files: Vec<String>,
        ignores: Vec<String>,
    ) -> ConfigFragment {
        let mut parser_options = Map::new();
        parser_options.insert(
            "extraFileExtensions".to_string(),
            self.component_exts
                .iter()
                .map(|ext| Value::from(format!(".{ext}")))
                .collect(),
        );
        parser_options.insert("projectService".to_string(), Value::from(type_aware));
        if ctx.manifest.has_any_dependency(NESTJS_PACKAGES) {
            parser_options.insert("emitDecoratorMetadata".to_string(), Value::from(true));
            parser_options.insert("experimentalDecorators".to_string(), Value::from(true));
        }
        parser_options.insert("sourceType".to_string(), Value::from("module"));
        if type_aware {
            parser_options.insert(
                "projectService".to_string(),
                json!({
                    "allowDefaultProject": ["./*.js"],
                    "defaultProject": self.options.tsconfig_path,
                }),
            );
            parser_options.insert(
                "tsconfigRootDir".to_string(),
                Value::from(ctx.cwd.to_string_lossy().into_owned()),
            );
        }
        if let Some(extra) = &self.options.parser_options {
            parser_options.extend(extra.clone());
        }

        let part = if type_aware {
            "type-aware-parser"
        } else {
            "parser"
        };
        ConfigFragment::named(fragment_name("typescript", part))
            .files(files)
            .ignores(ignores)
            .language_options(json!({
                "parser": parser,
                "parserOptions": parser_options,
            }))
    }

    fn rules(&self) -> Result<RuleTable> {
        let upstream = RenameTable::new([("@typescript-eslint", "ts")])?;

        let mut rules = rename_rules(&eslint_recommended_overrides()?, &upstream);
        apply_overrides(&mut rules, &rename_rules(&strict_preset()?, &upstream));
        apply_overrides(
            &mut rules,
            &parse_rule_table(json!({
                "no-dupe-class-members": "off",
                "no-redeclare": "off",
                "no-use-before-define": "off",
                "no-useless-constructor": "off",
                "ts/ban-ts-comment": ["error", { "ts-expect-error": "allow-with-description" }],
                "ts/consistent-type-definitions": ["error", "interface"],
                "ts/consistent-type-imports": ["error", {
                    "disallowTypeAnnotations": false,
                    "fixStyle": "separate-type-imports",
                    "prefer": "type-imports"
                }],
                "ts/method-signature-style": ["error", "property"],
                "ts/no-dupe-class-members": "error",
                "ts/no-dynamic-delete": "off",
                "ts/no-empty-object-type": ["error", { "allowInterfaces": "always" }],
                "ts/no-explicit-any": "off",
                "ts/no-extraneous-class": "off",
                "ts/no-import-type-side-effects": "error",
                "ts/no-invalid-void-type": "off",
                "ts/no-non-null-assertion": "off",
                "ts/no-redeclare": ["error", { "builtinGlobals": false }],
                "ts/no-require-imports": "error",
                "ts/no-unused-expressions": ["error", {
                    "allowShortCircuit": true,
                    "allowTaggedTemplates": true,
                    "allowTernary": true
                }],
                "ts/no-unused-vars": "off",
                "ts/no-use-before-define": ["error", { "classes": false, "functions": false, "variables": true }],
                "ts/no-useless-constructor": "off",
                "ts/no-wrapper-object-types": "error",
                "ts/triple-slash-reference": "off",
                "ts/unified-signatures": "off"
            }))?,
        );

        if self.project_type == ProjectType::Lib {
            rules.insert(
                "ts/explicit-function-return-type".to_string(),
                RuleEntry::error().with_option(json!({
                    "allowExpressions": true,
                    "allowHigherOrderFunctions": true,
                    "allowIIFEs": true
                })),
            );
        }

        apply_overrides(&mut rules, &self.options.overrides);
        Ok(rules)
    }

    fn type_aware_rules(&self) -> Result<RuleTable> {
        let mut rules = parse_rule_table(json!({
            "dot-notation": "off",
            "no-implied-eval": "off",
            "ts/await-thenable": "error",
            "ts/dot-notation": ["error", { "allowKeywords": true }],
            "ts/no-floating-promises": "error",
            "ts/no-for-in-array": "error",
            "ts/no-implied-eval": "error",
            "ts/no-misused-promises": "error",
            "ts/no-unnecessary-type-assertion": "error",
            "ts/no-unsafe-argument": "error",
            "ts/no-unsafe-assignment": "error",
            "ts/no-unsafe-call": "error",
            "ts/no-unsafe-member-access": "error",
            "ts/no-unsafe-return": "error",
            "ts/promise-function-async": "error",
            "ts/restrict-plus-operands": "error",
            "ts/restrict-template-expressions": "error",
            "ts/return-await": ["error", "in-try-catch"],
            "ts/strict-boolean-expressions": ["error", { "allowNullableBoolean": true, "allowNullableObject": true }],
            "ts/switch-exhaustiveness-check": "error",
            "ts/unbound-method": "error"
        }))?;
        apply_overrides(&mut rules, &self.options.overrides_type_aware);
        Ok(rules)
    }
}

/// Core rules the upstream plugin turns off for TypeScript sources
fn eslint_recommended_overrides() -> Result<RuleTable> {
    parse_rule_table(json!({
        "constructor-super": "off",
        "getter-return": "off",
        "no-class-assign": "off",
        "no-const-assign": "off",
        "no-dupe-keys": "off",
        "no-func-assign": "off",
        "no-import-assign": "off",
        "no-new-native-nonconstructor": "off",
        "no-obj-calls": "off",
        "no-redeclare": "off",
        "no-setter-return": "off",
        "no-this-before-super": "off",
        "no-undef": "off",
        "no-unreachable": "off",
        "no-unsafe-negation": "off",
        "no-var": "error",
        "no-with": "off",
        "prefer-const": "error",
        "prefer-rest-params": "error",
        "prefer-spread": "error"
    }))
}

/// Upstream `strict` preset, in the plugin's own namespace
fn strict_preset() -> Result<RuleTable> {
    parse_rule_table(json!({
        "@typescript-eslint/ban-ts-comment": ["error", { "minimumDescriptionLength": 10 }],
        "@typescript-eslint/no-array-constructor": "error",
        "@typescript-eslint/no-duplicate-enum-values": "error",
        "@typescript-eslint/no-dynamic-delete": "error",
        "@typescript-eslint/no-empty-object-type": "error",
        "@typescript-eslint/no-explicit-any": "error",
        "@typescript-eslint/no-extra-non-null-assertion": "error",
        "@typescript-eslint/no-extraneous-class": "error",
        "@typescript-eslint/no-invalid-void-type": "error",
        "@typescript-eslint/no-misused-new": "error",
        "@typescript-eslint/no-namespace": "error",
        "@typescript-eslint/no-non-null-asserted-nullish-coalescing": "error",
        "@typescript-eslint/no-non-null-asserted-optional-chain": "error",
        "@typescript-eslint/no-non-null-assertion": "error",
        "@typescript-eslint/no-require-imports": "error",
        "@typescript-eslint/no-this-alias": "error",
        "@typescript-eslint/no-unnecessary-type-constraint": "error",
        "@typescript-eslint/no-unsafe-declaration-merging": "error",
        "@typescript-eslint/no-unsafe-function-type": "error",
        "no-unused-expressions": "off",
        "@typescript-eslint/no-unused-expressions": "error",
        "no-unused-vars": "off",
        "@typescript-eslint/no-unused-vars": "error",
        "no-useless-constructor": "off",
        "@typescript-eslint/no-useless-constructor": "error",
        "@typescript-eslint/no-wrapper-object-types": "error",
        "@typescript-eslint/prefer-as-const": "error",
        "@typescript-eslint/prefer-literal-enum-member": "error",
        "@typescript-eslint/prefer-namespace-keyword": "error",
        "@typescript-eslint/triple-slash-reference": "error",
        "@typescript-eslint/unified-signatures": "error"
    }))
}

#[async_trait]
impl FragmentProvider for TypeScriptProvider {
    fn name(&self) -> &'static str {
        "typescript"
    }

    async fn provide(&self, ctx: &ProviderContext) -> Result<Vec<ConfigFragment>> {
        let (plugin, antfu, parser) = futures::try_join!(
            ctx.plugin("typescript", "@typescript-eslint/eslint-plugin"),
            ctx.plugin("typescript", "eslint-plugin-antfu"),
            ctx.plugin("typescript", "@typescript-eslint/parser"),
        )?;

        let files = self.files();
        let type_aware = self.options.is_type_aware();

        // Plugins are registered without globs so later fragments can use them
        let mut fragments = vec![
            ConfigFragment::named(fragment_name("typescript", "setup"))
                .plugin("antfu", antfu)
                .plugin("ts", plugin),
            self.parser_fragment(ctx, &parser.package, false, files.clone(), Vec::new()),
        ];

        if type_aware {
            fragments.push(self.parser_fragment(
                ctx,
                &parser.package,
                true,
                self.files_type_aware(),
                self.ignores_type_aware(),
            ));
        }

        fragments.push(
            ConfigFragment::named(fragment_name("typescript", "rules"))
                .files(files)
                .rules(self.rules()?),
        );

        if type_aware {
            fragments.push(
                ConfigFragment::named(fragment_name("typescript", "rules-type-aware"))
                    .files(self.files_type_aware())
                    .ignores(self.ignores_type_aware())
                    .rules(self.type_aware_rules()?),
            );
        }

        Ok(fragments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::StaticPluginLoader;
    use crate::probe::ProjectManifest;
    use crate::providers::tests::test_context;
    use crate::rule::RuleSeverity;
    use std::sync::Arc;

    fn names(fragments: &[ConfigFragment]) -> Vec<&str> {
        fragments.iter().filter_map(|f| f.name.as_deref()).collect()
    }

    #[tokio::test]
    async fn test_plain_typescript_fragments() {
        let provider =
            TypeScriptProvider::new(TypeScriptOptions::default(), vec![], ProjectType::App);
        let fragments = provider.provide(&test_context()).await.unwrap();

        assert_eq!(
            names(&fragments),
            vec![
                "xat/typescript/setup",
                "xat/typescript/parser",
                "xat/typescript/rules"
            ]
        );
        assert!(fragments[0].files.is_empty());

        let rules = &fragments[2].rules;
        assert!(rules.keys().all(|id| !id.starts_with("@typescript-eslint/")));
        assert_eq!(rules["ts/no-explicit-any"].severity, RuleSeverity::Off);
        assert!(!rules.contains_key("ts/explicit-function-return-type"));
    }

    #[tokio::test]
    async fn test_type_aware_adds_parser_and_rules() {
        let options = TypeScriptOptions {
            tsconfig_path: Some("tsconfig.json".to_string()),
            ..Default::default()
        };
        let provider = TypeScriptProvider::new(options, vec!["vue".to_string()], ProjectType::Lib);
        let fragments = provider.provide(&test_context()).await.unwrap();

        assert_eq!(
            names(&fragments),
            vec![
                "xat/typescript/setup",
                "xat/typescript/parser",
                "xat/typescript/type-aware-parser",
                "xat/typescript/rules",
                "xat/typescript/rules-type-aware"
            ]
        );
        assert!(fragments[1].files.contains(&"**/*.vue".to_string()));
        assert_eq!(
            fragments[2].language_options.as_ref().unwrap()["parserOptions"]["projectService"]
                ["defaultProject"],
            "tsconfig.json"
        );
        assert!(fragments[3].rules.contains_key("ts/explicit-function-return-type"));
        assert_eq!(fragments[4].ignores, vec!["**/*.md/**", "**/*.astro/*.ts"]);
    }

    #[tokio::test]
    async fn test_nestjs_enables_decorators() {
        let ctx = ProviderContext::new(
            Arc::new(StaticPluginLoader::permissive()),
            Arc::new(ProjectManifest::from_dependencies([("@nestjs/core", "^10.0.0")])),
            std::env::temp_dir(),
        );
        let provider =
            TypeScriptProvider::new(TypeScriptOptions::default(), vec![], ProjectType::App);
        let fragments = provider.provide(&ctx).await.unwrap();

        let parser_options = &fragments[1].language_options.as_ref().unwrap()["parserOptions"];
        assert_eq!(parser_options["experimentalDecorators"], true);
        assert_eq!(parser_options["emitDecoratorMetadata"], true);
    }

    #[tokio::test]
    async fn test_missing_parser_fails() {
        let ctx = ProviderContext::new(
            Arc::new(StaticPluginLoader::permissive().deny("@typescript-eslint/parser")),
            Arc::new(ProjectManifest::empty()),
            std::env::temp_dir(),
        );
        let provider =
            TypeScriptProvider::new(TypeScriptOptions::default(), vec![], ProjectType::App);
        assert!(provider.provide(&ctx).await.is_err());
    }
}
