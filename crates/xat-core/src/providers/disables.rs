use super::{FragmentProvider, ProviderContext, fragment_name};
use crate::fragment::ConfigFragment;
use crate::globs::{GLOB_SRC, GLOB_SRC_EXT};
use crate::result::Result;
use crate::rule::parse_rule_table;
use async_trait::async_trait;
use serde_json::json;

/// Relaxations for scripts, CLIs, declaration files and tool configs.
/// Always listed last so it overrides every built-in provider.
pub struct DisablesProvider;

#[async_trait]
impl FragmentProvider for DisablesProvider {
    fn name(&self) -> &'static str {
        "disables"
    }

    async fn provide(&self, _ctx: &ProviderContext) -> Result<Vec<ConfigFragment>> {
        let scripts = parse_rule_table(json!({
            "antfu/no-top-level-await": "off",
            "no-console": "off",
            "ts/explicit-function-return-type": "off"
        }))?;

        Ok(vec![
            ConfigFragment::named(fragment_name("disables", "scripts"))
                .files([format!("**/scripts/{GLOB_SRC}")])
                .rules(scripts.clone()),
            ConfigFragment::named(fragment_name("disables", "cli"))
                .files([format!("**/cli/{GLOB_SRC}"), format!("**/cli.{GLOB_SRC_EXT}")])
                .rules(parse_rule_table(json!({
                    "antfu/no-top-level-await": "off",
                    "no-console": "off"
                }))?),
            ConfigFragment::named(fragment_name("disables", "bin"))
                .files(["**/bin/**/*".to_string(), format!("**/bin.{GLOB_SRC_EXT}")])
                .rules(parse_rule_table(json!({
                    "antfu/no-import-dist": "off",
                    "antfu/no-import-node-modules-by-path": "off"
                }))?),
            ConfigFragment::named(fragment_name("disables", "dts"))
                .files(["**/*.d.{,c,m}ts"])
                .rules(parse_rule_table(json!({
                    "eslint-comments/no-unlimited-disable": "off",
                    "no-restricted-syntax": "off",
                    "unused-imports/no-unused-vars": "off"
                }))?),
            ConfigFragment::named(fragment_name("disables", "cjs"))
                .files(["**/*.js", "**/*.cjs"])
                .rules(parse_rule_table(json!({ "ts/no-require-imports": "off" }))?),
            ConfigFragment::named(fragment_name("disables", "config-files"))
                .files([
                    format!("**/*.config.{GLOB_SRC_EXT}"),
                    format!("**/*.config.*.{GLOB_SRC_EXT}"),
                ])
                .rules(scripts),
        ])
    }
}
