use super::{FragmentProvider, ProviderContext, fragment_name};
use crate::fragment::ConfigFragment;
use crate::globs::{GLOB_ASTRO, GLOB_ASTRO_TS, GLOB_BARREL, GLOB_MARKDOWN_CODE, GLOB_SRC};
use crate::result::Result;
use crate::rule::RuleEntry;
use async_trait::async_trait;

/// Prefer path aliases over deep relative imports
pub struct PathsProvider;

#[async_trait]
impl FragmentProvider for PathsProvider {
    fn name(&self) -> &'static str {
        "paths"
    }

    async fn provide(&self, ctx: &ProviderContext) -> Result<Vec<ConfigFragment>> {
        let plugin = ctx
            .plugin("paths", "@limegrass/eslint-plugin-import-alias")
            .await?;

        Ok(vec![
            ConfigFragment::named(fragment_name("paths", "setup")).plugin("paths", plugin),
            ConfigFragment::named(fragment_name("paths", "import-alias"))
                .files([GLOB_SRC, GLOB_ASTRO])
                .ignores([GLOB_BARREL, GLOB_MARKDOWN_CODE, GLOB_ASTRO_TS])
                .rule("paths/import-alias", RuleEntry::error()),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::tests::test_context;

    #[tokio::test]
    async fn test_barrels_are_exempt() {
        let fragments = PathsProvider.provide(&test_context()).await.unwrap();
        let alias = &fragments[1];

        assert!(alias.applies_to("src/components/button.ts"));
        assert!(alias.applies_to("src/pages/index.astro"));
        assert!(!alias.applies_to("src/components/index.ts"));
        assert!(!alias.applies_to("README.md/0.ts"));
    }
}
