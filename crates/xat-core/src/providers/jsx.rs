use super::{FragmentProvider, ProviderContext, fragment_name};
use crate::fragment::ConfigFragment;
use crate::globs::GLOB_JSX;
use crate::result::Result;
use async_trait::async_trait;
use serde_json::json;

/// Enables JSX parsing for JSX sources
pub struct JsxProvider;

#[async_trait]
impl FragmentProvider for JsxProvider {
    fn name(&self) -> &'static str {
        "jsx"
    }

    async fn provide(&self, _ctx: &ProviderContext) -> Result<Vec<ConfigFragment>> {
        Ok(vec![
            ConfigFragment::named(fragment_name("jsx", "setup"))
                .files([GLOB_JSX])
                .language_options(json!({
                    "parserOptions": {
                        "ecmaFeatures": { "jsx": true }
                    }
                })),
        ])
    }
}
