use super::{FragmentProvider, ProviderContext};
use crate::fragment::ConfigFragment;
use crate::globs::GLOB_EXCLUDE;
use crate::result::Result;
use async_trait::async_trait;

/// Global ignores: well-known build output plus user globs
pub struct IgnoresProvider {
    extra: Vec<String>,
}

impl IgnoresProvider {
    pub fn new(extra: Vec<String>) -> Self {
        Self { extra }
    }
}

#[async_trait]
impl FragmentProvider for IgnoresProvider {
    fn name(&self) -> &'static str {
        "ignores"
    }

    async fn provide(&self, _ctx: &ProviderContext) -> Result<Vec<ConfigFragment>> {
        let ignores = GLOB_EXCLUDE
            .iter()
            .map(|g| g.to_string())
            .chain(self.extra.iter().cloned());

        Ok(vec![ConfigFragment::named("xat/ignores").ignores(ignores)])
    }
}
