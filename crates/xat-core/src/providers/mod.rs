//! Fragment providers
//!
//! Each provider owns one concern (a language, a file type or a plugin
//! family) and turns its resolved options into fragments. Providers are
//! independent: none reads another's output, and overlapping globs are
//! settled by the order providers are listed in [`builtin_providers`].
//!
//! Fragment names follow `xat/<feature>/<part>`.

mod astro;
mod comments;
mod disables;
mod formatters;
mod gitignore;
mod ignores;
mod imports;
mod javascript;
mod jsdoc;
mod jsonc;
mod jsx;
mod markdown;
mod nextjs;
mod node;
mod paths;
mod perfectionist;
mod react;
mod regexp;
mod stylistic;
mod toml;
mod typescript;
mod unicorn;
mod yaml;

pub use astro::AstroProvider;
pub use comments::CommentsProvider;
pub use disables::DisablesProvider;
pub use formatters::FormattersProvider;
pub use gitignore::{GitignoreProvider, gitignore_to_globs};
pub use ignores::IgnoresProvider;
pub use imports::ImportsProvider;
pub use javascript::JavascriptProvider;
pub use jsdoc::JsdocProvider;
pub use jsonc::{JsoncProvider, SortPackageJsonProvider, SortTsconfigProvider};
pub use jsx::JsxProvider;
pub use markdown::MarkdownProvider;
pub use nextjs::NextjsProvider;
pub use node::NodeProvider;
pub use paths::PathsProvider;
pub use perfectionist::PerfectionistProvider;
pub use react::ReactProvider;
pub use regexp::RegexpProvider;
pub use stylistic::StylisticProvider;
pub use test::TestProvider;
pub use toml::TomlProvider;
pub use typescript::TypeScriptProvider;
pub use unicorn::UnicornProvider;
pub use yaml::YamlProvider;

use crate::fragment::{ConfigFragment, PluginHandle};
use crate::options::ResolvedOptions;
use crate::plugin::PluginLoader;
use crate::probe::ProjectManifest;
use crate::result::Result;
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;

/// Read-only context shared by every provider of one composition call
#[derive(Clone)]
pub struct ProviderContext {
    pub loader: Arc<dyn PluginLoader>,
    pub manifest: Arc<ProjectManifest>,
    pub cwd: PathBuf,
}

impl ProviderContext {
    pub fn new(
        loader: Arc<dyn PluginLoader>,
        manifest: Arc<ProjectManifest>,
        cwd: impl Into<PathBuf>,
    ) -> Self {
        Self {
            loader,
            manifest,
            cwd: cwd.into(),
        }
    }

    pub async fn plugin(&self, feature: &str, package: &str) -> Result<PluginHandle> {
        self.loader.load(feature, package).await
    }
}

/// Produces the fragments of one feature
#[async_trait]
pub trait FragmentProvider: Send + Sync {
    /// Every fragment this provider yields is named under `xat/<name>`
    fn name(&self) -> &'static str;

    async fn provide(&self, ctx: &ProviderContext) -> Result<Vec<ConfigFragment>>;
}

/// Fragment name for `part` of `feature`
pub(crate) fn fragment_name(feature: &str, part: &str) -> String {
    format!("xat/{feature}/{part}")
}

/// Built-in providers for `options`, in composition order.
///
/// Disabled features contribute no provider at all.
pub fn builtin_providers(options: &ResolvedOptions) -> Vec<Box<dyn FragmentProvider>> {
    let stylistic = options.stylistic.clone();
    let mut providers: Vec<Box<dyn FragmentProvider>> = Vec::new();

    if let Some(gitignore) = &options.gitignore {
        providers.push(Box::new(GitignoreProvider::new(gitignore.clone())));
    }

    providers.push(Box::new(IgnoresProvider::new(options.ignores.clone())));
    providers.push(Box::new(JavascriptProvider::new(
        options.javascript.overrides.clone(),
    )));
    providers.push(Box::new(CommentsProvider));
    providers.push(Box::new(NodeProvider));
    providers.push(Box::new(JsdocProvider::new(stylistic.is_some())));

    if let Some(imports) = &options.imports {
        providers.push(Box::new(ImportsProvider::new(
            stylistic.is_some(),
            imports.overrides.clone(),
        )));
    }

    providers.push(Box::new(PerfectionistProvider));

    if let Some(unicorn) = &options.unicorn {
        providers.push(Box::new(UnicornProvider::new(unicorn.clone())));
    }

    if options.jsx {
        providers.push(Box::new(JsxProvider));
    }

    if let Some(typescript) = &options.typescript {
        providers.push(Box::new(TypeScriptProvider::new(
            typescript.clone(),
            options.component_exts.clone(),
            options.project_type,
        )));
    }

    if let Some(stylistic) = &stylistic {
        providers.push(Box::new(StylisticProvider::new(stylistic.clone())));
    }

    if let Some(regexp) = &options.regexp {
        providers.push(Box::new(RegexpProvider::new(regexp.clone())));
    }

    if let Some(test) = &options.test {
        providers.push(Box::new(TestProvider::new(test.overrides.clone())));
    }

    if let Some(react) = &options.react {
        providers.push(Box::new(ReactProvider::new(
            react.overrides.clone(),
            options.tsconfig_path().map(str::to_string),
        )));
    }

    if let Some(nextjs) = &options.nextjs {
        providers.push(Box::new(NextjsProvider::new(nextjs.clone())));
    }

    if let Some(astro) = &options.astro {
        providers.push(Box::new(AstroProvider::new(
            astro.overrides.clone(),
            stylistic.is_some(),
        )));
    }

    if options.paths {
        providers.push(Box::new(PathsProvider));
    }

    if let Some(jsonc) = &options.jsonc {
        providers.push(Box::new(JsoncProvider::new(
            jsonc.overrides.clone(),
            stylistic.clone(),
        )));
        providers.push(Box::new(SortPackageJsonProvider));
        providers.push(Box::new(SortTsconfigProvider));
    }

    if let Some(yaml) = &options.yaml {
        providers.push(Box::new(YamlProvider::new(
            yaml.overrides.clone(),
            stylistic.clone(),
        )));
    }

    if let Some(toml) = &options.toml {
        providers.push(Box::new(TomlProvider::new(
            toml.overrides.clone(),
            stylistic.clone(),
        )));
    }

    if let Some(markdown) = &options.markdown {
        providers.push(Box::new(MarkdownProvider::new(
            markdown.overrides.clone(),
            options.component_exts.clone(),
        )));
    }

    if let Some(formatters) = &options.formatters {
        providers.push(Box::new(FormattersProvider::new(
            formatters.clone(),
            options.stylistic_or_default(),
        )));
    }

    providers.push(Box::new(DisablesProvider));
    providers
}
