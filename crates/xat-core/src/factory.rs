//! End-to-end composition: options in, finalized fragment sequence out

use crate::compose::{
    ComposeTask, Composer, RenameTable, SuppressionSet, rename_sequence, suppress_autofix,
};
use crate::error::XatError;
use crate::fragment::{ConfigFragment, FragmentSequence};
use crate::options::{ComposeOptions, resolve_options, validate_options};
use crate::plugin::{ManifestPluginLoader, PluginLoader};
use crate::probe::{ProjectManifest, is_in_editor_env};
use crate::providers::{ProviderContext, builtin_providers};
use crate::result::Result;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

type EditorDetectorFn = Box<dyn FnOnce() -> bool + Send>;

/// Builder for one composition call.
///
/// ```no_run
/// # async fn run() -> xat_core::Result<()> {
/// use xat_core::{ComposeOptions, ConfigFactory};
///
/// let options = ComposeOptions::from_value(serde_json::json!({ "react": true }))?;
/// let sequence = ConfigFactory::new(options).build().await?;
/// println!("{:?}", sequence.names());
/// # Ok(())
/// # }
/// ```
pub struct ConfigFactory {
    options: ComposeOptions,
    user_configs: Vec<ComposeTask>,
    loader: Option<Arc<dyn PluginLoader>>,
    manifest: Option<Arc<ProjectManifest>>,
    cwd: Option<PathBuf>,
    renames: RenameTable,
    suppressions: SuppressionSet,
    detect_editor: EditorDetectorFn,
}

impl ConfigFactory {
    pub fn new(options: ComposeOptions) -> Self {
        Self {
            options,
            user_configs: Vec::new(),
            loader: None,
            manifest: None,
            cwd: None,
            renames: RenameTable::default(),
            suppressions: SuppressionSet::default(),
            detect_editor: Box::new(is_in_editor_env),
        }
    }

    /// Append user fragments after every built-in fragment
    pub fn with_config(mut self, config: impl Into<ComposeTask>) -> Self {
        self.user_configs.push(config.into());
        self
    }

    pub fn with_configs<I, T>(mut self, configs: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ComposeTask>,
    {
        self.user_configs.extend(configs.into_iter().map(Into::into));
        self
    }

    pub fn with_loader(mut self, loader: Arc<dyn PluginLoader>) -> Self {
        self.loader = Some(loader);
        self
    }

    /// Use this manifest instead of reading `package.json` from the working directory
    pub fn with_manifest(mut self, manifest: ProjectManifest) -> Self {
        self.manifest = Some(Arc::new(manifest));
        self
    }

    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    pub fn with_renames(mut self, renames: RenameTable) -> Self {
        self.renames = renames;
        self
    }

    pub fn with_suppressions(mut self, suppressions: SuppressionSet) -> Self {
        self.suppressions = suppressions;
        self
    }

    /// Replace environment-based editor detection; only consulted when
    /// `isInEditor` is absent from the options
    pub fn with_editor_detector(mut self, detect: impl FnOnce() -> bool + Send + 'static) -> Self {
        self.detect_editor = Box::new(detect);
        self
    }

    pub async fn build(self) -> Result<FragmentSequence> {
        let ConfigFactory {
            options,
            user_configs,
            loader,
            manifest,
            cwd,
            renames,
            suppressions,
            detect_editor,
        } = self;

        validate_options(&options)?;

        let cwd = match cwd {
            Some(cwd) => cwd,
            None => std::env::current_dir().map_err(|e| XatError::io_error(".", e))?,
        };
        let manifest = match manifest {
            Some(manifest) => manifest,
            None => Arc::new(ProjectManifest::load(&cwd).await),
        };
        let loader = loader.unwrap_or_else(|| Arc::new(ManifestPluginLoader::new(manifest.clone())));

        let resolved = resolve_options(&options, manifest.as_ref(), detect_editor)?;
        let ctx = ProviderContext::new(loader, manifest, cwd);

        let mut composer = Composer::new();
        composer.extend(
            builtin_providers(&resolved)
                .into_iter()
                .map(|provider| ComposeTask::from_provider(provider, ctx.clone())),
        );
        debug!(
            "Queued {} built-in providers and {} user configs",
            composer.len(),
            user_configs.len()
        );
        composer.extend(user_configs);

        let mut sequence = composer.compose().await?;

        if resolved.auto_rename_plugins {
            sequence = rename_sequence(sequence, &renames);
        }
        if resolved.is_in_editor {
            sequence = suppress_autofix(sequence, &suppressions);
        }

        if let Some(global) = resolved.global {
            let mut fragments = sequence.into_vec();
            fragments.push(global);
            sequence = FragmentSequence::new(fragments);
        }

        info!("Composed {} configuration fragments", sequence.len());
        Ok(sequence)
    }
}

/// Compose with default loader, manifest and editor detection
pub async fn compose_config(
    options: ComposeOptions,
    user_configs: Vec<ConfigFragment>,
) -> Result<FragmentSequence> {
    ConfigFactory::new(options)
        .with_config(user_configs)
        .build()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use crate::plugin::StaticPluginLoader;
    use crate::rule::RuleEntry;
    use serde_json::json;
    use tempfile::TempDir;

    fn options(value: serde_json::Value) -> ComposeOptions {
        ComposeOptions::from_value(value).unwrap()
    }

    fn factory(value: serde_json::Value, dir: &TempDir) -> ConfigFactory {
        ConfigFactory::new(options(value))
            .with_loader(Arc::new(StaticPluginLoader::permissive()))
            .with_manifest(ProjectManifest::empty())
            .with_cwd(dir.path())
            .with_editor_detector(|| false)
    }

    #[tokio::test]
    async fn test_user_configs_follow_builtins() {
        let dir = TempDir::new().unwrap();
        let sequence = factory(json!({ "gitignore": false }), &dir)
            .with_config(ConfigFragment::named("user/first"))
            .with_config(vec![ConfigFragment::named("user/second")])
            .build()
            .await
            .unwrap();

        let names = sequence.names();
        assert_eq!(&names[names.len() - 2..], ["user/first", "user/second"]);
        assert!(names.iter().any(|n| n.starts_with("xat/disables/")));
    }

    #[tokio::test]
    async fn test_global_fragment_trails_everything() {
        let dir = TempDir::new().unwrap();
        let sequence = factory(
            json!({ "gitignore": false, "rules": { "@typescript-eslint/no-explicit-any": "off" } }),
            &dir,
        )
        .with_config(ConfigFragment::named("user"))
        .build()
        .await
        .unwrap();

        let last = sequence.as_slice().last().unwrap();
        assert_eq!(last.name.as_deref(), Some("xat/global"));
        // appended after the rename pass
        assert!(last.rules.contains_key("@typescript-eslint/no-explicit-any"));
    }

    #[tokio::test]
    async fn test_editor_mode_suppresses_autofix() {
        let dir = TempDir::new().unwrap();
        let sequence = factory(json!({ "gitignore": false, "isInEditor": true }), &dir)
            .build()
            .await
            .unwrap();

        let rules = sequence.effective_rules_for("src/index.ts");
        assert!(!rules["unused-imports/no-unused-imports"].autofix);
        assert!(rules["unused-imports/no-unused-imports"].is_active());

        let sequence = factory(json!({ "gitignore": false, "isInEditor": false }), &dir)
            .build()
            .await
            .unwrap();
        assert!(sequence.effective_rules_for("src/index.ts")["unused-imports/no-unused-imports"].autofix);
    }

    #[tokio::test]
    async fn test_auto_rename_can_be_disabled() {
        let dir = TempDir::new().unwrap();
        let user = ConfigFragment::named("user").rule("@stylistic/semi", RuleEntry::error());

        let renamed = factory(json!({ "gitignore": false }), &dir)
            .with_config(user.clone())
            .build()
            .await
            .unwrap();
        assert!(renamed.find("user").unwrap().rules.contains_key("style/semi"));

        let untouched = factory(json!({ "gitignore": false, "autoRenamePlugins": false }), &dir)
            .with_config(user)
            .build()
            .await
            .unwrap();
        assert!(untouched.find("user").unwrap().rules.contains_key("@stylistic/semi"));
    }

    #[tokio::test]
    async fn test_missing_plugin_fails_composition() {
        let dir = TempDir::new().unwrap();
        let err = factory(json!({ "gitignore": false, "astro": true }), &dir)
            .with_loader(Arc::new(StaticPluginLoader::permissive().deny("eslint-plugin-astro")))
            .build()
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Dependency);
    }
}
