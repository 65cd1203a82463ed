//! Plugin resolution
//!
//! Providers never reach for plugins directly; they ask a [`PluginLoader`]
//! for a [`PluginHandle`]. Plugins shipped with the config package always
//! resolve. Framework plugins are optional peers the host project must
//! install itself.

use crate::error::XatError;
use crate::fragment::PluginHandle;
use crate::probe::{DependencyProbe, ProjectManifest};
use crate::result::Result;
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, trace};

/// Packages shipped as direct dependencies of the config package
pub const BUNDLED_PACKAGES: &[&str] = &[
    "@eslint-community/eslint-plugin-eslint-comments",
    "@eslint/markdown",
    "@limegrass/eslint-plugin-import-alias",
    "@stylistic/eslint-plugin",
    "@typescript-eslint/eslint-plugin",
    "@typescript-eslint/parser",
    "@vitest/eslint-plugin",
    "eslint-plugin-antfu",
    "eslint-plugin-format",
    "eslint-plugin-import-lite",
    "eslint-plugin-jsdoc",
    "eslint-plugin-jsonc",
    "eslint-plugin-n",
    "eslint-plugin-no-only-tests",
    "eslint-plugin-perfectionist",
    "eslint-plugin-regexp",
    "eslint-plugin-toml",
    "eslint-plugin-unicorn",
    "eslint-plugin-unused-imports",
    "eslint-plugin-yml",
    "jsonc-eslint-parser",
    "toml-eslint-parser",
    "yaml-eslint-parser",
];

/// Optional peer packages, keyed by the feature that uses them
pub const OPTIONAL_PACKAGES: &[(&str, &[&str])] = &[
    ("astro", &["eslint-plugin-astro", "astro-eslint-parser"]),
    (
        "react",
        &[
            "@eslint-react/eslint-plugin",
            "eslint-plugin-react-hooks",
            "eslint-plugin-react-refresh",
        ],
    ),
    ("nextjs", &["@next/eslint-plugin-next"]),
    ("formatters", &["@prettier/plugin-xml"]),
];

pub fn is_bundled(package: &str) -> bool {
    BUNDLED_PACKAGES.contains(&package)
}

/// Optional packages a feature depends on
pub fn optional_packages(feature: &str) -> &'static [&'static str] {
    OPTIONAL_PACKAGES
        .iter()
        .find(|(name, _)| *name == feature)
        .map(|(_, packages)| *packages)
        .unwrap_or(&[])
}

/// Resolves plugin packages to handles
#[async_trait]
pub trait PluginLoader: Send + Sync {
    /// Load `package` on behalf of `feature`.
    ///
    /// Fails with [`XatError::MissingDependency`] when the package cannot be
    /// obtained.
    async fn load(&self, feature: &str, package: &str) -> Result<PluginHandle>;
}

/// Resolves bundled packages unconditionally and everything else through
/// the project manifest
pub struct ManifestPluginLoader {
    manifest: Arc<ProjectManifest>,
}

impl ManifestPluginLoader {
    pub fn new(manifest: Arc<ProjectManifest>) -> Self {
        Self { manifest }
    }
}

#[async_trait]
impl PluginLoader for ManifestPluginLoader {
    async fn load(&self, feature: &str, package: &str) -> Result<PluginHandle> {
        if is_bundled(package) {
            trace!("Resolved bundled plugin {} for {}", package, feature);
            return Ok(PluginHandle::new(package));
        }

        if !self.manifest.has_dependency(package) {
            debug!("Feature {} needs {}, which is not declared", feature, package);
            return Err(XatError::missing_dependency(feature, package));
        }

        let handle = match self.manifest.version_of(package) {
            Some(version) => PluginHandle::new(package).with_version(version),
            None => PluginHandle::new(package),
        };
        debug!("Resolved project plugin {} for {}", package, feature);
        Ok(handle)
    }
}

/// In-memory loader: resolves every package except the denied ones and
/// counts load attempts
#[derive(Default)]
pub struct StaticPluginLoader {
    denied: HashSet<String>,
    loads: AtomicUsize,
}

impl StaticPluginLoader {
    pub fn permissive() -> Self {
        Self::default()
    }

    /// Make `package` fail with a missing-dependency error
    pub fn deny(mut self, package: impl Into<String>) -> Self {
        self.denied.insert(package.into());
        self
    }

    /// Number of `load` calls served so far
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PluginLoader for StaticPluginLoader {
    async fn load(&self, feature: &str, package: &str) -> Result<PluginHandle> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        if self.denied.contains(package) {
            return Err(XatError::missing_dependency(feature, package));
        }
        Ok(PluginHandle::new(package))
    }
}
