//! Host project manifest (`package.json`)

use super::DependencyProbe;
use crate::error::XatError;
use crate::result::Result;
use indexmap::IndexMap;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

pub const MANIFEST_FILE: &str = "package.json";

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct PackageJson {
    name: Option<String>,
    dependencies: IndexMap<String, String>,
    dev_dependencies: IndexMap<String, String>,
    peer_dependencies: IndexMap<String, String>,
    optional_dependencies: IndexMap<String, String>,
}

/// Dependencies declared by the project being linted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectManifest {
    pub name: Option<String>,
    dependencies: IndexMap<String, String>,
}

impl ProjectManifest {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a manifest from `(package, version)` pairs
    pub fn from_dependencies<K, V, I>(deps: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            name: None,
            dependencies: deps.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    /// Parse `package.json` content; every dependency group is merged, earlier
    /// groups winning on duplicates
    pub fn parse(content: &str) -> Result<Self> {
        let raw: PackageJson = serde_json::from_str(content)
            .map_err(|e| XatError::config_error(format!("Invalid {MANIFEST_FILE}: {e}")))?;

        let mut dependencies = raw.dependencies;
        for group in [
            raw.dev_dependencies,
            raw.peer_dependencies,
            raw.optional_dependencies,
        ] {
            for (name, version) in group {
                dependencies.entry(name).or_insert(version);
            }
        }

        Ok(Self {
            name: raw.name,
            dependencies,
        })
    }

    /// Load `package.json` from `dir`.
    ///
    /// A missing or unparsable manifest yields an empty one.
    pub async fn load(dir: &Path) -> Self {
        let path = dir.join(MANIFEST_FILE);
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) => {
                debug!("No project manifest at {}: {}", path.display(), e);
                return Self::empty();
            }
        };

        match Self::parse(&content) {
            Ok(manifest) => {
                debug!(
                    "Loaded {} with {} dependencies",
                    path.display(),
                    manifest.dependencies.len()
                );
                manifest
            }
            Err(e) => {
                debug!("Ignoring unreadable manifest {}: {}", path.display(), e);
                Self::empty()
            }
        }
    }

    /// Declared version range of a dependency
    pub fn version_of(&self, name: &str) -> Option<&str> {
        self.dependencies.get(name).map(String::as_str)
    }

    pub fn dependency_names(&self) -> impl Iterator<Item = &str> {
        self.dependencies.keys().map(String::as_str)
    }
}

impl DependencyProbe for ProjectManifest {
    fn has_dependency(&self, name: &str) -> bool {
        self.dependencies.contains_key(name)
    }
}
