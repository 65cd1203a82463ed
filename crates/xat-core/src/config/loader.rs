//! Configuration file discovery and loading

use super::XatConfigFile;
use crate::error::XatError;
use crate::result::Result;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Config file names in discovery priority order
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".xatrc.json",
    ".xatrc.jsonc",
    ".xatrc.toml",
    "xat.config.yaml",
    "xat.config.yml",
    "xat.config.json",
];

/// Configuration loader for discovering and loading config files
pub struct ConfigLoader;

impl ConfigLoader {
    /// Auto-discover a config file by walking upward from `start_path`.
    ///
    /// Each directory is searched for [`CONFIG_FILE_NAMES`] in order; the
    /// first hit wins. Returns `None` once the filesystem root is passed.
    pub fn auto_discover(start_path: &Path) -> Result<Option<PathBuf>> {
        let mut current = start_path
            .canonicalize()
            .map_err(|e| XatError::io_error(start_path, e))?;

        loop {
            for filename in CONFIG_FILE_NAMES {
                let config_path = current.join(filename);
                if config_path.is_file() {
                    tracing::debug!("Found config: {}", config_path.display());
                    return Ok(Some(config_path));
                }
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => break,
            }
        }

        Ok(None)
    }

    /// Load configuration from a specific file.
    ///
    /// The format follows the extension: `.json`, `.jsonc` (comments and
    /// trailing commas allowed), `.toml`, `.yaml`/`.yml`.
    pub fn load_from_file(path: &Path) -> Result<XatConfigFile> {
        let content = std::fs::read_to_string(path).map_err(|e| XatError::io_error(path, e))?;
        let ext = path.extension().and_then(|e| e.to_str());

        let parsed: std::result::Result<Value, String> = match ext {
            Some("json") => serde_json::from_str(&content).map_err(|e| e.to_string()),
            Some("jsonc") => json5::from_str(&content).map_err(|e| e.to_string()),
            Some("toml") => toml::from_str(&content).map_err(|e| e.to_string()),
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content).map_err(|e| e.to_string()),
            _ => Err("unsupported file extension (expected .json, .jsonc, .toml, .yaml or .yml)".to_string()),
        };

        let value = parsed.map_err(|e| {
            XatError::config_error(format!(
                "Failed to load config from '{}': {}",
                path.display(),
                e
            ))
        })?;

        XatConfigFile::from_value(value).map_err(|e| {
            XatError::config_error(format!("Invalid config '{}': {}", path.display(), e))
        })
    }

    /// Load config from `custom_path`, or auto-discover from `start_dir`
    /// (default: the current directory).
    ///
    /// An explicit path that does not exist is an error; finding nothing
    /// during discovery is not.
    pub fn load(custom_path: Option<&Path>, start_dir: Option<&Path>) -> Result<Option<XatConfigFile>> {
        let config_path = match custom_path {
            Some(path) => {
                if !path.exists() {
                    return Err(XatError::config_error(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                path.to_path_buf()
            }
            None => {
                let search_dir = start_dir.unwrap_or_else(|| Path::new("."));
                match Self::auto_discover(search_dir)? {
                    Some(path) => path,
                    None => {
                        tracing::debug!(
                            "No config file found ({}); using defaults",
                            CONFIG_FILE_NAMES.join(", ")
                        );
                        return Ok(None);
                    }
                }
            }
        };

        Self::load_from_file(&config_path).map(Some)
    }
}
