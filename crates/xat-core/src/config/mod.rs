//! Config files
//!
//! A config file holds the options object and any extra fragments to append
//! after the built-in ones:
//!
//! ```json
//! {
//!   "options": { "typescript": { "tsconfigPath": "tsconfig.json" }, "react": true },
//!   "configs": [
//!     { "files": ["scripts/**"], "rules": { "no-console": "off" } }
//!   ]
//! }
//! ```

pub mod loader;

pub use loader::{CONFIG_FILE_NAMES, ConfigLoader};

use crate::error::XatError;
use crate::fragment::ConfigFragment;
use crate::options::ComposeOptions;
use crate::result::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct XatConfigFile {
    pub options: ComposeOptions,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub configs: Vec<ConfigFragment>,
}

impl XatConfigFile {
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| XatError::config_error(e.to_string()))
    }
}
