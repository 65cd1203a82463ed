//! User options and their resolution
//!
//! Every feature key accepts `false` (off), `true` (on with defaults) or an
//! options object. Absent keys take the feature default, which for framework
//! features is a probe against the project manifest:
//!
//! ```json
//! {
//!   "typescript": { "tsconfigPath": "tsconfig.json" },
//!   "react": false,
//!   "stylistic": { "indent": 4, "quotes": "double" },
//!   "formatters": { "markdown": "dprint" }
//! }
//! ```

mod compose_options;
mod features;
mod resolver;
mod toggle;

pub use compose_options::ComposeOptions;
pub use features::{
    FormatterChoice, FormattersOptions, GitignoreOptions, Indent, NextjsOptions,
    OverridesOptions, ProjectType, Quotes, RegexpLevel, RegexpOptions, StylisticOptions,
    TypeScriptOptions, UnicornOptions,
};
pub use resolver::{GLOBAL_FRAGMENT_NAME, ResolvedOptions, resolve_options, validate_options};
pub use toggle::{FeatureOptions, FeatureToggle};
