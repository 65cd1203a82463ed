//! xat core
//!
//! Assembles a linter's flat configuration from feature-scoped fragments.
//! Options are resolved into per-feature records, each enabled feature's
//! provider yields its fragments, and the composer concatenates them in a
//! fixed order. User fragments follow the built-in ones. Plugin prefixes
//! are then renamed, autofix is suppressed for selected rules in editor
//! mode, and the global fragment built from top-level flat-config
//! properties is appended last.

#![recursion_limit = "256"]

pub mod compose;
pub mod config;
pub mod error;
pub mod factory;
pub mod fragment;
pub mod globs;
pub mod options;
pub mod plugin;
pub mod probe;
pub mod providers;
pub mod result;
pub mod rule;

pub use compose::{
    ComposeTask, Composer, RenameTable, SuppressionSet, compose, rename_rules, rename_sequence,
    suppress_autofix,
};
pub use config::{ConfigLoader, XatConfigFile};
pub use error::{ErrorKind, XatError};
pub use factory::{ConfigFactory, compose_config};
pub use fragment::{ConfigFragment, FragmentSequence, PluginHandle};
pub use options::{
    ComposeOptions, FeatureToggle, GLOBAL_FRAGMENT_NAME, ResolvedOptions, resolve_options,
    validate_options,
};
pub use plugin::{ManifestPluginLoader, PluginLoader, StaticPluginLoader};
pub use probe::{DependencyProbe, ProjectManifest, is_in_editor_env};
pub use providers::{FragmentProvider, ProviderContext, builtin_providers};
pub use result::Result;
pub use rule::{RuleEntry, RuleSeverity, RuleTable};

/// Initialize the tracing subscriber for logging
pub fn init_tracing() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("xat=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
