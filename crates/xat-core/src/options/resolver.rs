//! Option Resolver: user options bag to concrete per-feature records

use super::compose_options::ComposeOptions;
use super::features::{
    FormattersOptions, GitignoreOptions, NextjsOptions, OverridesOptions, ProjectType,
    RegexpOptions, StylisticOptions, TypeScriptOptions, UnicornOptions,
};
use super::toggle::FeatureToggle;
use crate::error::XatError;
use crate::fragment::ConfigFragment;
use crate::probe::DependencyProbe;
use crate::result::Result;
use tracing::{debug, info};

/// Name given to the fused global fragment when the options carry no `name`
pub const GLOBAL_FRAGMENT_NAME: &str = "xat/global";

/// Fully resolved options. `None` means the feature is disabled.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedOptions {
    pub is_in_editor: bool,
    pub auto_rename_plugins: bool,
    pub component_exts: Vec<String>,
    pub project_type: ProjectType,

    pub gitignore: Option<GitignoreOptions>,
    pub ignores: Vec<String>,
    pub javascript: OverridesOptions,
    pub imports: Option<OverridesOptions>,
    pub unicorn: Option<UnicornOptions>,
    pub jsx: bool,
    pub typescript: Option<TypeScriptOptions>,
    pub stylistic: Option<StylisticOptions>,
    pub regexp: Option<RegexpOptions>,
    pub test: Option<OverridesOptions>,
    pub react: Option<OverridesOptions>,
    pub nextjs: Option<NextjsOptions>,
    pub astro: Option<OverridesOptions>,
    pub paths: bool,
    pub jsonc: Option<OverridesOptions>,
    pub yaml: Option<OverridesOptions>,
    pub toml: Option<OverridesOptions>,
    pub markdown: Option<OverridesOptions>,
    pub formatters: Option<FormattersOptions>,

    /// Flat-config properties of the options bag, fused into one fragment
    pub global: Option<ConfigFragment>,
}

impl ResolvedOptions {
    /// `tsconfigPath` of the TypeScript feature, when type-aware linting is on
    pub fn tsconfig_path(&self) -> Option<&str> {
        self.typescript
            .as_ref()
            .filter(|ts| ts.is_type_aware())
            .and_then(|ts| ts.tsconfig_path.as_deref())
    }

    /// Stylistic settings other features format against; defaults when the
    /// stylistic feature is off
    pub fn stylistic_or_default(&self) -> StylisticOptions {
        self.stylistic.clone().unwrap_or_default()
    }

    /// Names of the switchable features that ended up enabled
    pub fn enabled_features(&self) -> Vec<&'static str> {
        [
            ("gitignore", self.gitignore.is_some()),
            ("imports", self.imports.is_some()),
            ("unicorn", self.unicorn.is_some()),
            ("jsx", self.jsx),
            ("typescript", self.typescript.is_some()),
            ("stylistic", self.stylistic.is_some()),
            ("regexp", self.regexp.is_some()),
            ("test", self.test.is_some()),
            ("react", self.react.is_some()),
            ("nextjs", self.nextjs.is_some()),
            ("astro", self.astro.is_some()),
            ("paths", self.paths),
            ("jsonc", self.jsonc.is_some()),
            ("yaml", self.yaml.is_some()),
            ("toml", self.toml.is_some()),
            ("markdown", self.markdown.is_some()),
            ("formatters", self.formatters.is_some()),
        ]
        .into_iter()
        .filter_map(|(name, enabled)| enabled.then_some(name))
        .collect()
    }
}

/// Reject options that cannot be honored. Runs before anything else.
pub fn validate_options(options: &ComposeOptions) -> Result<()> {
    if options.files.is_some() {
        return Err(XatError::usage_error(
            "files",
            "the first argument holds global options and cannot be scoped to files; \
             place file-scoped settings in a later config instead",
        ));
    }

    if let Some(FeatureToggle::Configured(formatters)) = &options.formatters
        && let Some(language) = formatters.dprint_misuse()
    {
        return Err(XatError::usage_error(
            format!("formatters.{language}"),
            "dprint can only format markdown; use \"prettier\" or false",
        ));
    }
    Ok(())
}

/// Resolve every feature key of `options`.
///
/// `probe` answers dependency-based defaults and `detect_editor` is called
/// only when `isInEditor` is absent.
pub fn resolve_options(
    options: &ComposeOptions,
    probe: &dyn DependencyProbe,
    detect_editor: impl FnOnce() -> bool,
) -> Result<ResolvedOptions> {
    validate_options(options)?;

    let is_in_editor = match options.is_in_editor {
        Some(explicit) => explicit,
        None => {
            let detected = detect_editor();
            if detected {
                info!("Detected running in editor, some rules are disabled.");
            }
            detected
        }
    };

    let jsx = options.jsx.unwrap_or(true);

    let stylistic =
        FeatureToggle::resolve(options.stylistic.as_ref(), || true).map(|mut stylistic| {
            if stylistic.jsx.is_none() {
                stylistic.jsx = Some(jsx);
            }
            stylistic
        });

    let resolved = ResolvedOptions {
        is_in_editor,
        auto_rename_plugins: options.auto_rename_plugins.unwrap_or(true),
        component_exts: options.component_exts.clone(),
        project_type: options.project_type.unwrap_or_default(),

        gitignore: FeatureToggle::resolve(options.gitignore.as_ref(), || true),
        ignores: options.ignores.clone(),
        javascript: options.javascript.clone().unwrap_or_default(),
        imports: FeatureToggle::resolve(options.imports.as_ref(), || true),
        unicorn: FeatureToggle::resolve(options.unicorn.as_ref(), || true),
        jsx,
        typescript: FeatureToggle::resolve(options.typescript.as_ref(), || {
            probe.has_dependency("typescript")
        }),
        stylistic,
        regexp: FeatureToggle::resolve(options.regexp.as_ref(), || true),
        test: FeatureToggle::resolve(options.test.as_ref(), || true),
        react: FeatureToggle::resolve(options.react.as_ref(), || probe.has_dependency("react")),
        nextjs: FeatureToggle::resolve(options.nextjs.as_ref(), || probe.has_dependency("next")),
        astro: FeatureToggle::resolve(options.astro.as_ref(), || probe.has_dependency("astro")),
        paths: options.paths.unwrap_or(true),
        jsonc: FeatureToggle::resolve(options.jsonc.as_ref(), || true),
        yaml: FeatureToggle::resolve(options.yaml.as_ref(), || true),
        toml: FeatureToggle::resolve(options.toml.as_ref(), || true),
        markdown: FeatureToggle::resolve(options.markdown.as_ref(), || true),
        formatters: FeatureToggle::resolve(options.formatters.as_ref(), || true),

        global: global_fragment(options),
    };

    debug!("Enabled features: {}", resolved.enabled_features().join(", "));
    Ok(resolved)
}

fn global_fragment(options: &ComposeOptions) -> Option<ConfigFragment> {
    if !options.has_global_properties() {
        return None;
    }

    Some(ConfigFragment {
        name: Some(
            options
                .name
                .clone()
                .unwrap_or_else(|| GLOBAL_FRAGMENT_NAME.to_string()),
        ),
        files: Vec::new(),
        ignores: Vec::new(),
        plugins: options.plugins.clone().unwrap_or_default(),
        rules: options.rules.clone().unwrap_or_default(),
        language_options: options.language_options.clone(),
        linter_options: options.linter_options.clone(),
        processor: options.processor.clone(),
        settings: options.settings.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use crate::probe::ProjectManifest;
    use crate::rule::RuleSeverity;
    use serde_json::json;
    use std::cell::Cell;

    fn resolve(value: serde_json::Value, manifest: &ProjectManifest) -> Result<ResolvedOptions> {
        let options = ComposeOptions::from_value(value)?;
        resolve_options(&options, manifest, || false)
    }

    #[test]
    fn test_defaults_without_manifest() {
        let resolved = resolve(json!({}), &ProjectManifest::empty()).unwrap();

        assert!(!resolved.is_in_editor);
        assert!(resolved.auto_rename_plugins);
        assert!(resolved.typescript.is_none());
        assert!(resolved.react.is_none());
        assert!(resolved.nextjs.is_none());
        assert!(resolved.astro.is_none());
        assert!(resolved.stylistic.is_some());
        assert!(resolved.paths);
        assert!(!resolved.gitignore.unwrap().strict);
        assert!(resolved.global.is_none());
    }

    #[test]
    fn test_probes_enable_framework_features() {
        let manifest = ProjectManifest::from_dependencies([
            ("typescript", "^5.0.0"),
            ("react", "^19.0.0"),
            ("next", "^15.0.0"),
        ]);
        let resolved = resolve(json!({}), &manifest).unwrap();

        assert!(resolved.typescript.is_some());
        assert!(resolved.react.is_some());
        assert!(resolved.nextjs.is_some());
        assert!(resolved.astro.is_none());
    }

    #[test]
    fn test_explicit_false_beats_probe() {
        let manifest = ProjectManifest::from_dependencies([("react", "^19.0.0")]);
        let resolved = resolve(json!({ "react": false }), &manifest).unwrap();
        assert!(resolved.react.is_none());
    }

    #[test]
    fn test_explicit_editor_flag_skips_detection() {
        let called = Cell::new(false);
        let options = ComposeOptions {
            is_in_editor: Some(false),
            ..Default::default()
        };
        let resolved = resolve_options(&options, &ProjectManifest::empty(), || {
            called.set(true);
            true
        })
        .unwrap();

        assert!(!resolved.is_in_editor);
        assert!(!called.get());
    }

    #[test]
    fn test_stylistic_jsx_inherits_feature() {
        let resolved = resolve(json!({ "jsx": false }), &ProjectManifest::empty()).unwrap();
        assert_eq!(resolved.stylistic.unwrap().jsx, Some(false));

        let resolved = resolve(
            json!({ "jsx": false, "stylistic": { "jsx": true } }),
            &ProjectManifest::empty(),
        )
        .unwrap();
        assert_eq!(resolved.stylistic.unwrap().jsx, Some(true));
    }

    #[test]
    fn test_overrides_extracted() {
        let resolved = resolve(
            json!({ "test": { "overrides": { "test/no-only-tests": "off" } } }),
            &ProjectManifest::empty(),
        )
        .unwrap();
        assert_eq!(
            resolved.test.unwrap().overrides["test/no-only-tests"].severity,
            RuleSeverity::Off
        );
    }

    #[test]
    fn test_files_rejected() {
        let err = resolve(json!({ "files": ["**/*.ts"] }), &ProjectManifest::empty()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Usage);
        assert!(err.to_string().contains("files"));
    }

    #[test]
    fn test_dprint_outside_markdown_rejected() {
        let err = resolve(
            json!({ "formatters": { "css": "dprint" } }),
            &ProjectManifest::empty(),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Usage);
        assert!(err.to_string().contains("formatters.css"));

        let resolved = resolve(
            json!({ "formatters": { "markdown": "dprint" } }),
            &ProjectManifest::empty(),
        )
        .unwrap();
        assert!(resolved.formatters.is_some());
    }

    #[test]
    fn test_global_fragment_default_name() {
        let resolved = resolve(
            json!({ "rules": { "no-console": "off" }, "settings": { "a": 1 } }),
            &ProjectManifest::empty(),
        )
        .unwrap();
        let global = resolved.global.unwrap();
        assert_eq!(global.name.as_deref(), Some(GLOBAL_FRAGMENT_NAME));
        assert_eq!(global.settings, Some(json!({ "a": 1 })));
        assert!(global.files.is_empty());
    }
}
