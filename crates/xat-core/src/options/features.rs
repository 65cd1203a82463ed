//! Option records for individual features

use super::toggle::FeatureOptions;
use crate::rule::RuleTable;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;

/// Options for features whose only knob is a rule override table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OverridesOptions {
    #[serde(skip_serializing_if = "RuleTable::is_empty")]
    pub overrides: RuleTable,
}

impl FeatureOptions for OverridesOptions {
    fn overrides(&self) -> Option<&RuleTable> {
        Some(&self.overrides)
    }
}

/// `.gitignore` integration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GitignoreOptions {
    /// Directory the ignore files are read from (defaults to the working directory)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,
    /// Ignore files to read, relative to `root`
    pub files: Vec<String>,
    /// Fail when an ignore file is missing
    pub strict: bool,
}

impl Default for GitignoreOptions {
    fn default() -> Self {
        Self {
            root: None,
            files: vec![".gitignore".to_string()],
            strict: true,
        }
    }
}

impl FeatureOptions for GitignoreOptions {
    fn enabled_default() -> Self {
        Self {
            strict: false,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UnicornOptions {
    /// Use every recommended unicorn rule instead of the curated subset
    pub all_recommended: bool,
    #[serde(skip_serializing_if = "RuleTable::is_empty")]
    pub overrides: RuleTable,
}

impl FeatureOptions for UnicornOptions {
    fn overrides(&self) -> Option<&RuleTable> {
        Some(&self.overrides)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegexpLevel {
    Error,
    Warn,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegexpOptions {
    /// Severity every active regexp rule is forced to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<RegexpLevel>,
    #[serde(skip_serializing_if = "RuleTable::is_empty")]
    pub overrides: RuleTable,
}

impl FeatureOptions for RegexpOptions {
    fn overrides(&self) -> Option<&RuleTable> {
        Some(&self.overrides)
    }
}

/// Indentation style: `"tab"` or a number of spaces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawIndent", into = "RawIndent")]
pub enum Indent {
    Tab,
    Spaces(u8),
}

impl Indent {
    pub fn width(&self) -> u8 {
        match self {
            Indent::Tab => 2,
            Indent::Spaces(n) => *n,
        }
    }

    pub fn to_value(self) -> Value {
        match self {
            Indent::Tab => Value::from("tab"),
            Indent::Spaces(n) => Value::from(n),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawIndent {
    Spaces(u8),
    Keyword(String),
}

impl TryFrom<RawIndent> for Indent {
    type Error = String;

    fn try_from(raw: RawIndent) -> Result<Self, Self::Error> {
        match raw {
            RawIndent::Spaces(n) => Ok(Indent::Spaces(n)),
            RawIndent::Keyword(k) if k == "tab" => Ok(Indent::Tab),
            RawIndent::Keyword(k) => Err(format!("invalid indent '{k}', expected \"tab\" or a number")),
        }
    }
}

impl From<Indent> for RawIndent {
    fn from(indent: Indent) -> Self {
        match indent {
            Indent::Tab => RawIndent::Keyword("tab".to_string()),
            Indent::Spaces(n) => RawIndent::Spaces(n),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quotes {
    Single,
    Double,
    Backtick,
}

impl Quotes {
    pub fn as_str(&self) -> &'static str {
        match self {
            Quotes::Single => "single",
            Quotes::Double => "double",
            Quotes::Backtick => "backtick",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StylisticOptions {
    pub indent: Indent,
    pub quotes: Quotes,
    pub semi: bool,
    /// Falls back to the `jsx` feature switch when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jsx: Option<bool>,
    #[serde(skip_serializing_if = "RuleTable::is_empty")]
    pub overrides: RuleTable,
}

impl Default for StylisticOptions {
    fn default() -> Self {
        Self {
            indent: Indent::Tab,
            quotes: Quotes::Single,
            semi: false,
            jsx: None,
            overrides: RuleTable::new(),
        }
    }
}

impl StylisticOptions {
    pub fn jsx_enabled(&self) -> bool {
        self.jsx.unwrap_or(true)
    }
}

impl FeatureOptions for StylisticOptions {
    fn overrides(&self) -> Option<&RuleTable> {
        Some(&self.overrides)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TypeScriptOptions {
    /// Replaces the default TypeScript globs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files_type_aware: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignores_type_aware: Option<Vec<String>>,
    /// Extra parser options merged last into the parser fragment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parser_options: Option<Map<String, Value>>,
    /// Enables type-aware rules when set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tsconfig_path: Option<String>,
    #[serde(skip_serializing_if = "RuleTable::is_empty")]
    pub overrides: RuleTable,
    #[serde(skip_serializing_if = "RuleTable::is_empty")]
    pub overrides_type_aware: RuleTable,
}

impl TypeScriptOptions {
    pub fn is_type_aware(&self) -> bool {
        self.tsconfig_path.as_deref().is_some_and(|p| !p.is_empty())
    }
}

impl FeatureOptions for TypeScriptOptions {
    fn overrides(&self) -> Option<&RuleTable> {
        Some(&self.overrides)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NextjsOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<String>>,
    #[serde(skip_serializing_if = "RuleTable::is_empty")]
    pub overrides: RuleTable,
}

impl FeatureOptions for NextjsOptions {
    fn overrides(&self) -> Option<&RuleTable> {
        Some(&self.overrides)
    }
}

/// Which external formatter handles a file type: `false`, `true`
/// (prettier), `"prettier"` or `"dprint"`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawFormatterChoice", into = "RawFormatterChoice")]
pub enum FormatterChoice {
    #[default]
    Off,
    Prettier,
    Dprint,
}

impl FormatterChoice {
    pub fn is_enabled(&self) -> bool {
        !matches!(self, FormatterChoice::Off)
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawFormatterChoice {
    Flag(bool),
    Engine(String),
}

impl TryFrom<RawFormatterChoice> for FormatterChoice {
    type Error = String;

    fn try_from(raw: RawFormatterChoice) -> Result<Self, Self::Error> {
        match raw {
            RawFormatterChoice::Flag(false) => Ok(FormatterChoice::Off),
            RawFormatterChoice::Flag(true) => Ok(FormatterChoice::Prettier),
            RawFormatterChoice::Engine(e) => match e.as_str() {
                "prettier" => Ok(FormatterChoice::Prettier),
                "dprint" => Ok(FormatterChoice::Dprint),
                other => Err(format!("unknown formatter '{other}'")),
            },
        }
    }
}

impl From<FormatterChoice> for RawFormatterChoice {
    fn from(choice: FormatterChoice) -> Self {
        match choice {
            FormatterChoice::Off => RawFormatterChoice::Flag(false),
            FormatterChoice::Prettier => RawFormatterChoice::Engine("prettier".to_string()),
            FormatterChoice::Dprint => RawFormatterChoice::Engine("dprint".to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormattersOptions {
    pub css: FormatterChoice,
    pub html: FormatterChoice,
    pub xml: FormatterChoice,
    pub svg: FormatterChoice,
    pub graphql: FormatterChoice,
    pub markdown: FormatterChoice,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prettier_options: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dprint_options: Option<Map<String, Value>>,
}

impl FeatureOptions for FormattersOptions {
    fn enabled_default() -> Self {
        Self {
            css: FormatterChoice::Prettier,
            html: FormatterChoice::Prettier,
            xml: FormatterChoice::Prettier,
            svg: FormatterChoice::Prettier,
            graphql: FormatterChoice::Prettier,
            markdown: FormatterChoice::Prettier,
            prettier_options: None,
            dprint_options: None,
        }
    }
}

impl FormattersOptions {
    /// First language that asks for dprint although only markdown supports it
    pub fn dprint_misuse(&self) -> Option<&'static str> {
        [
            ("css", self.css),
            ("html", self.html),
            ("xml", self.xml),
            ("svg", self.svg),
            ("graphql", self.graphql),
        ]
        .into_iter()
        .find(|(_, choice)| *choice == FormatterChoice::Dprint)
        .map(|(language, _)| language)
    }
}

/// Project flavor; `lib` enables stricter rules for published code
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    #[default]
    App,
    Lib,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_indent_shapes() {
        let tab: Indent = serde_json::from_value(json!("tab")).unwrap();
        let four: Indent = serde_json::from_value(json!(4)).unwrap();
        assert_eq!(tab, Indent::Tab);
        assert_eq!(four, Indent::Spaces(4));
        assert!(serde_json::from_value::<Indent>(json!("space")).is_err());
        assert_eq!(serde_json::to_value(Indent::Tab).unwrap(), json!("tab"));
    }

    #[test]
    fn test_formatter_choice_shapes() {
        let choices: Vec<FormatterChoice> =
            serde_json::from_value(json!([false, true, "prettier", "dprint"])).unwrap();
        assert_eq!(
            choices,
            vec![
                FormatterChoice::Off,
                FormatterChoice::Prettier,
                FormatterChoice::Prettier,
                FormatterChoice::Dprint
            ]
        );
        assert!(serde_json::from_value::<FormatterChoice>(json!("biome")).is_err());
    }

    #[test]
    fn test_stylistic_defaults() {
        let options: StylisticOptions = serde_json::from_value(json!({ "semi": true })).unwrap();
        assert_eq!(options.indent, Indent::Tab);
        assert_eq!(options.quotes, Quotes::Single);
        assert!(options.semi);
        assert!(options.jsx.is_none());
    }

    #[test]
    fn test_gitignore_default_vs_configured() {
        assert!(!GitignoreOptions::enabled_default().strict);
        let configured: GitignoreOptions = serde_json::from_value(json!({})).unwrap();
        assert!(configured.strict);
    }
}
