//! Rule entries: severity, options and autofix metadata
//!
//! A rule entry accepts every shape a flat-config rule table allows:
//!
//! ```jsonc
//! {
//!   "no-console": "warn",
//!   "eqeqeq": 2,
//!   "style/quotes": ["error", "single", { "avoidEscape": true }],
//!   "prefer-const": { "severity": "warn", "autofix": false }
//! }
//! ```

use crate::error::XatError;
use crate::result::Result;
use indexmap::IndexMap;
use serde::de::{self, Visitor};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// Ordered mapping from fully-qualified rule id to its entry
pub type RuleTable = IndexMap<String, RuleEntry>;

/// Rule severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleSeverity {
    /// Disable the rule
    Off,
    /// Warning (doesn't fail the lint run)
    Warn,
    /// Error (fails the lint run)
    Error,
}

impl RuleSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleSeverity::Off => "off",
            RuleSeverity::Warn => "warn",
            RuleSeverity::Error => "error",
        }
    }

    /// Whether a rule at this severity reports anything
    pub fn is_active(&self) -> bool {
        !matches!(self, RuleSeverity::Off)
    }
}

impl fmt::Display for RuleSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for RuleSeverity {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

struct SeverityVisitor;

impl Visitor<'_> for SeverityVisitor {
    type Value = RuleSeverity;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("\"off\", \"warn\", \"error\" or 0, 1, 2")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<RuleSeverity, E> {
        match v {
            "off" => Ok(RuleSeverity::Off),
            "warn" => Ok(RuleSeverity::Warn),
            "error" => Ok(RuleSeverity::Error),
            other => Err(E::invalid_value(de::Unexpected::Str(other), &self)),
        }
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<RuleSeverity, E> {
        match v {
            0 => Ok(RuleSeverity::Off),
            1 => Ok(RuleSeverity::Warn),
            2 => Ok(RuleSeverity::Error),
            other => Err(E::invalid_value(de::Unexpected::Unsigned(other), &self)),
        }
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<RuleSeverity, E> {
        match u64::try_from(v) {
            Ok(v) => self.visit_u64(v),
            Err(_) => Err(E::invalid_value(de::Unexpected::Signed(v), &self)),
        }
    }
}

impl<'de> Deserialize<'de> for RuleSeverity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(SeverityVisitor)
    }
}

/// A severity-and-options tuple plus autofix metadata
#[derive(Debug, Clone, PartialEq)]
pub struct RuleEntry {
    pub severity: RuleSeverity,
    pub options: Vec<Value>,
    /// When false the linter reports the rule but must not apply its fix
    pub autofix: bool,
}

impl RuleEntry {
    pub fn new(severity: RuleSeverity) -> Self {
        Self {
            severity,
            options: Vec::new(),
            autofix: true,
        }
    }

    pub fn off() -> Self {
        Self::new(RuleSeverity::Off)
    }

    pub fn warn() -> Self {
        Self::new(RuleSeverity::Warn)
    }

    pub fn error() -> Self {
        Self::new(RuleSeverity::Error)
    }

    /// Append one option value
    pub fn with_option(mut self, option: impl Into<Value>) -> Self {
        self.options.push(option.into());
        self
    }

    pub fn is_active(&self) -> bool {
        self.severity.is_active()
    }

    /// Same entry with autofix disabled
    pub fn without_autofix(mut self) -> Self {
        self.autofix = false;
        self
    }
}

impl From<RuleSeverity> for RuleEntry {
    fn from(severity: RuleSeverity) -> Self {
        Self::new(severity)
    }
}

impl Serialize for RuleEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        if !self.autofix {
            let len = if self.options.is_empty() { 2 } else { 3 };
            let mut map = serializer.serialize_map(Some(len))?;
            map.serialize_entry("severity", &self.severity)?;
            if !self.options.is_empty() {
                map.serialize_entry("options", &self.options)?;
            }
            map.serialize_entry("autofix", &false)?;
            return map.end();
        }

        if self.options.is_empty() {
            return self.severity.serialize(serializer);
        }

        let mut seq = serializer.serialize_seq(Some(self.options.len() + 1))?;
        seq.serialize_element(&self.severity)?;
        for option in &self.options {
            seq.serialize_element(option)?;
        }
        seq.end()
    }
}

fn default_autofix() -> bool {
    true
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawRuleEntry {
    Severity(RuleSeverity),
    Tuple(Vec<Value>),
    Detailed {
        severity: RuleSeverity,
        #[serde(default)]
        options: Vec<Value>,
        #[serde(default = "default_autofix")]
        autofix: bool,
    },
}

impl<'de> Deserialize<'de> for RuleEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        match RawRuleEntry::deserialize(deserializer)? {
            RawRuleEntry::Severity(severity) => Ok(RuleEntry::new(severity)),
            RawRuleEntry::Tuple(mut items) => {
                if items.is_empty() {
                    return Err(de::Error::custom("rule entry array must start with a severity"));
                }
                let severity = RuleSeverity::deserialize(items.remove(0))
                    .map_err(<D::Error as de::Error>::custom)?;
                Ok(RuleEntry {
                    severity,
                    options: items,
                    autofix: true,
                })
            }
            RawRuleEntry::Detailed {
                severity,
                options,
                autofix,
            } => Ok(RuleEntry {
                severity,
                options,
                autofix,
            }),
        }
    }
}

/// Build a rule table from `(id, entry)` pairs, keeping their order
pub fn rule_table<K, I>(entries: I) -> RuleTable
where
    K: Into<String>,
    I: IntoIterator<Item = (K, RuleEntry)>,
{
    entries.into_iter().map(|(k, v)| (k.into(), v)).collect()
}

/// Parse a rule table written as a JSON object literal
pub fn parse_rule_table(value: Value) -> Result<RuleTable> {
    serde_json::from_value(value)
        .map_err(|e| XatError::internal_error(format!("Malformed rule table: {e}")))
}

/// Apply `layer` on top of `base`: entries in `layer` replace same-id entries
/// in place, new ids are appended.
pub fn apply_overrides(base: &mut RuleTable, layer: &RuleTable) {
    for (id, entry) in layer {
        base.insert(id.clone(), entry.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rule_severity_serialization() {
        let json = serde_json::to_string(&RuleSeverity::Error).unwrap();
        assert_eq!(json, r#""error""#);

        let json = serde_json::to_string(&RuleSeverity::Off).unwrap();
        assert_eq!(json, r#""off""#);
    }

    #[test]
    fn test_numeric_severity() {
        let table = parse_rule_table(json!({ "a": 0, "b": 1, "c": 2 })).unwrap();
        assert_eq!(table["a"].severity, RuleSeverity::Off);
        assert_eq!(table["b"].severity, RuleSeverity::Warn);
        assert_eq!(table["c"].severity, RuleSeverity::Error);

        assert!(parse_rule_table(json!({ "a": 3 })).is_err());
        assert!(parse_rule_table(json!({ "a": "fatal" })).is_err());
    }

    #[test]
    fn test_tuple_entry_keeps_options() {
        let table =
            parse_rule_table(json!({ "style/quotes": ["error", "single", { "avoidEscape": true }] }))
                .unwrap();
        let entry = &table["style/quotes"];
        assert_eq!(entry.severity, RuleSeverity::Error);
        assert_eq!(entry.options, vec![json!("single"), json!({ "avoidEscape": true })]);
        assert!(entry.autofix);

        let back = serde_json::to_value(entry).unwrap();
        assert_eq!(back, json!(["error", "single", { "avoidEscape": true }]));
    }

    #[test]
    fn test_empty_tuple_rejected() {
        assert!(parse_rule_table(json!({ "a": [] })).is_err());
    }

    #[test]
    fn test_autofix_disabled_serializes_detailed() {
        let entry = RuleEntry::warn().without_autofix();
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value, json!({ "severity": "warn", "autofix": false }));

        let parsed: RuleEntry = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, entry);
    }

    #[test]
    fn test_apply_overrides_keeps_position() {
        let mut base = rule_table([("a", RuleEntry::error()), ("b", RuleEntry::error())]);
        let layer = rule_table([("a", RuleEntry::off()), ("c", RuleEntry::warn())]);

        apply_overrides(&mut base, &layer);

        let ids: Vec<_> = base.keys().cloned().collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(base["a"].severity, RuleSeverity::Off);
    }
}
