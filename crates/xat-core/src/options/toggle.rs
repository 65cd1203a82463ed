//! Boolean-or-object feature switches

use crate::rule::RuleTable;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A feature value as written by the user: `false`, `true` or an options object
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureToggle<T> {
    Disabled,
    DefaultEnabled,
    Configured(T),
}

/// Per-feature option records
pub trait FeatureOptions: Default + Clone {
    /// Options used when the feature is enabled with `true` (or by default)
    fn enabled_default() -> Self {
        Self::default()
    }

    /// Rule overrides applied after the feature's own rule table
    fn overrides(&self) -> Option<&RuleTable> {
        None
    }
}

impl<T: FeatureOptions> FeatureToggle<T> {
    pub fn is_disabled(&self) -> bool {
        matches!(self, FeatureToggle::Disabled)
    }

    /// Resolve an optional toggle into concrete options.
    ///
    /// `default_enabled` is only consulted when the toggle is absent, so a
    /// feature switched off explicitly never triggers auto-detection.
    pub fn resolve(toggle: Option<&Self>, default_enabled: impl FnOnce() -> bool) -> Option<T> {
        match toggle {
            Some(FeatureToggle::Disabled) => None,
            Some(FeatureToggle::DefaultEnabled) => Some(T::enabled_default()),
            Some(FeatureToggle::Configured(options)) => Some(options.clone()),
            None if default_enabled() => Some(T::enabled_default()),
            None => None,
        }
    }

    /// The `overrides` layer of a configured feature, empty otherwise
    pub fn overrides(&self) -> RuleTable {
        match self {
            FeatureToggle::Configured(options) => options.overrides().cloned().unwrap_or_default(),
            _ => RuleTable::new(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawToggle<T> {
    Flag(bool),
    Options(T),
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for FeatureToggle<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawToggle::<T>::deserialize(deserializer)? {
            RawToggle::Flag(false) => FeatureToggle::Disabled,
            RawToggle::Flag(true) => FeatureToggle::DefaultEnabled,
            RawToggle::Options(options) => FeatureToggle::Configured(options),
        })
    }
}

impl<T: Serialize> Serialize for FeatureToggle<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FeatureToggle::Disabled => serializer.serialize_bool(false),
            FeatureToggle::DefaultEnabled => serializer.serialize_bool(true),
            FeatureToggle::Configured(options) => options.serialize(serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::OverridesOptions;
    use crate::rule::RuleSeverity;
    use serde_json::json;

    type Toggle = FeatureToggle<OverridesOptions>;

    #[test]
    fn test_deserialize_shapes() {
        let off: Toggle = serde_json::from_value(json!(false)).unwrap();
        let on: Toggle = serde_json::from_value(json!(true)).unwrap();
        let configured: Toggle =
            serde_json::from_value(json!({ "overrides": { "no-console": "off" } })).unwrap();

        assert_eq!(off, FeatureToggle::Disabled);
        assert_eq!(on, FeatureToggle::DefaultEnabled);
        assert_eq!(
            configured.overrides()["no-console"].severity,
            RuleSeverity::Off
        );
    }

    #[test]
    fn test_disabled_skips_default_probe() {
        let mut probed = false;
        let resolved = Toggle::resolve(Some(&FeatureToggle::Disabled), || {
            probed = true;
            true
        });
        assert!(resolved.is_none());
        assert!(!probed);
    }

    #[test]
    fn test_absent_uses_default() {
        assert!(Toggle::resolve(None, || true).is_some());
        assert!(Toggle::resolve(None, || false).is_none());
    }

    #[test]
    fn test_serialize_round_shape() {
        assert_eq!(serde_json::to_value(Toggle::Disabled).unwrap(), json!(false));
        assert_eq!(serde_json::to_value(Toggle::DefaultEnabled).unwrap(), json!(true));
    }
}
