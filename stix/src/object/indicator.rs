use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::{
    Audit, CommonProperties, Error, Order, Record, Timestamp,
    object::ObjectKind,
    properties::{
        Description, IntoValues, KillChainPhases, Name, TraitKind, TraitRef, add_values,
    },
    vocab,
};

/// A pattern that can be used to detect suspicious or malicious activity.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Indicator {
    #[serde(flatten)]
    pub common: CommonProperties,
    #[serde(flatten)]
    pub name: Name,
    #[serde(flatten)]
    pub description: Description,
    #[serde(flatten)]
    pub kill_chain_phases: KillChainPhases,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub indicator_types: Vec<String>,
    pub pattern: Option<String>,
    pattern_type: Option<String>,
    pub pattern_version: Option<String>,
    pub valid_from: Option<Timestamp>,
    pub valid_until: Option<Timestamp>,
}

impl Indicator {
    pub fn new() -> Self {
        Self {
            common: CommonProperties::new(Self::KIND.as_str()),
            ..Default::default()
        }
    }

    pub fn add_indicator_types(&mut self, values: impl IntoValues) {
        add_values(&mut self.indicator_types, values);
    }

    pub fn set_pattern(&mut self, pattern: impl Into<String>) {
        self.pattern = Some(pattern.into());
    }

    pub fn pattern_type(&self) -> Option<&str> {
        self.pattern_type.as_deref()
    }

    /// Sets the pattern language. Values outside the pattern type vocabulary are
    /// rejected and leave the current value in place.
    pub fn set_pattern_type(&mut self, pattern_type: impl Into<String>) -> Result<(), Error> {
        let pattern_type = pattern_type.into();
        if !vocab::is_member(vocab::PATTERN_TYPES, &pattern_type) {
            return Err(Error::validation(format!(
                "'{pattern_type}' is not one of {:?}",
                vocab::PATTERN_TYPES
            ))
            .at("pattern_type"));
        }
        self.pattern_type = Some(pattern_type);
        Ok(())
    }

    pub fn set_pattern_version(&mut self, version: impl Into<String>) {
        self.pattern_version = Some(version.into());
    }

    pub fn set_valid_from(&mut self, value: impl Into<Timestamp>) {
        self.valid_from = Some(value.into());
    }

    pub fn set_valid_until(&mut self, value: impl Into<Timestamp>) {
        self.valid_until = Some(value.into());
    }
}

impl Record for Indicator {
    const KIND: ObjectKind = ObjectKind::Indicator;
    const TRAITS: &'static [TraitKind] = &[
        TraitKind::Name,
        TraitKind::Description,
        TraitKind::KillChainPhases,
    ];
    const PROPERTIES: &'static [&'static str] = &[
        "indicator_types",
        "pattern",
        "pattern_type",
        "pattern_version",
        "valid_from",
        "valid_until",
    ];

    fn common(&self) -> &CommonProperties {
        &self.common
    }

    fn common_mut(&mut self) -> &mut CommonProperties {
        &mut self.common
    }

    fn traits(&self) -> Vec<TraitRef<'_>> {
        vec![
            TraitRef::Name(&self.name),
            TraitRef::Description(&self.description),
            TraitRef::KillChainPhases(&self.kill_chain_phases),
        ]
    }

    fn check_properties(&self, acc: &mut Audit) {
        if acc.require("indicator_types", &self.indicator_types) {
            acc.check_items("indicator_types", &self.indicator_types);
        }
        acc.require("pattern", &self.pattern);
        if acc.require("pattern_type", &self.pattern_type) {
            acc.check_vocab(
                "pattern_type",
                self.pattern_type.as_deref(),
                vocab::PATTERN_TYPES,
            );
        }
        acc.check_timestamp("valid_until", self.valid_until.as_ref());
        if acc.require("valid_from", &self.valid_from) {
            acc.check_timestamp("valid_from", self.valid_from.as_ref());
            acc.check_order(
                "valid_until",
                self.valid_from.as_ref(),
                self.valid_until.as_ref(),
                Order::After,
            );
        }
    }

    fn compare_properties(&self, other: &Self, acc: &mut Audit) {
        acc.compare_values("indicator_types", &self.indicator_types, &other.indicator_types);
        acc.compare_value("pattern", &self.pattern, &other.pattern);
        acc.compare_value("pattern_type", &self.pattern_type, &other.pattern_type);
        acc.compare_value("pattern_version", &self.pattern_version, &other.pattern_version);
        acc.compare_timestamp("valid_from", self.valid_from.as_ref(), other.valid_from.as_ref());
        acc.compare_timestamp("valid_until", self.valid_until.as_ref(), other.valid_until.as_ref());
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn populated() -> Indicator {
        let mut indicator = Indicator::new();
        indicator.add_indicator_types("malicious-activity");
        indicator.set_pattern("[file:hashes.'SHA-256' = 'aec070645fe53ee3b3763059376134f058cc337247c978add178b6ccdfb0019f']");
        indicator.set_pattern_type("stix").unwrap();
        indicator.set_valid_from("2016-01-01T00:00:00Z");
        indicator.set_valid_until("2016-06-01T00:00:00Z");
        indicator
    }

    #[test]
    fn fresh_indicator_reports_required_properties() {
        let outcome = Indicator::new().validate();
        assert_eq!(outcome.problem_count(), 4, "{outcome}");

        let failed: Vec<String> = outcome.problems().map(ToString::to_string).collect();
        assert_eq!(
            failed,
            vec![
                "-- indicator_types: missing",
                "-- pattern: missing",
                "-- pattern_type: missing",
                "-- valid_from: missing",
            ]
        );
    }

    #[test]
    fn populated_indicator_passes() {
        let outcome = populated().validate();
        assert!(outcome.is_ok(), "{outcome}");
        assert_eq!(outcome.problem_count(), 0);
        assert!(!outcome.diagnostics().is_empty());
    }

    #[test]
    fn valid_until_must_follow_valid_from() {
        let mut indicator = populated();
        indicator.set_valid_until("2016-01-01T00:00:00Z");
        let outcome = indicator.validate();
        assert_eq!(outcome.problem_count(), 1);
        assert_eq!(
            outcome.problems().next().map(|d| d.path().to_string()),
            Some("valid_until".to_string())
        );
    }

    #[test]
    fn valid_until_is_checked_without_valid_from() {
        let mut indicator = Indicator::new();
        indicator.set_valid_until("not a timestamp");
        let outcome = indicator.validate();
        assert_eq!(outcome.problem_count(), 5, "{outcome}");

        let failed: Vec<String> = outcome.problems().map(|d| d.path().to_string()).collect();
        assert_eq!(
            failed,
            vec![
                "indicator_types",
                "pattern",
                "pattern_type",
                "valid_until",
                "valid_from",
            ]
        );
    }

    #[test]
    fn open_ended_validity_passes() {
        let mut indicator = populated();
        indicator.valid_until = None;
        assert!(indicator.validate().is_ok());
    }

    #[test]
    fn pattern_type_is_restricted() {
        let mut indicator = Indicator::new();
        let err = indicator.set_pattern_type("sigma").unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.path().to_string(), "pattern_type");
        assert_eq!(indicator.pattern_type(), None);

        for pattern_type in ["stix", "snort", "yara"] {
            indicator.set_pattern_type(pattern_type).unwrap();
            assert_eq!(indicator.pattern_type(), Some(pattern_type));
        }
    }

    #[test]
    fn decoded_pattern_type_is_checked() {
        let indicator = Indicator::decode(
            json!({
                "type": "indicator",
                "spec_version": "2.1",
                "id": "indicator--8e2e2d2b-17d4-4cbf-938f-98ee46b3cd3f",
                "created": "2016-04-06T20:03:48.000Z",
                "modified": "2016-04-06T20:03:48.000Z",
                "indicator_types": ["malicious-activity"],
                "pattern": "rule x { condition: true }",
                "pattern_type": "sigma",
                "valid_from": "2016-01-01T00:00:00Z"
            })
            .to_string()
            .as_bytes(),
        )
        .unwrap();
        assert_eq!(indicator.pattern_type(), Some("sigma"));
        assert_eq!(indicator.validate().problem_count(), 1);
    }

    #[test]
    fn kill_chain_order_matters() {
        let mut a = populated();
        a.kill_chain_phases.add("mandiant", "initial-compromise");
        a.kill_chain_phases.add("mandiant", "establish-foothold");

        let mut b = a.clone();
        b.kill_chain_phases.kill_chain_phases.reverse();

        let outcome = a.compare(&b);
        assert!(!outcome.is_ok());
        let lines: Vec<String> = outcome
            .diagnostics()
            .iter()
            .filter(|d| d.path().to_string().starts_with("kill_chain_phases"))
            .map(ToString::to_string)
            .collect();
        assert!(lines.contains(&"++ kill_chain_phases: lengths match: 2".to_string()));
        assert_eq!(outcome.problem_count(), 2);
        assert!(a.compare(&a.clone()).is_ok());
    }

    #[test]
    fn setters_do_not_touch_modified() {
        let mut indicator = populated();
        indicator.common.set_modified("2016-04-06T20:03:48.000Z");
        indicator.set_pattern("[ipv4-addr:value = '198.51.100.1']");
        assert_eq!(
            indicator.common.modified.as_ref().map(Timestamp::as_str),
            Some("2016-04-06T20:03:48.000Z")
        );
    }
}
