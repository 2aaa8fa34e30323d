use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::{
    Audit, Check, Compare, CustomProperties, Error, ErrorAt, ExternalReference, GranularMarking,
    Identifier, Order, Outcome, Precision, Timestamp,
    error::Path,
    properties::{IntoValues, add_values},
    vocab,
};

/// Names of the properties every object carries.
pub const COMMON_KEYS: &[&str] = &[
    "type",
    "spec_version",
    "id",
    "created_by_ref",
    "created",
    "modified",
    "revoked",
    "labels",
    "confidence",
    "lang",
    "external_references",
    "object_marking_refs",
    "granular_markings",
    "extensions",
];

/// The envelope shared by every STIX object: identity, provenance and markings.
///
/// Besides the wire properties it holds the bytes the object was decoded from and the
/// properties that were not part of the object's schema.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommonProperties {
    #[serde(rename = "type", default)]
    object_type: String,
    pub spec_version: Option<String>,
    #[serde(default)]
    id: Identifier,
    pub created_by_ref: Option<Identifier>,
    pub created: Option<Timestamp>,
    pub modified: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub revoked: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
    pub confidence: Option<u64>,
    pub lang: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub external_references: Vec<ExternalReference>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub object_marking_refs: Vec<Identifier>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub granular_markings: Vec<GranularMarking>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub extensions: IndexMap<String, serde_json::Value>,
    #[serde(skip)]
    raw: Vec<u8>,
    #[serde(skip)]
    custom: CustomProperties,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl CommonProperties {
    /// Creates the envelope of a new object: a fresh identifier, the current `spec_version`,
    /// and `created` and `modified` set to now.
    pub fn new(object_type: impl Into<String>) -> Self {
        let object_type = object_type.into();
        let now = Timestamp::now(Precision::Milli);
        Self {
            id: Identifier::new(&object_type),
            object_type,
            spec_version: Some(vocab::SPEC_VERSION.to_string()),
            modified: Some(now.clone()),
            created: Some(now),
            ..Default::default()
        }
    }

    pub fn object_type(&self) -> &str {
        &self.object_type
    }

    /// Sets the discriminant of an envelope that doesn't have one yet.
    ///
    /// The discriminant never changes once set; setting a different value is an error.
    pub fn set_object_type(&mut self, object_type: impl Into<String>) -> Result<(), Error> {
        let object_type = object_type.into();
        if !self.object_type.is_empty() && self.object_type != object_type {
            return Err(Error::validation(format!(
                "type is already '{}' and cannot become '{object_type}'",
                self.object_type
            ))
            .at("type"));
        }
        self.object_type = object_type;
        Ok(())
    }

    pub fn id(&self) -> &Identifier {
        &self.id
    }

    /// Assigns a fresh identifier derived from the discriminant.
    ///
    /// Fails if the envelope has no discriminant yet or already has an identifier.
    pub fn generate_id(&mut self) -> Result<&Identifier, Error> {
        if self.object_type.is_empty() {
            return Err(Error::validation("an identifier needs a type").at("id"));
        }
        if !self.id.as_str().is_empty() {
            return Err(Error::validation(format!("identifier is already '{}'", self.id)).at("id"));
        }
        self.id = Identifier::new(&self.object_type);
        Ok(&self.id)
    }

    /// The bytes this object was decoded from; empty for objects built in code.
    pub fn raw_data(&self) -> &[u8] {
        &self.raw
    }

    pub fn set_raw_data(&mut self, raw: impl Into<Vec<u8>>) {
        self.raw = raw.into();
    }

    pub fn custom_properties(&self) -> &CustomProperties {
        &self.custom
    }

    pub(crate) fn set_custom_properties(&mut self, custom: CustomProperties) {
        self.custom = custom;
    }

    pub(crate) fn custom_properties_mut(&mut self) -> &mut CustomProperties {
        &mut self.custom
    }

    pub fn set_created(&mut self, value: impl Into<Timestamp>) {
        self.created = Some(value.into());
    }

    /// Sets `modified`. No other setter changes it.
    pub fn set_modified(&mut self, value: impl Into<Timestamp>) {
        self.modified = Some(value.into());
    }

    /// Sets `modified` to the current time.
    pub fn touch(&mut self) {
        self.modified = Some(Timestamp::now(Precision::Milli));
    }

    pub fn set_created_by_ref(&mut self, id: impl Into<Identifier>) {
        self.created_by_ref = Some(id.into());
    }

    pub fn set_revoked(&mut self, revoked: bool) {
        self.revoked = revoked;
    }

    pub fn add_labels(&mut self, values: impl IntoValues) {
        add_values(&mut self.labels, values);
    }

    /// Sets `confidence`, which must be between 0 and 100.
    pub fn set_confidence(&mut self, confidence: u64) -> Result<(), Error> {
        if confidence > 100 {
            return Err(
                Error::validation(format!("confidence {confidence} is not in 0..=100"))
                    .at("confidence"),
            );
        }
        self.confidence = Some(confidence);
        Ok(())
    }

    pub fn set_lang(&mut self, lang: impl Into<String>) {
        self.lang = Some(lang.into());
    }

    pub fn add_external_reference(&mut self, reference: ExternalReference) {
        self.external_references.push(reference);
    }

    pub fn add_object_marking_ref(&mut self, id: impl Into<Identifier>) {
        self.object_marking_refs.push(id.into());
    }
}

/// Structural validation of the envelope.
impl Check for CommonProperties {
    fn check(&self) -> Outcome {
        let mut acc = Audit::new();

        acc.require("type", &self.object_type);
        if acc.require("id", &self.id) {
            acc.check_identifier("id", &self.id, Some(&self.object_type));
        }
        if acc.require("spec_version", &self.spec_version) {
            acc.check_vocab(
                "spec_version",
                self.spec_version.as_deref(),
                vocab::SPEC_VERSIONS,
            );
        }

        if acc.require("created", &self.created) {
            acc.check_timestamp("created", self.created.as_ref());
        }
        if acc.require("modified", &self.modified) {
            acc.check_timestamp("modified", self.modified.as_ref());
            acc.check_order(
                "modified",
                self.created.as_ref(),
                self.modified.as_ref(),
                Order::NotBefore,
            );
        }

        if let Some(created_by_ref) = &self.created_by_ref {
            acc.check_identifier("created_by_ref", created_by_ref, Some("identity"));
        }
        acc.check_items("labels", &self.labels);
        if let Some(confidence) = self.confidence {
            acc.check(
                "confidence",
                confidence <= 100,
                "in 0..=100",
                format!("{confidence} is not in 0..=100"),
            );
        }
        acc.check_text("lang", self.lang.as_deref());

        for (idx, reference) in self.external_references.iter().enumerate() {
            acc.merge(reference.check().at(idx).at("external_references"));
        }
        acc.check_identifiers(
            "object_marking_refs",
            &self.object_marking_refs,
            Some("marking-definition"),
        );
        for (idx, marking) in self.granular_markings.iter().enumerate() {
            acc.merge(marking.check().at(idx).at("granular_markings"));
        }

        acc.finish()
    }
}

/// Field-by-field comparison of two envelopes, including their custom properties.
impl Compare for CommonProperties {
    fn compare(&self, other: &Self) -> Outcome {
        let mut acc = Audit::new();
        acc.compare_value("type", &self.object_type, &other.object_type);
        acc.compare_value("spec_version", &self.spec_version, &other.spec_version);
        acc.compare_value("id", &self.id, &other.id);
        acc.compare_value(
            "created_by_ref",
            &self.created_by_ref,
            &other.created_by_ref,
        );
        acc.compare_timestamp("created", self.created.as_ref(), other.created.as_ref());
        acc.compare_timestamp("modified", self.modified.as_ref(), other.modified.as_ref());
        acc.compare_value("revoked", &self.revoked, &other.revoked);
        acc.compare_values("labels", &self.labels, &other.labels);
        acc.compare_value("confidence", &self.confidence, &other.confidence);
        acc.compare_value("lang", &self.lang, &other.lang);
        acc.compare_seq(
            "external_references",
            &self.external_references,
            &other.external_references,
            ExternalReference::compare,
        );
        acc.compare_values(
            "object_marking_refs",
            &self.object_marking_refs,
            &other.object_marking_refs,
        );
        acc.compare_seq(
            "granular_markings",
            &self.granular_markings,
            &other.granular_markings,
            GranularMarking::compare,
        );
        acc.compare_value("extensions", &self.extensions, &other.extensions);
        compare_custom(&mut acc, &self.custom, &other.custom);
        acc.finish()
    }
}

/// Compares custom properties by key and by decoded JSON value, so that formatting
/// differences in the encoded text don't count. Values that don't decode are compared
/// by their text.
fn compare_custom(acc: &mut Audit, a: &CustomProperties, b: &CustomProperties) {
    for (key, raw) in a.iter() {
        let path = Path::from(key.to_string());
        let Some(other) = b.get_raw(key) else {
            acc.fail(path, "only on the first object");
            continue;
        };
        match (
            serde_json::from_str::<serde_json::Value>(raw.get()),
            serde_json::from_str::<serde_json::Value>(other.get()),
        ) {
            (Ok(left), Ok(right)) => acc.compare_value(path, &left, &right),
            _ => acc.compare_value(path, raw.get(), other.get()),
        };
    }
    for key in b.keys().filter(|key| !a.contains(key)) {
        acc.fail(Path::from(key.to_string()), "only on the second object");
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn new_envelope_is_valid() {
        let common = CommonProperties::new("campaign");
        let outcome = common.check();
        assert!(outcome.is_ok(), "{outcome}");
        assert_eq!(common.id().object_type(), Some("campaign"));
        assert_eq!(common.created, common.modified);
    }

    #[test]
    fn default_envelope_reports_every_missing_field() {
        let outcome = CommonProperties::default().check();
        let failed: Vec<String> = outcome.problems().map(|d| d.path().to_string()).collect();
        assert_eq!(
            failed,
            vec!["type", "id", "spec_version", "created", "modified"]
        );
    }

    #[test]
    fn modified_before_created() {
        let mut common = CommonProperties::new("tool");
        common.set_created("2017-01-02T00:00:00.000Z");
        common.set_modified("2017-01-01T00:00:00.000Z");
        let outcome = common.check();
        assert_eq!(outcome.problem_count(), 1);
        assert_eq!(
            outcome.problems().next().map(|d| d.path().to_string()),
            Some("modified".to_string())
        );
    }

    #[test]
    fn id_must_match_type() {
        let common: CommonProperties = serde_json::from_value(json!({
            "type": "malware",
            "spec_version": "2.1",
            "id": "tool--8e2e2d2b-17d4-4cbf-938f-98ee46b3cd3f",
            "created": "2016-04-06T20:03:48.000Z",
            "modified": "2016-04-06T20:03:48.000Z"
        }))
        .unwrap();
        assert_eq!(common.check().problem_count(), 1);
    }

    #[test]
    fn type_is_set_once() {
        let mut common = CommonProperties::new("campaign");
        assert!(common.set_object_type("campaign").is_ok());
        assert!(common.set_object_type("indicator").is_err());
        assert_eq!(common.object_type(), "campaign");
    }

    #[test]
    fn generate_id_only_when_unassigned() {
        let mut common = CommonProperties::default();
        assert!(common.generate_id().is_err());
        common.set_object_type("report").unwrap();
        let id = common.generate_id().unwrap().clone();
        assert!(id.check_for("report").is_ok());
        assert!(common.generate_id().is_err());
    }

    #[test]
    fn confidence_is_bounded() {
        let mut common = CommonProperties::new("indicator");
        assert!(common.set_confidence(101).is_err());
        assert_eq!(common.confidence, None);
        common.set_confidence(85).unwrap();
        assert_eq!(common.confidence, Some(85));
    }

    #[test]
    fn setters_leave_modified_alone() {
        let mut common = CommonProperties::new("indicator");
        common.set_modified("2017-01-01T00:00:00.000Z");
        common.add_labels("malicious-activity");
        common.set_lang("en");
        assert_eq!(
            common.modified.as_ref().map(Timestamp::as_str),
            Some("2017-01-01T00:00:00.000Z")
        );
    }

    #[test]
    fn compare_reports_custom_differences() {
        let mut a = CommonProperties::new("indicator");
        let mut b = a.clone();
        a.custom_properties_mut().insert_value("x_score", 1).unwrap();
        b.custom_properties_mut().insert_value("x_score", 2).unwrap();
        b.custom_properties_mut().insert_value("x_extra", true).unwrap();

        let outcome = a.compare(&b);
        let failed: Vec<String> = outcome.problems().map(|d| d.path().to_string()).collect();
        assert_eq!(failed, vec!["x_score", "x_extra"]);
    }

    #[test]
    fn custom_values_outside_json_numbers_compare_by_text() {
        let mut a = CommonProperties::new("x-acme-widget");
        let mut b = a.clone();
        let mut c = a.clone();
        let raw = |text: &str| serde_json::value::RawValue::from_string(text.to_string()).unwrap();
        a.custom_properties_mut().insert_raw("x_big", raw("1e400"));
        b.custom_properties_mut().insert_raw("x_big", raw("7e999"));
        c.custom_properties_mut().insert_raw("x_big", raw("1e400"));

        let outcome = a.compare(&b);
        let failed: Vec<String> = outcome.problems().map(|d| d.path().to_string()).collect();
        assert_eq!(failed, vec!["x_big"]);
        assert!(a.compare(&c).is_ok());
    }

    #[test]
    fn timestamps_compare_by_instant() {
        let mut a = CommonProperties::new("campaign");
        a.set_created("2016-01-01T00:00:00Z");
        a.set_modified("2016-01-01T00:00:00Z");
        let mut b = a.clone();
        b.set_created("2016-01-01T00:00:00.000Z");
        assert!(a.compare(&b).is_ok());

        b.set_modified("2016-01-01T00:00:00.001Z");
        let outcome = a.compare(&b);
        let failed: Vec<String> = outcome.problems().map(|d| d.path().to_string()).collect();
        assert_eq!(failed, vec!["modified"]);
    }
}
