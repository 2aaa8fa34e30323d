use indexmap::IndexMap;
use serde::{Serialize, Serializer, de::DeserializeOwned, ser::Error as _, ser::SerializeMap};
use serde_json::{Value, value::RawValue};

use crate::{
    Audit, Check, CommonProperties, CustomProperties, Error, Object, ObjectKind, Outcome,
    common::COMMON_KEYS,
    error::Path,
    properties::{TraitKind, TraitRef},
};

/// A typed STIX object: the common envelope, the property groups its kind is composed
/// from, and its kind-specific properties.
pub trait Record: Serialize + DeserializeOwned + Into<Object> {
    /// The kind this record decodes and encodes.
    const KIND: ObjectKind;

    /// The property groups this kind is composed from.
    const TRAITS: &'static [TraitKind];

    /// The kind-specific property names, excluding the envelope and property groups.
    const PROPERTIES: &'static [&'static str];

    fn common(&self) -> &CommonProperties;

    fn common_mut(&mut self) -> &mut CommonProperties;

    /// The property groups of this value, in the same order as [`Record::TRAITS`].
    fn traits(&self) -> Vec<TraitRef<'_>>;

    /// Kind-specific checks: required properties, vocabularies and timestamp windows.
    fn check_properties(&self, acc: &mut Audit);

    /// Kind-specific comparisons.
    fn compare_properties(&self, other: &Self, acc: &mut Audit);

    /// Whether `key` is part of this kind's schema.
    fn is_known_property(key: &str) -> bool {
        COMMON_KEYS.contains(&key)
            || Self::PROPERTIES.contains(&key)
            || Self::TRAITS.iter().any(|t| t.keys().contains(&key))
    }

    /// Decodes an object of this kind, keeping the input bytes and any properties the
    /// schema doesn't know about.
    fn decode(bytes: &[u8]) -> Result<Self, Error> {
        let (mut record, custom): (Self, _) = decode_split(bytes, Self::is_known_property)?;
        let object_type = record.common().object_type();
        if object_type != Self::KIND.as_str() {
            return Err(Error::malformed_envelope(format!(
                "expected type '{}', found '{object_type}'",
                Self::KIND
            )));
        }
        let common = record.common_mut();
        common.set_custom_properties(custom);
        common.set_raw_data(bytes);
        Ok(record)
    }

    /// The object as a JSON value, including its custom properties.
    ///
    /// Custom values pass through [`Value`], so numbers it cannot hold exactly are
    /// rounded or rejected. [`Record::encode`] writes them as received.
    fn to_value(&self) -> Result<Value, Error> {
        serde_json::to_value(WithCustom::new(self, self.common().custom_properties()))
            .map_err(Error::encode)
    }

    /// Encodes the object, writing custom properties exactly as they were received.
    fn encode(&self) -> Result<Vec<u8>, Error> {
        serde_json::to_vec(&WithCustom::new(self, self.common().custom_properties()))
            .map_err(Error::encode)
    }

    /// Validates the envelope, every property group and the kind-specific properties.
    fn validate(&self) -> Outcome {
        let mut acc = Audit::new();
        acc.merge(self.common().check());
        acc.check(
            "type",
            self.common().object_type() == Self::KIND.as_str(),
            format!("is '{}'", Self::KIND),
            format!("must be '{}'", Self::KIND),
        );
        for key in self.common().custom_properties().keys() {
            if Self::is_known_property(key) {
                acc.fail(
                    Path::from(key.to_string()),
                    "custom property shadows a schema property",
                );
            }
        }
        for group in self.traits() {
            acc.merge(group.check());
        }
        self.check_properties(&mut acc);
        acc.finish()
    }

    /// Compares two objects of this kind field by field.
    fn compare(&self, other: &Self) -> Outcome {
        let mut acc = Audit::new();
        acc.merge(crate::Compare::compare(self.common(), other.common()));
        for (a, b) in self.traits().iter().zip(other.traits().iter()) {
            acc.merge(a.compare(b));
        }
        self.compare_properties(other, &mut acc);
        acc.finish()
    }

    /// Stores a property that is not part of this kind's schema.
    fn insert_custom_property(
        &mut self,
        key: impl Into<String>,
        value: impl Serialize,
    ) -> Result<(), Error> {
        let key = key.into();
        if Self::is_known_property(&key) {
            return Err(Error::validation(format!(
                "'{key}' is a {} property, not a custom one",
                Self::KIND
            )));
        }
        self.common_mut()
            .custom_properties_mut()
            .insert_value(key, value)
    }
}

/// Reads only the `type` discriminant of an encoded object. Other values are not parsed.
pub fn decode_object_type(bytes: &[u8]) -> Result<String, Error> {
    let fields: IndexMap<String, &RawValue> =
        serde_json::from_slice(bytes).map_err(Error::malformed_envelope)?;
    let raw = fields
        .get("type")
        .ok_or_else(|| Error::malformed_envelope("missing 'type' property"))?;
    let object_type: String = serde_json::from_str(raw.get())
        .map_err(|_| Error::malformed_envelope("'type' is not a string"))?;
    if object_type.is_empty() {
        return Err(Error::malformed_envelope("'type' is empty"));
    }
    Ok(object_type)
}

/// Decodes `bytes` as a JSON object, splits it into schema and custom properties, and
/// deserializes the schema part into `T`.
///
/// Values are not interpreted while splitting; custom values stay in their encoded form.
/// A key repeated in the input keeps its last value.
pub(crate) fn decode_split<T: DeserializeOwned>(
    bytes: &[u8],
    is_known: impl Fn(&str) -> bool,
) -> Result<(T, CustomProperties), Error> {
    let fields: IndexMap<String, Box<RawValue>> =
        serde_json::from_slice(bytes).map_err(Error::malformed_envelope)?;
    let (known, custom): (IndexMap<_, _>, IndexMap<_, _>) =
        fields.into_iter().partition(|(key, _)| is_known(key));

    let known = serde_json::to_string(&known)?;
    let record: T = serde_json::from_str(&known)?;
    log::trace!("decoded object with {} custom properties", custom.len());
    Ok((record, custom.into_iter().collect()))
}

/// Serializes a record followed by its custom properties.
///
/// Schema properties win over custom ones. Custom values are emitted from their encoded
/// text, so a JSON serializer writes them unchanged.
pub(crate) struct WithCustom<'a, T: ?Sized> {
    record: &'a T,
    custom: &'a CustomProperties,
}

impl<'a, T: ?Sized> WithCustom<'a, T> {
    pub(crate) fn new(record: &'a T, custom: &'a CustomProperties) -> Self {
        Self { record, custom }
    }
}

impl<T: Serialize + ?Sized> Serialize for WithCustom<'_, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let Value::Object(schema) = serde_json::to_value(self.record).map_err(S::Error::custom)?
        else {
            return Err(S::Error::custom(
                "object did not serialize to a JSON object",
            ));
        };

        let mut map = serializer.serialize_map(None)?;
        for (key, value) in &schema {
            map.serialize_entry(key, value)?;
        }
        for (key, raw) in self.custom.iter() {
            if !schema.contains_key(key) {
                map.serialize_entry(key, raw)?;
            }
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sniffs_discriminant() {
        assert_eq!(
            decode_object_type(br#"{"id": "x", "type": "indicator"}"#).unwrap(),
            "indicator"
        );
    }

    #[test]
    fn sniff_rejects_missing_or_garbage() {
        assert!(
            decode_object_type(br#"{"id": "x"}"#)
                .unwrap_err()
                .is_malformed_envelope()
        );
        assert!(
            decode_object_type(br#"{"type": ""}"#)
                .unwrap_err()
                .is_malformed_envelope()
        );
        assert!(
            decode_object_type(b"not json")
                .unwrap_err()
                .is_malformed_envelope()
        );
        assert!(
            decode_object_type(b"[1, 2]")
                .unwrap_err()
                .is_malformed_envelope()
        );
        assert!(
            decode_object_type(br#"{"type": 7}"#)
                .unwrap_err()
                .is_malformed_envelope()
        );
    }

    #[test]
    fn custom_numbers_are_written_as_received() {
        let input = br#"{"type":"attack-pattern","spec_version":"2.1","id":"attack-pattern--0c7b5b88-8ff7-4a4d-aa9d-feb398cd0061","created":"2016-05-12T08:17:27.000Z","modified":"2016-05-12T08:17:27.000Z","name":"Spear Phishing","x_serial":123456789012345678901234567890,"x_big":1e400}"#;
        let pattern = crate::AttackPattern::decode(input).unwrap();

        let encoded = String::from_utf8(pattern.encode().unwrap()).unwrap();
        assert!(
            encoded.contains(r#""x_serial":123456789012345678901234567890"#),
            "{encoded}"
        );
        assert!(encoded.contains(r#""x_big":1e400"#), "{encoded}");
        assert_eq!(encoded.as_bytes(), &input[..]);
    }

    #[test]
    fn schema_properties_win_over_custom_ones() {
        let mut custom = CustomProperties::default();
        custom.insert_value("name", "shadow").unwrap();
        custom.insert_value("x_extra", 1).unwrap();
        let record = serde_json::json!({"name": "real"});

        let encoded = serde_json::to_string(&WithCustom::new(&record, &custom)).unwrap();
        assert_eq!(encoded, r#"{"name":"real","x_extra":1}"#);
    }
}
