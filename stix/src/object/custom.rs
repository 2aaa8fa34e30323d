use serde::Serialize;
use serde_json::Value;

use crate::{
    Audit, Check, Compare, CommonProperties, Error, Outcome,
    common::COMMON_KEYS,
    error::Path,
    record::{WithCustom, decode_split},
};

/// An object of a type no decoder is registered for.
///
/// Only the envelope is typed; every other property is kept in the custom properties,
/// so the object still round-trips without loss.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct CustomObject {
    common: CommonProperties,
}

impl CustomObject {
    pub fn new(object_type: impl Into<String>) -> Self {
        Self {
            common: CommonProperties::new(object_type),
        }
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, Error> {
        let (mut common, custom): (CommonProperties, _) =
            decode_split(bytes, |key| COMMON_KEYS.contains(&key))?;
        if common.object_type().is_empty() {
            return Err(Error::malformed_envelope("missing 'type' property"));
        }
        common.set_custom_properties(custom);
        common.set_raw_data(bytes);
        Ok(Self { common })
    }

    pub fn common(&self) -> &CommonProperties {
        &self.common
    }

    pub fn common_mut(&mut self) -> &mut CommonProperties {
        &mut self.common
    }

    /// Stores a property outside the envelope.
    pub fn insert_custom_property(
        &mut self,
        key: impl Into<String>,
        value: impl Serialize,
    ) -> Result<(), Error> {
        let key = key.into();
        if COMMON_KEYS.contains(&key.as_str()) {
            return Err(Error::validation(format!(
                "'{key}' is an envelope property, not a custom one"
            )));
        }
        self.common.custom_properties_mut().insert_value(key, value)
    }

    pub fn to_value(&self) -> Result<Value, Error> {
        serde_json::to_value(WithCustom::new(&self.common, self.common.custom_properties()))
            .map_err(Error::encode)
    }

    /// Encodes the envelope and writes every other property exactly as received.
    pub fn encode(&self) -> Result<Vec<u8>, Error> {
        serde_json::to_vec(&WithCustom::new(&self.common, self.common.custom_properties()))
            .map_err(Error::encode)
    }

    /// Validates the envelope only; nothing is known about the other properties.
    pub fn validate(&self) -> Outcome {
        let mut acc = Audit::new();
        acc.merge(self.common.check());
        for key in self.common.custom_properties().keys() {
            if COMMON_KEYS.contains(&key) {
                acc.fail(
                    Path::from(key.to_string()),
                    "custom property shadows a schema property",
                );
            }
        }
        acc.finish()
    }

    pub fn compare(&self, other: &Self) -> Outcome {
        self.common.compare(&other.common)
    }
}
