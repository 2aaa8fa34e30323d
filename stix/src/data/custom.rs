use indexmap::IndexMap;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::value::RawValue;

use crate::{Error, ErrorAt};

/// Properties of a decoded object that are not part of its kind's schema.
///
/// Values are kept in their encoded form until a caller asks for them with a concrete
/// type, and are written back verbatim on encode.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomProperties(IndexMap<String, Box<RawValue>>);

impl CustomProperties {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RawValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_ref()))
    }

    /// Gets a property's still-encoded value.
    pub fn get_raw(&self, key: &str) -> Option<&RawValue> {
        self.0.get(key).map(AsRef::as_ref)
    }

    /// Gets a property's value by key, or returns `None` if the key doesn't exist.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<Result<T, Error>> {
        self.get_raw(key).map(|raw| {
            serde_json::from_str(raw.get())
                .map_err(Error::from)
                .at(key.to_string())
        })
    }

    /// Gets a property's value by key, returning an error if the key doesn't exist or
    /// doesn't deserialize into the provided type.
    pub fn require<T: DeserializeOwned>(&self, key: &str) -> Result<T, Error> {
        self.get::<T>(key)
            .transpose()?
            .ok_or_else(|| Error::custom(format!("custom property {key} is required")))
    }

    pub fn insert_raw(&mut self, key: impl Into<String>, value: Box<RawValue>) {
        self.0.insert(key.into(), value);
    }

    /// Encodes `value` and stores it under `key`, replacing any previous value.
    pub fn insert_value(&mut self, key: impl Into<String>, value: impl Serialize) -> Result<(), Error> {
        let raw = serde_json::value::to_raw_value(&value).map_err(Error::encode)?;
        self.insert_raw(key, raw);
        Ok(())
    }

    pub fn remove(&mut self, key: &str) -> Option<Box<RawValue>> {
        self.0.shift_remove(key)
    }
}

impl FromIterator<(String, Box<RawValue>)> for CustomProperties {
    fn from_iter<T: IntoIterator<Item = (String, Box<RawValue>)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a CustomProperties {
    type Item = (&'a String, &'a Box<RawValue>);
    type IntoIter = indexmap::map::Iter<'a, String, Box<RawValue>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
