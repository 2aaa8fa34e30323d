use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, value::RawValue};

use crate::{
    Audit, Error, ErrorAt, Identifier, Object, Outcome, Registry,
    registry::Decoders,
    store::Store,
};

/// A collection of heterogeneous objects, shipped together.
///
/// A bundle is not an object itself: it has an identifier but no envelope.
#[derive(Debug, Clone)]
pub struct Bundle {
    id: Identifier,
    objects: Vec<Object>,
}

/// The outer envelope, with its objects left undecoded.
#[derive(Deserialize)]
struct RawBundle {
    #[serde(rename = "type")]
    object_type: Option<String>,
    id: Option<Identifier>,
    #[serde(default)]
    objects: Vec<Box<RawValue>>,
}

/// The bundle as written, with each object encoded in place.
#[derive(Serialize)]
struct EncodedBundle<'a> {
    #[serde(rename = "type")]
    object_type: &'static str,
    id: &'a Identifier,
    #[serde(skip_serializing_if = "<[Object]>::is_empty")]
    objects: &'a [Object],
}

impl Bundle {
    pub const TYPE: &'static str = "bundle";

    pub fn new() -> Self {
        Self {
            id: Identifier::new(Self::TYPE),
            objects: Vec::new(),
        }
    }

    pub fn id(&self) -> &Identifier {
        &self.id
    }

    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn push(&mut self, object: impl Into<Object>) {
        self.objects.push(object.into());
    }

    /// Decodes a bundle, decoding each of its objects independently.
    ///
    /// Returns the objects that decoded along with one error per object that did not,
    /// in input order. Only a malformed outer envelope fails the whole call.
    pub fn decode(bytes: &[u8], registry: &Registry) -> Result<(Bundle, Vec<Error>), Error> {
        Self::decode_with(bytes, registry, &Decoders::default())
    }

    /// Like [`Bundle::decode`], consulting `extensions` before the registry.
    pub fn decode_with(
        bytes: &[u8],
        registry: &Registry,
        extensions: &Decoders,
    ) -> Result<(Bundle, Vec<Error>), Error> {
        let raw: RawBundle = serde_json::from_slice(bytes).map_err(Error::malformed_envelope)?;
        match raw.object_type.as_deref() {
            Some(Self::TYPE) => {}
            Some(other) => {
                return Err(Error::malformed_envelope(format!(
                    "expected type '{}', found '{other}'",
                    Self::TYPE
                )));
            }
            None => return Err(Error::malformed_envelope("missing 'type' property")),
        }
        let id = raw
            .id
            .ok_or_else(|| Error::malformed_envelope("missing 'id' property"))?;

        let mut objects = Vec::with_capacity(raw.objects.len());
        let mut errors = Vec::new();
        for (idx, fragment) in raw.objects.iter().enumerate() {
            match registry.decode_with(fragment.get().as_bytes(), extensions) {
                Ok(object) => objects.push(object),
                Err(e) => {
                    let e = e.at(idx).at("objects");
                    log::warn!("skipping bundle element: {e}");
                    errors.push(e);
                }
            }
        }

        Ok((Bundle { id, objects }, errors))
    }

    /// Encodes the bundle with its objects in insertion order.
    pub fn to_value(&self) -> Result<Value, Error> {
        let mut map = Map::new();
        map.insert("type".into(), Value::from(Self::TYPE));
        map.insert("id".into(), Value::from(self.id.as_str()));
        if !self.objects.is_empty() {
            let objects = self
                .objects
                .iter()
                .enumerate()
                .map(|(idx, object)| object.to_value().at(idx).at("objects"))
                .collect::<Result<Vec<_>, _>>()?;
            map.insert("objects".into(), Value::Array(objects));
        }
        Ok(Value::Object(map))
    }

    /// Encodes the bundle. Custom properties of its objects are written exactly as
    /// received.
    pub fn encode(&self) -> Result<Vec<u8>, Error> {
        serde_json::to_vec(&EncodedBundle {
            object_type: Self::TYPE,
            id: &self.id,
            objects: &self.objects,
        })
        .map_err(Error::encode)
    }

    /// Validates the bundle identifier and every object in it.
    pub fn validate(&self) -> Outcome {
        let mut acc = Audit::new();
        acc.check_identifier("id", &self.id, Some(Self::TYPE));
        for (idx, object) in self.objects.iter().enumerate() {
            acc.merge(object.validate().at(idx).at("objects"));
        }
        acc.finish()
    }

    /// Compares two bundles object by object, in order.
    pub fn compare(&self, other: &Bundle) -> Outcome {
        let mut acc = Audit::new();
        acc.compare_value("id", &self.id, &other.id);
        acc.compare_seq("objects", &self.objects, &other.objects, Object::compare);
        acc.finish()
    }

    /// Hands every object to `store`, stopping at the first object it rejects.
    pub fn store_into<S: Store>(&self, store: &mut S) -> Result<(), Error> {
        for (idx, object) in self.objects.iter().enumerate() {
            store.add_object(object).at(idx).at("objects")?;
        }
        Ok(())
    }
}

impl Default for Bundle {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: Into<Object>> FromIterator<O> for Bundle {
    fn from_iter<T: IntoIterator<Item = O>>(iter: T) -> Self {
        Self {
            id: Identifier::new(Self::TYPE),
            objects: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl IntoIterator for Bundle {
    type Item = Object;
    type IntoIter = std::vec::IntoIter<Object>;

    fn into_iter(self) -> Self::IntoIter {
        self.objects.into_iter()
    }
}

impl<'a> IntoIterator for &'a Bundle {
    type Item = &'a Object;
    type IntoIter = std::slice::Iter<'a, Object>;

    fn into_iter(self) -> Self::IntoIter {
        self.objects.iter()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{AttackPattern, Campaign, Indicator, Record, Relationship};

    fn attack_pattern() -> Value {
        json!({
            "type": "attack-pattern",
            "spec_version": "2.1",
            "id": "attack-pattern--0c7b5b88-8ff7-4a4d-aa9d-feb398cd0061",
            "created": "2016-05-12T08:17:27.000Z",
            "modified": "2016-05-12T08:17:27.000Z",
            "name": "Spear Phishing",
            "some_custom_property": "some value"
        })
    }

    #[test]
    fn campaign_indicator_relationship_round_trip() {
        let mut campaign = Campaign::new();
        campaign.name.set("Bank Attack 2016");
        campaign.set_objective("Compromise SWIFT system");

        let mut indicator = Indicator::new();
        indicator.set_pattern("file-object:hashes.md5 = 84714c100d2dfc88629531f6456b8276");

        let relationship =
            Relationship::between("uses", campaign.common.id(), indicator.common.id());

        let campaign_id = campaign.common.id().clone();
        let indicator_id = indicator.common.id().clone();

        let mut bundle = Bundle::new();
        bundle.push(campaign);
        bundle.push(indicator);
        bundle.push(relationship);

        let bytes = bundle.encode().unwrap();
        let (decoded, errors) = Bundle::decode(&bytes, &Registry::new()).unwrap();
        assert!(errors.is_empty());
        assert_eq!(decoded.len(), 3);
        assert_eq!(decoded.id(), bundle.id());

        let Object::Campaign(campaign) = &decoded.objects()[0] else {
            panic!("expected a campaign");
        };
        assert_eq!(campaign.name.get(), Some("Bank Attack 2016"));
        assert_eq!(campaign.objective.as_deref(), Some("Compromise SWIFT system"));

        let Object::Relationship(relationship) = &decoded.objects()[2] else {
            panic!("expected a relationship");
        };
        assert_eq!(relationship.relationship_type.as_deref(), Some("uses"));
        assert_eq!(relationship.source_ref.as_ref(), Some(&campaign_id));
        assert_eq!(relationship.target_ref.as_ref(), Some(&indicator_id));

        let outcome = bundle.compare(&decoded);
        assert!(outcome.is_ok(), "{outcome}");
    }

    #[test]
    fn bad_elements_do_not_sink_the_bundle() {
        let input = json!({
            "type": "bundle",
            "id": "bundle--5d0092c5-5f74-4287-9642-33f4c354e56d",
            "objects": [
                attack_pattern(),
                {"name": "no type here"},
                {"type": "indicator", "id": "indicator--26ffb872-1dd9-446e-b6f5-d58527e5b5d2", "pattern": 42},
                {"type": "x-acme-widget", "id": "x-acme-widget--0f6e8a1c-8a5c-4f0e-9d0b-6b1cbe1d3c5e"}
            ]
        });

        let (bundle, errors) =
            Bundle::decode(input.to_string().as_bytes(), &Registry::new()).unwrap();
        assert_eq!(bundle.len(), 2);
        assert_eq!(errors.len(), 2);
        assert!(errors[0].is_malformed_envelope());
        assert_eq!(errors[0].path().to_string(), "objects[1]");
        assert_eq!(errors[1].path().to_string(), "objects[2]");
        assert_eq!(bundle.objects()[1].kind(), None);
    }

    #[test]
    fn malformed_outer_envelope_is_fatal() {
        let registry = Registry::new();
        for input in [
            "not json",
            "[]",
            r#"{"id": "bundle--5d0092c5-5f74-4287-9642-33f4c354e56d", "objects": []}"#,
            r#"{"type": "report", "id": "bundle--5d0092c5-5f74-4287-9642-33f4c354e56d"}"#,
            r#"{"type": "bundle"}"#,
            r#"{"type": "bundle", "id": "bundle--5d0092c5-5f74-4287-9642-33f4c354e56d", "objects": {}}"#,
        ] {
            let err = Bundle::decode(input.as_bytes(), &registry).unwrap_err();
            assert!(err.is_malformed_envelope(), "{err}");
        }
    }

    #[test]
    fn custom_properties_survive_the_bundle() {
        let input = json!({
            "type": "bundle",
            "id": "bundle--5d0092c5-5f74-4287-9642-33f4c354e56d",
            "objects": [attack_pattern()]
        });
        let (bundle, errors) =
            Bundle::decode(input.to_string().as_bytes(), &Registry::new()).unwrap();
        assert!(errors.is_empty());

        let Object::AttackPattern(pattern) = &bundle.objects()[0] else {
            panic!("expected an attack pattern");
        };
        assert_eq!(
            pattern
                .common
                .custom_properties()
                .require::<String>("some_custom_property")
                .unwrap(),
            "some value"
        );

        let encoded: Value = serde_json::from_slice(&bundle.encode().unwrap()).unwrap();
        assert_eq!(encoded, input);
    }

    #[test]
    fn custom_numbers_survive_the_bundle() {
        let input = r#"{"type":"bundle","id":"bundle--5d0092c5-5f74-4287-9642-33f4c354e56d","objects":[{"type":"x-acme-widget","id":"x-acme-widget--0f6e8a1c-8a5c-4f0e-9d0b-6b1cbe1d3c5e","x_serial":123456789012345678901234567890,"x_big":1e400}]}"#;
        let (bundle, errors) = Bundle::decode(input.as_bytes(), &Registry::new()).unwrap();
        assert!(errors.is_empty());
        assert_eq!(String::from_utf8(bundle.encode().unwrap()).unwrap(), input);
    }

    #[test]
    fn empty_bundle_omits_objects() {
        let bundle = Bundle::new();
        let value = bundle.to_value().unwrap();
        assert_eq!(value["type"], json!("bundle"));
        assert!(value.get("objects").is_none());
        let encoded: Value = serde_json::from_slice(&bundle.encode().unwrap()).unwrap();
        assert_eq!(encoded, value);
        assert!(bundle.validate().is_ok());
    }

    #[test]
    fn validation_sweep_reports_positions() {
        let bundle: Bundle = [AttackPattern::new()].into_iter().collect();
        let outcome = bundle.validate();
        assert_eq!(outcome.problem_count(), 1);
        assert_eq!(
            outcome.problems().next().map(|d| d.path().to_string()),
            Some("objects[0].name".to_string())
        );
    }

    #[test]
    fn stores_every_object() {
        let pattern = AttackPattern::decode(attack_pattern().to_string().as_bytes()).unwrap();
        let bundle: Bundle = [pattern].into_iter().collect();

        let mut store: Vec<Object> = Vec::new();
        bundle.store_into(&mut store).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store[0].id(), bundle.objects()[0].id());
        store.close().unwrap();
    }
}
