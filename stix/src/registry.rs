use std::{borrow::Cow, fmt};

use indexmap::IndexMap;

use crate::{
    AttackPattern, Campaign, CourseOfAction, CustomObject, Error, Grouping, Identity, Indicator,
    Infrastructure, IntrusionSet, Location, Malware, MalwareAnalysis, Note, Object, ObservedData,
    Opinion, Record, Relationship, Report, Sighting, ThreatActor, Tool, Vulnerability,
    record::decode_object_type,
};

/// Decodes one encoded object.
pub type DecodeFn = dyn Fn(&[u8]) -> Result<Object, Error> + Send + Sync;

/// Decoders keyed by the `type` discriminant they handle.
pub type Decoders = IndexMap<Cow<'static, str>, Box<DecodeFn>>;

/// Maps `type` discriminants to decoders.
///
/// A registry is built once and then only read; per-call additions go through
/// [`Registry::decode_with`].
pub struct Registry {
    decoders: Decoders,
    fallback: bool,
}

impl Registry {
    /// A registry with a decoder for every built-in kind, falling back to
    /// [`CustomObject`] for any other type.
    pub fn new() -> Self {
        Self::empty()
            .with_record::<AttackPattern>()
            .with_record::<Campaign>()
            .with_record::<CourseOfAction>()
            .with_record::<Grouping>()
            .with_record::<Identity>()
            .with_record::<Indicator>()
            .with_record::<Infrastructure>()
            .with_record::<IntrusionSet>()
            .with_record::<Location>()
            .with_record::<Malware>()
            .with_record::<MalwareAnalysis>()
            .with_record::<Note>()
            .with_record::<ObservedData>()
            .with_record::<Opinion>()
            .with_record::<Report>()
            .with_record::<ThreatActor>()
            .with_record::<Tool>()
            .with_record::<Vulnerability>()
            .with_record::<Relationship>()
            .with_record::<Sighting>()
    }

    /// A registry with no decoders. Every type falls back to [`CustomObject`].
    pub fn empty() -> Self {
        Self {
            decoders: Decoders::default(),
            fallback: true,
        }
    }

    /// Whether unregistered types decode as [`CustomObject`] instead of failing with an
    /// unknown-type error.
    pub fn with_fallback(mut self, fallback: bool) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn with_decoder(
        mut self,
        object_type: impl Into<Cow<'static, str>>,
        decoder: impl Fn(&[u8]) -> Result<Object, Error> + Send + Sync + 'static,
    ) -> Self {
        self.insert(object_type, decoder);
        self
    }

    pub fn with_record<R: Record + 'static>(mut self) -> Self {
        self.insert_record::<R>();
        self
    }

    /// Registers `decoder` for `object_type`, replacing any earlier decoder.
    pub fn insert(
        &mut self,
        object_type: impl Into<Cow<'static, str>>,
        decoder: impl Fn(&[u8]) -> Result<Object, Error> + Send + Sync + 'static,
    ) {
        self.decoders.insert(object_type.into(), Box::new(decoder));
    }

    pub fn insert_record<R: Record + 'static>(&mut self) {
        self.insert(R::KIND.as_str(), |bytes: &[u8]| {
            R::decode(bytes).map(Into::into)
        });
    }

    pub fn contains(&self, object_type: &str) -> bool {
        self.decoders.contains_key(object_type)
    }

    /// The registered types, in registration order.
    pub fn types(&self) -> impl Iterator<Item = &str> {
        self.decoders.keys().map(|key| &**key)
    }

    pub fn decode(&self, bytes: &[u8]) -> Result<Object, Error> {
        self.decode_with(bytes, &Decoders::default())
    }

    /// Decodes one object, consulting `extensions` before the registered decoders.
    pub fn decode_with(&self, bytes: &[u8], extensions: &Decoders) -> Result<Object, Error> {
        let object_type = decode_object_type(bytes)?;
        if let Some(decoder) = extensions
            .get(object_type.as_str())
            .or_else(|| self.decoders.get(object_type.as_str()))
        {
            return decoder(bytes);
        }

        if !self.fallback {
            return Err(Error::unknown_type(object_type));
        }
        log::debug!("no decoder for '{object_type}', decoding as a custom object");
        CustomObject::decode(bytes).map(Object::Custom)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("types", &self.types().collect::<Vec<_>>())
            .field("fallback", &self.fallback)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use strum::IntoEnumIterator;

    use super::*;
    use crate::ObjectKind;

    fn envelope(object_type: &str) -> serde_json::Value {
        json!({
            "type": object_type,
            "spec_version": "2.1",
            "id": format!("{object_type}--8e2e2d2b-17d4-4cbf-938f-98ee46b3cd3f"),
            "created": "2016-04-06T20:03:48.000Z",
            "modified": "2016-04-06T20:03:48.000Z"
        })
    }

    #[test]
    fn every_kind_is_registered() {
        let registry = Registry::new();
        for kind in ObjectKind::iter() {
            assert!(registry.contains(kind.as_str()), "{kind}");
            let object = registry
                .decode(envelope(kind.as_str()).to_string().as_bytes())
                .unwrap();
            assert_eq!(object.kind(), Some(kind));
        }
        assert_eq!(registry.types().count(), ObjectKind::iter().count());
    }

    const IDENTITY: &str = "identity--311b2d2d-f010-4473-83ec-1edf84858f4c";
    const SOFTWARE: &str = "software--a1827f6d-ca53-5605-9e93-4316cd22a00a";
    const FILE: &str = "file--364fe3e5-b1f4-5ba3-b951-ee5983b3538d";
    const CAMPAIGN: &str = "campaign--8e2e2d2b-17d4-4cbf-938f-98ee46b3cd3f";
    const INDICATOR: &str = "indicator--26ffb872-1dd9-446e-b6f5-d58527e5b5d2";

    /// An object of `kind` with every property group and kind-specific property set.
    fn populated(kind: ObjectKind) -> serde_json::Value {
        let phases = json!([{"kill_chain_name": "lockheed-martin-cyber-kill-chain", "phase_name": "delivery"}]);
        let properties = match kind {
            ObjectKind::AttackPattern => json!({
                "created_by_ref": IDENTITY,
                "revoked": true,
                "labels": ["phishing"],
                "confidence": 80,
                "lang": "en",
                "external_references": [{
                    "source_name": "capec",
                    "url": "https://capec.mitre.org/data/definitions/163.html",
                    "external_id": "CAPEC-163"
                }],
                "object_marking_refs": ["marking-definition--613f2e26-407d-48c7-9eca-b8e91df99dc9"],
                "granular_markings": [{
                    "marking_ref": "marking-definition--34098fce-860f-48ae-8e50-ebd3cc5e41da",
                    "selectors": ["description"]
                }],
                "extensions": {
                    "extension-definition--d83fce45-ef58-4c6c-a3f4-1fbc32e98c6e": {"extension_type": "property-extension"}
                },
                "name": "Spear Phishing",
                "description": "Targeted email with a malicious attachment.",
                "aliases": ["Phishing"],
                "kill_chain_phases": phases
            }),
            ObjectKind::Campaign => json!({
                "name": "Bank Attack 2016",
                "description": "Attacks against SWIFT terminals.",
                "aliases": ["Heist"],
                "first_seen": "2016-01-08T12:50:40.123Z",
                "last_seen": "2016-08-08T12:50:40.123Z",
                "objective": "Compromise SWIFT system"
            }),
            ObjectKind::CourseOfAction => json!({
                "name": "Add TCP port 80 Filter Rule",
                "description": "Block outbound port 80 at the perimeter."
            }),
            ObjectKind::Grouping => json!({
                "name": "Suspicious emails",
                "description": "Collected for triage.",
                "context": "suspicious-activity",
                "object_refs": [INDICATOR, CAMPAIGN]
            }),
            ObjectKind::Identity => json!({
                "name": "ACME Widget, Inc.",
                "description": "A widget maker.",
                "roles": ["analyst"],
                "identity_class": "organization",
                "sectors": ["technology"],
                "contact_information": "soc@acme.example"
            }),
            ObjectKind::Indicator => json!({
                "name": "Poison Ivy dropper",
                "description": "MD5 of a known dropper.",
                "kill_chain_phases": phases,
                "indicator_types": ["malicious-activity"],
                "pattern": "[file:hashes.MD5 = '84714c100d2dfc88629531f6456b8276']",
                "pattern_type": "stix",
                "pattern_version": "2.1",
                "valid_from": "2016-01-01T00:00:00Z",
                "valid_until": "2017-01-01T00:00:00Z"
            }),
            ObjectKind::Infrastructure => json!({
                "name": "Poison Ivy C2",
                "description": "Command and control servers.",
                "aliases": ["PI-C2"],
                "kill_chain_phases": phases,
                "first_seen": "2016-01-01T00:00:00Z",
                "last_seen": "2016-02-01T00:00:00Z",
                "infrastructure_types": ["command-and-control"]
            }),
            ObjectKind::IntrusionSet => json!({
                "name": "Bobcat Breakin",
                "description": "Incidents usually targeting banks.",
                "aliases": ["Zookeeper"],
                "first_seen": "2016-01-01T00:00:00Z",
                "last_seen": "2016-02-01T00:00:00Z",
                "goals": ["acquisition-theft"],
                "resource_level": "organization",
                "primary_motivation": "organizational-gain",
                "secondary_motivations": ["personal-gain"]
            }),
            ObjectKind::Location => json!({
                "name": "Paris office",
                "description": "Regional headquarters.",
                "latitude": 48.8566,
                "longitude": 2.3522,
                "precision": 1000.0,
                "region": "western-europe",
                "country": "FR",
                "administrative_area": "Ile-de-France",
                "city": "Paris",
                "street_address": "1 Rue de Rivoli",
                "postal_code": "75001"
            }),
            ObjectKind::Malware => json!({
                "name": "Cryptolocker",
                "description": "Ransomware.",
                "aliases": ["Crilock"],
                "kill_chain_phases": phases,
                "first_seen": "2013-09-05T00:00:00Z",
                "last_seen": "2014-06-02T00:00:00Z",
                "malware_types": ["ransomware"],
                "is_family": true,
                "operating_system_refs": [SOFTWARE],
                "architecture_execution_envs": ["x86"],
                "implementation_languages": ["c"],
                "capabilities": ["accesses-remote-machines"],
                "sample_refs": [FILE]
            }),
            ObjectKind::MalwareAnalysis => json!({
                "product": "microsoft",
                "version": "5.1.0",
                "host_vm_ref": SOFTWARE,
                "operating_system_ref": SOFTWARE,
                "installed_software_refs": [SOFTWARE],
                "configuration_version": "1.7",
                "modules": ["Super Analyzer"],
                "analysis_engine_version": "5.1.0",
                "analysis_definition_version": "085a4c4d",
                "submitted": "2018-11-23T08:17:27.000Z",
                "analysis_started": "2018-11-23T08:17:27.000Z",
                "analysis_ended": "2018-11-23T08:20:27.000Z",
                "result_name": "MegaRansom",
                "result": "malicious",
                "analysis_sco_refs": [FILE],
                "sample_ref": FILE
            }),
            ObjectKind::Note => json!({
                "abstract": "Tracking Team Note#1",
                "content": "This note indicates the various steps taken by the threat analyst team.",
                "authors": ["John Doe"],
                "object_refs": [CAMPAIGN]
            }),
            ObjectKind::ObservedData => json!({
                "first_observed": "2015-12-21T19:00:00Z",
                "last_observed": "2015-12-21T19:00:00Z",
                "number_observed": 50,
                "object_refs": [FILE]
            }),
            ObjectKind::Opinion => json!({
                "explanation": "This doesn't seem like it is feasible.",
                "opinion": "strongly-disagree",
                "authors": ["Ryan Jones"],
                "object_refs": [CAMPAIGN]
            }),
            ObjectKind::Report => json!({
                "name": "The Black Vine Cyberespionage Group",
                "description": "A simple report with an indicator and campaign.",
                "report_types": ["campaign"],
                "published": "2016-01-20T17:00:00.000Z",
                "object_refs": [INDICATOR, CAMPAIGN]
            }),
            ObjectKind::ThreatActor => json!({
                "name": "Evil Org",
                "description": "The Evil Org threat actor group.",
                "aliases": ["Evil Corp"],
                "first_seen": "2015-01-01T00:00:00Z",
                "last_seen": "2016-01-01T00:00:00Z",
                "roles": ["director"],
                "goals": ["Steal bank money"],
                "resource_level": "organization",
                "primary_motivation": "personal-gain",
                "secondary_motivations": ["dominance"],
                "threat_actor_types": ["crime-syndicate"],
                "sophistication": "expert",
                "personal_motivations": ["revenge"]
            }),
            ObjectKind::Tool => json!({
                "name": "VNC",
                "description": "Remote desktop sharing.",
                "aliases": ["Virtual Network Computing"],
                "kill_chain_phases": phases,
                "tool_types": ["remote-access"],
                "tool_version": "4.1"
            }),
            ObjectKind::Vulnerability => json!({
                "name": "CVE-2016-1234",
                "description": "A buffer overflow."
            }),
            ObjectKind::Relationship => json!({
                "description": "The indicator points at the campaign.",
                "relationship_type": "indicates",
                "source_ref": INDICATOR,
                "target_ref": CAMPAIGN,
                "start_time": "2016-01-01T00:00:00Z",
                "stop_time": "2016-02-01T00:00:00Z"
            }),
            ObjectKind::Sighting => json!({
                "description": "Seen at ACME.",
                "first_seen": "2016-01-01T00:00:00Z",
                "last_seen": "2016-02-01T00:00:00Z",
                "count": 3,
                "sighting_of_ref": INDICATOR,
                "observed_data_refs": ["observed-data--b67d30ff-02ac-498a-92f9-32f845f448cf"],
                "where_sighted_refs": [IDENTITY],
                "summary": false
            }),
        };

        let mut value = envelope(kind.as_str());
        if let (Some(map), serde_json::Value::Object(properties)) =
            (value.as_object_mut(), properties)
        {
            map.extend(properties);
        }
        value
    }

    #[test]
    fn every_kind_round_trips() {
        let registry = Registry::new();
        for kind in ObjectKind::iter() {
            let input = populated(kind);
            let object = registry.decode(input.to_string().as_bytes()).unwrap();
            assert_eq!(object.kind(), Some(kind));
            assert!(
                object.common().custom_properties().is_empty(),
                "{kind}: {:?}",
                object.common().custom_properties().keys().collect::<Vec<_>>()
            );

            let encoded = object.encode().unwrap();
            let value: serde_json::Value = serde_json::from_slice(&encoded).unwrap();
            assert_eq!(value, input, "{kind}");

            let again = registry.decode(&encoded).unwrap();
            let outcome = object.compare(&again);
            assert!(outcome.is_ok(), "{kind}: {outcome}");
        }
    }

    #[test]
    fn key_order_does_not_matter() {
        let input = r#"{
            "tool_version": "4.1",
            "kill_chain_phases": [{"phase_name": "delivery", "kill_chain_name": "lockheed-martin-cyber-kill-chain"}],
            "modified": "2016-04-06T20:03:48.000Z",
            "name": "VNC",
            "id": "tool--8e2e2d2b-17d4-4cbf-938f-98ee46b3cd3f",
            "tool_types": ["remote-access"],
            "aliases": ["Virtual Network Computing"],
            "created": "2016-04-06T20:03:48.000Z",
            "description": "Remote desktop sharing.",
            "spec_version": "2.1",
            "type": "tool"
        }"#;
        let registry = Registry::new();
        let shuffled = registry.decode(input.as_bytes()).unwrap();
        let ordered = registry
            .decode(populated(ObjectKind::Tool).to_string().as_bytes())
            .unwrap();

        assert!(shuffled.common().custom_properties().is_empty());
        assert!(shuffled.compare(&ordered).is_ok());
        assert_eq!(shuffled.to_value().unwrap(), ordered.to_value().unwrap());
    }

    #[test]
    fn unknown_type_falls_back() {
        let registry = Registry::new();
        let mut value = envelope("x-acme-widget");
        value["x_size"] = json!(3);

        let object = registry.decode(value.to_string().as_bytes()).unwrap();
        assert_eq!(object.kind(), None);
        assert_eq!(object.object_type(), "x-acme-widget");
        assert_eq!(
            object
                .common()
                .custom_properties()
                .get::<u32>("x_size")
                .unwrap()
                .unwrap(),
            3
        );
    }

    #[test]
    fn unknown_type_without_fallback() {
        let registry = Registry::new().with_fallback(false);
        let err = registry
            .decode(envelope("x-acme-widget").to_string().as_bytes())
            .unwrap_err();
        assert!(err.is_unknown_type());
    }

    #[test]
    fn extensions_take_precedence() {
        let registry = Registry::new().with_fallback(false);
        let mut extensions = Decoders::default();
        extensions.insert(
            "x-acme-widget".into(),
            Box::new(|bytes: &[u8]| -> Result<Object, Error> {
                let mut object = CustomObject::decode(bytes)?;
                object.insert_custom_property("x_seen_by", "acme")?;
                Ok(Object::Custom(object))
            }),
        );

        let object = registry
            .decode_with(envelope("x-acme-widget").to_string().as_bytes(), &extensions)
            .unwrap();
        assert!(object.common().custom_properties().contains("x_seen_by"));
    }

    #[test]
    fn extra_decoders_are_registered_by_type() {
        let registry = Registry::empty()
            .with_record::<Indicator>()
            .with_decoder("x-acme-widget", |bytes| {
                CustomObject::decode(bytes).map(Object::Custom)
            });
        assert_eq!(
            registry.types().collect::<Vec<_>>(),
            vec!["indicator", "x-acme-widget"]
        );

        let object = registry
            .decode(envelope("tool").to_string().as_bytes())
            .unwrap();
        assert_eq!(object.kind(), None);
    }

    #[test]
    fn malformed_input() {
        let registry = Registry::new();
        assert!(
            registry
                .decode(br#"{"name": "no type"}"#)
                .unwrap_err()
                .is_malformed_envelope()
        );
    }
}
