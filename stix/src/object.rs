//! The STIX domain and relationship objects.

use from_variants::FromVariants;
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::{Audit, CommonProperties, Error, Identifier, Outcome, Record, record::WithCustom};

mod attack_pattern;
mod campaign;
mod course_of_action;
mod custom;
mod grouping;
mod identity;
mod indicator;
mod infrastructure;
mod intrusion_set;
mod location;
mod malware;
mod malware_analysis;
mod note;
mod observed_data;
mod opinion;
mod relationship;
mod report;
mod sighting;
mod threat_actor;
mod tool;
mod vulnerability;

pub use attack_pattern::AttackPattern;
pub use campaign::Campaign;
pub use course_of_action::CourseOfAction;
pub use custom::CustomObject;
pub use grouping::Grouping;
pub use identity::Identity;
pub use indicator::Indicator;
pub use infrastructure::Infrastructure;
pub use intrusion_set::IntrusionSet;
pub use location::Location;
pub use malware::Malware;
pub use malware_analysis::MalwareAnalysis;
pub use note::Note;
pub use observed_data::ObservedData;
pub use opinion::Opinion;
pub use relationship::Relationship;
pub use report::Report;
pub use sighting::Sighting;
pub use threat_actor::ThreatActor;
pub use tool::Tool;
pub use vulnerability::Vulnerability;

/// The object kinds this crate has typed records for.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
    strum::EnumIter,
)]
#[strum(serialize_all = "kebab-case")]
pub enum ObjectKind {
    AttackPattern,
    Campaign,
    CourseOfAction,
    Grouping,
    Identity,
    Indicator,
    Infrastructure,
    IntrusionSet,
    Location,
    Malware,
    MalwareAnalysis,
    Note,
    ObservedData,
    Opinion,
    Report,
    ThreatActor,
    Tool,
    Vulnerability,
    Relationship,
    Sighting,
}

impl ObjectKind {
    /// The `type` discriminant of this kind.
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// Any decoded object: one of the typed records, or a [`CustomObject`] for types no
/// decoder is registered for.
#[derive(Debug, Clone, FromVariants)]
#[non_exhaustive]
pub enum Object {
    AttackPattern(AttackPattern),
    Campaign(Campaign),
    CourseOfAction(CourseOfAction),
    Grouping(Grouping),
    Identity(Identity),
    Indicator(Indicator),
    Infrastructure(Infrastructure),
    IntrusionSet(IntrusionSet),
    Location(Location),
    Malware(Malware),
    MalwareAnalysis(MalwareAnalysis),
    Note(Note),
    ObservedData(ObservedData),
    Opinion(Opinion),
    Report(Report),
    ThreatActor(ThreatActor),
    Tool(Tool),
    Vulnerability(Vulnerability),
    Relationship(Relationship),
    Sighting(Sighting),
    Custom(CustomObject),
}

/// Runs `$body` against the record inside any variant.
macro_rules! dispatch {
    ($object:expr, $inner:ident => $body:expr) => {
        match $object {
            Object::AttackPattern($inner) => $body,
            Object::Campaign($inner) => $body,
            Object::CourseOfAction($inner) => $body,
            Object::Grouping($inner) => $body,
            Object::Identity($inner) => $body,
            Object::Indicator($inner) => $body,
            Object::Infrastructure($inner) => $body,
            Object::IntrusionSet($inner) => $body,
            Object::Location($inner) => $body,
            Object::Malware($inner) => $body,
            Object::MalwareAnalysis($inner) => $body,
            Object::Note($inner) => $body,
            Object::ObservedData($inner) => $body,
            Object::Opinion($inner) => $body,
            Object::Report($inner) => $body,
            Object::ThreatActor($inner) => $body,
            Object::Tool($inner) => $body,
            Object::Vulnerability($inner) => $body,
            Object::Relationship($inner) => $body,
            Object::Sighting($inner) => $body,
            Object::Custom($inner) => $body,
        }
    };
}

/// Runs `$body` against two records of the same variant, or evaluates `$mismatch`.
macro_rules! dispatch_pair {
    ($left:expr, $right:expr, ($a:ident, $b:ident) => $body:expr, _ => $mismatch:expr) => {
        match ($left, $right) {
            (Object::AttackPattern($a), Object::AttackPattern($b)) => $body,
            (Object::Campaign($a), Object::Campaign($b)) => $body,
            (Object::CourseOfAction($a), Object::CourseOfAction($b)) => $body,
            (Object::Grouping($a), Object::Grouping($b)) => $body,
            (Object::Identity($a), Object::Identity($b)) => $body,
            (Object::Indicator($a), Object::Indicator($b)) => $body,
            (Object::Infrastructure($a), Object::Infrastructure($b)) => $body,
            (Object::IntrusionSet($a), Object::IntrusionSet($b)) => $body,
            (Object::Location($a), Object::Location($b)) => $body,
            (Object::Malware($a), Object::Malware($b)) => $body,
            (Object::MalwareAnalysis($a), Object::MalwareAnalysis($b)) => $body,
            (Object::Note($a), Object::Note($b)) => $body,
            (Object::ObservedData($a), Object::ObservedData($b)) => $body,
            (Object::Opinion($a), Object::Opinion($b)) => $body,
            (Object::Report($a), Object::Report($b)) => $body,
            (Object::ThreatActor($a), Object::ThreatActor($b)) => $body,
            (Object::Tool($a), Object::Tool($b)) => $body,
            (Object::Vulnerability($a), Object::Vulnerability($b)) => $body,
            (Object::Relationship($a), Object::Relationship($b)) => $body,
            (Object::Sighting($a), Object::Sighting($b)) => $body,
            (Object::Custom($a), Object::Custom($b)) => $body,
            _ => $mismatch,
        }
    };
}

impl Object {
    /// The typed kind of this object, or `None` for a [`CustomObject`].
    pub fn kind(&self) -> Option<ObjectKind> {
        Some(match self {
            Object::AttackPattern(_) => ObjectKind::AttackPattern,
            Object::Campaign(_) => ObjectKind::Campaign,
            Object::CourseOfAction(_) => ObjectKind::CourseOfAction,
            Object::Grouping(_) => ObjectKind::Grouping,
            Object::Identity(_) => ObjectKind::Identity,
            Object::Indicator(_) => ObjectKind::Indicator,
            Object::Infrastructure(_) => ObjectKind::Infrastructure,
            Object::IntrusionSet(_) => ObjectKind::IntrusionSet,
            Object::Location(_) => ObjectKind::Location,
            Object::Malware(_) => ObjectKind::Malware,
            Object::MalwareAnalysis(_) => ObjectKind::MalwareAnalysis,
            Object::Note(_) => ObjectKind::Note,
            Object::ObservedData(_) => ObjectKind::ObservedData,
            Object::Opinion(_) => ObjectKind::Opinion,
            Object::Report(_) => ObjectKind::Report,
            Object::ThreatActor(_) => ObjectKind::ThreatActor,
            Object::Tool(_) => ObjectKind::Tool,
            Object::Vulnerability(_) => ObjectKind::Vulnerability,
            Object::Relationship(_) => ObjectKind::Relationship,
            Object::Sighting(_) => ObjectKind::Sighting,
            Object::Custom(_) => return None,
        })
    }

    pub fn object_type(&self) -> &str {
        self.common().object_type()
    }

    pub fn common(&self) -> &CommonProperties {
        dispatch!(self, inner => inner.common())
    }

    pub fn common_mut(&mut self) -> &mut CommonProperties {
        dispatch!(self, inner => inner.common_mut())
    }

    pub fn id(&self) -> &Identifier {
        self.common().id()
    }

    /// Validates the object. See [`Record::validate`].
    pub fn validate(&self) -> Outcome {
        dispatch!(self, inner => inner.validate())
    }

    /// Compares two objects. Objects of different kinds never match.
    pub fn compare(&self, other: &Object) -> Outcome {
        dispatch_pair!(self, other, (a, b) => a.compare(b), _ => {
            let mut acc = Audit::new();
            acc.compare_value("type", self.object_type(), other.object_type());
            acc.finish()
        })
    }

    pub fn to_value(&self) -> Result<Value, Error> {
        dispatch!(self, inner => inner.to_value())
    }

    /// Encodes the object, writing custom properties exactly as received.
    pub fn encode(&self) -> Result<Vec<u8>, Error> {
        serde_json::to_vec(self).map_err(Error::encode)
    }
}

impl Serialize for Object {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        dispatch!(self, inner => {
            WithCustom::new(inner, inner.common().custom_properties()).serialize(serializer)
        })
    }
}
