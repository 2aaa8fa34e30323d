use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::{
    Audit, CommonProperties, Record,
    object::ObjectKind,
    properties::{
        Aliases, Description, Goals, IntoValues, Motivation, Name, ResourceLevel, Roles,
        SeenWindow, TraitKind, TraitRef, add_values,
    },
};

/// An individual, group or organization believed to operate with malicious intent.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThreatActor {
    #[serde(flatten)]
    pub common: CommonProperties,
    #[serde(flatten)]
    pub name: Name,
    #[serde(flatten)]
    pub description: Description,
    #[serde(flatten)]
    pub aliases: Aliases,
    #[serde(flatten)]
    pub seen: SeenWindow,
    #[serde(flatten)]
    pub roles: Roles,
    #[serde(flatten)]
    pub goals: Goals,
    #[serde(flatten)]
    pub resource_level: ResourceLevel,
    #[serde(flatten)]
    pub motivation: Motivation,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub threat_actor_types: Vec<String>,
    pub sophistication: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub personal_motivations: Vec<String>,
}

impl ThreatActor {
    pub fn new() -> Self {
        Self {
            common: CommonProperties::new(Self::KIND.as_str()),
            ..Default::default()
        }
    }

    pub fn add_threat_actor_types(&mut self, values: impl IntoValues) {
        add_values(&mut self.threat_actor_types, values);
    }

    pub fn set_sophistication(&mut self, sophistication: impl Into<String>) {
        self.sophistication = Some(sophistication.into());
    }

    pub fn add_personal_motivations(&mut self, values: impl IntoValues) {
        add_values(&mut self.personal_motivations, values);
    }
}

impl Record for ThreatActor {
    const KIND: ObjectKind = ObjectKind::ThreatActor;
    const TRAITS: &'static [TraitKind] = &[
        TraitKind::Name,
        TraitKind::Description,
        TraitKind::Aliases,
        TraitKind::SeenWindow,
        TraitKind::Roles,
        TraitKind::Goals,
        TraitKind::ResourceLevel,
        TraitKind::Motivation,
    ];
    const PROPERTIES: &'static [&'static str] = &[
        "threat_actor_types",
        "sophistication",
        "personal_motivations",
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
            TraitRef::Aliases(&self.aliases),
            TraitRef::SeenWindow(&self.seen),
            TraitRef::Roles(&self.roles),
            TraitRef::Goals(&self.goals),
            TraitRef::ResourceLevel(&self.resource_level),
            TraitRef::Motivation(&self.motivation),
        ]
    }

    fn check_properties(&self, acc: &mut Audit) {
        acc.require("name", &self.name.name);
        acc.check_items("threat_actor_types", &self.threat_actor_types);
        acc.check_text("sophistication", self.sophistication.as_deref());
        acc.check_items("personal_motivations", &self.personal_motivations);
    }

    fn compare_properties(&self, other: &Self, acc: &mut Audit) {
        acc.compare_values(
            "threat_actor_types",
            &self.threat_actor_types,
            &other.threat_actor_types,
        );
        acc.compare_value("sophistication", &self.sophistication, &other.sophistication);
        acc.compare_values(
            "personal_motivations",
            &self.personal_motivations,
            &other.personal_motivations,
        );
    }
}
