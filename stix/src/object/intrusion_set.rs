use serde::{Deserialize, Serialize};

use crate::{
    Audit, CommonProperties, Record,
    object::ObjectKind,
    properties::{
        Aliases, Description, Goals, Motivation, Name, ResourceLevel, SeenWindow, TraitKind,
        TraitRef,
    },
};

/// Adversarial behaviors and resources with common properties believed to be orchestrated
/// by a single organization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IntrusionSet {
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
    pub goals: Goals,
    #[serde(flatten)]
    pub resource_level: ResourceLevel,
    #[serde(flatten)]
    pub motivation: Motivation,
}

impl IntrusionSet {
    pub fn new() -> Self {
        Self {
            common: CommonProperties::new(Self::KIND.as_str()),
            ..Default::default()
        }
    }
}

impl Record for IntrusionSet {
    const KIND: ObjectKind = ObjectKind::IntrusionSet;
    const TRAITS: &'static [TraitKind] = &[
        TraitKind::Name,
        TraitKind::Description,
        TraitKind::Aliases,
        TraitKind::SeenWindow,
        TraitKind::Goals,
        TraitKind::ResourceLevel,
        TraitKind::Motivation,
    ];
    const PROPERTIES: &'static [&'static str] = &[];

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
            TraitRef::Goals(&self.goals),
            TraitRef::ResourceLevel(&self.resource_level),
            TraitRef::Motivation(&self.motivation),
        ]
    }

    fn check_properties(&self, acc: &mut Audit) {
        acc.require("name", &self.name.name);
    }

    fn compare_properties(&self, _other: &Self, _acc: &mut Audit) {}
}
