use serde::{Deserialize, Serialize};

use crate::{
    Audit, CommonProperties, Record,
    object::ObjectKind,
    properties::{
        Aliases, Description, IntoValues, KillChainPhases, Name, SeenWindow, TraitKind, TraitRef,
        add_values,
    },
};

/// Systems, software services and resources used in an attack or in defending against one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Infrastructure {
    #[serde(flatten)]
    pub common: CommonProperties,
    #[serde(flatten)]
    pub name: Name,
    #[serde(flatten)]
    pub description: Description,
    #[serde(flatten)]
    pub aliases: Aliases,
    #[serde(flatten)]
    pub kill_chain_phases: KillChainPhases,
    #[serde(flatten)]
    pub seen: SeenWindow,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub infrastructure_types: Vec<String>,
}

impl Infrastructure {
    pub fn new() -> Self {
        Self {
            common: CommonProperties::new(Self::KIND.as_str()),
            ..Default::default()
        }
    }

    pub fn add_infrastructure_types(&mut self, values: impl IntoValues) {
        add_values(&mut self.infrastructure_types, values);
    }
}

impl Record for Infrastructure {
    const KIND: ObjectKind = ObjectKind::Infrastructure;
    const TRAITS: &'static [TraitKind] = &[
        TraitKind::Name,
        TraitKind::Description,
        TraitKind::Aliases,
        TraitKind::KillChainPhases,
        TraitKind::SeenWindow,
    ];
    const PROPERTIES: &'static [&'static str] = &["infrastructure_types"];

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
            TraitRef::KillChainPhases(&self.kill_chain_phases),
            TraitRef::SeenWindow(&self.seen),
        ]
    }

    fn check_properties(&self, acc: &mut Audit) {
        acc.require("name", &self.name.name);
        acc.check_items("infrastructure_types", &self.infrastructure_types);
    }

    fn compare_properties(&self, other: &Self, acc: &mut Audit) {
        acc.compare_values(
            "infrastructure_types",
            &self.infrastructure_types,
            &other.infrastructure_types,
        );
    }
}
