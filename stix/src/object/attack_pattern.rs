use serde::{Deserialize, Serialize};

use crate::{
    Audit, CommonProperties, Record,
    object::ObjectKind,
    properties::{Aliases, Description, KillChainPhases, Name, TraitKind, TraitRef},
};

/// A class of behavior adversaries use to compromise targets, such as spear phishing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttackPattern {
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
}

impl AttackPattern {
    pub fn new() -> Self {
        Self {
            common: CommonProperties::new(Self::KIND.as_str()),
            ..Default::default()
        }
    }
}

impl Record for AttackPattern {
    const KIND: ObjectKind = ObjectKind::AttackPattern;
    const TRAITS: &'static [TraitKind] = &[
        TraitKind::Name,
        TraitKind::Description,
        TraitKind::Aliases,
        TraitKind::KillChainPhases,
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
            TraitRef::KillChainPhases(&self.kill_chain_phases),
        ]
    }

    fn check_properties(&self, acc: &mut Audit) {
        acc.require("name", &self.name.name);
    }

    fn compare_properties(&self, _other: &Self, _acc: &mut Audit) {}
}
