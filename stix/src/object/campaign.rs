use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::{
    Audit, CommonProperties, Record,
    object::ObjectKind,
    properties::{Aliases, Description, Name, SeenWindow, TraitKind, TraitRef},
};

/// A set of adversarial behaviors against a specific set of targets over time.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Campaign {
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
    pub objective: Option<String>,
}

impl Campaign {
    pub fn new() -> Self {
        Self {
            common: CommonProperties::new(Self::KIND.as_str()),
            ..Default::default()
        }
    }

    pub fn set_objective(&mut self, objective: impl Into<String>) {
        self.objective = Some(objective.into());
    }
}

impl Record for Campaign {
    const KIND: ObjectKind = ObjectKind::Campaign;
    const TRAITS: &'static [TraitKind] = &[
        TraitKind::Name,
        TraitKind::Description,
        TraitKind::Aliases,
        TraitKind::SeenWindow,
    ];
    const PROPERTIES: &'static [&'static str] = &["objective"];

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
        ]
    }

    fn check_properties(&self, acc: &mut Audit) {
        acc.require("name", &self.name.name);
        acc.check_text("objective", self.objective.as_deref());
    }

    fn compare_properties(&self, other: &Self, acc: &mut Audit) {
        acc.compare_value("objective", &self.objective, &other.objective);
    }
}
