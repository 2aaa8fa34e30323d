use serde::{Deserialize, Serialize};

use crate::{
    Audit, CommonProperties, Record,
    object::ObjectKind,
    properties::{Description, Name, TraitKind, TraitRef},
};

/// An action taken to prevent or respond to an attack.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CourseOfAction {
    #[serde(flatten)]
    pub common: CommonProperties,
    #[serde(flatten)]
    pub name: Name,
    #[serde(flatten)]
    pub description: Description,
}

impl CourseOfAction {
    pub fn new() -> Self {
        Self {
            common: CommonProperties::new(Self::KIND.as_str()),
            ..Default::default()
        }
    }
}

impl Record for CourseOfAction {
    const KIND: ObjectKind = ObjectKind::CourseOfAction;
    const TRAITS: &'static [TraitKind] = &[TraitKind::Name, TraitKind::Description];
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
        ]
    }

    fn check_properties(&self, acc: &mut Audit) {
        acc.require("name", &self.name.name);
    }

    fn compare_properties(&self, _other: &Self, _acc: &mut Audit) {}
}
