use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::{
    Audit, CommonProperties, Record,
    object::ObjectKind,
    properties::{
        Aliases, Description, IntoValues, KillChainPhases, Name, TraitKind, TraitRef, add_values,
    },
};

/// Legitimate software that can be used by threat actors to perform attacks.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Tool {
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
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_types: Vec<String>,
    pub tool_version: Option<String>,
}

impl Tool {
    pub fn new() -> Self {
        Self {
            common: CommonProperties::new(Self::KIND.as_str()),
            ..Default::default()
        }
    }

    pub fn add_tool_types(&mut self, values: impl IntoValues) {
        add_values(&mut self.tool_types, values);
    }

    pub fn set_tool_version(&mut self, version: impl Into<String>) {
        self.tool_version = Some(version.into());
    }
}

impl Record for Tool {
    const KIND: ObjectKind = ObjectKind::Tool;
    const TRAITS: &'static [TraitKind] = &[
        TraitKind::Name,
        TraitKind::Description,
        TraitKind::Aliases,
        TraitKind::KillChainPhases,
    ];
    const PROPERTIES: &'static [&'static str] = &["tool_types", "tool_version"];

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
        acc.check_items("tool_types", &self.tool_types);
        acc.check_text("tool_version", self.tool_version.as_deref());
    }

    fn compare_properties(&self, other: &Self, acc: &mut Audit) {
        acc.compare_values("tool_types", &self.tool_types, &other.tool_types);
        acc.compare_value("tool_version", &self.tool_version, &other.tool_version);
    }
}
