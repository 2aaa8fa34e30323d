use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::{
    Audit, CommonProperties, Identifier, Record,
    object::ObjectKind,
    properties::{
        Aliases, Description, IntoValues, KillChainPhases, Name, SeenWindow, TraitKind, TraitRef,
        add_values,
    },
};

/// Malicious code, either a single instance or a family.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Malware {
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
    pub malware_types: Vec<String>,
    pub is_family: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub operating_system_refs: Vec<Identifier>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub architecture_execution_envs: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub implementation_languages: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub capabilities: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sample_refs: Vec<Identifier>,
}

impl Malware {
    pub fn new() -> Self {
        Self {
            common: CommonProperties::new(Self::KIND.as_str()),
            ..Default::default()
        }
    }

    pub fn set_is_family(&mut self, is_family: bool) {
        self.is_family = Some(is_family);
    }

    pub fn add_malware_types(&mut self, values: impl IntoValues) {
        add_values(&mut self.malware_types, values);
    }

    pub fn add_capabilities(&mut self, values: impl IntoValues) {
        add_values(&mut self.capabilities, values);
    }

    pub fn add_implementation_languages(&mut self, values: impl IntoValues) {
        add_values(&mut self.implementation_languages, values);
    }

    pub fn add_architecture_execution_envs(&mut self, values: impl IntoValues) {
        add_values(&mut self.architecture_execution_envs, values);
    }
}

impl Record for Malware {
    const KIND: ObjectKind = ObjectKind::Malware;
    const TRAITS: &'static [TraitKind] = &[
        TraitKind::Name,
        TraitKind::Description,
        TraitKind::Aliases,
        TraitKind::KillChainPhases,
        TraitKind::SeenWindow,
    ];
    const PROPERTIES: &'static [&'static str] = &[
        "malware_types",
        "is_family",
        "operating_system_refs",
        "architecture_execution_envs",
        "implementation_languages",
        "capabilities",
        "sample_refs",
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
            TraitRef::KillChainPhases(&self.kill_chain_phases),
            TraitRef::SeenWindow(&self.seen),
        ]
    }

    fn check_properties(&self, acc: &mut Audit) {
        if acc.require("is_family", &self.is_family) && self.is_family == Some(true) {
            acc.require("name", &self.name.name);
        }
        acc.check_items("malware_types", &self.malware_types);
        acc.check_identifiers(
            "operating_system_refs",
            &self.operating_system_refs,
            Some("software"),
        );
        acc.check_items(
            "architecture_execution_envs",
            &self.architecture_execution_envs,
        );
        acc.check_items("implementation_languages", &self.implementation_languages);
        acc.check_items("capabilities", &self.capabilities);
        acc.check_identifiers("sample_refs", &self.sample_refs, None);
    }

    fn compare_properties(&self, other: &Self, acc: &mut Audit) {
        acc.compare_values("malware_types", &self.malware_types, &other.malware_types);
        acc.compare_value("is_family", &self.is_family, &other.is_family);
        acc.compare_values(
            "operating_system_refs",
            &self.operating_system_refs,
            &other.operating_system_refs,
        );
        acc.compare_values(
            "architecture_execution_envs",
            &self.architecture_execution_envs,
            &other.architecture_execution_envs,
        );
        acc.compare_values(
            "implementation_languages",
            &self.implementation_languages,
            &other.implementation_languages,
        );
        acc.compare_values("capabilities", &self.capabilities, &other.capabilities);
        acc.compare_values("sample_refs", &self.sample_refs, &other.sample_refs);
    }
}
