use serde::{Deserialize, Serialize};

use crate::{
    Audit, CommonProperties, Record,
    object::ObjectKind,
    properties::{Description, Name, TraitKind, TraitRef},
};

/// A mistake in software that can be used to gain access to a system or network.
///
/// Identifiers such as CVE numbers are carried as external references.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Vulnerability {
    #[serde(flatten)]
    pub common: CommonProperties,
    #[serde(flatten)]
    pub name: Name,
    #[serde(flatten)]
    pub description: Description,
}

impl Vulnerability {
    pub fn new() -> Self {
        Self {
            common: CommonProperties::new(Self::KIND.as_str()),
            ..Default::default()
        }
    }
}

impl Record for Vulnerability {
    const KIND: ObjectKind = ObjectKind::Vulnerability;
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ExternalReference;

    #[test]
    fn cve_reference_is_checked() {
        let mut vulnerability = Vulnerability::new();
        vulnerability.name.set("CVE-2016-1234");
        vulnerability
            .common
            .add_external_reference(ExternalReference::new("cve"));
        let outcome = vulnerability.validate();
        assert_eq!(outcome.problem_count(), 1);
        assert_eq!(
            outcome.problems().next().map(|d| d.path().to_string()),
            Some("external_references[0].external_id".to_string())
        );
    }
}
