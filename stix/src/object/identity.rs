use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::{
    Audit, CommonProperties, Record,
    object::ObjectKind,
    properties::{Description, IntoValues, Name, Roles, TraitKind, TraitRef, add_values},
    vocab,
};

/// An individual, organization or group, or a class of them.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Identity {
    #[serde(flatten)]
    pub common: CommonProperties,
    #[serde(flatten)]
    pub name: Name,
    #[serde(flatten)]
    pub description: Description,
    #[serde(flatten)]
    pub roles: Roles,
    pub identity_class: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sectors: Vec<String>,
    pub contact_information: Option<String>,
}

impl Identity {
    pub fn new() -> Self {
        Self {
            common: CommonProperties::new(Self::KIND.as_str()),
            ..Default::default()
        }
    }

    pub fn set_identity_class(&mut self, identity_class: impl Into<String>) {
        self.identity_class = Some(identity_class.into());
    }

    pub fn add_sectors(&mut self, values: impl IntoValues) {
        add_values(&mut self.sectors, values);
    }

    pub fn set_contact_information(&mut self, contact: impl Into<String>) {
        self.contact_information = Some(contact.into());
    }
}

impl Record for Identity {
    const KIND: ObjectKind = ObjectKind::Identity;
    const TRAITS: &'static [TraitKind] = &[
        TraitKind::Name,
        TraitKind::Description,
        TraitKind::Roles,
    ];
    const PROPERTIES: &'static [&'static str] =
        &["identity_class", "sectors", "contact_information"];

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
            TraitRef::Roles(&self.roles),
        ]
    }

    fn check_properties(&self, acc: &mut Audit) {
        acc.require("name", &self.name.name);
        acc.check_vocab(
            "identity_class",
            self.identity_class.as_deref(),
            vocab::IDENTITY_CLASSES,
        );
        acc.check_items("sectors", &self.sectors);
        acc.check_text("contact_information", self.contact_information.as_deref());
    }

    fn compare_properties(&self, other: &Self, acc: &mut Audit) {
        acc.compare_value("identity_class", &self.identity_class, &other.identity_class);
        acc.compare_values("sectors", &self.sectors, &other.sectors);
        acc.compare_value(
            "contact_information",
            &self.contact_information,
            &other.contact_information,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_class_vocabulary() {
        let mut identity = Identity::new();
        identity.name.set("ACME Widget, Inc.");
        identity.set_identity_class("organization");
        identity.add_sectors(["technology", "manufacturing"]);
        assert!(identity.validate().is_ok());

        identity.set_identity_class("company");
        assert_eq!(identity.validate().problem_count(), 1);
    }
}
