use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::{
    Audit, CommonProperties, Record, Timestamp,
    object::ObjectKind,
    properties::{Description, IntoValues, Name, ObjectRefs, TraitKind, TraitRef, add_values},
};

/// Published threat intelligence about one or more topics.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Report {
    #[serde(flatten)]
    pub common: CommonProperties,
    #[serde(flatten)]
    pub name: Name,
    #[serde(flatten)]
    pub description: Description,
    #[serde(flatten)]
    pub object_refs: ObjectRefs,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub report_types: Vec<String>,
    pub published: Option<Timestamp>,
}

impl Report {
    pub fn new() -> Self {
        Self {
            common: CommonProperties::new(Self::KIND.as_str()),
            ..Default::default()
        }
    }

    pub fn add_report_types(&mut self, values: impl IntoValues) {
        add_values(&mut self.report_types, values);
    }

    pub fn set_published(&mut self, value: impl Into<Timestamp>) {
        self.published = Some(value.into());
    }
}

impl Record for Report {
    const KIND: ObjectKind = ObjectKind::Report;
    const TRAITS: &'static [TraitKind] = &[
        TraitKind::Name,
        TraitKind::Description,
        TraitKind::ObjectRefs,
    ];
    const PROPERTIES: &'static [&'static str] = &["report_types", "published"];

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
            TraitRef::ObjectRefs(&self.object_refs),
        ]
    }

    fn check_properties(&self, acc: &mut Audit) {
        acc.require("name", &self.name.name);
        acc.check_items("report_types", &self.report_types);
        if acc.require("published", &self.published) {
            acc.check_timestamp("published", self.published.as_ref());
        }
        acc.require("object_refs", &self.object_refs.object_refs);
    }

    fn compare_properties(&self, other: &Self, acc: &mut Audit) {
        acc.compare_values("report_types", &self.report_types, &other.report_types);
        acc.compare_timestamp("published", self.published.as_ref(), other.published.as_ref());
    }
}
