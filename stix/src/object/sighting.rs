use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::{
    Audit, CommonProperties, Identifier, Record,
    error::Path,
    object::ObjectKind,
    properties::{Description, SeenWindow, TraitKind, TraitRef},
};

/// Largest accepted `count`.
const MAX_COUNT: u64 = 999_999_999;

/// The belief that something in threat intelligence was seen.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Sighting {
    #[serde(flatten)]
    pub common: CommonProperties,
    #[serde(flatten)]
    pub description: Description,
    #[serde(flatten)]
    pub seen: SeenWindow,
    pub count: Option<u64>,
    pub sighting_of_ref: Option<Identifier>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub observed_data_refs: Vec<Identifier>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub where_sighted_refs: Vec<Identifier>,
    pub summary: Option<bool>,
}

impl Sighting {
    pub fn new() -> Self {
        Self {
            common: CommonProperties::new(Self::KIND.as_str()),
            ..Default::default()
        }
    }

    pub fn set_sighting_of_ref(&mut self, id: impl Into<Identifier>) {
        self.sighting_of_ref = Some(id.into());
    }

    pub fn add_observed_data_ref(&mut self, id: impl Into<Identifier>) {
        self.observed_data_refs.push(id.into());
    }

    pub fn add_where_sighted_ref(&mut self, id: impl Into<Identifier>) {
        self.where_sighted_refs.push(id.into());
    }

    pub fn set_count(&mut self, count: u64) {
        self.count = Some(count);
    }
}

impl Record for Sighting {
    const KIND: ObjectKind = ObjectKind::Sighting;
    const TRAITS: &'static [TraitKind] = &[TraitKind::Description, TraitKind::SeenWindow];
    const PROPERTIES: &'static [&'static str] = &[
        "count",
        "sighting_of_ref",
        "observed_data_refs",
        "where_sighted_refs",
        "summary",
    ];

    fn common(&self) -> &CommonProperties {
        &self.common
    }

    fn common_mut(&mut self) -> &mut CommonProperties {
        &mut self.common
    }

    fn traits(&self) -> Vec<TraitRef<'_>> {
        vec![
            TraitRef::Description(&self.description),
            TraitRef::SeenWindow(&self.seen),
        ]
    }

    fn check_properties(&self, acc: &mut Audit) {
        if let Some(count) = self.count {
            acc.check(
                "count",
                count <= MAX_COUNT,
                format!("in 0..={MAX_COUNT}"),
                format!("{count} is not in 0..={MAX_COUNT}"),
            );
        }
        if acc.require("sighting_of_ref", &self.sighting_of_ref)
            && let Some(id) = &self.sighting_of_ref
        {
            acc.check_identifier("sighting_of_ref", id, None);
        }
        acc.check_identifiers(
            "observed_data_refs",
            &self.observed_data_refs,
            Some("observed-data"),
        );
        for (idx, id) in self.where_sighted_refs.iter().enumerate() {
            let path = Path::from("where_sighted_refs").child(idx);
            let ok = matches!(id.object_type(), Some("identity" | "location"));
            if acc.check(
                path.clone(),
                ok,
                "names an identity or location",
                format!("'{id}' is not an identity or location"),
            ) {
                acc.check_identifier(path, id, None);
            }
        }
    }

    fn compare_properties(&self, other: &Self, acc: &mut Audit) {
        acc.compare_value("count", &self.count, &other.count);
        acc.compare_value("sighting_of_ref", &self.sighting_of_ref, &other.sighting_of_ref);
        acc.compare_values(
            "observed_data_refs",
            &self.observed_data_refs,
            &other.observed_data_refs,
        );
        acc.compare_values(
            "where_sighted_refs",
            &self.where_sighted_refs,
            &other.where_sighted_refs,
        );
        acc.compare_value("summary", &self.summary, &other.summary);
    }
}
