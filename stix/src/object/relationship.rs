use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::{
    Audit, CommonProperties, Identifier, Order, Record, Timestamp,
    object::ObjectKind,
    properties::{Description, TraitKind, TraitRef},
};

/// A link between two objects, such as a campaign that `uses` an indicator.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Relationship {
    #[serde(flatten)]
    pub common: CommonProperties,
    #[serde(flatten)]
    pub description: Description,
    pub relationship_type: Option<String>,
    pub source_ref: Option<Identifier>,
    pub target_ref: Option<Identifier>,
    pub start_time: Option<Timestamp>,
    pub stop_time: Option<Timestamp>,
}

impl Relationship {
    pub fn new() -> Self {
        Self {
            common: CommonProperties::new(Self::KIND.as_str()),
            ..Default::default()
        }
    }

    /// Creates a relationship of `relationship_type` from `source` to `target`.
    pub fn between(
        relationship_type: impl Into<String>,
        source: impl Into<Identifier>,
        target: impl Into<Identifier>,
    ) -> Self {
        let mut relationship = Self::new();
        relationship.set_relationship_type(relationship_type);
        relationship.set_source_ref(source);
        relationship.set_target_ref(target);
        relationship
    }

    pub fn set_relationship_type(&mut self, relationship_type: impl Into<String>) {
        self.relationship_type = Some(relationship_type.into());
    }

    pub fn set_source_ref(&mut self, source: impl Into<Identifier>) {
        self.source_ref = Some(source.into());
    }

    pub fn set_target_ref(&mut self, target: impl Into<Identifier>) {
        self.target_ref = Some(target.into());
    }

    pub fn set_start_time(&mut self, value: impl Into<Timestamp>) {
        self.start_time = Some(value.into());
    }

    pub fn set_stop_time(&mut self, value: impl Into<Timestamp>) {
        self.stop_time = Some(value.into());
    }
}

impl Record for Relationship {
    const KIND: ObjectKind = ObjectKind::Relationship;
    const TRAITS: &'static [TraitKind] = &[TraitKind::Description];
    const PROPERTIES: &'static [&'static str] = &[
        "relationship_type",
        "source_ref",
        "target_ref",
        "start_time",
        "stop_time",
    ];

    fn common(&self) -> &CommonProperties {
        &self.common
    }

    fn common_mut(&mut self) -> &mut CommonProperties {
        &mut self.common
    }

    fn traits(&self) -> Vec<TraitRef<'_>> {
        vec![TraitRef::Description(&self.description)]
    }

    fn check_properties(&self, acc: &mut Audit) {
        acc.require("relationship_type", &self.relationship_type);
        for (key, id) in [("source_ref", &self.source_ref), ("target_ref", &self.target_ref)] {
            if acc.require(key, id)
                && let Some(id) = id
            {
                acc.check_identifier(key, id, None);
            }
        }
        acc.check_timestamp("start_time", self.start_time.as_ref());
        acc.check_timestamp("stop_time", self.stop_time.as_ref());
        if self.start_time.is_some() {
            acc.check_order(
                "stop_time",
                self.start_time.as_ref(),
                self.stop_time.as_ref(),
                Order::After,
            );
        }
    }

    fn compare_properties(&self, other: &Self, acc: &mut Audit) {
        acc.compare_value(
            "relationship_type",
            &self.relationship_type,
            &other.relationship_type,
        );
        acc.compare_value("source_ref", &self.source_ref, &other.source_ref);
        acc.compare_value("target_ref", &self.target_ref, &other.target_ref);
        acc.compare_timestamp("start_time", self.start_time.as_ref(), other.start_time.as_ref());
        acc.compare_timestamp("stop_time", self.stop_time.as_ref(), other.stop_time.as_ref());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_required() {
        let outcome = Relationship::new().validate();
        let failed: Vec<String> = outcome.problems().map(|d| d.path().to_string()).collect();
        assert_eq!(failed, vec!["relationship_type", "source_ref", "target_ref"]);
    }

    #[test]
    fn stop_time_is_strictly_after_start_time() {
        let mut relationship = Relationship::between(
            "uses",
            "campaign--8e2e2d2b-17d4-4cbf-938f-98ee46b3cd3f",
            "malware--31b940d4-6f7f-459a-80ea-9c1f17b5891b",
        );
        relationship.set_start_time("2016-04-06T20:03:48.000Z");
        relationship.set_stop_time("2016-04-06T20:03:48.000Z");
        assert_eq!(relationship.validate().problem_count(), 1);

        relationship.set_stop_time("2016-04-07T00:00:00.000Z");
        assert!(relationship.validate().is_ok());
    }
}
