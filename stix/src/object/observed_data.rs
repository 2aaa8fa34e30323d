use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::{
    Audit, CommonProperties, Order, Record, Timestamp,
    object::ObjectKind,
    properties::{ObjectRefs, TraitKind, TraitRef},
};

/// Largest accepted `number_observed`.
const MAX_OBSERVED: u64 = 999_999_999;

/// Raw cyber observations seen over a time window.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObservedData {
    #[serde(flatten)]
    pub common: CommonProperties,
    #[serde(flatten)]
    pub object_refs: ObjectRefs,
    pub first_observed: Option<Timestamp>,
    pub last_observed: Option<Timestamp>,
    pub number_observed: Option<u64>,
}

impl ObservedData {
    pub fn new() -> Self {
        Self {
            common: CommonProperties::new(Self::KIND.as_str()),
            ..Default::default()
        }
    }

    pub fn set_observed(
        &mut self,
        first: impl Into<Timestamp>,
        last: impl Into<Timestamp>,
        count: u64,
    ) {
        self.first_observed = Some(first.into());
        self.last_observed = Some(last.into());
        self.number_observed = Some(count);
    }
}

impl Record for ObservedData {
    const KIND: ObjectKind = ObjectKind::ObservedData;
    const TRAITS: &'static [TraitKind] = &[TraitKind::ObjectRefs];
    const PROPERTIES: &'static [&'static str] =
        &["first_observed", "last_observed", "number_observed"];

    fn common(&self) -> &CommonProperties {
        &self.common
    }

    fn common_mut(&mut self) -> &mut CommonProperties {
        &mut self.common
    }

    fn traits(&self) -> Vec<TraitRef<'_>> {
        vec![TraitRef::ObjectRefs(&self.object_refs)]
    }

    fn check_properties(&self, acc: &mut Audit) {
        let first = acc.require("first_observed", &self.first_observed);
        let last = acc.require("last_observed", &self.last_observed);
        if first && last {
            acc.check_timestamp("first_observed", self.first_observed.as_ref());
            acc.check_timestamp("last_observed", self.last_observed.as_ref());
            acc.check_order(
                "last_observed",
                self.first_observed.as_ref(),
                self.last_observed.as_ref(),
                Order::NotBefore,
            );
        }
        if acc.require("number_observed", &self.number_observed) {
            let count = self.number_observed.unwrap_or_default();
            acc.check(
                "number_observed",
                (1..=MAX_OBSERVED).contains(&count),
                format!("in 1..={MAX_OBSERVED}"),
                format!("{count} is not in 1..={MAX_OBSERVED}"),
            );
        }
        acc.require("object_refs", &self.object_refs.object_refs);
    }

    fn compare_properties(&self, other: &Self, acc: &mut Audit) {
        acc.compare_timestamp(
            "first_observed",
            self.first_observed.as_ref(),
            other.first_observed.as_ref(),
        );
        acc.compare_timestamp(
            "last_observed",
            self.last_observed.as_ref(),
            other.last_observed.as_ref(),
        );
        acc.compare_value(
            "number_observed",
            &self.number_observed,
            &other.number_observed,
        );
    }
}
