use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::{
    Audit, CommonProperties, Record,
    object::ObjectKind,
    properties::{Description, Name, ObjectRefs, TraitKind, TraitRef},
};

/// Objects that share a context, such as the material under analysis in an investigation.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Grouping {
    #[serde(flatten)]
    pub common: CommonProperties,
    #[serde(flatten)]
    pub name: Name,
    #[serde(flatten)]
    pub description: Description,
    #[serde(flatten)]
    pub object_refs: ObjectRefs,
    pub context: Option<String>,
}

impl Grouping {
    pub fn new() -> Self {
        Self {
            common: CommonProperties::new(Self::KIND.as_str()),
            ..Default::default()
        }
    }

    pub fn set_context(&mut self, context: impl Into<String>) {
        self.context = Some(context.into());
    }
}

impl Record for Grouping {
    const KIND: ObjectKind = ObjectKind::Grouping;
    const TRAITS: &'static [TraitKind] = &[
        TraitKind::Name,
        TraitKind::Description,
        TraitKind::ObjectRefs,
    ];
    const PROPERTIES: &'static [&'static str] = &["context"];

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
        acc.require("context", &self.context);
        acc.require("object_refs", &self.object_refs.object_refs);
    }

    fn compare_properties(&self, other: &Self, acc: &mut Audit) {
        acc.compare_value("context", &self.context, &other.context);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_and_refs_are_required() {
        let mut grouping = Grouping::new();
        assert_eq!(grouping.validate().problem_count(), 2);

        grouping.set_context("suspicious-activity");
        grouping
            .object_refs
            .add("indicator--26ffb872-1dd9-446e-b6f5-d58527e5b5d2");
        assert!(grouping.validate().is_ok());

        grouping.object_refs.add("not-an-id");
        let outcome = grouping.validate();
        assert_eq!(outcome.problem_count(), 1);
        assert_eq!(
            outcome.problems().next().map(|d| d.path().to_string()),
            Some("object_refs[1]".to_string())
        );
    }
}
