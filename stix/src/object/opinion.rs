use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::{
    Audit, CommonProperties, Record,
    object::ObjectKind,
    properties::{Authors, ObjectRefs, TraitKind, TraitRef},
    vocab,
};

/// An assessment of the correctness of the information in other objects.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Opinion {
    #[serde(flatten)]
    pub common: CommonProperties,
    #[serde(flatten)]
    pub authors: Authors,
    #[serde(flatten)]
    pub object_refs: ObjectRefs,
    pub explanation: Option<String>,
    pub opinion: Option<String>,
}

impl Opinion {
    pub fn new() -> Self {
        Self {
            common: CommonProperties::new(Self::KIND.as_str()),
            ..Default::default()
        }
    }

    pub fn set_explanation(&mut self, explanation: impl Into<String>) {
        self.explanation = Some(explanation.into());
    }

    pub fn set_opinion(&mut self, opinion: impl Into<String>) {
        self.opinion = Some(opinion.into());
    }
}

impl Record for Opinion {
    const KIND: ObjectKind = ObjectKind::Opinion;
    const TRAITS: &'static [TraitKind] = &[TraitKind::Authors, TraitKind::ObjectRefs];
    const PROPERTIES: &'static [&'static str] = &["explanation", "opinion"];

    fn common(&self) -> &CommonProperties {
        &self.common
    }

    fn common_mut(&mut self) -> &mut CommonProperties {
        &mut self.common
    }

    fn traits(&self) -> Vec<TraitRef<'_>> {
        vec![
            TraitRef::Authors(&self.authors),
            TraitRef::ObjectRefs(&self.object_refs),
        ]
    }

    fn check_properties(&self, acc: &mut Audit) {
        acc.check_text("explanation", self.explanation.as_deref());
        if acc.require("opinion", &self.opinion) {
            acc.check_vocab("opinion", self.opinion.as_deref(), vocab::OPINIONS);
        }
        acc.require("object_refs", &self.object_refs.object_refs);
    }

    fn compare_properties(&self, other: &Self, acc: &mut Audit) {
        acc.compare_value("explanation", &self.explanation, &other.explanation);
        acc.compare_value("opinion", &self.opinion, &other.opinion);
    }
}
