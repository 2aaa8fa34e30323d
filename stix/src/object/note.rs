use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::{
    Audit, CommonProperties, Record,
    object::ObjectKind,
    properties::{Authors, ObjectRefs, TraitKind, TraitRef},
};

/// Analyst commentary on one or more objects.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Note {
    #[serde(flatten)]
    pub common: CommonProperties,
    #[serde(flatten)]
    pub authors: Authors,
    #[serde(flatten)]
    pub object_refs: ObjectRefs,
    #[serde(rename = "abstract")]
    pub summary: Option<String>,
    pub content: Option<String>,
}

impl Note {
    pub fn new() -> Self {
        Self {
            common: CommonProperties::new(Self::KIND.as_str()),
            ..Default::default()
        }
    }

    /// Sets the `abstract` property.
    pub fn set_abstract(&mut self, summary: impl Into<String>) {
        self.summary = Some(summary.into());
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = Some(content.into());
    }
}

impl Record for Note {
    const KIND: ObjectKind = ObjectKind::Note;
    const TRAITS: &'static [TraitKind] = &[TraitKind::Authors, TraitKind::ObjectRefs];
    const PROPERTIES: &'static [&'static str] = &["abstract", "content"];

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
        acc.check_text("abstract", self.summary.as_deref());
        acc.require("content", &self.content);
        acc.require("object_refs", &self.object_refs.object_refs);
    }

    fn compare_properties(&self, other: &Self, acc: &mut Audit) {
        acc.compare_value("abstract", &self.summary, &other.summary);
        acc.compare_value("content", &self.content, &other.content);
    }
}
