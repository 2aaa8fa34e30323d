use serde::{Deserialize, Serialize};

use crate::{Audit, Check, Compare, Identifier, Outcome};

use super::PropertyGroup;

/// References to the objects a report, note, opinion or grouping is about.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectRefs {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub object_refs: Vec<Identifier>,
}

impl ObjectRefs {
    pub fn add(&mut self, id: impl Into<Identifier>) {
        self.object_refs.push(id.into());
    }

    pub fn as_slice(&self) -> &[Identifier] {
        &self.object_refs
    }
}

impl PropertyGroup for ObjectRefs {
    const KEYS: &'static [&'static str] = &["object_refs"];
}

impl Check for ObjectRefs {
    fn check(&self) -> Outcome {
        let mut acc = Audit::new();
        acc.check_identifiers("object_refs", &self.object_refs, None);
        acc.finish()
    }
}

impl Compare for ObjectRefs {
    fn compare(&self, other: &Self) -> Outcome {
        let mut acc = Audit::new();
        acc.compare_values("object_refs", &self.object_refs, &other.object_refs);
        acc.finish()
    }
}
