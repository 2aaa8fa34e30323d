use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::{Audit, Check, Compare, Outcome};

use super::{IntoValues, PropertyGroup, add_values};

/// Why an actor does what it does.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Motivation {
    pub primary_motivation: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub secondary_motivations: Vec<String>,
}

impl Motivation {
    pub fn set_primary(&mut self, value: impl Into<String>) {
        self.primary_motivation = Some(value.into());
    }

    pub fn add_secondary(&mut self, values: impl IntoValues) {
        add_values(&mut self.secondary_motivations, values);
    }
}

impl PropertyGroup for Motivation {
    const KEYS: &'static [&'static str] = &["primary_motivation", "secondary_motivations"];
}

impl Check for Motivation {
    fn check(&self) -> Outcome {
        let mut acc = Audit::new();
        acc.check_text("primary_motivation", self.primary_motivation.as_deref());
        acc.check_items("secondary_motivations", &self.secondary_motivations);
        acc.finish()
    }
}

impl Compare for Motivation {
    fn compare(&self, other: &Self) -> Outcome {
        let mut acc = Audit::new();
        acc.compare_value(
            "primary_motivation",
            &self.primary_motivation,
            &other.primary_motivation,
        );
        acc.compare_values(
            "secondary_motivations",
            &self.secondary_motivations,
            &other.secondary_motivations,
        );
        acc.finish()
    }
}
