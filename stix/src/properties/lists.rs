use serde::{Deserialize, Serialize};

use crate::{Audit, Check, Compare, Outcome};

use super::{IntoValues, PropertyGroup, add_values};

/// Alternative names used to identify an object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aliases {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
}

impl Aliases {
    /// Appends one or more aliases. See [`IntoValues`] for the accepted forms.
    pub fn add(&mut self, values: impl IntoValues) {
        add_values(&mut self.aliases, values);
    }

    pub fn as_slice(&self) -> &[String] {
        &self.aliases
    }
}

impl PropertyGroup for Aliases {
    const KEYS: &'static [&'static str] = &["aliases"];
}

impl Check for Aliases {
    fn check(&self) -> Outcome {
        let mut acc = Audit::new();
        acc.check_items("aliases", &self.aliases);
        acc.finish()
    }
}

impl Compare for Aliases {
    fn compare(&self, other: &Self) -> Outcome {
        let mut acc = Audit::new();
        acc.compare_values("aliases", &self.aliases, &other.aliases);
        acc.finish()
    }
}

/// The authors of a note or opinion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Authors {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,
}

impl Authors {
    pub fn add(&mut self, values: impl IntoValues) {
        add_values(&mut self.authors, values);
    }

    pub fn as_slice(&self) -> &[String] {
        &self.authors
    }
}

impl PropertyGroup for Authors {
    const KEYS: &'static [&'static str] = &["authors"];
}

impl Check for Authors {
    fn check(&self) -> Outcome {
        let mut acc = Audit::new();
        acc.check_items("authors", &self.authors);
        acc.finish()
    }
}

impl Compare for Authors {
    fn compare(&self, other: &Self) -> Outcome {
        let mut acc = Audit::new();
        acc.compare_values("authors", &self.authors, &other.authors);
        acc.finish()
    }
}

/// High-level goals of an actor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goals {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub goals: Vec<String>,
}

impl Goals {
    pub fn add(&mut self, values: impl IntoValues) {
        add_values(&mut self.goals, values);
    }

    pub fn as_slice(&self) -> &[String] {
        &self.goals
    }
}

impl PropertyGroup for Goals {
    const KEYS: &'static [&'static str] = &["goals"];
}

impl Check for Goals {
    fn check(&self) -> Outcome {
        let mut acc = Audit::new();
        acc.check_items("goals", &self.goals);
        acc.finish()
    }
}

impl Compare for Goals {
    fn compare(&self, other: &Self) -> Outcome {
        let mut acc = Audit::new();
        acc.compare_values("goals", &self.goals, &other.goals);
        acc.finish()
    }
}

/// Roles an identity or threat actor plays.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roles {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<String>,
}

impl Roles {
    pub fn add(&mut self, values: impl IntoValues) {
        add_values(&mut self.roles, values);
    }

    pub fn as_slice(&self) -> &[String] {
        &self.roles
    }
}

impl PropertyGroup for Roles {
    const KEYS: &'static [&'static str] = &["roles"];
}

impl Check for Roles {
    fn check(&self) -> Outcome {
        let mut acc = Audit::new();
        acc.check_items("roles", &self.roles);
        acc.finish()
    }
}

impl Compare for Roles {
    fn compare(&self, other: &Self) -> Outcome {
        let mut acc = Audit::new();
        acc.compare_values("roles", &self.roles, &other.roles);
        acc.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_accepts_every_form() {
        let mut aliases = Aliases::default();
        aliases.add("Fancy Bear");
        aliases.add("Sofacy, Pawn Storm");
        aliases.add(vec!["  APT28 ", ""]);
        aliases.add("");
        assert_eq!(
            aliases.as_slice(),
            ["Fancy Bear", "Sofacy", "Pawn Storm", "APT28"]
        );
        assert!(aliases.check().is_ok());
    }

    #[test]
    fn compare_is_order_sensitive() {
        let mut a = Goals::default();
        a.add("steal, disrupt");
        let mut b = Goals::default();
        b.add("disrupt, steal");

        let outcome = a.compare(&b);
        assert!(!outcome.is_ok());
        assert_eq!(outcome.problem_count(), 2);
        assert!(a.compare(&a.clone()).is_ok());
    }
}
