use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::{Audit, Check, Compare, Outcome};

use super::PropertyGroup;

/// The `name` property.
///
/// Whether a name is required is up to the owning object kind.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Name {
    pub name: Option<String>,
}

impl Name {
    pub fn get(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }
}

impl PropertyGroup for Name {
    const KEYS: &'static [&'static str] = &["name"];
}

impl Check for Name {
    fn check(&self) -> Outcome {
        let mut acc = Audit::new();
        acc.check_text("name", self.get());
        acc.finish()
    }
}

impl Compare for Name {
    fn compare(&self, other: &Self) -> Outcome {
        let mut acc = Audit::new();
        acc.compare_value("name", &self.name, &other.name);
        acc.finish()
    }
}

/// The `description` property.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Description {
    pub description: Option<String>,
}

impl Description {
    pub fn get(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn set(&mut self, description: impl Into<String>) {
        self.description = Some(description.into());
    }
}

impl PropertyGroup for Description {
    const KEYS: &'static [&'static str] = &["description"];
}

impl Check for Description {
    fn check(&self) -> Outcome {
        let mut acc = Audit::new();
        acc.check_text("description", self.get());
        acc.finish()
    }
}

impl Compare for Description {
    fn compare(&self, other: &Self) -> Outcome {
        let mut acc = Audit::new();
        acc.compare_value("description", &self.description, &other.description);
        acc.finish()
    }
}

/// The `resource_level` property of actors.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLevel {
    pub resource_level: Option<String>,
}

impl ResourceLevel {
    pub fn get(&self) -> Option<&str> {
        self.resource_level.as_deref()
    }

    pub fn set(&mut self, resource_level: impl Into<String>) {
        self.resource_level = Some(resource_level.into());
    }
}

impl PropertyGroup for ResourceLevel {
    const KEYS: &'static [&'static str] = &["resource_level"];
}

impl Check for ResourceLevel {
    fn check(&self) -> Outcome {
        let mut acc = Audit::new();
        acc.check_text("resource_level", self.get());
        acc.finish()
    }
}

impl Compare for ResourceLevel {
    fn compare(&self, other: &Self) -> Outcome {
        let mut acc = Audit::new();
        acc.compare_value("resource_level", &self.resource_level, &other.resource_level);
        acc.finish()
    }
}
