use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Error;

/// A STIX identifier, `<object-type>--<uuid>`.
///
/// Decoded identifiers are kept exactly as received, even when malformed; use
/// [`Identifier::check`] or validation to find out whether they are well formed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    /// Generates a fresh identifier for an object of the given type.
    pub fn new(object_type: &str) -> Self {
        Self(format!("{object_type}--{}", Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The type part of the identifier, if it has one.
    pub fn object_type(&self) -> Option<&str> {
        self.0.split_once("--").map(|(object_type, _)| object_type)
    }

    /// The UUID part of the identifier, if it has one and it parses.
    pub fn uuid(&self) -> Option<Uuid> {
        let (_, uuid) = self.0.split_once("--")?;
        Uuid::parse_str(uuid).ok()
    }

    /// Checks that the identifier has the form `<object-type>--<uuid>`.
    pub fn check(&self) -> Result<(), Error> {
        let (object_type, uuid) = self.0.split_once("--").ok_or_else(|| {
            Error::validation(format!("identifier '{}' is not '<type>--<uuid>'", self.0))
        })?;
        if object_type.is_empty() {
            return Err(Error::validation(format!(
                "identifier '{}' has no type",
                self.0
            )));
        }
        Uuid::parse_str(uuid).map_err(|e| {
            Error::validation(format!("identifier '{}' has an invalid uuid: {e}", self.0))
        })?;
        Ok(())
    }

    /// Checks that the identifier is well formed and names an object of `object_type`.
    pub fn check_for(&self, object_type: &str) -> Result<(), Error> {
        self.check()?;
        match self.object_type() {
            Some(actual) if actual == object_type => Ok(()),
            actual => Err(Error::validation(format!(
                "identifier '{}' does not name a '{object_type}' (found '{}')",
                self.0,
                actual.unwrap_or_default()
            ))),
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Identifier {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Identifier {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl From<String> for Identifier {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Identifier {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<&Identifier> for Identifier {
    fn from(value: &Identifier) -> Self {
        value.clone()
    }
}

/// Parses and checks an identifier.
impl FromStr for Identifier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = Self(s.to_string());
        id.check()?;
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_identifier_is_well_formed() {
        let id = Identifier::new("indicator");
        assert_eq!(id.object_type(), Some("indicator"));
        assert!(id.uuid().is_some());
        assert!(id.check_for("indicator").is_ok());
        assert!(id.check_for("campaign").is_err());
    }

    #[test]
    fn parse_rejects_malformed() {
        assert!("indicator".parse::<Identifier>().is_err());
        assert!("indicator--not-a-uuid".parse::<Identifier>().is_err());
        assert!("--8e2e2d2b-17d4-4cbf-938f-98ee46b3cd3f".parse::<Identifier>().is_err());
        assert!(
            "attack-pattern--8e2e2d2b-17d4-4cbf-938f-98ee46b3cd3f"
                .parse::<Identifier>()
                .is_ok()
        );
    }
}
