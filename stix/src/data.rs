use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use url::Url;

use crate::{Audit, Check, Compare, Outcome};

mod custom;
mod identifier;
pub mod timestamp;

pub use custom::CustomProperties;
pub use identifier::Identifier;
pub use timestamp::{Precision, Timestamp};

/// Hash algorithm name to hex-encoded digest.
pub type Hashes = IndexMap<String, String>;

/// A pointer to information that lives outside of STIX, such as a CAPEC entry or a
/// vendor report.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalReference {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub source_name: String,
    pub description: Option<String>,
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub hashes: Hashes,
    pub external_id: Option<String>,
}

impl ExternalReference {
    pub fn new(source_name: impl Into<String>) -> Self {
        Self {
            source_name: source_name.into(),
            ..Default::default()
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_external_id(mut self, external_id: impl Into<String>) -> Self {
        self.external_id = Some(external_id.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl Check for ExternalReference {
    fn check(&self) -> Outcome {
        let mut acc = Audit::new();
        acc.require("source_name", &self.source_name);
        acc.check(
            "external_id",
            self.description.is_some() || self.url.is_some() || self.external_id.is_some(),
            "has a description, url or external_id",
            "one of description, url or external_id is required",
        );
        if let Some(url) = &self.url {
            match Url::parse(url) {
                Ok(_) => acc.pass("url", "valid url"),
                Err(e) => acc.fail("url", format!("invalid url '{url}': {e}")),
            }
        }
        acc.finish()
    }
}

impl Compare for ExternalReference {
    fn compare(&self, other: &Self) -> Outcome {
        let mut acc = Audit::new();
        acc.compare_value("source_name", &self.source_name, &other.source_name);
        acc.compare_value("description", &self.description, &other.description);
        acc.compare_value("url", &self.url, &other.url);
        acc.compare_value("hashes", &self.hashes, &other.hashes);
        acc.compare_value("external_id", &self.external_id, &other.external_id);
        acc.finish()
    }
}

/// A phase of a kill chain, such as `lockheed-martin-cyber-kill-chain` / `reconnaissance`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KillChainPhase {
    #[serde(default)]
    pub kill_chain_name: String,
    #[serde(default)]
    pub phase_name: String,
}

impl KillChainPhase {
    pub fn new(kill_chain_name: impl Into<String>, phase_name: impl Into<String>) -> Self {
        Self {
            kill_chain_name: kill_chain_name.into(),
            phase_name: phase_name.into(),
        }
    }
}

impl Check for KillChainPhase {
    fn check(&self) -> Outcome {
        let mut acc = Audit::new();
        acc.require("kill_chain_name", &self.kill_chain_name);
        acc.require("phase_name", &self.phase_name);
        acc.finish()
    }
}

impl Compare for KillChainPhase {
    fn compare(&self, other: &Self) -> Outcome {
        let mut acc = Audit::new();
        acc.compare_value(
            "kill_chain_name",
            &self.kill_chain_name,
            &other.kill_chain_name,
        );
        acc.compare_value("phase_name", &self.phase_name, &other.phase_name);
        acc.finish()
    }
}

/// A marking that applies to selected parts of an object.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GranularMarking {
    pub lang: Option<String>,
    pub marking_ref: Option<Identifier>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub selectors: Vec<String>,
}

impl Check for GranularMarking {
    fn check(&self) -> Outcome {
        let mut acc = Audit::new();
        acc.require("selectors", &self.selectors);
        acc.check(
            "marking_ref",
            self.lang.is_some() != self.marking_ref.is_some(),
            "exactly one of lang or marking_ref is set",
            "exactly one of lang or marking_ref must be set",
        );
        if let Some(marking_ref) = &self.marking_ref {
            acc.check_identifier("marking_ref", marking_ref, Some("marking-definition"));
        }
        acc.finish()
    }
}

impl Compare for GranularMarking {
    fn compare(&self, other: &Self) -> Outcome {
        let mut acc = Audit::new();
        acc.compare_value("lang", &self.lang, &other.lang);
        acc.compare_value("marking_ref", &self.marking_ref, &other.marking_ref);
        acc.compare_values("selectors", &self.selectors, &other.selectors);
        acc.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn external_reference_needs_a_locator() {
        let outcome = ExternalReference::new("capec").check();
        assert_eq!(outcome.problem_count(), 1);

        let outcome = ExternalReference::new("capec")
            .with_external_id("CAPEC-163")
            .with_url("https://capec.mitre.org/data/definitions/163.html")
            .check();
        assert!(outcome.is_ok(), "{outcome}");
    }

    #[test]
    fn external_reference_url_must_parse() {
        let outcome = ExternalReference::new("vendor").with_url("not a url").check();
        assert_eq!(outcome.problem_count(), 1);
        assert_eq!(
            outcome.problems().next().map(|d| d.path().to_string()),
            Some("url".to_string())
        );
    }

    #[test]
    fn granular_marking_needs_exactly_one_target() {
        let marking = GranularMarking {
            lang: Some("en".into()),
            marking_ref: Some("marking-definition--613f2e26-407d-48c7-9eca-b8e91df99dc9".into()),
            selectors: vec!["description".into()],
        };
        assert_eq!(marking.check().problem_count(), 1);
    }
}
