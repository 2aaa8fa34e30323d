use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::{
    Audit, CommonProperties, Identifier, Order, Record, Timestamp,
    object::ObjectKind,
    properties::{TraitKind, TraitRef},
};

/// The result of a static or dynamic analysis of malware.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MalwareAnalysis {
    #[serde(flatten)]
    pub common: CommonProperties,
    pub product: Option<String>,
    pub version: Option<String>,
    pub host_vm_ref: Option<Identifier>,
    pub operating_system_ref: Option<Identifier>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub installed_software_refs: Vec<Identifier>,
    pub configuration_version: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modules: Vec<String>,
    pub analysis_engine_version: Option<String>,
    pub analysis_definition_version: Option<String>,
    pub submitted: Option<Timestamp>,
    pub analysis_started: Option<Timestamp>,
    pub analysis_ended: Option<Timestamp>,
    pub result_name: Option<String>,
    pub result: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub analysis_sco_refs: Vec<Identifier>,
    pub sample_ref: Option<Identifier>,
}

impl MalwareAnalysis {
    pub fn new() -> Self {
        Self {
            common: CommonProperties::new(Self::KIND.as_str()),
            ..Default::default()
        }
    }

    pub fn set_product(&mut self, product: impl Into<String>) {
        self.product = Some(product.into());
    }

    pub fn set_result(&mut self, result: impl Into<String>) {
        self.result = Some(result.into());
    }

    pub fn set_analysis_window(
        &mut self,
        started: impl Into<Timestamp>,
        ended: impl Into<Timestamp>,
    ) {
        self.analysis_started = Some(started.into());
        self.analysis_ended = Some(ended.into());
    }
}

impl Record for MalwareAnalysis {
    const KIND: ObjectKind = ObjectKind::MalwareAnalysis;
    const TRAITS: &'static [TraitKind] = &[];
    const PROPERTIES: &'static [&'static str] = &[
        "product",
        "version",
        "host_vm_ref",
        "operating_system_ref",
        "installed_software_refs",
        "configuration_version",
        "modules",
        "analysis_engine_version",
        "analysis_definition_version",
        "submitted",
        "analysis_started",
        "analysis_ended",
        "result_name",
        "result",
        "analysis_sco_refs",
        "sample_ref",
    ];

    fn common(&self) -> &CommonProperties {
        &self.common
    }

    fn common_mut(&mut self) -> &mut CommonProperties {
        &mut self.common
    }

    fn traits(&self) -> Vec<TraitRef<'_>> {
        Vec::new()
    }

    fn check_properties(&self, acc: &mut Audit) {
        acc.require("product", &self.product);
        acc.check(
            "result",
            self.result.is_some() || !self.analysis_sco_refs.is_empty(),
            "has a result or analysis_sco_refs",
            "one of result or analysis_sco_refs is required",
        );
        if let Some(host_vm_ref) = &self.host_vm_ref {
            acc.check_identifier("host_vm_ref", host_vm_ref, Some("software"));
        }
        if let Some(operating_system_ref) = &self.operating_system_ref {
            acc.check_identifier(
                "operating_system_ref",
                operating_system_ref,
                Some("software"),
            );
        }
        acc.check_identifiers(
            "installed_software_refs",
            &self.installed_software_refs,
            Some("software"),
        );
        acc.check_items("modules", &self.modules);
        acc.check_timestamp("submitted", self.submitted.as_ref());
        acc.check_timestamp("analysis_started", self.analysis_started.as_ref());
        acc.check_timestamp("analysis_ended", self.analysis_ended.as_ref());
        if self.analysis_started.is_some() {
            acc.check_order(
                "analysis_ended",
                self.analysis_started.as_ref(),
                self.analysis_ended.as_ref(),
                Order::NotBefore,
            );
        }
        acc.check_identifiers("analysis_sco_refs", &self.analysis_sco_refs, None);
        if let Some(sample_ref) = &self.sample_ref {
            acc.check_identifier("sample_ref", sample_ref, None);
        }
    }

    fn compare_properties(&self, other: &Self, acc: &mut Audit) {
        acc.compare_value("product", &self.product, &other.product);
        acc.compare_value("version", &self.version, &other.version);
        acc.compare_value("host_vm_ref", &self.host_vm_ref, &other.host_vm_ref);
        acc.compare_value(
            "operating_system_ref",
            &self.operating_system_ref,
            &other.operating_system_ref,
        );
        acc.compare_values(
            "installed_software_refs",
            &self.installed_software_refs,
            &other.installed_software_refs,
        );
        acc.compare_value(
            "configuration_version",
            &self.configuration_version,
            &other.configuration_version,
        );
        acc.compare_values("modules", &self.modules, &other.modules);
        acc.compare_value(
            "analysis_engine_version",
            &self.analysis_engine_version,
            &other.analysis_engine_version,
        );
        acc.compare_value(
            "analysis_definition_version",
            &self.analysis_definition_version,
            &other.analysis_definition_version,
        );
        acc.compare_timestamp("submitted", self.submitted.as_ref(), other.submitted.as_ref());
        acc.compare_timestamp(
            "analysis_started",
            self.analysis_started.as_ref(),
            other.analysis_started.as_ref(),
        );
        acc.compare_timestamp(
            "analysis_ended",
            self.analysis_ended.as_ref(),
            other.analysis_ended.as_ref(),
        );
        acc.compare_value("result_name", &self.result_name, &other.result_name);
        acc.compare_value("result", &self.result, &other.result);
        acc.compare_values(
            "analysis_sco_refs",
            &self.analysis_sco_refs,
            &other.analysis_sco_refs,
        );
        acc.compare_value("sample_ref", &self.sample_ref, &other.sample_ref);
    }
}
