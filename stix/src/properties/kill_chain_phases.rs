use serde::{Deserialize, Serialize};

use crate::{Audit, Check, Compare, ErrorAt, KillChainPhase, Outcome};

use super::PropertyGroup;

/// The kill chain phases an object applies to. Order is significant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KillChainPhases {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub kill_chain_phases: Vec<KillChainPhase>,
}

impl KillChainPhases {
    pub fn add(&mut self, kill_chain_name: impl Into<String>, phase_name: impl Into<String>) {
        self.kill_chain_phases
            .push(KillChainPhase::new(kill_chain_name, phase_name));
    }

    pub fn as_slice(&self) -> &[KillChainPhase] {
        &self.kill_chain_phases
    }
}

impl PropertyGroup for KillChainPhases {
    const KEYS: &'static [&'static str] = &["kill_chain_phases"];
}

impl Check for KillChainPhases {
    fn check(&self) -> Outcome {
        let mut acc = Audit::new();
        for (idx, phase) in self.kill_chain_phases.iter().enumerate() {
            acc.merge(phase.check().at(idx).at("kill_chain_phases"));
        }
        acc.finish()
    }
}

impl Compare for KillChainPhases {
    fn compare(&self, other: &Self) -> Outcome {
        let mut acc = Audit::new();
        acc.compare_seq(
            "kill_chain_phases",
            &self.kill_chain_phases,
            &other.kill_chain_phases,
            KillChainPhase::compare,
        );
        acc.finish()
    }
}
