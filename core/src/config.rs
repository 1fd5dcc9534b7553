//! JSON loading for workbench-authored definitions.
//!
//! The surrounding editors export systems and scenarios as JSON
//! documents; the engine consumes them read-only. In tests, build the
//! structs directly instead.

use crate::{scenario::SimulationScenario, system::EconomySystem};

pub fn load_system(path: &str) -> anyhow::Result<EconomySystem> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
    let system: EconomySystem = serde_json::from_str(&content)?;
    Ok(system)
}

pub fn load_scenario(path: &str) -> anyhow::Result<SimulationScenario> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
    let scenario: SimulationScenario = serde_json::from_str(&content)?;
    Ok(scenario)
}

/// Driver knobs that are not part of the authored scenario.
#[derive(Debug, Clone, Copy)]
pub struct RunSettings {
    pub seed: u64,
    pub iterations: u32,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            seed: 42,
            iterations: 1,
        }
    }
}
