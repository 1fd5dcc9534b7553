//! Scenario definitions — a time-bounded script of shock events
//! applied to one economy system.
//!
//! Event payloads are a closed tagged union: anything the scenario
//! editor can author is a variant here, validated once at
//! deserialization instead of re-checked at every point of use.

use crate::{
    error::{SimError, SimResult},
    system::TradingStrategy,
    types::{EntityId, Tick},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationScenario {
    pub id: EntityId,
    pub name: String,
    /// The EconomySystem this scenario stresses.
    pub system_id: EntityId,
    /// Number of time units per iteration.
    pub duration: Tick,
    #[serde(default)]
    pub events: Vec<ScenarioEvent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioEvent {
    pub trigger_time: Tick,
    #[serde(flatten)]
    pub data: EventData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum EventData {
    /// Multiply a system-pool resource amount by (1 + change_percent/100),
    /// floored at 0.
    ResourceShock {
        resource_id: EntityId,
        change_percent: f64,
    },
    /// Rewrite one aspect of an actor's behavior for the rest of the
    /// iteration.
    ActorBehaviorChange {
        actor_id: EntityId,
        change: BehaviorChange,
    },
    /// Override a live transaction's gating knobs for the rest of the
    /// iteration. The authored definition is untouched.
    TransactionChange {
        transaction_id: EntityId,
        #[serde(default)]
        probability: Option<f64>,
        #[serde(default)]
        cooldown: Option<Tick>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "parameter", rename_all = "snake_case")]
pub enum BehaviorChange {
    /// Overwrite the strategy field outright.
    TradingStrategy { value: TradingStrategy },
    /// Scale every existing per-resource rate by (1 + change_percent/100),
    /// floored at 0.
    ConsumptionRate { change_percent: f64 },
    ProductionRate { change_percent: f64 },
}

impl SimulationScenario {
    /// Boundary validation, run once before a simulation starts.
    pub fn validate(&self) -> SimResult<()> {
        if self.duration == 0 {
            return Err(SimError::InvalidScenario(
                "duration must be at least 1 time unit".into(),
            ));
        }
        Ok(())
    }
}
