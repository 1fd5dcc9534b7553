//! Static economy-system definitions, authored in the workbench editors.
//!
//! RULE: These structs are immutable during simulation. Every run works
//! on per-iteration working copies (see state.rs); the authored
//! definition is never touched, so iteration N+1 always restarts from
//! the same values as iteration 0.

use crate::{
    error::{SimError, SimResult},
    types::{EntityId, Tick},
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EconomySystem {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub resources: Vec<ResourceDef>,
    #[serde(default)]
    pub actors: Vec<ActorDef>,
    #[serde(default)]
    pub transactions: Vec<TransactionDef>,
}

/// A fungible, capped, optionally-regenerating system-pool quantity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceDef {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub initial_amount: f64,
    #[serde(default)]
    pub regeneration_rate: f64,
    #[serde(default = "default_max_amount")]
    pub max_amount: f64,
}

pub(crate) fn default_max_amount() -> f64 {
    1000.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorDef {
    pub id: EntityId,
    pub name: String,
    #[serde(rename = "type")]
    pub actor_type: ActorType,
    /// Per-resource holdings at the start of every iteration.
    #[serde(default)]
    pub resources: BTreeMap<EntityId, f64>,
    #[serde(default)]
    pub behavior: ActorBehavior,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorType {
    Player,
    Npc,
    System,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActorBehavior {
    /// Fixed per-tick draw-down, keyed by resource id.
    #[serde(default)]
    pub consumption_rate: BTreeMap<EntityId, f64>,
    /// Fixed per-tick output, keyed by resource id.
    #[serde(default)]
    pub production_rate: BTreeMap<EntityId, f64>,
    #[serde(default)]
    pub trading_strategy: TradingStrategy,
    #[serde(default)]
    pub priority_resources: Vec<EntityId>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradingStrategy {
    Aggressive,
    #[default]
    Balanced,
    Conservative,
}

/// A conditional, probabilistic, cooldown-gated transfer rule.
///
/// `resources` is a signed bundle: a positive amount moves source to
/// target, a negative amount the reverse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionDef {
    pub id: EntityId,
    pub source_actor_id: EntityId,
    pub target_actor_id: EntityId,
    #[serde(default)]
    pub resources: BTreeMap<EntityId, f64>,
    #[serde(default)]
    pub conditions: Vec<TransactionCondition>,
    #[serde(default = "default_probability")]
    pub probability: f64,
    #[serde(default)]
    pub cooldown: Tick,
}

pub(crate) fn default_probability() -> f64 {
    1.0
}

/// Transaction gating predicates. All conditions on a transaction must
/// hold (AND semantics) for it to execute.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransactionCondition {
    /// Compare a resource's current system-pool amount against `value`.
    ResourceAmount {
        resource_id: EntityId,
        operator: ComparisonOp,
        value: f64,
    },
    /// Compare the current simulation time against `value`.
    TimeElapsed { operator: ComparisonOp, value: Tick },
    /// Independent draw; passes when the draw does not exceed `value`.
    RandomChance { value: f64 },
    /// Placeholder kept so authored data round-trips. Never gates.
    ActorState { actor_id: EntityId, key: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComparisonOp {
    #[serde(rename = ">")]
    Greater,
    #[serde(rename = ">=")]
    GreaterOrEqual,
    #[serde(rename = "<")]
    Less,
    #[serde(rename = "<=")]
    LessOrEqual,
    #[serde(rename = "==")]
    Equal,
    #[serde(rename = "!=")]
    NotEqual,
}

impl ComparisonOp {
    pub fn compare(&self, lhs: f64, rhs: f64) -> bool {
        match self {
            Self::Greater => lhs > rhs,
            Self::GreaterOrEqual => lhs >= rhs,
            Self::Less => lhs < rhs,
            Self::LessOrEqual => lhs <= rhs,
            Self::Equal => lhs == rhs,
            Self::NotEqual => lhs != rhs,
        }
    }
}

impl EconomySystem {
    /// Boundary validation, run once before a simulation starts.
    ///
    /// Rejects duplicate ids and transactions whose actor or resource
    /// references do not resolve — those would otherwise fail deep in
    /// the tick loop. Malformed numbers are not an error here: state
    /// initialization replaces them with safe defaults.
    pub fn validate(&self) -> SimResult<()> {
        let mut resource_ids = HashSet::new();
        for resource in &self.resources {
            if !resource_ids.insert(resource.id.as_str()) {
                return Err(SimError::InvalidSystem(format!(
                    "duplicate resource id '{}'",
                    resource.id
                )));
            }
        }

        let mut actor_ids = HashSet::new();
        for actor in &self.actors {
            if !actor_ids.insert(actor.id.as_str()) {
                return Err(SimError::InvalidSystem(format!(
                    "duplicate actor id '{}'",
                    actor.id
                )));
            }
        }

        let mut transaction_ids = HashSet::new();
        for transaction in &self.transactions {
            if !transaction_ids.insert(transaction.id.as_str()) {
                return Err(SimError::InvalidSystem(format!(
                    "duplicate transaction id '{}'",
                    transaction.id
                )));
            }
            for (label, actor_id) in [
                ("source", &transaction.source_actor_id),
                ("target", &transaction.target_actor_id),
            ] {
                if !actor_ids.contains(actor_id.as_str()) {
                    return Err(SimError::InvalidSystem(format!(
                        "transaction '{}' references unknown {label} actor '{actor_id}'",
                        transaction.id
                    )));
                }
            }
            for resource_id in transaction.resources.keys() {
                if !resource_ids.contains(resource_id.as_str()) {
                    return Err(SimError::InvalidSystem(format!(
                        "transaction '{}' references unknown resource '{resource_id}'",
                        transaction.id
                    )));
                }
            }
            for condition in &transaction.conditions {
                if let TransactionCondition::ResourceAmount { resource_id, .. } = condition {
                    if !resource_ids.contains(resource_id.as_str()) {
                        return Err(SimError::InvalidSystem(format!(
                            "transaction '{}' condition references unknown resource '{resource_id}'",
                            transaction.id
                        )));
                    }
                }
            }
        }

        Ok(())
    }
}
