//! Ephemeral per-iteration simulation state.
//!
//! Created fresh from the static system definition at the start of
//! every iteration, mutated by the tick phases, folded into the run
//! statistics, then discarded. Nothing here survives an iteration, so
//! replays are independent by construction.

use crate::{
    system::{ActorBehavior, EconomySystem, TransactionCondition},
    types::{EntityId, Tick},
};
use std::collections::BTreeMap;

/// Replace a malformed authored number with a safe default.
/// Bad author data must degrade, never crash a run.
pub(crate) fn sane(value: f64, default: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        default
    }
}

#[derive(Debug, Clone)]
pub struct ResourceState {
    pub amount: f64,
    pub max_amount: f64,
    pub regeneration_rate: f64,
}

impl ResourceState {
    /// Every mutation of the pool amount goes through here.
    /// Invariant: 0 <= amount <= max_amount, always.
    pub fn set_amount(&mut self, amount: f64) {
        self.amount = amount.clamp(0.0, self.max_amount);
    }
}

#[derive(Debug, Clone)]
pub struct ActorState {
    pub resources: BTreeMap<EntityId, f64>,
    pub behavior: ActorBehavior,
    /// Holdings at iteration start, kept for growth reporting.
    pub initial_resources: BTreeMap<EntityId, f64>,
}

impl ActorState {
    /// Total wealth: the sum of all held resources.
    pub fn wealth(&self) -> f64 {
        self.resources.values().sum()
    }
}

/// Working copy of a transaction. `probability` and `cooldown` are
/// live values: a transaction_change event may override them for the
/// remainder of the iteration.
#[derive(Debug, Clone)]
pub struct TransactionState {
    pub id: EntityId,
    pub source_actor_id: EntityId,
    pub target_actor_id: EntityId,
    pub resources: BTreeMap<EntityId, f64>,
    pub conditions: Vec<TransactionCondition>,
    pub probability: f64,
    pub cooldown: Tick,
    pub last_executed: Option<Tick>,
    pub count: u64,
}

#[derive(Debug, Clone)]
pub struct SimState {
    pub resources: BTreeMap<EntityId, ResourceState>,
    pub actors: BTreeMap<EntityId, ActorState>,
    /// Kept as a Vec: transactions are processed in definition order.
    pub transactions: Vec<TransactionState>,
    pub time: Tick,
}

impl SimState {
    /// Build the working state for one iteration, applying the
    /// defaulting rules: initial amount 0, max 1000, regeneration 0,
    /// never-executed transactions, zero counters. Non-finite authored
    /// numbers fall back to the same defaults.
    pub fn init(system: &EconomySystem) -> Self {
        let resources = system
            .resources
            .iter()
            .map(|def| {
                let max_amount = sane(def.max_amount, crate::system::default_max_amount()).max(0.0);
                let mut resource = ResourceState {
                    amount: 0.0,
                    max_amount,
                    regeneration_rate: sane(def.regeneration_rate, 0.0),
                };
                resource.set_amount(sane(def.initial_amount, 0.0));
                (def.id.clone(), resource)
            })
            .collect();

        let actors = system
            .actors
            .iter()
            .map(|def| {
                let holdings: BTreeMap<EntityId, f64> = def
                    .resources
                    .iter()
                    .map(|(id, amount)| (id.clone(), sane(*amount, 0.0).max(0.0)))
                    .collect();
                let mut behavior = def.behavior.clone();
                for rate in behavior.consumption_rate.values_mut() {
                    *rate = sane(*rate, 0.0).max(0.0);
                }
                for rate in behavior.production_rate.values_mut() {
                    *rate = sane(*rate, 0.0).max(0.0);
                }
                let actor = ActorState {
                    initial_resources: holdings.clone(),
                    resources: holdings,
                    behavior,
                };
                (def.id.clone(), actor)
            })
            .collect();

        let transactions = system
            .transactions
            .iter()
            .map(|def| TransactionState {
                id: def.id.clone(),
                source_actor_id: def.source_actor_id.clone(),
                target_actor_id: def.target_actor_id.clone(),
                resources: def
                    .resources
                    .iter()
                    .map(|(id, amount)| (id.clone(), sane(*amount, 0.0)))
                    .collect(),
                conditions: def.conditions.clone(),
                probability: sane(def.probability, crate::system::default_probability())
                    .clamp(0.0, 1.0),
                cooldown: def.cooldown,
                last_executed: None,
                count: 0,
            })
            .collect();

        Self {
            resources,
            actors,
            transactions,
            time: 0,
        }
    }

    pub fn transaction_mut(&mut self, id: &str) -> Option<&mut TransactionState> {
        self.transactions.iter_mut().find(|t| t.id == id)
    }
}
