//! Conditional, probabilistic, cooldown-gated resource transfers.
//!
//! GATE ORDER (fixed, never reordered):
//!   1. Cooldown   — too soon since the last execution, skip.
//!   2. Probability — one draw per transaction per tick.
//!   3. Conditions — AND semantics, short-circuiting.
//!   4. Balance    — both directions: positive bundle amounts must be
//!                   covered by the source, negative by the target.
//!   5. Execute    — move the bundle, stamp cooldown, bump counters.
//!
//! Transactions are processed in system-definition order with no
//! prioritization. A skipped transaction is simply reconsidered next
//! tick; skipping is a normal outcome, not a failure.

use crate::{
    error::SimResult,
    phase::SimPhase,
    rng::SimRng,
    state::{ActorState, ResourceState, SimState},
    stats::RunCollector,
    system::TransactionCondition,
    types::{EntityId, Tick},
};
use std::collections::BTreeMap;

pub struct TransactionPhase;

impl SimPhase for TransactionPhase {
    fn name(&self) -> &'static str {
        "transactions"
    }

    fn run(
        &mut self,
        state: &mut SimState,
        tick: Tick,
        rng: &mut SimRng,
        collector: &mut RunCollector,
    ) -> SimResult<()> {
        let SimState {
            resources,
            actors,
            transactions,
            ..
        } = state;

        let mut executed = 0usize;

        for transaction in transactions.iter_mut() {
            // 1. Cooldown gate. A never-executed transaction passes.
            if let Some(last) = transaction.last_executed {
                if tick - last < transaction.cooldown {
                    continue;
                }
            }

            // 2. Probability gate — exactly one draw per transaction
            //    per tick, whatever the later gates decide.
            if rng.next_f64() > transaction.probability {
                continue;
            }

            // 3. Conditions.
            if !conditions_hold(&transaction.conditions, resources, tick, rng) {
                continue;
            }

            // 4. Balance gates, both directions. Transactions that
            //    cannot be covered are skipped outright, not clamped.
            let source_covers = covers(actors, &transaction.source_actor_id, || {
                transaction
                    .resources
                    .iter()
                    .filter(|(_, amount)| **amount > 0.0)
                    .map(|(id, amount)| (id, *amount))
            });
            let target_covers = covers(actors, &transaction.target_actor_id, || {
                transaction
                    .resources
                    .iter()
                    .filter(|(_, amount)| **amount < 0.0)
                    .map(|(id, amount)| (id, -*amount))
            });
            if !source_covers || !target_covers {
                continue;
            }

            // 5. Execute. Zero amounts still count as an execution.
            for (resource_id, amount) in &transaction.resources {
                credit(actors, &transaction.source_actor_id, resource_id, -amount);
                credit(actors, &transaction.target_actor_id, resource_id, *amount);
            }
            transaction.last_executed = Some(tick);
            transaction.count += 1;
            executed += 1;
            collector.record_execution(
                &transaction.id,
                &transaction.source_actor_id,
                &transaction.target_actor_id,
                &transaction.resources,
            );
        }

        if executed > 0 {
            log::debug!("tick={tick} transactions: {executed} executed");
        }
        Ok(())
    }
}

fn conditions_hold(
    conditions: &[TransactionCondition],
    resources: &BTreeMap<EntityId, ResourceState>,
    tick: Tick,
    rng: &mut SimRng,
) -> bool {
    conditions.iter().all(|condition| match condition {
        TransactionCondition::ResourceAmount {
            resource_id,
            operator,
            value,
        } => {
            let amount = resources.get(resource_id).map(|r| r.amount).unwrap_or(0.0);
            operator.compare(amount, *value)
        }
        TransactionCondition::TimeElapsed { operator, value } => {
            operator.compare(tick as f64, *value as f64)
        }
        TransactionCondition::RandomChance { value } => rng.chance(*value),
        // Placeholder: authored data may carry these, they never gate.
        TransactionCondition::ActorState { .. } => true,
    })
}

/// Does the actor hold at least every required (resource, amount) pair?
fn covers<'a, I, F>(actors: &BTreeMap<EntityId, ActorState>, actor_id: &str, required: F) -> bool
where
    I: Iterator<Item = (&'a EntityId, f64)>,
    F: Fn() -> I,
{
    let Some(actor) = actors.get(actor_id) else {
        // Validated at the boundary; an absent actor here means the
        // definition changed under us, so refuse the transfer.
        log::warn!("transaction skipped: unknown actor '{actor_id}'");
        return false;
    };
    required().all(|(resource_id, amount)| {
        actor.resources.get(resource_id).copied().unwrap_or(0.0) >= amount
    })
}

fn credit(
    actors: &mut BTreeMap<EntityId, ActorState>,
    actor_id: &str,
    resource_id: &EntityId,
    delta: f64,
) {
    if let Some(actor) = actors.get_mut(actor_id) {
        *actor.resources.entry(resource_id.clone()).or_insert(0.0) += delta;
    }
}
