//! Scenario event applier.
//!
//! Runs first in the tick order, before regeneration, so a shock at
//! tick t is visible to every later phase at t. Events that reference
//! unknown ids are skipped and logged — a bad authored event must
//! never kill a run.

use crate::{
    error::SimResult,
    phase::SimPhase,
    rng::SimRng,
    scenario::{BehaviorChange, EventData, ScenarioEvent},
    state::{sane, SimState},
    stats::RunCollector,
    types::{EntityId, Tick},
};
use std::collections::BTreeMap;

pub struct EventPhase {
    events: Vec<ScenarioEvent>,
}

impl EventPhase {
    pub fn new(events: &[ScenarioEvent]) -> Self {
        Self {
            events: events.to_vec(),
        }
    }

    /// Apply one due event. Returns false when the event was skipped.
    fn apply(&self, event: &ScenarioEvent, state: &mut SimState, tick: Tick) -> bool {
        match &event.data {
            EventData::ResourceShock {
                resource_id,
                change_percent,
            } => {
                let Some(resource) = state.resources.get_mut(resource_id) else {
                    log::warn!("tick={tick} event skipped: unknown resource '{resource_id}'");
                    return false;
                };
                let old = resource.amount;
                let factor = 1.0 + sane(*change_percent, 0.0) / 100.0;
                resource.set_amount(old * factor);
                log::debug!(
                    "tick={tick} shock: '{resource_id}' {old:.2} -> {:.2}",
                    resource.amount
                );
                true
            }
            EventData::ActorBehaviorChange { actor_id, change } => {
                let Some(actor) = state.actors.get_mut(actor_id) else {
                    log::warn!("tick={tick} event skipped: unknown actor '{actor_id}'");
                    return false;
                };
                match change {
                    BehaviorChange::TradingStrategy { value } => {
                        actor.behavior.trading_strategy = *value;
                    }
                    BehaviorChange::ConsumptionRate { change_percent } => {
                        scale_rates(&mut actor.behavior.consumption_rate, *change_percent);
                    }
                    BehaviorChange::ProductionRate { change_percent } => {
                        scale_rates(&mut actor.behavior.production_rate, *change_percent);
                    }
                }
                log::debug!("tick={tick} behavior change applied to '{actor_id}'");
                true
            }
            EventData::TransactionChange {
                transaction_id,
                probability,
                cooldown,
            } => {
                let Some(transaction) = state.transaction_mut(transaction_id) else {
                    log::warn!(
                        "tick={tick} event skipped: unknown transaction '{transaction_id}'"
                    );
                    return false;
                };
                if let Some(p) = probability {
                    transaction.probability = sane(*p, transaction.probability).clamp(0.0, 1.0);
                }
                if let Some(c) = cooldown {
                    transaction.cooldown = *c;
                }
                log::debug!(
                    "tick={tick} transaction '{transaction_id}' tuned: p={:.2} cooldown={}",
                    transaction.probability,
                    transaction.cooldown
                );
                true
            }
        }
    }
}

/// Scale every existing per-resource rate by (1 + change_percent/100),
/// floored at 0.
fn scale_rates(rates: &mut BTreeMap<EntityId, f64>, change_percent: f64) {
    let factor = (1.0 + sane(change_percent, 0.0) / 100.0).max(0.0);
    for rate in rates.values_mut() {
        *rate *= factor;
    }
}

impl SimPhase for EventPhase {
    fn name(&self) -> &'static str {
        "events"
    }

    fn run(
        &mut self,
        state: &mut SimState,
        tick: Tick,
        _rng: &mut SimRng,
        collector: &mut RunCollector,
    ) -> SimResult<()> {
        // Linear scan is fine: scenarios carry at most a handful of events.
        let due: Vec<ScenarioEvent> = self
            .events
            .iter()
            .filter(|e| e.trigger_time == tick)
            .cloned()
            .collect();

        for event in due {
            if self.apply(&event, state, tick) {
                collector.record_event(tick, event);
            }
        }
        Ok(())
    }
}
