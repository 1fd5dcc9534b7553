//! Actor behavior flows — fixed per-tick consumption and production.
//!
//! Consumption draws down an actor's own holding and floors at zero;
//! production adds unconditionally. Actor holdings are uncapped; only
//! the system pool has a max.

use crate::{
    error::SimResult,
    phase::SimPhase,
    rng::SimRng,
    state::{ActorState, SimState},
    stats::RunCollector,
    types::Tick,
};

pub struct BehaviorPhase;

impl SimPhase for BehaviorPhase {
    fn name(&self) -> &'static str {
        "behaviors"
    }

    fn run(
        &mut self,
        state: &mut SimState,
        _tick: Tick,
        _rng: &mut SimRng,
        _collector: &mut RunCollector,
    ) -> SimResult<()> {
        for actor in state.actors.values_mut() {
            let ActorState {
                resources, behavior, ..
            } = actor;

            for (resource_id, rate) in &behavior.consumption_rate {
                let held = resources.entry(resource_id.clone()).or_insert(0.0);
                *held -= rate.min(*held);
            }
            for (resource_id, rate) in &behavior.production_rate {
                *resources.entry(resource_id.clone()).or_insert(0.0) += rate;
            }
        }
        Ok(())
    }
}
