//! Passive resource regeneration.
//!
//! Pure additive regrowth toward the pool cap. Decay is modeled by
//! shocks and consumption elsewhere, never here.

use crate::{
    error::SimResult, phase::SimPhase, rng::SimRng, state::SimState, stats::RunCollector,
    types::Tick,
};

pub struct RegenPhase;

impl SimPhase for RegenPhase {
    fn name(&self) -> &'static str {
        "regeneration"
    }

    fn run(
        &mut self,
        state: &mut SimState,
        _tick: Tick,
        _rng: &mut SimRng,
        _collector: &mut RunCollector,
    ) -> SimResult<()> {
        for resource in state.resources.values_mut() {
            if resource.regeneration_rate > 0.0 && resource.amount < resource.max_amount {
                resource.set_amount(resource.amount + resource.regeneration_rate);
            }
        }
        Ok(())
    }
}
