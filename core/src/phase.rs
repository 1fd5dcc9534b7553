//! Tick phase trait.
//!
//! RULE: The engine calls run() on each phase in the documented fixed
//! order, every tick: events -> regeneration -> behaviors ->
//! transactions. Phases communicate only through SimState and the
//! RunCollector; no phase calls another phase's functions directly.

use crate::{error::SimResult, rng::SimRng, state::SimState, stats::RunCollector, types::Tick};

/// The contract every tick phase fulfills.
pub trait SimPhase {
    /// Unique stable name for this phase.
    fn name(&self) -> &'static str;

    /// Called once per tick by the engine.
    ///
    /// - `state`:     the current iteration's working state
    /// - `tick`:      the current time unit, 1..=duration
    /// - `rng`:       the run's single deterministic generator
    /// - `collector`: the run-wide statistics and log accumulator
    fn run(
        &mut self,
        state: &mut SimState,
        tick: Tick,
        rng: &mut SimRng,
        collector: &mut RunCollector,
    ) -> SimResult<()>;
}
