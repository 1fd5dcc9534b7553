//! The simulation driver.
//!
//! EXECUTION ORDER (fixed, documented, never reordered):
//!   1. Event phase        — scenario shocks due this tick
//!   2. Regeneration phase — passive pool regrowth
//!   3. Behavior phase     — actor consumption/production
//!   4. Transaction phase  — gated transfers
//!
//! RULES:
//!   - Every iteration replays the scenario on a fresh SimState.
//!   - All randomness flows through the single SimRng owned here.
//!   - Preconditions are checked before any state exists; a failed
//!     run never yields a partial result.

use crate::{
    behavior_phase::BehaviorPhase,
    config::RunSettings,
    error::{SimError, SimResult},
    event_phase::EventPhase,
    phase::SimPhase,
    regen_phase::RegenPhase,
    result::SimulationResult,
    rng::SimRng,
    scenario::SimulationScenario,
    snapshot::SNAPSHOT_INTERVAL,
    state::SimState,
    stats::RunCollector,
    system::EconomySystem,
    transaction_phase::TransactionPhase,
};

pub struct SimEngine {
    system: EconomySystem,
    scenario: SimulationScenario,
    settings: RunSettings,
}

impl SimEngine {
    /// Validate and wire up a run. Fails fast with a descriptive error
    /// before any simulation state is touched.
    pub fn new(
        system: EconomySystem,
        scenario: SimulationScenario,
        settings: RunSettings,
    ) -> SimResult<Self> {
        system.validate()?;
        scenario.validate()?;
        if scenario.system_id != system.id {
            return Err(SimError::SystemMismatch {
                expected: scenario.system_id.clone(),
                actual: system.id.clone(),
            });
        }
        if settings.iterations == 0 {
            return Err(SimError::InvalidScenario(
                "iterations must be at least 1".into(),
            ));
        }
        Ok(Self {
            system,
            scenario,
            settings,
        })
    }

    /// Run to completion without progress reporting.
    pub fn run(&self) -> SimResult<SimulationResult> {
        self.run_with_progress(|_| {})
    }

    /// Run to completion, invoking `on_progress` with an integer
    /// percentage (0..=100) after every simulated time unit.
    pub fn run_with_progress<F: FnMut(u8)>(
        &self,
        mut on_progress: F,
    ) -> SimResult<SimulationResult> {
        let mut rng = SimRng::new(self.settings.seed);
        let mut collector = RunCollector::new(&self.system);
        let mut phases: Vec<Box<dyn SimPhase>> = vec![
            Box::new(EventPhase::new(&self.scenario.events)),
            Box::new(RegenPhase),
            Box::new(BehaviorPhase),
            Box::new(TransactionPhase),
        ];

        let duration = self.scenario.duration;
        let total_steps = self.settings.iterations as u64 * duration;
        let mut global_step = 0u64;

        log::info!(
            "run started: system='{}' scenario='{}' seed={} iterations={} duration={}",
            self.system.id,
            self.scenario.id,
            self.settings.seed,
            self.settings.iterations,
            duration
        );

        for iteration in 0..self.settings.iterations {
            collector.begin_iteration(iteration);
            let mut state = SimState::init(&self.system);

            for tick in 1..=duration {
                state.time = tick;
                for phase in phases.iter_mut() {
                    phase
                        .run(&mut state, tick, &mut rng, &mut collector)
                        .map_err(|e| {
                            log::error!("phase '{}' failed at tick {tick}: {e}", phase.name());
                            e
                        })?;
                }
                collector.observe_tick(&state);
                if tick % SNAPSHOT_INTERVAL == 0 || tick == duration {
                    collector.snapshot(&state);
                }
                global_step += 1;
                on_progress(((global_step * 100) / total_steps) as u8);
            }

            collector.fold_iteration(&state);
            log::debug!("iteration {iteration} folded");
        }

        let result = collector.finalize(&self.scenario, &self.settings);
        log::info!(
            "run complete: stability={:.3} inflation={:.4} inequality={:.4}",
            result.summary.system_stability,
            result.summary.inflation_rate,
            result.summary.inequality_index
        );
        Ok(result)
    }
}
