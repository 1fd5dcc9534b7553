//! Statistics aggregation.
//!
//! Collected in three passes: incremental per-tick tallies (executed
//! transactions, resource min/max), a per-actor fold at the end of
//! every iteration, and a single finalization pass after the last
//! iteration that produces the result summary.

use crate::{
    config::RunSettings,
    event::EventRecord,
    result::{ActorStats, ResourceStats, SimulationResult, Summary, TransactionStats},
    scenario::{ScenarioEvent, SimulationScenario},
    snapshot::TimeSeriesPoint,
    state::SimState,
    system::EconomySystem,
    types::{EntityId, Tick},
};
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
struct ResourceRunning {
    min: f64,
    max: f64,
    final_amount: f64,
}

#[derive(Debug, Clone, Default)]
struct ActorRunning {
    transaction_count: u64,
    wealth_change: f64,
    resource_growth: BTreeMap<EntityId, f64>,
}

#[derive(Debug, Clone, Default)]
struct TransactionRunning {
    count: u64,
    total_resources_exchanged: f64,
}

/// Run-wide accumulator threaded through every tick phase and folded
/// once per iteration. Owns the applied-event log and the sparse time
/// series until finalization hands them to the result.
pub struct RunCollector {
    current_iteration: u32,
    events: Vec<EventRecord>,
    time_series: Vec<TimeSeriesPoint>,
    resource_running: BTreeMap<EntityId, ResourceRunning>,
    actor_running: BTreeMap<EntityId, ActorRunning>,
    transaction_running: BTreeMap<EntityId, TransactionRunning>,
}

impl RunCollector {
    /// Pre-seeds every stats map with the system's ids so untouched
    /// entities still appear in the summary with zeroed stats.
    pub fn new(system: &EconomySystem) -> Self {
        let actor_running = system
            .actors
            .iter()
            .map(|a| (a.id.clone(), ActorRunning::default()))
            .collect();
        let transaction_running = system
            .transactions
            .iter()
            .map(|t| (t.id.clone(), TransactionRunning::default()))
            .collect();
        Self {
            current_iteration: 0,
            events: Vec::new(),
            time_series: Vec::new(),
            resource_running: BTreeMap::new(),
            actor_running,
            transaction_running,
        }
    }

    pub fn begin_iteration(&mut self, iteration: u32) {
        self.current_iteration = iteration;
    }

    /// Append an applied scenario event to the result log, verbatim.
    pub fn record_event(&mut self, time: Tick, event: ScenarioEvent) {
        self.events.push(EventRecord {
            iteration: self.current_iteration,
            time,
            event,
        });
    }

    /// Tally one executed transaction.
    pub fn record_execution(
        &mut self,
        transaction_id: &str,
        source_actor_id: &str,
        target_actor_id: &str,
        bundle: &BTreeMap<EntityId, f64>,
    ) {
        let entry = self
            .transaction_running
            .entry(transaction_id.to_string())
            .or_default();
        entry.count += 1;
        entry.total_resources_exchanged += bundle.values().sum::<f64>();

        for actor_id in [source_actor_id, target_actor_id] {
            self.actor_running
                .entry(actor_id.to_string())
                .or_default()
                .transaction_count += 1;
        }
    }

    pub fn snapshot(&mut self, state: &SimState) {
        self.time_series
            .push(TimeSeriesPoint::capture(self.current_iteration, state));
    }

    /// Observe resource dispersion after one completed tick. Volatility
    /// is a whole-run measure, so every tick of every iteration feeds
    /// the same running min/max.
    pub fn observe_tick(&mut self, state: &SimState) {
        for (id, resource) in &state.resources {
            let amount = resource.amount;
            self.resource_running
                .entry(id.clone())
                .and_modify(|r| {
                    r.min = r.min.min(amount);
                    r.max = r.max.max(amount);
                    r.final_amount = amount;
                })
                .or_insert(ResourceRunning {
                    min: amount,
                    max: amount,
                    final_amount: amount,
                });
        }
    }

    /// Fold one finished iteration's state into the per-actor stats:
    /// wealth and per-resource growth (last iteration wins).
    pub fn fold_iteration(&mut self, state: &SimState) {
        for (id, actor) in &state.actors {
            let entry = self.actor_running.entry(id.clone()).or_default();
            entry.wealth_change = actor.wealth();
            entry.resource_growth = actor
                .resources
                .iter()
                .map(|(resource_id, held)| {
                    let initial = actor
                        .initial_resources
                        .get(resource_id)
                        .copied()
                        .unwrap_or(0.0);
                    (resource_id.clone(), held - initial)
                })
                .collect();
        }
    }

    /// One-shot finalization after the last iteration.
    pub fn finalize(
        self,
        scenario: &SimulationScenario,
        settings: &RunSettings,
    ) -> SimulationResult {
        let resource_stats: BTreeMap<EntityId, ResourceStats> = self
            .resource_running
            .into_iter()
            .map(|(id, r)| {
                let average = (r.min + r.max) / 2.0;
                let volatility = if average != 0.0 {
                    (r.max - r.min) / average
                } else {
                    0.0
                };
                (
                    id,
                    ResourceStats {
                        min: r.min,
                        max: r.max,
                        average,
                        final_amount: r.final_amount,
                        volatility,
                    },
                )
            })
            .collect();

        let total_volatility: f64 = resource_stats.values().map(|r| r.volatility).sum();
        let system_stability = if total_volatility == 0.0 {
            1.0
        } else {
            1.0 / (total_volatility / resource_stats.len() as f64)
        };

        let inflation_rate = inflation_from_series(&self.time_series);

        let actor_stats: BTreeMap<EntityId, ActorStats> = self
            .actor_running
            .into_iter()
            .map(|(id, a)| {
                (
                    id,
                    ActorStats {
                        resource_growth: a.resource_growth,
                        transaction_count: a.transaction_count,
                        wealth_change: a.wealth_change,
                    },
                )
            })
            .collect();

        let wealth: Vec<f64> = actor_stats.values().map(|a| a.wealth_change).collect();
        let inequality_index = gini_coefficient(&wealth);

        let transaction_stats: BTreeMap<EntityId, TransactionStats> = self
            .transaction_running
            .into_iter()
            .map(|(id, t)| {
                let average_size = if t.count > 0 {
                    t.total_resources_exchanged / t.count as f64
                } else {
                    0.0
                };
                (
                    id,
                    TransactionStats {
                        count: t.count,
                        total_resources_exchanged: t.total_resources_exchanged,
                        average_size,
                    },
                )
            })
            .collect();

        SimulationResult {
            id: uuid::Uuid::new_v4().to_string(),
            scenario_id: scenario.id.clone(),
            system_id: scenario.system_id.clone(),
            timestamp: chrono::Utc::now(),
            duration: scenario.duration,
            iterations: settings.iterations,
            seed: settings.seed,
            time_series: self.time_series,
            events: self.events,
            summary: Summary {
                resource_stats,
                actor_stats,
                transaction_stats,
                system_stability,
                inflation_rate,
                inequality_index,
            },
        }
    }
}

/// Mean of (final/initial - 1) across resources with a positive amount
/// in the first time-series point, against the last point.
fn inflation_from_series(series: &[TimeSeriesPoint]) -> f64 {
    let (Some(first), Some(last)) = (series.first(), series.last()) else {
        return 0.0;
    };
    let mut ratios = Vec::new();
    for (id, initial) in &first.resources {
        if *initial > 0.0 {
            let final_amount = last.resources.get(id).copied().unwrap_or(0.0);
            ratios.push(final_amount / initial - 1.0);
        }
    }
    if ratios.is_empty() {
        0.0
    } else {
        ratios.iter().sum::<f64>() / ratios.len() as f64
    }
}

/// Gini coefficient over a wealth distribution.
///
/// Mean-absolute-difference form: G = sum |xi - xj| / (2 * n^2 * mean).
/// 0 for fewer than two values or non-positive total wealth.
pub fn gini_coefficient(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let total: f64 = values.iter().sum();
    if total <= 0.0 {
        return 0.0;
    }
    let mut abs_diff_sum = 0.0;
    for a in values {
        for b in values {
            abs_diff_sum += (a - b).abs();
        }
    }
    // 2 * n^2 * mean == 2 * n * total
    abs_diff_sum / (2.0 * n as f64 * total)
}
