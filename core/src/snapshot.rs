//! Sparse time-series snapshots.
//!
//! One point is captured every SNAPSHOT_INTERVAL ticks plus the final
//! tick of every iteration. Result consumers (the timeline tab, the
//! inflation metric) depend on this exact sampling policy; do not
//! "fix" it to uniform sampling.

use crate::{state::SimState, types::{EntityId, Tick}};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const SNAPSHOT_INTERVAL: Tick = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub iteration: u32,
    pub time: Tick,
    /// System-pool amounts at capture time.
    pub resources: BTreeMap<EntityId, f64>,
    /// Total wealth per actor at capture time.
    pub actor_wealth: BTreeMap<EntityId, f64>,
}

impl TimeSeriesPoint {
    pub fn capture(iteration: u32, state: &SimState) -> Self {
        Self {
            iteration,
            time: state.time,
            resources: state
                .resources
                .iter()
                .map(|(id, r)| (id.clone(), r.amount))
                .collect(),
            actor_wealth: state
                .actors
                .iter()
                .map(|(id, a)| (id.clone(), a.wealth()))
                .collect(),
        }
    }
}
