//! The simulation result handed to the results viewer.
//!
//! Contract toward consumers: every stats map is keyed by the same ids
//! as the input system, and `events` / `time_series` are in
//! chronological order.

use crate::{event::EventRecord, snapshot::TimeSeriesPoint, types::{EntityId, Tick}};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResult {
    pub id: String,
    pub scenario_id: EntityId,
    pub system_id: EntityId,
    pub timestamp: DateTime<Utc>,
    pub duration: Tick,
    pub iterations: u32,
    pub seed: u64,
    pub time_series: Vec<TimeSeriesPoint>,
    pub events: Vec<EventRecord>,
    pub summary: Summary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub resource_stats: BTreeMap<EntityId, ResourceStats>,
    pub actor_stats: BTreeMap<EntityId, ActorStats>,
    pub transaction_stats: BTreeMap<EntityId, TransactionStats>,
    /// 1 / mean resource volatility; 1.0 for a perfectly stable run.
    pub system_stability: f64,
    /// Mean (final/initial - 1) across resources, from the first and
    /// last time-series points.
    pub inflation_rate: f64,
    /// Gini coefficient over final actor wealth, 0 = perfect equality.
    pub inequality_index: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceStats {
    pub min: f64,
    pub max: f64,
    /// (min + max) / 2 — the viewer's historical midpoint average,
    /// not a time-weighted mean.
    pub average: f64,
    pub final_amount: f64,
    /// (max - min) / average; 0 when the average is 0.
    pub volatility: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorStats {
    /// Final minus initial holding, per resource.
    pub resource_growth: BTreeMap<EntityId, f64>,
    /// Executions this actor participated in, as source or target.
    pub transaction_count: u64,
    /// The actor's final total wealth.
    pub wealth_change: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionStats {
    pub count: u64,
    /// Signed bundle amounts summed over every execution.
    pub total_resources_exchanged: f64,
    /// total_resources_exchanged / count; 0 when never executed.
    pub average_size: f64,
}
