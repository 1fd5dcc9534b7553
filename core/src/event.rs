//! The applied-event log carried on the simulation result.
//!
//! Every scenario event that actually mutates state is appended here
//! verbatim, in chronological order, for timeline display in the
//! results viewer. Skipped events go to the diagnostic log only.

use crate::{scenario::ScenarioEvent, types::Tick};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    pub iteration: u32,
    pub time: Tick,
    #[serde(flatten)]
    pub event: ScenarioEvent,
}
