//! econsim-core — discrete-event economic-system simulation engine
//! for the designer workbench's stress-testing tool.
//!
//! A run takes an immutable [`system::EconomySystem`] definition and a
//! [`scenario::SimulationScenario`], replays the scenario `iterations`
//! times on fresh per-iteration state, and folds every replay into one
//! [`result::SimulationResult`]: sparse time series, applied-event
//! log, and summary statistics (stability, inflation, inequality).
//!
//! Same seed, same inputs: bit-identical summary and event log. See
//! the rng module for the reproducibility contract.

pub mod behavior_phase;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod event_phase;
pub mod phase;
pub mod regen_phase;
pub mod result;
pub mod rng;
pub mod scenario;
pub mod snapshot;
pub mod state;
pub mod stats;
pub mod system;
pub mod transaction_phase;
pub mod types;
