//! Shared primitive types used across the entire simulation.

/// A simulation tick. One tick = one scenario time unit.
pub type Tick = u64;

/// A stable, unique identifier for a resource, actor, or transaction.
pub type EntityId = String;
