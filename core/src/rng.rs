//! Deterministic random number generation.
//!
//! RULE: Nothing in the simulation may call any platform RNG.
//! All randomness flows through the single SimRng owned by the
//! driver for the lifetime of one run.
//!
//! The generator is the workbench's historical linear-congruential
//! recurrence: `state = (state * 9301 + 49297) mod 233280`, output
//! `state / 233280`. The exact sequence is part of the
//! reproducibility contract: the same seed must replay a run bit
//! for bit, and result files produced by other front ends depend on
//! these constants. Never swap in a different generator.

const MULTIPLIER: u64 = 9301;
const INCREMENT: u64 = 49297;
const MODULUS: u64 = 233280;

pub struct SimRng {
    state: u64,
}

impl SimRng {
    /// Create a generator from the run's master seed.
    pub fn new(seed: u64) -> Self {
        Self {
            state: seed % MODULUS,
        }
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        self.state = (self.state * MULTIPLIER + INCREMENT) % MODULUS;
        self.state as f64 / MODULUS as f64
    }

    /// Gate helper: true when the draw does not exceed `p`.
    /// Matches the engine's "skip if draw > probability" rule, so a
    /// probability of 1.0 always passes.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() <= p
    }
}
