//! Saturation of polynomial equation sets under reduction and superposition.
//!
//! The engine maintains two working sets, *processed* and *to-simplify*, plus
//! a *solved* set of equations whose leading coefficient is constant. Each
//! step picks the simplest to-simplify equation at the highest live variable
//! level, mutually simplifies it against the processed set, superposes it
//! with every processed equation, rewrites the affected watch list, and
//! commits it. The loop stops when the to-simplify set drains (the basis is
//! saturated), a nonzero-constant equation is derived (contradiction), or a
//! resource bound trips.

mod equation;
mod simplify;
mod solver;
mod stats;

pub use equation::{EqId, EqState, Equation};
pub use solver::Solver;
pub use stats::Statistics;

use serde::Serialize;

/// Bounds for the saturation loop.
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Cap on `|to_simplify| + |processed|`.
    pub eqs_threshold: usize,
    /// Cap on saturation steps.
    pub max_steps: usize,
    /// Tree-size bound of the default complexity guard.
    pub max_tree_size: usize,
    /// Degree bound of the default complexity guard.
    pub max_degree: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            eqs_threshold: 1024,
            max_steps: 10_000,
            max_tree_size: 10_000,
            max_degree: 64,
        }
    }
}

/// Why `saturate` returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SaturationOutcome {
    /// The to-simplify queue drained; the basis is closed under reduction
    /// and superposition.
    Saturated,
    /// A nonzero-constant equation was derived; see [`Solver::conflict`].
    Conflict,
    /// The equation-count or step-count bound tripped.
    LimitReached,
    /// The cancellation flag was raised.
    Canceled,
    /// The algebra ran out of nodes; queues remain inspectable and a later
    /// `saturate` rebuilds the watch index.
    MemOut,
}
