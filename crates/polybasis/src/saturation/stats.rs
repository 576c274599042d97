//! Statistics collected during saturation.

use serde::Serialize;

/// Counter snapshot; queue sizes are filled in by [`Solver::statistics`].
///
/// Serializes to flat JSON so any sink can consume it.
///
/// [`Solver::statistics`]: crate::saturation::Solver::statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Statistics {
    /// Saturation steps taken (including the final empty pick).
    pub steps: usize,
    /// Attempted pairwise reductions.
    pub simplified: usize,
    /// S-polynomials added to the queues.
    pub superposed: usize,
    /// Live equations in the solved queue.
    pub solved: usize,
    /// Live equations in the processed queue.
    pub processed: usize,
    /// Live equations in the to-simplify queue.
    pub to_simplify: usize,
    /// Largest polynomial degree seen.
    pub max_degree: usize,
    /// Largest polynomial tree size seen.
    pub max_size: usize,
}
