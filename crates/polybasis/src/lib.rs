//! polybasis: a saturation engine for multivariate polynomial equations
//!
//! Given a set of polynomial equalities `p_i = 0` over a shared
//! decision-diagram representation, the engine derives consequences by
//! canceling leading monomials (reduction and S-polynomial formation) until
//! the set is saturated, a contradiction `c = 0` with `c` a nonzero constant
//! is found, or a resource bound is hit. The saturated set is a Gröbner-like
//! basis with respect to a fixed variable ordering.

pub mod dep;
pub mod limit;
pub mod pdd;
pub mod saturation;

// Re-export the algebra layer
pub use pdd::{MemOut, Pdd, PddManager, Var};

// Re-export dependency tracking
pub use dep::{Dep, DepManager};

// Re-export cancellation
pub use limit::ResourceLimit;

// Re-export the saturation engine
pub use saturation::{
    EqId, EqState, Equation, SaturationOutcome, Solver, SolverConfig, Statistics,
};
