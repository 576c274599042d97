//! Equations and their queue membership state.

use crate::dep::Dep;
use crate::pdd::Pdd;

/// Id of an equation in the solver's slab.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct EqId(pub(crate) u32);

impl EqId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Which of the three queues an equation belongs to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EqState {
    /// Awaiting selection by the scheduler; watched by its leading variable.
    ToSimplify,
    /// Committed; used as a reducer and superposition partner.
    Processed,
    /// In solved form `x·c + r` with `c` constant, or the conflict witness.
    Solved,
}

/// A polynomial equation `poly = 0` with its provenance token.
///
/// Owned by the engine between `add` and `reset`. `idx` is the equation's
/// position in the queue named by `state`, kept exact so queue removal is a
/// swap-with-last.
#[derive(Debug, Clone)]
pub struct Equation {
    pub(crate) poly: Pdd,
    pub(crate) dep: Dep,
    pub(crate) state: EqState,
    pub(crate) idx: u32,
}

impl Equation {
    pub(crate) fn new(poly: Pdd, dep: Dep) -> Self {
        Equation {
            poly,
            dep,
            state: EqState::ToSimplify,
            idx: 0,
        }
    }

    pub fn poly(&self) -> Pdd {
        self.poly
    }

    pub fn dep(&self) -> Dep {
        self.dep
    }

    pub fn state(&self) -> EqState {
        self.state
    }

    pub fn idx(&self) -> usize {
        self.idx as usize
    }
}
