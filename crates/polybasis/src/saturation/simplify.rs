//! Cheap rewriting pass run before the saturation loop.
//!
//! Works the to-simplify queue only (nothing is committed yet, so the watch
//! index does not exist and reductions skip the complexity guard):
//! duplicate polynomials are merged, and solved forms `x·c + r` are
//! propagated through the rest of the queue until a fixed point. Conflicts
//! surfacing here are recorded exactly as they would be inside the loop.

use super::equation::EqState;
use super::solver::Solver;
use crate::pdd::{MemOut, Pdd};
use log::debug;
use std::collections::HashSet;

pub(crate) struct Simplifier<'a> {
    solver: &'a mut Solver,
}

impl<'a> Simplifier<'a> {
    pub fn new(solver: &'a mut Solver) -> Self {
        Simplifier { solver }
    }

    pub fn run(&mut self) -> Result<(), MemOut> {
        let mut simplified = true;
        while simplified && !self.solver.done() {
            simplified = false;
            simplified |= self.eliminate_duplicates();
            simplified |= self.propagate_solved_forms()?;
        }
        Ok(())
    }

    /// Retire queue entries whose polynomial already occurs earlier. The
    /// survivor's dependency token is kept as is: either token alone
    /// justifies the shared polynomial.
    fn eliminate_duplicates(&mut self) -> bool {
        let mut seen: HashSet<Pdd> = HashSet::new();
        let mut changed = false;
        for id in self.solver.to_simplify_ids() {
            let p = self.solver.eq(id).poly();
            if !seen.insert(p) {
                debug!("duplicate dropped: {}", self.solver.manager().display(p));
                self.solver.pop_equation(id);
                self.solver.retire(id);
                changed = true;
            }
        }
        changed
    }

    /// Rewrite every queue entry with each solved form found in the queue.
    /// Terminates because each successful reduction strictly shrinks the
    /// target under the monomial order.
    fn propagate_solved_forms(&mut self) -> Result<bool, MemOut> {
        let mut changed = false;
        for src in self.solver.to_simplify_ids() {
            if !self.solver.is_live(src)
                || self.solver.eq(src).state() != EqState::ToSimplify
                || !self.solver.is_solved_form(self.solver.eq(src).poly())
            {
                continue;
            }
            for dst in self.solver.to_simplify_ids() {
                if dst == src || !self.solver.is_live(dst) {
                    continue;
                }
                if self.solver.eq(dst).state() != EqState::ToSimplify {
                    continue;
                }
                if self.solver.simplify_with(dst, src)?.simplified {
                    changed = true;
                    if self.solver.is_trivial(dst) {
                        self.solver.pop_equation(dst);
                        self.solver.retire(dst);
                    } else if self.solver.is_conflict(dst) {
                        self.solver.pop_equation(dst);
                        self.solver.set_conflict(dst);
                        return Ok(changed);
                    }
                }
            }
            if self.solver.done() {
                break;
            }
        }
        Ok(changed)
    }
}
