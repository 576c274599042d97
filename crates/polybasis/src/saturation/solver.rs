//! The saturation core: queues, watch index, reduction, superposition, and
//! the step loop.
//!
//! Two working sets drive the algorithm. Each step:
//! - pick the simplest to-simplify equation at the highest live level
//! - simplify it with the processed set, and the processed set with it
//! - superpose it against every processed equation
//! - rewrite the watch list of its leading variable
//! - commit it to processed, or to solved when its leading coefficient is
//!   constant
//!
//! Equations the step migrates back to to-simplify raise the level cursor so
//! the scheduler reconsiders them. The commit is performed on every exit path
//! of the step body, including cancellation and algebra memory-out, which
//! keeps the queue invariants intact for inspection.

use super::equation::{EqId, EqState, Equation};
use super::simplify::Simplifier;
use super::{SaturationOutcome, SolverConfig, Statistics};
use crate::dep::{Dep, DepManager};
use crate::limit::ResourceLimit;
use crate::pdd::{MemOut, Pdd, PddDisplay, PddManager, Var};
use indexmap::IndexSet;
use log::{debug, trace, warn};
use std::fmt;

/// Result of one attempted reduction of a target by a source.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct Reduction {
    pub simplified: bool,
    pub changed_leading_term: bool,
}

/// How the step body ended; the driver commits the picked equation
/// accordingly.
enum StepOutcome {
    /// Reduced to zero and retired.
    Retired,
    /// Became the conflict witness (already moved to solved).
    Conflict,
    /// A termination predicate fired mid-step.
    Halted,
    Finished { too_complex: bool },
}

/// The saturation engine.
///
/// Owns the polynomial manager, the dependency arena, and every equation
/// between [`add`](Solver::add) and [`reset`](Solver::reset).
pub struct Solver {
    m: PddManager,
    deps: DepManager,
    config: SolverConfig,
    limit: ResourceLimit,
    /// Equation slab; queues and watch lists refer into it by id.
    eqs: Vec<Option<Equation>>,
    free: Vec<EqId>,
    to_simplify: Vec<EqId>,
    processed: Vec<EqId>,
    solved: Vec<EqId>,
    /// watch[v] lists the to-simplify equations whose leading variable is v.
    watch: Vec<Vec<EqId>>,
    level2var: Vec<Var>,
    var2level: Vec<u32>,
    /// One past the highest level the scheduler still has to visit.
    levelp1: usize,
    conflict: Option<EqId>,
    too_complex: bool,
    stats: Statistics,
    /// Injected complexity guard; `None` falls back to the configured
    /// tree-size and degree bounds.
    complexity: Option<Box<dyn Fn(&PddManager, Pdd) -> bool>>,
}

impl Solver {
    pub fn new(m: PddManager, config: SolverConfig) -> Self {
        Solver {
            m,
            deps: DepManager::new(),
            config,
            limit: ResourceLimit::new(),
            eqs: Vec::new(),
            free: Vec::new(),
            to_simplify: Vec::new(),
            processed: Vec::new(),
            solved: Vec::new(),
            watch: Vec::new(),
            level2var: Vec::new(),
            var2level: Vec::new(),
            levelp1: 0,
            conflict: None,
            too_complex: false,
            stats: Statistics::default(),
            complexity: None,
        }
    }

    pub fn manager(&self) -> &PddManager {
        &self.m
    }

    pub fn manager_mut(&mut self) -> &mut PddManager {
        &mut self.m
    }

    pub fn deps(&self) -> &DepManager {
        &self.deps
    }

    pub fn deps_mut(&mut self) -> &mut DepManager {
        &mut self.deps
    }

    /// Cancellation handle shared with the loop.
    pub fn limit(&self) -> ResourceLimit {
        self.limit.clone()
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Replace the complexity guard used to abandon blown-up reductions and
    /// S-polynomials. Install `|_, _| false` to disable the guard.
    pub fn set_complexity_check(
        &mut self,
        check: impl Fn(&PddManager, Pdd) -> bool + 'static,
    ) {
        self.complexity = Some(Box::new(check));
    }

    /// Enqueue the equation `p = 0` justified by `dep`. Zero polynomials are
    /// ignored; a nonzero constant becomes the conflict witness immediately.
    pub fn add(&mut self, p: Pdd, dep: Dep) {
        if p.is_zero() {
            return;
        }
        let id = self.alloc(Equation::new(p, dep));
        if self.check_conflict(id) {
            return;
        }
        self.push_equation(EqState::ToSimplify, id);
        if !self.watch.is_empty() {
            let v = self.m.var(p);
            self.levelp1 = self.levelp1.max(self.var2level[v.index()] as usize + 1);
            self.add_to_watch(id);
        }
        self.update_stats_max_degree_and_size(p);
    }

    /// Run the pre-pass simplifier and the saturation loop until a terminal
    /// condition. Idempotent when nothing new was added in between.
    pub fn saturate(&mut self) -> SaturationOutcome {
        let mut mem_out = false;
        if let Err(err) = self.saturate_inner() {
            // drop the watch index; a later call rebuilds it in init_saturate
            self.watch.clear();
            warn!("saturation aborted: {err}");
            mem_out = true;
        }
        let outcome = if self.conflict.is_some() {
            SaturationOutcome::Conflict
        } else if self.canceled() {
            SaturationOutcome::Canceled
        } else if mem_out {
            SaturationOutcome::MemOut
        } else if self.stats.steps > self.config.max_steps
            || self.to_simplify.len() + self.processed.len() >= self.config.eqs_threshold
        {
            SaturationOutcome::LimitReached
        } else {
            SaturationOutcome::Saturated
        };
        debug!("saturate: {outcome:?}");
        outcome
    }

    fn saturate_inner(&mut self) -> Result<(), MemOut> {
        Simplifier::new(self).run()?;
        self.init_saturate();
        trace!("saturate start:\n{self}");
        while !self.done() && self.step()? {
            trace!("after step {}:\n{self}", self.stats.steps);
            if cfg!(debug_assertions) {
                self.assert_invariants();
            }
        }
        if cfg!(debug_assertions) {
            self.assert_invariants();
        }
        Ok(())
    }

    /// Live equations across all queues: solved, then to-simplify, then
    /// processed.
    pub fn equations(&self) -> impl Iterator<Item = &Equation> + '_ {
        self.solved
            .iter()
            .chain(self.to_simplify.iter())
            .chain(self.processed.iter())
            .map(move |&id| self.eq(id))
    }

    /// The equation witnessing `0 ≠ 0`, if one was derived.
    pub fn conflict(&self) -> Option<&Equation> {
        self.conflict.map(|id| self.eq(id))
    }

    /// Counter snapshot including current queue sizes.
    pub fn statistics(&self) -> Statistics {
        Statistics {
            solved: self.solved.len(),
            processed: self.processed.len(),
            to_simplify: self.to_simplify.len(),
            ..self.stats.clone()
        }
    }

    /// Release all equations and reset statistics. The polynomial manager
    /// and dependency arena are kept; their values stay usable.
    pub fn reset(&mut self) {
        self.eqs.clear();
        self.free.clear();
        self.to_simplify.clear();
        self.processed.clear();
        self.solved.clear();
        self.watch.clear();
        self.level2var.clear();
        self.var2level.clear();
        self.levelp1 = 0;
        self.conflict = None;
        self.too_complex = false;
        self.stats = Statistics::default();
    }

    /// Render one equation's polynomial.
    pub fn display_equation(&self, eq: &Equation) -> PddDisplay<'_> {
        self.m.display(eq.poly)
    }

    // ------------------------------------------------------------------
    // Step loop
    // ------------------------------------------------------------------

    fn step(&mut self) -> Result<bool, MemOut> {
        self.stats.steps += 1;
        let e = match self.pick_next() {
            Some(e) => e,
            None => return Ok(false),
        };
        debug!("picked {}", self.m.display(self.eq(e).poly));
        let outcome = self.step_body(e);
        // the picked equation is recommitted on every path
        match outcome {
            Ok(StepOutcome::Retired) => Ok(true),
            Ok(StepOutcome::Conflict) => Ok(false),
            Ok(StepOutcome::Halted) => {
                self.commit(e, false);
                Ok(false)
            }
            Ok(StepOutcome::Finished { too_complex }) => {
                self.commit(e, !too_complex);
                Ok(true)
            }
            Err(err) => {
                self.commit(e, false);
                Err(err)
            }
        }
    }

    fn step_body(&mut self, e: EqId) -> Result<StepOutcome, MemOut> {
        debug_assert_eq!(self.eq(e).state, EqState::ToSimplify);
        debug_assert!(self
            .watch
            .iter()
            .all(|list| list.iter().all(|&id| id != e)));
        self.simplify_using_processed(e)?;
        if self.is_trivial(e) {
            self.retire(e);
            return Ok(StepOutcome::Retired);
        }
        if self.check_conflict(e) {
            return Ok(StepOutcome::Conflict);
        }
        self.too_complex = false;
        self.simplify_processed_using(e)?;
        if self.done() {
            return Ok(StepOutcome::Halted);
        }
        self.superpose(e)?;
        self.simplify_watch(e)?;
        if self.done() {
            return Ok(StepOutcome::Halted);
        }
        Ok(StepOutcome::Finished {
            too_complex: self.too_complex,
        })
    }

    /// Place the picked equation: solved form goes to *solved* when the step
    /// completed cleanly, everything else to *processed*.
    fn commit(&mut self, e: EqId, allow_solved: bool) {
        let p = self.eq(e).poly;
        debug_assert!(!p.is_val());
        if allow_solved && self.m.hi(p).is_val() {
            self.push_equation(EqState::Solved, e);
        } else {
            self.push_equation(EqState::Processed, e);
        }
    }

    // ------------------------------------------------------------------
    // Scheduler
    // ------------------------------------------------------------------

    /// Descend the variable levels; at the highest level with watched
    /// equations, pick the simplest one and detach it from its queue and
    /// watch list.
    fn pick_next(&mut self) -> Option<EqId> {
        while self.levelp1 > 0 {
            let v = self.level2var[self.levelp1 - 1];
            let mut best: Option<EqId> = None;
            for &id in &self.watch[v.index()] {
                let eq = match &self.eqs[id.index()] {
                    Some(eq) => eq,
                    None => continue,
                };
                if eq.state != EqState::ToSimplify || self.m.var(eq.poly) != v {
                    continue;
                }
                if best.map_or(true, |b| self.is_simpler(eq.poly, self.eq(b).poly)) {
                    best = Some(id);
                }
            }
            if let Some(e) = best {
                self.pop_equation(e);
                let list = &mut self.watch[v.index()];
                if let Some(pos) = list.iter().position(|&id| id == e) {
                    list.remove(pos);
                }
                return Some(e);
            }
            self.levelp1 -= 1;
        }
        None
    }

    /// Lower degree first, then smaller tree.
    fn is_simpler(&self, a: Pdd, b: Pdd) -> bool {
        let (da, db) = (self.m.degree(a), self.m.degree(b));
        da < db || (da == db && self.m.tree_size(a) < self.m.tree_size(b))
    }

    // ------------------------------------------------------------------
    // Reduction
    // ------------------------------------------------------------------

    /// Reduce `dst` by `src`, abandoning the result when the complexity
    /// guard rejects it. `changed_leading_term` is only reported for
    /// processed targets.
    pub(crate) fn try_simplify_using(
        &mut self,
        dst: EqId,
        src: EqId,
    ) -> Result<Reduction, MemOut> {
        if dst == src {
            return Ok(Reduction::default());
        }
        self.stats.simplified += 1;
        let t = self.eq(src).poly;
        let old = self.eq(dst).poly;
        let r = self.m.reduce(old, t)?;
        if r == old {
            return Ok(Reduction::default());
        }
        if self.is_too_complex(r) {
            self.too_complex = true;
            return Ok(Reduction::default());
        }
        self.apply_reduction(dst, src, old, r)
    }

    /// Reduce `dst` by `src` without consulting the complexity guard; used
    /// by the pre-pass on equations that are not yet committed anywhere.
    pub(crate) fn simplify_with(&mut self, dst: EqId, src: EqId) -> Result<Reduction, MemOut> {
        if dst == src {
            return Ok(Reduction::default());
        }
        self.stats.simplified += 1;
        let t = self.eq(src).poly;
        let old = self.eq(dst).poly;
        let r = self.m.reduce(old, t)?;
        if r == old {
            return Ok(Reduction::default());
        }
        self.apply_reduction(dst, src, old, r)
    }

    fn apply_reduction(
        &mut self,
        dst: EqId,
        src: EqId,
        old: Pdd,
        r: Pdd,
    ) -> Result<Reduction, MemOut> {
        debug!(
            "reduce {} using {} to {}",
            self.m.display(old),
            self.m.display(self.eq(src).poly),
            self.m.display(r)
        );
        let changed_leading_term =
            self.eq(dst).state == EqState::Processed && self.m.different_leading_term(r, old);
        let src_dep = self.eq(src).dep;
        let dst_dep = self.eq(dst).dep;
        let joined = self.deps.join(dst_dep, src_dep);
        let eq = self.eq_mut(dst);
        eq.poly = r;
        eq.dep = joined;
        self.update_stats_max_degree_and_size(r);
        Ok(Reduction {
            simplified: true,
            changed_leading_term,
        })
    }

    /// Reduce the picked equation with the whole processed set, restarting
    /// the pass after each hit until a fixed point, a constant, or
    /// cancellation.
    fn simplify_using_processed(&mut self, e: EqId) -> Result<(), MemOut> {
        let mut simplified = true;
        while simplified && !self.eq(e).poly.is_val() && !self.canceled() {
            simplified = false;
            for i in 0..self.processed.len() {
                let src = self.processed[i];
                if self.try_simplify_using(e, src)?.simplified {
                    simplified = true;
                }
                if self.canceled() || self.eq(e).poly.is_val() {
                    break;
                }
            }
        }
        trace!(
            "simplification result: {}",
            self.m.display(self.eq(e).poly)
        );
        Ok(())
    }

    /// One pass rewriting every processed equation with `src`. Targets that
    /// become trivial are retired, conflicts are recorded, and targets whose
    /// leading term changed migrate back to to-simplify (raising the level
    /// cursor so the scheduler revisits them). The queue is compacted in
    /// place on every exit path.
    fn simplify_processed_using(&mut self, src: EqId) -> Result<(), MemOut> {
        let sz = self.processed.len();
        let mut i = 0;
        let mut j = 0;
        let mut res = Ok(());
        while i < sz {
            let target = self.processed[i];
            let mut keep = true;
            if !self.done() {
                match self.try_simplify_using(target, src) {
                    Err(err) => res = Err(err),
                    Ok(red) if red.simplified => {
                        if self.is_trivial(target) {
                            self.retire(target);
                            keep = false;
                        } else if self.check_conflict(target) {
                            // moved to solved as the conflict witness
                            keep = false;
                        } else if red.changed_leading_term {
                            self.push_equation(EqState::ToSimplify, target);
                            if !self.watch.is_empty() {
                                let v = self.m.var(self.eq(target).poly);
                                self.levelp1 = self
                                    .levelp1
                                    .max(self.var2level[v.index()] as usize + 1);
                                self.add_to_watch(target);
                            }
                            keep = false;
                        }
                    }
                    Ok(_) => {}
                }
            }
            if keep {
                self.processed[j] = target;
                self.eq_mut(target).idx = j as u32;
                j += 1;
            }
            i += 1;
            if res.is_err() {
                break;
            }
        }
        while i < sz {
            let target = self.processed[i];
            self.processed[j] = target;
            self.eq_mut(target).idx = j as u32;
            j += 1;
            i += 1;
        }
        self.processed.truncate(j);
        res
    }

    // ------------------------------------------------------------------
    // Superposition
    // ------------------------------------------------------------------

    fn superpose(&mut self, e: EqId) -> Result<(), MemOut> {
        for i in 0..self.processed.len() {
            let target = self.processed[i];
            self.superpose_pair(e, target)?;
        }
        Ok(())
    }

    /// Form the S-polynomial of the pair and enqueue it unless it is zero or
    /// over the complexity bound.
    fn superpose_pair(&mut self, a: EqId, b: EqId) -> Result<(), MemOut> {
        let (pa, pb) = (self.eq(a).poly, self.eq(b).poly);
        if let Some(r) = self.m.try_spoly(pa, pb)? {
            if !r.is_zero() {
                if self.is_too_complex(r) {
                    self.too_complex = true;
                } else {
                    self.stats.superposed += 1;
                    debug!(
                        "superpose {} with {} gives {}",
                        self.m.display(pa),
                        self.m.display(pb),
                        self.m.display(r)
                    );
                    let (da, db) = (self.eq(a).dep, self.eq(b).dep);
                    let dep = self.deps.join(da, db);
                    self.add(r, dep);
                }
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Watch index
    // ------------------------------------------------------------------

    fn init_saturate(&mut self) {
        self.level2var = self.m.level2var().to_vec();
        self.var2level = vec![0; self.level2var.len()];
        for (level, v) in self.level2var.iter().enumerate() {
            self.var2level[v.index()] = level as u32;
        }
        self.watch = vec![Vec::new(); self.level2var.len()];
        self.levelp1 = self.level2var.len();
        for i in 0..self.to_simplify.len() {
            let id = self.to_simplify[i];
            self.add_to_watch(id);
        }
    }

    fn add_to_watch(&mut self, id: EqId) {
        debug_assert_eq!(self.eq(id).state, EqState::ToSimplify);
        let p = self.eq(id).poly;
        if !p.is_val() {
            let v = self.m.var(p);
            self.watch[v.index()].push(id);
        }
    }

    /// Rewrite the watch list of `e`'s leading variable with `e`. Targets
    /// that become trivial or conflicting leave their queue; a target whose
    /// leading variable changed moves to that variable's list (always a
    /// strictly lower one, so never the list under iteration).
    fn simplify_watch(&mut self, e: EqId) -> Result<(), MemOut> {
        let v = self.m.var(self.eq(e).poly);
        let sz = self.watch[v.index()].len();
        let mut i = 0;
        let mut j = 0;
        let mut res = Ok(());
        while i < sz {
            let target = self.watch[v.index()][i];
            debug_assert_eq!(self.eq(target).state, EqState::ToSimplify);
            debug_assert_eq!(self.m.var(self.eq(target).poly), v);
            if !self.done() {
                if let Err(err) = self.try_simplify_using(target, e) {
                    res = Err(err);
                }
            }
            let mut keep = false;
            if self.is_trivial(target) {
                self.pop_equation(target);
                self.retire(target);
            } else if self.is_conflict(target) {
                self.pop_equation(target);
                self.set_conflict(target);
            } else if self.m.var(self.eq(target).poly) != v {
                let v2 = self.m.var(self.eq(target).poly);
                self.watch[v2.index()].push(target);
            } else {
                keep = true;
            }
            if keep {
                self.watch[v.index()][j] = target;
                j += 1;
            }
            i += 1;
            if res.is_err() {
                break;
            }
        }
        while i < sz {
            let target = self.watch[v.index()][i];
            self.watch[v.index()][j] = target;
            j += 1;
            i += 1;
        }
        self.watch[v.index()].truncate(j);
        res
    }

    // ------------------------------------------------------------------
    // Queues
    // ------------------------------------------------------------------

    pub(crate) fn eq(&self, id: EqId) -> &Equation {
        self.eqs[id.index()].as_ref().expect("live equation")
    }

    fn eq_mut(&mut self, id: EqId) -> &mut Equation {
        self.eqs[id.index()].as_mut().expect("live equation")
    }

    pub(crate) fn is_live(&self, id: EqId) -> bool {
        self.eqs[id.index()].is_some()
    }

    pub(crate) fn to_simplify_ids(&self) -> Vec<EqId> {
        self.to_simplify.clone()
    }

    fn alloc(&mut self, eq: Equation) -> EqId {
        match self.free.pop() {
            Some(id) => {
                self.eqs[id.index()] = Some(eq);
                id
            }
            None => {
                let id = EqId(self.eqs.len() as u32);
                self.eqs.push(Some(eq));
                id
            }
        }
    }

    fn queue_mut(&mut self, state: EqState) -> &mut Vec<EqId> {
        match state {
            EqState::ToSimplify => &mut self.to_simplify,
            EqState::Processed => &mut self.processed,
            EqState::Solved => &mut self.solved,
        }
    }

    fn push_equation(&mut self, state: EqState, id: EqId) {
        debug_assert!(state == EqState::Solved || !self.eq(id).poly.is_val());
        self.eq_mut(id).state = state;
        let queue = self.queue_mut(state);
        queue.push(id);
        let idx = queue.len() as u32 - 1;
        self.eq_mut(id).idx = idx;
    }

    pub(crate) fn pop_equation(&mut self, id: EqId) {
        let state = self.eq(id).state;
        let idx = self.eq(id).idx as usize;
        let queue = self.queue_mut(state);
        debug_assert_eq!(queue[idx], id);
        let last = queue[queue.len() - 1];
        queue.swap_remove(idx);
        if last != id {
            self.eq_mut(last).idx = idx as u32;
        }
    }

    pub(crate) fn retire(&mut self, id: EqId) {
        self.eqs[id.index()] = None;
        self.free.push(id);
    }

    // ------------------------------------------------------------------
    // Predicates
    // ------------------------------------------------------------------

    pub(crate) fn is_trivial(&self, id: EqId) -> bool {
        self.eq(id).poly.is_zero()
    }

    pub(crate) fn is_conflict(&self, id: EqId) -> bool {
        let p = self.eq(id).poly;
        p.is_val() && !p.is_zero()
    }

    pub(crate) fn check_conflict(&mut self, id: EqId) -> bool {
        if self.is_conflict(id) {
            self.set_conflict(id);
            true
        } else {
            false
        }
    }

    /// Record the conflict witness; the first one found is kept for the rest
    /// of the engine's life.
    pub(crate) fn set_conflict(&mut self, id: EqId) {
        self.push_equation(EqState::Solved, id);
        if self.conflict.is_none() {
            debug!("conflict: {}", self.m.display(self.eq(id).poly));
            self.conflict = Some(id);
        }
    }

    /// Solved form: non-constant with a constant leading coefficient.
    pub(crate) fn is_solved_form(&self, p: Pdd) -> bool {
        !p.is_val() && self.m.hi(p).is_val()
    }

    fn is_too_complex(&self, p: Pdd) -> bool {
        match &self.complexity {
            Some(check) => check(&self.m, p),
            None => {
                self.m.tree_size(p) > self.config.max_tree_size
                    || self.m.degree(p) > self.config.max_degree
            }
        }
    }

    fn canceled(&self) -> bool {
        self.limit.is_canceled()
    }

    pub(crate) fn done(&self) -> bool {
        self.to_simplify.len() + self.processed.len() >= self.config.eqs_threshold
            || self.canceled()
            || self.stats.steps > self.config.max_steps
            || self.conflict.is_some()
    }

    fn update_stats_max_degree_and_size(&mut self, p: Pdd) {
        self.stats.max_degree = self.stats.max_degree.max(self.m.degree(p));
        self.stats.max_size = self.stats.max_size.max(self.m.tree_size(p));
    }

    // ------------------------------------------------------------------
    // Invariant checker
    // ------------------------------------------------------------------

    /// Structural check of queues, states, indices, head variables, and the
    /// watch index; run after every step in debug builds.
    pub fn assert_invariants(&self) {
        let queues = [
            (EqState::ToSimplify, &self.to_simplify),
            (EqState::Processed, &self.processed),
            (EqState::Solved, &self.solved),
        ];
        for (state, queue) in queues {
            for (i, &id) in queue.iter().enumerate() {
                let eq = self.eq(id);
                assert_eq!(eq.state, state);
                assert_eq!(eq.idx as usize, i);
                if state != EqState::Solved {
                    assert!(!eq.poly.is_val());
                }
            }
        }

        // head variables of solved forms are unique and eliminated elsewhere
        let mut head_vars: IndexSet<Var> = IndexSet::new();
        for &id in &self.solved {
            let p = self.eq(id).poly;
            if self.is_solved_form(p) {
                assert!(head_vars.insert(self.m.var(p)), "duplicate head variable");
            }
        }
        if !head_vars.is_empty() {
            for &id in self.to_simplify.iter().chain(&self.processed) {
                for v in self.m.free_vars(self.eq(id).poly) {
                    assert!(!head_vars.contains(&v), "head variable reintroduced");
                }
            }
        }

        // the watch index mirrors the to-simplify queue
        if !self.watch.is_empty() {
            for &id in &self.to_simplify {
                let v = self.m.var(self.eq(id).poly);
                let count = self.watch[v.index()].iter().filter(|&&w| w == id).count();
                assert_eq!(count, 1, "to-simplify equation watched exactly once");
            }
            for (vi, list) in self.watch.iter().enumerate() {
                for &id in list {
                    let eq = self.eq(id);
                    assert_eq!(eq.state, EqState::ToSimplify);
                    assert!(!eq.poly.is_val());
                    assert_eq!(self.m.var(eq.poly).index(), vi);
                    assert!(self.to_simplify.contains(&id));
                }
            }
        }
    }
}

impl fmt::Display for Solver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "solved")?;
        for &id in &self.solved {
            writeln!(f, "  {}", self.m.display(self.eq(id).poly))?;
        }
        writeln!(f, "processed")?;
        for &id in &self.processed {
            writeln!(f, "  {}", self.m.display(self.eq(id).poly))?;
        }
        writeln!(f, "to_simplify")?;
        for &id in &self.to_simplify {
            writeln!(f, "  {}", self.m.display(self.eq(id).poly))?;
        }
        let st = self.statistics();
        writeln!(
            f,
            "steps: {} simplified: {} superposed: {}",
            st.steps, st.simplified, st.superposed
        )
    }
}
