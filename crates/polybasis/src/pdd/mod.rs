//! Polynomial decision diagrams over GF(2)
//!
//! Multivariate polynomials are stored as hash-consed decision diagrams:
//! every internal node reads `var·hi + lo`, where `var` is the node's leading
//! variable under a fixed global ordering and `hi`, `lo` contain only
//! strictly lower variables. Variables are idempotent (`x·x = x`), the
//! Boolean-ring case the saturation engine targets.
//!
//! Because nodes are interned in a unique table, a polynomial is a `Copy`
//! node id and structural equality is id equality. Operations that allocate
//! nodes return `Result<_, MemOut>`: the manager carries a node budget and
//! interning past it fails with the distinguishable memory-exhaustion signal
//! the engine catches at the `saturate` boundary.

mod display;

pub use display::PddDisplay;

use indexmap::IndexSet;
use std::collections::HashMap;
use thiserror::Error;

/// Raised when the node table outgrows the manager's configured budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("pdd node table limit exceeded ({limit} nodes)")]
pub struct MemOut {
    pub limit: usize,
}

/// A variable index into the manager's ordering.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Var(pub(crate) u32);

impl Var {
    pub fn new(idx: u32) -> Self {
        Var(idx)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A polynomial: an interned node id. Equal ids mean equal polynomials.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pdd(u32);

impl Pdd {
    /// The zero polynomial.
    pub const ZERO: Pdd = Pdd(0);
    /// The constant one.
    pub const ONE: Pdd = Pdd(1);

    pub fn is_val(self) -> bool {
        self.0 <= 1
    }

    pub fn is_zero(self) -> bool {
        self == Pdd::ZERO
    }

    pub fn is_one(self) -> bool {
        self == Pdd::ONE
    }

    fn index(self) -> usize {
        self.0 as usize
    }
}

/// An interned diagram node: `var·hi + lo`.
#[derive(Debug, Copy, Clone)]
struct Node {
    var: Var,
    hi: Pdd,
    lo: Pdd,
    /// Maximal monomial degree of the polynomial rooted here.
    degree: u32,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
enum Op {
    Add,
    Mul,
    Reduce,
}

const DEFAULT_NODE_LIMIT: usize = 1 << 22;

/// Manager for hash-consed polynomial decision diagrams.
///
/// Owns the node table, the operation caches, and the global variable
/// ordering. The ordering is fixed at construction; the engine copies it and
/// never recomputes it.
pub struct PddManager {
    nodes: Vec<Node>,
    unique: HashMap<(Var, Pdd, Pdd), Pdd>,
    cache: HashMap<(Op, Pdd, Pdd), Pdd>,
    level2var: Vec<Var>,
    var2level: Vec<u32>,
    var_names: Vec<Option<String>>,
    node_limit: usize,
}

impl PddManager {
    /// Create a manager for `num_vars` variables in the identity ordering:
    /// variable `i` sits at level `i`, so the highest-indexed variable leads.
    pub fn new(num_vars: usize) -> Self {
        Self::with_order((0..num_vars as u32).map(Var).collect())
    }

    /// Create a manager with an explicit ordering: `order[level] = var`, the
    /// last entry being the topmost (leading) variable.
    pub fn with_order(order: Vec<Var>) -> Self {
        let mut var2level = vec![0u32; order.len()];
        for (level, v) in order.iter().enumerate() {
            var2level[v.index()] = level as u32;
        }
        let sentinel = Node {
            var: Var(u32::MAX),
            hi: Pdd::ZERO,
            lo: Pdd::ZERO,
            degree: 0,
        };
        PddManager {
            nodes: vec![sentinel, sentinel],
            unique: HashMap::new(),
            cache: HashMap::new(),
            var_names: vec![None; order.len()],
            level2var: order,
            var2level,
            node_limit: DEFAULT_NODE_LIMIT,
        }
    }

    /// Cap the node table; interning past the cap fails with [`MemOut`].
    pub fn set_node_limit(&mut self, limit: usize) {
        self.node_limit = limit;
    }

    /// Attach a display name to a variable.
    pub fn set_var_name(&mut self, v: Var, name: &str) {
        self.var_names[v.index()] = Some(name.to_string());
    }

    pub fn num_vars(&self) -> usize {
        self.level2var.len()
    }

    /// The global variable ordering: index = level, value = variable.
    pub fn level2var(&self) -> &[Var] {
        &self.level2var
    }

    pub fn level(&self, v: Var) -> u32 {
        self.var2level[v.index()]
    }

    pub fn zero(&self) -> Pdd {
        Pdd::ZERO
    }

    pub fn one(&self) -> Pdd {
        Pdd::ONE
    }

    /// Leading variable. Defined only for non-constant polynomials.
    pub fn var(&self, p: Pdd) -> Var {
        debug_assert!(!p.is_val());
        self.nodes[p.index()].var
    }

    /// Coefficient of the leading variable: `p = var·hi + lo`.
    pub fn hi(&self, p: Pdd) -> Pdd {
        debug_assert!(!p.is_val());
        self.nodes[p.index()].hi
    }

    pub fn lo(&self, p: Pdd) -> Pdd {
        debug_assert!(!p.is_val());
        self.nodes[p.index()].lo
    }

    /// Maximal monomial degree; constants have degree 0.
    pub fn degree(&self, p: Pdd) -> usize {
        self.nodes[p.index()].degree as usize
    }

    /// Number of distinct nodes reachable from `p`, terminal included.
    pub fn tree_size(&self, p: Pdd) -> usize {
        if p.is_val() {
            return 1;
        }
        let mut seen: IndexSet<Pdd> = IndexSet::new();
        let mut stack = vec![p];
        while let Some(q) = stack.pop() {
            if q.is_val() || !seen.insert(q) {
                continue;
            }
            let n = self.nodes[q.index()];
            stack.push(n.hi);
            stack.push(n.lo);
        }
        seen.len() + 1
    }

    /// Variables occurring in `p`, in discovery order.
    pub fn free_vars(&self, p: Pdd) -> IndexSet<Var> {
        let mut vars = IndexSet::new();
        let mut seen: IndexSet<Pdd> = IndexSet::new();
        let mut stack = vec![p];
        while let Some(q) = stack.pop() {
            if q.is_val() || !seen.insert(q) {
                continue;
            }
            let n = self.nodes[q.index()];
            vars.insert(n.var);
            stack.push(n.hi);
            stack.push(n.lo);
        }
        vars
    }

    /// The single-variable polynomial `v`.
    pub fn mk_var(&mut self, v: Var) -> Result<Pdd, MemOut> {
        self.mk_node(v, Pdd::ONE, Pdd::ZERO)
    }

    /// Intern `var·hi + lo`. `hi` and `lo` must contain only variables below
    /// `var`; a zero `hi` collapses to `lo`.
    fn mk_node(&mut self, var: Var, hi: Pdd, lo: Pdd) -> Result<Pdd, MemOut> {
        if hi.is_zero() {
            return Ok(lo);
        }
        debug_assert!(hi.is_val() || self.level(self.var(hi)) < self.level(var));
        debug_assert!(lo.is_val() || self.level(self.var(lo)) < self.level(var));
        if let Some(&p) = self.unique.get(&(var, hi, lo)) {
            return Ok(p);
        }
        if self.nodes.len() >= self.node_limit {
            return Err(MemOut {
                limit: self.node_limit,
            });
        }
        let degree = (1 + self.nodes[hi.index()].degree).max(self.nodes[lo.index()].degree);
        let p = Pdd(self.nodes.len() as u32);
        self.nodes.push(Node {
            var,
            hi,
            lo,
            degree,
        });
        self.unique.insert((var, hi, lo), p);
        Ok(p)
    }

    /// Sum over GF(2): `p + q`, with `p + p = 0`.
    pub fn add(&mut self, p: Pdd, q: Pdd) -> Result<Pdd, MemOut> {
        if p == q {
            return Ok(Pdd::ZERO);
        }
        if p.is_zero() {
            return Ok(q);
        }
        if q.is_zero() {
            return Ok(p);
        }
        // Commutative: canonicalize the cache key.
        let (a, b) = if p <= q { (p, q) } else { (q, p) };
        if let Some(&r) = self.cache.get(&(Op::Add, a, b)) {
            return Ok(r);
        }
        let r = if a.is_val() {
            // a == 1, b non-constant
            let nb = self.nodes[b.index()];
            let lo = self.add(nb.lo, a)?;
            self.mk_node(nb.var, nb.hi, lo)?
        } else {
            let (na, nb) = (self.nodes[a.index()], self.nodes[b.index()]);
            let (la, lb) = (self.level(na.var), self.level(nb.var));
            if la == lb {
                let hi = self.add(na.hi, nb.hi)?;
                let lo = self.add(na.lo, nb.lo)?;
                self.mk_node(na.var, hi, lo)?
            } else if la > lb {
                let lo = self.add(na.lo, b)?;
                self.mk_node(na.var, na.hi, lo)?
            } else {
                let lo = self.add(nb.lo, a)?;
                self.mk_node(nb.var, nb.hi, lo)?
            }
        };
        self.cache.insert((Op::Add, a, b), r);
        Ok(r)
    }

    /// Product over GF(2) with idempotent variables; `p·p = p`.
    pub fn mul(&mut self, p: Pdd, q: Pdd) -> Result<Pdd, MemOut> {
        if p.is_zero() || q.is_zero() {
            return Ok(Pdd::ZERO);
        }
        if p.is_one() {
            return Ok(q);
        }
        if q.is_one() {
            return Ok(p);
        }
        if p == q {
            return Ok(p);
        }
        let (a, b) = if p <= q { (p, q) } else { (q, p) };
        if let Some(&r) = self.cache.get(&(Op::Mul, a, b)) {
            return Ok(r);
        }
        let (na, nb) = (self.nodes[a.index()], self.nodes[b.index()]);
        let (la, lb) = (self.level(na.var), self.level(nb.var));
        let r = if la == lb {
            // (v·a1 + a2)(v·b1 + b2) = v·(a1·b1 + a1·b2 + a2·b1) + a2·b2
            let h1 = self.mul(na.hi, nb.hi)?;
            let h2 = self.mul(na.hi, nb.lo)?;
            let h3 = self.mul(na.lo, nb.hi)?;
            let s = self.add(h1, h2)?;
            let hi = self.add(s, h3)?;
            let lo = self.mul(na.lo, nb.lo)?;
            self.mk_node(na.var, hi, lo)?
        } else {
            let (top, other) = if la > lb { (na, b) } else { (nb, a) };
            let hi = self.mul(top.hi, other)?;
            let lo = self.mul(top.lo, other)?;
            self.mk_node(top.var, hi, lo)?
        };
        self.cache.insert((Op::Mul, a, b), r);
        Ok(r)
    }

    /// Leading monomial of `p` as a diagram (product of the hi-path
    /// variables); constants map to `1`.
    pub fn lead_monomial(&mut self, p: Pdd) -> Result<Pdd, MemOut> {
        if p.is_val() {
            return Ok(Pdd::ONE);
        }
        let n = self.nodes[p.index()];
        let rest = self.lead_monomial(n.hi)?;
        self.mk_node(n.var, rest, Pdd::ZERO)
    }

    /// True iff the leading monomials of `p` and `q` differ.
    pub fn different_leading_term(&self, p: Pdd, q: Pdd) -> bool {
        let (mut p, mut q) = (p, q);
        loop {
            if p == q {
                return false;
            }
            if p.is_val() || q.is_val() {
                return true;
            }
            let (np, nq) = (self.nodes[p.index()], self.nodes[q.index()]);
            if np.var != nq.var {
                return true;
            }
            p = np.hi;
            q = nq.hi;
        }
    }

    /// Divide `p` by the monomial `m`: returns `(c, r)` with `p = m·c + r`
    /// and no monomial of `r` divisible by `m`.
    fn div_monomial(&mut self, p: Pdd, m: Pdd) -> Result<(Pdd, Pdd), MemOut> {
        if m.is_one() {
            return Ok((p, Pdd::ZERO));
        }
        if p.is_val() {
            return Ok((Pdd::ZERO, p));
        }
        let (np, nm) = (self.nodes[p.index()], self.nodes[m.index()]);
        let (lp, lm) = (self.level(np.var), self.level(nm.var));
        if lp < lm {
            return Ok((Pdd::ZERO, p));
        }
        if np.var == nm.var {
            // p = v·p1 + p2, m = v·m': only v·p1 can carry divisible monomials
            let (c, r1) = self.div_monomial(np.hi, nm.hi)?;
            let r = self.mk_node(np.var, r1, np.lo)?;
            Ok((c, r))
        } else {
            // p = w·p1 + p2 with w above m: divide both cofactors
            let (c1, r1) = self.div_monomial(np.hi, m)?;
            let (c2, r2) = self.div_monomial(np.lo, m)?;
            let c = self.mk_node(np.var, c1, c2)?;
            let r = self.mk_node(np.var, r1, r2)?;
            Ok((c, r))
        }
    }

    /// Remainder of `p` under the rewrite `lt(q) → q − lt(q)`, applied to a
    /// normal form: no monomial of the result is divisible by the leading
    /// monomial of `q`. Returns `p` itself (same id) when no step applies.
    /// Reduction by a nonzero constant yields `0`.
    pub fn reduce(&mut self, p: Pdd, q: Pdd) -> Result<Pdd, MemOut> {
        if q.is_zero() {
            return Ok(p);
        }
        if q.is_val() {
            return Ok(Pdd::ZERO);
        }
        self.reduce_rec(p, q)
    }

    fn reduce_rec(&mut self, p: Pdd, q: Pdd) -> Result<Pdd, MemOut> {
        if p.is_val() {
            return Ok(p);
        }
        if let Some(&r) = self.cache.get(&(Op::Reduce, p, q)) {
            return Ok(r);
        }
        let (np, nq) = (self.nodes[p.index()], self.nodes[q.index()]);
        let (lp, lq) = (self.level(np.var), self.level(nq.var));
        let r = if lp < lq {
            // every monomial of p lacks q's leading variable
            p
        } else if lp > lq {
            let hi = self.reduce_rec(np.hi, q)?;
            let lo = self.reduce_rec(np.lo, q)?;
            self.mk_node(np.var, hi, lo)?
        } else {
            // p = v·p1 + p2, q = v·q1 + q2, lt(q) = v·m with m = lt(q1).
            // A monomial v·n of p is divisible iff m divides n.
            let m = self.lead_monomial(nq.hi)?;
            let (c, r1) = self.div_monomial(np.hi, m)?;
            if c.is_zero() {
                p
            } else {
                // v·m·c = (v·(m + q1) + q2)·c, since v·q1 + q2 = 0
                let tail = self.add(m, nq.hi)?;
                let t = self.mul(tail, c)?;
                let hi = self.add(t, r1)?;
                let qc = self.mul(nq.lo, c)?;
                let lo = self.add(qc, np.lo)?;
                let next = self.mk_node(np.var, hi, lo)?;
                self.reduce_rec(next, q)?
            }
        };
        self.cache.insert((Op::Reduce, p, q), r);
        Ok(r)
    }

    /// S-polynomial of `p` and `q` when their leading variables coincide:
    /// for `p = x·p1 + p2` and `q = x·q1 + q2` the combination
    /// `q1·p + p1·q = p2·q1 + q2·p1` cancels the leading terms.
    pub fn try_spoly(&mut self, p: Pdd, q: Pdd) -> Result<Option<Pdd>, MemOut> {
        if p.is_val() || q.is_val() {
            return Ok(None);
        }
        let (np, nq) = (self.nodes[p.index()], self.nodes[q.index()]);
        if np.var != nq.var {
            return Ok(None);
        }
        let a = self.mul(np.lo, nq.hi)?;
        let b = self.mul(nq.lo, np.hi)?;
        Ok(Some(self.add(a, b)?))
    }

    /// Display adapter rendering `p` as a sum of monomials.
    pub fn display(&self, p: Pdd) -> PddDisplay<'_> {
        PddDisplay::new(self, p)
    }

    pub(crate) fn node_parts(&self, p: Pdd) -> (Var, Pdd, Pdd) {
        let n = self.nodes[p.index()];
        (n.var, n.hi, n.lo)
    }

    pub(crate) fn var_name(&self, v: Var) -> String {
        match &self.var_names[v.index()] {
            Some(name) => name.clone(),
            None => format!("v{}", v.0),
        }
    }
}
