//! Rendering of polynomials as sums of monomials.

use super::{Pdd, PddManager, Var};
use std::fmt;

/// Adapter returned by [`PddManager::display`]; renders a polynomial with
/// the manager's variable names, leading monomial first.
pub struct PddDisplay<'a> {
    m: &'a PddManager,
    p: Pdd,
}

impl<'a> PddDisplay<'a> {
    pub(crate) fn new(m: &'a PddManager, p: Pdd) -> Self {
        PddDisplay { m, p }
    }

    fn collect(&self, p: Pdd, prefix: &mut Vec<Var>, out: &mut Vec<Vec<Var>>) {
        if p.is_zero() {
            return;
        }
        if p.is_val() {
            out.push(prefix.clone());
            return;
        }
        let (var, hi, lo) = self.m.node_parts(p);
        prefix.push(var);
        self.collect(hi, prefix, out);
        prefix.pop();
        self.collect(lo, prefix, out);
    }
}

impl fmt::Display for PddDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut monomials = Vec::new();
        self.collect(self.p, &mut Vec::new(), &mut monomials);
        if monomials.is_empty() {
            return write!(f, "0");
        }
        for (i, monomial) in monomials.iter().enumerate() {
            if i > 0 {
                write!(f, " + ")?;
            }
            if monomial.is_empty() {
                write!(f, "1")?;
            } else {
                for (j, &v) in monomial.iter().enumerate() {
                    if j > 0 {
                        write!(f, "*")?;
                    }
                    write!(f, "{}", self.m.var_name(v))?;
                }
            }
        }
        Ok(())
    }
}
