//! Integration tests for the saturation engine.

use polybasis::{Pdd, PddManager, SaturationOutcome, Solver, SolverConfig, Var};

/// Solver over three named variables ordered x > y > z.
fn create_solver() -> (Solver, Pdd, Pdd, Pdd) {
    let mut m = PddManager::new(3);
    m.set_var_name(Var::new(2), "x");
    m.set_var_name(Var::new(1), "y");
    m.set_var_name(Var::new(0), "z");
    let x = m.mk_var(Var::new(2)).unwrap();
    let y = m.mk_var(Var::new(1)).unwrap();
    let z = m.mk_var(Var::new(0)).unwrap();
    (Solver::new(m, SolverConfig::default()), x, y, z)
}

#[test]
fn test_empty_solver_saturates() {
    let (mut solver, _, _, _) = create_solver();
    assert_eq!(solver.saturate(), SaturationOutcome::Saturated);
    assert_eq!(solver.equations().count(), 0);
    assert!(solver.conflict().is_none());
}

#[test]
fn test_adding_zero_is_a_no_op() {
    let (mut solver, _, _, _) = create_solver();
    let dep = solver.deps_mut().leaf(0);
    solver.add(Pdd::ZERO, dep);
    assert_eq!(solver.equations().count(), 0);
    assert_eq!(solver.saturate(), SaturationOutcome::Saturated);
}

#[test]
fn test_adding_a_nonzero_constant_conflicts_immediately() {
    let (mut solver, _, _, _) = create_solver();
    let dep = solver.deps_mut().leaf(0);
    solver.add(Pdd::ONE, dep);
    let conflict = solver.conflict().expect("constant 1 is a contradiction");
    assert!(conflict.poly().is_one());
    assert_eq!(solver.saturate(), SaturationOutcome::Conflict);
    solver.assert_invariants();
}

#[test]
fn test_duplicate_equations_are_merged() {
    let (mut solver, x, y, _) = create_solver();
    let p = solver.manager_mut().add(x, y).unwrap();
    let d0 = solver.deps_mut().leaf(0);
    let d1 = solver.deps_mut().leaf(1);
    solver.add(p, d0);
    solver.add(p, d1);
    assert_eq!(solver.saturate(), SaturationOutcome::Saturated);
    assert_eq!(solver.equations().count(), 1);
    solver.assert_invariants();
}

#[test]
fn test_statistics_track_queue_sizes() {
    let (mut solver, x, y, z) = create_solver();
    let xy = solver.manager_mut().mul(x, y).unwrap();
    let p = solver.manager_mut().add(xy, z).unwrap();
    let d0 = solver.deps_mut().leaf(0);
    solver.add(p, d0);
    assert_eq!(solver.saturate(), SaturationOutcome::Saturated);
    let stats = solver.statistics();
    // x·y + z has a non-constant leading coefficient: it stays processed
    assert_eq!(stats.processed, 1);
    assert_eq!(stats.solved, 0);
    assert_eq!(stats.to_simplify, 0);
    assert!(stats.steps >= 1);
    assert!(stats.max_degree >= 2);
}

#[test]
fn test_display_dumps_queues() {
    let (mut solver, _, y, z) = create_solver();
    let p = solver.manager_mut().add(y, z).unwrap();
    let d0 = solver.deps_mut().leaf(0);
    solver.add(p, d0);
    solver.saturate();
    let dump = solver.to_string();
    assert!(dump.contains("solved"));
    assert!(dump.contains("y + z"));
    let eq = solver.equations().next().unwrap();
    assert_eq!(solver.display_equation(eq).to_string(), "y + z");
}

#[test]
fn test_reset_releases_equations() {
    let (mut solver, x, y, _) = create_solver();
    let p = solver.manager_mut().add(x, y).unwrap();
    let d0 = solver.deps_mut().leaf(0);
    solver.add(p, d0);
    solver.saturate();
    assert_eq!(solver.equations().count(), 1);
    solver.reset();
    assert_eq!(solver.equations().count(), 0);
    assert!(solver.conflict().is_none());
    assert_eq!(solver.statistics().steps, 0);
    // the manager survives a reset; the same polynomial can be re-added
    let d1 = solver.deps_mut().leaf(1);
    solver.add(p, d1);
    assert_eq!(solver.saturate(), SaturationOutcome::Saturated);
    assert_eq!(solver.equations().count(), 1);
}

#[test]
fn test_incremental_add_between_saturate_calls() {
    let (mut solver, _, y, z) = create_solver();
    let yz = solver.manager_mut().add(y, z).unwrap();
    let d0 = solver.deps_mut().leaf(0);
    solver.add(yz, d0);
    assert_eq!(solver.saturate(), SaturationOutcome::Saturated);
    let z1 = solver.manager_mut().add(z, Pdd::ONE).unwrap();
    let d1 = solver.deps_mut().leaf(1);
    solver.add(z1, d1);
    assert_eq!(solver.saturate(), SaturationOutcome::Saturated);
    assert_eq!(solver.equations().count(), 2);
    solver.assert_invariants();
}
