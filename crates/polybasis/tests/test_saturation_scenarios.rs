//! End-to-end saturation scenarios over the ordering x > y > z.

use polybasis::{EqState, Pdd, PddManager, SaturationOutcome, Solver, SolverConfig, Var};

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

fn basis(solver: &Solver) -> Vec<Pdd> {
    solver.equations().map(|eq| eq.poly()).collect()
}

#[test]
fn test_two_linear_equations_eliminate_x() {
    // x + y = 0 and x + z = 0 entail y + z = 0
    let (mut solver, x, y, z) = create_solver();
    let p0 = solver.manager_mut().add(x, y).unwrap();
    let p1 = solver.manager_mut().add(x, z).unwrap();
    let d0 = solver.deps_mut().leaf(0);
    let d1 = solver.deps_mut().leaf(1);
    solver.add(p0, d0);
    solver.add(p1, d1);

    assert_eq!(solver.saturate(), SaturationOutcome::Saturated);
    assert!(solver.conflict().is_none());
    let yz = solver.manager_mut().add(y, z).unwrap();
    assert!(basis(&solver).contains(&yz));
    solver.assert_invariants();
}

#[test]
fn test_contradicting_units_conflict() {
    // x = 0 and x + 1 = 0 give 1 = 0
    let (mut solver, x, _, _) = create_solver();
    let p1 = solver.manager_mut().add(x, Pdd::ONE).unwrap();
    let d0 = solver.deps_mut().leaf(0);
    let d1 = solver.deps_mut().leaf(1);
    solver.add(x, d0);
    solver.add(p1, d1);

    assert_eq!(solver.saturate(), SaturationOutcome::Conflict);
    let conflict = solver.conflict().expect("conflict witness");
    assert!(conflict.poly().is_one());
    // both inputs justify the contradiction
    assert_eq!(solver.deps().leaves(conflict.dep()), vec![0, 1]);
    solver.assert_invariants();
}

#[test]
fn test_reduction_chain_to_constant_conflicts() {
    // x·y + 1 = 0 and x = 0: substituting x leaves 1 = 0
    let (mut solver, x, y, _) = create_solver();
    let xy = solver.manager_mut().mul(x, y).unwrap();
    let p0 = solver.manager_mut().add(xy, Pdd::ONE).unwrap();
    let d0 = solver.deps_mut().leaf(0);
    let d1 = solver.deps_mut().leaf(1);
    solver.add(p0, d0);
    solver.add(x, d1);

    assert_eq!(solver.saturate(), SaturationOutcome::Conflict);
    let conflict = solver.conflict().expect("conflict witness");
    assert!(conflict.poly().is_one());
    solver.assert_invariants();
}

#[test]
fn test_triangular_system_normalizes_to_solved_forms() {
    // x + y·z, y + z, z + 1 normalize to x + 1, y + 1, z + 1
    let (mut solver, x, y, z) = create_solver();
    let yz = solver.manager_mut().mul(y, z).unwrap();
    let p0 = solver.manager_mut().add(x, yz).unwrap();
    let p1 = solver.manager_mut().add(y, z).unwrap();
    let p2 = solver.manager_mut().add(z, Pdd::ONE).unwrap();
    for (i, p) in [p0, p1, p2].into_iter().enumerate() {
        let d = solver.deps_mut().leaf(i as u64);
        solver.add(p, d);
    }

    assert_eq!(solver.saturate(), SaturationOutcome::Saturated);
    let x1 = solver.manager_mut().add(x, Pdd::ONE).unwrap();
    let y1 = solver.manager_mut().add(y, Pdd::ONE).unwrap();
    let z1 = solver.manager_mut().add(z, Pdd::ONE).unwrap();
    let mut polys = basis(&solver);
    polys.sort();
    let mut expected = vec![x1, y1, z1];
    expected.sort();
    assert_eq!(polys, expected);
    assert!(solver.equations().all(|eq| eq.state() == EqState::Solved));
    assert_eq!(solver.statistics().processed, 0);
    solver.assert_invariants();
}

#[test]
fn test_single_solved_form_needs_no_superposition() {
    let (mut solver, _, y, z) = create_solver();
    let p = solver.manager_mut().add(y, z).unwrap();
    let d0 = solver.deps_mut().leaf(0);
    solver.add(p, d0);

    assert_eq!(solver.saturate(), SaturationOutcome::Saturated);
    assert_eq!(solver.equations().count(), 1);
    let eq = solver.equations().next().unwrap();
    assert_eq!(eq.state(), EqState::Solved);
    assert_eq!(eq.poly(), p);
    assert_eq!(solver.statistics().superposed, 0);
}

#[test]
fn test_superposition_eliminates_the_top_variable() {
    // spoly(x·y + z, x·z + y) cancels x and yields y + z
    let (mut solver, x, y, z) = create_solver();
    let xy = solver.manager_mut().mul(x, y).unwrap();
    let xz = solver.manager_mut().mul(x, z).unwrap();
    let p0 = solver.manager_mut().add(xy, z).unwrap();
    let p1 = solver.manager_mut().add(xz, y).unwrap();
    let d0 = solver.deps_mut().leaf(0);
    let d1 = solver.deps_mut().leaf(1);
    solver.add(p0, d0);
    solver.add(p1, d1);

    assert_eq!(solver.saturate(), SaturationOutcome::Saturated);
    assert!(solver.conflict().is_none());
    assert!(solver.statistics().superposed >= 1);
    let yz = solver.manager_mut().add(y, z).unwrap();
    assert!(basis(&solver).contains(&yz));
    // the x-free consequence justifies itself from both inputs
    let eq = solver.equations().find(|eq| eq.poly() == yz).unwrap();
    assert_eq!(solver.deps().leaves(eq.dep()), vec![0, 1]);
    solver.assert_invariants();
}
