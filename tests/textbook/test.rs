use approx::assert_abs_diff_eq;

use wvlp::algorithm::error::SolveError;
use wvlp::algorithm::two_phase::config::SolverConfig;
use wvlp::algorithm::two_phase::Solver;

use crate::textbook::{assert_optimal_dual, assert_values, create};

/// Two suppliers and three customers with balanced supply and demand, so one row is redundant.
#[test]
fn transportation() {
    let problem = create(
        vec![
            vec![1f64, 1f64, 1f64, 0f64, 0f64, 0f64],
            vec![0f64, 0f64, 0f64, 1f64, 1f64, 1f64],
            vec![1f64, 0f64, 0f64, 1f64, 0f64, 0f64],
            vec![0f64, 1f64, 0f64, 0f64, 1f64, 0f64],
            vec![0f64, 0f64, 1f64, 0f64, 0f64, 1f64],
        ],
        vec![20f64, 30f64, 10f64, 25f64, 15f64],
        vec![8f64, 6f64, 10f64, 9f64, 12f64, 13f64],
    );

    let solution = Solver::default().solve(&problem, None, 1e-8, 1000).unwrap();
    assert_values(solution.x(), &[0f64, 20f64, 0f64, 10f64, 5f64, 15f64]);
    assert_abs_diff_eq!(solution.objective_value(problem.cost()), 465f64, epsilon = 1e-7);
    assert_eq!(solution.basis().len(), 4);

    let dual = solution.dual().unwrap();
    assert_eq!(dual.len(), 5);
    assert_eq!(dual[4], 0f64);
    assert_optimal_dual(&problem, solution.x(), dual);
}

/// Cycles under the textbook most-negative-cost rule with lowest index tie breaking.
#[test]
fn beale_cycling() {
    let problem = create(
        vec![
            vec![1f64, 0f64, 0f64, 0.25f64, -8f64, -1f64, 9f64],
            vec![0f64, 1f64, 0f64, 0.5f64, -12f64, -0.5f64, 3f64],
            vec![0f64, 0f64, 1f64, 0f64, 0f64, 1f64, 0f64],
        ],
        vec![0f64, 0f64, 1f64],
        vec![0f64, 0f64, 0f64, -0.75f64, 20f64, -0.5f64, 6f64],
    );

    for early_exit in [true, false] {
        let config = SolverConfig { early_exit, ..SolverConfig::default() };
        let solution = Solver::new(config).solve(&problem, Some(&[0, 1, 2]), 1e-8, 1000).unwrap();
        assert_values(solution.x(), &[0.75f64, 0f64, 0f64, 1f64, 0f64, 1f64, 0f64]);
        assert_abs_diff_eq!(solution.objective_value(problem.cost()), -1.25f64, epsilon = 1e-7);
    }
}

/// Diet problem with surplus variables, the column basis is not feasible.
#[test]
fn diet_and_warm_restart() {
    let rows = vec![
        vec![2f64, 1f64, 1f64, -1f64, 0f64],
        vec![1f64, 2f64, 3f64, 0f64, -1f64],
    ];
    let b = vec![8f64, 12f64];
    let problem = create(rows.clone(), b.clone(), vec![3f64, 2f64, 4f64, 0f64, 0f64]);
    let solver = Solver::default();

    let solution = solver.solve(&problem, None, 1e-8, 1000).unwrap();
    assert_values(solution.x(), &[4f64 / 3f64, 16f64 / 3f64, 0f64, 0f64, 0f64]);
    assert_abs_diff_eq!(solution.objective_value(problem.cost()), 44f64 / 3f64, epsilon = 1e-7);
    assert_optimal_dual(&problem, solution.x(), solution.dual().unwrap());

    // The basis stays optimal after a small price change, so no pivots are needed
    let changed = create(rows, b, vec![3f64, 2.5f64, 4f64, 0f64, 0f64]);
    let restarted = solver.solve(&changed, Some(solution.basis()), 1e-8, 0).unwrap();
    assert_values(restarted.x(), solution.x());
    assert_abs_diff_eq!(restarted.objective_value(changed.cost()), 52f64 / 3f64, epsilon = 1e-7);

    let from_basis = solver.optimize_from_basis(&changed, solution.basis(), 1e-8, 0).unwrap();
    assert_eq!(from_basis.basis(), restarted.basis());
}

#[test]
fn infeasible() {
    // The first row fixes x0 + x1, so the second row needs x2 = -1
    let problem = create(
        vec![
            vec![1f64, 1f64, 0f64],
            vec![1f64, 1f64, -1f64],
        ],
        vec![1f64, 2f64],
        vec![1f64, 1f64, 1f64],
    );

    assert!(matches!(Solver::default().solve(&problem, None, 1e-8, 1000), Err(SolveError::Infeasible(_))));
}

#[test]
fn unbounded() {
    // min -x0 with x0 - x1 - x2 = 1
    let problem = create(vec![vec![1f64, -1f64, -1f64]], vec![1f64], vec![-1f64, 0f64, 0f64]);

    assert!(matches!(Solver::default().solve(&problem, None, 1e-8, 1000), Err(SolveError::Unbounded(_))));
}

#[test]
fn seeds_give_same_optimum() {
    let problem = create(
        vec![
            vec![1f64, 1f64, 1f64, 0f64, 0f64, 0f64],
            vec![0f64, 0f64, 0f64, 1f64, 1f64, 1f64],
            vec![1f64, 0f64, 0f64, 1f64, 0f64, 0f64],
            vec![0f64, 1f64, 0f64, 0f64, 1f64, 0f64],
        ],
        vec![20f64, 30f64, 10f64, 25f64],
        vec![8f64, 6f64, 10f64, 9f64, 12f64, 13f64],
    );

    for seed in [0, 1, 42, 3_252_351] {
        let config = SolverConfig { seed, ..SolverConfig::default() };
        let solution = Solver::new(config).solve(&problem, None, 1e-8, 1000).unwrap();
        assert_abs_diff_eq!(solution.objective_value(problem.cost()), 465f64, epsilon = 1e-7);
        assert_optimal_dual(&problem, solution.x(), solution.dual().unwrap());
    }
}
