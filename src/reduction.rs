//! Nemhauser–Trotter persistency: vertices whose relaxation value is
//! integral can be fixed without losing an optimal cover.

use rustc_hash::FxHashSet;

use crate::graph::Graph;
use crate::lp_solvers::LpSolution;

/// Result of one persistency pass.
#[derive(Clone, Debug)]
pub struct Reduction {
    /// Graph with `S0 ∪ S1` removed.
    pub graph: Graph,
    /// Total weight of `S1`, to be added to the accumulated cost.
    pub forced_cost: f64,
    /// True when every vertex of the input graph classified integral.
    pub all_integral: bool,
}

/// Classifies `S0 = {v : x(v) < eps}` (never in an optimal cover) and
/// `S1 = {v : x(v) > 1 − eps}` (always in one) and removes both.
///
/// This is the direct persistency policy: exactly `S0 ∪ S1` is removed. The
/// stronger neighbor-closure variant (also dropping `N(S0)`) would require
/// re-solving the relaxation on the residual before any further use of the
/// fractional point, and is intentionally not applied here.
pub fn nemhauser_trotter(graph: &Graph, relaxation: &LpSolution, eps: f64) -> Reduction {
    debug_assert!(eps > 0.0 && eps < 0.5);

    let mut integral = FxHashSet::default();
    let mut forced_cost = 0.0;
    for v in graph.vertices() {
        let x = relaxation.value(v);
        if x < eps {
            integral.insert(v);
        } else if x > 1.0 - eps {
            integral.insert(v);
            forced_cost += graph.weight(v);
        }
    }

    let all_integral = integral.len() == graph.num_vertices();
    Reduction {
        graph: graph.remove_vertices(&integral),
        forced_cost,
        all_integral,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lp_solvers::enumerative::HalfIntegralOracle;
    use crate::lp_solvers::LpOracle;

    const EPS: f64 = 1e-6;

    #[test]
    fn integral_relaxation_consumes_the_graph() {
        let graph = Graph::new(vec![(1, 5.0), (2, 1.0)], vec![(1, 2)]);
        let sol = HalfIntegralOracle::default().solve_lp(&graph).unwrap();
        let reduction = nemhauser_trotter(&graph, &sol, EPS);
        assert!(reduction.all_integral);
        assert_eq!(reduction.forced_cost, 1.0);
        assert_eq!(reduction.graph.num_vertices(), 0);
    }

    #[test]
    fn fully_fractional_relaxation_reduces_nothing() {
        let graph = Graph::new(
            vec![(1, 1.0), (2, 1.0), (3, 1.0)],
            vec![(1, 2), (2, 3), (1, 3)],
        );
        let sol = HalfIntegralOracle::default().solve_lp(&graph).unwrap();
        let reduction = nemhauser_trotter(&graph, &sol, EPS);
        assert!(!reduction.all_integral);
        assert_eq!(reduction.forced_cost, 0.0);
        assert_eq!(reduction.graph, graph);
    }

    #[test]
    fn mixed_relaxation_removes_only_integral_vertices() {
        // Unit triangle (fully fractional) next to a disjoint weighted edge
        // whose relaxation is integral: x(4) = 0, x(5) = 1.
        let graph = Graph::new(
            vec![(1, 1.0), (2, 1.0), (3, 1.0), (4, 5.0), (5, 1.0)],
            vec![(1, 2), (2, 3), (1, 3), (4, 5)],
        );
        let sol = HalfIntegralOracle::default().solve_lp(&graph).unwrap();
        assert_eq!(sol.objective, 2.5);
        let reduction = nemhauser_trotter(&graph, &sol, EPS);
        assert!(!reduction.all_integral);
        assert_eq!(reduction.forced_cost, 1.0);
        let mut survivors: Vec<u32> = reduction.graph.vertices().collect();
        survivors.sort_unstable();
        assert_eq!(survivors, vec![1, 2, 3]);
        assert_eq!(reduction.graph.num_edges(), 3);
    }
}
