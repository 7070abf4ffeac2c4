use rustc_hash::FxHashMap;

use super::{LpOracle, LpSolution};
use crate::error::SolverError;
use crate::graph::Graph;

/// Exact reference oracle for small graphs.
///
/// The vertex cover relaxation always has a half-integral optimal extreme
/// point, so enumerating assignments over `{0, 1/2, 1}` with cost and
/// feasibility pruning finds the true optimum. Intended for the test suite
/// and for cross-checking the SCIP backend; refuses graphs beyond
/// `max_vertices`.
#[derive(Clone, Copy, Debug)]
pub struct HalfIntegralOracle {
    pub max_vertices: usize,
}

impl Default for HalfIntegralOracle {
    fn default() -> Self {
        Self { max_vertices: 20 }
    }
}

const LEVELS: [f64; 3] = [0.0, 0.5, 1.0];

struct Enumeration<'a> {
    graph: &'a Graph,
    vertices: &'a [u32],
    /// Neighbors of vertex `i` among vertices with index `< i`.
    earlier_neighbors: Vec<Vec<usize>>,
    assignment: Vec<f64>,
    best_cost: f64,
    best_assignment: Vec<f64>,
}

impl Enumeration<'_> {
    fn run(&mut self, idx: usize, cost: f64) {
        if cost >= self.best_cost {
            return;
        }
        if idx == self.vertices.len() {
            self.best_cost = cost;
            self.best_assignment.clone_from(&self.assignment);
            return;
        }
        let weight = self.graph.weight(self.vertices[idx]);
        for level in LEVELS {
            let feasible = self.earlier_neighbors[idx]
                .iter()
                .all(|&j| self.assignment[j] + level >= 1.0);
            if !feasible {
                continue;
            }
            self.assignment[idx] = level;
            self.run(idx + 1, cost + weight * level);
        }
    }
}

impl LpOracle for HalfIntegralOracle {
    fn solve_lp(&self, graph: &Graph) -> Result<LpSolution, SolverError> {
        if !graph.has_edges() {
            return Ok(LpSolution::default());
        }
        if graph.num_vertices() > self.max_vertices {
            return Err(SolverError::OracleFailure(format!(
                "enumerative oracle supports at most {} vertices, got {}",
                self.max_vertices,
                graph.num_vertices()
            )));
        }

        let mut vertices: Vec<u32> = graph.vertices().collect();
        vertices.sort_unstable();
        let index: FxHashMap<u32, usize> = vertices
            .iter()
            .enumerate()
            .map(|(i, &v)| (v, i))
            .collect();
        let earlier_neighbors = vertices
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                let mut earlier: Vec<usize> = graph
                    .neighbors(v)
                    .into_iter()
                    .filter_map(|u| index.get(&u).copied().filter(|&j| j < i))
                    .collect();
                earlier.sort_unstable();
                earlier
            })
            .collect();

        let mut enumeration = Enumeration {
            graph,
            vertices: &vertices,
            earlier_neighbors,
            assignment: vec![0.0; vertices.len()],
            best_cost: f64::INFINITY,
            best_assignment: Vec::new(),
        };
        enumeration.run(0, 0.0);

        if enumeration.best_assignment.is_empty() {
            return Err(SolverError::OracleFailure(
                "relaxation enumeration found no feasible assignment".to_owned(),
            ));
        }
        let values = vertices
            .iter()
            .zip(&enumeration.best_assignment)
            .map(|(&v, &x)| (v, x))
            .collect();
        Ok(LpSolution {
            objective: enumeration.best_cost,
            values,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edgeless_graph_has_zero_objective() {
        let graph = Graph::new(vec![(1, 3.0), (2, 4.0)], Vec::new());
        let sol = HalfIntegralOracle::default().solve_lp(&graph).unwrap();
        assert_eq!(sol.objective, 0.0);
        assert_eq!(sol.value(1), 0.0);
    }

    #[test]
    fn single_edge_takes_cheaper_endpoint() {
        let graph = Graph::new(vec![(1, 5.0), (2, 1.0)], vec![(1, 2)]);
        let sol = HalfIntegralOracle::default().solve_lp(&graph).unwrap();
        assert_eq!(sol.objective, 1.0);
        assert_eq!(sol.value(1), 0.0);
        assert_eq!(sol.value(2), 1.0);
    }

    #[test]
    fn unit_triangle_is_all_halves() {
        let graph = Graph::new(
            vec![(1, 1.0), (2, 1.0), (3, 1.0)],
            vec![(1, 2), (2, 3), (1, 3)],
        );
        let sol = HalfIntegralOracle::default().solve_lp(&graph).unwrap();
        assert_eq!(sol.objective, 1.5);
        for v in 1..=3 {
            assert_eq!(sol.value(v), 0.5);
        }
    }

    #[test]
    fn oversized_graph_is_rejected() {
        let vertices: Vec<_> = (1..=6).map(|v| (v, 1.0)).collect();
        let graph = Graph::new(vertices, vec![(1, 2), (3, 4), (5, 6)]);
        let oracle = HalfIntegralOracle { max_vertices: 4 };
        assert!(matches!(
            oracle.solve_lp(&graph),
            Err(SolverError::OracleFailure(_))
        ));
    }
}
