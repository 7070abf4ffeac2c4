use russcip::{Model, ObjSense, ProblemOrSolving, Status, VarType, WithSolutions};
use rustc_hash::FxHashMap;

use super::{LpOracle, LpSolution};
use crate::error::SolverError;
use crate::graph::Graph;

/// Bounding oracle backed by SCIP through `russcip`. Builds one continuous
/// model per call; vertices and edges are added in sorted order so repeated
/// calls on the same graph produce the same model.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScipOracle {
    pub verbose: bool,
}

impl LpOracle for ScipOracle {
    fn solve_lp(&self, graph: &Graph) -> Result<LpSolution, SolverError> {
        if !graph.has_edges() {
            return Ok(LpSolution::default());
        }

        let mut vertices: Vec<u32> = graph.vertices().collect();
        vertices.sort_unstable();
        let mut edges: Vec<(u32, u32)> = graph.edges().collect();
        edges.sort_unstable();

        let mut model = Model::new()
            .include_default_plugins()
            .create_prob("mwvc_relaxation");
        if self.verbose {
            model.show_output()
        } else {
            model.hide_output()
        };
        let mut model = model.set_obj_sense(ObjSense::Minimize);

        let mut vars = FxHashMap::default();
        for &v in &vertices {
            let var = model.add_var(
                0.0,
                1.0,
                graph.weight(v),
                &format!("x{}", v),
                VarType::Continuous,
            );
            vars.insert(v, var);
        }
        for &(u, v) in &edges {
            model.add_cons(
                vec![vars[&u].clone(), vars[&v].clone()],
                &[1.0, 1.0],
                1.0,
                f64::INFINITY,
                &format!("e{}_{}", u, v),
            );
        }

        let solved = model.solve();
        if solved.status() != Status::Optimal {
            return Err(SolverError::OracleFailure(format!(
                "relaxation terminated with status {:?}",
                solved.status()
            )));
        }
        let sol = solved.best_sol().ok_or_else(|| {
            SolverError::OracleFailure("relaxation returned no solution".to_owned())
        })?;

        let values = vertices
            .iter()
            .map(|&v| (v, sol.val(vars[&v].clone()).clamp(0.0, 1.0)))
            .collect();
        Ok(LpSolution {
            objective: sol.obj_val(),
            values,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scip_matches_known_relaxation_values() {
        let oracle = ScipOracle::default();

        let edge = Graph::new(vec![(1, 5.0), (2, 1.0)], vec![(1, 2)]);
        let sol = oracle.solve_lp(&edge).unwrap();
        assert!((sol.objective - 1.0).abs() < 1e-6);

        let triangle = Graph::new(
            vec![(1, 1.0), (2, 1.0), (3, 1.0)],
            vec![(1, 2), (2, 3), (1, 3)],
        );
        let sol = oracle.solve_lp(&triangle).unwrap();
        assert!((sol.objective - 1.5).abs() < 1e-6);
    }
}
