//! Bounding oracles for the vertex cover relaxation.
//!
//! The search consumes the relaxation through the [`LpOracle`] trait only;
//! the numeric internals live behind it. [`scip::ScipOracle`] is the
//! production backend, [`enumerative::HalfIntegralOracle`] a small exact
//! reference backend.

use rustc_hash::FxHashMap;

use crate::error::SolverError;
use crate::graph::Graph;

pub mod enumerative;
pub mod scip;

/// Optimal value and fractional assignment of the relaxation
/// `min Σ c(v)·x(v)` s.t. `x(u) + x(v) ≥ 1` per edge, `0 ≤ x ≤ 1`.
///
/// An edgeless graph yields objective `0.0` with an empty assignment;
/// [`LpSolution::value`] treats missing entries as `0.0` so both the empty
/// and the all-zero representation read the same.
#[derive(Clone, Debug, Default)]
pub struct LpSolution {
    pub objective: f64,
    pub values: FxHashMap<u32, f64>,
}

impl LpSolution {
    pub fn value(&self, v: u32) -> f64 {
        self.values.get(&v).copied().unwrap_or(0.0)
    }
}

/// Contract: deterministic for a fixed graph, and either an optimal solution
/// or an error. A failed oracle aborts the solve; there is no fallback bound.
pub trait LpOracle {
    fn solve_lp(&self, graph: &Graph) -> Result<LpSolution, SolverError>;
}
