//! Branching strategies: which vertex to branch on next, and which of the
//! two branches to explore first.

use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;

use rustc_hash::FxHashSet;

use crate::error::SolverError;
use crate::graph::Graph;
use crate::lp_solvers::LpOracle;

pub const DEFAULT_STRONG_CANDIDATES: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BranchSide {
    /// Put the vertex into the cover.
    Include,
    /// Leave the vertex out, forcing all its neighbors into the cover.
    Exclude,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BranchChoice {
    pub vertex: u32,
    pub first: BranchSide,
    /// Auxiliary relaxation solves performed while choosing; charged to the
    /// solve-wide LP counter by the caller.
    pub lp_calls: u64,
}

/// Contract for every variant: called only on a graph with at least one
/// edge, and the returned vertex is a member of that graph. Ties are broken
/// towards the smallest vertex id so search trees are reproducible.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// Highest-degree vertex, include branch first.
    MaxDegreeInclude,
    /// Lowest-degree vertex, exclude branch first.
    MinDegreeExclude,
    /// Probe the `max_candidates` highest-degree vertices with two auxiliary
    /// relaxations each and pick the one whose worse branch improves the
    /// bound the most.
    Strong { max_candidates: usize },
}

impl Strategy {
    pub fn choose(
        &self,
        graph: &Graph,
        oracle: &impl LpOracle,
    ) -> Result<BranchChoice, SolverError> {
        match *self {
            Strategy::MaxDegreeInclude => {
                let vertex = graph
                    .vertices()
                    .max_by_key(|&v| (graph.degree(v), Reverse(v)))
                    .ok_or_else(called_on_empty_graph)?;
                Ok(BranchChoice {
                    vertex,
                    first: BranchSide::Include,
                    lp_calls: 0,
                })
            }
            Strategy::MinDegreeExclude => {
                let vertex = graph
                    .vertices()
                    .min_by_key(|&v| (graph.degree(v), v))
                    .ok_or_else(called_on_empty_graph)?;
                Ok(BranchChoice {
                    vertex,
                    first: BranchSide::Exclude,
                    lp_calls: 0,
                })
            }
            Strategy::Strong { max_candidates } => strong_branch(graph, oracle, max_candidates),
        }
    }
}

/// Strong branching. For each candidate `v` the two auxiliary bounds are
/// `c(v) + lp(G − v)` and `c(N(v)) + lp(G − v − N(v))`; the score is the
/// worse of the two improvements over the base relaxation, and the winner
/// is the candidate maximizing that score. The branch with the smaller
/// auxiliary bound is explored first. Edgeless auxiliary graphs contribute
/// a relaxation value of zero without an oracle call.
fn strong_branch(
    graph: &Graph,
    oracle: &impl LpOracle,
    max_candidates: usize,
) -> Result<BranchChoice, SolverError> {
    let base = oracle.solve_lp(graph)?;
    let mut lp_calls = 1u64;

    let mut candidates: Vec<u32> = graph.vertices().collect();
    candidates.sort_unstable_by_key(|&v| (Reverse(graph.degree(v)), v));
    candidates.truncate(max_candidates.max(1));

    let mut best: Option<(f64, u32, BranchSide)> = None;
    for v in candidates {
        let removed: FxHashSet<u32> = std::iter::once(v).collect();
        let include_graph = graph.remove_vertices(&removed);
        let mut include_bound = graph.weight(v);
        if include_graph.has_edges() {
            include_bound += oracle.solve_lp(&include_graph)?.objective;
            lp_calls += 1;
        }

        let neighbors = graph.neighbors(v);
        let mut removed = neighbors.clone();
        removed.insert(v);
        let exclude_graph = graph.remove_vertices(&removed);
        let mut exclude_bound = graph.set_weight(&neighbors);
        if exclude_graph.has_edges() {
            exclude_bound += oracle.solve_lp(&exclude_graph)?.objective;
            lp_calls += 1;
        }

        let score = include_bound.min(exclude_bound) - base.objective;
        let first = if include_bound <= exclude_bound {
            BranchSide::Include
        } else {
            BranchSide::Exclude
        };
        match best {
            Some((best_score, _, _)) if score <= best_score => {}
            _ => best = Some((score, v, first)),
        }
    }

    let (_, vertex, first) = best.ok_or_else(called_on_empty_graph)?;
    Ok(BranchChoice {
        vertex,
        first,
        lp_calls,
    })
}

fn called_on_empty_graph() -> SolverError {
    SolverError::StrategyContract("branch selection on a graph with no vertices".to_owned())
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::MaxDegreeInclude => "max-degree",
            Strategy::MinDegreeExclude => "min-degree",
            Strategy::Strong { .. } => "strong",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "max-degree" => Ok(Strategy::MaxDegreeInclude),
            "min-degree" => Ok(Strategy::MinDegreeExclude),
            "strong" => Ok(Strategy::Strong {
                max_candidates: DEFAULT_STRONG_CANDIDATES,
            }),
            other => Err(format!(
                "unknown strategy `{}`, expected max-degree, min-degree or strong",
                other
            )),
        }
    }
}
