//! Depth-first branch-and-bound search for minimum weighted vertex cover,
//! bounded by the LP relaxation and reduced by Nemhauser–Trotter
//! persistency.

use std::time::Duration;

use rustc_hash::FxHashSet;

use crate::branching::{BranchSide, Strategy};
use crate::error::SolverError;
use crate::graph::Graph;
use crate::lp_solvers::LpOracle;
use crate::reduction::nemhauser_trotter;
use crate::time_limit::TimeLimit;

#[derive(Clone, Copy, Debug)]
pub struct SolveParams {
    /// Tolerance for classifying a relaxation value as integral; the same
    /// value is used everywhere within one solve. Must lie in `(0, 0.5)`.
    pub epsilon: f64,
    pub timeout: Option<Duration>,
    /// Starting incumbent. Defaults to `+∞`; the vertex count is the usual
    /// choice for unit-weight instances.
    pub initial_upper_bound: Option<f64>,
}

impl Default for SolveParams {
    fn default() -> Self {
        Self {
            epsilon: 1e-6,
            timeout: None,
            initial_upper_bound: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SolveOutcome {
    /// Best cover cost found. Certified optimal unless `timed_out` is set,
    /// in which case it is only an upper bound.
    pub best_cost: f64,
    pub node_count: u64,
    pub lp_count: u64,
    pub timed_out: bool,
}

/// All mutable search state, owned by one solve invocation. Nothing here
/// survives into the next solve.
struct SearchContext<'a, O: LpOracle> {
    oracle: &'a O,
    strategy: Strategy,
    epsilon: f64,
    time_limit: TimeLimit,
    incumbent: f64,
    node_count: u64,
    lp_count: u64,
}

pub fn solve<O: LpOracle>(
    graph: &Graph,
    strategy: Strategy,
    oracle: &O,
    params: &SolveParams,
) -> Result<SolveOutcome, SolverError> {
    let mut ctx = SearchContext {
        oracle,
        strategy,
        epsilon: params.epsilon,
        time_limit: TimeLimit::new(params.timeout),
        incumbent: params.initial_upper_bound.unwrap_or(f64::INFINITY),
        node_count: 0,
        lp_count: 0,
    };

    let timed_out = branch(graph, 0.0, &mut ctx)?;

    log::debug!(
        "search finished: best {} after {} nodes, {} LP solves, {:.2?}{}",
        ctx.incumbent,
        ctx.node_count,
        ctx.lp_count,
        ctx.time_limit.elapsed(),
        if timed_out { " (timed out)" } else { "" }
    );

    Ok(SolveOutcome {
        best_cost: ctx.incumbent,
        node_count: ctx.node_count,
        lp_count: ctx.lp_count,
        timed_out,
    })
}

/// One search node over the residual graph with accumulated cost `z`.
/// Returns whether the time limit expired; an expired limit unwinds every
/// active frame without touching the incumbent again.
fn branch<O: LpOracle>(
    graph: &Graph,
    z: f64,
    ctx: &mut SearchContext<O>,
) -> Result<bool, SolverError> {
    if !ctx.time_limit.can_progress() {
        return Ok(true);
    }
    ctx.node_count += 1;

    if !graph.has_edges() {
        if z < ctx.incumbent {
            ctx.incumbent = z;
        }
        return Ok(false);
    }

    let relaxation = ctx.oracle.solve_lp(graph)?;
    ctx.lp_count += 1;
    let lower_bound = z + relaxation.objective;
    if lower_bound >= ctx.incumbent {
        return Ok(false);
    }

    let reduction = nemhauser_trotter(graph, &relaxation, ctx.epsilon);
    if reduction.all_integral {
        let candidate = z + relaxation.objective;
        if candidate < ctx.incumbent {
            ctx.incumbent = candidate;
        }
        return Ok(false);
    }
    let reduced = reduction.graph;
    let z = z + reduction.forced_cost;
    if !reduced.has_edges() {
        // Persistency left only fractional isolated vertices; none of them
        // is needed in the cover.
        if z < ctx.incumbent {
            ctx.incumbent = z;
        }
        return Ok(false);
    }

    let choice = ctx.strategy.choose(&reduced, ctx.oracle)?;
    ctx.lp_count += choice.lp_calls;
    if !reduced.contains(choice.vertex) {
        return Err(SolverError::StrategyContract(format!(
            "selected vertex {} is not part of the branching graph",
            choice.vertex
        )));
    }

    let vertex = choice.vertex;
    let removed: FxHashSet<u32> = std::iter::once(vertex).collect();
    let include_graph = reduced.remove_vertices(&removed);
    let include_cost = z + reduced.weight(vertex);

    let neighbors = reduced.neighbors(vertex);
    let mut removed = neighbors.clone();
    removed.insert(vertex);
    let exclude_graph = reduced.remove_vertices(&removed);
    let exclude_cost = z + reduced.set_weight(&neighbors);

    let (first, second) = match choice.first {
        BranchSide::Include => (
            (include_graph, include_cost),
            (exclude_graph, exclude_cost),
        ),
        BranchSide::Exclude => (
            (exclude_graph, exclude_cost),
            (include_graph, include_cost),
        ),
    };

    if branch(&first.0, first.1, ctx)? {
        return Ok(true);
    }
    if branch(&second.0, second.1, ctx)? {
        return Ok(true);
    }
    Ok(false)
}
