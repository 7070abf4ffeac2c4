use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use log::{info, warn};
use structopt::StructOpt;

use mwvc_solver::branching::Strategy;
use mwvc_solver::lp_solvers::scip::ScipOracle;
use mwvc_solver::parser::ParsedInstance;
use mwvc_solver::report::{self, RunRecord};
use mwvc_solver::solver::{solve, SolveParams};

#[derive(StructOpt)]
struct Args {
    /// Path to a single `.vc` instance file.
    #[structopt(required_unless = "all", conflicts_with = "all")]
    instance: Option<PathBuf>,

    /// Run every `.vc` instance in the given directory.
    #[structopt(short, long)]
    all: Option<PathBuf>,

    /// Branching strategy: max-degree, min-degree or strong.
    /// All three are run when omitted.
    #[structopt(short, long)]
    strategy: Option<Strategy>,

    /// Wall-clock limit per run, in seconds.
    #[structopt(short, long)]
    timeout: Option<u64>,

    /// Candidate pool size for strong branching.
    #[structopt(short, long, default_value = "5")]
    candidates: usize,

    /// Output CSV file.
    #[structopt(short, long, default_value = "solutions.csv")]
    out: PathBuf,
}

// Mimalloc allocator
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

fn run_instance(
    path: &Path,
    strategy: Strategy,
    params: &SolveParams,
) -> Result<RunRecord, Box<dyn std::error::Error>> {
    let input = BufReader::new(File::open(path)?);
    let graph = ParsedInstance::from_reader(input)?.into_graph();

    let start = Instant::now();
    let outcome = solve(&graph, strategy, &ScipOracle::default(), params)?;
    let runtime = start.elapsed();

    Ok(RunRecord {
        instance: path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string()),
        num_vertices: graph.num_vertices(),
        num_edges: graph.num_edges(),
        strategy: strategy.to_string(),
        best_cost: outcome.best_cost,
        node_count: outcome.node_count,
        lp_count: outcome.lp_count,
        timed_out: outcome.timed_out,
        runtime,
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::from_args();

    let instances = if let Some(dir) = &args.all {
        let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().map_or(false, |ext| ext == "vc"))
            .collect();
        files.sort();
        if files.is_empty() {
            warn!("no .vc files found in {}", dir.display());
        }
        files
    } else {
        vec![args.instance.clone().expect("clap enforces one of the two")]
    };

    let strategies = match args.strategy {
        Some(Strategy::Strong { .. }) => vec![Strategy::Strong {
            max_candidates: args.candidates,
        }],
        Some(strategy) => vec![strategy],
        None => vec![
            Strategy::MaxDegreeInclude,
            Strategy::MinDegreeExclude,
            Strategy::Strong {
                max_candidates: args.candidates,
            },
        ],
    };

    let params = SolveParams {
        timeout: args.timeout.map(Duration::from_secs),
        ..SolveParams::default()
    };

    info!(
        "running {} instance(s) with {} strategy/strategies",
        instances.len(),
        strategies.len()
    );

    let mut records = Vec::new();
    for path in &instances {
        for &strategy in &strategies {
            info!("running {} with {}", path.display(), strategy);
            match run_instance(path, strategy, &params) {
                Ok(record) => {
                    info!(
                        "done: best {} in {} nodes, {} LP calls, {:.2?}{}",
                        record.best_cost,
                        record.node_count,
                        record.lp_count,
                        record.runtime,
                        if record.timed_out { " (timed out)" } else { "" }
                    );
                    records.push(record);
                }
                Err(e) => {
                    warn!("{} with {} failed: {}", path.display(), strategy, e);
                }
            }
        }
    }

    if records.is_empty() {
        warn!("no results to write");
        return Ok(());
    }
    let out = BufWriter::new(File::create(&args.out)?);
    report::write_csv(&records, out)?;
    info!("results written to {}", args.out.display());
    Ok(())
}
