use std::io::{self, Write};
use std::time::Duration;

/// Summary of one `(instance, strategy)` run, one CSV row per record.
#[derive(Clone, Debug)]
pub struct RunRecord {
    pub instance: String,
    pub num_vertices: usize,
    pub num_edges: usize,
    pub strategy: String,
    pub best_cost: f64,
    pub node_count: u64,
    pub lp_count: u64,
    pub timed_out: bool,
    pub runtime: Duration,
}

pub const CSV_HEADER: &str =
    "instance,|V|,|E|,strategy,best_cost,bnb_nodes,lp_calls,timed_out,runtime_sec";

pub fn write_csv<W: Write>(records: &[RunRecord], mut out: W) -> io::Result<()> {
    writeln!(out, "{}", CSV_HEADER)?;
    for record in records {
        writeln!(
            out,
            "{},{},{},{},{},{},{},{},{:.2}",
            record.instance,
            record.num_vertices,
            record.num_edges,
            record.strategy,
            record.best_cost,
            record.node_count,
            record.lp_count,
            record.timed_out,
            record.runtime.as_secs_f64()
        )?;
    }
    Ok(())
}
