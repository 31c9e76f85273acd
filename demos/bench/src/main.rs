//! bench — A* throughput benchmark over a real OSM extract.
//!
//! ```text
//! bench <file.osm> [runs]
//! ```
//!
//! Samples a fixed set of sections with a seeded RNG, forms every ordered
//! pair, and plans each pair `runs` times across a Rayon worker pool sharing
//! one read-only graph.  Per-run rows land in `bench_results.csv`; summary
//! statistics are logged at the end.

use std::env;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result, bail, ensure};
use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rayon::prelude::*;

use wp_core::SectionId;
use wp_graph::{SectionGraph, build_graph};
use wp_osm::{PruneMode, prepare, read_osm_file};
use wp_planner::AstarPlanner;

// ── Constants ─────────────────────────────────────────────────────────────────

const DEFAULT_RUNS: usize = 100;
const QUERY_SECTIONS: usize = 10;
const SEED: u64 = 42;
const RESULTS_FILE: &str = "bench_results.csv";

// ── Per-run measurement ───────────────────────────────────────────────────────

struct BenchRow {
    query: usize,
    start: String,
    goal: String,
    run: usize,
    hops: usize,
    length_m: f64,
    open: usize,
    closed: usize,
    seconds: f64,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        bail!("usage: bench <file.osm> [runs]");
    }
    let runs: usize = match args.get(2) {
        Some(raw) => raw.parse().context("runs must be a number")?,
        None => DEFAULT_RUNS,
    };

    // ── Load and build ────────────────────────────────────────────────────
    let mut data = read_osm_file(Path::new(&args[1]))?;
    prepare(&mut data, PruneMode::Aggressive);
    let graph = build_graph(&mut data)?;
    ensure!(
        graph.section_count() >= 2,
        "need at least two sections to benchmark, got {}",
        graph.section_count()
    );

    // ── Queries: every ordered pair of a seeded section sample ────────────
    let mut rng = SmallRng::seed_from_u64(SEED);
    let count = QUERY_SECTIONS.min(graph.section_count());
    let chosen: Vec<SectionId> = rand::seq::index::sample(&mut rng, graph.section_count(), count)
        .iter()
        .map(|i| SectionId(i as u32))
        .collect();

    let queries: Vec<(SectionId, SectionId)> = chosen
        .iter()
        .flat_map(|&a| chosen.iter().filter(move |&&b| b != a).map(move |&b| (a, b)))
        .collect();

    info!(
        "running {} queries x {runs} runs on {} worker threads",
        queries.len(),
        rayon::current_num_threads()
    );

    // ── Fan out over the shared read-only graph ───────────────────────────
    let total = Instant::now();
    let rows: Vec<BenchRow> = queries
        .par_iter()
        .enumerate()
        .flat_map_iter(|(query, &(start, goal))| run_query(&graph, query, start, goal, runs))
        .collect();
    info!(
        "took {:.3} sec to run {} measurements",
        total.elapsed().as_secs_f64(),
        rows.len()
    );

    write_csv(&rows)?;
    log_summary(&rows);
    Ok(())
}

/// Plan one (start, goal) pair `runs` times, timing each run.
fn run_query(
    graph: &SectionGraph,
    query: usize,
    start: SectionId,
    goal: SectionId,
    runs: usize,
) -> Vec<BenchRow> {
    let mut rows = Vec::with_capacity(runs);
    for run in 0..runs {
        let clock = Instant::now();
        match AstarPlanner.plan_traced(graph, start, goal) {
            Ok((route, trace)) => rows.push(BenchRow {
                query,
                start: graph.name(start),
                goal: graph.name(goal),
                run,
                hops: route.hops(),
                length_m: route.traversed_length_m(graph),
                open: trace.open.len(),
                closed: trace.closed.len(),
                seconds: clock.elapsed().as_secs_f64(),
            }),
            Err(err) => {
                // A disconnected pair fails every run identically; once is
                // enough to know.
                warn!("query {query} skipped: {err}");
                break;
            }
        }
    }
    rows
}

// ── Output ────────────────────────────────────────────────────────────────────

fn write_csv(rows: &[BenchRow]) -> Result<()> {
    let mut out = csv::Writer::from_path(RESULTS_FILE)?;
    out.write_record([
        "query", "start", "goal", "run", "hops", "length_m", "open", "closed", "seconds",
    ])?;
    for row in rows {
        out.write_record(&[
            row.query.to_string(),
            row.start.clone(),
            row.goal.clone(),
            row.run.to_string(),
            row.hops.to_string(),
            format!("{:.3}", row.length_m),
            row.open.to_string(),
            row.closed.to_string(),
            format!("{:.6}", row.seconds),
        ])?;
    }
    out.flush()?;
    info!("wrote {} rows to {RESULTS_FILE}", rows.len());
    Ok(())
}

fn log_summary(rows: &[BenchRow]) {
    if rows.is_empty() {
        warn!("no successful runs; nothing to summarise");
        return;
    }
    let col = |f: fn(&BenchRow) -> f64| -> Vec<f64> { rows.iter().map(f).collect() };

    info!("                 |     mean    |    median   |   st. dev.");
    log_stat_line("path sections   ", &col(|r| r.hops as f64));
    log_stat_line("route length (m)", &col(|r| r.length_m));
    log_stat_line("open set        ", &col(|r| r.open as f64));
    log_stat_line("closed set      ", &col(|r| r.closed as f64));
    log_stat_line("run time (s)    ", &col(|r| r.seconds));
    info!(
        "total time spent planning: {:.4} sec",
        rows.iter().map(|r| r.seconds).sum::<f64>()
    );
}

fn log_stat_line(label: &str, xs: &[f64]) {
    let (mean, median, stdev) = stats(xs);
    info!("{label} | {mean:11.4} | {median:11.4} | {stdev:11.4}");
}

/// Mean, median, and sample standard deviation.
fn stats(xs: &[f64]) -> (f64, f64, f64) {
    let n = xs.len() as f64;
    let mean = xs.iter().sum::<f64>() / n;

    let mut sorted = xs.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    let median = if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    };

    let stdev = if xs.len() > 1 {
        (xs.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0)).sqrt()
    } else {
        0.0
    };
    (mean, median, stdev)
}
