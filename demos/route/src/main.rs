//! route — plan one drive across an OSM extract.
//!
//! ```text
//! route <file.osm> <start> <goal>
//! ```
//!
//! `start` and `goal` are either section ids (`"6398654_5"`) or `lat,lon`
//! pairs, which are snapped to the nearest section endpoint.  Set `RUST_LOG`
//! (e.g. `RUST_LOG=info`) to watch the load/build/search phases.

use std::env;
use std::path::Path;

use anyhow::{Context, Result, bail};
use log::info;

use wp_core::{GeoPoint, SectionId};
use wp_graph::{SectionGraph, build_graph};
use wp_osm::{PruneMode, prepare, read_osm_file};
use wp_planner::{AstarPlanner, Planner};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 4 {
        bail!("usage: route <file.osm> <start> <goal>  (start/goal: \"<way>_<index>\" or \"lat,lon\")");
    }

    let mut data = read_osm_file(Path::new(&args[1]))?;
    // Conservative pruning keeps tagged off-road nodes around for inspection.
    prepare(&mut data, PruneMode::Conservative);
    let graph = build_graph(&mut data)?;
    info!(
        "graph ready: {} sections, {} edges",
        graph.section_count(),
        graph.edge_count()
    );

    let start = locate(&graph, &args[2])?;
    let goal = locate(&graph, &args[3])?;

    let route = AstarPlanner.plan(&graph, start, goal)?;
    for (hop, &s) in route.sections.iter().enumerate() {
        let section = graph.section(s);
        println!(
            "{hop:>4}  {:<16} {:>9.1} m   {} -> {}",
            graph.name(s),
            section.length_m,
            section.start_node,
            section.end_node
        );
    }
    println!(
        "driven to reach the goal: {:.1} m over {} sections",
        route.length_m,
        route.hops()
    );
    Ok(())
}

/// Resolve a location argument: a `"<way>_<index>"` name, or a `lat,lon`
/// pair snapped to the nearest section.
fn locate(graph: &SectionGraph, arg: &str) -> Result<SectionId> {
    if let Some((lat, lon)) = arg.split_once(',') {
        let lat: f64 = lat.trim().parse().context("bad latitude")?;
        let lon: f64 = lon.trim().parse().context("bad longitude")?;
        let snapped = graph
            .snap_to_section(GeoPoint::new(lat, lon))
            .context("the graph has no sections to snap to")?;
        info!("snapped ({lat}, {lon}) to section {}", graph.name(snapped));
        return Ok(snapped);
    }
    Ok(graph.resolve(arg)?)
}
