//! Filtering passes applied between loading and graph construction.
//!
//! Order matters: ways first (driveability), then nodes (pruning), then the
//! back-reference pass that lets the graph builder spot junctions.
//! [`prepare`] runs all three.

use log::info;

use wp_core::TagValue;

use crate::elements::{OsmData, Way};

/// Node-pruning policy for [`prune_nodes`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PruneMode {
    /// Keep nodes referenced by a surviving way *or* carrying at least one
    /// tag (tagged points of interest survive even off the road network).
    Conservative,
    /// Keep only nodes referenced by a surviving way.
    Aggressive,
}

/// Run the full pipeline: driveability filter, node pruning, back-references.
pub fn prepare(data: &mut OsmData, mode: PruneMode) {
    retain_driveable(data);
    prune_nodes(data, mode);
    link_ways(data);
}

/// Drop every way a car may not drive on.
///
/// A way is driveable iff its `highway` value is not `cycleway` and none of
/// the `access`, `motorcar`, `motor_vehicle` tags forbid motor traffic.
pub fn retain_driveable(data: &mut OsmData) {
    let before = data.ways.len();
    data.ways.retain(|_, way| is_driveable(way));
    info!(
        "kept {} of {} ways after driveability filter",
        data.ways.len(),
        before
    );
}

fn is_driveable(way: &Way) -> bool {
    match way.tags.get("highway") {
        None => return false,
        Some(value) if value.as_str() == Some("cycleway") => return false,
        Some(_) => {}
    }
    for key in ["access", "motorcar", "motor_vehicle"] {
        if forbids_motor_traffic(way, key) {
            return false;
        }
    }
    true
}

fn forbids_motor_traffic(way: &Way, key: &str) -> bool {
    match way.tags.get(key) {
        // "no" coerces to Bool(false) at load time.
        Some(TagValue::Bool(false)) => true,
        Some(TagValue::Str(s)) => matches!(s.as_str(), "no" | "agricultural" | "delivery"),
        _ => false,
    }
}

/// Drop nodes no surviving way needs, per the chosen [`PruneMode`].
pub fn prune_nodes(data: &mut OsmData, mode: PruneMode) {
    let mut referenced = rustc_hash::FxHashSet::default();
    for way in data.ways.values() {
        referenced.extend(way.nodes.iter().copied());
    }

    let before = data.nodes.len();
    data.nodes.retain(|id, node| match mode {
        PruneMode::Conservative => referenced.contains(id) || !node.tags.is_empty(),
        PruneMode::Aggressive => referenced.contains(id),
    });
    info!(
        "kept {} of {} nodes after {:?} prune",
        data.nodes.len(),
        before,
        mode
    );
}

/// Populate each node's way back-reference list.
///
/// Every surviving way appends its id to every node it references, in
/// reference order.  Duplicates are preserved on purpose: a closed way
/// visits its anchor node twice, which is exactly what makes that node a
/// junction.  Existing lists are cleared first, so running the pipeline
/// twice yields the same result as running it once.
pub fn link_ways(data: &mut OsmData) {
    for node in data.nodes.values_mut() {
        node.ways.clear();
    }
    for way_id in data.sorted_way_ids() {
        let node_ids = data.ways[&way_id].nodes.clone();
        for node_id in node_ids {
            if let Some(node) = data.nodes.get_mut(&node_id) {
                node.ways.push(way_id);
            }
        }
    }
}
