//! Two-pass transformation of filtered OSM data into a [`SectionGraph`].
//!
//! # Algorithm
//!
//! **Pass 1 — sectioning.**  Each way is split at its junction nodes (nodes
//! whose back-reference list holds more than one way id).  Every stretch
//! between consecutive junctions becomes a section vertex; a way with no
//! internal junction yields one section spanning the whole way.  Consecutive
//! sections of the same way are wired forward, and also backward when the
//! way is bidirectional.  A closed `junction=roundabout` way additionally
//! gets an edge from its last section back to its first, closing the cycle.
//!
//! **Pass 2 — inter-way wiring.**  Every section is connected *outward*
//! through its legal exit endpoints: the end node always, the start node
//! only when the section's way is bidirectional.  At each exit node, edges
//! go to every other-way section that may legally be entered there — at its
//! start always, at its end only when that way is bidirectional.
//!
//! Because every section is visited from both sides (or only its legal exit
//! side when one-way), an edge A → B exists iff a vehicle finishing A at a
//! node may begin B from that node in B's legal direction.
//!
//! The builder is total over malformed geometry: zero-length or repeated
//! nodes pass through on best effort, and duplicate edge additions are
//! silent no-ops everywhere except the roundabout closure, which warns.

use std::sync::Arc;

use log::{info, warn};

use wp_core::{GeoPoint, NodeId, WayId, polyline_length_m};
use wp_osm::OsmData;

use crate::error::GraphResult;
use crate::graph::{SectionGraph, SectionGraphBuilder};
use crate::section::Section;

/// Build the directed section graph from filtered OSM data.
///
/// Requires the filtering pipeline (driveability, pruning, back-references)
/// to have run; without back-references every way collapses into a single
/// unconnected section.  Each way's `sections` counter is set as a side
/// effect.  Ways are visited in ascending id order so identical inputs
/// produce identical graphs.
///
/// # Errors
///
/// [`wp_core::CoreError::DegenerateGeometry`] (via `GraphError`) if a
/// section with fewer than two path points is ever emitted — a well-formed
/// input cannot produce one.
pub fn build_graph(data: &mut OsmData) -> GraphResult<SectionGraph> {
    let way_ids = data.sorted_way_ids();
    let mut b = SectionGraphBuilder::with_capacity(way_ids.len() * 2, way_ids.len() * 4);

    // ── Pass 1: split ways into sections between junctions ────────────────
    info!("splitting {} ways into sections", way_ids.len());
    for &way_id in &way_ids {
        let emitted = section_way(&mut b, data, way_id)?;
        if let Some(way) = data.ways.get_mut(&way_id) {
            way.sections = emitted;
        }
    }

    // ── Pass 2: connect ways to other ways ────────────────────────────────
    info!("connecting {} sections across ways", b.section_count());
    for &way_id in &way_ids {
        let way = &data.ways[&way_id];
        let oneway = way.is_oneway();
        for index in 0..way.sections {
            let Some(sid) = b.section_id(way_id, index) else {
                continue;
            };
            let (start, end) = {
                let s = b.section(sid);
                (s.start_node, s.end_node)
            };
            // Only the end of a one-way section is a legal exit.
            if !oneway {
                wire(&mut b, data, way_id, sid, start);
            }
            wire(&mut b, data, way_id, sid, end);
        }
    }

    let graph = b.build();
    info!(
        "built graph with {} sections and {} edges",
        graph.section_count(),
        graph.edge_count()
    );
    Ok(graph)
}

// ── Pass 1 internals ──────────────────────────────────────────────────────────

/// Split one way into sections; returns the number emitted.
fn section_way(
    b: &mut SectionGraphBuilder,
    data: &OsmData,
    way_id: WayId,
) -> GraphResult<u32> {
    let way = &data.ways[&way_id];
    let nodes = &way.nodes;
    let oneway = way.is_oneway();
    let tags = Arc::new(way.tags.clone());

    let mut emitted = 0u32;
    // The first node is also the first junction of the way.
    let mut last_junction = 0usize;

    for idx in 1..nodes.len() {
        let is_junction = data
            .nodes
            .get(&nodes[idx])
            .is_some_and(|n| n.is_junction());
        if is_junction {
            emit_section(b, data, way_id, last_junction, idx, &tags, oneway, &mut emitted)?;
            last_junction = idx;
        }
    }

    // Trailing stretch after the last junction — covers dead ends and ways
    // with no internal junction at all.
    if nodes[last_junction] != nodes[nodes.len() - 1] {
        emit_section(
            b,
            data,
            way_id,
            last_junction,
            nodes.len() - 1,
            &tags,
            oneway,
            &mut emitted,
        )?;
    }

    // A closed roundabout cycles back from its last section to its first.
    if way.is_roundabout() && emitted > 0 {
        let first = b.section_id(way_id, 0);
        let last = b.section_id(way_id, emitted - 1);
        if let (Some(first), Some(last)) = (first, last) {
            if !b.add_edge(last, first) {
                warn!("roundabout way {way_id} already had its closure edge; malformed closed way?");
            }
        }
    }

    Ok(emitted)
}

/// Emit the section spanning node indices `i..=j` of a way, wiring it to its
/// predecessor section.  The indices (not node ids) delimit the stretch, so
/// a closed way whose first and last node coincide picks the correct
/// occurrence.
#[allow(clippy::too_many_arguments)]
fn emit_section(
    b: &mut SectionGraphBuilder,
    data: &OsmData,
    way_id: WayId,
    i: usize,
    j: usize,
    tags: &Arc<wp_core::Tags>,
    oneway: bool,
    emitted: &mut u32,
) -> GraphResult<()> {
    let nodes = &data.ways[&way_id].nodes;
    let path: Vec<GeoPoint> = nodes[i..=j]
        .iter()
        .filter_map(|id| data.nodes.get(id).map(|n| n.pos))
        .collect();
    let length_m = polyline_length_m(&path)?;

    let index = *emitted;
    let id = b.add_section(Section {
        way: way_id,
        index,
        start_node: nodes[i],
        end_node: nodes[j],
        length_m,
        path,
        tags: Arc::clone(tags),
        oneway,
    });

    // Wire consecutive sections of the same way.
    if index > 0 {
        if let Some(prev) = b.section_id(way_id, index - 1) {
            b.add_edge(prev, id);
            if !oneway {
                b.add_edge(id, prev);
            }
        }
    }

    *emitted += 1;
    Ok(())
}

// ── Pass 2 internals ──────────────────────────────────────────────────────────

/// Connect section `sid` of `way_id` outward through its endpoint `v` to
/// every other-way section that may legally be entered at `v`.
fn wire(
    b: &mut SectionGraphBuilder,
    data: &OsmData,
    way_id: WayId,
    sid: wp_core::SectionId,
    v: NodeId,
) {
    let Some(node) = data.nodes.get(&v) else {
        return;
    };
    for &other_way in &node.ways {
        // Same-way connections were made during sectioning; redoing them
        // here would also self-connect single-section ways.
        if other_way == way_id {
            continue;
        }
        let Some(way) = data.ways.get(&other_way) else {
            continue;
        };
        let other_oneway = way.is_oneway();
        for other_index in 0..way.sections {
            let Some(other) = b.section_id(other_way, other_index) else {
                continue;
            };
            let (other_start, other_end) = {
                let s = b.section(other);
                (s.start_node, s.end_node)
            };
            // Entering another section at its start is always legal; at its
            // end only when that way is bidirectional.
            if other_start == v {
                b.add_edge(sid, other);
            } else if other_end == v && !other_oneway {
                b.add_edge(sid, other);
            }
        }
    }
}
