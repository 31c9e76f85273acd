//! The side-entry rule.
//!
//! A section is travelled end to end: a vehicle that entered at one endpoint
//! may only leave through the opposite one.  The raw successor sets in the
//! graph are side-agnostic (they enumerate every legal entry around both
//! endpoints), so the planner filters them against the side the current
//! section was entered on.  Without this rule a path could "bounce back"
//! out of the endpoint it just came through, effectively reversing inside a
//! section.

use wp_core::SectionId;
use wp_graph::SectionGraph;

/// Which endpoint of a section a path entered it through.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Side {
    Start,
    End,
}

/// Determine which side `current` was entered on, given the predecessor
/// section on the path.
///
/// `current.start_node` touching either endpoint of `prev` means the path
/// came in at the start; otherwise it came in at the end.
pub fn entered_side(graph: &SectionGraph, prev: SectionId, current: SectionId) -> Side {
    let c = graph.section(current);
    let p = graph.section(prev);
    if c.start_node == p.start_node || c.start_node == p.end_node {
        Side::Start
    } else {
        Side::End
    }
}

/// `true` if `neighbour` is reachable through the exit endpoint of
/// `current` — the endpoint opposite to `entered`.
pub fn may_exit_into(
    graph: &SectionGraph,
    entered: Side,
    current: SectionId,
    neighbour: SectionId,
) -> bool {
    let c = graph.section(current);
    let exit_node = match entered {
        Side::Start => c.end_node,
        Side::End => c.start_node,
    };
    let n = graph.section(neighbour);
    n.start_node == exit_node || n.end_node == exit_node
}
