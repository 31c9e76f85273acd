//! Raw in-memory OSM model: nodes, ways, and the loaded document.
//!
//! The model is mutated only by the filtering passes in [`crate::filter`];
//! the graph builder consumes it read-mostly (it bumps each way's section
//! counter while splitting).

use rustc_hash::FxHashMap;

use wp_core::{Bounds, GeoPoint, NodeId, Tags, WayId};

/// A raw OSM point.
#[derive(Clone, Debug)]
pub struct Node {
    pub id: NodeId,
    pub pos: GeoPoint,
    pub tags: Tags,
    /// Ids of surviving ways that reference this node, in reference order.
    ///
    /// Deliberately a `Vec`, not a set: a closed way visits its anchor node
    /// twice and must appear here twice, so that `ways.len() > 1` correctly
    /// identifies the node as a junction.  Populated by
    /// [`crate::filter::link_ways`].
    pub ways: Vec<WayId>,
}

impl Node {
    pub fn new(id: NodeId, pos: GeoPoint) -> Self {
        Self { id, pos, tags: Tags::new(), ways: Vec::new() }
    }

    /// A node referenced by two or more ways (or twice by one closed way)
    /// is a junction — the split point between road sections.
    #[inline]
    pub fn is_junction(&self) -> bool {
        self.ways.len() > 1
    }
}

/// A raw OSM polyline.
#[derive(Clone, Debug)]
pub struct Way {
    pub id: WayId,
    pub tags: Tags,
    /// Ordered node references; always ≥ 2 after loading.
    pub nodes: Vec<NodeId>,
    /// Number of sections this way has been split into.  Zero until the
    /// graph builder runs.
    pub sections: u32,
}

impl Way {
    pub fn new(id: WayId) -> Self {
        Self { id, tags: Tags::new(), nodes: Vec::new(), sections: 0 }
    }

    /// A way drivable in only the direction its node list defines.
    ///
    /// Explicit `oneway` truthy tags count, and roundabouts are one-way by
    /// OSM convention whether tagged or not.
    pub fn is_oneway(&self) -> bool {
        self.tags.is_truthy("oneway") || self.tags.str_eq("junction", "roundabout")
    }

    /// `true` if the way's node list returns to its first node.
    pub fn is_closed(&self) -> bool {
        self.nodes.len() >= 2 && self.nodes.first() == self.nodes.last()
    }

    /// A closed `junction=roundabout` way.
    pub fn is_roundabout(&self) -> bool {
        self.is_closed() && self.tags.str_eq("junction", "roundabout")
    }
}

// ── OsmData ───────────────────────────────────────────────────────────────────

/// Everything loaded from one OSM XML document.
#[derive(Clone, Debug)]
pub struct OsmData {
    pub nodes: FxHashMap<NodeId, Node>,
    pub ways: FxHashMap<WayId, Way>,
    pub bounds: Bounds,
    /// The OSM API version declared on the root element.
    pub api_version: String,
}

impl OsmData {
    /// Way ids in ascending order — the deterministic iteration order used
    /// by the filtering passes and the graph builder.
    pub fn sorted_way_ids(&self) -> Vec<WayId> {
        let mut ids: Vec<WayId> = self.ways.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}
