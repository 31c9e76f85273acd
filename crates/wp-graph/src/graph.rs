//! Section graph representation and low-level builder.
//!
//! # Data layout
//!
//! Out-edges use **Compressed Sparse Row (CSR)** format.  Given a
//! `SectionId v`, its successors occupy the slice:
//!
//! ```text
//! out_to[ out_start[v.index()] .. out_start[v.index() + 1] ]
//! ```
//!
//! sorted and duplicate-free.  A successor slice is a contiguous memory
//! scan — ideal for the A* inner loop.  Edges carry no attributes: the cost
//! of leaving a section is that section's own length.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) over every section's two endpoints maps a
//! `(lat, lon)` to the nearest section.  Used by callers to snap free-form
//! coordinates to a graph vertex.

use rstar::{AABB, PointDistance, RTree, RTreeObject};
use rustc_hash::{FxHashMap, FxHashSet};

use wp_core::{GeoPoint, SectionId, WayId};

use crate::error::{GraphError, GraphResult};
use crate::section::{Section, parse_section_name};

// ── R-tree endpoint entry ─────────────────────────────────────────────────────

/// Entry stored in the R-tree spatial index: one endpoint of a section.
#[derive(Clone)]
struct EndpointEntry {
    point: [f64; 2], // [lat, lon]
    id: SectionId,
}

impl RTreeObject for EndpointEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for EndpointEntry {
    /// Squared Euclidean distance in lat/lon space.  Sufficient for
    /// nearest-section queries within a city-scale extract.
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dlat = self.point[0] - point[0];
        let dlon = self.point[1] - point[1];
        dlat * dlat + dlon * dlon
    }
}

// ── SectionGraph ──────────────────────────────────────────────────────────────

/// Immutable directed graph of road sections.
///
/// Do not construct directly; use [`SectionGraphBuilder`] (or the two-pass
/// [`crate::builder::build_graph`]).  Once built, the graph is read-only and
/// safely shareable across threads for concurrent queries.
pub struct SectionGraph {
    /// Vertex attributes, indexed by `SectionId`.
    sections: Vec<Section>,

    /// CSR row pointer.  Successors of vertex `v` are at
    /// `out_to[out_start[v] .. out_start[v + 1]]`.  Length = vertex count + 1.
    out_start: Vec<u32>,

    /// CSR column array: destination of each directed edge, sorted within
    /// each row, duplicate-free.
    out_to: Vec<SectionId>,

    /// `(way, index)` → dense vertex id, for resolving the wire format.
    lookup: FxHashMap<(WayId, u32), SectionId>,

    /// R-tree over section endpoints.
    spatial_idx: RTree<EndpointEntry>,
}

impl SectionGraph {
    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    pub fn edge_count(&self) -> usize {
        self.out_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    // ── Vertex access ─────────────────────────────────────────────────────

    /// Attributes of a vertex.
    #[inline]
    pub fn section(&self, v: SectionId) -> &Section {
        &self.sections[v.index()]
    }

    /// Iterator over every vertex id.
    pub fn vertices(&self) -> impl Iterator<Item = SectionId> + '_ {
        (0..self.sections.len() as u32).map(SectionId)
    }

    /// The wire-format name of a vertex.
    pub fn name(&self, v: SectionId) -> String {
        self.sections[v.index()].name()
    }

    /// Resolve a `"<way>_<index>"` name to its vertex id.
    ///
    /// # Errors
    ///
    /// [`GraphError::UnknownSection`] when the name is malformed or names a
    /// section this graph does not contain.
    pub fn resolve(&self, name: &str) -> GraphResult<SectionId> {
        let key = parse_section_name(name)
            .map_err(|_| GraphError::UnknownSection(name.to_string()))?;
        self.lookup
            .get(&key)
            .copied()
            .ok_or_else(|| GraphError::UnknownSection(name.to_string()))
    }

    /// Vertex id of a specific section of a way, if it exists.
    pub fn section_id(&self, way: WayId, index: u32) -> Option<SectionId> {
        self.lookup.get(&(way, index)).copied()
    }

    // ── Traversal ─────────────────────────────────────────────────────────

    /// Successors of `v`: every section a vehicle may enter after finishing
    /// traversal of `v`.  Sorted, duplicate-free, contiguous.
    #[inline]
    pub fn successors(&self, v: SectionId) -> &[SectionId] {
        let start = self.out_start[v.index()] as usize;
        let end = self.out_start[v.index() + 1] as usize;
        &self.out_to[start..end]
    }

    /// `true` if the directed edge `from → to` exists.
    pub fn has_edge(&self, from: SectionId, to: SectionId) -> bool {
        self.successors(from).binary_search(&to).is_ok()
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// The section with an endpoint nearest to `pos`.
    ///
    /// Returns `None` only if the graph has no sections.
    pub fn snap_to_section(&self, pos: GeoPoint) -> Option<SectionId> {
        self.spatial_idx
            .nearest_neighbor(&[pos.lat, pos.lon])
            .map(|e| e.id)
    }
}

// ── SectionGraphBuilder ───────────────────────────────────────────────────────

/// Construct a [`SectionGraph`] incrementally, then call [`build`](Self::build).
///
/// Vertices are appended in insertion order; edges are accumulated with
/// **set semantics** — [`add_edge`](Self::add_edge) reports whether the edge
/// was new, and re-adding an existing edge is a no-op.  `build()` sorts the
/// edges into CSR form and bulk-loads the R-tree.
pub struct SectionGraphBuilder {
    sections: Vec<Section>,
    lookup: FxHashMap<(WayId, u32), SectionId>,
    edges: Vec<(SectionId, SectionId)>,
    edge_set: FxHashSet<(SectionId, SectionId)>,
}

impl SectionGraphBuilder {
    pub fn new() -> Self {
        Self {
            sections: Vec::new(),
            lookup: FxHashMap::default(),
            edges: Vec::new(),
            edge_set: FxHashSet::default(),
        }
    }

    /// Pre-allocate for the expected number of sections and edges to reduce
    /// reallocations when bulk-loading from OSM.
    pub fn with_capacity(sections: usize, edges: usize) -> Self {
        Self {
            sections: Vec::with_capacity(sections),
            lookup: FxHashMap::default(),
            edges: Vec::with_capacity(edges),
            edge_set: FxHashSet::default(),
        }
    }

    /// Add a section vertex and return its dense id.
    pub fn add_section(&mut self, section: Section) -> SectionId {
        let id = SectionId(self.sections.len() as u32);
        self.lookup.insert((section.way, section.index), id);
        self.sections.push(section);
        id
    }

    /// Add a directed edge.  Returns `false` (and changes nothing) if the
    /// edge already exists.
    pub fn add_edge(&mut self, from: SectionId, to: SectionId) -> bool {
        if !self.edge_set.insert((from, to)) {
            return false;
        }
        self.edges.push((from, to));
        true
    }

    /// Attributes of an already-added section.
    pub fn section(&self, id: SectionId) -> &Section {
        &self.sections[id.index()]
    }

    /// Dense id of a way's section, if it has been added.
    pub fn section_id(&self, way: WayId, index: u32) -> Option<SectionId> {
        self.lookup.get(&(way, index)).copied()
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Consume the builder and produce a [`SectionGraph`].
    ///
    /// Time complexity: O(E log E) for the edge sort + O(V log V) for the
    /// R-tree bulk load.
    pub fn build(self) -> SectionGraph {
        let section_count = self.sections.len();

        // Sort edges by source, then destination, for CSR construction and
        // binary-searchable successor slices.
        let mut edges = self.edges;
        edges.sort_unstable();

        let out_to: Vec<SectionId> = edges.iter().map(|&(_, to)| to).collect();

        // Build CSR row pointer.
        let mut out_start = vec![0u32; section_count + 1];
        for &(from, _) in &edges {
            out_start[from.index() + 1] += 1;
        }
        for i in 1..=section_count {
            out_start[i] += out_start[i - 1];
        }
        debug_assert_eq!(out_start[section_count] as usize, out_to.len());

        // Bulk-load the R-tree over both endpoints of every section.
        let entries: Vec<EndpointEntry> = self
            .sections
            .iter()
            .enumerate()
            .flat_map(|(i, s)| {
                let id = SectionId(i as u32);
                let a = s.start_point();
                let b = s.end_point();
                [
                    EndpointEntry { point: [a.lat, a.lon], id },
                    EndpointEntry { point: [b.lat, b.lon], id },
                ]
            })
            .collect();
        let spatial_idx = RTree::bulk_load(entries);

        SectionGraph {
            sections: self.sections,
            out_start,
            out_to,
            lookup: self.lookup,
            spatial_idx,
        }
    }
}

impl Default for SectionGraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}
