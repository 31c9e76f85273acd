//! Section vertex attributes and the section naming scheme.
//!
//! A *section* is a maximal sub-polyline of a way between two consecutive
//! junctions (or way endpoints) — the unit vertex of the routing graph.
//! Sections are identified externally by the wire format `"<way>_<index>"`
//! (`"6398654_5"` is the sixth section of way 6398654) and internally by a
//! dense [`SectionId`].

use std::sync::Arc;

use wp_core::{CoreError, CoreResult, GeoPoint, NodeId, Tags, WayId};

/// Attributes of one section vertex.
#[derive(Clone, Debug)]
pub struct Section {
    /// The originating way.
    pub way: WayId,
    /// 0-based position of this section within its way, monotonic in the
    /// way's node order.
    pub index: u32,
    /// Bounding node ids, in the way's node order.
    pub start_node: NodeId,
    pub end_node: NodeId,
    /// Geodesic length of the section in metres.
    pub length_m: f64,
    /// Section geometry; first point at `start_node`, last at `end_node`.
    pub path: Vec<GeoPoint>,
    /// The originating way's tags, shared between sibling sections.
    pub tags: Arc<Tags>,
    /// Cached one-way predicate of the originating way.
    pub oneway: bool,
}

impl Section {
    /// First point of the geometry.  O(1); the path is never empty.
    #[inline]
    pub fn start_point(&self) -> GeoPoint {
        self.path[0]
    }

    /// Last point of the geometry.  O(1).
    #[inline]
    pub fn end_point(&self) -> GeoPoint {
        self.path[self.path.len() - 1]
    }

    /// The observable wire format, `"<way>_<index>"`.
    pub fn name(&self) -> String {
        format!("{}_{}", self.way, self.index)
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}_{}", self.way, self.index)
    }
}

/// Parse the `"<way>_<index>"` wire format back into its parts.
///
/// Splits on the *last* underscore so negative way ids (OSM editors use them
/// for unsaved objects) round-trip.
///
/// # Errors
///
/// [`CoreError::MalformedSectionName`] when either half fails to parse.
pub fn parse_section_name(name: &str) -> CoreResult<(WayId, u32)> {
    let malformed = || CoreError::MalformedSectionName(name.to_string());
    let (way, index) = name.rsplit_once('_').ok_or_else(malformed)?;
    let way = way.parse::<i64>().map_err(|_| malformed())?;
    let index = index.parse::<u32>().map_err(|_| malformed())?;
    Ok((WayId(way), index))
}
