//! OSM XML reader.
//!
//! Parses a whole `.osm` document with `roxmltree` and scrapes bounds, nodes
//! and ways into [`OsmData`].  Per the OSM XML convention elements arrive in
//! order — nodes before the ways that reference them — so `<nd>` references
//! are resolved in a single pass.
//!
//! Ways without a `highway` tag (buildings, lakes, field outlines) are
//! useless for routing and are dropped here rather than loaded and filtered
//! later.  References to unknown nodes are silently skipped, matching how
//! clipped extracts truncate ways at the region border.

use std::path::Path;
use std::str::FromStr;

use log::{debug, info};
use rustc_hash::FxHashMap;

use wp_core::{Bounds, GeoPoint, NodeId, Tags, WayId};

use crate::elements::{Node, OsmData, Way};
use crate::error::{OsmError, OsmResult};

/// Load an OSM XML file from disk.
///
/// # Errors
///
/// [`OsmError::Io`] on file errors, [`OsmError::Xml`] on malformed XML, and
/// the structural variants when the document lacks a `version` attribute or
/// a `<bounds>` element.
pub fn read_osm_file(path: &Path) -> OsmResult<OsmData> {
    let text = std::fs::read_to_string(path)?;
    parse_osm(&text)
}

/// Parse an OSM XML document from a string.
pub fn parse_osm(text: &str) -> OsmResult<OsmData> {
    let doc = roxmltree::Document::parse(text)?;
    let root = doc.root_element();

    let api_version = attr(root, "osm", "version")?.to_string();
    info!("loading OSM document, API version {api_version}");

    let mut nodes: FxHashMap<NodeId, Node> = FxHashMap::default();
    let mut ways: FxHashMap<WayId, Way> = FxHashMap::default();
    let mut bounds: Option<Bounds> = None;

    let mut unused_ways = 0usize;
    let mut dangling_refs = 0usize;

    for elem in root.children().filter(|c| c.is_element()) {
        match elem.tag_name().name() {
            "bounds" => {
                bounds = Some(Bounds::new(
                    num_attr(elem, "bounds", "minlat")?,
                    num_attr(elem, "bounds", "maxlat")?,
                    num_attr(elem, "bounds", "minlon")?,
                    num_attr(elem, "bounds", "maxlon")?,
                ));
            }
            "node" => {
                let id = NodeId(num_attr(elem, "node", "id")?);
                let pos = GeoPoint::new(
                    num_attr(elem, "node", "lat")?,
                    num_attr(elem, "node", "lon")?,
                );
                let mut node = Node::new(id, pos);
                node.tags = read_tags(elem)?;
                nodes.insert(id, node);
            }
            "way" => {
                let id = WayId(num_attr(elem, "way", "id")?);
                let tags = read_tags(elem)?;
                // Non-highway ways never reach the model.
                if !tags.contains("highway") {
                    unused_ways += 1;
                    continue;
                }
                let mut way = Way::new(id);
                way.tags = tags;
                for child in elem.children().filter(|c| c.is_element()) {
                    if child.tag_name().name() != "nd" {
                        continue;
                    }
                    let node_id = NodeId(num_attr(child, "nd", "ref")?);
                    if nodes.contains_key(&node_id) {
                        way.nodes.push(node_id);
                    } else {
                        dangling_refs += 1;
                    }
                }
                // A way clipped down to fewer than two nodes has no geometry.
                if way.nodes.len() >= 2 {
                    ways.insert(id, way);
                }
            }
            _ => {}
        }
    }

    let bounds = bounds.ok_or(OsmError::MissingBounds)?;
    info!(
        "found {} nodes and {} ways within {}",
        nodes.len(),
        ways.len(),
        bounds
    );
    if unused_ways > 0 || dangling_refs > 0 {
        debug!("skipped {unused_ways} non-highway ways, {dangling_refs} dangling <nd> refs");
    }

    Ok(OsmData { nodes, ways, bounds, api_version })
}

// ── Attribute helpers ─────────────────────────────────────────────────────────

fn attr<'a>(
    elem: roxmltree::Node<'a, '_>,
    element: &'static str,
    attribute: &'static str,
) -> OsmResult<&'a str> {
    elem.attribute(attribute)
        .ok_or(OsmError::MissingAttribute { element, attribute })
}

fn num_attr<T: FromStr>(
    elem: roxmltree::Node<'_, '_>,
    element: &'static str,
    attribute: &'static str,
) -> OsmResult<T> {
    let raw = attr(elem, element, attribute)?;
    raw.parse().map_err(|_| OsmError::BadNumber {
        element,
        attribute,
        value: raw.to_string(),
    })
}

fn read_tags(elem: roxmltree::Node<'_, '_>) -> OsmResult<Tags> {
    let mut tags = Tags::new();
    for child in elem.children().filter(|c| c.is_element()) {
        if child.tag_name().name() == "tag" {
            let key = attr(child, "tag", "k")?;
            let value = attr(child, "tag", "v")?;
            tags.insert(key, value);
        }
    }
    Ok(tags)
}
