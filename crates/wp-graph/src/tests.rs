//! Unit tests for wp-graph.
//!
//! Fixtures are tiny literal OSM documents pushed through the real loader
//! and filter pipeline, so the builder is always tested against the same
//! shape of data it sees in production.

#[cfg(test)]
mod fixtures {
    use wp_osm::{OsmData, PruneMode, parse_osm, prepare};

    use crate::SectionGraph;
    use crate::builder::build_graph;

    /// One straight residential road: A(0,0) — B(0,0.001) — C(0,0.002).
    pub const STRAIGHT: &str = r#"<osm version="0.6">
  <bounds minlat="-1" maxlat="1" minlon="-1" maxlon="1"/>
  <node id="1" lat="0" lon="0"/>
  <node id="2" lat="0" lon="0.001"/>
  <node id="3" lat="0" lon="0.002"/>
  <way id="1"><nd ref="1"/><nd ref="2"/><nd ref="3"/><tag k="highway" v="residential"/></way>
</osm>"#;

    /// T-junction: way 1 A-B-C, way 2 B-D, both bidirectional.
    pub const JUNCTION: &str = r#"<osm version="0.6">
  <bounds minlat="-1" maxlat="1" minlon="-1" maxlon="1"/>
  <node id="1" lat="0" lon="0"/>
  <node id="2" lat="0" lon="0.001"/>
  <node id="3" lat="0" lon="0.002"/>
  <node id="4" lat="0.001" lon="0.001"/>
  <way id="1"><nd ref="1"/><nd ref="2"/><nd ref="3"/><tag k="highway" v="residential"/></way>
  <way id="2"><nd ref="2"/><nd ref="4"/><tag k="highway" v="residential"/></way>
</osm>"#;

    /// Same T-junction but way 1 is a one-way alley.
    pub const ONEWAY: &str = r#"<osm version="0.6">
  <bounds minlat="-1" maxlat="1" minlon="-1" maxlon="1"/>
  <node id="1" lat="0" lon="0"/>
  <node id="2" lat="0" lon="0.001"/>
  <node id="3" lat="0" lon="0.002"/>
  <node id="4" lat="0.001" lon="0.001"/>
  <way id="1"><nd ref="1"/><nd ref="2"/><nd ref="3"/><tag k="highway" v="residential"/><tag k="oneway" v="true"/></way>
  <way id="2"><nd ref="2"/><nd ref="4"/><tag k="highway" v="residential"/></way>
</osm>"#;

    /// Closed triangle A-B-C-A with a spur at B.  Tagged as a roundabout in
    /// [`ROUNDABOUT`], untagged (plain closed way) in [`CLOSED_LOOP`].
    pub const ROUNDABOUT: &str = r#"<osm version="0.6">
  <bounds minlat="-1" maxlat="1" minlon="-1" maxlon="1"/>
  <node id="1" lat="0" lon="0"/>
  <node id="2" lat="0" lon="0.001"/>
  <node id="3" lat="0.001" lon="0.0005"/>
  <node id="4" lat="-0.001" lon="0.001"/>
  <way id="1"><nd ref="1"/><nd ref="2"/><nd ref="3"/><nd ref="1"/><tag k="highway" v="residential"/><tag k="junction" v="roundabout"/></way>
  <way id="2"><nd ref="2"/><nd ref="4"/><tag k="highway" v="residential"/></way>
</osm>"#;

    pub const CLOSED_LOOP: &str = r#"<osm version="0.6">
  <bounds minlat="-1" maxlat="1" minlon="-1" maxlon="1"/>
  <node id="1" lat="0" lon="0"/>
  <node id="2" lat="0" lon="0.001"/>
  <node id="3" lat="0.001" lon="0.0005"/>
  <node id="4" lat="-0.001" lon="0.001"/>
  <way id="1"><nd ref="1"/><nd ref="2"/><nd ref="3"/><nd ref="1"/><tag k="highway" v="residential"/></way>
  <way id="2"><nd ref="2"/><nd ref="4"/><tag k="highway" v="residential"/></way>
</osm>"#;

    pub fn prepared(xml: &str) -> OsmData {
        let mut data = parse_osm(xml).unwrap();
        prepare(&mut data, PruneMode::Aggressive);
        data
    }

    pub fn graph_from(xml: &str) -> SectionGraph {
        build_graph(&mut prepared(xml)).unwrap()
    }

    /// Every directed edge as a sorted list of `(from, to)` section names.
    pub fn edge_names(g: &SectionGraph) -> Vec<(String, String)> {
        let mut edges: Vec<(String, String)> = g
            .vertices()
            .flat_map(|v| {
                g.successors(v)
                    .iter()
                    .map(move |&s| (g.name(v), g.name(s)))
            })
            .collect();
        edges.sort();
        edges
    }
}

// ── Section naming ────────────────────────────────────────────────────────────

#[cfg(test)]
mod naming {
    use wp_core::{CoreError, WayId};

    use crate::section::parse_section_name;

    #[test]
    fn roundtrip() {
        assert_eq!(parse_section_name("6398654_5").unwrap(), (WayId(6398654), 5));
        assert_eq!(parse_section_name("1_0").unwrap(), (WayId(1), 0));
    }

    #[test]
    fn negative_way_id() {
        assert_eq!(parse_section_name("-42_3").unwrap(), (WayId(-42), 3));
    }

    #[test]
    fn malformed_names() {
        for bad in ["", "123", "_", "a_b", "1_-2", "1_2_x"] {
            assert!(
                matches!(
                    parse_section_name(bad),
                    Err(CoreError::MalformedSectionName(_))
                ),
                "{bad:?} should not parse"
            );
        }
    }
}

// ── Pass 1: sectioning ────────────────────────────────────────────────────────

#[cfg(test)]
mod sectioning {
    use wp_core::WayId;

    use crate::builder::build_graph;

    use super::fixtures::{self, edge_names};

    #[test]
    fn straight_road_is_one_section() {
        let g = fixtures::graph_from(fixtures::STRAIGHT);
        assert_eq!(g.section_count(), 1);
        assert_eq!(g.edge_count(), 0);

        let v = g.resolve("1_0").unwrap();
        let s = g.section(v);
        assert_eq!(s.start_node.0, 1);
        assert_eq!(s.end_node.0, 3);
        assert_eq!(s.path.len(), 3);
        // 0.002 degrees of longitude at the equator ≈ 222.4 m.
        assert!((s.length_m - 222.4).abs() < 0.5, "got {}", s.length_m);
    }

    #[test]
    fn two_node_way_is_the_whole_way() {
        let xml = r#"<osm version="0.6">
  <bounds minlat="-1" maxlat="1" minlon="-1" maxlon="1"/>
  <node id="1" lat="0" lon="0"/>
  <node id="2" lat="0" lon="0.001"/>
  <way id="1"><nd ref="1"/><nd ref="2"/><tag k="highway" v="residential"/></way>
</osm>"#;
        let g = fixtures::graph_from(xml);
        assert_eq!(g.section_count(), 1);
        let s = g.section(g.resolve("1_0").unwrap());
        assert_eq!((s.start_node.0, s.end_node.0), (1, 2));
    }

    #[test]
    fn junction_splits_and_wires_exactly() {
        let mut data = fixtures::prepared(fixtures::JUNCTION);
        let g = build_graph(&mut data).unwrap();

        assert_eq!(g.section_count(), 3);
        assert_eq!(data.ways[&WayId(1)].sections, 2);
        assert_eq!(data.ways[&WayId(2)].sections, 1);

        // 1_0 = A..B, 1_1 = B..C, 2_0 = B..D.  All pairs that meet at B are
        // connected in both directions; nothing else is.
        let expected: Vec<(String, String)> = [
            ("1_0", "1_1"),
            ("1_0", "2_0"),
            ("1_1", "1_0"),
            ("1_1", "2_0"),
            ("2_0", "1_0"),
            ("2_0", "1_1"),
        ]
        .iter()
        .map(|&(a, b)| (a.to_string(), b.to_string()))
        .collect();
        assert_eq!(edge_names(&g), expected);
    }

    #[test]
    fn dead_end_gets_trailing_section() {
        // Way 1 continues past its junction with way 2 into a dead end C.
        let g = fixtures::graph_from(fixtures::JUNCTION);
        let v = g.resolve("1_1").unwrap();
        let s = g.section(v);
        assert_eq!((s.start_node.0, s.end_node.0), (2, 3));
    }

    #[test]
    fn closed_non_roundabout_has_no_wraparound() {
        let g = fixtures::graph_from(fixtures::CLOSED_LOOP);
        // 1_0 = A..B, 1_1 = B..C..A (closed way; the doubled anchor node is
        // a junction), 2_0 = B..D.
        assert_eq!(g.section_count(), 3);
        let first = g.resolve("1_0").unwrap();
        let second = g.resolve("1_1").unwrap();
        // Bidirectional neighbours within the way, but no closure edge is
        // added beyond them.
        assert!(g.has_edge(first, second));
        assert!(g.has_edge(second, first));
        let s = g.section(second);
        assert_eq!(s.start_node.0, 2);
        assert_eq!(s.end_node.0, 1);
        assert_eq!(s.path.len(), 3); // B, C, A
    }
}

// ── One-way and roundabout semantics ──────────────────────────────────────────

#[cfg(test)]
mod directionality {
    use super::fixtures::{self, edge_names};

    #[test]
    fn oneway_has_no_intra_way_back_edges() {
        let g = fixtures::graph_from(fixtures::ONEWAY);
        let first = g.resolve("1_0").unwrap();
        let second = g.resolve("1_1").unwrap();
        assert!(g.has_edge(first, second));
        assert!(!g.has_edge(second, first));
    }

    #[test]
    fn oneway_alley_exact_edges() {
        let g = fixtures::graph_from(fixtures::ONEWAY);
        // Way 1 (one-way A→B→C) may only be exited through section ends, and
        // may only be entered at section starts.
        let expected: Vec<(String, String)> = [
            ("1_0", "1_1"), // forward along the alley
            ("1_0", "2_0"), // exit at B into the side road
            ("2_0", "1_1"), // side road may enter the alley at B, forward only
        ]
        .iter()
        .map(|&(a, b)| (a.to_string(), b.to_string()))
        .collect();
        assert_eq!(edge_names(&g), expected);
    }

    #[test]
    fn roundabout_sections_form_a_directed_cycle() {
        let g = fixtures::graph_from(fixtures::ROUNDABOUT);
        let expected: Vec<(String, String)> = [
            ("1_0", "1_1"), // around the ring
            ("1_0", "2_0"), // exit at B
            ("1_1", "1_0"), // closure edge: last section back to first
            ("2_0", "1_1"), // enter the ring at B, with the flow only
        ]
        .iter()
        .map(|&(a, b)| (a.to_string(), b.to_string()))
        .collect();
        assert_eq!(edge_names(&g), expected);
    }

    #[test]
    fn no_entry_against_roundabout_flow() {
        let g = fixtures::graph_from(fixtures::ROUNDABOUT);
        let spur = g.resolve("2_0").unwrap();
        let first = g.resolve("1_0").unwrap();
        // 1_0 ends at B, but the ring is one-way: the spur may not enter it
        // through that end.
        assert!(!g.has_edge(spur, first));
    }
}

// ── Structural invariants ─────────────────────────────────────────────────────

#[cfg(test)]
mod invariants {
    use wp_core::polyline_length_m;

    use crate::builder::build_graph;

    use super::fixtures;

    #[test]
    fn sections_tile_their_way() {
        let mut data = fixtures::prepared(fixtures::JUNCTION);
        let g = build_graph(&mut data).unwrap();

        for (&way_id, way) in &data.ways {
            assert!(way.sections >= 1, "way {way_id} has no sections");

            // Concatenating section paths (joints deduplicated) reproduces
            // the way's own polyline.
            let mut stitched = Vec::new();
            for index in 0..way.sections {
                let s = g.section(g.section_id(way_id, index).unwrap());
                let skip = usize::from(index > 0);
                stitched.extend_from_slice(&s.path[skip..]);
            }
            let original: Vec<_> =
                way.nodes.iter().map(|id| data.nodes[id].pos).collect();
            assert_eq!(stitched, original, "way {way_id}");
        }
    }

    #[test]
    fn section_length_matches_its_path() {
        let g = fixtures::graph_from(fixtures::ROUNDABOUT);
        for v in g.vertices() {
            let s = g.section(v);
            let expected = polyline_length_m(&s.path).unwrap();
            assert!((s.length_m - expected).abs() < 1e-6, "section {}", s.name());
            assert!(s.length_m > 0.0);
        }
    }

    #[test]
    fn rebuild_is_identical() {
        let a = fixtures::graph_from(fixtures::ROUNDABOUT);
        let b = fixtures::graph_from(fixtures::ROUNDABOUT);

        let names_a: Vec<String> = a.vertices().map(|v| a.name(v)).collect();
        let names_b: Vec<String> = b.vertices().map(|v| b.name(v)).collect();
        assert_eq!(names_a, names_b);
        assert_eq!(fixtures::edge_names(&a), fixtures::edge_names(&b));
    }
}

// ── Graph API ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod api {
    use wp_core::GeoPoint;

    use crate::error::GraphError;

    use super::fixtures;

    #[test]
    fn resolve_unknown_section() {
        let g = fixtures::graph_from(fixtures::STRAIGHT);
        assert!(matches!(
            g.resolve("99_0"),
            Err(GraphError::UnknownSection(_))
        ));
        assert!(matches!(
            g.resolve("1_7"),
            Err(GraphError::UnknownSection(_))
        ));
        assert!(matches!(
            g.resolve("gibberish"),
            Err(GraphError::UnknownSection(_))
        ));
    }

    #[test]
    fn successors_are_sorted_and_unique() {
        let g = fixtures::graph_from(fixtures::JUNCTION);
        for v in g.vertices() {
            let succ = g.successors(v);
            assert!(succ.windows(2).all(|w| w[0] < w[1]), "{}", g.name(v));
        }
    }

    #[test]
    fn snap_finds_the_nearest_section() {
        let g = fixtures::graph_from(fixtures::JUNCTION);
        // Right next to D (the tip of way 2's spur).
        let near_d = GeoPoint::new(0.0011, 0.001);
        let v = g.snap_to_section(near_d).unwrap();
        assert_eq!(g.name(v), "2_0");
    }
}
