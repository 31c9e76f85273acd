//! `wp-osm` — OSM XML loading and road filtering.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                |
//! |--------------|---------------------------------------------------------|
//! | [`elements`] | `Node`, `Way`, `OsmData`                                |
//! | [`reader`]   | `read_osm_file` / `parse_osm` (roxmltree)               |
//! | [`filter`]   | `retain_driveable`, `prune_nodes`, `link_ways`          |
//! | [`error`]    | `OsmError`, `OsmResult<T>`                              |

pub mod elements;
pub mod error;
pub mod filter;
pub mod reader;


pub use elements::{Node, OsmData, Way};
pub use error::{OsmError, OsmResult};
pub use filter::{PruneMode, link_ways, prepare, prune_nodes, retain_driveable};
pub use reader::{parse_osm, read_osm_file};
