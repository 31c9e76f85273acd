//! `wp-graph` — the directed routing graph of road sections.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`section`] | `Section` vertex attributes, section-name wire format     |
//! | [`graph`]   | `SectionGraph` (CSR + R-tree), `SectionGraphBuilder`      |
//! | [`builder`] | `build_graph` — the two-pass OSM→graph transformation     |
//! | [`error`]   | `GraphError`, `GraphResult<T>`                            |

pub mod builder;
pub mod error;
pub mod graph;
pub mod section;

#[cfg(test)]
mod tests;

pub use builder::build_graph;
pub use error::{GraphError, GraphResult};
pub use graph::{SectionGraph, SectionGraphBuilder};
pub use section::{Section, parse_section_name};
