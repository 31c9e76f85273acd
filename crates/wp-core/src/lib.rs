//! `wp-core` — foundational types for the wayplan route planner.
//!
//! This crate is a dependency of every other `wp-*` crate.  It intentionally
//! has no `wp-*` dependencies and minimal external ones (only `thiserror`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module    | Contents                                                 |
//! |-----------|----------------------------------------------------------|
//! | [`ids`]   | `SectionId` (dense), `NodeId` / `WayId` (raw OSM)        |
//! | [`geo`]   | `GeoPoint`, haversine distance, polyline length, `Bounds`|
//! | [`tags`]  | `TagValue` coercion, `Tags` map                          |
//! | [`error`] | `CoreError`, `CoreResult`                                |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod ids;
pub mod tags;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geo::{Bounds, GeoPoint, polyline_length_m};
pub use ids::{NodeId, SectionId, WayId};
pub use tags::{TagValue, Tags};
