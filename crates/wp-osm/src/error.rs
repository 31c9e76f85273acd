//! OSM-subsystem error type.

use thiserror::Error;

/// Errors produced by `wp-osm`.
#[derive(Debug, Error)]
pub enum OsmError {
    #[error("XML parse error: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The document has no `<bounds>` element.
    #[error("OSM document is missing its <bounds> element")]
    MissingBounds,

    /// A required attribute is absent from an element.
    #[error("<{element}> element is missing required attribute {attribute:?}")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },

    /// An attribute that must be numeric failed to parse.
    #[error("<{element}> attribute {attribute:?} is not numeric: {value:?}")]
    BadNumber {
        element: &'static str,
        attribute: &'static str,
        value: String,
    },
}

/// Shorthand result type for `wp-osm`.
pub type OsmResult<T> = Result<T, OsmError>;
