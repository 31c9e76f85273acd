//! OSM tag model with value coercion.
//!
//! OSM tag values arrive as strings.  The loader coerces them once, at parse
//! time, and the rest of the system matches on [`TagValue`] variants:
//!
//! | Raw value                         | Coerced to      |
//! |-----------------------------------|-----------------|
//! | `true` / `yes` / `t` / `y`        | `Bool(true)`    |
//! | `false` / `no` / `f` / `n`        | `Bool(false)`   |
//! | integer-like (`42`, `-3`)         | `Int`           |
//! | parseable float (`13.5`)          | `Float`         |
//! | anything else                     | `Str`           |
//!
//! The coercion is observable: `oneway=yes` becomes `Bool(true)` and drives
//! the one-way predicate, `access=no` becomes `Bool(false)` and drives the
//! driveability filter.

use std::collections::BTreeMap;

/// A coerced OSM tag value.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TagValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl TagValue {
    /// Coerce a raw OSM tag value string.  Matching is case-insensitive for
    /// the boolean spellings.
    pub fn parse(raw: &str) -> TagValue {
        match raw.to_ascii_lowercase().as_str() {
            "true" | "yes" | "t" | "y" => return TagValue::Bool(true),
            "false" | "no" | "f" | "n" => return TagValue::Bool(false),
            _ => {}
        }
        if let Ok(i) = raw.parse::<i64>() {
            return TagValue::Int(i);
        }
        if let Ok(f) = raw.parse::<f64>() {
            return TagValue::Float(f);
        }
        TagValue::Str(raw.to_string())
    }

    /// `true` only for `Bool(true)`.
    #[inline]
    pub fn is_truthy(&self) -> bool {
        matches!(self, TagValue::Bool(true))
    }

    /// The string payload, if this value stayed a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TagValue::Str(s) => Some(s),
            _ => None,
        }
    }
}

// ── Tags ──────────────────────────────────────────────────────────────────────

/// Key→value map of an OSM element's tags.
///
/// Backed by a `BTreeMap` so iteration order is deterministic — graph builds
/// from identical inputs produce identical logs and identical vertex data.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tags(BTreeMap<String, TagValue>);

impl Tags {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Insert a raw value, coercing it per the table above.
    pub fn insert(&mut self, key: &str, raw_value: &str) {
        self.0.insert(key.to_string(), TagValue::parse(raw_value));
    }

    pub fn get(&self, key: &str) -> Option<&TagValue> {
        self.0.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// `true` if `key` is present and coerced to `Bool(true)`.
    pub fn is_truthy(&self, key: &str) -> bool {
        self.get(key).is_some_and(TagValue::is_truthy)
    }

    /// `true` if `key` is present as a string equal to `value`.
    pub fn str_eq(&self, key: &str, value: &str) -> bool {
        self.get(key).and_then(TagValue::as_str) == Some(value)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &TagValue)> {
        self.0.iter()
    }
}
