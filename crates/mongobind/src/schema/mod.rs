//! Schema-side property metadata. Derived once from the mapper's schema and
//! treated as read-only for the lifetime of the resource binding.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error as ThisError;

///
/// SchemaError
///

#[derive(Debug, ThisError)]
pub enum SchemaError {
    #[error("duplicate property path `{path}` within one schema level")]
    DuplicatePath { path: String },
}

///
/// PropertyKind
///
/// Declared semantic type of a schema field, as a fixed tagged dispatch:
/// no runtime type inspection happens anywhere downstream. `Array` and
/// `Embedded` carry their nested property lists; an array of plain scalars
/// carries an empty one.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyKind {
    Id,
    String,
    Date,
    DateTime,
    Array(Vec<Property>),
    Embedded(Vec<Property>),
    Scalar,
}

///
/// Property
///
/// Metadata for one schema field. `path` is relative to the enclosing
/// level: top-level entries may themselves be dotted (the mapper exposes
/// flattened nested paths), nested entries are single segments.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Property {
    pub path: String,
    pub kind: PropertyKind,
}

impl Property {
    #[must_use]
    pub fn new(path: impl Into<String>, kind: PropertyKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self.kind, PropertyKind::Array(_))
    }

    #[must_use]
    pub const fn is_embedded(&self) -> bool {
        matches!(self.kind, PropertyKind::Embedded(_))
    }

    /// Nested property list for array/embedded kinds; empty otherwise.
    #[must_use]
    pub fn children(&self) -> &[Property] {
        match &self.kind {
            PropertyKind::Array(children) | PropertyKind::Embedded(children) => children,
            _ => &[],
        }
    }
}

///
/// Schema
/// Ordered property list for one resource.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Schema {
    properties: Vec<Property>,
}

impl Schema {
    /// new
    /// Validates the per-level unique-path invariant before accepting the
    /// property list.
    pub fn new(properties: Vec<Property>) -> Result<Self, SchemaError> {
        validate_level(&properties)?;

        Ok(Self { properties })
    }

    #[must_use]
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    /// property
    /// Resolve a dotted path against the property tree. Array index
    /// segments in the path are skipped during descent, so `items.0.name`
    /// resolves the `name` child of the `items` array.
    #[must_use]
    pub fn property(&self, path: &str) -> Option<&Property> {
        resolve(&self.properties, path)
    }
}

fn validate_level(properties: &[Property]) -> Result<(), SchemaError> {
    let mut seen = BTreeSet::new();

    for property in properties {
        if !seen.insert(property.path.as_str()) {
            return Err(SchemaError::DuplicatePath {
                path: property.path.clone(),
            });
        }
        validate_level(property.children())?;
    }

    Ok(())
}

fn resolve<'a>(properties: &'a [Property], path: &str) -> Option<&'a Property> {
    // Exact match first: top-level paths may themselves be dotted.
    if let Some(found) = properties.iter().find(|p| p.path == path) {
        return Some(found);
    }

    let (head, mut rest) = path.split_once('.')?;
    let parent = properties.iter().find(|p| p.path == head)?;

    if parent.is_array() {
        match rest.split_once('.') {
            Some((index, tail)) if is_index(index) => rest = tail,
            None if is_index(rest) => return Some(parent),
            _ => {}
        }
    }

    resolve(parent.children(), rest)
}

fn is_index(segment: &str) -> bool {
    !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit())
}

///
/// TESTS
///
