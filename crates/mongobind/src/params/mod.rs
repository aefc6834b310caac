//! Form-submitted parameter handling: the flat bag, the schema-driven
//! value-repair walk, and expansion into the nested document the mapper
//! accepts.


use crate::{
    paths,
    schema::{Property, PropertyKind, Schema},
};
use derive_more::{Deref, DerefMut, IntoIterator};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

///
/// ParamBag
///
/// Flat form payload: dotted path → raw value, with nested indices encoded
/// in the path (`items.0.name`). Normalization mutates it in place;
/// `unflatten` expands it into the nested write payload.
///

#[derive(Clone, Debug, Default, Deref, DerefMut, Eq, IntoIterator, PartialEq)]
#[into_iterator(owned, ref)]
pub struct ParamBag(BTreeMap<String, Value>);

impl ParamBag {
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn set(&mut self, path: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(path.into(), value.into())
    }

    /// unflatten
    /// Expand into a nested document; all-digit path segments become array
    /// indices.
    #[must_use]
    pub fn unflatten(&self) -> Value {
        let mut root = Value::Object(Map::new());
        for (path, value) in &self.0 {
            paths::set_path(&mut root, path, value.clone());
        }

        root
    }

    /// normalize
    ///
    /// Repair form sentinels against the schema's property tree:
    /// - empty string at an identifier path → explicit null ("no reference")
    /// - empty string at an array path → empty sequence
    /// - empty string at an array element path → empty object
    /// - arrays of structured objects are walked index by index until the
    ///   bag runs out of keys under `path.<i>`
    /// - embedded objects are walked unconditionally
    ///
    /// Pure value repair: no I/O, no errors, never introduces a path the
    /// schema does not declare, and applying it twice equals applying it
    /// once. Malformed bags pass through where no rule applies.
    pub fn normalize(&mut self, schema: &Schema) {
        for property in schema.properties() {
            self.repair(property, "");
        }
    }

    fn repair(&mut self, property: &Property, prefix: &str) {
        let path = paths::join(prefix, &property.path);

        match &property.kind {
            PropertyKind::Id => {
                if self.holds_empty_string(&path) {
                    self.0.insert(path, Value::Null);
                }
            }

            PropertyKind::Array(children) => {
                if self.holds_empty_string(&path) {
                    self.0.insert(path, Value::Array(Vec::new()));
                } else if !children.is_empty() {
                    for index in 0usize.. {
                        let slot = format!("{path}.{index}");
                        if self.holds_empty_string(&slot) {
                            self.0.insert(slot, Value::Object(Map::new()));
                        } else if !self.0.keys().any(|key| key.starts_with(&slot)) {
                            // Past the last index of this array.
                            break;
                        } else {
                            for child in children {
                                self.repair(child, &slot);
                            }
                        }
                    }
                }
            }

            PropertyKind::Embedded(children) => {
                for child in children {
                    self.repair(child, &path);
                }
            }

            _ => {}
        }
    }

    fn holds_empty_string(&self, path: &str) -> bool {
        matches!(self.0.get(path), Some(Value::String(s)) if s.is_empty())
    }
}

impl From<BTreeMap<String, Value>> for ParamBag {
    fn from(entries: BTreeMap<String, Value>) -> Self {
        Self(entries)
    }
}

impl FromIterator<(String, Value)> for ParamBag {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
