//! Canonical filter clause model. Both front-end encodings the framework
//! emits (structured operator objects and suffix-encoded form keys) lower
//! into this shape before anything reaches the translator.

mod convert;

#[cfg(test)]
mod tests;

pub use convert::{QueryDocument, convert_filter, match_nothing};

use crate::schema::Schema;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

///
/// TextOperator
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TextOperator {
    StartsWith,
    EndsWith,
    Contains,
}

impl TextOperator {
    /// Key used by the structured front-end encoding.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::StartsWith => "starts_with",
            Self::EndsWith => "ends_with",
            Self::Contains => "contains",
        }
    }
}

///
/// FilterValue
/// Payload of one clause.
///

#[derive(Clone, Debug, PartialEq)]
pub enum FilterValue {
    /// Plain value, compared per the property type's default rule.
    Scalar(Value),
    /// Pattern constraint on a text field.
    Text { op: TextOperator, term: String },
    /// Range constraint. Lowering only produces this with at least one
    /// bound present; a boundless range falls back to equality handling.
    Range {
        from: Option<Value>,
        to: Option<Value>,
    },
}

impl FilterValue {
    /// from_raw
    /// Lower a structured operator object into the canonical shape. Only
    /// string payloads under `starts_with`/`ends_with`/`contains` count as
    /// text operators, and a range needs `from` or `to` present; anything
    /// else stays a scalar payload.
    #[must_use]
    pub fn from_raw(value: Value) -> Self {
        if let Value::Object(map) = &value {
            for op in [
                TextOperator::StartsWith,
                TextOperator::EndsWith,
                TextOperator::Contains,
            ] {
                if let Some(Value::String(term)) = map.get(op.key()) {
                    return Self::Text {
                        op,
                        term: term.clone(),
                    };
                }
            }

            let from = bound(map.get("from"));
            let to = bound(map.get("to"));
            if from.is_some() || to.is_some() {
                return Self::Range { from, to };
            }
        }

        Self::Scalar(value)
    }

    /// to_raw
    /// Reconstruct the raw payload, for the fall-through equality rules.
    #[must_use]
    pub fn to_raw(&self) -> Value {
        match self {
            Self::Scalar(value) => value.clone(),
            Self::Text { op, term } => {
                let mut map = Map::new();
                map.insert(op.key().to_string(), Value::String(term.clone()));
                Value::Object(map)
            }
            Self::Range { from, to } => {
                let mut map = Map::new();
                if let Some(from) = from {
                    map.insert("from".to_string(), from.clone());
                }
                if let Some(to) = to {
                    map.insert("to".to_string(), to.clone());
                }
                Value::Object(map)
            }
        }
    }
}

/// A bound is present when non-null and not the empty-string sentinel the
/// form layer submits for an untouched input.
fn bound(value: Option<&Value>) -> Option<Value> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.is_empty() => None,
        Some(value) => Some(value.clone()),
    }
}

/// String form of a raw scalar, for pattern building. Strings pass through
/// unquoted; everything else renders as its JSON text.
pub(crate) fn raw_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

///
/// FilterClause
///
/// One user-supplied constraint: a path, the resolved property when the
/// path is declared in the schema (ad-hoc nested paths stay unresolved),
/// and the canonical payload. A filter is an ordered clause sequence.
///

#[derive(Clone, Debug, PartialEq)]
pub struct FilterClause {
    pub path: String,
    pub property: Option<crate::schema::Property>,
    pub value: FilterValue,
}

impl FilterClause {
    #[must_use]
    pub fn new(
        path: impl Into<String>,
        property: Option<crate::schema::Property>,
        value: FilterValue,
    ) -> Self {
        Self {
            path: path.into(),
            property,
            value,
        }
    }

    /// resolved
    /// Build a clause from a structured front-end entry, resolving the
    /// property against the schema.
    #[must_use]
    pub fn resolved(path: impl Into<String>, raw: Value, schema: &Schema) -> Self {
        let path = path.into();
        let property = schema.property(&path).cloned();

        Self {
            property,
            value: FilterValue::from_raw(raw),
            path,
        }
    }
}

/// lower_form_filters
/// Lower the suffix-encoded front-end convention (`title_starts_with`,
/// `created_from`, ...) into canonical clauses. `_from`/`_to` entries for
/// the same base path group into a single range clause, appended after the
/// directly-lowered ones in base-path order. Keys without a recognized
/// suffix lower as plain payloads.
#[must_use]
pub fn lower_form_filters(form: &BTreeMap<String, Value>, schema: &Schema) -> Vec<FilterClause> {
    let mut clauses = Vec::new();
    let mut ranges: BTreeMap<&str, (Option<Value>, Option<Value>)> = BTreeMap::new();

    for (key, value) in form {
        if let Some((base, op)) = split_text_suffix(key) {
            clauses.push(FilterClause::new(
                base,
                schema.property(base).cloned(),
                FilterValue::Text {
                    op,
                    term: raw_text(value),
                },
            ));
        } else if let Some(base) = key.strip_suffix("_from") {
            ranges.entry(base).or_default().0 = bound(Some(value));
        } else if let Some(base) = key.strip_suffix("_to") {
            ranges.entry(base).or_default().1 = bound(Some(value));
        } else {
            clauses.push(FilterClause::resolved(key.clone(), value.clone(), schema));
        }
    }

    for (base, (from, to)) in ranges {
        if from.is_some() || to.is_some() {
            clauses.push(FilterClause::new(
                base,
                schema.property(base).cloned(),
                FilterValue::Range { from, to },
            ));
        }
    }

    clauses
}

fn split_text_suffix(key: &str) -> Option<(&str, TextOperator)> {
    for op in [
        TextOperator::StartsWith,
        TextOperator::EndsWith,
        TextOperator::Contains,
    ] {
        if let Some(base) = key
            .strip_suffix(op.key())
            .and_then(|head| head.strip_suffix('_'))
        {
            return Some((base, op));
        }
    }

    None
}
