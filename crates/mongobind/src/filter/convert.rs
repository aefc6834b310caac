//! Clause list → native conjunctive query document.

use crate::{
    filter::{FilterClause, FilterValue, TextOperator, raw_text},
    paths,
    schema::PropertyKind,
    types::ObjectId,
};
use serde_json::{Map, Value, json};

/// Native query document: storage field name → literal value or operator
/// object (`$regex`/`$options`, `$gte`/`$lte`).
pub type QueryDocument = Map<String, Value>;

/// match_nothing
/// Guaranteed-empty query: no identifier is a member of the empty set.
#[must_use]
pub fn match_nothing() -> QueryDocument {
    let mut doc = QueryDocument::new();
    doc.insert("_id".to_string(), json!({ "$in": [] }));

    doc
}

/// convert_filter
/// Translate an ordered clause sequence into one merged query document.
/// Clauses merge left to right and the first clause targeting a top-level
/// key wins. A syntactically invalid identifier clause short-circuits the
/// whole translation into `match_nothing()`, discarding everything else.
#[must_use]
pub fn convert_filter(clauses: &[FilterClause]) -> QueryDocument {
    let mut doc = QueryDocument::new();

    for clause in clauses {
        match translate_clause(clause) {
            Translation::Constraint(key, value) => {
                doc.entry(key).or_insert(value);
            }
            Translation::Nested(map) => {
                for (key, value) in map {
                    doc.entry(key).or_insert(value);
                }
            }
            Translation::MatchNothing => return match_nothing(),
            Translation::Skip => {}
        }
    }

    doc
}

enum Translation {
    Constraint(String, Value),
    Nested(Map<String, Value>),
    MatchNothing,
    Skip,
}

fn translate_clause(clause: &FilterClause) -> Translation {
    let Some(property) = &clause.property else {
        if clause.path.is_empty() {
            return Translation::Skip;
        }
        // Ad-hoc nested path: literal equality on the expanded shape, so
        // `"a.b": "x"` constrains `{a: {b: "x"}}`.
        return match paths::expand(&clause.path, clause.value.to_raw()) {
            Value::Object(map) => Translation::Nested(map),
            other => Translation::Constraint(clause.path.clone(), other),
        };
    };

    let key = clause.path.clone();

    match &property.kind {
        PropertyKind::String => Translation::Constraint(key, string_constraint(&clause.value)),

        PropertyKind::Date | PropertyKind::DateTime => match &clause.value {
            FilterValue::Range { from, to } if from.is_some() || to.is_some() => {
                let mut range = Map::new();
                if let Some(from) = from {
                    range.insert("$gte".to_string(), from.clone());
                }
                if let Some(to) = to {
                    range.insert("$lte".to_string(), to.clone());
                }
                Translation::Constraint(key, Value::Object(range))
            }
            // Boundless or non-range payloads fall through to equality.
            value => Translation::Constraint(key, value.to_raw()),
        },

        PropertyKind::Id => match &clause.value {
            // Validate identifier syntax before anything touches the raw
            // text; an invalid identifier means a guaranteed-empty result
            // set, not an error.
            FilterValue::Scalar(Value::String(text)) if ObjectId::is_valid(text) => {
                Translation::Constraint(key, Value::String(text.clone()))
            }
            _ => Translation::MatchNothing,
        },

        _ => Translation::Constraint(key, clause.value.to_raw()),
    }
}

/// Pattern constraints are case-insensitive, and the literal term is
/// escaped so metacharacters in user input stay inert. Non-text payloads
/// degrade to an unanchored substring match on their raw text.
fn string_constraint(value: &FilterValue) -> Value {
    let pattern = match value {
        FilterValue::Text { op, term } => {
            let escaped = regex::escape(term);
            match op {
                TextOperator::StartsWith => format!("^{escaped}"),
                TextOperator::EndsWith => format!("{escaped}$"),
                TextOperator::Contains => escaped,
            }
        }
        FilterValue::Scalar(raw) => regex::escape(&raw_text(raw)),
        range @ FilterValue::Range { .. } => regex::escape(&raw_text(&range.to_raw())),
    };

    json!({ "$regex": pattern, "$options": "i" })
}
