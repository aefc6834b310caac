//! Dotted-path helpers shared by the filter translator and the parameter
//! bag. Paths are flat strings like `parents.0.age`; all-digit segments
//! address array elements.

use serde_json::{Map, Value};

/// join
/// Join a path prefix and a relative segment; an empty prefix yields the
/// segment unchanged.
#[must_use]
pub fn join(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{prefix}.{segment}")
    }
}

/// expand
/// Expand one dotted path into a nested document holding `value` at the
/// leaf, so `a.b` becomes `{"a": {"b": value}}`.
#[must_use]
pub fn expand(path: &str, value: Value) -> Value {
    let mut root = Value::Object(Map::new());
    set_path(&mut root, path, value);

    root
}

/// set_path
/// Write `value` at `path` inside `root`, creating intermediate objects and
/// arrays as needed. Array gaps pad with nulls; a scalar in the way is
/// replaced by the container the path requires.
pub fn set_path(root: &mut Value, path: &str, value: Value) {
    let segments: Vec<&str> = path.split('.').collect();
    place(root, &segments, value);
}

fn place(node: &mut Value, segments: &[&str], value: Value) {
    let Some((segment, rest)) = segments.split_first() else {
        *node = value;
        return;
    };

    if let Some(index) = array_index(segment) {
        if !matches!(node, Value::Array(_)) {
            *node = Value::Array(Vec::new());
        }
        if let Value::Array(items) = node {
            while items.len() <= index {
                items.push(Value::Null);
            }
            place(&mut items[index], rest, value);
        }
    } else {
        if !matches!(node, Value::Object(_)) {
            *node = Value::Object(Map::new());
        }
        if let Value::Object(map) = node {
            let slot = map.entry((*segment).to_string()).or_insert(Value::Null);
            place(slot, rest, value);
        }
    }
}

fn array_index(segment: &str) -> Option<usize> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    segment.parse().ok()
}

///
/// TESTS
///
