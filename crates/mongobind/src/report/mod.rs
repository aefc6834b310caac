//! Translation of native write failures into the uniform field-keyed
//! report. Two categories exist: schema validation failures carrying a
//! per-field mapping, and cast failures carrying only the undotted leaf
//! segment of the failing path plus the offending raw value.


use crate::{
    error::{AdapterError, PropertyError, ValidationError},
    params::ParamBag,
};
use serde_json::Value;
use std::collections::BTreeMap;

///
/// FieldFailure
/// Per-field detail carried by a native validation failure.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldFailure {
    pub message: String,
    /// Constraint kind, e.g. `required` or `minlength`; not every failure
    /// carries one.
    pub kind: Option<String>,
    /// Native error class name, e.g. `ValidatorError`.
    pub name: String,
}

impl FieldFailure {
    fn report_type(&self) -> String {
        self.kind.clone().unwrap_or_else(|| self.name.clone())
    }
}

///
/// ValidationFailure
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ValidationFailure {
    pub errors: BTreeMap<String, FieldFailure>,
}

///
/// CastFailure
///
/// A single scalar could not be coerced to its declared type. The native
/// error does not know the full dotted path, only the leaf segment.
///

#[derive(Clone, Debug, PartialEq)]
pub struct CastFailure {
    /// Undotted leaf segment of the failing path (e.g. `age` for
    /// `parents.0.age`).
    pub leaf: String,
    /// The raw value that failed to coerce.
    pub value: Value,
    pub message: String,
    pub kind: Option<String>,
    pub name: String,
}

///
/// WriteFailure
/// The two native failure categories the core interprets. Anything else
/// the store raises passes through the caller untouched.
///

#[derive(Clone, Debug, PartialEq)]
pub enum WriteFailure {
    Validation(ValidationFailure),
    Cast(CastFailure),
}

/// translate_validation
/// The field-keyed mapping carries over directly; the report `type` is the
/// constraint kind, falling back to the native error name. All keys are
/// preserved.
#[must_use]
pub fn translate_validation(resource: &str, failure: &ValidationFailure) -> ValidationError {
    let errors = failure
        .errors
        .iter()
        .map(|(path, field)| {
            (
                path.clone(),
                PropertyError::new(field.message.clone(), field.report_type()),
            )
        })
        .collect();

    ValidationError::new(resource, errors)
}

/// translate_cast
///
/// Recover the full dotted path: the first bag entry (in key order) whose
/// value equals the offending value and whose key ends in the leaf
/// segment, optionally followed by one array index (`age` or `age.0`),
/// on a path-segment boundary.
///
/// No match means the native error and the submitted parameters disagree;
/// that is a broken invariant and propagates as a fatal error instead of
/// being dropped. Two submitted fields sharing the offending value can
/// still mis-attribute; the scan does not disambiguate.
pub fn translate_cast(
    resource: &str,
    failure: &CastFailure,
    params: &ParamBag,
) -> Result<ValidationError, AdapterError> {
    let matched = params
        .iter()
        .find(|(key, value)| **value == failure.value && leaf_matches(key, &failure.leaf));

    match matched {
        Some((path, _)) => Ok(ValidationError::single(
            resource,
            path.clone(),
            PropertyError::new(
                failure.message.clone(),
                failure.kind.clone().unwrap_or_else(|| failure.name.clone()),
            ),
        )),
        None => Err(AdapterError::UnmatchedCastPath {
            leaf: failure.leaf.clone(),
            value: failure.value.clone(),
        }),
    }
}

/// `segment` or `segment.<digits>` anchored at the end of the key.
fn leaf_matches(key: &str, leaf: &str) -> bool {
    let trimmed = strip_index_suffix(key);

    trimmed == leaf
        || (trimmed.ends_with(leaf) && trimmed[..trimmed.len() - leaf.len()].ends_with('.'))
}

fn strip_index_suffix(key: &str) -> &str {
    if let Some((head, tail)) = key.rsplit_once('.') {
        if !tail.is_empty() && tail.bytes().all(|b| b.is_ascii_digit()) {
            return head;
        }
    }

    key
}
