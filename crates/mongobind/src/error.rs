use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error as ThisError;

///
/// AdapterError
///
/// Failures the core itself can produce. Anything the native store raises
/// that the core does not interpret (connectivity and the like) never enters
/// this type; the caller propagates it unchanged.
///

#[derive(Debug, ThisError)]
pub enum AdapterError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A cast failure whose offending value maps back to no submitted
    /// parameter. The native error and the parameter bag disagree about
    /// what was written; this must surface, not be dropped.
    #[error("cast failure for `{leaf}` matches no submitted parameter")]
    UnmatchedCastPath { leaf: String, value: Value },
}

///
/// ValidationError
///
/// Uniform field-keyed failure report surfaced to the admin framework.
/// This is the only error shape the surrounding CRUD layer is expected to
/// special-case.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize, ThisError)]
#[error("{resource} validation failed")]
pub struct ValidationError {
    /// Display name of the resource the write targeted.
    pub resource: String,
    /// Per-field detail, keyed by full dotted path.
    pub errors: BTreeMap<String, PropertyError>,
}

impl ValidationError {
    #[must_use]
    pub fn new(resource: impl Into<String>, errors: BTreeMap<String, PropertyError>) -> Self {
        Self {
            resource: resource.into(),
            errors,
        }
    }

    /// A report carrying exactly one field entry.
    #[must_use]
    pub fn single(
        resource: impl Into<String>,
        path: impl Into<String>,
        error: PropertyError,
    ) -> Self {
        let mut errors = BTreeMap::new();
        errors.insert(path.into(), error);

        Self::new(resource, errors)
    }
}

///
/// PropertyError
/// One entry of the report: message plus the native constraint kind.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct PropertyError {
    pub message: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl PropertyError {
    #[must_use]
    pub fn new(message: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: kind.into(),
        }
    }
}

///
/// TESTS
///
