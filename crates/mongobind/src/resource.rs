//! Resource veneer tying the pieces together: one named collection with
//! its schema, exposing filter translation, parameter normalization and
//! failure translation as methods. The modules underneath stay free of
//! logging; this is the layer that traces.

use crate::{
    error::{AdapterError, ValidationError},
    filter::{FilterClause, QueryDocument, convert_filter, lower_form_filters},
    params::ParamBag,
    report::{WriteFailure, translate_cast, translate_validation},
    schema::Schema,
};
use serde_json::Value;
use std::collections::BTreeMap;

///
/// Resource
///

#[derive(Clone, Debug)]
pub struct Resource {
    name: String,
    schema: Schema,
}

impl Resource {
    #[must_use]
    pub fn new(name: impl Into<String>, schema: Schema) -> Self {
        Self {
            name: name.into(),
            schema,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Build one clause from a structured front-end entry.
    #[must_use]
    pub fn clause(&self, path: impl Into<String>, raw: Value) -> FilterClause {
        FilterClause::resolved(path, raw, &self.schema)
    }

    /// Translate an ordered clause sequence into the native query document.
    #[must_use]
    pub fn query(&self, clauses: &[FilterClause]) -> QueryDocument {
        let query = convert_filter(clauses);
        log::debug!(
            "{}: translated {} filter clause(s) into {} constraint(s)",
            self.name,
            clauses.len(),
            query.len()
        );

        query
    }

    /// Lower a suffix-encoded form filter and translate it in one step.
    #[must_use]
    pub fn query_from_form(&self, form: &BTreeMap<String, Value>) -> QueryDocument {
        let clauses = lower_form_filters(form, &self.schema);

        self.query(&clauses)
    }

    /// Repair a submitted parameter bag in place against this resource's
    /// schema.
    pub fn normalize_params(&self, params: &mut ParamBag) {
        let before = params.len();
        params.normalize(&self.schema);
        log::debug!(
            "{}: normalized parameter bag ({before} entries in, {} out)",
            self.name,
            params.len()
        );
    }

    /// Translate a native write failure into the uniform field-keyed
    /// report. Cast failures need the submitted bag to recover the full
    /// dotted path.
    pub fn translate_failure(
        &self,
        failure: &WriteFailure,
        params: &ParamBag,
    ) -> Result<ValidationError, AdapterError> {
        match failure {
            WriteFailure::Validation(failure) => Ok(translate_validation(&self.name, failure)),
            WriteFailure::Cast(failure) => translate_cast(&self.name, failure, params),
        }
    }
}

///
/// TESTS
///
