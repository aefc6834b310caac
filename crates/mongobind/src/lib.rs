//! Store-facing core of a MongoDB admin-panel adapter: filter-to-query
//! translation, schema-driven parameter repair, and write-failure
//! translation into a uniform field-keyed report.
#![warn(unreachable_pub)]

pub mod error;
pub mod filter;
pub mod params;
pub mod paths;
pub mod report;
pub mod resource;
pub mod schema;
pub mod types;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// The lowering helpers and translation functions stay one level down.
///

pub mod prelude {
    pub use crate::{
        error::ValidationError,
        filter::{FilterClause, FilterValue, QueryDocument, TextOperator},
        params::ParamBag,
        resource::Resource,
        schema::{Property, PropertyKind, Schema},
        types::ObjectId,
    };
}
