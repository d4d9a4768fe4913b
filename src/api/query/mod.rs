//! OData listing queries
//!
//! A `ListQuery` names a Graph collection plus the optional server-side
//! `$filter` and `$top` hint used when listing it.

pub mod filters;
pub mod query;

pub use filters::Filter;
pub use query::ListQuery;
