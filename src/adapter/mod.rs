//! # Engine Adapters
//!
//! Seams between compiled plans and storage engines.
//!
//! - [`QueryBuilder`] applies a plan onto an engine-specific builder
//! - [`RowSource`] fetches the rows for a plan
//!
//! Two adapters ship with the crate: a parameterized SQL renderer and an
//! in-memory source over JSON rows.

mod memory;
mod sql;

pub use memory::MemorySource;
pub use sql::{SelectStatement, SqlQuery, SqlQueryBuilder};

use crate::errors::PaginationError;
use crate::filter::Clause;
use crate::planner::QueryContext;

/// Applies a compiled plan onto an engine-specific builder.
///
/// Must be pure: the same plan and builder always yield the same output.
pub trait QueryBuilder<B> {
    fn create_query(&self, builder: B) -> Result<B, PaginationError>;
}

/// Everything a row source needs to fetch one page
#[derive(Debug, Clone, Copy)]
pub struct RowQuery<'a> {
    /// The compiled plan
    pub plan: &'a QueryContext,
    /// Translated filters, `None` when unconstrained
    pub clause: Option<&'a Clause>,
    /// Engine column for `plan.order_by`
    pub order_column: &'a str,
}

/// Fetches up to `plan.fetch_limit()` rows in the plan's fetch direction
pub trait RowSource {
    type Row;
    type Error: From<PaginationError>;

    fn fetch(&self, query: RowQuery<'_>) -> Result<Vec<Self::Row>, Self::Error>;
}

impl<S: RowSource + ?Sized> RowSource for &S {
    type Row = S::Row;
    type Error = S::Error;

    fn fetch(&self, query: RowQuery<'_>) -> Result<Vec<Self::Row>, Self::Error> {
        (**self).fetch(query)
    }
}
