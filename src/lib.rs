//! pagewise - Cursor pagination compiler
//!
//! Compiles Relay-style pagination requests into engine-agnostic query plans
//! and assembles fetched rows back into connection-shaped pages.
//!
//! - [`cursor`]: opaque cursor tokens
//! - [`filter`]: filter trees and their translation to clauses
//! - [`planner`]: request → `QueryContext`
//! - [`assembler`]: rows → `QueryResult`
//! - [`adapter`]: SQL and in-memory engines
//! - [`paginator`]: the whole pipeline

pub mod adapter;
pub mod assembler;
pub mod cli;
pub mod config;
pub mod cursor;
pub mod errors;
pub mod filter;
pub mod observability;
pub mod paginator;
pub mod planner;

pub use adapter::{
    MemorySource, QueryBuilder, RowQuery, RowSource, SelectStatement, SqlQuery, SqlQueryBuilder,
};
pub use assembler::{Edge, PageInfo, QueryResult, ResultAssembler};
pub use config::PaginationConfig;
pub use cursor::{Anchor, Base64JsonCodec, CursorCodec, CursorState};
pub use errors::{PaginationError, PaginationResult};
pub use filter::{
    Clause, Comparison, CompoundFilter, FieldMap, Filter, FilterTranslator, FilterTree, OperatorMap,
};
pub use paginator::Paginator;
pub use planner::{FetchWindow, InputArgs, QueryContext, QueryContextCompiler, SortDirection};
