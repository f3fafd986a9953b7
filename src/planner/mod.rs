//! Query context compilation for pagewise
//!
//! The planner produces deterministic, engine-agnostic plans.
//!
//! # Design Principles
//!
//! - Deterministic: same request and cursor → same plan
//! - Bounded: every plan carries a validated page size
//! - Explicit: conflicting or malformed requests are rejected, never guessed

mod ast;
mod compiler;
mod context;

pub use ast::{CursorArgs, InputArgs, OrderArgs, PageArgs, SortDirection};
pub use compiler::QueryContextCompiler;
pub use context::{FetchWindow, QueryContext};
