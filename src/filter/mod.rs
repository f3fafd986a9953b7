//! # Filter Subsystem
//!
//! Nested boolean filter trees and their translation into engine clauses.
//!
//! - `ast`: the client-facing tree (`Filter`, `CompoundFilter`, `FilterTree`)
//! - `maps`: logical → engine field and operator maps
//! - `clause`: the engine-neutral output tree
//! - `translator`: deterministic, left-to-right structural recursion

mod ast;
mod clause;
mod maps;
mod translator;

pub use ast::{CompoundFilter, Filter, FilterTree};
pub use clause::{Clause, Comparison};
pub use maps::{FieldMap, OperatorMap};
pub use translator::{translate, FilterTranslator};
