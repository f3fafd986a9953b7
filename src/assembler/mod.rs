//! # Result Assembler
//!
//! Turns fetched rows plus the plan that fetched them into a Relay-style
//! connection: nodes, edges with freshly encoded cursors, and page info.

mod assembler;
mod result;

pub use assembler::ResultAssembler;
pub use result::{Edge, PageInfo, QueryResult};
