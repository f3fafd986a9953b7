//! Compiled query plan
//!
//! Positions are 1-based ordinals in the **origin ordering**: `order_by` in
//! `initial_sort` for a head anchor, in the reverse for a tail anchor. A plan
//! either reads away from its anchor (skip `offset`, read forward) or toward
//! it (read the rows preceding `index_position`, nearest first).

use serde::Serialize;

use super::ast::{InputArgs, SortDirection};
use crate::cursor::Anchor;
use crate::filter::FilterTree;

/// Slice of the origin ordering a row source must read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum FetchWindow {
    /// Skip `offset` rows of the origin ordering, then read in origin order
    Offset { offset: u64 },
    /// Read rows whose origin position is below `position`, nearest first
    Preceding { position: u64 },
}

/// Normalized, engine-agnostic plan for one page.
///
/// Created once per request by the compiler and read by adapters and the
/// assembler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryContext {
    /// Page size (the row source reads one more)
    pub limit: u64,
    /// Effective fetch direction
    pub order_direction: SortDirection,
    /// Presentation direction
    pub initial_sort: SortDirection,
    /// Logical order field
    pub order_by: String,
    /// Active filters
    pub filters: FilterTree,
    /// Dense start of the window in the origin ordering
    pub offset: u64,
    /// Request as received
    pub input_args: InputArgs,
    /// Raw token the plan resumes from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_cursor: Option<String>,
    /// Position of the cursor node, 0 without a cursor
    pub index_position: u64,
    pub is_paging_backwards: bool,
    pub anchor: Anchor,
}

impl QueryContext {
    /// Returns true if the plan resumes from a cursor
    pub fn is_resumed(&self) -> bool {
        self.previous_cursor.is_some()
    }

    /// Direction of the ordering positions are counted in
    pub fn origin_direction(&self) -> SortDirection {
        self.anchor.origin_direction(self.initial_sort)
    }

    /// Returns true if the fetch runs in origin order
    pub fn reads_away_from_anchor(&self) -> bool {
        (self.anchor == Anchor::Head) != self.is_paging_backwards
    }

    /// Rows to request from the source: the page plus one lookahead row
    pub fn fetch_limit(&self) -> u64 {
        self.limit.saturating_add(1)
    }

    /// The window a row source must read
    pub fn window(&self) -> FetchWindow {
        if self.reads_away_from_anchor() {
            FetchWindow::Offset {
                offset: self.offset,
            }
        } else {
            FetchWindow::Preceding {
                position: self.index_position,
            }
        }
    }

    /// Position of the `fetched`-th row (0-based, in fetch order)
    pub fn position_of(&self, fetched: usize) -> u64 {
        let fetched = fetched as u64;
        if self.reads_away_from_anchor() {
            self.offset.saturating_add(fetched).saturating_add(1)
        } else {
            self.index_position.saturating_sub(1 + fetched)
        }
    }
}
