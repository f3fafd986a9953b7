//! Result assembly
//!
//! Consumes the rows a source fetched for a plan (up to `limit + 1`, in the
//! plan's fetch direction) and produces the client-facing page.

use super::result::{Edge, PageInfo, QueryResult};
use crate::cursor::{CursorCodec, CursorState};
use crate::errors::PaginationResult;
use crate::observability::Event;
use crate::planner::QueryContext;

/// Builds pages from fetched rows. Holds no per-request state.
pub struct ResultAssembler<'a, C: CursorCodec> {
    codec: &'a C,
}

impl<'a, C: CursorCodec> ResultAssembler<'a, C> {
    pub fn new(codec: &'a C) -> Self {
        Self { codec }
    }

    /// Assembles rows as nodes unchanged
    pub fn assemble<R: Clone>(
        &self,
        rows: Vec<R>,
        plan: &QueryContext,
    ) -> PaginationResult<QueryResult<R>> {
        self.assemble_with(rows, plan, |row| row)
    }

    /// Assembles rows, mapping each kept row through `transform`.
    ///
    /// The lookahead row is dropped before `transform` runs.
    pub fn assemble_with<R, N, F>(
        &self,
        mut rows: Vec<R>,
        plan: &QueryContext,
        mut transform: F,
    ) -> PaginationResult<QueryResult<N>>
    where
        N: Clone,
        F: FnMut(R) -> N,
    {
        let limit = usize::try_from(plan.limit).unwrap_or(usize::MAX);
        let has_more = rows.len() > limit;
        rows.truncate(limit);

        let mut positioned: Vec<(u64, R)> = rows
            .into_iter()
            .enumerate()
            .map(|(fetched, row)| (plan.position_of(fetched), row))
            .collect();

        if plan.is_paging_backwards {
            positioned.reverse();
        }

        let edges = positioned
            .into_iter()
            .map(|(position, row)| {
                let cursor = self.cursor_for(plan, position)?;
                Ok(Edge {
                    cursor,
                    node: transform(row),
                })
            })
            .collect::<PaginationResult<Vec<_>>>()?;

        // The anchor row lies beyond the window on the side we came from
        let (has_next_page, has_previous_page) = if plan.is_paging_backwards {
            (plan.is_resumed(), has_more)
        } else {
            (has_more, plan.is_resumed())
        };

        let page_info = PageInfo {
            has_next_page,
            has_previous_page,
            start_cursor: edges.first().map(|e| e.cursor.clone()),
            end_cursor: edges.last().map(|e| e.cursor.clone()),
        };

        tracing::debug!(
            event = %Event::PageAssembled,
            nodes = edges.len(),
            has_next_page,
            has_previous_page,
            backwards = plan.is_paging_backwards,
            "page assembled"
        );

        Ok(QueryResult::new(edges, page_info))
    }

    fn cursor_for(&self, plan: &QueryContext, position: u64) -> PaginationResult<String> {
        let state = CursorState::new(
            plan.initial_sort,
            plan.order_by.clone(),
            position,
            plan.filters.clone(),
        )
        .anchored(plan.anchor);

        self.codec.encode(&state)
    }
}
