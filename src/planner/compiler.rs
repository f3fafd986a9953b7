//! Query context compiler
//!
//! Turns a client request plus an optional previous cursor into a
//! normalized `QueryContext`.
//!
//! Validation order (first failure wins):
//! 1. Paging direction is unambiguous
//! 2. Page size is within `1..=max_limit`
//! 3. Previous cursor decodes
//! 4. Order and filter agree with the cursor

use super::ast::InputArgs;
use super::context::QueryContext;
use crate::config::PaginationConfig;
use crate::cursor::{Anchor, CursorCodec, CursorState};
use crate::errors::{PaginationError, PaginationResult};
use crate::filter::FilterTree;
use crate::observability::{log_rejection, Event};

/// Compiles requests into plans. Holds no per-request state.
pub struct QueryContextCompiler<'a, C: CursorCodec> {
    config: &'a PaginationConfig,
    codec: &'a C,
}

impl<'a, C: CursorCodec> QueryContextCompiler<'a, C> {
    /// Creates a new compiler
    pub fn new(config: &'a PaginationConfig, codec: &'a C) -> Self {
        Self { config, codec }
    }

    /// Compiles a request, returning an immutable plan or error.
    ///
    /// Deterministic: the same request and cursor always compile to the
    /// same plan.
    pub fn compile(&self, args: &InputArgs) -> PaginationResult<QueryContext> {
        match self.compile_inner(args) {
            Ok(plan) => {
                tracing::debug!(
                    event = %Event::PlanCompiled,
                    limit = plan.limit,
                    offset = plan.offset,
                    index_position = plan.index_position,
                    backwards = plan.is_paging_backwards,
                    anchor = plan.anchor.as_str(),
                    order_by = %plan.order_by,
                    resumed = plan.is_resumed(),
                    "plan compiled"
                );
                Ok(plan)
            }
            Err(err) => {
                let event = match err {
                    PaginationError::MalformedCursor(_) => Event::CursorRejected,
                    _ => Event::RequestRejected,
                };
                log_rejection(event, &err);
                Err(err)
            }
        }
    }

    fn compile_inner(&self, args: &InputArgs) -> PaginationResult<QueryContext> {
        // 1. Direction
        if args.before().is_some() && args.after().is_some() {
            return Err(PaginationError::AmbiguousPagingDirection);
        }

        let is_paging_backwards = args.before().is_some()
            || (args.last().is_some() && args.after().is_none() && args.first().is_none());

        // 2. Page size
        let limit = self.resolve_limit(args)?;

        // 3. Previous cursor
        let previous_cursor = if is_paging_backwards {
            args.before()
        } else {
            args.after()
        };

        let resumed = previous_cursor
            .map(|token| self.codec.decode(token))
            .transpose()?;

        // 4. Ordering, position and filters
        let (initial_sort, order_by, index_position, anchor, filters) = match resumed {
            Some(state) => {
                self.check_consistency(args, &state)?;
                if state.position.checked_add(limit).and_then(|p| p.checked_add(1)).is_none() {
                    return Err(PaginationError::MalformedCursor(format!(
                        "cursor position {} is out of range",
                        state.position
                    )));
                }
                (
                    state.initial_sort,
                    state.order_by,
                    state.position,
                    state.anchor,
                    state.filters,
                )
            }
            None => (
                self.config.initial_sort,
                args.order_by()
                    .unwrap_or(&self.config.default_order_by)
                    .to_string(),
                0,
                if is_paging_backwards {
                    Anchor::Tail
                } else {
                    Anchor::Head
                },
                args.filter.clone().unwrap_or_default(),
            ),
        };

        let order_direction = if is_paging_backwards {
            initial_sort.reversed()
        } else {
            initial_sort
        };

        let mut plan = QueryContext {
            limit,
            order_direction,
            initial_sort,
            order_by,
            filters,
            offset: 0,
            input_args: args.clone(),
            previous_cursor: previous_cursor.map(str::to_string),
            index_position,
            is_paging_backwards,
            anchor,
        };

        plan.offset = if plan.reads_away_from_anchor() {
            index_position
        } else {
            index_position.saturating_sub(1).saturating_sub(limit)
        };

        Ok(plan)
    }

    /// Picks `first`, then `last`, then the configured default
    fn resolve_limit(&self, args: &InputArgs) -> PaginationResult<u64> {
        let max = self.config.max_limit;

        for size in [args.first(), args.last()].into_iter().flatten() {
            if size <= 0 || size as u64 > max {
                return Err(PaginationError::InvalidPageSize { size, max });
            }
        }

        Ok(args
            .first()
            .or(args.last())
            .map(|size| size as u64)
            .unwrap_or(self.config.default_limit))
    }

    /// A cursor pins the order and filters it was issued under
    fn check_consistency(&self, args: &InputArgs, state: &CursorState) -> PaginationResult<()> {
        if let Some(requested) = args.order_by() {
            if requested != state.order_by {
                return Err(PaginationError::OrderMismatch {
                    cursor: state.order_by.clone(),
                    requested: requested.to_string(),
                });
            }
        }

        if let Some(filter) = &args.filter {
            if !filters_agree(filter, &state.filters) {
                return Err(PaginationError::FilterMismatch);
            }
        }

        Ok(())
    }
}

/// Structural comparison, treating every unconstrained tree as equal
fn filters_agree(requested: &FilterTree, cursor: &FilterTree) -> bool {
    requested == cursor || (requested.is_unconstrained() && cursor.is_unconstrained())
}
