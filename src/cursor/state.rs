//! Decoded cursor payload.

use serde::{Deserialize, Serialize};

use crate::filter::FilterTree;
use crate::planner::SortDirection;

/// End of the ordering that cursor positions are counted from.
///
/// A sequence that starts from the first page counts from the head; one that
/// starts from `last` without a cursor counts from the tail, since the head
/// position of the tail is unknown without a total count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    #[default]
    Head,
    Tail,
}

impl Anchor {
    /// Direction of the ordering positions are counted in
    pub fn origin_direction(self, initial_sort: SortDirection) -> SortDirection {
        match self {
            Anchor::Head => initial_sort,
            Anchor::Tail => initial_sort.reversed(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Anchor::Head => "head",
            Anchor::Tail => "tail",
        }
    }
}

/// Pagination state carried inside an opaque cursor token.
///
/// A value type: decoded fresh for every request and never updated in place.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CursorState {
    /// Presentation direction of the sequence
    pub initial_sort: SortDirection,

    /// Logical order field
    pub order_by: String,

    /// 1-based ordinal of the node, counted from `anchor`
    pub position: u64,

    /// Filters in force when the cursor was issued
    #[serde(default)]
    pub filters: FilterTree,

    #[serde(default)]
    pub anchor: Anchor,
}

impl CursorState {
    /// Create a head-anchored state
    pub fn new(
        initial_sort: SortDirection,
        order_by: impl Into<String>,
        position: u64,
        filters: FilterTree,
    ) -> Self {
        Self {
            initial_sort,
            order_by: order_by.into(),
            position,
            filters,
            anchor: Anchor::Head,
        }
    }

    /// Returns the same state counted from the given anchor
    pub fn anchored(self, anchor: Anchor) -> Self {
        Self { anchor, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wire_names() {
        let state = CursorState::new(
            SortDirection::Desc,
            "created_at",
            7,
            FilterTree::leaf("age", "gt", "18"),
        );

        let value = serde_json::to_value(&state).unwrap();
        assert_eq!(
            value,
            json!({
                "initialSort": "desc",
                "orderBy": "created_at",
                "position": 7,
                "filters": {"field": "age", "operator": "gt", "value": "18"},
                "anchor": "head"
            })
        );
    }

    #[test]
    fn test_missing_anchor_and_filters_default() {
        let state: CursorState = serde_json::from_value(json!({
            "initialSort": "asc",
            "orderBy": "id",
            "position": 3
        }))
        .unwrap();

        assert_eq!(state.anchor, Anchor::Head);
        assert!(state.filters.is_unconstrained());
    }

    #[test]
    fn test_origin_direction() {
        assert_eq!(
            Anchor::Head.origin_direction(SortDirection::Asc),
            SortDirection::Asc
        );
        assert_eq!(
            Anchor::Tail.origin_direction(SortDirection::Asc),
            SortDirection::Desc
        );
    }
}
