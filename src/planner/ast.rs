//! Client request structures
//!
//! `InputArgs` is the parsed pagination request; it is immutable once
//! received and stored verbatim on the compiled plan.

use serde::{Deserialize, Serialize};

use crate::filter::FilterTree;

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    /// SQL keyword for this direction
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }

    /// Return the opposite direction
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// `cursor.{before, after}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CursorArgs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
}

/// `page.{first, last}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageArgs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last: Option<i64>,
}

/// `order.orderBy`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderArgs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_by: Option<String>,
}

/// Client-supplied pagination request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputArgs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<CursorArgs>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<PageArgs>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<OrderArgs>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<FilterTree>,
}

impl InputArgs {
    /// Creates an empty request (first page, default size)
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `page.first`
    pub fn with_first(mut self, first: i64) -> Self {
        self.page.get_or_insert_with(PageArgs::default).first = Some(first);
        self
    }

    /// Sets `page.last`
    pub fn with_last(mut self, last: i64) -> Self {
        self.page.get_or_insert_with(PageArgs::default).last = Some(last);
        self
    }

    /// Sets `cursor.after`
    pub fn with_after(mut self, token: impl Into<String>) -> Self {
        self.cursor.get_or_insert_with(CursorArgs::default).after = Some(token.into());
        self
    }

    /// Sets `cursor.before`
    pub fn with_before(mut self, token: impl Into<String>) -> Self {
        self.cursor.get_or_insert_with(CursorArgs::default).before = Some(token.into());
        self
    }

    /// Sets `order.orderBy`
    pub fn with_order_by(mut self, field: impl Into<String>) -> Self {
        self.order.get_or_insert_with(OrderArgs::default).order_by = Some(field.into());
        self
    }

    /// Sets `filter`
    pub fn with_filter(mut self, filter: FilterTree) -> Self {
        self.filter = Some(filter);
        self
    }

    /// `cursor.after`, ignoring empty tokens
    pub fn after(&self) -> Option<&str> {
        non_empty(self.cursor.as_ref().and_then(|c| c.after.as_deref()))
    }

    /// `cursor.before`, ignoring empty tokens
    pub fn before(&self) -> Option<&str> {
        non_empty(self.cursor.as_ref().and_then(|c| c.before.as_deref()))
    }

    /// `page.first`
    pub fn first(&self) -> Option<i64> {
        self.page.as_ref().and_then(|p| p.first)
    }

    /// `page.last`
    pub fn last(&self) -> Option<i64> {
        self.page.as_ref().and_then(|p| p.last)
    }

    /// `order.orderBy`, ignoring empty names
    pub fn order_by(&self) -> Option<&str> {
        non_empty(self.order.as_ref().and_then(|o| o.order_by.as_deref()))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
