//! Connection-shaped page returned to clients

use serde::Serialize;

/// A node paired with the cursor that resumes after (or before) it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edge<N> {
    pub cursor: String,
    pub node: N,
}

/// Page flags and boundary cursors, relative to the presentation order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
    pub has_previous_page: bool,
    /// Cursor of the first edge, `None` on an empty page
    pub start_cursor: Option<String>,
    /// Cursor of the last edge, `None` on an empty page
    pub end_cursor: Option<String>,
}

/// One assembled page.
///
/// The top-level flags and cursors are copies of `page_info`, taken once at
/// construction; build values through [`QueryResult::new`] so they agree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult<N> {
    pub nodes: Vec<N>,
    pub edges: Vec<Edge<N>>,
    pub page_info: PageInfo,
    pub has_next_page: bool,
    pub has_prev_page: bool,
    pub start_cursor: Option<String>,
    pub end_cursor: Option<String>,
}

impl<N: Clone> QueryResult<N> {
    /// Builds a result from edges and page info
    pub fn new(edges: Vec<Edge<N>>, page_info: PageInfo) -> Self {
        let nodes = edges.iter().map(|e| e.node.clone()).collect();
        Self {
            nodes,
            edges,
            has_next_page: page_info.has_next_page,
            has_prev_page: page_info.has_previous_page,
            start_cursor: page_info.start_cursor.clone(),
            end_cursor: page_info.end_cursor.clone(),
            page_info,
        }
    }
}

impl<N> QueryResult<N> {
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Cursors in presentation order
    pub fn cursors(&self) -> impl Iterator<Item = &str> {
        self.edges.iter().map(|e| e.cursor.as_str())
    }
}
