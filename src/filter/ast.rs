//! # Filter Tree
//!
//! Client-facing boolean filter expressions.
//!
//! The wire shape is either a leaf `{field, operator, value}` or a compound
//! `{and?, or?, not?}` whose arrays hold further trees.

use serde::{Deserialize, Serialize};

/// A single comparison on a logical field
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Filter {
    /// Logical field name
    pub field: String,

    /// Logical operator name (e.g. `gt`)
    pub operator: String,

    /// Comparison value
    pub value: String,
}

impl Filter {
    /// Create a new leaf filter
    pub fn new(
        field: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            operator: operator.into(),
            value: value.into(),
        }
    }
}

/// Boolean combinators over nested trees.
///
/// Absent and empty arrays are no-ops. When several keys are populated,
/// their parts are combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompoundFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub and: Option<Vec<FilterTree>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub or: Option<Vec<FilterTree>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not: Option<Vec<FilterTree>>,
}

/// A filter expression: a leaf or a compound node
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterTree {
    Leaf(Filter),
    Compound(CompoundFilter),
}

impl Default for FilterTree {
    /// The empty compound, which constrains nothing
    fn default() -> Self {
        FilterTree::Compound(CompoundFilter::default())
    }
}

impl FilterTree {
    /// Create a leaf tree
    pub fn leaf(
        field: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        FilterTree::Leaf(Filter::new(field, operator, value))
    }

    /// Create an `and` node
    pub fn and(children: Vec<FilterTree>) -> Self {
        FilterTree::Compound(CompoundFilter {
            and: Some(children),
            ..CompoundFilter::default()
        })
    }

    /// Create an `or` node
    pub fn or(children: Vec<FilterTree>) -> Self {
        FilterTree::Compound(CompoundFilter {
            or: Some(children),
            ..CompoundFilter::default()
        })
    }

    /// Create a `not` node
    pub fn not(children: Vec<FilterTree>) -> Self {
        FilterTree::Compound(CompoundFilter {
            not: Some(children),
            ..CompoundFilter::default()
        })
    }

    /// Returns true if this is the empty compound `{}`
    pub fn is_unconstrained(&self) -> bool {
        matches!(self, FilterTree::Compound(c) if c.and.is_none() && c.or.is_none() && c.not.is_none())
    }

    /// Returns the number of leaves in the tree
    pub fn leaf_count(&self) -> usize {
        match self {
            FilterTree::Leaf(_) => 1,
            FilterTree::Compound(c) => [&c.and, &c.or, &c.not]
                .into_iter()
                .flatten()
                .flat_map(|children| children.iter())
                .map(FilterTree::leaf_count)
                .sum(),
        }
    }
}

impl From<Filter> for FilterTree {
    fn from(filter: Filter) -> Self {
        FilterTree::Leaf(filter)
    }
}
