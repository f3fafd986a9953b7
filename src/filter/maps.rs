//! # Field and Operator Maps
//!
//! Static mappings from logical names to engine-native names.
//!
//! A missing mapping is a deployment error, never a data error: the request
//! is rejected rather than guessed at.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::{PaginationError, PaginationResult};

/// Logical field → engine column
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMap {
    /// Explicit column mappings
    #[serde(default)]
    pub columns: BTreeMap<String, String>,

    /// Whether unmapped fields pass through verbatim
    #[serde(default)]
    pub passthrough: bool,
}

impl FieldMap {
    /// Create an empty map that rejects every field
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a map that passes unmapped fields through
    pub fn passthrough() -> Self {
        Self {
            columns: BTreeMap::new(),
            passthrough: true,
        }
    }

    /// Add a mapping
    pub fn with(mut self, field: impl Into<String>, column: impl Into<String>) -> Self {
        self.columns.insert(field.into(), column.into());
        self
    }

    /// Resolve a logical field to its engine column
    pub fn resolve<'a>(&'a self, field: &'a str) -> PaginationResult<&'a str> {
        match self.columns.get(field) {
            Some(column) => Ok(column.as_str()),
            None if self.passthrough => Ok(field),
            None => Err(PaginationError::UnknownField(field.to_string())),
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FieldMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            columns: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            passthrough: false,
        }
    }
}

/// Logical filter operator → engine operator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OperatorMap {
    operators: BTreeMap<String, String>,
}

impl OperatorMap {
    /// Create an empty map that rejects every operator
    pub fn empty() -> Self {
        Self {
            operators: BTreeMap::new(),
        }
    }

    /// Standard SQL comparison operators
    pub fn sql_defaults() -> Self {
        [
            ("eq", "="),
            ("neq", "<>"),
            ("gt", ">"),
            ("gte", ">="),
            ("lt", "<"),
            ("lte", "<="),
            ("like", "LIKE"),
        ]
        .into_iter()
        .collect()
    }

    /// Add a mapping
    pub fn with(mut self, operator: impl Into<String>, native: impl Into<String>) -> Self {
        self.operators.insert(operator.into(), native.into());
        self
    }

    /// Resolve a logical operator to its engine operator
    pub fn resolve(&self, operator: &str) -> PaginationResult<&str> {
        self.operators
            .get(operator)
            .map(String::as_str)
            .ok_or_else(|| PaginationError::UnknownOperator(operator.to_string()))
    }

    /// Iterate over `(logical, native)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.operators.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Default for OperatorMap {
    fn default() -> Self {
        Self::sql_defaults()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for OperatorMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            operators: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
