//! Pagination configuration
//!
//! Loaded from a JSON file or built in code. Every key is optional:
//!
//! ```json
//! {
//!   "default_limit": 100,
//!   "max_limit": 1000,
//!   "default_order_by": "id",
//!   "initial_sort": "asc",
//!   "fields": {"id": "id", "age": "user_age"},
//!   "operators": {"gt": ">", "lt": "<"},
//!   "passthrough_fields": false
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::{PaginationError, PaginationResult};
use crate::filter::{FieldMap, FilterTranslator, OperatorMap};
use crate::observability::Event;
use crate::planner::SortDirection;

/// Default page size if neither `first` nor `last` is given
pub const DEFAULT_LIMIT: u64 = 100;

/// Largest accepted page size
pub const MAX_LIMIT: u64 = 1000;

/// Default order field
pub const DEFAULT_ORDER_BY: &str = "id";

/// Configuration for compiling and assembling pages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationConfig {
    #[serde(default = "default_limit")]
    pub default_limit: u64,

    #[serde(default = "max_limit")]
    pub max_limit: u64,

    #[serde(default = "default_order_by")]
    pub default_order_by: String,

    /// Presentation direction of new cursor sequences
    #[serde(default)]
    pub initial_sort: SortDirection,

    /// Logical field → engine column; must map `default_order_by`
    #[serde(default = "default_fields")]
    pub fields: BTreeMap<String, String>,

    /// Logical operator → engine operator
    #[serde(default)]
    pub operators: OperatorMap,

    /// Whether unmapped fields pass through verbatim
    #[serde(default)]
    pub passthrough_fields: bool,
}

fn default_limit() -> u64 {
    DEFAULT_LIMIT
}
fn max_limit() -> u64 {
    MAX_LIMIT
}
fn default_order_by() -> String {
    DEFAULT_ORDER_BY.to_string()
}
fn default_fields() -> BTreeMap<String, String> {
    BTreeMap::from([(DEFAULT_ORDER_BY.to_string(), DEFAULT_ORDER_BY.to_string())])
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
            max_limit: MAX_LIMIT,
            default_order_by: DEFAULT_ORDER_BY.to_string(),
            initial_sort: SortDirection::Asc,
            fields: default_fields(),
            operators: OperatorMap::sql_defaults(),
            passthrough_fields: false,
        }
    }
}

impl PaginationConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> PaginationResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            PaginationError::config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let config = Self::from_json(&content)?;

        tracing::debug!(
            event = %Event::ConfigLoaded,
            path = %path.display(),
            default_limit = config.default_limit,
            max_limit = config.max_limit,
            fields = config.fields.len(),
            "configuration loaded"
        );

        Ok(config)
    }

    /// Parse and validate configuration from a JSON string
    pub fn from_json(content: &str) -> PaginationResult<Self> {
        let config: PaginationConfig = serde_json::from_str(content)
            .map_err(|e| PaginationError::config(format!("Invalid config JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> PaginationResult<()> {
        if self.max_limit == 0 {
            return Err(PaginationError::config("max_limit must be > 0"));
        }

        if self.default_limit > self.max_limit {
            return Err(PaginationError::config(format!(
                "default_limit {} exceeds max_limit {}",
                self.default_limit, self.max_limit
            )));
        }

        if self.default_order_by.trim().is_empty() {
            return Err(PaginationError::config("default_order_by cannot be empty"));
        }

        for column in self.fields.values() {
            check_identifier(column)?;
        }

        if self.field_map().resolve(&self.default_order_by).is_err() {
            return Err(PaginationError::config(format!(
                "default_order_by '{}' has no column mapping",
                self.default_order_by
            )));
        }

        Ok(())
    }

    /// Sets the default page size
    pub fn with_default_limit(mut self, limit: u64) -> Self {
        self.default_limit = limit;
        self
    }

    /// Sets the maximum page size
    pub fn with_max_limit(mut self, limit: u64) -> Self {
        self.max_limit = limit;
        self
    }

    /// Sets the default order field
    pub fn with_default_order_by(mut self, field: impl Into<String>) -> Self {
        self.default_order_by = field.into();
        self
    }

    /// Sets the presentation direction
    pub fn with_initial_sort(mut self, direction: SortDirection) -> Self {
        self.initial_sort = direction;
        self
    }

    /// Adds a field mapping
    pub fn with_field(mut self, field: impl Into<String>, column: impl Into<String>) -> Self {
        self.fields.insert(field.into(), column.into());
        self
    }

    /// Replaces the operator map
    pub fn with_operators(mut self, operators: OperatorMap) -> Self {
        self.operators = operators;
        self
    }

    /// Lets unmapped fields pass through verbatim
    pub fn with_passthrough_fields(mut self, passthrough: bool) -> Self {
        self.passthrough_fields = passthrough;
        self
    }

    /// Field map described by this config
    pub fn field_map(&self) -> FieldMap {
        FieldMap {
            columns: self.fields.clone(),
            passthrough: self.passthrough_fields,
        }
    }

    /// Translator built from this config's maps
    pub fn translator(&self) -> FilterTranslator {
        FilterTranslator::new(self.field_map(), self.operators.clone())
    }
}

/// Rejects engine identifiers that are unsafe to interpolate.
///
/// Accepts `[A-Za-z_][A-Za-z0-9_.]*`, which covers plain and qualified names.
pub fn check_identifier(name: &str) -> PaginationResult<()> {
    static IDENTIFIER: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();
    let pattern = IDENTIFIER
        .get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_.]*$"))
        .as_ref()
        .map_err(|e| PaginationError::config(e.to_string()))?;

    if pattern.is_match(name) {
        Ok(())
    } else {
        Err(PaginationError::InvalidIdentifier(name.to_string()))
    }
}
