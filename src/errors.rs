//! # Pagination Errors
//!
//! Error taxonomy shared by the codec, translator, compiler and assembler.
//!
//! Every error is a request-shape or configuration error. None are transient,
//! so none are retried, and none are recovered from by guessing.

use thiserror::Error;

use crate::cursor::CursorDecodeError;

/// Result type for pagination operations
pub type PaginationResult<T> = Result<T, PaginationError>;

/// Pagination errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaginationError {
    // ==================
    // Request Errors
    // ==================
    /// Cursor token could not be decoded by the configured codec
    #[error("Malformed cursor: {0}")]
    MalformedCursor(String),

    /// Both `before` and `after` were supplied
    #[error("Ambiguous paging direction: cursor.before and cursor.after are mutually exclusive")]
    AmbiguousPagingDirection,

    /// Page size is zero, negative, or above the configured maximum
    #[error("Invalid page size {size} (must be between 1 and {max})")]
    InvalidPageSize { size: i64, max: u64 },

    /// Requested order differs from the order embedded in the cursor
    #[error("Order mismatch: cursor is ordered by '{cursor}', request asked for '{requested}'")]
    OrderMismatch { cursor: String, requested: String },

    /// Requested filter differs from the filter embedded in the cursor
    #[error("Filter mismatch: the filter argument differs from the filter stored in the cursor")]
    FilterMismatch,

    // ==================
    // Mapping Errors
    // ==================
    /// Logical field has no engine mapping
    #[error("Unknown filter field: {0}")]
    UnknownField(String),

    /// Filter operator has no engine mapping
    #[error("Unknown filter operator: {0}")]
    UnknownOperator(String),

    /// Engine identifier is not safe to render
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    // ==================
    // Internal Errors
    // ==================
    /// Codec failed to serialize a cursor state
    #[error("Cursor encoding failed: {0}")]
    CursorEncoding(String),

    /// Configuration is invalid
    #[error("Configuration error: {0}")]
    Config(String),
}

impl PaginationError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            PaginationError::MalformedCursor(_) => "PAGE_MALFORMED_CURSOR",
            PaginationError::AmbiguousPagingDirection => "PAGE_AMBIGUOUS_DIRECTION",
            PaginationError::InvalidPageSize { .. } => "PAGE_INVALID_PAGE_SIZE",
            PaginationError::OrderMismatch { .. } => "PAGE_ORDER_MISMATCH",
            PaginationError::FilterMismatch => "PAGE_FILTER_MISMATCH",
            PaginationError::UnknownField(_) => "PAGE_UNKNOWN_FIELD",
            PaginationError::UnknownOperator(_) => "PAGE_UNKNOWN_OPERATOR",
            PaginationError::InvalidIdentifier(_) => "PAGE_INVALID_IDENTIFIER",
            PaginationError::CursorEncoding(_) => "PAGE_CURSOR_ENCODING",
            PaginationError::Config(_) => "PAGE_CONFIG_ERROR",
        }
    }

    /// Returns true if the client sent a bad request.
    ///
    /// Everything else is a deployment problem: a missing mapping, an unsafe
    /// identifier, or a broken codec.
    pub fn is_request_error(&self) -> bool {
        matches!(
            self,
            PaginationError::MalformedCursor(_)
                | PaginationError::AmbiguousPagingDirection
                | PaginationError::InvalidPageSize { .. }
                | PaginationError::OrderMismatch { .. }
                | PaginationError::FilterMismatch
        )
    }

    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

impl From<CursorDecodeError> for PaginationError {
    fn from(err: CursorDecodeError) -> Self {
        Self::MalformedCursor(err.to_string())
    }
}
