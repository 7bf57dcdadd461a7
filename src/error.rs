//! Error types for search operations.
//!
//! Request problems are reported as [`InvalidRequest`] before any backend
//! query runs. Everything the backend raises is carried through untouched in
//! [`SearchError::Backend`].

use thiserror::Error;

/// Error type returned by a [`SearchBackend`](crate::store::SearchBackend).
pub type BackendError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type alias for search operations
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors produced by a search call
#[derive(Debug, Error)]
pub enum SearchError {
    /// The request was rejected during validation; no query was issued
    #[error(transparent)]
    InvalidRequest(#[from] InvalidRequest),

    /// The backing store failed while executing a query
    #[error("backing store failure: {0}")]
    Backend(#[source] BackendError),
}

impl SearchError {
    /// Returns the validation failure, if this is one
    pub fn invalid_request(&self) -> Option<&InvalidRequest> {
        match self {
            SearchError::InvalidRequest(reason) => Some(reason),
            SearchError::Backend(_) => None,
        }
    }
}

/// Client-facing validation failures, one per offending field.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidRequest {
    #[error("Latest closing date cannot be before earliest closing date")]
    ClosingDateRange,

    #[error("Minimum or maximum price should not be negative")]
    NegativePrice,

    #[error("Maximum price cannot be less than minimum price")]
    PriceRange,

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Page number should not be less than 1")]
    PageNumber(i64),

    #[error("Cannot return page with 0 or less contents")]
    PageSize(i64),

    #[error("Unknown sort column '{column}' for {entity} search")]
    UnknownSortColumn { entity: &'static str, column: String },

    #[error("Unknown order direction '{0}', expected 'asc' or 'desc'")]
    UnknownOrder(String),

    #[error("{filter} filter is not supported for {entity} search")]
    UnsupportedFilter {
        entity: &'static str,
        filter: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;
    use std::io;

    #[test]
    fn test_invalid_request_messages() {
        assert_eq!(
            InvalidRequest::PageNumber(0).to_string(),
            "Page number should not be less than 1"
        );
        assert_eq!(
            InvalidRequest::ClosingDateRange.to_string(),
            "Latest closing date cannot be before earliest closing date"
        );
        let err = InvalidRequest::UnknownSortColumn {
            entity: "user",
            column: "shoeSize".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown sort column 'shoeSize' for user search");
    }

    #[test]
    fn test_search_error_is_transparent_for_validation() {
        let err = SearchError::from(InvalidRequest::PriceRange);
        assert_eq!(err.to_string(), "Maximum price cannot be less than minimum price");
        assert_eq!(err.invalid_request(), Some(&InvalidRequest::PriceRange));
    }

    #[test]
    fn test_backend_error_keeps_source() {
        let cause = io::Error::new(io::ErrorKind::ConnectionReset, "connection reset");
        let err = SearchError::Backend(Box::new(cause));

        assert!(err.invalid_request().is_none());
        let source = err.source().expect("backend errors expose their cause");
        let io_err = source.downcast_ref::<io::Error>().expect("cause is unchanged");
        assert_eq!(io_err.kind(), io::ErrorKind::ConnectionReset);
    }
}
