//! Error types for the users module.

use thiserror::Error;

/// Errors that can be returned by a [`crate::UserStore`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No user matches the given username.
    #[error("not found")]
    NotFound,

    /// The supplied password does not match the stored one.
    #[error("invalid password")]
    Unauthenticated,

    /// The caller went away while the store call was in flight.
    #[error("request cancelled")]
    Cancelled,

    /// The per-call deadline expired before the store answered.
    #[error("deadline exceeded")]
    DeadlineExceeded,

    /// Any other backend failure.
    #[error("read from database: {0}")]
    Internal(String),
}

impl StoreError {
    /// Create an `Internal` error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Whether the failure came from cancellation or an expired deadline
    /// rather than from the data itself.
    #[must_use]
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Self::Cancelled | Self::DeadlineExceeded)
    }

    /// gRPC status code this error maps to.
    #[must_use]
    pub fn code(&self) -> tonic::Code {
        match self {
            Self::NotFound => tonic::Code::NotFound,
            Self::Unauthenticated => tonic::Code::Unauthenticated,
            Self::Cancelled => tonic::Code::Cancelled,
            Self::DeadlineExceeded => tonic::Code::DeadlineExceeded,
            Self::Internal(_) => tonic::Code::Internal,
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn cancellation_kinds_are_distinct_from_auth_failures() {
        assert!(StoreError::Cancelled.is_cancellation());
        assert!(StoreError::DeadlineExceeded.is_cancellation());
        assert!(!StoreError::Unauthenticated.is_cancellation());
        assert!(!StoreError::NotFound.is_cancellation());
        assert!(!StoreError::internal("boom").is_cancellation());
    }

    #[test]
    fn maps_to_grpc_codes() {
        assert_eq!(StoreError::NotFound.code(), tonic::Code::NotFound);
        assert_eq!(
            StoreError::Unauthenticated.code(),
            tonic::Code::Unauthenticated
        );
        assert_eq!(
            StoreError::DeadlineExceeded.code(),
            tonic::Code::DeadlineExceeded
        );

        assert_eq!(
            StoreError::internal("connection reset").code(),
            tonic::Code::Internal
        );
        assert_eq!(
            StoreError::internal("connection reset").to_string(),
            "read from database: connection reset"
        );
    }
}
