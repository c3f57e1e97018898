/// The only error shapes a repository may return. Storage-engine errors are
/// translated into one of these at the persistence boundary and never escape
/// upward; the response layer maps NotFound -> 404, KeyConflict -> 409 and
/// Internal -> 500.
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("record not found")]
    NotFound,

    #[error("unique key conflict")]
    KeyConflict,

    /// Anything else: connectivity, transaction lifecycle failure, unexpected
    /// storage error. The message carries full detail for server-side logging
    /// and is not meant to be shown to callers.
    #[error("internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn internal(context: impl Into<String>) -> Self {
        DomainError::Internal(context.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DomainError::NotFound)
    }

    pub fn is_key_conflict(&self) -> bool {
        matches!(self, DomainError::KeyConflict)
    }
}
