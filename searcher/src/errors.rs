use thiserror::Error;

/// Error produced when a search can not run to an outcome.
///
/// Running out of candidates or hitting a configured limit are
/// not errors, see [crate::SearchOutcome].
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Attempted to remove a node from an empty frontier")]
    EmptyFrontier,

    /// A problem or heuristic callback failed. The original
    /// error is passed through untouched.
    #[error(transparent)]
    Problem(#[from] anyhow::Error),
}

/// Result when a search method might fail.
pub type Result<T> = std::result::Result<T, SearchError>;
