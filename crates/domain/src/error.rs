//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`AutorankError`] via `#[from]`. Adapters wrap their underlying errors
//! (sqlx, migrations) in the boxed [`AutorankError::Storage`] variant so the
//! domain stays free of IO dependencies.

/// Top-level error type shared by services, ports, and adapters.
#[derive(Debug, thiserror::Error)]
pub enum AutorankError {
    /// A domain invariant was violated by caller-supplied data.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A referenced record does not exist.
    #[error("{0}")]
    NotFound(#[from] NotFoundError),

    /// A uniqueness constraint was violated.
    #[error("{0}")]
    Conflict(#[from] ConflictError),

    /// The persistence layer failed. Carries the adapter-specific source.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Caller-supplied data violated a domain invariant.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// A required name was empty.
    #[error("name must not be empty")]
    EmptyName,

    /// An automation was given no environment reference.
    #[error("environment reference is required")]
    MissingEnvironment,

    /// An automation was given no critical ratio.
    #[error("critical ratio is required")]
    MissingCriticalRatio,

    /// The critical ratio fell outside the closed interval `[0, 1]`.
    #[error("critical ratio must be within [0, 1], got {0}")]
    RatioOutOfRange(f64),

    /// Pagination pages are 1-based.
    #[error("page must be at least 1")]
    ZeroPage,

    /// A page must contain at least one record.
    #[error("limit must be at least 1")]
    ZeroLimit,

    /// An identifier could not be parsed as a UUID.
    #[error("malformed identifier: {0}")]
    InvalidId(String),
}

/// A record was looked up by id or name and does not exist.
#[derive(Debug, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    /// Kind of record, e.g. `"Automation"`.
    pub entity: &'static str,
    /// The id or name that failed to resolve.
    pub id: String,
}

/// A record with the same unique key already exists.
#[derive(Debug, thiserror::Error)]
#[error("{entity} named {name:?} already exists")]
pub struct ConflictError {
    /// Kind of record, e.g. `"Environment"`.
    pub entity: &'static str,
    /// The duplicated unique key.
    pub name: String,
}
