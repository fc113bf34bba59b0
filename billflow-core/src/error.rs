use thiserror::Error;

/// Errors raised while reading raw rows from the record store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing collection for a document kind does not exist.
    #[error("record source not found: {0}")]
    SourceNotFound(String),

    /// Any other database failure.
    #[error("record store query failed: {0}")]
    Query(#[from] sqlx::Error),
}

/// Errors that abort a report request.
///
/// The report is all-or-nothing: any of these surfaces as an
/// `{ "error": message }` envelope and no partial statistics are
/// ever returned.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("invalid period {0:?}: expected monthly, yearly or all")]
    InvalidPeriod(String),

    #[error("invalid month {0}: expected 0..=11")]
    InvalidMonth(u32),

    #[error("invalid year {0}")]
    InvalidYear(i32),

    #[error(transparent)]
    Store(#[from] StoreError),
}
