use thiserror::Error;

/// Errors surfaced by element handles, queries and the wait engine.
///
/// Remote command failures are carried as `Session`; everything else maps to
/// a specific misuse or lookup failure so callers can match on it.
#[derive(Error, Debug)]
pub enum ElementError {
    #[error("Element not found: {0}")]
    NotFound(String),

    /// The backing DOM node of a previously resolved element no longer
    /// exists. Recoverable through `reload` when the handle has a selector.
    #[error("Stale element reference: {0}")]
    Stale(String),

    /// The operation needs a selector, but the handle has none. Raised for
    /// handles obtained from a multi-element query and for type-level
    /// lookups without a default selector.
    #[error("Element has no selector: {0}")]
    NoSelector(String),

    #[error("Operation timed out: {0}")]
    Timeout(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Remote session failure: {0}")]
    Session(String),
}
