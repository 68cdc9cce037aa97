use thiserror::Error;

/// Errors surfaced by the harvesting library.
///
/// "No match" conditions (empty candidate set, empty page, missing detail
/// item) are not errors — they come back as empty collections or `None`.
#[derive(Error, Debug)]
pub enum HarvestError {
    /// The search backend could not be reached or its response could not be
    /// decoded as JSON.
    #[error("search backend unavailable: {0}")]
    SearchUnavailable(#[from] reqwest::Error),

    /// The backend answered, but an expected field was missing or had the
    /// wrong shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// A duration token did not contain one or two digit groups.
    #[error("malformed duration token: {0:?}")]
    MalformedDuration(String),
}

pub type Result<T> = std::result::Result<T, HarvestError>;
