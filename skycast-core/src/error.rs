use thiserror::Error;

/// Everything that can end a fetch cycle early.
///
/// All four variants are terminal for the current cycle only: the view shows
/// a one-line message in place of the current-conditions panel and nothing is
/// retried.
#[derive(Debug, Error)]
pub enum Error {
    /// Geocoding returned no results for the query.
    #[error("City not found: '{0}'")]
    NotFound(String),

    /// Transport-level failure, including non-success HTTP statuses.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The upstream answered, but the body was not what we expect.
    #[error("Malformed response: {0}")]
    Decode(String),

    /// The hourly series has no sample matching the current hour.
    #[error("Could not align the hourly forecast to the current hour")]
    Alignment,
}

pub type Result<T> = std::result::Result<T, Error>;
