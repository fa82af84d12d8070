//! Error types for job-extract.
//!
//! The extraction tiers themselves never fail: malformed markup, broken
//! JSON-LD and unparsable URLs are recovered where they occur. Errors only
//! surface at the edges, when validating caller input or when the fetch
//! collaborator reports a failure.

/// Error type for pipeline entry points.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input could not be used as a job posting URL.
    #[error("Invalid job URL: {0}")]
    InvalidUrl(String),

    /// The fetch collaborator could not deliver the page.
    #[error("Fetching {url} failed: {message}")]
    Fetch {
        /// URL that was requested (the canonical form when one was resolved).
        url: String,
        /// HTTP status, when the server answered at all.
        status: Option<u16>,
        /// Human-readable reason reported by the fetcher.
        message: String,
    },

    /// No tier produced meaningful job content.
    #[error("No meaningful job content found")]
    NoContent,
}

/// Result type alias for pipeline entry points.
pub type Result<T> = std::result::Result<T, Error>;
