//! Error types for marginalia.

use thiserror::Error;

/// Result type for marginalia operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for marginalia operations.
///
/// Both kinds describe malformed input data. Set union, intersection,
/// merging and queries never fail.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A raw highlight record had a coordinate sequence that is neither
    /// a text span (2 values) nor a picture region (4 values).
    #[error("Highlights with {0} dimensions not supported")]
    UnsupportedHighlightShape(usize),

    /// The base resource locator of an item could not be parsed, so no
    /// fragment-qualified locator can be derived from it.
    #[error("Malformed locator {locator:?}: {source}")]
    MalformedLocator {
        /// The raw locator as it was supplied.
        locator: String,
        /// Underlying parse failure.
        #[source]
        source: url::ParseError,
    },
}

impl Error {
    /// Create an unsupported highlight shape error.
    #[must_use]
    pub fn unsupported_shape(len: usize) -> Self {
        Error::UnsupportedHighlightShape(len)
    }

    /// Create a malformed locator error.
    #[must_use]
    pub fn malformed_locator(locator: impl Into<String>, source: url::ParseError) -> Self {
        Error::MalformedLocator {
            locator: locator.into(),
            source,
        }
    }
}
