use thiserror::Error;

/// Errors surfaced by the crate.
///
/// Most navigation edge cases degrade silently instead of failing; the only
/// hard error is a route pattern that cannot be compiled.
#[derive(Debug, Error)]
pub enum Error {
    /// A route pattern is not a valid regular expression.
    #[error("invalid route pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
