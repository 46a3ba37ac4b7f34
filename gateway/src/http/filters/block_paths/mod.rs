use http::status::InvalidStatusCode;
use thiserror::Error;

mod handler;
mod matchers;

pub use handler::*;
pub use matchers::*;

#[derive(Debug, Error)]
pub enum BlockPathsFilterError {
    #[error("the regex list is empty")]
    EmptyRuleSet,

    #[error("error compiling regex {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid status code {status_code}: {source}")]
    InvalidStatusCode {
        status_code: u16,
        #[source]
        source: InvalidStatusCode,
    },
}
