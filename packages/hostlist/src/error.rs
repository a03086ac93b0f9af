use std::result;

use thiserror::Error;

/// Errors that can occur when processing hostlist expressions and related notations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The caller provided a supposed hostlist (or SLURM tasks-per-node string, or a pairing
    /// of hosts with task counts) but it did not match the expected format.
    #[error("bad hostlist: '{invalid_value}' is invalid: {problem}")]
    BadHostlist {
        /// The specific value that was invalid. This may either be the entire input string
        /// or a specific part of it, depending on the problem.
        invalid_value: String,

        /// A human-readable description of the problem.
        problem: String,
    },
}

impl Error {
    pub(crate) fn bad_hostlist(invalid_value: impl Into<String>, problem: impl Into<String>) -> Self {
        Self::BadHostlist {
            invalid_value: invalid_value.into(),
            problem: problem.into(),
        }
    }
}

/// A specialized `Result` type for hostlist operations, returning the crate's
/// [`Error`] type as the error value.
pub(crate) type Result<T> = result::Result<T, Error>;
