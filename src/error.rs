use thiserror::Error;

/// Error kinds surfaced by the monitor core.
///
/// None of these are fatal: a failed sampling cycle leaves the table
/// stale until the next scheduled refresh succeeds.
#[derive(Debug, Error)]
pub enum Error {
    /// The process table could not be sampled this cycle. The store
    /// keeps its last-known-good contents.
    #[error("process sampling failed: {0}")]
    SamplingFailed(String),

    /// A user id could not be resolved to a name. The cache stores a
    /// numeric placeholder so the lookup is not retried.
    #[error("could not resolve user id {0}")]
    IdentityResolutionFailed(u32),

    /// A table accessor was called with an out-of-range index. This is
    /// a logic fault in the caller, not an environmental condition.
    #[error("table accessor out of range: row {row}, column {column}")]
    AccessorOutOfRange { row: usize, column: usize },
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::SamplingFailed(err.to_string())
    }
}
