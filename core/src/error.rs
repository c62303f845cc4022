use thiserror::Error;

/// Fatal problems detected while building an [`crate::Engine`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("invalid corpus: {0}")]
    InvalidCorpus(String),
}

/// Query-time failures. These are expected user-input conditions, not faults.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecommendError {
    #[error("the movie '{0}' was not found")]
    NotFound(String),
}

/// Errors raised while reading the movie and credits tables.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },
    #[error("{path} has no {expected} column")]
    MissingColumn { path: String, expected: String },
}
