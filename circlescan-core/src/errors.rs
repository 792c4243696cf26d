use thiserror::Error;

#[derive(Error, Debug)]
pub enum CircleScanError {
    #[error("Malformed alignment: {0}")]
    MalformedAlignment(String),

    #[error("Output destination is not usable: {0}")]
    InvalidSink(String),

    #[error("Can't parse cigar string: {0}")]
    InvalidCigar(String),

    #[error("Reference sequence id not present in header: {0}")]
    UnknownReference(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type alias for circlescan operations.
pub type Result<T> = std::result::Result<T, CircleScanError>;
