use thiserror::Error;

/// Enum with all errors in this crate.
///
/// The index structures themselves never fail: their operations report
/// presence/absence through `bool` return values. Errors only arise at the
/// edges, e.g. when loading a dataset from disk.
#[derive(Error, Debug)]
pub enum PointIndexError {
    #[error("General error: {0}")]
    General(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PointIndexError>;
