use std::path::PathBuf;

/// All errors that can occur while loading or serving dataset samples.
///
/// This enum captures every failure mode: missing or malformed manifests,
/// out-of-bounds indexing, image decode failures, and registry conflicts.
/// Using a single error type across the crate simplifies error propagation.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    /// The manifest file could not be read.
    #[error("failed to read manifest {path}: {source}")]
    ManifestIo {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A manifest row could not be parsed (wrong column count, bad label).
    #[error("manifest {path}, line {line}: {msg}")]
    ManifestParse {
        path: PathBuf,
        line: usize,
        msg: String,
    },

    /// A manifest label is outside the declared class set.
    #[error("manifest {path}, line {line}: label {label} out of range (classes 0..{num_classes})")]
    LabelOutOfRange {
        path: PathBuf,
        line: usize,
        label: usize,
        num_classes: usize,
    },

    /// The same filename appears more than once in a manifest.
    #[error("manifest {path}: duplicate filename {filename:?}")]
    DuplicateFilename { path: PathBuf, filename: String },

    /// Sample index out of bounds.
    #[error("index {index} out of range for dataset with {len} samples")]
    IndexOutOfRange { index: usize, len: usize },

    /// An image file was unreadable or corrupt.
    #[error("failed to decode image {path}: {source}")]
    ImageDecode {
        path: PathBuf,
        source: image::ImageError,
    },

    /// A dataset with the same name is already registered.
    #[error("dataset {0:?} is already registered")]
    DuplicateDataset(String),
}

/// Convenience Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, DataError>;
