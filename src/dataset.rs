// Dataset trait — indexed access to (image tensor, label) pairs

use crate::error::Result;

/// A single sample: a decoded, preprocessed image plus its class label.
///
/// The image is stored as planar `[C, H, W]` data (channel-first, row-major)
/// so the training harness can batch samples into tensors directly.
#[derive(Debug, Clone)]
pub struct Sample {
    /// Pixel data in `[C, H, W]` layout.
    pub image: Vec<f64>,
    /// Shape of the image tensor, `[channels, height, width]`.
    pub shape: [usize; 3],
    /// Class id from the label manifest.
    pub label: usize,
}

/// An indexed collection of labeled image samples.
///
/// Implementations must be `Send + Sync`: each `get` call is stateless with
/// respect to other calls, so an external harness may fetch samples from
/// multiple workers without locking.
pub trait Dataset: Send + Sync {
    /// Total number of samples.
    fn len(&self) -> usize;

    /// Whether the dataset is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Retrieve the sample at position `index`.
    ///
    /// Samples are produced on demand, never cached: a repeated fetch of the
    /// same index re-runs the transform pipeline, so randomized augmentations
    /// yield a fresh tensor each time. Fails with
    /// [`DataError::IndexOutOfRange`](crate::DataError::IndexOutOfRange) when
    /// `index >= len()` and with
    /// [`DataError::ImageDecode`](crate::DataError::ImageDecode) when the
    /// underlying file is unreadable or corrupt.
    fn get(&self, index: usize) -> Result<Sample>;

    /// Optional human-readable name.
    fn name(&self) -> &str {
        "dataset"
    }
}
