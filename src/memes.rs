// MemesDataset — labeled meme images with per-split preprocessing
//
// Directory layout convention:
//
//   <data_dir>/memes/train/   labels.txt + referenced image files
//   <data_dir>/memes/test/    labels.txt + referenced image files
//
// The manifest is read eagerly at construction (fail fast); images are
// decoded and transformed lazily on each `get`.

use std::path::{Path, PathBuf};

use crate::dataset::{Dataset, Sample};
use crate::error::{DataError, Result};
use crate::manifest::{Manifest, ManifestEntry};
use crate::registry::{DataConfig, DatasetDescriptor, SplitPair};
use crate::transform::{
    CenterCrop, ColorJitter, ImageOp, NormalizeParams, Pipeline, RandomAffine, Resize,
    ToNormalizedTensor,
};

/// Number of meme classes.
pub const MEMES_NUM_CLASSES: usize = 4;

/// Per-sample input shape after preprocessing, `[channels, height, width]`.
pub const MEMES_INPUT_SHAPE: [usize; 3] = [3, 64, 64];

/// A split of the meme dataset: an ordered entry table bound to a directory
/// root plus an optional preprocessing pipeline.
///
/// Immutable after construction. Samples are regenerated on every access, so
/// a randomized train pipeline yields a fresh augmentation per fetch.
#[derive(Debug)]
pub struct MemesDataset {
    entries: Vec<ManifestEntry>,
    img_dir: PathBuf,
    pipeline: Option<Pipeline>,
}

impl MemesDataset {
    /// Build a split from a directory containing `labels.txt` and images.
    ///
    /// Fails immediately if the manifest is missing or malformed; image
    /// files are only touched later, by `get`.
    pub fn new(img_dir: impl Into<PathBuf>, pipeline: Option<Pipeline>) -> Result<Self> {
        let img_dir = img_dir.into();
        let manifest = Manifest::load(&img_dir, MEMES_NUM_CLASSES)?;
        Ok(Self {
            entries: manifest.into_entries(),
            img_dir,
            pipeline,
        })
    }

    /// The directory this split resolves image paths against.
    pub fn img_dir(&self) -> &Path {
        &self.img_dir
    }

    /// The manifest label for row `index`, without touching the image.
    pub fn label_of(&self, index: usize) -> Option<usize> {
        self.entries.get(index).map(|e| e.label)
    }
}

impl Dataset for MemesDataset {
    fn len(&self) -> usize {
        self.entries.len()
    }

    fn get(&self, index: usize) -> Result<Sample> {
        let entry = self
            .entries
            .get(index)
            .ok_or_else(|| DataError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            })?;

        let path = self.img_dir.join(&entry.filename);
        let img = image::open(&path).map_err(|source| DataError::ImageDecode {
            path: path.clone(),
            source,
        })?;

        let (image, shape) = match &self.pipeline {
            Some(pipeline) => pipeline.apply(img),
            // No pipeline: raw planar tensor in [0, 1]
            None => ToNormalizedTensor::new(NormalizeParams {
                mean: [0.0; 3],
                std: [1.0; 3],
            })
            .apply(&img.to_rgb8()),
        };

        Ok(Sample {
            image,
            shape,
            label: entry.label,
        })
    }

    fn name(&self) -> &str {
        "memes"
    }
}

// Split factory

/// Build the requested train/test splits under `<data_dir>/memes/`.
///
/// The train pipeline augments (random affine warp, color jitter) before
/// resizing to 64×64; the test pipeline deterministically center-crops to
/// 960×720 before the same resize. Both end with the configured
/// normalization. Unselected splits come back as `None`.
pub fn memes_get_datasets(
    config: &DataConfig,
    load_train: bool,
    load_test: bool,
) -> Result<(Option<MemesDataset>, Option<MemesDataset>)> {
    let train = if load_train {
        let pipeline = Pipeline::new(
            vec![
                ImageOp::RandomAffine(RandomAffine {
                    degrees: 30.0,
                    translate: (0.5, 0.5),
                    scale: (0.5, 1.5),
                    fill: 0,
                }),
                ImageOp::ColorJitter(ColorJitter {
                    brightness: 0.2,
                    contrast: 0.2,
                    saturation: 0.2,
                }),
                ImageOp::Resize(Resize {
                    height: 64,
                    width: 64,
                }),
            ],
            ToNormalizedTensor::new(config.normalize.clone()),
        );
        Some(MemesDataset::new(
            config.data_dir.join("memes").join("train"),
            Some(pipeline),
        )?)
    } else {
        None
    };

    let test = if load_test {
        let pipeline = Pipeline::new(
            vec![
                // 960×720 is the dimension of the raw test captures
                ImageOp::CenterCrop(CenterCrop {
                    height: 960,
                    width: 720,
                }),
                ImageOp::Resize(Resize {
                    height: 64,
                    width: 64,
                }),
            ],
            ToNormalizedTensor::new(config.normalize.clone()),
        );
        Some(MemesDataset::new(
            config.data_dir.join("memes").join("test"),
            Some(pipeline),
        )?)
    } else {
        None
    };

    Ok((train, test))
}

/// Registry-compatible wrapper over [`memes_get_datasets`].
fn memes_loader(config: &DataConfig, load_train: bool, load_test: bool) -> Result<SplitPair> {
    let (train, test) = memes_get_datasets(config, load_train, load_test)?;
    Ok((
        train.map(|d| Box::new(d) as Box<dyn Dataset>),
        test.map(|d| Box::new(d) as Box<dyn Dataset>),
    ))
}

/// Descriptor for registering this dataset with a [`Registry`](crate::Registry).
pub fn memes_descriptor() -> DatasetDescriptor {
    DatasetDescriptor {
        name: "memes",
        input_shape: MEMES_INPUT_SHAPE,
        class_names: (0..MEMES_NUM_CLASSES).map(|c| c.to_string()).collect(),
        loader: memes_loader,
    }
}

// Tests
