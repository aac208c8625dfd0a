//! # memenet-data
//!
//! Dataset adapter feeding labeled meme images into a training harness.
//!
//! This crate provides:
//! - [`Dataset`] trait — indexed access to (image tensor, label) samples
//! - [`Manifest`] — `labels.txt` reader mapping filenames to class ids
//! - [`MemesDataset`] — a split bound to a directory root and a pipeline
//! - [`Pipeline`] / [`ImageOp`] — ordered image preprocessing steps
//! - [`memes_get_datasets`] — factory building the train/test splits
//! - [`Registry`] — explicit catalog the harness selects datasets from
//!
//! Batching, shuffling, and worker pools are the harness's concern: each
//! `get` is stateless, so samples may be fetched concurrently as-is.

pub mod dataset;
pub mod error;
pub mod manifest;
pub mod memes;
pub mod registry;
pub mod transform;

pub use dataset::{Dataset, Sample};
pub use error::{DataError, Result};
pub use manifest::{Manifest, ManifestEntry, MANIFEST_NAME};
pub use memes::{
    memes_descriptor, memes_get_datasets, MemesDataset, MEMES_INPUT_SHAPE, MEMES_NUM_CLASSES,
};
pub use registry::{DataConfig, DatasetDescriptor, LoaderFn, Registry, SplitPair};
pub use transform::{
    CenterCrop, ColorJitter, ImageOp, NormalizeParams, Pipeline, RandomAffine, Resize,
    ToNormalizedTensor,
};
