// Dataset registry — explicit catalog of available datasets
//
// An external selection mechanism looks datasets up by name and calls the
// descriptor's loader with a shared configuration. Registration is an
// explicit call at startup, never an import-time side effect.

use std::path::PathBuf;

use crate::dataset::Dataset;
use crate::error::{DataError, Result};
use crate::memes::memes_descriptor;
use crate::transform::NormalizeParams;

/// Shared configuration handed to dataset loaders.
#[derive(Debug, Clone)]
pub struct DataConfig {
    /// Base data directory; each dataset appends its own subdirectories.
    pub data_dir: PathBuf,
    /// Normalization parameters for the final pipeline step.
    pub normalize: NormalizeParams,
}

impl DataConfig {
    /// Create a config with default normalization (`[0,1]` → `[-1,1]`).
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            normalize: NormalizeParams::default(),
        }
    }

    /// Override the normalization parameters.
    pub fn normalize(mut self, params: NormalizeParams) -> Self {
        self.normalize = params;
        self
    }
}

/// The (train, test) pair produced by a loader; unselected splits are `None`.
pub type SplitPair = (Option<Box<dyn Dataset>>, Option<Box<dyn Dataset>>);

/// Factory signature: `(config, load_train, load_test)` → split pair.
pub type LoaderFn = fn(&DataConfig, bool, bool) -> Result<SplitPair>;

/// Descriptive metadata for one registered dataset.
#[derive(Debug, Clone)]
pub struct DatasetDescriptor {
    /// Lookup key, e.g. `"memes"`.
    pub name: &'static str,
    /// Per-sample input shape `[channels, height, width]`.
    pub input_shape: [usize; 3],
    /// Human-readable class names, index = class id.
    pub class_names: Vec<String>,
    /// Factory building the train/test splits.
    pub loader: LoaderFn,
}

/// A catalog of dataset descriptors keyed by name.
#[derive(Debug, Default)]
pub struct Registry {
    entries: Vec<DatasetDescriptor>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry pre-populated with every dataset this crate ships.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry
            .register(memes_descriptor())
            .expect("builtin descriptors have unique names");
        registry
    }

    /// Add a descriptor. Fails if the name is already taken.
    pub fn register(&mut self, descriptor: DatasetDescriptor) -> Result<()> {
        if self.get(descriptor.name).is_some() {
            return Err(DataError::DuplicateDataset(descriptor.name.to_string()));
        }
        self.entries.push(descriptor);
        Ok(())
    }

    /// Look a dataset up by name.
    pub fn get(&self, name: &str) -> Option<&DatasetDescriptor> {
        self.entries.iter().find(|d| d.name == name)
    }

    /// All registered names, in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|d| d.name).collect()
    }

    /// Number of registered datasets.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// Tests
