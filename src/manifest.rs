// Manifest — label file mapping image filenames to class ids
//
// A lightweight delimited-text parser that doesn't require an external CSV
// crate. The file lives inside a split directory under a conventional name:
//
//   train/
//     labels.txt        filename,label  (header row, then one row per sample)
//     doge_001.png
//     doge_002.png
//     ...
//
// Row order is preserved: manifest row i is dataset index i.

use std::fs;
use std::path::Path;

use crate::error::{DataError, Result};

/// Conventional manifest filename inside each split directory.
pub const MANIFEST_NAME: &str = "labels.txt";

/// One manifest row: a relative image filename and its class id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    /// Image filename, relative to the split directory.
    pub filename: String,
    /// Class id, in `0..num_classes`.
    pub label: usize,
}

/// An ordered table of (filename, label) rows, immutable after parsing.
///
/// All validation happens at construction time (fail fast, no partial load):
/// column counts, label parsing, label range, and filename uniqueness.
#[derive(Debug, Clone)]
pub struct Manifest {
    entries: Vec<ManifestEntry>,
}

impl Manifest {
    /// Read and parse `labels.txt` inside the given split directory.
    pub fn load(dir: impl AsRef<Path>, num_classes: usize) -> Result<Self> {
        let path = dir.as_ref().join(MANIFEST_NAME);
        let content = fs::read_to_string(&path).map_err(|e| DataError::ManifestIo {
            path: path.clone(),
            source: e,
        })?;
        Self::from_string(&content, &path, num_classes)
    }

    /// Parse manifest content from an in-memory string.
    ///
    /// `path` is only used for error reporting.
    pub fn from_string(content: &str, path: &Path, num_classes: usize) -> Result<Self> {
        let lines: Vec<(usize, &str)> = content
            .lines()
            .enumerate()
            .map(|(i, l)| (i + 1, l))
            .filter(|(_, l)| !l.trim().is_empty())
            .collect();

        // The header row is mandatory; an empty file is malformed.
        if lines.is_empty() {
            return Err(DataError::ManifestParse {
                path: path.to_path_buf(),
                line: 1,
                msg: "empty manifest (missing header row)".to_string(),
            });
        }

        let mut entries = Vec::with_capacity(lines.len() - 1);

        // Skip the header, parse the rest.
        for &(line_no, line) in &lines[1..] {
            let cols: Vec<&str> = line.split(',').collect();
            if cols.len() != 2 {
                return Err(DataError::ManifestParse {
                    path: path.to_path_buf(),
                    line: line_no,
                    msg: format!("expected 2 columns, got {}", cols.len()),
                });
            }

            let filename = cols[0].trim().to_string();
            if filename.is_empty() {
                return Err(DataError::ManifestParse {
                    path: path.to_path_buf(),
                    line: line_no,
                    msg: "empty filename".to_string(),
                });
            }

            let label: usize = cols[1].trim().parse().map_err(|e| DataError::ManifestParse {
                path: path.to_path_buf(),
                line: line_no,
                msg: format!("bad label {:?}: {}", cols[1].trim(), e),
            })?;

            if label >= num_classes {
                return Err(DataError::LabelOutOfRange {
                    path: path.to_path_buf(),
                    line: line_no,
                    label,
                    num_classes,
                });
            }

            entries.push(ManifestEntry { filename, label });
        }

        // Filenames must be unique within a split.
        let mut seen: Vec<&str> = entries.iter().map(|e| e.filename.as_str()).collect();
        seen.sort_unstable();
        for pair in seen.windows(2) {
            if pair[0] == pair[1] {
                return Err(DataError::DuplicateFilename {
                    path: path.to_path_buf(),
                    filename: pair[0].to_string(),
                });
            }
        }

        Ok(Self { entries })
    }

    /// Number of rows (excluding the header).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the manifest has no rows.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All rows, in file order.
    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    /// The row at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&ManifestEntry> {
        self.entries.get(index)
    }

    /// Consume the manifest, returning its rows.
    pub fn into_entries(self) -> Vec<ManifestEntry> {
        self.entries
    }
}

// Tests
