// Integration tests: manifest + MemesDataset + split factory + registry
// over an on-disk fixture tree.

use std::fs;
use std::path::Path;

use image::{Rgb, RgbImage};
use tempfile::tempdir;

use memenet_data::{
    memes_get_datasets, DataConfig, DataError, Dataset, MemesDataset, Registry,
};

/// Write a split directory: `labels.txt` plus one image per manifest row.
///
/// Every image is `width × height` with a per-row solid color so samples are
/// distinguishable.
fn write_split(dir: &Path, rows: &[(&str, usize)], width: u32, height: u32) {
    fs::create_dir_all(dir).unwrap();

    let mut manifest = String::from("name,label\n");
    for (i, (name, label)) in rows.iter().enumerate() {
        manifest.push_str(&format!("{name},{label}\n"));
        let v = (40 * (i + 1)).min(255) as u8;
        let img = RgbImage::from_pixel(width, height, Rgb([v, v / 2, 255 - v]));
        img.save(dir.join(name)).unwrap();
    }
    fs::write(dir.join("labels.txt"), manifest).unwrap();
}

// MemesDataset without a pipeline

#[test]
fn dataset_len_and_labels_match_manifest() {
    let tmp = tempdir().unwrap();
    let dir = tmp.path().join("train");
    write_split(&dir, &[("a.png", 1), ("b.png", 3), ("c.png", 0)], 10, 8);

    let ds = MemesDataset::new(&dir, None).unwrap();
    assert_eq!(ds.len(), 3);
    assert!(!ds.is_empty());
    assert_eq!(ds.name(), "memes");

    for (i, expected) in [1usize, 3, 0].iter().enumerate() {
        let sample = ds.get(i).unwrap();
        assert_eq!(sample.label, *expected);
        assert_eq!(sample.label, ds.label_of(i).unwrap());
    }
}

#[test]
fn dataset_without_pipeline_returns_raw_tensor() {
    let tmp = tempdir().unwrap();
    let dir = tmp.path().join("raw");
    write_split(&dir, &[("a.png", 2)], 10, 8);

    let sample = MemesDataset::new(&dir, None).unwrap().get(0).unwrap();
    // Raw planar [C, H, W] in [0, 1]
    assert_eq!(sample.shape, [3, 8, 10]);
    assert_eq!(sample.image.len(), 3 * 8 * 10);
    for &v in &sample.image {
        assert!((0.0..=1.0).contains(&v), "raw pixel {v} not in [0,1]");
    }
}

#[test]
fn get_out_of_range_is_an_error() {
    let tmp = tempdir().unwrap();
    let dir = tmp.path().join("train");
    write_split(&dir, &[("a.png", 0), ("b.png", 1)], 6, 6);

    let ds = MemesDataset::new(&dir, None).unwrap();
    let err = ds.get(ds.len()).unwrap_err();
    assert!(matches!(err, DataError::IndexOutOfRange { index: 2, len: 2 }));
    assert!(ds.get(usize::MAX).is_err());
}

#[test]
fn missing_manifest_fails_at_construction() {
    let tmp = tempdir().unwrap();
    let dir = tmp.path().join("empty");
    fs::create_dir_all(&dir).unwrap();

    let err = MemesDataset::new(&dir, None).unwrap_err();
    assert!(matches!(err, DataError::ManifestIo { .. }));
}

#[test]
fn corrupt_image_fails_at_get_not_construction() {
    let tmp = tempdir().unwrap();
    let dir = tmp.path().join("train");
    write_split(&dir, &[("good.png", 0)], 6, 6);

    // Add a manifest row whose file holds garbage bytes
    let mut manifest = fs::read_to_string(dir.join("labels.txt")).unwrap();
    manifest.push_str("bad.png,1\n");
    fs::write(dir.join("labels.txt"), manifest).unwrap();
    fs::write(dir.join("bad.png"), b"not an image at all").unwrap();

    let ds = MemesDataset::new(&dir, None).unwrap();
    assert_eq!(ds.len(), 2);
    assert!(ds.get(0).is_ok());
    let err = ds.get(1).unwrap_err();
    assert!(matches!(err, DataError::ImageDecode { .. }));
}

// Split factory

#[test]
fn factory_builds_both_splits() {
    let tmp = tempdir().unwrap();
    let root = tmp.path();
    write_split(&root.join("memes/train"), &[("t.png", 0)], 100, 80);
    write_split(&root.join("memes/test"), &[("e.png", 1)], 730, 970);

    let config = DataConfig::new(root);
    let (train, test) = memes_get_datasets(&config, true, true).unwrap();
    assert_eq!(train.unwrap().len(), 1);
    assert_eq!(test.unwrap().len(), 1);
}

#[test]
fn train_pipeline_always_yields_3x64x64() {
    let tmp = tempdir().unwrap();
    let root = tmp.path();
    // Deliberately odd input sizes
    fs::create_dir_all(root.join("memes/train")).unwrap();
    fs::write(
        root.join("memes/train/labels.txt"),
        "name,label\nsmall.png,0\nwide.png,2\n",
    )
    .unwrap();
    RgbImage::from_pixel(33, 90, Rgb([10, 200, 30]))
        .save(root.join("memes/train/small.png"))
        .unwrap();
    RgbImage::from_pixel(257, 41, Rgb([99, 99, 99]))
        .save(root.join("memes/train/wide.png"))
        .unwrap();

    let config = DataConfig::new(root);
    let (train, _) = memes_get_datasets(&config, true, false).unwrap();
    let train = train.unwrap();

    for i in 0..train.len() {
        let sample = train.get(i).unwrap();
        assert_eq!(sample.shape, [3, 64, 64]);
        assert_eq!(sample.image.len(), 3 * 64 * 64);
    }
}

#[test]
fn train_augmentation_never_changes_the_label() {
    let tmp = tempdir().unwrap();
    let root = tmp.path();
    write_split(&root.join("memes/train"), &[("t.png", 3)], 64, 64);

    let config = DataConfig::new(root);
    let (train, _) = memes_get_datasets(&config, true, false).unwrap();
    let train = train.unwrap();

    // Repeated fetches rerun the randomized pipeline; labels must agree
    for _ in 0..5 {
        assert_eq!(train.get(0).unwrap().label, 3);
    }
}

#[test]
fn test_pipeline_center_crops_then_resizes() {
    let tmp = tempdir().unwrap();
    let root = tmp.path();
    fs::create_dir_all(root.join("memes/test")).unwrap();

    // Manifest row ("frog.jpg", 2) at index 0, image at the capture size
    fs::write(root.join("memes/test/labels.txt"), "name,label\nfrog.jpg,2\n").unwrap();
    RgbImage::from_pixel(720, 960, Rgb([120, 60, 30]))
        .save(root.join("memes/test/frog.jpg"))
        .unwrap();

    let config = DataConfig::new(root);
    let (_, test) = memes_get_datasets(&config, false, true).unwrap();
    let test = test.unwrap();

    let sample = test.get(0).unwrap();
    assert_eq!(sample.label, 2);
    assert_eq!(sample.shape, [3, 64, 64]);
}

#[test]
fn test_pipeline_handles_oversized_inputs() {
    let tmp = tempdir().unwrap();
    let root = tmp.path();
    write_split(&root.join("memes/test"), &[("big.png", 1)], 800, 1000);

    let config = DataConfig::new(root);
    let (_, test) = memes_get_datasets(&config, false, true).unwrap();
    let sample = test.unwrap().get(0).unwrap();
    assert_eq!(sample.shape, [3, 64, 64]);
}

// Registry end-to-end

#[test]
fn registry_loader_serves_samples() {
    let tmp = tempdir().unwrap();
    let root = tmp.path();
    write_split(&root.join("memes/test"), &[("e.png", 2)], 720, 960);

    let registry = Registry::builtin();
    let desc = registry.get("memes").unwrap();

    let config = DataConfig::new(root);
    let (train, test) = (desc.loader)(&config, false, true).unwrap();
    assert!(train.is_none());

    let test = test.unwrap();
    let sample = test.get(0).unwrap();
    assert_eq!(sample.label, 2);
    assert_eq!(
        sample.shape.to_vec(),
        desc.input_shape.to_vec(),
        "served sample shape must match the descriptor"
    );
}
