// Image transforms — preprocessing pipeline applied before a sample is served
//
// All ops operate on RGB8 buffers and expose a single `apply(image) -> image`
// contract. A Pipeline runs an ordered sequence of ops and finishes with a
// typed tensor-conversion step, so ordering constraints hold by construction:
// geometric warps run before the resize they feed, and normalization is last.

use image::imageops::FilterType;
use image::{imageops, DynamicImage, Rgb, RgbImage};
use rand::{thread_rng, Rng};

// RandomAffine

/// Random rotation, translation, and scaling about the image center.
///
/// Angle is drawn from `[-degrees, +degrees]`, translation from
/// `[-translate * size, +translate * size]` per axis, and scale from
/// `[scale.0, scale.1]`. Pixels mapped from outside the source are set to
/// `fill`. Sampling is inverse-mapped nearest-neighbour.
#[derive(Debug, Clone)]
pub struct RandomAffine {
    /// Maximum rotation in degrees (either direction).
    pub degrees: f64,
    /// Maximum translation as a fraction of (width, height).
    pub translate: (f64, f64),
    /// Scale factor range (min, max).
    pub scale: (f64, f64),
    /// Fill value for pixels outside the source image.
    pub fill: u8,
}

impl RandomAffine {
    pub fn apply(&self, img: RgbImage) -> RgbImage {
        let (w, h) = img.dimensions();
        let mut rng = thread_rng();

        let angle = rng.gen_range(-self.degrees..=self.degrees).to_radians();
        let tx = {
            let max = self.translate.0 * w as f64;
            rng.gen_range(-max..=max)
        };
        let ty = {
            let max = self.translate.1 * h as f64;
            rng.gen_range(-max..=max)
        };
        let scale = rng.gen_range(self.scale.0..=self.scale.1);

        let (cx, cy) = (w as f64 / 2.0, h as f64 / 2.0);
        let (sin, cos) = angle.sin_cos();

        let mut out = RgbImage::from_pixel(w, h, Rgb([self.fill; 3]));
        for y in 0..h {
            for x in 0..w {
                // Invert (rotate, scale about center, then translate)
                let dx = x as f64 - cx - tx;
                let dy = y as f64 - cy - ty;
                let sx = ((cos * dx + sin * dy) / scale + cx).round();
                let sy = ((-sin * dx + cos * dy) / scale + cy).round();
                if sx >= 0.0 && sy >= 0.0 && (sx as u32) < w && (sy as u32) < h {
                    out.put_pixel(x, y, *img.get_pixel(sx as u32, sy as u32));
                }
            }
        }
        out
    }
}

// ColorJitter

/// Randomly adjust brightness, contrast, and saturation.
///
/// Each factor is drawn from `[1 - x, 1 + x]` for its jitter amount `x`:
///
/// brightness: `v' = v * b`
/// contrast:   `v' = gray_mean + (v - gray_mean) * c`
/// saturation: `v' = gray(v) + (v - gray(v)) * s` per pixel
#[derive(Debug, Clone)]
pub struct ColorJitter {
    pub brightness: f64,
    pub contrast: f64,
    pub saturation: f64,
}

/// Rec. 601 luma weights, used for contrast and saturation adjustment.
fn luma(p: &Rgb<u8>) -> f64 {
    0.299 * p.0[0] as f64 + 0.587 * p.0[1] as f64 + 0.114 * p.0[2] as f64
}

impl ColorJitter {
    pub fn apply(&self, mut img: RgbImage) -> RgbImage {
        let mut rng = thread_rng();

        if self.brightness > 0.0 {
            let b = rng.gen_range(1.0 - self.brightness..=1.0 + self.brightness);
            for p in img.pixels_mut() {
                for v in &mut p.0 {
                    *v = (*v as f64 * b).round().clamp(0.0, 255.0) as u8;
                }
            }
        }

        if self.contrast > 0.0 {
            let c = rng.gen_range(1.0 - self.contrast..=1.0 + self.contrast);
            let npix = (img.width() * img.height()) as f64;
            let mean: f64 = img.pixels().map(luma).sum::<f64>() / npix;
            for p in img.pixels_mut() {
                for v in &mut p.0 {
                    *v = (mean + (*v as f64 - mean) * c).round().clamp(0.0, 255.0) as u8;
                }
            }
        }

        if self.saturation > 0.0 {
            let s = rng.gen_range(1.0 - self.saturation..=1.0 + self.saturation);
            for p in img.pixels_mut() {
                let gray = luma(p);
                for v in &mut p.0 {
                    *v = (gray + (*v as f64 - gray) * s).round().clamp(0.0, 255.0) as u8;
                }
            }
        }

        img
    }
}

// CenterCrop

/// Crop a fixed `height × width` region from the image center.
///
/// When the image is smaller than the crop window along an axis, the output
/// is zero-padded symmetrically along that axis.
#[derive(Debug, Clone, Copy)]
pub struct CenterCrop {
    pub height: u32,
    pub width: u32,
}

impl CenterCrop {
    pub fn apply(&self, img: RgbImage) -> RgbImage {
        let (w, h) = img.dimensions();
        // Negative offsets mean the source is smaller: pad with zeros.
        let left = (w as i64 - self.width as i64) / 2;
        let top = (h as i64 - self.height as i64) / 2;

        let mut out = RgbImage::new(self.width, self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                let sx = x as i64 + left;
                let sy = y as i64 + top;
                if sx >= 0 && sy >= 0 && (sx as u32) < w && (sy as u32) < h {
                    out.put_pixel(x, y, *img.get_pixel(sx as u32, sy as u32));
                }
            }
        }
        out
    }
}

// Resize

/// Resize to a fixed `height × width` using bilinear filtering.
#[derive(Debug, Clone, Copy)]
pub struct Resize {
    pub height: u32,
    pub width: u32,
}

impl Resize {
    pub fn apply(&self, img: RgbImage) -> RgbImage {
        imageops::resize(&img, self.width, self.height, FilterType::Triangle)
    }
}

// ImageOp — the polymorphic image-space transform

/// One image-space preprocessing step.
///
/// A pipeline is an ordered `Vec<ImageOp>`; each variant maps an RGB8 image
/// to an RGB8 image, so steps compose in any order the caller writes down.
#[derive(Debug, Clone)]
pub enum ImageOp {
    RandomAffine(RandomAffine),
    ColorJitter(ColorJitter),
    CenterCrop(CenterCrop),
    Resize(Resize),
}

impl ImageOp {
    pub fn apply(&self, img: RgbImage) -> RgbImage {
        match self {
            ImageOp::RandomAffine(t) => t.apply(img),
            ImageOp::ColorJitter(t) => t.apply(img),
            ImageOp::CenterCrop(t) => t.apply(img),
            ImageOp::Resize(t) => t.apply(img),
        }
    }
}

// ToNormalizedTensor — the typed pipeline tail

/// Per-channel normalization parameters, supplied by external configuration.
#[derive(Debug, Clone)]
pub struct NormalizeParams {
    pub mean: [f64; 3],
    pub std: [f64; 3],
}

impl Default for NormalizeParams {
    /// Maps `[0, 1]` pixels to `[-1, 1]`.
    fn default() -> Self {
        Self {
            mean: [0.5; 3],
            std: [0.5; 3],
        }
    }
}

/// Convert an RGB8 image to a planar `[3, H, W]` tensor in `[0, 1]`, then
/// apply `(v - mean) / std` per channel.
#[derive(Debug, Clone, Default)]
pub struct ToNormalizedTensor {
    params: NormalizeParams,
}

impl ToNormalizedTensor {
    pub fn new(params: NormalizeParams) -> Self {
        Self { params }
    }

    pub fn apply(&self, img: &RgbImage) -> (Vec<f64>, [usize; 3]) {
        let (w, h) = img.dimensions();
        let npix = (w * h) as usize;
        let raw = img.as_raw();

        // Interleaved [H, W, C] to planar [C, H, W]
        let mut data = vec![0.0f64; 3 * npix];
        for c in 0..3 {
            let (mean, std) = (self.params.mean[c], self.params.std[c]);
            for i in 0..npix {
                data[c * npix + i] = (raw[i * 3 + c] as f64 / 255.0 - mean) / std;
            }
        }

        (data, [3, h as usize, w as usize])
    }
}

// Pipeline

/// An ordered preprocessing pipeline: image-space ops, then tensor conversion.
///
/// The caller lists ops in application order; the normalized tensor
/// conversion always runs last.
#[derive(Debug, Clone)]
pub struct Pipeline {
    ops: Vec<ImageOp>,
    to_tensor: ToNormalizedTensor,
}

impl Pipeline {
    pub fn new(ops: Vec<ImageOp>, to_tensor: ToNormalizedTensor) -> Self {
        Self { ops, to_tensor }
    }

    /// Run the pipeline on a freshly decoded image.
    pub fn apply(&self, img: DynamicImage) -> (Vec<f64>, [usize; 3]) {
        let mut rgb = img.to_rgb8();
        for op in &self.ops {
            rgb = op.apply(rgb);
        }
        self.to_tensor.apply(&rgb)
    }
}

// Tests
