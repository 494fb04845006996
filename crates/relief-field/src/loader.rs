use std::path::Path;

use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageBuffer, Luma};

use crate::FieldError;

/// A decoded elevation raster: row-major `f32` samples, one per pixel.
#[derive(Clone, Debug)]
pub struct RawRaster {
    pub width: u32,
    pub height: u32,
    pub samples: Vec<f32>,
}

impl RawRaster {
    pub fn from_samples(width: u32, height: u32, samples: Vec<f32>) -> Result<Self, FieldError> {
        if samples.len() != width as usize * height as usize {
            return Err(FieldError::Dimension {
                rows: height,
                cols: width,
            });
        }
        Ok(Self {
            width,
            height,
            samples,
        })
    }

    /// Resamples to `floor(w/factor) x floor(h/factor)` with a Lanczos3
    /// low-pass filter. `factor == 1` is a no-op.
    pub fn subsample(self, factor: u32) -> Result<RawRaster, FieldError> {
        if factor <= 1 {
            return Ok(self);
        }
        let new_w = self.width / factor;
        let new_h = self.height / factor;
        if new_w < 2 || new_h < 2 {
            return Err(FieldError::SubsampleTooCoarse {
                subsample: factor,
                width: self.width,
                height: self.height,
            });
        }
        let buf: ImageBuffer<Luma<f32>, Vec<f32>> =
            ImageBuffer::from_raw(self.width, self.height, self.samples)
                .expect("sample count matches raster dimensions");
        let resized = imageops::resize(&buf, new_w, new_h, FilterType::Lanczos3);
        log::info!(
            "subsampled raster {}x{} -> {}x{}",
            self.width,
            self.height,
            new_w,
            new_h
        );
        Ok(RawRaster {
            width: new_w,
            height: new_h,
            samples: resized.into_raw(),
        })
    }
}

/// Decodes an elevation raster from disk and applies the subsample factor.
///
/// Float images keep their first channel as-is; integer images are widened
/// through 16-bit grayscale so 16-bit sources keep full precision.
pub fn decode_raster(path: &Path, subsample: u32) -> Result<RawRaster, FieldError> {
    let img = image::open(path).map_err(|source| FieldError::Load {
        path: path.to_path_buf(),
        source,
    })?;
    let width = img.width();
    let height = img.height();
    let samples = first_channel_f32(img);

    let (lo, hi) = sample_range(&samples);
    log::info!("decoded raster {path:?}: {width}x{height}, elevation {lo}..{hi}");

    RawRaster::from_samples(width, height, samples)?.subsample(subsample)
}

fn first_channel_f32(img: DynamicImage) -> Vec<f32> {
    match img {
        DynamicImage::ImageLuma8(buf) => buf.into_raw().into_iter().map(f32::from).collect(),
        DynamicImage::ImageLuma16(buf) => buf.into_raw().into_iter().map(f32::from).collect(),
        DynamicImage::ImageRgb32F(buf) => buf.pixels().map(|p| p.0[0]).collect(),
        DynamicImage::ImageRgba32F(buf) => buf.pixels().map(|p| p.0[0]).collect(),
        other => other
            .to_luma16()
            .into_raw()
            .into_iter()
            .map(f32::from)
            .collect(),
    }
}

fn sample_range(samples: &[f32]) -> (f32, f32) {
    samples.iter().fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
        (lo.min(v), hi.max(v))
    })
}
