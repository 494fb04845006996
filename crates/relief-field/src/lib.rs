//! Heightfield loading and normalization.
#![forbid(unsafe_code)]

mod error;
mod loader;

pub use error::FieldError;
pub use loader::{RawRaster, decode_raster};

use serde::{Deserialize, Serialize};

/// Linear per-axis multipliers applied when the grid is turned into
/// world-space vertices (x/y) and when elevations are normalized (z).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScaleFactors {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl ScaleFactors {
    pub const ONE: ScaleFactors = ScaleFactors {
        x: 1.0,
        y: 1.0,
        z: 1.0,
    };

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

impl Default for ScaleFactors {
    fn default() -> Self {
        Self::ONE
    }
}

/// A normalized elevation grid. Immutable after construction: the minimum
/// elevation has been rebased to zero and the z scale already applied, so the
/// thinnest point of the printed model sits on the base plane.
#[derive(Clone, Debug)]
pub struct HeightField {
    rows: usize,
    cols: usize,
    data: Vec<f32>,
    scale: ScaleFactors,
}

impl HeightField {
    /// Normalizes a decoded raster: rebases the minimum to zero, then applies
    /// `scale.z`. Fails unless the grid is at least 2x2.
    pub fn from_raster(raster: RawRaster, scale: ScaleFactors) -> Result<Self, FieldError> {
        if raster.width < 2 || raster.height < 2 {
            return Err(FieldError::Dimension {
                rows: raster.height,
                cols: raster.width,
            });
        }
        let min = raster
            .samples
            .iter()
            .fold(f32::INFINITY, |lo, &v| lo.min(v));
        let data = raster
            .samples
            .iter()
            .map(|&v| (v - min) * scale.z)
            .collect();
        Ok(Self {
            rows: raster.height as usize,
            cols: raster.width as usize,
            data,
            scale,
        })
    }

    /// Wraps elevations that are already normalized (no rebasing, no z
    /// scaling). Useful for synthetic fields.
    pub fn from_data(
        rows: usize,
        cols: usize,
        data: Vec<f32>,
        scale: ScaleFactors,
    ) -> Result<Self, FieldError> {
        if rows < 2 || cols < 2 || data.len() != rows * cols {
            return Err(FieldError::Dimension {
                rows: rows as u32,
                cols: cols as u32,
            });
        }
        Ok(Self {
            rows,
            cols,
            data,
            scale,
        })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn scale(&self) -> ScaleFactors {
        self.scale
    }

    /// Normalized elevation at grid position `(y, x)`, row-major.
    #[inline]
    pub fn get(&self, y: usize, x: usize) -> f32 {
        self.data[y * self.cols + x]
    }

    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Min and max normalized elevation, for progress reporting.
    pub fn elevation_range(&self) -> (f32, f32) {
        self.data
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }
}
