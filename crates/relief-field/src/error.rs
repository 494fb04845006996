use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FieldError {
    #[error("failed to decode raster {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("height grid is {rows}x{cols}; meshing needs at least 2x2")]
    Dimension { rows: u32, cols: u32 },

    #[error("subsample {subsample} reduces a {width}x{height} raster below 2x2")]
    SubsampleTooCoarse {
        subsample: u32,
        width: u32,
        height: u32,
    },
}
