//! Solid construction from a heightfield: dual vertex grid, surface
//! triangulation, and perimeter wall stitching.
#![forbid(unsafe_code)]

mod audit;
mod grid;
mod surface;
mod walls;

pub use audit::{AuditReport, audit_faces};
pub use grid::vertex_grid;
pub use surface::{bottom_faces, bottom_row_faces, top_faces, top_row_faces};
pub use walls::wall_faces;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MeshError {
    #[error("grid {rows}x{cols} needs more vertex indices than u32 can address")]
    GridTooLarge { rows: usize, cols: usize },

    #[error("vertex buffer allocation failed: {0}")]
    Allocation(#[from] std::collections::TryReserveError),
}

/// One triangle as three indices into the dual vertex grid. Winding order
/// determines the outward-normal direction.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct FaceIdx {
    pub a: u32,
    pub b: u32,
    pub c: u32,
}

impl FaceIdx {
    #[inline]
    pub const fn new(a: u32, b: u32, c: u32) -> Self {
        Self { a, b, c }
    }

    #[inline]
    pub fn indices(self) -> [u32; 3] {
        [self.a, self.b, self.c]
    }

    #[inline]
    pub fn max_index(self) -> u32 {
        self.a.max(self.b).max(self.c)
    }
}

/// Total vertices in the dual grid: one top and one bottom per raster cell.
#[inline]
pub fn vertex_count(rows: usize, cols: usize) -> usize {
    2 * rows * cols
}

/// Total triangles in the closed solid: top and bottom surfaces plus the
/// four perimeter wall loops.
#[inline]
pub fn face_count(rows: usize, cols: usize) -> usize {
    4 * (rows - 1) * (cols - 1) + 4 * (rows - 1) + 4 * (cols - 1)
}

/// The full ordered face list: top surface rows, bottom surface rows, then
/// the four wall loops. This ordering is the contract the parallel
/// assembler reproduces.
pub fn all_faces(rows: u32, cols: u32) -> Vec<FaceIdx> {
    let mut faces = Vec::with_capacity(face_count(rows as usize, cols as usize));
    faces.extend(top_faces(rows, cols));
    faces.extend(bottom_faces(rows, cols));
    faces.extend(wall_faces(rows, cols));
    faces
}
