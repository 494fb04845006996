//! Worker pool and the two data-parallel mesh phases.
#![forbid(unsafe_code)]

use std::thread;
use std::time::Instant;

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use relief_geom::{Triangle, Vec3};
use relief_mesh::{FaceIdx, bottom_row_faces, face_count, top_row_faces, wall_faces};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("failed to build worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),

    #[error("face {face} references vertex {index}, outside the {limit}-vertex grid")]
    FaceIndexOutOfRange {
        face: usize,
        index: u32,
        limit: usize,
    },

    #[error("triangle buffer allocation failed: {0}")]
    Allocation(#[from] std::collections::TryReserveError),
}

/// Bounded worker pool running both parallel phases of mesh construction.
///
/// Both phases join in submission order, so output ordering depends only on
/// the input, never on worker scheduling.
pub struct MeshAssembler {
    pool: ThreadPool,
    workers: usize,
}

impl MeshAssembler {
    pub fn new(workers: usize) -> Result<Self, RuntimeError> {
        let workers = workers.max(1);
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("relief-worker-{i}"))
            .build()?;
        Ok(Self { pool, workers })
    }

    /// Worker count to use when the caller does not pick one.
    pub fn default_workers() -> usize {
        thread::available_parallelism().map(|n| n.get()).unwrap_or(8)
    }

    #[inline]
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Phase 1: the full ordered face list. Top and bottom surface rows are
    /// generated as one task per row and joined in row order; the four wall
    /// loops are appended afterwards. Matches `relief_mesh::all_faces`.
    pub fn generate_faces(&self, rows: u32, cols: u32) -> Result<Vec<FaceIdx>, RuntimeError> {
        let t0 = Instant::now();
        let top: Vec<Vec<FaceIdx>> = self.pool.install(|| {
            (0..rows - 1)
                .into_par_iter()
                .map(|y| top_row_faces(y, cols))
                .collect()
        });
        let bottom: Vec<Vec<FaceIdx>> = self.pool.install(|| {
            (0..rows - 1)
                .into_par_iter()
                .map(|y| bottom_row_faces(y, rows, cols))
                .collect()
        });

        let mut faces = Vec::new();
        faces.try_reserve_exact(face_count(rows as usize, cols as usize))?;
        faces.extend(top.into_iter().flatten());
        faces.extend(bottom.into_iter().flatten());
        faces.extend(wall_faces(rows, cols));

        let ms = t0.elapsed().as_millis();
        log::info!(target: "perf", "ms={} phase=faces n={} rows={} cols={} workers={}", ms, faces.len(), rows, cols, self.workers);
        Ok(faces)
    }

    /// Phase 2: resolves face indices into concrete triangles. The face list
    /// is split into at most `workers` contiguous chunks; each worker reads
    /// the shared vertex slice and chunk outputs are concatenated in chunk
    /// order. A single failing chunk aborts the whole phase.
    pub fn materialize(
        &self,
        faces: &[FaceIdx],
        vertices: &[Vec3],
    ) -> Result<Vec<Triangle>, RuntimeError> {
        let t0 = Instant::now();
        let chunk_size = faces.len().div_ceil(self.workers).max(1);
        let chunks: Vec<Vec<Triangle>> = self.pool.install(|| {
            faces
                .par_chunks(chunk_size)
                .enumerate()
                .map(|(chunk_idx, chunk)| {
                    materialize_chunk(chunk_idx * chunk_size, chunk, vertices)
                })
                .collect::<Result<_, RuntimeError>>()
        })?;

        let mut mesh = Vec::new();
        mesh.try_reserve_exact(faces.len())?;
        for chunk in chunks {
            mesh.extend(chunk);
        }

        let ms = t0.elapsed().as_millis();
        log::info!(target: "perf", "ms={} phase=materialize n={} chunk_size={} workers={}", ms, mesh.len(), chunk_size, self.workers);
        Ok(mesh)
    }
}

fn materialize_chunk(
    base: usize,
    faces: &[FaceIdx],
    vertices: &[Vec3],
) -> Result<Vec<Triangle>, RuntimeError> {
    let mut out = Vec::new();
    out.try_reserve_exact(faces.len())?;
    for (i, face) in faces.iter().enumerate() {
        let mut tri = [Vec3::ZERO; 3];
        for (slot, index) in tri.iter_mut().zip(face.indices()) {
            *slot = *vertices.get(index as usize).ok_or(
                RuntimeError::FaceIndexOutOfRange {
                    face: base + i,
                    index,
                    limit: vertices.len(),
                },
            )?;
        }
        out.push(tri);
    }
    Ok(out)
}
