use std::time::Instant;

use anyhow::{Context, Result, ensure};
use relief_field::{HeightField, decode_raster};
use relief_geom::Aabb;
use relief_io::write_binary_stl;
use relief_mesh::{audit_faces, vertex_grid};
use relief_runtime::MeshAssembler;

use crate::config::MeshJob;

/// Counts reported after a successful run; informational only.
#[derive(Clone, Copy, Debug)]
pub struct PipelineReport {
    pub rows: usize,
    pub cols: usize,
    pub vertices: usize,
    pub triangles: usize,
}

/// Runs the whole conversion: load, normalize, grid, triangulate, stitch,
/// materialize, write. Strictly forward-only; any failure aborts the run
/// and leaves the destination path untouched.
pub fn run(job: &MeshJob) -> Result<PipelineReport> {
    job.validate()?;
    let t_total = Instant::now();

    let raster =
        decode_raster(&job.input, job.subsample).context("loading heightfield raster")?;
    let field =
        HeightField::from_raster(raster, job.scale).context("normalizing heightfield")?;
    let (lo, hi) = field.elevation_range();
    log::info!(
        "normalized field {}x{}, z range {lo:.3}..{hi:.3}",
        field.rows(),
        field.cols()
    );

    let vertices = vertex_grid(&field).context("building vertex grid")?;
    log::info!("built {} vertices", vertices.len());

    let assembler = MeshAssembler::new(job.workers).context("starting worker pool")?;
    let faces = assembler
        .generate_faces(field.rows() as u32, field.cols() as u32)
        .context("generating faces")?;
    log::info!("built {} faces on {} workers", faces.len(), assembler.workers());

    if job.audit {
        let report = audit_faces(&faces, vertices.len());
        ensure!(
            report.is_watertight(),
            "mesh is not watertight: {report:?}"
        );
        log::info!(
            "audit passed: {} faces, every edge shared by exactly two",
            report.faces
        );
    }

    let mesh = assembler
        .materialize(&faces, &vertices)
        .context("materializing mesh")?;

    if let Some(bb) = Aabb::of_points(vertices.iter().copied()) {
        let e = bb.extent();
        log::info!("model extent {:.2} x {:.2} x {:.2}", e.x, e.y, e.z);
    }

    let header = format!("relief {}x{}", field.rows(), field.cols());
    write_binary_stl(&job.output, &mesh, &header).context("writing STL")?;

    let ms = t_total.elapsed().as_millis();
    log::info!(target: "perf", "ms={ms} phase=total rows={} cols={} tris={}", field.rows(), field.cols(), mesh.len());

    Ok(PipelineReport {
        rows: field.rows(),
        cols: field.cols(),
        vertices: vertices.len(),
        triangles: mesh.len(),
    })
}
