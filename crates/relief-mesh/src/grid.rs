use relief_field::HeightField;
use relief_geom::Vec3;

use crate::MeshError;

/// Builds the dual vertex grid for a normalized field.
///
/// Layout contract: top vertex `(y, x)` at flat index `y*cols + x` with
/// z = normalized elevation; bottom vertex at `rows*cols + y*cols + x` with
/// z = 0. Row-major, top block then bottom block. Other components resolve
/// indices against exactly this ordering.
pub fn vertex_grid(field: &HeightField) -> Result<Vec<Vec3>, MeshError> {
    let rows = field.rows();
    let cols = field.cols();
    let count = crate::vertex_count(rows, cols);
    if count > u32::MAX as usize {
        return Err(MeshError::GridTooLarge { rows, cols });
    }

    let mut vertices = Vec::new();
    vertices.try_reserve_exact(count)?;

    let scale = field.scale();
    for y in 0..rows {
        for x in 0..cols {
            vertices.push(Vec3::new(
                x as f32 * scale.x,
                y as f32 * scale.y,
                field.get(y, x),
            ));
        }
    }
    for y in 0..rows {
        for x in 0..cols {
            vertices.push(Vec3::new(x as f32 * scale.x, y as f32 * scale.y, 0.0));
        }
    }
    Ok(vertices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use relief_field::{RawRaster, ScaleFactors};

    #[test]
    fn blocks_are_mirrored_with_flat_base() {
        let raster = RawRaster::from_samples(3, 2, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let field = HeightField::from_raster(raster, ScaleFactors::new(2.0, 3.0, 1.0)).unwrap();
        let verts = vertex_grid(&field).unwrap();
        assert_eq!(verts.len(), 12);

        let half = verts.len() / 2;
        for (top, bottom) in verts[..half].iter().zip(&verts[half..]) {
            assert_eq!(top.x, bottom.x);
            assert_eq!(top.y, bottom.y);
            assert_eq!(bottom.z, 0.0);
        }
        // (y=1, x=2) top vertex: x*sx, y*sy, elevation 6-1 rebased.
        assert_eq!(verts[1 * 3 + 2], Vec3::new(4.0, 3.0, 5.0));
    }
}
