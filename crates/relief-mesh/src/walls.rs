use crate::FaceIdx;

/// Perimeter wall triangles closing the solid: four independent edge loops
/// (left column, right column, front row y=0, back row y=rows-1), each quad
/// spanning a top boundary segment down to its bottom counterpart.
///
/// All four loops wind outward, and adjacent loops abut exactly once at the
/// corners: each corner's vertical edge is shared by one triangle from each
/// neighboring loop, so the stitched solid stays a consistently oriented
/// 2-manifold.
pub fn wall_faces(rows: u32, cols: u32) -> Vec<FaceIdx> {
    let offset = rows * cols;
    let top = |y: u32, x: u32| y * cols + x;
    let bottom = |y: u32, x: u32| offset + y * cols + x;

    let mut faces = Vec::with_capacity(4 * (rows as usize - 1) + 4 * (cols as usize - 1));

    // Left column (x = 0), normals toward -x.
    for y in 0..rows - 1 {
        faces.push(FaceIdx::new(top(y, 0), top(y + 1, 0), bottom(y, 0)));
        faces.push(FaceIdx::new(top(y + 1, 0), bottom(y + 1, 0), bottom(y, 0)));
    }

    // Right column (x = cols-1), normals toward +x.
    let x = cols - 1;
    for y in 0..rows - 1 {
        faces.push(FaceIdx::new(top(y, x), bottom(y, x), top(y + 1, x)));
        faces.push(FaceIdx::new(top(y + 1, x), bottom(y, x), bottom(y + 1, x)));
    }

    // Front row (y = 0), normals toward -y.
    for x in 0..cols - 1 {
        faces.push(FaceIdx::new(top(0, x), bottom(0, x), top(0, x + 1)));
        faces.push(FaceIdx::new(top(0, x + 1), bottom(0, x), bottom(0, x + 1)));
    }

    // Back row (y = rows-1), normals toward +y.
    let y = rows - 1;
    for x in 0..cols - 1 {
        faces.push(FaceIdx::new(top(y, x), top(y, x + 1), bottom(y, x)));
        faces.push(FaceIdx::new(top(y, x + 1), bottom(y, x + 1), bottom(y, x)));
    }

    faces
}
