use crate::FaceIdx;

/// Top-surface triangles for the cell row at `y`, for `y` in `0..rows-1`.
///
/// Pure function of `(y, cols)` so rows can be dispatched as independent
/// tasks; concatenating row outputs in row order yields the canonical face
/// ordering. Winding is counter-clockwise seen from above (+z normals).
pub fn top_row_faces(y: u32, cols: u32) -> Vec<FaceIdx> {
    let mut faces = Vec::with_capacity(2 * (cols as usize - 1));
    for x in 0..cols - 1 {
        let v0 = y * cols + x;
        let v1 = v0 + 1;
        let v2 = (y + 1) * cols + x;
        let v3 = v2 + 1;
        faces.push(FaceIdx::new(v0, v1, v2));
        faces.push(FaceIdx::new(v1, v3, v2));
    }
    faces
}

/// Bottom-surface triangles for the cell row at `y`: the top topology with
/// indices shifted into the bottom block and winding reversed so normals
/// point down, out of the solid.
pub fn bottom_row_faces(y: u32, rows: u32, cols: u32) -> Vec<FaceIdx> {
    let offset = rows * cols;
    let mut faces = Vec::with_capacity(2 * (cols as usize - 1));
    for x in 0..cols - 1 {
        let v0 = offset + y * cols + x;
        let v1 = v0 + 1;
        let v2 = offset + (y + 1) * cols + x;
        let v3 = v2 + 1;
        faces.push(FaceIdx::new(v2, v1, v0));
        faces.push(FaceIdx::new(v3, v1, v2));
    }
    faces
}

/// All top-surface triangles in row order.
pub fn top_faces(rows: u32, cols: u32) -> Vec<FaceIdx> {
    (0..rows - 1).flat_map(|y| top_row_faces(y, cols)).collect()
}

/// All bottom-surface triangles in row order.
pub fn bottom_faces(rows: u32, cols: u32) -> Vec<FaceIdx> {
    (0..rows - 1)
        .flat_map(|y| bottom_row_faces(y, rows, cols))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_output_is_two_triangles_per_interior_cell() {
        assert_eq!(top_row_faces(0, 4).len(), 6);
        assert_eq!(bottom_row_faces(2, 4, 4).len(), 6);
    }

    #[test]
    fn top_cell_indices_match_layout() {
        // 3-wide grid, row 1, cell x=0: v0 = 1*3+0 = 3.
        let faces = top_row_faces(1, 3);
        assert_eq!(faces[0], FaceIdx::new(3, 4, 6));
        assert_eq!(faces[1], FaceIdx::new(4, 7, 6));
    }

    #[test]
    fn bottom_mirrors_top_with_offset_and_reversed_winding() {
        let rows = 3;
        let cols = 3;
        let offset = rows * cols;
        let top = top_row_faces(0, cols);
        let bottom = bottom_row_faces(0, rows, cols);
        for (t, b) in top.chunks(2).zip(bottom.chunks(2)) {
            assert_eq!(b[0], FaceIdx::new(t[0].c + offset, t[0].b + offset, t[0].a + offset));
            assert_eq!(b[1], FaceIdx::new(t[1].b + offset, t[1].a + offset, t[1].c + offset));
        }
    }
}
