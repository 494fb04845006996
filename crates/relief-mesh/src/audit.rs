use hashbrown::HashMap;

use crate::FaceIdx;

/// Result of the edge-sharing audit over a face list.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct AuditReport {
    pub faces: usize,
    /// Undirected edges not shared by exactly two triangles.
    pub boundary_edges: usize,
    /// Undirected edges shared by more than two triangles.
    pub nonmanifold_edges: usize,
    /// Directed edges traversed more than once, i.e. neighboring triangles
    /// that disagree on orientation.
    pub misoriented_edges: usize,
    /// Faces referencing a vertex index outside the grid.
    pub out_of_range: usize,
    /// Faces with a repeated vertex index.
    pub degenerate: usize,
}

impl AuditReport {
    /// True when the face list describes a closed, consistently oriented
    /// solid over in-range vertices.
    pub fn is_watertight(&self) -> bool {
        self.boundary_edges == 0
            && self.nonmanifold_edges == 0
            && self.misoriented_edges == 0
            && self.out_of_range == 0
            && self.degenerate == 0
    }
}

/// Audits a face list against the watertightness contract: every edge of the
/// solid shared by exactly two triangles, traversed once in each direction.
pub fn audit_faces(faces: &[FaceIdx], vertex_count: usize) -> AuditReport {
    let mut report = AuditReport {
        faces: faces.len(),
        ..AuditReport::default()
    };

    let mut directed: HashMap<(u32, u32), u32> = HashMap::with_capacity(faces.len() * 3);
    for face in faces {
        let [a, b, c] = face.indices();
        if face.max_index() as usize >= vertex_count {
            report.out_of_range += 1;
            continue;
        }
        if a == b || b == c || a == c {
            report.degenerate += 1;
            continue;
        }
        for (u, v) in [(a, b), (b, c), (c, a)] {
            *directed.entry((u, v)).or_insert(0) += 1;
        }
    }

    for (&(u, v), &n) in &directed {
        if n > 1 {
            report.misoriented_edges += 1;
        }
        let rev = directed.get(&(v, u)).copied().unwrap_or(0);
        // Count each undirected edge once: from its lower-first direction,
        // or from the only direction present.
        if u < v || rev == 0 {
            let total = n + rev;
            if total != 2 {
                report.boundary_edges += 1;
            }
            if total > 2 {
                report.nonmanifold_edges += 1;
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_quad_reports_boundary_edges() {
        // Two triangles forming a single quad: four rim edges are open.
        let faces = [FaceIdx::new(0, 1, 2), FaceIdx::new(1, 3, 2)];
        let report = audit_faces(&faces, 4);
        assert_eq!(report.boundary_edges, 4);
        assert_eq!(report.misoriented_edges, 0);
        assert!(!report.is_watertight());
    }

    #[test]
    fn tetrahedron_is_watertight() {
        // Outward-wound tetrahedron over vertices 0..4.
        let faces = [
            FaceIdx::new(0, 2, 1),
            FaceIdx::new(0, 1, 3),
            FaceIdx::new(1, 2, 3),
            FaceIdx::new(2, 0, 3),
        ];
        let report = audit_faces(&faces, 4);
        assert!(report.is_watertight(), "{report:?}");
    }

    #[test]
    fn flipped_face_is_misoriented() {
        let faces = [
            FaceIdx::new(0, 2, 1),
            FaceIdx::new(0, 1, 3),
            FaceIdx::new(1, 2, 3),
            FaceIdx::new(2, 3, 0), // reversed winding
        ];
        let report = audit_faces(&faces, 4);
        assert!(report.misoriented_edges > 0);
        assert!(!report.is_watertight());
    }

    #[test]
    fn out_of_range_and_degenerate_faces_are_flagged() {
        let faces = [FaceIdx::new(0, 1, 9), FaceIdx::new(0, 0, 1)];
        let report = audit_faces(&faces, 4);
        assert_eq!(report.out_of_range, 1);
        assert_eq!(report.degenerate, 1);
    }
}
