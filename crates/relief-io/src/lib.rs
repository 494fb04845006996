//! Binary STL serialization with atomic file replacement.
#![forbid(unsafe_code)]

use std::fs;
use std::path::{Path, PathBuf};

use relief_geom::{Triangle, triangle_normal};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("destination path has no file name: {0}")]
    NoFileName(PathBuf),

    #[error("failed to write mesh to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Encodes triangles as binary STL: an 80-byte header, a little-endian
/// `u32` triangle count, then 50 bytes per triangle (normal, three
/// vertices, attribute short). Vertex data is duplicated per triangle;
/// there is no shared-vertex indexing at this boundary.
pub fn encode_binary_stl(triangles: &[Triangle], header_name: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(84 + triangles.len() * 50);

    let mut header = [0u8; 80];
    let name_bytes = header_name.as_bytes();
    let copy_n = name_bytes.len().min(header.len());
    header[..copy_n].copy_from_slice(&name_bytes[..copy_n]);
    out.extend_from_slice(&header);

    out.extend_from_slice(&(triangles.len() as u32).to_le_bytes());

    for tri in triangles {
        let n = triangle_normal(tri);
        out.extend_from_slice(&n.x.to_le_bytes());
        out.extend_from_slice(&n.y.to_le_bytes());
        out.extend_from_slice(&n.z.to_le_bytes());
        for v in tri {
            out.extend_from_slice(&v.x.to_le_bytes());
            out.extend_from_slice(&v.y.to_le_bytes());
            out.extend_from_slice(&v.z.to_le_bytes());
        }
        out.extend_from_slice(&0u16.to_le_bytes());
    }

    out
}

/// Writes the mesh atomically: the fully encoded STL goes to a temp file in
/// the destination directory, then replaces the destination by rename. A
/// failure at any point leaves the destination untouched.
pub fn write_binary_stl(
    path: &Path,
    triangles: &[Triangle],
    header_name: &str,
) -> Result<(), WriteError> {
    let file_name = path
        .file_name()
        .ok_or_else(|| WriteError::NoFileName(path.to_path_buf()))?;
    let tmp = path.with_file_name(format!(".{}.tmp", file_name.to_string_lossy()));

    let bytes = encode_binary_stl(triangles, header_name);
    let io_err = |source| WriteError::Io {
        path: path.to_path_buf(),
        source,
    };

    fs::write(&tmp, &bytes).map_err(io_err)?;
    if let Err(source) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(io_err(source));
    }
    log::info!(
        "wrote {} triangles ({} bytes) to {path:?}",
        triangles.len(),
        bytes.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use relief_geom::Vec3;

    fn tri(a: (f32, f32, f32), b: (f32, f32, f32), c: (f32, f32, f32)) -> Triangle {
        [
            Vec3::new(a.0, a.1, a.2),
            Vec3::new(b.0, b.1, b.2),
            Vec3::new(c.0, c.1, c.2),
        ]
    }

    #[test]
    fn binary_stl_has_expected_size_and_triangle_count() {
        let tris = vec![
            tri((0.0, 0.0, 0.0), (1.0, 0.0, 0.0), (0.0, 1.0, 0.0)),
            tri((0.0, 0.0, 1.0), (0.0, 1.0, 1.0), (1.0, 0.0, 1.0)),
        ];
        let bytes = encode_binary_stl(&tris, "test");

        assert_eq!(bytes.len(), 84 + 2 * 50);
        let tri_count = u32::from_le_bytes(bytes[80..84].try_into().unwrap());
        assert_eq!(tri_count, 2);
    }

    #[test]
    fn encoded_normal_follows_right_hand_rule() {
        let tris = vec![tri((0.0, 0.0, 0.0), (1.0, 0.0, 0.0), (0.0, 1.0, 0.0))];
        let bytes = encode_binary_stl(&tris, "normal");
        let nz = f32::from_le_bytes(bytes[92..96].try_into().unwrap());
        assert!((nz - 1.0).abs() < 1e-6);
    }

    #[test]
    fn degenerate_triangle_encodes_zero_normal() {
        let tris = vec![tri((1.0, 1.0, 1.0), (1.0, 1.0, 1.0), (1.0, 1.0, 1.0))];
        let bytes = encode_binary_stl(&tris, "degenerate");
        for off in [84, 88, 92] {
            let v = f32::from_le_bytes(bytes[off..off + 4].try_into().unwrap());
            assert_eq!(v, 0.0);
        }
    }

    #[test]
    fn write_replaces_destination_atomically() {
        let dir = std::env::temp_dir().join(format!("relief-io-test-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let dest = dir.join("out.stl");

        let tris = vec![tri((0.0, 0.0, 0.0), (1.0, 0.0, 0.0), (0.0, 1.0, 0.0))];
        write_binary_stl(&dest, &tris, "first").unwrap();
        write_binary_stl(&dest, &tris, "second").unwrap();

        let bytes = fs::read(&dest).unwrap();
        assert_eq!(&bytes[..6], b"second");
        // No temp file left behind.
        assert_eq!(fs::read_dir(&dir).unwrap().count(), 1);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn empty_file_name_is_rejected() {
        let tris: Vec<Triangle> = Vec::new();
        assert!(matches!(
            write_binary_stl(Path::new("/"), &tris, "x"),
            Err(WriteError::NoFileName(_))
        ));
    }
}
