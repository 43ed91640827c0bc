//! Wavefront OBJ export of a [`MeshBuffer`].
//!
//! Every mesh vertex becomes one `v` and one `vn` line; faces reference them
//! as `f i//i j//j k//k` with 1-based indices. Nothing is deduplicated.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::sphere::MeshBuffer;

#[derive(Debug, thiserror::Error)]
pub enum ObjExportError {
    #[error("Failed to create {path}: {source}")]
    Create {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write OBJ data: {0}")]
    Write(#[from] io::Error),
}

/// Write `mesh` as OBJ text to `writer`.
pub fn write_obj<W: Write>(mesh: &MeshBuffer, mut writer: W) -> Result<(), ObjExportError> {
    writeln!(
        writer,
        "# geode sphere: {} triangles",
        mesh.triangle_count()
    )?;
    for p in mesh.positions() {
        writeln!(writer, "v {} {} {}", p.x, p.y, p.z)?;
    }
    for n in mesh.normals() {
        writeln!(writer, "vn {} {} {}", n.x, n.y, n.z)?;
    }
    for t in 0..mesh.triangle_count() {
        let i = 3 * t + 1;
        writeln!(writer, "f {i}//{i} {j}//{j} {k}//{k}", j = i + 1, k = i + 2)?;
    }
    writer.flush()?;
    Ok(())
}

/// Create (or truncate) the file at `path` and write `mesh` into it.
pub fn export_obj(mesh: &MeshBuffer, path: &Path) -> Result<(), ObjExportError> {
    let file = File::create(path).map_err(|source| ObjExportError::Create {
        path: path.display().to_string(),
        source,
    })?;
    write_obj(mesh, BufWriter::new(file))?;
    info!(
        path = %path.display(),
        triangles = mesh.triangle_count(),
        "Exported OBJ"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sphere::{SeedTetrahedron, build_sphere};

    #[test]
    fn test_obj_line_counts() {
        let mesh = build_sphere(&SeedTetrahedron::default(), 1);
        let mut out = Vec::new();
        write_obj(&mesh, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(text.lines().filter(|l| l.starts_with("v ")).count(), 48);
        assert_eq!(text.lines().filter(|l| l.starts_with("vn ")).count(), 48);
        assert_eq!(text.lines().filter(|l| l.starts_with("f ")).count(), 16);
    }

    #[test]
    fn test_obj_faces_are_one_based() {
        let mesh = build_sphere(&SeedTetrahedron::default(), 0);
        let mut out = Vec::new();
        write_obj(&mesh, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let faces: Vec<&str> = text.lines().filter(|l| l.starts_with("f ")).collect();
        assert_eq!(faces[0], "f 1//1 2//2 3//3");
        assert_eq!(faces[3], "f 10//10 11//11 12//12");
    }

    #[test]
    fn test_obj_vertices_parse_back_to_unit_length() {
        let mesh = build_sphere(&SeedTetrahedron::default(), 2);
        let mut out = Vec::new();
        write_obj(&mesh, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        for line in text.lines().filter(|l| l.starts_with("v ")) {
            let coords: Vec<f32> = line[2..]
                .split_whitespace()
                .map(|s| s.parse().unwrap())
                .collect();
            let len = (coords[0] * coords[0] + coords[1] * coords[1] + coords[2] * coords[2]).sqrt();
            assert!((len - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_export_obj_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sphere.obj");
        let mesh = build_sphere(&SeedTetrahedron::default(), 2);
        export_obj(&mesh, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().filter(|l| l.starts_with("f ")).count(), 64);
    }

    #[test]
    fn test_export_obj_missing_directory_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("sphere.obj");
        let mesh = build_sphere(&SeedTetrahedron::default(), 0);
        let err = export_obj(&mesh, &path).unwrap_err();
        assert!(matches!(err, ObjExportError::Create { .. }));
    }
}
