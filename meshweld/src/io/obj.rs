use super::{check_faces, create, mesh_name, open, parse_point};
use crate::{
    error::{IoError, IoResult},
    mesh::IndexedMesh,
    storage::PointId,
};
use std::{
    io::{BufRead, Write},
    path::Path,
    time::Instant,
};
use tracing::{debug, info};

/// Loads an OBJ file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or holds a malformed record.
pub fn load_obj<P: AsRef<Path>>(path: P) -> IoResult<IndexedMesh> {
    let path = path.as_ref();
    let start = Instant::now();

    let mesh = read_obj(open(path)?)?;

    info!(
        vertices = mesh.vertex_count(),
        faces = mesh.face_count(),
        "finished reading {} in {:.3?}",
        path.display(),
        start.elapsed()
    );

    Ok(mesh)
}

/// Reads the `v` and `f` records of an OBJ stream. Other records are ignored.
///
/// Vertices are kept as written, without welding. Each face reference is read up to its first
/// `/`. A positive reference `r` is the vertex `r - 1`; any other reference is the vertex
/// `count + r - 1` where `count` is the number of vertices read so far. Faces with more than 3
/// references are split into a fan of triangles around their first vertex.
///
/// # Errors
///
/// Returns an error if the stream cannot be read, a record holds an invalid number, a face has
/// fewer than 3 references or a reference does not resolve to a vertex read so far.
pub fn read_obj<R: BufRead>(reader: R) -> IoResult<IndexedMesh> {
    let mut mesh = IndexedMesh::new();
    let mut polygons = 0;

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let number = index + 1;
        let mut fields = line.split_whitespace();

        match fields.next() {
            Some("v") => mesh.vertices.push(parse_point(fields, number)?),
            Some("f") => {
                let count = mesh.vertex_count();
                let ids = fields
                    .map(|field| resolve(field, count, number))
                    .collect::<IoResult<Vec<_>>>()?;

                if ids.len() < 3 {
                    return Err(IoError::invalid_content(
                        number,
                        format!("face has {} vertices, expected at least 3", ids.len()),
                    ));
                }
                if ids.len() > 3 {
                    polygons += 1;
                }

                mesh.faces
                    .extend(ids.windows(2).skip(1).map(|pair| [ids[0], pair[0], pair[1]]));
            }
            _ => {}
        }
    }

    if polygons > 0 {
        debug!(polygons, "triangulated polygonal faces");
    }

    Ok(mesh)
}

fn resolve(field: &str, count: usize, line: usize) -> IoResult<PointId> {
    let reference = field.split_once('/').map_or(field, |(vertex, _)| vertex);
    let reference: i64 = reference.parse().map_err(|_| {
        IoError::invalid_content(line, format!("invalid vertex reference `{field}`"))
    })?;

    let resolved = if reference > 0 {
        reference - 1
    } else {
        i64::try_from(count).unwrap_or(i64::MAX) + reference - 1
    };

    match PointId::try_from(resolved) {
        Ok(id) if (id as usize) < count => Ok(id),
        _ => Err(IoError::VertexReference {
            line,
            reference,
            count,
        }),
    }
}

/// Saves a mesh to an OBJ file, naming the object after the file stem.
///
/// # Errors
///
/// Returns an error if a face references a missing vertex or the file cannot be written.
pub fn save_obj<P: AsRef<Path>>(mesh: &IndexedMesh, path: P) -> IoResult<()> {
    let path = path.as_ref();
    let start = Instant::now();

    let mut writer = create(path)?;
    write_obj(mesh, &mut writer, mesh_name(path))?;
    writer.flush()?;

    info!(
        vertices = mesh.vertex_count(),
        faces = mesh.face_count(),
        "finished writing {} in {:.3?}",
        path.display(),
        start.elapsed()
    );

    Ok(())
}

/// Writes a mesh as a single OBJ object. Coordinates are written in their shortest form that
/// reads back to the same `f64`.
///
/// # Errors
///
/// Returns an error if a face references a missing vertex or the writer fails.
pub fn write_obj<W: Write>(mesh: &IndexedMesh, mut writer: W, name: &str) -> IoResult<()> {
    check_faces(mesh)?;

    writeln!(
        writer,
        "# {} vertices, {} faces",
        mesh.vertex_count(),
        mesh.face_count()
    )?;
    writeln!(writer, "o {name}")?;

    for vertex in &mesh.vertices {
        let [x, y, z] = vertex.to_array();
        writeln!(writer, "v {x} {y} {z}")?;
    }

    for face in &mesh.faces {
        let [a, b, c] = face.map(|id| u64::from(id) + 1);
        writeln!(writer, "f {a} {b} {c}")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::Vector3;

    fn read(text: &str) -> IoResult<IndexedMesh> {
        read_obj(text.as_bytes())
    }

    const SQUARE: &str = "# square
o square
v 0 0 0
v 1 0 0
v 1 1 0 1.0
v 0 1 0
vt 0 0
vn 0 0 1
f 1/1 2/1 3/1
f 1//1 3//1 4//1
";

    #[test]
    fn records() {
        let mesh = read(SQUARE).unwrap();

        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.vertices[2], Vector3::new([1.0, 1.0, 0.0]));
        assert_eq!(mesh.faces, [[0, 1, 2], [0, 2, 3]]);
    }

    #[test]
    fn relative_references() {
        let text = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf -1 -2 -3\nf 0 1 2\n";
        let mesh = read(text).unwrap();

        assert_eq!(mesh.faces, [[2, 1, 0], [3, 0, 1]]);
    }

    #[test]
    fn polygons_are_fans() {
        let text = "v 0 0 0\nv 1 0 0\nv 2 1 0\nv 1 2 0\nv 0 1 0\nf 1 2 3 4 5\n";
        let mesh = read(text).unwrap();

        assert_eq!(mesh.faces, [[0, 1, 2], [0, 2, 3], [0, 3, 4]]);
    }

    #[test]
    fn no_welding() {
        let mesh = read("v 1 1 1\nv 1 1 1\nv 1 1 1\nf 1 2 3\n").unwrap();

        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.faces, [[0, 1, 2]]);
    }

    #[test]
    fn invalid_records() {
        let error = read("v 0 0 0\nv 1 0 0\nv 1 1 0\nf 1 2 4\n").unwrap_err();
        assert!(matches!(
            error,
            IoError::VertexReference {
                line: 4,
                reference: 4,
                count: 3
            }
        ));

        let error = read("f 1 2 3\nv 0 0 0\n").unwrap_err();
        assert!(matches!(error, IoError::VertexReference { line: 1, .. }));

        let error = read("v 0 0 0\nv 1 0 0\nf -3 1 2\n").unwrap_err();
        assert!(matches!(error, IoError::VertexReference { reference: -3, .. }));

        let error = read("v 0 0 0\nv 1 0 0\nf 1 2\n").unwrap_err();
        assert_eq!(
            error.to_string(),
            "line 3: face has 2 vertices, expected at least 3"
        );

        let error = read("v 0 0 0\nf 1 a 1\n").unwrap_err();
        assert_eq!(error.to_string(), "line 2: invalid vertex reference `a`");

        let error = read("v 0 zero 0\n").unwrap_err();
        assert!(matches!(error, IoError::InvalidContent { line: 1, .. }));
    }

    #[test]
    fn written() {
        let mesh = IndexedMesh {
            vertices: vec![
                Vector3::new([0.0, 0.0, 0.0]),
                Vector3::new([1.5, -2.0, 0.1]),
                Vector3::new([0.0, 1e-7, 3.0]),
            ],
            faces: vec![[0, 1, 2]],
        };

        let mut bytes = Vec::new();
        write_obj(&mesh, &mut bytes, "part").unwrap();

        let expected = "# 3 vertices, 1 faces
o part
v 0 0 0
v 1.5 -2 0.1
v 0 0.0000001 3
f 1 2 3
";
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text, expected);
        assert_eq!(read(&text).unwrap(), mesh);
    }
}
