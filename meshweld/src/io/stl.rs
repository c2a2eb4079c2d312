use super::{check_faces, create, mesh_name, open, parse_point};
use crate::{
    error::{IoError, IoResult},
    mesh::{normal, IndexedMesh},
    vector::Vector3,
    weld::{WeldOptions, Welder},
};
use std::{
    io::{Read, Write},
    path::Path,
    time::Instant,
};
use tracing::{debug, info, warn};

/// STL binary header size in bytes.
const HEADER_SIZE: usize = 80;

/// Size of one triangle in binary STL (normal + 3 vertices + attribute).
const TRIANGLE_SIZE: usize = 50;

/// Start of the header of written binary STL files, padded with spaces. It must not start with
/// `solid`.
const HEADER_TEXT: &[u8] = b"Binary STL written by meshweld";

/// Encoding of written STL files.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum StlEncoding {
    /// 80-byte header, triangle count and 50-byte triangle records.
    #[default]
    Binary,
    /// `solid` ... `endsolid` text.
    Ascii,
}

/// Loads an STL file, welding its vertices with `options`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid STL.
pub fn load_stl<P: AsRef<Path>>(path: P, options: &WeldOptions) -> IoResult<IndexedMesh> {
    let path = path.as_ref();
    let start = Instant::now();

    let mesh = read_stl(open(path)?, options)?;

    info!(
        vertices = mesh.vertex_count(),
        faces = mesh.face_count(),
        "finished reading {} in {:.3?}",
        path.display(),
        start.elapsed()
    );

    Ok(mesh)
}

/// Reads an STL stream to its end, welding its vertices with `options`.
///
/// # Errors
///
/// Returns an error if the stream cannot be read or is not a valid STL.
pub fn read_stl<R: Read>(mut reader: R, options: &WeldOptions) -> IoResult<IndexedMesh> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;

    parse_stl(&bytes, options)
}

/// Parses STL bytes, welding their vertices with `options`.
///
/// Bytes whose length matches the triangle count of a binary header are binary. Otherwise, bytes
/// starting with `solid` are read as ASCII and anything else is binary. Bytes starting with
/// `solid` that are not valid UTF-8 or hold no facets are read as binary again when they are long
/// enough for the triangles their header declares, since some exporters start binary headers with
/// `solid`.
///
/// Binary layout:
///
/// ```text
/// UINT8[80]    - Header (ignored)
/// UINT32       - Number of triangles
/// foreach triangle
///     REAL32[3] - Normal vector (ignored)
///     REAL32[3] - Vertex 1
///     REAL32[3] - Vertex 2
///     REAL32[3] - Vertex 3
///     UINT16    - Attribute byte count (ignored)
/// end
/// ```
///
/// Bytes after the declared triangles are ignored. ASCII bytes may hold several solids, whose
/// facets are all read.
///
/// # Errors
///
/// Returns an error if binary bytes are shorter than their header or than the triangles they
/// declare, or if ASCII bytes hold a malformed facet.
pub fn parse_stl(bytes: &[u8], options: &WeldOptions) -> IoResult<IndexedMesh> {
    if is_binary(bytes) || !starts_with_solid(bytes) {
        return parse_binary(bytes, options);
    }

    let ascii = std::str::from_utf8(bytes)
        .map_err(IoError::from)
        .and_then(|text| parse_ascii(text, options));

    match ascii {
        Ok(mesh) if !mesh.is_empty() => Ok(mesh),
        _ if fits_binary(bytes) => {
            debug!("STL starting with `solid` holds binary triangles");
            parse_binary(bytes, options)
        }
        Ok(mesh) => {
            warn!("ASCII STL holds no facets");
            Ok(mesh)
        }
        Err(error) => Err(error),
    }
}

fn declared_count(bytes: &[u8]) -> Option<usize> {
    let count: [u8; 4] = bytes.get(HEADER_SIZE..HEADER_SIZE + 4)?.try_into().ok()?;
    Some(u32::from_le_bytes(count) as usize)
}

/// Returns the size of a binary STL holding the triangles declared by its header.
fn declared_size(bytes: &[u8]) -> Option<usize> {
    declared_count(bytes)?
        .checked_mul(TRIANGLE_SIZE)?
        .checked_add(HEADER_SIZE + 4)
}

fn is_binary(bytes: &[u8]) -> bool {
    declared_size(bytes) == Some(bytes.len())
}

fn fits_binary(bytes: &[u8]) -> bool {
    declared_size(bytes).is_some_and(|size| size <= bytes.len())
}

fn starts_with_solid(bytes: &[u8]) -> bool {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());

    bytes[start..].starts_with(b"solid")
}

fn parse_binary(bytes: &[u8], options: &WeldOptions) -> IoResult<IndexedMesh> {
    let count = declared_count(bytes).ok_or(IoError::InvalidHeader {
        expected: HEADER_SIZE + 4,
        got: bytes.len(),
    })?;

    let records = bytes[HEADER_SIZE + 4..].chunks_exact(TRIANGLE_SIZE);
    if records.len() < count {
        return Err(IoError::TruncatedStl {
            expected: count,
            got: records.len(),
        });
    }

    if count == 0 {
        warn!("binary STL declares no triangles");
    }

    let mut welder = Welder::with_capacity(*options, count);
    for record in records.take(count) {
        // Skip normal (12 bytes), read 3 vertices (36 bytes total)
        welder.push_triangle([
            read_vertex(&record[12..24]),
            read_vertex(&record[24..36]),
            read_vertex(&record[36..48]),
        ]);
    }
    debug!(triangles = count, "decoded binary STL");

    Ok(welder.finish())
}

/// Read a vertex from 12 bytes (3 f32s).
fn read_vertex(buf: &[u8]) -> Vector3 {
    let x = f32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]);
    let y = f32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]);
    let z = f32::from_le_bytes([buf[8], buf[9], buf[10], buf[11]]);
    Vector3::new([f64::from(x), f64::from(y), f64::from(z)])
}

fn parse_ascii(text: &str, options: &WeldOptions) -> IoResult<IndexedMesh> {
    let mut welder = Welder::new(*options);
    let mut corners = Vec::with_capacity(3);
    let mut in_loop = false;

    for (index, line) in text.lines().enumerate() {
        let number = index + 1;
        let mut fields = line.split_whitespace();
        let Some(keyword) = fields.next() else {
            continue;
        };

        match keyword.to_ascii_lowercase().as_str() {
            "outer" => {
                in_loop = true;
                corners.clear();
            }
            "vertex" if in_loop => corners.push(parse_point(fields, number)?),
            "vertex" => return Err(IoError::invalid_content(number, "vertex outside of a loop")),
            "endloop" => in_loop = false,
            "endfacet" => {
                let triangle = <[Vector3; 3]>::try_from(corners.as_slice()).map_err(|_| {
                    IoError::invalid_content(
                        number,
                        format!("facet has {} vertices, expected 3", corners.len()),
                    )
                })?;
                welder.push_triangle(triangle);
                corners.clear();
            }
            _ => {}
        }
    }

    let mesh = welder.finish();
    debug!(triangles = mesh.face_count(), "decoded ASCII STL");

    Ok(mesh)
}

/// Saves a mesh to an STL file. ASCII files are named after the file stem.
///
/// # Errors
///
/// Returns an error if a face references a missing vertex, the mesh has too many faces for a
/// binary STL or the file cannot be written.
pub fn save_stl<P: AsRef<Path>>(
    mesh: &IndexedMesh,
    path: P,
    encoding: StlEncoding,
) -> IoResult<()> {
    let path = path.as_ref();
    let start = Instant::now();

    let mut writer = create(path)?;
    write_stl(mesh, &mut writer, encoding, mesh_name(path))?;
    writer.flush()?;

    info!(
        faces = mesh.face_count(),
        "finished writing {} in {:.3?}",
        path.display(),
        start.elapsed()
    );

    Ok(())
}

/// Writes a mesh as STL. Binary files carry the unit normal of each face, or a zero normal for
/// degenerate faces, and coordinates rounded to `f32`.
///
/// # Errors
///
/// Returns an error if a face references a missing vertex, the mesh has too many faces for a
/// binary STL or the writer fails.
pub fn write_stl<W: Write>(
    mesh: &IndexedMesh,
    writer: W,
    encoding: StlEncoding,
    name: &str,
) -> IoResult<()> {
    check_faces(mesh)?;

    match encoding {
        StlEncoding::Binary => write_binary(mesh, writer),
        StlEncoding::Ascii => write_ascii(mesh, writer, name),
    }
}

fn write_binary<W: Write>(mesh: &IndexedMesh, mut writer: W) -> IoResult<()> {
    let count = u32::try_from(mesh.face_count()).map_err(|_| IoError::TooManyTriangles {
        count: mesh.face_count(),
    })?;

    let mut header = [b' '; HEADER_SIZE];
    header[..HEADER_TEXT.len()].copy_from_slice(HEADER_TEXT);
    writer.write_all(&header)?;
    writer.write_all(&count.to_le_bytes())?;

    // The last 2 bytes, the attribute byte count, stay 0.
    let mut record = [0; TRIANGLE_SIZE];
    for triangle in mesh.triangles() {
        let normal = normal(triangle).unwrap_or_default();

        for (buf, vector) in record
            .chunks_exact_mut(12)
            .zip(std::iter::once(normal).chain(triangle))
        {
            write_vertex(buf, vector);
        }
        writer.write_all(&record)?;
    }

    Ok(())
}

/// Write a vector as 3 f32s in little-endian.
#[allow(clippy::cast_possible_truncation)]
fn write_vertex(buf: &mut [u8], vector: Vector3) {
    for (bytes, coordinate) in buf.chunks_exact_mut(4).zip(vector.iter()) {
        bytes.copy_from_slice(&(*coordinate as f32).to_le_bytes());
    }
}

fn write_ascii<W: Write>(mesh: &IndexedMesh, mut writer: W, name: &str) -> IoResult<()> {
    writeln!(writer, "solid {name}")?;

    for triangle in mesh.triangles() {
        let [nx, ny, nz] = normal(triangle).unwrap_or_default().to_array();

        writeln!(writer, "  facet normal {nx:e} {ny:e} {nz:e}")?;
        writeln!(writer, "    outer loop")?;
        for [x, y, z] in triangle.map(Vector3::to_array) {
            writeln!(writer, "      vertex {x:e} {y:e} {z:e}")?;
        }
        writeln!(writer, "    endloop")?;
        writeln!(writer, "  endfacet")?;
    }

    writeln!(writer, "endsolid {name}")?;

    Ok(())
}
