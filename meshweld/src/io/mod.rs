/// Wavefront OBJ reading and writing.
pub mod obj;
/// STL reading, with vertex welding, and writing.
pub mod stl;

pub use stl::StlEncoding;

use crate::{
    error::{IoError, IoResult},
    mesh::IndexedMesh,
    vector::Vector3,
    weld::WeldOptions,
};
use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

/// Supported mesh file formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MeshFormat {
    /// STL, binary or ASCII.
    Stl,
    /// Wavefront OBJ.
    Obj,
}

impl MeshFormat {
    /// Detects the format from the extension of `path`, ignoring case.
    ///
    /// Returns `None` if the extension is missing or not recognized.
    #[must_use]
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let extension = path.as_ref().extension()?.to_str()?.to_lowercase();
        match extension.as_str() {
            "stl" => Some(Self::Stl),
            "obj" => Some(Self::Obj),
            _ => None,
        }
    }

    /// Returns the canonical file extension of the format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Stl => "stl",
            Self::Obj => "obj",
        }
    }

    fn detect(path: &Path) -> IoResult<Self> {
        Self::from_path(path).ok_or_else(|| IoError::UnknownFormat {
            extension: path
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("(none)")
                .to_string(),
        })
    }
}

/// Loads a mesh, detecting its format from the extension of `path`.
///
/// Vertices of STL files are welded with `options`. OBJ files are already indexed and are loaded
/// as written.
///
/// # Errors
///
/// Returns an error if the extension is not recognized, the file cannot be read or its content
/// is invalid.
///
/// # Example
///
/// ```no_run
/// use meshweld::{io, weld::WeldOptions};
///
/// let mesh = io::load("model.stl", &WeldOptions::default()).unwrap();
/// io::save(&mesh, "model.obj", io::StlEncoding::default()).unwrap();
/// ```
pub fn load<P: AsRef<Path>>(path: P, options: &WeldOptions) -> IoResult<IndexedMesh> {
    let path = path.as_ref();

    match MeshFormat::detect(path)? {
        MeshFormat::Stl => stl::load_stl(path, options),
        MeshFormat::Obj => obj::load_obj(path),
    }
}

/// Saves a mesh, detecting the format from the extension of `path`.
///
/// `encoding` is only used for STL files.
///
/// # Errors
///
/// Returns an error if the extension is not recognized, a face references a missing vertex or
/// the file cannot be written.
pub fn save<P: AsRef<Path>>(mesh: &IndexedMesh, path: P, encoding: StlEncoding) -> IoResult<()> {
    let path = path.as_ref();

    match MeshFormat::detect(path)? {
        MeshFormat::Stl => stl::save_stl(mesh, path, encoding),
        MeshFormat::Obj => obj::save_obj(mesh, path),
    }
}

fn open(path: &Path) -> IoResult<BufReader<File>> {
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IoError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IoError::Io(e)
        }
    })?;

    Ok(BufReader::new(file))
}

fn create(path: &Path) -> IoResult<BufWriter<File>> {
    Ok(BufWriter::new(File::create(path)?))
}

// Name written in file headers, taken from the file stem.
fn mesh_name(path: &Path) -> &str {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("mesh")
}

fn check_faces(mesh: &IndexedMesh) -> IoResult<()> {
    match mesh.check_faces() {
        Some((face, index)) => Err(IoError::FaceIndex {
            face,
            index,
            count: mesh.vertex_count(),
        }),
        None => Ok(()),
    }
}

// Parses the first three coordinates of a text record. Extra coordinates are ignored.
fn parse_point<'a>(mut fields: impl Iterator<Item = &'a str>, line: usize) -> IoResult<Vector3> {
    let mut coordinates = [0.0; 3];

    for coordinate in &mut coordinates {
        let field = fields
            .next()
            .ok_or_else(|| IoError::invalid_content(line, "expected 3 coordinates"))?;
        *coordinate = field.parse().map_err(|_| {
            IoError::invalid_content(line, format!("invalid coordinate `{field}`"))
        })?;
    }

    Ok(Vector3::new(coordinates))
}
