use crate::storage::PointId;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for mesh I/O operations.
pub type IoResult<T> = Result<T, IoError>;

/// Errors that can occur while reading or writing meshes.
#[derive(Debug, Error)]
pub enum IoError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was not found.
        path: PathBuf,
    },

    /// Unknown file format (unrecognized extension).
    #[error("unknown file format: .{extension}")]
    UnknownFormat {
        /// The unrecognized extension.
        extension: String,
    },

    /// Binary STL stream too short to hold its header and triangle count.
    #[error("invalid STL header: expected {expected} bytes, got {got}")]
    InvalidHeader {
        /// Expected header size.
        expected: usize,
        /// Actual stream size.
        got: usize,
    },

    /// Binary STL stream holding fewer triangles than its header declares.
    #[error("truncated STL: header declares {expected} triangles, stream holds {got}")]
    TruncatedStl {
        /// Number of triangles declared by the header.
        expected: usize,
        /// Number of complete triangle records in the stream.
        got: usize,
    },

    /// Malformed text record.
    #[error("line {line}: {message}")]
    InvalidContent {
        /// 1-based line number of the record.
        line: usize,
        /// Description of what was invalid.
        message: String,
    },

    /// OBJ face reference that does not resolve to a vertex read so far.
    #[error("line {line}: vertex reference {reference} is out of range for {count} vertices")]
    VertexReference {
        /// 1-based line number of the face.
        line: usize,
        /// Reference as written in the file.
        reference: i64,
        /// Number of vertices read before the face.
        count: usize,
    },

    /// Mesh face referencing a vertex that does not exist.
    #[error("face {face} references vertex {index} but the mesh has {count} vertices")]
    FaceIndex {
        /// Index of the face.
        face: usize,
        /// Out of range vertex index.
        index: PointId,
        /// Number of vertices in the mesh.
        count: usize,
    },

    /// Mesh with more faces than a binary STL can declare.
    #[error("{count} triangles do not fit in a binary STL")]
    TooManyTriangles {
        /// Number of faces in the mesh.
        count: usize,
    },

    /// I/O error from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// UTF-8 decoding error.
    #[error("UTF-8 decoding error: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

impl IoError {
    /// Create an `InvalidContent` error for the given line.
    #[must_use]
    pub fn invalid_content(line: usize, message: impl Into<String>) -> Self {
        Self::InvalidContent {
            line,
            message: message.into(),
        }
    }
}
