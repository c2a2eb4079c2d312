use crate::{storage::PointId, vector::Vector3};

/// Triangle as three vertex ids.
pub type Face = [PointId; 3];

/// Triangle mesh with shared vertices.
///
/// Faces refer to vertices by their index in `vertices`. Nothing prevents building a mesh with
/// out of range indices; [`IndexedMesh::check_faces`] finds them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IndexedMesh {
    /// Vertex positions.
    pub vertices: Vec<Vector3>,
    /// Triangles, counter-clockwise when seen from outside.
    pub faces: Vec<Face>,
}

impl IndexedMesh {
    /// Creates a new empty [`IndexedMesh`].
    #[inline]
    pub const fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of faces.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Returns `true` if the mesh has no face.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Returns the corners of a face.
    ///
    /// # Panics
    ///
    /// Panics if `face` or one of its vertex ids is out of range.
    #[inline]
    pub fn triangle(&self, face: usize) -> [Vector3; 3] {
        self.faces[face].map(|id| self.vertices[id as usize])
    }

    /// Returns an iterator over the corners of every face.
    ///
    /// # Panics
    ///
    /// The iterator panics on faces with out of range vertex ids.
    #[inline]
    pub fn triangles(&self) -> impl ExactSizeIterator<Item = [Vector3; 3]> + '_ {
        self.faces
            .iter()
            .map(|face| face.map(|id| self.vertices[id as usize]))
    }

    /// Returns the unit normal of a face following its winding, or `None` if the face is
    /// degenerate.
    #[inline]
    pub fn face_normal(&self, face: usize) -> Option<Vector3> {
        normal(self.triangle(face))
    }

    /// Returns the first face referencing a vertex that does not exist, with that vertex id.
    pub fn check_faces(&self) -> Option<(usize, PointId)> {
        let count = self.vertices.len();

        self.faces.iter().enumerate().find_map(|(i, face)| {
            face.iter()
                .find(|&&id| id as usize >= count)
                .map(|&id| (i, id))
        })
    }
}

/// Returns the unit normal of a triangle following its winding, or `None` if it is degenerate.
#[inline]
pub fn normal([a, b, c]: [Vector3; 3]) -> Option<Vector3> {
    (b - a).cross(c - a).try_unit()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> IndexedMesh {
        IndexedMesh {
            vertices: vec![
                Vector3::new([0.0, 0.0, 0.0]),
                Vector3::new([1.0, 0.0, 0.0]),
                Vector3::new([1.0, 1.0, 0.0]),
                Vector3::new([0.0, 1.0, 0.0]),
            ],
            faces: vec![[0, 1, 2], [0, 2, 3]],
        }
    }

    #[test]
    fn counts() {
        let mesh = quad();

        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.face_count(), 2);
        assert!(!mesh.is_empty());
        assert!(IndexedMesh::new().is_empty());
        assert_eq!(mesh.triangles().len(), 2);
        assert_eq!(mesh.triangle(1)[2], Vector3::new([0.0, 1.0, 0.0]));
    }

    #[test]
    fn normals() {
        let mut mesh = quad();
        assert_eq!(mesh.face_normal(0), Some(Vector3::new([0.0, 0.0, 1.0])));

        mesh.faces.push([0, 1, 1]);
        assert_eq!(mesh.face_normal(2), None);
    }

    #[test]
    fn out_of_range_faces() {
        let mut mesh = quad();
        assert_eq!(mesh.check_faces(), None);

        mesh.faces.push([3, 4, 0]);
        assert_eq!(mesh.check_faces(), Some((2, 4)));
    }
}
