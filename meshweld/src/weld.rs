use crate::{
    mesh::{Face, IndexedMesh},
    storage::{KdTree, PointId},
    vector::Vector3,
};
use tracing::{debug, warn};

/// Default welding tolerance, as a squared distance (about `1e-4` in distance).
pub const DEFAULT_TOLERANCE: f64 = 1e-8;

/// Options of a [`Welder`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WeldOptions {
    /// Whether vertices close to an already seen vertex reuse its id.
    pub merge: bool,
    /// Largest squared distance between two vertices that are merged.
    pub tolerance: f64,
}

impl WeldOptions {
    /// Options keeping every vertex, as triangle soups are stored.
    pub const UNMERGED: Self = Self {
        merge: false,
        tolerance: DEFAULT_TOLERANCE,
    };

    /// Creates new [`WeldOptions`] merging vertices within the given squared distance.
    #[inline]
    pub const fn with_tolerance(tolerance: f64) -> Self {
        Self {
            merge: true,
            tolerance,
        }
    }
}

impl Default for WeldOptions {
    #[inline]
    fn default() -> Self {
        Self::with_tolerance(DEFAULT_TOLERANCE)
    }
}

#[derive(Debug)]
enum Vertices {
    Merged(KdTree<3>),
    Unmerged(Vec<Vector3>),
}

/// Builds an [`IndexedMesh`] from a stream of triangles given by their corner positions.
///
/// When merging, each corner is compared to the vertices seen so far only: it reuses the id of
/// the nearest one if their squared distance is at most the tolerance, and becomes a new vertex
/// otherwise. The ids, and which corners are merged, therefore depend on the order of the stream.
///
/// # Example
///
/// ```
/// use meshweld::{vector::Vector3, weld::{WeldOptions, Welder}};
///
/// let mut welder = Welder::new(WeldOptions::default());
/// let a = welder.weld(Vector3::new([0.0, 0.0, 0.0]));
/// let b = welder.weld(Vector3::new([1e-5, 0.0, 0.0]));
/// let c = welder.weld(Vector3::new([1.0, 0.0, 0.0]));
///
/// assert_eq!(a, b);
/// assert_ne!(a, c);
/// assert_eq!(welder.vertex_count(), 2);
/// ```
#[derive(Debug)]
pub struct Welder {
    options: WeldOptions,
    vertices: Vertices,
    faces: Vec<Face>,
    merged: usize,
}

impl Welder {
    /// Creates a new [`Welder`].
    #[inline]
    pub fn new(options: WeldOptions) -> Self {
        Self::with_capacity(options, 0)
    }

    /// Creates a new [`Welder`] with room for the given number of triangles.
    pub fn with_capacity(options: WeldOptions, triangles: usize) -> Self {
        // Closed meshes have about half as many vertices as triangles.
        let vertices = if options.merge {
            Vertices::Merged(KdTree::with_capacity(triangles / 2))
        } else {
            Vertices::Unmerged(Vec::with_capacity(triangles * 3))
        };

        Self {
            options,
            vertices,
            faces: Vec::with_capacity(triangles),
            merged: 0,
        }
    }

    /// Returns the options of this [`Welder`].
    #[inline]
    pub const fn options(&self) -> &WeldOptions {
        &self.options
    }

    /// Returns the id of a vertex at `position`, storing it if needed.
    ///
    /// # Panics
    ///
    /// Panics if `u32::MAX` vertices are already stored.
    pub fn weld(&mut self, position: Vector3) -> PointId {
        match &mut self.vertices {
            Vertices::Merged(tree) => match tree.nearest(&position) {
                Some(nearest) if nearest.distance_squared <= self.options.tolerance => {
                    self.merged += 1;
                    nearest.id
                }
                _ => tree.insert(position),
            },
            Vertices::Unmerged(vertices) => {
                let id = vertices.len();
                assert!(
                    id < PointId::MAX as usize,
                    "point store exhausted after {id} points"
                );
                vertices.push(position);
                id as PointId
            }
        }
    }

    /// Welds the corners of a triangle in order and stores the resulting face.
    #[inline]
    pub fn push_triangle(&mut self, corners: [Vector3; 3]) -> Face {
        let face = corners.map(|corner| self.weld(corner));
        self.faces.push(face);
        face
    }

    /// Returns the number of distinct vertices stored so far.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        match &self.vertices {
            Vertices::Merged(tree) => tree.len(),
            Vertices::Unmerged(vertices) => vertices.len(),
        }
    }

    /// Returns the number of corners that reused the id of an earlier vertex.
    #[inline]
    pub const fn merged_count(&self) -> usize {
        self.merged
    }

    /// Consumes the [`Welder`] and returns the mesh of the pushed triangles.
    pub fn finish(self) -> IndexedMesh {
        let vertices = match self.vertices {
            Vertices::Merged(tree) => {
                debug!(
                    vertices = tree.len(),
                    merged = self.merged,
                    depth = tree.depth(),
                    "welded vertices"
                );
                if tree.len() >= 1024 && tree.depth() * 2 > tree.len() {
                    warn!(
                        depth = tree.depth(),
                        vertices = tree.len(),
                        "vertex tree degenerated into a list, welding was slow"
                    );
                }
                tree.into_points()
            }
            Vertices::Unmerged(vertices) => vertices,
        };

        IndexedMesh {
            vertices,
            faces: self.faces,
        }
    }
}
