#![warn(missing_docs)]
//! # meshweld
//!
//! meshweld converts triangle meshes between the STL and Wavefront OBJ formats. STL files store
//! every triangle with its own copy of its corners, so reading one produces a "triangle soup".
//! meshweld welds corners closer than a small tolerance into shared vertices, producing an
//! indexed mesh that can be written as OBJ.
//!
//! ## Spatial index
//!
//! Welding is driven by [`KdTree`], an append-only store of points of any dimension indexed by an
//! unbalanced K-D tree. Every inserted point gets a stable [`PointId`], and nearest point queries
//! either walk the tree ([`KdTree::find_nearest`]) or compare against every point
//! ([`KdTree::find_nearest_brute_force`]).
//!
//! ```
//! use meshweld::prelude::*;
//!
//! let mut tree = KdTree::<3>::new();
//! for point in [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]] {
//!     tree.insert(point);
//! }
//!
//! let query = Vector3::new([0.1, 0.1, 0.1]);
//! assert_eq!(tree.find_nearest(&query), Some(0));
//! assert_eq!(tree.find_nearest_brute_force(&query), Some(0));
//! ```
//!
//! Search algorithms are values implementing [`Search`] over a [`Between`] pair of queries and a
//! storage, and can be called through the [`SequentialSearch`] extension trait. Searching with a
//! slice of queries returns a lazy iterator.
//!
//! ```
//! use meshweld::prelude::*;
//!
//! let tree = KdTree::<2>::from_points([[0.0, 0.0], [4.0, 0.0], [0.0, 4.0]]);
//! let queries = [Vector2::new([3.0, 1.0]), Vector2::new([-1.0, 3.0])];
//!
//! let nearest = Between(queries.as_slice(), &tree)
//!     .kd_search()
//!     .map(|nearest| nearest.map(|n| n.id))
//!     .collect::<Vec<_>>();
//!
//! assert_eq!(nearest, [Some(1), Some(2)]);
//! ```
//!
//! ## Converting meshes
//!
//! ```no_run
//! use meshweld::{io, weld::WeldOptions};
//!
//! let mesh = io::load("part.stl", &WeldOptions::default()).unwrap();
//! println!("{} vertices, {} faces", mesh.vertex_count(), mesh.face_count());
//!
//! io::save(&mesh, "part.obj", io::StlEncoding::default()).unwrap();
//! ```
//!
//! [`KdTree`]: storage::KdTree
//! [`KdTree::find_nearest`]: storage::KdTree::find_nearest
//! [`KdTree::find_nearest_brute_force`]: storage::KdTree::find_nearest_brute_force
//! [`PointId`]: storage::PointId
//! [`SequentialSearch`]: sequential::SequentialSearch

/// Error types for mesh I/O.
pub mod error;
/// Conversions with the vector types of other math libraries.
mod impls;
/// Mesh file formats.
pub mod io;
/// Indexed triangle meshes.
pub mod mesh;
/// Traits for the floating-point types used as coordinates.
pub mod scalar;
/// Search algorithms that use one CPU thread.
pub mod sequential;
/// Point stores searched by the algorithms.
pub mod storage;
/// Tree and space partitioning implementation.
pub mod tree;
/// Fixed-size vectors used as points.
pub mod vector;
/// Merging of coincident vertices of triangle soups.
pub mod weld;

/// Represents a pair of objects, a query or queries and the storage searched for them.
#[derive(Clone, Copy, Debug)]
pub struct Between<S1, S2>(pub S1, pub S2);

/// Trait to search a storage, implemented by search algorithms.
///
/// For example, [`KdSearch`](sequential::KdSearch) implements
/// `Search<Between<&VectorN<D, S>, &KdTree<D, S>>>` to find the stored point nearest to a query.
pub trait Search<Storage> {
    /// The search result. This can be one or multiple values depending on the storage used.
    type Output;

    /// Returns the result of the search in the storage.
    fn search(&mut self, storage: Storage) -> Self::Output;
}

/// Most commonly used re-exported types.
pub mod prelude {
    pub use crate::{
        error::{IoError, IoResult},
        mesh::IndexedMesh,
        sequential::SequentialSearch,
        storage::{KdTree, Nearest, PointId},
        vector::{Vector2, Vector3, VectorN},
        weld::{WeldOptions, Welder},
        Between, Search,
    };
}
