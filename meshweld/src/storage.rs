use crate::{
    scalar::Float,
    sequential::{BruteForce, KdSearch},
    tree::{KdArena, NodeID},
    vector::VectorN,
    Between, Search,
};

/// Stable identifier of a point stored in a [`KdTree`], assigned in insertion order from 0.
///
/// The point with id `i` is also the tree node with index `i`.
pub type PointId = NodeID;

/// Nearest stored point to a query point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Nearest<S> {
    /// Id of the stored point.
    pub id: PointId,
    /// Squared Euclidean distance between the query and the stored point.
    pub distance_squared: S,
}

impl<S> Nearest<S> {
    /// Creates a new [`Nearest`] result.
    #[inline]
    pub const fn new(id: PointId, distance_squared: S) -> Self {
        Self {
            id,
            distance_squared,
        }
    }
}

/// Append-only point store indexed by an unbalanced K-D tree.
///
/// Points are never removed or moved, so a [`PointId`] returned by [`KdTree::insert`] refers to
/// the same point for the lifetime of the store. The tree is built incrementally in insertion
/// order and never rebalanced: inserting sorted points degrades it into a list, which slows
/// queries down but keeps them correct.
///
/// A [`KdTree`] cannot be cloned. Use [`KdTree::rebuild`] to get an independent store with the
/// same points and ids.
///
/// # Example
///
/// ```
/// use meshweld::{storage::KdTree, vector::Vector3};
///
/// let mut tree = KdTree::<3>::new();
/// let origin = tree.insert([0.0, 0.0, 0.0]);
/// let x = tree.insert([1.0, 0.0, 0.0]);
///
/// assert_eq!(tree.find_nearest(&Vector3::new([0.9, 0.1, 0.0])), Some(x));
/// assert_eq!(tree.find_nearest(&Vector3::new([0.1, 0.1, 0.1])), Some(origin));
/// assert_eq!(tree.get_point(x), Vector3::new([1.0, 0.0, 0.0]));
/// ```
#[derive(Debug)]
pub struct KdTree<const D: usize, S = f64> {
    root: Option<NodeID>,
    depth: usize,
    tree: KdArena<D, S>,
}

impl<const D: usize, S: Float> KdTree<D, S> {
    /// Creates a new empty [`KdTree`].
    #[inline]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates a new empty [`KdTree`] with room for at least `capacity` points.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            root: None,
            depth: 0,
            tree: KdArena::with_capacity(capacity),
        }
    }

    /// Creates a new [`KdTree`] by inserting the given points in order.
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<VectorN<D, S>>,
    {
        let points = points.into_iter();
        let mut tree = Self::with_capacity(points.size_hint().0);
        tree.extend(points);
        tree
    }

    /// Stores a copy of `point` and returns its id, which is the number of points stored before
    /// the call.
    ///
    /// Duplicate points are stored again under a new id.
    ///
    /// # Panics
    ///
    /// Panics if the store already holds `u32::MAX` points.
    #[inline]
    pub fn insert(&mut self, point: impl Into<VectorN<D, S>>) -> PointId {
        let (id, depth) = self.tree.attach(self.root, point.into());
        self.root.get_or_insert(id);
        self.depth = self.depth.max(depth);

        id
    }

    /// Returns the number of stored points.
    #[inline]
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns the number of stored points. Same as [`KdTree::len`].
    #[inline]
    pub fn size(&self) -> usize {
        self.len()
    }

    /// Returns `true` if no point is stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Returns the point stored under `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not returned by [`KdTree::insert`] on this store.
    #[inline]
    pub fn get_point(&self, id: PointId) -> VectorN<D, S> {
        self.tree.data[id as usize]
    }

    /// Returns the point stored under `id`, or `None` if there is none.
    #[inline]
    pub fn point(&self, id: PointId) -> Option<&VectorN<D, S>> {
        self.tree.data.get(id as usize)
    }

    /// Returns the stored points, indexed by id.
    #[inline]
    pub fn points(&self) -> &[VectorN<D, S>] {
        &self.tree.data
    }

    /// Consumes the store and returns its points, indexed by id.
    #[inline]
    pub fn into_points(self) -> Vec<VectorN<D, S>> {
        self.tree.data
    }

    /// Returns the root of the tree, `Some(0)` unless the store is empty.
    #[inline]
    pub const fn root(&self) -> Option<NodeID> {
        self.root
    }

    /// Returns a reference to the underlying tree.
    #[inline]
    pub const fn get(&self) -> &KdArena<D, S> {
        &self.tree
    }

    /// Returns the number of nodes on the longest path from the root to a leaf, 0 when empty.
    #[inline]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Returns the id of a stored point with the smallest squared distance to `point`, using
    /// the tree to skip subtrees that cannot hold a closer point.
    ///
    /// Among several points at the same distance, which one is returned depends on the shape of
    /// the tree. Returns `None` if the store is empty.
    #[inline]
    pub fn find_nearest(&self, point: &VectorN<D, S>) -> Option<PointId> {
        self.nearest(point).map(|nearest| nearest.id)
    }

    /// Returns the id of the first inserted point with the smallest squared distance to `point`,
    /// comparing against every stored point.
    ///
    /// Returns `None` if the store is empty.
    #[inline]
    pub fn find_nearest_brute_force(&self, point: &VectorN<D, S>) -> Option<PointId> {
        BruteForce
            .search(Between(point, self))
            .map(|nearest| nearest.id)
    }

    /// Same as [`KdTree::find_nearest`], also returning the squared distance to the found point.
    #[inline]
    pub fn nearest(&self, point: &VectorN<D, S>) -> Option<Nearest<S>> {
        KdSearch.search(Between(point, self))
    }

    /// Creates an independent [`KdTree`] by inserting the points of this one again in id order.
    ///
    /// The result has the same ids and tree shape as `self`.
    #[inline]
    pub fn rebuild(&self) -> Self {
        Self::from_points(self.points().iter().copied())
    }
}

impl<const D: usize, S: Float> Default for KdTree<D, S> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<const D: usize, S: Float, V: Into<VectorN<D, S>>> Extend<V> for KdTree<D, S> {
    #[inline]
    fn extend<I: IntoIterator<Item = V>>(&mut self, iter: I) {
        for point in iter {
            self.insert(point);
        }
    }
}

impl<const D: usize, S: Float, V: Into<VectorN<D, S>>> FromIterator<V> for KdTree<D, S> {
    #[inline]
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self::from_points(iter)
    }
}
