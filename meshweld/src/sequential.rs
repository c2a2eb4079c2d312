use crate::{
    scalar::Float,
    storage::{KdTree, Nearest, PointId},
    tree::{plane_distance_squared, Side},
    vector::VectorN,
    Between, Search,
};

/// Trait to search for the nearest stored points using different sequential algorithms.
pub trait SequentialSearch: Sized {
    /// Returns the nearest stored points by comparing against every one of them.
    ///
    /// Refer to [`BruteForce`] for more information.
    #[inline]
    fn brute_force(self) -> <BruteForce as Search<Self>>::Output
    where
        BruteForce: Search<Self>,
    {
        BruteForce.search(self)
    }

    /// Returns the nearest stored points by walking the K-D tree they are stored in.
    ///
    /// Refer to [`KdSearch`] for more information.
    #[inline]
    fn kd_search(self) -> <KdSearch as Search<Self>>::Output
    where
        KdSearch: Search<Self>,
    {
        KdSearch.search(self)
    }
}

impl<S1, S2> SequentialSearch for Between<S1, S2> {}

/// An iterator that searches a storage for the nearest point to each query of an iterator using a
/// given search algorithm.
#[must_use = "iterators are lazy and do nothing unless consumed"]
#[derive(Clone, Debug)]
pub struct Searches<A, I, S> {
    algorithm: A,
    queries: I,
    storage: S,
}

impl<A, I, S> Searches<A, I, S> {
    #[inline]
    const fn new(algorithm: A, queries: I, storage: S) -> Self {
        Self {
            algorithm,
            queries,
            storage,
        }
    }
}

impl<A, I, S> Iterator for Searches<A, I, S>
where
    I: Iterator,
    S: Copy,
    A: Search<Between<I::Item, S>>,
{
    type Item = A::Output;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.queries
            .next()
            .map(|query| self.algorithm.search(Between(query, self.storage)))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.queries.size_hint()
    }
}

impl<A, I, S> DoubleEndedIterator for Searches<A, I, S>
where
    I: DoubleEndedIterator,
    S: Copy,
    A: Search<Between<I::Item, S>>,
{
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.queries
            .next_back()
            .map(|query| self.algorithm.search(Between(query, self.storage)))
    }
}

impl<A, I, S> ExactSizeIterator for Searches<A, I, S>
where
    I: ExactSizeIterator,
    Self: Iterator,
{
    #[inline]
    fn len(&self) -> usize {
        self.queries.len()
    }
}

/// Brute-force nearest point search.
///
/// Every stored point is compared with the query in id order, and the best candidate is only
/// replaced by a strictly closer point, so the lowest id wins among equally distant points.
#[derive(Clone, Copy, Default, Debug)]
pub struct BruteForce;

// Ids are positions in the slice, so slices of more than `u32::MAX` points are not supported.
impl<const D: usize, S: Float> Search<Between<&VectorN<D, S>, &[VectorN<D, S>]>> for BruteForce {
    type Output = Option<Nearest<S>>;

    #[inline]
    fn search(
        &mut self,
        Between(query, points): Between<&VectorN<D, S>, &[VectorN<D, S>]>,
    ) -> Self::Output {
        let mut nearest: Option<Nearest<S>> = None;

        for (id, point) in (0..).zip(points) {
            let distance_squared = query.distance_squared(*point);

            if nearest.map_or(true, |best| distance_squared < best.distance_squared) {
                nearest = Some(Nearest::new(id, distance_squared));
            }
        }

        nearest
    }
}

impl<const D: usize, S: Float> Search<Between<&VectorN<D, S>, &KdTree<D, S>>> for BruteForce {
    type Output = Option<Nearest<S>>;

    #[inline]
    fn search(
        &mut self,
        Between(query, tree): Between<&VectorN<D, S>, &KdTree<D, S>>,
    ) -> Self::Output {
        self.search(Between(query, tree.points()))
    }
}

/// Nearest point search pruned with the K-D tree.
///
/// The search first descends from the root to the leaf region containing the query, following the
/// same rule as insertion, and takes the last node reached as its first candidate. It then walks
/// the tree again from the root: every visited node strictly closer than the best candidate
/// replaces it. Both children of a node are visited, left first, when its hyperplane is strictly
/// closer than the best candidate; otherwise only the child on the query's side is.
///
/// The result is always at the same distance as the one of [`BruteForce`], but may be a
/// different point when several are equally distant.
#[derive(Clone, Copy, Default, Debug)]
pub struct KdSearch;

impl<const D: usize, S: Float> Search<Between<&VectorN<D, S>, &KdTree<D, S>>> for KdSearch {
    type Output = Option<Nearest<S>>;

    #[inline]
    fn search(
        &mut self,
        Between(query, tree): Between<&VectorN<D, S>, &KdTree<D, S>>,
    ) -> Self::Output {
        let arena = tree.get();
        let parent = arena.descend(tree.root(), query)?.parent;
        let mut best = Nearest::new(parent, query.distance_squared(tree.get_point(parent)));

        let mut stack: Vec<PointId> = Vec::with_capacity(tree.depth() + 1);
        stack.extend(tree.root());

        while let Some(id) = stack.pop() {
            let node = &arena.nodes[id as usize];
            let point = &arena.data[id as usize];

            let distance_squared = query.distance_squared(*point);
            if distance_squared < best.distance_squared {
                best = Nearest::new(id, distance_squared);
            }

            if plane_distance_squared(query, point, node.axis) < best.distance_squared {
                // Right is pushed first so the left subtree is walked entirely before it.
                stack.extend(node.right);
                stack.extend(node.left);
            } else {
                stack.extend(node.child(Side::of_point(query, point, node.axis)));
            }
        }

        Some(best)
    }
}

macro_rules! impl_batch_search {
    ($algorithm: ident) => {
        impl<'a, const D: usize, S: Float> Search<Between<&'a [VectorN<D, S>], &'a KdTree<D, S>>>
            for $algorithm
        {
            type Output = Searches<Self, std::slice::Iter<'a, VectorN<D, S>>, &'a KdTree<D, S>>;

            #[inline]
            fn search(
                &mut self,
                Between(queries, tree): Between<&'a [VectorN<D, S>], &'a KdTree<D, S>>,
            ) -> Self::Output {
                Searches::new(*self, queries.iter(), tree)
            }
        }
    };
}

impl_batch_search!(BruteForce);
impl_batch_search!(KdSearch);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::Vector2;
    use rand::prelude::*;

    fn scattered(len: usize) -> Vec<Vector2> {
        let mut rng = StdRng::seed_from_u64(1808);
        (0..len)
            .map(|_| Vector2::new([rng.gen_range(-10.0..10.0), rng.gen_range(-10.0..10.0)]))
            .collect()
    }

    #[test]
    fn batch_matches_single_queries() {
        let tree = KdTree::<2>::from_points(scattered(256));
        let queries = scattered(32);

        let batch = Between(queries.as_slice(), &tree).kd_search().collect::<Vec<_>>();
        let single = queries
            .iter()
            .map(|query| Between(query, &tree).kd_search())
            .collect::<Vec<_>>();

        assert_eq!(batch.len(), queries.len());
        assert_eq!(batch, single);
    }

    #[test]
    fn brute_force_prefers_lowest_id() {
        let tree = KdTree::<2>::from_points([[1.0, 0.0], [-1.0, 0.0], [0.0, 1.0], [1.0, 0.0]]);
        let query = Vector2::zero();

        assert_eq!(
            Between(&query, &tree).brute_force(),
            Some(Nearest::new(0, 1.0))
        );

        let queries = [query, Vector2::new([1.0, 0.1])];
        let searches = Between(queries.as_slice(), &tree).brute_force();
        assert_eq!(searches.len(), 2);
        assert_eq!(searches.rev().map(|n| n.unwrap().id).collect::<Vec<_>>(), [0, 0]);
    }

    #[test]
    fn brute_force_over_slices() {
        let points = scattered(64);
        let tree = KdTree::<2>::from_points(points.iter().copied());
        let query = Vector2::new([0.5, -0.5]);

        assert_eq!(
            Between(&query, points.as_slice()).brute_force(),
            Between(&query, &tree).brute_force()
        );

        let empty: &[Vector2] = &[];
        assert_eq!(Between(&query, empty).brute_force(), None);
    }

    #[test]
    fn pruned_search_crosses_hyperplanes() {
        // The query falls right of the root, where nothing is stored.
        let tree = KdTree::<2>::from_points([[0.0, 0.0], [-0.1, 5.0]]);
        let query = Vector2::new([0.05, 5.0]);

        assert_eq!(Between(&query, &tree).kd_search().map(|n| n.id), Some(1));
    }

    #[test]
    fn pruned_search_improves_first_candidate() {
        let tree = KdTree::<2>::from_points([[0.0, 0.0], [5.0, 0.0], [5.0, -1.0], [5.0, 1.0]]);
        let query = Vector2::new([5.0, 0.4]);

        // Descending the tree ends at (5, 1), but its parent (5, 0) is closer.
        assert_eq!(tree.get().descend(tree.root(), &query).map(|d| d.parent), Some(3));
        assert_eq!(Between(&query, &tree).kd_search().map(|n| n.id), Some(1));
        assert_eq!(tree.find_nearest_brute_force(&query), Some(1));
    }
}
