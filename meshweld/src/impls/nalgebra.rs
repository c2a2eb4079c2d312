use crate::{scalar::Float, vector::VectorN};
use nalgebra::{Point, SVector};

impl<const D: usize, S: Float + nalgebra::Scalar> From<SVector<S, D>> for VectorN<D, S> {
    #[inline]
    fn from(v: SVector<S, D>) -> Self {
        Self::new(v.into())
    }
}

impl<const D: usize, S: Float + nalgebra::Scalar> From<VectorN<D, S>> for SVector<S, D> {
    #[inline]
    fn from(v: VectorN<D, S>) -> Self {
        Self::from(v.to_array())
    }
}

impl<const D: usize, S: Float + nalgebra::Scalar> From<Point<S, D>> for VectorN<D, S> {
    #[inline]
    fn from(p: Point<S, D>) -> Self {
        Self::from(p.coords)
    }
}

impl<const D: usize, S: Float + nalgebra::Scalar> From<VectorN<D, S>> for Point<S, D> {
    #[inline]
    fn from(v: VectorN<D, S>) -> Self {
        Self::from(SVector::from(v))
    }
}
