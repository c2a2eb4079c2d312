use crate::scalar::Float;
use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign},
};
use thiserror::Error;

/// Point or vector with `D` real coordinates of type `S`.
///
/// All arithmetic returns new values; only the compound-assignment operators mutate, and only the
/// left-hand side. Indexing outside `0..D` panics.
///
/// # Example
///
/// ```
/// use meshweld::vector::Vector3;
///
/// let a = Vector3::new([1.0, 0.0, 0.0]);
/// let b = Vector3::new([0.0, 1.0, 0.0]);
///
/// assert_eq!(a * b, 0.0);
/// assert_eq!(a.cross(b), Vector3::new([0.0, 0.0, 1.0]));
/// assert_eq!(Vector3::distance_squared(a, b), 2.0);
/// ```
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VectorN<const D: usize, S = f64>([S; D]);

/// Two-dimensional [`VectorN`].
pub type Vector2<S = f64> = VectorN<2, S>;

/// Three-dimensional [`VectorN`].
pub type Vector3<S = f64> = VectorN<3, S>;

/// Error returned when building a [`VectorN`] from a slice of the wrong length.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("expected {expected} components, got {got}")]
pub struct ArityError {
    /// Dimension of the vector.
    pub expected: usize,
    /// Length of the slice.
    pub got: usize,
}

impl<const D: usize, S> VectorN<D, S> {
    /// Creates a new [`VectorN`] from exactly `D` components.
    #[inline]
    pub const fn new(components: [S; D]) -> Self {
        Self(components)
    }

    /// Creates a new [`VectorN`] with all components set to `value`.
    #[inline]
    pub fn splat(value: S) -> Self
    where
        S: Copy,
    {
        Self([value; D])
    }

    /// Returns a reference to the components.
    #[inline]
    pub const fn as_array(&self) -> &[S; D] {
        &self.0
    }

    /// Returns the components.
    #[inline]
    pub fn to_array(self) -> [S; D] {
        self.0
    }

    /// Returns an iterator over the components.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, S> {
        self.0.iter()
    }
}

impl<const D: usize, S: Float> VectorN<D, S> {
    /// Creates a new [`VectorN`] with all components set to zero.
    #[inline]
    pub fn zero() -> Self {
        Self::splat(S::ZERO)
    }

    #[inline]
    fn zip_with(self, rhs: Self, f: impl Fn(S, S) -> S) -> Self {
        Self(std::array::from_fn(|i| f(self.0[i], rhs.0[i])))
    }

    #[inline]
    fn map(self, f: impl Fn(S) -> S) -> Self {
        Self(self.0.map(f))
    }

    /// Returns the dot product of two vectors. Also available as `lhs * rhs`.
    #[inline]
    pub fn dot(self, rhs: Self) -> S {
        self.0
            .iter()
            .zip(rhs.0.iter())
            .fold(S::ZERO, |acc, (&a, &b)| acc + a * b)
    }

    /// Returns the element-wise product of two vectors.
    #[inline]
    pub fn mul_elements(self, rhs: Self) -> Self {
        self.zip_with(rhs, |a, b| a * b)
    }

    /// Returns the squared magnitude of the vector.
    #[doc(alias = "magnitude_squared")]
    #[doc(alias = "length_squared")]
    #[inline]
    pub fn norm_squared(self) -> S {
        self.dot(self)
    }

    /// Returns the magnitude of the vector.
    #[doc(alias = "magnitude")]
    #[doc(alias = "length")]
    #[inline]
    pub fn norm(self) -> S {
        self.norm_squared().sqrt()
    }

    /// Returns the vector scaled to unit length, or `None` if its magnitude is zero or not
    /// finite.
    #[inline]
    pub fn try_unit(self) -> Option<Self> {
        let norm = self.norm();
        (norm != S::ZERO && norm.is_finite()).then(|| self / norm)
    }

    /// Returns the vector scaled to unit length.
    ///
    /// # Panics
    ///
    /// Panics if the magnitude of the vector is zero or not finite. Use [`VectorN::try_unit`] when
    /// that can happen.
    #[inline]
    pub fn unit(self) -> Self {
        match self.try_unit() {
            Some(unit) => unit,
            None => panic!("cannot compute the unit vector of {self:?}"),
        }
    }

    /// Returns the squared Euclidean distance between two points.
    #[inline]
    pub fn distance_squared(self, rhs: Self) -> S {
        (self - rhs).norm_squared()
    }

    /// Returns the Euclidean distance between two points.
    #[inline]
    pub fn distance(self, rhs: Self) -> S {
        self.distance_squared(rhs).sqrt()
    }
}

impl<S: Float> VectorN<3, S> {
    /// Returns the cross product of two 3-dimensional vectors.
    #[inline]
    pub fn cross(self, rhs: Self) -> Self {
        let [a1, a2, a3] = self.0;
        let [b1, b2, b3] = rhs.0;
        Self([a2 * b3 - a3 * b2, a3 * b1 - a1 * b3, a1 * b2 - a2 * b1])
    }
}

impl<S: Float> VectorN<2, S> {
    /// Returns the `z` component of the cross product of two 2-dimensional vectors.
    #[inline]
    pub fn cross(self, rhs: Self) -> S {
        self.0[0] * rhs.0[1] - self.0[1] * rhs.0[0]
    }
}

impl<const D: usize, S: Float> Default for VectorN<D, S> {
    #[inline]
    fn default() -> Self {
        Self::zero()
    }
}

impl<const D: usize, S> From<[S; D]> for VectorN<D, S> {
    #[inline]
    fn from(components: [S; D]) -> Self {
        Self(components)
    }
}

impl<const D: usize, S> From<VectorN<D, S>> for [S; D] {
    #[inline]
    fn from(vector: VectorN<D, S>) -> Self {
        vector.0
    }
}

impl<const D: usize, S: Copy> TryFrom<&[S]> for VectorN<D, S> {
    type Error = ArityError;

    #[inline]
    fn try_from(slice: &[S]) -> Result<Self, Self::Error> {
        <[S; D]>::try_from(slice).map(Self).map_err(|_| ArityError {
            expected: D,
            got: slice.len(),
        })
    }
}

impl<const D: usize, S> Index<usize> for VectorN<D, S> {
    type Output = S;

    #[inline]
    fn index(&self, index: usize) -> &S {
        &self.0[index]
    }
}

impl<const D: usize, S> IndexMut<usize> for VectorN<D, S> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut S {
        &mut self.0[index]
    }
}

impl<const D: usize, S: Float> Add for VectorN<D, S> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        self.zip_with(rhs, |a, b| a + b)
    }
}

impl<const D: usize, S: Float> Sub for VectorN<D, S> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        self.zip_with(rhs, |a, b| a - b)
    }
}

impl<const D: usize, S: Float> Neg for VectorN<D, S> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        self.map(|a| -a)
    }
}

impl<const D: usize, S: Float> Mul<S> for VectorN<D, S> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: S) -> Self {
        self.map(|a| a * rhs)
    }
}

impl<const D: usize, S: Float> Mul for VectorN<D, S> {
    type Output = S;

    #[inline]
    fn mul(self, rhs: Self) -> S {
        self.dot(rhs)
    }
}

impl<const D: usize, S: Float> Div<S> for VectorN<D, S> {
    type Output = Self;

    #[inline]
    fn div(self, rhs: S) -> Self {
        self.map(|a| a / rhs)
    }
}

impl<const D: usize, S: Float> AddAssign for VectorN<D, S> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.0.iter_mut().zip(rhs.0).for_each(|(a, b)| *a += b);
    }
}

impl<const D: usize, S: Float> SubAssign for VectorN<D, S> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.0.iter_mut().zip(rhs.0).for_each(|(a, b)| *a -= b);
    }
}

impl<const D: usize, S: Float> MulAssign<S> for VectorN<D, S> {
    #[inline]
    fn mul_assign(&mut self, rhs: S) {
        self.0.iter_mut().for_each(|a| *a *= rhs);
    }
}

impl<const D: usize, S: Float> DivAssign<S> for VectorN<D, S> {
    #[inline]
    fn div_assign(&mut self, rhs: S) {
        self.0.iter_mut().for_each(|a| *a /= rhs);
    }
}

impl<const D: usize, S: Float> Sum for VectorN<D, S> {
    #[inline]
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), Add::add)
    }
}

macro_rules! impl_scalar_mul {
    ($s: ty) => {
        impl<const D: usize> Mul<VectorN<D, $s>> for $s {
            type Output = VectorN<D, $s>;

            #[inline]
            fn mul(self, rhs: VectorN<D, $s>) -> VectorN<D, $s> {
                rhs * self
            }
        }
    };
}

impl_scalar_mul!(f32);
impl_scalar_mul!(f64);

impl<const D: usize, S: fmt::Display> fmt::Display for VectorN<D, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, c) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{c}")?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction() {
        assert_eq!(Vector3::<f64>::zero(), Vector3::new([0.0, 0.0, 0.0]));
        assert_eq!(Vector3::<f64>::default(), Vector3::zero());
        assert_eq!(Vector2::splat(2.5), Vector2::new([2.5, 2.5]));
        assert_eq!(VectorN::from([1.0, 2.0, 3.0, 4.0]).to_array(), [1.0, 2.0, 3.0, 4.0]);

        let slice = [1.0, 2.0, 3.0];
        assert_eq!(Vector3::try_from(&slice[..]), Ok(Vector3::new(slice)));
        assert_eq!(
            Vector3::<f64>::try_from(&slice[..2]),
            Err(ArityError {
                expected: 3,
                got: 2
            })
        );
        assert_eq!(
            VectorN::<2, f32>::try_from(&[1.0, 2.0, 3.0][..]).unwrap_err().to_string(),
            "expected 2 components, got 3"
        );
    }

    #[test]
    fn arithmetic() {
        let a = Vector3::new([1.0, 2.0, 3.0]);
        let b = Vector3::new([4.0, -5.0, 6.0]);

        assert_eq!(a + b, Vector3::new([5.0, -3.0, 9.0]));
        assert_eq!(a - b, Vector3::new([-3.0, 7.0, -3.0]));
        assert_eq!(-a, Vector3::new([-1.0, -2.0, -3.0]));
        assert_eq!(a * 2.0, Vector3::new([2.0, 4.0, 6.0]));
        assert_eq!(2.0 * a, a * 2.0);
        assert_eq!(b / 2.0, Vector3::new([2.0, -2.5, 3.0]));
        assert_eq!(a * b, 12.0);
        assert_eq!(a.dot(b), a * b);
        assert_eq!(a.mul_elements(b), Vector3::new([4.0, -10.0, 18.0]));
        assert_eq!([a, b, a].into_iter().sum::<Vector3>(), Vector3::new([6.0, -1.0, 12.0]));

        // Operands are left untouched.
        assert_eq!(a, Vector3::new([1.0, 2.0, 3.0]));
    }

    #[test]
    fn compound_assignment() {
        let mut v = Vector2::new([1.0_f32, 2.0]);
        let other = Vector2::new([0.5, 0.5]);

        v += other;
        assert_eq!(v, Vector2::new([1.5, 2.5]));
        v -= other;
        assert_eq!(v, Vector2::new([1.0, 2.0]));
        v *= 4.0;
        assert_eq!(v, Vector2::new([4.0, 8.0]));
        v /= 2.0;
        assert_eq!(v, Vector2::new([2.0, 4.0]));
        assert_eq!(other, Vector2::new([0.5, 0.5]));
    }

    #[test]
    fn indexing() {
        let mut v = Vector3::new([1.0, 2.0, 3.0]);
        v[1] = 7.0;
        assert_eq!(v[0], 1.0);
        assert_eq!(v[1], 7.0);
        assert_eq!(v.iter().copied().collect::<Vec<_>>(), [1.0, 7.0, 3.0]);
    }

    #[test]
    #[should_panic]
    fn index_out_of_range() {
        let v = Vector3::new([1.0, 2.0, 3.0]);
        let _ = v[3];
    }

    #[test]
    fn magnitude_and_unit() {
        let v = Vector3::new([3.0, 0.0, 4.0]);
        assert_eq!(v.norm_squared(), 25.0);
        assert_eq!(v.norm(), 5.0);
        assert_eq!(v.unit(), Vector3::new([0.6, 0.0, 0.8]));
        assert_eq!(v.try_unit(), Some(v.unit()));

        assert_eq!(Vector3::<f64>::zero().try_unit(), None);
        assert_eq!(Vector3::new([f64::NAN, 0.0, 0.0]).try_unit(), None);
    }

    #[test]
    #[should_panic(expected = "cannot compute the unit vector")]
    fn unit_of_zero_vector() {
        let _ = Vector3::<f64>::zero().unit();
    }

    #[test]
    fn distances() {
        let a = Vector3::new([1.0, 1.0, 1.0]);
        let b = Vector3::new([2.0, 3.0, 3.0]);
        assert_eq!(Vector3::distance_squared(a, b), 9.0);
        assert_eq!(Vector3::distance(a, b), 3.0);
        assert_eq!(a.distance_squared(a), 0.0);
    }

    #[test]
    fn cross_products() {
        let x = Vector3::new([1.0, 0.0, 0.0]);
        let y = Vector3::new([0.0, 1.0, 0.0]);
        let z = Vector3::new([0.0, 0.0, 1.0]);
        assert_eq!(x.cross(y), z);
        assert_eq!(y.cross(x), -z);
        assert_eq!(y.cross(z), x);
        assert_eq!(x.cross(x), Vector3::zero());

        let a = Vector2::new([1.0, 2.0]);
        let b = Vector2::new([2.0, 1.0]);
        assert_eq!(a.cross(b), -3.0);
        assert_eq!(b.cross(a), 3.0);
    }

    #[test]
    fn display() {
        assert_eq!(Vector3::new([1.0, -2.5, 0.0]).to_string(), "(1, -2.5, 0)");
    }
}
