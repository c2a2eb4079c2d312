use std::{
    fmt::Debug,
    iter::Sum,
    ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};

/// Trait for operations on floating-point numbers.
pub trait FloatOps:
    Sized
    + Neg<Output = Self>
    + Add<Output = Self>
    + AddAssign
    + Sub<Output = Self>
    + SubAssign
    + Mul<Output = Self>
    + MulAssign
    + Div<Output = Self>
    + DivAssign
    + Sum
{
}
impl<F> FloatOps for F where
    F: Sized
        + Neg<Output = Self>
        + Add<Output = Self>
        + AddAssign
        + Sub<Output = Self>
        + SubAssign
        + Mul<Output = Self>
        + MulAssign
        + Div<Output = Self>
        + DivAssign
        + Sum
{
}

/// Trait for the real numbers used as coordinates of a [`VectorN`](crate::vector::VectorN).
pub trait Float: FloatOps + PartialOrd + Copy + Debug + Default {
    /// `zero` value of the type.
    const ZERO: Self;

    /// Returns the square root of a float.
    fn sqrt(self) -> Self;

    /// Returns `true` if the float is neither infinite nor NaN.
    fn is_finite(self) -> bool;
}

macro_rules! impl_floats {
    ($s: ty) => {
        impl Float for $s {
            const ZERO: Self = 0.0;

            #[inline]
            fn sqrt(self) -> Self {
                self.sqrt()
            }

            #[inline]
            fn is_finite(self) -> bool {
                self.is_finite()
            }
        }
    };
}

impl_floats!(f32);
impl_floats!(f64);

#[cfg(test)]
mod tests {
    use super::Float;

    fn hypot<S: Float>(a: S, b: S) -> S {
        (a * a + b * b).sqrt()
    }

    #[test]
    fn generic_math() {
        assert_eq!(hypot(3.0_f32, 4.0), 5.0);
        assert_eq!(hypot(3.0_f64, 4.0), 5.0);
        assert!(Float::is_finite(f32::ZERO));
        assert!(!Float::is_finite(f64::NAN));
    }
}
