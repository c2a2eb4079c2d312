use crate::{scalar::Float, vector::VectorN};

/// Side of a splitting hyperplane.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// Coordinates lower than or equal to the split.
    Left,
    /// Coordinates strictly greater than the split.
    Right,
}

impl Side {
    /// Returns the side of `split` that `value` falls on. Ties go left.
    ///
    /// A `NaN` value never compares lower than or equal, so it goes right.
    #[inline]
    pub fn of<S: PartialOrd>(value: S, split: S) -> Self {
        if value <= split {
            Self::Left
        } else {
            Self::Right
        }
    }

    /// Returns the side of the hyperplane through `split` perpendicular to `axis` that `point`
    /// falls on.
    #[inline]
    pub fn of_point<const D: usize, S: Float>(
        point: &VectorN<D, S>,
        split: &VectorN<D, S>,
        axis: usize,
    ) -> Self {
        Self::of(point[axis], split[axis])
    }
}

/// Returns the axis the children of a node splitting on `axis` split on.
#[inline]
pub const fn next_axis<const D: usize>(axis: usize) -> usize {
    (axis + 1) % D
}

/// Returns the squared distance from `point` to the hyperplane through `split` perpendicular to
/// `axis`.
#[inline]
pub fn plane_distance_squared<const D: usize, S: Float>(
    point: &VectorN<D, S>,
    split: &VectorN<D, S>,
    axis: usize,
) -> S {
    let d = split[axis] - point[axis];
    d * d
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::Vector3;

    #[test]
    fn ties_go_left() {
        assert_eq!(Side::of(1.0, 1.0), Side::Left);
        assert_eq!(Side::of(0.5, 1.0), Side::Left);
        assert_eq!(Side::of(1.5, 1.0), Side::Right);
        assert_eq!(Side::of(f64::NAN, 1.0), Side::Right);
    }

    #[test]
    fn axes_cycle() {
        assert_eq!(next_axis::<3>(0), 1);
        assert_eq!(next_axis::<3>(1), 2);
        assert_eq!(next_axis::<3>(2), 0);
        assert_eq!(next_axis::<1>(0), 0);
    }

    #[test]
    fn hyperplanes() {
        let split = Vector3::new([1.0, 2.0, 3.0]);
        let point = Vector3::new([4.0, 2.0, 0.0]);

        assert_eq!(Side::of_point(&point, &split, 0), Side::Right);
        assert_eq!(Side::of_point(&point, &split, 1), Side::Left);
        assert_eq!(Side::of_point(&point, &split, 2), Side::Left);
        assert_eq!(plane_distance_squared(&point, &split, 0), 9.0);
        assert_eq!(plane_distance_squared(&point, &split, 1), 0.0);
    }
}
