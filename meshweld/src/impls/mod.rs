#[allow(unused_macros)]
macro_rules! impl_from_fields {
    ($vector: ty, [$scalar: ty; $dim: literal], $($f: ident),+) => {
        impl From<$vector> for $crate::vector::VectorN<$dim, $scalar> {
            #[inline]
            fn from(v: $vector) -> Self {
                Self::new([$(v.$f),+])
            }
        }

        impl From<$crate::vector::VectorN<$dim, $scalar>> for $vector {
            #[inline]
            fn from(v: $crate::vector::VectorN<$dim, $scalar>) -> Self {
                let [$($f),+] = v.to_array();
                Self::new($($f),+)
            }
        }
    };
}

#[allow(unused_imports)]
pub(crate) use impl_from_fields;

#[cfg(feature = "glam")]
mod glam;
#[cfg(feature = "nalgebra")]
mod nalgebra;
#[cfg(feature = "ultraviolet")]
mod ultraviolet;
