use std::fmt::{Debug, Display};

use num_traits::{Num, NumCast, ToPrimitive};

/// A trait for types that can be used for indexed coordinates.
///
/// This trait is sealed and cannot be implemented for external types. Distances are always
/// accumulated in `f64` through [`ToPrimitive`], whatever the coordinate type.
pub trait IndexableNum:
    private::Sealed
    + Num
    + NumCast
    + ToPrimitive
    + PartialOrd
    + Copy
    + Debug
    + Display
    + Send
    + Sync
{
    /// Convert to `f64` for distance computations.
    #[inline]
    fn as_f64(self) -> f64 {
        // All sealed implementors are primitive numbers, which always convert to f64.
        self.to_f64().unwrap_or(f64::NAN)
    }

    /// Returns `true` if this value is not comparable with itself (a floating point NaN).
    #[inline]
    fn is_unordered(self) -> bool {
        self.partial_cmp(&self).is_none()
    }
}

impl IndexableNum for i8 {}
impl IndexableNum for u8 {}
impl IndexableNum for i16 {}
impl IndexableNum for u16 {}
impl IndexableNum for i32 {}
impl IndexableNum for u32 {}
impl IndexableNum for f32 {}
impl IndexableNum for f64 {}

/// Squared Euclidean distance between two coordinate slices of equal length.
#[inline]
pub(crate) fn sq_dist<N: IndexableNum>(a: &[N], b: &[N]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(&a, &b)| {
            let d = a.as_f64() - b.as_f64();
            d * d
        })
        .sum()
}

// https://rust-lang.github.io/api-guidelines/future-proofing.html#sealed-traits-protect-against-downstream-implementations-c-sealed
mod private {
    pub trait Sealed {}

    impl Sealed for i8 {}
    impl Sealed for u8 {}
    impl Sealed for i16 {}
    impl Sealed for u16 {}
    impl Sealed for i32 {}
    impl Sealed for u32 {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
}
