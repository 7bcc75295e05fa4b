use std::fmt::{Debug, Display};

use num_traits::{PrimInt, SaturatingAdd, SaturatingSub, Unsigned};

/// A trait for unsigned integer types that can be used as distance values.
///
/// Distance values key the per-node child maps, so they must be plain
/// unsigned integers with a total order. This trait is sealed and cannot be
/// implemented for external types.
pub trait DistanceNum:
    private::Sealed
    + PrimInt
    + Unsigned
    + SaturatingAdd
    + SaturatingSub
    + Display
    + Debug
    + Send
    + Sync
{
}

impl DistanceNum for u8 {}

impl DistanceNum for u16 {}

impl DistanceNum for u32 {}

impl DistanceNum for u64 {}

impl DistanceNum for usize {}

// https://rust-lang.github.io/api-guidelines/future-proofing.html#sealed-traits-protect-against-downstream-implementations-c-sealed
mod private {
    pub trait Sealed {}

    impl Sealed for u8 {}
    impl Sealed for u16 {}
    impl Sealed for u32 {}
    impl Sealed for u64 {}
    impl Sealed for usize {}
}
