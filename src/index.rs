use std::fmt::Debug;

use num_traits::{PrimInt, Unsigned};

mod private {
    pub trait Sealed {}

    impl Sealed for u16 {}
    impl Sealed for u32 {}
    impl Sealed for u64 {}
    impl Sealed for usize {}
}

/// Unsigned integer type used for both symbols and offsets.
///
/// This is a sealed trait implemented for `u16`, `u32`, `u64` and `usize`.
pub trait Index: PrimInt + Unsigned + Debug + Send + Sync + private::Sealed {
    /// Converts with `as`, truncating silently; check [`Index::can_hold`] first.
    ///
    /// Inside this crate, [`Width::for_bound`] and the builders' precondition checks
    /// guarantee that every converted value fits.
    fn from_usize(v: usize) -> Self;

    fn as_usize(self) -> usize;

    /// Checks if `value` is representable.
    fn can_hold(value: usize) -> bool {
        value <= Self::max_value().as_usize()
    }
}

macro_rules! impl_index {
    ($uint:ty) => {
        impl Index for $uint {
            #[inline]
            fn from_usize(v: usize) -> Self {
                v as $uint
            }

            #[inline]
            fn as_usize(self) -> usize {
                self as usize
            }
        }
    };
}

impl_index!(u16);
impl_index!(u32);
impl_index!(u64);
impl_index!(usize);

/// Checks the preconditions shared by the suffix array builders.
pub(crate) fn assert_text<T: Index>(text: &[T], max_elem: T) {
    assert!(!text.is_empty(), "text must not be empty.");
    assert!(
        max_elem < T::max_value(),
        "max_elem {:?} leaves no room for the padding symbol",
        max_elem
    );
    assert!(
        T::can_hold(text.len()),
        "text length {} overflows the index type",
        text.len()
    );
    if let Some(c) = text.iter().find(|&&c| c > max_elem) {
        panic!("symbol {:?} exceeds max_elem {:?}", c, max_elem);
    }
}

/// Integer width used to run the construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Width {
    U16,
    U32,
    U64,
}

impl Width {
    /// Picks the narrowest width whose maximum is strictly greater than `bound`.
    ///
    /// `bound` should be `max(n + 1, max_elem + 1)`, reserving one value for the padding symbol.
    pub fn for_bound(bound: usize) -> Self {
        if bound < u16::MAX as usize {
            Width::U16
        } else if (bound as u64) < u32::MAX as u64 {
            Width::U32
        } else {
            Width::U64
        }
    }
}
