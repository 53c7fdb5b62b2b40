//! Fixed-count homogeneous arrays.
//!
//! Any `[S; N]` where `S` is a [`Schema`] is itself a schema: `N` elements
//! laid out back to back, with no padding between them.
//!
//! ```
//! # use cstruct::{record, Array, Schema};
//! #[derive(Debug, PartialEq)]
//! struct Point {
//!     x: i8,
//!     y: i8,
//! }
//!
//! record! { Point { x: i8, y: i8 } }
//!
//! type Triangle = Array<Point, 3>;
//!
//! let triangle = Triangle::unpack(&[0, 0, 0, 2, 3, 0]).unwrap();
//! assert_eq!(triangle.len(), 3);
//! assert_eq!(triangle[2], Point { x: 3, y: 0 });
//! ```
use {
    super::{check_range, Schema},
    crate::error::Result,
    core::{mem::MaybeUninit, ptr},
};

/// `N` consecutive `S` values. Equivalent to `[S; N]`.
pub type Array<S, const N: usize> = [S; N];

impl<S, const N: usize> Schema for [S; N]
where
    S: Schema,
{
    type Value = [S::Value; N];
    const SIZE: usize = S::SIZE * N;

    #[inline]
    fn pack_into(buffer: &mut [u8], offset: usize, value: &Self::Value) -> Result<()> {
        check_range(buffer.len(), offset, Self::SIZE)?;
        for (i, item) in value.iter().enumerate() {
            S::pack_into(buffer, offset + i * S::SIZE, item)?;
        }
        Ok(())
    }

    #[inline]
    fn unpack_from(buffer: &[u8], offset: usize) -> Result<Self::Value> {
        check_range(buffer.len(), offset, Self::SIZE)?;
        let mut dst = MaybeUninit::<Self::Value>::uninit();
        // SAFETY: MaybeUninit<[T; N]> has the same layout as [MaybeUninit<T>; N].
        let slots = unsafe { &mut *dst.as_mut_ptr().cast::<[MaybeUninit<S::Value>; N]>() };

        for i in 0..N {
            match S::unpack_from(buffer, offset + i * S::SIZE) {
                Ok(item) => {
                    slots[i].write(item);
                }
                Err(e) => {
                    // SAFETY: the first `i` slots were initialized by the iterations above.
                    unsafe {
                        ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                            slots.as_mut_ptr().cast::<S::Value>(),
                            i,
                        ));
                    }
                    return Err(e);
                }
            }
        }
        // SAFETY: every slot was initialized by the loop above.
        Ok(unsafe { dst.assume_init() })
    }
}
