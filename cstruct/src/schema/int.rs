//! Scalar integers of arbitrary byte width and byte order.
//!
//! Native integers (`u8`, `i16`, ..., `i128`) are schemas of their native width
//! in little-endian order. [`Int`] covers everything else: any width from one
//! byte up to the width of its representation type, in either byte order.
//!
//! ```
//! # use cstruct::{Int, BigEndian, Schema};
//! type SmallInteger = Int<u32, 3, BigEndian>;
//!
//! let value = SmallInteger::unpack(&[0x01, 0x02, 0x03]).unwrap();
//! assert_eq!(value, 0x010203);
//! assert_eq!(value & 0x1, 1);
//! assert!(SmallInteger::pack(&0x0100_0000).is_err());
//! ```
use {
    super::{window, window_mut, Schema},
    crate::error::{value_out_of_range, Result},
    byteorder::{BigEndian, ByteOrder, LittleEndian},
    core::marker::PhantomData,
};

/// An integer occupying `N` bytes in byte order `O`, represented at runtime by `T`.
///
/// `T` fixes signedness: signed representations are packed as two's complement
/// and sign-extended on unpack. `N` must be between 1 and `size_of::<T>()`;
/// other widths fail to compile.
pub struct Int<T, const N: usize, O = LittleEndian>(PhantomData<(T, O)>);

pub type U16Be = Int<u16, 2, BigEndian>;
pub type U24Be = Int<u32, 3, BigEndian>;
pub type U32Be = Int<u32, 4, BigEndian>;
pub type U64Be = Int<u64, 8, BigEndian>;
pub type I16Be = Int<i16, 2, BigEndian>;
pub type I32Be = Int<i32, 4, BigEndian>;
pub type I64Be = Int<i64, 8, BigEndian>;

mod sealed {
    pub trait Sealed {}
}

/// Native integer types usable as the runtime representation of an [`Int`].
pub trait Integer: Copy + sealed::Sealed {
    const SIGNED: bool;
    const BYTES: usize;

    /// Encode into all of `dst` (1 to 16 bytes).
    fn encode<O: ByteOrder>(self, dst: &mut [u8]) -> Result<()>;

    /// Decode from all of `src` (1 to 16 bytes).
    fn decode<O: ByteOrder>(src: &[u8]) -> Self;
}

/// Check that `value` fits in `width` bytes as an unsigned integer.
#[inline]
pub(crate) fn check_unsigned(value: u128, width: usize) -> Result<()> {
    if width < 16 && value >> (width * 8) != 0 {
        return Err(value_out_of_range(width, false));
    }
    Ok(())
}

/// Check that `value` fits in `width` bytes as a two's complement integer.
#[inline]
pub(crate) fn check_signed(value: i128, width: usize) -> Result<()> {
    if width < 16 {
        let bits = width * 8;
        let min = -(1i128 << (bits - 1));
        let max = (1i128 << (bits - 1)) - 1;
        if value < min || value > max {
            return Err(value_out_of_range(width, true));
        }
    }
    Ok(())
}

macro_rules! impl_integer {
    (unsigned $($type:ty),*) => {$(
        impl sealed::Sealed for $type {}

        impl Integer for $type {
            const SIGNED: bool = false;
            const BYTES: usize = size_of::<$type>();

            #[inline]
            fn encode<O: ByteOrder>(self, dst: &mut [u8]) -> Result<()> {
                let value = self as u128;
                check_unsigned(value, dst.len())?;
                O::write_uint128(dst, value, dst.len());
                Ok(())
            }

            #[inline]
            fn decode<O: ByteOrder>(src: &[u8]) -> Self {
                // Widths never exceed the representation, so the cast is lossless.
                O::read_uint128(src, src.len()) as $type
            }
        }
    )*};

    (signed $($type:ty),*) => {$(
        impl sealed::Sealed for $type {}

        impl Integer for $type {
            const SIGNED: bool = true;
            const BYTES: usize = size_of::<$type>();

            #[inline]
            fn encode<O: ByteOrder>(self, dst: &mut [u8]) -> Result<()> {
                let value = self as i128;
                check_signed(value, dst.len())?;
                O::write_int128(dst, value, dst.len());
                Ok(())
            }

            #[inline]
            fn decode<O: ByteOrder>(src: &[u8]) -> Self {
                O::read_int128(src, src.len()) as $type
            }
        }
    )*};
}

impl_integer!(unsigned u8, u16, u32, u64, u128);
impl_integer!(signed i8, i16, i32, i64, i128);

impl<T, const N: usize, O> Schema for Int<T, N, O>
where
    T: Integer,
    O: ByteOrder,
{
    type Value = T;

    const SIZE: usize = {
        assert!(
            N >= 1 && N <= T::BYTES,
            "integer width must be between 1 and the size of its representation"
        );
        N
    };

    #[inline]
    fn pack_into(buffer: &mut [u8], offset: usize, value: &Self::Value) -> Result<()> {
        value.encode::<O>(window_mut(buffer, offset, Self::SIZE)?)
    }

    #[inline]
    fn unpack_from(buffer: &[u8], offset: usize) -> Result<Self::Value> {
        Ok(T::decode::<O>(window(buffer, offset, Self::SIZE)?))
    }
}

macro_rules! impl_native {
    ($($type:ty),*) => {$(
        impl Schema for $type {
            type Value = $type;
            const SIZE: usize = size_of::<$type>();

            #[inline(always)]
            fn pack_into(buffer: &mut [u8], offset: usize, value: &Self::Value) -> Result<()> {
                window_mut(buffer, offset, Self::SIZE)?.copy_from_slice(&value.to_le_bytes());
                Ok(())
            }

            #[inline(always)]
            fn unpack_from(buffer: &[u8], offset: usize) -> Result<Self::Value> {
                let mut bytes = [0; size_of::<$type>()];
                bytes.copy_from_slice(window(buffer, offset, Self::SIZE)?);
                Ok(<$type>::from_le_bytes(bytes))
            }
        }
    )*};
}

impl_native!(u8, i8, u16, i16, u32, i32, u64, i64, u128, i128);
