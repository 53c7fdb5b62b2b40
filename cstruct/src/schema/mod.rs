//! Schema traits.
//!
//! # Example
//!
//! ```
//! # use cstruct::{record, Schema, Packed, Int, BigEndian, Text};
//! #[derive(Debug, PartialEq, Eq)]
//! struct Header {
//!     magic: u16,
//!     length: u32,
//!     tag: String,
//! }
//!
//! record! {
//!     Header {
//!         magic: u16,
//!         length: Int<u32, 3, BigEndian>,
//!         tag: Text<4>,
//!     }
//! }
//!
//! assert_eq!(Header::SIZE, 2 + 3 + 4);
//!
//! let header = Header { magic: 0xcafe, length: 0x010203, tag: "ABCD".into() };
//! let bytes = header.to_bytes().unwrap();
//! assert_eq!(bytes, [0xfe, 0xca, 0x01, 0x02, 0x03, b'A', b'B', b'C', b'D']);
//! assert_eq!(Header::from_bytes(&bytes).unwrap(), header);
//! ```
use {
    crate::error::{buffer_too_small, misaligned_buffer, size_mismatch, Result},
    alloc::{vec, vec::Vec},
    core::{iter::FusedIterator, marker::PhantomData},
};

mod array;
mod int;
pub(crate) mod record;
mod text;

pub use {
    array::Array,
    int::{Int, Integer, I16Be, I32Be, I64Be, U16Be, U24Be, U32Be, U64Be},
    record::{FieldInfo, Record, RecordView},
    text::{Ascii, Encoding, Latin1, Text, Utf8},
};
#[cfg(feature = "std")]
pub(crate) use {
    int::{check_signed, check_unsigned},
    record::validate_field_name,
    text::write_padded,
};

/// Types with a fixed byte layout that can be packed into and unpacked from a byte buffer.
///
/// Implementors only provide [`SIZE`](Schema::SIZE), [`pack_into`](Schema::pack_into)
/// and [`unpack_from`](Schema::unpack_from); every other operation is derived from those.
///
/// `pack_into` and `unpack_from` must only touch `buffer[offset..offset + SIZE]`,
/// and must fail with [`Error::BufferTooSmall`](crate::Error::BufferTooSmall) when
/// that range does not fit in `buffer`.
pub trait Schema {
    /// Runtime representation of a packed value.
    type Value;
    /// Exact number of bytes occupied by a packed value.
    const SIZE: usize;

    /// Write `value` into `buffer[offset..offset + SIZE]`.
    fn pack_into(buffer: &mut [u8], offset: usize, value: &Self::Value) -> Result<()>;

    /// Read a value from `buffer[offset..offset + SIZE]`.
    fn unpack_from(buffer: &[u8], offset: usize) -> Result<Self::Value>;

    /// Pack `value` into a new zero-filled buffer of exactly `SIZE` bytes.
    #[inline]
    fn pack(value: &Self::Value) -> Result<Vec<u8>> {
        let mut buffer = vec![0; Self::SIZE];
        Self::pack_into(&mut buffer, 0, value)?;
        Ok(buffer)
    }

    /// Unpack a value from a buffer of exactly `SIZE` bytes.
    #[inline]
    fn unpack(buffer: &[u8]) -> Result<Self::Value> {
        check_len(buffer, Self::SIZE)?;
        Self::unpack_from(buffer, 0)
    }

    /// Lazily unpack one value per consecutive `SIZE`-byte chunk of `buffer`.
    ///
    /// The buffer length must be a multiple of `SIZE`.
    #[inline]
    fn iter_unpack(buffer: &[u8]) -> Result<IterUnpack<'_, PhantomData<Self>>>
    where
        Self: Sized,
    {
        IterUnpack::new(buffer, PhantomData)
    }
}

/// Byte conversions for types that are their own [`Schema`], like records.
///
/// ```
/// # use cstruct::{record, Packed};
/// #[derive(Debug, PartialEq)]
/// struct Point {
///     x: i8,
///     y: i8,
/// }
///
/// record! { Point { x: i8, y: i8 } }
///
/// let point = Point::from_bytes(&[0x0f, 0x20]).unwrap();
/// assert_eq!(point, Point { x: 15, y: 32 });
/// assert_eq!(point.to_bytes().unwrap(), [0x0f, 0x20]);
/// ```
pub trait Packed: Sized {
    /// Unpack `Self` from a buffer of exactly its packed size.
    fn from_bytes(buffer: &[u8]) -> Result<Self>;
    /// Pack `self` into a new buffer.
    fn to_bytes(&self) -> Result<Vec<u8>>;
}

impl<T> Packed for T
where
    T: Schema<Value = T>,
{
    #[inline]
    fn from_bytes(buffer: &[u8]) -> Result<Self> {
        T::unpack(buffer)
    }

    #[inline]
    fn to_bytes(&self) -> Result<Vec<u8>> {
        T::pack(self)
    }
}

/// Fixed-size decoding step driving [`IterUnpack`].
///
/// Implemented for `PhantomData<S>` of every [`Schema`] and for dynamic layouts.
pub trait Decoder {
    type Value;
    /// Width of one decoded chunk.
    fn size(&self) -> usize;
    /// Decode one value at `offset`.
    fn decode(&self, buffer: &[u8], offset: usize) -> Result<Self::Value>;
}

impl<S: Schema> Decoder for PhantomData<S> {
    type Value = S::Value;

    #[inline(always)]
    fn size(&self) -> usize {
        S::SIZE
    }

    #[inline(always)]
    fn decode(&self, buffer: &[u8], offset: usize) -> Result<Self::Value> {
        S::unpack_from(buffer, offset)
    }
}

/// Lazy iterator over consecutive fixed-size values in a buffer.
///
/// Cloning the iterator restarts decoding from the clone's position without
/// touching the original.
#[derive(Clone)]
pub struct IterUnpack<'a, D> {
    buffer: &'a [u8],
    offset: usize,
    decoder: D,
}

impl<'a, D: Decoder> IterUnpack<'a, D> {
    pub(crate) fn new(buffer: &'a [u8], decoder: D) -> Result<Self> {
        let size = decoder.size();
        let aligned = match size {
            0 => buffer.is_empty(),
            size => buffer.len() % size == 0,
        };
        if !aligned {
            return Err(misaligned_buffer(buffer.len(), size));
        }
        Ok(Self {
            buffer,
            offset: 0,
            decoder,
        })
    }

    fn remaining(&self) -> usize {
        match self.decoder.size() {
            0 => 0,
            size => (self.buffer.len() - self.offset) / size,
        }
    }
}

impl<D: Decoder> Iterator for IterUnpack<'_, D> {
    type Item = Result<D::Value>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining() == 0 {
            return None;
        }
        let value = self.decoder.decode(self.buffer, self.offset);
        self.offset += self.decoder.size();
        Some(value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl<D: Decoder> ExactSizeIterator for IterUnpack<'_, D> {}

impl<D: Decoder> FusedIterator for IterUnpack<'_, D> {}

/// Check that `size` bytes starting at `offset` fit in a buffer of length `len`.
#[inline]
pub fn check_range(len: usize, offset: usize, size: usize) -> Result<()> {
    match offset.checked_add(size) {
        Some(end) if end <= len => Ok(()),
        _ => Err(buffer_too_small(offset, size, len)),
    }
}

#[inline]
pub(crate) fn check_len(buffer: &[u8], size: usize) -> Result<()> {
    if buffer.len() != size {
        return Err(size_mismatch(size, buffer.len()));
    }
    Ok(())
}

/// Borrow `buffer[offset..offset + size]`.
#[inline]
pub(crate) fn window(buffer: &[u8], offset: usize, size: usize) -> Result<&[u8]> {
    check_range(buffer.len(), offset, size)?;
    Ok(&buffer[offset..offset + size])
}

/// Mutably borrow `buffer[offset..offset + size]`.
#[inline]
pub(crate) fn window_mut(buffer: &mut [u8], offset: usize, size: usize) -> Result<&mut [u8]> {
    check_range(buffer.len(), offset, size)?;
    Ok(&mut buffer[offset..offset + size])
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use {
        crate::{
            record, Array, BigEndian, Error, Int, LittleEndian, Packed, Record, Schema, Text,
        },
        alloc::{string::String, vec, vec::Vec},
        proptest::prelude::*,
    };

    #[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
    struct Point {
        x: i8,
        y: i8,
    }

    record! {
        Point {
            x: i8,
            y: i8,
        }
    }

    #[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
    struct Line {
        p1: Point,
        p2: Point,
    }

    record! {
        Line {
            p1: Point,
            p2: Point,
        }
    }

    type Triangle = [Point; 3];

    #[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
    struct Mixed {
        tag: u8,
        value: u32,
        wide: i64,
        points: [Point; 2],
    }

    record! {
        Mixed {
            tag: u8,
            value: u32,
            wide: i64,
            points: Array<Point, 2>,
        }
    }

    fn strat_point() -> impl Strategy<Value = Point> {
        (any::<i8>(), any::<i8>()).prop_map(|(x, y)| Point { x, y })
    }

    fn strat_mixed() -> impl Strategy<Value = Mixed> {
        (
            any::<u8>(),
            any::<u32>(),
            any::<i64>(),
            strat_point(),
            strat_point(),
        )
            .prop_map(|(tag, value, wide, a, b)| Mixed {
                tag,
                value,
                wide,
                points: [a, b],
            })
    }

    #[test]
    fn two_signed_bytes() {
        let point = Point::unpack(&[0x0f, 0x20]).unwrap();
        assert_eq!(point, Point { x: 15, y: 32 });
        assert_eq!(Point::pack(&point).unwrap(), [0x0f, 0x20]);
    }

    #[test]
    fn triangle_of_points() {
        let bytes = [0x00, 0x00, 0x00, 0x02, 0x03, 0x00];
        let triangle = Triangle::unpack(&bytes).unwrap();
        assert_eq!(
            triangle,
            [
                Point { x: 0, y: 0 },
                Point { x: 0, y: 2 },
                Point { x: 3, y: 0 }
            ]
        );
        assert_eq!(Triangle::pack(&triangle).unwrap(), bytes);
    }

    #[test]
    fn nested_line() {
        let bytes = [0x00, 0x00, 0x10, 0x09];
        let line = Line::from_bytes(&bytes).unwrap();
        assert_eq!(line.p2, Point { x: 16, y: 9 });
        assert_eq!(line.to_bytes().unwrap(), bytes);

        let line = Line::from_bytes(&[0x00, 0x00, 0xff, 0xff]).unwrap();
        assert_eq!(line.p2, Point { x: -1, y: -1 });
    }

    #[test]
    fn size_is_additive() {
        assert_eq!(Point::SIZE, 2);
        assert_eq!(Line::SIZE, 2 * Point::SIZE);
        assert_eq!(Triangle::SIZE, 3 * Point::SIZE);
        assert_eq!(Mixed::SIZE, 1 + 4 + 8 + 2 * Point::SIZE);
        assert_eq!(
            Mixed::SIZE,
            Mixed::FIELDS.iter().map(|field| field.size).sum::<usize>()
        );
    }

    #[test]
    fn declaration_order_is_layout_order() {
        #[derive(Debug, PartialEq)]
        struct Ordered {
            narrow: u8,
            wide: u32,
        }

        record! {
            Ordered {
                narrow: u8,
                wide: Int<u32, 3, BigEndian>,
            }
        }

        let value = Ordered {
            narrow: 0xaa,
            wide: 0x010203,
        };
        assert_eq!(value.to_bytes().unwrap(), [0xaa, 0x01, 0x02, 0x03]);
        assert_eq!(Ordered::NARROW_OFFSET, 0);
        assert_eq!(Ordered::WIDE_OFFSET, 1);
        assert_eq!(
            Ordered::field_names().collect::<Vec<_>>(),
            ["narrow", "wide"]
        );
    }

    #[test]
    fn unpack_requires_exact_size() {
        assert_eq!(
            Line::unpack(&[0; 3]),
            Err(Error::SizeMismatch {
                expected: 4,
                actual: 3
            })
        );
        assert!(matches!(
            Line::unpack(&[0; 5]),
            Err(Error::SizeMismatch { .. })
        ));
    }

    #[test]
    fn pack_into_checks_bounds() {
        let line = Line {
            p1: Point { x: 1, y: 2 },
            p2: Point { x: 3, y: 4 },
        };
        let mut buffer = vec![0; Line::SIZE];
        assert_eq!(
            Line::pack_into(&mut buffer, 1, &line),
            Err(Error::BufferTooSmall {
                offset: 1,
                size: 4,
                len: 4
            })
        );
        // Nothing was written on the up-front failure.
        assert_eq!(buffer, [0; 4]);
        assert!(matches!(
            Line::pack_into(&mut buffer, usize::MAX, &line),
            Err(Error::BufferTooSmall { .. })
        ));
        assert!(matches!(
            Line::unpack_from(&buffer, 1),
            Err(Error::BufferTooSmall { .. })
        ));
    }

    #[test]
    fn pack_into_touches_only_its_window() {
        let mut buffer = vec![0xee; 6];
        Point::pack_into(&mut buffer, 2, &Point { x: 1, y: 2 }).unwrap();
        assert_eq!(buffer, [0xee, 0xee, 0x01, 0x02, 0xee, 0xee]);
        assert_eq!(
            Point::unpack_from(&buffer, 2).unwrap(),
            Point { x: 1, y: 2 }
        );
    }

    #[test]
    fn iter_unpack_yields_in_order() {
        let bytes = [1, 2, 3, 4, 5, 6];
        let points = Point::iter_unpack(&bytes)
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(
            points,
            [
                Point { x: 1, y: 2 },
                Point { x: 3, y: 4 },
                Point { x: 5, y: 6 }
            ]
        );
    }

    #[test]
    fn iter_unpack_is_lazy_and_restartable() {
        let bytes = [1, 2, 3, 4, 5, 6];
        let mut iter = Point::iter_unpack(&bytes).unwrap();
        assert_eq!(iter.len(), 3);
        assert_eq!(iter.next(), Some(Ok(Point { x: 1, y: 2 })));
        let restarted = iter.clone();
        assert_eq!(iter.count(), 2);
        assert_eq!(restarted.count(), 2);

        let again = Point::iter_unpack(&bytes).unwrap();
        assert_eq!(again.count(), 3);
    }

    #[test]
    fn iter_unpack_rejects_misaligned() {
        assert!(matches!(
            Point::iter_unpack(&[0; 3]),
            Err(Error::MisalignedBuffer { len: 3, size: 2 })
        ));
        assert_eq!(Point::iter_unpack(&[]).unwrap().count(), 0);
    }

    #[test]
    fn iter_unpack_zero_sized() {
        type Empty = [u8; 0];
        assert_eq!(Empty::iter_unpack(&[]).unwrap().count(), 0);
        assert!(matches!(
            Empty::iter_unpack(&[0]),
            Err(Error::MisalignedBuffer { len: 1, size: 0 })
        ));
    }

    #[test]
    fn text_field_in_record() {
        #[derive(Debug, PartialEq)]
        struct Named {
            id: u16,
            name: String,
        }

        record! {
            Named {
                id: Int<u16, 2, LittleEndian>,
                name: Text<5>,
            }
        }

        let named = Named {
            id: 7,
            name: "abc".into(),
        };
        let bytes = named.to_bytes().unwrap();
        assert_eq!(bytes, [7, 0, b'a', b'b', b'c', 0, 0]);
        let decoded = Named::from_bytes(&bytes).unwrap();
        assert_eq!(decoded.name, "abc\0\0");
        // Decoded padding survives another round.
        assert_eq!(decoded.to_bytes().unwrap(), bytes);
    }

    proptest! {
        #[test]
        fn test_matches_bincode(mixed in strat_mixed()) {
            let bincode_serialized = bincode::serialize(&mixed).unwrap();
            let schema_serialized = mixed.to_bytes().unwrap();
            prop_assert_eq!(&bincode_serialized, &schema_serialized);

            let bincode_deserialized: Mixed = bincode::deserialize(&bincode_serialized).unwrap();
            let schema_deserialized = Mixed::from_bytes(&schema_serialized).unwrap();
            prop_assert_eq!(&mixed, &bincode_deserialized);
            prop_assert_eq!(&mixed, &schema_deserialized);
        }

        #[test]
        fn test_bytes_round_trip(bytes in any::<[u8; 6]>()) {
            let triangle = Triangle::unpack(&bytes).unwrap();
            prop_assert_eq!(Triangle::pack(&triangle).unwrap(), bytes);
        }

        #[test]
        fn test_iter_unpack_matches_chunks(points in proptest::collection::vec(strat_point(), 0..=32)) {
            let mut buffer = vec![0; points.len() * Point::SIZE];
            for (i, point) in points.iter().enumerate() {
                Point::pack_into(&mut buffer, i * Point::SIZE, point).unwrap();
            }
            let decoded = Point::iter_unpack(&buffer)
                .unwrap()
                .collect::<Result<Vec<_>, _>>()
                .unwrap();
            prop_assert_eq!(points, decoded);
        }
    }
}
