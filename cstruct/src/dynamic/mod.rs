//! Layouts described at runtime.
//!
//! Where [`Schema`](crate::Schema) types fix a layout at compile time, a
//! [`Layout`] is a value: it can be assembled from a configuration file, a
//! protocol description, or user input. Values travel as the tagged union
//! [`Value`], and records as the ordered name to value map [`Record`].
//!
//! ```
//! use cstruct::dynamic::{array, integer, text, Endian, RecordLayout, Signedness, TextEncoding, Value};
//!
//! let point = RecordLayout::builder("Point")
//!     .field("x", integer(1, Endian::Little, Signedness::Signed)?)
//!     .field("y", integer(1, Endian::Little, Signedness::Signed)?)
//!     .build()?;
//! let triangle = array(point, 3)?;
//! assert_eq!(triangle.size(), 6);
//!
//! let value = triangle.unpack(&[0, 0, 0, 2, 3, 0])?;
//! let points = value.as_array().unwrap();
//! assert_eq!(points[2].as_record().unwrap()["x"], Value::Int(3));
//!
//! let name = text(4, TextEncoding::Ascii);
//! assert_eq!(name.pack(&"ab".into())?, b"ab\0\0");
//! # Ok::<(), cstruct::Error>(())
//! ```
use {
    crate::{
        error::{definition_error, length_mismatch, value_mismatch, value_out_of_range, Result},
        schema::{
            check_len, check_range, check_signed, check_unsigned, window, window_mut,
            write_padded, Decoder, IterUnpack,
        },
        Ascii, Encoding, Latin1, Utf8,
    },
    byteorder::{BigEndian, ByteOrder, LittleEndian},
    std::borrow::Cow,
};

mod record;
mod value;

pub use {
    record::{Field, RecordBuilder, RecordLayout},
    value::{Record, Value},
};

/// Widest supported integer field, in bytes.
pub const MAX_INTEGER_WIDTH: usize = 16;

/// Byte order of a dynamic integer field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Endian {
    #[default]
    Little,
    Big,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Signedness {
    Signed,
    #[default]
    Unsigned,
}

/// Encoding of a dynamic text field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TextEncoding {
    #[default]
    Utf8,
    Ascii,
    Latin1,
}

impl TextEncoding {
    pub fn name(self) -> &'static str {
        match self {
            TextEncoding::Utf8 => Utf8::NAME,
            TextEncoding::Ascii => Ascii::NAME,
            TextEncoding::Latin1 => Latin1::NAME,
        }
    }

    fn encode(self, text: &str) -> Result<Cow<'_, [u8]>> {
        match self {
            TextEncoding::Utf8 => Utf8::encode(text),
            TextEncoding::Ascii => Ascii::encode(text),
            TextEncoding::Latin1 => Latin1::encode(text),
        }
    }

    fn decode(self, bytes: &[u8]) -> Result<String> {
        match self {
            TextEncoding::Utf8 => Utf8::decode(bytes),
            TextEncoding::Ascii => Ascii::decode(bytes),
            TextEncoding::Latin1 => Latin1::decode(bytes),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntLayout {
    width: usize,
    endian: Endian,
    signedness: Signedness,
}

impl IntLayout {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn endian(&self) -> Endian {
        self.endian
    }

    pub fn signedness(&self) -> Signedness {
        self.signedness
    }

    fn pack_into(&self, buffer: &mut [u8], offset: usize, value: &Value) -> Result<()> {
        let width = self.width;
        match self.signedness {
            Signedness::Signed => {
                let value = match *value {
                    Value::Int(v) => v,
                    Value::UInt(v) => {
                        i128::try_from(v).map_err(|_| value_out_of_range(width, true))?
                    }
                    ref other => return Err(value_mismatch("integer", other.kind())),
                };
                check_signed(value, width)?;
                let dst = window_mut(buffer, offset, width)?;
                match self.endian {
                    Endian::Little => LittleEndian::write_int128(dst, value, width),
                    Endian::Big => BigEndian::write_int128(dst, value, width),
                }
            }
            Signedness::Unsigned => {
                let value = match *value {
                    Value::UInt(v) => v,
                    Value::Int(v) => {
                        u128::try_from(v).map_err(|_| value_out_of_range(width, false))?
                    }
                    ref other => return Err(value_mismatch("integer", other.kind())),
                };
                check_unsigned(value, width)?;
                let dst = window_mut(buffer, offset, width)?;
                match self.endian {
                    Endian::Little => LittleEndian::write_uint128(dst, value, width),
                    Endian::Big => BigEndian::write_uint128(dst, value, width),
                }
            }
        }
        Ok(())
    }

    fn unpack_from(&self, buffer: &[u8], offset: usize) -> Result<Value> {
        let src = window(buffer, offset, self.width)?;
        Ok(match (self.signedness, self.endian) {
            (Signedness::Signed, Endian::Little) => {
                Value::Int(LittleEndian::read_int128(src, self.width))
            }
            (Signedness::Signed, Endian::Big) => Value::Int(BigEndian::read_int128(src, self.width)),
            (Signedness::Unsigned, Endian::Little) => {
                Value::UInt(LittleEndian::read_uint128(src, self.width))
            }
            (Signedness::Unsigned, Endian::Big) => {
                Value::UInt(BigEndian::read_uint128(src, self.width))
            }
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextLayout {
    width: usize,
    encoding: TextEncoding,
    pad: u8,
}

impl TextLayout {
    /// Fill unused bytes with `pad` instead of `0x00`.
    pub fn with_pad(self, pad: u8) -> Self {
        Self { pad, ..self }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    pub fn pad(&self) -> u8 {
        self.pad
    }

    /// Strip trailing pad characters from decoded text.
    pub fn trimmed<'a>(&self, text: &'a str) -> &'a str {
        text.trim_end_matches(char::from(self.pad))
    }

    fn pack_into(&self, buffer: &mut [u8], offset: usize, value: &Value) -> Result<()> {
        let text = value.expect_text()?;
        let dst = window_mut(buffer, offset, self.width)?;
        write_padded(dst, &self.encoding.encode(text)?, self.pad)
    }

    fn unpack_from(&self, buffer: &[u8], offset: usize) -> Result<Value> {
        self.encoding
            .decode(window(buffer, offset, self.width)?)
            .map(Value::Text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArrayLayout {
    element: Box<Layout>,
    count: usize,
    size: usize,
}

impl ArrayLayout {
    pub fn element(&self) -> &Layout {
        &self.element
    }

    pub fn count(&self) -> usize {
        self.count
    }

    fn pack_into(&self, buffer: &mut [u8], offset: usize, value: &Value) -> Result<()> {
        let items = value.expect_array()?;
        if items.len() != self.count {
            return Err(length_mismatch(self.count, items.len()));
        }
        check_range(buffer.len(), offset, self.size)?;
        let step = self.element.size();
        for (i, item) in items.iter().enumerate() {
            self.element.pack_into(buffer, offset + i * step, item)?;
        }
        Ok(())
    }

    fn unpack_from(&self, buffer: &[u8], offset: usize) -> Result<Value> {
        check_range(buffer.len(), offset, self.size)?;
        let step = self.element.size();
        (0..self.count)
            .map(|i| self.element.unpack_from(buffer, offset + i * step))
            .collect::<Result<Vec<_>>>()
            .map(Value::Array)
    }
}

/// A packable type described at runtime.
///
/// Layouts are immutable once built; every definition error is reported by
/// the factory or builder that produced them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Layout {
    Int(IntLayout),
    Text(TextLayout),
    Record(RecordLayout),
    Array(ArrayLayout),
}

impl Layout {
    /// Exact number of bytes occupied by a packed value.
    pub fn size(&self) -> usize {
        match self {
            Layout::Int(layout) => layout.width,
            Layout::Text(layout) => layout.width,
            Layout::Record(layout) => layout.size(),
            Layout::Array(layout) => layout.size,
        }
    }

    /// Write `value` into `buffer[offset..offset + size]`.
    pub fn pack_into(&self, buffer: &mut [u8], offset: usize, value: &Value) -> Result<()> {
        match self {
            Layout::Int(layout) => layout.pack_into(buffer, offset, value),
            Layout::Text(layout) => layout.pack_into(buffer, offset, value),
            Layout::Record(layout) => layout.pack_into(buffer, offset, value),
            Layout::Array(layout) => layout.pack_into(buffer, offset, value),
        }
    }

    /// Read a value from `buffer[offset..offset + size]`.
    pub fn unpack_from(&self, buffer: &[u8], offset: usize) -> Result<Value> {
        match self {
            Layout::Int(layout) => layout.unpack_from(buffer, offset),
            Layout::Text(layout) => layout.unpack_from(buffer, offset),
            Layout::Record(layout) => layout.unpack_from(buffer, offset),
            Layout::Array(layout) => layout.unpack_from(buffer, offset),
        }
    }

    /// Pack `value` into a new zero-filled buffer of exactly `size` bytes.
    pub fn pack(&self, value: &Value) -> Result<Vec<u8>> {
        let mut buffer = vec![0; self.size()];
        self.pack_into(&mut buffer, 0, value)?;
        Ok(buffer)
    }

    /// Unpack a value from a buffer of exactly `size` bytes.
    pub fn unpack(&self, buffer: &[u8]) -> Result<Value> {
        check_len(buffer, self.size())?;
        self.unpack_from(buffer, 0)
    }

    /// Lazily unpack one value per consecutive `size`-byte chunk of `buffer`.
    pub fn iter_unpack<'a, 'l>(&'l self, buffer: &'a [u8]) -> Result<IterUnpack<'a, &'l Layout>> {
        IterUnpack::new(buffer, self)
    }

    /// Alias of [`unpack`](Self::unpack).
    pub fn from_bytes(&self, buffer: &[u8]) -> Result<Value> {
        self.unpack(buffer)
    }

    /// Alias of [`pack`](Self::pack).
    pub fn to_bytes(&self, value: &Value) -> Result<Vec<u8>> {
        self.pack(value)
    }

    pub fn as_record(&self) -> Option<&RecordLayout> {
        match self {
            Layout::Record(layout) => Some(layout),
            _ => None,
        }
    }
}

impl Decoder for &Layout {
    type Value = Value;

    #[inline]
    fn size(&self) -> usize {
        Layout::size(self)
    }

    #[inline]
    fn decode(&self, buffer: &[u8], offset: usize) -> Result<Value> {
        self.unpack_from(buffer, offset)
    }
}

impl From<IntLayout> for Layout {
    fn from(layout: IntLayout) -> Self {
        Layout::Int(layout)
    }
}

impl From<TextLayout> for Layout {
    fn from(layout: TextLayout) -> Self {
        Layout::Text(layout)
    }
}

impl From<RecordLayout> for Layout {
    fn from(layout: RecordLayout) -> Self {
        Layout::Record(layout)
    }
}

impl From<ArrayLayout> for Layout {
    fn from(layout: ArrayLayout) -> Self {
        Layout::Array(layout)
    }
}

/// An integer of `width` bytes (1 to 16).
pub fn integer(width: usize, endian: Endian, signedness: Signedness) -> Result<Layout> {
    if !(1..=MAX_INTEGER_WIDTH).contains(&width) {
        return Err(definition_error(format!(
            "integer width must be between 1 and {MAX_INTEGER_WIDTH} bytes, got {width}"
        )));
    }
    Ok(Layout::Int(IntLayout {
        width,
        endian,
        signedness,
    }))
}

/// Text stored in exactly `width` bytes, padded with `0x00`.
///
/// Use [`TextLayout::with_pad`] through [`text_layout`] for another pad byte.
pub fn text(width: usize, encoding: TextEncoding) -> Layout {
    Layout::Text(text_layout(width, encoding))
}

/// Like [`text`], but returns the concrete layout so it can be configured further.
pub fn text_layout(width: usize, encoding: TextEncoding) -> TextLayout {
    TextLayout {
        width,
        encoding,
        pad: 0,
    }
}

/// `count` consecutive values of `element`.
///
/// A zero-sized element is only accepted with a count of zero, since the
/// element count could not otherwise be bounded by the buffer length.
pub fn array(element: impl Into<Layout>, count: usize) -> Result<Layout> {
    let element = element.into();
    if element.size() == 0 && count != 0 {
        return Err(definition_error(format!(
            "array of {count} zero-sized elements"
        )));
    }
    let size = element
        .size()
        .checked_mul(count)
        .ok_or_else(|| definition_error("array size overflows usize"))?;
    Ok(Layout::Array(ArrayLayout {
        element: Box::new(element),
        count,
        size,
    }))
}
