//! Fixed-width text fields.
use {
    super::{window, window_mut, Schema},
    crate::error::{invalid_encoding, value_too_large, Result},
    alloc::{
        borrow::Cow,
        string::{String, ToString},
        vec::Vec,
    },
    core::marker::PhantomData,
};

/// Text stored in exactly `N` bytes using encoding `E`.
///
/// Packing left-justifies the encoded bytes and fills the rest of the field
/// with `PAD`. Unpacking decodes all `N` bytes and does not strip padding,
/// so a packed-then-unpacked value packs back to the same bytes.
///
/// ```
/// # use cstruct::{Schema, Text, Ascii};
/// type Name = Text<5, Ascii>;
/// assert_eq!(Name::unpack(b"12345").unwrap(), "12345");
/// assert_eq!(Name::pack(&"ab".into()).unwrap(), b"ab\0\0\0");
/// assert_eq!(<Text<4, Ascii, b' '>>::pack(&"ab".into()).unwrap(), b"ab  ");
/// ```
pub struct Text<const N: usize, E = Utf8, const PAD: u8 = 0>(PhantomData<E>);

impl<const N: usize, E, const PAD: u8> Text<N, E, PAD> {
    /// Strip trailing pad characters from decoded text.
    pub fn trimmed(text: &str) -> &str {
        text.trim_end_matches(char::from(PAD))
    }
}

/// A byte encoding for text fields.
pub trait Encoding {
    const NAME: &'static str;

    fn encode(text: &str) -> Result<Cow<'_, [u8]>>;

    fn decode(bytes: &[u8]) -> Result<String>;
}

/// UTF-8.
pub struct Utf8;

/// 7-bit ASCII.
pub struct Ascii;

/// ISO-8859-1, every byte maps to the code point of the same value.
pub struct Latin1;

impl Encoding for Utf8 {
    const NAME: &'static str = "utf-8";

    #[inline]
    fn encode(text: &str) -> Result<Cow<'_, [u8]>> {
        Ok(Cow::Borrowed(text.as_bytes()))
    }

    #[inline]
    fn decode(bytes: &[u8]) -> Result<String> {
        core::str::from_utf8(bytes)
            .map(ToString::to_string)
            .map_err(|e| invalid_encoding(Self::NAME, e.valid_up_to()))
    }
}

impl Encoding for Ascii {
    const NAME: &'static str = "ascii";

    fn encode(text: &str) -> Result<Cow<'_, [u8]>> {
        match text.bytes().position(|b| !b.is_ascii()) {
            Some(position) => Err(invalid_encoding(Self::NAME, position)),
            None => Ok(Cow::Borrowed(text.as_bytes())),
        }
    }

    fn decode(bytes: &[u8]) -> Result<String> {
        match bytes.iter().position(|b| !b.is_ascii()) {
            Some(position) => Err(invalid_encoding(Self::NAME, position)),
            None => Ok(bytes.iter().copied().map(char::from).collect()),
        }
    }
}

impl Encoding for Latin1 {
    const NAME: &'static str = "latin-1";

    fn encode(text: &str) -> Result<Cow<'_, [u8]>> {
        if text.is_ascii() {
            return Ok(Cow::Borrowed(text.as_bytes()));
        }
        text.chars()
            .enumerate()
            .map(|(position, c)| u8::try_from(c).map_err(|_| invalid_encoding(Self::NAME, position)))
            .collect::<Result<Vec<_>>>()
            .map(Cow::Owned)
    }

    fn decode(bytes: &[u8]) -> Result<String> {
        Ok(bytes.iter().copied().map(char::from).collect())
    }
}

/// Copy `encoded` to the front of `dst` and fill the remainder with `pad`.
#[inline]
pub(crate) fn write_padded(dst: &mut [u8], encoded: &[u8], pad: u8) -> Result<()> {
    if encoded.len() > dst.len() {
        return Err(value_too_large(encoded.len(), dst.len()));
    }
    let (head, tail) = dst.split_at_mut(encoded.len());
    head.copy_from_slice(encoded);
    tail.fill(pad);
    Ok(())
}

impl<const N: usize, E, const PAD: u8> Schema for Text<N, E, PAD>
where
    E: Encoding,
{
    type Value = String;
    const SIZE: usize = N;

    #[inline]
    fn pack_into(buffer: &mut [u8], offset: usize, value: &Self::Value) -> Result<()> {
        let dst = window_mut(buffer, offset, Self::SIZE)?;
        write_padded(dst, &E::encode(value)?, PAD)
    }

    #[inline]
    fn unpack_from(buffer: &[u8], offset: usize) -> Result<Self::Value> {
        E::decode(window(buffer, offset, Self::SIZE)?)
    }
}
