//! Error types and helpers.
use {alloc::string::String, thiserror::Error};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Buffer length {actual} does not match type size {expected}")]
    SizeMismatch { expected: usize, actual: usize },
    #[error("Buffer too small: {size} bytes at offset {offset} exceed buffer length {len}")]
    BufferTooSmall {
        offset: usize,
        size: usize,
        len: usize,
    },
    #[error("Buffer length {len} is not a multiple of type size {size}")]
    MisalignedBuffer { len: usize, size: usize },
    #[error("Integer value does not fit in {width} bytes (signed: {signed})")]
    ValueOutOfRange { width: usize, signed: bool },
    #[error("Encoded value of {len} bytes exceeds field width of {size} bytes")]
    ValueTooLarge { len: usize, size: usize },
    #[error("Invalid {encoding} encoding at byte {position}")]
    InvalidEncoding {
        encoding: &'static str,
        position: usize,
    },
    #[error("Invalid type definition: {0}")]
    DefinitionError(String),
    #[error("Expected {expected} elements, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
    #[error("Expected {expected} value, got {found}")]
    ValueMismatch {
        expected: &'static str,
        found: &'static str,
    },
    #[error("Record value has no field named `{0}`")]
    MissingField(String),
}

pub type Result<T> = core::result::Result<T, Error>;

#[cold]
pub const fn size_mismatch(expected: usize, actual: usize) -> Error {
    Error::SizeMismatch { expected, actual }
}

#[cold]
pub const fn buffer_too_small(offset: usize, size: usize, len: usize) -> Error {
    Error::BufferTooSmall { offset, size, len }
}

#[cold]
pub const fn misaligned_buffer(len: usize, size: usize) -> Error {
    Error::MisalignedBuffer { len, size }
}

#[cold]
pub const fn value_out_of_range(width: usize, signed: bool) -> Error {
    Error::ValueOutOfRange { width, signed }
}

#[cold]
pub const fn value_too_large(len: usize, size: usize) -> Error {
    Error::ValueTooLarge { len, size }
}

#[cold]
pub const fn invalid_encoding(encoding: &'static str, position: usize) -> Error {
    Error::InvalidEncoding { encoding, position }
}

#[cold]
pub fn definition_error(reason: impl Into<String>) -> Error {
    Error::DefinitionError(reason.into())
}

#[cold]
pub const fn length_mismatch(expected: usize, actual: usize) -> Error {
    Error::LengthMismatch { expected, actual }
}

#[cold]
pub const fn value_mismatch(expected: &'static str, found: &'static str) -> Error {
    Error::ValueMismatch { expected, found }
}

#[cold]
pub fn missing_field(name: &str) -> Error {
    Error::MissingField(name.into())
}
