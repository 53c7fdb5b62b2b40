//! cstruct describes fixed-layout binary records declaratively and derives a
//! byte-exact encoder/decoder pair for them.
//!
//! It targets layouts defined outside of Rust (network packets, file headers,
//! hardware registers) where field order, width, byte order and padding are
//! fixed by someone else's spec, not by the compiler's layout rules.
//!
//! # Quickstart
//!
//! Every packable type implements [`Schema`]: a fixed [`SIZE`](Schema::SIZE)
//! known without an instance, plus [`pack_into`](Schema::pack_into) and
//! [`unpack_from`](Schema::unpack_from). [`pack`](Schema::pack),
//! [`unpack`](Schema::unpack) and [`iter_unpack`](Schema::iter_unpack) are
//! derived from those two.
//!
//! Records are declared by listing their fields with the [`record!`] macro:
//!
//! ```
//! # use cstruct::{record, Packed, Schema};
//! #[derive(Debug, PartialEq)]
//! struct Point {
//!     x: i8,
//!     y: i8,
//! }
//!
//! record! {
//!     Point {
//!         x: i8,
//!         y: i8,
//!     }
//! }
//!
//! let point = Point::from_bytes(&[0x0f, 0x20]).unwrap();
//! assert_eq!(point, Point { x: 15, y: 32 });
//! assert_eq!(point.to_bytes().unwrap(), [0x0f, 0x20]);
//! ```
//!
//! Leaf types cover integers of any width and byte order ([`Int`]) and
//! fixed-width text ([`Text`]). Arrays of any schema are schemas:
//!
//! ```
//! # use cstruct::{record, Int, BigEndian, Text, Ascii, Schema};
//! #[derive(Debug, PartialEq)]
//! struct Entry {
//!     id: u32,
//!     name: String,
//!     scores: [u16; 3],
//! }
//!
//! record! {
//!     Entry {
//!         id: Int<u32, 3, BigEndian>,
//!         name: Text<4, Ascii>,
//!         scores: [Int<u16, 2, BigEndian>; 3],
//!     }
//! }
//!
//! assert_eq!(Entry::SIZE, 3 + 4 + 6);
//! let bytes = [0, 0, 7, b'a', b'b', b'c', b'd', 0, 1, 0, 2, 0, 3];
//! let entries = Entry::iter_unpack(&bytes).unwrap().collect::<Result<Vec<_>, _>>().unwrap();
//! assert_eq!(entries[0].scores, [1, 2, 3]);
//! ```
//!
//! With the `derive` feature, `#[derive(Packable)]` does the same as
//! [`record!`] from field attributes:
//!
//! ```
//! # #[cfg(feature = "derive")] {
//! # use cstruct::{Packable, Packed, Int, BigEndian, Schema};
//! #[derive(Packable, Debug, PartialEq)]
//! struct Packet {
//!     kind: u8,
//!     #[cstruct(with = "Int<u16, 2, BigEndian>")]
//!     length: u16,
//! }
//!
//! assert_eq!(Packet::SIZE, 3);
//! assert_eq!(Packet::from_bytes(&[1, 0, 2]).unwrap(), Packet { kind: 1, length: 2 });
//! # }
//! ```
//!
//! Reserved field names are rejected, as with [`record!`]:
//!
//! ```compile_fail
//! # use cstruct::Packable;
//! #[derive(Packable)]
//! struct Bad {
//!     members: u8,
//! }
//! ```
//!
//! So are generic structs:
//!
//! ```compile_fail
//! # use cstruct::Packable;
//! #[derive(Packable)]
//! struct Wrapper<T> {
//!     inner: T,
//! }
//! ```
//!
//! Layouts that are only known at runtime are described with the
//! [`dynamic`] module instead.
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(feature = "std"), no_std)]
extern crate alloc;

pub mod error;
pub use error::{Error, Result};
mod schema;
pub use schema::*;
#[cfg(feature = "std")]
pub mod dynamic;

pub use byteorder::{BigEndian, ByteOrder, LittleEndian, NetworkEndian};

#[doc(hidden)]
pub mod __private {
    #[doc(hidden)]
    pub use {
        crate::schema::record::{assert_not_reserved, layout_fields, offset_of},
        paste::paste,
    };
}

#[cfg(feature = "derive")]
pub use cstruct_derive::*;
