//! Composite records: named fields laid out back to back in declaration order.
//!
//! Records are declared with [`record!`](crate::record) or, with the `derive`
//! feature, `#[derive(Packable)]`. Both generate a [`Schema`] implementation
//! whose `SIZE` is the sum of the field sizes, and a [`Record`] implementation
//! that exposes the field list for reflection.
#[cfg(feature = "std")]
use crate::error::{definition_error, Result};
use {super::Schema, core::fmt};

/// Field names that cannot be declared on a record.
pub const RESERVED_FIELD_NAMES: [&str; 2] = ["size", "members"];

/// Position of one field inside a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldInfo {
    pub name: &'static str,
    /// Byte offset from the start of the record.
    pub offset: usize,
    pub size: usize,
}

/// Read-only view over the declared fields of a record schema.
///
/// The codec never goes through this trait; it exists for reflection and debugging.
pub trait Record: Schema {
    /// Fields in declaration (and byte layout) order.
    const FIELDS: &'static [FieldInfo];

    /// Borrow the field called `name` from `value`.
    fn field<'a>(value: &'a Self::Value, name: &str) -> Option<&'a dyn fmt::Debug>;

    fn field_names() -> impl ExactSizeIterator<Item = &'static str> {
        Self::FIELDS.iter().map(|field| field.name)
    }

    fn field_count() -> usize {
        Self::FIELDS.len()
    }

    fn field_info(name: &str) -> Option<&'static FieldInfo> {
        Self::FIELDS.iter().find(|field| field.name == name)
    }

    /// Mapping-style view over a record value.
    fn view(value: &Self::Value) -> RecordView<'_, Self>
    where
        Self: Sized,
    {
        RecordView { value }
    }
}

/// Name-keyed access to the fields of one record value.
///
/// ```
/// # use cstruct::{record, Record};
/// #[derive(Debug)]
/// struct Point {
///     x: i8,
///     y: i8,
/// }
///
/// record! { Point { x: i8, y: i8 } }
///
/// let point = Point { x: 1, y: -2 };
/// let view = Point::view(&point);
/// assert_eq!(view.len(), 2);
/// assert_eq!(view.keys().collect::<Vec<_>>(), ["x", "y"]);
/// assert_eq!(format!("{:?}", view.get("y").unwrap()), "-2");
/// assert!(view.get("z").is_none());
/// ```
pub struct RecordView<'a, R: Record> {
    value: &'a R::Value,
}

impl<'a, R: Record> RecordView<'a, R> {
    pub fn get(&self, name: &str) -> Option<&'a dyn fmt::Debug> {
        R::field(self.value, name)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        R::field_info(name).is_some()
    }

    pub fn keys(&self) -> impl ExactSizeIterator<Item = &'static str> {
        R::field_names()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'a dyn fmt::Debug)> + 'a {
        let value = self.value;
        R::FIELDS
            .iter()
            .filter_map(move |info| Some((info.name, R::field(value, info.name)?)))
    }

    pub fn len(&self) -> usize {
        R::field_count()
    }

    pub fn is_empty(&self) -> bool {
        R::FIELDS.is_empty()
    }
}

impl<R: Record> fmt::Debug for RecordView<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

const fn str_eq(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }
    true
}

const fn is_reserved(name: &str) -> bool {
    let mut i = 0;
    while i < RESERVED_FIELD_NAMES.len() {
        if str_eq(name, RESERVED_FIELD_NAMES[i]) {
            return true;
        }
        i += 1;
    }
    false
}

/// Fail compilation when a record declares a reserved field name.
#[doc(hidden)]
pub const fn assert_not_reserved(name: &str) {
    if is_reserved(name) {
        panic!("`size` and `members` are reserved record field names");
    }
}

/// Compute field offsets from `(name, size)` pairs in declaration order.
#[doc(hidden)]
pub const fn layout_fields<const N: usize>(fields: [(&'static str, usize); N]) -> [FieldInfo; N] {
    let mut out = [FieldInfo {
        name: "",
        offset: 0,
        size: 0,
    }; N];
    let mut offset = 0;
    let mut i = 0;
    while i < N {
        out[i] = FieldInfo {
            name: fields[i].0,
            offset,
            size: fields[i].1,
        };
        offset += fields[i].1;
        i += 1;
    }
    out
}

/// Offset of the field called `name`.
#[doc(hidden)]
pub const fn offset_of(fields: &[FieldInfo], name: &str) -> usize {
    let mut i = 0;
    while i < fields.len() {
        if str_eq(fields[i].name, name) {
            return fields[i].offset;
        }
        i += 1;
    }
    panic!("no such field")
}

/// Runtime counterpart of [`assert_not_reserved`] for dynamically defined records.
#[cfg(feature = "std")]
pub(crate) fn validate_field_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(definition_error("field names must not be empty"));
    }
    if is_reserved(name) {
        return Err(definition_error(alloc::format!(
            "`{name}` is a reserved field name"
        )));
    }
    Ok(())
}

/// Implement [`Schema`] and [`Record`] for a struct by listing its fields and their schemas.
///
/// Fields are packed in the order they are listed here, which must match the
/// external layout; the struct's own field order does not matter. Every field
/// value must implement `Debug` (for [`Record::field`]).
///
/// The plain form implements the traits on the struct itself:
///
/// ```
/// # use cstruct::{record, Int, BigEndian, Packed, Schema};
/// #[derive(Debug, PartialEq)]
/// struct Packet {
///     kind: u8,
///     length: u16,
/// }
///
/// record! {
///     Packet {
///         kind: u8,
///         length: Int<u16, 2, BigEndian>,
///     }
/// }
///
/// assert_eq!(Packet::SIZE, 3);
/// assert_eq!(Packet::LENGTH_OFFSET, 1);
/// let packet = Packet::from_bytes(&[1, 0, 2]).unwrap();
/// assert_eq!(packet, Packet { kind: 1, length: 2 });
/// ```
///
/// The mapping form declares a new schema type for a struct defined elsewhere:
///
/// ```
/// # use cstruct::{record, Schema};
/// mod foreign {
///     #[derive(Debug, PartialEq)]
///     pub struct Point {
///         pub x: i8,
///         pub y: i8,
///     }
/// }
///
/// record! {
///     pub struct PointSchema => foreign::Point {
///         x: i8,
///         y: i8,
///     }
/// }
///
/// assert_eq!(PointSchema::unpack(&[1, 2]).unwrap(), foreign::Point { x: 1, y: 2 });
/// ```
///
/// Declaring a field called `size` or `members` is rejected at compile time:
///
/// ```compile_fail
/// # use cstruct::record;
/// struct Bad {
///     size: u8,
/// }
///
/// record! { Bad { size: u8 } }
/// ```
#[macro_export]
macro_rules! record {
    (@impl $schema:ident, $target:path, $($field:ident : $field_schema:ty),*) => {
        const _: () = {
            $($crate::__private::assert_not_reserved(stringify!($field));)*
        };

        impl $crate::Schema for $schema {
            type Value = $target;
            const SIZE: usize = 0 $(+ <$field_schema as $crate::Schema>::SIZE)*;

            #[inline]
            #[allow(unused_mut, unused_assignments, unused_variables)]
            fn pack_into(
                buffer: &mut [u8],
                offset: usize,
                value: &Self::Value,
            ) -> $crate::Result<()> {
                $crate::check_range(buffer.len(), offset, <Self as $crate::Schema>::SIZE)?;
                let mut cursor = offset;
                $(
                    <$field_schema as $crate::Schema>::pack_into(buffer, cursor, &value.$field)?;
                    cursor += <$field_schema as $crate::Schema>::SIZE;
                )*
                Ok(())
            }

            #[inline]
            #[allow(unused_mut, unused_assignments, unused_variables)]
            fn unpack_from(buffer: &[u8], offset: usize) -> $crate::Result<Self::Value> {
                $crate::check_range(buffer.len(), offset, <Self as $crate::Schema>::SIZE)?;
                // A `path` fragment cannot head a struct literal; an alias can.
                #[allow(non_camel_case_types)]
                type __CstructTarget = $target;
                let mut cursor = offset;
                $(
                    let $field = <$field_schema as $crate::Schema>::unpack_from(buffer, cursor)?;
                    cursor += <$field_schema as $crate::Schema>::SIZE;
                )*
                Ok(__CstructTarget { $($field),* })
            }
        }

        impl $crate::Record for $schema {
            const FIELDS: &'static [$crate::FieldInfo] = &$crate::__private::layout_fields([
                $((stringify!($field), <$field_schema as $crate::Schema>::SIZE)),*
            ]);

            #[allow(unused_variables)]
            fn field<'a>(
                value: &'a Self::Value,
                name: &str,
            ) -> Option<&'a dyn ::core::fmt::Debug> {
                match name {
                    $(stringify!($field) => Some(&value.$field),)*
                    _ => None,
                }
            }
        }

        $crate::__private::paste! {
            #[allow(dead_code)]
            impl $schema {
                $(
                    pub const [<$field:upper _OFFSET>]: usize = $crate::__private::offset_of(
                        <Self as $crate::Record>::FIELDS,
                        stringify!($field),
                    );
                )*
            }
        }
    };

    ($vis:vis struct $schema:ident => $target:path { $($field:ident : $field_schema:ty),* $(,)? }) => {
        $vis struct $schema;

        $crate::record!(@impl $schema, $target, $($field: $field_schema),*);
    };

    ($target:ident { $($field:ident : $field_schema:ty),* $(,)? }) => {
        $crate::record!(@impl $target, $target, $($field: $field_schema),*);
    };
}
