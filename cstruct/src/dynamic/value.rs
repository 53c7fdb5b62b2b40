//! Runtime values for dynamic layouts.
use {
    crate::error::{value_mismatch, Result},
    indexmap::IndexMap,
    std::ops::Index,
};

/// A value packed or unpacked through a [`Layout`](super::Layout).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Signed integers decode to this variant.
    Int(i128),
    /// Unsigned integers decode to this variant.
    UInt(u128),
    Text(String),
    Record(Record),
    Array(Vec<Value>),
}

impl Value {
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Value::Int(_) | Value::UInt(_) => "integer",
            Value::Text(_) => "text",
            Value::Record(_) => "record",
            Value::Array(_) => "array",
        }
    }

    /// The integer value, if it is an integer representable as `i128`.
    pub fn as_i128(&self) -> Option<i128> {
        match *self {
            Value::Int(v) => Some(v),
            Value::UInt(v) => i128::try_from(v).ok(),
            _ => None,
        }
    }

    /// The integer value, if it is a non-negative integer.
    pub fn as_u128(&self) -> Option<u128> {
        match *self {
            Value::Int(v) => u128::try_from(v).ok(),
            Value::UInt(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub(crate) fn expect_text(&self) -> Result<&str> {
        self.as_str()
            .ok_or_else(|| value_mismatch("text", self.kind()))
    }

    pub(crate) fn expect_record(&self) -> Result<&Record> {
        self.as_record()
            .ok_or_else(|| value_mismatch("record", self.kind()))
    }

    pub(crate) fn expect_array(&self) -> Result<&[Value]> {
        self.as_array()
            .ok_or_else(|| value_mismatch("array", self.kind()))
    }
}

macro_rules! impl_from_int {
    ($variant:ident: $($type:ty),*) => {$(
        impl From<$type> for Value {
            #[inline]
            fn from(value: $type) -> Self {
                Value::$variant(value.into())
            }
        }
    )*};
}

impl_from_int!(Int: i8, i16, i32, i64, i128);
impl_from_int!(UInt: u8, u16, u32, u64, u128);

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_owned())
    }
}

impl From<Record> for Value {
    fn from(value: Record) -> Self {
        Value::Record(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Array(items.into_iter().map(Into::into).collect())
    }
}

/// Field values of a dynamic record, in insertion order.
///
/// Unpacking fills fields in layout order. When packing, fields are looked up
/// by name, so insertion order does not matter and extra fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: IndexMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: IndexMap::with_capacity(capacity),
        }
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Set a field, returning its previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.fields.get_mut(name)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn keys(&self) -> impl ExactSizeIterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Index<&str> for Record {
    type Output = Value;

    /// # Panics
    ///
    /// Panics if the record has no field called `name`.
    fn index(&self, name: &str) -> &Value {
        &self.fields[name]
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_accessors() {
        let mut record = Record::new().with("x", 1i8).with("name", "ab");
        assert_eq!(record.len(), 2);
        assert_eq!(record.keys().collect::<Vec<_>>(), ["x", "name"]);
        assert_eq!(record["x"], Value::Int(1));
        assert_eq!(record.get("name").and_then(Value::as_str), Some("ab"));
        assert!(record.get("y").is_none());

        assert_eq!(record.insert("x", 2i8), Some(Value::Int(1)));
        assert_eq!(record.keys().collect::<Vec<_>>(), ["x", "name"]);
    }

    #[test]
    fn integer_views() {
        assert_eq!(Value::from(-1i32).as_u128(), None);
        assert_eq!(Value::from(-1i32).as_i128(), Some(-1));
        assert_eq!(Value::from(u128::MAX).as_i128(), None);
        assert_eq!(Value::from(7u8).as_i128(), Some(7));
        assert_eq!(Value::from("x").as_i128(), None);
    }

    #[test]
    fn collect_into_record() {
        let record: Record = [("a", 1u8), ("b", 2u8)].into_iter().collect();
        assert_eq!(record.iter().map(|(k, _)| k).collect::<Vec<_>>(), ["a", "b"]);
        let array = Value::from(vec![1u8, 2, 3]);
        assert_eq!(array.as_array().map(<[Value]>::len), Some(3));
    }
}
