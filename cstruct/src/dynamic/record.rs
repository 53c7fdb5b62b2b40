//! Runtime record definitions.
use {
    super::{Layout, Record, Value},
    crate::{
        error::{definition_error, missing_field, Result},
        schema::{check_range, validate_field_name},
    },
    std::collections::HashSet,
};

/// One named field of a [`RecordLayout`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
    name: String,
    layout: Layout,
    offset: usize,
}

impl Field {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Byte offset from the start of the record.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn size(&self) -> usize {
        self.layout.size()
    }
}

/// A record whose fields are listed at runtime.
///
/// Built through [`RecordLayout::builder`]; the field list and size are fixed
/// once [`RecordBuilder::build`] succeeds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordLayout {
    name: String,
    fields: Vec<Field>,
    size: usize,
}

impl RecordLayout {
    pub fn builder(name: impl Into<String>) -> RecordBuilder {
        RecordBuilder {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in declaration (and byte layout) order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn field_names(&self) -> impl ExactSizeIterator<Item = &str> {
        self.fields.iter().map(|field| field.name.as_str())
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub(super) fn pack_into(&self, buffer: &mut [u8], offset: usize, value: &Value) -> Result<()> {
        let record = value.expect_record()?;
        check_range(buffer.len(), offset, self.size)?;
        for field in &self.fields {
            let value = record
                .get(&field.name)
                .ok_or_else(|| missing_field(&field.name))?;
            field.layout.pack_into(buffer, offset + field.offset, value)?;
        }
        Ok(())
    }

    pub(super) fn unpack_from(&self, buffer: &[u8], offset: usize) -> Result<Value> {
        check_range(buffer.len(), offset, self.size)?;
        let mut record = Record::with_capacity(self.fields.len());
        for field in &self.fields {
            let value = field.layout.unpack_from(buffer, offset + field.offset)?;
            record.insert(field.name.as_str(), value);
        }
        Ok(Value::Record(record))
    }
}

/// Collects fields for a [`RecordLayout`].
///
/// Validation is deferred to [`build`](Self::build) so definitions can be
/// chained without handling errors at every step.
#[derive(Debug, Clone)]
#[must_use]
pub struct RecordBuilder {
    name: String,
    fields: Vec<(String, Layout)>,
}

impl RecordBuilder {
    /// Append a field. Fields are laid out in the order they are added.
    pub fn field(mut self, name: impl Into<String>, layout: impl Into<Layout>) -> Self {
        self.fields.push((name.into(), layout.into()));
        self
    }

    /// Validate field names and compute offsets.
    ///
    /// Fails with [`Error::DefinitionError`](crate::Error::DefinitionError) on a
    /// reserved, empty or duplicate field name, or when the total size overflows.
    pub fn build(self) -> Result<RecordLayout> {
        let mut seen = HashSet::with_capacity(self.fields.len());
        let mut fields = Vec::with_capacity(self.fields.len());
        let mut offset = 0usize;
        for (name, layout) in self.fields {
            validate_field_name(&name)?;
            if !seen.insert(name.clone()) {
                return Err(definition_error(format!(
                    "duplicate field `{name}` in record `{}`",
                    self.name
                )));
            }
            let size = layout.size();
            let field_offset = offset;
            offset = offset.checked_add(size).ok_or_else(|| {
                definition_error(format!("record `{}` size overflows usize", self.name))
            })?;
            fields.push(Field {
                name,
                layout,
                offset: field_offset,
            });
        }
        Ok(RecordLayout {
            name: self.name,
            fields,
            size: offset,
        })
    }
}
