//! Datasource type - a named collection of fields

use ahash::AHashMap;

use crate::field::Field;

/// A datasource declared by a workbook
///
/// Fields keep document order; lookups by id go through an index.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Datasource {
    /// Internal name (e.g. `federated.0a1b2c3`, `Parameters`)
    pub name: String,
    /// Display caption
    pub caption: Option<String>,
    fields: Vec<Field>,
    #[cfg_attr(feature = "serde", serde(skip))]
    index: AHashMap<String, usize>,
}

impl Datasource {
    /// Create an empty datasource
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set caption
    pub fn with_caption<S: Into<String>>(mut self, caption: S) -> Self {
        self.caption = Some(caption.into());
        self
    }

    /// Add a field, builder style
    pub fn with_field(mut self, field: Field) -> Self {
        self.insert_field(field);
        self
    }

    /// Display name: the caption if set, else the internal name
    pub fn display_name(&self) -> &str {
        self.caption
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(&self.name)
    }

    /// Insert a field, replacing any field with the same id in place
    ///
    /// Returns the replaced field, if any.
    pub fn insert_field(&mut self, field: Field) -> Option<Field> {
        match self.index.get(&field.id) {
            Some(&idx) => Some(std::mem::replace(&mut self.fields[idx], field)),
            None => {
                self.index.insert(field.id.clone(), self.fields.len());
                self.fields.push(field);
                None
            }
        }
    }

    /// Get a field by id
    pub fn field(&self, id: &str) -> Option<&Field> {
        self.index.get(id).map(|&idx| &self.fields[idx])
    }

    /// Get a mutable field by id
    pub fn field_mut(&mut self, id: &str) -> Option<&mut Field> {
        match self.index.get(id) {
            Some(&idx) => self.fields.get_mut(idx),
            None => None,
        }
    }

    /// Whether a field with this id exists
    pub fn contains_field(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Iterate over fields in document order
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }

    /// Number of fields
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }
}
