use std::collections::HashMap;
use std::path::Path;

use thiserror::Error;

use super::checker::FieldType;

/// Maps field names (e.g. `"V"`) to the type their patterns are parsed as.
///
/// The registry is configuration: it is handed to a [`Compiler`](crate::Compiler)
/// at construction time, and any atom naming a field absent from it fails to
/// compile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct FieldRegistry {
    fields: HashMap<String, FieldType>,
}

/// Errors from assembling a registry out of schema entries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("field '{field}' is declared more than once")]
    DuplicateField { field: String },
}

impl FieldRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The routing field set: `V`, `P`, `A` and `L` as `int32`, `E` as `string`.
    #[must_use]
    pub fn standard() -> Self {
        Self::new()
            .with_field("V", FieldType::Int32)
            .with_field("P", FieldType::Int32)
            .with_field("A", FieldType::Int32)
            .with_field("L", FieldType::Int32)
            .with_field("E", FieldType::String)
    }

    /// Register a field (builder version). Re-registering a name replaces its type.
    #[must_use]
    pub fn with_field(mut self, name: &str, ty: FieldType) -> Self {
        self.register(name, ty);
        self
    }

    /// Register a field, returning the type it previously had, if any.
    pub fn register(&mut self, name: &str, ty: FieldType) -> Option<FieldType> {
        self.fields.insert(name.to_owned(), ty)
    }

    /// Build a registry from schema text such as `V: int32` lines.
    ///
    /// # Errors
    ///
    /// Returns [`XexprError::Parse`](crate::XexprError::Parse) on malformed
    /// schema text and [`XexprError::Schema`](crate::XexprError::Schema) when
    /// a field is declared twice.
    pub fn from_schema(input: &str) -> Result<Self, crate::XexprError> {
        let entries = crate::parse::parse_schema(input)?;
        Ok(Self::from_entries(entries)?)
    }

    /// Read and parse a schema file.
    ///
    /// # Errors
    ///
    /// Returns [`XexprError`](crate::XexprError) on I/O, parse, or schema errors.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, crate::XexprError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_schema(&content)
    }

    pub(crate) fn from_entries(
        entries: impl IntoIterator<Item = (String, FieldType)>,
    ) -> Result<Self, SchemaError> {
        let mut registry = Self::new();
        for (name, ty) in entries {
            if registry.register(&name, ty).is_some() {
                return Err(SchemaError::DuplicateField { field: name });
            }
        }
        Ok(registry)
    }

    /// Look up the declared type of a field.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<FieldType> {
        self.fields.get(name).copied()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// The number of registered fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over all registered (name, type) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, FieldType)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), *v))
    }
}
