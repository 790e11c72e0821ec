//! Model field introspection
//!
//! Describes the fields a model exposes to a serializer so that the default
//! field set and per-field base options can be derived without reflection.

use crate::meta::FieldKwargs;
use serde_json::Value;
use std::collections::HashMap;

/// A model field as seen by a serializer
#[derive(Debug, Clone, PartialEq)]
pub struct ModelFieldInfo {
	/// Field name
	pub name: String,
	/// Serializer field type built for it (`CharField`, `IntegerField`, ...)
	pub field_type: String,
	/// Keyword options the host engine derives from the model definition
	pub kwargs: FieldKwargs,
	/// Whether this is the primary key
	pub is_primary_key: bool,
}

impl ModelFieldInfo {
	/// Create a new field info
	pub fn new(name: impl Into<String>, field_type: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			field_type: field_type.into(),
			kwargs: FieldKwargs::new(),
			is_primary_key: false,
		}
	}

	/// Add a keyword option derived from the model definition
	pub fn kwarg(mut self, option: impl Into<String>, value: impl Into<Value>) -> Self {
		self.kwargs.insert(option.into(), value.into());
		self
	}

	/// Mark field as primary key
	pub fn primary_key(mut self) -> Self {
		self.is_primary_key = true;
		self
	}

	/// Mark field as an auto-generated primary key, which is read-only
	pub fn auto_primary_key(self) -> Self {
		self.primary_key().kwarg("read_only", true)
	}
}

/// Ordered registry of a model's fields
///
/// # Examples
///
/// ```
/// use reinhardt_action_serializers::introspection::{ModelFieldInfo, ModelFields};
///
/// let fields = ModelFields::new()
///     .field(ModelFieldInfo::new("id", "IntegerField").auto_primary_key())
///     .field(ModelFieldInfo::new("name", "CharField").kwarg("max_length", 150));
///
/// assert_eq!(fields.field_names(), vec!["id", "name"]);
/// assert_eq!(fields.primary_key_field().map(|f| f.name.as_str()), Some("id"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ModelFields {
	fields: Vec<ModelFieldInfo>,
	index: HashMap<String, usize>,
}

impl ModelFields {
	/// Create an empty registry
	pub fn new() -> Self {
		Self::default()
	}

	/// Register a field, replacing any earlier field with the same name
	pub fn register_field(&mut self, field: ModelFieldInfo) {
		match self.index.get(&field.name) {
			Some(&position) => self.fields[position] = field,
			None => {
				self.index.insert(field.name.clone(), self.fields.len());
				self.fields.push(field);
			}
		}
	}

	/// Builder form of [`register_field`](Self::register_field)
	pub fn field(mut self, field: ModelFieldInfo) -> Self {
		self.register_field(field);
		self
	}

	/// Get all registered fields
	pub fn get_fields(&self) -> &[ModelFieldInfo] {
		&self.fields
	}

	/// Get field names only, in registration order
	pub fn field_names(&self) -> Vec<String> {
		self.fields.iter().map(|f| f.name.clone()).collect()
	}

	/// Get a specific field by name
	pub fn get_field(&self, name: &str) -> Option<&ModelFieldInfo> {
		self.index.get(name).map(|&position| &self.fields[position])
	}

	/// Check if a field exists
	pub fn has_field(&self, name: &str) -> bool {
		self.index.contains_key(name)
	}

	/// Get primary key field
	pub fn primary_key_field(&self) -> Option<&ModelFieldInfo> {
		self.fields.iter().find(|f| f.is_primary_key)
	}

	pub fn len(&self) -> usize {
		self.fields.len()
	}

	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}
}
