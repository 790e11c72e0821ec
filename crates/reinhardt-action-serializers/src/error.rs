//! Configuration errors raised while resolving serializer fields.
//!
//! Every error here is a programmer mistake in a serializer's meta. They are
//! surfaced at construction or introspection time and never recovered.

/// Broad class of a [`ConfigurationError`].
///
/// `Type` covers options declared with the wrong shape (a bare string where a
/// list is expected). `Assertion` covers options that are well-formed but
/// contradict each other or the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
	Type,
	Assertion,
}

/// Errors produced by serializer meta validation and field resolution
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
	#[error(
		"The `fields` option must be a list or tuple or \"__all__\". Got {got} on serializer {serializer}."
	)]
	InvalidFieldsType { serializer: String, got: String },

	#[error("The `exclude` option must be a list or tuple. Got {got} on serializer {serializer}.")]
	InvalidExcludeType { serializer: String, got: String },

	#[error(
		"The `read_only_fields` option must be a list or tuple. Got {got} on serializer {serializer}."
	)]
	InvalidReadOnlyFieldsType { serializer: String, got: String },

	#[error("Cannot set both 'fields' and 'exclude' options on serializer {serializer}.")]
	FieldsAndExclude { serializer: String },

	#[error(
		"Creating a ModelActionSerializer without either the 'fields' attribute or the 'exclude' attribute is disallowed. Add an explicit fields = \"__all__\" to the {serializer} serializer."
	)]
	MissingFieldsAndExclude { serializer: String },

	#[error(
		"Cannot both declare the field '{field}' and include it in the {serializer} 'exclude' option. Remove the field or disable the declared field instead."
	)]
	ExcludeDeclaredField { serializer: String, field: String },

	#[error(
		"The field '{field}' was included on serializer {serializer} in the 'exclude' option, but does not match any model field."
	)]
	ExcludeUnknownField { serializer: String, field: String },

	#[error(
		"Serializer `{serializer}` has field `readonly_fields`; the correct spelling for the option is `read_only_fields`."
	)]
	MisspelledReadOnlyFields { serializer: String },

	#[error("The field '{field}' is listed more than once in the 'fields' option of serializer {serializer}.")]
	DuplicateField { serializer: String, field: String },

	#[error(
		"The field '{field}' is included on serializer {serializer} but is neither a model field nor a declared field."
	)]
	UnknownField { serializer: String, field: String },
}

impl ConfigurationError {
	/// Whether this is a wrong-shape error or a contradictory-configuration error
	pub fn kind(&self) -> ErrorKind {
		match self {
			Self::InvalidFieldsType { .. }
			| Self::InvalidExcludeType { .. }
			| Self::InvalidReadOnlyFieldsType { .. } => ErrorKind::Type,
			Self::FieldsAndExclude { .. }
			| Self::MissingFieldsAndExclude { .. }
			| Self::ExcludeDeclaredField { .. }
			| Self::ExcludeUnknownField { .. }
			| Self::MisspelledReadOnlyFields { .. }
			| Self::DuplicateField { .. }
			| Self::UnknownField { .. } => ErrorKind::Assertion,
		}
	}

	/// Name of the serializer whose meta is at fault
	pub fn serializer(&self) -> &str {
		match self {
			Self::InvalidFieldsType { serializer, .. }
			| Self::InvalidExcludeType { serializer, .. }
			| Self::InvalidReadOnlyFieldsType { serializer, .. }
			| Self::FieldsAndExclude { serializer }
			| Self::MissingFieldsAndExclude { serializer }
			| Self::ExcludeDeclaredField { serializer, .. }
			| Self::ExcludeUnknownField { serializer, .. }
			| Self::MisspelledReadOnlyFields { serializer }
			| Self::DuplicateField { serializer, .. }
			| Self::UnknownField { serializer, .. } => serializer,
		}
	}
}

/// Result alias for field resolution
pub type ConfigResult<T> = Result<T, ConfigurationError>;
