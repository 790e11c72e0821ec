//! Model serializer with per-action field configuration
//!
//! [`ModelActionSerializer`] is the glue between a model's introspected
//! fields, the serializer's explicitly declared fields, and its
//! [`ActionSerializerMeta`]. It decides which fields a construction builds and
//! with which options; turning those declarations into values is left to the
//! serialization engine.

use crate::context::SerializerContext;
use crate::error::{ConfigResult, ConfigurationError};
use crate::introspection::ModelFields;
use crate::meta::{ActionSerializerMeta, FieldKwargs};
use crate::resolver::{FieldResolver, ResolvedConfig};
use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Model-derived options dropped when extra kwargs make a field read-only
const WRITE_OPTIONS: &[&str] = &[
	"required",
	"default",
	"allow_blank",
	"min_length",
	"max_length",
	"min_value",
	"max_value",
	"validators",
	"queryset",
];

/// A field declared explicitly on the serializer rather than derived from the model
#[derive(Debug, Clone, PartialEq)]
pub struct DeclaredField {
	pub field_type: String,
	pub kwargs: FieldKwargs,
}

/// A field the host engine should build, with its final options
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDeclaration {
	pub name: String,
	pub field_type: String,
	pub kwargs: FieldKwargs,
}

impl fmt::Display for FieldDeclaration {
	/// Renders as `Type(option=value, ...)` with options sorted by name
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut options: Vec<(&String, &Value)> = self.kwargs.iter().collect();
		options.sort_by(|a, b| a.0.cmp(b.0));
		let rendered: Vec<String> = options
			.into_iter()
			.map(|(key, value)| format!("{}={}", key, value))
			.collect();
		write!(f, "{}({})", self.field_type, rendered.join(", "))
	}
}

/// Serializer whose fields depend on the action being served
///
/// # Examples
///
/// ```
/// use reinhardt_action_serializers::introspection::{ModelFieldInfo, ModelFields};
/// use reinhardt_action_serializers::meta::{ActionConfig, ActionSerializerMeta};
/// use reinhardt_action_serializers::{ActionType, ModelActionSerializer, SerializerContext};
///
/// let model = ModelFields::new()
///     .field(ModelFieldInfo::new("id", "IntegerField").auto_primary_key())
///     .field(ModelFieldInfo::new("name", "CharField").kwarg("max_length", 150))
///     .field(ModelFieldInfo::new("permissions", "PrimaryKeyRelatedField").kwarg("many", true));
/// let meta = ActionSerializerMeta::new()
///     .model("auth.Group")
///     .fields(["id", "name", "permissions"])
///     .action("list", ActionConfig::new().fields(["id", "name"]));
/// let serializer = ModelActionSerializer::new("GroupActionSerializer", meta, model);
///
/// let list = SerializerContext::new().with_action(ActionType::List);
/// assert_eq!(serializer.field_names(&list).unwrap(), vec!["id", "name"]);
///
/// let retrieve = SerializerContext::new().with_action(ActionType::Retrieve);
/// assert_eq!(serializer.field_names(&retrieve).unwrap().len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct ModelActionSerializer {
	name: String,
	meta: Arc<ActionSerializerMeta>,
	model_fields: ModelFields,
	declared_fields: IndexMap<String, DeclaredField>,
}

impl ModelActionSerializer {
	/// Create a serializer for a model
	pub fn new(
		name: impl Into<String>,
		meta: impl Into<Arc<ActionSerializerMeta>>,
		model_fields: ModelFields,
	) -> Self {
		Self {
			name: name.into(),
			meta: meta.into(),
			model_fields,
			declared_fields: IndexMap::new(),
		}
	}

	/// Declare a field explicitly on the serializer
	///
	/// Declared fields keep their own options; `extra_kwargs` do not apply to
	/// them and they cannot be removed through `exclude`.
	pub fn with_declared_field(
		mut self,
		name: impl Into<String>,
		field_type: impl Into<String>,
		kwargs: FieldKwargs,
	) -> Self {
		self.declared_fields.insert(
			name.into(),
			DeclaredField {
				field_type: field_type.into(),
				kwargs,
			},
		);
		self
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn meta(&self) -> &ActionSerializerMeta {
		&self.meta
	}

	pub fn model_fields(&self) -> &ModelFields {
		&self.model_fields
	}

	/// Names of the explicitly declared fields
	pub fn declared_field_names(&self) -> Vec<String> {
		self.declared_fields.keys().cloned().collect()
	}

	/// Fields built when the meta selects everything
	///
	/// The primary key comes first, then declared fields, then the remaining
	/// model fields. A declared field shadows a model field of the same name.
	pub fn default_field_names(&self) -> Vec<String> {
		let primary_key = self
			.model_fields
			.primary_key_field()
			.map(|field| field.name.clone())
			.filter(|name| !self.declared_fields.contains_key(name));

		primary_key
			.clone()
			.into_iter()
			.chain(self.declared_fields.keys().cloned())
			.chain(
				self.model_fields
					.get_fields()
					.iter()
					.map(|field| field.name.clone())
					.filter(|name| {
						Some(name) != primary_key.as_ref()
							&& !self.declared_fields.contains_key(name)
					}),
			)
			.collect()
	}

	fn resolver<'a>(&'a self, context: &'a SerializerContext) -> FieldResolver<'a> {
		FieldResolver::new(&self.name, &self.meta).with_action(context.action())
	}

	/// Resolve field names for `context`
	pub fn field_names(&self, context: &SerializerContext) -> ConfigResult<Vec<String>> {
		self.resolver(context)
			.resolve_field_names(&self.declared_field_names(), &self.default_field_names())
	}

	/// Resolve per-field keyword options for `context`
	pub fn extra_kwargs(&self, context: &SerializerContext) -> ConfigResult<crate::ExtraKwargs> {
		self.resolver(context).resolve_extra_kwargs()
	}

	/// Resolve field names and options for `context`
	pub fn resolve(&self, context: &SerializerContext) -> ConfigResult<ResolvedConfig> {
		self.resolver(context)
			.resolve(&self.declared_field_names(), &self.default_field_names())
	}

	/// Build the field declarations for `context`
	///
	/// # Errors
	///
	/// Fails with the resolver's [`ConfigurationError`]s, or with
	/// [`ConfigurationError::UnknownField`] when a resolved name is neither a
	/// model field nor a declared field.
	pub fn build_fields(&self, context: &SerializerContext) -> ConfigResult<Vec<FieldDeclaration>> {
		let resolved = self.resolve(context)?;

		let fields = resolved
			.fields
			.iter()
			.map(|name| self.build_field(name, &resolved))
			.collect::<ConfigResult<Vec<_>>>()?;

		tracing::debug!(
			serializer = %self.name,
			action = ?context.action(),
			fields = fields.len(),
			"built serializer fields"
		);
		Ok(fields)
	}

	fn build_field(&self, name: &str, resolved: &ResolvedConfig) -> ConfigResult<FieldDeclaration> {
		if let Some(declared) = self.declared_fields.get(name) {
			return Ok(FieldDeclaration {
				name: name.to_string(),
				field_type: declared.field_type.clone(),
				kwargs: declared.kwargs.clone(),
			});
		}

		let model_field =
			self.model_fields
				.get_field(name)
				.ok_or_else(|| ConfigurationError::UnknownField {
					serializer: self.name.clone(),
					field: name.to_string(),
				})?;

		Ok(FieldDeclaration {
			name: name.to_string(),
			field_type: model_field.field_type.clone(),
			kwargs: include_extra_kwargs(model_field.kwargs.clone(), resolved.kwargs_for(name)),
		})
	}

	/// Text representation of the fields built for `context`
	///
	/// ```text
	/// GroupActionSerializer(action='list'):
	///     id = IntegerField(read_only=true)
	///     name = CharField(max_length=150)
	/// ```
	pub fn describe(&self, context: &SerializerContext) -> ConfigResult<String> {
		let fields = self.build_fields(context)?;

		let mut lines = Vec::with_capacity(fields.len() + 1);
		lines.push(match context.action() {
			Some(action) => format!("{}(action='{}'):", self.name, action),
			None => format!("{}():", self.name),
		});
		lines.extend(
			fields
				.iter()
				.map(|field| format!("    {} = {}", field.name, field)),
		);
		Ok(lines.join("\n"))
	}
}

/// Apply resolved extra kwargs on top of the model-derived options
fn include_extra_kwargs(mut kwargs: FieldKwargs, extra: Option<&FieldKwargs>) -> FieldKwargs {
	let Some(extra) = extra else {
		return kwargs;
	};

	if extra.get("read_only") == Some(&Value::Bool(true)) {
		for option in WRITE_OPTIONS {
			kwargs.shift_remove(*option);
		}
	}

	for (option, value) in extra {
		kwargs.insert(option.clone(), value.clone());
	}
	kwargs
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::introspection::ModelFieldInfo;
	use crate::meta::{ActionConfig, kwargs};
	use rstest::{fixture, rstest};
	use serde_json::json;

	#[fixture]
	fn model() -> ModelFields {
		ModelFields::new()
			.field(ModelFieldInfo::new("id", "IntegerField").auto_primary_key())
			.field(
				ModelFieldInfo::new("name", "CharField")
					.kwarg("max_length", 150)
					.kwarg("required", true),
			)
			.field(ModelFieldInfo::new("email", "EmailField").kwarg("max_length", 100))
	}

	#[rstest]
	fn test_default_field_names_put_declared_after_primary_key(model: ModelFields) {
		let serializer = ModelActionSerializer::new(
			"UserSerializer",
			ActionSerializerMeta::new().all_fields(),
			model,
		)
		.with_declared_field("display", "SerializerMethodField", kwargs([("read_only", true)]));

		assert_eq!(
			serializer.default_field_names(),
			vec!["id", "display", "name", "email"]
		);
	}

	#[rstest]
	fn test_declared_field_shadows_model_field(model: ModelFields) {
		let serializer = ModelActionSerializer::new(
			"UserSerializer",
			ActionSerializerMeta::new().all_fields(),
			model,
		)
		.with_declared_field("email", "CharField", FieldKwargs::new());

		assert_eq!(serializer.default_field_names(), vec!["id", "email", "name"]);
		let fields = serializer.build_fields(&SerializerContext::new()).unwrap();
		assert_eq!(fields[1].field_type, "CharField");
	}

	#[rstest]
	fn test_read_only_extra_kwargs_drop_write_options(model: ModelFields) {
		let meta = ActionSerializerMeta::new()
			.fields(["id", "name"])
			.read_only_fields(["name"]);
		let serializer = ModelActionSerializer::new("UserSerializer", meta, model);

		let fields = serializer.build_fields(&SerializerContext::new()).unwrap();

		assert_eq!(fields[1].name, "name");
		assert_eq!(
			serde_json::to_value(&fields[1].kwargs).unwrap(),
			json!({"read_only": true})
		);
	}

	#[rstest]
	fn test_extra_kwargs_do_not_apply_to_declared_fields(model: ModelFields) {
		let meta = ActionSerializerMeta::new()
			.fields(["id", "display"])
			.extra_kwargs("display", kwargs([("required", false)]));
		let serializer = ModelActionSerializer::new("UserSerializer", meta, model)
			.with_declared_field("display", "SerializerMethodField", kwargs([("read_only", true)]));

		let fields = serializer.build_fields(&SerializerContext::new()).unwrap();

		assert_eq!(fields[1].kwargs, kwargs([("read_only", true)]));
	}

	#[rstest]
	fn test_unknown_field_rejected(model: ModelFields) {
		let meta = ActionSerializerMeta::new().fields(["id", "method"]);
		let serializer = ModelActionSerializer::new("UserSerializer", meta, model);

		let error = serializer
			.build_fields(&SerializerContext::new())
			.unwrap_err();

		assert!(matches!(error, ConfigurationError::UnknownField { .. }));
	}

	#[rstest]
	fn test_describe_renders_sorted_kwargs(model: ModelFields) {
		let meta = ActionSerializerMeta::new()
			.fields(["name"])
			.action(
				"update",
				ActionConfig::new().extra_kwargs("name", kwargs([("required", false)])),
			);
		let serializer = ModelActionSerializer::new("UserSerializer", meta, model);

		let update = serializer
			.describe(&SerializerContext::new().with_action("update"))
			.unwrap();
		let plain = serializer.describe(&SerializerContext::new()).unwrap();

		assert_eq!(
			update,
			"UserSerializer(action='update'):\n    name = CharField(max_length=150, required=false)"
		);
		assert_eq!(
			plain,
			"UserSerializer():\n    name = CharField(max_length=150, required=true)"
		);
	}

	#[rstest]
	fn test_field_declaration_display_quotes_strings() {
		let field = FieldDeclaration {
			name: "slug".to_string(),
			field_type: "SlugField".to_string(),
			kwargs: kwargs([("help_text", "URL slug")]),
		};

		assert_eq!(field.to_string(), "SlugField(help_text=\"URL slug\")");
	}
}
