//! Field configuration resolution
//!
//! Given a serializer's [`ActionSerializerMeta`] and the action being served,
//! [`FieldResolver`] computes which field names the host engine should build
//! and which keyword options each of them receives.
//!
//! The resolver only borrows the meta. Every mapping it returns is freshly
//! built, so a meta shared between concurrent constructions is never mutated.

use crate::error::{ConfigResult, ConfigurationError};
use crate::meta::{
	ActionConfig, ActionSerializerMeta, ExtraKwargs, FieldsOption, NameList, check_exclude,
	check_exclusive,
};
use serde_json::Value;

/// Final field selection for one serializer construction
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedConfig {
	/// Field names in the order they are built, without duplicates
	pub fields: Vec<String>,
	/// Keyword options keyed by field name
	pub extra_kwargs: ExtraKwargs,
}

impl ResolvedConfig {
	/// Whether `name` is part of the resolved field list
	pub fn contains(&self, name: &str) -> bool {
		self.fields.iter().any(|field| field == name)
	}

	/// Keyword options resolved for `name`
	pub fn kwargs_for(&self, name: &str) -> Option<&crate::meta::FieldKwargs> {
		self.extra_kwargs.get(name)
	}
}

/// Resolves field names and options for a serializer meta and an action
///
/// # Examples
///
/// ```
/// use reinhardt_action_serializers::meta::{ActionConfig, ActionSerializerMeta};
/// use reinhardt_action_serializers::FieldResolver;
///
/// let meta = ActionSerializerMeta::new()
///     .fields(["char_field"])
///     .action("list", ActionConfig::new().fields(["auto_field", "char_field"]));
/// let defaults: Vec<String> = vec!["auto_field".into(), "char_field".into()];
///
/// let list = FieldResolver::new("TestSerializer", &meta).with_action(Some("list"));
/// assert_eq!(list.resolve_field_names(&[], &defaults).unwrap(), vec!["auto_field", "char_field"]);
///
/// let create = FieldResolver::new("TestSerializer", &meta).with_action(Some("create"));
/// assert_eq!(create.resolve_field_names(&[], &defaults).unwrap(), vec!["char_field"]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FieldResolver<'a> {
	serializer: &'a str,
	meta: &'a ActionSerializerMeta,
	action: Option<&'a str>,
}

impl<'a> FieldResolver<'a> {
	/// Create a resolver with no current action
	pub fn new(serializer: &'a str, meta: &'a ActionSerializerMeta) -> Self {
		Self {
			serializer,
			meta,
			action: None,
		}
	}

	/// Set the action being served
	pub fn with_action(mut self, action: Option<&'a str>) -> Self {
		self.action = action;
		self
	}

	/// Override registered for the current action, if any
	pub fn action_config(&self) -> Option<&'a ActionConfig> {
		let action = self.action?;
		self.meta.action_config(action)
	}

	/// Resolve both the field names and their keyword options
	pub fn resolve(
		&self,
		declared_field_names: &[String],
		default_field_names: &[String],
	) -> ConfigResult<ResolvedConfig> {
		Ok(ResolvedConfig {
			fields: self.resolve_field_names(declared_field_names, default_field_names)?,
			extra_kwargs: self.resolve_extra_kwargs()?,
		})
	}

	/// Compute the list of field names to build
	///
	/// `declared_field_names` are the fields declared explicitly on the
	/// serializer; they may not be excluded. `default_field_names` is the
	/// full set the host engine would build with no configuration.
	///
	/// # Errors
	///
	/// The base `fields` and `exclude` shapes are checked on every call, even
	/// when an action override supplies the names in use.
	///
	/// Returns a [`ConfigurationError`] when `fields` or `exclude` has the
	/// wrong shape, when both or neither are set, when `fields` repeats a
	/// name, or when `exclude` names a declared or unknown field.
	pub fn resolve_field_names(
		&self,
		declared_field_names: &[String],
		default_field_names: &[String],
	) -> ConfigResult<Vec<String>> {
		// Base shapes are checked whatever the action.
		if let Some(fields) = self.meta.fields_option() {
			fields.check(self.serializer)?;
		}
		if let Some(exclude) = self.meta.exclude_option() {
			check_exclude(exclude, self.serializer)?;
		}

		let (fields, exclude) = match self
			.action_config()
			.filter(|config| config.overrides_field_names())
		{
			Some(config) => {
				tracing::debug!(
					serializer = self.serializer,
					action = ?self.action,
					"using action override for field names"
				);
				(config.fields_option(), config.exclude_option())
			}
			None => {
				tracing::trace!(
					serializer = self.serializer,
					action = ?self.action,
					"using base meta for field names"
				);
				(self.meta.fields_option(), self.meta.exclude_option())
			}
		};

		if let Some(fields) = fields {
			fields.check(self.serializer)?;
		}
		if let Some(exclude) = exclude {
			check_exclude(exclude, self.serializer)?;
		}
		check_exclusive(fields, exclude, self.serializer)?;

		if let Some(FieldsOption::Names(names)) = fields {
			self.check_duplicates(names)?;
			return Ok(names.clone());
		}

		let mut fields = default_field_names.to_vec();

		if let Some(NameList::Names(exclude)) = exclude {
			for field_name in exclude {
				if declared_field_names.contains(field_name) {
					return Err(ConfigurationError::ExcludeDeclaredField {
						serializer: self.serializer.to_string(),
						field: field_name.clone(),
					});
				}

				let position = fields
					.iter()
					.position(|name| name == field_name)
					.ok_or_else(|| ConfigurationError::ExcludeUnknownField {
						serializer: self.serializer.to_string(),
						field: field_name.clone(),
					})?;
				fields.remove(position);
				tracing::trace!(serializer = self.serializer, field = %field_name, "excluded field");
			}
		}

		Ok(fields)
	}

	/// Compute the keyword options for each field
	///
	/// Extra kwargs of the current action's override replace the base ones
	/// entirely. `read_only_fields` always comes from the base meta and is
	/// merged in afterwards.
	///
	/// # Errors
	///
	/// Returns a [`ConfigurationError`] when `read_only_fields` has the wrong
	/// shape, or when it is absent but the misspelled `readonly_fields` is set.
	pub fn resolve_extra_kwargs(&self) -> ConfigResult<ExtraKwargs> {
		let mut extra_kwargs = match self
			.action_config()
			.and_then(ActionConfig::extra_kwargs_option)
		{
			Some(action_kwargs) => {
				tracing::debug!(
					serializer = self.serializer,
					action = ?self.action,
					"using action override for extra kwargs"
				);
				action_kwargs.clone()
			}
			None => self.meta.extra_kwargs_map().clone(),
		};

		for field_name in self.meta.check_read_only_fields(self.serializer)? {
			extra_kwargs
				.entry(field_name.clone())
				.or_default()
				.insert("read_only".to_string(), Value::Bool(true));
		}

		Ok(extra_kwargs)
	}

	fn check_duplicates(&self, names: &[String]) -> ConfigResult<()> {
		for (index, name) in names.iter().enumerate() {
			if names[..index].contains(name) {
				return Err(ConfigurationError::DuplicateField {
					serializer: self.serializer.to_string(),
					field: name.clone(),
				});
			}
		}
		Ok(())
	}
}
