//! Meta configuration for action serializers
//!
//! This module provides the Django REST Framework-style `Meta` options of a
//! model serializer (`fields`, `exclude`, `extra_kwargs`, `read_only_fields`)
//! together with `action_fields`, a per-action override table.
//!
//! A meta is declared once per serializer type, either with the builder or by
//! deserializing TOML/JSON, and is only ever read afterwards.

use crate::error::{ConfigResult, ConfigurationError};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Sentinel value of the `fields` option meaning "every available field"
pub const ALL_FIELDS: &str = "__all__";

/// Keyword options for one field (`{"read_only": true, "max_length": 100}`)
pub type FieldKwargs = IndexMap<String, Value>;

/// Keyword options keyed by field name
pub type ExtraKwargs = IndexMap<String, FieldKwargs>;

/// Build a [`FieldKwargs`] from `(option, value)` pairs
///
/// # Examples
///
/// ```
/// use reinhardt_action_serializers::meta::kwargs;
///
/// let options = kwargs([("required", false), ("read_only", false)]);
/// assert_eq!(options["required"], false);
/// ```
pub fn kwargs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> FieldKwargs
where
	K: Into<String>,
	V: Into<Value>,
{
	pairs
		.into_iter()
		.map(|(key, value)| (key.into(), value.into()))
		.collect()
}

/// Shape of a name option as written by the author: one string or a list
#[derive(Deserialize)]
#[serde(untagged)]
enum RawNames {
	One(String),
	Many(Vec<String>),
}

/// Value of the `fields` option
///
/// `Bare` keeps a single non-sentinel string representable so that the
/// classic `fields = "name"` mistake is rejected instead of being read as a
/// one-element list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldsOption {
	All,
	Names(Vec<String>),
	Bare(String),
}

impl FieldsOption {
	/// Whether the option counts as "set" when checking it against `exclude`
	pub fn is_non_empty(&self) -> bool {
		match self {
			Self::All => true,
			Self::Names(names) => !names.is_empty(),
			Self::Bare(name) => !name.is_empty(),
		}
	}

	pub(crate) fn check(&self, serializer: &str) -> ConfigResult<()> {
		match self {
			Self::Bare(_) => Err(ConfigurationError::InvalidFieldsType {
				serializer: serializer.to_string(),
				got: "str".to_string(),
			}),
			Self::All | Self::Names(_) => Ok(()),
		}
	}
}

impl FieldsOption {
	fn from_raw(raw: RawNames) -> Self {
		match raw {
			RawNames::One(name) if name == ALL_FIELDS => Self::All,
			RawNames::One(name) => Self::Bare(name),
			RawNames::Many(names) => Self::Names(names),
		}
	}
}

impl<'de> Deserialize<'de> for FieldsOption {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		RawNames::deserialize(deserializer).map(Self::from_raw)
	}
}

impl Serialize for FieldsOption {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		match self {
			Self::All => serializer.serialize_str(ALL_FIELDS),
			Self::Names(names) => names.serialize(serializer),
			Self::Bare(name) => serializer.serialize_str(name),
		}
	}
}

impl From<&str> for FieldsOption {
	fn from(name: &str) -> Self {
		Self::from_raw(RawNames::One(name.to_string()))
	}
}

impl From<String> for FieldsOption {
	fn from(name: String) -> Self {
		Self::from_raw(RawNames::One(name))
	}
}

impl From<Vec<String>> for FieldsOption {
	fn from(names: Vec<String>) -> Self {
		Self::Names(names)
	}
}

impl From<Vec<&str>> for FieldsOption {
	fn from(names: Vec<&str>) -> Self {
		Self::Names(names.into_iter().map(str::to_string).collect())
	}
}

impl From<&[&str]> for FieldsOption {
	fn from(names: &[&str]) -> Self {
		Self::Names(names.iter().map(|name| name.to_string()).collect())
	}
}

impl<const N: usize> From<[&str; N]> for FieldsOption {
	fn from(names: [&str; N]) -> Self {
		Self::Names(names.iter().map(|name| name.to_string()).collect())
	}
}

/// Value of the `exclude` and `read_only_fields` options
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameList {
	Names(Vec<String>),
	Bare(String),
}

impl NameList {
	/// Whether the list counts as "set" when checking it against `fields`
	pub fn is_non_empty(&self) -> bool {
		match self {
			Self::Names(names) => !names.is_empty(),
			Self::Bare(name) => !name.is_empty(),
		}
	}

	/// The listed names, or `None` for a bare string
	pub fn names(&self) -> Option<&[String]> {
		match self {
			Self::Names(names) => Some(names.as_slice()),
			Self::Bare(_) => None,
		}
	}
}

impl<'de> Deserialize<'de> for NameList {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		Ok(match RawNames::deserialize(deserializer)? {
			RawNames::One(name) => Self::Bare(name),
			RawNames::Many(names) => Self::Names(names),
		})
	}
}

impl Serialize for NameList {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		match self {
			Self::Names(names) => names.serialize(serializer),
			Self::Bare(name) => serializer.serialize_str(name),
		}
	}
}

impl From<&str> for NameList {
	fn from(name: &str) -> Self {
		Self::Bare(name.to_string())
	}
}

impl From<String> for NameList {
	fn from(name: String) -> Self {
		Self::Bare(name)
	}
}

impl From<Vec<String>> for NameList {
	fn from(names: Vec<String>) -> Self {
		Self::Names(names)
	}
}

impl From<Vec<&str>> for NameList {
	fn from(names: Vec<&str>) -> Self {
		Self::Names(names.into_iter().map(str::to_string).collect())
	}
}

impl From<&[&str]> for NameList {
	fn from(names: &[&str]) -> Self {
		Self::Names(names.iter().map(|name| name.to_string()).collect())
	}
}

impl<const N: usize> From<[&str; N]> for NameList {
	fn from(names: [&str; N]) -> Self {
		Self::Names(names.iter().map(|name| name.to_string()).collect())
	}
}

pub(crate) fn check_exclude(exclude: &NameList, serializer: &str) -> ConfigResult<()> {
	match exclude {
		NameList::Bare(_) => Err(ConfigurationError::InvalidExcludeType {
			serializer: serializer.to_string(),
			got: "str".to_string(),
		}),
		NameList::Names(_) => Ok(()),
	}
}

/// Checks that `fields` and `exclude` are not both set and not both absent
pub(crate) fn check_exclusive(
	fields: Option<&FieldsOption>,
	exclude: Option<&NameList>,
	serializer: &str,
) -> ConfigResult<()> {
	if fields.is_some_and(FieldsOption::is_non_empty) && exclude.is_some_and(NameList::is_non_empty)
	{
		return Err(ConfigurationError::FieldsAndExclude {
			serializer: serializer.to_string(),
		});
	}

	if fields.is_none() && exclude.is_none() {
		return Err(ConfigurationError::MissingFieldsAndExclude {
			serializer: serializer.to_string(),
		});
	}

	Ok(())
}

/// Partial configuration applied while one action is being served
///
/// # Examples
///
/// ```
/// use reinhardt_action_serializers::meta::{ActionConfig, FieldsOption};
///
/// let config = ActionConfig::new().fields(["id", "name"]);
/// assert!(config.overrides_field_names());
/// assert_eq!(
///     config.fields_option(),
///     Some(&FieldsOption::Names(vec!["id".to_string(), "name".to_string()]))
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ActionConfig {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	fields: Option<FieldsOption>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	exclude: Option<NameList>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	extra_kwargs: Option<ExtraKwargs>,
}

impl ActionConfig {
	/// Create an empty action override
	pub fn new() -> Self {
		Self::default()
	}

	/// Fields used instead of the base `fields`/`exclude`
	pub fn fields(mut self, fields: impl Into<FieldsOption>) -> Self {
		self.fields = Some(fields.into());
		self
	}

	/// Fields removed from the default set instead of the base `fields`/`exclude`
	pub fn exclude(mut self, exclude: impl Into<NameList>) -> Self {
		self.exclude = Some(exclude.into());
		self
	}

	/// Add keyword options for one field
	///
	/// Once any extra kwargs are set on an action, they replace the base
	/// `extra_kwargs` entirely for that action.
	pub fn extra_kwargs(mut self, field: impl Into<String>, options: FieldKwargs) -> Self {
		self.extra_kwargs
			.get_or_insert_with(IndexMap::new)
			.insert(field.into(), options);
		self
	}

	/// The `fields` override
	pub fn fields_option(&self) -> Option<&FieldsOption> {
		self.fields.as_ref()
	}

	/// The `exclude` override
	pub fn exclude_option(&self) -> Option<&NameList> {
		self.exclude.as_ref()
	}

	/// The `extra_kwargs` override, if this action defines one
	pub fn extra_kwargs_option(&self) -> Option<&ExtraKwargs> {
		self.extra_kwargs.as_ref()
	}

	/// Whether this override replaces the base field-name selection
	pub fn overrides_field_names(&self) -> bool {
		self.fields.as_ref().is_some_and(FieldsOption::is_non_empty)
			|| self.exclude.as_ref().is_some_and(NameList::is_non_empty)
	}

	fn validate(&self, serializer: &str) -> ConfigResult<()> {
		if let Some(fields) = &self.fields {
			fields.check(serializer)?;
		}
		if let Some(exclude) = &self.exclude {
			check_exclude(exclude, serializer)?;
		}
		if self.fields.as_ref().is_some_and(FieldsOption::is_non_empty)
			&& self.exclude.as_ref().is_some_and(NameList::is_non_empty)
		{
			return Err(ConfigurationError::FieldsAndExclude {
				serializer: serializer.to_string(),
			});
		}
		Ok(())
	}
}

/// Meta configuration of an action serializer
///
/// # Examples
///
/// ```
/// use reinhardt_action_serializers::meta::{ActionConfig, ActionSerializerMeta};
///
/// let meta = ActionSerializerMeta::new()
///     .model("auth.Group")
///     .fields(["id", "name", "permissions"])
///     .action("list", ActionConfig::new().fields(["id", "name"]));
///
/// assert!(meta.validate("GroupActionSerializer").is_ok());
/// assert!(meta.action_config("list").is_some());
/// assert!(meta.action_config("create").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ActionSerializerMeta {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	model: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	fields: Option<FieldsOption>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	exclude: Option<NameList>,
	#[serde(default, skip_serializing_if = "IndexMap::is_empty")]
	extra_kwargs: ExtraKwargs,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	read_only_fields: Option<NameList>,
	/// Misspelling used by the Django admin; only kept so it can be rejected
	#[serde(default, skip_serializing_if = "Option::is_none")]
	readonly_fields: Option<Value>,
	#[serde(default, skip_serializing_if = "IndexMap::is_empty")]
	action_fields: IndexMap<String, ActionConfig>,
}

impl ActionSerializerMeta {
	/// Create an empty meta configuration
	pub fn new() -> Self {
		Self::default()
	}

	/// Label of the model this serializer is built for
	pub fn model(mut self, model: impl Into<String>) -> Self {
		self.model = Some(model.into());
		self
	}

	/// Specify which fields to include
	pub fn fields(mut self, fields: impl Into<FieldsOption>) -> Self {
		self.fields = Some(fields.into());
		self
	}

	/// Include every available field
	pub fn all_fields(mut self) -> Self {
		self.fields = Some(FieldsOption::All);
		self
	}

	/// Specify which fields to exclude from the default set
	pub fn exclude(mut self, exclude: impl Into<NameList>) -> Self {
		self.exclude = Some(exclude.into());
		self
	}

	/// Add keyword options for one field
	pub fn extra_kwargs(mut self, field: impl Into<String>, options: FieldKwargs) -> Self {
		self.extra_kwargs.insert(field.into(), options);
		self
	}

	/// Specify which fields are read-only for every action
	pub fn read_only_fields(mut self, fields: impl Into<NameList>) -> Self {
		self.read_only_fields = Some(fields.into());
		self
	}

	/// Register the override used while `action` is being served
	pub fn action(mut self, action: impl Into<String>, config: ActionConfig) -> Self {
		self.action_fields.insert(action.into(), config);
		self
	}

	pub fn model_label(&self) -> Option<&str> {
		self.model.as_deref()
	}

	pub fn fields_option(&self) -> Option<&FieldsOption> {
		self.fields.as_ref()
	}

	pub fn exclude_option(&self) -> Option<&NameList> {
		self.exclude.as_ref()
	}

	pub fn extra_kwargs_map(&self) -> &ExtraKwargs {
		&self.extra_kwargs
	}

	pub fn read_only_fields_option(&self) -> Option<&NameList> {
		self.read_only_fields.as_ref()
	}

	/// Whether the misspelled `readonly_fields` option was declared
	pub fn has_misspelled_read_only_fields(&self) -> bool {
		self.readonly_fields.is_some()
	}

	/// All action overrides in declaration order
	pub fn action_fields(&self) -> &IndexMap<String, ActionConfig> {
		&self.action_fields
	}

	/// Override registered for `action`
	pub fn action_config(&self, action: &str) -> Option<&ActionConfig> {
		self.action_fields.get(action)
	}

	/// Validate the whole configuration
	///
	/// Run once when the meta is loaded or registered so that mistakes fail
	/// at startup rather than on the first request for a given action.
	pub fn validate(&self, serializer: &str) -> ConfigResult<()> {
		if let Some(fields) = &self.fields {
			fields.check(serializer)?;
		}
		if let Some(exclude) = &self.exclude {
			check_exclude(exclude, serializer)?;
		}
		check_exclusive(self.fields.as_ref(), self.exclude.as_ref(), serializer)?;
		self.check_read_only_fields(serializer)?;

		for (action, config) in &self.action_fields {
			tracing::trace!(serializer, action = %action, "validating action override");
			config.validate(serializer)?;
		}
		Ok(())
	}

	/// The `read_only_fields` names, rejecting wrong shapes and the misspelling
	pub(crate) fn check_read_only_fields(&self, serializer: &str) -> ConfigResult<&[String]> {
		match &self.read_only_fields {
			Some(read_only_fields) => read_only_fields.names().ok_or_else(|| {
				ConfigurationError::InvalidReadOnlyFieldsType {
					serializer: serializer.to_string(),
					got: "str".to_string(),
				}
			}),
			None if self.readonly_fields.is_some() => {
				Err(ConfigurationError::MisspelledReadOnlyFields {
					serializer: serializer.to_string(),
				})
			}
			None => Ok(&[][..]),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::ErrorKind;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_name_list_names() {
		let names = NameList::from(["id", "name"]);
		assert_eq!(names.names(), Some(&["id".to_string(), "name".to_string()][..]));
		assert_eq!(NameList::from("id").names(), None);
	}

	#[rstest]
	#[case("__all__", FieldsOption::All)]
	#[case("char_field", FieldsOption::Bare("char_field".to_string()))]
	fn test_fields_option_from_str(#[case] input: &str, #[case] expected: FieldsOption) {
		assert_eq!(FieldsOption::from(input), expected);
	}

	#[rstest]
	fn test_fields_option_deserialize() {
		let all: FieldsOption = serde_json::from_value(json!("__all__")).unwrap();
		let names: FieldsOption = serde_json::from_value(json!(["a", "b"])).unwrap();
		let bare: FieldsOption = serde_json::from_value(json!("a")).unwrap();

		assert_eq!(all, FieldsOption::All);
		assert_eq!(
			names,
			FieldsOption::Names(vec!["a".to_string(), "b".to_string()])
		);
		assert_eq!(bare, FieldsOption::Bare("a".to_string()));
		assert!(serde_json::from_value::<FieldsOption>(json!(42)).is_err());
	}

	#[rstest]
	fn test_fields_option_serializes_back_to_author_shape() {
		assert_eq!(serde_json::to_value(FieldsOption::All).unwrap(), json!("__all__"));
		assert_eq!(
			serde_json::to_value(FieldsOption::from(["id"])).unwrap(),
			json!(["id"])
		);
	}

	#[rstest]
	fn test_validate_accepts_fields_only() {
		let meta = ActionSerializerMeta::new().fields(["char_field"]);
		assert!(meta.validate("TestSerializer").is_ok());
	}

	#[rstest]
	fn test_validate_accepts_all_fields_sentinel() {
		let meta = ActionSerializerMeta::new().all_fields();
		assert!(meta.validate("TestSerializer").is_ok());
	}

	#[rstest]
	fn test_validate_rejects_bare_fields_string() {
		let meta = ActionSerializerMeta::new().fields("char_field");
		let error = meta.validate("TestSerializer").unwrap_err();

		assert_eq!(error.kind(), ErrorKind::Type);
		assert!(matches!(error, ConfigurationError::InvalidFieldsType { .. }));
	}

	#[rstest]
	fn test_validate_rejects_bare_exclude_string() {
		let meta = ActionSerializerMeta::new().exclude("char_field");
		let error = meta.validate("TestSerializer").unwrap_err();

		assert!(matches!(error, ConfigurationError::InvalidExcludeType { .. }));
	}

	#[rstest]
	fn test_validate_rejects_fields_and_exclude() {
		let meta = ActionSerializerMeta::new()
			.fields(["char_field"])
			.exclude(["auto_field"]);
		let error = meta.validate("TestSerializer").unwrap_err();

		assert_eq!(
			error,
			ConfigurationError::FieldsAndExclude {
				serializer: "TestSerializer".to_string()
			}
		);
	}

	#[rstest]
	fn test_validate_rejects_missing_fields_and_exclude() {
		let meta = ActionSerializerMeta::new().model("tests.RegularFieldsModel");
		let error = meta.validate("TestSerializer").unwrap_err();

		assert!(matches!(
			error,
			ConfigurationError::MissingFieldsAndExclude { .. }
		));
		assert_eq!(error.kind(), ErrorKind::Assertion);
	}

	#[rstest]
	fn test_validate_allows_empty_exclude_alongside_fields() {
		let meta = ActionSerializerMeta::new()
			.fields(["char_field"])
			.exclude(Vec::<String>::new());
		assert!(meta.validate("TestSerializer").is_ok());
	}

	#[rstest]
	fn test_validate_rejects_bare_read_only_fields() {
		let meta = ActionSerializerMeta::new()
			.all_fields()
			.read_only_fields("auto_field");
		let error = meta.validate("TestSerializer").unwrap_err();

		assert!(matches!(
			error,
			ConfigurationError::InvalidReadOnlyFieldsType { .. }
		));
	}

	#[rstest]
	fn test_validate_rejects_misspelled_read_only_fields() {
		let meta: ActionSerializerMeta = serde_json::from_value(json!({
			"fields": "__all__",
			"readonly_fields": ["auto_field"],
		}))
		.unwrap();

		assert!(meta.has_misspelled_read_only_fields());
		assert!(matches!(
			meta.validate("TestSerializer").unwrap_err(),
			ConfigurationError::MisspelledReadOnlyFields { .. }
		));
	}

	#[rstest]
	fn test_validate_checks_action_overrides() {
		let meta = ActionSerializerMeta::new()
			.fields(["char_field"])
			.action("list", ActionConfig::new().fields("auto_field"));
		assert!(matches!(
			meta.validate("TestSerializer").unwrap_err(),
			ConfigurationError::InvalidFieldsType { .. }
		));

		let meta = ActionSerializerMeta::new().fields(["char_field"]).action(
			"list",
			ActionConfig::new()
				.fields(["auto_field"])
				.exclude(["char_field"]),
		);
		assert!(matches!(
			meta.validate("TestSerializer").unwrap_err(),
			ConfigurationError::FieldsAndExclude { .. }
		));
	}

	#[rstest]
	fn test_action_config_without_names_does_not_override_field_names() {
		let config = ActionConfig::new().extra_kwargs("auto_field", kwargs([("required", false)]));
		assert!(!config.overrides_field_names());
		assert!(config.extra_kwargs_option().is_some());

		let config = ActionConfig::new().fields(Vec::<String>::new());
		assert!(!config.overrides_field_names());
	}

	#[rstest]
	fn test_deserialize_rejects_unknown_option() {
		let result = serde_json::from_value::<ActionSerializerMeta>(json!({
			"fields": ["id"],
			"feilds": ["id"],
		}));
		assert!(result.is_err());
	}

	#[rstest]
	fn test_deserialize_full_meta() {
		let meta: ActionSerializerMeta = serde_json::from_value(json!({
			"model": "auth.Group",
			"fields": ["id", "name", "permissions"],
			"read_only_fields": ["id"],
			"extra_kwargs": {"name": {"max_length": 150}},
			"action_fields": {
				"list": {"fields": ["id", "name"]},
				"update": {"extra_kwargs": {"name": {"required": false}}},
			},
		}))
		.unwrap();

		assert_eq!(meta.model_label(), Some("auth.Group"));
		assert_eq!(meta.extra_kwargs_map()["name"]["max_length"], json!(150));
		let actions: Vec<&str> = meta.action_fields().keys().map(String::as_str).collect();
		assert_eq!(actions, vec!["list", "update"]);
		assert!(meta.validate("GroupSerializer").is_ok());
	}
}
