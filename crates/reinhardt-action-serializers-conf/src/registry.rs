//! Registry of validated serializer metas

use crate::sources::{MetaSource, SourceError};
use indexmap::IndexMap;
use reinhardt_action_serializers::{
	ActionSerializerMeta, ConfigResult, ModelActionSerializer, ModelFields,
};
use std::sync::Arc;

/// Validated serializer metas keyed by serializer name
///
/// Metas are stored behind [`Arc`] so every serializer built from the
/// registry shares the same immutable configuration.
///
/// # Examples
///
/// ```
/// use reinhardt_action_serializers::{ActionConfig, ActionSerializerMeta};
/// use reinhardt_action_serializers_conf::MetaRegistry;
///
/// let mut registry = MetaRegistry::new();
/// registry
///     .register(
///         "GroupActionSerializer",
///         ActionSerializerMeta::new()
///             .fields(["id", "name", "permissions"])
///             .action("list", ActionConfig::new().fields(["id", "name"])),
///     )
///     .unwrap();
///
/// assert!(registry.get("GroupActionSerializer").is_some());
/// assert!(registry.register("Broken", ActionSerializerMeta::new()).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MetaRegistry {
	metas: IndexMap<String, Arc<ActionSerializerMeta>>,
}

impl MetaRegistry {
	/// Create an empty registry
	pub fn new() -> Self {
		Self::default()
	}

	/// Validate and register a meta, replacing any meta with the same name
	pub fn register(
		&mut self,
		serializer: impl Into<String>,
		meta: ActionSerializerMeta,
	) -> ConfigResult<()> {
		let serializer = serializer.into();
		meta.validate(&serializer)?;
		self.insert(serializer, meta);
		Ok(())
	}

	/// Load every meta from `source`
	///
	/// Later sources override earlier ones entry by entry. Nothing is
	/// registered if the source fails.
	pub fn load_from(&mut self, source: &dyn MetaSource) -> Result<usize, SourceError> {
		let metas = source.load()?;
		let count = metas.len();
		for (serializer, meta) in metas {
			self.insert(serializer, meta);
		}
		tracing::debug!(source = %source.description(), count, "registered serializer metas");
		Ok(count)
	}

	fn insert(&mut self, serializer: String, meta: ActionSerializerMeta) {
		if self.metas.contains_key(&serializer) {
			tracing::warn!(serializer = %serializer, "replacing registered serializer meta");
		}
		self.metas.insert(serializer, Arc::new(meta));
	}

	/// Meta registered for `serializer`
	pub fn get(&self, serializer: &str) -> Option<&ActionSerializerMeta> {
		self.metas.get(serializer).map(Arc::as_ref)
	}

	/// Registered serializer names in registration order
	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.metas.keys().map(String::as_str)
	}

	pub fn len(&self) -> usize {
		self.metas.len()
	}

	pub fn is_empty(&self) -> bool {
		self.metas.is_empty()
	}

	/// Build a serializer from the meta registered for `serializer`
	pub fn serializer(
		&self,
		serializer: &str,
		model_fields: ModelFields,
	) -> Option<ModelActionSerializer> {
		self.metas
			.get(serializer)
			.map(|meta| ModelActionSerializer::new(serializer, Arc::clone(meta), model_fields))
	}
}
