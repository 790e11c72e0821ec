//! # Reinhardt Action Serializer
//!
//! Per-action field configuration for Reinhardt model serializers, in the
//! spirit of Django REST Framework viewset actions.
//!
//! A serializer meta declares its base `fields` (or `exclude`),
//! `extra_kwargs` and `read_only_fields`, plus an `action_fields` table. When a
//! viewset builds the serializer for an action listed in that table, the
//! action's `fields`/`exclude` and `extra_kwargs` replace the base ones.
//! `read_only_fields` applies to every action.
//!
//! ## Feature Flags
//!
//! - `conf` (default) - Load serializer metas from TOML/JSON and keep them in a [`MetaRegistry`]
//!
//! ## Quick Example
//!
//! ```rust
//! use reinhardt_action_serializer::prelude::*;
//!
//! let model = ModelFields::new()
//!     .field(ModelFieldInfo::new("id", "IntegerField").auto_primary_key())
//!     .field(ModelFieldInfo::new("name", "CharField").kwarg("max_length", 150))
//!     .field(ModelFieldInfo::new("permissions", "PrimaryKeyRelatedField").kwarg("many", true));
//!
//! let meta = ActionSerializerMeta::new()
//!     .model("auth.Group")
//!     .fields(["id", "name", "permissions"])
//!     .action("list", ActionConfig::new().fields(["id", "name"]));
//!
//! let serializer = ModelActionSerializer::new("GroupActionSerializer", meta, model);
//! let names = serializer
//!     .field_names(&SerializerContext::from(ActionType::List))
//!     .unwrap();
//! assert_eq!(names, vec!["id", "name"]);
//! ```

#[cfg(feature = "conf")]
pub mod conf;
pub mod serializers;

pub use reinhardt_action_serializers::{
	ActionConfig, ActionSerializerMeta, ActionType, ConfigResult, ConfigurationError, ErrorKind,
	FieldResolver, ModelActionSerializer, ResolvedConfig, SerializerContext,
};

#[cfg(feature = "conf")]
pub use reinhardt_action_serializers_conf::{MetaRegistry, MetaSource, SourceError};

/// Prelude module for convenient imports
pub mod prelude {
	pub use crate::{
		ActionConfig, ActionSerializerMeta, ActionType, ConfigurationError, FieldResolver,
		ModelActionSerializer, SerializerContext,
	};
	pub use reinhardt_action_serializers::introspection::{ModelFieldInfo, ModelFields};
	pub use reinhardt_action_serializers::meta::kwargs;

	#[cfg(feature = "conf")]
	pub use crate::MetaRegistry;
}
