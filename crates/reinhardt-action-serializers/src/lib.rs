//! Action-aware model serializers for Reinhardt
//!
//! A single serializer often needs a lighter field set for `list` than for
//! `retrieve`, or different options for `create` than for `update`. This crate
//! adds an `action_fields` table to the serializer meta: for each action it may
//! replace `fields`/`exclude` and `extra_kwargs`, while `read_only_fields`
//! always applies.
//!
//! ```
//! use reinhardt_action_serializers::meta::{ActionConfig, ActionSerializerMeta, kwargs};
//! use reinhardt_action_serializers::FieldResolver;
//!
//! let meta = ActionSerializerMeta::new()
//!     .fields(["char_field"])
//!     .action(
//!         "list",
//!         ActionConfig::new()
//!             .fields(["auto_field", "char_field"])
//!             .extra_kwargs("auto_field", kwargs([("required", false)])),
//!     );
//!
//! let resolver = FieldResolver::new("TestSerializer", &meta).with_action(Some("list"));
//! let resolved = resolver.resolve(&[], &[]).unwrap();
//! assert_eq!(resolved.fields, vec!["auto_field", "char_field"]);
//! assert_eq!(resolved.extra_kwargs["auto_field"]["required"], false);
//! ```

pub mod actions;
pub mod context;
pub mod error;
pub mod introspection;
pub mod meta;
pub mod resolver;
pub mod serializer;

pub use actions::ActionType;
pub use context::SerializerContext;
pub use error::{ConfigResult, ConfigurationError, ErrorKind};
pub use introspection::{ModelFieldInfo, ModelFields};
pub use meta::{
	ALL_FIELDS, ActionConfig, ActionSerializerMeta, ExtraKwargs, FieldKwargs, FieldsOption,
	NameList,
};
pub use resolver::{FieldResolver, ResolvedConfig};
pub use serializer::{DeclaredField, FieldDeclaration, ModelActionSerializer};
