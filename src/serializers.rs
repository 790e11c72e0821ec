//! Serializers module.
//!
//! This module provides the action-aware serializer meta, the field resolver
//! and the model serializer glue.
//!
//! # Examples
//!
//! ```rust
//! use reinhardt_action_serializer::serializers::{ActionSerializerMeta, FieldResolver};
//!
//! let meta = ActionSerializerMeta::new().fields(["id"]);
//! let resolver = FieldResolver::new("IdSerializer", &meta);
//! assert_eq!(resolver.resolve_field_names(&[], &[]).unwrap(), vec!["id"]);
//! ```

pub use reinhardt_action_serializers::*;
