//! Configuration module.
//!
//! This module provides TOML/JSON sources for serializer metas and the
//! registry that holds them once validated.
//!
//! # Examples
//!
//! ```rust
//! use reinhardt_action_serializer::conf::{MetaRegistry, TomlStrSource};
//!
//! let mut registry = MetaRegistry::new();
//! registry
//!     .load_from(&TomlStrSource::new("[IdSerializer]\nfields = [\"id\"]\n"))
//!     .unwrap();
//! assert_eq!(registry.len(), 1);
//! ```

pub use reinhardt_action_serializers_conf::*;
