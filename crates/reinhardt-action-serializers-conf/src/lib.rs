//! Configuration loading for Reinhardt action serializers
//!
//! Serializer metas can be declared in TOML or JSON instead of code. Sources
//! validate every meta while loading and [`MetaRegistry`] keeps the result.

pub mod registry;
pub mod sources;

pub use registry::MetaRegistry;
pub use sources::{
	JsonFileSource, JsonStrSource, MetaSource, SourceError, TomlFileSource, TomlStrSource,
};
