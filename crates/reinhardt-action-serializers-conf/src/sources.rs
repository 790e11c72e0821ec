//! Sources of serializer meta configuration
//!
//! A source yields a table of serializer metas keyed by serializer name:
//!
//! ```toml
//! [GroupActionSerializer]
//! model = "auth.Group"
//! fields = ["id", "name", "permissions"]
//!
//! [GroupActionSerializer.action_fields.list]
//! fields = ["id", "name"]
//! ```
//!
//! Every meta is validated as it is loaded, so configuration mistakes fail at
//! startup instead of on the first request for some action.

use indexmap::IndexMap;
use reinhardt_action_serializers::{ActionSerializerMeta, ConfigurationError};
use std::fs;
use std::path::{Path, PathBuf};

/// Trait for serializer meta sources
pub trait MetaSource: Send + Sync {
	/// Load and validate every serializer meta from this source
	fn load(&self) -> Result<IndexMap<String, ActionSerializerMeta>, SourceError>;

	/// Get a description of this source
	fn description(&self) -> String;
}

/// Error type for serializer meta sources
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
	#[error("IO error reading {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),

	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),

	#[error("Invalid configuration for serializer {serializer}: {source}")]
	Configuration {
		serializer: String,
		#[source]
		source: ConfigurationError,
	},
}

/// Validate every meta of a freshly parsed table
pub(crate) fn validate_all(
	metas: IndexMap<String, ActionSerializerMeta>,
	description: &str,
) -> Result<IndexMap<String, ActionSerializerMeta>, SourceError> {
	for (serializer, meta) in &metas {
		meta.validate(serializer)
			.map_err(|source| SourceError::Configuration {
				serializer: serializer.clone(),
				source,
			})?;
	}
	tracing::debug!(source = description, serializers = metas.len(), "loaded serializer metas");
	Ok(metas)
}

fn read_file(path: &Path) -> Result<String, SourceError> {
	fs::read_to_string(path).map_err(|source| SourceError::Io {
		path: path.to_path_buf(),
		source,
	})
}

/// TOML file containing serializer metas
pub struct TomlFileSource {
	path: PathBuf,
}

impl TomlFileSource {
	/// Create a new TOML file source
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_action_serializers_conf::sources::TomlFileSource;
	///
	/// let source = TomlFileSource::new("serializers.toml");
	/// ```
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}
}

impl MetaSource for TomlFileSource {
	fn load(&self) -> Result<IndexMap<String, ActionSerializerMeta>, SourceError> {
		let content = read_file(&self.path)?;
		validate_all(toml::from_str(&content)?, &self.description())
	}

	fn description(&self) -> String {
		format!("TOML file: {}", self.path.display())
	}
}

/// JSON file containing serializer metas
pub struct JsonFileSource {
	path: PathBuf,
}

impl JsonFileSource {
	/// Create a new JSON file source
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}
}

impl MetaSource for JsonFileSource {
	fn load(&self) -> Result<IndexMap<String, ActionSerializerMeta>, SourceError> {
		let content = read_file(&self.path)?;
		validate_all(serde_json::from_str(&content)?, &self.description())
	}

	fn description(&self) -> String {
		format!("JSON file: {}", self.path.display())
	}
}

/// Inline TOML document, mostly useful for embedding with `include_str!`
pub struct TomlStrSource {
	content: String,
}

impl TomlStrSource {
	pub fn new(content: impl Into<String>) -> Self {
		Self {
			content: content.into(),
		}
	}
}

impl MetaSource for TomlStrSource {
	fn load(&self) -> Result<IndexMap<String, ActionSerializerMeta>, SourceError> {
		validate_all(toml::from_str(&self.content)?, &self.description())
	}

	fn description(&self) -> String {
		"inline TOML".to_string()
	}
}

/// Inline JSON document
pub struct JsonStrSource {
	content: String,
}

impl JsonStrSource {
	pub fn new(content: impl Into<String>) -> Self {
		Self {
			content: content.into(),
		}
	}
}

impl MetaSource for JsonStrSource {
	fn load(&self) -> Result<IndexMap<String, ActionSerializerMeta>, SourceError> {
		validate_all(serde_json::from_str(&self.content)?, &self.description())
	}

	fn description(&self) -> String {
		"inline JSON".to_string()
	}
}
