use std::fmt;

/// ViewSet action a serializer is being constructed for
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ActionType {
	List,
	Retrieve,
	Create,
	Update,
	PartialUpdate,
	Destroy,
	Custom(String),
}

impl ActionType {
	/// The action name used as a key in `action_fields`
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_action_serializers::ActionType;
	///
	/// assert_eq!(ActionType::PartialUpdate.as_str(), "partial_update");
	/// assert_eq!(ActionType::Custom("publish".to_string()).as_str(), "publish");
	/// ```
	pub fn as_str(&self) -> &str {
		match self {
			Self::List => "list",
			Self::Retrieve => "retrieve",
			Self::Create => "create",
			Self::Update => "update",
			Self::PartialUpdate => "partial_update",
			Self::Destroy => "destroy",
			Self::Custom(name) => name,
		}
	}

	/// Whether this action operates on a single object
	pub fn is_detail(&self) -> bool {
		matches!(
			self,
			Self::Retrieve | Self::Update | Self::PartialUpdate | Self::Destroy
		)
	}
}

impl From<&str> for ActionType {
	/// Maps standard action names to their variant; anything else is custom
	fn from(name: &str) -> Self {
		match name {
			"list" => Self::List,
			"retrieve" => Self::Retrieve,
			"create" => Self::Create,
			"update" => Self::Update,
			"partial_update" => Self::PartialUpdate,
			"destroy" => Self::Destroy,
			custom_name => Self::Custom(custom_name.to_string()),
		}
	}
}

impl From<String> for ActionType {
	fn from(name: String) -> Self {
		Self::from(name.as_str())
	}
}

impl fmt::Display for ActionType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
