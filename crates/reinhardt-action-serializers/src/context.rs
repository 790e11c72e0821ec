//! Serializer construction context
//!
//! The host view hands a [`SerializerContext`] to the serializer it builds.
//! The only thing field resolution needs from it is the current action.

use crate::actions::ActionType;

/// Context passed to a serializer at construction time
///
/// A context without an action (or no context at all) means no action
/// override applies and the base meta governs.
///
/// # Examples
///
/// ```
/// use reinhardt_action_serializers::{ActionType, SerializerContext};
///
/// let context = SerializerContext::new().with_action(ActionType::List);
/// assert_eq!(context.action(), Some("list"));
///
/// assert_eq!(SerializerContext::new().action(), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SerializerContext {
	action: Option<ActionType>,
}

impl SerializerContext {
	/// Create a context with no current action
	pub fn new() -> Self {
		Self::default()
	}

	/// Set the action being served
	pub fn with_action(mut self, action: impl Into<ActionType>) -> Self {
		self.action = Some(action.into());
		self
	}

	/// Name of the action being served, if any
	pub fn action(&self) -> Option<&str> {
		self.action.as_ref().map(ActionType::as_str)
	}

	/// The action being served, if any
	pub fn action_type(&self) -> Option<&ActionType> {
		self.action.as_ref()
	}
}

impl From<ActionType> for SerializerContext {
	fn from(action: ActionType) -> Self {
		Self::new().with_action(action)
	}
}
