//! Property-based tests for field resolution

use proptest::prelude::*;
use proptest::sample::subsequence;
use reinhardt_action_serializers::{ActionConfig, ActionSerializerMeta, FieldResolver};

fn unique_names() -> impl Strategy<Value = Vec<String>> {
	prop::collection::btree_set("[a-z]{1,8}_field", 1..12)
		.prop_map(|names| names.into_iter().collect::<Vec<_>>())
		.prop_shuffle()
}

proptest! {
	/// Explicit `fields` are returned exactly, in order
	#[test]
	fn prop_explicit_fields_returned_verbatim(
		(defaults, fields) in unique_names().prop_flat_map(|defaults| {
			let len = defaults.len();
			(Just(defaults.clone()), subsequence(defaults, 0..=len).prop_shuffle())
		})
	) {
		let meta = ActionSerializerMeta::new().fields(fields.clone());
		let resolver = FieldResolver::new("PropSerializer", &meta).with_action(Some("list"));

		prop_assert_eq!(resolver.resolve_field_names(&[], &defaults).unwrap(), fields);
	}

	/// `exclude` removes exactly the listed names and keeps the default order
	#[test]
	fn prop_exclude_preserves_order(
		(defaults, excluded) in unique_names().prop_flat_map(|defaults| {
			let len = defaults.len();
			(Just(defaults.clone()), subsequence(defaults, 0..=len))
		})
	) {
		let meta = ActionSerializerMeta::new().exclude(excluded.clone());
		let resolver = FieldResolver::new("PropSerializer", &meta);

		let expected: Vec<String> = defaults
			.iter()
			.filter(|name| !excluded.contains(*name))
			.cloned()
			.collect();
		prop_assert_eq!(resolver.resolve_field_names(&[], &defaults).unwrap(), expected);
	}

	/// An override for another action never changes the result
	#[test]
	fn prop_other_action_override_ignored(
		(defaults, fields) in unique_names().prop_flat_map(|defaults| {
			let len = defaults.len();
			(Just(defaults.clone()), subsequence(defaults, 1..=len))
		})
	) {
		let base = ActionSerializerMeta::new().fields(fields.clone());
		let with_override = base
			.clone()
			.action("list", ActionConfig::new().fields(vec![fields[0].clone()]));

		let expected = FieldResolver::new("PropSerializer", &base)
			.with_action(Some("create"))
			.resolve(&[], &defaults)
			.unwrap();
		let actual = FieldResolver::new("PropSerializer", &with_override)
			.with_action(Some("create"))
			.resolve(&[], &defaults)
			.unwrap();
		prop_assert_eq!(actual, expected);
	}
}
