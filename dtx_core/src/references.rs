use serde_json::Value;

use crate::tokens::is_token_node;
use crate::tokens::node_at_path;
use crate::tokens::value_key;

/// A single `{dotted.path}` reference expression extracted from a token
/// value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
	/// The text between the braces, with surrounding whitespace trimmed.
	pub raw: String,
	/// `raw` split on `.` into path segments.
	pub segments: Vec<String>,
}

impl Reference {
	pub(crate) fn parse(inner: &str) -> Self {
		let raw = inner.trim().to_string();
		let segments = raw.split('.').map(ToString::to_string).collect();
		Self { raw, segments }
	}
}

/// Whether a value contains at least one reference expression, anywhere in
/// its structure.
///
/// Non-string scalars are never references; objects and arrays are searched
/// recursively. Pure: the value is never mutated.
pub fn uses_references(value: &Value) -> bool {
	match value {
		Value::String(text) => string_uses_references(text),
		Value::Object(map) => map.values().any(uses_references),
		Value::Array(items) => items.iter().any(uses_references),
		_ => false,
	}
}

fn string_uses_references(text: &str) -> bool {
	text.find('{').is_some_and(|open| text[open..].contains('}'))
}

/// Extract every reference expression from a string, in order of
/// appearance.
pub fn find_references(text: &str) -> Vec<Reference> {
	let mut references = Vec::new();
	let mut rest = text;

	while let Some(open) = rest.find('{') {
		let Some(close) = rest[open..].find('}') else {
			break;
		};
		references.push(Reference::parse(&rest[open + 1..open + close]));
		rest = &rest[open + close + 1..];
	}

	references
}

/// Collect every reference expression contained anywhere inside a value.
pub fn references_in_value(value: &Value) -> Vec<Reference> {
	let mut references = Vec::new();
	collect_references(value, &mut references);
	references
}

fn collect_references(value: &Value, references: &mut Vec<Reference>) {
	match value {
		Value::String(text) => references.extend(find_references(text)),
		Value::Object(map) => {
			for child in map.values() {
				collect_references(child, references);
			}
		}
		Value::Array(items) => {
			for item in items {
				collect_references(item, references);
			}
		}
		_ => {}
	}
}

/// Resolve a reference path to the canonical path of the token it
/// designates.
///
/// The path is looked up whole first. Only when the whole path does not
/// land on a token node and the final segment is exactly the convention's
/// value key (`value`, or `$value` under DTCG) is that one trailing segment
/// stripped and the lookup retried. Stripping is segment-anchored, so a
/// segment merely containing the word `value` (such as `value_chain`) is
/// never stripped.
pub fn canonical_token_path(
	tree: &Value,
	reference: &Reference,
	uses_dtcg: bool,
) -> Option<Vec<String>> {
	let segments = &reference.segments;
	if node_at_path(tree, segments).is_some_and(|node| is_token_node(node, uses_dtcg)) {
		return Some(segments.clone());
	}

	let (last, prefix) = segments.split_last()?;
	if last == value_key(uses_dtcg)
		&& node_at_path(tree, prefix).is_some_and(|node| is_token_node(node, uses_dtcg))
	{
		return Some(prefix.to_vec());
	}

	None
}
