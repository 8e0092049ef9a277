use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;

use crate::DtxError;
use crate::DtxResult;
use crate::references::Reference;
use crate::references::canonical_token_path;
use crate::tokens::node_at_path;
use crate::tokens::node_at_path_mut;
use crate::tokens::token_paths;
use crate::tokens::type_key;
use crate::tokens::value_key;

/// Resolve every reference expression in the token tree into its final
/// literal value.
///
/// Resolution is demand-driven and memoized per dotted path, so the order
/// tokens are visited in never changes the outcome. An explicit
/// "currently resolving" stack detects cycles and yields the exact ordered
/// loop for the error report. The pass is two-phase: all values are
/// resolved into a scratch map first, and only once the whole graph has
/// resolved are the literals published into the tree, so a failure leaves
/// every `value` untouched.
///
/// Each token's pre-resolution `value`/`type` pair is snapshotted into an
/// `original` field before anything else; `original` is never mutated
/// afterwards.
pub fn resolve_references(tree: &mut Value, uses_dtcg: bool) -> DtxResult<()> {
	snapshot_originals(tree, uses_dtcg);

	let paths = token_paths(tree, uses_dtcg);
	debug!(tokens = paths.len(), "resolving token references");

	let mut resolved: HashMap<String, Value> = HashMap::new();
	let mut stack: Vec<String> = Vec::new();

	for path in &paths {
		resolve_token(tree, path, uses_dtcg, &mut resolved, &mut stack)?;
	}

	for path in &paths {
		let dotted = path.join(".");
		let Some(value) = resolved.remove(&dotted) else {
			continue;
		};
		if let Some(map) = node_at_path_mut(tree, path).and_then(Value::as_object_mut) {
			map.insert(value_key(uses_dtcg).to_string(), value);
		}
	}

	Ok(())
}

/// Snapshot each token's authored `value`/`type` into an `original` field,
/// skipping tokens that already carry one.
fn snapshot_originals(node: &mut Value, uses_dtcg: bool) {
	let Some(map) = node.as_object_mut() else {
		return;
	};

	if map.contains_key(value_key(uses_dtcg)) {
		if !map.contains_key("original") {
			let mut snapshot = serde_json::Map::new();
			if let Some(value) = map.get(value_key(uses_dtcg)) {
				snapshot.insert(value_key(uses_dtcg).to_string(), value.clone());
			}
			if let Some(token_type) = map.get(type_key(uses_dtcg)) {
				snapshot.insert(type_key(uses_dtcg).to_string(), token_type.clone());
			}
			map.insert("original".to_string(), Value::Object(snapshot));
		}
		return;
	}

	for child in map.values_mut() {
		snapshot_originals(child, uses_dtcg);
	}
}

fn resolve_token(
	tree: &Value,
	path: &[String],
	uses_dtcg: bool,
	resolved: &mut HashMap<String, Value>,
	stack: &mut Vec<String>,
) -> DtxResult<Value> {
	let dotted = path.join(".");

	if let Some(value) = resolved.get(&dotted) {
		return Ok(value.clone());
	}

	if let Some(position) = stack.iter().position(|entry| entry == &dotted) {
		let mut cycle = stack[position..].to_vec();
		cycle.push(dotted);
		return Err(DtxError::CircularReference { cycle });
	}

	let raw = node_at_path(tree, path)
		.and_then(|node| node.get(value_key(uses_dtcg)))
		.cloned()
		.unwrap_or(Value::Null);

	stack.push(dotted.clone());
	let value = substitute(tree, &raw, &dotted, uses_dtcg, resolved, stack)?;
	stack.pop();

	resolved.insert(dotted, value.clone());
	Ok(value)
}

fn substitute(
	tree: &Value,
	value: &Value,
	owner: &str,
	uses_dtcg: bool,
	resolved: &mut HashMap<String, Value>,
	stack: &mut Vec<String>,
) -> DtxResult<Value> {
	match value {
		Value::String(text) => substitute_string(tree, text, owner, uses_dtcg, resolved, stack),
		Value::Object(map) => {
			let mut output = serde_json::Map::new();
			for (key, child) in map {
				output.insert(
					key.clone(),
					substitute(tree, child, owner, uses_dtcg, resolved, stack)?,
				);
			}
			Ok(Value::Object(output))
		}
		Value::Array(items) => {
			let mut output = Vec::with_capacity(items.len());
			for item in items {
				output.push(substitute(tree, item, owner, uses_dtcg, resolved, stack)?);
			}
			Ok(Value::Array(output))
		}
		other => Ok(other.clone()),
	}
}

fn substitute_string(
	tree: &Value,
	text: &str,
	owner: &str,
	uses_dtcg: bool,
	resolved: &mut HashMap<String, Value>,
	stack: &mut Vec<String>,
) -> DtxResult<Value> {
	// A string that is exactly one reference takes the referenced token's
	// resolved value wholesale, preserving its type.
	if let Some(reference) = sole_reference(text) {
		let target = target_path(tree, &reference, owner, uses_dtcg)?;
		return resolve_token(tree, &target, uses_dtcg, resolved, stack);
	}

	let mut output = String::new();
	let mut rest = text;

	while let Some(open) = rest.find('{') {
		let Some(close) = rest[open..].find('}') else {
			break;
		};
		output.push_str(&rest[..open]);
		let reference = Reference::parse(&rest[open + 1..open + close]);
		let target = target_path(tree, &reference, owner, uses_dtcg)?;
		let value = resolve_token(tree, &target, uses_dtcg, resolved, stack)?;
		output.push_str(&render_inline(&value));
		rest = &rest[open + close + 1..];
	}

	output.push_str(rest);
	Ok(Value::String(output))
}

fn sole_reference(text: &str) -> Option<Reference> {
	let trimmed = text.trim();
	if !trimmed.starts_with('{') || !trimmed.ends_with('}') || trimmed.len() < 2 {
		return None;
	}
	let inner = &trimmed[1..trimmed.len() - 1];
	if inner.contains('{') || inner.contains('}') {
		return None;
	}
	Some(Reference::parse(inner))
}

fn target_path(
	tree: &Value,
	reference: &Reference,
	owner: &str,
	uses_dtcg: bool,
) -> DtxResult<Vec<String>> {
	canonical_token_path(tree, reference, uses_dtcg).ok_or_else(|| DtxError::MissingReference {
		reference: reference.raw.clone(),
		referenced_by: owner.to_string(),
	})
}

/// Render a resolved value for interpolation into a mixed string.
fn render_inline(value: &Value) -> String {
	match value {
		Value::String(text) => text.clone(),
		other => other.to_string(),
	}
}
