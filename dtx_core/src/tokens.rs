use serde_json::Value;
use serde_json::json;

/// The property name holding a token's value under the given naming
/// convention: `$value` for DTCG token files, `value` otherwise.
pub fn value_key(uses_dtcg: bool) -> &'static str {
	if uses_dtcg { "$value" } else { "value" }
}

/// The property name holding a token's type under the given naming
/// convention.
pub fn type_key(uses_dtcg: bool) -> &'static str {
	if uses_dtcg { "$type" } else { "type" }
}

/// The property name holding a token's description/comment under the given
/// naming convention.
pub fn comment_key(uses_dtcg: bool) -> &'static str {
	if uses_dtcg { "$description" } else { "comment" }
}

/// A single design token, flattened out of the token tree.
///
/// `value` is the fully resolved literal value. `original` is the token
/// object as authored (pre-resolution). It is the only place reference
/// expressions survive after resolution, and it is what reference-aware
/// ordering inspects.
#[derive(Debug, Clone, PartialEq)]
pub struct DesignToken {
	/// The fully qualified output identifier, unique within one build.
	pub name: String,
	/// Path segments locating the token in the source tree.
	pub path: Vec<String>,
	/// The resolved literal value.
	pub value: Value,
	/// The pre-resolution token object, holding the authored value under the
	/// convention's value key.
	pub original: Value,
	/// The declared token type, when present.
	pub token_type: Option<String>,
	/// An optional authored comment, rendered alongside the declaration.
	pub comment: Option<String>,
	/// Whether the token opts into themeable output (e.g. `!default` in
	/// SCSS).
	pub themeable: bool,
}

impl DesignToken {
	/// The authored (pre-resolution) value, if the original snapshot holds
	/// one.
	pub fn original_value(&self, uses_dtcg: bool) -> Option<&Value> {
		self.original.get(value_key(uses_dtcg))
	}
}

/// Whether a tree node is a token leaf: an object carrying the convention's
/// value key. Everything else is treated as a group.
pub fn is_token_node(node: &Value, uses_dtcg: bool) -> bool {
	node.as_object()
		.is_some_and(|map| map.contains_key(value_key(uses_dtcg)))
}

/// Walk a path from the tree root, returning the node it lands on.
pub fn node_at_path<'a>(tree: &'a Value, path: &[String]) -> Option<&'a Value> {
	let mut node = tree;
	for segment in path {
		node = node.get(segment.as_str())?;
	}
	Some(node)
}

/// Mutable variant of [`node_at_path`].
pub fn node_at_path_mut<'a>(tree: &'a mut Value, path: &[String]) -> Option<&'a mut Value> {
	let mut node = tree;
	for segment in path {
		node = node.get_mut(segment.as_str())?;
	}
	Some(node)
}

/// Collect the path of every token leaf in the tree, in insertion order.
pub fn token_paths(tree: &Value, uses_dtcg: bool) -> Vec<Vec<String>> {
	let mut paths = Vec::new();
	let mut prefix = Vec::new();
	collect_token_paths(tree, uses_dtcg, &mut prefix, &mut paths);
	paths
}

fn collect_token_paths(
	node: &Value,
	uses_dtcg: bool,
	prefix: &mut Vec<String>,
	paths: &mut Vec<Vec<String>>,
) {
	let Some(map) = node.as_object() else {
		return;
	};

	for (key, child) in map {
		prefix.push(key.clone());
		if is_token_node(child, uses_dtcg) {
			paths.push(prefix.clone());
		} else {
			collect_token_paths(child, uses_dtcg, prefix, paths);
		}
		prefix.pop();
	}
}

/// Flatten the token tree into an ordered list of [`DesignToken`]s.
///
/// Insertion order of the tree is preserved. A token object may carry a
/// precomputed `name`; otherwise the name is the path joined with `-`, with
/// the platform `prefix` (when given) prepended. Reordering or cloning the
/// returned list never touches the tree.
pub fn flatten_tokens(tree: &Value, uses_dtcg: bool, prefix: Option<&str>) -> Vec<DesignToken> {
	token_paths(tree, uses_dtcg)
		.into_iter()
		.filter_map(|path| {
			let node = node_at_path(tree, &path)?;
			Some(token_from_node(node, path, uses_dtcg, prefix))
		})
		.collect()
}

fn token_from_node(
	node: &Value,
	path: Vec<String>,
	uses_dtcg: bool,
	prefix: Option<&str>,
) -> DesignToken {
	let value = node.get(value_key(uses_dtcg)).cloned().unwrap_or(Value::Null);
	let name = node
		.get("name")
		.and_then(Value::as_str)
		.map_or_else(|| default_name(&path, prefix), ToString::to_string);
	// Tokens that never went through resolution still need an original
	// snapshot so reference-aware ordering has something to inspect.
	let original = node.get("original").cloned().unwrap_or_else(|| {
		let mut snapshot = json!({ (value_key(uses_dtcg)): value.clone() });
		if let Some(token_type) = node.get(type_key(uses_dtcg)) {
			snapshot[type_key(uses_dtcg)] = token_type.clone();
		}
		snapshot
	});

	DesignToken {
		name,
		path,
		value,
		original,
		token_type: node
			.get(type_key(uses_dtcg))
			.and_then(Value::as_str)
			.map(ToString::to_string),
		comment: node
			.get(comment_key(uses_dtcg))
			.and_then(Value::as_str)
			.map(ToString::to_string),
		themeable: node
			.get("themeable")
			.and_then(Value::as_bool)
			.unwrap_or(false),
	}
}

fn default_name(path: &[String], prefix: Option<&str>) -> String {
	let joined = path.join("-");
	match prefix {
		Some(prefix) if !prefix.is_empty() => format!("{prefix}-{joined}"),
		_ => joined,
	}
}

/// The resolved token tree together with its flattened list view.
///
/// `all_tokens` entries are produced from `tokens` after resolution, so both
/// views agree on every value. `unfiltered_tokens` (when present) is the
/// tree before any file-level filtering, used as a lookup fallback when
/// ordering by reference.
#[derive(Debug, Clone)]
pub struct Dictionary {
	/// The resolved token tree.
	pub tokens: Value,
	/// Flattened list view of `tokens`, in tree insertion order.
	pub all_tokens: Vec<DesignToken>,
	/// The pre-filtering tree, when the primary tree was filtered.
	pub unfiltered_tokens: Option<Value>,
}

impl Dictionary {
	/// Build a dictionary from a resolved tree, flattening with the given
	/// convention and optional name prefix.
	pub fn new(tokens: Value, uses_dtcg: bool, prefix: Option<&str>) -> Self {
		let all_tokens = flatten_tokens(&tokens, uses_dtcg, prefix);
		Self {
			tokens,
			all_tokens,
			unfiltered_tokens: None,
		}
	}
}
