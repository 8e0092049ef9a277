use serde_json::Value;
use serde_json::json;

use crate::tokens::DesignToken;
use crate::tokens::Dictionary;

/// The transformed-token tree used by the reference-sort tests: `primary`
/// references `red`, the other two are literals.
pub fn transformed_tokens(uses_dtcg: bool) -> Value {
	let value_key = if uses_dtcg { "$value" } else { "value" };
	let type_key = if uses_dtcg { "$type" } else { "type" };

	json!({
		"color": {
			"primary": {
				(value_key): "#FF0000",
				(type_key): "color",
				"original": { (value_key): "{color.red}", (type_key): "color" },
			},
			"green": {
				(value_key): "#00FF00",
				(type_key): "color",
				"original": { (value_key): "#00FF00", (type_key): "color" },
			},
			"red": {
				(value_key): "#FF0000",
				(type_key): "color",
				"original": { (value_key): "#FF0000", (type_key): "color" },
			},
		}
	})
}

/// Tokens whose path segments contain the word `value` without being a
/// value-key suffix.
pub fn tokens_with_value_in_name(uses_dtcg: bool) -> Value {
	let value_key = if uses_dtcg { "$value" } else { "value" };
	let type_key = if uses_dtcg { "$type" } else { "type" };

	json!({
		"object_type": {
			"value_chain": {
				(value_key): "10px",
				(type_key): "spacing",
				"original": { (value_key): "10px", (type_key): "spacing" },
				"name": "object-type-value-chain",
			}
		},
		"reference": {
			"to_value_chain": {
				(value_key): "10px",
				(type_key): "spacing",
				"original": { (value_key): "{object_type.value_chain}", (type_key): "spacing" },
				"name": "reference-to-value-chain",
			}
		}
	})
}

/// Two literal color tokens with precomputed names, as they look after
/// resolution.
pub fn base_dictionary() -> Dictionary {
	let tree = json!({
		"color": {
			"base": {
				"red": {
					"400": {
						"name": "color-base-red-400",
						"value": "#EF5350",
						"original": { "value": "#EF5350" },
					}
				},
				"blue": {
					"500": {
						"name": "color-base-blue-500",
						"value": "#2196F3",
						"original": { "value": "#2196F3" },
					}
				},
			}
		}
	});
	Dictionary::new(tree, false, None)
}

/// A referencing token that is inserted (and named) ahead of the token it
/// references: insertion order and name order both put `a-semantic` first,
/// so only reference-safe ordering moves `z-base` up.
pub fn referencing_dictionary() -> Dictionary {
	let tree = json!({
		"color": {
			"semantic": {
				"primary": {
					"name": "a-semantic",
					"value": "#EF5350",
					"original": { "value": "{color.base.red.400.value}" },
				}
			},
			"base": {
				"red": {
					"400": {
						"name": "z-base",
						"value": "#EF5350",
						"original": { "value": "#EF5350" },
					}
				}
			},
		}
	});
	Dictionary::new(tree, false, None)
}

/// Reference output in natural order: the base token is defined first.
pub fn reference_output_dictionary() -> Dictionary {
	let tree = json!({
		"color": {
			"base": {
				"red": {
					"400": {
						"name": "color-base-red-400",
						"value": "#EF5350",
						"original": { "value": "#EF5350" },
					}
				}
			},
			"semantic": {
				"primary": {
					"name": "color-semantic-primary",
					"value": "#EF5350",
					"original": { "value": "{color.base.red.400.value}" },
				}
			},
		}
	});
	Dictionary::new(tree, false, None)
}

/// Insertion order `a, c, b`: `a` has a distinct value while `c` and `b`
/// tie on value, so a value-first chain needs the name tie-breaker.
pub fn chain_dictionary() -> Dictionary {
	let tree = json!({
		"color": {
			"a": {
				"name": "color-a",
				"value": "#111111",
				"original": { "value": "#111111" },
			},
			"c": {
				"name": "color-c",
				"value": "#000000",
				"original": { "value": "#000000" },
			},
			"b": {
				"name": "color-b",
				"value": "#000000",
				"original": { "value": "#000000" },
			},
		}
	});
	Dictionary::new(tree, false, None)
}

/// A minimal literal token for sort tests.
pub fn literal_token(name: &str, value: &str) -> DesignToken {
	DesignToken {
		name: name.to_string(),
		path: vec![name.to_string()],
		value: json!(value),
		original: json!({ "value": value }),
		token_type: None,
		comment: None,
		themeable: false,
	}
}

/// Find a token by name, panicking with the name when absent.
pub fn token_named<'a>(tokens: &'a [DesignToken], name: &str) -> &'a DesignToken {
	tokens
		.iter()
		.find(|token| token.name == name)
		.unwrap_or_else(|| panic!("no token named `{name}`"))
}

/// The names of a token list, in order.
pub fn names(tokens: &[DesignToken]) -> Vec<String> {
	tokens.iter().map(|token| token.name.clone()).collect()
}
