use std::cmp::Ordering;
use std::fmt::Display;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::DtxResult;
use crate::references::Reference;
use crate::references::canonical_token_path;
use crate::references::uses_references;
use crate::sort::ReferenceSortOptions;
use crate::sort::SortOption;
use crate::sort::comparators_for;
use crate::sort::sort_by_reference;
use crate::sort::sorted_tokens;
use crate::tokens::DesignToken;
use crate::tokens::Dictionary;

/// Built-in variable declaration formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyFormat {
	/// CSS custom properties: `  --name: value;`
	Css,
	/// SCSS variables: `$name: value;`
	Sass,
	/// LESS variables: `@name: value;`
	Less,
	/// Stylus variables: `$name = value`
	Stylus,
}

impl Display for PropertyFormat {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Css => write!(f, "css"),
			Self::Sass => write!(f, "sass"),
			Self::Less => write!(f, "less"),
			Self::Stylus => write!(f, "stylus"),
		}
	}
}

/// Custom formatting properties for assembled output.
#[derive(Debug, Clone)]
pub struct Formatting {
	/// Separator between declaration lines.
	pub line_separator: String,
}

impl Default for Formatting {
	fn default() -> Self {
		Self {
			line_separator: "\n".to_string(),
		}
	}
}

/// Options for [`formatted_variables`].
#[derive(Debug)]
pub struct VariablesOptions<'a> {
	/// What kind of variable declarations to emit.
	pub format: PropertyFormat,
	/// The resolved dictionary to format.
	pub dictionary: &'a Dictionary,
	/// Emit reference expressions instead of literal values where the
	/// original token value referenced another token.
	pub output_references: bool,
	/// Render references with the literal value as a fallback (CSS
	/// `var(--x, literal)`).
	pub output_reference_fallbacks: bool,
	/// Line assembly options.
	pub formatting: Formatting,
	/// Whether tokens default to being themeable.
	pub themeable: bool,
	/// Which naming convention token files use.
	pub uses_dtcg: bool,
	/// Optional sorting strategy, chained as tie-breakers when an array.
	pub sort: Option<SortOption>,
}

impl<'a> VariablesOptions<'a> {
	pub fn new(format: PropertyFormat, dictionary: &'a Dictionary) -> Self {
		Self {
			format,
			dictionary,
			output_references: false,
			output_reference_fallbacks: false,
			formatting: Formatting::default(),
			themeable: false,
			uses_dtcg: false,
			sort: None,
		}
	}
}

/// Create a list of variable declarations from the dictionary's flattened
/// tokens, one line per token, joined with the configured separator.
///
/// When `output_references` is on, the reference-safety comparator runs
/// before any user-supplied sort, so a token's definition always precedes
/// its use in the emitted text; user criteria break ties among unrelated
/// tokens. With literal output the declaration order cannot matter, so
/// only the user sort applies. Sorting happens on a copy; the
/// dictionary's own list keeps its order.
pub fn formatted_variables(options: VariablesOptions<'_>) -> DtxResult<String> {
	let dictionary = options.dictionary;

	let by_reference = if options.output_references {
		Some(sort_by_reference(
			&dictionary.tokens,
			ReferenceSortOptions {
				unfiltered_tokens: dictionary.unfiltered_tokens.as_ref(),
				uses_dtcg: options.uses_dtcg,
			},
		))
	} else {
		None
	};

	// Validate the user sort before any sorting work begins.
	let user_comparators = match &options.sort {
		Some(sort) => comparators_for(sort)?,
		None => Vec::new(),
	};

	let mut comparators: Vec<&dyn Fn(&DesignToken, &DesignToken) -> Ordering> = Vec::new();
	if let Some(comparator) = &by_reference {
		comparators.push(comparator);
	}
	comparators.extend(user_comparators);

	let tokens = if comparators.is_empty() {
		dictionary.all_tokens.clone()
	} else {
		sorted_tokens(&dictionary.all_tokens, &comparators)
	};

	let formatter = PropertyFormatter::new(&options);
	let lines: Vec<String> = tokens
		.iter()
		.filter_map(|token| formatter.line(token))
		.filter(|line| !line.is_empty())
		.collect();

	Ok(lines.join(&options.formatting.line_separator))
}

/// Renders one declaration line per token for a given format.
///
/// Chooses between the literal resolved value and a reference expression:
/// a reference is emitted only when references were requested, the token's
/// original value actually used one, and every referenced token survives
/// in the (possibly filtered) primary tree.
pub struct PropertyFormatter<'a> {
	format: PropertyFormat,
	dictionary: &'a Dictionary,
	output_references: bool,
	output_reference_fallbacks: bool,
	themeable: bool,
	uses_dtcg: bool,
}

impl<'a> PropertyFormatter<'a> {
	pub fn new(options: &VariablesOptions<'a>) -> Self {
		Self {
			format: options.format,
			dictionary: options.dictionary,
			output_references: options.output_references,
			output_reference_fallbacks: options.output_reference_fallbacks,
			themeable: options.themeable,
			uses_dtcg: options.uses_dtcg,
		}
	}

	/// Render the declaration line for one token, or `None` when the token
	/// renders empty.
	pub fn line(&self, token: &DesignToken) -> Option<String> {
		if token.name.is_empty() {
			return None;
		}

		let value = self.rendered_value(token);
		let mut line = match self.format {
			PropertyFormat::Css => format!("  --{}: {value};", token.name),
			PropertyFormat::Sass => {
				let default = if token.themeable || self.themeable {
					" !default"
				} else {
					""
				};
				format!("${}: {value}{default};", token.name)
			}
			PropertyFormat::Less => format!("@{}: {value};", token.name),
			PropertyFormat::Stylus => format!("${} = {value}", token.name),
		};

		if let Some(comment) = &token.comment {
			match self.format {
				PropertyFormat::Stylus => line.push_str(&format!(" // {comment}")),
				_ => line.push_str(&format!(" /* {comment} */")),
			}
		}

		Some(line)
	}

	fn rendered_value(&self, token: &DesignToken) -> String {
		if self.output_references {
			if let Some(value) = self.reference_value(token) {
				return value;
			}
		}
		render_literal(&token.value)
	}

	/// Rebuild the token's original string value with each reference
	/// expression replaced by the target's reference syntax. `None` when
	/// the original is not a referencing string or any target was filtered
	/// out; the caller falls back to the literal value.
	fn reference_value(&self, token: &DesignToken) -> Option<String> {
		let original = token.original_value(self.uses_dtcg)?;
		if !uses_references(original) {
			return None;
		}
		let Value::String(text) = original else {
			return None;
		};

		let mut output = String::new();
		let mut rest = text.as_str();

		while let Some(open) = rest.find('{') {
			let Some(close) = rest[open..].find('}') else {
				break;
			};
			output.push_str(&rest[..open]);
			let reference = Reference::parse(&rest[open + 1..open + close]);
			let target = self.referenced_token(&reference)?;
			output.push_str(&self.reference_expression(target));
			rest = &rest[open + close + 1..];
		}

		output.push_str(rest);
		Some(output.trim().to_string())
	}

	/// Find the referenced token in the primary (filtered) tree. A lookup
	/// miss means the target did not survive filtering.
	fn referenced_token(&self, reference: &Reference) -> Option<&DesignToken> {
		let path = canonical_token_path(&self.dictionary.tokens, reference, self.uses_dtcg)?;
		let token = self
			.dictionary
			.all_tokens
			.iter()
			.find(|token| token.path == path);
		if token.is_none() {
			debug!(reference = %reference.raw, "referenced token filtered out, falling back to literal");
		}
		token
	}

	fn reference_expression(&self, target: &DesignToken) -> String {
		match self.format {
			PropertyFormat::Css => {
				if self.output_reference_fallbacks {
					format!(
						"var(--{}, {})",
						target.name,
						render_literal(&target.value)
					)
				} else {
					format!("var(--{})", target.name)
				}
			}
			PropertyFormat::Sass | PropertyFormat::Stylus => format!("${}", target.name),
			PropertyFormat::Less => format!("@{}", target.name),
		}
	}
}

fn render_literal(value: &Value) -> String {
	match value {
		Value::String(text) => text.clone(),
		other => other.to_string(),
	}
}
