use std::cmp::Ordering;
use std::fmt;

use serde_json::Value;

use crate::DtxError;
use crate::DtxResult;
use crate::references::canonical_token_path;
use crate::references::references_in_value;
use crate::tokens::DesignToken;
use crate::tokens::value_key;

/// A user-supplied two-argument comparator over tokens.
pub type SortFn = Box<dyn Fn(&DesignToken, &DesignToken) -> Ordering>;

/// A sorting criterion for formatted output: a built-in sort referenced by
/// name, a custom comparator, or an ordered chain of either (later entries
/// act as tie-breakers).
///
/// Validation happens once, at comparator construction; an unrecognized
/// name fails loudly there rather than silently falling back to insertion
/// order.
pub enum SortOption {
	/// A built-in sort referenced by name. Currently only `"name"`
	/// (lexicographic compare on the token's `name`) exists.
	Named(String),
	/// An inline custom comparator.
	Custom(SortFn),
	/// An ordered chain of criteria, evaluated left to right.
	Chain(Vec<SortOption>),
}

impl SortOption {
	/// The built-in lexicographic name sort.
	pub fn name() -> Self {
		Self::Named("name".to_string())
	}

	/// Wrap a closure as a custom sorting criterion.
	pub fn custom(comparator: impl Fn(&DesignToken, &DesignToken) -> Ordering + 'static) -> Self {
		Self::Custom(Box::new(comparator))
	}
}

impl fmt::Debug for SortOption {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Named(name) => f.debug_tuple("Named").field(name).finish(),
			Self::Custom(_) => f.write_str("Custom(..)"),
			Self::Chain(criteria) => f.debug_tuple("Chain").field(criteria).finish(),
		}
	}
}

impl TryFrom<&Value> for SortOption {
	type Error = DtxError;

	/// Convert a raw config value into a sort option. Strings become named
	/// sorts (validated later, at comparator construction); arrays become
	/// chains. Anything else is rejected with its type in the message.
	fn try_from(value: &Value) -> Result<Self, Self::Error> {
		match value {
			Value::String(name) => Ok(Self::Named(name.clone())),
			Value::Array(items) => {
				let criteria = items
					.iter()
					.map(Self::try_from)
					.collect::<Result<Vec<_>, _>>()?;
				Ok(Self::Chain(criteria))
			}
			other => Err(DtxError::InvalidSortOptionType(
				json_type_name(other).to_string(),
			)),
		}
	}
}

fn json_type_name(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "boolean",
		Value::Number(_) => "number",
		Value::String(_) => "string",
		Value::Array(_) => "array",
		Value::Object(_) => "object",
	}
}

/// The built-in `"name"` sort: lexicographic compare on token names.
pub fn sort_by_name(a: &DesignToken, b: &DesignToken) -> Ordering {
	a.name.cmp(&b.name)
}

/// Options for [`sort_by_reference`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceSortOptions<'a> {
	/// Fallback tree for reference lookups when the primary tree was
	/// filtered.
	pub unfiltered_tokens: Option<&'a Value>,
	/// Which naming convention holds the pre-resolution original value.
	pub uses_dtcg: bool,
}

/// Build the reference-safety comparator: definition before use.
///
/// Returns `Less` when `b`'s original value references `a` (so `a` must be
/// emitted first), `Greater` when `a`'s original references `b`, and
/// `Equal` when neither references the other. Detection inspects the raw
/// `original` value, since after resolution the resolved `value` carries no
/// reference text. Tokens without an original value are incomparable and
/// compare `Equal`.
pub fn sort_by_reference<'a>(
	tokens: &'a Value,
	options: ReferenceSortOptions<'a>,
) -> impl Fn(&DesignToken, &DesignToken) -> Ordering + 'a {
	move |a, b| {
		if references_token(tokens, &options, a, b) {
			return Ordering::Greater;
		}
		if references_token(tokens, &options, b, a) {
			return Ordering::Less;
		}
		Ordering::Equal
	}
}

/// Whether `from`'s original value contains a reference that resolves to
/// `to`'s path. Paths are canonicalized through the trailing value-key
/// grammar, so `{a.b.value}` matches the token at `a.b` while a segment
/// literally named `value_chain` is left alone.
fn references_token(
	tree: &Value,
	options: &ReferenceSortOptions<'_>,
	from: &DesignToken,
	to: &DesignToken,
) -> bool {
	let Some(original) = from.original.get(value_key(options.uses_dtcg)) else {
		return false;
	};

	references_in_value(original).iter().any(|reference| {
		let target = canonical_token_path(tree, reference, options.uses_dtcg).or_else(|| {
			options
				.unfiltered_tokens
				.and_then(|unfiltered| canonical_token_path(unfiltered, reference, options.uses_dtcg))
		});
		target.is_some_and(|path| path == to.path)
	})
}

/// Validate a sort option and flatten it into an ordered comparator list.
///
/// Fails with [`DtxError::InvalidSortOption`] for any named criterion other
/// than `"name"`, before any sorting work begins.
pub fn comparators_for(
	sort: &SortOption,
) -> DtxResult<Vec<&dyn Fn(&DesignToken, &DesignToken) -> Ordering>> {
	match sort {
		SortOption::Named(name) if name == "name" => Ok(vec![&sort_by_name]),
		SortOption::Named(other) => Err(DtxError::InvalidSortOption(other.clone())),
		SortOption::Custom(comparator) => Ok(vec![comparator.as_ref()]),
		SortOption::Chain(criteria) => {
			let mut comparators = Vec::with_capacity(criteria.len());
			for criterion in criteria {
				comparators.extend(comparators_for(criterion)?);
			}
			Ok(comparators)
		}
	}
}

/// Stable composite sort over a copy of the token list.
///
/// Criteria evaluate left to right and the first non-zero result wins;
/// when every criterion ties, the original relative order is kept. The
/// input slice is never reordered.
pub fn sorted_tokens(
	tokens: &[DesignToken],
	comparators: &[&dyn Fn(&DesignToken, &DesignToken) -> Ordering],
) -> Vec<DesignToken> {
	let mut sorted = tokens.to_vec();
	sorted.sort_by(|a, b| {
		comparators
			.iter()
			.map(|comparator| comparator(a, b))
			.find(|ordering| *ordering != Ordering::Equal)
			.unwrap_or(Ordering::Equal)
	});
	sorted
}
