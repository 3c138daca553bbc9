//! Detection of `@before` references in a request block.

use crate::parser::markers::BEFORE_REGEX;

/// Returns the names a block asks to run first.
///
/// Only the first `@before` marker of the block counts. Its value is split on
/// `.`, so `# @before login.refresh` yields `["login", "refresh"]` in that
/// order.
///
/// # Returns
///
/// `None` if the block has no `@before` marker.
///
/// # Example
///
/// ```
/// use rest_runner::dependency::referenced_names;
///
/// let block = "# @before login.refresh\nGET https://api.example.com/me";
/// assert_eq!(
///     referenced_names(block),
///     Some(vec!["login".to_string(), "refresh".to_string()])
/// );
/// ```
pub fn referenced_names(block: &str) -> Option<Vec<String>> {
    let captures = BEFORE_REGEX.captures(block)?;
    let names: Vec<String> = captures[1]
        .split('.')
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect();

    if names.is_empty() {
        None
    } else {
        Some(names)
    }
}
