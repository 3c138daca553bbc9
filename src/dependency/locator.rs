//! Lookup of the request bound to a name.

use crate::document::selector::split_lines;
use crate::models::RequestRange;
use crate::parser::markers::name_definition_regex;

/// Finds every `@name <name>` line in `lines`.
///
/// Each match is returned as a single-line range on the marker line.
pub fn definition_ranges(lines: &[&str], name: &str) -> Vec<RequestRange> {
    let Ok(definition) = name_definition_regex(name) else {
        return Vec::new();
    };

    lines
        .iter()
        .enumerate()
        .filter(|(_, line)| definition.is_match(line))
        .map(|(index, _)| RequestRange::line(index))
        .collect()
}

/// Checks whether `block` itself binds `name`.
pub fn is_definition_of(block: &str, name: &str) -> bool {
    name_definition_regex(name)
        .map(|definition| split_lines(block).iter().any(|line| definition.is_match(line)))
        .unwrap_or(false)
}

/// Locates the request bound to `name`, as seen from the block `from_block`.
///
/// # Returns
///
/// The range of the single definition of `name` in `full_text`. `None` when
/// `from_block` is that definition itself, or when the name is defined zero
/// or several times.
pub fn locate(full_text: &str, from_block: &str, name: &str) -> Option<RequestRange> {
    if is_definition_of(from_block, name) {
        log::debug!("Skipping self-reference to '{}'", name);
        return None;
    }

    let lines = split_lines(full_text);
    let mut ranges = definition_ranges(&lines, name);
    match ranges.len() {
        1 => ranges.pop(),
        0 => {
            log::debug!("No request named '{}'", name);
            None
        }
        count => {
            log::debug!("'{}' is defined {} times, skipping", name, count);
            None
        }
    }
}
