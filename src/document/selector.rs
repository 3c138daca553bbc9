//! Request block selection.
//!
//! Requests in a document are separated by delimiter lines starting with
//! `###`. The block containing a line is everything between the nearest
//! delimiter above and the nearest delimiter below it.

use once_cell::sync::Lazy;
use regex::Regex;

static DELIMITER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#{3,}").expect("Failed to compile delimiter regex"));

/// Splits text into lines, accepting both `\n` and `\r\n` endings.
///
/// Unlike `str::lines`, a trailing newline yields a final empty line, so line
/// numbers line up with what an editor shows.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

/// Checks whether a line separates two request blocks.
pub fn is_delimiter(line: &str) -> bool {
    DELIMITER_REGEX.is_match(line)
}

/// Returns the text of the request block containing `line` (0-based).
///
/// # Returns
///
/// - the whole text when there are no delimiters,
/// - `None` when `line` is itself a delimiter,
/// - otherwise the lines strictly between the surrounding delimiters.
///
/// # Example
///
/// ```
/// use rest_runner::document::selector::delimited_text;
///
/// let text = "GET https://a.example\n###\nGET https://b.example";
/// assert_eq!(delimited_text(text, 2).as_deref(), Some("GET https://b.example"));
/// assert_eq!(delimited_text(text, 1), None);
/// ```
pub fn delimited_text(full_text: &str, line: usize) -> Option<String> {
    let lines = split_lines(full_text);
    let delimiters: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(_, l)| is_delimiter(l))
        .map(|(index, _)| index)
        .collect();

    let (Some(&first), Some(&last)) = (delimiters.first(), delimiters.last()) else {
        return Some(full_text.to_string());
    };

    if delimiters.contains(&line) {
        return None;
    }

    let block = if line < first {
        &lines[..first]
    } else if line > last {
        &lines[last + 1..]
    } else {
        let end = delimiters
            .iter()
            .copied()
            .find(|&d| d > line)
            .unwrap_or(last);
        let start = delimiters
            .iter()
            .copied()
            .rev()
            .find(|&d| d < line)
            .unwrap_or(first);
        &lines[start + 1..end]
    };

    Some(block.join("\n"))
}
