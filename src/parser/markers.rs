//! Comment markers recognised inside request blocks.
//!
//! Markers are comment lines (`#` or `//`) carrying an `@`-directive:
//!
//! ```http
//! # @name login
//! # @note
//! // @before login.refresh
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

/// `@before a.b.c`; the capture holds the dot-separated names.
pub(crate) static BEFORE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*(?:#+|/{2,})[ \t]+@before[ \t]+([\w.]+)[ \t]*$")
        .expect("Failed to compile @before regex")
});

/// `@name <name>`; the capture holds the name.
pub(crate) static NAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*(?:#+|/{2,})[ \t]+@name[ \t]+(\w+)[ \t]*$")
        .expect("Failed to compile @name regex")
});

/// Bare `@note`, asking for confirmation before sending.
pub(crate) static NOTE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*(?:#+|/{2,})[ \t]*@note[ \t]*$").expect("Failed to compile @note regex")
});

/// Builds a single-line matcher for `@name <name>` with the given name.
///
/// The name is escaped, so `a.b` matches only the literal text `a.b`.
pub(crate) fn name_definition_regex(name: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(
        r"^[ \t]*(?:#+|/{{2,}})[ \t]+@name[ \t]+{}[ \t]*$",
        regex::escape(name)
    ))
}

/// Checks whether a line is a comment (`#...` or `//...`).
pub fn is_comment_line(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with('#') || trimmed.starts_with("//")
}
