//! Line ranges of request definitions inside a document.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Span of lines defining one request, 0-based and inclusive.
///
/// Ranges are recomputed on every run and never mutated. Two ranges are
/// considered the same definition when their start lines match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestRange {
    /// First line of the span.
    pub start_line: usize,
    /// Last line of the span.
    pub end_line: usize,
}

impl RequestRange {
    /// Creates a range covering `start_line..=end_line`.
    pub fn new(start_line: usize, end_line: usize) -> Self {
        Self {
            start_line,
            end_line,
        }
    }

    /// A range covering a single line.
    pub fn line(line: usize) -> Self {
        Self::new(line, line)
    }

    /// Checks whether `line` falls inside the range.
    pub fn contains(&self, line: usize) -> bool {
        (self.start_line..=self.end_line).contains(&line)
    }
}

impl fmt::Display for RequestRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // editors count lines from 1
        write!(f, "lines {}-{}", self.start_line + 1, self.end_line + 1)
    }
}
