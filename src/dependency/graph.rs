//! Breadth-first expansion of `@before` dependencies.

use super::{locator, scanner};
use crate::document::TextSource;
use crate::models::RequestRange;

/// Discovers every request that must run before the request at `target`.
///
/// The expansion is breadth-first over two lists: the ranges of the current
/// level are scanned for `@before` names, each name is located, and located
/// ranges form the next level. Names of one marker (`a.b.c`) end up on the
/// same level in the order they are written. Self-references and names that
/// can't be located are skipped.
///
/// A located range whose start line was already discovered means the graph
/// has a cycle. The whole build is abandoned and an empty list is returned,
/// so only the target itself runs. Two requests sharing one prerequisite are
/// treated the same way.
///
/// # Returns
///
/// The dependency ranges in discovery order; execute them in reverse.
pub fn build_dependency_order(source: &dyn TextSource, target: &RequestRange) -> Vec<RequestRange> {
    let full_text = source.full_text();
    let mut visited: Vec<RequestRange> = Vec::new();
    let mut frontier = vec![*target];

    while !frontier.is_empty() {
        let mut next_frontier = Vec::new();

        for range in &frontier {
            let Some(block) = source.block_text(Some(range)) else {
                continue;
            };
            let Some(names) = scanner::referenced_names(&block) else {
                continue;
            };

            for name in names {
                let Some(found) = locator::locate(&full_text, &block, &name) else {
                    continue;
                };

                if visited.iter().any(|r| r.start_line == found.start_line) {
                    log::warn!(
                        "Circular @before reference through '{}' in {}; running the request without its dependencies",
                        name,
                        source.identity()
                    );
                    return Vec::new();
                }

                visited.push(found);
                next_frontier.push(found);
            }
        }

        frontier = next_frontier;
    }

    visited
}
