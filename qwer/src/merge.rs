//! Folding per-document command trees into one.
//!
//! Documents are merged from the most general (topmost directory) to the most
//! specific, so later documents override earlier ones at matching paths.

use std::collections::btree_map::Entry;

use log::debug;

use crate::command::Command;

/// Merge `source`'s children into `target`, consuming `source`.
///
/// - A child missing from `target` is adopted with its whole subtree.
/// - A child present in both keeps the `target` node; non-empty `source` code
///   replaces its code (empty code never erases), then their children are
///   merged with the same rule.
/// - Children only in `target` are left alone.
///
/// `level` is never reconciled and is informational after a merge.
pub fn merge(target: &mut Command, source: Command) {
    for (name, mut incoming) in source.children {
        match target.children.entry(name) {
            Entry::Vacant(slot) => {
                debug!("merge: adding `{}`", slot.key());
                slot.insert(incoming);
            }
            Entry::Occupied(mut slot) => {
                let existing = slot.get_mut();
                if !incoming.code.is_empty() {
                    debug!("merge: overriding code of `{}`", existing.name);
                    existing.code = std::mem::take(&mut incoming.code);
                    existing.file_id = incoming.file_id;
                    existing.span = incoming.span.clone();
                }
                merge(existing, incoming);
            }
        }
    }
}

/// Fold an ordered sequence of document trees into a fresh root.
pub fn merge_all<I: IntoIterator<Item = Command>>(documents: I) -> Command {
    documents
        .into_iter()
        .fold(Command::root(), |mut accumulated, document| {
            merge(&mut accumulated, document);
            accumulated
        })
}
