//! Item availability merge engine.
//!
//! The order document is overwritten whole-array by whichever side writes
//! last, so a customer edit would silently erase every availability flag the
//! shop has set. The merge here is the sole safeguard: before the customer
//! side writes a freshly edited list, it carries the shop's annotations
//! forward by item name.
//!
//! Matching is by `name`, case-sensitive and exact, because edits reorder,
//! insert, and delete - array position means nothing across two versions of
//! a list. An item removed from the customer's list disappears along with
//! its annotation; a renamed item is indistinguishable from a remove+add and
//! starts over as unreviewed.

use crate::types::Item;

/// Carry shop availability annotations from `existing` onto `new_items`.
///
/// For each new item, the first existing item with the same name donates its
/// `available` flag - but only if that flag was actually set. Items with no
/// match, or whose match was never reviewed, come out unreviewed; a merge
/// never fabricates an availability value. Duplicates in either list are
/// left alone (first match wins).
///
/// The result is a full replacement for the order's items array, not a
/// patch: existing items absent from `new_items` are dropped.
#[must_use]
pub fn carry_availability(new_items: &[Item], existing: &[Item]) -> Vec<Item> {
    new_items
        .iter()
        .map(|new_item| {
            let mut merged = new_item.clone();
            merged.available = existing
                .iter()
                .find(|old| old.name == new_item.name)
                .and_then(|old| old.available);
            merged
        })
        .collect()
}

/// The next availability state when the shop toggles an item.
///
/// The cycle is absent -> in stock -> out of stock -> in stock -> ... An
/// item never returns to the unreviewed state once the shop has touched it.
#[must_use]
pub const fn next_availability(current: Option<bool>) -> bool {
    match current {
        None | Some(false) => true,
        Some(true) => false,
    }
}
