use std::collections::HashMap;

use super::LibraryFilter;
use crate::layout::Item;

/// Fold records that share an id into one item: playtimes are summed, the
/// first name and the first position are kept. Returns the merged items and
/// how many records were folded away.
pub fn merge_duplicates(items: Vec<Item>) -> (Vec<Item>, usize) {
    let mut index: HashMap<u64, usize> = HashMap::with_capacity(items.len());
    let mut merged: Vec<Item> = Vec::with_capacity(items.len());
    let mut folded = 0;

    for item in items {
        match index.get(&item.id) {
            Some(&at) => {
                let existing = &mut merged[at];
                existing.weight = existing.weight.saturating_add(item.weight);
                folded += 1;
            }
            None => {
                index.insert(item.id, merged.len());
                merged.push(item);
            }
        }
    }

    (merged, folded)
}

/// Apply the library filter. With `max_items`, the most played items are
/// kept and come back most played first.
pub fn apply_filter(items: Vec<Item>, filter: &LibraryFilter) -> Vec<Item> {
    let mut kept: Vec<Item> = items
        .into_iter()
        .filter(|item| filter.include_unplayed || item.weight > 0)
        .filter(|item| item.weight >= filter.min_weight)
        .collect();

    if let Some(max) = filter.max_items {
        if kept.len() > max {
            kept.sort_by(|a, b| b.weight.cmp(&a.weight).then(a.id.cmp(&b.id)));
            kept.truncate(max);
        }
    }

    kept
}
