// Best-area-fit packing over a guillotine-split free-rect set.

use super::canvas::Canvas;
use super::free_rects::{FreeRect, FreeRectSet, SplitStrategy};
use super::{PlacedItem, SizedItem};

/// Result of the primary packing pass.
#[derive(Debug, Clone, Default)]
pub struct PackOutcome {
    pub placed: Vec<PlacedItem>,
    /// Items that fit no void, in input order
    pub overflow: Vec<SizedItem>,
    pub free: Vec<FreeRect>,
}

/// Place `items` (already in packing order) onto `canvas`.
///
/// Each tile goes to the top-left corner of the void that wastes the least
/// area around it; the rest of that void is split back into the free set.
pub fn pack(items: &[SizedItem], canvas: Canvas, strategy: SplitStrategy) -> PackOutcome {
    let mut free = FreeRectSet::new(canvas);
    let mut placed = Vec::with_capacity(items.len());
    let mut overflow = Vec::new();

    for item in items {
        match place_one(&mut free, item, strategy) {
            Some(tile) => placed.push(tile),
            None => overflow.push(item.clone()),
        }
    }

    tracing::debug!(
        "Packed {}/{} tiles, {:.0} units² left in {} voids",
        placed.len(),
        items.len(),
        free.total_area(),
        free.len()
    );

    PackOutcome {
        placed,
        overflow,
        free: free.into_vec(),
    }
}

/// Place a single tile into `free`, or `None` if no void can take it.
pub fn place_one(
    free: &mut FreeRectSet,
    item: &SizedItem,
    strategy: SplitStrategy,
) -> Option<PlacedItem> {
    let index = free.best_fit(item.width, item.height)?;
    let rect = free.take(index);
    free.split(rect, item.width, item.height, strategy);
    free.prune();
    Some(item.place(rect.x, rect.y))
}
