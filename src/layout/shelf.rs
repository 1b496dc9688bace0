// Shelf fill-in pass.
//
// After the primary pack, the overflow is mostly minimum-tier tiles and the
// leftover voids are mostly thin slivers. Slivers that line up are joined
// first, then each void is filled row by row ("shelves"), narrowest tile
// first. Whatever a shelf leaves unused is handed back as new voids for
// later shelves.

use std::collections::VecDeque;

use super::free_rects::{FreeRect, FreeRectSet};
use super::order::smallest_first_cmp;
use super::{PlacedItem, SizedItem};

/// Result of the fill-in pass.
#[derive(Debug, Clone, Default)]
pub struct FillOutcome {
    pub placed: Vec<PlacedItem>,
    /// Items no void could take, smallest first
    pub dropped: Vec<SizedItem>,
    /// Voids left unused, in reading order
    pub free: Vec<FreeRect>,
}

/// Fit as many `overflow` tiles as possible into the `free` voids.
pub fn fill_in(overflow: Vec<SizedItem>, free: Vec<FreeRect>) -> FillOutcome {
    let mut pending = overflow;
    pending.sort_by(smallest_first_cmp);

    let mut voids = FreeRectSet::from_rects(free);
    voids.merge_adjacent();
    let mut regions = voids.into_vec();
    regions.sort_by(FreeRect::position_cmp);
    let mut worklist: VecDeque<FreeRect> = regions.into();

    let mut placed = Vec::new();
    let mut residual = Vec::new();

    while let Some(region) = worklist.pop_front() {
        if pending.is_empty() {
            residual.push(region);
            continue;
        }

        let mut exposed = Vec::new();
        let count = fill_region(region, &mut pending, &mut placed, &mut exposed);
        if count == 0 {
            residual.push(region);
        } else {
            worklist.extend(exposed);
        }
    }

    residual.sort_by(FreeRect::position_cmp);

    if !pending.is_empty() {
        tracing::debug!(
            "Shelf pass placed {} tiles, {} could not be placed",
            placed.len(),
            pending.len()
        );
    }

    FillOutcome {
        placed,
        dropped: pending,
        free: residual,
    }
}

/// Stack shelves into `region` from the top. Returns the number of tiles
/// placed; every unused part of `region` is pushed to `exposed`.
fn fill_region(
    region: FreeRect,
    pending: &mut Vec<SizedItem>,
    placed: &mut Vec<PlacedItem>,
    exposed: &mut Vec<FreeRect>,
) -> usize {
    let mut count = 0;
    let mut cursor_y = region.y;

    loop {
        let remaining_h = region.bottom() - cursor_y;
        let Some(opener) = pending
            .iter()
            .position(|item| item.width <= region.width && item.height <= remaining_h)
        else {
            break;
        };
        let shelf_h = pending[opener].height;

        let mut cursor_x = region.x;
        while let Some(index) = narrowest_fit(pending, region.right() - cursor_x, shelf_h) {
            let item = pending.remove(index);
            if item.height < shelf_h {
                exposed.push(FreeRect::new(
                    cursor_x,
                    cursor_y + item.height,
                    item.width,
                    shelf_h - item.height,
                ));
            }
            placed.push(item.place(cursor_x, cursor_y));
            cursor_x += item.width;
            count += 1;
        }

        let room = region.right() - cursor_x;
        if room > 0.0 {
            exposed.push(FreeRect::new(cursor_x, cursor_y, room, shelf_h));
        }
        cursor_y += shelf_h;
    }

    let remaining_h = region.bottom() - cursor_y;
    if count > 0 && remaining_h > 0.0 {
        exposed.push(FreeRect::new(region.x, cursor_y, region.width, remaining_h));
    }
    count
}

/// Narrowest pending tile fitting `width`×`height`; ties keep size order.
fn narrowest_fit(pending: &[SizedItem], width: f64, height: f64) -> Option<usize> {
    pending
        .iter()
        .enumerate()
        .filter(|(_, item)| item.width <= width && item.height <= height)
        .min_by(|(i, a), (j, b)| a.width.total_cmp(&b.width).then(i.cmp(j)))
        .map(|(index, _)| index)
}
