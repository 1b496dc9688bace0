// Structural checks on a finished layout.

use std::collections::HashMap;

use rayon::prelude::*;

use super::{Layout, PlacedItem};

/// Everything that can be wrong with a layout.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutReport {
    /// Pairs of tile ids whose interiors intersect
    pub overlaps: Vec<(u64, u64)>,
    /// Tiles reaching past the canvas edge (or with non-positive size)
    pub out_of_bounds: Vec<u64>,
    /// Ids whose count in placed + dropped differs from the input
    pub conservation_errors: Vec<u64>,
    /// Placed tile area / canvas area
    pub coverage: f64,
    /// Placed area + void area equals the canvas area
    pub fully_accounted: bool,
}

impl LayoutReport {
    pub fn is_valid(&self) -> bool {
        self.overlaps.is_empty() && self.out_of_bounds.is_empty() && self.conservation_errors.is_empty()
    }
}

/// Check `layout` against the ids it was computed from.
pub fn validate(layout: &Layout, input_ids: &[u64]) -> LayoutReport {
    let placed = &layout.placed;

    let mut overlaps: Vec<(u64, u64)> = (0..placed.len())
        .into_par_iter()
        .flat_map_iter(|i| {
            let a = &placed[i];
            placed[i + 1..]
                .iter()
                .filter(move |b| a.overlaps(b))
                .map(move |b| (a.id, b.id))
        })
        .collect();
    overlaps.sort_unstable();

    let cw = layout.canvas.width as f64;
    let ch = layout.canvas.height as f64;
    let mut out_of_bounds: Vec<u64> = placed
        .par_iter()
        .filter(|p| !in_bounds(p, cw, ch))
        .map(|p| p.id)
        .collect();
    out_of_bounds.sort_unstable();

    let placed_area: f64 = placed.iter().map(PlacedItem::area).sum();
    let void_area: f64 = layout.free.iter().map(|r| r.area()).sum();
    let canvas_area = layout.canvas.area();

    LayoutReport {
        overlaps,
        out_of_bounds,
        conservation_errors: conservation_errors(layout, input_ids),
        coverage: layout.coverage(),
        fully_accounted: (placed_area + void_area - canvas_area).abs() < 1e-6 * canvas_area.max(1.0),
    }
}

fn in_bounds(p: &PlacedItem, canvas_w: f64, canvas_h: f64) -> bool {
    p.width > 0.0
        && p.height > 0.0
        && p.x >= 0.0
        && p.y >= 0.0
        && p.right() <= canvas_w
        && p.bottom() <= canvas_h
}

fn conservation_errors(layout: &Layout, input_ids: &[u64]) -> Vec<u64> {
    let mut counts: HashMap<u64, i64> = HashMap::with_capacity(input_ids.len());
    for &id in input_ids {
        *counts.entry(id).or_default() += 1;
    }
    for id in layout
        .placed
        .iter()
        .map(|p| p.id)
        .chain(layout.dropped.iter().map(|d| d.id))
    {
        *counts.entry(id).or_default() -= 1;
    }

    let mut errors: Vec<u64> = counts
        .into_iter()
        .filter(|&(_, count)| count != 0)
        .map(|(id, _)| id)
        .collect();
    errors.sort_unstable();
    errors
}
