// Bookkeeping of unused canvas area.
//
// The packer owns one `FreeRectSet` per run. Together with the placed tiles
// the free rects tile the canvas exactly: every guillotine split hands the
// whole consumed rect back as the tile plus its remainders.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::canvas::Canvas;

/// An unused rectangular region of the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FreeRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl FreeRect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    pub fn fits(&self, width: f64, height: f64) -> bool {
        width <= self.width && height <= self.height
    }

    /// `other` lies entirely inside `self` (edges may coincide).
    pub fn contains(&self, other: &FreeRect) -> bool {
        self.x <= other.x
            && self.y <= other.y
            && self.right() >= other.right()
            && self.bottom() >= other.bottom()
    }

    /// Reading order: top to bottom, then left to right.
    pub fn position_cmp(&self, other: &FreeRect) -> Ordering {
        self.y.total_cmp(&other.y).then(self.x.total_cmp(&other.x))
    }
}

/// How the remainder of a consumed rect is cut after a tile is placed in its
/// top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitStrategy {
    /// Right remainder as tall as the tile, bottom remainder full width.
    ///
    /// ```text
    /// tile|AA
    /// ----+--
    /// BBBBBBB
    /// ```
    #[default]
    Horizontal,
    /// Right remainder full height, bottom remainder as wide as the tile.
    ///
    /// ```text
    /// tile|AA
    /// ----+AA
    /// BBBB|AA
    /// ```
    Vertical,
    /// Whichever of the two cuts leaves the larger single remainder.
    MaxRemainder,
}

/// The set of voids available for placement.
#[derive(Debug, Clone, Default)]
pub struct FreeRectSet {
    rects: Vec<FreeRect>,
}

impl FreeRectSet {
    /// A set holding one rect that covers the whole canvas.
    pub fn new(canvas: Canvas) -> Self {
        Self {
            rects: vec![FreeRect::new(
                0.0,
                0.0,
                canvas.width as f64,
                canvas.height as f64,
            )],
        }
    }

    pub fn from_rects(rects: Vec<FreeRect>) -> Self {
        let mut set = Self::default();
        for rect in rects {
            set.insert(rect);
        }
        set
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FreeRect> {
        self.rects.iter()
    }

    pub fn total_area(&self) -> f64 {
        self.rects.iter().map(FreeRect::area).sum()
    }

    /// Add a void. Zero-area rects are ignored.
    pub fn insert(&mut self, rect: FreeRect) {
        if !rect.is_empty() {
            self.rects.push(rect);
        }
    }

    /// Index of the eligible rect wasting the least area around a
    /// `width`×`height` tile. Ties go to the higher, then the further-left rect.
    pub fn best_fit(&self, width: f64, height: f64) -> Option<usize> {
        let item_area = width * height;
        self.rects
            .iter()
            .enumerate()
            .filter(|(_, rect)| rect.fits(width, height))
            .min_by(|(_, a), (_, b)| {
                (a.area() - item_area)
                    .total_cmp(&(b.area() - item_area))
                    .then_with(|| a.position_cmp(b))
            })
            .map(|(index, _)| index)
    }

    /// Remove and return the rect at `index`.
    pub fn take(&mut self, index: usize) -> FreeRect {
        self.rects.swap_remove(index)
    }

    /// Return the remainders of `rect` after a `width`×`height` tile has been
    /// placed at its top-left corner.
    pub fn split(&mut self, rect: FreeRect, width: f64, height: f64, strategy: SplitStrategy) {
        let (right, bottom) = guillotine(rect, width, height, strategy);
        self.insert(right);
        self.insert(bottom);
    }

    /// Drop every rect fully contained in another one. Of two identical rects
    /// the earlier survives.
    pub fn prune(&mut self) {
        let mut i = 0;
        while i < self.rects.len() {
            let redundant = self.rects.iter().enumerate().any(|(j, other)| {
                j != i && other.contains(&self.rects[i]) && (self.rects[i] != *other || j < i)
            });
            if redundant {
                self.rects.remove(i);
            } else {
                i += 1;
            }
        }
    }

    /// Join voids that share a whole edge into one rect, until no pair is left
    /// to join. Guillotine splits leave column and row slivers that only line
    /// up across separate placements.
    pub fn merge_adjacent(&mut self) {
        'scan: loop {
            for i in 0..self.rects.len() {
                for j in 0..self.rects.len() {
                    if i == j {
                        continue;
                    }
                    if let Some(joined) = join(&self.rects[i], &self.rects[j]) {
                        self.rects[i] = joined;
                        self.rects.remove(j);
                        continue 'scan;
                    }
                }
            }
            break;
        }
    }

    pub fn into_vec(self) -> Vec<FreeRect> {
        self.rects
    }
}

/// `a` and `b` combined, if `b` continues `a` downwards or to the right.
fn join(a: &FreeRect, b: &FreeRect) -> Option<FreeRect> {
    if a.x == b.x && a.width == b.width && a.bottom() == b.y {
        Some(FreeRect::new(a.x, a.y, a.width, a.height + b.height))
    } else if a.y == b.y && a.height == b.height && a.right() == b.x {
        Some(FreeRect::new(a.x, a.y, a.width + b.width, a.height))
    } else {
        None
    }
}

fn guillotine(
    rect: FreeRect,
    width: f64,
    height: f64,
    strategy: SplitStrategy,
) -> (FreeRect, FreeRect) {
    let rest_w = rect.width - width;
    let rest_h = rect.height - height;

    let horizontal = (
        FreeRect::new(rect.x + width, rect.y, rest_w, height),
        FreeRect::new(rect.x, rect.y + height, rect.width, rest_h),
    );
    let vertical = (
        FreeRect::new(rect.x + width, rect.y, rest_w, rect.height),
        FreeRect::new(rect.x, rect.y + height, width, rest_h),
    );

    match strategy {
        SplitStrategy::Horizontal => horizontal,
        SplitStrategy::Vertical => vertical,
        SplitStrategy::MaxRemainder => {
            let largest = |(a, b): &(FreeRect, FreeRect)| a.area().max(b.area());
            if largest(&vertical) > largest(&horizontal) {
                vertical
            } else {
                horizontal
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn best_fit_prefers_least_waste_then_top_left() {
        let set = FreeRectSet::from_rects(vec![
            FreeRect::new(0.0, 500.0, 200.0, 200.0),
            FreeRect::new(300.0, 0.0, 100.0, 100.0),
            FreeRect::new(0.0, 0.0, 100.0, 100.0),
            FreeRect::new(0.0, 800.0, 50.0, 50.0),
        ]);
        // 50x50 fits nowhere better than the exact 50x50 hole
        assert_eq!(set.best_fit(50.0, 50.0), Some(3));
        // two equal 100x100 candidates: the leftmost one on the top row wins
        assert_eq!(set.best_fit(80.0, 80.0), Some(2));
        assert_eq!(set.best_fit(300.0, 10.0), None);
    }

    #[test]
    fn horizontal_split_tiles_the_consumed_rect() {
        let mut set = FreeRectSet::new(Canvas::new(100, 80));
        let rect = set.take(0);
        set.split(rect, 30.0, 20.0, SplitStrategy::Horizontal);
        let rects = set.into_vec();
        assert_eq!(
            rects,
            vec![
                FreeRect::new(30.0, 0.0, 70.0, 20.0),
                FreeRect::new(0.0, 20.0, 100.0, 60.0),
            ]
        );
    }

    #[test]
    fn vertical_split_tiles_the_consumed_rect() {
        let mut set = FreeRectSet::default();
        set.split(FreeRect::new(0.0, 0.0, 100.0, 80.0), 30.0, 20.0, SplitStrategy::Vertical);
        assert_eq!(
            set.into_vec(),
            vec![
                FreeRect::new(30.0, 0.0, 70.0, 80.0),
                FreeRect::new(0.0, 20.0, 30.0, 60.0),
            ]
        );
    }

    #[test]
    fn max_remainder_keeps_the_bigger_void_whole() {
        let mut set = FreeRectSet::default();
        // tall narrow tile in a wide rect: the full-height right remainder is larger
        set.split(FreeRect::new(0.0, 0.0, 100.0, 100.0), 10.0, 90.0, SplitStrategy::MaxRemainder);
        assert!(set.iter().any(|r| *r == FreeRect::new(10.0, 0.0, 90.0, 100.0)));
        assert!((set.total_area() - (100.0 * 100.0 - 10.0 * 90.0)).abs() < 1e-9);
    }

    #[test]
    fn exact_fit_emits_no_remainders() {
        let mut set = FreeRectSet::default();
        set.split(FreeRect::new(5.0, 5.0, 40.0, 60.0), 40.0, 60.0, SplitStrategy::Horizontal);
        assert!(set.is_empty());
    }

    #[test]
    fn merge_joins_stacked_and_side_by_side_slivers() {
        let mut set = FreeRectSet::from_rects(vec![
            FreeRect::new(250.0, 100.0, 50.0, 100.0),
            FreeRect::new(0.0, 500.0, 30.0, 20.0),
            FreeRect::new(250.0, 0.0, 50.0, 100.0),
            FreeRect::new(30.0, 500.0, 70.0, 20.0),
            FreeRect::new(400.0, 0.0, 10.0, 10.0),
        ]);
        let before = set.total_area();
        set.merge_adjacent();

        let mut rects = set.into_vec();
        rects.sort_by(FreeRect::position_cmp);
        assert_eq!(
            rects,
            vec![
                FreeRect::new(250.0, 0.0, 50.0, 200.0),
                FreeRect::new(400.0, 0.0, 10.0, 10.0),
                FreeRect::new(0.0, 500.0, 100.0, 20.0),
            ]
        );
        let after: f64 = rects.iter().map(FreeRect::area).sum();
        assert_eq!(before, after);
    }

    #[test]
    fn merge_leaves_misaligned_rects_alone() {
        let mut set = FreeRectSet::from_rects(vec![
            FreeRect::new(0.0, 0.0, 50.0, 100.0),
            FreeRect::new(0.0, 100.0, 60.0, 100.0),
        ]);
        set.merge_adjacent();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn prune_drops_contained_and_duplicate_rects() {
        let mut set = FreeRectSet::from_rects(vec![
            FreeRect::new(10.0, 10.0, 20.0, 20.0),
            FreeRect::new(0.0, 0.0, 100.0, 100.0),
            FreeRect::new(0.0, 0.0, 100.0, 100.0),
            FreeRect::new(200.0, 0.0, 10.0, 10.0),
        ]);
        set.prune();
        assert_eq!(
            set.into_vec(),
            vec![
                FreeRect::new(0.0, 0.0, 100.0, 100.0),
                FreeRect::new(200.0, 0.0, 10.0, 10.0),
            ]
        );
    }
}
