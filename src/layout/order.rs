use std::cmp::Ordering;

use super::SizedItem;

/// Deterministic pseudo-random value in [0, 1) derived from an item id.
/// Used to shuffle tiles of the same size without real randomness.
pub fn jitter(id: u64) -> f64 {
    let v = (id as f64 * 12.9898).sin() * 43_758.545_3;
    (v - v.floor()) % 1.0
}

/// Packing order: largest tiles first, then most played, then lowest id.
/// With `jitter`, tiles of the same size are ordered by `jitter(id)` instead
/// of playtime.
pub fn packing_cmp(a: &SizedItem, b: &SizedItem, use_jitter: bool) -> Ordering {
    let by_size = b
        .height
        .total_cmp(&a.height)
        .then(b.width.total_cmp(&a.width));

    let tie_break = if use_jitter {
        jitter(a.id).total_cmp(&jitter(b.id))
    } else {
        b.weight.cmp(&a.weight)
    };

    by_size.then(tie_break).then(a.id.cmp(&b.id))
}

pub fn sort_for_packing(items: &mut [SizedItem], use_jitter: bool) {
    items.sort_by(|a, b| packing_cmp(a, b, use_jitter));
}

/// Ascending size order used by the shelf pass.
pub fn smallest_first_cmp(a: &SizedItem, b: &SizedItem) -> Ordering {
    a.area()
        .total_cmp(&b.area())
        .then(a.height.total_cmp(&b.height))
        .then(a.id.cmp(&b.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use compact_str::CompactString;

    fn tile(id: u64, weight: u64, width: f64, height: f64) -> SizedItem {
        SizedItem {
            id,
            name: CompactString::new("t"),
            weight,
            width,
            height,
        }
    }

    #[test]
    fn jitter_is_a_pure_function_of_id() {
        for id in [0, 1, 7, 440, 1_245_620] {
            let j = jitter(id);
            assert!((0.0..1.0).contains(&j), "jitter({}) = {}", id, j);
            assert_eq!(j, jitter(id));
        }
        assert_ne!(jitter(10), jitter(11));
    }

    #[test]
    fn larger_tiles_come_first_with_id_tie_break() {
        let mut items = vec![
            tile(3, 10, 60.0, 90.0),
            tile(1, 10, 60.0, 90.0),
            tile(2, 900, 200.0, 300.0),
            tile(4, 50, 60.0, 90.0),
        ];
        sort_for_packing(&mut items, false);
        let ids: Vec<u64> = items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![2, 4, 1, 3]);
    }

    #[test]
    fn jitter_only_reorders_within_a_size_tier() {
        let mut items: Vec<SizedItem> = (1..=20).map(|id| tile(id, id * 3, 60.0, 90.0)).collect();
        items.push(tile(99, 1, 200.0, 300.0));
        sort_for_packing(&mut items, true);
        assert_eq!(items[0].id, 99);

        let mut again = items.clone();
        again.reverse();
        sort_for_packing(&mut again, true);
        assert_eq!(items, again);

        let tier: Vec<u64> = items[1..].iter().map(|i| i.id).collect();
        let by_weight: Vec<u64> = (1..=20).rev().collect();
        assert_ne!(tier, by_weight, "jitter should break the playtime ordering");
    }

    #[test]
    fn shelf_order_is_ascending() {
        let mut items = vec![tile(1, 0, 60.0, 90.0), tile(2, 0, 30.0, 45.0), tile(3, 0, 30.0, 45.0)];
        items.sort_by(smallest_first_cmp);
        let ids: Vec<u64> = items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }
}
