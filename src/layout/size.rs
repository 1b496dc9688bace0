// Playtime → tile size.
//
// Area grows monotonically with playtime between a minimum and a maximum
// tile. The default scale is square-root quantised into a handful of tiers,
// so libraries full of similar playtimes collapse into identical tiles that
// pack cleanly.

use serde::{Deserialize, Serialize};

use super::{Item, SizedItem};

/// How playtime maps onto the [0, 1] range between the smallest and largest tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeScale {
    Linear,
    SquareRoot,
    /// Square-root scale snapped to `SizeModel::tiers` discrete levels.
    #[default]
    Tiered,
}

/// Parameters of the playtime → area mapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizeModel {
    pub scale: SizeScale,
    /// Number of discrete levels for `SizeScale::Tiered`
    pub tiers: u8,
    /// Height of the smallest tile (units)
    pub min_tile_height: f64,
    /// Height of the largest tile (units)
    pub max_tile_height: f64,
    /// Playtime (minutes) at which a tile reaches full size
    pub reference_weight: u64,
}

impl Default for SizeModel {
    fn default() -> Self {
        Self {
            scale: SizeScale::Tiered,
            tiers: 8,
            min_tile_height: 90.0,
            max_tile_height: 540.0,
            reference_weight: 6_000, // 100 hours
        }
    }
}

impl SizeModel {
    /// Replace values the size model cannot work with by their defaults.
    pub fn validated(mut self) -> Self {
        let defaults = Self::default();
        if self.tiers == 0 {
            self.tiers = defaults.tiers;
        }
        if !(self.min_tile_height.is_finite() && self.min_tile_height >= 1.0) {
            self.min_tile_height = defaults.min_tile_height;
        }
        if !(self.max_tile_height.is_finite() && self.max_tile_height >= self.min_tile_height) {
            self.max_tile_height = self.min_tile_height.max(defaults.max_tile_height);
        }
        if self.reference_weight == 0 {
            self.reference_weight = defaults.reference_weight;
        }
        self
    }

    /// Tier (1-based) a weight falls into under the tiered scale.
    pub fn tier_of(&self, weight: u64) -> u8 {
        let tiers = self.tiers.max(1);
        let t = self.sqrt_fraction(weight);
        ((t * tiers as f64).ceil() as u8).clamp(1, tiers)
    }

    /// Number of weights per tier. Index `t` counts tier `t`; index 0 stays empty.
    pub fn tier_histogram(&self, weights: impl IntoIterator<Item = u64>) -> Vec<usize> {
        let mut counts = vec![0usize; self.tiers.max(1) as usize + 1];
        for weight in weights {
            counts[self.tier_of(weight) as usize] += 1;
        }
        counts
    }

    fn linear_fraction(&self, weight: u64) -> f64 {
        let w = weight.max(1) as f64;
        (w / self.reference_weight.max(1) as f64).min(1.0)
    }

    fn sqrt_fraction(&self, weight: u64) -> f64 {
        self.linear_fraction(weight).sqrt()
    }

    /// Position of `weight` between the smallest (0) and largest (1) tile.
    pub fn fraction(&self, weight: u64) -> f64 {
        match self.scale {
            SizeScale::Linear => self.linear_fraction(weight),
            SizeScale::SquareRoot => self.sqrt_fraction(weight),
            SizeScale::Tiered => {
                let tiers = self.tiers.max(1);
                if tiers == 1 {
                    return 0.0;
                }
                (self.tier_of(weight) - 1) as f64 / (tiers - 1) as f64
            }
        }
    }
}

/// Tile dimensions for a weight. Zero weight is treated as one minute and
/// every tile is at least 1×1.
pub fn size_of(weight: u64, aspect_ratio: f64, model: &SizeModel) -> (f64, f64) {
    let min_area = model.min_tile_height * model.min_tile_height * aspect_ratio;
    let max_area = model.max_tile_height * model.max_tile_height * aspect_ratio;
    let area = min_area + model.fraction(weight) * (max_area - min_area);

    let height = (area / aspect_ratio).sqrt().round().max(1.0);
    let width = (height * aspect_ratio).round().max(1.0);
    (width, height)
}

pub fn sized_item(item: &Item, aspect_ratio: f64, model: &SizeModel) -> SizedItem {
    let (width, height) = size_of(item.weight, aspect_ratio, model);
    SizedItem {
        id: item.id,
        name: item.name.clone(),
        weight: item.weight,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ASPECT: f64 = 2.0 / 3.0;

    fn area(weight: u64, model: &SizeModel) -> f64 {
        let (w, h) = size_of(weight, ASPECT, model);
        w * h
    }

    #[test]
    fn area_is_monotonic_for_every_scale() {
        for scale in [SizeScale::Linear, SizeScale::SquareRoot, SizeScale::Tiered] {
            let model = SizeModel {
                scale,
                ..SizeModel::default()
            };
            let mut prev = 0.0;
            for weight in (0..20_000).step_by(37) {
                let a = area(weight, &model);
                assert!(a >= prev, "{:?}: area shrank at weight {}", scale, weight);
                prev = a;
            }
        }
    }

    #[test]
    fn zero_weight_gets_the_minimum_tile() {
        let model = SizeModel::default();
        let (w, h) = size_of(0, ASPECT, &model);
        assert_eq!((w, h), (60.0, 90.0));
        assert_eq!(size_of(0, ASPECT, &model), size_of(1, ASPECT, &model));
    }

    #[test]
    fn tiny_tiles_never_collapse_to_zero() {
        let model = SizeModel {
            min_tile_height: 1.0,
            max_tile_height: 1.0,
            ..SizeModel::default()
        };
        let (w, h) = size_of(0, 0.01, &model);
        assert!(w >= 1.0 && h >= 1.0);
    }

    #[test]
    fn tiers_are_bounded_and_collapse_similar_playtimes() {
        let model = SizeModel::default();
        assert_eq!(model.tier_of(0), 1);
        assert_eq!(model.tier_of(60), 1);
        assert_eq!(model.tier_of(6_000), 8);
        assert_eq!(model.tier_of(600_000), 8);
        assert_eq!(size_of(40, ASPECT, &model), size_of(60, ASPECT, &model));
    }

    #[test]
    fn tier_histogram_counts_every_weight() {
        let model = SizeModel::default();
        let counts = model.tier_histogram([0, 60, 6_000, 600_000, 600]);
        assert_eq!(counts.len(), 9);
        assert_eq!(counts[0], 0);
        assert_eq!(counts[1], 2);
        assert_eq!(counts[3], 1);
        assert_eq!(counts[8], 2);

        // an unvalidated zero-tier model still has a bucket for tier 1
        let flat = SizeModel {
            tiers: 0,
            ..SizeModel::default()
        };
        assert_eq!(flat.tier_histogram([0, 10_000]), vec![0, 2]);
    }

    #[test]
    fn reference_weight_reaches_the_largest_tile() {
        let model = SizeModel::default();
        let (w, h) = size_of(6_000, ASPECT, &model);
        assert_eq!((w, h), (360.0, 540.0));
    }

    #[test]
    fn aspect_ratio_is_preserved() {
        let model = SizeModel {
            scale: SizeScale::SquareRoot,
            ..SizeModel::default()
        };
        let (w, h) = size_of(1_500, ASPECT, &model);
        assert!((w / h - ASPECT).abs() < 0.01);
    }

    #[test]
    fn validated_fixes_inverted_bounds() {
        let model = SizeModel {
            tiers: 0,
            min_tile_height: 200.0,
            max_tile_height: 100.0,
            ..SizeModel::default()
        }
        .validated();
        assert_eq!(model.tiers, 8);
        assert!(model.max_tile_height >= model.min_tile_height);
    }
}
