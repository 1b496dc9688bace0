use serde::{Deserialize, Serialize};

/// Output canvas dimensions. Fixed for the whole run once computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> f64 {
        self.width as f64 * self.height as f64
    }
}

/// Growth rule for the canvas: a base area up to `baseline_items`, then a
/// fixed increment per extra item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub base_width: u32,
    pub base_height: u32,
    pub baseline_items: usize,
    /// Extra area (units²) per item above the baseline
    pub area_per_item: f64,
    /// Canvas width / height
    pub aspect_ratio: f64,
    pub min_dim: u32,
    pub max_dim: u32,
    /// Dimensions snap to multiples of this
    pub grid: u32,
    /// Largest share of the canvas the tiles themselves may claim
    pub target_fill: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            base_width: 1200,
            base_height: 1200,
            baseline_items: 20,
            area_per_item: 40_000.0,
            aspect_ratio: 1.0,
            min_dim: 1200,
            max_dim: 6000,
            grid: 100,
            target_fill: 0.75,
        }
    }
}

impl CanvasConfig {
    pub fn validated(mut self) -> Self {
        let defaults = Self::default();
        if !(self.aspect_ratio.is_finite() && self.aspect_ratio > 0.0) {
            self.aspect_ratio = defaults.aspect_ratio;
        }
        if !(self.area_per_item.is_finite() && self.area_per_item >= 0.0) {
            self.area_per_item = defaults.area_per_item;
        }
        if !(self.target_fill.is_finite() && self.target_fill > 0.0 && self.target_fill <= 1.0) {
            self.target_fill = defaults.target_fill;
        }
        if self.grid == 0 {
            self.grid = 1;
        }
        if self.min_dim == 0 {
            self.min_dim = self.grid;
        }
        if self.max_dim < self.min_dim {
            self.max_dim = self.min_dim;
        }
        if self.base_width == 0 || self.base_height == 0 {
            self.base_width = defaults.base_width;
            self.base_height = defaults.base_height;
        }
        self
    }

    /// Canvas used for an empty (or baseline-sized) library.
    pub fn default_canvas(&self) -> Canvas {
        canvas_size(0, self)
    }

    fn snap(&self, dim: f64) -> u32 {
        let grid = self.grid.max(1) as f64;
        let snapped = (dim / grid).round() * grid;
        (snapped.max(0.0) as u32).clamp(self.min_dim, self.max_dim.max(self.min_dim))
    }
}

/// Canvas dimensions for a library of `item_count` items.
pub fn canvas_size(item_count: usize, config: &CanvasConfig) -> Canvas {
    canvas_for_area(count_area(item_count, config), config)
}

/// Canvas for `item_count` tiles covering `tile_area` units² in total. Never
/// smaller than `canvas_size(item_count)`, and grown until the tiles claim at
/// most `target_fill` of it, within `[min_dim, max_dim]`.
pub fn canvas_for_tiles(item_count: usize, tile_area: f64, config: &CanvasConfig) -> Canvas {
    let fill = config.target_fill.max(0.05).min(1.0);
    let by_tiles = tile_area.max(0.0) / fill;
    canvas_for_area(count_area(item_count, config).max(by_tiles), config)
}

fn count_area(item_count: usize, config: &CanvasConfig) -> f64 {
    let base_area = config.base_width as f64 * config.base_height as f64;
    let extra = item_count.saturating_sub(config.baseline_items) as f64;
    base_area + extra * config.area_per_item
}

fn canvas_for_area(area: f64, config: &CanvasConfig) -> Canvas {
    let height = (area / config.aspect_ratio).sqrt();
    let width = height * config.aspect_ratio;

    Canvas {
        width: config.snap(width),
        height: config.snap(height),
    }
}
