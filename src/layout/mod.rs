pub mod canvas;
pub mod free_rects;
pub mod grid;
pub mod order;
pub mod packer;
pub mod shelf;
pub mod size;
pub mod validate;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

use self::canvas::{Canvas, CanvasConfig};
use self::free_rects::{FreeRect, SplitStrategy};
use self::size::SizeModel;

/// One game entry from the library: playtime in minutes is the weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: u64,
    pub name: CompactString,
    pub weight: u64,
}

impl Item {
    pub fn new(id: u64, name: &str, weight: u64) -> Self {
        Self {
            id,
            name: CompactString::new(name),
            weight,
        }
    }
}

/// An item with tile dimensions derived from its weight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SizedItem {
    pub id: u64,
    pub name: CompactString,
    pub weight: u64,
    pub width: f64,
    pub height: f64,
}

impl SizedItem {
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Pin the item's top-left corner at `(x, y)`.
    pub fn place(&self, x: f64, y: f64) -> PlacedItem {
        PlacedItem {
            id: self.id,
            name: self.name.clone(),
            weight: self.weight,
            x,
            y,
            width: self.width,
            height: self.height,
        }
    }
}

/// A positioned tile in the collage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedItem {
    pub id: u64,
    pub name: CompactString,
    pub weight: u64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PlacedItem {
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Interiors intersect. Tiles that only share an edge do not overlap.
    pub fn overlaps(&self, other: &PlacedItem) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// Which placement algorithm produces the layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutMode {
    /// Best-area-fit free-rect packing followed by the shelf fill-in pass.
    #[default]
    Packed,
    /// Uniform grid, one cell per item.
    Grid,
}

/// Configuration for collage layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub mode: LayoutMode,
    /// Tile width / height (2/3 matches portrait library art)
    pub aspect_ratio: f64,
    pub size: SizeModel,
    pub canvas: CanvasConfig,
    pub split: SplitStrategy,
    /// Shuffle equal-sized tiles by an id-seeded hash instead of playtime
    pub jitter: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            mode: LayoutMode::Packed,
            aspect_ratio: 2.0 / 3.0,
            size: SizeModel::default(),
            canvas: CanvasConfig::default(),
            split: SplitStrategy::Horizontal,
            jitter: false,
        }
    }
}

impl LayoutConfig {
    /// Replace values the layout cannot work with by their defaults.
    pub fn validated(mut self) -> Self {
        let defaults = Self::default();
        if !(self.aspect_ratio.is_finite() && self.aspect_ratio > 0.0) {
            tracing::warn!(
                "Invalid tile aspect ratio {}, using {:.3}",
                self.aspect_ratio,
                defaults.aspect_ratio
            );
            self.aspect_ratio = defaults.aspect_ratio;
        }
        self.size = self.size.validated();
        self.canvas = self.canvas.validated();
        self
    }
}

/// The full layout result handed to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub canvas: Canvas,
    pub placed: Vec<PlacedItem>,
    /// Items no void could take. Not an error; callers may report them.
    pub dropped: Vec<SizedItem>,
    /// Voids left once placement finished
    pub free: Vec<FreeRect>,
}

impl Layout {
    pub fn empty(canvas: Canvas) -> Self {
        Self {
            canvas,
            placed: Vec::new(),
            dropped: Vec::new(),
            free: vec![FreeRect::new(0.0, 0.0, canvas.width as f64, canvas.height as f64)],
        }
    }

    pub fn dropped_count(&self) -> usize {
        self.dropped.len()
    }

    /// Fraction of the canvas covered by tiles.
    pub fn coverage(&self) -> f64 {
        let canvas_area = self.canvas.area();
        if canvas_area <= 0.0 {
            return 0.0;
        }
        self.placed.iter().map(PlacedItem::area).sum::<f64>() / canvas_area
    }
}

/// Compute the collage layout for a library.
pub fn compute_layout(items: &[Item], config: &LayoutConfig) -> Layout {
    if items.is_empty() {
        let canvas = config.canvas.default_canvas();
        tracing::debug!("No items to lay out, returning empty {}x{} canvas", canvas.width, canvas.height);
        return Layout::empty(canvas);
    }

    let mut sized: Vec<SizedItem> = items
        .iter()
        .map(|item| size::sized_item(item, config.aspect_ratio, &config.size))
        .collect();
    order::sort_for_packing(&mut sized, config.jitter);

    let tile_area: f64 = sized.iter().map(SizedItem::area).sum();
    let canvas = canvas::canvas_for_tiles(sized.len(), tile_area, &config.canvas);

    tracing::info!(
        "Laying out {} items on {}x{} canvas ({:?} mode)",
        sized.len(),
        canvas.width,
        canvas.height,
        config.mode
    );

    let layout = match config.mode {
        LayoutMode::Grid => grid::grid_layout(&sized, canvas),
        LayoutMode::Packed => {
            let packed = packer::pack(&sized, canvas, config.split);
            tracing::debug!(
                "Primary pack placed {} items, {} overflow, {} voids",
                packed.placed.len(),
                packed.overflow.len(),
                packed.free.len()
            );

            let filled = shelf::fill_in(packed.overflow, packed.free);
            let mut placed = packed.placed;
            placed.extend(filled.placed);

            Layout {
                canvas,
                placed,
                dropped: filled.dropped,
                free: filled.free,
            }
        }
    };

    if !layout.dropped.is_empty() {
        tracing::debug!(
            "{} items did not fit the canvas and were left out",
            layout.dropped.len()
        );
    }
    tracing::info!(
        "Layout computed: {} tiles, {:.1}% coverage",
        layout.placed.len(),
        layout.coverage() * 100.0
    );

    layout
}
