pub mod colors;
pub mod labels;
pub mod preview;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::layout::{Layout, PlacedItem};

/// Drawing backend for a collage. Image decoding and compositing live behind
/// this trait; the layout only decides where each cover goes.
pub trait Compositor {
    /// Draw the `cover.crop` part of the art at `cover.url` over the whole tile.
    fn draw_cover(&mut self, tile: &PlacedItem, cover: &CoverRequest) -> Result<()>;

    /// Fallback content for a tile whose cover could not be drawn.
    fn draw_placeholder(&mut self, tile: &PlacedItem);

    /// Overlay a short text badge on the tile.
    fn draw_badge(&mut self, tile: &PlacedItem, text: &str);
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Overlay playtime on each tile
    pub show_playtime: bool,
    /// Tiles narrower than this get no badge
    pub min_badge_width: f64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            show_playtime: true,
            min_badge_width: 80.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub covers: usize,
    pub placeholders: usize,
    pub badges: usize,
}

/// Pixel size of the portrait art `asset_url` points at.
pub const COVER_ART_SIZE: (f64, f64) = (600.0, 900.0);

/// Which art goes into a tile, and which part of it.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverRequest {
    pub url: String,
    /// `(sx, sy, sw, sh)` in art pixels
    pub crop: (f64, f64, f64, f64),
}

impl CoverRequest {
    pub fn for_tile(tile: &PlacedItem) -> Self {
        let (art_w, art_h) = COVER_ART_SIZE;
        Self {
            url: asset_url(tile.id),
            crop: cover_crop(art_w, art_h, tile.width, tile.height),
        }
    }
}

/// Portrait library art for an app id.
pub fn asset_url(id: u64) -> String {
    format!(
        "https://cdn.cloudflare.steamstatic.com/steam/apps/{}/library_600x900.jpg",
        id
    )
}

/// Source region `(sx, sy, sw, sh)` of a `src_w`×`src_h` image that, scaled,
/// exactly covers a `dst_w`×`dst_h` tile while keeping its aspect ratio.
pub fn cover_crop(src_w: f64, src_h: f64, dst_w: f64, dst_h: f64) -> (f64, f64, f64, f64) {
    if src_w <= 0.0 || src_h <= 0.0 || dst_w <= 0.0 || dst_h <= 0.0 {
        return (0.0, 0.0, src_w.max(0.0), src_h.max(0.0));
    }
    let scale = (dst_w / src_w).max(dst_h / src_h);
    let sw = dst_w / scale;
    let sh = dst_h / scale;
    ((src_w - sw) / 2.0, (src_h - sh) / 2.0, sw, sh)
}

/// Draw every placed tile. A cover that fails to draw gets a placeholder;
/// nothing here aborts the render.
pub fn render_layout<C: Compositor>(
    layout: &Layout,
    compositor: &mut C,
    options: &RenderOptions,
) -> RenderStats {
    let mut stats = RenderStats::default();

    for tile in &layout.placed {
        let cover = CoverRequest::for_tile(tile);
        match compositor.draw_cover(tile, &cover) {
            Ok(()) => stats.covers += 1,
            Err(e) => {
                tracing::warn!("Cover for '{}' ({}) unavailable: {:#}", tile.name, tile.id, e);
                compositor.draw_placeholder(tile);
                stats.placeholders += 1;
            }
        }

        if options.show_playtime && tile.width >= options.min_badge_width {
            compositor.draw_badge(tile, &labels::format_playtime(tile.weight));
            stats.badges += 1;
        }
    }

    tracing::debug!(
        "Rendered {} covers, {} placeholders, {} badges",
        stats.covers,
        stats.placeholders,
        stats.badges
    );
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::canvas::Canvas;
    use compact_str::CompactString;

    #[derive(Default)]
    struct Recorder {
        missing: Vec<u64>,
        calls: Vec<String>,
        crops: Vec<(u64, (f64, f64, f64, f64))>,
    }

    impl Compositor for Recorder {
        fn draw_cover(&mut self, tile: &PlacedItem, cover: &CoverRequest) -> Result<()> {
            if self.missing.contains(&tile.id) {
                anyhow::bail!("404 for {}", cover.url);
            }
            self.calls.push(format!("cover {}", tile.id));
            self.crops.push((tile.id, cover.crop));
            Ok(())
        }

        fn draw_placeholder(&mut self, tile: &PlacedItem) {
            self.calls.push(format!("placeholder {}", tile.id));
        }

        fn draw_badge(&mut self, tile: &PlacedItem, text: &str) {
            self.calls.push(format!("badge {} {}", tile.id, text));
        }
    }

    fn tile(id: u64, width: f64, weight: u64) -> PlacedItem {
        PlacedItem {
            id,
            name: CompactString::new("g"),
            weight,
            x: 0.0,
            y: 0.0,
            width,
            height: width * 1.5,
        }
    }

    #[test]
    fn missing_covers_fall_back_to_placeholders() {
        let mut layout = Layout::empty(Canvas::new(1200, 1200));
        layout.placed = vec![tile(1, 200.0, 600), tile(2, 60.0, 5), tile(3, 120.0, 90)];
        let mut recorder = Recorder {
            missing: vec![3],
            ..Recorder::default()
        };

        let stats = render_layout(&layout, &mut recorder, &RenderOptions::default());
        assert_eq!(
            stats,
            RenderStats {
                covers: 2,
                placeholders: 1,
                badges: 2
            }
        );
        assert_eq!(
            recorder.calls,
            vec!["cover 1", "badge 1 10 h", "cover 2", "placeholder 3", "badge 3 1.5 h"]
        );
    }

    #[test]
    fn badges_can_be_disabled() {
        let mut layout = Layout::empty(Canvas::new(1200, 1200));
        layout.placed = vec![tile(1, 200.0, 600)];
        let options = RenderOptions {
            show_playtime: false,
            ..RenderOptions::default()
        };
        let stats = render_layout(&layout, &mut Recorder::default(), &options);
        assert_eq!(stats.badges, 0);
    }

    #[test]
    fn compositor_gets_the_crop_for_each_tile() {
        let mut layout = Layout::empty(Canvas::new(1200, 1200));
        let mut square = tile(2, 300.0, 60);
        square.height = 300.0;
        layout.placed = vec![tile(1, 300.0, 600), square];

        let mut recorder = Recorder::default();
        render_layout(&layout, &mut recorder, &RenderOptions::default());
        assert_eq!(
            recorder.crops,
            vec![(1, (0.0, 0.0, 600.0, 900.0)), (2, (0.0, 150.0, 600.0, 600.0))]
        );
    }

    #[test]
    fn asset_url_is_keyed_on_id() {
        assert_eq!(
            asset_url(440),
            "https://cdn.cloudflare.steamstatic.com/steam/apps/440/library_600x900.jpg"
        );
    }

    #[test]
    fn cover_crop_trims_the_long_side() {
        // 600x900 art into a square tile: keep full width, trim top and bottom
        let (sx, sy, sw, sh) = cover_crop(600.0, 900.0, 300.0, 300.0);
        assert_eq!((sx, sw), (0.0, 600.0));
        assert_eq!((sy, sh), (150.0, 600.0));

        // matching aspect: whole image
        assert_eq!(cover_crop(600.0, 900.0, 60.0, 90.0), (0.0, 0.0, 600.0, 900.0));
    }
}
