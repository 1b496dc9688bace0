use std::path::Path;

use anyhow::{Context, Result};
use png::{BitDepth, ColorType, Encoder};

use super::colors::{self, AppColor};
use super::{Compositor, CoverRequest};
use crate::layout::canvas::Canvas;
use crate::layout::size::SizeModel;
use crate::layout::PlacedItem;

/// CPU rasterizer that draws each tile as a flat color block. Used for
/// previews and diagnostics where no cover art is available.
pub struct PreviewCanvas {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
    size_model: SizeModel,
}

impl PreviewCanvas {
    pub fn new(canvas: Canvas, size_model: SizeModel) -> Self {
        let width = canvas.width as usize;
        let height = canvas.height as usize;
        let mut pixels = vec![0u8; width * height * 4];
        let bg = colors::BACKGROUND.to_rgba8();
        for pixel in pixels.chunks_exact_mut(4) {
            pixel.copy_from_slice(&bg);
        }
        Self {
            width,
            height,
            pixels,
            size_model,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * 4;
        let mut px = [0u8; 4];
        px.copy_from_slice(&self.pixels[idx..idx + 4]);
        Some(px)
    }

    /// Fill `[x0, x1) × [y0, y1)` clamped to the buffer.
    fn fill(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, color: AppColor) {
        let px0 = (x0.max(0.0) as usize).min(self.width);
        let py0 = (y0.max(0.0) as usize).min(self.height);
        let px1 = (x1.max(0.0).ceil() as usize).min(self.width);
        let py1 = (y1.max(0.0).ceil() as usize).min(self.height);
        let rgba = color.to_rgba8();

        for py in py0..py1 {
            let row = py * self.width;
            for px in px0..px1 {
                let idx = (row + px) * 4;
                self.pixels[idx..idx + 4].copy_from_slice(&rgba);
            }
        }
    }

    /// Solid tile with a one unit darker frame so neighbours stay apart.
    fn fill_tile(&mut self, tile: &PlacedItem, color: AppColor) {
        self.fill(tile.x, tile.y, tile.right(), tile.bottom(), color.darken(0.12));
        if tile.width > 2.0 && tile.height > 2.0 {
            self.fill(tile.x + 1.0, tile.y + 1.0, tile.right() - 1.0, tile.bottom() - 1.0, color);
        }
    }

    /// PNG bytes of the current buffer.
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        {
            let mut enc = Encoder::new(&mut buf, self.width as u32, self.height as u32);
            enc.set_color(ColorType::Rgba);
            enc.set_depth(BitDepth::Eight);
            let mut writer = enc.write_header().context("Failed to write PNG header")?;
            writer
                .write_image_data(&self.pixels)
                .context("Failed to write PNG image data")?;
            writer.finish().context("Failed to finish PNG stream")?;
        }
        Ok(buf)
    }

    pub fn save_png(&self, path: &Path) -> Result<()> {
        let bytes = self.encode_png()?;
        std::fs::write(path, bytes)
            .with_context(|| format!("Failed to write preview to {}", path.display()))
    }
}

impl Compositor for PreviewCanvas {
    /// No art is fetched. A crop that trims the art is marked with a darker
    /// band across the top of the tile, as tall as the trimmed share.
    fn draw_cover(&mut self, tile: &PlacedItem, cover: &CoverRequest) -> Result<()> {
        let tier = self.size_model.tier_of(tile.weight);
        let color = colors::cover_color(tile.id, tier, self.size_model.tiers);
        self.fill_tile(tile, color);

        let (art_w, art_h) = super::COVER_ART_SIZE;
        let (_, _, sw, sh) = cover.crop;
        let trimmed = 1.0 - (sw * sh) / (art_w * art_h);
        if trimmed > 0.01 && tile.width > 2.0 && tile.height > 2.0 {
            let band = ((tile.height - 2.0) * trimmed).max(1.0);
            self.fill(
                tile.x + 1.0,
                tile.y + 1.0,
                tile.right() - 1.0,
                tile.y + 1.0 + band,
                color.darken(0.06),
            );
        }
        Ok(())
    }

    fn draw_placeholder(&mut self, tile: &PlacedItem) {
        self.fill_tile(tile, colors::PLACEHOLDER);
    }

    /// Text is not rasterized; the badge strip marks where the label goes.
    fn draw_badge(&mut self, tile: &PlacedItem, _text: &str) {
        let strip = (tile.height / 6.0).clamp(1.0, 24.0);
        self.fill(
            tile.x + 1.0,
            tile.bottom() - 1.0 - strip,
            tile.right() - 1.0,
            tile.bottom() - 1.0,
            AppColor::new(0.0, 0.0, 0.0),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use compact_str::CompactString;

    fn tile(id: u64, x: f64, y: f64, w: f64, h: f64) -> PlacedItem {
        PlacedItem {
            id,
            name: CompactString::new("g"),
            weight: 600,
            x,
            y,
            width: w,
            height: h,
        }
    }

    #[test]
    fn new_canvas_is_background() {
        let preview = PreviewCanvas::new(Canvas::new(4, 3), SizeModel::default());
        assert_eq!(preview.pixels().len(), 4 * 3 * 4);
        assert_eq!(preview.pixel(3, 2), Some(colors::BACKGROUND.to_rgba8()));
        assert_eq!(preview.pixel(4, 0), None);
    }

    #[test]
    fn cover_fills_only_its_tile() {
        let mut preview = PreviewCanvas::new(Canvas::new(20, 20), SizeModel::default());
        let cover = tile(440, 5.0, 5.0, 10.0, 15.0);
        preview.draw_cover(&cover, &CoverRequest::for_tile(&cover)).unwrap();
        assert_ne!(preview.pixel(10, 10), Some(colors::BACKGROUND.to_rgba8()));
        assert_eq!(preview.pixel(4, 4), Some(colors::BACKGROUND.to_rgba8()));
        assert_eq!(preview.pixel(15, 19), Some(colors::BACKGROUND.to_rgba8()));
    }

    #[test]
    fn trimmed_crop_is_marked_on_the_tile() {
        let model = SizeModel::default();
        let portrait = tile(440, 0.0, 0.0, 20.0, 30.0);
        let square = tile(440, 0.0, 0.0, 30.0, 30.0);

        let mut whole = PreviewCanvas::new(Canvas::new(40, 40), model);
        whole.draw_cover(&portrait, &CoverRequest::for_tile(&portrait)).unwrap();
        // interior top and bottom share one flat color
        assert_eq!(whole.pixel(10, 2), whole.pixel(10, 27));

        let mut trimmed = PreviewCanvas::new(Canvas::new(40, 40), model);
        trimmed.draw_cover(&square, &CoverRequest::for_tile(&square)).unwrap();
        assert_ne!(trimmed.pixel(10, 2), trimmed.pixel(10, 27));
    }

    #[test]
    fn png_has_signature() {
        let preview = PreviewCanvas::new(Canvas::new(8, 8), SizeModel::default());
        let bytes = preview.encode_png().unwrap();
        assert_eq!(&bytes[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }
}
