use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use playtime_collage::config::load_config;
use playtime_collage::layout::compute_layout;
use playtime_collage::library::load_library;
use playtime_collage::render::preview::PreviewCanvas;
use playtime_collage::render::render_layout;

const USAGE: &str = "usage: collage <library.json> [output.png] [config.json]";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("playtime_collage=info".parse()?),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let library_path = args.next().map(PathBuf::from).context(USAGE)?;
    let output_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("collage.png"));
    let config_path = args.next().map(PathBuf::from);

    let config = load_config(config_path.as_deref())?;
    let library = load_library(&library_path, &config.library)?;

    let layout = compute_layout(&library.items, &config.layout);
    if layout.dropped_count() > 0 {
        tracing::info!(
            "{} of {} games did not fit the canvas",
            layout.dropped_count(),
            library.items.len()
        );
    }

    let mut canvas = PreviewCanvas::new(layout.canvas, config.layout.size);
    let stats = render_layout(&layout, &mut canvas, &config.render);
    canvas.save_png(&output_path)?;

    let layout_path = output_path.with_extension("json");
    write_layout_json(&layout_path, &layout)?;

    tracing::info!(
        "Wrote {}x{} collage with {} tiles to {} (layout in {})",
        layout.canvas.width,
        layout.canvas.height,
        stats.covers + stats.placeholders,
        output_path.display(),
        layout_path.display()
    );

    Ok(())
}

/// Tile positions for an external compositor that fetches the real cover art.
fn write_layout_json(path: &Path, layout: &playtime_collage::layout::Layout) -> Result<()> {
    let json = serde_json::to_string_pretty(layout).context("Failed to serialize layout")?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}
