/// End-to-end validation tool
/// Tests: Library → Layout → Validation → Preview pipeline on a real export
use playtime_collage::config::load_config;
use playtime_collage::layout::compute_layout;
use playtime_collage::layout::validate::validate;
use playtime_collage::library::load_library;
use playtime_collage::render::preview::PreviewCanvas;
use playtime_collage::render::render_layout;
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("playtime_collage=info".parse()?),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let library_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("library.json"));
    let config_path = args.next().map(PathBuf::from);

    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║          PLAYTIME COLLAGE LAYOUT VALIDATION TOOL             ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Library: {}", library_path.display());
    println!();

    let config = load_config(config_path.as_deref())?;

    // === STAGE 1: LIBRARY ===
    println!("┌─ STAGE 1: LIBRARY INGESTION ───────────────────────────────┐");
    let start = std::time::Instant::now();
    let library = load_library(&library_path, &config.library)?;
    let load_duration = start.elapsed();

    let stats = library.stats;
    println!("  ✓ Loaded in {:.2}ms", load_duration.as_secs_f64() * 1000.0);
    println!("  ✓ Games:    {} (from {} records)", library.items.len(), stats.records);
    println!("  ✓ Playtime: {:.1} h total", stats.total_minutes as f64 / 60.0);
    if stats.skipped > 0 || stats.invalid_weights > 0 {
        println!(
            "  ⚠ WARNING: {} records skipped, {} playtimes clamped",
            stats.skipped, stats.invalid_weights
        );
    }
    println!("└────────────────────────────────────────────────────────────┘");
    println!();

    if library.items.is_empty() {
        println!("✗ FAILED: No games found!");
        return Ok(());
    }

    // === STAGE 2: LAYOUT ===
    println!("┌─ STAGE 2: LAYOUT ({:?}) ─────────────────────────────────┐", config.layout.mode);
    let start = std::time::Instant::now();
    let layout = compute_layout(&library.items, &config.layout);
    let layout_duration = start.elapsed();

    println!("  ✓ Layout computed in {:.2}ms", layout_duration.as_secs_f64() * 1000.0);
    println!("  ✓ Canvas:   {}x{}", layout.canvas.width, layout.canvas.height);
    println!("  ✓ Tiles:    {} placed, {} dropped", layout.placed.len(), layout.dropped_count());
    println!("  ✓ Voids:    {}", layout.free.len());
    println!("└────────────────────────────────────────────────────────────┘");
    println!();

    // === STAGE 3: VALIDATION ===
    println!("┌─ STAGE 3: STRUCTURAL CHECKS ───────────────────────────────┐");
    let ids: Vec<u64> = library.items.iter().map(|i| i.id).collect();
    let report = validate(&layout, &ids);

    for (a, b) in report.overlaps.iter().take(5) {
        println!("  ✗ OVERLAP: {} and {}", a, b);
    }
    for id in report.out_of_bounds.iter().take(5) {
        println!("  ✗ OUT OF BOUNDS: {}", id);
    }
    for id in report.conservation_errors.iter().take(5) {
        println!("  ✗ LOST OR DUPLICATED: {}", id);
    }

    if !report.is_valid() {
        println!(
            "  ✗ FAILED: {} overlaps, {} out of bounds, {} conservation errors",
            report.overlaps.len(),
            report.out_of_bounds.len(),
            report.conservation_errors.len()
        );
        return Ok(());
    }

    println!("  ✓ No overlaps, all tiles inside the canvas");
    println!("  ✓ Every game placed or reported as dropped");
    println!("  ✓ Coverage: {:.1}% of canvas", report.coverage * 100.0);
    if report.fully_accounted {
        println!("  ✓ Tiles and voids tile the canvas exactly");
    } else {
        println!("  ⚠ WARNING: tiles and voids do not add up to the canvas area");
    }
    println!("└────────────────────────────────────────────────────────────┘");
    println!();

    // === STAGE 4: PREVIEW ===
    println!("┌─ STAGE 4: PREVIEW RASTERIZATION ──────────────────────────┐");
    let start = std::time::Instant::now();
    let mut preview = PreviewCanvas::new(layout.canvas, config.layout.size);
    let render_stats = render_layout(&layout, &mut preview, &config.render);
    let png = preview.encode_png()?;
    let raster_duration = start.elapsed();

    let expected_size = preview.width() * preview.height() * 4;
    println!("  ✓ Rasterized in {:.2}ms", raster_duration.as_secs_f64() * 1000.0);
    println!("  ✓ Buffer size: {} bytes (expected: {})", preview.pixels().len(), expected_size);
    println!(
        "  ✓ Drawn: {} covers, {} placeholders, {} badges",
        render_stats.covers, render_stats.placeholders, render_stats.badges
    );
    println!("  ✓ PNG: {} bytes", png.len());

    if preview.pixels().len() != expected_size {
        println!("  ✗ FAILED: Buffer size mismatch!");
        return Ok(());
    }
    println!("└────────────────────────────────────────────────────────────┘");
    println!();

    // === FINAL SUMMARY ===
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║                    ✓ ALL CHECKS PASSED                       ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Pipeline summary:");
    println!("  • Library:      {:.2}ms", load_duration.as_secs_f64() * 1000.0);
    println!("  • Layout:       {:.2}ms", layout_duration.as_secs_f64() * 1000.0);
    println!("  • Rasterize:    {:.2}ms", raster_duration.as_secs_f64() * 1000.0);

    Ok(())
}
