/// Diagnostic tool to trace library → sizing → packing → fill-in step by step
use playtime_collage::layout::canvas::{canvas_for_tiles, canvas_size};
use playtime_collage::layout::size::sized_item;
use playtime_collage::layout::{order, packer, shelf, LayoutConfig, SizedItem};
use playtime_collage::library::{load_library, LibraryFilter};
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("playtime_collage=debug".parse()?),
        )
        .init();

    let library_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("library.json"));

    println!("=== DIAGNOSTIC: Library → Layout Pipeline ===");
    println!("Library: {}", library_path.display());

    let library = load_library(&library_path, &LibraryFilter::default())?;
    let stats = library.stats;
    println!("\n[1] Library loaded: {} games from {} records", library.items.len(), stats.records);
    println!(
        "    merged={} filtered={} skipped={} clamped={} total={:.1} h",
        stats.merged,
        stats.filtered,
        stats.skipped,
        stats.invalid_weights,
        stats.total_minutes as f64 / 60.0
    );

    let config = LayoutConfig::default();
    let mut sized: Vec<SizedItem> = library
        .items
        .iter()
        .map(|item| sized_item(item, config.aspect_ratio, &config.size))
        .collect();
    order::sort_for_packing(&mut sized, config.jitter);

    let tile_area: f64 = sized.iter().map(|s| s.area()).sum();
    let by_count = canvas_size(sized.len(), &config.canvas);
    let canvas = canvas_for_tiles(sized.len(), tile_area, &config.canvas);
    println!(
        "\n[2] Canvas: {}x{} (by count {}x{}, tiles claim {:.1}%)",
        canvas.width,
        canvas.height,
        by_count.width,
        by_count.height,
        tile_area / canvas.area() * 100.0
    );

    // Tile size histogram per tier
    println!("\n[3] Tile sizes by tier:");
    let tiers = config.size.tier_histogram(sized.iter().map(|item| item.weight));
    for (tier, count) in tiers.iter().enumerate().skip(1).filter(|&(_, &c)| c > 0) {
        println!("    tier {}: {} tiles", tier, count);
    }

    println!("\n[4] Top 10 tiles in packing order:");
    for (i, item) in sized.iter().take(10).enumerate() {
        println!(
            "    [{}] '{}' - {:.0}x{:.0} ({} min)",
            i, item.name, item.width, item.height, item.weight
        );
    }

    let packed = packer::pack(&sized, canvas, config.split);
    println!(
        "\n[5] Primary pack: {} placed, {} overflow, {} voids",
        packed.placed.len(),
        packed.overflow.len(),
        packed.free.len()
    );
    let void_area: f64 = packed.free.iter().map(|r| r.area()).sum();
    println!("    Void area: {:.0}px² ({:.1}%)", void_area, void_area / canvas.area() * 100.0);

    let filled = shelf::fill_in(packed.overflow, packed.free);
    println!(
        "\n[6] Shelf fill-in: {} rescued, {} dropped, {} voids left",
        filled.placed.len(),
        filled.dropped.len(),
        filled.free.len()
    );
    for item in filled.dropped.iter().take(10) {
        println!(
            "    dropped '{}' - {:.0}x{:.0} ({} min)",
            item.name, item.width, item.height, item.weight
        );
    }

    let placed_area: f64 = packed
        .placed
        .iter()
        .chain(filled.placed.iter())
        .map(|p| p.area())
        .sum();
    println!("\n[7] Coverage: {:.1}%", placed_area / canvas.area() * 100.0);

    Ok(())
}
