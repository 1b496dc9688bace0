use super::canvas::Canvas;
use super::free_rects::FreeRect;
use super::{Layout, PlacedItem, SizedItem};

/// Uniform grid: `ceil(sqrt(n))` columns, every tile stretched to the cell.
/// Items keep their packing order, row-major. Nothing is ever dropped.
pub fn grid_layout(items: &[SizedItem], canvas: Canvas) -> Layout {
    if items.is_empty() {
        return Layout::empty(canvas);
    }

    let n = items.len();
    let cols = (n as f64).sqrt().ceil() as usize;
    let rows = n.div_ceil(cols);
    let cell_w = (canvas.width as usize / cols).max(1) as f64;
    let cell_h = (canvas.height as usize / rows).max(1) as f64;

    let placed: Vec<PlacedItem> = items
        .iter()
        .enumerate()
        .map(|(i, item)| PlacedItem {
            id: item.id,
            name: item.name.clone(),
            weight: item.weight,
            x: (i % cols) as f64 * cell_w,
            y: (i / cols) as f64 * cell_h,
            width: cell_w,
            height: cell_h,
        })
        .collect();

    tracing::debug!("Grid layout: {}x{} cells of {}x{}", cols, rows, cell_w, cell_h);

    Layout {
        canvas,
        placed,
        dropped: Vec::new(),
        free: grid_voids(n, cols, rows, cell_w, cell_h, canvas),
    }
}

/// Unused cells in the last row plus the margins the integer cell size leaves.
fn grid_voids(
    n: usize,
    cols: usize,
    rows: usize,
    cell_w: f64,
    cell_h: f64,
    canvas: Canvas,
) -> Vec<FreeRect> {
    let mut voids = Vec::new();
    let used_w = cols as f64 * cell_w;
    let used_h = rows as f64 * cell_h;

    let last_row = n - (rows - 1) * cols;
    if last_row < cols {
        voids.push(FreeRect::new(
            last_row as f64 * cell_w,
            (rows - 1) as f64 * cell_h,
            (cols - last_row) as f64 * cell_w,
            cell_h,
        ));
    }
    let right = canvas.width as f64 - used_w;
    if right > 0.0 {
        voids.push(FreeRect::new(used_w, 0.0, right, used_h));
    }
    let bottom = canvas.height as f64 - used_h;
    if bottom > 0.0 {
        voids.push(FreeRect::new(0.0, used_h, canvas.width as f64, bottom));
    }
    voids
}
