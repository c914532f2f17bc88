//! Bounded arena helpers.

use autoduel_core::types::Rect;

use crate::map::WallDescriptor;

/// Four walls enclosing `[0, width] x [0, height]`, each `thickness` thick
/// and lying outside the playable area.
pub fn arena_perimeter(width: f64, height: f64, thickness: f64) -> Vec<WallDescriptor> {
    vec![
        // bottom and top span the corners
        WallDescriptor::new(-thickness, -thickness, width + 2.0 * thickness, thickness),
        WallDescriptor::new(-thickness, height, width + 2.0 * thickness, thickness),
        WallDescriptor::new(-thickness, 0.0, thickness, height),
        WallDescriptor::new(width, 0.0, thickness, height),
    ]
}

/// Smallest rectangle containing every wall. `None` for an empty map.
pub fn bounds(walls: &[WallDescriptor]) -> Option<Rect> {
    let first = walls.first()?;
    let (mut min_x, mut min_y) = (first.x, first.y);
    let (mut max_x, mut max_y) = (first.x + first.width, first.y + first.height);
    for wall in &walls[1..] {
        min_x = min_x.min(wall.x);
        min_y = min_y.min(wall.y);
        max_x = max_x.max(wall.x + wall.width);
        max_y = max_y.max(wall.y + wall.height);
    }
    Some(Rect::new(min_x, min_y, max_x - min_x, max_y - min_y))
}
