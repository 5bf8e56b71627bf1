//! Brush footprint generation

/// Maximum brush size the footprint table is exercised with; callers clamp
/// UI input to this.
pub const MAX_BRUSH_SIZE: u32 = 9;

/// Offsets affected by one paint at the given brush size, relative to the
/// brush center.
///
/// - Size 1 is the single center tile.
/// - Odd sizes are full `n x n` squares, corners included.
/// - Even sizes approximate a circle: offsets within radius `n / 2` by
///   squared distance. Size 2 degenerates to the 5-tile axis cross.
pub fn footprint(size: u32) -> Vec<(i32, i32)> {
    let size = size.max(1);
    if size == 1 {
        return vec![(0, 0)];
    }

    let radius = (size / 2) as i32;
    let mut offsets = Vec::new();
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if size % 2 == 1 || dx * dx + dy * dy <= radius * radius {
                offsets.push((dx, dy));
            }
        }
    }
    offsets
}
