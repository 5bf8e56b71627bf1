//! Coordinate conversions between canvas, world, tile and chunk space
//!
//! All conversions are pure and total; no tile-existence check happens here.

use serde::{Deserialize, Serialize};

/// Camera state used to resolve canvas-space pointer positions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Camera {
    pub offset_x: f32,
    pub offset_y: f32,
    pub zoom: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            zoom: 1.0,
        }
    }
}

/// A tile position resolved to its chunk and the offset inside that chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkAddress {
    pub chunk_x: i32,
    pub chunk_y: i32,
    pub local_x: u32,
    pub local_y: u32,
}

/// Convert a canvas/pixel position to world coordinates.
pub fn canvas_to_world(px: f32, py: f32, camera: &Camera) -> (f32, f32) {
    (
        px / camera.zoom + camera.offset_x,
        py / camera.zoom + camera.offset_y,
    )
}

/// Convert a world position to the tile containing it.
pub fn world_to_tile(world_x: f32, world_y: f32, tile_size: f32) -> (i32, i32) {
    (
        (world_x / tile_size).floor() as i32,
        (world_y / tile_size).floor() as i32,
    )
}

/// Resolve a global tile coordinate to its chunk index and local offset.
///
/// Uses Euclidean floor division so negative coordinates (sparse terrains)
/// map correctly: tile -1 belongs to chunk -1 at local offset
/// `chunk_size - 1`.
pub fn tile_to_chunk(tile_x: i32, tile_y: i32, chunk_size: u32) -> ChunkAddress {
    let n = chunk_size as i32;
    ChunkAddress {
        chunk_x: tile_x.div_euclid(n),
        chunk_y: tile_y.div_euclid(n),
        local_x: tile_x.rem_euclid(n) as u32,
        local_y: tile_y.rem_euclid(n) as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canvas_to_world_applies_zoom_and_offset() {
        let camera = Camera {
            offset_x: 100.0,
            offset_y: -50.0,
            zoom: 2.0,
        };
        let (wx, wy) = canvas_to_world(64.0, 32.0, &camera);
        assert_eq!(wx, 132.0);
        assert_eq!(wy, -34.0);
    }

    #[test]
    fn test_world_to_tile_floors() {
        assert_eq!(world_to_tile(0.0, 0.0, 32.0), (0, 0));
        assert_eq!(world_to_tile(31.9, 63.9, 32.0), (0, 1));
        assert_eq!(world_to_tile(-0.1, -32.1, 32.0), (-1, -2));
    }

    #[test]
    fn test_tile_to_chunk_positive() {
        let addr = tile_to_chunk(19, 7, 8);
        assert_eq!(addr.chunk_x, 2);
        assert_eq!(addr.chunk_y, 0);
        assert_eq!(addr.local_x, 3);
        assert_eq!(addr.local_y, 7);
    }

    #[test]
    fn test_tile_to_chunk_negative() {
        let addr = tile_to_chunk(-1, -9, 8);
        assert_eq!(addr.chunk_x, -1);
        assert_eq!(addr.chunk_y, -2);
        assert_eq!(addr.local_x, 7);
        assert_eq!(addr.local_y, 7);
    }
}
