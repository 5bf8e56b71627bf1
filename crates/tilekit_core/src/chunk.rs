//! Fixed-size dense block of tiles

use crate::tile::Tile;
use serde::{Deserialize, Serialize};

/// A `chunk_size x chunk_size` dense block of tiles.
///
/// The chunk is the unit of storage and of default-value compression; it owns
/// its tiles and holds no cross-chunk references. Local offsets are row-major
/// in `[0, chunk_size)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    chunk_size: u32,
    tiles: Vec<Tile>,
}

impl Chunk {
    /// Create a chunk with every tile unset.
    pub fn new(chunk_size: u32) -> Self {
        Self {
            chunk_size,
            tiles: vec![Tile::unset(); (chunk_size * chunk_size) as usize],
        }
    }

    /// Create a chunk with every tile set to the given material.
    pub fn filled(chunk_size: u32, material: &str) -> Self {
        Self {
            chunk_size,
            tiles: vec![Tile::new(material); (chunk_size * chunk_size) as usize],
        }
    }

    pub fn chunk_size(&self) -> u32 {
        self.chunk_size
    }

    fn index(&self, local_x: u32, local_y: u32) -> usize {
        debug_assert!(local_x < self.chunk_size && local_y < self.chunk_size);
        (local_y * self.chunk_size + local_x) as usize
    }

    /// Get the tile at a local offset.
    pub fn tile(&self, local_x: u32, local_y: u32) -> &Tile {
        &self.tiles[self.index(local_x, local_y)]
    }

    /// Get the tile at a local offset mutably.
    pub fn tile_mut(&mut self, local_x: u32, local_y: u32) -> &mut Tile {
        let idx = self.index(local_x, local_y);
        &mut self.tiles[idx]
    }

    /// Iterate tiles in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_chunk_is_unset() {
        let chunk = Chunk::new(8);
        assert_eq!(chunk.tiles().count(), 64);
        assert!(chunk.tiles().all(|t| t.is_unset()));
    }

    #[test]
    fn test_local_addressing() {
        let mut chunk = Chunk::new(8);
        chunk.tile_mut(3, 5).set_material("dirt");

        assert_eq!(chunk.tile(3, 5).material, "dirt");
        assert_eq!(chunk.tile(5, 3).material, "unset");
    }
}
