//! The chunk grid: dense and sparse backings behind one capability interface
//!
//! Bounds-checking lives only in [`BoundedGrid`]; the sparse backing treats
//! every coordinate as addressable and materializes chunks on first write.

use crate::chunk::Chunk;
use crate::coords::tile_to_chunk;
use crate::material::UNSET_MATERIAL;
use std::collections::HashMap;
use std::fmt;

/// Errors surfaced by grid operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    /// Coordinate outside a dense grid.
    OutOfBounds { x: i32, y: i32 },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::OutOfBounds { x, y } => {
                write!(f, "tile ({}, {}) is outside the grid", x, y)
            }
        }
    }
}

impl std::error::Error for GridError {}

/// The grid capability interface shared by dense and sparse terrains.
///
/// Every mutation marks the render cache invalid; the flag is the only side
/// channel a renderer observes, and it polls [`TileGrid::cache_invalid`] and
/// clears it with [`TileGrid::clear_cache_invalid`].
pub trait TileGrid {
    /// Tiles per chunk edge.
    fn chunk_size(&self) -> u32;

    /// Grid dimensions in chunks, or `None` for an unbounded grid.
    fn bounds(&self) -> Option<(u32, u32)>;

    /// Read the material at a global tile coordinate.
    fn material(&self, x: i32, y: i32) -> Result<&str, GridError>;

    /// Read the derived weight at a global tile coordinate.
    fn weight(&self, x: i32, y: i32) -> Result<u32, GridError>;

    /// Write a material, recomputing the tile weight and invalidating the
    /// render cache. Writing an unchanged material still invalidates.
    fn set_material(&mut self, x: i32, y: i32, material: &str) -> Result<(), GridError>;

    /// Force the render cache invalid.
    fn invalidate_cache(&mut self);

    /// Whether a redraw is needed.
    fn cache_invalid(&self) -> bool;

    /// Acknowledge the redraw; called by the rendering collaborator.
    fn clear_cache_invalid(&mut self);

    /// Whether a coordinate is addressable on this grid.
    fn contains(&self, x: i32, y: i32) -> bool {
        match self.bounds() {
            Some((grid_x, grid_y)) => {
                let size = self.chunk_size() as i64;
                let (x, y) = (x as i64, y as i64);
                x >= 0 && y >= 0 && x < grid_x as i64 * size && y < grid_y as i64 * size
            }
            None => true,
        }
    }
}

/// A dense terrain of `grid_size_x x grid_size_y` pre-allocated chunks.
#[derive(Debug, Clone)]
pub struct BoundedGrid {
    grid_size_x: u32,
    grid_size_y: u32,
    chunk_size: u32,
    chunks: Vec<Chunk>,
    cache_invalid: bool,
}

impl BoundedGrid {
    /// Create a grid with every tile unset.
    pub fn new(grid_size_x: u32, grid_size_y: u32, chunk_size: u32) -> Self {
        Self {
            grid_size_x,
            grid_size_y,
            chunk_size,
            chunks: vec![Chunk::new(chunk_size); (grid_size_x * grid_size_y) as usize],
            cache_invalid: false,
        }
    }

    /// Create a grid with every tile set to the given material.
    pub fn filled(grid_size_x: u32, grid_size_y: u32, chunk_size: u32, material: &str) -> Self {
        Self {
            grid_size_x,
            grid_size_y,
            chunk_size,
            chunks: vec![Chunk::filled(chunk_size, material); (grid_size_x * grid_size_y) as usize],
            cache_invalid: false,
        }
    }

    pub fn grid_size_x(&self) -> u32 {
        self.grid_size_x
    }

    pub fn grid_size_y(&self) -> u32 {
        self.grid_size_y
    }

    /// Grid width in tiles.
    pub fn width(&self) -> u32 {
        self.grid_size_x * self.chunk_size
    }

    /// Grid height in tiles.
    pub fn height(&self) -> u32 {
        self.grid_size_y * self.chunk_size
    }

    /// The chunk at a chunk coordinate, for raster-order walks.
    pub fn chunk(&self, chunk_x: u32, chunk_y: u32) -> Option<&Chunk> {
        if chunk_x >= self.grid_size_x || chunk_y >= self.grid_size_y {
            return None;
        }
        self.chunks.get((chunk_y * self.grid_size_x + chunk_x) as usize)
    }

    fn locate(&self, x: i32, y: i32) -> Result<(usize, u32, u32), GridError> {
        if !self.contains(x, y) {
            return Err(GridError::OutOfBounds { x, y });
        }
        let addr = tile_to_chunk(x, y, self.chunk_size);
        let chunk_idx = (addr.chunk_y as u32 * self.grid_size_x + addr.chunk_x as u32) as usize;
        Ok((chunk_idx, addr.local_x, addr.local_y))
    }
}

impl TileGrid for BoundedGrid {
    fn chunk_size(&self) -> u32 {
        self.chunk_size
    }

    fn bounds(&self) -> Option<(u32, u32)> {
        Some((self.grid_size_x, self.grid_size_y))
    }

    fn material(&self, x: i32, y: i32) -> Result<&str, GridError> {
        let (chunk_idx, lx, ly) = self.locate(x, y)?;
        Ok(&self.chunks[chunk_idx].tile(lx, ly).material)
    }

    fn weight(&self, x: i32, y: i32) -> Result<u32, GridError> {
        let (chunk_idx, lx, ly) = self.locate(x, y)?;
        Ok(self.chunks[chunk_idx].tile(lx, ly).weight)
    }

    fn set_material(&mut self, x: i32, y: i32, material: &str) -> Result<(), GridError> {
        let (chunk_idx, lx, ly) = self.locate(x, y)?;
        self.chunks[chunk_idx].tile_mut(lx, ly).set_material(material);
        self.cache_invalid = true;
        Ok(())
    }

    fn invalidate_cache(&mut self) {
        self.cache_invalid = true;
    }

    fn cache_invalid(&self) -> bool {
        self.cache_invalid
    }

    fn clear_cache_invalid(&mut self) {
        self.cache_invalid = false;
    }
}

/// An unbounded terrain keyed by chunk coordinate.
///
/// Absent tiles read as the unset sentinel; storage materializes only on
/// write, so reads never allocate.
#[derive(Debug, Clone, Default)]
pub struct SparseGrid {
    chunk_size: u32,
    chunks: HashMap<(i32, i32), Chunk>,
    cache_invalid: bool,
}

impl SparseGrid {
    pub fn new(chunk_size: u32) -> Self {
        Self {
            chunk_size,
            chunks: HashMap::new(),
            cache_invalid: false,
        }
    }

    /// Number of chunks that have been materialized by writes.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }
}

impl TileGrid for SparseGrid {
    fn chunk_size(&self) -> u32 {
        self.chunk_size
    }

    fn bounds(&self) -> Option<(u32, u32)> {
        None
    }

    fn material(&self, x: i32, y: i32) -> Result<&str, GridError> {
        let addr = tile_to_chunk(x, y, self.chunk_size);
        Ok(self
            .chunks
            .get(&(addr.chunk_x, addr.chunk_y))
            .map(|chunk| chunk.tile(addr.local_x, addr.local_y).material.as_str())
            .unwrap_or(UNSET_MATERIAL))
    }

    fn weight(&self, x: i32, y: i32) -> Result<u32, GridError> {
        let addr = tile_to_chunk(x, y, self.chunk_size);
        Ok(self
            .chunks
            .get(&(addr.chunk_x, addr.chunk_y))
            .map(|chunk| chunk.tile(addr.local_x, addr.local_y).weight)
            .unwrap_or(0))
    }

    fn set_material(&mut self, x: i32, y: i32, material: &str) -> Result<(), GridError> {
        let addr = tile_to_chunk(x, y, self.chunk_size);
        let chunk_size = self.chunk_size;
        let chunk = self
            .chunks
            .entry((addr.chunk_x, addr.chunk_y))
            .or_insert_with(|| Chunk::new(chunk_size));
        chunk.tile_mut(addr.local_x, addr.local_y).set_material(material);
        self.cache_invalid = true;
        Ok(())
    }

    fn invalidate_cache(&mut self) {
        self.cache_invalid = true;
    }

    fn cache_invalid(&self) -> bool {
        self.cache_invalid
    }

    fn clear_cache_invalid(&mut self) {
        self.cache_invalid = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounded_grid_read_write() {
        let mut grid = BoundedGrid::filled(2, 2, 8, "grass");
        assert_eq!(grid.width(), 16);
        assert_eq!(grid.material(15, 15).unwrap(), "grass");

        grid.set_material(3, 12, "stone").unwrap();
        assert_eq!(grid.material(3, 12).unwrap(), "stone");
        assert_eq!(grid.weight(3, 12).unwrap(), 100);
    }

    #[test]
    fn test_bounded_grid_out_of_bounds() {
        let mut grid = BoundedGrid::new(2, 2, 8);
        assert_eq!(
            grid.material(16, 0),
            Err(GridError::OutOfBounds { x: 16, y: 0 })
        );
        assert_eq!(
            grid.material(0, -1),
            Err(GridError::OutOfBounds { x: 0, y: -1 })
        );
        assert!(grid.set_material(-1, 5, "dirt").is_err());
    }

    #[test]
    fn test_mutation_invalidates_cache() {
        let mut grid = BoundedGrid::filled(1, 1, 8, "grass");
        assert!(!grid.cache_invalid());

        // unchanged material still invalidates
        grid.set_material(0, 0, "grass").unwrap();
        assert!(grid.cache_invalid());

        grid.clear_cache_invalid();
        assert!(!grid.cache_invalid());
    }

    #[test]
    fn test_sparse_grid_reads_unset_without_allocating() {
        let grid = SparseGrid::new(8);
        assert_eq!(grid.material(1000, -1000).unwrap(), "unset");
        assert_eq!(grid.chunk_count(), 0);
    }

    #[test]
    fn test_sparse_grid_materializes_on_write() {
        let mut grid = SparseGrid::new(8);
        grid.set_material(-3, -3, "dirt").unwrap();

        assert_eq!(grid.chunk_count(), 1);
        assert_eq!(grid.material(-3, -3).unwrap(), "dirt");
        // neighbor in the same chunk is still unset
        assert_eq!(grid.material(-4, -3).unwrap(), "unset");
    }

    #[test]
    fn test_sparse_grid_is_unbounded() {
        let grid = SparseGrid::new(8);
        assert!(grid.contains(i32::MIN, i32::MAX));
        assert!(grid.bounds().is_none());
    }
}
