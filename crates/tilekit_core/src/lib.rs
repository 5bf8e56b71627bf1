//! Core data structures for tilekit terrain maps
//!
//! This crate provides the fundamental types for representing chunked
//! tile terrains:
//! - `Tile` - A single grid cell with a material and derived weight
//! - `Chunk` - A fixed-size dense block of tiles
//! - `TileGrid` - The grid capability interface
//! - `BoundedGrid` / `SparseGrid` - Dense and lazily-allocated grid backings
//! - `Camera` and coordinate conversions between canvas, world, tile and
//!   chunk space

mod chunk;
mod coords;
mod grid;
mod material;
mod tile;

pub use chunk::Chunk;
pub use coords::{canvas_to_world, tile_to_chunk, world_to_tile, Camera, ChunkAddress};
pub use grid::{BoundedGrid, GridError, SparseGrid, TileGrid};
pub use material::{char_for, is_known, material_for_char, weight_for, MATERIALS, UNSET_MATERIAL};
pub use tile::Tile;
