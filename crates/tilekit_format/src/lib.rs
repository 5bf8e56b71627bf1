//! Versioned JSON terrain persistence for tilekit
//!
//! This crate serializes a bounded chunk grid (plus optional entity and
//! resource overlays) to a versioned JSON document and back:
//! - `TerrainExporter` / `TerrainImporter` - the two ends of the pipeline
//! - `TileData` - four tile payload encodings (plain, packed string,
//!   run-length, chunk default+exceptions)
//! - a migration chain upgrading older documents to [`CURRENT_VERSION`]

mod document;
mod encode;
mod error;
mod export;
mod import;
mod migrate;

pub use document::{
    ChunkTiles, EntityInstance, Metadata, ResourceNode, Run, TerrainDocument, TileData,
    TileException, CURRENT_VERSION, DEFAULT_CHUNK_SIZE, DEFAULT_GENERATION_MODE, DEFAULT_TILE_SIZE,
};
pub use encode::{
    decode_chunk_defaults, decode_runs, encode_chunk_defaults, encode_runs, pack, unpack,
};
pub use error::FormatError;
pub use export::{ExportOptions, TerrainExporter, TileEncoding};
pub use import::{ImportedTerrain, TerrainImporter};
pub use migrate::{document_major_version, migrate_to_current};
