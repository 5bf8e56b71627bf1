//! Terrain export
//!
//! Walks a bounded grid in chunk raster order (row-major within each chunk)
//! and produces a versioned [`TerrainDocument`], optionally with entity and
//! resource overlays and caller-supplied metadata.

use crate::document::{
    EntityInstance, Metadata, ResourceNode, TerrainDocument, TileData, CURRENT_VERSION,
    DEFAULT_GENERATION_MODE, DEFAULT_TILE_SIZE,
};
use crate::encode;
use crate::error::FormatError;
use serde_json::{Map, Value};
use tilekit_core::{BoundedGrid, TileGrid};

/// Which tile payload encoding to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TileEncoding {
    /// One material string per tile.
    #[default]
    Plain,
    /// Single-character-per-tile string.
    Packed,
    /// `{material, count}` runs.
    RunLength,
    /// Per-chunk default material plus exceptions.
    ChunkDefault,
}

/// Export options.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub include_entities: bool,
    pub include_resources: bool,
    /// Shorthand for the packed encoding; wins over `encoding` when set.
    pub compress: bool,
    pub encoding: TileEncoding,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            include_entities: true,
            include_resources: true,
            compress: false,
            encoding: TileEncoding::Plain,
        }
    }
}

/// Serializes one bounded grid, with optional overlays, to a document.
pub struct TerrainExporter<'g> {
    grid: &'g BoundedGrid,
    entities: Vec<EntityInstance>,
    resources: Vec<ResourceNode>,
    tile_size: u32,
    seed: i64,
    generation_mode: String,
    custom: Map<String, Value>,
}

impl<'g> TerrainExporter<'g> {
    pub fn new(grid: &'g BoundedGrid) -> Self {
        Self {
            grid,
            entities: Vec::new(),
            resources: Vec::new(),
            tile_size: DEFAULT_TILE_SIZE,
            seed: fastrand::i64(..),
            generation_mode: DEFAULT_GENERATION_MODE.to_string(),
            custom: Map::new(),
        }
    }

    pub fn entities(mut self, entities: Vec<EntityInstance>) -> Self {
        self.entities = entities;
        self
    }

    pub fn resources(mut self, resources: Vec<ResourceNode>) -> Self {
        self.resources = resources;
        self
    }

    pub fn tile_size(mut self, tile_size: u32) -> Self {
        self.tile_size = tile_size;
        self
    }

    pub fn seed(mut self, seed: i64) -> Self {
        self.seed = seed;
        self
    }

    pub fn generation_mode(mut self, mode: &str) -> Self {
        self.generation_mode = mode.to_string();
        self
    }

    /// Merge an arbitrary caller field into the metadata.
    pub fn custom_field(mut self, key: &str, value: Value) -> Self {
        self.custom.insert(key.to_string(), value);
        self
    }

    /// Produce the document.
    pub fn export(&self, options: &ExportOptions) -> TerrainDocument {
        let materials = tile_materials(self.grid);
        let encoding = if options.compress {
            TileEncoding::Packed
        } else {
            options.encoding
        };

        let tiles = match encoding {
            TileEncoding::Plain => TileData::Plain(materials),
            TileEncoding::Packed => TileData::Packed(encode::pack(&materials)),
            TileEncoding::RunLength => TileData::Runs(encode::encode_runs(&materials)),
            TileEncoding::ChunkDefault => TileData::ChunkDefaults(encode::encode_chunk_defaults(
                &materials,
                self.grid.chunk_size(),
            )),
        };

        TerrainDocument {
            metadata: Metadata {
                version: CURRENT_VERSION.to_string(),
                grid_size_x: self.grid.grid_size_x(),
                grid_size_y: self.grid.grid_size_y(),
                chunk_size: self.grid.chunk_size(),
                tile_size: self.tile_size,
                seed: self.seed,
                generation_mode: self.generation_mode.clone(),
                created: Some(chrono::Utc::now().to_rfc3339()),
                custom: self.custom.clone(),
            },
            tiles,
            entities: options.include_entities.then(|| self.entities.clone()),
            resources: options.include_resources.then(|| self.resources.clone()),
        }
    }

    /// Produce the document as a JSON string.
    pub fn export_to_json(&self, options: &ExportOptions) -> Result<String, FormatError> {
        serde_json::to_string_pretty(&self.export(options))
            .map_err(|e| FormatError::Serialize(e.to_string()))
    }
}

/// Flatten the grid into the canonical tile sequence: chunks in raster
/// order, row-major within each chunk.
pub(crate) fn tile_materials(grid: &BoundedGrid) -> Vec<String> {
    let chunk_size = grid.chunk_size() as usize;
    let mut materials =
        Vec::with_capacity((grid.grid_size_x() * grid.grid_size_y()) as usize * chunk_size * chunk_size);
    for chunk_y in 0..grid.grid_size_y() {
        for chunk_x in 0..grid.grid_size_x() {
            if let Some(chunk) = grid.chunk(chunk_x, chunk_y) {
                materials.extend(chunk.tiles().map(|tile| tile.material.clone()));
            }
        }
    }
    materials
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_grid() -> BoundedGrid {
        let mut grid = BoundedGrid::filled(2, 1, 2, "grass");
        grid.set_material(0, 0, "stone").unwrap();
        grid.set_material(3, 1, "water").unwrap();
        grid
    }

    #[test]
    fn test_tile_sequence_order() {
        let grid = sample_grid();
        let materials = tile_materials(&grid);

        // chunk (0,0) row-major, then chunk (1,0)
        assert_eq!(
            materials,
            vec!["stone", "grass", "grass", "grass", "grass", "grass", "grass", "water"]
        );
    }

    #[test]
    fn test_export_metadata() {
        let grid = sample_grid();
        let doc = TerrainExporter::new(&grid)
            .seed(7)
            .generation_mode("flat")
            .custom_field("name", serde_json::json!("test world"))
            .export(&ExportOptions::default());

        assert_eq!(doc.metadata.version, "2.0");
        assert_eq!(doc.metadata.grid_size_x, 2);
        assert_eq!(doc.metadata.grid_size_y, 1);
        assert_eq!(doc.metadata.chunk_size, 2);
        assert_eq!(doc.metadata.seed, 7);
        assert_eq!(doc.metadata.custom["name"], "test world");
        assert!(doc.metadata.created.is_some());
    }

    #[test]
    fn test_compress_wins_over_encoding() {
        let grid = sample_grid();
        let options = ExportOptions {
            compress: true,
            encoding: TileEncoding::Plain,
            ..ExportOptions::default()
        };
        let doc = TerrainExporter::new(&grid).export(&options);

        match doc.tiles {
            TileData::Packed(s) => assert_eq!(s, "rggggggw"),
            other => panic!("expected packed tiles, got {:?}", other),
        }
    }

    #[test]
    fn test_overlays_follow_options() {
        let grid = sample_grid();
        let exporter = TerrainExporter::new(&grid)
            .entities(vec![EntityInstance::new("spawn", 16.0, 16.0)])
            .resources(vec![ResourceNode {
                resource_type: "tree".to_string(),
                x: 1,
                y: 1,
                quantity: 3,
            }]);

        let with = exporter.export(&ExportOptions::default());
        assert_eq!(with.entities.as_ref().map(Vec::len), Some(1));
        assert_eq!(with.resources.as_ref().map(Vec::len), Some(1));

        let without = exporter.export(&ExportOptions {
            include_entities: false,
            include_resources: false,
            ..ExportOptions::default()
        });
        assert!(without.entities.is_none());
        assert!(without.resources.is_none());
    }
}
