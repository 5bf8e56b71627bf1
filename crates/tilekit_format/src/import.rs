//! Terrain import
//!
//! Parses, migrates and validates a document, then reconstructs a bounded
//! grid. Every validation step runs before the grid is built, so a failed
//! import leaves nothing half-applied.

use crate::document::{EntityInstance, Metadata, ResourceNode, TerrainDocument, TileData};
use crate::encode;
use crate::error::FormatError;
use crate::migrate;
use log::debug;
use serde_json::Value;
use tilekit_core::{is_known, BoundedGrid, TileGrid, UNSET_MATERIAL};

/// A fully reconstructed terrain.
pub struct ImportedTerrain {
    pub grid: BoundedGrid,
    pub metadata: Metadata,
    pub entities: Vec<EntityInstance>,
    pub resources: Vec<ResourceNode>,
}

/// Deserializes versioned terrain documents.
pub struct TerrainImporter;

impl TerrainImporter {
    /// Parse a JSON document, migrating older versions as needed.
    pub fn from_json(json: &str) -> Result<ImportedTerrain, FormatError> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| FormatError::MalformedDocument(e.to_string()))?;

        let value = migrate::migrate_to_current(value)?;
        validate_dimensions(&value)?;

        let doc: TerrainDocument = serde_json::from_value(value)
            .map_err(|e| FormatError::MalformedDocument(e.to_string()))?;
        Self::from_document(doc)
    }

    /// Reconstruct a terrain from an already-parsed current-version document.
    pub fn from_document(doc: TerrainDocument) -> Result<ImportedTerrain, FormatError> {
        let metadata = doc.metadata;
        if metadata.grid_size_x == 0 || metadata.grid_size_y == 0 {
            return Err(FormatError::InvalidDimensions(format!(
                "grid is {}x{} chunks",
                metadata.grid_size_x, metadata.grid_size_y
            )));
        }

        let chunk_size = metadata.chunk_size;
        if chunk_size == 0 {
            return Err(FormatError::InvalidDimensions(
                "chunkSize is 0".to_string(),
            ));
        }
        // checked in u64: untrusted dimensions must never overflow or
        // allocate before this guard passes
        let expected = (metadata.grid_size_x as u64)
            .checked_mul(metadata.grid_size_y as u64)
            .and_then(|n| n.checked_mul(chunk_size as u64))
            .and_then(|n| n.checked_mul(chunk_size as u64))
            .filter(|&n| n <= u32::MAX as u64)
            .ok_or_else(|| {
                FormatError::InvalidDimensions(format!(
                    "{}x{} chunks of {} tiles exceed the addressable grid",
                    metadata.grid_size_x, metadata.grid_size_y, chunk_size
                ))
            })?;

        let materials = match &doc.tiles {
            TileData::Plain(materials) => materials.clone(),
            TileData::Packed(packed) => encode::unpack(packed),
            TileData::Runs(runs) => encode::decode_runs(runs),
            TileData::ChunkDefaults(chunks) => encode::decode_chunk_defaults(chunks, chunk_size),
        };

        if materials.len() as u64 != expected {
            return Err(FormatError::MalformedDocument(format!(
                "tile payload holds {} tiles, grid needs {}",
                materials.len(),
                expected
            )));
        }

        for material in &materials {
            if material != UNSET_MATERIAL && !is_known(material) {
                return Err(FormatError::InvalidMaterial(material.clone()));
            }
        }

        let mut grid = BoundedGrid::new(metadata.grid_size_x, metadata.grid_size_y, chunk_size);
        let mut sequence = materials.iter();
        for chunk_y in 0..metadata.grid_size_y {
            for chunk_x in 0..metadata.grid_size_x {
                for local_y in 0..chunk_size {
                    for local_x in 0..chunk_size {
                        // sequence length was validated against the walk above
                        let Some(material) = sequence.next() else {
                            break;
                        };
                        let x = (chunk_x * chunk_size + local_x) as i32;
                        let y = (chunk_y * chunk_size + local_y) as i32;
                        grid.set_material(x, y, material)
                            .map_err(|e| FormatError::MalformedDocument(e.to_string()))?;
                    }
                }
            }
        }

        debug!(
            "imported {}x{} chunk terrain ({} tiles)",
            metadata.grid_size_x, metadata.grid_size_y, expected
        );

        Ok(ImportedTerrain {
            grid,
            metadata,
            entities: doc.entities.unwrap_or_default(),
            resources: doc.resources.unwrap_or_default(),
        })
    }
}

/// Positive-dimension check on the raw document, so a document whose
/// migration left the sizes missing fails as `InvalidDimensions` rather than
/// a generic parse error.
fn validate_dimensions(value: &Value) -> Result<(), FormatError> {
    let metadata = value
        .get("metadata")
        .and_then(Value::as_object)
        .ok_or_else(|| FormatError::MalformedDocument("missing metadata object".to_string()))?;

    for field in ["gridSizeX", "gridSizeY"] {
        let size = metadata
            .get(field)
            .and_then(Value::as_i64)
            .ok_or_else(|| FormatError::InvalidDimensions(format!("{} is missing", field)))?;
        if size <= 0 {
            return Err(FormatError::InvalidDimensions(format!(
                "{} is {}",
                field, size
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::{ExportOptions, TerrainExporter, TileEncoding};
    use serde_json::json;

    fn sample_grid() -> BoundedGrid {
        let mut grid = BoundedGrid::filled(2, 2, 4, "grass");
        grid.set_material(0, 0, "stone").unwrap();
        grid.set_material(7, 7, "water").unwrap();
        grid.set_material(3, 5, "dirt").unwrap();
        grid
    }

    fn assert_grids_match(a: &BoundedGrid, b: &BoundedGrid) {
        assert_eq!(a.width(), b.width());
        assert_eq!(a.height(), b.height());
        for y in 0..a.height() as i32 {
            for x in 0..a.width() as i32 {
                assert_eq!(
                    a.material(x, y).unwrap(),
                    b.material(x, y).unwrap(),
                    "at ({}, {})",
                    x,
                    y
                );
            }
        }
    }

    #[test]
    fn test_round_trip_every_encoding() {
        let grid = sample_grid();
        for encoding in [
            TileEncoding::Plain,
            TileEncoding::Packed,
            TileEncoding::RunLength,
            TileEncoding::ChunkDefault,
        ] {
            let options = ExportOptions {
                encoding,
                ..ExportOptions::default()
            };
            let json = TerrainExporter::new(&grid)
                .export_to_json(&options)
                .unwrap();
            let imported = TerrainImporter::from_json(&json).unwrap();
            assert_grids_match(&grid, &imported.grid);
        }
    }

    #[test]
    fn test_round_trip_overlays_and_custom_metadata() {
        let grid = sample_grid();
        let json = TerrainExporter::new(&grid)
            .entities(vec![EntityInstance::new("spawn", 32.0, 48.0)])
            .resources(vec![ResourceNode {
                resource_type: "ore".to_string(),
                x: 2,
                y: 2,
                quantity: 12,
            }])
            .custom_field("name", json!("highlands"))
            .export_to_json(&ExportOptions::default())
            .unwrap();

        let imported = TerrainImporter::from_json(&json).unwrap();
        assert_eq!(imported.entities.len(), 1);
        assert_eq!(imported.entities[0].entity_type, "spawn");
        assert_eq!(imported.resources[0].quantity, 12);
        assert_eq!(imported.metadata.custom["name"], "highlands");
    }

    #[test]
    fn test_import_v1_document_migrates() {
        let json = json!({
            "metadata": {
                "version": "1.0",
                "width": 1,
                "height": 1,
                "chunkSize": 2,
                "name": "legacy",
            },
            "tiles": ["grass", "dirt", "grass", "grass"],
        })
        .to_string();

        let imported = TerrainImporter::from_json(&json).unwrap();
        assert_eq!(imported.metadata.version, "2.0");
        assert_eq!(imported.metadata.custom["name"], "legacy");
        assert_eq!(imported.grid.material(1, 0).unwrap(), "dirt");
    }

    #[test]
    fn test_import_defaults_missing_optional_metadata() {
        let tiles: Vec<&str> = std::iter::repeat("grass").take(64).collect();
        let json = json!({
            "metadata": { "version": "2.0", "gridSizeX": 1, "gridSizeY": 1 },
            "tiles": tiles,
        })
        .to_string();

        let imported = TerrainImporter::from_json(&json).unwrap();
        assert_eq!(imported.metadata.chunk_size, 8);
        assert_eq!(imported.metadata.tile_size, 32);
        assert_eq!(imported.metadata.generation_mode, "perlin");
    }

    #[test]
    fn test_import_rejects_garbage_json() {
        assert!(matches!(
            TerrainImporter::from_json("not json at all"),
            Err(FormatError::MalformedDocument(_))
        ));
    }

    #[test]
    fn test_import_rejects_missing_metadata() {
        assert!(matches!(
            TerrainImporter::from_json(r#"{"tiles": []}"#),
            Err(FormatError::MalformedDocument(_))
        ));
    }

    #[test]
    fn test_import_rejects_zero_dimensions() {
        let json = json!({
            "metadata": { "version": "2.0", "gridSizeX": 0, "gridSizeY": 4 },
            "tiles": [],
        })
        .to_string();

        assert!(matches!(
            TerrainImporter::from_json(&json),
            Err(FormatError::InvalidDimensions(_))
        ));
    }

    #[test]
    fn test_import_rejects_oversized_dimensions() {
        // 65536 * 65536 chunks overflows every u32 tile count; this must
        // fail fast, not panic or allocate
        let json = json!({
            "metadata": { "version": "2.0", "gridSizeX": 65536, "gridSizeY": 65536 },
            "tiles": ["grass"],
        })
        .to_string();

        assert!(matches!(
            TerrainImporter::from_json(&json),
            Err(FormatError::InvalidDimensions(_))
        ));
    }

    #[test]
    fn test_import_rejects_zero_chunk_size() {
        let json = json!({
            "metadata": { "version": "2.0", "gridSizeX": 1, "gridSizeY": 1, "chunkSize": 0 },
            "tiles": [],
        })
        .to_string();

        assert!(matches!(
            TerrainImporter::from_json(&json),
            Err(FormatError::InvalidDimensions(_))
        ));
    }

    #[test]
    fn test_import_rejects_unknown_material() {
        let json = json!({
            "metadata": { "version": "2.0", "gridSizeX": 1, "gridSizeY": 1, "chunkSize": 1 },
            "tiles": ["lava"],
        })
        .to_string();

        assert!(matches!(
            TerrainImporter::from_json(&json),
            Err(FormatError::InvalidMaterial(m)) if m == "lava"
        ));
    }

    #[test]
    fn test_import_rejects_tile_count_mismatch() {
        let json = json!({
            "metadata": { "version": "2.0", "gridSizeX": 1, "gridSizeY": 1, "chunkSize": 2 },
            "tiles": ["grass", "grass"],
        })
        .to_string();

        assert!(matches!(
            TerrainImporter::from_json(&json),
            Err(FormatError::MalformedDocument(_))
        ));
    }
}
