//! The versioned terrain document
//!
//! A document bundles grid metadata, the tile payload in one of four
//! encodings, and optional entity/resource overlays. Field names follow the
//! persisted JSON schema (`gridSizeX`, `defaultMaterial`, ...).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Version written by this library and targeted by the migration chain.
pub const CURRENT_VERSION: &str = "2.0";

pub const DEFAULT_CHUNK_SIZE: u32 = 8;
pub const DEFAULT_TILE_SIZE: u32 = 32;
pub const DEFAULT_GENERATION_MODE: &str = "perlin";

/// A complete persisted terrain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerrainDocument {
    pub metadata: Metadata,
    pub tiles: TileData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entities: Option<Vec<EntityInstance>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<Vec<ResourceNode>>,
}

/// Document metadata. `version` is mandatory and gates migration; the other
/// optional fields fall back to fixed defaults rather than failing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub version: String,
    pub grid_size_x: u32,
    pub grid_size_y: u32,
    #[serde(default = "default_chunk_size")]
    pub chunk_size: u32,
    #[serde(default = "default_tile_size")]
    pub tile_size: u32,
    #[serde(default = "random_seed")]
    pub seed: i64,
    #[serde(default = "default_generation_mode")]
    pub generation_mode: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    /// Arbitrary caller-supplied fields, preserved verbatim.
    #[serde(flatten)]
    pub custom: Map<String, Value>,
}

fn default_chunk_size() -> u32 {
    DEFAULT_CHUNK_SIZE
}

fn default_tile_size() -> u32 {
    DEFAULT_TILE_SIZE
}

fn default_generation_mode() -> String {
    DEFAULT_GENERATION_MODE.to_string()
}

fn random_seed() -> i64 {
    fastrand::i64(..)
}

/// The tile payload in whichever encoding the exporter chose.
///
/// Untagged: the decoder detects the encoding from the JSON shape (string,
/// string array, run array or chunk-default array).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TileData {
    /// Single-character-per-tile packed string.
    Packed(String),
    /// One material string per tile.
    Plain(Vec<String>),
    /// Run-length encoded `{material, count}` runs.
    Runs(Vec<Run>),
    /// Per-chunk default material plus deviating tiles.
    ChunkDefaults(Vec<ChunkTiles>),
}

/// One run of identical materials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    pub material: String,
    pub count: u64,
}

/// One chunk in the default+exceptions encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChunkTiles {
    pub default_material: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exceptions: Vec<TileException>,
}

/// A tile deviating from its chunk default, at a local offset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileException {
    pub offset: [u32; 2],
    pub material: String,
}

/// A placed entity in the overlay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityInstance {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(rename = "type")]
    pub entity_type: String,
    pub x: f32,
    pub y: f32,
    #[serde(flatten)]
    pub properties: Map<String, Value>,
}

impl EntityInstance {
    pub fn new(entity_type: &str, x: f32, y: f32) -> Self {
        Self {
            id: Uuid::new_v4(),
            entity_type: entity_type.to_string(),
            x,
            y,
            properties: Map::new(),
        }
    }
}

/// A harvestable resource node in the overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceNode {
    #[serde(rename = "type")]
    pub resource_type: String,
    pub x: i32,
    pub y: i32,
    pub quantity: u32,
}
