//! Tile payload encodings
//!
//! All encoders operate on the flat material sequence produced by walking
//! chunks in raster order, row-major within each chunk. Decoders reverse the
//! encoding exactly; only the packed string is lossy (unknown materials
//! collapse to the unset code).

use crate::document::{ChunkTiles, Run, TileException};
use std::collections::HashMap;
use tilekit_core::{char_for, material_for_char, UNSET_MATERIAL};

/// Run-length encode a material sequence.
pub fn encode_runs(materials: &[String]) -> Vec<Run> {
    let mut runs: Vec<Run> = Vec::new();
    for material in materials {
        match runs.last_mut() {
            Some(run) if run.material == *material => run.count += 1,
            _ => runs.push(Run {
                material: material.clone(),
                count: 1,
            }),
        }
    }
    runs
}

/// Expand runs back to the original sequence, preserving order exactly.
pub fn decode_runs(runs: &[Run]) -> Vec<String> {
    let mut materials = Vec::new();
    for run in runs {
        for _ in 0..run.count {
            materials.push(run.material.clone());
        }
    }
    materials
}

/// Pack a material sequence into one character per tile.
pub fn pack(materials: &[String]) -> String {
    materials.iter().map(|m| char_for(m)).collect()
}

/// Unpack a character-per-tile string.
pub fn unpack(packed: &str) -> Vec<String> {
    packed
        .chars()
        .map(|c| material_for_char(c).to_string())
        .collect()
}

/// Encode per-chunk defaults plus deviating tiles.
///
/// Each chunk covers a contiguous `chunk_size * chunk_size` segment of the
/// sequence; the most frequent material in the segment becomes the default.
pub fn encode_chunk_defaults(materials: &[String], chunk_size: u32) -> Vec<ChunkTiles> {
    let tiles_per_chunk = (chunk_size * chunk_size) as usize;
    materials
        .chunks(tiles_per_chunk)
        .map(|segment| {
            let default_material = most_frequent(segment).to_string();
            let exceptions = segment
                .iter()
                .enumerate()
                .filter(|(_, material)| **material != default_material)
                .map(|(i, material)| TileException {
                    offset: [i as u32 % chunk_size, i as u32 / chunk_size],
                    material: material.clone(),
                })
                .collect();
            ChunkTiles {
                default_material,
                exceptions,
            }
        })
        .collect()
}

/// Expand chunk defaults back to the full sequence.
pub fn decode_chunk_defaults(chunks: &[ChunkTiles], chunk_size: u32) -> Vec<String> {
    let tiles_per_chunk = (chunk_size * chunk_size) as usize;
    let mut materials = Vec::with_capacity(chunks.len() * tiles_per_chunk);
    for chunk in chunks {
        let start = materials.len();
        for _ in 0..tiles_per_chunk {
            materials.push(chunk.default_material.clone());
        }
        for exception in &chunk.exceptions {
            let idx = start + (exception.offset[1] * chunk_size + exception.offset[0]) as usize;
            if let Some(slot) = materials.get_mut(idx) {
                slot.clone_from(&exception.material);
            }
        }
    }
    materials
}

/// Most frequent material in a segment; ties break toward the material seen
/// first so the encoding is deterministic.
fn most_frequent(segment: &[String]) -> &str {
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (order, material) in segment.iter().enumerate() {
        let entry = counts.entry(material.as_str()).or_insert((0, order));
        entry.0 += 1;
    }
    counts
        .into_iter()
        .max_by(|(_, (ca, oa)), (_, (cb, ob))| ca.cmp(cb).then(ob.cmp(oa)))
        .map(|(material, _)| material)
        .unwrap_or(UNSET_MATERIAL)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn materials(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_rle_round_trip() {
        let original = materials(&["grass", "grass", "dirt", "grass", "stone", "stone"]);
        assert_eq!(decode_runs(&encode_runs(&original)), original);
    }

    #[test]
    fn test_rle_all_same_is_one_run() {
        let original = materials(&["water"; 50]);
        let runs = encode_runs(&original);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].count, 50);
        assert_eq!(decode_runs(&runs), original);
    }

    #[test]
    fn test_rle_fully_alternating() {
        let original: Vec<String> = (0..20)
            .map(|i| if i % 2 == 0 { "grass" } else { "dirt" }.to_string())
            .collect();
        let runs = encode_runs(&original);
        assert_eq!(runs.len(), 20);
        assert_eq!(decode_runs(&runs), original);
    }

    #[test]
    fn test_rle_empty() {
        assert!(encode_runs(&[]).is_empty());
        assert!(decode_runs(&[]).is_empty());
    }

    #[test]
    fn test_pack_round_trip_for_known_materials() {
        let original = materials(&["grass", "stone", "water", "unset"]);
        assert_eq!(unpack(&pack(&original)), original);
    }

    #[test]
    fn test_pack_is_lossy_for_unknown_materials() {
        let original = materials(&["grass", "lava"]);
        assert_eq!(pack(&original), "g.");
        assert_eq!(unpack("g."), materials(&["grass", "unset"]));
    }

    #[test]
    fn test_chunk_defaults_round_trip() {
        // two 2x2 chunks: mostly grass with one stone, all dirt
        let original = materials(&[
            "grass", "grass", "stone", "grass", //
            "dirt", "dirt", "dirt", "dirt",
        ]);
        let chunks = encode_chunk_defaults(&original, 2);

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].default_material, "grass");
        assert_eq!(
            chunks[0].exceptions,
            vec![TileException {
                offset: [0, 1],
                material: "stone".to_string()
            }]
        );
        assert!(chunks[1].exceptions.is_empty());

        assert_eq!(decode_chunk_defaults(&chunks, 2), original);
    }

    #[test]
    fn test_chunk_default_tie_breaks_toward_first_seen() {
        let original = materials(&["dirt", "dirt", "sand", "sand"]);
        let chunks = encode_chunk_defaults(&original, 2);

        assert_eq!(chunks[0].default_material, "dirt");
        assert_eq!(decode_chunk_defaults(&chunks, 2), original);
    }
}
