//! A single grid cell

use crate::material::{weight_for, UNSET_MATERIAL};
use serde::{Deserialize, Serialize};

/// A single addressable grid cell holding a material and its derived weight.
///
/// The weight is always recomputed from the material table when the material
/// changes; a tile never carries independent state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub material: String,
    pub weight: u32,
}

impl Tile {
    /// Create a tile with the given material and its table weight.
    pub fn new(material: &str) -> Self {
        Self {
            material: material.to_string(),
            weight: weight_for(material),
        }
    }

    /// Create an unset tile.
    pub fn unset() -> Self {
        Self::new(UNSET_MATERIAL)
    }

    /// Replace the material and recompute the weight.
    pub fn set_material(&mut self, material: &str) {
        if self.material != material {
            self.material.clear();
            self.material.push_str(material);
        }
        self.weight = weight_for(material);
    }

    /// Whether this tile has ever been written.
    pub fn is_unset(&self) -> bool {
        self.material == UNSET_MATERIAL
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self::unset()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tile_derives_weight() {
        let tile = Tile::new("stone");
        assert_eq!(tile.material, "stone");
        assert_eq!(tile.weight, 100);
    }

    #[test]
    fn test_set_material_recomputes_weight() {
        let mut tile = Tile::new("grass");
        assert_eq!(tile.weight, 1);

        tile.set_material("water");
        assert_eq!(tile.material, "water");
        assert_eq!(tile.weight, 80);
    }

    #[test]
    fn test_default_is_unset() {
        let tile = Tile::default();
        assert!(tile.is_unset());
        assert_eq!(tile.weight, 0);
    }
}
