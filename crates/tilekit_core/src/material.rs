//! The fixed material table
//!
//! Every tile identifies itself by a material name; its movement weight and
//! its single-character packed code are derived from this table, never stored
//! independently.

/// Sentinel material for tiles that have never been written.
///
/// Distinct from every entry in [`MATERIALS`] so a flood fill can never treat
/// an untouched region as equal to a placed material.
pub const UNSET_MATERIAL: &str = "unset";

/// Packed-string code for the unset sentinel and for unknown materials.
pub const UNSET_CHAR: char = '.';

/// All known materials as `(name, weight, packed code)`.
///
/// Weight is the per-tile movement cost other systems read; stone and water
/// are effectively impassable.
pub const MATERIALS: &[(&str, u32, char)] = &[
    ("grass", 1, 'g'),
    ("moss", 2, 'm'),
    ("dirt", 3, 'd'),
    ("sand", 4, 's'),
    ("snow", 5, 'n'),
    ("water", 80, 'w'),
    ("stone", 100, 'r'),
];

/// Look up the movement weight for a material.
///
/// Unknown materials and the unset sentinel weigh 0.
pub fn weight_for(material: &str) -> u32 {
    MATERIALS
        .iter()
        .find(|(name, _, _)| *name == material)
        .map(|(_, weight, _)| *weight)
        .unwrap_or(0)
}

/// Look up the packed-string code for a material.
///
/// Unknown materials fall back to [`UNSET_CHAR`]; the packed encoding is
/// lossy for materials outside the table.
pub fn char_for(material: &str) -> char {
    MATERIALS
        .iter()
        .find(|(name, _, _)| *name == material)
        .map(|(_, _, code)| *code)
        .unwrap_or(UNSET_CHAR)
}

/// Reverse lookup from packed code to material name.
///
/// Unknown codes decode to the unset sentinel.
pub fn material_for_char(code: char) -> &'static str {
    MATERIALS
        .iter()
        .find(|(_, _, c)| *c == code)
        .map(|(name, _, _)| *name)
        .unwrap_or(UNSET_MATERIAL)
}

/// Check whether a material name is present in the table.
///
/// The unset sentinel is not a known material.
pub fn is_known(material: &str) -> bool {
    MATERIALS.iter().any(|(name, _, _)| *name == material)
}
