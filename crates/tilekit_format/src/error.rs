//! Terrain format errors

use std::fmt;

/// Errors surfaced by terrain import/export.
///
/// Import validation fails fast, before any grid is built; a partially
/// applied import is never observable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// JSON parse failure, missing `metadata`, or an undecodable tile
    /// payload.
    MalformedDocument(String),
    /// Non-numeric version string, or a version newer than this library.
    InvalidVersion(String),
    /// Non-positive or missing grid dimensions.
    InvalidDimensions(String),
    /// A material not present in the material table, from an untrusted
    /// document.
    InvalidMaterial(String),
    /// Serialization failure on export.
    Serialize(String),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::MalformedDocument(e) => write!(f, "malformed document: {}", e),
            FormatError::InvalidVersion(e) => write!(f, "invalid version: {}", e),
            FormatError::InvalidDimensions(e) => write!(f, "invalid dimensions: {}", e),
            FormatError::InvalidMaterial(e) => write!(f, "invalid material: {}", e),
            FormatError::Serialize(e) => write!(f, "serialize error: {}", e),
        }
    }
}

impl std::error::Error for FormatError {}
