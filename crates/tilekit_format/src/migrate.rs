//! Schema version migration chain
//!
//! Older documents are upgraded step by step: an ordered list of pure
//! `Value -> Value` transforms keyed by source major version, applied in a
//! loop until the document reaches [`CURRENT_VERSION`]. Each step touches
//! only the fields it targets, so untargeted data survives every migration.

use crate::document::CURRENT_VERSION;
use crate::error::FormatError;
use log::debug;
use serde_json::Value;

const CURRENT_MAJOR: u32 = 2;

type MigrationStep = fn(Value) -> Result<Value, FormatError>;

const MIGRATIONS: &[(u32, MigrationStep)] = &[(1, migrate_v1_to_v2)];

/// Parse the major version out of `metadata.version`.
///
/// Accepts `"1"`, `"1.0"`, `"1.2.3"` or a bare JSON number.
pub fn document_major_version(doc: &Value) -> Result<u32, FormatError> {
    let metadata = doc
        .get("metadata")
        .and_then(Value::as_object)
        .ok_or_else(|| FormatError::MalformedDocument("missing metadata object".to_string()))?;
    let version = metadata
        .get("version")
        .ok_or_else(|| FormatError::MalformedDocument("metadata.version is required".to_string()))?;

    match version {
        Value::String(s) => s
            .split('.')
            .next()
            .unwrap_or_default()
            .parse::<u32>()
            .map_err(|_| FormatError::InvalidVersion(s.clone())),
        Value::Number(n) => n
            .as_u64()
            .map(|v| v as u32)
            .ok_or_else(|| FormatError::InvalidVersion(n.to_string())),
        other => Err(FormatError::InvalidVersion(other.to_string())),
    }
}

/// Upgrade a raw document to the current version.
pub fn migrate_to_current(mut doc: Value) -> Result<Value, FormatError> {
    loop {
        let major = document_major_version(&doc)?;
        if major == CURRENT_MAJOR {
            return Ok(doc);
        }
        if major > CURRENT_MAJOR {
            return Err(FormatError::InvalidVersion(format!(
                "document version {} is newer than {}",
                major, CURRENT_VERSION
            )));
        }
        let step = MIGRATIONS
            .iter()
            .find(|(from, _)| *from == major)
            .map(|(_, step)| *step)
            .ok_or_else(|| {
                FormatError::InvalidVersion(format!("no migration from version {}", major))
            })?;

        debug!("migrating terrain document v{} -> v{}", major, major + 1);
        doc = step(doc)?;
    }
}

/// v1 documents named the grid dimensions `width`/`height`.
fn migrate_v1_to_v2(mut doc: Value) -> Result<Value, FormatError> {
    let metadata = doc
        .get_mut("metadata")
        .and_then(Value::as_object_mut)
        .ok_or_else(|| FormatError::MalformedDocument("missing metadata object".to_string()))?;

    if let Some(width) = metadata.remove("width") {
        metadata.insert("gridSizeX".to_string(), width);
    }
    if let Some(height) = metadata.remove("height") {
        metadata.insert("gridSizeY".to_string(), height);
    }
    metadata.insert(
        "version".to_string(),
        Value::String(CURRENT_VERSION.to_string()),
    );
    Ok(doc)
}
