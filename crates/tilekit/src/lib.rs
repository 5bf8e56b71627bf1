//! # tilekit
//!
//! Chunked terrain editing toolkit for 2D grid games.
//!
//! ## Quick Start
//!
//! ```rust
//! use tilekit::prelude::*;
//!
//! let mut grid = BoundedGrid::filled(4, 4, 8, "grass");
//! let mut editor = TerrainEditor::new(&mut grid);
//!
//! editor.select_material("stone");
//! editor.set_brush_size(3);
//! editor.paint(10, 10).unwrap();
//!
//! let report = editor.fill_region(0, 0, "dirt").unwrap();
//! assert!(!report.limit_reached);
//! editor.undo().unwrap();
//! ```
//!
//! ## Crate Structure
//!
//! This umbrella crate re-exports the tilekit_* sub-crates:
//!
//! - [`core`] - Grids, chunks, tiles, materials and coordinate transforms
//! - [`editor`] - Paint/fill/rectangle/line/eyedropper tools with undo/redo
//! - [`format`] - Versioned JSON persistence with compression and migration

/// Grid data structures and coordinate transforms.
pub mod core {
    pub use tilekit_core::*;
}

pub use tilekit_core::{
    BoundedGrid, Camera, Chunk, GridError, SparseGrid, Tile, TileGrid, UNSET_MATERIAL,
};

/// Interactive editing tools.
pub mod editor {
    pub use tilekit_editor::*;
}

pub use tilekit_editor::{
    EditAction, FillReport, TerrainEditor, TileChange, Tool, UndoRedoStack, MAX_FILL_AREA,
};

/// Versioned terrain persistence.
pub mod format {
    pub use tilekit_format::*;
}

pub use tilekit_format::{
    ExportOptions, FormatError, TerrainDocument, TerrainExporter, TerrainImporter, TileEncoding,
    CURRENT_VERSION,
};

/// Convenience re-exports for the common workflow.
pub mod prelude {
    pub use tilekit_core::{
        canvas_to_world, tile_to_chunk, world_to_tile, BoundedGrid, Camera, GridError, SparseGrid,
        TileGrid,
    };
    pub use tilekit_editor::{FillReport, TerrainEditor, Tool, MAX_FILL_AREA};
    pub use tilekit_format::{
        ExportOptions, FormatError, TerrainExporter, TerrainImporter, TileEncoding,
    };
}
