//! Interactive terrain editing tools
//!
//! [`TerrainEditor`] is a stateful tool engine bound to one grid for its
//! session: it tracks the selected material, tool and brush size, mutates the
//! grid through paint/fill/rectangle/line/eyedropper operations, and records
//! every operation as one batched entry on its undo/redo stack.

mod brush;
mod history;

pub use brush::{footprint, MAX_BRUSH_SIZE};
pub use history::{EditAction, TileChange, UndoRedoStack, UNDO_CAPACITY};

use log::{debug, warn};
use std::collections::{HashSet, VecDeque};
use tilekit_core::{canvas_to_world, world_to_tile, Camera, GridError, TileGrid};

/// Hard cap on tiles one flood fill may commit (a 100x100 region).
///
/// Part of the public contract: on an unbounded grid, fill terminates at
/// this cap and reports it through [`FillReport::limit_reached`].
pub const MAX_FILL_AREA: usize = 10_000;

/// The editing tool currently selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    #[default]
    Paint,
    Fill,
    Rectangle,
    Line,
    Eyedropper,
    Select,
}

/// Outcome of a flood fill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillReport {
    pub tiles_filled: usize,
    /// Matching tiles existed beyond [`MAX_FILL_AREA`] and were left
    /// untouched. An expected condition, not an error.
    pub limit_reached: bool,
    pub start_material: String,
    pub new_material: String,
}

/// Stateful tool engine bound to one grid.
pub struct TerrainEditor<'g> {
    grid: &'g mut dyn TileGrid,
    selected_material: String,
    selected_tool: Tool,
    brush_size: u32,
    tile_size: f32,
    history: UndoRedoStack,
}

impl<'g> TerrainEditor<'g> {
    /// Bind an editor session to a grid.
    pub fn new(grid: &'g mut dyn TileGrid) -> Self {
        Self {
            grid,
            selected_material: "grass".to_string(),
            selected_tool: Tool::default(),
            brush_size: 1,
            tile_size: 32.0,
            history: UndoRedoStack::new(),
        }
    }

    pub fn selected_material(&self) -> &str {
        &self.selected_material
    }

    pub fn select_material(&mut self, material: &str) {
        self.selected_material.clear();
        self.selected_material.push_str(material);
    }

    pub fn selected_tool(&self) -> Tool {
        self.selected_tool
    }

    pub fn select_tool(&mut self, tool: Tool) {
        self.selected_tool = tool;
    }

    pub fn brush_size(&self) -> u32 {
        self.brush_size
    }

    /// Set the brush size, clamped to at least 1. Higher layers clamp the
    /// maximum to an application-defined value.
    pub fn set_brush_size(&mut self, size: u32) {
        self.brush_size = size.max(1);
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    pub fn set_tile_size(&mut self, tile_size: f32) {
        self.tile_size = tile_size;
    }

    /// Apply the selected material over the brush footprint centered at the
    /// given tile.
    ///
    /// On a bounded grid an out-of-bounds center is an error; footprint tiles
    /// falling off the edge are skipped. The whole stroke lands as one undo
    /// entry.
    pub fn paint(&mut self, tile_x: i32, tile_y: i32) -> Result<(), GridError> {
        if !self.grid.contains(tile_x, tile_y) {
            return Err(GridError::OutOfBounds {
                x: tile_x,
                y: tile_y,
            });
        }

        let material = self.selected_material.clone();
        let mut changes = Vec::new();
        for (dx, dy) in footprint(self.brush_size) {
            let (x, y) = (tile_x + dx, tile_y + dy);
            if !self.grid.contains(x, y) {
                continue;
            }
            self.apply_material(x, y, &material, &mut changes)?;
        }

        self.history.push(EditAction::Paint(changes));
        self.grid.invalidate_cache();
        Ok(())
    }

    /// Pixel-space paint: resolves a canvas position through the camera and
    /// tile size, then paints.
    pub fn paint_at(&mut self, px: f32, py: f32, camera: &Camera) -> Result<(), GridError> {
        let (wx, wy) = canvas_to_world(px, py, camera);
        let (tx, ty) = world_to_tile(wx, wy, self.tile_size);
        self.paint(tx, ty)
    }

    /// Bounded 4-connected flood fill from the seed tile.
    ///
    /// Breadth-first with an explicit frontier queue; enqueueing stops once
    /// [`MAX_FILL_AREA`] tiles are committed. A seed already holding the
    /// target material is a 0-tile no-op, distinct from a failed fill.
    pub fn fill_region(
        &mut self,
        start_x: i32,
        start_y: i32,
        new_material: &str,
    ) -> Result<FillReport, GridError> {
        let start_material = self.grid.material(start_x, start_y)?.to_string();
        if start_material == new_material {
            return Ok(FillReport {
                tiles_filled: 0,
                limit_reached: false,
                start_material,
                new_material: new_material.to_string(),
            });
        }

        let mut queue: VecDeque<(i32, i32)> = VecDeque::new();
        let mut visited: HashSet<(i32, i32)> = HashSet::new();
        let mut changes = Vec::new();
        let mut limit_reached = false;

        queue.push_back((start_x, start_y));
        visited.insert((start_x, start_y));

        while let Some((x, y)) = queue.pop_front() {
            self.apply_material(x, y, new_material, &mut changes)?;

            if changes.len() >= MAX_FILL_AREA {
                // Anything still queued, or any unvisited matching neighbor
                // of the capped tile, is a matching tile left unfilled.
                limit_reached = !queue.is_empty()
                    || self.has_unvisited_match(x, y, &start_material, &visited)?;
                break;
            }

            for (nx, ny) in neighbors(x, y) {
                if visited.contains(&(nx, ny)) || !self.grid.contains(nx, ny) {
                    continue;
                }
                if self.grid.material(nx, ny)? == start_material {
                    visited.insert((nx, ny));
                    queue.push_back((nx, ny));
                }
            }
        }

        if limit_reached {
            warn!(
                "flood fill at ({}, {}) hit the {} tile cap",
                start_x, start_y, MAX_FILL_AREA
            );
        } else {
            debug!(
                "flood fill at ({}, {}) committed {} tiles",
                start_x,
                start_y,
                changes.len()
            );
        }

        let tiles_filled = changes.len();
        self.history.push(EditAction::Fill(changes));
        self.grid.invalidate_cache();

        Ok(FillReport {
            tiles_filled,
            limit_reached,
            start_material,
            new_material: new_material.to_string(),
        })
    }

    /// Flood fill with the selected material.
    pub fn fill(&mut self, start_x: i32, start_y: i32) -> Result<FillReport, GridError> {
        let material = self.selected_material.clone();
        self.fill_region(start_x, start_y, &material)
    }

    /// Paint every tile in the inclusive rectangle spanned by two corners,
    /// as one undo entry. Corners normalize, so either diagonal works.
    pub fn fill_rectangle(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        material: &str,
    ) -> Result<(), GridError> {
        for (x, y) in [(x1, y1), (x2, y2)] {
            if !self.grid.contains(x, y) {
                return Err(GridError::OutOfBounds { x, y });
            }
        }

        let (min_x, max_x) = (x1.min(x2), x1.max(x2));
        let (min_y, max_y) = (y1.min(y2), y1.max(y2));

        let mut changes = Vec::new();
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                self.apply_material(x, y, material, &mut changes)?;
            }
        }

        self.history.push(EditAction::Rectangle(changes));
        self.grid.invalidate_cache();
        Ok(())
    }

    /// Draw a Bresenham line between two tiles, as one undo entry.
    pub fn draw_line(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        material: &str,
    ) -> Result<(), GridError> {
        for (x, y) in [(x1, y1), (x2, y2)] {
            if !self.grid.contains(x, y) {
                return Err(GridError::OutOfBounds { x, y });
            }
        }

        let mut changes = Vec::new();
        for (x, y) in bresenham_line(x1, y1, x2, y2) {
            self.apply_material(x, y, material, &mut changes)?;
        }

        self.history.push(EditAction::Line(changes));
        self.grid.invalidate_cache();
        Ok(())
    }

    /// Eyedropper: read the material under the cursor into the selection.
    /// Non-destructive, so no undo entry.
    pub fn pick_material(&mut self, x: i32, y: i32) -> Result<String, GridError> {
        let material = self.grid.material(x, y)?.to_string();
        self.selected_material.clone_from(&material);
        Ok(material)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Reverse the most recent edit. Returns `false` on an empty stack.
    pub fn undo(&mut self) -> Result<bool, GridError> {
        let Some(action) = self.history.pop_undo() else {
            return Ok(false);
        };
        for change in action.changes().iter().rev() {
            self.grid.set_material(change.x, change.y, &change.old_material)?;
        }
        self.history.push_redo(action);
        self.grid.invalidate_cache();
        Ok(true)
    }

    /// Reapply the most recently undone edit. Returns `false` on an empty
    /// stack.
    pub fn redo(&mut self) -> Result<bool, GridError> {
        let Some(action) = self.history.pop_redo() else {
            return Ok(false);
        };
        for change in action.changes() {
            self.grid.set_material(change.x, change.y, &change.new_material)?;
        }
        self.history.push_undo(action);
        self.grid.invalidate_cache();
        Ok(true)
    }

    /// Write a material at one tile, recording the change for undo.
    fn apply_material(
        &mut self,
        x: i32,
        y: i32,
        material: &str,
        changes: &mut Vec<TileChange>,
    ) -> Result<(), GridError> {
        let old = self.grid.material(x, y)?.to_string();
        self.grid.set_material(x, y, material)?;
        changes.push(TileChange {
            x,
            y,
            old_material: old,
            new_material: material.to_string(),
        });
        Ok(())
    }

    /// Whether any 4-neighbor of `(x, y)` still matches the fill material.
    fn has_unvisited_match(
        &self,
        x: i32,
        y: i32,
        material: &str,
        visited: &HashSet<(i32, i32)>,
    ) -> Result<bool, GridError> {
        for (nx, ny) in neighbors(x, y) {
            if visited.contains(&(nx, ny)) || !self.grid.contains(nx, ny) {
                continue;
            }
            if self.grid.material(nx, ny)? == material {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

fn neighbors(x: i32, y: i32) -> [(i32, i32); 4] {
    [(x + 1, y), (x - 1, y), (x, y + 1), (x, y - 1)]
}

/// Tile coordinates along a Bresenham line between two endpoints.
///
/// Integer-only and valid in all eight octants; both endpoints are always
/// visited and consecutive tiles share an edge or a corner.
fn bresenham_line(x0: i32, y0: i32, x1: i32, y1: i32) -> Vec<(i32, i32)> {
    let mut points = Vec::new();

    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    let mut x = x0;
    let mut y = y0;

    loop {
        points.push((x, y));

        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 >= dy {
            if x == x1 {
                break;
            }
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            if y == y1 {
                break;
            }
            err += dx;
            y += sy;
        }
    }

    points
}
