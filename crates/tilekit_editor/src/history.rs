//! Undo/redo history for terrain edits
//!
//! Each history entry batches every tile a tool touched, so one undo reverses
//! the whole operation. Undo and redo are a single generic replay over the
//! old- or new-material slot of the batched changes.

use std::collections::VecDeque;

/// Maximum undo depth; the oldest entry is evicted beyond this.
pub const UNDO_CAPACITY: usize = 50;

/// One tile touched by an edit, with both material slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileChange {
    pub x: i32,
    pub y: i32,
    pub old_material: String,
    pub new_material: String,
}

/// A reversible edit, tagged by the tool that produced it.
#[derive(Debug, Clone)]
pub enum EditAction {
    Paint(Vec<TileChange>),
    Fill(Vec<TileChange>),
    Rectangle(Vec<TileChange>),
    Line(Vec<TileChange>),
}

impl EditAction {
    /// The batched tile changes, regardless of tool.
    pub fn changes(&self) -> &[TileChange] {
        match self {
            EditAction::Paint(changes)
            | EditAction::Fill(changes)
            | EditAction::Rectangle(changes)
            | EditAction::Line(changes) => changes,
        }
    }
}

/// Bounded undo/redo stacks.
///
/// Pushing a new action clears the redo stack; popping on empty stacks is a
/// no-op query rather than an error.
#[derive(Debug, Default)]
pub struct UndoRedoStack {
    undo: VecDeque<EditAction>,
    redo: Vec<EditAction>,
}

impl UndoRedoStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed edit. Empty edits are dropped.
    pub fn push(&mut self, action: EditAction) {
        if action.changes().is_empty() {
            return;
        }
        if self.undo.len() == UNDO_CAPACITY {
            self.undo.pop_front();
        }
        self.undo.push_back(action);
        self.redo.clear();
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Take the most recent action off the undo stack.
    pub fn pop_undo(&mut self) -> Option<EditAction> {
        self.undo.pop_back()
    }

    /// Take the most recent undone action off the redo stack.
    pub fn pop_redo(&mut self) -> Option<EditAction> {
        self.redo.pop()
    }

    /// Park an undone action for redo.
    pub fn push_redo(&mut self, action: EditAction) {
        self.redo.push(action);
    }

    /// Park a redone action back on the undo stack without clearing redo.
    pub fn push_undo(&mut self, action: EditAction) {
        if self.undo.len() == UNDO_CAPACITY {
            self.undo.pop_front();
        }
        self.undo.push_back(action);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn change(x: i32, y: i32) -> TileChange {
        TileChange {
            x,
            y,
            old_material: "grass".to_string(),
            new_material: "dirt".to_string(),
        }
    }

    #[test]
    fn test_push_clears_redo() {
        let mut stack = UndoRedoStack::new();
        stack.push(EditAction::Paint(vec![change(0, 0)]));
        let action = stack.pop_undo().unwrap();
        stack.push_redo(action);
        assert!(stack.can_redo());

        stack.push(EditAction::Paint(vec![change(1, 1)]));
        assert!(!stack.can_redo());
    }

    #[test]
    fn test_empty_edit_is_dropped() {
        let mut stack = UndoRedoStack::new();
        stack.push(EditAction::Fill(Vec::new()));
        assert!(!stack.can_undo());
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut stack = UndoRedoStack::new();
        for i in 0..(UNDO_CAPACITY as i32 + 5) {
            stack.push(EditAction::Paint(vec![change(i, 0)]));
        }

        let mut count = 0;
        let mut newest_first = Vec::new();
        while let Some(action) = stack.pop_undo() {
            newest_first.push(action.changes()[0].x);
            count += 1;
        }
        assert_eq!(count, UNDO_CAPACITY);
        // the five oldest entries were evicted
        assert_eq!(*newest_first.last().unwrap(), 5);
    }

    #[test]
    fn test_empty_pops_are_none() {
        let mut stack = UndoRedoStack::new();
        assert!(stack.pop_undo().is_none());
        assert!(stack.pop_redo().is_none());
    }
}
