//! Pointer gestures to mod list operations
//!
//! The terminal layer reports raw gestures with the row already hit-tested;
//! this controller keeps the selection and drives the reorder/toggle calls.

use super::mod_list::ModListModel;
use std::collections::BTreeSet;
use tracing::debug;

/// Modifier held while pressing the pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectModifier {
    #[default]
    None,
    /// Ctrl: add or remove the row from the selection
    Toggle,
    /// Shift: select everything between the anchor and the row
    Range,
}

/// A gesture reported by the rendering surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    PointerDown {
        row: Option<usize>,
        modifier: SelectModifier,
    },
    PointerMoved {
        row: Option<usize>,
    },
    PointerUp,
    DoubleActivate {
        row: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NudgeDirection {
    Up,
    Down,
}

/// Selection and drag tracking for the mod list
#[derive(Debug, Default)]
pub struct InteractionController {
    selection: BTreeSet<usize>,
    anchor: Option<usize>,
    dragging: bool,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> &BTreeSet<usize> {
        &self.selection
    }

    pub fn is_selected(&self, row: usize) -> bool {
        self.selection.contains(&row)
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Handle one gesture. Returns true when the list needs a redraw.
    pub fn handle(&mut self, gesture: Gesture, model: &mut ModListModel) -> bool {
        match gesture {
            Gesture::PointerDown { row: Some(row), modifier } if row < model.len() => {
                self.pointer_down(row, modifier, model)
            }
            Gesture::PointerDown { .. } => false,
            Gesture::PointerMoved { row: Some(row) } if self.dragging => {
                if model.continue_reorder(row) {
                    self.follow_span(model);
                    true
                } else {
                    false
                }
            }
            Gesture::PointerMoved { .. } => false,
            Gesture::PointerUp => {
                let was_dragging = self.dragging;
                self.dragging = false;
                model.end_reorder();
                was_dragging
            }
            Gesture::DoubleActivate { row } => {
                if let Some(state) = model.toggle(row) {
                    debug!(row, %state, "toggled mod state");
                    true
                } else {
                    false
                }
            }
        }
    }

    fn pointer_down(&mut self, row: usize, modifier: SelectModifier, model: &mut ModListModel) -> bool {
        match modifier {
            SelectModifier::Toggle => {
                if !self.selection.remove(&row) {
                    self.selection.insert(row);
                }
                self.anchor = Some(row);
                true
            }
            SelectModifier::Range => {
                let anchor = self.anchor.unwrap_or(row);
                let (low, high) = if anchor <= row { (anchor, row) } else { (row, anchor) };
                self.selection = (low..=high).collect();
                true
            }
            SelectModifier::None => {
                if !self.selection.contains(&row) {
                    self.selection.clear();
                    self.selection.insert(row);
                }
                self.anchor = Some(row);
                self.dragging = model.begin_reorder(self.selection.iter().copied()).is_ok();
                true
            }
        }
    }

    /// Move the selection (or the cursor row) one position up or down
    pub fn nudge(
        &mut self,
        direction: NudgeDirection,
        cursor: Option<usize>,
        model: &mut ModListModel,
    ) -> bool {
        if self.selection.is_empty() {
            match cursor {
                Some(row) if row < model.len() => {
                    self.selection.insert(row);
                }
                _ => return false,
            }
        }

        let (Some(&first), Some(&last)) = (self.selection.first(), self.selection.last()) else {
            return false;
        };
        let target = match direction {
            NudgeDirection::Up if first > 0 => first - 1,
            NudgeDirection::Down if last + 1 < model.len() => last + 1,
            _ => return false,
        };

        if model.begin_reorder(self.selection.iter().copied()).is_err() {
            return false;
        }
        let moved = model.continue_reorder(target);
        if moved {
            self.follow_span(model);
        }
        model.end_reorder();
        moved
    }

    pub fn select_row(&mut self, row: usize) {
        if !self.selection.remove(&row) {
            self.selection.insert(row);
        }
        self.anchor = Some(row);
    }

    pub fn select_all(&mut self, len: usize) {
        self.selection = (0..len).collect();
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.anchor = None;
    }

    fn follow_span(&mut self, model: &ModListModel) {
        if let Some(span) = model.span() {
            self.selection = span.iter().copied().collect();
            self.anchor = span.first().copied();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::entry::{ModState, RecordEntry};

    fn model_with(ids: &[&str]) -> ModListModel {
        let mut model = ModListModel::new();
        model.load(
            ids.iter()
                .map(|id| RecordEntry::new(*id, ModState::Enabled))
                .collect(),
        );
        model
    }

    fn ids(model: &ModListModel) -> Vec<&str> {
        model.entries().iter().map(|e| e.id.as_str()).collect()
    }

    fn down(row: usize) -> Gesture {
        Gesture::PointerDown {
            row: Some(row),
            modifier: SelectModifier::None,
        }
    }

    fn moved(row: usize) -> Gesture {
        Gesture::PointerMoved { row: Some(row) }
    }

    #[test]
    fn test_press_drag_release() {
        let mut model = model_with(&["A", "B", "C", "D"]);
        let mut controller = InteractionController::new();

        assert!(controller.handle(down(0), &mut model));
        assert!(controller.is_dragging());
        assert!(controller.handle(moved(1), &mut model));
        assert!(controller.handle(moved(2), &mut model));
        assert_eq!(ids(&model), vec!["B", "C", "A", "D"]);
        assert!(controller.is_selected(2));

        assert!(controller.handle(Gesture::PointerUp, &mut model));
        assert!(!controller.is_dragging());
        assert!(model.span().is_none());
        // The moved row stays highlighted
        assert_eq!(controller.selection().iter().copied().collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn test_drag_whole_selection() {
        let mut model = model_with(&["A", "B", "C", "D", "E"]);
        let mut controller = InteractionController::new();

        controller.handle(down(0), &mut model);
        controller.handle(Gesture::PointerUp, &mut model);
        controller.handle(
            Gesture::PointerDown {
                row: Some(1),
                modifier: SelectModifier::Toggle,
            },
            &mut model,
        );

        // Pressing on an already selected row drags both
        controller.handle(down(1), &mut model);
        controller.handle(moved(3), &mut model);
        controller.handle(Gesture::PointerUp, &mut model);

        assert_eq!(ids(&model), vec!["C", "D", "A", "B", "E"]);
    }

    #[test]
    fn test_press_on_unselected_row_resets_selection() {
        let mut model = model_with(&["A", "B", "C"]);
        let mut controller = InteractionController::new();
        controller.select_row(0);
        controller.select_row(1);

        controller.handle(down(2), &mut model);
        assert_eq!(controller.selection().len(), 1);
        assert!(controller.is_selected(2));
        assert_eq!(model.span(), Some(&[2][..]));
    }

    #[test]
    fn test_press_on_selected_row_keeps_selection() {
        let mut model = model_with(&["A", "B", "C"]);
        let mut controller = InteractionController::new();
        controller.select_all(3);

        controller.handle(down(2), &mut model);
        assert_eq!(controller.selection().len(), 3);
        assert!(controller.is_dragging());
        assert_eq!(model.span(), Some(&[0, 1, 2][..]));
    }

    #[test]
    fn test_shift_selects_range_without_dragging() {
        let mut model = model_with(&["A", "B", "C", "D"]);
        let mut controller = InteractionController::new();

        controller.handle(down(1), &mut model);
        controller.handle(Gesture::PointerUp, &mut model);
        controller.handle(
            Gesture::PointerDown {
                row: Some(3),
                modifier: SelectModifier::Range,
            },
            &mut model,
        );

        assert!(!controller.is_dragging());
        assert_eq!(
            controller.selection().iter().copied().collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn test_move_without_press_is_ignored() {
        let mut model = model_with(&["A", "B"]);
        let mut controller = InteractionController::new();
        assert!(!controller.handle(moved(1), &mut model));
        assert_eq!(ids(&model), vec!["A", "B"]);
    }

    #[test]
    fn test_press_outside_rows_is_ignored() {
        let mut model = model_with(&["A"]);
        let mut controller = InteractionController::new();
        assert!(!controller.handle(
            Gesture::PointerDown {
                row: None,
                modifier: SelectModifier::None
            },
            &mut model
        ));
        assert!(!controller.handle(down(4), &mut model));
        assert!(!controller.is_dragging());
    }

    #[test]
    fn test_double_activate_toggles() {
        let mut model = model_with(&["111", "222"]);
        let mut controller = InteractionController::new();

        assert!(controller.handle(Gesture::DoubleActivate { row: 1 }, &mut model));
        assert_eq!(model.get(1).map(|e| e.state), Some(ModState::Disabled));
        assert_eq!(model.get(0).map(|e| e.state), Some(ModState::Enabled));
        assert!(!controller.handle(Gesture::DoubleActivate { row: 9 }, &mut model));
    }

    #[test]
    fn test_nudge_moves_selection() {
        let mut model = model_with(&["A", "B", "C", "D"]);
        let mut controller = InteractionController::new();
        controller.select_row(1);
        controller.select_row(2);

        assert!(controller.nudge(NudgeDirection::Down, None, &mut model));
        assert_eq!(ids(&model), vec!["A", "D", "B", "C"]);
        assert!(controller.nudge(NudgeDirection::Up, None, &mut model));
        assert!(controller.nudge(NudgeDirection::Up, None, &mut model));
        assert_eq!(ids(&model), vec!["B", "C", "A", "D"]);
        assert!(!controller.nudge(NudgeDirection::Up, None, &mut model));
        assert!(model.span().is_none());
    }

    #[test]
    fn test_nudge_uses_cursor_without_selection() {
        let mut model = model_with(&["A", "B", "C"]);
        let mut controller = InteractionController::new();

        assert!(controller.nudge(NudgeDirection::Down, Some(0), &mut model));
        assert_eq!(ids(&model), vec!["B", "A", "C"]);
        assert!(controller.is_selected(1));
    }
}
