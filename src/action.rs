//! Action enum - everything the application can be asked to do
//!
//! Components turn key and mouse events into Actions; the App processes them.

use crate::model::{Gesture, NudgeDirection};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick, drains finished title lookups
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Quit without confirmation
    ForceQuit,

    // ─────────────────────────────────────────────────────────────────────────
    // Cursor
    // ─────────────────────────────────────────────────────────────────────────
    NextRow,
    PrevRow,
    FirstRow,
    LastRow,

    // ─────────────────────────────────────────────────────────────────────────
    // Selection & editing
    // ─────────────────────────────────────────────────────────────────────────
    /// Add or remove the cursor row from the selection
    SelectRow,
    SelectAll,
    ClearSelection,
    /// Flip the enable state of the cursor row
    ToggleState,
    /// Move the selected rows one position
    Nudge(NudgeDirection),
    /// Pointer gesture, already hit-tested against the rows
    Gesture(Gesture),
    /// Write the workshop record and the title cache
    Save,

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    OpenQuitDialog,
    OpenHelp,
    CloseModal,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::ForceQuit => write!(f, "ForceQuit"),
            Action::NextRow => write!(f, "NextRow"),
            Action::PrevRow => write!(f, "PrevRow"),
            Action::FirstRow => write!(f, "FirstRow"),
            Action::LastRow => write!(f, "LastRow"),
            Action::SelectRow => write!(f, "SelectRow"),
            Action::SelectAll => write!(f, "SelectAll"),
            Action::ClearSelection => write!(f, "ClearSelection"),
            Action::ToggleState => write!(f, "ToggleState"),
            Action::Nudge(direction) => write!(f, "Nudge({:?})", direction),
            Action::Gesture(gesture) => write!(f, "Gesture({:?})", gesture),
            Action::Save => write!(f, "Save"),
            Action::OpenQuitDialog => write!(f, "OpenQuitDialog"),
            Action::OpenHelp => write!(f, "OpenHelp"),
            Action::CloseModal => write!(f, "CloseModal"),
        }
    }
}
