//! Component trait - interface for UI pieces
//!
//! Components turn terminal events into Actions, react to Actions, and draw
//! themselves. They never touch files or the network.

use crate::action::Action;
use anyhow::Result;
use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{layout::Rect, Frame};

/// Trait for UI components
///
/// 1. `handle_key_event` / `handle_mouse_event` - convert events to Actions
/// 2. `update` - process Actions and update state
/// 3. `draw` - render the component
pub trait Component {
    /// Convert a key press into an Action
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let _ = key;
        Ok(None)
    }

    /// Convert a mouse event into an Action
    ///
    /// Components that hit-test need the area they were last drawn in, so
    /// they keep it from their previous `draw`.
    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        let _ = mouse;
        Ok(None)
    }

    /// Update component state based on an Action, optionally chaining another
    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        let _ = action;
        Ok(None)
    }

    /// Draw the component into `area`
    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()>;
}
