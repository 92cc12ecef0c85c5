//! Mod list component
//!
//! Draws the mod table and turns terminal input into Actions. Mouse events
//! are hit-tested against the rows drawn last frame and reported as
//! `Gesture`s; the InteractionController decides what they mean.

use crate::action::Action;
use crate::component::Component;
use crate::model::{Gesture, InteractionController, ModListModel, NudgeDirection, SelectModifier};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};
use std::time::{Duration, Instant};

/// Shown while a title lookup is still running
pub const PENDING_TITLE: &str = "Loading...";

/// Shorten `title` to `max_len` characters plus an ellipsis
pub fn truncate_title(title: &str, max_len: usize) -> String {
    if title.chars().count() <= max_len {
        title.to_string()
    } else {
        let mut short: String = title.chars().take(max_len).collect();
        short.push_str("...");
        short
    }
}

pub struct ModListComponent {
    /// Cursor row
    pub table_state: TableState,
    /// Where data rows were drawn last frame (inside border, below header)
    rows_area: Rect,
    /// Number of rows drawn last frame
    row_count: usize,
    /// Previous left press, for double-click detection
    last_press: Option<(usize, Instant)>,
    double_click: Duration,
    max_title_len: usize,
}

impl ModListComponent {
    pub fn new(double_click: Duration, max_title_len: usize) -> Self {
        Self {
            table_state: TableState::default(),
            rows_area: Rect::default(),
            row_count: 0,
            last_press: None,
            double_click,
            max_title_len,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Cursor
    // ─────────────────────────────────────────────────────────────────────────

    pub fn cursor(&self) -> Option<usize> {
        self.table_state.selected()
    }

    pub fn set_cursor(&mut self, row: Option<usize>) {
        self.table_state.select(row);
    }

    pub fn next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let next = match self.cursor() {
            Some(row) if row + 1 < len => row + 1,
            Some(row) => row,
            None => 0,
        };
        self.set_cursor(Some(next));
    }

    pub fn previous(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let prev = self.cursor().map_or(0, |row| row.saturating_sub(1));
        self.set_cursor(Some(prev));
    }

    pub fn select_first(&mut self, len: usize) {
        self.set_cursor(if len == 0 { None } else { Some(0) });
    }

    pub fn select_last(&mut self, len: usize) {
        self.set_cursor(len.checked_sub(1));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Hit testing
    // ─────────────────────────────────────────────────────────────────────────

    /// Row index under a terminal cell, if any
    pub fn row_at(&self, column: u16, row: u16) -> Option<usize> {
        let area = self.rows_area;
        let inside = column >= area.x
            && column < area.x.saturating_add(area.width)
            && row >= area.y
            && row < area.y.saturating_add(area.height);
        if !inside {
            return None;
        }
        let index = self.table_state.offset() + usize::from(row - area.y);
        (index < self.row_count).then_some(index)
    }

    fn press(&mut self, mouse: &MouseEvent) -> Option<Action> {
        let row = self.row_at(mouse.column, mouse.row);
        let now = Instant::now();

        if let (Some(row), Some((last_row, at))) = (row, self.last_press) {
            if row == last_row && now.duration_since(at) <= self.double_click {
                self.last_press = None;
                return Some(Action::Gesture(Gesture::DoubleActivate { row }));
            }
        }
        self.last_press = row.map(|r| (r, now));

        if row.is_some() {
            self.set_cursor(row);
        }
        let modifier = if mouse.modifiers.contains(KeyModifiers::CONTROL) {
            SelectModifier::Toggle
        } else if mouse.modifiers.contains(KeyModifiers::SHIFT) {
            SelectModifier::Range
        } else {
            SelectModifier::None
        };
        Some(Action::Gesture(Gesture::PointerDown { row, modifier }))
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for ModListComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let action = match key.code {
            // Reordering
            KeyCode::Char('J') => Some(Action::Nudge(NudgeDirection::Down)),
            KeyCode::Char('K') => Some(Action::Nudge(NudgeDirection::Up)),
            KeyCode::Down if shift => Some(Action::Nudge(NudgeDirection::Down)),
            KeyCode::Up if shift => Some(Action::Nudge(NudgeDirection::Up)),

            // Cursor
            KeyCode::Char('j') | KeyCode::Down => Some(Action::NextRow),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::PrevRow),
            KeyCode::Char('g') | KeyCode::Home => Some(Action::FirstRow),
            KeyCode::Char('G') | KeyCode::End => Some(Action::LastRow),

            // Selection
            KeyCode::Char('a') if ctrl => Some(Action::SelectAll),
            KeyCode::Char(' ') => Some(Action::SelectRow),
            KeyCode::Esc => Some(Action::ClearSelection),

            // Editing
            KeyCode::Enter | KeyCode::Char('t') => Some(Action::ToggleState),
            KeyCode::Char('s') => Some(Action::Save),

            // Modals
            KeyCode::Char('q') => Some(Action::OpenQuitDialog),
            KeyCode::Char('c') if ctrl => Some(Action::ForceQuit),
            KeyCode::Char('?') => Some(Action::OpenHelp),
            _ => None,
        };
        Ok(action)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        let action = match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.press(&mouse),
            MouseEventKind::Drag(MouseButton::Left) => Some(Action::Gesture(Gesture::PointerMoved {
                row: self.row_at(mouse.column, mouse.row),
            })),
            MouseEventKind::Up(MouseButton::Left) => Some(Action::Gesture(Gesture::PointerUp)),
            MouseEventKind::ScrollDown => Some(Action::NextRow),
            MouseEventKind::ScrollUp => Some(Action::PrevRow),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Drawing needs the model; see draw_mod_list
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Rendering
// ═══════════════════════════════════════════════════════════════════════════════

/// What the table needs from the App to draw itself
pub struct ModListRenderContext<'a> {
    pub model: &'a ModListModel,
    pub controller: &'a InteractionController,
    pub dirty: bool,
}

pub fn draw_mod_list(
    frame: &mut Frame,
    area: Rect,
    list: &mut ModListComponent,
    ctx: &ModListRenderContext,
) {
    let span = ctx.model.span().unwrap_or(&[]);
    let rows: Vec<Row> = ctx
        .model
        .entries()
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let title = entry.title.as_deref().unwrap_or(PENDING_TITLE);
            let title_style = if entry.is_pending() {
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC)
            } else {
                Style::default()
            };
            let state_style = if entry.state.is_enabled() {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Red)
            };

            let mut row_style = Style::default().fg(if entry.state.is_enabled() {
                Color::White
            } else {
                Color::DarkGray
            });
            if ctx.controller.is_selected(index) {
                row_style = row_style.bg(Color::Rgb(60, 60, 60));
            }
            if span.binary_search(&index).is_ok() {
                row_style = row_style.fg(Color::Yellow);
            }

            Row::new(vec![
                Cell::from(entry.id.clone()),
                Cell::from(Span::styled(
                    truncate_title(title, list.max_title_len),
                    title_style,
                )),
                Cell::from(Span::styled(format!("  {}", entry.state), state_style)),
            ])
            .style(row_style)
        })
        .collect();

    let mut title = format!(" Mods ({}) ", ctx.model.len());
    let selected = ctx.controller.selection().len();
    if selected > 0 {
        title = format!("{}[{} selected] ", title, selected);
    }
    if ctx.dirty {
        title = format!("{}● unsaved ", title);
    }

    let header = Row::new(vec!["ID", "Name", "State"]).style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );

    let table = Table::new(
        rows,
        [
            Constraint::Length(12),
            Constraint::Min(20),
            Constraint::Length(7),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(Color::DarkGray)),
    )
    .highlight_style(Style::default().bg(Color::Blue).add_modifier(Modifier::BOLD))
    .highlight_symbol("▶ ");

    frame.render_stateful_widget(table, area, &mut list.table_state);

    // Border on every side, then one header line
    list.rows_area = Rect::new(
        area.x.saturating_add(1),
        area.y.saturating_add(2),
        area.width.saturating_sub(2),
        area.height.saturating_sub(3),
    );
    list.row_count = ctx.model.len();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ModState, RecordEntry};
    use ratatui::{backend::TestBackend, Terminal};

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn drawn_list(rows: usize) -> ModListComponent {
        let mut list = ModListComponent::new(Duration::from_millis(400), 45);
        list.rows_area = Rect::new(1, 2, 40, 10);
        list.row_count = rows;
        list
    }

    #[test]
    fn test_truncate_title() {
        assert_eq!(truncate_title("Short", 45), "Short");
        let long = "x".repeat(50);
        assert_eq!(truncate_title(&long, 45), format!("{}...", "x".repeat(45)));
        assert_eq!(truncate_title(&"é".repeat(45), 45), "é".repeat(45));
    }

    #[test]
    fn test_row_at() {
        let list = drawn_list(3);
        assert_eq!(list.row_at(5, 2), Some(0));
        assert_eq!(list.row_at(5, 4), Some(2));
        // Past the last row
        assert_eq!(list.row_at(5, 5), None);
        // On the border / header
        assert_eq!(list.row_at(0, 2), None);
        assert_eq!(list.row_at(5, 1), None);
    }

    #[test]
    fn test_press_then_double_press() {
        let mut list = drawn_list(3);
        let first = list
            .handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 5, 3))
            .unwrap();
        assert_eq!(
            first,
            Some(Action::Gesture(Gesture::PointerDown {
                row: Some(1),
                modifier: SelectModifier::None
            }))
        );
        assert_eq!(list.cursor(), Some(1));

        let second = list
            .handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 5, 3))
            .unwrap();
        assert_eq!(second, Some(Action::Gesture(Gesture::DoubleActivate { row: 1 })));
    }

    #[test]
    fn test_drag_and_release() {
        let mut list = drawn_list(3);
        let moved = list
            .handle_mouse_event(mouse(MouseEventKind::Drag(MouseButton::Left), 5, 4))
            .unwrap();
        assert_eq!(
            moved,
            Some(Action::Gesture(Gesture::PointerMoved { row: Some(2) }))
        );
        let released = list
            .handle_mouse_event(mouse(MouseEventKind::Up(MouseButton::Left), 5, 4))
            .unwrap();
        assert_eq!(released, Some(Action::Gesture(Gesture::PointerUp)));
    }

    #[test]
    fn test_ctrl_press_toggles_selection() {
        let mut list = drawn_list(3);
        let mut event = mouse(MouseEventKind::Down(MouseButton::Left), 5, 2);
        event.modifiers = KeyModifiers::CONTROL;
        assert_eq!(
            list.handle_mouse_event(event).unwrap(),
            Some(Action::Gesture(Gesture::PointerDown {
                row: Some(0),
                modifier: SelectModifier::Toggle
            }))
        );
    }

    #[test]
    fn test_shift_arrow_nudges() {
        let mut list = drawn_list(3);
        let key = KeyEvent::new(KeyCode::Down, KeyModifiers::SHIFT);
        assert_eq!(
            list.handle_key_event(key).unwrap(),
            Some(Action::Nudge(NudgeDirection::Down))
        );
        let key = KeyEvent::new(KeyCode::Down, KeyModifiers::NONE);
        assert_eq!(list.handle_key_event(key).unwrap(), Some(Action::NextRow));
    }

    #[test]
    fn test_cursor_movement_clamps() {
        let mut list = drawn_list(2);
        list.previous(2);
        assert_eq!(list.cursor(), Some(0));
        list.next(2);
        list.next(2);
        assert_eq!(list.cursor(), Some(1));
        list.select_last(0);
        assert_eq!(list.cursor(), None);
    }

    #[test]
    fn test_draw_records_rows_area() {
        let mut model = ModListModel::new();
        model.load(vec![
            RecordEntry::new("111", ModState::Enabled),
            RecordEntry::new("222", ModState::Disabled),
        ]);
        model.apply_title("111", "Better Bots");
        let controller = InteractionController::new();
        let mut list = ModListComponent::new(Duration::from_millis(400), 45);

        let mut terminal = Terminal::new(TestBackend::new(60, 10)).unwrap();
        terminal
            .draw(|frame| {
                let ctx = ModListRenderContext {
                    model: &model,
                    controller: &controller,
                    dirty: false,
                };
                draw_mod_list(frame, frame.area(), &mut list, &ctx);
            })
            .unwrap();

        assert_eq!(list.row_at(3, 2), Some(0));
        assert_eq!(list.row_at(3, 3), Some(1));
        assert_eq!(list.row_at(3, 4), None);
    }
}
