//! Quit confirmation dialog component

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Quit confirmation, with a warning line when the order is unsaved
#[derive(Default)]
pub struct QuitDialog {
    pub unsaved: bool,
}

impl Component for QuitDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => Some(Action::ForceQuit),
            KeyCode::Char('s') | KeyCode::Char('S') if self.unsaved => Some(Action::Save),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(Action::CloseModal),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let height = if self.unsaved { 9 } else { 7 };
        let popup_area = centered_popup(area, 46, height);

        frame.render_widget(Clear, popup_area);

        let mut content = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Are you sure you want to quit?",
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
        ];
        if self.unsaved {
            content.push(Line::from(""));
            content.push(Line::from(Span::styled(
                "The new order has not been saved.",
                Style::default().fg(Color::Red),
            )));
        }
        content.push(Line::from(""));

        let mut keys = vec![
            Span::styled(
                " y ",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("Quit  "),
        ];
        if self.unsaved {
            keys.push(Span::styled(
                " s ",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ));
            keys.push(Span::raw("Save & quit  "));
        }
        keys.push(Span::styled(
            " n/Esc ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
        keys.push(Span::raw("Cancel"));
        content.push(Line::from(keys));

        let paragraph = Paragraph::new(content)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow))
                    .title(" Quit? ")
                    .title_style(
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    ),
            )
            .alignment(Alignment::Center);

        frame.render_widget(paragraph, popup_area);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(dialog: &mut QuitDialog, c: char) -> Option<Action> {
        dialog
            .handle_key_event(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
            .unwrap()
    }

    #[test]
    fn test_save_only_offered_when_unsaved() {
        let mut dialog = QuitDialog { unsaved: false };
        assert_eq!(press(&mut dialog, 's'), None);
        assert_eq!(press(&mut dialog, 'y'), Some(Action::ForceQuit));

        dialog.unsaved = true;
        assert_eq!(press(&mut dialog, 's'), Some(Action::Save));
        assert_eq!(press(&mut dialog, 'n'), Some(Action::CloseModal));
    }
}
