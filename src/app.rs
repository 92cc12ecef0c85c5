//! Root application component
//!
//! Owns the mod list, the interaction controller and the title workers, and
//! routes Actions between them. All state changes happen on the thread that
//! calls `update`; background lookups only report back through `Tick`.

use crate::action::Action;
use crate::component::Component;
use crate::components::{
    calculate_main_layout, draw_mod_list, HelpDialog, ModListComponent, ModListRenderContext,
    QuitDialog,
};
use crate::config::Config;
use crate::model::{
    Gesture, InteractionController, Modal, ModalStack, ModListModel, NudgeDirection, RecordEntry,
};
use crate::services::{workshop, SharedTitleCache, TitleLookup, TitleWorkers};
use anyhow::Result;
use chrono::Local;
use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

// ═══════════════════════════════════════════════════════════════════════════════
// App Struct
// ═══════════════════════════════════════════════════════════════════════════════

pub struct App {
    /// Flag to indicate the app should quit
    pub should_quit: bool,

    /// Workshop record being edited
    pub workshop_path: PathBuf,

    pub model: ModListModel,
    pub controller: InteractionController,
    pub modals: ModalStack,

    cache: SharedTitleCache,
    workers: TitleWorkers,

    /// Order and states as last written to disk
    saved: Vec<RecordEntry>,

    pub error: Option<String>,
    pub status_message: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────────
    pub mod_list: ModListComponent,
    pub quit_dialog: QuitDialog,
    pub help_dialog: HelpDialog,
}

impl App {
    pub fn new(
        config: &Config,
        workshop_path: PathBuf,
        records: Vec<RecordEntry>,
        cache: SharedTitleCache,
        lookup: Arc<dyn TitleLookup>,
    ) -> App {
        let workers = TitleWorkers::spawn(config.lookup_workers, Arc::clone(&cache), lookup);
        let mut app = App {
            should_quit: false,
            workshop_path,
            model: ModListModel::new(),
            controller: InteractionController::new(),
            modals: ModalStack::new(),
            cache,
            workers,
            saved: Vec::new(),
            error: None,
            status_message: None,
            mod_list: ModListComponent::new(config.double_click(), config.max_title_len),
            quit_dialog: QuitDialog::default(),
            help_dialog: HelpDialog::default(),
        };
        app.load(records);
        app
    }

    /// Show the record and start resolving every title in the background
    fn load(&mut self, records: Vec<RecordEntry>) {
        self.saved = records.clone();
        self.model.load(records);
        self.controller.clear_selection();
        self.mod_list.select_first(self.model.len());

        if self.model.is_empty() {
            warn!(path = %self.workshop_path.display(), "workshop record lists no mods");
        }
        let duplicates = self.model.duplicate_ids();
        if !duplicates.is_empty() {
            warn!(ids = ?duplicates, "workshop record lists some mods more than once");
        }

        // Cached titles show up immediately; everything still goes through the
        // workers so misses get looked up.
        let ids: Vec<String> = self.model.entries().iter().map(|e| e.id.clone()).collect();
        {
            let cache = self.cache.lock();
            for id in &ids {
                if let Some(title) = cache.get(id) {
                    self.model.apply_title(id, title);
                }
            }
        }

        let mut submitted = HashSet::new();
        for id in ids {
            if submitted.insert(id.clone()) {
                self.workers.submit(id);
            }
        }
        info!(
            mods = self.model.len(),
            lookups = self.workers.in_flight(),
            "mod list ready"
        );
    }

    pub fn is_dirty(&self) -> bool {
        self.model.is_dirty(&self.saved)
    }

    /// Apply finished lookups by id. Returns true when a title changed.
    fn apply_title_updates(&mut self) -> bool {
        let mut changed = false;
        for update in self.workers.poll() {
            let rows = self.model.apply_title(&update.id, &update.title);
            if rows == 0 {
                debug!(id = %update.id, "title arrived for a mod no longer listed");
            }
            changed |= rows > 0;
        }
        changed
    }

    /// Write the record and the title cache. Returns true on success.
    fn save(&mut self) -> bool {
        let snapshot = self.model.snapshot();
        if let Err(e) = workshop::save(&self.workshop_path, &snapshot) {
            error!(error = %e, "saving the workshop record failed");
            self.error = Some(e.to_string());
            return false;
        }
        self.saved = snapshot;
        self.error = None;

        let file_name = self
            .workshop_path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| self.workshop_path.display().to_string());
        self.status_message = Some(format!(
            "Order saved to {} at {}",
            file_name,
            Local::now().format("%H:%M:%S")
        ));
        info!(path = %self.workshop_path.display(), mods = self.saved.len(), "order saved");

        if let Err(e) = self.cache.lock().save() {
            warn!(error = %e, "could not persist title cache");
        }
        true
    }

    fn handle_gesture(&mut self, gesture: Gesture) {
        let moved = matches!(gesture, Gesture::PointerMoved { .. });
        let changed = self.controller.handle(gesture, &mut self.model);
        if changed && moved && self.controller.is_dragging() {
            // Cursor rides along with the dragged block
            let first = self.model.span().and_then(|span| span.first().copied());
            if first.is_some() {
                self.mod_list.set_cursor(first);
            }
        }
    }

    fn nudge(&mut self, direction: NudgeDirection) {
        let cursor = self.mod_list.cursor();
        if self.controller.nudge(direction, cursor, &mut self.model) {
            let row = match direction {
                NudgeDirection::Up => self.controller.selection().first(),
                NudgeDirection::Down => self.controller.selection().last(),
            };
            self.mod_list.set_cursor(row.copied());
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for App {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match self.modals.top() {
            Some(Modal::QuitConfirm { .. }) => self.quit_dialog.handle_key_event(key),
            Some(Modal::Help { .. }) => self.help_dialog.handle_key_event(key),
            None => self.mod_list.handle_key_event(key),
        }
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        if !self.modals.is_empty() {
            return Ok(None);
        }
        self.mod_list.handle_mouse_event(mouse)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            // ─────────────────────────────────────────────────────────────────
            // App Lifecycle
            // ─────────────────────────────────────────────────────────────────
            Action::Tick => {
                self.apply_title_updates();
            }
            Action::Resize(_, _) => {}
            Action::ForceQuit => {
                self.should_quit = true;
            }

            // ─────────────────────────────────────────────────────────────────
            // Cursor
            // ─────────────────────────────────────────────────────────────────
            Action::NextRow => self.mod_list.next(self.model.len()),
            Action::PrevRow => self.mod_list.previous(self.model.len()),
            Action::FirstRow => self.mod_list.select_first(self.model.len()),
            Action::LastRow => self.mod_list.select_last(self.model.len()),

            // ─────────────────────────────────────────────────────────────────
            // Selection & editing
            // ─────────────────────────────────────────────────────────────────
            Action::SelectRow => {
                if let Some(row) = self.mod_list.cursor() {
                    self.controller.select_row(row);
                }
            }
            Action::SelectAll => self.controller.select_all(self.model.len()),
            Action::ClearSelection => self.controller.clear_selection(),
            Action::ToggleState => {
                if let Some(row) = self.mod_list.cursor() {
                    self.handle_gesture(Gesture::DoubleActivate { row });
                }
            }
            Action::Nudge(direction) => self.nudge(direction),
            Action::Gesture(gesture) => self.handle_gesture(gesture),
            Action::Save => {
                let quitting = matches!(self.modals.top(), Some(Modal::QuitConfirm { .. }));
                if self.save() && quitting {
                    self.should_quit = true;
                }
            }

            // ─────────────────────────────────────────────────────────────────
            // Modals
            // ─────────────────────────────────────────────────────────────────
            Action::OpenQuitDialog => {
                let unsaved = self.is_dirty();
                self.quit_dialog.unsaved = unsaved;
                self.modals.push(Modal::QuitConfirm { unsaved });
            }
            Action::OpenHelp => {
                self.help_dialog.scroll_offset = 0;
                self.modals.toggle(Modal::Help { scroll_offset: 0 });
            }
            Action::CloseModal => {
                self.modals.pop();
            }
        }

        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let layout = calculate_main_layout(area);
        let dirty = self.is_dirty();

        render_header(frame, layout.header, self);

        let ctx = ModListRenderContext {
            model: &self.model,
            controller: &self.controller,
            dirty,
        };
        draw_mod_list(frame, layout.list, &mut self.mod_list, &ctx);

        render_status_bar(frame, layout.status, self);
        render_help_bar(frame, layout.help);

        match self.modals.top() {
            Some(Modal::QuitConfirm { .. }) => self.quit_dialog.draw(frame, area)?,
            Some(Modal::Help { .. }) => self.help_dialog.draw(frame, area)?,
            None => {}
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Rendering Helpers
// ═══════════════════════════════════════════════════════════════════════════════

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let enabled = app
        .model
        .entries()
        .iter()
        .filter(|e| e.state.is_enabled())
        .count();

    let line = Line::from(vec![
        Span::styled(
            " modsort ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            app.workshop_path.display().to_string(),
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw("  "),
        Span::styled(
            format!("{} mods, {} enabled", app.model.len(), enabled),
            Style::default().fg(Color::White),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![];

    if let Some(ref error) = app.error {
        spans.push(Span::styled(
            format!(" Error: {} ", error),
            Style::default().fg(Color::Red),
        ));
    } else if let Some(ref status) = app.status_message {
        spans.push(Span::styled(
            format!(" {} ", status),
            Style::default().fg(Color::Yellow),
        ));
    }

    let pending = app.model.pending_count();
    if pending > 0 {
        spans.push(Span::styled(
            format!(" resolving {} title(s)… ", pending),
            Style::default().fg(Color::DarkGray),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_help_bar(frame: &mut Frame, area: Rect) {
    let key = |k: &'static str, color: Color| {
        Span::styled(k, Style::default().fg(color).add_modifier(Modifier::BOLD))
    };
    let line = Line::from(vec![
        key(" q ", Color::Yellow),
        Span::raw("Quit "),
        key(" s ", Color::Green),
        Span::raw("Save "),
        key(" Enter ", Color::Cyan),
        Span::raw("Toggle "),
        key(" Space ", Color::Cyan),
        Span::raw("Select "),
        key(" J/K ", Color::Cyan),
        Span::raw("Move "),
        key(" ? ", Color::White),
        Span::raw("Help"),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
