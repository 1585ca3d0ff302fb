//! Viewer application: wiring between input, state, and widgets

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{info, warn};
use ratatui::{
    Frame, Terminal,
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
};

use crate::document::{Document, TextSpan};
use crate::export::Exporter;
use crate::notification::NotificationState;
use crate::search::SearchSession;
use crate::settings::Settings;
use crate::theme::Palette;
use crate::viewer::ViewerState;
use crate::widget::toolbar::PageFieldMode;
use crate::widget::{pages, search_overlay, thumbnails::ThumbnailStrip, toolbar};

const TICK_RATE: Duration = Duration::from_millis(200);

/// What keystrokes currently mean
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum InputMode {
    Normal,
    /// Typing into the search overlay
    SearchInput,
    /// Query locked, n/N cycle matches
    SearchNav,
    /// Editing the toolbar page field
    PageInput,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Focus {
    Pages,
    Thumbnails,
}

pub struct App {
    doc: Box<dyn Document>,
    pub viewer: ViewerState,
    pub search: SearchSession,
    pub exporter: Exporter,
    pub notifications: NotificationState,
    thumbnails: ThumbnailStrip,
    palette: Palette,
    settings: Settings,
    mode: InputMode,
    focus: Focus,
    /// Spans of the page currently shown, or why they are missing
    current_page_text: Option<(u32, Result<Vec<TextSpan>, String>)>,
    should_quit: bool,
}

impl App {
    pub fn new(doc: Box<dyn Document>, settings: Settings) -> Self {
        let palette = Palette::by_name(&settings.theme);
        let mut app = Self {
            doc,
            viewer: ViewerState::new(),
            search: SearchSession::new(),
            exporter: Exporter::new(),
            notifications: NotificationState::new(),
            thumbnails: ThumbnailStrip::new(),
            palette,
            settings,
            mode: InputMode::Normal,
            focus: Focus::Pages,
            current_page_text: None,
            should_quit: false,
        };
        app.install_document();
        app
    }

    /// Replace the open document. All search state dies with the old one.
    pub fn set_document(&mut self, doc: Box<dyn Document>) {
        self.doc = doc;
        self.search.reset_for_document();
        self.mode = InputMode::Normal;
        self.install_document();
    }

    fn install_document(&mut self) {
        let pages = self.doc.page_count();
        info!(
            "document installed: {pages} pages, title={:?}",
            self.doc.title()
        );
        self.viewer.set_document(pages);
        let steps = zoom_steps_from(self.settings.initial_zoom);
        for _ in 0..steps.unsigned_abs() {
            if steps > 0 {
                self.viewer.zoom_in();
            } else {
                self.viewer.zoom_out();
            }
        }
        self.current_page_text = None;
        self.thumbnails.sync_to(1);
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()>
    where
        <B as Backend>::Error: Send + Sync + 'static,
    {
        while !self.should_quit {
            self.refresh_page_text();
            terminal.draw(|frame| self.draw(frame))?;

            if event::poll(TICK_RATE)? {
                match event::read()? {
                    Event::Key(key) if key.kind != KeyEventKind::Release => {
                        self.handle_key(key);
                    }
                    Event::Resize(..) => {}
                    _ => {}
                }
            }
        }
        Ok(())
    }

    fn draw(&mut self, frame: &mut Frame) {
        let overlay_height = search_overlay::height(&self.search);
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(overlay_height),
                Constraint::Min(1),
            ])
            .split(frame.area());

        let page_field = if self.mode == InputMode::PageInput {
            PageFieldMode::Editing
        } else {
            PageFieldMode::Display
        };
        toolbar::render(
            frame,
            rows[0],
            &self.viewer,
            page_field,
            &mut self.notifications,
            &self.palette,
        );
        search_overlay::render(frame, rows[1], &self.search, &self.palette);
        self.draw_body(frame, rows[2]);

        // the page surface is discrete: the shown page is the fully
        // visible one, which is what settles a pending jump
        let shown = self.viewer.current_page();
        self.viewer.observe_visibility(shown, 1.0);
    }

    fn draw_body(&mut self, frame: &mut Frame, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(crate::widget::thumbnails::STRIP_WIDTH),
                Constraint::Min(1),
            ])
            .split(area);

        self.thumbnails.sync_to(self.viewer.current_page());
        self.thumbnails.render(
            frame,
            columns[0],
            self.viewer.page_count(),
            self.viewer.current_page(),
            self.focus == Focus::Thumbnails,
            &self.palette,
        );

        let page = self.viewer.current_page();
        let (spans, load_error): (&[TextSpan], Option<&str>) = match &self.current_page_text {
            Some((cached_page, Ok(spans))) if *cached_page == page => (spans, None),
            Some((cached_page, Err(detail))) if *cached_page == page => {
                (&[], Some(detail.as_str()))
            }
            _ => (&[], None),
        };

        let view = pages::PageView {
            page_number: page,
            spans,
            page_matches: self.search.page_matches(),
            active_match_index: self.search.active_match_index(),
            load_error,
        };
        pages::render(frame, columns[1], &view, &self.palette);
    }

    fn refresh_page_text(&mut self) {
        let page = self.viewer.current_page();
        if !self.viewer.has_document() {
            return;
        }
        if matches!(&self.current_page_text, Some((cached, _)) if *cached == page) {
            return;
        }
        let fetched = self.doc.page_text(page).map_err(|e| {
            warn!("text layer for page {page}: {e}");
            e.to_string()
        });
        self.current_page_text = Some((page, fetched));
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match self.mode {
            InputMode::SearchInput => self.handle_search_input_key(key),
            InputMode::SearchNav => self.handle_search_nav_key(key),
            InputMode::PageInput => self.handle_page_input_key(key),
            InputMode::Normal => self.handle_normal_key(key),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('/') => {
                self.search.toggle();
                self.mode = if self.search.is_open {
                    InputMode::SearchInput
                } else {
                    InputMode::Normal
                };
            }
            KeyCode::Char('p') => self.print_document(),
            KeyCode::Char('s') => self.save_copy(),
            KeyCode::Char('g') => {
                self.mode = InputMode::PageInput;
                self.viewer.page_input.clear();
            }
            KeyCode::Tab => {
                self.focus = match self.focus {
                    Focus::Pages => Focus::Thumbnails,
                    Focus::Thumbnails => Focus::Pages,
                };
            }
            KeyCode::Char('+') | KeyCode::Char('=') => self.viewer.zoom_in(),
            KeyCode::Char('-') => self.viewer.zoom_out(),
            KeyCode::Char('0') => self.viewer.zoom_reset(),
            KeyCode::Char('r') => self.viewer.rotate_clockwise(),
            KeyCode::Char('R') => self.viewer.rotate_counter_clockwise(),
            KeyCode::Char('u') => self.viewer.rotation_reset(),
            KeyCode::Home => self.viewer.first_page(),
            KeyCode::End => self.viewer.last_page(),
            KeyCode::Left | KeyCode::PageUp | KeyCode::Char('h') => self.page_step(-1),
            KeyCode::Right | KeyCode::PageDown | KeyCode::Char('l') => self.page_step(1),
            KeyCode::Up | KeyCode::Char('k') => self.focus_step(-1),
            KeyCode::Down | KeyCode::Char('j') => self.focus_step(1),
            KeyCode::Enter if self.focus == Focus::Thumbnails => {
                if let Some(page) = self.thumbnails.selected_page() {
                    self.viewer.go_to_page(page);
                }
            }
            KeyCode::Char('n') if self.search.has_matches() => {
                self.search.select_next(&mut self.viewer);
            }
            KeyCode::Char('N') if self.search.has_matches() => {
                self.search.select_previous(&mut self.viewer);
            }
            _ => {}
        }
    }

    /// Up/down act on whichever panel holds focus.
    fn focus_step(&mut self, delta: i32) {
        match self.focus {
            Focus::Pages => self.page_step(delta),
            Focus::Thumbnails => {
                if delta > 0 {
                    self.thumbnails.select_next(self.viewer.page_count());
                } else {
                    self.thumbnails.select_previous();
                }
                if let Some(page) = self.thumbnails.selected_page() {
                    self.viewer.go_to_page(page);
                }
            }
        }
    }

    fn page_step(&mut self, delta: i32) {
        if delta > 0 {
            self.viewer.next_page();
        } else {
            self.viewer.previous_page();
        }
    }

    fn handle_search_input_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.search.close();
                self.mode = InputMode::Normal;
            }
            KeyCode::Enter => {
                self.search.submit(self.doc.as_ref(), &mut self.viewer);
                self.mode = InputMode::SearchNav;
            }
            KeyCode::Backspace => self.search.pop_char(),
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.search.set_query("");
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.search.push_char(c);
            }
            _ => {}
        }
    }

    fn handle_search_nav_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.search.close();
                self.mode = InputMode::Normal;
            }
            KeyCode::Char('n') | KeyCode::Enter => {
                self.search.select_next(&mut self.viewer);
            }
            KeyCode::Char('N') => {
                self.search.select_previous(&mut self.viewer);
            }
            KeyCode::Backspace => {
                self.search.pop_char();
                self.mode = InputMode::SearchInput;
            }
            // any other character resumes editing the query
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.search.push_char(c);
                self.mode = InputMode::SearchInput;
            }
            _ => {}
        }
    }

    fn handle_page_input_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c) if c.is_ascii_digit() => {
                self.viewer.page_input.push(c);
            }
            KeyCode::Backspace => {
                self.viewer.page_input.pop();
            }
            KeyCode::Enter => {
                self.viewer.commit_page_input();
                self.mode = InputMode::Normal;
            }
            KeyCode::Esc => {
                self.viewer.page_input = self.viewer.current_page().to_string();
                self.mode = InputMode::Normal;
            }
            _ => {}
        }
    }

    fn print_document(&mut self) {
        match self.exporter.print(self.doc.as_ref()) {
            Ok(()) => self.notifications.info("sent to the system print viewer"),
            Err(e) => {
                warn!("print failed: {e}");
                self.notifications.error(format!("print failed: {e}"));
            }
        }
    }

    fn save_copy(&mut self) {
        let dest = self.settings.resolved_save_dir();
        match self.exporter.save_copy(self.doc.as_ref(), &dest) {
            Ok(path) => self.notifications.info(format!("saved {}", path.display())),
            Err(e) => {
                warn!("save failed: {e}");
                self.notifications.error(format!("save failed: {e}"));
            }
        }
    }
}

/// Signed zoom steps approximating a configured initial factor.
fn zoom_steps_from(initial_zoom: f32) -> i32 {
    if !initial_zoom.is_finite() {
        return 0;
    }
    ((initial_zoom - 1.0) / crate::viewer::ZOOM_STEP).round() as i32
}
