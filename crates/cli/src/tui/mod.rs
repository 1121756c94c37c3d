//! Interactive scene editor TUI.
//!
//! Chrome layout: title bar, palette bar, bordered canvas, two input
//! fields (creator name, custom text), status line. The canvas maps one
//! engine unit to one terminal cell. Mouse capture drives both palette
//! drags (press a token, release over the canvas) and item reposition
//! gestures (press an item, move, release); the engine's gesture
//! machine decides whether the release tail counts as a removal click.

use std::io::stdout;
use std::time::{Duration, Instant};

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyModifiers,
        MouseButton, MouseEvent, MouseEventKind,
    },
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};

use dollhouse_config::Settings;
use dollhouse_engine::{
    Canvas, ItemKind, NoticeLevel, Palette, SceneEditor, SceneEvent, SceneItem,
};
use dollhouse_io::{SceneStore, StoreError};

use crate::util;

/// Smallest canvas the editor will open with. A terminal that cannot
/// host this aborts initialization instead of limping along canvasless.
const MIN_CANVAS_WIDTH: f64 = 10.0;
const MIN_CANVAS_HEIGHT: f64 = 4.0;

/// Rows of chrome around the canvas: title, palette, canvas borders,
/// input boxes, status line.
const CHROME_ROWS: u16 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Canvas,
    Name,
    Text,
}

struct EditorApp {
    editor: SceneEditor,
    palette: Palette,
    store: SceneStore,
    focus: Focus,
    name_input: String,
    text_input: String,
    /// Token payload mid-drag from the palette, if any.
    palette_drag: Option<String>,
    /// Last pointer cell, for the palette-drag ghost.
    pointer: Option<(u16, u16)>,
    status: Option<(NoticeLevel, String)>,
    should_quit: bool,
    show_help: bool,

    // Screen geometry cached at draw time for mouse hit-testing
    palette_row: u16,
    palette_zones: Vec<(u16, u16, usize)>,
    canvas_inner: Rect,
    name_rect: Rect,
    text_rect: Rect,
}

impl EditorApp {
    fn new(canvas: Canvas, palette: Palette, store: SceneStore) -> Self {
        Self {
            editor: SceneEditor::new(canvas),
            palette,
            store,
            focus: Focus::Canvas,
            name_input: String::new(),
            text_input: String::new(),
            palette_drag: None,
            pointer: None,
            status: None,
            should_quit: false,
            show_help: false,
            palette_row: 0,
            palette_zones: Vec::new(),
            canvas_inner: Rect::default(),
            name_rect: Rect::default(),
            text_rect: Rect::default(),
        }
    }

    /// Pull queued editor events into the status line.
    fn absorb_events(&mut self) {
        for event in self.editor.drain_events() {
            if let SceneEvent::Notice { level, message } = event {
                self.status = Some((level, message));
            }
        }
    }

    fn canvas_coords(&self, col: u16, row: u16) -> (f64, f64) {
        (
            col as f64 - self.canvas_inner.x as f64,
            row as f64 - self.canvas_inner.y as f64,
        )
    }

    fn in_canvas(&self, col: u16, row: u16) -> bool {
        rect_contains(self.canvas_inner, col, row)
    }

    fn cycle_focus(&mut self, backwards: bool) {
        self.focus = match (self.focus, backwards) {
            (Focus::Canvas, false) => Focus::Name,
            (Focus::Name, false) => Focus::Text,
            (Focus::Text, false) => Focus::Canvas,
            (Focus::Canvas, true) => Focus::Text,
            (Focus::Name, true) => Focus::Canvas,
            (Focus::Text, true) => Focus::Name,
        };
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if self.show_help {
            // Any key dismisses help
            self.show_help = false;
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('s') => self.save_scene(),
                KeyCode::Char('l') => self.load_scene(),
                KeyCode::Char('n') => {
                    self.editor.clear();
                    self.status = Some((NoticeLevel::Info, "Scene cleared.".into()));
                }
                KeyCode::Char('c') => self.should_quit = true,
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Tab => self.cycle_focus(false),
            KeyCode::BackTab => self.cycle_focus(true),
            _ => match self.focus {
                Focus::Canvas => self.handle_canvas_key(key),
                Focus::Name => {
                    Self::edit_field(&mut self.name_input, key);
                    if key.code == KeyCode::Esc {
                        self.focus = Focus::Canvas;
                    } else if key.code == KeyCode::Enter {
                        self.focus = Focus::Text;
                    }
                }
                Focus::Text => match key.code {
                    KeyCode::Enter => self.add_text(),
                    KeyCode::Esc => self.focus = Focus::Canvas,
                    _ => Self::edit_field(&mut self.text_input, key),
                },
            },
        }
    }

    fn handle_canvas_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = true,
            _ => {}
        }
    }

    fn edit_field(field: &mut String, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c) => field.push(c),
            KeyCode::Backspace => {
                field.pop();
            }
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if self.show_help {
                    self.show_help = false;
                    return;
                }
                self.pointer = Some((mouse.column, mouse.row));
                if mouse.row == self.palette_row {
                    if let Some(token) = self.palette_token_at(mouse.column) {
                        self.palette_drag = Some(token);
                        return;
                    }
                }
                if rect_contains(self.name_rect, mouse.column, mouse.row) {
                    self.focus = Focus::Name;
                } else if rect_contains(self.text_rect, mouse.column, mouse.row) {
                    self.focus = Focus::Text;
                } else if self.in_canvas(mouse.column, mouse.row) {
                    self.focus = Focus::Canvas;
                    let (x, y) = self.canvas_coords(mouse.column, mouse.row);
                    // A press while another gesture is live is rejected
                    // by the engine; nothing to do but ignore it.
                    let _ = self.editor.press(x, y);
                }
            }
            MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => {
                self.pointer = Some((mouse.column, mouse.row));
                if self.palette_drag.is_none() {
                    // Track the pointer even outside the canvas; the
                    // engine clamps the item back inside.
                    let (x, y) = self.canvas_coords(mouse.column, mouse.row);
                    self.editor.drag_to(x, y);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let now = Instant::now();
                let (x, y) = self.canvas_coords(mouse.column, mouse.row);
                if let Some(token) = self.palette_drag.take() {
                    // Drop outside the canvas is a no-op
                    if self.in_canvas(mouse.column, mouse.row) {
                        self.editor.drop_from_palette(Some(&token), x, y);
                    }
                } else if self.editor.release(now).is_some() && self.in_canvas(mouse.column, mouse.row)
                {
                    self.editor.click(x, y, now);
                }
            }
            _ => {}
        }
    }

    fn palette_token_at(&self, col: u16) -> Option<String> {
        self.palette_zones
            .iter()
            .find(|(start, width, _)| col >= *start && col < start + width)
            .and_then(|(_, _, idx)| self.palette.get(*idx))
            .map(|t| t.to_string())
    }

    fn add_text(&mut self) {
        if self.editor.add_text(&self.text_input).is_ok() {
            self.text_input.clear();
        }
    }

    fn save_scene(&mut self) {
        let name = self.name_input.trim().to_string();
        if name.is_empty() {
            self.editor
                .notice(NoticeLevel::Warn, "Please enter your name before saving!");
            return;
        }
        if self.editor.scene().is_empty() {
            self.editor
                .notice(NoticeLevel::Warn, "Your scene is empty! Add some items first.");
            return;
        }
        match self.store.save(&name, self.editor.scene().items()) {
            Ok(_) => {
                self.editor.mark_saved(&name);
                self.editor
                    .notice(NoticeLevel::Info, format!("Scene saved for {name}!"));
            }
            Err(e) => self.editor.notice(NoticeLevel::Error, e.to_string()),
        }
    }

    fn load_scene(&mut self) {
        let name = self.name_input.trim().to_string();
        if name.is_empty() {
            self.editor
                .notice(NoticeLevel::Warn, "Please enter your name to load!");
            return;
        }
        match self.store.load(&name) {
            Ok(saved) => {
                self.editor.load_saved(&name, saved.entries());
                self.editor
                    .notice(NoticeLevel::Info, format!("Scene loaded for {name}!"));
            }
            Err(e @ StoreError::NotFound(_)) => {
                self.editor.notice(NoticeLevel::Warn, e.to_string());
            }
            Err(e) => self.editor.notice(NoticeLevel::Error, e.to_string()),
        }
    }

    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let canvas = self.editor.canvas();
        let chunks = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(canvas.height as u16 + 2),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(area);

        self.draw_title(frame, chunks[0]);
        self.draw_palette(frame, chunks[1]);
        self.draw_canvas(frame, chunks[2]);
        self.draw_inputs(frame, chunks[3]);
        self.draw_status(frame, chunks[4]);

        if self.show_help {
            self.draw_help(frame, area);
        }
    }

    fn draw_title(&self, frame: &mut Frame, area: Rect) {
        let creator = if self.name_input.trim().is_empty() {
            "-".to_string()
        } else {
            self.name_input.trim().to_string()
        };
        let title = format!(
            " dollhouse | {} item(s) | creator: {} ",
            self.editor.scene().len(),
            creator
        );
        let para = Paragraph::new(Line::from(Span::styled(
            title,
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )))
        .style(Style::default().bg(Color::Cyan));
        frame.render_widget(para, area);
    }

    fn draw_palette(&mut self, frame: &mut Frame, area: Rect) {
        self.palette_row = area.y;
        self.palette_zones.clear();

        let label = " palette: ";
        let mut spans = vec![Span::styled(label, Style::default().fg(Color::DarkGray))];
        let mut col = area.x + util::display_width(label) as u16;

        for (idx, token) in self.palette.tokens().iter().enumerate() {
            let cell = format!(" {token} ");
            let width = util::display_width(&cell) as u16;
            let dragged = self.palette_drag.as_deref() == Some(token.as_str());
            let style = if dragged {
                Style::default().fg(Color::Black).bg(Color::Yellow)
            } else {
                Style::default().bg(Color::DarkGray)
            };
            spans.push(Span::styled(cell, style));
            spans.push(Span::raw(" "));
            self.palette_zones.push((col, width, idx));
            col += width + 1;
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn draw_canvas(&mut self, frame: &mut Frame, area: Rect) {
        let canvas = self.editor.canvas();
        let block_area = Rect {
            x: area.x,
            y: area.y,
            width: (canvas.width as u16 + 2).min(area.width),
            height: (canvas.height as u16 + 2).min(area.height),
        };
        let border_style = if self.focus == Focus::Canvas {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" canvas ");
        let inner = block.inner(block_area);
        frame.render_widget(block, block_area);
        self.canvas_inner = inner;

        let dragging = self.editor.gesture().active_item();
        for item in self.editor.scene().items() {
            let x = inner.x + item.x.round() as u16;
            let y = inner.y + item.y.round() as u16;
            if y >= inner.y + inner.height {
                continue;
            }
            let width = (item.width() as u16).min((inner.x + inner.width).saturating_sub(x));
            if width == 0 {
                continue;
            }
            let style = item_style(item, dragging == Some(item.id));
            let rect = Rect::new(x, y, width, 1);
            frame.render_widget(
                Paragraph::new(Span::styled(item.content.clone(), style)),
                rect,
            );
        }

        // Ghost of the palette token following the pointer
        if let (Some(token), Some((col, row))) = (&self.palette_drag, self.pointer) {
            if rect_contains(inner, col, row) {
                let width = (util::display_width(token) as u16)
                    .min((inner.x + inner.width).saturating_sub(col))
                    .max(1);
                let rect = Rect::new(col, row, width, 1);
                frame.render_widget(
                    Paragraph::new(Span::styled(
                        token.clone(),
                        Style::default().add_modifier(Modifier::DIM),
                    )),
                    rect,
                );
            }
        }
    }

    fn draw_inputs(&mut self, frame: &mut Frame, area: Rect) {
        let halves =
            Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)]).split(area);
        self.name_rect = halves[0];
        self.text_rect = halves[1];

        self.draw_field(frame, halves[0], " name ", &self.name_input, Focus::Name);
        self.draw_field(frame, halves[1], " text (Enter adds) ", &self.text_input, Focus::Text);
    }

    fn draw_field(&self, frame: &mut Frame, area: Rect, title: &str, value: &str, focus: Focus) {
        let focused = self.focus == focus;
        let border_style = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let display = if focused {
            format!("{value}\u{2588}")
        } else {
            value.to_string()
        };
        let para = Paragraph::new(display).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(title),
        );
        frame.render_widget(para, area);
    }

    fn draw_status(&self, frame: &mut Frame, area: Rect) {
        let (text, style) = match &self.status {
            Some((level, message)) => {
                let fg = match level {
                    NoticeLevel::Info => Color::Green,
                    NoticeLevel::Warn => Color::Yellow,
                    NoticeLevel::Error => Color::Red,
                };
                (format!(" {message}"), Style::default().fg(fg))
            }
            None => (
                " drag a palette token onto the canvas | click an item to remove | Ctrl+S save  Ctrl+L load  ?: help".to_string(),
                Style::default().fg(Color::DarkGray),
            ),
        };
        frame.render_widget(Paragraph::new(Span::styled(text, style)), area);
    }

    fn draw_help(&self, frame: &mut Frame, area: Rect) {
        let help_lines = [
            "",
            "  Mouse",
            "  -----",
            "  drag palette token    Place an emoji",
            "  drag a placed item    Move it (stays in bounds)",
            "  click a placed item   Remove it",
            "",
            "  Keys",
            "  ----",
            "  Tab / Shift+Tab   Cycle focus",
            "  Enter (text box)  Add the typed text",
            "  Ctrl+S / Ctrl+L   Save / load under the name",
            "  Ctrl+N            Clear the scene",
            "  q / Esc           Quit (canvas focus)",
            "  ?                 Toggle this help",
            "",
        ];
        let help_width: u16 = 50;
        let help_height = help_lines.len() as u16;

        let x = area.width.saturating_sub(help_width) / 2;
        let y = area.height.saturating_sub(help_height) / 2;
        let popup = Rect::new(
            area.x + x,
            area.y + y,
            help_width.min(area.width),
            help_height.min(area.height),
        );

        let lines: Vec<Line> = help_lines
            .iter()
            .map(|s| Line::from(Span::styled(*s, Style::default().fg(Color::White))))
            .collect();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" dollhouse ")
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .style(Style::default().bg(Color::Black));

        frame.render_widget(Clear, popup);
        frame.render_widget(Paragraph::new(lines).block(block), popup);
    }
}

fn item_style(item: &SceneItem, dragging: bool) -> Style {
    let base = match item.kind {
        ItemKind::Emoji => Style::default(),
        ItemKind::Text => Style::default()
            .fg(Color::Black)
            .bg(Color::LightYellow),
    };
    if dragging {
        base.add_modifier(Modifier::BOLD | Modifier::REVERSED)
    } else {
        base
    }
}

fn rect_contains(rect: Rect, col: u16, row: u16) -> bool {
    col >= rect.x && col < rect.x + rect.width && row >= rect.y && row < rect.y + rect.height
}

/// Size the canvas against the terminal, shrinking the configured
/// preference to fit. Too small a terminal is a fatal setup error.
fn fit_canvas(settings: &Settings, cols: u16, rows: u16) -> Result<Canvas, String> {
    let avail_w = cols.saturating_sub(2) as f64;
    let avail_h = rows.saturating_sub(CHROME_ROWS) as f64;
    if avail_w < MIN_CANVAS_WIDTH || avail_h < MIN_CANVAS_HEIGHT {
        return Err(format!(
            "terminal is too small to host the canvas ({}x{} available, {}x{} needed)",
            avail_w, avail_h, MIN_CANVAS_WIDTH, MIN_CANVAS_HEIGHT
        ));
    }
    Ok(Canvas::new(
        settings.canvas.width.clamp(MIN_CANVAS_WIDTH, avail_w),
        settings.canvas.height.clamp(MIN_CANVAS_HEIGHT, avail_h),
    ))
}

/// Run the interactive scene editor.
pub fn run(settings: Settings, store: SceneStore) -> Result<(), String> {
    let (cols, rows) =
        terminal::size().map_err(|e| format!("cannot query terminal size: {}", e))?;
    let canvas = fit_canvas(&settings, cols, rows)?;
    let palette = if settings.palette.is_empty() {
        Palette::default()
    } else {
        Palette::new(settings.palette.clone())
    };
    log::info!(
        "starting editor: {}x{} canvas, {} palette tokens, store at {}",
        canvas.width,
        canvas.height,
        palette.len(),
        store.dir().display()
    );

    let app = EditorApp::new(canvas, palette, store);
    run_app(app)
}

fn run_app(mut app: EditorApp) -> Result<(), String> {
    terminal::enable_raw_mode().map_err(|e| format!("failed to enable raw mode: {}", e))?;
    stdout()
        .execute(EnterAlternateScreen)
        .map_err(|e| format!("failed to enter alternate screen: {}", e))?;
    stdout()
        .execute(EnableMouseCapture)
        .map_err(|e| format!("failed to enable mouse capture: {}", e))?;

    struct Cleanup;
    impl Drop for Cleanup {
        fn drop(&mut self) {
            let _ = stdout().execute(DisableMouseCapture);
            let _ = stdout().execute(LeaveAlternateScreen);
            let _ = terminal::disable_raw_mode();
        }
    }
    let _cleanup = Cleanup;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal =
        Terminal::new(backend).map_err(|e| format!("failed to create terminal: {}", e))?;

    loop {
        app.absorb_events();
        terminal
            .draw(|frame| app.draw(frame))
            .map_err(|e| format!("draw error: {}", e))?;

        if event::poll(Duration::from_millis(50)).map_err(|e| format!("event poll error: {}", e))?
        {
            match event::read().map_err(|e| format!("event read error: {}", e))? {
                Event::Key(key) => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn app(store_dir: &std::path::Path) -> EditorApp {
        let mut app = EditorApp::new(
            Canvas::new(40.0, 10.0),
            Palette::default(),
            SceneStore::new(store_dir),
        );
        // Geometry a draw pass would have produced
        app.canvas_inner = Rect::new(1, 3, 40, 10);
        app.palette_row = 1;
        app.palette_zones = vec![(10, 4, 0), (15, 4, 1)];
        app
    }

    fn left_down(col: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: col,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn left_drag(col: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Drag(MouseButton::Left),
            column: col,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn left_up(col: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Up(MouseButton::Left),
            column: col,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn palette_drag_onto_canvas_places_item() {
        let dir = tempdir().unwrap();
        let mut app = app(dir.path());

        app.handle_mouse(left_down(11, 1)); // grab first palette token
        assert!(app.palette_drag.is_some());
        app.handle_mouse(left_drag(6, 5));
        app.handle_mouse(left_up(6, 5)); // drop inside canvas

        assert_eq!(app.editor.scene().len(), 1);
        let item = &app.editor.scene().items()[0];
        assert_eq!(item.kind, ItemKind::Emoji);
        assert_eq!((item.x, item.y), (5.0, 2.0));
    }

    #[test]
    fn palette_drop_outside_canvas_is_noop() {
        let dir = tempdir().unwrap();
        let mut app = app(dir.path());

        app.handle_mouse(left_down(11, 1));
        app.handle_mouse(left_up(0, 0)); // released on the title bar
        assert!(app.editor.scene().is_empty());
        assert!(app.palette_drag.is_none());
    }

    #[test]
    fn drag_moves_item_and_suppresses_removal_click() {
        let dir = tempdir().unwrap();
        let mut app = app(dir.path());
        let id = app.editor.drop_from_palette(Some("🐶"), 5.0, 2.0).unwrap();

        // Press the item, drag it, release: still present, moved
        app.handle_mouse(left_down(6, 5));
        app.handle_mouse(left_drag(16, 7));
        app.handle_mouse(left_up(16, 7));

        let item = app.editor.scene().get(id).expect("item removed by drag tail");
        assert_eq!((item.x, item.y), (15.0, 4.0));

        // A plain press-release with no movement removes it
        app.handle_mouse(left_down(16, 7));
        std::thread::sleep(Duration::from_millis(120)); // let the grace window lapse
        app.handle_mouse(left_up(16, 7));
        assert!(app.editor.scene().is_empty());
    }

    #[test]
    fn press_on_empty_canvas_removes_nothing() {
        let dir = tempdir().unwrap();
        let mut app = app(dir.path());
        app.editor.drop_from_palette(Some("🐶"), 20.0, 2.0);

        app.handle_mouse(left_down(2, 4)); // empty spot
        app.handle_mouse(left_up(21, 5)); // released over the item
        assert_eq!(app.editor.scene().len(), 1);
    }

    #[test]
    fn save_without_name_warns_and_writes_nothing() {
        let dir = tempdir().unwrap();
        let mut app = app(dir.path());
        app.editor.drop_from_palette(Some("🐶"), 1.0, 1.0);

        app.save_scene();
        app.absorb_events();
        let (level, message) = app.status.clone().unwrap();
        assert_eq!(level, NoticeLevel::Warn);
        assert!(message.contains("name"));
        assert!(!app.store.exists("anyone"));
    }

    #[test]
    fn save_empty_scene_warns() {
        let dir = tempdir().unwrap();
        let mut app = app(dir.path());
        app.name_input = "alice".into();

        app.save_scene();
        app.absorb_events();
        let (level, message) = app.status.clone().unwrap();
        assert_eq!(level, NoticeLevel::Warn);
        assert!(message.contains("empty"));
    }

    #[test]
    fn save_then_load_replaces_scene() {
        let dir = tempdir().unwrap();
        let mut app = app(dir.path());
        app.name_input = "alice".into();
        app.editor.drop_from_palette(Some("🐶"), 10.0, 2.0);
        app.editor.add_text("hi").unwrap();

        app.save_scene();
        app.editor.clear();
        app.editor.drop_from_palette(Some("🐱"), 1.0, 1.0);

        app.load_scene();
        app.absorb_events();

        let items = app.editor.scene().items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].content, "🐶");
        assert_eq!(items[1].content, "hi");
        assert_eq!(app.status.clone().unwrap().0, NoticeLevel::Info);
    }

    #[test]
    fn load_unknown_name_reports_not_found_and_keeps_scene() {
        let dir = tempdir().unwrap();
        let mut app = app(dir.path());
        app.name_input = "ghost".into();
        app.editor.drop_from_palette(Some("🐶"), 10.0, 2.0);

        app.load_scene();
        app.absorb_events();

        assert_eq!(app.editor.scene().len(), 1);
        let (level, message) = app.status.clone().unwrap();
        assert_eq!(level, NoticeLevel::Warn);
        assert!(message.contains("no saved scene found"));
    }

    #[test]
    fn text_entry_flow() {
        let dir = tempdir().unwrap();
        let mut app = app(dir.path());
        app.focus = Focus::Text;

        for c in "hello".chars() {
            app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
        }
        app.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));

        assert_eq!(app.editor.scene().len(), 1);
        assert!(app.text_input.is_empty());

        // Whitespace entry leaves the field untouched and places nothing
        app.handle_key(KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE));
        app.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
        assert_eq!(app.editor.scene().len(), 1);
        assert_eq!(app.text_input, " ");
    }

    #[test]
    fn focus_cycles_both_ways() {
        let dir = tempdir().unwrap();
        let mut app = app(dir.path());
        assert_eq!(app.focus, Focus::Canvas);
        app.cycle_focus(false);
        assert_eq!(app.focus, Focus::Name);
        app.cycle_focus(false);
        assert_eq!(app.focus, Focus::Text);
        app.cycle_focus(false);
        assert_eq!(app.focus, Focus::Canvas);
        app.cycle_focus(true);
        assert_eq!(app.focus, Focus::Text);
    }

    #[test]
    fn fit_canvas_rejects_tiny_terminals() {
        let settings = Settings::default();
        assert!(fit_canvas(&settings, 8, 6).is_err());

        let canvas = fit_canvas(&settings, 100, 40).unwrap();
        assert_eq!(canvas.width, 72.0);
        assert_eq!(canvas.height, 18.0);

        // Shrinks to what the terminal can host
        let small = fit_canvas(&settings, 30, 14).unwrap();
        assert_eq!(small.width, 28.0);
        assert_eq!(small.height, 6.0);
    }
}
