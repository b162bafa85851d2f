//! Terminal front end: owns the screen, turns mouse drags into light moves
//! and presents the frame buffer with half-block characters.

use std::io::{self, BufWriter, Write};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseEvent, MouseEventKind,
};
use crossterm::style::{Color as TermColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{
    self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, queue};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::Result;
use crate::geometry::{Point, Polygon};
use crate::graphics::{Color, FrameBuffer};
use crate::state::{AppState, FrameStats};

/// Upper half block: foreground paints the top sample, background the bottom
const HALF_BLOCK: char = '\u{2580}';

/// Raw mode, alternate screen and mouse capture for as long as it lives
struct TerminalSession;

impl TerminalSession {
    fn start() -> io::Result<Self> {
        enable_raw_mode()?;
        let session = TerminalSession;
        execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture, Hide)?;
        Ok(session)
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let restored = execute!(
            io::stdout(),
            ResetColor,
            Show,
            DisableMouseCapture,
            LeaveAlternateScreen
        )
        .and_then(|_| disable_raw_mode());
        if let Err(e) = restored {
            warn!("Failed to restore terminal: {}", e);
        }
    }
}

/// Maps between the drawing surface and the terminal cell grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16, width: u32, height: u32) -> Self {
        Viewport {
            cols: cols.max(1),
            rows: rows.max(1),
            width,
            height,
        }
    }

    /// Surface point at the centre of a terminal cell
    pub fn to_surface(&self, column: u16, row: u16) -> Point {
        Point::new(
            (column as f64 + 0.5) * self.width as f64 / self.cols as f64,
            (row as f64 + 0.5) * self.height as f64 / self.rows as f64,
        )
    }

    /// Surface pixel span covered by cell `index` of `count` along an axis
    fn span(index: u32, count: u32, extent: u32) -> (u32, u32) {
        let start = (index as u64 * extent as u64 / count as u64) as u32;
        let end = ((index as u64 + 1) * extent as u64 / count as u64) as u32;
        (start.min(extent.saturating_sub(1)), end.max(start + 1).min(extent))
    }

    /// Colour shown for one half cell: the last lit pixel of its block.
    ///
    /// Taking any lit pixel instead of a point sample keeps thin outlines and
    /// ray samples visible when the surface is shrunk.
    fn sample(&self, frame: &FrameBuffer, column: u16, half_row: u32) -> Color {
        let (x0, x1) = Self::span(column as u32, self.cols as u32, self.width);
        let (y0, y1) = Self::span(half_row, self.rows as u32 * 2, self.height);
        let mut shown = Color::BLACK;
        for y in y0..y1 {
            for &pixel in &frame.row(y)[x0 as usize..x1 as usize] {
                if pixel != Color::BLACK {
                    shown = pixel;
                }
            }
        }
        shown
    }

    /// `(top, bottom)` colours for every cell, row-major
    pub fn downsample(&self, frame: &FrameBuffer) -> Vec<(Color, Color)> {
        let mut cells = Vec::with_capacity(self.cols as usize * self.rows as usize);
        for row in 0..self.rows {
            for column in 0..self.cols {
                let top = self.sample(frame, column, row as u32 * 2);
                let bottom = self.sample(frame, column, row as u32 * 2 + 1);
                cells.push((top, bottom));
            }
        }
        cells
    }
}

fn term_color(color: Color) -> TermColor {
    let (r, g, b) = color.rgb8();
    TermColor::Rgb { r, g, b }
}

/// What the frame loop should do after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Scene plus everything needed to show it in a terminal
pub struct LightWidget {
    state: AppState,
    frame: FrameBuffer,
    viewport: Viewport,
    /// Cells as last written to the terminal; `None` or missing forces a redraw
    shown: Vec<Option<(Color, Color)>>,
    /// Enable debug overlay
    debug: bool,
    stats: FrameStats,
    frames_since_last_update: usize,
    last_fps_calculation: Instant,
    fps: f64,
}

impl LightWidget {
    pub fn new(state: AppState, config: &Config, cols: u16, rows: u16) -> Self {
        LightWidget {
            state,
            frame: FrameBuffer::new(config.width, config.height),
            viewport: Viewport::new(cols, rows, config.width, config.height),
            shown: Vec::new(),
            debug: false,
            stats: FrameStats::default(),
            frames_since_last_update: 0,
            last_fps_calculation: Instant::now(),
            fps: 0.0,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Handle one input event
    pub fn handle_event(&mut self, event: Event) -> Control {
        match event {
            Event::Key(key) => return self.handle_key(key),
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Drag(_),
                column,
                row,
                ..
            }) => {
                let target = self.viewport.to_surface(column, row);
                self.state.move_light(target.x, target.y);
            }
            Event::Resize(cols, rows) => {
                debug!("Terminal resized to {}x{}", cols, rows);
                self.viewport = Viewport::new(cols, rows, self.viewport.width, self.viewport.height);
                self.shown.clear();
            }
            _ => {}
        }
        Control::Continue
    }

    fn handle_key(&mut self, key: KeyEvent) -> Control {
        if key.kind != KeyEventKind::Press {
            return Control::Continue;
        }
        match key.code {
            KeyCode::Esc => return Control::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Control::Quit
            }
            KeyCode::Char('q' | 'Q') => return Control::Quit,
            KeyCode::Char('d' | 'D') => {
                self.debug = !self.debug;
                self.shown.clear();
            }
            KeyCode::Char('r' | 'R') => {
                self.state.reset_light();
            }
            _ => {}
        }
        Control::Continue
    }

    /// Render the scene and write whatever changed to `out`
    pub fn paint(&mut self, out: &mut impl Write) -> io::Result<()> {
        // Update FPS calculation
        self.frames_since_last_update += 1;
        let now = Instant::now();
        let duration = now.duration_since(self.last_fps_calculation);
        if duration.as_secs_f64() >= 1.0 {
            self.fps = self.frames_since_last_update as f64 / duration.as_secs_f64();
            self.frames_since_last_update = 0;
            self.last_fps_calculation = now;
        }

        self.stats = self.state.render(&mut self.frame);
        let cells = self.viewport.downsample(&self.frame);

        let mut colors: Option<(Color, Color)> = None;
        let mut cursor: Option<(u16, u16)> = None;
        for (index, &cell) in cells.iter().enumerate() {
            if self.shown.get(index) == Some(&Some(cell)) {
                continue;
            }
            let column = (index % self.viewport.cols as usize) as u16;
            let row = (index / self.viewport.cols as usize) as u16;
            if cursor != Some((column, row)) {
                queue!(out, MoveTo(column, row))?;
            }
            if colors != Some(cell) {
                queue!(
                    out,
                    SetForegroundColor(term_color(cell.0)),
                    SetBackgroundColor(term_color(cell.1))
                )?;
                colors = Some(cell);
            }
            queue!(out, Print(HALF_BLOCK))?;
            cursor = (column + 1 < self.viewport.cols).then_some((column + 1, row));
        }
        self.shown = cells.into_iter().map(Some).collect();

        if self.debug {
            self.paint_overlay(out)?;
        }
        queue!(out, ResetColor)?;
        out.flush()
    }

    fn paint_overlay(&mut self, out: &mut impl Write) -> io::Result<()> {
        let light = self.state.light();
        let lines = [
            format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            format!("Light: ({:.1}, {:.1})", light.x, light.y),
            format!("FPS: {:.2}", self.fps),
            format!("Visible pixels: {}", self.stats.visible_points),
        ];
        queue!(
            out,
            SetForegroundColor(TermColor::White),
            SetBackgroundColor(TermColor::Black)
        )?;
        for (row, line) in lines.iter().enumerate() {
            if row >= self.viewport.rows as usize {
                break;
            }
            let text: String = line.chars().take(self.viewport.cols as usize).collect();
            queue!(out, MoveTo(0, row as u16), Print(text))?;
            // overlay cells must be repainted once the overlay goes away
            for column in 0..line.chars().count().min(self.viewport.cols as usize) {
                let index = row * self.viewport.cols as usize + column;
                if let Some(cell) = self.shown.get_mut(index) {
                    *cell = None;
                }
            }
        }
        Ok(())
    }
}

fn terminal_size() -> io::Result<(u16, u16)> {
    match termsize::get() {
        Some(size) => Ok((size.cols, size.rows)),
        None => terminal::size(),
    }
}

/// Run the interactive loop until the user quits
pub fn run(config: &Config, polygon: Polygon) -> Result<()> {
    let (cols, rows) = terminal_size()?;
    let state = AppState::new(config, polygon);
    let mut widget = LightWidget::new(state, config, cols, rows);
    let delay = config.frame_delay();

    info!(
        "Starting {}x{} surface on a {}x{} terminal with {} rays",
        config.width, config.height, cols, rows, config.rays
    );

    let session = TerminalSession::start()?;
    let mut out = BufWriter::new(io::stdout());
    let mut running = true;
    while running {
        if event::poll(delay)? {
            loop {
                if widget.handle_event(event::read()?) == Control::Quit {
                    running = false;
                    break;
                }
                if !event::poll(Duration::ZERO)? {
                    break;
                }
            }
        }
        if running {
            widget.paint(&mut out)?;
        }
    }
    drop(out);
    drop(session);

    info!("Shutting down");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use crate::graphics::Surface;
    use crossterm::event::{KeyEventState, MouseButton};

    fn room() -> Polygon {
        Polygon::new(vec![
            Point::new(20.0, 20.0),
            Point::new(80.0, 20.0),
            Point::new(80.0, 80.0),
            Point::new(20.0, 80.0),
        ])
    }

    fn widget() -> LightWidget {
        let config = Config {
            width: 100,
            height: 100,
            rays: 8,
            light_x: 5.0,
            light_y: 5.0,
            ..Config::default()
        };
        LightWidget::new(AppState::new(&config, room()), &config, 50, 25)
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn drag(column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Drag(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn cell_centres_map_to_surface() {
        let viewport = Viewport::new(90, 30, 900, 600);
        assert_eq!(viewport.to_surface(0, 0), Point::new(5.0, 10.0));
        assert_eq!(viewport.to_surface(89, 29), Point::new(895.0, 590.0));
    }

    #[test]
    fn zero_sized_terminal_is_clamped() {
        let viewport = Viewport::new(0, 0, 10, 10);
        assert_eq!((viewport.cols, viewport.rows), (1, 1));
    }

    #[test]
    fn downsample_keeps_thin_features() {
        let mut frame = FrameBuffer::new(8, 8);
        frame.set_pixel(5, 6, Color::YELLOW);
        let viewport = Viewport::new(2, 2, 8, 8);
        let cells = viewport.downsample(&frame);
        assert_eq!(cells.len(), 4);
        // bottom-right cell, lower half covers rows 6..8
        assert_eq!(cells[3], (Color::BLACK, Color::YELLOW));
        assert!(cells[..3].iter().all(|&c| c == (Color::BLACK, Color::BLACK)));
    }

    #[test]
    fn downsample_with_more_cells_than_pixels() {
        let mut frame = FrameBuffer::new(2, 2);
        frame.clear(Color::WHITE);
        let viewport = Viewport::new(4, 4, 2, 2);
        let cells = viewport.downsample(&frame);
        assert_eq!(cells.len(), 16);
        assert!(cells.iter().all(|&c| c == (Color::WHITE, Color::WHITE)));
    }

    #[test]
    fn drag_moves_light() {
        let mut widget = widget();
        assert_eq!(widget.handle_event(drag(25, 12)), Control::Continue);
        assert_eq!(widget.state().light().center(), Point::new(51.0, 50.0));
        assert!(widget
            .state()
            .rays()
            .iter()
            .all(|r| r.origin() == Point::new(51.0, 50.0)));
    }

    #[test]
    fn plain_mouse_motion_is_ignored() {
        let mut widget = widget();
        widget.handle_event(Event::Mouse(MouseEvent {
            kind: MouseEventKind::Moved,
            column: 25,
            row: 12,
            modifiers: KeyModifiers::NONE,
        }));
        assert_eq!(widget.state().light().center(), Point::new(5.0, 5.0));
    }

    #[test]
    fn keys() {
        let mut widget = widget();
        widget.handle_event(drag(25, 12));
        assert_eq!(widget.handle_event(key(KeyCode::Char('r'))), Control::Continue);
        assert_eq!(widget.state().light().center(), Point::new(5.0, 5.0));

        widget.handle_event(key(KeyCode::Char('d')));
        assert!(widget.debug());

        let release = KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(widget.handle_event(Event::Key(release)), Control::Continue);
        assert_eq!(widget.handle_event(key(KeyCode::Char('q'))), Control::Quit);
        assert_eq!(widget.handle_event(key(KeyCode::Esc)), Control::Quit);
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(widget.handle_event(ctrl_c), Control::Quit);
    }

    #[test]
    fn resize_updates_viewport() {
        let mut widget = widget();
        widget.handle_event(Event::Resize(100, 40));
        assert_eq!(widget.viewport(), Viewport::new(100, 40, 100, 100));
    }

    #[derive(Clone, Default)]
    struct CapturedLog(Arc<Mutex<Vec<u8>>>);

    impl Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn log_of_resize(filter: &str) -> String {
        let log = CapturedLog::default();
        let writer = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let mut widget = widget();
        tracing::subscriber::with_default(subscriber, || {
            widget.handle_event(Event::Resize(80, 24));
        });
        let bytes = log.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn resize_stays_quiet_at_default_level() {
        assert!(!log_of_resize("warn,museum_guards=info").contains("resized"));
        assert!(log_of_resize("museum_guards=debug").contains("Terminal resized to 80x24"));
    }

    #[test]
    fn paint_only_rewrites_changed_cells() {
        let mut widget = widget();
        let mut first = Vec::new();
        widget.paint(&mut first).unwrap();
        let mut second = Vec::new();
        widget.paint(&mut second).unwrap();
        assert!(second.len() < first.len());

        widget.handle_event(drag(25, 12));
        let mut third = Vec::new();
        widget.paint(&mut third).unwrap();
        assert!(third.len() > second.len());
    }

    #[test]
    fn overlay_is_painted_in_debug_mode() {
        let mut widget = widget();
        widget.handle_event(key(KeyCode::Char('d')));
        let mut out = Vec::new();
        widget.paint(&mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains(env!("CARGO_PKG_NAME")));
        assert!(text.contains("Visible pixels: 0"));
    }
}
