#![forbid(unsafe_code)]

//! VSplit terminal demo.
//!
//! Two screens, each hosting its own split:
//!
//! - **Maps**: a street map over walking directions, starting collapsed.
//! - **Photo**: a picture over adjustment sliders, with a pop-out menu.
//!
//! # Running
//!
//! ```sh
//! RUST_LOG=vsplit=debug cargo run -p vsplit-demo
//! ```
//!
//! Logs go to `vsplit-demo.log` (override with `VSPLIT_LOG`). A split config
//! in TOML or JSON can be given with `VSPLIT_CONFIG`; keys it omits take the
//! point-scale defaults, so a terminal config should set every length.
//!
//! # Controls
//!
//! - Drag the handle row with the mouse; click the pill to reveal a hidden pane
//! - 1-5: TopFull, TopMini, half, BottomMini, BottomFull
//! - m: toggle the accessory menu, Esc: close it or cancel a drag
//! - Tab: switch screen, q / Ctrl+C: quit

mod canvas;
mod chrome;
mod screens;
mod session;

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;
use std::time::Duration;

use crossterm::style::Color;
use crossterm::{event, queue, terminal};
use tracing_subscriber::EnvFilter;
use vsplit::{
    Detent, Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind, Observable, Rect,
    SplitConfig, SplitSignal, VerticalSplit,
};

use crate::canvas::{Canvas, DIM, HANDLE_BG};
use crate::screens::Screen;
use crate::session::TerminalSession;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Split tuning for one host unit per row.
fn terminal_config() -> SplitConfig {
    SplitConfig {
        collar: 3.0,
        spacing: 1.0,
        pill_height: 1.0,
        mini_adjust_inset: 0.0,
        bottom_extra_offset: 0.0,
        overscroll_commit_threshold: 2.0,
        tap_slop: 1.0,
        ..SplitConfig::default()
    }
}

fn read_config(path: &Path) -> vsplit::Result<SplitConfig> {
    if path.extension().is_some_and(|ext| ext == "json") {
        let text = std::fs::read_to_string(path)?;
        Ok(SplitConfig::from_json_str(&text)?)
    } else {
        Ok(SplitConfig::from_toml_file(path)?)
    }
}

fn load_config() -> SplitConfig {
    let Some(path) = std::env::var_os("VSPLIT_CONFIG").map(PathBuf::from) else {
        return terminal_config();
    };
    match read_config(&path) {
        Ok(config) => {
            tracing::info!(path = %path.display(), "split config loaded");
            config
        }
        Err(err) => {
            tracing::warn!(
                path = %path.display(),
                error_type = err.error_type(),
                recovery = ?err.recovery(),
                "split config not loaded: {err}"
            );
            terminal_config()
        }
    }
}

fn init_logging() {
    let path = std::env::var_os("VSPLIT_LOG")
        .map_or_else(|| PathBuf::from("vsplit-demo.log"), PathBuf::from);
    let Ok(file) = File::create(&path) else {
        return;
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}

struct Tab {
    screen: Box<dyn Screen>,
    split: VerticalSplit,
}

struct App {
    tabs: Vec<Tab>,
    current: usize,
    width: u16,
    height: u16,
    last_signal: Option<SplitSignal>,
    quit: bool,
}

impl App {
    fn new(config: SplitConfig, width: u16, height: u16) -> vsplit::Result<Self> {
        let tabs = screens::all()
            .into_iter()
            .map(|screen| {
                let binding = Observable::new(screen.initial_detent());
                let split = VerticalSplit::new(binding, screen.options(), config)?;
                Ok(Tab { screen, split })
            })
            .collect::<vsplit::Result<Vec<_>>>()?;
        let mut app = Self {
            tabs,
            current: 0,
            width,
            height,
            last_signal: None,
            quit: false,
        };
        app.resize(width, height);
        Ok(app)
    }

    /// The split gets everything above the status row.
    fn split_area(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height.saturating_sub(1))
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        let area = self.split_area();
        for tab in &mut self.tabs {
            tab.split.set_area(area);
        }
    }

    fn tab_mut(&mut self) -> Option<&mut Tab> {
        self.tabs.get_mut(self.current)
    }

    fn handle(&mut self, event: &Event) {
        match event {
            Event::Resize { width, height } => {
                self.resize(*width, *height);
                return;
            }
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if key.is_char('q') || (key.ctrl() && key.is_char('c')) {
                    self.quit = true;
                    return;
                }
                if self.on_key(key.code) {
                    self.settle();
                    return;
                }
            }
            _ => {}
        }

        let Some(tab) = self.tab_mut() else {
            return;
        };
        let consumed = tab.split.handle_event(event);
        if !consumed
            && !tab.split.is_dragging()
            && !tab.split.is_menu_open()
            && let Event::Mouse(mouse) = event
            && matches!(
                mouse.kind,
                MouseEventKind::Down(MouseButton::Left) | MouseEventKind::Drag(MouseButton::Left)
            )
            && let Some(rects) = tab.split.rects()
        {
            tab.screen.on_pointer(mouse.x, mouse.y, &rects);
        }
        self.settle();
    }

    /// App-level keys. Returns `true` if the key was used.
    fn on_key(&mut self, code: KeyCode) -> bool {
        let detent = match code {
            KeyCode::Tab => {
                if !self.tabs.is_empty() {
                    self.current = (self.current + 1) % self.tabs.len();
                }
                return true;
            }
            KeyCode::Char('m') => {
                if let Some(tab) = self.tab_mut() {
                    tab.split.toggle_menu();
                }
                return true;
            }
            KeyCode::Char('1') => Detent::TopFull,
            KeyCode::Char('2') => Detent::TopMini,
            KeyCode::Char('3') => Detent::Fraction(0.5),
            KeyCode::Char('4') => Detent::BottomMini,
            KeyCode::Char('5') => Detent::BottomFull,
            _ => return false,
        };
        if let Some(tab) = self.tab_mut() {
            tab.split.binding().set(detent);
        }
        true
    }

    /// Apply binding writes and deliver queued signals to the screen.
    fn settle(&mut self) {
        let Some(tab) = self.tabs.get_mut(self.current) else {
            return;
        };
        tab.split.sync_binding();
        let signals: Vec<SplitSignal> = tab.split.drain_signals().collect();
        for signal in signals {
            tracing::debug!(?signal, feedback = ?signal.feedback(), "split signal");
            tab.screen.on_signal(&signal, tab.split.binding());
            self.last_signal = Some(signal);
        }
        // Screens may write the binding in response to a signal.
        tab.split.sync_binding();
    }

    fn status(&self) -> String {
        let titles: Vec<String> = self
            .tabs
            .iter()
            .enumerate()
            .map(|(i, tab)| {
                if i == self.current {
                    format!("[{}]", tab.screen.title())
                } else {
                    format!(" {} ", tab.screen.title())
                }
            })
            .collect();
        let detent = self
            .tabs
            .get(self.current)
            .map(|tab| tab.split.detent().to_string())
            .unwrap_or_default();
        let feedback = self
            .last_signal
            .as_ref()
            .and_then(SplitSignal::feedback)
            .map(|f| format!("  {:?} {:.1}", f.style, f.intensity))
            .unwrap_or_default();
        format!(
            "{}  {detent}{feedback}  q quit · tab switch · 1-5 detents · m menu",
            titles.join("")
        )
    }

    fn draw(&self, out: &mut dyn Write) -> io::Result<()> {
        queue!(
            &mut &mut *out,
            terminal::BeginSynchronizedUpdate,
            terminal::Clear(terminal::ClearType::All)
        )?;
        let mut canvas = Canvas::new(out);
        if let Some(tab) = self.tabs.get(self.current) {
            chrome::draw_split(&mut canvas, &tab.split, tab.screen.as_ref())?;
        }
        if self.height > 0 {
            let row = Rect::new(0, self.height - 1, self.width, 1);
            canvas.fill(row, ' ', Color::Reset, HANDLE_BG)?;
            canvas.text(0, row.y, row.width, &self.status(), DIM, HANDLE_BG)?;
        }
        let out = canvas.into_inner();
        queue!(&mut &mut *out, terminal::EndSynchronizedUpdate)?;
        out.flush()
    }
}

fn read_event() -> vsplit::Result<Option<Event>> {
    if !event::poll(POLL_INTERVAL)? {
        return Ok(None);
    }
    Ok(Event::from_crossterm(event::read()?))
}

fn run() -> vsplit::Result<()> {
    let config = load_config();
    let session = TerminalSession::new()?;
    let (width, height) = terminal::size()?;
    let mut app = App::new(config, width, height)?;
    let mut stdout = io::stdout();
    app.draw(&mut stdout)?;

    while !app.quit {
        match read_event() {
            Ok(Some(event)) => {
                app.handle(&event);
                app.draw(&mut stdout)?;
            }
            Ok(None) => {}
            Err(err) if err.is_recoverable() => {
                tracing::debug!(error_type = err.error_type(), "input dropped: {err}");
            }
            Err(err) => return Err(err),
        }
    }

    drop(session);
    Ok(())
}

fn main() -> ExitCode {
    init_logging();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error_type = err.error_type(), recovery = ?err.recovery(), "{err}");
            eprintln!("vsplit-demo: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vsplit::{KeyEvent, MouseEvent};

    fn app() -> App {
        App::new(terminal_config(), 40, 22).expect("demo screens are valid")
    }

    fn key(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c)))
    }

    fn mouse(kind: MouseEventKind, x: u16, y: u16) -> Event {
        Event::Mouse(MouseEvent::new(kind, x, y))
    }

    #[test]
    fn screens_start_at_their_detents() {
        let mut app = app();
        assert_eq!(app.tabs[0].split.detent(), Detent::BottomMini);
        app.handle(&Event::Key(KeyEvent::new(KeyCode::Tab)));
        assert_eq!(app.current, 1);
        assert_eq!(app.tabs[1].split.detent(), Detent::TopFull);
        assert!(app.tabs[1].split.controller().hide_bottom());
    }

    #[test]
    fn digit_keys_write_the_binding() {
        let mut app = app();
        app.handle(&key('5'));
        assert_eq!(app.tabs[0].split.detent(), Detent::BottomFull);
        app.handle(&key('3'));
        assert_eq!(app.tabs[0].split.detent(), Detent::Fraction(0.5));
        assert!(app.status().contains("[Maps]"));
    }

    #[test]
    fn menu_markup_item_restores_full_photo() {
        let mut app = app();
        app.handle(&Event::Key(KeyEvent::new(KeyCode::Tab)));
        app.handle(&key('3'));
        app.handle(&key('m'));
        assert!(app.tabs[1].split.is_menu_open());

        // Markup is the first of three menu items across the 40-wide handle.
        let handle = app.tabs[1].split.rects().expect("area").handle;
        app.handle(&mouse(MouseEventKind::Down(MouseButton::Left), 2, handle.y));
        app.handle(&mouse(MouseEventKind::Up(MouseButton::Left), 2, handle.y));

        assert!(!app.tabs[1].split.is_menu_open());
        assert_eq!(app.tabs[1].split.detent(), Detent::TopFull);
        assert!(matches!(app.last_signal, Some(SplitSignal::MenuToggled { open: false })));
    }

    #[test]
    fn quit_keys() {
        let mut app = app();
        app.handle(&key('q'));
        assert!(app.quit);
    }

    #[test]
    fn draw_writes_status_row() {
        let app = app();
        let mut out = Vec::new();
        app.draw(&mut out).expect("draw to vec");
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("tab switch"));
        assert!(text.contains("Walk to South Kensington Museums stop"));
    }
}
