#![forbid(unsafe_code)]

//! Elm-style program runtime.
//!
//! The program owns the terminal session and drives the update/view loop:
//! backend events become messages, `Model::update` returns commands for side
//! effects, and the view renders into a [`Frame`] presented by a line-diff
//! painter. Declared subscriptions are reconciled after every batch of
//! updates, and one-shot timers live inside the program so quitting releases
//! them with everything else.
//!
//! ```ignore
//! struct Counter { count: i32 }
//!
//! enum Msg { Input(Event) }
//!
//! impl From<Event> for Msg {
//!     fn from(event: Event) -> Self { Msg::Input(event) }
//! }
//!
//! impl Model for Counter {
//!     type Message = Msg;
//!     fn update(&mut self, msg: Msg) -> Cmd<Msg> {
//!         match msg {
//!             Msg::Input(e) if e.is_char('q') => Cmd::quit(),
//!             Msg::Input(e) if e.is_char('+') => { self.count += 1; Cmd::none() }
//!             _ => Cmd::none(),
//!         }
//!     }
//!     fn view(&self, frame: &mut Frame) { /* draw */ }
//! }
//! ```

use std::io::{self, Stdout, Write};
use std::process::Command;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::style::{PrintStyledContent, StyledContent};
use crossterm::terminal::{
    Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
    enable_raw_mode,
};
use crossterm::{execute, queue};

use crate::event::Event;
use crate::frame::{CONTINUATION, Frame, Style};
use crate::subscription::{Subscription, SubscriptionManager};

/// Application state and behavior.
pub trait Model: Sized {
    /// Messages that drive state transitions. Input events must convert
    /// into this type.
    type Message: From<Event> + Send + 'static;

    /// Startup commands, run once before the first frame.
    fn init(&mut self) -> Cmd<Self::Message> {
        Cmd::none()
    }

    /// The state transition function.
    fn update(&mut self, msg: Self::Message) -> Cmd<Self::Message>;

    /// Render the current state.
    fn view(&self, frame: &mut Frame);

    /// Timers this state needs; reconciled after every update batch.
    fn subscriptions(&self) -> Vec<Box<dyn Subscription<Self::Message>>> {
        vec![]
    }
}

/// Side effects returned from `init()` and `update()`.
#[derive(Default)]
pub enum Cmd<M> {
    /// No effect.
    #[default]
    None,
    /// Stop the program.
    Quit,
    /// Feed a message back through `update()`.
    Msg(M),
    /// Run several commands.
    Batch(Vec<Cmd<M>>),
    /// Deliver a message after a delay. The timer is owned by the program
    /// and dies with it.
    Tick(Duration, Box<dyn FnOnce() -> M + Send>),
    /// Run a blocking closure on a background thread; its result comes back
    /// as a message.
    Task(Box<dyn FnOnce() -> M + Send>),
    /// Hand a URL to the platform opener, detached from this process.
    OpenUrl(String),
}

impl<M> Cmd<M> {
    /// No-op command.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        Self::None
    }

    /// Quit command.
    #[inline]
    #[must_use]
    pub fn quit() -> Self {
        Self::Quit
    }

    /// Message command.
    #[inline]
    #[must_use]
    pub fn msg(m: M) -> Self {
        Self::Msg(m)
    }

    /// Batch several commands; empty collapses to `None`, one unwraps.
    #[must_use]
    pub fn batch(cmds: Vec<Self>) -> Self {
        let mut cmds: Vec<Self> = cmds
            .into_iter()
            .filter(|c| !matches!(c, Self::None))
            .collect();
        match cmds.len() {
            0 => Self::None,
            1 => cmds.remove(0),
            _ => Self::Batch(cmds),
        }
    }

    /// Deliver `make()` after `delay`.
    pub fn tick<F>(delay: Duration, make: F) -> Self
    where
        F: FnOnce() -> M + Send + 'static,
    {
        Self::Tick(delay, Box::new(make))
    }

    /// Run `work` off the update loop.
    pub fn task<F>(work: F) -> Self
    where
        F: FnOnce() -> M + Send + 'static,
    {
        Self::Task(Box::new(work))
    }

    /// Open a URL in the system browser.
    #[must_use]
    pub fn open_url(url: impl Into<String>) -> Self {
        Self::OpenUrl(url.into())
    }

    /// Count atomic commands (for tests and tracing).
    #[must_use]
    pub fn count(&self) -> usize {
        match self {
            Self::None => 0,
            Self::Batch(cmds) => cmds.iter().map(Self::count).sum(),
            _ => 1,
        }
    }

    /// Stable name for tracing.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Quit => "Quit",
            Self::Msg(_) => "Msg",
            Self::Batch(_) => "Batch",
            Self::Tick(..) => "Tick",
            Self::Task(_) => "Task",
            Self::OpenUrl(_) => "OpenUrl",
        }
    }
}

impl<M: std::fmt::Debug> std::fmt::Debug for Cmd<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Quit => write!(f, "Quit"),
            Self::Msg(m) => f.debug_tuple("Msg").field(m).finish(),
            Self::Batch(cmds) => f.debug_tuple("Batch").field(cmds).finish(),
            Self::Tick(d, _) => f.debug_tuple("Tick").field(d).finish(),
            Self::Task(_) => write!(f, "Task"),
            Self::OpenUrl(u) => f.debug_tuple("OpenUrl").field(u).finish(),
        }
    }
}

/// Program configuration.
#[derive(Debug, Clone)]
pub struct ProgramConfig {
    /// Capture mouse events.
    pub mouse: bool,
    /// Use the alternate screen.
    pub alt_screen: bool,
    /// Quit automatically after this long (harness runs).
    pub exit_after: Option<Duration>,
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self {
            mouse: true,
            alt_screen: true,
            exit_after: None,
        }
    }
}

/// Restores the terminal when dropped, whatever path the loop took out.
struct SessionGuard {
    mouse: bool,
    alt_screen: bool,
}

impl SessionGuard {
    fn enter(config: &ProgramConfig) -> io::Result<Self> {
        enable_raw_mode()?;
        let mut out = io::stdout();
        if config.alt_screen {
            execute!(out, EnterAlternateScreen)?;
        }
        execute!(out, Hide)?;
        execute!(out, EnableBracketedPaste)?;
        if config.mouse {
            execute!(out, EnableMouseCapture)?;
        }
        Ok(Self {
            mouse: config.mouse,
            alt_screen: config.alt_screen,
        })
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        let mut out = io::stdout();
        if self.mouse {
            let _ = execute!(out, DisableMouseCapture);
        }
        let _ = execute!(out, DisableBracketedPaste);
        let _ = execute!(out, Show);
        if self.alt_screen {
            let _ = execute!(out, LeaveAlternateScreen);
        }
        let _ = disable_raw_mode();
    }
}

struct PendingTick<M> {
    due: Instant,
    make: Box<dyn FnOnce() -> M + Send>,
}

/// The update/view loop.
pub struct Program<M: Model> {
    model: M,
    config: ProgramConfig,
    subs: SubscriptionManager<M::Message>,
    task_tx: mpsc::Sender<M::Message>,
    task_rx: mpsc::Receiver<M::Message>,
    timers: Vec<PendingTick<M::Message>>,
    quitting: bool,
}

impl<M: Model> Program<M> {
    /// Create a program with the default configuration.
    #[must_use]
    pub fn new(model: M) -> Self {
        Self::with_config(model, ProgramConfig::default())
    }

    /// Create a program with an explicit configuration.
    #[must_use]
    pub fn with_config(model: M, config: ProgramConfig) -> Self {
        let (task_tx, task_rx) = mpsc::channel();
        Self {
            model,
            config,
            subs: SubscriptionManager::new(),
            task_tx,
            task_rx,
            timers: Vec::new(),
            quitting: false,
        }
    }

    /// Run until the model quits or the terminal fails.
    pub fn run(&mut self) -> io::Result<()> {
        let _guard = SessionGuard::enter(&self.config)?;
        let mut out = io::stdout();
        execute!(out, Clear(ClearType::All))?;

        let (mut width, mut height) = crossterm::terminal::size()?;
        let started = Instant::now();
        let mut previous: Option<Frame> = None;

        let init_cmd = self.model.init();
        self.handle_cmd(init_cmd);
        self.subs.reconcile(self.model.subscriptions());

        while !self.quitting {
            if let Some(limit) = self.config.exit_after
                && started.elapsed() >= limit
            {
                tracing::debug!("exit-after limit reached");
                break;
            }

            let timeout = self
                .next_timer_due()
                .map(|due| due.saturating_duration_since(Instant::now()))
                .unwrap_or(Duration::from_millis(33))
                .min(Duration::from_millis(33));

            if crossterm::event::poll(timeout)? {
                let backend_event = crossterm::event::read()?;
                if let Some(event) = Event::from_backend(backend_event) {
                    if let Event::Resize(w, h) = event {
                        width = w;
                        height = h;
                        previous = None;
                    }
                    self.dispatch(event.into());
                }
            }

            for msg in self.drain_due_timers() {
                self.dispatch(msg);
            }
            for msg in self.subs.drain() {
                self.dispatch(msg);
            }
            while let Ok(msg) = self.task_rx.try_recv() {
                self.dispatch(msg);
            }

            self.subs.reconcile(self.model.subscriptions());

            let mut frame = Frame::new(width, height);
            self.model.view(&mut frame);
            present(&mut out, &frame, previous.as_ref())?;
            previous = Some(frame);
        }

        self.subs.stop_all();
        Ok(())
    }

    fn next_timer_due(&self) -> Option<Instant> {
        self.timers.iter().map(|t| t.due).min()
    }

    fn drain_due_timers(&mut self) -> Vec<M::Message> {
        let now = Instant::now();
        let mut due = Vec::new();
        let mut pending = Vec::new();
        for timer in self.timers.drain(..) {
            if timer.due <= now {
                due.push((timer.make)());
            } else {
                pending.push(timer);
            }
        }
        self.timers = pending;
        due
    }

    fn dispatch(&mut self, msg: M::Message) {
        let cmd = self.model.update(msg);
        self.handle_cmd(cmd);
    }

    fn handle_cmd(&mut self, cmd: Cmd<M::Message>) {
        match cmd {
            Cmd::None => {}
            Cmd::Quit => self.quitting = true,
            Cmd::Msg(m) => self.dispatch(m),
            Cmd::Batch(cmds) => {
                for c in cmds {
                    self.handle_cmd(c);
                }
            }
            Cmd::Tick(delay, make) => self.timers.push(PendingTick {
                due: Instant::now() + delay,
                make,
            }),
            Cmd::Task(work) => {
                let tx = self.task_tx.clone();
                thread::spawn(move || {
                    let _ = tx.send(work());
                });
            }
            Cmd::OpenUrl(url) => {
                if let Err(e) = open_url_detached(&url) {
                    tracing::warn!(url = %url, error = %e, "could not open URL");
                }
            }
        }
    }
}

/// Present a frame, rewriting only rows that differ from the previous one.
fn present(out: &mut Stdout, frame: &Frame, previous: Option<&Frame>) -> io::Result<()> {
    let mut wrote = false;
    for y in 0..frame.height() {
        let row = frame.row(y);
        if let Some(prev) = previous
            && prev.height() == frame.height()
            && prev.row(y) == row
        {
            continue;
        }
        wrote = true;
        queue!(out, MoveTo(0, y))?;

        // Emit runs of identically-styled cells in one styled print each.
        let mut run = String::new();
        let mut run_style: Option<Style> = None;
        for cell in row {
            if cell.ch == CONTINUATION {
                continue;
            }
            match run_style {
                Some(style) if style == cell.style => run.push(cell.ch),
                Some(style) => {
                    queue!(
                        out,
                        PrintStyledContent(StyledContent::new(
                            style.to_content_style(),
                            std::mem::take(&mut run),
                        ))
                    )?;
                    run.push(cell.ch);
                    run_style = Some(cell.style);
                }
                None => {
                    run.push(cell.ch);
                    run_style = Some(cell.style);
                }
            }
        }
        if let Some(style) = run_style
            && !run.is_empty()
        {
            queue!(
                out,
                PrintStyledContent(StyledContent::new(style.to_content_style(), run))
            )?;
        }
    }
    if wrote {
        out.flush()?;
    }
    Ok(())
}

/// Hand a URL to the platform opener without waiting on it.
fn open_url_detached(url: &str) -> io::Result<()> {
    #[cfg(target_os = "linux")]
    {
        Command::new("xdg-open").arg(url).spawn().map(|_| ())
    }
    #[cfg(target_os = "macos")]
    {
        Command::new("open").arg(url).spawn().map(|_| ())
    }
    #[cfg(target_os = "windows")]
    {
        Command::new("cmd")
            .args(["/C", "start", "", url])
            .spawn()
            .map(|_| ())
    }
    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    {
        let _ = url;
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "no URL opener on this platform",
        ))
    }
}
