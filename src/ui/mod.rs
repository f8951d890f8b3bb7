//! Progress reporting for a run.
//!
//! Three implementations of [`Ui`]:
//! - [`UiApp`]: full-screen ratatui dashboard
//! - [`ConsoleUi`]: forwards everything to `tracing`
//! - [`SilentUi`]: discards everything (tests)

mod components;

pub use components::Dashboard;

use anyhow::Result;
use crossterm::event::{self, Event};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::fmt;
use std::io::{self, Stdout};
use std::time::Duration;
use tracing::{debug, info};

use crate::pipeline::RenderCounts;

/// Stages of a run, in order
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Phase {
    #[default]
    Checking,
    Downloading,
    Extracting,
    Parsing,
    Deriving,
    Writing,
    Complete,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Checking => "Checking for updates",
            Phase::Downloading => "Downloading SDE",
            Phase::Extracting => "Extracting files",
            Phase::Parsing => "Parsing map data",
            Phase::Deriving => "Deriving render data",
            Phase::Writing => "Writing databases",
            Phase::Complete => "Complete",
        })
    }
}

/// Position within the current step
#[derive(Debug, Clone, Default)]
pub struct Progress {
    pub current: u64,
    pub total: u64,
    pub label: String,
}

impl Progress {
    pub fn new(current: u64, total: u64, label: impl Into<String>) -> Self {
        Self {
            current,
            total,
            label: label.into(),
        }
    }

    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.current as f64 / self.total as f64).min(1.0)
        }
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.total == 0 {
            return f.write_str(&self.label);
        }
        write!(
            f,
            "{}: {}/{} ({:.0}%)",
            self.label,
            self.current,
            self.total,
            self.ratio() * 100.0
        )
    }
}

/// Figures produced while a run progresses
#[derive(Debug, Clone, PartialEq)]
pub enum RunStat {
    /// A source file has been read
    Parsed {
        file: &'static str,
        records: usize,
        skipped: u64,
    },
    /// The render snapshot has been derived
    Derived(RenderCounts),
}

/// Trait for UI implementations - allows both real TUI and silent/test modes
pub trait Ui {
    fn set_phase(&mut self, phase: Phase);
    fn set_info(&mut self, info: impl Into<String>);
    fn set_progress(&mut self, current: u64, total: u64, label: impl Into<String>);
    fn clear_progress(&mut self);
    fn log(&mut self, message: impl Into<String>);
    fn report(&mut self, stat: RunStat);
}

/// The dashboard drawn on the alternate screen
pub struct UiApp {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    dashboard: Dashboard,
    restored: bool,
}

impl UiApp {
    pub fn new() -> Result<Self> {
        terminal::enable_raw_mode()?;
        io::stdout().execute(EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

        Ok(Self {
            terminal,
            dashboard: Dashboard::default(),
            restored: false,
        })
    }

    fn redraw(&mut self) {
        let dashboard = &self.dashboard;
        self.terminal.draw(|frame| dashboard.render(frame)).ok();
    }

    /// Show the summary, wait for a key and restore the terminal
    pub fn finish(mut self, summary: &str) -> Result<()> {
        self.set_phase(Phase::Complete);
        self.clear_progress();
        self.log(summary);
        self.log("Press any key to exit");

        loop {
            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(_) = event::read()? {
                    break;
                }
            }
        }

        self.restore()
    }

    /// Leave the alternate screen without waiting
    pub fn restore(mut self) -> Result<()> {
        self.restored = true;
        leave_screen(&mut self.terminal)
    }
}

fn leave_screen(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    terminal::disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

impl Ui for UiApp {
    fn set_phase(&mut self, phase: Phase) {
        self.dashboard.set_phase(phase);
        self.redraw();
    }

    fn set_info(&mut self, info: impl Into<String>) {
        self.dashboard.set_info(info);
        self.redraw();
    }

    fn set_progress(&mut self, current: u64, total: u64, label: impl Into<String>) {
        self.dashboard.set_progress(current, total, label);
        self.redraw();
    }

    fn clear_progress(&mut self) {
        self.dashboard.clear_progress();
        self.redraw();
    }

    fn log(&mut self, message: impl Into<String>) {
        self.dashboard.log(message);
        self.redraw();
    }

    fn report(&mut self, stat: RunStat) {
        self.dashboard.report(stat);
        self.redraw();
    }
}

impl Drop for UiApp {
    fn drop(&mut self) {
        if !self.restored {
            leave_screen(&mut self.terminal).ok();
        }
    }
}

/// Console implementation that reports through `tracing`
#[derive(Default)]
pub struct ConsoleUi;

impl ConsoleUi {
    pub fn new() -> Self {
        Self
    }
}

impl Ui for ConsoleUi {
    fn set_phase(&mut self, phase: Phase) {
        info!("== {} ==", phase);
    }

    fn set_info(&mut self, info: impl Into<String>) {
        info!("{}", info.into());
    }

    fn set_progress(&mut self, current: u64, total: u64, label: impl Into<String>) {
        debug!("{}", Progress::new(current, total, label));
    }

    fn clear_progress(&mut self) {}

    fn log(&mut self, message: impl Into<String>) {
        info!("{}", message.into());
    }

    fn report(&mut self, stat: RunStat) {
        match stat {
            RunStat::Parsed {
                file,
                records,
                skipped,
            } => info!(file, records, skipped, "parsed"),
            RunStat::Derived(counts) => info!(
                solar_systems = counts.solar_systems,
                constellations = counts.constellations,
                regions = counts.regions,
                regular_links = counts.stargate_links.regular,
                constellation_crossings = counts.stargate_links.constellation,
                regional_crossings = counts.stargate_links.regional,
                constellation_links = counts.constellation_links,
                "derived render snapshot"
            ),
        }
    }
}

/// Silent UI implementation for testing
#[derive(Default)]
pub struct SilentUi;

impl SilentUi {
    pub fn new() -> Self {
        Self
    }
}

impl Ui for SilentUi {
    fn set_phase(&mut self, _phase: Phase) {}
    fn set_info(&mut self, _info: impl Into<String>) {}
    fn set_progress(&mut self, _current: u64, _total: u64, _label: impl Into<String>) {}
    fn clear_progress(&mut self) {}
    fn log(&mut self, _message: impl Into<String>) {}
    fn report(&mut self, _stat: RunStat) {}
}
