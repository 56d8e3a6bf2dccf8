use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use crossterm::{cursor, execute, terminal};

use strobe_engine::poll::{DEFAULT_POLL_CADENCE, PollSource, ThreadPollSource};
use strobe_engine::{Player, SchedulerSnapshot};

use crate::controls::{Controls, Intent};
use crate::event::command_for_key;
use crate::painter::TerminalPainter;
use crate::prefs::Preferences;
use crate::scene::UiScene;
use crate::widgets::grid::CellGrid;
use crate::widgets::indicator::Indicator;

// ── TerminalGuard ─────────────────────────────────────────────────────────

/// Raw mode + alternate screen for the lifetime of the guard.
///
/// Restores the terminal on drop, including when the loop exits with an error.
struct TerminalGuard {
    stdout: Stdout,
}

impl TerminalGuard {
    fn enter() -> Result<Self> {
        terminal::enable_raw_mode().context("failed to enable raw mode")?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide) {
            let _ = terminal::disable_raw_mode();
            return Err(e).context("failed to enter alternate screen");
        }
        Ok(Self { stdout })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(self.stdout, cursor::Show, terminal::LeaveAlternateScreen);
        if let Err(e) = terminal::disable_raw_mode() {
            log::error!("failed to restore terminal: {e}");
        }
    }
}

// ── Application ───────────────────────────────────────────────────────────

/// Top-level application builder.
///
/// Configure the window title, grid and preferences, then start either the
/// interactive terminal loop with [`run`](Self::run) or a measurement-only
/// loop with [`run_headless`](Self::run_headless).
///
/// ```rust,ignore
/// Application::new()
///     .title("strobe")
///     .preferences(Preferences::load_or_default(&path))
///     .preferences_path(path)
///     .run()?;
/// ```
pub struct Application {
    title:            String,
    prefs:            Preferences,
    prefs_path:       Option<PathBuf>,
    cadence:          Duration,
    render_interval:  Duration,
    report_interval:  Duration,
}

impl Application {
    pub fn new() -> Self {
        Self {
            title:           "strobe".to_string(),
            prefs:           Preferences::default(),
            prefs_path:      None,
            cadence:         DEFAULT_POLL_CADENCE,
            render_interval: Duration::from_millis(33),
            report_interval: Duration::from_secs(1),
        }
    }

    /// Set the title drawn above the grid.
    pub fn title(mut self, t: impl Into<String>) -> Self {
        self.title = t.into();
        self
    }

    /// Initial rate, playing flag and grid size.
    pub fn preferences(mut self, prefs: Preferences) -> Self {
        self.prefs = prefs.sanitized();
        self
    }

    /// Where to save preferences on exit. Without a path nothing is saved.
    pub fn preferences_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.prefs_path = Some(path.into());
        self
    }

    /// Override the grid size from the preferences.
    pub fn grid(mut self, rows: u16, columns: u16) -> Self {
        self.prefs.rows = rows;
        self.prefs.columns = columns;
        self.prefs = self.prefs.sanitized();
        self
    }

    /// Poll cadence of the timing thread. Independent of the target rate.
    pub fn cadence(mut self, cadence: Duration) -> Self {
        self.cadence = cadence;
        self
    }

    /// How often the terminal is repainted when no key arrives.
    pub fn render_interval(mut self, interval: Duration) -> Self {
        self.render_interval = interval.max(Duration::from_millis(1));
        self
    }

    /// How often `run_headless` reports the achieved rate.
    pub fn report_interval(mut self, interval: Duration) -> Self {
        self.report_interval = interval.max(Duration::from_millis(1));
        self
    }

    pub fn current_preferences(&self) -> &Preferences {
        &self.prefs
    }

    // ── Entry points ──────────────────────────────────────────────────────

    /// Runs the interactive terminal UI until the user quits.
    pub fn run(mut self) -> Result<()> {
        let mut controls = Controls::new(self.prefs.frequency_hz, self.prefs.playing);
        let scene = UiScene::new(CellGrid::new(self.prefs.rows, self.prefs.columns), Indicator::new());
        let mut player = Player::new(ThreadPollSource::new()).with_cadence(self.cadence);

        if let Some(intent) = controls.initial_intent() {
            apply_intent(&mut player, intent)?;
        }

        {
            let _guard = TerminalGuard::enter()?;
            let mut painter = TerminalPainter::new(io::stdout());
            painter.clear().context("failed to clear terminal")?;

            loop {
                let frame = scene.frame(player.snapshot(), &controls);
                painter.paint(&self.title, &frame).context("failed to draw frame")?;

                if !event::poll(self.render_interval).context("failed to poll terminal events")? {
                    continue;
                }

                match event::read().context("failed to read terminal event")? {
                    Event::Key(key) => {
                        let Some(command) = command_for_key(key) else { continue };
                        match controls.apply(command) {
                            Some(Intent::Exit) => break,
                            Some(intent) => apply_intent(&mut player, intent)?,
                            None => {}
                        }
                    }
                    Event::Resize(..) => painter.clear().context("failed to clear terminal")?,
                    _ => {}
                }
            }
        }

        player.stop();

        self.prefs.frequency_hz = controls.frequency();
        self.prefs.playing = controls.is_playing();
        self.save_preferences();
        Ok(())
    }

    /// Plays at the preferred rate for `duration` without touching the terminal.
    ///
    /// `on_report` receives the elapsed time and a snapshot every report
    /// interval. Returns the last snapshot taken before stopping.
    pub fn run_headless<F>(&self, duration: Duration, on_report: F) -> Result<SchedulerSnapshot>
    where
        F: FnMut(Duration, &SchedulerSnapshot),
    {
        let player = Player::new(ThreadPollSource::new()).with_cadence(self.cadence);
        self.drive_headless(player, duration, on_report)
    }

    fn drive_headless<S, F>(&self, mut player: Player<S>, duration: Duration, mut on_report: F) -> Result<SchedulerSnapshot>
    where
        S: PollSource,
        F: FnMut(Duration, &SchedulerSnapshot),
    {
        player.start(f64::from(self.prefs.frequency_hz))?;
        log::info!(
            "headless run at {} Hz for {:?} (poll every {:?})",
            self.prefs.frequency_hz,
            duration,
            player.cadence(),
        );

        let started = Instant::now();
        let mut last = player.snapshot();
        loop {
            let elapsed = started.elapsed();
            if elapsed >= duration {
                break;
            }
            std::thread::sleep(self.report_interval.min(duration - elapsed));

            last = player.snapshot();
            on_report(started.elapsed(), &last);
        }

        player.stop();
        Ok(last)
    }

    fn save_preferences(&self) {
        let Some(path) = &self.prefs_path else { return };
        if let Err(e) = self.prefs.save(path) {
            log::warn!("failed to save preferences: {e:#}");
        }
    }
}

impl Default for Application {
    fn default() -> Self {
        Self::new()
    }
}

fn apply_intent<S: PollSource>(player: &mut Player<S>, intent: Intent) -> Result<()> {
    match intent {
        Intent::Restart(hz) => {
            log::info!("playing at {hz} Hz");
            player.set_frequency(hz)
        }
        Intent::Stop => {
            log::info!("paused");
            player.stop();
            Ok(())
        }
        Intent::Exit => Ok(()),
    }
}
