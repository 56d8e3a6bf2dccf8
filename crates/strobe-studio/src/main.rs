mod cli;

use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Parser;

use strobe_engine::logging::{LoggingConfig, init_logging};
use strobe_ui::prelude::*;

use crate::cli::Args;

fn main() -> Result<()> {
    let args = Args::parse();

    // The interactive UI owns the terminal; stay quiet on stderr unless asked.
    let default_level = if args.headless || args.log_file.is_some() {
        log::LevelFilter::Info
    } else {
        log::LevelFilter::Off
    };
    init_logging(LoggingConfig {
        env_filter: args.log.clone(),
        log_file: args.log_file.clone(),
        default_level,
        ..LoggingConfig::default()
    });

    let cadence = poll_cadence(args.poll_hz)?;
    let duration = run_duration(args.duration)?;

    let prefs_path = args.prefs.clone().unwrap_or_else(Preferences::default_path);
    let mut prefs = Preferences::load_or_default(&prefs_path);
    if let Some(hz) = args.hz {
        prefs.frequency_hz = hz;
    }
    if let Some(rows) = args.rows {
        prefs.rows = rows;
    }
    if let Some(columns) = args.columns {
        prefs.columns = columns;
    }
    if args.paused {
        prefs.playing = false;
    }

    let mut app = Application::new()
        .title("strobe")
        .preferences(prefs)
        .cadence(cadence);
    if !args.no_save {
        app = app.preferences_path(prefs_path);
    }

    if args.headless {
        let hz = app.current_preferences().frequency_hz;
        println!("measuring {hz} Hz for {:.1}s", args.duration);
        let last = app.run_headless(duration, |elapsed, snap| {
            println!(
                "{:>6.2}s  frame {:>6}  achieved {:>5.1} Hz",
                elapsed.as_secs_f64(),
                snap.frame_counter,
                snap.achieved_frequency,
            );
        })?;
        println!("{}", Readout::new(last, hz).line());
        return Ok(());
    }

    app.run()
}

/// Interval between polls for `--poll-hz`.
fn poll_cadence(poll_hz: f64) -> Result<Duration> {
    if !(poll_hz.is_finite() && poll_hz > 0.0) {
        bail!("--poll-hz must be a positive number, got {poll_hz}");
    }
    Duration::try_from_secs_f64(1.0 / poll_hz)
        .with_context(|| format!("--poll-hz {poll_hz} gives an unrepresentable poll interval"))
}

fn run_duration(seconds: f64) -> Result<Duration> {
    if !(seconds.is_finite() && seconds >= 0.0) {
        bail!("--duration must be a non-negative number, got {seconds}");
    }
    Duration::try_from_secs_f64(seconds)
        .with_context(|| format!("--duration {seconds} is too long"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poll_cadence_accepts_normal_rates() {
        assert_eq!(poll_cadence(100.0).unwrap(), Duration::from_millis(10));
    }

    #[test]
    fn poll_cadence_rejects_bad_rates() {
        for hz in [0.0, -5.0, f64::NAN, f64::INFINITY, 1e-20] {
            assert!(poll_cadence(hz).is_err(), "{hz}");
        }
    }

    #[test]
    fn run_duration_rejects_out_of_range() {
        assert_eq!(run_duration(0.0).unwrap(), Duration::ZERO);
        assert_eq!(run_duration(2.5).unwrap(), Duration::from_millis(2500));
        for secs in [-1.0, f64::NAN, f64::INFINITY, 1e30] {
            assert!(run_duration(secs).is_err(), "{secs}");
        }
    }
}
