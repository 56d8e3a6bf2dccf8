use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Drive a colored grid at a fixed logical rate")]
pub struct Args {
    /// Target rate in Hz (0-60; 0 disables). Overrides saved preferences
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=60))]
    pub hz: Option<u32>,

    /// Grid rows (1-32). Overrides saved preferences
    #[arg(long)]
    pub rows: Option<u16>,

    /// Grid columns (1-32). Overrides saved preferences
    #[arg(long)]
    pub columns: Option<u16>,

    /// Start paused
    #[arg(long, default_value_t = false)]
    pub paused: bool,

    /// Path to preferences TOML (defaults to the user config dir)
    #[arg(long)]
    pub prefs: Option<PathBuf>,

    /// Do not write preferences on exit
    #[arg(long, default_value_t = false)]
    pub no_save: bool,

    /// Measure the achieved rate without drawing anything
    #[arg(long, default_value_t = false)]
    pub headless: bool,

    /// Headless run length in seconds
    #[arg(long, default_value_t = 5.0)]
    pub duration: f64,

    /// Poll cadence of the timing thread in Hz
    #[arg(long, default_value_t = 120.0)]
    pub poll_hz: f64,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log filter, env_logger syntax (overrides RUST_LOG)
    #[arg(long)]
    pub log: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["strobe"]).unwrap();
        assert_eq!(args.hz, None);
        assert!(!args.headless);
        assert_eq!(args.duration, 5.0);
        assert_eq!(args.poll_hz, 120.0);
    }

    #[test]
    fn overrides() {
        let args = Args::try_parse_from([
            "strobe", "--hz", "12", "--rows", "4", "--headless", "--duration", "2.5", "--no-save",
        ])
        .unwrap();
        assert_eq!(args.hz, Some(12));
        assert_eq!(args.rows, Some(4));
        assert!(args.headless);
        assert!(args.no_save);
        assert_eq!(args.duration, 2.5);
    }

    #[test]
    fn rejects_out_of_range_rate() {
        assert!(Args::try_parse_from(["strobe", "--hz", "61"]).is_err());
    }
}
