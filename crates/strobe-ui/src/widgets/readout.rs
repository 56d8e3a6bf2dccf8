use strobe_engine::SchedulerSnapshot;

/// Text readout of the scheduler state, for display only.
#[derive(Debug, Clone, Copy, Default)]
pub struct Readout {
    snapshot: SchedulerSnapshot,
    selected_hz: u32,
}

impl Readout {
    pub fn new(snapshot: SchedulerSnapshot, selected_hz: u32) -> Self {
        Self { snapshot, selected_hz }
    }

    /// `"30 Hz"` for the selected rate, `"off"` for zero.
    pub fn target_label(&self) -> String {
        if self.selected_hz == 0 {
            "off".to_string()
        } else {
            format!("{} Hz", self.selected_hz)
        }
    }

    /// Measured rate with one decimal; `"--"` while paused.
    pub fn achieved_label(&self) -> String {
        if self.snapshot.running {
            format!("{:.1} Hz", self.snapshot.achieved_frequency)
        } else {
            "--".to_string()
        }
    }

    pub fn line(&self) -> String {
        let state = if self.snapshot.running { "playing" } else { "paused" };
        format!(
            "target {}  |  achieved {}  |  frame {}  |  {}",
            self.target_label(),
            self.achieved_label(),
            self.snapshot.frame_counter,
            state,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(running: bool, achieved: f64, frames: u64) -> SchedulerSnapshot {
        SchedulerSnapshot {
            running,
            target_frequency: if running { 30.0 } else { 0.0 },
            frame_counter: frames,
            achieved_frequency: achieved,
        }
    }

    #[test]
    fn playing_line() {
        let r = Readout::new(snap(true, 29.96, 120), 30);
        assert_eq!(r.line(), "target 30 Hz  |  achieved 30.0 Hz  |  frame 120  |  playing");
    }

    #[test]
    fn paused_line() {
        let r = Readout::new(snap(false, 0.0, 7), 12);
        assert_eq!(r.achieved_label(), "--");
        assert!(r.line().ends_with("paused"));
    }

    #[test]
    fn zero_target_reads_off() {
        assert_eq!(Readout::new(snap(false, 0.0, 0), 0).target_label(), "off");
    }
}
