use crate::widgets::stepper::FrequencyStepper;

/// User commands, independent of the input device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Increase,
    Decrease,
    TogglePlay,
    Quit,
}

/// What the application must do to the scheduler after a command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    /// Stop and start again at the given rate. Nothing carries over.
    Restart(f64),
    Stop,
    Exit,
}

/// Playing flag plus the frequency stepper.
///
/// This is the explicit state-transition surface: commands go in, intents
/// come out, and the caller applies them to the `Player`.
#[derive(Debug, Clone, Copy)]
pub struct Controls {
    frequency: FrequencyStepper,
    playing: bool,
}

impl Controls {
    pub fn new(frequency_hz: u32, playing: bool) -> Self {
        Self { frequency: FrequencyStepper::new(frequency_hz), playing }
    }

    pub fn frequency(&self) -> u32 { self.frequency.value() }
    pub fn stepper(&self) -> &FrequencyStepper { &self.frequency }
    pub fn is_playing(&self) -> bool { self.playing }

    /// The intent that brings a freshly created player in line with these controls.
    pub fn initial_intent(&self) -> Option<Intent> {
        self.playing.then(|| Intent::Restart(f64::from(self.frequency.value())))
    }

    pub fn apply(&mut self, command: Command) -> Option<Intent> {
        match command {
            Command::Increase => {
                let changed = self.frequency.increment();
                self.restart_if(changed)
            }
            Command::Decrease => {
                let changed = self.frequency.decrement();
                self.restart_if(changed)
            }
            Command::TogglePlay => {
                self.playing = !self.playing;
                if self.playing {
                    Some(Intent::Restart(f64::from(self.frequency.value())))
                } else {
                    Some(Intent::Stop)
                }
            }
            Command::Quit => Some(Intent::Exit),
        }
    }

    fn restart_if(&self, changed: bool) -> Option<Intent> {
        (changed && self.playing).then(|| Intent::Restart(f64::from(self.frequency.value())))
    }
}

impl Default for Controls {
    fn default() -> Self { Self::new(30, true) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_while_playing_restarts() {
        let mut c = Controls::new(30, true);
        assert_eq!(c.apply(Command::Increase), Some(Intent::Restart(31.0)));
        assert_eq!(c.apply(Command::Decrease), Some(Intent::Restart(30.0)));
    }

    #[test]
    fn step_while_paused_only_updates_value() {
        let mut c = Controls::new(30, false);
        assert_eq!(c.apply(Command::Increase), None);
        assert_eq!(c.frequency(), 31);
        assert_eq!(c.apply(Command::TogglePlay), Some(Intent::Restart(31.0)));
    }

    #[test]
    fn step_at_bound_is_noop() {
        let mut c = Controls::new(60, true);
        assert_eq!(c.apply(Command::Increase), None);
        let mut c = Controls::new(0, true);
        assert_eq!(c.apply(Command::Decrease), None);
    }

    #[test]
    fn toggle_stops_and_resumes() {
        let mut c = Controls::new(12, true);
        assert_eq!(c.apply(Command::TogglePlay), Some(Intent::Stop));
        assert!(!c.is_playing());
        assert_eq!(c.apply(Command::TogglePlay), Some(Intent::Restart(12.0)));
        assert!(c.is_playing());
    }

    #[test]
    fn stepping_down_to_zero_restarts_disabled() {
        let mut c = Controls::new(1, true);
        assert_eq!(c.apply(Command::Decrease), Some(Intent::Restart(0.0)));
    }

    #[test]
    fn initial_intent_follows_playing_flag() {
        assert_eq!(Controls::new(5, true).initial_intent(), Some(Intent::Restart(5.0)));
        assert_eq!(Controls::new(5, false).initial_intent(), None);
    }

    #[test]
    fn quit_exits() {
        assert_eq!(Controls::default().apply(Command::Quit), Some(Intent::Exit));
    }
}
