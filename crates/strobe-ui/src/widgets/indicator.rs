use crate::color::Color;

/// Secondary cell that blinks with frame parity.
///
/// It reads the shared frame counter rather than running a clock of its own:
/// on for even frames, off for odd ones.
#[derive(Debug, Clone, Copy)]
pub struct Indicator {
    on_color: Color,
    off_color: Color,
}

impl Indicator {
    pub fn new() -> Self {
        Self {
            on_color: Color::WHITE,
            off_color: Color::from_srgb(0.12, 0.14, 0.18, 1.0),
        }
    }

    pub fn on_color(mut self, v: Color) -> Self { self.on_color = v; self }
    pub fn off_color(mut self, v: Color) -> Self { self.off_color = v; self }

    pub fn is_lit(frame: u64) -> bool {
        frame % 2 == 0
    }

    pub fn color(&self, frame: u64) -> Color {
        if Self::is_lit(frame) { self.on_color } else { self.off_color }
    }
}

impl Default for Indicator {
    fn default() -> Self { Self::new() }
}
