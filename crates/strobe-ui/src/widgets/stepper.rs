/// Bounded integer frequency selector behind the on-screen +/- controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrequencyStepper {
    value: u32,
    min: u32,
    max: u32,
    step: u32,
}

impl FrequencyStepper {
    pub const DEFAULT_MAX_HZ: u32 = 60;

    pub fn new(value: u32) -> Self {
        Self::with_range(value, 0, Self::DEFAULT_MAX_HZ)
    }

    /// `min > max` is treated as a single-value range at `min`.
    pub fn with_range(value: u32, min: u32, max: u32) -> Self {
        let max = max.max(min);
        Self { value: value.clamp(min, max), min, max, step: 1 }
    }

    pub fn step(mut self, v: u32) -> Self { self.step = v.max(1); self }

    pub fn value(&self) -> u32 { self.value }
    pub fn min(&self) -> u32 { self.min }
    pub fn max(&self) -> u32 { self.max }

    /// Sets the value, clamped to the range. Returns `true` if it changed.
    pub fn set(&mut self, v: u32) -> bool {
        let v = v.clamp(self.min, self.max);
        let changed = v != self.value;
        self.value = v;
        changed
    }

    pub fn increment(&mut self) -> bool {
        self.set(self.value.saturating_add(self.step))
    }

    pub fn decrement(&mut self) -> bool {
        self.set(self.value.saturating_sub(self.step))
    }

    /// Fill ratio in `[0, 1]` for drawing a level bar.
    pub fn normalized(&self) -> f32 {
        if self.max == self.min {
            0.0
        } else {
            (self.value - self.min) as f32 / (self.max - self.min) as f32
        }
    }
}

impl Default for FrequencyStepper {
    fn default() -> Self { Self::new(30) }
}
