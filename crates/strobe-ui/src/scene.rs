use strobe_engine::SchedulerSnapshot;

use crate::color::Color;
use crate::controls::Controls;
use crate::widgets::grid::CellGrid;
use crate::widgets::indicator::Indicator;
use crate::widgets::readout::Readout;

pub const HELP_LINE: &str = "+/- change rate   space play/pause   q quit";

/// Everything the painter needs for one drawn frame.
///
/// Built from a single scheduler snapshot so the grid, indicator and readout
/// never disagree about the frame counter.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneFrame {
    pub cells: Vec<Vec<Color>>,
    pub indicator: Color,
    pub level: f32,
    pub target: String,
    pub readout: String,
}

/// Widget set shown by the application.
#[derive(Debug, Clone, Default)]
pub struct UiScene {
    grid: CellGrid,
    indicator: Indicator,
}

impl UiScene {
    pub fn new(grid: CellGrid, indicator: Indicator) -> Self {
        Self { grid, indicator }
    }

    pub fn grid(&self) -> &CellGrid {
        &self.grid
    }

    pub fn frame(&self, snapshot: SchedulerSnapshot, controls: &Controls) -> SceneFrame {
        let frame = snapshot.frame_counter;
        let readout = Readout::new(snapshot, controls.frequency());
        SceneFrame {
            cells: self.grid.colors(frame),
            indicator: self.indicator.color(frame),
            level: controls.stepper().normalized(),
            target: readout.target_label(),
            readout: readout.line(),
        }
    }
}
