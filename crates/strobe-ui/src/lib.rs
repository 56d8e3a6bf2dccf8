//! Strobe UI — terminal presentation on top of `strobe-engine`.
//!
//! Everything here is a consumer of the scheduler's two outputs: the logical
//! frame counter and the achieved frequency. Cells, the indicator and the
//! readout are recomputed from one snapshot every time they are drawn.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use strobe_ui::prelude::*;
//!
//! let path = Preferences::default_path();
//! Application::new()
//!     .title("strobe")
//!     .preferences(Preferences::load_or_default(&path))
//!     .preferences_path(path)
//!     .run()?;
//! ```

pub mod app;
pub mod color;
pub mod controls;
pub mod event;
pub mod painter;
pub mod prefs;
pub mod scene;
pub mod widgets;

// Top-level re-export for the common entry point — `use strobe_ui::Application`
pub use app::Application;

/// Everything a front end needs — import this in binaries and tools.
pub mod prelude {
    pub use crate::app::Application;
    pub use crate::color::Color;
    pub use crate::controls::{Command, Controls, Intent};
    pub use crate::event::command_for_key;
    pub use crate::painter::TerminalPainter;
    pub use crate::prefs::Preferences;
    pub use crate::scene::{SceneFrame, UiScene};
    pub use crate::widgets::{
        grid::CellGrid,
        indicator::Indicator,
        readout::Readout,
        stepper::FrequencyStepper,
    };

    pub use strobe_engine::SchedulerSnapshot;
}
