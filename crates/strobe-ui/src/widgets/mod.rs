pub mod grid;
pub mod indicator;
pub mod readout;
pub mod stepper;
