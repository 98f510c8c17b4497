//! Live terminal view.
//!
//! [`PiApp`] holds all state and key handling so it can be tested without
//! a terminal; [`view`] draws it and [`runner`] owns the crossterm loop.
//! [`view::render_scatter`] also serves the static command's plot.

pub mod pi_app;
pub mod runner;
pub mod view;

pub use pi_app::{CountInput, InputMode, PiApp};
pub use runner::run;
pub use view::render_scatter;
