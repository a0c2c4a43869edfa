//! Reporting for almg-tracker sessions.
//!
//! Renders a session's summary as text for the terminal and draws its
//! trajectory as an ASCII plot.

pub mod plot;
pub mod reports;

pub use plot::TrajectoryPlot;
pub use reports::ReportGenerator;
