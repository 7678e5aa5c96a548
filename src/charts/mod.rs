//! Charts module - Interactive and static chart rendering

mod export;
mod plotter;

pub use export::{ChartExporter, ExportError};
pub use plotter::ChartPlotter;
