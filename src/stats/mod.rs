//! Stats module - Aggregations behind the dashboard views

mod calculator;
mod tables;

pub use calculator::StatsCalculator;
pub use tables::*;
