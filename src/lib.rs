//! Hoopscope - NBA Historical Analytics Dashboard
//!
//! Loads games, player box scores and team rankings, and computes the
//! season-filterable views shown by the dashboard.

pub mod charts;
pub mod config;
pub mod data;
pub mod gui;
pub mod stats;
