//! Control Panel Widget
//! Left side panel with the global season filter, data source and export.

use crate::data::SeasonRange;
use egui::{Color32, RichText};
use std::path::Path;

/// Left side control panel.
pub struct ControlPanel {
    pub status: String,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            status: "Ready".to_string(),
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the control panel. `range` is `None` until a dataset is loaded.
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        data_dir: &Path,
        seasons: &[i32],
        range: Option<&mut SeasonRange>,
    ) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🏀 Dashboard Filters")
                    .size(20.0)
                    .color(Color32::from_rgb(243, 156, 18)),
            );
            ui.label(
                RichText::new("Explore 20 years of NBA evolution.")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Season Range Section =====
        ui.label(RichText::new("📅 Season Range").size(14.0).strong());
        ui.add_space(5.0);

        match (range, seasons.first(), seasons.last()) {
            (Some(range), Some(&min), Some(&max)) => {
                let (mut start, mut end) = (range.start, range.end);
                ui.add(egui::Slider::new(&mut start, min..=max).text("From"));
                ui.add(egui::Slider::new(&mut end, min..=max).text("To"));
                // Dragging one bound past the other pushes it along.
                if start > range.start && start > end {
                    end = start;
                } else if end < range.end && end < start {
                    start = end;
                }
                *range = SeasonRange::new(start, end);
            }
            _ => {
                ui.label(RichText::new("No data loaded").color(Color32::GRAY));
            }
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Data Source Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(data_dir.display().to_string()).size(12.0));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("📂 Browse").clicked() {
                            action = ControlPanelAction::BrowseDataDir;
                        }
                    });
                });
            });

        ui.add_space(10.0);
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(!seasons.is_empty(), |ui| {
                let button = egui::Button::new(RichText::new("🖼 Export PNG").size(14.0))
                    .min_size(egui::vec2(150.0, 30.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::ExportPng;
                }
            });
        });

        ui.add_space(10.0);
        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.contains("Exported") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== About Section =====
        ui.label(RichText::new("About this Dashboard").size(14.0).strong());
        ui.add_space(5.0);
        ui.label("• Data Source: NBA Official Records (2004-2022)");
        ui.label("• Tech Stack: Rust, Polars, egui");

        action
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    BrowseDataDir,
    ExportPng,
}
