//! Hoopscope Main Application
//! Main window with the filter panel and the tabbed dashboard.

use crate::charts::ChartExporter;
use crate::config::DashboardConfig;
use crate::data::{DataCache, DataLoader, DataSources, LoaderError, NbaTables};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use crate::stats::{DashboardViews, StatsCalculator, ViewParams};
use egui::{Color32, RichText, SidePanel};
use polars::prelude::PolarsResult;
use std::sync::mpsc::{channel, Receiver};
use std::sync::Arc;
use std::thread;
use tracing::{error, info, warn};

/// Dataset loading result from background thread
enum LoadResult {
    Complete(NbaTables),
    Error(LoaderError),
}

/// Loaded tables with the current selections and their views.
struct Dashboard {
    tables: Arc<NbaTables>,
    params: ViewParams,
    views: DashboardViews,
}

impl Dashboard {
    fn new(tables: Arc<NbaTables>, config: &DashboardConfig) -> Result<Self, String> {
        let params = ViewParams::initial(
            &tables,
            config.default_season_range,
            &config.default_player,
            config.leader_min_points,
        )
        .ok_or_else(|| "Error: the games file contains no seasons".to_string())?;
        let views =
            StatsCalculator::compute_views(&tables, &params).map_err(|e| format!("Error: {e}"))?;
        Ok(Self {
            tables,
            params,
            views,
        })
    }

    /// Recompute the views when the parameters changed.
    fn apply(&mut self, next: ViewParams) -> PolarsResult<()> {
        if next == self.params {
            return Ok(());
        }
        self.views = StatsCalculator::compute_views(&self.tables, &next)?;
        self.params = next;
        Ok(())
    }
}

enum DashboardState {
    Loading,
    /// Blocking error: the dashboard is not rendered.
    Failed(String),
    Ready(Dashboard),
}

/// Main application window.
pub struct DashboardApp {
    config: DashboardConfig,
    sources: DataSources,
    cache: DataCache,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
    state: DashboardState,

    // Async dataset loading
    load_rx: Option<Receiver<LoadResult>>,
}

impl DashboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: DashboardConfig) -> Self {
        let sources = DataSources::from_config(&config);
        let mut app = Self {
            config,
            sources: sources.clone(),
            cache: DataCache::new(),
            control_panel: ControlPanel::new(),
            chart_viewer: ChartViewer::new(),
            state: DashboardState::Loading,
            load_rx: None,
        };
        app.start_loading(sources);
        app
    }

    /// Load a dataset, from the cache when possible, otherwise on a
    /// background thread.
    fn start_loading(&mut self, sources: DataSources) {
        self.sources = sources.clone();

        if let Some(tables) = self.cache.get(&sources) {
            info!(games = %sources.games.display(), "dataset cache hit");
            self.activate(tables);
            return;
        }

        self.state = DashboardState::Loading;
        self.control_panel.set_status("Loading CSV files...");

        let (tx, rx) = channel();
        self.load_rx = Some(rx);

        thread::spawn(move || {
            let result = match DataLoader::load(&sources) {
                Ok(tables) => LoadResult::Complete(tables),
                Err(e) => LoadResult::Error(e),
            };
            let _ = tx.send(result);
        });
    }

    fn activate(&mut self, tables: Arc<NbaTables>) {
        match Dashboard::new(tables, &self.config) {
            Ok(dashboard) => {
                self.control_panel.set_status(format!(
                    "Loaded {} games, {} player rows",
                    dashboard.tables.games.height(),
                    dashboard.tables.players.height()
                ));
                self.state = DashboardState::Ready(dashboard);
            }
            Err(message) => {
                error!(%message, "dashboard unavailable");
                self.control_panel.set_status(message.clone());
                self.state = DashboardState::Failed(message);
            }
        }
    }

    /// Check for dataset loading results
    fn check_load_results(&mut self) {
        let Some(rx) = self.load_rx.take() else {
            return;
        };

        match rx.try_recv() {
            Ok(LoadResult::Complete(tables)) => {
                let tables = self.cache.insert(&self.sources, tables);
                self.activate(tables);
            }
            Ok(LoadResult::Error(err)) => {
                error!(error = %err, "failed to load dataset");
                let message = match &err {
                    LoaderError::MissingInput { .. } => {
                        format!("Error: CSV files not found. {err}")
                    }
                    LoaderError::Csv(_) => format!("Error: {err}"),
                };
                self.control_panel.set_status(message.clone());
                self.state = DashboardState::Failed(message);
            }
            Err(std::sync::mpsc::TryRecvError::Empty) => self.load_rx = Some(rx),
            Err(std::sync::mpsc::TryRecvError::Disconnected) => {
                self.state = DashboardState::Failed("Error: loader stopped unexpectedly".into());
            }
        }
    }

    /// Pick another data directory holding the three CSV files.
    fn handle_browse_data_dir(&mut self) {
        if self.load_rx.is_some() {
            return; // Already loading
        }
        if let Some(dir) = rfd::FileDialog::new().pick_folder() {
            self.config.data_dir = dir.clone();
            self.start_loading(DataSources::in_dir(&dir, &self.config));
        }
    }

    fn handle_export_png(&mut self) {
        let DashboardState::Ready(dashboard) = &self.state else {
            return;
        };

        let dir = &self.config.export_dir;
        match ChartExporter::export_all(&dashboard.views, dashboard.params.standings_season, dir)
        {
            Ok(files) => {
                self.control_panel
                    .set_status(format!("Exported {} charts to {}", files.len(), dir.display()));
                if let Err(e) = open::that(dir) {
                    warn!(error = %e, "could not open export directory");
                }
            }
            Err(e) => {
                error!(error = %e, "chart export failed");
                self.control_panel.set_status(format!("Error: {e}"));
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for background results
        self.check_load_results();

        // Request repaint while loading
        if self.load_rx.is_some() {
            ctx.request_repaint();
        }

        // Left panel - Control Panel
        let mut action = ControlPanelAction::None;
        SidePanel::left("control_panel")
            .min_width(280.0)
            .max_width(330.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let data_dir = self.config.data_dir.clone();
                    match &mut self.state {
                        DashboardState::Ready(dashboard) => {
                            let mut next = dashboard.params.clone();
                            action = self.control_panel.show(
                                ui,
                                &data_dir,
                                &dashboard.tables.seasons,
                                Some(&mut next.range),
                            );
                            if let Err(e) = dashboard.apply(next) {
                                self.control_panel.set_status(format!("Error: {e}"));
                            }
                        }
                        _ => {
                            action = self.control_panel.show(ui, &data_dir, &[], None);
                        }
                    }
                });
            });

        match action {
            ControlPanelAction::BrowseDataDir => self.handle_browse_data_dir(),
            ControlPanelAction::ExportPng => self.handle_export_png(),
            ControlPanelAction::None => {}
        }

        // Central panel - Dashboard
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.label(RichText::new("🏀 NBA Evolution Analysis").size(24.0).strong());
            ui.label(
                "Analyzing how the game has changed: Scoring, Home Advantage, Star Power, and Team Rankings.",
            );
            ui.add_space(8.0);

            match &mut self.state {
                DashboardState::Loading => {
                    ui.centered_and_justified(|ui| {
                        ui.spinner();
                    });
                }
                DashboardState::Failed(message) => {
                    egui::Frame::none()
                        .fill(Color32::from_rgb(80, 20, 25))
                        .rounding(5.0)
                        .inner_margin(12.0)
                        .show(ui, |ui| {
                            ui.label(
                                RichText::new(message.as_str())
                                    .size(15.0)
                                    .color(Color32::from_rgb(255, 180, 180)),
                            );
                        });
                }
                DashboardState::Ready(dashboard) => {
                    let mut next = dashboard.params.clone();
                    self.chart_viewer
                        .show(ui, &dashboard.tables, &dashboard.views, &mut next);
                    if let Err(e) = dashboard.apply(next) {
                        self.control_panel.set_status(format!("Error: {e}"));
                    }
                }
            }
        });
    }
}
