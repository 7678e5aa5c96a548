//! Chart Viewer Widget
//! Central tabbed area. Each tab draws one group of views and edits the
//! view parameters it owns (teams, seasons, player).

use crate::charts::ChartPlotter;
use crate::data::NbaTables;
use crate::stats::{DashboardViews, ViewParams};
use egui::{Color32, ComboBox, RichText, ScrollArea};

/// Names shown in the player search list at once.
const MAX_PLAYER_MATCHES: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DashboardTab {
    #[default]
    Trends,
    Conference,
    HeadToHead,
    Players,
    Rankings,
}

impl DashboardTab {
    pub const ALL: [DashboardTab; 5] = [
        DashboardTab::Trends,
        DashboardTab::Conference,
        DashboardTab::HeadToHead,
        DashboardTab::Players,
        DashboardTab::Rankings,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DashboardTab::Trends => "📈 Trends",
            DashboardTab::Conference => "🌍 Conference",
            DashboardTab::HeadToHead => "⚔ Head-to-Head",
            DashboardTab::Players => "👤 Players",
            DashboardTab::Rankings => "🏆 Rankings",
        }
    }
}

/// Tabbed dashboard area.
#[derive(Default)]
pub struct ChartViewer {
    pub tab: DashboardTab,
    player_query: String,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the active tab. Selector changes are written into `params`.
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        tables: &NbaTables,
        views: &DashboardViews,
        params: &mut ViewParams,
    ) {
        ui.horizontal(|ui| {
            for tab in DashboardTab::ALL {
                ui.selectable_value(&mut self.tab, tab, RichText::new(tab.label()).size(15.0));
            }
        });
        ui.separator();

        let tab = self.tab;
        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| match tab {
                DashboardTab::Trends => Self::show_trends(ui, views),
                DashboardTab::Conference => Self::show_conference(ui, views),
                DashboardTab::HeadToHead => Self::show_head_to_head(ui, views, params),
                DashboardTab::Players => self.show_players(ui, tables, views, params),
                DashboardTab::Rankings => Self::show_rankings(ui, tables, views, params),
            });
    }

    fn show_trends(ui: &mut egui::Ui, views: &DashboardViews) {
        ui.columns(2, |cols| {
            cols[0].label(RichText::new("The Scoring Explosion").size(16.0).strong());
            ChartPlotter::draw_season_line(
                &mut cols[0],
                "scoring_trend",
                &views.scoring_trend,
                "Avg Total Points per Game",
                Color32::from_rgb(52, 152, 219),
                None,
            );

            cols[1].label(RichText::new("Home Court Advantage").size(16.0).strong());
            ChartPlotter::draw_home_advantage(&mut cols[1], &views.home_advantage);
        });
    }

    fn show_conference(ui: &mut egui::Ui, views: &DashboardViews) {
        ui.label(RichText::new("East vs. West Dominance").size(16.0).strong());
        ChartPlotter::draw_conference_bars(ui, &views.conference_wins);

        ui.add_space(10.0);
        ui.separator();
        ui.label(
            RichText::new("🔥 Dynasty Heatmap: Consistency over Time")
                .size(16.0)
                .strong(),
        );
        ui.label(
            RichText::new("Team Performance Intensity (Home Wins)")
                .size(12.0)
                .color(Color32::GRAY),
        );
        ui.add_space(5.0);
        ChartPlotter::draw_dynasty_heatmap(ui, &views.dynasty);
    }

    fn show_head_to_head(ui: &mut egui::Ui, views: &DashboardViews, params: &mut ViewParams) {
        ui.label(RichText::new("⚔ Team Comparison Radar").size(16.0).strong());

        let Some(radar) = &views.radar else {
            ui.label(RichText::new("No teams in the selected range").color(Color32::GRAY));
            return;
        };

        let teams: Vec<&str> = views.team_profiles.iter().map(|p| p.team.as_str()).collect();
        ui.horizontal(|ui| {
            Self::name_combo(
                ui,
                "team_a",
                "Select Team A",
                &teams,
                &radar.team_a.team,
                &mut params.team_a,
            );
            ui.add_space(20.0);
            Self::name_combo(
                ui,
                "team_b",
                "Select Team B",
                &teams,
                &radar.team_b.team,
                &mut params.team_b,
            );
        });
        ui.add_space(8.0);
        ChartPlotter::draw_radar(ui, radar);
    }

    fn show_players(
        &mut self,
        ui: &mut egui::Ui,
        tables: &NbaTables,
        views: &DashboardViews,
        params: &mut ViewParams,
    ) {
        ui.label(RichText::new("👤 Player Insights").size(16.0).strong());
        Self::season_combo(
            ui,
            "leaders_season",
            "Select Season for Overview:",
            &tables.seasons,
            &mut params.leaders_season,
        );
        if let Some(season) = params.leaders_season {
            ui.label(RichText::new(format!("Offensive Leaders ({season})")).size(13.0));
        }
        ChartPlotter::draw_leaders_scatter(ui, &views.leaders);

        ui.add_space(10.0);
        ui.separator();
        ui.label(
            RichText::new("🔎 Search Player Career Trajectory")
                .size(16.0)
                .strong(),
        );

        ui.horizontal(|ui| {
            ui.label("Type to Search Player:");
            ui.text_edit_singleline(&mut self.player_query);
        });

        let query = self.player_query.to_lowercase();
        let matches: Vec<&str> = tables
            .player_names
            .iter()
            .map(String::as_str)
            .filter(|name| query.is_empty() || name.to_lowercase().contains(&query))
            .take(MAX_PLAYER_MATCHES)
            .collect();
        let current = params.player.clone().unwrap_or_default();
        Self::name_combo(ui, "player", "Player", &matches, &current, &mut params.player);

        if let Some(player) = &params.player {
            ui.label(RichText::new(format!("Career Trajectory: {player}")).size(13.0));
        }
        ChartPlotter::draw_trajectory(ui, &views.trajectory);
    }

    fn show_rankings(
        ui: &mut egui::Ui,
        tables: &NbaTables,
        views: &DashboardViews,
        params: &mut ViewParams,
    ) {
        ui.label(
            RichText::new("🏆 Team Rankings & Win-Loss Patterns")
                .size(16.0)
                .strong(),
        );
        Self::season_combo(
            ui,
            "standings_season",
            "Select Season for Rankings:",
            &tables.seasons,
            &mut params.standings_season,
        );
        ui.add_space(8.0);

        let season = params
            .standings_season
            .map(|s| s.to_string())
            .unwrap_or_default();
        ui.columns(2, |cols| {
            cols[0].label(
                RichText::new(format!("Regular Season Standings ({season})"))
                    .size(12.0)
                    .color(Color32::GRAY),
            );
            ChartPlotter::draw_standings_table(&mut cols[0], &views.standings);

            cols[1].label(
                RichText::new(format!("Leaderboard: {season}"))
                    .size(12.0)
                    .color(Color32::GRAY),
            );
            ChartPlotter::draw_standings_bars(&mut cols[1], &views.standings);
        });
    }

    fn season_combo(
        ui: &mut egui::Ui,
        id: &str,
        label: &str,
        seasons: &[i32],
        selected: &mut Option<i32>,
    ) {
        ui.horizontal(|ui| {
            ui.label(label);
            let text = selected.map(|s| s.to_string()).unwrap_or_default();
            ComboBox::from_id_salt(id)
                .width(100.0)
                .selected_text(text)
                .show_ui(ui, |ui| {
                    for &season in seasons.iter().rev() {
                        ui.selectable_value(selected, Some(season), season.to_string());
                    }
                });
        });
    }

    fn name_combo(
        ui: &mut egui::Ui,
        id: &str,
        label: &str,
        names: &[&str],
        current: &str,
        selected: &mut Option<String>,
    ) {
        ui.label(label);
        ComboBox::from_id_salt(id)
            .width(220.0)
            .selected_text(current)
            .show_ui(ui, |ui| {
                for name in names {
                    if ui.selectable_label(current == *name, *name).clicked() {
                        *selected = Some(name.to_string());
                    }
                }
            });
    }
}
