//! Chart Plotter Module
//! Creates the interactive dashboard charts using egui_plot.

use crate::stats::{
    ConferenceWins, DynastyMatrix, PlayerAverages, PlayerSeasonLine, RadarComparison,
    SeasonValue, StandingRow, NEUTRAL_HOME_WIN_PCT, RADAR_CATEGORIES, RADAR_MAX,
};
use egui::{Align2, Color32, FontId, RichText, Sense, Stroke};
use egui_plot::{
    Bar, BarChart, HLine, Legend, Line, LineStyle, Plot, PlotPoint, PlotPoints, Points, Polygon,
    Text,
};

pub const EAST_COLOR: Color32 = Color32::from_rgb(0, 81, 180);
pub const WEST_COLOR: Color32 = Color32::from_rgb(201, 8, 42);
pub const NEUTRAL_COLOR: Color32 = Color32::from_rgb(46, 204, 113);

pub const PALETTE: [Color32; 6] = [
    Color32::from_rgb(52, 152, 219), // Blue
    Color32::from_rgb(231, 76, 60),  // Red
    Color32::from_rgb(46, 204, 113), // Green
    Color32::from_rgb(155, 89, 182), // Purple
    Color32::from_rgb(243, 156, 18), // Orange
    Color32::from_rgb(26, 188, 156), // Teal
];

const MAGMA: [(u8, u8, u8); 5] = [
    (0, 0, 4),
    (81, 18, 124),
    (183, 55, 121),
    (252, 137, 97),
    (252, 253, 191),
];
const VIRIDIS: [(u8, u8, u8); 5] = [
    (68, 1, 84),
    (59, 82, 139),
    (33, 145, 140),
    (94, 201, 98),
    (253, 231, 37),
];
const BLUES: [(u8, u8, u8); 5] = [
    (222, 235, 247),
    (158, 202, 225),
    (107, 174, 214),
    (33, 113, 181),
    (8, 48, 107),
];

const CHART_HEIGHT: f32 = 320.0;
const HEATMAP_LABEL_WIDTH: f32 = 170.0;
const HEATMAP_HEADER_HEIGHT: f32 = 24.0;
const HEATMAP_ROW_HEIGHT: f32 = 20.0;

/// Draws the dashboard views.
pub struct ChartPlotter;

impl ChartPlotter {
    pub fn conference_color(conference: &str) -> Color32 {
        match conference {
            "East" => EAST_COLOR,
            "West" => WEST_COLOR,
            _ => Color32::GRAY,
        }
    }

    /// Linear interpolation along a colour ramp; `t` is clamped to 0..=1.
    fn ramp(stops: &[(u8, u8, u8)], t: f64) -> Color32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let scaled = t * (stops.len() - 1) as f64;
        let idx = (scaled.floor() as usize).min(stops.len() - 2);
        let frac = scaled - idx as f64;
        let (a, b) = (stops[idx], stops[idx + 1]);
        let mix = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * frac).round() as u8;
        Color32::from_rgb(mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
    }

    pub fn magma(t: f64) -> Color32 {
        Self::ramp(&MAGMA, t)
    }

    pub fn viridis(t: f64) -> Color32 {
        Self::ramp(&VIRIDIS, t)
    }

    pub fn blues(t: f64) -> Color32 {
        Self::ramp(&BLUES, t)
    }

    /// Cartesian vertices of a radar polygon, first axis pointing up and
    /// the rest clockwise. The first vertex is repeated at the end.
    pub fn radar_polygon(values: &[f64]) -> Vec<[f64; 2]> {
        let n = values.len();
        let mut points: Vec<[f64; 2]> = values
            .iter()
            .enumerate()
            .map(|(i, &r)| {
                let angle = Self::radar_angle(i, n);
                [r * angle.cos(), r * angle.sin()]
            })
            .collect();
        if let Some(&first) = points.first() {
            points.push(first);
        }
        points
    }

    fn radar_angle(index: usize, count: usize) -> f64 {
        std::f64::consts::FRAC_PI_2 - index as f64 * std::f64::consts::TAU / count as f64
    }

    /// Line with markers over seasons, optionally with a dashed reference.
    pub fn draw_season_line(
        ui: &mut egui::Ui,
        id: &str,
        series: &[SeasonValue],
        y_label: &str,
        color: Color32,
        reference: Option<(f64, &str)>,
    ) {
        let points: Vec<[f64; 2]> = series
            .iter()
            .map(|p| [p.season as f64, p.value])
            .collect();

        Plot::new(id)
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .x_axis_label("Season")
            .y_axis_label(y_label)
            .legend(Legend::default())
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(PlotPoints::from(points.clone()))
                        .color(color)
                        .width(2.0)
                        .name(y_label),
                );
                plot_ui.points(Points::new(PlotPoints::from(points)).radius(4.0).color(color));

                if let Some((y, label)) = reference {
                    plot_ui.hline(
                        HLine::new(y)
                            .color(NEUTRAL_COLOR)
                            .style(LineStyle::dashed_loose())
                            .name(label),
                    );
                }
            });
    }

    /// Home-advantage trend with the 50% neutral line.
    pub fn draw_home_advantage(ui: &mut egui::Ui, series: &[SeasonValue]) {
        Self::draw_season_line(
            ui,
            "home_advantage",
            series,
            "Home Win %",
            PALETTE[1],
            Some((NEUTRAL_HOME_WIN_PCT, "Neutral")),
        );
    }

    /// Grouped bars of home wins per season, one colour per conference.
    pub fn draw_conference_bars(ui: &mut egui::Ui, wins: &[ConferenceWins]) {
        let bars_for = |conference: &str, offset: f64| -> BarChart {
            let color = Self::conference_color(conference);
            let bars: Vec<Bar> = wins
                .iter()
                .filter(|w| w.conference == conference)
                .map(|w| {
                    Bar::new(w.season as f64 + offset, w.wins as f64)
                        .width(0.4)
                        .fill(color)
                        .name(format!("{} {}", conference, w.season))
                })
                .collect();
            BarChart::new(bars).color(color).name(conference)
        };

        Plot::new("conference_wins")
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .x_axis_label("Season")
            .y_axis_label("Home Wins")
            .legend(Legend::default())
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(bars_for("East", -0.2));
                plot_ui.bar_chart(bars_for("West", 0.2));
            });
    }

    /// Team-by-season intensity map of home wins. Empty cells stay blank.
    pub fn draw_dynasty_heatmap(ui: &mut egui::Ui, matrix: &DynastyMatrix) {
        if matrix.is_empty() {
            ui.label(RichText::new("No games in the selected range").color(Color32::GRAY));
            return;
        }

        let max = matrix.max_value().unwrap_or(0.0).max(1.0);
        let columns = matrix.seasons.len() as f32;
        let width = ui.available_width().max(HEATMAP_LABEL_WIDTH + columns * 12.0);
        let cell_w = (width - HEATMAP_LABEL_WIDTH) / columns;
        let height = HEATMAP_HEADER_HEIGHT + matrix.teams.len() as f32 * HEATMAP_ROW_HEIGHT;

        let (rect, response) = ui.allocate_exact_size(egui::vec2(width, height), Sense::hover());
        let painter = ui.painter_at(rect);
        let text_color = ui.visuals().text_color();
        let font = FontId::proportional(11.0);

        for (col, season) in matrix.seasons.iter().enumerate() {
            let x = rect.left() + HEATMAP_LABEL_WIDTH + (col as f32 + 0.5) * cell_w;
            painter.text(
                egui::pos2(x, rect.top() + HEATMAP_HEADER_HEIGHT / 2.0),
                Align2::CENTER_CENTER,
                season.to_string(),
                font.clone(),
                text_color,
            );
        }

        let cell_rect = |row: usize, col: usize| {
            egui::Rect::from_min_size(
                egui::pos2(
                    rect.left() + HEATMAP_LABEL_WIDTH + col as f32 * cell_w,
                    rect.top() + HEATMAP_HEADER_HEIGHT + row as f32 * HEATMAP_ROW_HEIGHT,
                ),
                egui::vec2(cell_w, HEATMAP_ROW_HEIGHT),
            )
        };

        for (row, team) in matrix.teams.iter().enumerate() {
            let y = rect.top() + HEATMAP_HEADER_HEIGHT + (row as f32 + 0.5) * HEATMAP_ROW_HEIGHT;
            painter.text(
                egui::pos2(rect.left() + HEATMAP_LABEL_WIDTH - 6.0, y),
                Align2::RIGHT_CENTER,
                team,
                font.clone(),
                text_color,
            );
            for (col, cell) in matrix.cells[row].iter().enumerate() {
                if let Some(value) = cell {
                    painter.rect_filled(cell_rect(row, col).shrink(0.5), 0.0, Self::magma(value / max));
                }
            }
        }

        if let Some(pos) = response.hover_pos() {
            let col = ((pos.x - rect.left() - HEATMAP_LABEL_WIDTH) / cell_w).floor();
            let row = ((pos.y - rect.top() - HEATMAP_HEADER_HEIGHT) / HEATMAP_ROW_HEIGHT).floor();
            if col >= 0.0 && row >= 0.0 {
                let (row, col) = (row as usize, col as usize);
                if let (Some(team), Some(season)) = (matrix.teams.get(row), matrix.seasons.get(col)) {
                    let value = matrix.cells[row][col]
                        .map(|v| format!("{v:.0}"))
                        .unwrap_or_else(|| "-".to_string());
                    response.on_hover_text_at_pointer(format!(
                        "Team: {team}\nSeason: {season}\nHome Wins: {value}"
                    ));
                }
            }
        }
    }

    /// Radar of two team profiles on a fixed 0..120 radial axis.
    pub fn draw_radar(ui: &mut egui::Ui, comparison: &RadarComparison) {
        let n = RADAR_CATEGORIES.len();
        let teams = [
            (&comparison.team_a, PALETTE[0]),
            (&comparison.team_b, PALETTE[1]),
        ];

        Plot::new("team_radar")
            .height(420.0)
            .data_aspect(1.0)
            .show_axes(false)
            .show_grid(false)
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .include_x(-RADAR_MAX * 1.25)
            .include_x(RADAR_MAX * 1.25)
            .include_y(-RADAR_MAX * 1.15)
            .include_y(RADAR_MAX * 1.15)
            .legend(Legend::default())
            .show(ui, |plot_ui| {
                let grid = Color32::from_gray(90);
                for ring in (1..=6).map(|k| k as f64 * RADAR_MAX / 6.0) {
                    let circle = Self::radar_polygon(&vec![ring; n]);
                    plot_ui.line(Line::new(PlotPoints::from(circle)).color(grid).width(0.5));
                }
                for (i, category) in RADAR_CATEGORIES.iter().enumerate() {
                    let angle = Self::radar_angle(i, n);
                    let (dx, dy) = (angle.cos(), angle.sin());
                    plot_ui.line(
                        Line::new(PlotPoints::from(vec![[0.0, 0.0], [RADAR_MAX * dx, RADAR_MAX * dy]]))
                            .color(grid)
                            .width(0.5),
                    );
                    plot_ui.text(Text::new(
                        PlotPoint::new(RADAR_MAX * 1.12 * dx, RADAR_MAX * 1.12 * dy),
                        RichText::new(*category).size(13.0),
                    ));
                }

                for (profile, color) in teams {
                    let polygon = Self::radar_polygon(&profile.radar_values());
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::from(polygon))
                            .fill_color(color.gamma_multiply(0.3))
                            .stroke(Stroke::new(2.0, color))
                            .name(&profile.team),
                    );
                }
            });
    }

    /// Scoring leaders: x = points, y = rebounds, size = points, colour = assists.
    pub fn draw_leaders_scatter(ui: &mut egui::Ui, leaders: &[PlayerAverages]) {
        let (ast_min, ast_max) = leaders.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |acc, p| {
            (acc.0.min(p.ast), acc.1.max(p.ast))
        });
        let span = (ast_max - ast_min).max(f64::EPSILON);

        Plot::new("season_leaders")
            .height(380.0)
            .allow_scroll(false)
            .x_axis_label("Points")
            .y_axis_label("Rebounds")
            .show(ui, |plot_ui| {
                for player in leaders {
                    let color = Self::viridis((player.ast - ast_min) / span);
                    plot_ui.points(
                        Points::new(PlotPoints::from(vec![[player.pts, player.reb]]))
                            .radius((2.0 + player.pts / 4.0) as f32)
                            .color(color.gamma_multiply(0.8))
                            .name(format!("{} (AST {:.1})", player.player, player.ast)),
                    );
                }
            });
    }

    /// Points, rebounds and assists of one player by season.
    pub fn draw_trajectory(ui: &mut egui::Ui, lines: &[PlayerSeasonLine]) {
        let series: [(&str, fn(&PlayerSeasonLine) -> f64, Color32); 3] = [
            ("PTS", |l| l.pts, PALETTE[0]),
            ("REB", |l| l.reb, PALETTE[1]),
            ("AST", |l| l.ast, PALETTE[2]),
        ];

        Plot::new("player_trajectory")
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .x_axis_label("Season")
            .legend(Legend::default())
            .show(ui, |plot_ui| {
                for (name, value, color) in series {
                    let points: Vec<[f64; 2]> =
                        lines.iter().map(|l| [l.season as f64, value(l)]).collect();
                    plot_ui.line(
                        Line::new(PlotPoints::from(points.clone()))
                            .color(color)
                            .width(2.0)
                            .name(name),
                    );
                    plot_ui.points(
                        Points::new(PlotPoints::from(points))
                            .radius(3.5)
                            .color(color)
                            .name(name),
                    );
                }
            });
    }

    /// Standings table with the best value of each numeric column highlighted.
    pub fn draw_standings_table(ui: &mut egui::Ui, rows: &[StandingRow]) {
        let highlight = Color32::from_rgb(0, 100, 0);
        let max_wins = rows.iter().map(|r| r.wins).max();
        let max_losses = rows.iter().map(|r| r.losses).max();
        let max_pct = rows.iter().map(|r| r.win_pct).fold(f64::NEG_INFINITY, f64::max);

        let cell = |ui: &mut egui::Ui, text: String, best: bool| {
            let label = RichText::new(text).size(12.0);
            if best {
                ui.label(label.background_color(highlight).color(Color32::WHITE));
            } else {
                ui.label(label);
            }
        };

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new("standings_table")
                    .striped(true)
                    .min_col_width(45.0)
                    .spacing([10.0, 4.0])
                    .show(ui, |ui| {
                        for header in ["#", "Team", "Wins", "Losses", "Win %"] {
                            ui.label(RichText::new(header).strong().size(12.0));
                        }
                        ui.end_row();

                        for (i, row) in rows.iter().enumerate() {
                            ui.label(RichText::new((i + 1).to_string()).size(12.0));
                            ui.label(RichText::new(&row.team).size(12.0));
                            cell(ui, row.wins.to_string(), Some(row.wins) == max_wins);
                            cell(ui, row.losses.to_string(), Some(row.losses) == max_losses);
                            cell(ui, format!("{:.1}", row.win_pct), row.win_pct == max_pct);
                            ui.end_row();
                        }
                    });
            });
    }

    /// Horizontal wins leaderboard, best team on top, coloured by win %.
    pub fn draw_standings_bars(ui: &mut egui::Ui, rows: &[StandingRow]) {
        let n = rows.len();
        let names: Vec<String> = rows.iter().rev().map(|r| r.team.clone()).collect();
        let bars: Vec<Bar> = rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                Bar::new((n - 1 - i) as f64, row.wins as f64)
                    .width(0.7)
                    .fill(Self::blues(row.win_pct / 100.0))
                    .name(format!("{} ({:.1}%)", row.team, row.win_pct))
            })
            .collect();

        Plot::new("standings_bars")
            .height((n as f32 * 22.0).max(CHART_HEIGHT))
            .allow_scroll(false)
            .allow_zoom(false)
            .allow_drag(false)
            .x_axis_label("Wins")
            .y_axis_formatter(move |mark, _range| {
                let idx = mark.value.round();
                if (mark.value - idx).abs() < 1e-6 && idx >= 0.0 {
                    names.get(idx as usize).cloned().unwrap_or_default()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).horizontal().name("Wins"));
            });
    }
}
