//! Static Chart Exporter
//! Renders the current trend and standings views to PNG files with Plotters.

use crate::stats::{DashboardViews, SeasonValue, StandingRow, NEUTRAL_HOME_WIN_PCT};
use plotters::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

const WIDTH: u32 = 1400;
const HEIGHT: u32 = 800;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to create export directory: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to draw chart: {0}")]
    Drawing(String),
}

fn drawing<E: std::fmt::Display>(err: E) -> ExportError {
    ExportError::Drawing(err.to_string())
}

/// Writes PNG snapshots of the dashboard views.
pub struct ChartExporter;

impl ChartExporter {
    /// Export every non-empty view; returns the written files.
    pub fn export_all(
        views: &DashboardViews,
        standings_season: Option<i32>,
        dir: &Path,
    ) -> Result<Vec<PathBuf>, ExportError> {
        let mut written = Vec::new();

        if !views.scoring_trend.is_empty() {
            std::fs::create_dir_all(dir)?;
            let path = dir.join("scoring_trend.png");
            Self::render_season_line(
                &path,
                "Avg Total Points per Game",
                "Total Points",
                &views.scoring_trend,
                None,
            )?;
            written.push(path);
        }

        if !views.home_advantage.is_empty() {
            std::fs::create_dir_all(dir)?;
            let path = dir.join("home_advantage.png");
            Self::render_season_line(
                &path,
                "Home Win %",
                "Win %",
                &views.home_advantage,
                Some(NEUTRAL_HOME_WIN_PCT),
            )?;
            written.push(path);
        }

        if let (false, Some(season)) = (views.standings.is_empty(), standings_season) {
            std::fs::create_dir_all(dir)?;
            let path = dir.join(format!("standings_{season}.png"));
            Self::render_standings(&path, season, &views.standings)?;
            written.push(path);
        }

        info!(files = written.len(), dir = %dir.display(), "charts exported");
        Ok(written)
    }

    fn render_season_line(
        path: &Path,
        title: &str,
        y_desc: &str,
        series: &[SeasonValue],
        reference: Option<f64>,
    ) -> Result<(), ExportError> {
        let first = series.first().map_or(0, |p| p.season);
        let last = series.last().map_or(0, |p| p.season);
        let values = series.iter().map(|p| p.value).filter(|v| v.is_finite());
        let (lo, hi) = values
            .chain(reference)
            .fold((f64::INFINITY, f64::NEG_INFINITY), |acc, v| (acc.0.min(v), acc.1.max(v)));
        let (lo, hi) = if lo.is_finite() { (lo, hi) } else { (0.0, 1.0) };
        let pad = ((hi - lo) * 0.1).max(1.0);

        let root = BitMapBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
        root.fill(&WHITE).map_err(drawing)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 30))
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(70)
            .build_cartesian_2d(first..last + 1, (lo - pad)..(hi + pad))
            .map_err(drawing)?;
        chart
            .configure_mesh()
            .x_desc("Season")
            .y_desc(y_desc)
            .draw()
            .map_err(drawing)?;

        let points: Vec<(i32, f64)> = series.iter().map(|p| (p.season, p.value)).collect();
        chart
            .draw_series(LineSeries::new(points.clone(), BLUE.stroke_width(3)))
            .map_err(drawing)?;
        chart
            .draw_series(points.into_iter().map(|p| Circle::new(p, 5, BLUE.filled())))
            .map_err(drawing)?;

        if let Some(y) = reference {
            chart
                .draw_series(DashedLineSeries::new(
                    vec![(first, y), (last + 1, y)],
                    10,
                    6,
                    GREEN.stroke_width(2),
                ))
                .map_err(drawing)?
                .label("Neutral")
                .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], GREEN));
            chart
                .configure_series_labels()
                .border_style(BLACK)
                .draw()
                .map_err(drawing)?;
        }

        root.present().map_err(drawing)?;
        Ok(())
    }

    fn render_standings(path: &Path, season: i32, rows: &[StandingRow]) -> Result<(), ExportError> {
        let n = rows.len();
        let max_wins = rows.iter().map(|r| r.wins).max().unwrap_or(0) as f64;
        let names: Vec<String> = rows.iter().rev().map(|r| r.team.clone()).collect();

        let root = BitMapBackend::new(path, (WIDTH, HEIGHT.max(n as u32 * 26 + 120)))
            .into_drawing_area();
        root.fill(&WHITE).map_err(drawing)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(format!("Leaderboard: {season}"), ("sans-serif", 30))
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(220)
            .build_cartesian_2d(0.0..(max_wins * 1.05).max(1.0), 0.0..n as f64)
            .map_err(drawing)?;
        chart
            .configure_mesh()
            .disable_y_mesh()
            .y_labels(n * 2 + 1)
            .y_label_formatter(&|y| {
                let centre = y - 0.5;
                if (centre - centre.round()).abs() < 1e-6 && centre >= 0.0 {
                    names.get(centre.round() as usize).cloned().unwrap_or_default()
                } else {
                    String::new()
                }
            })
            .x_desc("Wins")
            .draw()
            .map_err(drawing)?;

        chart
            .draw_series(rows.iter().enumerate().map(|(i, row)| {
                let y = (n - 1 - i) as f64;
                let shade = (255.0 * (1.0 - row.win_pct / 100.0)) as u8;
                Rectangle::new(
                    [(0.0, y + 0.15), (row.wins as f64, y + 0.85)],
                    RGBColor(shade / 2, shade / 2 + 60, 200).filled(),
                )
            }))
            .map_err(drawing)?;

        root.present().map_err(drawing)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_views_write_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("exports");

        let written = ChartExporter::export_all(&DashboardViews::default(), None, &target).unwrap();
        assert!(written.is_empty());
        assert!(!target.exists());
    }
}
