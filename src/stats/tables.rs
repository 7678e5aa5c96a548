//! Typed view tables handed from the aggregation pipeline to the charts.

use crate::data::{NbaTables, SeasonRange};
use std::collections::{BTreeMap, BTreeSet};

/// Radar axis labels, in drawing order.
pub const RADAR_CATEGORIES: [&str; 5] = ["Points", "Assists", "Rebounds", "FG %", "3P %"];
/// Fixed radial range of the radar chart.
pub const RADAR_MAX: f64 = 120.0;
/// Home win percentage at which there is no home advantage.
pub const NEUTRAL_HOME_WIN_PCT: f64 = 50.0;

/// One value per season.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeasonValue {
    pub season: i32,
    pub value: f64,
}

/// Home wins of one conference in one season.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConferenceWins {
    pub season: i32,
    pub conference: String,
    pub wins: u32,
}

/// Home wins per team (rows) and season (columns). Combinations without
/// any home game are `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DynastyMatrix {
    pub teams: Vec<String>,
    pub seasons: Vec<i32>,
    pub cells: Vec<Vec<Option<f64>>>,
}

impl DynastyMatrix {
    /// Pivot (team, season, home wins) triples into the matrix.
    pub fn from_long(entries: impl IntoIterator<Item = (String, i32, f64)>) -> Self {
        let values: BTreeMap<(String, i32), f64> = entries
            .into_iter()
            .map(|(team, season, wins)| ((team, season), wins))
            .collect();

        let teams: Vec<String> = values
            .keys()
            .map(|(team, _)| team.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let seasons: Vec<i32> = values
            .keys()
            .map(|(_, season)| *season)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let cells = teams
            .iter()
            .map(|team| {
                seasons
                    .iter()
                    .map(|season| values.get(&(team.clone(), *season)).copied())
                    .collect()
            })
            .collect();

        Self {
            teams,
            seasons,
            cells,
        }
    }

    pub fn get(&self, team: &str, season: i32) -> Option<f64> {
        let row = self.teams.iter().position(|t| t == team)?;
        let column = self.seasons.iter().position(|s| *s == season)?;
        self.cells[row][column]
    }

    /// Largest cell value, used to scale the colour map.
    pub fn max_value(&self) -> Option<f64> {
        self.cells
            .iter()
            .flatten()
            .flatten()
            .copied()
            .fold(None, |acc, v| Some(acc.map_or(v, |m: f64| m.max(v))))
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }
}

/// Per-game averages of one team over home and away games.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamProfile {
    pub team: String,
    pub pts: f64,
    pub ast: f64,
    pub reb: f64,
    pub fg_pct: f64,
    pub fg3_pct: f64,
}

impl TeamProfile {
    /// Values on the radar axes; shooting percentages scaled to 0..100.
    pub fn radar_values(&self) -> [f64; 5] {
        [
            self.pts,
            self.ast,
            self.reb,
            self.fg_pct * 100.0,
            self.fg3_pct * 100.0,
        ]
    }
}

/// Two teams compared on the radar chart.
#[derive(Debug, Clone, PartialEq)]
pub struct RadarComparison {
    pub team_a: TeamProfile,
    pub team_b: TeamProfile,
}

impl RadarComparison {
    /// Pick the requested teams, defaulting to the first and second profile.
    pub fn select(
        profiles: &[TeamProfile],
        team_a: Option<&str>,
        team_b: Option<&str>,
    ) -> Option<Self> {
        let find = |name: Option<&str>, default_idx: usize| {
            name.and_then(|n| profiles.iter().find(|p| p.team == n))
                .or_else(|| profiles.get(default_idx))
                .or_else(|| profiles.first())
                .cloned()
        };
        Some(Self {
            team_a: find(team_a, 0)?,
            team_b: find(team_b, 1)?,
        })
    }
}

/// Season averages of one player.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerAverages {
    pub player: String,
    pub pts: f64,
    pub reb: f64,
    pub ast: f64,
}

/// One point of a player's career trajectory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerSeasonLine {
    pub season: i32,
    pub pts: f64,
    pub reb: f64,
    pub ast: f64,
}

/// A team's regular season record.
#[derive(Debug, Clone, PartialEq)]
pub struct StandingRow {
    pub team: String,
    pub wins: u32,
    pub losses: u32,
    pub games_played: u32,
    /// Wins / games played × 100, one decimal.
    pub win_pct: f64,
}

impl StandingRow {
    pub fn new(team: String, wins: u32, games_played: u32) -> Self {
        let win_pct = if games_played == 0 {
            0.0
        } else {
            round_to_tenth(wins as f64 / games_played as f64 * 100.0)
        };
        Self {
            team,
            wins,
            losses: games_played.saturating_sub(wins),
            games_played,
            win_pct,
        }
    }
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Everything the views depend on, passed explicitly on each interaction.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewParams {
    pub range: SeasonRange,
    /// Radar teams; `None` selects the default pair.
    pub team_a: Option<String>,
    pub team_b: Option<String>,
    pub leaders_season: Option<i32>,
    pub leader_min_points: f64,
    pub player: Option<String>,
    pub standings_season: Option<i32>,
}

impl ViewParams {
    /// Initial selections for freshly loaded tables.
    pub fn initial(
        tables: &NbaTables,
        preferred_range: (i32, i32),
        preferred_player: &str,
        leader_min_points: f64,
    ) -> Option<Self> {
        let range = SeasonRange::clamped(preferred_range, &tables.seasons)?;
        let player = tables
            .player_names
            .iter()
            .find(|name| *name == preferred_player)
            .or_else(|| tables.player_names.first())
            .cloned();

        Some(Self {
            range,
            team_a: None,
            team_b: None,
            leaders_season: tables.latest_season(),
            leader_min_points,
            player,
            standings_season: tables.latest_season(),
        })
    }
}

/// Derived tables for all five tabs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardViews {
    pub scoring_trend: Vec<SeasonValue>,
    pub home_advantage: Vec<SeasonValue>,
    pub conference_wins: Vec<ConferenceWins>,
    pub dynasty: DynastyMatrix,
    pub team_profiles: Vec<TeamProfile>,
    pub radar: Option<RadarComparison>,
    pub leaders: Vec<PlayerAverages>,
    pub trajectory: Vec<PlayerSeasonLine>,
    pub standings: Vec<StandingRow>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(team: &str) -> TeamProfile {
        TeamProfile {
            team: team.to_string(),
            pts: 100.0,
            ast: 20.0,
            reb: 40.0,
            fg_pct: 0.456,
            fg3_pct: 0.35,
        }
    }

    #[test]
    fn dynasty_matrix_leaves_missing_cells_empty() {
        let matrix = DynastyMatrix::from_long([
            ("Lakers".to_string(), 2016, 1.0),
            ("Hawks".to_string(), 2015, 2.0),
            ("Hawks".to_string(), 2016, 0.0),
        ]);

        assert_eq!(matrix.teams, vec!["Hawks", "Lakers"]);
        assert_eq!(matrix.seasons, vec![2015, 2016]);
        assert_eq!(matrix.get("Hawks", 2015), Some(2.0));
        assert_eq!(matrix.get("Hawks", 2016), Some(0.0));
        assert_eq!(matrix.get("Lakers", 2015), None);
        assert_eq!(matrix.max_value(), Some(2.0));
    }

    #[test]
    fn radar_scales_percentages() {
        let values = profile("Hawks").radar_values();
        assert_eq!(values[0], 100.0);
        assert!((values[3] - 45.6).abs() < 1e-9);
        assert!((values[4] - 35.0).abs() < 1e-9);
    }

    #[test]
    fn radar_defaults_to_first_two_teams() {
        let profiles = vec![profile("Celtics"), profile("Hawks"), profile("Lakers")];

        let default = RadarComparison::select(&profiles, None, None).unwrap();
        assert_eq!(default.team_a.team, "Celtics");
        assert_eq!(default.team_b.team, "Hawks");

        let chosen = RadarComparison::select(&profiles, Some("Lakers"), Some("Gone")).unwrap();
        assert_eq!(chosen.team_a.team, "Lakers");
        assert_eq!(chosen.team_b.team, "Hawks");

        assert!(RadarComparison::select(&[], None, None).is_none());
    }

    #[test]
    fn standing_row_reconciles_and_rounds() {
        let row = StandingRow::new("Hawks".to_string(), 2, 3);
        assert_eq!(row.wins + row.losses, row.games_played);
        assert_eq!(row.win_pct, 66.7);

        let winless = StandingRow::new("Expansion".to_string(), 0, 1);
        assert_eq!(winless.losses, 1);
        assert_eq!(winless.win_pct, 0.0);
    }
}
