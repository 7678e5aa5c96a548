//! Statistics Calculator Module
//! Group-by aggregations behind each dashboard view. Every function is a
//! pure function of the tables it is given.

use crate::data::schema::*;
use crate::data::{DataProcessor, NbaTables};
use crate::stats::tables::*;
use polars::prelude::*;
use tracing::debug;

const WIN_PERCENTAGE: &str = "WIN_PERCENTAGE";
const WINS: &str = "WINS";
const GAMES_PLAYED: &str = "GAMES_PLAYED";

/// Computes the derived tables of the dashboard.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Evaluate every view for one set of parameters.
    pub fn compute_views(tables: &NbaTables, params: &ViewParams) -> PolarsResult<DashboardViews> {
        let filtered = DataProcessor::filter_seasons(&tables.games, params.range)?;
        debug!(
            start = params.range.start,
            end = params.range.end,
            games = filtered.height(),
            "recomputing views"
        );

        let team_profiles = Self::team_profiles(&filtered)?;
        let radar = RadarComparison::select(
            &team_profiles,
            params.team_a.as_deref(),
            params.team_b.as_deref(),
        );

        let leaders = match params.leaders_season {
            Some(season) => {
                Self::season_leaders(&tables.players, season, params.leader_min_points)?
            }
            None => Vec::new(),
        };
        let trajectory = match &params.player {
            Some(player) => Self::player_trajectory(&tables.players, player)?,
            None => Vec::new(),
        };
        let standings = match params.standings_season {
            Some(season) => Self::season_standings(&tables.games, season)?,
            None => Vec::new(),
        };

        Ok(DashboardViews {
            scoring_trend: Self::scoring_trend(&filtered)?,
            home_advantage: Self::home_advantage_trend(&filtered)?,
            conference_wins: Self::conference_wins(&filtered)?,
            dynasty: Self::dynasty_matrix(&filtered)?,
            team_profiles,
            radar,
            leaders,
            trajectory,
            standings,
        })
    }

    /// Mean total points per game by season.
    pub fn scoring_trend(games: &DataFrame) -> PolarsResult<Vec<SeasonValue>> {
        let df = games
            .clone()
            .lazy()
            .group_by([col(SEASON)])
            .agg([col(TOTAL_POINTS).mean()])
            .collect()?;
        Self::season_series(&df, TOTAL_POINTS)
    }

    /// Home win percentage by season.
    pub fn home_advantage_trend(games: &DataFrame) -> PolarsResult<Vec<SeasonValue>> {
        let df = games
            .clone()
            .lazy()
            .group_by([col(SEASON)])
            .agg([(col(IS_HOME_WIN).cast(DataType::Float64).mean() * lit(100.0))
                .alias(WIN_PERCENTAGE)])
            .collect()?;
        Self::season_series(&df, WIN_PERCENTAGE)
    }

    /// Home wins counted per season and conference of the home team.
    /// Games of unmapped teams are not counted.
    pub fn conference_wins(games: &DataFrame) -> PolarsResult<Vec<ConferenceWins>> {
        let df = games
            .clone()
            .lazy()
            .filter(
                col(PTS_HOME)
                    .gt(col(PTS_AWAY))
                    .and(col(CONFERENCE).is_not_null()),
            )
            .group_by([col(SEASON), col(CONFERENCE)])
            .agg([len().alias(WINS)])
            .collect()?;

        let seasons = DataProcessor::i32_values(&df, SEASON)?;
        let conferences = DataProcessor::string_values(&df, CONFERENCE)?;
        let wins = DataProcessor::i64_values(&df, WINS)?;

        let mut rows: Vec<ConferenceWins> = seasons
            .into_iter()
            .zip(conferences)
            .zip(wins)
            .filter_map(|((season, conference), wins)| {
                Some(ConferenceWins {
                    season: season?,
                    conference: conference?,
                    wins: wins? as u32,
                })
            })
            .collect();
        rows.sort_by(|a, b| (a.season, &a.conference).cmp(&(b.season, &b.conference)));
        Ok(rows)
    }

    /// Home wins per (team, season) as a team-by-season matrix.
    pub fn dynasty_matrix(games: &DataFrame) -> PolarsResult<DynastyMatrix> {
        let df = games
            .clone()
            .lazy()
            .group_by([col(SEASON), col(HOME_TEAM_NAME)])
            .agg([col(IS_HOME_WIN).sum()])
            .collect()?;

        let seasons = DataProcessor::i32_values(&df, SEASON)?;
        let teams = DataProcessor::string_values(&df, HOME_TEAM_NAME)?;
        let wins = DataProcessor::f64_values(&df, IS_HOME_WIN)?;

        Ok(DynastyMatrix::from_long(
            teams
                .into_iter()
                .zip(seasons)
                .zip(wins)
                .filter_map(|((team, season), wins)| Some((team?, season?, wins?))),
        ))
    }

    /// Per-team averages over the union of home and away rows.
    pub fn team_profiles(games: &DataFrame) -> PolarsResult<Vec<TeamProfile>> {
        let perspective = |team: &str, pts: &str, ast: &str, reb: &str, fg: &str, fg3: &str| {
            games.clone().lazy().select([
                col(team).alias(TEAM),
                col(pts).alias(PTS),
                col(ast).alias(AST),
                col(reb).alias(REB),
                col(fg).alias(FG_PCT),
                col(fg3).alias(FG3_PCT),
            ])
        };
        let home = perspective(
            HOME_TEAM_NAME,
            PTS_HOME,
            AST_HOME,
            REB_HOME,
            FG_PCT_HOME,
            FG3_PCT_HOME,
        );
        let away = perspective(
            AWAY_TEAM_NAME,
            PTS_AWAY,
            AST_AWAY,
            REB_AWAY,
            FG_PCT_AWAY,
            FG3_PCT_AWAY,
        );

        let df = concat([home, away], UnionArgs::default())?
            .filter(col(TEAM).is_not_null())
            .group_by([col(TEAM)])
            .agg([
                col(PTS).mean(),
                col(AST).mean(),
                col(REB).mean(),
                col(FG_PCT).mean(),
                col(FG3_PCT).mean(),
            ])
            .collect()?;

        let teams = DataProcessor::string_values(&df, TEAM)?;
        let pts = DataProcessor::f64_values(&df, PTS)?;
        let ast = DataProcessor::f64_values(&df, AST)?;
        let reb = DataProcessor::f64_values(&df, REB)?;
        let fg = DataProcessor::f64_values(&df, FG_PCT)?;
        let fg3 = DataProcessor::f64_values(&df, FG3_PCT)?;

        let mut profiles: Vec<TeamProfile> = (0..df.height())
            .filter_map(|i| {
                Some(TeamProfile {
                    team: teams[i].clone()?,
                    pts: pts[i].unwrap_or(f64::NAN),
                    ast: ast[i].unwrap_or(f64::NAN),
                    reb: reb[i].unwrap_or(f64::NAN),
                    fg_pct: fg[i].unwrap_or(f64::NAN),
                    fg3_pct: fg3[i].unwrap_or(f64::NAN),
                })
            })
            .collect();
        profiles.sort_by(|a, b| a.team.cmp(&b.team));
        Ok(profiles)
    }

    /// Players of one season whose mean scoring exceeds `min_points`,
    /// best scorers first.
    pub fn season_leaders(
        players: &DataFrame,
        season: i32,
        min_points: f64,
    ) -> PolarsResult<Vec<PlayerAverages>> {
        let df = players
            .clone()
            .lazy()
            .filter(col(SEASON).eq(lit(season)))
            .group_by([col(PLAYER_NAME)])
            .agg([col(PTS).mean(), col(REB).mean(), col(AST).mean()])
            .filter(col(PTS).gt(lit(min_points)))
            .collect()?;

        let names = DataProcessor::string_values(&df, PLAYER_NAME)?;
        let pts = DataProcessor::f64_values(&df, PTS)?;
        let reb = DataProcessor::f64_values(&df, REB)?;
        let ast = DataProcessor::f64_values(&df, AST)?;

        let mut leaders: Vec<PlayerAverages> = (0..df.height())
            .filter_map(|i| {
                Some(PlayerAverages {
                    player: names[i].clone()?,
                    pts: pts[i]?,
                    reb: reb[i].unwrap_or(f64::NAN),
                    ast: ast[i].unwrap_or(f64::NAN),
                })
            })
            .collect();
        leaders.sort_by(|a, b| b.pts.total_cmp(&a.pts).then_with(|| a.player.cmp(&b.player)));
        Ok(leaders)
    }

    /// Season-by-season averages of one player, in season order.
    pub fn player_trajectory(
        players: &DataFrame,
        player: &str,
    ) -> PolarsResult<Vec<PlayerSeasonLine>> {
        let df = players
            .clone()
            .lazy()
            .filter(col(PLAYER_NAME).eq(lit(player)))
            .group_by([col(SEASON)])
            .agg([col(PTS).mean(), col(REB).mean(), col(AST).mean()])
            .collect()?;

        let seasons = DataProcessor::i32_values(&df, SEASON)?;
        let pts = DataProcessor::f64_values(&df, PTS)?;
        let reb = DataProcessor::f64_values(&df, REB)?;
        let ast = DataProcessor::f64_values(&df, AST)?;

        let mut lines: Vec<PlayerSeasonLine> = (0..df.height())
            .filter_map(|i| {
                Some(PlayerSeasonLine {
                    season: seasons[i]?,
                    pts: pts[i].unwrap_or(f64::NAN),
                    reb: reb[i].unwrap_or(f64::NAN),
                    ast: ast[i].unwrap_or(f64::NAN),
                })
            })
            .collect();
        lines.sort_by_key(|line| line.season);
        Ok(lines)
    }

    /// Win/loss record of every team in one season, most wins first.
    ///
    /// Each game contributes one appearance to both teams and a win to the
    /// side that scored more. A tie is a loss for both.
    pub fn season_standings(games: &DataFrame, season: i32) -> PolarsResult<Vec<StandingRow>> {
        let season_games = games.clone().lazy().filter(col(SEASON).eq(lit(season)));
        let side = |team: &str, scored: &str, conceded: &str| {
            season_games.clone().select([
                col(team).alias(TEAM),
                col(scored)
                    .gt(col(conceded))
                    .fill_null(lit(false))
                    .cast(DataType::Int64)
                    .alias(WINS),
            ])
        };
        let home = side(HOME_TEAM_NAME, PTS_HOME, PTS_AWAY);
        let away = side(AWAY_TEAM_NAME, PTS_AWAY, PTS_HOME);

        let df = concat([home, away], UnionArgs::default())?
            .filter(col(TEAM).is_not_null())
            .group_by([col(TEAM)])
            .agg([col(WINS).sum(), len().alias(GAMES_PLAYED)])
            .collect()?;

        let teams = DataProcessor::string_values(&df, TEAM)?;
        let wins = DataProcessor::i64_values(&df, WINS)?;
        let played = DataProcessor::i64_values(&df, GAMES_PLAYED)?;

        let mut standings: Vec<StandingRow> = teams
            .into_iter()
            .zip(wins)
            .zip(played)
            .filter_map(|((team, wins), played)| {
                Some(StandingRow::new(
                    team?,
                    wins.unwrap_or(0) as u32,
                    played? as u32,
                ))
            })
            .collect();
        standings.sort_by(|a, b| b.wins.cmp(&a.wins).then_with(|| a.team.cmp(&b.team)));
        Ok(standings)
    }

    /// Read a (SEASON, value) aggregate into season order.
    fn season_series(df: &DataFrame, value_col: &str) -> PolarsResult<Vec<SeasonValue>> {
        let seasons = DataProcessor::i32_values(df, SEASON)?;
        let values = DataProcessor::f64_values(df, value_col)?;

        let mut series: Vec<SeasonValue> = seasons
            .into_iter()
            .zip(values)
            .filter_map(|(season, value)| {
                Some(SeasonValue {
                    season: season?,
                    value: value.unwrap_or(f64::NAN),
                })
            })
            .collect();
        series.sort_by_key(|point| point.season);
        Ok(series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{fixtures, DataLoader, SeasonRange};

    /// Enriched games built in memory: (season, home, away, pts_home, pts_away).
    fn games(rows: &[(i32, &str, &str, f64, f64)]) -> DataFrame {
        let ids: Vec<i64> = rows
            .iter()
            .map(|(_, home, _, _, _)| match *home {
                "Hawks" => 1,
                "Celtics" => 2,
                "Lakers" => 3,
                _ => 99,
            })
            .collect();
        let raw = DataFrame::new(vec![
            Column::new(SEASON.into(), rows.iter().map(|r| r.0).collect::<Vec<_>>()),
            Column::new(HOME_TEAM_ID.into(), ids),
            Column::new(HOME_TEAM_NAME.into(), rows.iter().map(|r| r.1).collect::<Vec<_>>()),
            Column::new(AWAY_TEAM_NAME.into(), rows.iter().map(|r| r.2).collect::<Vec<_>>()),
            Column::new(PTS_HOME.into(), rows.iter().map(|r| r.3).collect::<Vec<_>>()),
            Column::new(PTS_AWAY.into(), rows.iter().map(|r| r.4).collect::<Vec<_>>()),
            Column::new(AST_HOME.into(), vec![20.0; rows.len()]),
            Column::new(AST_AWAY.into(), vec![18.0; rows.len()]),
            Column::new(REB_HOME.into(), vec![44.0; rows.len()]),
            Column::new(REB_AWAY.into(), vec![40.0; rows.len()]),
            Column::new(FG_PCT_HOME.into(), vec![0.5; rows.len()]),
            Column::new(FG_PCT_AWAY.into(), vec![0.4; rows.len()]),
            Column::new(FG3_PCT_HOME.into(), vec![0.4; rows.len()]),
            Column::new(FG3_PCT_AWAY.into(), vec![0.3; rows.len()]),
        ])
        .unwrap();
        let rankings = df!(
            TEAM_ID => [1i64, 2, 3],
            CONFERENCE => ["East", "East", "West"],
        )
        .unwrap();
        DataLoader::enrich_games(raw, rankings).unwrap()
    }

    #[test]
    fn single_home_win_example() {
        let df = games(&[(2015, "Hawks", "Celtics", 110.0, 100.0)]);

        let trend = StatsCalculator::scoring_trend(&df).unwrap();
        assert_eq!(trend, vec![SeasonValue { season: 2015, value: 210.0 }]);

        let home = StatsCalculator::home_advantage_trend(&df).unwrap();
        assert_eq!(home, vec![SeasonValue { season: 2015, value: 100.0 }]);

        let standings = StatsCalculator::season_standings(&df, 2015).unwrap();
        let hawks = standings.iter().find(|r| r.team == "Hawks").unwrap();
        assert_eq!((hawks.wins, hawks.losses, hawks.games_played), (1, 0, 1));
        let celtics = standings.iter().find(|r| r.team == "Celtics").unwrap();
        assert_eq!((celtics.wins, celtics.losses, celtics.games_played), (0, 1, 1));
    }

    #[test]
    fn trends_are_ordered_by_season() {
        let df = games(&[
            (2017, "Hawks", "Lakers", 100.0, 90.0),
            (2015, "Hawks", "Lakers", 90.0, 100.0),
            (2015, "Lakers", "Hawks", 120.0, 100.0),
            (2016, "Celtics", "Hawks", 80.0, 100.0),
        ]);

        let trend = StatsCalculator::scoring_trend(&df).unwrap();
        let seasons: Vec<i32> = trend.iter().map(|p| p.season).collect();
        assert_eq!(seasons, vec![2015, 2016, 2017]);
        assert_eq!(trend[0].value, 205.0);

        let home = StatsCalculator::home_advantage_trend(&df).unwrap();
        assert_eq!(home[0].value, 50.0);
        assert_eq!(home[1].value, 0.0);
        assert_eq!(home[2].value, 100.0);
    }

    #[test]
    fn conference_wins_count_home_wins_only() {
        let df = games(&[
            (2015, "Hawks", "Lakers", 100.0, 90.0),
            (2015, "Celtics", "Lakers", 101.0, 90.0),
            (2015, "Lakers", "Hawks", 99.0, 100.0),
            (2015, "Lakers", "Celtics", 110.0, 100.0),
            (2015, "Expansion", "Hawks", 120.0, 100.0),
        ]);

        let wins = StatsCalculator::conference_wins(&df).unwrap();
        assert_eq!(
            wins,
            vec![
                ConferenceWins {
                    season: 2015,
                    conference: "East".to_string(),
                    wins: 2
                },
                ConferenceWins {
                    season: 2015,
                    conference: "West".to_string(),
                    wins: 1
                },
            ]
        );
    }

    #[test]
    fn dynasty_matrix_sums_home_wins() {
        let df = games(&[
            (2015, "Hawks", "Lakers", 100.0, 90.0),
            (2015, "Hawks", "Celtics", 100.0, 90.0),
            (2016, "Hawks", "Lakers", 80.0, 90.0),
            (2016, "Lakers", "Hawks", 100.0, 90.0),
        ]);

        let matrix = StatsCalculator::dynasty_matrix(&df).unwrap();
        assert_eq!(matrix.teams, vec!["Hawks", "Lakers"]);
        assert_eq!(matrix.seasons, vec![2015, 2016]);
        assert_eq!(matrix.get("Hawks", 2015), Some(2.0));
        assert_eq!(matrix.get("Hawks", 2016), Some(0.0));
        assert_eq!(matrix.get("Lakers", 2015), None);
        assert_eq!(matrix.get("Lakers", 2016), Some(1.0));
    }

    #[test]
    fn team_profile_is_mean_of_all_games() {
        let df = games(&[
            (2015, "Hawks", "Lakers", 110.0, 90.0),
            (2015, "Lakers", "Hawks", 100.0, 95.0),
            (2015, "Celtics", "Hawks", 100.0, 105.0),
        ]);

        let profiles = StatsCalculator::team_profiles(&df).unwrap();
        let hawks = profiles.iter().find(|p| p.team == "Hawks").unwrap();
        // one home game at 110, two away games at 95 and 105
        assert!((hawks.pts - (110.0 + 95.0 + 105.0) / 3.0).abs() < 1e-9);
        assert!((hawks.fg_pct - (0.5 + 0.4 + 0.4) / 3.0).abs() < 1e-9);

        let teams: Vec<&str> = profiles.iter().map(|p| p.team.as_str()).collect();
        assert_eq!(teams, vec!["Celtics", "Hawks", "Lakers"]);
    }

    #[test]
    fn standings_reconcile_and_include_winless_teams() {
        let df = games(&[
            (2016, "Hawks", "Lakers", 95.0, 99.0),
            (2016, "Lakers", "Celtics", 105.0, 105.0),
            (2016, "Lakers", "Hawks", 110.0, 100.0),
            (2017, "Hawks", "Lakers", 100.0, 90.0),
        ]);

        let standings = StatsCalculator::season_standings(&df, 2016).unwrap();
        assert_eq!(standings[0].team, "Lakers");
        assert_eq!(standings[0].wins, 2);
        assert_eq!(standings[0].games_played, 3);
        assert_eq!(standings[0].win_pct, 66.7);

        for row in &standings {
            assert_eq!(row.wins + row.losses, row.games_played);
            let expected = (row.wins as f64 / row.games_played as f64 * 1000.0).round() / 10.0;
            assert_eq!(row.win_pct, expected);
        }

        let celtics = standings.iter().find(|r| r.team == "Celtics").unwrap();
        assert_eq!((celtics.wins, celtics.losses), (0, 1));
    }

    #[test]
    fn player_views_from_fixture() {
        let tables = fixtures::tables();

        let trajectory = StatsCalculator::player_trajectory(&tables.players, "LeBron James").unwrap();
        assert_eq!(
            trajectory,
            vec![
                PlayerSeasonLine {
                    season: 2015,
                    pts: 28.0,
                    reb: 7.0,
                    ast: 8.0
                },
                PlayerSeasonLine {
                    season: 2016,
                    pts: 25.0,
                    reb: 7.0,
                    ast: 8.0
                },
            ]
        );

        let leaders = StatsCalculator::season_leaders(&tables.players, 2016, 10.0).unwrap();
        let names: Vec<&str> = leaders.iter().map(|p| p.player.as_str()).collect();
        assert_eq!(names, vec!["LeBron James", "Role Player"]);

        let leaders_2015 = StatsCalculator::season_leaders(&tables.players, 2015, 10.0).unwrap();
        assert_eq!(leaders_2015.len(), 1);
    }

    #[test]
    fn compute_views_threads_parameters() {
        let tables = fixtures::tables();
        let mut params = ViewParams::initial(&tables, (2015, 2016), "LeBron James", 10.0).unwrap();
        assert_eq!(params.range, SeasonRange::new(2015, 2016));
        assert_eq!(params.standings_season, Some(2017));

        params.standings_season = Some(2015);
        params.team_a = Some("Lakers".to_string());
        let views = StatsCalculator::compute_views(&tables, &params).unwrap();

        assert_eq!(views.scoring_trend.len(), 2);
        assert!(views.scoring_trend.iter().all(|p| params.range.contains(p.season)));
        assert!(!views.dynasty.teams.contains(&"Expansion".to_string()));

        let radar = views.radar.unwrap();
        assert_eq!(radar.team_a.team, "Lakers");
        assert_eq!(radar.team_b.team, "Hawks");

        assert_eq!(views.standings[0].team, "Hawks");
        assert_eq!(views.standings[0].wins, 2);
        assert_eq!(views.trajectory.len(), 2);
    }
}
