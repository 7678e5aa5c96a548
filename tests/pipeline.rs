//! End-to-end run of the data pipeline over CSV files on disk.

use hoopscope::config::DashboardConfig;
use hoopscope::data::{DataCache, DataLoader, DataSources, LoaderError, SeasonRange};
use hoopscope::stats::{StatsCalculator, ViewParams};
use std::path::Path;
use std::sync::Arc;

const GAMES: &str = "\
SEASON,HOME_TEAM_ID,HOME_TEAM_NAME,AWAY_TEAM_NAME,PTS_home,PTS_away,AST_home,AST_away,REB_home,REB_away,FG_PCT_home,FG_PCT_away,FG3_PCT_home,FG3_PCT_away
2009,10,Spurs,Heat,96,90,22,18,44,40,0.47,0.44,0.36,0.31
2010,20,Heat,Spurs,102,95,24,21,43,45,0.49,0.45,0.38,0.33
2010,10,Spurs,Knicks,88,91,19,20,40,42,0.42,0.44,0.30,0.35
2011,30,Knicks,Heat,99,112,20,26,41,46,0.44,0.51,0.33,0.40
2011,20,Heat,Knicks,104,97,25,19,47,39,0.50,0.43,0.39,0.32
2012,10,Spurs,Heat,101,99,27,23,45,44,0.48,0.46,0.37,0.35
";

const PLAYERS: &str = "\
PLAYER_NAME,SEASON,PTS,REB,AST
LeBron James,2010,29,7,8
LeBron James,2010,25,9,6
LeBron James,2011,27,8,7
Tim Duncan,2010,14,11,3
Tim Duncan,2011,13,9,2
";

const RANKINGS: &str = "\
TEAM_ID,CONFERENCE
10,West
10,West
20,East
30,East
30,Atlantic
";

fn write_dataset(dir: &Path) -> DataSources {
    let config = DashboardConfig::default();
    std::fs::write(dir.join(&config.games_file), GAMES).unwrap();
    std::fs::write(dir.join(&config.players_file), PLAYERS).unwrap();
    std::fs::write(dir.join(&config.rankings_file), RANKINGS).unwrap();
    DataSources::in_dir(dir, &config)
}

#[test]
fn pipeline_produces_consistent_views() {
    let dir = tempfile::tempdir().unwrap();
    let sources = write_dataset(dir.path());

    let tables = DataLoader::load(&sources).unwrap();
    assert_eq!(tables.games.height(), 6, "conference join must not add rows");
    assert_eq!(tables.seasons, vec![2009, 2010, 2011, 2012]);

    let config = DashboardConfig::default();
    let params = ViewParams::initial(
        &tables,
        config.default_season_range,
        &config.default_player,
        config.leader_min_points,
    )
    .unwrap();
    assert_eq!(params.range, SeasonRange::new(2010, 2012));
    assert_eq!(params.player.as_deref(), Some("LeBron James"));

    let views = StatsCalculator::compute_views(&tables, &params).unwrap();

    let seasons: Vec<i32> = views.scoring_trend.iter().map(|p| p.season).collect();
    assert_eq!(seasons, vec![2010, 2011, 2012]);
    assert_eq!(views.scoring_trend[0].value, (197.0 + 179.0) / 2.0);
    assert_eq!(views.home_advantage[0].value, 50.0);

    let east_2011: u32 = views
        .conference_wins
        .iter()
        .filter(|w| w.season == 2011 && w.conference == "East")
        .map(|w| w.wins)
        .sum();
    assert_eq!(east_2011, 1);

    assert_eq!(views.dynasty.get("Spurs", 2012), Some(1.0));
    assert_eq!(views.dynasty.get("Spurs", 2011), None);

    let radar = views.radar.as_ref().unwrap();
    assert_eq!(radar.team_a.team, "Heat");
    assert_eq!(radar.team_b.team, "Knicks");

    assert_eq!(views.trajectory.len(), 2);
    assert_eq!(views.trajectory[0].pts, 27.0);

    // Standings default to the latest season of the unfiltered games.
    assert_eq!(params.standings_season, Some(2012));
    for row in &views.standings {
        assert_eq!(row.wins + row.losses, row.games_played);
    }
    assert_eq!(views.standings[0].team, "Spurs");
    assert_eq!(views.standings[0].win_pct, 100.0);
}

#[test]
fn standings_ignore_the_season_range() {
    let dir = tempfile::tempdir().unwrap();
    let tables = DataLoader::load(&write_dataset(dir.path())).unwrap();

    let mut params = ViewParams::initial(&tables, (2011, 2012), "Tim Duncan", 10.0).unwrap();
    params.standings_season = Some(2009);
    let views = StatsCalculator::compute_views(&tables, &params).unwrap();

    assert!(views.scoring_trend.iter().all(|p| p.season >= 2011));
    assert_eq!(views.standings.len(), 2);
    assert_eq!(views.standings[0].team, "Spurs");
    assert_eq!(views.standings[1].losses, 1);
}

#[test]
fn missing_file_stops_the_load() {
    let dir = tempfile::tempdir().unwrap();
    let sources = write_dataset(dir.path());
    std::fs::remove_file(&sources.games).unwrap();

    let mut cache = DataCache::new();
    let err = cache.get_or_load(&sources).unwrap_err();
    assert!(matches!(err, LoaderError::MissingInput { ref path } if *path == sources.games));
    assert!(cache.is_empty());
}

#[test]
fn cache_is_keyed_on_file_identity() {
    let dir = tempfile::tempdir().unwrap();
    let sources = write_dataset(dir.path());
    let mut cache = DataCache::new();

    let first = cache.get_or_load(&sources).unwrap();
    let same_files = DataSources::new(
        dir.path().join(".").join("master_games.csv"),
        sources.players.clone(),
        sources.rankings.clone(),
    );
    let second = cache.get_or_load(&same_files).unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(cache.len(), 1);
}
