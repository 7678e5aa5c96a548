//! CSV Data Loader Module
//! Loads the games, player and ranking files with Polars, joins conference
//! metadata onto games and memoizes the result per set of input files.

use crate::config::DashboardConfig;
use crate::data::processor::DataProcessor;
use crate::data::schema::*;
use polars::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Input file not found: {}", path.display())]
    MissingInput { path: PathBuf },
    #[error("Failed to load CSV: {0}")]
    Csv(#[from] PolarsError),
}

/// The three input files of one dataset.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DataSources {
    pub games: PathBuf,
    pub players: PathBuf,
    pub rankings: PathBuf,
}

impl DataSources {
    pub fn new(
        games: impl Into<PathBuf>,
        players: impl Into<PathBuf>,
        rankings: impl Into<PathBuf>,
    ) -> Self {
        Self {
            games: games.into(),
            players: players.into(),
            rankings: rankings.into(),
        }
    }

    /// Sources named by the config.
    pub fn from_config(config: &DashboardConfig) -> Self {
        Self::new(
            config.games_path(),
            config.players_path(),
            config.rankings_path(),
        )
    }

    /// Sources with the configured file names inside another directory.
    pub fn in_dir(dir: &Path, config: &DashboardConfig) -> Self {
        Self::new(
            dir.join(&config.games_file),
            dir.join(&config.players_file),
            dir.join(&config.rankings_file),
        )
    }

    pub fn paths(&self) -> [&Path; 3] {
        [&self.games, &self.players, &self.rankings]
    }

    /// Fail on the first missing file. Nothing is read before all three exist.
    pub fn check_exists(&self) -> Result<(), LoaderError> {
        match self.paths().into_iter().find(|p| !p.is_file()) {
            Some(path) => Err(LoaderError::MissingInput {
                path: path.to_path_buf(),
            }),
            None => Ok(()),
        }
    }

    /// Identity used by the cache: the same files reached through different
    /// relative paths map to one key.
    fn identity(&self) -> Self {
        let canonical = |p: &Path| p.canonicalize().unwrap_or_else(|_| p.to_path_buf());
        Self {
            games: canonical(&self.games),
            players: canonical(&self.players),
            rankings: canonical(&self.rankings),
        }
    }
}

/// Enriched base tables every view is computed from.
#[derive(Debug, Clone)]
pub struct NbaTables {
    /// Games with `CONFERENCE`, `TOTAL_POINTS` and `IS_HOME_WIN`.
    pub games: DataFrame,
    pub players: DataFrame,
    /// Distinct seasons present in the games table, ascending.
    pub seasons: Vec<i32>,
    /// Distinct player names, sorted.
    pub player_names: Vec<String>,
}

impl NbaTables {
    /// Build the tables from already enriched frames.
    pub fn from_frames(games: DataFrame, players: DataFrame) -> PolarsResult<Self> {
        let seasons = DataProcessor::distinct_seasons(&games)?;
        let player_names = DataProcessor::distinct_strings(&players, PLAYER_NAME)?;
        Ok(Self {
            games,
            players,
            seasons,
            player_names,
        })
    }

    pub fn first_season(&self) -> Option<i32> {
        self.seasons.first().copied()
    }

    pub fn latest_season(&self) -> Option<i32> {
        self.seasons.last().copied()
    }
}

/// Reads and enriches the three source files.
pub struct DataLoader;

impl DataLoader {
    /// Load all three files and build the enriched tables.
    pub fn load(sources: &DataSources) -> Result<NbaTables, LoaderError> {
        sources.check_exists()?;
        info!(games = %sources.games.display(), "loading NBA dataset");

        let games = Self::read_csv(&sources.games)?;
        let players = Self::read_csv(&sources.players)?;
        let rankings = Self::read_csv(&sources.rankings)?;
        debug!(
            games = games.height(),
            players = players.height(),
            rankings = rankings.height(),
            "raw tables read"
        );

        let games = Self::enrich_games(games, rankings)?;
        let players = Self::normalize_players(players)?;
        let tables = NbaTables::from_frames(games, players)?;

        info!(
            games = tables.games.height(),
            players = tables.players.height(),
            seasons = tables.seasons.len(),
            "dataset ready"
        );
        Ok(tables)
    }

    /// Read a CSV file with schema inference over a large prefix.
    fn read_csv(path: &Path) -> PolarsResult<DataFrame> {
        LazyCsvReader::new(path)
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .finish()?
            .collect()
    }

    /// Team id to conference, restricted to East/West and one row per team.
    pub fn conference_map(rankings: DataFrame) -> LazyFrame {
        rankings
            .lazy()
            .select([
                col(TEAM_ID).cast(DataType::Int64),
                col(CONFERENCE).cast(DataType::String),
            ])
            .filter(col(CONFERENCE).eq(lit(EAST)).or(col(CONFERENCE).eq(lit(WEST))))
            .group_by_stable([col(TEAM_ID)])
            .agg([col(CONFERENCE).first()])
    }

    /// Coerce game columns, left-join the conference of the home team and
    /// derive total points and the home-win flag.
    pub fn enrich_games(games: DataFrame, rankings: DataFrame) -> PolarsResult<DataFrame> {
        let mut casts = vec![
            col(SEASON).cast(DataType::Int32),
            col(HOME_TEAM_ID).cast(DataType::Int64),
            col(HOME_TEAM_NAME).cast(DataType::String),
            col(AWAY_TEAM_NAME).cast(DataType::String),
        ];
        casts.extend(
            GAME_STAT_COLUMNS
                .iter()
                .map(|name| col(*name).cast(DataType::Float64)),
        );

        games
            .lazy()
            .with_columns(casts)
            .join(
                Self::conference_map(rankings),
                [col(HOME_TEAM_ID)],
                [col(TEAM_ID)],
                JoinArgs::new(JoinType::Left),
            )
            .with_columns([
                (col(PTS_HOME) + col(PTS_AWAY)).alias(TOTAL_POINTS),
                col(PTS_HOME)
                    .gt(col(PTS_AWAY))
                    .fill_null(lit(false))
                    .cast(DataType::Int32)
                    .alias(IS_HOME_WIN),
            ])
            .collect()
    }

    /// Coerce player columns to the types the views expect.
    pub fn normalize_players(players: DataFrame) -> PolarsResult<DataFrame> {
        players
            .lazy()
            .with_columns([
                col(PLAYER_NAME).cast(DataType::String),
                col(SEASON).cast(DataType::Int32),
                col(PTS).cast(DataType::Float64),
                col(REB).cast(DataType::Float64),
                col(AST).cast(DataType::Float64),
            ])
            .collect()
    }
}

/// Load-once memo of enriched tables, keyed on input file identity.
/// Entries live for the whole process.
#[derive(Default)]
pub struct DataCache {
    entries: HashMap<DataSources, Arc<NbaTables>>,
}

impl DataCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, sources: &DataSources) -> Option<Arc<NbaTables>> {
        self.entries.get(&sources.identity()).cloned()
    }

    /// Store tables loaded elsewhere (e.g. on the background loader thread).
    pub fn insert(&mut self, sources: &DataSources, tables: NbaTables) -> Arc<NbaTables> {
        let tables = Arc::new(tables);
        self.entries.insert(sources.identity(), Arc::clone(&tables));
        tables
    }

    /// Return the cached tables or load and remember them.
    pub fn get_or_load(&mut self, sources: &DataSources) -> Result<Arc<NbaTables>, LoaderError> {
        if let Some(tables) = self.get(sources) {
            debug!(games = %sources.games.display(), "dataset cache hit");
            return Ok(tables);
        }
        let tables = DataLoader::load(sources)?;
        Ok(self.insert(sources, tables))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures;
    use std::collections::HashMap;

    #[test]
    fn load_enriches_games() {
        let dir = fixtures::write_dataset();
        let tables = DataLoader::load(&fixtures::sources(dir.path())).unwrap();

        assert_eq!(tables.games.height(), 6);
        assert_eq!(tables.seasons, vec![2015, 2016, 2017]);
        assert_eq!(tables.player_names, vec!["LeBron James", "Role Player"]);

        let home = DataProcessor::f64_values(&tables.games, PTS_HOME).unwrap();
        let away = DataProcessor::f64_values(&tables.games, PTS_AWAY).unwrap();
        let total = DataProcessor::f64_values(&tables.games, TOTAL_POINTS).unwrap();
        let win = DataProcessor::i32_values(&tables.games, IS_HOME_WIN).unwrap();

        for i in 0..tables.games.height() {
            let (h, a) = (home[i].unwrap(), away[i].unwrap());
            assert_eq!(total[i], Some(h + a));
            assert_eq!(win[i], Some(i32::from(h > a)));
        }
    }

    #[test]
    fn conference_join_keeps_row_count() {
        let dir = fixtures::write_dataset();
        let tables = DataLoader::load(&fixtures::sources(dir.path())).unwrap();
        assert_eq!(tables.games.height(), 6);

        let teams = DataProcessor::string_values(&tables.games, HOME_TEAM_NAME).unwrap();
        let conferences = DataProcessor::string_values(&tables.games, CONFERENCE).unwrap();
        let by_team: HashMap<_, _> = teams
            .into_iter()
            .map(Option::unwrap)
            .zip(conferences)
            .collect();

        assert_eq!(by_team["Hawks"].as_deref(), Some("East"));
        assert_eq!(by_team["Celtics"].as_deref(), Some("East"));
        assert_eq!(by_team["Lakers"].as_deref(), Some("West"));
        // team id 9 has no ranking row
        assert_eq!(by_team["Expansion"], None);
    }

    #[test]
    fn conference_map_drops_invalid_and_duplicates() {
        let rankings = df!(
            TEAM_ID => [1i64, 1, 2, 2, 3],
            CONFERENCE => ["East", "East", "Eastern", "East", "-"],
        )
        .unwrap();

        let map = DataLoader::conference_map(rankings).collect().unwrap();
        assert_eq!(map.height(), 2);
        let ids = DataProcessor::i64_values(&map, TEAM_ID).unwrap();
        assert_eq!(ids, vec![Some(1), Some(2)]);
    }

    #[test]
    fn missing_file_is_reported_before_reading() {
        let dir = fixtures::write_dataset();
        let sources = fixtures::sources(dir.path());
        std::fs::remove_file(&sources.rankings).unwrap();

        let err = DataLoader::load(&sources).unwrap_err();
        match err {
            LoaderError::MissingInput { path } => assert_eq!(path, sources.rankings),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn cache_returns_same_tables_without_reloading() {
        let dir = fixtures::write_dataset();
        let sources = fixtures::sources(dir.path());
        let mut cache = DataCache::new();

        let first = cache.get_or_load(&sources).unwrap();
        let second = cache.get_or_load(&sources).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }
}
