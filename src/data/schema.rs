//! Column names of the three source files and the derived columns.

// master_games.csv
pub const SEASON: &str = "SEASON";
pub const HOME_TEAM_ID: &str = "HOME_TEAM_ID";
pub const HOME_TEAM_NAME: &str = "HOME_TEAM_NAME";
pub const AWAY_TEAM_NAME: &str = "AWAY_TEAM_NAME";
pub const PTS_HOME: &str = "PTS_home";
pub const PTS_AWAY: &str = "PTS_away";
pub const AST_HOME: &str = "AST_home";
pub const AST_AWAY: &str = "AST_away";
pub const REB_HOME: &str = "REB_home";
pub const REB_AWAY: &str = "REB_away";
pub const FG_PCT_HOME: &str = "FG_PCT_home";
pub const FG_PCT_AWAY: &str = "FG_PCT_away";
pub const FG3_PCT_HOME: &str = "FG3_PCT_home";
pub const FG3_PCT_AWAY: &str = "FG3_PCT_away";

/// Numeric game columns coerced to Float64 on load.
pub const GAME_STAT_COLUMNS: [&str; 10] = [
    PTS_HOME,
    PTS_AWAY,
    AST_HOME,
    AST_AWAY,
    REB_HOME,
    REB_AWAY,
    FG_PCT_HOME,
    FG_PCT_AWAY,
    FG3_PCT_HOME,
    FG3_PCT_AWAY,
];

// Derived game columns
pub const CONFERENCE: &str = "CONFERENCE";
pub const TOTAL_POINTS: &str = "TOTAL_POINTS";
pub const IS_HOME_WIN: &str = "IS_HOME_WIN";

// ranking.csv
pub const TEAM_ID: &str = "TEAM_ID";
pub const EAST: &str = "East";
pub const WEST: &str = "West";

// master_player_stats.csv
pub const PLAYER_NAME: &str = "PLAYER_NAME";
pub const PTS: &str = "PTS";
pub const REB: &str = "REB";
pub const AST: &str = "AST";

// Team profile schema shared by home and away perspectives
pub const TEAM: &str = "TEAM";
pub const FG_PCT: &str = "FG%";
pub const FG3_PCT: &str = "3P%";
