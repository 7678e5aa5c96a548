//! Data Processor Module
//! Season filtering, distinct-value catalogs and typed column extraction.

use crate::data::schema::SEASON;
use polars::prelude::*;
use std::collections::BTreeSet;

/// Inclusive range of seasons selected in the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SeasonRange {
    pub start: i32,
    pub end: i32,
}

impl SeasonRange {
    /// Bounds given in the wrong order are swapped.
    pub fn new(start: i32, end: i32) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    pub fn contains(&self, season: i32) -> bool {
        (self.start..=self.end).contains(&season)
    }

    /// The preferred range clamped to the seasons actually present.
    /// Falls back to the full span when the preference misses the data.
    pub fn clamped(preferred: (i32, i32), seasons: &[i32]) -> Option<Self> {
        let (&min, &max) = (seasons.first()?, seasons.last()?);
        let wanted = Self::new(preferred.0, preferred.1);
        let start = wanted.start.clamp(min, max);
        let end = wanted.end.clamp(min, max);
        if wanted.end < min || wanted.start > max {
            Some(Self::new(min, max))
        } else {
            Some(Self::new(start, end))
        }
    }
}

/// Handles filtering and value extraction on the base tables.
pub struct DataProcessor;

impl DataProcessor {
    /// Games whose season lies within the range, bounds included.
    pub fn filter_seasons(games: &DataFrame, range: SeasonRange) -> PolarsResult<DataFrame> {
        games
            .clone()
            .lazy()
            .filter(
                col(SEASON)
                    .gt_eq(lit(range.start))
                    .and(col(SEASON).lt_eq(lit(range.end))),
            )
            .collect()
    }

    /// Rows of a single season.
    pub fn filter_season(df: &DataFrame, season: i32) -> PolarsResult<DataFrame> {
        df.clone()
            .lazy()
            .filter(col(SEASON).eq(lit(season)))
            .collect()
    }

    /// Distinct non-null seasons, ascending.
    pub fn distinct_seasons(df: &DataFrame) -> PolarsResult<Vec<i32>> {
        let seasons: BTreeSet<i32> = Self::i32_values(df, SEASON)?.into_iter().flatten().collect();
        Ok(seasons.into_iter().collect())
    }

    /// Distinct non-null strings of a column, sorted.
    pub fn distinct_strings(df: &DataFrame, column: &str) -> PolarsResult<Vec<String>> {
        let values: BTreeSet<String> = Self::string_values(df, column)?
            .into_iter()
            .flatten()
            .collect();
        Ok(values.into_iter().collect())
    }

    pub fn i32_values(df: &DataFrame, column: &str) -> PolarsResult<Vec<Option<i32>>> {
        let casted = df.column(column)?.cast(&DataType::Int32)?;
        Ok(casted.i32()?.into_iter().collect())
    }

    pub fn i64_values(df: &DataFrame, column: &str) -> PolarsResult<Vec<Option<i64>>> {
        let casted = df.column(column)?.cast(&DataType::Int64)?;
        Ok(casted.i64()?.into_iter().collect())
    }

    pub fn f64_values(df: &DataFrame, column: &str) -> PolarsResult<Vec<Option<f64>>> {
        let casted = df.column(column)?.cast(&DataType::Float64)?;
        Ok(casted.f64()?.into_iter().collect())
    }

    pub fn string_values(df: &DataFrame, column: &str) -> PolarsResult<Vec<Option<String>>> {
        let casted = df.column(column)?.cast(&DataType::String)?;
        Ok(casted
            .str()?
            .into_iter()
            .map(|v| v.map(str::to_string))
            .collect())
    }
}
