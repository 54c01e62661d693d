// Descriptive statistics over a filtered trip table
// Author: Gabriel Demetrios Lafis

//! The four statistic groups reported for every query.
//!
//! Each function is independent and read-only. On a table with no rows
//! they return [`StatsOutcome::NoData`] without touching any aggregate.
//!
//! Every "most common" value uses the same rule (see [`mode`]): nulls are
//! ignored, the highest count wins, and ties go to the smallest value in
//! natural sort order. The tie-break is arbitrary but deterministic.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::data::{columns, DataSet, Value};

/// Result of a statistic group over a possibly empty table
#[derive(Debug, Clone, PartialEq)]
pub enum StatsOutcome<T> {
    Available(T),
    /// The filter combination matched no trips
    NoData,
}

impl<T> StatsOutcome<T> {
    pub fn is_no_data(&self) -> bool {
        matches!(self, StatsOutcome::NoData)
    }

    pub fn available(self) -> Option<T> {
        match self {
            StatsOutcome::Available(v) => Some(v),
            StatsOutcome::NoData => None,
        }
    }
}

/// An optional column's statistic
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnStat<T> {
    Present(T),
    /// The city's dataset has no such column
    NotPresent,
}

impl<T> ColumnStat<T> {
    pub fn present(self) -> Option<T> {
        match self {
            ColumnStat::Present(v) => Some(v),
            ColumnStat::NotPresent => None,
        }
    }
}

/// Most frequent times of travel
#[derive(Debug, Clone, PartialEq)]
pub struct TimeStats {
    pub most_common_month: Option<String>,
    pub most_common_day: Option<String>,
    pub most_common_hour: Option<String>,
}

/// A trip from one station to another
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StationPair {
    pub start: String,
    pub end: String,
}

/// Most popular stations and trip
#[derive(Debug, Clone, PartialEq)]
pub struct StationStats {
    pub most_common_start: Option<String>,
    pub most_common_end: Option<String>,
    pub most_common_trip: Option<StationPair>,
}

/// Total and average trip duration over the non-null durations
#[derive(Debug, Clone, PartialEq)]
pub struct DurationStats {
    pub total: f64,
    pub mean: Option<f64>,
    pub counted: usize,
}

impl DurationStats {
    /// Mean rounded to a whole unit, ties to even
    pub fn rounded_mean(&self) -> Option<i64> {
        self.mean.map(round_whole)
    }
}

/// Earliest, most recent and most common year of birth
#[derive(Debug, Clone, PartialEq)]
pub struct BirthYearStats {
    pub earliest: Option<i64>,
    pub most_recent: Option<i64>,
    pub most_common: Option<i64>,
}

/// Rider demographics; each column may be missing for a city
#[derive(Debug, Clone, PartialEq)]
pub struct UserStats {
    pub user_types: ColumnStat<Vec<(String, usize)>>,
    pub genders: ColumnStat<Vec<(String, usize)>>,
    pub birth_years: ColumnStat<BirthYearStats>,
}

/// Most frequent value, ties broken towards the smallest value
pub fn mode<T, I>(values: I) -> Option<T>
where
    T: Ord,
    I: IntoIterator<Item = T>,
{
    let mut counts: BTreeMap<T, usize> = BTreeMap::new();
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }

    let mut best: Option<(T, usize)> = None;
    for (value, count) in counts {
        // Strictly greater keeps the earliest (smallest) of tied values
        if best.as_ref().map_or(true, |(_, c)| count > *c) {
            best = Some((value, count));
        }
    }

    best.map(|(value, _)| value)
}

/// [`mode`] for floating point values, ordered by `f64::total_cmp`
pub fn mode_f64(values: &[f64]) -> Option<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mut best: Option<(f64, usize)> = None;
    let mut i = 0;
    while i < sorted.len() {
        let run = sorted[i..]
            .iter()
            .take_while(|v| v.total_cmp(&sorted[i]) == Ordering::Equal)
            .count();
        if best.map_or(true, |(_, c)| run > c) {
            best = Some((sorted[i], run));
        }
        i += run;
    }

    best.map(|(value, _)| value)
}

fn round_whole(value: f64) -> i64 {
    value.round_ties_even() as i64
}

fn text_column<'a>(input: &'a DataSet, name: &str) -> Option<impl Iterator<Item = &'a str> + 'a> {
    input.column(name).map(|values| values.filter_map(Value::as_str))
}

fn numeric_column(input: &DataSet, name: &str) -> Option<Vec<f64>> {
    input
        .column(name)
        .map(|values| values.filter_map(Value::as_f64).collect())
}

fn text_mode(input: &DataSet, name: &str) -> Option<String> {
    text_column(input, name)
        .and_then(mode)
        .map(str::to_string)
}

fn value_counts(input: &DataSet, name: &str) -> ColumnStat<Vec<(String, usize)>> {
    match text_column(input, name) {
        Some(values) => {
            let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
            for value in values {
                *counts.entry(value).or_insert(0) += 1;
            }
            ColumnStat::Present(
                counts
                    .into_iter()
                    .map(|(value, count)| (value.to_string(), count))
                    .collect(),
            )
        }
        None => ColumnStat::NotPresent,
    }
}

/// Most common month, day of week and start hour
pub fn time_stats(input: &DataSet) -> StatsOutcome<TimeStats> {
    if input.is_empty() {
        return StatsOutcome::NoData;
    }

    StatsOutcome::Available(TimeStats {
        most_common_month: text_mode(input, columns::MONTH),
        most_common_day: text_mode(input, columns::DAY),
        most_common_hour: text_mode(input, columns::START_HOUR),
    })
}

/// Most common start station, end station and start/end combination
pub fn station_stats(input: &DataSet) -> StatsOutcome<StationStats> {
    if input.is_empty() {
        return StatsOutcome::NoData;
    }

    let most_common_trip = match (
        input.schema.index_of(columns::START_STATION),
        input.schema.index_of(columns::END_STATION),
    ) {
        (Some(s), Some(e)) => mode(input.data.iter().filter_map(|row| {
            Some((row.values[s].as_str()?, row.values[e].as_str()?))
        }))
        .map(|(start, end)| StationPair {
            start: start.to_string(),
            end: end.to_string(),
        }),
        _ => None,
    };

    StatsOutcome::Available(StationStats {
        most_common_start: text_mode(input, columns::START_STATION),
        most_common_end: text_mode(input, columns::END_STATION),
        most_common_trip,
    })
}

/// Total and mean trip duration
pub fn trip_duration_stats(input: &DataSet) -> StatsOutcome<DurationStats> {
    if input.is_empty() {
        return StatsOutcome::NoData;
    }

    let durations = numeric_column(input, columns::TRIP_DURATION).unwrap_or_default();
    let total: f64 = durations.iter().sum();
    let mean = if durations.is_empty() {
        None
    } else {
        Some(total / durations.len() as f64)
    };

    StatsOutcome::Available(DurationStats {
        total,
        mean,
        counted: durations.len(),
    })
}

/// Counts of user types and genders, and birth year extremes and mode
pub fn user_stats(input: &DataSet) -> StatsOutcome<UserStats> {
    if input.is_empty() {
        return StatsOutcome::NoData;
    }

    let birth_years = match numeric_column(input, columns::BIRTH_YEAR) {
        Some(years) => ColumnStat::Present(BirthYearStats {
            earliest: years.iter().copied().min_by(f64::total_cmp).map(round_whole),
            most_recent: years.iter().copied().max_by(f64::total_cmp).map(round_whole),
            most_common: mode_f64(&years).map(round_whole),
        }),
        None => ColumnStat::NotPresent,
    };

    StatsOutcome::Available(UserStats {
        user_types: value_counts(input, columns::USER_TYPE),
        genders: value_counts(input, columns::GENDER),
        birth_years,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DataType, Field, Row, Schema};

    fn trips(names: &[&str], rows: Vec<Vec<Value>>) -> DataSet {
        let fields = names
            .iter()
            .map(|n| {
                let data_type = match *n {
                    "Trip Duration" | "Birth Year" => DataType::Float,
                    _ => DataType::String,
                };
                Field::new(n.to_string(), data_type)
            })
            .collect();
        let mut dataset = DataSet::new(Schema::new(fields));
        for row in rows {
            dataset.add_row(Row::new(row)).unwrap();
        }
        dataset
    }

    fn s(v: &str) -> Value {
        Value::String(v.to_string())
    }

    #[test]
    fn test_mode_tie_break_is_smallest() {
        assert_eq!(mode(vec!["b", "a", "b", "a", "c"]), Some("a"));
        assert_eq!(mode(vec![3, 1, 3, 2]), Some(3));
        assert_eq!(mode(Vec::<i32>::new()), None);
        assert_eq!(mode_f64(&[1990.0, 1985.0, 1990.0, 1985.0]), Some(1985.0));
        assert_eq!(mode_f64(&[1992.0, 1985.0, 1992.0]), Some(1992.0));
        assert_eq!(mode_f64(&[]), None);
    }

    #[test]
    fn test_empty_table_reports_no_data() {
        let empty = trips(&["Month", "Day", "Start Hour"], vec![]);
        assert!(time_stats(&empty).is_no_data());
        assert!(station_stats(&empty).is_no_data());
        assert!(trip_duration_stats(&empty).is_no_data());
        assert!(user_stats(&empty).is_no_data());
    }

    #[test]
    fn test_time_stats() {
        let table = trips(
            &["Month", "Day", "Start Hour"],
            vec![
                vec![s("june"), s("monday"), s("08")],
                vec![s("june"), s("friday"), s("17")],
                vec![s("may"), s("friday"), s("17")],
                vec![Value::Null, Value::Null, Value::Null],
            ],
        );

        let stats = time_stats(&table).available().unwrap();
        assert_eq!(stats.most_common_month.as_deref(), Some("june"));
        assert_eq!(stats.most_common_day.as_deref(), Some("friday"));
        assert_eq!(stats.most_common_hour.as_deref(), Some("17"));
    }

    #[test]
    fn test_time_stats_all_null() {
        let table = trips(&["Month", "Day", "Start Hour"], vec![vec![Value::Null; 3]]);
        let stats = time_stats(&table).available().unwrap();
        assert_eq!(stats.most_common_month, None);
    }

    #[test]
    fn test_station_pair_uses_composite_key() {
        // Concatenating with '-' would merge these two trips into one key
        let table = trips(
            &["Start Station", "End Station"],
            vec![
                vec![s("A-B"), s("C")],
                vec![s("A"), s("B-C")],
                vec![s("A"), s("B-C")],
                vec![s("Lake Shore"), s("A-B")],
                vec![s("Lake Shore"), Value::Null],
                vec![s("Lake Shore"), Value::Null],
            ],
        );

        let stats = station_stats(&table).available().unwrap();
        assert_eq!(stats.most_common_start.as_deref(), Some("Lake Shore"));
        assert_eq!(stats.most_common_end.as_deref(), Some("B-C"));
        assert_eq!(
            stats.most_common_trip,
            Some(StationPair {
                start: "A".to_string(),
                end: "B-C".to_string()
            })
        );
    }

    #[test]
    fn test_duration_stats_skip_nulls() {
        let table = trips(
            &["Trip Duration"],
            vec![
                vec![Value::Float(100.0)],
                vec![Value::Null],
                vec![Value::Float(251.0)],
            ],
        );

        let stats = trip_duration_stats(&table).available().unwrap();
        assert_eq!(stats.total, 351.0);
        assert_eq!(stats.counted, 2);
        assert_eq!(stats.mean, Some(175.5));
        // Ties round to even
        assert_eq!(stats.rounded_mean(), Some(176));
        assert!((stats.total / stats.counted as f64 - stats.mean.unwrap()).abs() < 1e-9);
    }

    #[test]
    fn test_duration_stats_all_null() {
        let table = trips(&["Trip Duration"], vec![vec![Value::Null]]);
        let stats = trip_duration_stats(&table).available().unwrap();
        assert_eq!(stats.total, 0.0);
        assert_eq!(stats.mean, None);
        assert_eq!(stats.rounded_mean(), None);
    }

    #[test]
    fn test_user_stats_with_demographics() {
        let table = trips(
            &["User Type", "Gender", "Birth Year"],
            vec![
                vec![s("Subscriber"), s("Male"), Value::Float(1989.0)],
                vec![s("Customer"), Value::Null, Value::Null],
                vec![s("Subscriber"), s("Female"), Value::Float(1950.0)],
                vec![s("Subscriber"), s("Male"), Value::Float(1989.0)],
                vec![s("Dependent"), s("Female"), Value::Float(2001.0)],
            ],
        );

        let stats = user_stats(&table).available().unwrap();
        assert_eq!(
            stats.user_types.present().unwrap(),
            vec![
                ("Customer".to_string(), 1),
                ("Dependent".to_string(), 1),
                ("Subscriber".to_string(), 3)
            ]
        );
        assert_eq!(
            stats.genders.present().unwrap(),
            vec![("Female".to_string(), 2), ("Male".to_string(), 2)]
        );
        assert_eq!(
            stats.birth_years.present().unwrap(),
            BirthYearStats {
                earliest: Some(1950),
                most_recent: Some(2001),
                most_common: Some(1989),
            }
        );
    }

    #[test]
    fn test_user_stats_missing_columns() {
        let table = trips(&["User Type"], vec![vec![s("Subscriber")]]);

        let stats = user_stats(&table).available().unwrap();
        assert_eq!(
            stats.user_types,
            ColumnStat::Present(vec![("Subscriber".to_string(), 1)])
        );
        assert_eq!(stats.genders, ColumnStat::NotPresent);
        assert_eq!(stats.birth_years, ColumnStat::NotPresent);
    }

    #[test]
    fn test_birth_year_all_null() {
        let table = trips(&["Birth Year"], vec![vec![Value::Null]]);
        let stats = user_stats(&table).available().unwrap();
        assert_eq!(
            stats.birth_years,
            ColumnStat::Present(BirthYearStats {
                earliest: None,
                most_recent: None,
                most_common: None,
            })
        );
    }
}
