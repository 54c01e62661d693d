// Filter operations for trip data
// Author: Gabriel Demetrios Lafis

use std::fmt;
use std::str::FromStr;

use super::{DataProcessor, ProcessingError};
use crate::data::{columns, DataSet, Row, Value};
use crate::utils::FilterError;

/// Month constraint on trips; the datasets cover January to June
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MonthFilter {
    All,
    January,
    February,
    March,
    April,
    May,
    June,
}

impl MonthFilter {
    pub const ALL: [MonthFilter; 7] = [
        MonthFilter::All,
        MonthFilter::January,
        MonthFilter::February,
        MonthFilter::March,
        MonthFilter::April,
        MonthFilter::May,
        MonthFilter::June,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            MonthFilter::All => "all",
            MonthFilter::January => "january",
            MonthFilter::February => "february",
            MonthFilter::March => "march",
            MonthFilter::April => "april",
            MonthFilter::May => "may",
            MonthFilter::June => "june",
        }
    }

    /// The month name to match, or `None` for no constraint
    pub fn month(&self) -> Option<&'static str> {
        match self {
            MonthFilter::All => None,
            other => Some(other.name()),
        }
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MonthFilter {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        MonthFilter::ALL
            .iter()
            .copied()
            .find(|m| m.name() == normalized)
            .ok_or(FilterError::InvalidFilterInput {
                kind: "month",
                value: normalized,
            })
    }
}

/// Day-of-week constraint on trips
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayFilter {
    All,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayFilter {
    pub const ALL: [DayFilter; 8] = [
        DayFilter::All,
        DayFilter::Monday,
        DayFilter::Tuesday,
        DayFilter::Wednesday,
        DayFilter::Thursday,
        DayFilter::Friday,
        DayFilter::Saturday,
        DayFilter::Sunday,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            DayFilter::All => "all",
            DayFilter::Monday => "monday",
            DayFilter::Tuesday => "tuesday",
            DayFilter::Wednesday => "wednesday",
            DayFilter::Thursday => "thursday",
            DayFilter::Friday => "friday",
            DayFilter::Saturday => "saturday",
            DayFilter::Sunday => "sunday",
        }
    }

    /// The weekday name to match, or `None` for no constraint
    pub fn day(&self) -> Option<&'static str> {
        match self {
            DayFilter::All => None,
            other => Some(other.name()),
        }
    }
}

impl fmt::Display for DayFilter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DayFilter {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        DayFilter::ALL
            .iter()
            .copied()
            .find(|d| d.name() == normalized)
            .ok_or(FilterError::InvalidFilterInput {
                kind: "day",
                value: normalized,
            })
    }
}

/// Filter rows based on a predicate
pub struct FilterProcessor {
    name: String,
    predicate: Box<dyn Fn(&Row, &DataSet) -> bool>,
}

impl FilterProcessor {
    /// Create a new filter processor with a predicate function
    pub fn new<F>(name: &str, predicate: F) -> Self
    where
        F: Fn(&Row, &DataSet) -> bool + 'static,
    {
        FilterProcessor {
            name: name.to_string(),
            predicate: Box::new(predicate),
        }
    }

    /// Create a filter that keeps rows where a column equals a value.
    ///
    /// Nulls never match, and a missing column matches nothing.
    pub fn equals(column: &str, value: Value) -> Self {
        let column = column.to_string();
        Self::new(&format!("equals_{}", column), move |row, dataset| {
            match dataset.schema.index_of(&column) {
                Some(i) => !value.is_null() && row.values[i] == value,
                None => false,
            }
        })
    }

    /// Month filter over the derived month column, `None` for `all`
    pub fn for_month(month: MonthFilter) -> Option<Self> {
        month
            .month()
            .map(|name| Self::equals(columns::MONTH, Value::String(name.to_string())))
    }

    /// Day filter over the derived weekday column, `None` for `all`
    pub fn for_day(day: DayFilter) -> Option<Self> {
        day.day()
            .map(|name| Self::equals(columns::DAY, Value::String(name.to_string())))
    }
}

impl DataProcessor for FilterProcessor {
    fn process(&self, input: &DataSet) -> Result<DataSet, ProcessingError> {
        let mut result = input.empty_like();

        for row in &input.data {
            if (self.predicate)(row, input) {
                result.add_row(row.clone())?;
            }
        }

        Ok(result)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DataType, Field, Schema};

    fn calendar_set() -> DataSet {
        let schema = Schema::new(vec![
            Field::new("Month".to_string(), DataType::String),
            Field::new("Day".to_string(), DataType::String),
        ]);
        let mut dataset = DataSet::new(schema);
        for (m, d) in [
            (Some("june"), Some("monday")),
            (Some("may"), Some("monday")),
            (None, None),
            (Some("june"), Some("friday")),
        ] {
            let to_value =
                |v: Option<&str>| v.map_or(Value::Null, |s| Value::String(s.to_string()));
            dataset
                .add_row(Row::new(vec![to_value(m), to_value(d)]))
                .unwrap();
        }
        dataset
    }

    #[test]
    fn test_parse_filters() {
        assert_eq!(" June ".parse::<MonthFilter>().unwrap(), MonthFilter::June);
        assert_eq!("ALL".parse::<MonthFilter>().unwrap(), MonthFilter::All);
        assert!("july".parse::<MonthFilter>().is_err());

        assert_eq!("Sunday".parse::<DayFilter>().unwrap(), DayFilter::Sunday);
        assert_eq!(
            "mon".parse::<DayFilter>().unwrap_err(),
            FilterError::InvalidFilterInput {
                kind: "day",
                value: "mon".to_string()
            }
        );
    }

    #[test]
    fn test_all_produces_no_filter() {
        assert!(FilterProcessor::for_month(MonthFilter::All).is_none());
        assert!(FilterProcessor::for_day(DayFilter::All).is_none());
    }

    #[test]
    fn test_month_filter_keeps_order_and_skips_nulls() {
        let dataset = calendar_set();
        let result = FilterProcessor::for_month(MonthFilter::June)
            .unwrap()
            .process(&dataset)
            .unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result.data[0], dataset.data[0]);
        assert_eq!(result.data[1], dataset.data[3]);
    }

    #[test]
    fn test_equals_on_missing_column_matches_nothing() {
        let dataset = calendar_set();
        let result = FilterProcessor::equals("Gender", Value::String("Male".to_string()))
            .process(&dataset)
            .unwrap();
        assert!(result.is_empty());
        assert_eq!(result.schema, dataset.schema);
    }
}
