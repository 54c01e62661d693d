// Validation of user supplied filter input
// Author: Gabriel Demetrios Lafis

use thiserror::Error;

use crate::data::City;
use crate::processing::{DayFilter, MonthFilter};

/// Raised when filter input falls outside the recognised values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("{value} is an invalid entry for {kind}")]
    InvalidFilterInput { kind: &'static str, value: String },
}

/// A validated city/month/day combination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Query {
    pub city: City,
    pub month: MonthFilter,
    pub day: DayFilter,
}

impl Query {
    pub fn new(city: City, month: MonthFilter, day: DayFilter) -> Self {
        Query { city, month, day }
    }

    /// Validate raw text for all three filters at once
    pub fn parse(city: &str, month: &str, day: &str) -> Result<Self, FilterError> {
        Ok(Query {
            city: city.parse()?,
            month: month.parse()?,
            day: day.parse()?,
        })
    }
}
