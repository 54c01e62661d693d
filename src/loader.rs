// Trip data loader
// Author: Gabriel Demetrios Lafis

//! Loads a city's trip file and turns it into a filtered table.
//!
//! The steps run as a [`Pipeline`]: coerce column types per the city
//! schema, derive the calendar fields, drop the export's index column,
//! then apply the month and day filters when they are not `all`.

use log::{debug, info};

use crate::data::{City, CityRegistry, CsvSource, DataSet, DataSource};
use crate::processing::{
    CoerceTypesTransform, DayFilter, DeriveCalendarTransform, DropColumnTransform, FilterProcessor,
    MonthFilter, Pipeline, ProcessingError,
};

/// Loads trip tables for the cities in a registry
pub struct TripLoader<'a> {
    registry: &'a CityRegistry,
}

impl<'a> TripLoader<'a> {
    pub fn new(registry: &'a CityRegistry) -> Self {
        TripLoader { registry }
    }

    /// Load a city's trips restricted to `month` and `day`.
    ///
    /// A missing data file is reported as `DataSourceNotFound`; the file is
    /// read once and closed before this returns.
    pub fn load(
        &self,
        city: City,
        month: MonthFilter,
        day: DayFilter,
    ) -> Result<DataSet, ProcessingError> {
        let path = self.registry.path(city);
        info!("Loading {} trips from {}", city, path.display());
        load_from(&CsvSource::new(path), city, month, day)
    }
}

/// Build the load pipeline for a city and filter combination
pub fn load_pipeline(city: City, month: MonthFilter, day: DayFilter) -> Pipeline {
    Pipeline::new(&format!("load_{}", city))
        .add(CoerceTypesTransform::new(city.schema()))
        .add(DeriveCalendarTransform::default())
        .add(DropColumnTransform::index_column())
        .add_opt(FilterProcessor::for_month(month))
        .add_opt(FilterProcessor::for_day(day))
}

/// Read `source` and run the load pipeline over it
pub fn load_from<S: DataSource + ?Sized>(
    source: &S,
    city: City,
    month: MonthFilter,
    day: DayFilter,
) -> Result<DataSet, ProcessingError> {
    let raw = source.read()?;
    let raw_rows = raw.len();

    let table = load_pipeline(city, month, day).execute_owned(raw)?;

    debug!(
        "{}: kept {} of {} rows for month={} day={}",
        city,
        table.len(),
        raw_rows,
        month,
        day
    );
    Ok(table)
}
