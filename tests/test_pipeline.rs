// Loader and statistics tests over the fixture datasets
// Author: Gabriel Demetrios Lafis

use std::path::PathBuf;

use bikeshare_explorer::{
    data::{columns, City, CityRegistry, CsvSource, DataError, DataSet, DataSource, Value},
    loader::{load_pipeline, TripLoader},
    processing::{
        station_stats, time_stats, trip_duration_stats, user_stats, BirthYearStats, ColumnStat,
        DayFilter, FilterProcessor, MonthFilter, Pipeline, ProcessingError, StationPair,
    },
};

fn fixtures() -> CityRegistry {
    CityRegistry::with_base_dir(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures"))
}

fn load(city: City, month: MonthFilter, day: DayFilter) -> DataSet {
    let registry = fixtures();
    TripLoader::new(&registry).load(city, month, day).unwrap()
}

fn text_column(table: &DataSet, name: &str) -> Vec<Option<String>> {
    table
        .column(name)
        .unwrap()
        .map(|v| v.as_str().map(str::to_string))
        .collect()
}

#[test]
fn test_load_all_keeps_raw_row_count() {
    assert_eq!(load(City::Chicago, MonthFilter::All, DayFilter::All).len(), 10);
    assert_eq!(load(City::NewYorkCity, MonthFilter::All, DayFilter::All).len(), 4);
    assert_eq!(load(City::Washington, MonthFilter::All, DayFilter::All).len(), 6);
}

#[test]
fn test_load_preserves_source_order() {
    let table = load(City::Chicago, MonthFilter::All, DayFilter::All);
    let durations: Vec<Option<f64>> = table
        .column(columns::TRIP_DURATION)
        .unwrap()
        .map(Value::as_f64)
        .collect();

    assert_eq!(durations[0], Some(1039.0));
    assert_eq!(durations[8], None);
    assert_eq!(durations[9], Some(400.0));
}

#[test]
fn test_index_column_is_dropped_and_fields_derived() {
    let table = load(City::Chicago, MonthFilter::All, DayFilter::All);
    assert_eq!(table.schema.fields[0].name, columns::START_TIME);
    assert!(table.has_column(columns::MONTH));
    assert!(table.has_column(columns::DAY));
    assert!(table.has_column(columns::START_HOUR));

    // The unparseable start time keeps its row with null calendar fields
    assert_eq!(text_column(&table, columns::MONTH)[9], None);
    assert_eq!(text_column(&table, columns::START_HOUR)[9], None);
    assert_eq!(
        text_column(&table, columns::START_HOUR)[0].as_deref(),
        Some("15")
    );
}

#[test]
fn test_every_row_matches_filters() {
    for month in MonthFilter::ALL {
        for day in DayFilter::ALL {
            for city in City::ALL {
                let table = load(city, month, day);
                for value in text_column(&table, columns::MONTH) {
                    if let Some(m) = month.month() {
                        assert_eq!(value.as_deref(), Some(m));
                    }
                }
                for value in text_column(&table, columns::DAY) {
                    if let Some(d) = day.day() {
                        assert_eq!(value.as_deref(), Some(d));
                    }
                }
            }
        }
    }
}

#[test]
fn test_filtering_is_idempotent() {
    let filtered = load(City::Chicago, MonthFilter::June, DayFilter::Monday);
    assert_eq!(filtered.len(), 2);

    let month = FilterProcessor::for_month(MonthFilter::June).unwrap();
    let day = FilterProcessor::for_day(DayFilter::Monday).unwrap();
    let again = Pipeline::new("refilter")
        .add(month)
        .add(day)
        .execute(&filtered)
        .unwrap();

    assert_eq!(again, filtered);
}

#[test]
fn test_chicago_june() {
    let table = load(City::Chicago, MonthFilter::June, DayFilter::All);
    assert_eq!(table.len(), 4);

    let times = time_stats(&table).available().unwrap();
    assert_eq!(times.most_common_month.as_deref(), Some("june"));
    // friday and monday tie at two trips each
    assert_eq!(times.most_common_day.as_deref(), Some("friday"));
    assert_eq!(times.most_common_hour.as_deref(), Some("15"));

    let stations = station_stats(&table).available().unwrap();
    assert_eq!(stations.most_common_start.as_deref(), Some("Wood St & Hubbard St"));
    assert_eq!(stations.most_common_end.as_deref(), Some("Damen Ave & Chicago Ave"));
    assert_eq!(
        stations.most_common_trip,
        Some(StationPair {
            start: "Wood St & Hubbard St".to_string(),
            end: "Damen Ave & Chicago Ave".to_string(),
        })
    );

    let durations = trip_duration_stats(&table).available().unwrap();
    assert_eq!(durations.total, 3456.0);
    assert_eq!(durations.rounded_mean(), Some(864));

    let users = user_stats(&table).available().unwrap();
    assert_eq!(
        users.user_types,
        ColumnStat::Present(vec![("Customer".to_string(), 1), ("Subscriber".to_string(), 3)])
    );
    assert_eq!(
        users.genders,
        ColumnStat::Present(vec![("Female".to_string(), 1), ("Male".to_string(), 2)])
    );
    assert_eq!(
        users.birth_years,
        ColumnStat::Present(BirthYearStats {
            earliest: Some(1989),
            most_recent: Some(1992),
            most_common: Some(1989),
        })
    );
}

#[test]
fn test_duration_mean_matches_sum_over_count() {
    for city in City::ALL {
        let table = load(city, MonthFilter::All, DayFilter::All);
        let stats = trip_duration_stats(&table).available().unwrap();
        let mean = stats.mean.unwrap();
        assert!((stats.total / stats.counted as f64 - mean).abs() < 1e-9);
    }

    let chicago = trip_duration_stats(&load(City::Chicago, MonthFilter::All, DayFilter::All))
        .available()
        .unwrap();
    assert_eq!(chicago.counted, 9);
    assert_eq!(chicago.total, 5709.0);
    assert_eq!(chicago.rounded_mean(), Some(634));
}

#[test]
fn test_empty_result_reports_no_data() {
    let table = load(City::Chicago, MonthFilter::February, DayFilter::All);
    assert!(table.is_empty());

    assert!(time_stats(&table).is_no_data());
    assert!(station_stats(&table).is_no_data());
    assert!(trip_duration_stats(&table).is_no_data());
    assert!(user_stats(&table).is_no_data());
}

#[test]
fn test_washington_has_no_demographics() {
    let table = load(City::Washington, MonthFilter::All, DayFilter::All);
    let users = user_stats(&table).available().unwrap();

    assert_eq!(
        users.user_types,
        ColumnStat::Present(vec![("Customer".to_string(), 3), ("Subscriber".to_string(), 3)])
    );
    assert_eq!(users.genders, ColumnStat::NotPresent);
    assert_eq!(users.birth_years, ColumnStat::NotPresent);

    // The other groups are unaffected by the missing columns
    let times = time_stats(&table).available().unwrap();
    assert_eq!(times.most_common_month.as_deref(), Some("june"));
    assert_eq!(times.most_common_day.as_deref(), Some("saturday"));
    assert_eq!(times.most_common_hour.as_deref(), Some("07"));

    let stations = station_stats(&table).available().unwrap();
    assert_eq!(
        stations.most_common_trip,
        Some(StationPair {
            start: "14th & Belmont St NW".to_string(),
            end: "15th & K St NW".to_string(),
        })
    );
}

#[test]
fn test_birth_year_tie_breaks_to_earliest() {
    let table = load(City::Chicago, MonthFilter::All, DayFilter::All);
    let users = user_stats(&table).available().unwrap();
    assert_eq!(
        users.birth_years,
        ColumnStat::Present(BirthYearStats {
            earliest: Some(1960),
            most_recent: Some(1992),
            most_common: Some(1989),
        })
    );
}

#[test]
fn test_missing_source_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let registry = CityRegistry::with_base_dir(dir.path());

    let err = TripLoader::new(&registry)
        .load(City::Washington, MonthFilter::All, DayFilter::All)
        .unwrap_err();
    assert!(matches!(
        err,
        ProcessingError::DataError(DataError::DataSourceNotFound(_))
    ));
}

#[test]
fn test_pipeline_is_reusable_on_raw_data() {
    let registry = fixtures();
    let raw = CsvSource::new(registry.path(City::NewYorkCity))
        .read()
        .unwrap();

    let pipeline = load_pipeline(City::NewYorkCity, MonthFilter::All, DayFilter::Sunday);
    let first = pipeline.execute(&raw).unwrap();
    let second = pipeline.execute(&raw).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), 1);
}
