// Bikeshare Explorer
// Author: Gabriel Demetrios Lafis

//! # Bikeshare Explorer
//!
//! Loads bikeshare trip data for Chicago, New York City or Washington,
//! filters it by month and day of week, and reports descriptive statistics.
//!
//! ## Features
//!
//! - Per-city schemas with tolerant type coercion (bad values become null)
//! - Month, weekday and start hour derived from each trip's start time
//! - Most common travel times, stations and station pairs
//! - Trip duration totals and means
//! - Rider demographics, tolerating columns a city does not publish
//! - Interactive console with a paginated row viewer
//!
//! ## Example
//!
//! ```rust,no_run
//! use bikeshare_explorer::{
//!     data::{City, CityRegistry},
//!     loader::TripLoader,
//!     processing::{time_stats, DayFilter, MonthFilter, StatsOutcome},
//! };
//!
//! let registry = CityRegistry::with_base_dir("./data");
//! let table = TripLoader::new(&registry)
//!     .load(City::Chicago, MonthFilter::June, DayFilter::All)
//!     .unwrap();
//!
//! if let StatsOutcome::Available(stats) = time_stats(&table) {
//!     println!("Most common hour: {:?}", stats.most_common_hour);
//! }
//! ```

pub mod console;
pub mod data;
pub mod loader;
pub mod processing;
pub mod utils;

// Re-export main types
pub use data::{City, CityRegistry, DataSet, Row, Schema, Value};
pub use loader::TripLoader;
pub use processing::{DayFilter, MonthFilter, StatsOutcome};
pub use utils::{AppError, Config, Query};
