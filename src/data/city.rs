// City registry mapping the supported cities to their trip files
// Author: Gabriel Demetrios Lafis

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::CitySchema;
use crate::utils::FilterError;

/// A city with a bikeshare dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

impl City {
    pub const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    /// Name as typed by the user
    pub fn name(&self) -> &'static str {
        match self {
            City::Chicago => "chicago",
            City::NewYorkCity => "new york city",
            City::Washington => "washington",
        }
    }

    /// File name of the city's trip data
    pub fn default_file_name(&self) -> &'static str {
        match self {
            City::Chicago => "chicago.csv",
            City::NewYorkCity => "new_york_city.csv",
            City::Washington => "washington.csv",
        }
    }

    /// Schema of the city's trip data
    pub fn schema(&self) -> CitySchema {
        match self {
            City::Chicago | City::NewYorkCity => CitySchema::with_demographics(),
            City::Washington => CitySchema::user_type_only(),
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for City {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        City::ALL
            .iter()
            .copied()
            .find(|city| city.name() == normalized)
            .ok_or(FilterError::InvalidFilterInput {
                kind: "city",
                value: normalized,
            })
    }
}

/// Fixed mapping from each city to the location of its trip data.
///
/// Built once at startup and handed to the loader; the set of cities
/// cannot grow, only the file locations are configurable.
#[derive(Debug, Clone, PartialEq)]
pub struct CityRegistry {
    paths: HashMap<City, PathBuf>,
}

impl CityRegistry {
    /// Registry resolving the default file names against `base_dir`
    pub fn with_base_dir<P: AsRef<Path>>(base_dir: P) -> Self {
        Self::with_overrides(base_dir, &HashMap::new())
    }

    /// Registry resolving file names against `base_dir`, using `overrides`
    /// in place of the default file name where given
    pub fn with_overrides<P: AsRef<Path>>(base_dir: P, overrides: &HashMap<City, String>) -> Self {
        let base_dir = base_dir.as_ref();
        let paths = City::ALL
            .iter()
            .map(|city| {
                let file = overrides
                    .get(city)
                    .map(String::as_str)
                    .unwrap_or_else(|| city.default_file_name());
                (*city, base_dir.join(file))
            })
            .collect();

        CityRegistry { paths }
    }

    /// Location of a city's trip data
    pub fn path(&self, city: City) -> &Path {
        // Every city is inserted on construction
        &self.paths[&city]
    }
}

impl Default for CityRegistry {
    fn default() -> Self {
        Self::with_base_dir(".")
    }
}
