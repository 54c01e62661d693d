// Per-city schema descriptors and value coercion
// Author: Gabriel Demetrios Lafis

use chrono::{NaiveDate, NaiveDateTime};

use super::{columns, DataType, Value};

const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// A field the loader knows how to coerce
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub data_type: DataType,
    pub optional: bool,
}

impl FieldSpec {
    pub const fn required(name: &'static str, data_type: DataType) -> Self {
        FieldSpec {
            name,
            data_type,
            optional: false,
        }
    }

    pub const fn optional(name: &'static str, data_type: DataType) -> Self {
        FieldSpec {
            name,
            data_type,
            optional: true,
        }
    }
}

/// Ordered description of the columns in a city's trip file.
///
/// Columns present in the file but not listed here pass through as text.
#[derive(Debug, Clone, PartialEq)]
pub struct CitySchema {
    fields: Vec<FieldSpec>,
}

impl CitySchema {
    /// Create a schema from field specs
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        CitySchema { fields }
    }

    fn common() -> Vec<FieldSpec> {
        vec![
            FieldSpec::required(columns::START_TIME, DataType::Timestamp),
            FieldSpec::required(columns::END_TIME, DataType::Timestamp),
            FieldSpec::required(columns::TRIP_DURATION, DataType::Float),
            FieldSpec::required(columns::START_STATION, DataType::String),
            FieldSpec::required(columns::END_STATION, DataType::String),
        ]
    }

    /// Schema for cities that publish rider demographics
    pub fn with_demographics() -> Self {
        let mut fields = Self::common();
        fields.push(FieldSpec::optional(columns::USER_TYPE, DataType::String));
        fields.push(FieldSpec::optional(columns::GENDER, DataType::String));
        fields.push(FieldSpec::optional(columns::BIRTH_YEAR, DataType::Float));
        Self::new(fields)
    }

    /// Schema for cities that only publish the rider type
    pub fn user_type_only() -> Self {
        let mut fields = Self::common();
        fields.push(FieldSpec::optional(columns::USER_TYPE, DataType::String));
        Self::new(fields)
    }

    /// Look up a field spec by column name
    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Iterate over the field specs in declaration order
    pub fn fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter()
    }

    /// Target type for a column; unknown columns stay text
    pub fn data_type_of(&self, name: &str) -> DataType {
        self.get(name).map_or(DataType::String, |f| f.data_type)
    }
}

/// Converts raw text values to the types a schema asks for
pub struct SchemaValidator;

impl SchemaValidator {
    /// Coerce a value to `data_type`.
    ///
    /// Returns `None` when the value could not be converted; the caller
    /// decides what to substitute (the loader uses `Value::Null`).
    pub fn coerce(value: &Value, data_type: DataType) -> Option<Value> {
        match (value, data_type) {
            (Value::Null, _) => Some(Value::Null),
            (Value::String(s), DataType::String) => Some(Value::String(s.clone())),
            (Value::String(s), DataType::Float) => parse_number(s).map(Value::Float),
            (Value::String(s), DataType::Timestamp) => parse_timestamp(s).map(Value::Timestamp),
            (Value::Float(_), DataType::Float) | (Value::Timestamp(_), DataType::Timestamp) => {
                Some(value.clone())
            }
            _ => None,
        }
    }
}

/// Parse a plain decimal number, rejecting NaN and infinities
pub fn parse_number(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a trip timestamp in any of the accepted layouts
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}
