// Data module for trip records, schemas and sources
// Author: Gabriel Demetrios Lafis

mod city;
mod csv;
mod schema;

pub use self::city::*;
pub use self::csv::*;
pub use self::schema::*;

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use chrono::NaiveDateTime;
use thiserror::Error;

/// Column names shared by every city dataset
pub mod columns {
    pub const START_TIME: &str = "Start Time";
    pub const END_TIME: &str = "End Time";
    pub const TRIP_DURATION: &str = "Trip Duration";
    pub const START_STATION: &str = "Start Station";
    pub const END_STATION: &str = "End Station";
    pub const USER_TYPE: &str = "User Type";
    pub const GENDER: &str = "Gender";
    pub const BIRTH_YEAR: &str = "Birth Year";

    // Derived at load time from the start time
    pub const MONTH: &str = "Month";
    pub const DAY: &str = "Day";
    pub const START_HOUR: &str = "Start Hour";
}

/// Represents a generic data source
#[cfg_attr(test, mockall::automock)]
pub trait DataSource {
    /// Read every record from the source
    fn read(&self) -> Result<DataSet, DataError>;
}

/// Represents a dataset with schema and data
#[derive(Debug, Clone, PartialEq)]
pub struct DataSet {
    pub schema: Schema,
    pub data: Vec<Row>,
    pub metadata: Metadata,
}

impl DataSet {
    /// Create a new empty dataset
    pub fn new(schema: Schema) -> Self {
        DataSet {
            schema,
            data: Vec::new(),
            metadata: Metadata::new(),
        }
    }

    /// Add a row to the dataset
    pub fn add_row(&mut self, row: Row) -> Result<(), DataError> {
        if row.values.len() != self.schema.fields.len() {
            return Err(DataError::SchemaMismatch {
                expected: self.schema.fields.len(),
                found: row.values.len(),
            });
        }

        self.data.push(row);
        Ok(())
    }

    /// Get the number of rows in the dataset
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the dataset is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Check whether the schema carries a column
    pub fn has_column(&self, name: &str) -> bool {
        self.schema.index_of(name).is_some()
    }

    /// Iterate over one column's values, or `None` if the column is absent
    pub fn column<'a>(&'a self, name: &str) -> Option<impl Iterator<Item = &'a Value> + 'a> {
        let idx = self.schema.index_of(name)?;
        Some(self.data.iter().map(move |row| &row.values[idx]))
    }

    /// Copy the schema and metadata of this dataset into a new, empty one
    pub fn empty_like(&self) -> DataSet {
        DataSet {
            schema: self.schema.clone(),
            data: Vec::new(),
            metadata: self.metadata.clone(),
        }
    }
}

/// Represents a row in a dataset
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub values: Vec<Value>,
}

impl Row {
    /// Create a new row with the given values
    pub fn new(values: Vec<Value>) -> Self {
        Row { values }
    }
}

/// Represents a value in a row
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Float(f64),
    String(String),
    Timestamp(NaiveDateTime),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<&NaiveDateTime> {
        match self {
            Value::Timestamp(ts) => Some(ts),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NaN"),
            Value::Float(v) => write!(f, "{}", v),
            Value::String(s) => write!(f, "{}", s),
            Value::Timestamp(ts) => write!(f, "{}", ts.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

/// Represents a schema for a dataset
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    pub fields: Vec<Field>,
}

impl Schema {
    /// Create a new schema with the given fields
    pub fn new(fields: Vec<Field>) -> Self {
        Schema { fields }
    }

    /// Get the position of a field by name
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }
}

/// Represents a field in a schema
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub data_type: DataType,
}

impl Field {
    /// Create a new field
    pub fn new(name: String, data_type: DataType) -> Self {
        Field { name, data_type }
    }
}

/// Represents a data type for a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    Float,
    String,
    Timestamp,
}

/// Represents metadata for a dataset
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    pub properties: HashMap<String, String>,
}

impl Metadata {
    /// Create new empty metadata
    pub fn new() -> Self {
        Metadata {
            properties: HashMap::new(),
        }
    }

    /// Add a property to the metadata
    pub fn add(&mut self, key: String, value: String) {
        self.properties.insert(key, value);
    }

    /// Get a property from the metadata
    pub fn get(&self, key: &str) -> Option<&String> {
        self.properties.get(key)
    }
}

/// Represents an error in the data module
#[derive(Debug, Error)]
pub enum DataError {
    #[error("File {} does not exist", .0.display())]
    DataSourceNotFound(PathBuf),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Schema mismatch: expected {expected} values, found {found}")]
    SchemaMismatch { expected: usize, found: usize },
    #[error("Required column '{0}' not found")]
    MissingColumn(String),
}
