// Transform operations applied while loading trip data
// Author: Gabriel Demetrios Lafis

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDateTime, Weekday};
use log::debug;

use super::{DataProcessor, ProcessingError};
use crate::data::{
    columns, CitySchema, DataError, DataSet, DataType, Field, Row, Schema, SchemaValidator, Value,
};

const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Lowercase English month name of a timestamp
pub fn month_name(ts: &NaiveDateTime) -> &'static str {
    MONTH_NAMES[ts.month0() as usize]
}

/// Lowercase English weekday name of a timestamp
pub fn day_name(ts: &NaiveDateTime) -> &'static str {
    match ts.weekday() {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

/// Zero-padded hour of a timestamp, e.g. `"08"`
pub fn hour_label(ts: &NaiveDateTime) -> String {
    ts.format("%H").to_string()
}

/// Coerce raw text columns to the types declared by a city schema.
///
/// Values that fail to convert become null; the failures are only counted
/// and logged. A required column missing from the input is an error.
pub struct CoerceTypesTransform {
    schema: CitySchema,
}

impl CoerceTypesTransform {
    /// Create a new coercion transform for a schema
    pub fn new(schema: CitySchema) -> Self {
        CoerceTypesTransform { schema }
    }
}

impl DataProcessor for CoerceTypesTransform {
    fn process(&self, input: &DataSet) -> Result<DataSet, ProcessingError> {
        if let Some(missing) = self
            .schema
            .fields()
            .find(|spec| !spec.optional && !input.has_column(spec.name))
        {
            return Err(DataError::MissingColumn(missing.name.to_string()).into());
        }

        let targets: Vec<DataType> = input
            .schema
            .fields
            .iter()
            .map(|field| self.schema.data_type_of(&field.name))
            .collect();

        let fields: Vec<Field> = input
            .schema
            .fields
            .iter()
            .zip(&targets)
            .map(|(field, data_type)| Field::new(field.name.clone(), *data_type))
            .collect();

        let mut result = DataSet::new(Schema::new(fields));
        result.metadata = input.metadata.clone();

        let mut failures: BTreeMap<&str, usize> = BTreeMap::new();

        for row in &input.data {
            let values: Vec<Value> = row
                .values
                .iter()
                .zip(&targets)
                .enumerate()
                .map(|(i, (value, data_type))| {
                    SchemaValidator::coerce(value, *data_type).unwrap_or_else(|| {
                        *failures.entry(input.schema.fields[i].name.as_str()).or_insert(0) += 1;
                        Value::Null
                    })
                })
                .collect();

            result.add_row(Row::new(values))?;
        }

        for (column, count) in failures {
            debug!("{} value(s) in '{}' could not be coerced and were nulled", count, column);
        }

        Ok(result)
    }

    fn name(&self) -> &str {
        "coerce_types"
    }
}

/// Append the month, weekday and start hour derived from the start time
pub struct DeriveCalendarTransform {
    source_column: String,
}

impl DeriveCalendarTransform {
    /// Derive calendar fields from the given timestamp column
    pub fn new(source_column: &str) -> Self {
        DeriveCalendarTransform {
            source_column: source_column.to_string(),
        }
    }
}

impl Default for DeriveCalendarTransform {
    fn default() -> Self {
        Self::new(columns::START_TIME)
    }
}

impl DataProcessor for DeriveCalendarTransform {
    fn process(&self, input: &DataSet) -> Result<DataSet, ProcessingError> {
        let src_idx = input
            .schema
            .index_of(&self.source_column)
            .ok_or_else(|| DataError::MissingColumn(self.source_column.clone()))?;

        let derived = [columns::MONTH, columns::DAY, columns::START_HOUR];
        for name in derived {
            if input.has_column(name) {
                return Err(ProcessingError::InvalidArgument(format!(
                    "Column '{}' already exists",
                    name
                )));
            }
        }

        let mut fields = input.schema.fields.clone();
        for name in derived {
            fields.push(Field::new(name.to_string(), DataType::String));
        }

        let mut result = DataSet::new(Schema::new(fields));
        result.metadata = input.metadata.clone();

        for row in &input.data {
            let mut values = row.values.clone();
            match row.values[src_idx].as_timestamp() {
                Some(ts) => {
                    values.push(Value::String(month_name(ts).to_string()));
                    values.push(Value::String(day_name(ts).to_string()));
                    values.push(Value::String(hour_label(ts)));
                }
                None => values.extend([Value::Null, Value::Null, Value::Null]),
            }

            result.add_row(Row::new(values))?;
        }

        Ok(result)
    }

    fn name(&self) -> &str {
        "derive_calendar"
    }
}

/// Drop columns matching a predicate; absent columns are not an error
pub struct DropColumnTransform {
    name: String,
    predicate: Box<dyn Fn(&str) -> bool>,
}

impl DropColumnTransform {
    /// Create a transform dropping every column the predicate accepts
    pub fn new<F>(name: &str, predicate: F) -> Self
    where
        F: Fn(&str) -> bool + 'static,
    {
        DropColumnTransform {
            name: name.to_string(),
            predicate: Box::new(predicate),
        }
    }

    /// Drop the positional index carried over from the export, which has a
    /// blank header (or `Unnamed: N` once round-tripped through pandas)
    pub fn index_column() -> Self {
        Self::new("drop_index_column", |col| {
            col.trim().is_empty() || col.starts_with("Unnamed:")
        })
    }
}

impl DataProcessor for DropColumnTransform {
    fn process(&self, input: &DataSet) -> Result<DataSet, ProcessingError> {
        let keep: Vec<usize> = input
            .schema
            .fields
            .iter()
            .enumerate()
            .filter(|(_, field)| !(self.predicate)(&field.name))
            .map(|(i, _)| i)
            .collect();

        if keep.len() == input.schema.fields.len() {
            return Ok(input.clone());
        }

        let fields = keep.iter().map(|&i| input.schema.fields[i].clone()).collect();
        let mut result = DataSet::new(Schema::new(fields));
        result.metadata = input.metadata.clone();

        for row in &input.data {
            let values = keep.iter().map(|&i| row.values[i].clone()).collect();
            result.add_row(Row::new(values))?;
        }

        Ok(result)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
