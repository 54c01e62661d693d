// CSV data source implementation
// Author: Gabriel Demetrios Lafis

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use log::debug;

use super::{DataError, DataSet, DataSource, DataType, Field, Row, Schema, Value};

/// Comma-delimited CSV data source with a header row.
///
/// Every column is read as text; empty cells become `Value::Null`. Rows
/// shorter than the header are padded with nulls, longer rows are an error.
pub struct CsvSource {
    path: PathBuf,
}

impl CsvSource {
    /// Create a new CSV data source
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        CsvSource {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Read a dataset from any reader
    pub fn read_from<R: Read>(&self, reader: R) -> Result<DataSet, DataError> {
        let mut csv_reader = ::csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let fields: Vec<Field> = csv_reader
            .headers()
            .map_err(|e| DataError::ParseError(e.to_string()))?
            .iter()
            .map(|name| Field::new(name.to_string(), DataType::String))
            .collect();
        let width = fields.len();

        let mut dataset = DataSet::new(Schema::new(fields));
        let mut padded = 0usize;

        for (i, result) in csv_reader.records().enumerate() {
            let record = result.map_err(|e| DataError::ParseError(e.to_string()))?;
            if record.len() > width {
                // Line numbers count the header as line 1
                return Err(DataError::ParseError(format!(
                    "line {}: expected {} fields, found {}",
                    i + 2,
                    width,
                    record.len()
                )));
            }

            let mut values: Vec<Value> = record
                .iter()
                .map(|field| {
                    if field.is_empty() {
                        Value::Null
                    } else {
                        Value::String(field.to_string())
                    }
                })
                .collect();
            if values.len() < width {
                padded += 1;
                values.resize(width, Value::Null);
            }

            dataset.add_row(Row::new(values))?;
        }

        let name = self.path.to_string_lossy().to_string();
        if padded > 0 {
            debug!("{}: padded {} short row(s) with nulls", name, padded);
        }
        debug!("Read {} records from {}", dataset.len(), name);

        dataset.metadata.add("source".to_string(), "csv".to_string());
        dataset.metadata.add("path".to_string(), name);

        Ok(dataset)
    }
}

impl DataSource for CsvSource {
    fn read(&self) -> Result<DataSet, DataError> {
        let file = File::open(&self.path).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => DataError::DataSourceNotFound(self.path.clone()),
            _ => DataError::IoError(err),
        })?;

        self.read_from(BufReader::new(file))
    }
}
