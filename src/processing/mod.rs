// Processing module for trip data transformation and analysis
// Author: Gabriel Demetrios Lafis

mod filter;
mod stats;
mod transform;

pub use filter::*;
pub use stats::*;
pub use transform::*;

use thiserror::Error;

use crate::data::{DataError, DataSet};

/// Represents a data processor that transforms data
pub trait DataProcessor {
    /// Process a dataset and return a new dataset
    fn process(&self, input: &DataSet) -> Result<DataSet, ProcessingError>;

    /// Get the processor name
    fn name(&self) -> &str;
}

/// Represents an error in the processing module
#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error("Data error: {0}")]
    DataError(#[from] DataError),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Pipeline for chaining multiple processors
pub struct Pipeline {
    name: String,
    processors: Vec<Box<dyn DataProcessor>>,
}

impl Pipeline {
    /// Create a new pipeline with the given name
    pub fn new(name: &str) -> Self {
        Pipeline {
            name: name.to_string(),
            processors: Vec::new(),
        }
    }

    /// Add a processor to the pipeline
    pub fn add<P: DataProcessor + 'static>(mut self, processor: P) -> Self {
        self.processors.push(Box::new(processor));
        self
    }

    /// Add a processor only when one is given
    pub fn add_opt<P: DataProcessor + 'static>(self, processor: Option<P>) -> Self {
        match processor {
            Some(p) => self.add(p),
            None => self,
        }
    }

    /// Number of stages in the pipeline
    pub fn len(&self) -> usize {
        self.processors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processors.is_empty()
    }

    /// Execute the pipeline on a dataset
    pub fn execute(&self, input: &DataSet) -> Result<DataSet, ProcessingError> {
        let mut current = input.clone();

        for processor in &self.processors {
            log::trace!("{}: running {}", self.name, processor.name());
            current = processor.process(&current)?;
        }

        Ok(current)
    }

    /// Execute the pipeline, taking ownership of the input
    pub fn execute_owned(&self, input: DataSet) -> Result<DataSet, ProcessingError> {
        let mut current = input;

        for processor in &self.processors {
            log::trace!("{}: running {}", self.name, processor.name());
            current = processor.process(&current)?;
        }

        Ok(current)
    }
}

impl DataProcessor for Pipeline {
    fn process(&self, input: &DataSet) -> Result<DataSet, ProcessingError> {
        self.execute(input)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
