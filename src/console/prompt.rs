// Line-based prompts over any reader and writer
// Author: Gabriel Demetrios Lafis

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use log::debug;

use super::SEPARATOR;
use crate::data::City;
use crate::processing::{DayFilter, MonthFilter};
use crate::utils::{FilterError, Query};

/// Reads answers from `input` and writes prompts to `output`
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Console { input, output }
    }

    /// The writer prompts and reports go to
    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Print a question and read one line; `None` once input is exhausted
    pub fn ask(&mut self, question: &str) -> io::Result<Option<String>> {
        writeln!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(&['\r', '\n'][..]).to_string()))
    }

    /// Ask until the answer parses, printing the error after each bad answer
    pub fn ask_until_valid<T>(&mut self, question: &str) -> io::Result<Option<T>>
    where
        T: FromStr<Err = FilterError>,
    {
        loop {
            let answer = match self.ask(question)? {
                Some(answer) => answer,
                None => return Ok(None),
            };

            match answer.parse::<T>() {
                Ok(value) => return Ok(Some(value)),
                Err(err) => {
                    debug!("Rejected input: {}", err);
                    writeln!(self.output, "{}. \n", err)?;
                }
            }
        }
    }

    /// Ask a yes/no question; only "yes" (any case) counts as yes
    pub fn confirm(&mut self, question: &str) -> io::Result<bool> {
        Ok(self
            .ask(question)?
            .map_or(false, |answer| answer.trim().eq_ignore_ascii_case("yes")))
    }

    /// Ask for city, month and day; `None` if input ends first
    pub fn get_filters(&mut self) -> io::Result<Option<Query>> {
        writeln!(self.output, "{}", SEPARATOR)?;
        writeln!(self.output, "Hello! Let's explore some US bikeshare data!")?;

        let city = match self.ask_until_valid::<City>(
            "Please enter one of the following cities: 'chicago', 'new york city', 'washington'",
        )? {
            Some(city) => city,
            None => return Ok(None),
        };
        writeln!(self.output, "{} selected!", city)?;

        let month = match self.ask_until_valid::<MonthFilter>(
            "Please specify the month of the calendar year (up until June) or enter 'all' to select all months:",
        )? {
            Some(month) => month,
            None => return Ok(None),
        };
        writeln!(self.output, "{} selected!", month)?;

        let day = match self.ask_until_valid::<DayFilter>(
            "Please specify the day of the week or enter 'all' to select all days of the week:",
        )? {
            Some(day) => day,
            None => return Ok(None),
        };
        writeln!(self.output, "{} selected!", day)?;
        writeln!(self.output, "{}", SEPARATOR)?;

        Ok(Some(Query::new(city, month, day)))
    }
}
