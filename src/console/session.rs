// Query cycle: load, report every statistic group, browse, restart
// Author: Gabriel Demetrios Lafis

use std::io::{self, BufRead, Write};
use std::time::Instant;

use log::info;

use super::{
    write_duration_stats, write_no_data, write_station_stats, write_time_stats, write_user_stats,
    Console, RowViewer, StatGroup, SEPARATOR,
};
use crate::data::{CityRegistry, DataSet};
use crate::loader::TripLoader;
use crate::processing::{station_stats, time_stats, trip_duration_stats, user_stats, StatsOutcome};
use crate::utils::{AppResult, Query};

/// Compute one statistic group and write it; returns whether there was data
pub fn report_group<W: Write>(out: &mut W, group: StatGroup, table: &DataSet) -> io::Result<bool> {
    let started = Instant::now();

    let rendered = match group {
        StatGroup::Time => render_outcome(out, group, time_stats(table), write_time_stats)?,
        StatGroup::Station => {
            render_outcome(out, group, station_stats(table), write_station_stats)?
        }
        StatGroup::Duration => {
            render_outcome(out, group, trip_duration_stats(table), write_duration_stats)?
        }
        StatGroup::User => render_outcome(out, group, user_stats(table), write_user_stats)?,
    };

    if rendered {
        writeln!(out, "\nThis took {} seconds.", started.elapsed().as_secs_f64())?;
    }
    writeln!(out, "{}", SEPARATOR)?;
    Ok(rendered)
}

fn render_outcome<W, T, F>(
    out: &mut W,
    group: StatGroup,
    outcome: StatsOutcome<T>,
    write: F,
) -> io::Result<bool>
where
    W: Write,
    F: FnOnce(&mut W, &T) -> io::Result<()>,
{
    match outcome {
        StatsOutcome::Available(stats) => {
            writeln!(out, "\n{}\n", group.heading())?;
            write(out, &stats)?;
            Ok(true)
        }
        StatsOutcome::NoData => {
            write_no_data(out, group)?;
            Ok(false)
        }
    }
}

/// Runs query cycles against a city registry
pub struct Session<'a> {
    loader: TripLoader<'a>,
    viewer: RowViewer,
}

impl<'a> Session<'a> {
    pub fn new(registry: &'a CityRegistry, viewer: RowViewer) -> Self {
        Session {
            loader: TripLoader::new(registry),
            viewer,
        }
    }

    /// Report all four groups, offering the row viewer after each one with data
    pub fn report<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
        table: &DataSet,
        browse: bool,
    ) -> io::Result<()> {
        for group in StatGroup::ALL {
            let has_data = report_group(console.output(), group, table)?;
            if browse && has_data {
                self.viewer.browse(console, table)?;
            }
        }
        Ok(())
    }

    /// Load the query's table and report on it
    pub fn run_query<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
        query: Query,
        browse: bool,
    ) -> AppResult<()> {
        let table = self.loader.load(query.city, query.month, query.day)?;
        info!(
            "{} trips match city={} month={} day={}",
            table.len(),
            query.city,
            query.month,
            query.day
        );

        self.report(console, &table, browse)?;
        Ok(())
    }

    /// Prompt, report and offer a restart until the user declines or input ends
    pub fn run_interactive<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
    ) -> AppResult<()> {
        loop {
            let query = match console.get_filters()? {
                Some(query) => query,
                None => return Ok(()),
            };

            self.run_query(console, query, true)?;

            if !console.confirm("\nWould you like to restart? Enter yes or anything else for no.")? {
                return Ok(());
            }
        }
    }
}
