// Plain-text rendering of the statistic groups
// Author: Gabriel Demetrios Lafis

use std::io::{self, Write};

use crate::processing::{
    BirthYearStats, ColumnStat, DurationStats, StationStats, TimeStats, UserStats,
};

/// The statistic groups, in the order they are reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatGroup {
    Time,
    Station,
    Duration,
    User,
}

impl StatGroup {
    pub const ALL: [StatGroup; 4] = [
        StatGroup::Time,
        StatGroup::Station,
        StatGroup::Duration,
        StatGroup::User,
    ];

    /// Banner printed before computing the group
    pub fn heading(&self) -> &'static str {
        match self {
            StatGroup::Time => "Calculating The Most Frequent Times of Travel...",
            StatGroup::Station => "Calculating The Most Popular Stations and Trip...",
            StatGroup::Duration => "Calculating Trip Duration...",
            StatGroup::User => "Calculating User Stats...",
        }
    }

    /// Short name used in the no-data message
    pub fn label(&self) -> &'static str {
        match self {
            StatGroup::Time => "time",
            StatGroup::Station => "station",
            StatGroup::Duration => "trip duration",
            StatGroup::User => "user",
        }
    }
}

fn or_na(value: Option<&str>) -> &str {
    value.unwrap_or("n/a")
}

fn year_or_na(value: Option<i64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| v.to_string())
}

/// Message for a filter combination without trips
pub fn write_no_data<W: Write>(out: &mut W, group: StatGroup) -> io::Result<()> {
    writeln!(
        out,
        "There is no available data to compute {} stats for the combination of city, month, and day which were entered. \n",
        group.label()
    )
}

pub fn write_time_stats<W: Write>(out: &mut W, stats: &TimeStats) -> io::Result<()> {
    writeln!(out, "Most commonly traveled month: {}", or_na(stats.most_common_month.as_deref()))?;
    writeln!(
        out,
        "Most commonly traveled day of the week: {}",
        or_na(stats.most_common_day.as_deref())
    )?;
    match &stats.most_common_hour {
        Some(hour) => writeln!(out, "Most commonly traveled starting hour: {}:00", hour),
        None => writeln!(out, "Most commonly traveled starting hour: n/a"),
    }
}

pub fn write_station_stats<W: Write>(out: &mut W, stats: &StationStats) -> io::Result<()> {
    writeln!(
        out,
        "Most commonly used Start Station: {}",
        or_na(stats.most_common_start.as_deref())
    )?;
    writeln!(
        out,
        "Most commonly used End Station: {}",
        or_na(stats.most_common_end.as_deref())
    )?;
    match &stats.most_common_trip {
        Some(trip) => writeln!(out, "Most common trip taken: {} to {}", trip.start, trip.end),
        None => writeln!(out, "Most common trip taken: n/a"),
    }
}

pub fn write_duration_stats<W: Write>(out: &mut W, stats: &DurationStats) -> io::Result<()> {
    writeln!(out, "Total trip duration: {} minutes", stats.total)?;
    match stats.rounded_mean() {
        Some(mean) => writeln!(out, "Mean trip duration: {} minutes", mean),
        None => writeln!(out, "Mean trip duration: n/a"),
    }
}

fn write_counts<W: Write>(
    out: &mut W,
    title: &str,
    column: &str,
    counts: &ColumnStat<Vec<(String, usize)>>,
) -> io::Result<()> {
    match counts {
        ColumnStat::Present(counts) => {
            writeln!(out, "{} Counts: \n", title)?;
            let width = counts.iter().map(|(v, _)| v.chars().count()).max().unwrap_or(0);
            for (value, count) in counts {
                writeln!(out, "{:<width$}  {}", value, count, width = width)?;
            }
            writeln!(out)
        }
        ColumnStat::NotPresent => writeln!(out, "Column '{}' not found in dataset. \n", column),
    }
}

fn write_birth_years<W: Write>(out: &mut W, stats: &ColumnStat<BirthYearStats>) -> io::Result<()> {
    match stats {
        ColumnStat::Present(years) => {
            writeln!(out, "Oldest Passenger's Year of Birth: {}", year_or_na(years.earliest))?;
            writeln!(out, "Youngest Passenger's Year of Birth: {}", year_or_na(years.most_recent))?;
            writeln!(out, "Most common Year of Birth: {}", year_or_na(years.most_common))
        }
        ColumnStat::NotPresent => writeln!(out, "Column 'Birth Year' not found in dataset. \n"),
    }
}

pub fn write_user_stats<W: Write>(out: &mut W, stats: &UserStats) -> io::Result<()> {
    write_counts(out, "User Type", "User Type", &stats.user_types)?;
    write_counts(out, "Gender", "Gender", &stats.genders)?;
    write_birth_years(out, &stats.birth_years)
}
