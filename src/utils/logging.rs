// Logging utilities
// Author: Gabriel Demetrios Lafis

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::sync::Mutex;

use log::{Level, LevelFilter, Metadata, Record};

use super::AppResult;

/// Initialize logging with the given level.
///
/// Records go to stderr so they never mix with the prompts on stdout,
/// or are appended to `file` when one is given.
pub fn init_logging(level: LevelFilter, file: Option<&str>) -> AppResult<()> {
    let sink = match file {
        Some(path) => Some(Mutex::new(
            OpenOptions::new().create(true).append(true).open(path)?,
        )),
        None => None,
    };

    log::set_boxed_logger(Box::new(SimpleLogger { level, sink }))?;
    log::set_max_level(level);
    Ok(())
}

/// Simple logger implementation
struct SimpleLogger {
    level: LevelFilter,
    sink: Option<Mutex<File>>,
}

fn level_tag(level: Level, colored: bool) -> &'static str {
    match (level, colored) {
        (Level::Error, true) => "\x1B[31mERROR\x1B[0m",
        (Level::Warn, true) => "\x1B[33mWARN\x1B[0m",
        (Level::Info, true) => "\x1B[32mINFO\x1B[0m",
        (Level::Debug, true) => "\x1B[34mDEBUG\x1B[0m",
        (Level::Trace, true) => "\x1B[90mTRACE\x1B[0m",
        (Level::Error, false) => "ERROR",
        (Level::Warn, false) => "WARN",
        (Level::Info, false) => "INFO",
        (Level::Debug, false) => "DEBUG",
        (Level::Trace, false) => "TRACE",
    }
}

fn format_line(level: Level, colored: bool, message: &std::fmt::Arguments) -> String {
    format!(
        "[{}] {}: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        level_tag(level, colored),
        message
    )
}

impl log::Log for SimpleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        match &self.sink {
            Some(file) => {
                if let Ok(mut file) = file.lock() {
                    let _ = writeln!(file, "{}", format_line(record.level(), false, record.args()));
                }
            }
            None => eprintln!("{}", format_line(record.level(), true, record.args())),
        }
    }

    fn flush(&self) {
        if let Some(file) = &self.sink {
            if let Ok(mut file) = file.lock() {
                let _ = file.flush();
            }
        }
    }
}
