// Paginated row viewer
// Author: Gabriel Demetrios Lafis

use std::io::{self, BufRead, Write};
use std::ops::Range;

use super::Console;
use crate::data::DataSet;

/// Shows a table a page at a time while the user keeps answering "yes"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowViewer {
    page_size: usize,
}

impl RowViewer {
    /// Create a viewer; a zero page size is treated as one row per page
    pub fn new(page_size: usize) -> Self {
        RowViewer {
            page_size: page_size.max(1),
        }
    }

    /// Offer the table page by page
    pub fn browse<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
        table: &DataSet,
    ) -> io::Result<()> {
        let mut start = 0;
        let mut question = format!(
            "\nWould you like to see the first {} rows of data? Enter yes or anything else for no.",
            self.page_size
        );

        while console.confirm(&question)? {
            let end = (start + self.page_size).min(table.len());
            write!(console.output(), "{}", format_page(table, start..end))?;
            start = end;

            if start >= table.len() {
                writeln!(console.output(), "\n User has viewed all data in the dataset. \n")?;
                return Ok(());
            }

            question = format!(
                "\nWould you like to see the next {} rows of data? Enter yes or anything else for no.",
                self.page_size
            );
        }

        if start > 0 {
            writeln!(
                console.output(),
                "\n User has exited viewing the dataset {} records at a time. \n",
                self.page_size
            )?;
        }
        Ok(())
    }
}

impl Default for RowViewer {
    fn default() -> Self {
        Self::new(5)
    }
}

/// Render rows `range` of a table as aligned text, prefixed by row index
pub fn format_page(table: &DataSet, range: Range<usize>) -> String {
    let range = range.start.min(table.len())..range.end.min(table.len());
    let rows: Vec<Vec<String>> = table.data[range.clone()]
        .iter()
        .map(|row| row.values.iter().map(|v| v.to_string()).collect())
        .collect();

    let index_width = range.end.saturating_sub(1).to_string().len();
    let widths: Vec<usize> = table
        .schema
        .fields
        .iter()
        .enumerate()
        .map(|(i, field)| {
            rows.iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(field.name.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    out.push_str(&" ".repeat(index_width));
    for (field, width) in table.schema.fields.iter().zip(&widths) {
        out.push_str(&format!("  {:<width$}", field.name, width = *width));
    }
    out.push('\n');

    for (offset, row) in rows.iter().enumerate() {
        out.push_str(&format!("{:>width$}", range.start + offset, width = index_width));
        for (value, width) in row.iter().zip(&widths) {
            out.push_str(&format!("  {:<width$}", value, width = *width));
        }
        out.push('\n');
    }

    out
}
