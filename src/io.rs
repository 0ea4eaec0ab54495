//! Plain-text persistence of numeric tables.
//!
//! Tables are whitespace-delimited, one row per line, with every value in
//! C-style `%.4e` notation (`-1.5000e+01`).

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use nalgebra::DMatrix;
use tracing::debug;

use crate::error::Result;
use crate::math::Point3;

/// Destination for the tables a survey run produces.
pub trait Persistence {
    /// Writes a 2D table, one matrix row per line.
    ///
    /// # Errors
    ///
    /// Returns an error if the table cannot be written.
    fn write_table(&self, path: &Path, table: &DMatrix<f64>) -> Result<()>;

    /// Writes topography points as `x y z` rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the table cannot be written.
    fn write_topography(&self, path: &Path, points: &[Point3]) -> Result<()> {
        self.write_table(path, &points_table(points, &[]))
    }
}

/// Builds a table with rows `x y z extra...`.
///
/// Each column of `extra` must have one entry per point; missing entries are
/// written as NaN.
#[must_use]
pub fn points_table(points: &[Point3], extra: &[&[f64]]) -> DMatrix<f64> {
    DMatrix::from_fn(points.len(), 3 + extra.len(), |row, col| match col {
        0..=2 => points[row][col],
        _ => extra[col - 3].get(row).copied().unwrap_or(f64::NAN),
    })
}

/// Formats a value like C's `%.4e`.
#[must_use]
pub fn format_sci(value: f64) -> String {
    if value.is_nan() {
        return "nan".into();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.into();
    }
    let formatted = format!("{value:.4e}");
    let Some((mantissa, exponent)) = formatted.split_once('e') else {
        return formatted;
    };
    let (sign, digits) = match exponent.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exponent),
    };
    format!("{mantissa}e{sign}{digits:0>2}")
}

/// Writes tables as whitespace-delimited `%.4e` text.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextTableWriter;

impl TextTableWriter {
    /// Creates a new writer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Renders `table` to `out`.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `out` fails.
    pub fn render(table: &DMatrix<f64>, out: &mut impl Write) -> Result<()> {
        for row in table.row_iter() {
            let line: Vec<String> = row.iter().map(|&v| format_sci(v)).collect();
            writeln!(out, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

impl Persistence for TextTableWriter {
    fn write_table(&self, path: &Path, table: &DMatrix<f64>) -> Result<()> {
        let mut out = BufWriter::new(File::create(path)?);
        Self::render(table, &mut out)?;
        out.flush()?;
        debug!(
            path = %path.display(),
            rows = table.nrows(),
            columns = table.ncols(),
            "Wrote table"
        );
        Ok(())
    }
}
