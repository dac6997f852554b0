//! Conversion of plain-text numeric matrices into the binary cache.
//!
//! The published files are whitespace-delimited tables whose first column
//! is a row identifier; kernel files additionally carry one header row.

use crate::dataset::store;
use crate::{Result, YeastkernError};
use ndarray::Array2;
use std::path::Path;
use tracing::{debug, info};

fn conversion_error(path: &Path, message: impl std::fmt::Display) -> YeastkernError {
    YeastkernError::Conversion {
        path: path.to_path_buf(),
        message: message.to_string(),
    }
}

/// Parse a whitespace-delimited numeric table.
///
/// Skips one header row when `skip_header` is set, drops the first column
/// of every row unparsed (it is an identifier, not data), and requires all
/// rows to have the same width.
pub fn parse_table(path: &Path, skip_header: bool) -> Result<Array2<f64>> {
    let text = std::fs::read_to_string(path).map_err(|e| YeastkernError::io_with_path(e, path))?;

    let mut lines = text.lines().filter(|line| !line.trim().is_empty());
    if skip_header {
        lines.next();
    }

    let mut values: Vec<f64> = Vec::new();
    let mut n_rows = 0usize;
    let mut n_cols: Option<usize> = None;

    for (line_index, line) in lines.enumerate() {
        let mut fields = line.split_whitespace();
        // First field is the row identifier.
        if fields.next().is_none() {
            continue;
        }

        let mut row_len = 0usize;
        for field in fields {
            let value: f64 = field.parse().map_err(|_| {
                conversion_error(
                    path,
                    format!("Unparsable value {:?} on data row {}", field, line_index),
                )
            })?;
            values.push(value);
            row_len += 1;
        }

        if row_len == 0 {
            return Err(conversion_error(
                path,
                format!("Data row {} has no columns after the identifier", line_index),
            ));
        }
        match n_cols {
            None => n_cols = Some(row_len),
            Some(expected) if expected != row_len => {
                return Err(conversion_error(
                    path,
                    format!(
                        "Data row {} has {} columns, expected {}",
                        line_index, row_len, expected
                    ),
                ));
            }
            Some(_) => {}
        }
        n_rows += 1;
    }

    let n_cols = n_cols.ok_or_else(|| conversion_error(path, "No data rows"))?;
    Array2::from_shape_vec((n_rows, n_cols), values)
        .map_err(|e| conversion_error(path, format!("Shape error: {}", e)))
}

/// Convert a text matrix into the binary cache, then delete the source.
pub fn convert_file(txt_path: &Path, cache_path: &Path, skip_header: bool) -> Result<()> {
    debug!(
        "Converting {} -> {}",
        txt_path.display(),
        cache_path.display()
    );
    let matrix = parse_table(txt_path, skip_header)?;
    store::save_matrix(cache_path, &matrix)?;
    std::fs::remove_file(txt_path).map_err(|e| YeastkernError::io_with_path(e, txt_path))?;
    info!(
        "Converted {} ({} x {})",
        cache_path.display(),
        matrix.nrows(),
        matrix.ncols()
    );
    Ok(())
}
