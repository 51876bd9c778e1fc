//! Table Loader Module
//! Reads packaged use/make and adjacency CSV files into numeric matrices
//! using Polars, normalizing placeholder cells to zero.

use ndarray::{Array1, Array2};
use polars::prelude::*;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Placeholder token used for suppressed cells in the source tables.
const PLACEHOLDER: &str = "---";

#[derive(Error, Debug)]
pub enum TableError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
}

/// A cross-entity flow matrix together with its thresholded variant.
#[derive(Debug, Clone)]
pub struct FlowTable {
    /// Z[i, j] = flow from entity i to entity j.
    pub z: Array2<f64>,
    /// Z with entries below the visual threshold zeroed out.
    pub z_visual: Array2<f64>,
    /// Row/column entity labels, in table order.
    pub countries: Vec<String>,
}

fn read_csv(path: &Path) -> Result<DataFrame, TableError> {
    let df = LazyCsvReader::new(path.to_path_buf())
        .with_infer_schema_length(Some(10000))
        .with_ignore_errors(true)
        .finish()?
        .collect()?;

    debug!(path = %path.display(), rows = df.height(), "loaded csv");
    Ok(df)
}

/// Convert one cell to f64, mapping nulls, NaN and the `---` placeholder
/// to zero. Non-numeric strings also collapse to zero.
fn cell_to_f64(value: &AnyValue) -> f64 {
    let parsed = match value {
        AnyValue::Null => 0.0,
        AnyValue::String(s) => s.trim().parse().unwrap_or(0.0),
        AnyValue::StringOwned(s) => s.trim().parse().unwrap_or(0.0),
        other => other.try_extract::<f64>().unwrap_or(0.0),
    };
    if parsed.is_nan() {
        0.0
    } else {
        parsed
    }
}

fn cell_to_string(value: &AnyValue) -> String {
    value.to_string().trim_matches('"').to_string()
}

/// Collect every column of `df` except those named in `skip` into a
/// row-major matrix, cleaning each cell on the way.
fn frame_to_matrix(df: &DataFrame, skip: &[&str], n_rows: usize) -> Array2<f64> {
    let columns: Vec<&Column> = df
        .get_columns()
        .iter()
        .filter(|c| !skip.contains(&c.name().as_str()))
        .collect();

    let n_rows = n_rows.min(df.height());
    let mut z = Array2::zeros((n_rows, columns.len()));
    for (j, column) in columns.iter().enumerate() {
        for i in 0..n_rows {
            if let Ok(value) = column.get(i) {
                z[[i, j]] = cell_to_f64(&value);
            }
        }
    }
    z
}

/// Read a flow matrix indexed by a `country` key column.
///
/// Missing values and placeholder tokens become 0.0. `rename` maps one
/// index label to a replacement (the cross-country table mislabels
/// Switzerland). Returns the raw matrix alongside a visual variant where
/// entries below `threshold` are zeroed.
pub fn read_flow_matrix(
    path: impl AsRef<Path>,
    threshold: f64,
    rename: Option<(&str, &str)>,
) -> Result<FlowTable, TableError> {
    let df = read_csv(path.as_ref())?;

    let index = df.column("country")?;
    let mut countries: Vec<String> = (0..df.height())
        .map(|i| index.get(i).map(|v| cell_to_string(&v)))
        .collect::<Result<_, _>>()?;
    if let Some((from, to)) = rename {
        for label in countries.iter_mut() {
            if label == from {
                *label = to.to_string();
            }
        }
    }

    let z = frame_to_matrix(&df, &["country"], df.height());
    let z_visual = z.mapv(|v| if v < threshold { 0.0 } else { v });

    Ok(FlowTable {
        z,
        z_visual,
        countries,
    })
}

/// Read a sector-by-sector use table: truncate to the first `n` rows,
/// drop the configured non-sector columns (`None` keeps everything), and
/// return the cleaned numeric matrix.
pub fn read_use_table(
    path: impl AsRef<Path>,
    n: usize,
    drop_columns: Option<&[&str]>,
) -> Result<Array2<f64>, TableError> {
    let mut df = read_csv(path.as_ref())?;

    if let Some(names) = drop_columns {
        for name in names {
            // Propagate missing-column errors rather than skipping.
            df = df.drop(name)?;
        }
    }

    Ok(frame_to_matrix(&df, &[], n))
}

/// Read a single named totals column from a make table, truncated to `n`
/// entries.
pub fn read_output_column(
    path: impl AsRef<Path>,
    column: &str,
    n: usize,
) -> Result<Array1<f64>, TableError> {
    let df = read_csv(path.as_ref())?;
    let totals = df.column(column)?;

    let n = n.min(totals.len());
    let mut x = Array1::zeros(n);
    for i in 0..n {
        x[i] = cell_to_f64(&totals.get(i)?);
    }
    Ok(x)
}
