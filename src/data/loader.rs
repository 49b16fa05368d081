use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{debug, info};

use super::cell::{self, Cell, ColumnKind};
use super::snapshot::{Column, Snapshot};
use super::{DataError, ORDER_QUANTITIES_COLUMN, PRODUCT_ID_COLUMN, STOCK_LEVELS_COLUMN};

/// Reads the dataset file into an immutable [`Snapshot`].
///
/// Any failure here is fatal for the service: there is no partial load.
pub fn load_snapshot(path: impl AsRef<Path>) -> Result<Snapshot, DataError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let snapshot = load_snapshot_from_reader(file)?;
    info!(
        path = %path.display(),
        rows = snapshot.len(),
        columns = snapshot.columns().len(),
        normalized_cells = snapshot.normalized_cells(),
        "Loaded dataset snapshot."
    );
    Ok(snapshot)
}

pub fn load_snapshot_from_reader<R: Read>(reader: R) -> Result<Snapshot, DataError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let names = dedupe_column_names(csv_reader.headers()?.iter());

    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        raw_rows.push(record.iter().map(str::to_owned).collect());
    }

    let kinds: Vec<ColumnKind> = (0..names.len())
        .map(|idx| infer_kind(raw_rows.iter().map(|row| row[idx].as_str())))
        .collect();

    let columns: Vec<Column> = names
        .into_iter()
        .zip(kinds)
        .map(|(name, kind)| Column { name, kind })
        .collect();
    validate_columns(&columns)?;

    let mut normalized_cells = 0usize;
    let rows: Vec<Vec<Cell>> = raw_rows
        .iter()
        .map(|raw| {
            raw.iter()
                .zip(&columns)
                .map(|(value, column)| {
                    let (cell, replaced) = resolve_cell(value, column.kind);
                    if replaced {
                        normalized_cells += 1;
                    }
                    cell
                })
                .collect::<Vec<Cell>>()
        })
        .collect();

    debug!(normalized_cells, "Replaced infinite and missing values with zero.");
    Ok(Snapshot::new(columns, rows, normalized_cells))
}

/// Repeated header names get a `.N` suffix so every column stays addressable.
fn dedupe_column_names<'a>(headers: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    headers
        .map(|name| {
            let count = seen.entry(name.to_string()).or_insert(0);
            let unique = if *count == 0 {
                name.to_string()
            } else {
                format!("{name}.{count}")
            };
            *count += 1;
            unique
        })
        .collect()
}

/// A column is numeric when every present value parses as a number. It is
/// integral only if nothing is missing and no value has a fractional form.
fn infer_kind<'a>(values: impl Iterator<Item = &'a str>) -> ColumnKind {
    let mut any_missing = false;
    let mut all_integers = true;
    for value in values {
        if cell::is_missing(value) {
            any_missing = true;
            continue;
        }
        if cell::parse_number(value).is_none() {
            return ColumnKind::Text;
        }
        if cell::parse_integer(value).is_none() {
            all_integers = false;
        }
    }
    if all_integers && !any_missing {
        ColumnKind::Integer
    } else {
        ColumnKind::Float
    }
}

fn resolve_cell(raw: &str, kind: ColumnKind) -> (Cell, bool) {
    match kind {
        ColumnKind::Integer => match cell::parse_integer(raw) {
            Some(v) => (Cell::Integer(v), false),
            None => (Cell::Integer(0), true),
        },
        ColumnKind::Float => match cell::parse_number(raw).filter(|_| !cell::is_missing(raw)) {
            Some(v) => {
                let (v, replaced) = cell::finite_or_zero(v);
                (Cell::Float(v), replaced)
            }
            None => (Cell::Float(0.0), true),
        },
        ColumnKind::Text if cell::is_missing(raw) => (Cell::Integer(0), true),
        ColumnKind::Text => (Cell::Text(raw.to_string()), false),
    }
}

fn validate_columns(columns: &[Column]) -> Result<(), DataError> {
    let find = |name: &str| {
        columns
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| DataError::MissingColumn(name.to_string()))
    };
    find(PRODUCT_ID_COLUMN)?;
    for name in [STOCK_LEVELS_COLUMN, ORDER_QUANTITIES_COLUMN] {
        if !find(name)?.kind.is_numeric() {
            return Err(DataError::NonNumericColumn(name.to_string()));
        }
    }
    Ok(())
}
