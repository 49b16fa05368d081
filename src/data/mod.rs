use std::path::PathBuf;
use thiserror::Error;

pub mod cell;
pub mod loader;
pub mod snapshot;

pub use cell::{Cell, ColumnKind};
pub use loader::{load_snapshot, load_snapshot_from_reader};
pub use snapshot::{Column, ProductRecord, Row, Snapshot};

pub const PRODUCT_ID_COLUMN: &str = "Product ID";
pub const STOCK_LEVELS_COLUMN: &str = "Stock levels";
pub const ORDER_QUANTITIES_COLUMN: &str = "Order quantities";

#[derive(Error, Debug)]
pub enum DataError {
    #[error("Failed to open dataset at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse dataset: {0}")]
    Csv(#[from] csv::Error),
    #[error("Dataset is missing required column '{0}'")]
    MissingColumn(String),
    #[error("Column '{0}' must hold numeric values")]
    NonNumericColumn(String),
}
