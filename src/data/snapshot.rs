use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use super::cell::{Cell, ColumnKind};
use super::PRODUCT_ID_COLUMN;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub kind: ColumnKind,
}

/// The in-memory copy of the supply-chain dataset.
///
/// Built once by the loader and never mutated afterwards. Every numeric cell
/// is finite; missing values have already been resolved to zero.
#[derive(Debug, Clone)]
pub struct Snapshot {
    columns: Vec<Column>,
    rows: Vec<Vec<Cell>>,
    normalized_cells: usize,
}

impl Snapshot {
    pub(crate) fn new(columns: Vec<Column>, rows: Vec<Vec<Cell>>, normalized_cells: usize) -> Self {
        Self {
            columns,
            rows,
            normalized_cells,
        }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of infinite or missing cells replaced during loading.
    pub fn normalized_cells(&self) -> usize {
        self.normalized_cells
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows.iter().map(move |cells| Row {
            columns: &self.columns,
            cells,
        })
    }

    /// Selects every row whose `Product ID` text equals `product_id` exactly.
    pub fn product<'a>(&'a self, product_id: &'a str) -> ProductRecord<'a> {
        let rows = match self.column_index(PRODUCT_ID_COLUMN) {
            Some(idx) => self
                .rows
                .iter()
                .filter(|cells| cells[idx].as_text() == Some(product_id))
                .map(Vec::as_slice)
                .collect(),
            None => Vec::new(),
        };
        ProductRecord {
            product_id,
            snapshot: self,
            rows,
        }
    }
}

/// Serializes as an ordered list of records, keys following column order.
impl Serialize for Snapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.rows.len()))?;
        for row in self.rows() {
            seq.serialize_element(&row)?;
        }
        seq.end()
    }
}

/// Read-only view of one snapshot row.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    columns: &'a [Column],
    cells: &'a [Cell],
}

impl<'a> Row<'a> {
    pub fn get(&self, column: &str) -> Option<&'a Cell> {
        self.columns
            .iter()
            .position(|c| c.name == column)
            .map(|idx| &self.cells[idx])
    }

    pub fn cells(&self) -> &'a [Cell] {
        self.cells
    }
}

impl Serialize for Row<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (column, cell) in self.columns.iter().zip(self.cells) {
            map.serialize_entry(&column.name, cell)?;
        }
        map.end()
    }
}

/// All snapshot rows belonging to one product identifier.
#[derive(Debug)]
pub struct ProductRecord<'a> {
    product_id: &'a str,
    snapshot: &'a Snapshot,
    rows: Vec<&'a [Cell]>,
}

impl<'a> ProductRecord<'a> {
    pub fn product_id(&self) -> &'a str {
        self.product_id
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Arithmetic mean of a numeric column over the matched rows.
    ///
    /// Returns `None` when no row matched or the column does not exist.
    pub fn mean(&self, column: &str) -> Option<f64> {
        if self.rows.is_empty() {
            return None;
        }
        let idx = self.snapshot.column_index(column)?;
        let values: Vec<f64> = self
            .rows
            .iter()
            .filter_map(|cells| cells[idx].as_f64())
            .collect();
        if values.is_empty() {
            return None;
        }
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::load_snapshot_from_reader;

    const CSV: &str = "\
Product ID,Product type,Stock levels,Order quantities
P1,haircare,150,90
p1,skincare,10,10
P1,haircare,250,70
P2,cosmetics,5,
";

    fn snapshot() -> Snapshot {
        load_snapshot_from_reader(CSV.as_bytes()).unwrap()
    }

    #[test]
    fn test_product_filter_is_exact_and_case_sensitive() {
        let snapshot = snapshot();
        assert_eq!(snapshot.product("P1").len(), 2);
        assert_eq!(snapshot.product("p1").len(), 1);
        assert!(snapshot.product("P").is_empty());
        assert!(snapshot.product("P1 ").is_empty());
    }

    #[test]
    fn test_mean_over_matched_rows() {
        let snapshot = snapshot();
        let record = snapshot.product("P1");
        assert_eq!(record.product_id(), "P1");
        assert_eq!(record.mean("Stock levels"), Some(200.0));
        assert_eq!(record.mean("Order quantities"), Some(80.0));
        assert_eq!(record.mean("No such column"), None);
        assert_eq!(snapshot.product("missing").mean("Stock levels"), None);
    }

    #[test]
    fn test_row_lookup_by_column() {
        let snapshot = snapshot();
        let row = snapshot.rows().next().unwrap();
        assert_eq!(row.get("Product type"), Some(&Cell::Text("haircare".to_string())));
        assert_eq!(row.get("Stock levels"), Some(&Cell::Integer(150)));
        assert_eq!(row.get("Nope"), None);
        assert_eq!(row.cells().len(), 4);
    }

    #[test]
    fn test_serializes_records_in_column_order() {
        let snapshot = snapshot();
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.starts_with(
            r#"[{"Product ID":"P1","Product type":"haircare","Stock levels":150,"Order quantities":90.0}"#
        ));
        let parsed: Vec<serde_json::Value> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len(), 4);
        assert_eq!(parsed[3]["Order quantities"], serde_json::json!(0.0));
    }
}
