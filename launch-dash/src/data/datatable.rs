use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Summary type of a column, merged over every non-empty cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataType {
    Text,
    Integer,
    Float,
    Null,
}

impl DataType {
    pub fn infer_from_string(value: &str) -> Self {
        DataValue::parse(value).data_type()
    }

    /// Integers widen to floats, anything else that disagrees falls back to text
    pub fn merge(self, other: DataType) -> DataType {
        match (self, other) {
            (a, b) if a == b => a,
            (DataType::Null, t) | (t, DataType::Null) => t,
            (DataType::Integer, DataType::Float) | (DataType::Float, DataType::Integer) => {
                DataType::Float
            }
            _ => DataType::Text,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataColumn {
    pub name: String,
    pub data_type: DataType,
}

impl DataColumn {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: DataType::Null,
        }
    }
}

/// Typed reading of a single cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DataValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Null,
}

impl DataValue {
    /// Empty and `null` cells are missing. Only finite numbers count as numeric,
    /// so `NaN` and `inf` stay text.
    pub fn parse(s: &str) -> Self {
        if s.is_empty() || s.eq_ignore_ascii_case("null") {
            return DataValue::Null;
        }
        if let Ok(i) = s.parse::<i64>() {
            return DataValue::Integer(i);
        }
        match s.parse::<f64>() {
            Ok(f) if f.is_finite() => DataValue::Float(f),
            _ => DataValue::Text(s.to_string()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, DataValue::Null)
    }

    /// Numeric view of the value. Text is not coerced.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            DataValue::Integer(i) => Some(*i as f64),
            DataValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn data_type(&self) -> DataType {
        match self {
            DataValue::Text(_) => DataType::Text,
            DataValue::Integer(_) => DataType::Integer,
            DataValue::Float(_) => DataType::Float,
            DataValue::Null => DataType::Null,
        }
    }
}

/// One CSV record, cells kept exactly as read
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataRow {
    cells: Vec<String>,
}

impl DataRow {
    pub fn new(cells: Vec<String>) -> Self {
        Self { cells }
    }

    pub fn text(&self, index: usize) -> Option<&str> {
        self.cells.get(index).map(String::as_str)
    }

    pub fn value(&self, index: usize) -> Option<DataValue> {
        self.text(index).map(DataValue::parse)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// In-memory table the CSV loader lands rows into
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataTable {
    pub name: String,
    pub columns: Vec<DataColumn>,
    pub rows: Vec<DataRow>,
    pub metadata: HashMap<String, String>,
}

impl DataTable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            rows: Vec::new(),
            metadata: HashMap::new(),
        }
    }

    pub fn add_column(&mut self, column: DataColumn) -> &mut Self {
        self.columns.push(column);
        self
    }

    pub fn add_row(&mut self, row: DataRow) -> Result<(), String> {
        if row.len() != self.columns.len() {
            return Err(format!(
                "Row has {} values but table has {} columns",
                row.len(),
                self.columns.len()
            ));
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn get_column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// Source text of a cell
    pub fn text(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.text(col)
    }

    pub fn value(&self, row: usize, col: usize) -> Option<DataValue> {
        self.rows.get(row)?.value(col)
    }

    /// Recompute every column type from all rows
    pub fn infer_column_types(&mut self) {
        for (col_idx, column) in self.columns.iter_mut().enumerate() {
            column.data_type = self
                .rows
                .iter()
                .filter_map(|row| row.text(col_idx))
                .map(DataType::infer_from_string)
                .fold(DataType::Null, DataType::merge);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> DataRow {
        DataRow::new(cells.iter().map(|c| c.to_string()).collect())
    }

    #[test]
    fn test_parse_cells() {
        assert_eq!(DataValue::parse("1"), DataValue::Integer(1));
        assert_eq!(DataValue::parse("2534.67"), DataValue::Float(2534.67));
        assert_eq!(DataValue::parse("KSC LC-39A"), DataValue::Text("KSC LC-39A".into()));
        assert_eq!(DataValue::parse(""), DataValue::Null);
        assert_eq!(DataValue::parse("NULL"), DataValue::Null);
    }

    #[test]
    fn test_non_finite_numbers_stay_text() {
        for cell in ["NaN", "inf", "-inf", "infinity"] {
            assert_eq!(DataValue::parse(cell), DataValue::Text(cell.into()));
            assert_eq!(DataValue::parse(cell).as_f64(), None);
        }
    }

    #[test]
    fn test_merge() {
        assert_eq!(DataType::Integer.merge(DataType::Float), DataType::Float);
        assert_eq!(DataType::Null.merge(DataType::Integer), DataType::Integer);
        assert_eq!(DataType::Float.merge(DataType::Text), DataType::Text);
    }

    #[test]
    fn test_cells_keep_source_text() {
        let mut table = DataTable::new("launches");
        table.add_column(DataColumn::new("Launch Site"));
        table.add_column(DataColumn::new("Booster Version Category"));
        table.add_row(row(&["039", "1.10"])).unwrap();
        table.add_row(row(&["KSC LC-39A", "FT"])).unwrap();
        table.infer_column_types();

        assert_eq!(table.columns[0].data_type, DataType::Text);
        assert_eq!(table.text(0, 0), Some("039"));
        assert_eq!(table.text(0, 1), Some("1.10"));
        assert_eq!(table.value(0, 1), Some(DataValue::Float(1.1)));
    }

    #[test]
    fn test_add_row_rejects_wrong_arity() {
        let mut table = DataTable::new("launches");
        table.add_column(DataColumn::new("a"));
        table.add_column(DataColumn::new("b"));

        let err = table.add_row(row(&["1"])).unwrap_err();
        assert!(err.contains("1 values"));
        assert!(table.is_empty());
    }

    #[test]
    fn test_type_inference_merges_numeric() {
        let mut table = DataTable::new("test");
        table.add_column(DataColumn::new("payload"));
        for cell in ["500", "2534.67", ""] {
            table.add_row(row(&[cell])).unwrap();
        }

        table.infer_column_types();

        assert_eq!(table.columns[0].data_type, DataType::Float);
        assert_eq!(table.value(2, 0), Some(DataValue::Null));
    }
}
