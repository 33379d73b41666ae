use crate::data::datatable::{DataColumn, DataRow, DataTable};
use anyhow::{Context, Result};
use csv::ReaderBuilder;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Load a CSV file into a DataTable
pub fn load_csv_to_datatable<P: AsRef<Path>>(path: P, table_name: &str) -> Result<DataTable> {
    let file = File::open(&path)
        .with_context(|| format!("Failed to open CSV file: {:?}", path.as_ref()))?;

    let mut table = load_csv_reader_to_datatable(file, table_name)
        .with_context(|| format!("Failed to parse CSV file: {:?}", path.as_ref()))?;
    table.metadata.insert(
        "source_path".to_string(),
        path.as_ref().display().to_string(),
    );

    Ok(table)
}

/// Load CSV content from any reader. The first record must be the header row.
pub fn load_csv_reader_to_datatable<R: Read>(reader: R, table_name: &str) -> Result<DataTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let mut table = DataTable::new(table_name);
    table
        .metadata
        .insert("source_type".to_string(), "csv".to_string());

    // Pandas-style exports carry an unnamed index column; it keeps an empty header
    for header in headers.iter() {
        table.add_column(DataColumn::new(header));
    }

    for (line, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("Malformed CSV record {}", line + 1))?;
        let cells = record.iter().map(|s| s.to_string()).collect();
        table
            .add_row(DataRow::new(cells))
            .map_err(|e| anyhow::anyhow!(e))?;
    }

    // Every row takes part in inference, a late float would otherwise land as text
    table.infer_column_types();

    debug!(
        target: "dataset",
        "Loaded table '{}' with {} columns and {} rows ({})",
        table.name,
        table.column_count(),
        table.row_count(),
        table
            .columns
            .iter()
            .map(|c| format!("{}: {:?}", c.name, c.data_type))
            .collect::<Vec<_>>()
            .join(", ")
    );

    Ok(table)
}
