//! Launch record model
//!
//! A `LaunchDataset` is built once from a loaded `DataTable` and is read-only
//! afterwards. Validation happens here so the filters and figure builders can
//! work with plain typed records.

use crate::data::datatable::{DataTable, DataValue};
use crate::data::datatable_loaders::load_csv_to_datatable;
use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Binary launch outcome, the `class` flag of the source data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    /// Parse the class flag. Only 0 and 1 are accepted.
    pub fn from_class(value: &DataValue) -> Option<Self> {
        match value {
            DataValue::Integer(0) => Some(Outcome::Failure),
            DataValue::Integer(1) => Some(Outcome::Success),
            DataValue::Float(f) if *f == 0.0 => Some(Outcome::Failure),
            DataValue::Float(f) if *f == 1.0 => Some(Outcome::Success),
            _ => None,
        }
    }

    pub fn class_value(self) -> u8 {
        match self {
            Outcome::Failure => 0,
            Outcome::Success => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Outcome::Failure => "Failure",
            Outcome::Success => "Success",
        }
    }

    pub fn is_success(self) -> bool {
        self == Outcome::Success
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchRecord {
    pub site: String,
    pub payload_mass_kg: f64,
    pub booster_category: String,
    pub outcome: Outcome,
}

/// Source column names for the four fields the dashboard reads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMapping {
    pub site: String,
    pub payload_mass: String,
    pub booster_category: String,
    pub outcome: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            site: "Launch Site".to_string(),
            payload_mass: "Payload Mass (kg)".to_string(),
            booster_category: "Booster Version Category".to_string(),
            outcome: "class".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LaunchDataset {
    records: Vec<LaunchRecord>,
    sites: Vec<String>,
    columns: ColumnMapping,
    source: Option<String>,
}

impl LaunchDataset {
    /// Build the dataset from typed records, mostly useful for tests and benches
    pub fn from_records(records: Vec<LaunchRecord>, columns: ColumnMapping) -> Self {
        let mut sites: Vec<String> = Vec::new();
        for record in &records {
            if !sites.iter().any(|s| s == &record.site) {
                sites.push(record.site.clone());
            }
        }

        Self {
            records,
            sites,
            columns,
            source: None,
        }
    }

    /// Validate and convert a loaded table. Row numbers in errors are 1-based data rows.
    pub fn from_table(table: &DataTable, columns: &ColumnMapping) -> Result<Self> {
        let column = |name: &str| {
            table.get_column_index(name).ok_or_else(|| {
                anyhow!(
                    "Column '{}' not found in '{}' (available: {})",
                    name,
                    table.name,
                    table.column_names().join(", ")
                )
            })
        };
        let site_idx = column(&columns.site)?;
        let payload_idx = column(&columns.payload_mass)?;
        let booster_idx = column(&columns.booster_category)?;
        let outcome_idx = column(&columns.outcome)?;

        let mut records = Vec::with_capacity(table.row_count());
        for row_idx in 0..table.row_count() {
            let line = row_idx + 1;
            let text = |idx: usize| table.text(row_idx, idx).unwrap_or_default();
            let value = |idx: usize| table.value(row_idx, idx).unwrap_or(DataValue::Null);

            let site = text(site_idx);
            if site.is_empty() {
                bail!("Row {}: '{}' is empty", line, columns.site);
            }

            let payload_mass_kg = value(payload_idx)
                .as_f64()
                .filter(|mass| mass.is_finite())
                .ok_or_else(|| {
                    anyhow!(
                        "Row {}: '{}' is not numeric ({:?})",
                        line,
                        columns.payload_mass,
                        text(payload_idx)
                    )
                })?;

            let outcome = Outcome::from_class(&value(outcome_idx)).ok_or_else(|| {
                anyhow!(
                    "Row {}: '{}' must be 0 or 1, got {:?}",
                    line,
                    columns.outcome,
                    text(outcome_idx)
                )
            })?;

            records.push(LaunchRecord {
                site: site.to_string(),
                payload_mass_kg,
                booster_category: text(booster_idx).to_string(),
                outcome,
            });
        }

        let mut dataset = Self::from_records(records, columns.clone());
        dataset.source = table.metadata.get("source_path").cloned();

        debug!(
            target: "dataset",
            "Validated {} launch records across {} sites",
            dataset.len(),
            dataset.sites.len()
        );

        Ok(dataset)
    }

    pub fn load_csv<P: AsRef<Path>>(path: P, columns: &ColumnMapping) -> Result<Self> {
        let table = load_csv_to_datatable(&path, "launches")?;
        let dataset = Self::from_table(&table, columns)
            .with_context(|| format!("Invalid launch data in {:?}", path.as_ref()))?;

        info!(
            target: "dataset",
            "Loaded {} launches from {}",
            dataset.len(),
            path.as_ref().display()
        );

        Ok(dataset)
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&LaunchRecord> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct launch sites in order of first appearance
    pub fn sites(&self) -> &[String] {
        &self.sites
    }

    pub fn columns(&self) -> &ColumnMapping {
        &self.columns
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Smallest and largest payload mass, `None` when there are no records
    pub fn payload_bounds(&self) -> Option<(f64, f64)> {
        self.records.iter().fold(None, |bounds, r| {
            let mass = r.payload_mass_kg;
            Some(match bounds {
                None => (mass, mass),
                Some((lo, hi)) => (lo.min(mass), hi.max(mass)),
            })
        })
    }
}
