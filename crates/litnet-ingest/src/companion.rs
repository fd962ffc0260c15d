//! Loaders for the companion tables: filter groups, network config, and
//! edge view options.

use std::collections::BTreeMap;
use std::path::Path;

use csv::ReaderBuilder;
use litnet_model::{EdgeViewOption, FilterCatalog};

use crate::error::{IngestError, Result};
use crate::tables::InputTable;

/// Reads a small CSV into header → value maps after checking required columns.
fn read_table_rows(path: &Path, table: InputTable) -> Result<Vec<BTreeMap<String, String>>> {
    let bytes = std::fs::read(path).map_err(|e| IngestError::open(path, e))?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes.as_slice());
    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .iter()
        .map(|h| h.trim().trim_matches('\u{feff}').to_string())
        .collect();
    table.check_columns(&headers)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let mut row = BTreeMap::new();
        for (idx, value) in record.iter().enumerate() {
            if let Some(key) = headers.get(idx) {
                row.insert(key.clone(), value.trim().to_string());
            }
        }
        if row.values().all(String::is_empty) {
            continue;
        }
        rows.push(row);
    }
    tracing::debug!(
        table = table.as_str(),
        path = %path.display(),
        rows = rows.len(),
        "companion table loaded"
    );
    Ok(rows)
}

fn field<'a>(row: &'a BTreeMap<String, String>, name: &str) -> &'a str {
    row.get(name).map_or("", String::as_str)
}

/// Loads the filter group file (`filter_group_name`, `columns_in_group`).
pub fn load_filter_groups(path: &Path) -> Result<FilterCatalog> {
    let rows = read_table_rows(path, InputTable::FilterGroups)?;
    let pairs = rows.iter().filter_map(|row| {
        let group = field(row, "filter_group_name");
        let column = field(row, "columns_in_group");
        if group.is_empty() || column.is_empty() {
            None
        } else {
            Some((group.to_string(), column.to_string()))
        }
    });
    Ok(FilterCatalog::from_rows(pairs))
}

/// Loads the network config file (`columns_in_network`).
///
/// Duplicates are dropped; first-appearance order is kept.
pub fn load_network_config(path: &Path) -> Result<Vec<String>> {
    let rows = read_table_rows(path, InputTable::NetworkConfig)?;
    let mut columns: Vec<String> = Vec::new();
    for row in &rows {
        let column = field(row, "columns_in_network");
        if !column.is_empty() && !columns.iter().any(|c| c == column) {
            columns.push(column.to_string());
        }
    }
    Ok(columns)
}

/// Loads the edge view options file
/// (`entity_1`, `entity_2`, `edge_color`, `edge_label`).
pub fn load_edge_view_options(path: &Path) -> Result<Vec<EdgeViewOption>> {
    let rows = read_table_rows(path, InputTable::EdgeViewOptions)?;
    let mut options = Vec::with_capacity(rows.len());
    for row in &rows {
        let entity_1 = field(row, "entity_1");
        let entity_2 = field(row, "entity_2");
        if entity_1.is_empty() || entity_2.is_empty() {
            tracing::warn!(path = %path.display(), "skipping edge option without both entities");
            continue;
        }
        options.push(EdgeViewOption {
            entity_1: entity_1.to_string(),
            entity_2: entity_2.to_string(),
            color: field(row, "edge_color").to_string(),
            label: field(row, "edge_label").to_string(),
        });
    }
    Ok(options)
}
