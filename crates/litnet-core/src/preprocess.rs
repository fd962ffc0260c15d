//! Record table normalization.
//!
//! A raw labelled table may hold several rows per record (one per screening
//! form). [`normalize`] classifies every column, groups rows by record
//! identifier, and produces one row per record with 0/1 flag columns.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use litnet_common::{cell_label, cell_presence};
use litnet_model::{
    AnalysisError, ColumnKind, ColumnSpec, PreprocessOptions, Result, TableSchema,
};
use polars::prelude::{BooleanChunked, Column, DataFrame, NamedFrom, NewChunkedArray, Series};

use crate::matrix::{PresenceMatrix, RowMask};

/// One row per record, with its column classification.
#[derive(Debug, Clone)]
pub struct PreparedTable {
    frame: DataFrame,
    schema: TableSchema,
    record_ids: Vec<String>,
    flags: HashMap<String, Vec<bool>>,
}

impl PreparedTable {
    /// The normalized table: identifier, text, flag (0/1) and categorical columns.
    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }

    pub fn record_ids(&self) -> &[String] {
        &self.record_ids
    }

    pub fn height(&self) -> usize {
        self.record_ids.len()
    }

    /// Builds the presence matrix over `columns`, or over every flag column
    /// when `columns` is empty.
    ///
    /// A named column that is absent or is not a flag column is a
    /// configuration error.
    pub fn presence_matrix<S: AsRef<str>>(&self, columns: &[S]) -> Result<PresenceMatrix> {
        let labels: Vec<String> = if columns.is_empty() {
            self.schema.flag_columns()
        } else {
            let mut labels: Vec<String> = Vec::with_capacity(columns.len());
            for name in columns {
                let name = name.as_ref();
                match self.schema.kind_of(name) {
                    None => {
                        return Err(AnalysisError::configuration(format!(
                            "column '{name}' is not in the record table"
                        )));
                    }
                    Some(ColumnKind::Flag) => {
                        if !labels.iter().any(|l| l == name) {
                            labels.push(name.to_string());
                        }
                    }
                    Some(kind) => {
                        return Err(AnalysisError::configuration(format!(
                            "column '{name}' is a {} column, not a presence flag",
                            kind.as_str()
                        )));
                    }
                }
            }
            labels
        };
        let mut matrix_columns = Vec::with_capacity(labels.len());
        for label in &labels {
            let values = self.flags.get(label).ok_or_else(|| {
                AnalysisError::configuration(format!("column '{label}' has no presence values"))
            })?;
            matrix_columns.push(values.clone());
        }
        PresenceMatrix::new(self.record_ids.clone(), labels, matrix_columns)
    }

    /// Rows of the normalized table selected by `mask`.
    pub fn select_rows(&self, mask: &RowMask) -> Result<DataFrame> {
        if mask.len() != self.height() {
            return Err(AnalysisError::configuration(format!(
                "row mask covers {} rows, table has {}",
                mask.len(),
                self.height()
            )));
        }
        let mask = BooleanChunked::from_slice("selection".into(), mask.bits());
        Ok(self.frame.filter(&mask)?)
    }
}

/// Raw cell values of one column, `None` for missing cells.
struct RawColumn {
    name: String,
    values: Vec<Option<String>>,
    presence: Vec<Option<bool>>,
}

/// Normalizes a raw record table into one row per record.
pub fn normalize(raw: &DataFrame, options: &PreprocessOptions) -> Result<PreparedTable> {
    let span = tracing::info_span!("normalize", rows = raw.height(), columns = raw.width());
    let _enter = span.enter();

    let names: Vec<String> = raw
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    let identifier = options.identifier_column.as_str();
    if !names.iter().any(|name| name == identifier) {
        return Err(AnalysisError::Schema {
            table: "records".to_string(),
            missing: vec![identifier.to_string()],
        });
    }
    let absent: Vec<&str> = options
        .categorical_columns
        .iter()
        .filter(|column| !names.contains(column))
        .map(String::as_str)
        .collect();
    if !absent.is_empty() {
        return Err(AnalysisError::configuration(format!(
            "categorical aggregation columns not in the record table: {}",
            absent.join(", ")
        )));
    }

    let raw_columns = read_raw_columns(raw, &names)?;
    let id_column = raw_columns
        .iter()
        .find(|column| column.name == identifier)
        .ok_or_else(|| AnalysisError::Schema {
            table: "records".to_string(),
            missing: vec![identifier.to_string()],
        })?;

    // Record identifier -> raw row indices, in first-seen order.
    let mut record_ids: Vec<String> = Vec::new();
    let mut groups: Vec<Vec<usize>> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut kept_rows: Vec<usize> = Vec::with_capacity(raw.height());
    let mut dropped = 0usize;
    for (row, value) in id_column.values.iter().enumerate() {
        let Some(id) = value else {
            dropped += 1;
            continue;
        };
        kept_rows.push(row);
        match positions.get(id) {
            Some(&pos) => groups[pos].push(row),
            None => {
                positions.insert(id.clone(), record_ids.len());
                record_ids.push(id.clone());
                groups.push(vec![row]);
            }
        }
    }
    if dropped > 0 {
        tracing::warn!(dropped, "dropped rows with an empty record identifier");
    }

    let mut specs = Vec::with_capacity(raw_columns.len());
    let mut output: Vec<Column> = Vec::with_capacity(raw_columns.len());
    let mut flags = HashMap::new();
    for column in &raw_columns {
        let (kind, distinct_values) = classify(column, &kept_rows, options);
        specs.push(ColumnSpec {
            name: column.name.clone(),
            kind,
            distinct_values,
        });
        match kind {
            ColumnKind::Identifier => {
                output.push(Series::new(column.name.as_str().into(), record_ids.clone()).into());
            }
            ColumnKind::Flag => {
                let present = aggregate_flag(column, &groups, distinct_values);
                let cells: Vec<i32> = present.iter().map(|p| i32::from(*p)).collect();
                output.push(Series::new(column.name.as_str().into(), cells).into());
                flags.insert(column.name.clone(), present);
            }
            ColumnKind::Categorical if options.categorical_columns.contains(&column.name) => {
                let values: Vec<Option<String>> = groups
                    .iter()
                    .map(|rows| {
                        mode_of(
                            rows.iter()
                                .filter_map(|row| column.values[*row].as_deref()),
                        )
                    })
                    .collect();
                output.push(Series::new(column.name.as_str().into(), values).into());
            }
            ColumnKind::Text | ColumnKind::Categorical => {
                let values: Vec<Option<String>> = groups
                    .iter()
                    .map(|rows| rows.iter().find_map(|row| column.values[*row].clone()))
                    .collect();
                output.push(Series::new(column.name.as_str().into(), values).into());
            }
        }
    }

    let frame = DataFrame::new(output)?;
    let schema = TableSchema::new(specs);
    tracing::debug!(
        records = record_ids.len(),
        flags = flags.len(),
        "record table normalized"
    );
    Ok(PreparedTable {
        frame,
        schema,
        record_ids,
        flags,
    })
}

fn read_raw_columns(raw: &DataFrame, names: &[String]) -> Result<Vec<RawColumn>> {
    let mut columns = Vec::with_capacity(names.len());
    for name in names {
        let series = raw.column(name)?;
        let mut values = Vec::with_capacity(raw.height());
        let mut presence = Vec::with_capacity(raw.height());
        for idx in 0..raw.height() {
            let value = series.get(idx)?;
            presence.push(cell_presence(value.clone()));
            values.push(cell_label(value));
        }
        columns.push(RawColumn {
            name: name.clone(),
            values,
            presence,
        });
    }
    Ok(columns)
}

/// Classifies a column from its non-missing values in `rows`.
///
/// Returns the kind and the number of distinct non-missing values.
fn classify(column: &RawColumn, rows: &[usize], options: &PreprocessOptions) -> (ColumnKind, usize) {
    let distinct: BTreeSet<&str> = rows
        .iter()
        .filter_map(|row| column.values[*row].as_deref())
        .collect();
    let count = distinct.len();
    if column.name == options.identifier_column {
        return (ColumnKind::Identifier, count);
    }
    if options.text_columns.contains(&column.name) {
        return (ColumnKind::Text, count);
    }
    if options.categorical_columns.contains(&column.name) {
        return (ColumnKind::Categorical, count);
    }
    let binary = rows
        .iter()
        .filter(|row| column.values[**row].is_some())
        .all(|row| column.presence[*row].is_some());
    if count <= 1 || binary {
        (ColumnKind::Flag, count)
    } else {
        (ColumnKind::Categorical, count)
    }
}

/// Maximum of the per-row presence values for each record.
///
/// A single-valued column is present wherever it holds a value, whatever
/// that value reads as.
fn aggregate_flag(column: &RawColumn, groups: &[Vec<usize>], distinct_values: usize) -> Vec<bool> {
    let present = |row: usize| {
        if distinct_values == 1 {
            column.values[row].is_some()
        } else {
            column.presence[row] == Some(true)
        }
    };
    groups
        .iter()
        .map(|rows| rows.iter().any(|row| present(*row)))
        .collect()
}

/// Most frequent value; ties go to the lexicographically smallest.
fn mode_of<'a>(values: impl Iterator<Item = &'a str>) -> Option<String> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for value in values {
        *counts.entry(value).or_default() += 1;
    }
    let mut best: Option<(&str, usize)> = None;
    for (value, count) in counts {
        if best.is_none_or(|(_, top)| count > top) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use litnet_common::cell_text;

    fn raw() -> DataFrame {
        DataFrame::new(vec![
            Series::new("Refid".into(), vec!["1", "1", "2", "3", ""]).into(),
            Series::new("Title".into(), vec![Some("T1"), None, Some("T2"), Some("T3"), Some("T4")]).into(),
            Series::new("Abstract".into(), vec!["A1", "A1", "A2", "A3", "A4"]).into(),
            Series::new("Human".into(), vec![Some("Human"), None, None, Some("Human"), Some("Human")]).into(),
            Series::new("Rodents".into(), vec![None, Some("Rodents"), Some("Rodents"), None, None]).into(),
            Series::new("Oral".into(), vec![Some(0i64), Some(1), Some(0), Some(0), None]).into(),
            Series::new("LifeStage".into(), vec!["Adult", "Child", "Child", "Adult", "Adult"]).into(),
            Series::new("Empty".into(), vec![None::<&str>, None, None, None, None]).into(),
        ])
        .unwrap()
    }

    fn options() -> PreprocessOptions {
        PreprocessOptions::default().with_categorical_columns(vec!["LifeStage".to_string()])
    }

    #[test]
    fn groups_rows_by_record() {
        let prepared = normalize(&raw(), &options()).unwrap();
        assert_eq!(prepared.record_ids(), &["1", "2", "3"]);
        assert_eq!(prepared.frame().height(), 3);
        let title = prepared.frame().column("Title").unwrap();
        assert_eq!(cell_text(title.get(0).unwrap()), "T1");
    }

    #[test]
    fn classifies_columns() {
        let prepared = normalize(&raw(), &options()).unwrap();
        let schema = prepared.schema();
        assert_eq!(schema.kind_of("Refid"), Some(ColumnKind::Identifier));
        assert_eq!(schema.kind_of("Abstract"), Some(ColumnKind::Text));
        assert_eq!(schema.kind_of("Human"), Some(ColumnKind::Flag));
        assert_eq!(schema.kind_of("Oral"), Some(ColumnKind::Flag));
        assert_eq!(schema.kind_of("LifeStage"), Some(ColumnKind::Categorical));
        assert_eq!(schema.kind_of("Empty"), Some(ColumnKind::Flag));
    }

    #[test]
    fn flags_aggregate_with_maximum() {
        let prepared = normalize(&raw(), &options()).unwrap();
        let matrix = prepared
            .presence_matrix(&["Human", "Rodents", "Oral", "Empty"])
            .unwrap();
        assert_eq!(matrix.column(0), &[true, false, true]);
        assert_eq!(matrix.column(1), &[true, true, false]);
        assert_eq!(matrix.column(2), &[true, false, false]);
        assert_eq!(matrix.column(3), &[false, false, false]);
    }

    #[test]
    fn categorical_aggregation_uses_mode_with_smallest_tie() {
        let prepared = normalize(&raw(), &options()).unwrap();
        let stage = prepared.frame().column("LifeStage").unwrap();
        // Record 1 has one Adult and one Child row.
        assert_eq!(cell_text(stage.get(0).unwrap()), "Adult");
        assert_eq!(cell_text(stage.get(1).unwrap()), "Child");
    }

    #[test]
    fn missing_identifier_is_schema_error() {
        let options = PreprocessOptions {
            identifier_column: "RecordId".to_string(),
            ..PreprocessOptions::default()
        };
        let err = normalize(&raw(), &options).unwrap_err();
        assert!(matches!(err, AnalysisError::Schema { .. }));
    }

    #[test]
    fn absent_categorical_column_is_configuration_error() {
        let options = PreprocessOptions::default()
            .with_categorical_columns(vec!["Chemical".to_string()]);
        let err = normalize(&raw(), &options).unwrap_err();
        assert!(matches!(err, AnalysisError::Configuration { .. }));
        assert!(err.to_string().contains("Chemical"));
    }

    #[test]
    fn presence_matrix_rejects_non_flag_columns() {
        let prepared = normalize(&raw(), &options()).unwrap();
        assert!(prepared.presence_matrix(&["LifeStage"]).is_err());
        assert!(prepared.presence_matrix(&["Fish"]).is_err());
        let all = prepared.presence_matrix::<&str>(&[]).unwrap();
        assert_eq!(all.labels(), &["Human", "Rodents", "Oral", "Empty"]);
    }

    #[test]
    fn select_rows_filters_frame() {
        let prepared = normalize(&raw(), &options()).unwrap();
        let rows = prepared
            .select_rows(&RowMask::from_bits(vec![false, true, false]))
            .unwrap();
        assert_eq!(rows.height(), 1);
        assert!(prepared.select_rows(&RowMask::all(2)).is_err());
    }

    #[test]
    fn single_valued_column_is_present_whatever_the_value() {
        let raw = DataFrame::new(vec![
            Series::new("Refid".into(), vec!["1", "2", "3"]).into(),
            Series::new("Abstract".into(), vec!["A1", "A2", "A3"]).into(),
            Series::new("Zero".into(), vec![Some("0"), None, Some("0")]).into(),
            Series::new("No".into(), vec![None, Some("false"), None]).into(),
            Series::new("Dose".into(), vec![Some(5i64), Some(5), None]).into(),
        ])
        .unwrap();
        let prepared = normalize(&raw, &PreprocessOptions::default()).unwrap();
        assert_eq!(prepared.schema().kind_of("Zero"), Some(ColumnKind::Flag));
        let matrix = prepared.presence_matrix(&["Zero", "No", "Dose"]).unwrap();
        assert_eq!(matrix.column(0), &[true, false, true]);
        assert_eq!(matrix.column(1), &[false, true, false]);
        assert_eq!(matrix.column(2), &[true, true, false]);
    }

    #[test]
    fn mode_prefers_smallest_on_tie() {
        assert_eq!(mode_of(["b", "a", "b", "a"].into_iter()), Some("a".to_string()));
        assert_eq!(mode_of(["b", "a", "b"].into_iter()), Some("b".to_string()));
        assert_eq!(mode_of(std::iter::empty()), None);
    }
}
