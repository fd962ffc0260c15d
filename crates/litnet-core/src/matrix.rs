//! Binary record × entity presence matrix and row masks.

use litnet_model::{AnalysisError, Result};

/// Selected rows of a presence matrix or prepared table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowMask {
    bits: Vec<bool>,
}

impl RowMask {
    /// A mask selecting every one of `len` rows.
    pub fn all(len: usize) -> Self {
        Self {
            bits: vec![true; len],
        }
    }

    pub fn from_bits(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Number of selected rows.
    pub fn selected(&self) -> usize {
        self.bits.iter().filter(|bit| **bit).count()
    }

    pub fn is_selected(&self, row: usize) -> bool {
        self.bits.get(row).copied().unwrap_or(false)
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// Indices of the selected rows, ascending.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits
            .iter()
            .enumerate()
            .filter_map(|(idx, bit)| bit.then_some(idx))
    }
}

/// Column-major 0/1 matrix: one row per record, one column per entity label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresenceMatrix {
    record_ids: Vec<String>,
    labels: Vec<String>,
    columns: Vec<Vec<bool>>,
}

impl PresenceMatrix {
    /// Builds a matrix, checking that every column has one cell per record
    /// and that labels are unique.
    pub fn new(record_ids: Vec<String>, labels: Vec<String>, columns: Vec<Vec<bool>>) -> Result<Self> {
        if labels.len() != columns.len() {
            return Err(AnalysisError::configuration(format!(
                "{} labels given for {} columns",
                labels.len(),
                columns.len()
            )));
        }
        for (label, column) in labels.iter().zip(&columns) {
            if column.len() != record_ids.len() {
                return Err(AnalysisError::configuration(format!(
                    "column '{label}' has {} cells for {} records",
                    column.len(),
                    record_ids.len()
                )));
            }
        }
        for (idx, label) in labels.iter().enumerate() {
            if labels[..idx].contains(label) {
                return Err(AnalysisError::configuration(format!(
                    "column '{label}' is listed more than once"
                )));
            }
        }
        Ok(Self {
            record_ids,
            labels,
            columns,
        })
    }

    /// Number of records.
    pub fn height(&self) -> usize {
        self.record_ids.len()
    }

    /// Number of entity columns.
    pub fn width(&self) -> usize {
        self.labels.len()
    }

    pub fn record_ids(&self) -> &[String] {
        &self.record_ids
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn position(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    pub fn column(&self, idx: usize) -> &[bool] {
        &self.columns[idx]
    }

    pub fn column_by_label(&self, label: &str) -> Option<&[bool]> {
        self.position(label).map(|idx| self.column(idx))
    }

    /// Records tagged with the column at `idx`.
    pub fn count(&self, idx: usize) -> usize {
        self.columns[idx].iter().filter(|cell| **cell).count()
    }

    /// Sorted row indices where the column at `idx` is present.
    pub fn tid_list(&self, idx: usize) -> Vec<usize> {
        self.columns[idx]
            .iter()
            .enumerate()
            .filter_map(|(row, cell)| cell.then_some(row))
            .collect()
    }

    /// A new matrix without the columns present in every record.
    pub fn without_constant_columns(&self) -> Self {
        let height = self.height();
        let keep: Vec<usize> = (0..self.width())
            .filter(|idx| height == 0 || self.count(*idx) < height)
            .collect();
        Self {
            record_ids: self.record_ids.clone(),
            labels: keep.iter().map(|idx| self.labels[*idx].clone()).collect(),
            columns: keep.iter().map(|idx| self.columns[*idx].clone()).collect(),
        }
    }

    /// A new matrix holding only the rows selected by `mask`.
    pub fn select(&self, mask: &RowMask) -> Self {
        let keep: Vec<usize> = mask.indices().filter(|row| *row < self.height()).collect();
        Self {
            record_ids: keep.iter().map(|row| self.record_ids[*row].clone()).collect(),
            labels: self.labels.clone(),
            columns: self
                .columns
                .iter()
                .map(|column| keep.iter().map(|row| column[*row]).collect())
                .collect(),
        }
    }
}
