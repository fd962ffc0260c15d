//! Column classification for record tables.

use serde::{Deserialize, Serialize};

/// Role of a column in a prepared record table.
///
/// Only [`ColumnKind::Flag`] columns take part in itemset mining.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnKind {
    /// The record identifier used for grouping.
    Identifier,
    /// Free text passed through for display and export (titles, abstracts).
    Text,
    /// A 0/1 presence tag.
    Flag,
    /// A multi-valued label, kept for display and grouping only.
    Categorical,
}

impl ColumnKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Identifier => "identifier",
            Self::Text => "text",
            Self::Flag => "flag",
            Self::Categorical => "categorical",
        }
    }
}

/// Classification of a single column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub name: String,
    pub kind: ColumnKind,
    /// Distinct non-missing raw values seen before grouping.
    pub distinct_values: usize,
}

/// Ordered column classifications of a prepared table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    pub columns: Vec<ColumnSpec>,
}

impl TableSchema {
    pub fn new(columns: Vec<ColumnSpec>) -> Self {
        Self { columns }
    }

    pub fn get(&self, name: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|spec| spec.name == name)
    }

    pub fn kind_of(&self, name: &str) -> Option<ColumnKind> {
        self.get(name).map(|spec| spec.kind)
    }

    /// Names of every column of the given kind, in table order.
    pub fn names_of(&self, kind: ColumnKind) -> Vec<String> {
        self.columns
            .iter()
            .filter(|spec| spec.kind == kind)
            .map(|spec| spec.name.clone())
            .collect()
    }

    pub fn flag_columns(&self) -> Vec<String> {
        self.names_of(ColumnKind::Flag)
    }
}
