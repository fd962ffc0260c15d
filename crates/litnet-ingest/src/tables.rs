//! Input table identities and their required columns.

use litnet_model::AnalysisError;

/// The input tables the tool accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputTable {
    /// Labelled title/abstract records.
    Records,
    /// Optional filter groups offered for selection.
    FilterGroups,
    /// Columns drawn in the network.
    NetworkConfig,
    /// Optional edge colors and labels.
    EdgeViewOptions,
}

impl InputTable {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Records => "records",
            Self::FilterGroups => "filter_groups",
            Self::NetworkConfig => "network_config",
            Self::EdgeViewOptions => "edge_view_options",
        }
    }

    pub fn required_columns(self) -> &'static [&'static str] {
        match self {
            Self::Records => &["Refid", "Title", "Abstract"],
            Self::FilterGroups => &["filter_group_name", "columns_in_group"],
            Self::NetworkConfig => &["columns_in_network"],
            Self::EdgeViewOptions => &["entity_1", "entity_2", "edge_color", "edge_label"],
        }
    }

    /// Checks that every required column is among `available`.
    ///
    /// All missing columns are reported together.
    pub fn check_columns<S: AsRef<str>>(self, available: &[S]) -> Result<(), AnalysisError> {
        require_columns(self.as_str(), available, self.required_columns())
    }
}

/// Checks `required` against `available`, naming `table` in the error.
pub fn require_columns<S: AsRef<str>>(
    table: &str,
    available: &[S],
    required: &[&str],
) -> Result<(), AnalysisError> {
    let missing: Vec<String> = required
        .iter()
        .filter(|name| !available.iter().any(|col| col.as_ref() == **name))
        .map(|name| (*name).to_string())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(AnalysisError::Schema {
            table: table.to_string(),
            missing,
        })
    }
}
