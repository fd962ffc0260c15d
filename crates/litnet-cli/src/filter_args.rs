//! `--filter` argument parsing.
//!
//! A filter argument is either `COL1,COL2` (one OR group of flag columns) or
//! `GROUP=COL1,COL2` (a selection inside a named group of the filter group
//! file). Repeated `--filter` arguments are combined with AND.

use std::str::FromStr;

use litnet_model::{AnalysisError, FilterCatalog, FilterGroup, FilterSpec};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterArg {
    Columns(Vec<String>),
    Group { name: String, columns: Vec<String> },
}

fn split_columns(list: &str) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for column in list.split(',').map(str::trim).filter(|c| !c.is_empty()) {
        if !columns.iter().any(|c| c == column) {
            columns.push(column.to_string());
        }
    }
    columns
}

impl FromStr for FilterArg {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.split_once('=') {
            Some((name, list)) => {
                let name = name.trim();
                if name.is_empty() {
                    return Err(format!("filter '{value}' has an empty group name"));
                }
                let columns = split_columns(list);
                if columns.is_empty() {
                    return Err(format!("filter group '{name}' selects no columns"));
                }
                Ok(Self::Group {
                    name: name.to_string(),
                    columns,
                })
            }
            None => {
                let columns = split_columns(value);
                if columns.is_empty() {
                    return Err("filter selects no columns".to_string());
                }
                Ok(Self::Columns(columns))
            }
        }
    }
}

/// Combines filter arguments into a spec, checking named groups against
/// `catalog`.
pub fn build_filter_spec(
    args: &[FilterArg],
    catalog: &FilterCatalog,
) -> Result<FilterSpec, AnalysisError> {
    let mut spec = FilterSpec::new();
    for arg in args {
        let group = match arg {
            FilterArg::Columns(columns) => FilterGroup::new(columns.clone()),
            FilterArg::Group { name, columns } => {
                if catalog.is_empty() {
                    return Err(AnalysisError::configuration(format!(
                        "filter group '{name}' given without --filter-groups"
                    )));
                }
                catalog.select(name, columns)?
            }
        };
        spec.push(group);
    }
    Ok(spec)
}
