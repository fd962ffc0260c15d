//! Filter groups and the filter catalog.
//!
//! A [`FilterSpec`] is an ordered list of groups. Columns inside a group are
//! combined with OR, groups are combined with AND.

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};

/// Columns combined with OR.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterGroup {
    /// Catalog group this selection came from, if any.
    pub name: Option<String>,
    pub columns: Vec<String>,
}

impl FilterGroup {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            name: None,
            columns,
        }
    }

    pub fn named(name: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            name: Some(name.into()),
            columns,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Groups combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterSpec {
    pub groups: Vec<FilterGroup>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_group(mut self, group: FilterGroup) -> Self {
        self.groups.push(group);
        self
    }

    pub fn push(&mut self, group: FilterGroup) {
        self.groups.push(group);
    }

    /// True when no group restricts the rows.
    pub fn is_unrestricted(&self) -> bool {
        self.groups.iter().all(FilterGroup::is_empty)
    }

    /// Adds one single-column group per selected node, so only records
    /// tagged with both nodes remain.
    pub fn with_node_pair(mut self, first: &str, second: &str) -> Self {
        self.groups.push(FilterGroup::new(vec![first.to_string()]));
        self.groups.push(FilterGroup::new(vec![second.to_string()]));
        self
    }

    /// Every column referenced by any group, in first-appearance order.
    pub fn referenced_columns(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for group in &self.groups {
            for column in &group.columns {
                if !seen.contains(&column.as_str()) {
                    seen.push(column.as_str());
                }
            }
        }
        seen
    }
}

/// Named filter groups offered to the user, loaded from the filter group file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCatalog {
    groups: Vec<(String, Vec<String>)>,
}

impl FilterCatalog {
    /// Builds the catalog from `(group name, column)` rows, keeping the first
    /// appearance order of both groups and columns.
    pub fn from_rows<I, G, C>(rows: I) -> Self
    where
        I: IntoIterator<Item = (G, C)>,
        G: Into<String>,
        C: Into<String>,
    {
        let mut groups: Vec<(String, Vec<String>)> = Vec::new();
        for (group, column) in rows {
            let group = group.into();
            let column = column.into();
            match groups.iter_mut().find(|(name, _)| *name == group) {
                Some((_, columns)) => {
                    if !columns.contains(&column) {
                        columns.push(column);
                    }
                }
                None => groups.push((group, vec![column])),
            }
        }
        Self { groups }
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|(name, _)| name.as_str())
    }

    pub fn columns(&self, group: &str) -> Option<&[String]> {
        self.groups
            .iter()
            .find(|(name, _)| name == group)
            .map(|(_, columns)| columns.as_slice())
    }

    /// Builds a filter group from a selection inside a catalog group.
    ///
    /// Unknown groups and columns outside the group are configuration errors.
    pub fn select(&self, group: &str, columns: &[String]) -> Result<FilterGroup> {
        let available = self.columns(group).ok_or_else(|| {
            AnalysisError::configuration(format!("unknown filter group '{group}'"))
        })?;
        let unknown: Vec<&str> = columns
            .iter()
            .filter(|column| !available.contains(column))
            .map(String::as_str)
            .collect();
        if !unknown.is_empty() {
            return Err(AnalysisError::configuration(format!(
                "filter group '{group}' has no columns named {}",
                unknown.join(", ")
            )));
        }
        Ok(FilterGroup::named(group, columns.to_vec()))
    }
}
