//! Edge color and label annotations.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Color used for edges without an annotation.
pub const DEFAULT_EDGE_COLOR: &str = "lightgrey";

/// One row of the edge view options table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeViewOption {
    pub entity_1: String,
    pub entity_2: String,
    #[serde(rename = "edge_color")]
    pub color: String,
    #[serde(rename = "edge_label")]
    pub label: String,
}

/// Display annotation for an edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeStyle {
    pub color: String,
    pub label: String,
}

/// Symmetric map from an unordered entity pair to its annotation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeColorMap {
    entries: BTreeMap<(String, String), EdgeStyle>,
}

fn pair_key(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

impl EdgeColorMap {
    /// Builds the map; a later row for the same pair replaces an earlier one.
    pub fn from_options<'a, I>(options: I) -> Self
    where
        I: IntoIterator<Item = &'a EdgeViewOption>,
    {
        let mut entries = BTreeMap::new();
        for option in options {
            entries.insert(
                pair_key(&option.entity_1, &option.entity_2),
                EdgeStyle {
                    color: option.color.clone(),
                    label: option.label.clone(),
                },
            );
        }
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn style(&self, a: &str, b: &str) -> Option<&EdgeStyle> {
        self.entries.get(&pair_key(a, b))
    }

    pub fn color(&self, a: &str, b: &str) -> &str {
        self.style(a, b)
            .map_or(DEFAULT_EDGE_COLOR, |style| style.color.as_str())
    }

    /// Color → sorted labels drawn with that color.
    pub fn legend(&self) -> BTreeMap<String, BTreeSet<String>> {
        let mut legend: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for style in self.entries.values() {
            legend
                .entry(style.color.clone())
                .or_default()
                .insert(style.label.clone());
        }
        legend
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(a: &str, b: &str, color: &str, label: &str) -> EdgeViewOption {
        EdgeViewOption {
            entity_1: a.to_string(),
            entity_2: b.to_string(),
            color: color.to_string(),
            label: label.to_string(),
        }
    }

    #[test]
    fn lookup_is_symmetric() {
        let options = vec![option("Human", "Rodents", "red", "Cross-species")];
        let map = EdgeColorMap::from_options(&options);
        assert_eq!(map.color("Human", "Rodents"), "red");
        assert_eq!(map.color("Rodents", "Human"), "red");
    }

    #[test]
    fn absent_pair_is_neutral() {
        let map = EdgeColorMap::default();
        assert_eq!(map.color("Human", "Fish"), DEFAULT_EDGE_COLOR);
        assert!(map.style("Human", "Fish").is_none());
    }

    #[test]
    fn legend_groups_labels_by_color() {
        let options = vec![
            option("A", "B", "blue", "Exposure"),
            option("C", "D", "blue", "Dose"),
            option("A", "C", "red", "Outcome"),
        ];
        let legend = EdgeColorMap::from_options(&options).legend();
        let blue: Vec<&str> = legend["blue"].iter().map(String::as_str).collect();
        assert_eq!(blue, vec!["Dose", "Exposure"]);
        assert_eq!(legend.len(), 2);
    }
}
