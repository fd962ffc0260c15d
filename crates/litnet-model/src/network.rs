//! Records handed to the presentation layer.

use serde::{Deserialize, Serialize};

/// A size-1 itemset drawn as a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkNode {
    pub id: usize,
    pub label: String,
    pub support: f64,
    pub count: usize,
    pub size: f64,
    pub title: String,
}

/// A size-2 itemset drawn as an undirected edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkEdge {
    pub source: usize,
    pub target: usize,
    pub source_label: String,
    pub target_label: String,
    pub weight: f64,
    pub count: usize,
    pub title: String,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// One row of the canonical rule table: a single orientation per unordered pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalRule {
    pub entity_1: String,
    pub entity_2: String,
    pub entity_1_count: usize,
    pub entity_2_count: usize,
    #[serde(rename = "co-occurrence_count")]
    pub cooccurrence_count: usize,
    pub support: f64,
    pub lift: f64,
    pub leverage: f64,
    pub pmi: f64,
}

impl CanonicalRule {
    /// Column names of the tabular form, in display order.
    pub const COLUMNS: [&'static str; 9] = [
        "entity_1",
        "entity_2",
        "entity_1_count",
        "entity_2_count",
        "co-occurrence_count",
        "support",
        "lift",
        "leverage",
        "pmi",
    ];

    /// True when this row describes the pair in either orientation.
    pub fn connects(&self, a: &str, b: &str) -> bool {
        (self.entity_1 == a && self.entity_2 == b) || (self.entity_1 == b && self.entity_2 == a)
    }

    pub fn metrics(&self) -> PairMetrics {
        PairMetrics {
            pmi: self.pmi,
            lift: self.lift,
            leverage: self.leverage,
        }
    }
}

/// Association metrics shown for a selected node pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PairMetrics {
    pub pmi: f64,
    pub lift: f64,
    pub leverage: f64,
}
