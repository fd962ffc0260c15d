//! Configuration options for preprocessing, mining, and presentation.
//!
//! Every option has a default matching the behaviour of the original
//! literature-network tool, so an empty TOML file is a valid configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};

/// Minimum support used when every co-occurrence should be admitted.
pub const DEFAULT_MIN_SUPPORT: f64 = 0.00001;

/// Options for turning a raw record table into a presence matrix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessOptions {
    /// Column holding the record identifier used for grouping.
    pub identifier_column: String,

    /// Free-text columns passed through for display and export.
    pub text_columns: Vec<String>,

    /// Columns aggregated with the most frequent value per record.
    ///
    /// Each listed column must exist in the raw table.
    pub categorical_columns: Vec<String>,
}

impl Default for PreprocessOptions {
    fn default() -> Self {
        Self {
            identifier_column: "Refid".to_string(),
            text_columns: vec!["Title".to_string(), "Abstract".to_string()],
            categorical_columns: Vec::new(),
        }
    }
}

impl PreprocessOptions {
    pub fn with_categorical_columns(mut self, columns: Vec<String>) -> Self {
        self.categorical_columns = columns;
        self
    }
}

/// Options for frequent itemset enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MiningOptions {
    /// Itemsets with support below this fraction are pruned.
    /// Support of exactly zero is always pruned.
    pub min_support: f64,

    /// Largest itemset size to enumerate (2 for pairwise networks).
    pub max_itemset_size: usize,

    /// Skip columns present in every row.
    pub exclude_constant_columns: bool,
}

impl Default for MiningOptions {
    fn default() -> Self {
        Self {
            min_support: DEFAULT_MIN_SUPPORT,
            max_itemset_size: 2,
            exclude_constant_columns: true,
        }
    }
}

impl MiningOptions {
    pub fn with_min_support(mut self, min_support: f64) -> Self {
        self.min_support = min_support;
        self
    }

    pub fn with_max_itemset_size(mut self, max_itemset_size: usize) -> Self {
        self.max_itemset_size = max_itemset_size;
        self
    }

    /// Checks the thresholds before a mining pass.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.min_support) {
            return Err(AnalysisError::configuration(format!(
                "min_support must be within [0, 1], got {}",
                self.min_support
            )));
        }
        if self.max_itemset_size == 0 {
            return Err(AnalysisError::configuration(
                "max_itemset_size must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Options for assembling the node/edge network.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkOptions {
    pub mining: MiningOptions,

    /// Edges need at least this many co-occurring records.
    pub min_edge_count: usize,

    /// Node size is `support * node_scale`.
    pub node_scale: f64,
}

impl Default for NetworkOptions {
    fn default() -> Self {
        Self {
            mining: MiningOptions::default(),
            min_edge_count: 2,
            node_scale: 50.0,
        }
    }
}

/// Sort key for the canonical rule table. Every key sorts descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleSortKey {
    #[default]
    CooccurrenceCount,
    Support,
    Lift,
    Leverage,
    Pmi,
    Entity1Count,
    Entity2Count,
}

/// Options for the canonical rule table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleOptions {
    pub mining: MiningOptions,
    pub sort_by: RuleSortKey,
}

impl Default for RuleOptions {
    fn default() -> Self {
        Self {
            mining: MiningOptions::default(),
            sort_by: RuleSortKey::CooccurrenceCount,
        }
    }
}

/// Complete analysis configuration, loadable from TOML.
///
/// ```toml
/// [preprocess]
/// identifier_column = "Refid"
/// categorical_columns = ["LifeStage"]
///
/// [network]
/// min_edge_count = 2
///
/// [rules]
/// sort_by = "lift"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub preprocess: PreprocessOptions,
    pub network: NetworkOptions,
    pub rules: RuleOptions,
}

impl AnalysisConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)
            .map_err(|e| AnalysisError::configuration(format!("invalid config: {e}")))?;
        config.network.mining.validate()?;
        config.rules.mining.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| {
            AnalysisError::configuration(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&source)
    }
}
