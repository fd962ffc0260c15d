//! Caller-owned analysis state.
//!
//! An [`AnalysisState`] holds the prepared table, the network definition, the
//! edge annotations and the current selection. Applying a new selection
//! returns a new state with a recomputed [`AnalysisView`]; applying the same
//! selection again reuses the previous view.

use std::sync::Arc;

use litnet_model::{
    AnalysisError, CanonicalRule, EdgeColorMap, FilterGroup, FilterSpec, MiningOptions,
    NetworkOptions, PairMetrics, Result, RuleOptions,
};
use serde::Serialize;

use crate::filter;
use crate::itemsets::mine;
use crate::matrix::{PresenceMatrix, RowMask};
use crate::network::{Network, build_network};
use crate::preprocess::PreparedTable;
use crate::rules::{canonicalize, derive_rules};

/// What the user has selected: filter groups and an optional node pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub filters: FilterSpec,
    pub node_pair: Option<(String, String)>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter_group(mut self, group: FilterGroup) -> Self {
        self.filters.push(group);
        self
    }

    pub fn with_node_pair(mut self, first: impl Into<String>, second: impl Into<String>) -> Self {
        self.node_pair = Some((first.into(), second.into()));
        self
    }

    /// Filters plus one single-column group per selected node.
    pub fn combined_filter(&self) -> FilterSpec {
        match &self.node_pair {
            Some((first, second)) => self.filters.clone().with_node_pair(first, second),
            None => self.filters.clone(),
        }
    }
}

/// Everything derived from one selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisView {
    /// Records matching the filters and the node pair.
    pub record_count: usize,
    pub total_records: usize,
    #[serde(flatten)]
    pub network: Network,
    /// Rule table over the records matching the filters only.
    pub rules: Vec<CanonicalRule>,
    /// Metrics of the selected node pair; `None` when unavailable.
    pub pair_metrics: Option<PairMetrics>,
    #[serde(skip)]
    pub selected: RowMask,
}

/// Looks up the metrics of `pair` in a canonical rule table, in either
/// orientation.
pub fn pair_metrics(rules: &[CanonicalRule], pair: Option<(&str, &str)>) -> Option<PairMetrics> {
    let (first, second) = pair?;
    if first == second {
        return None;
    }
    rules
        .iter()
        .find(|rule| rule.connects(first, second))
        .map(CanonicalRule::metrics)
}

/// Drops columns constant over every record, then mines views without
/// a per-view constancy check. A column that is constant only inside the
/// selection (a selected node, a filter column) stays in the view.
fn drop_globally_constant(
    matrix: &PresenceMatrix,
    mining: &MiningOptions,
) -> (PresenceMatrix, MiningOptions) {
    let kept = if mining.exclude_constant_columns {
        matrix.without_constant_columns()
    } else {
        matrix.clone()
    };
    let per_view = MiningOptions {
        exclude_constant_columns: false,
        ..*mining
    };
    (kept, per_view)
}

#[derive(Debug, Clone)]
pub struct AnalysisState {
    prepared: Arc<PreparedTable>,
    network_columns: Vec<String>,
    colors: EdgeColorMap,
    network_options: NetworkOptions,
    rule_options: RuleOptions,
    selection: Selection,
    view: Option<Arc<AnalysisView>>,
}

impl AnalysisState {
    /// Creates a state drawing `network_columns`, which must all be flag
    /// columns of `prepared`.
    pub fn new(
        prepared: Arc<PreparedTable>,
        network_columns: Vec<String>,
        colors: EdgeColorMap,
    ) -> Result<Self> {
        if network_columns.is_empty() {
            return Err(AnalysisError::configuration(
                "network definition names no columns",
            ));
        }
        prepared.presence_matrix(&network_columns)?;
        Ok(Self {
            prepared,
            network_columns,
            colors,
            network_options: NetworkOptions::default(),
            rule_options: RuleOptions::default(),
            selection: Selection::default(),
            view: None,
        })
    }

    pub fn with_network_options(mut self, options: NetworkOptions) -> Self {
        self.network_options = options;
        self.view = None;
        self
    }

    pub fn with_rule_options(mut self, options: RuleOptions) -> Self {
        self.rule_options = options;
        self.view = None;
        self
    }

    pub fn prepared(&self) -> &PreparedTable {
        &self.prepared
    }

    pub fn network_columns(&self) -> &[String] {
        &self.network_columns
    }

    pub fn colors(&self) -> &EdgeColorMap {
        &self.colors
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// The view of the last applied selection.
    pub fn view(&self) -> Option<&AnalysisView> {
        self.view.as_deref()
    }

    /// Applies `selection` and returns the updated state.
    pub fn apply(self, selection: Selection) -> Result<Self> {
        if self.view.is_some() && self.selection == selection {
            tracing::debug!("selection unchanged, reusing view");
            return Ok(self);
        }
        let view = self.compute(&selection)?;
        Ok(Self {
            selection,
            view: Some(Arc::new(view)),
            ..self
        })
    }

    fn mask_for(&self, spec: &FilterSpec) -> Result<RowMask> {
        if spec.is_unrestricted() {
            return Ok(RowMask::all(self.prepared.height()));
        }
        let matrix = self.prepared.presence_matrix(&spec.referenced_columns())?;
        filter::row_mask(&matrix, spec)
    }

    fn compute(&self, selection: &Selection) -> Result<AnalysisView> {
        let span = tracing::info_span!(
            "analysis_view",
            groups = selection.filters.groups.len(),
            node_pair = selection.node_pair.is_some()
        );
        let _enter = span.enter();

        if let Some((first, second)) = &selection.node_pair {
            for node in [first, second] {
                if !self.network_columns.contains(node) {
                    return Err(AnalysisError::configuration(format!(
                        "node '{node}' is not part of the network"
                    )));
                }
            }
        }

        let matrix = self.prepared.presence_matrix(&self.network_columns)?;
        let filter_mask = self.mask_for(&selection.filters)?;
        let selected = self.mask_for(&selection.combined_filter())?;

        let (network_matrix, mining) =
            drop_globally_constant(&matrix, &self.network_options.mining);
        let network_options = NetworkOptions {
            mining,
            ..self.network_options
        };
        let network = build_network(
            &network_matrix.select(&selected),
            &self.colors,
            &network_options,
        )?;

        let (rule_matrix, mining) = drop_globally_constant(&matrix, &self.rule_options.mining);
        let itemsets = mine(&rule_matrix.select(&filter_mask), &mining)?;
        let rules = canonicalize(&derive_rules(&itemsets), self.rule_options.sort_by);

        let pair = selection
            .node_pair
            .as_ref()
            .map(|(first, second)| (first.as_str(), second.as_str()));
        let metrics = pair_metrics(&rules, pair);

        tracing::info!(
            records = selected.selected(),
            nodes = network.nodes.len(),
            edges = network.edges.len(),
            rules = rules.len(),
            "view computed"
        );
        Ok(AnalysisView {
            record_count: selected.selected(),
            total_records: self.prepared.height(),
            network,
            rules,
            pair_metrics: metrics,
            selected,
        })
    }
}
