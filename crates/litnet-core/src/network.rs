//! Node and edge assembly from mined itemsets.

use litnet_model::{EdgeColorMap, NetworkEdge, NetworkNode, NetworkOptions, Result};
use serde::Serialize;

use crate::itemsets::{FrequentItemsets, mine};
use crate::matrix::PresenceMatrix;

/// Nodes (size-1 itemsets) and edges (size-2 itemsets) of one view.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Network {
    pub nodes: Vec<NetworkNode>,
    pub edges: Vec<NetworkEdge>,
}

impl Network {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, label: &str) -> Option<&NetworkNode> {
        self.nodes.iter().find(|node| node.label == label)
    }

    pub fn edge(&self, a: &str, b: &str) -> Option<&NetworkEdge> {
        self.edges.iter().find(|edge| {
            (edge.source_label == a && edge.target_label == b)
                || (edge.source_label == b && edge.target_label == a)
        })
    }
}

/// Builds the network from already mined itemsets.
pub fn assemble(
    itemsets: &FrequentItemsets,
    colors: &EdgeColorMap,
    options: &NetworkOptions,
) -> Network {
    let labels = itemsets.labels();
    let mut nodes = Vec::new();
    // Column index -> node id.
    let mut node_ids = vec![None; labels.len()];
    for (itemset, count) in itemsets.of_size(1) {
        let column = itemset.items()[0];
        let label = labels[column].clone();
        let support = count as f64 / itemsets.total_rows() as f64;
        node_ids[column] = Some(nodes.len());
        nodes.push(NetworkNode {
            id: nodes.len(),
            title: format!("{label}: {count}"),
            label,
            support,
            count,
            size: support * options.node_scale,
        });
    }

    let mut edges = Vec::new();
    for (itemset, count) in itemsets.of_size(2) {
        if count < options.min_edge_count {
            continue;
        }
        let (a, b) = (itemset.items()[0], itemset.items()[1]);
        let (Some(source), Some(target)) = (node_ids[a], node_ids[b]) else {
            continue;
        };
        let (source_label, target_label) = (labels[a].clone(), labels[b].clone());
        let style = colors.style(&source_label, &target_label);
        edges.push(NetworkEdge {
            source,
            target,
            weight: count as f64 / itemsets.total_rows() as f64,
            count,
            title: format!("{source_label} <--> {target_label}: {count}"),
            color: colors.color(&source_label, &target_label).to_string(),
            label: style.map(|style| style.label.clone()),
            source_label,
            target_label,
        });
    }
    Network { nodes, edges }
}

/// Mines `matrix` with the network options and assembles nodes and edges.
pub fn build_network(
    matrix: &PresenceMatrix,
    colors: &EdgeColorMap,
    options: &NetworkOptions,
) -> Result<Network> {
    let span = tracing::info_span!("build_network", rows = matrix.height());
    let _enter = span.enter();
    let itemsets = mine(matrix, &options.mining)?;
    let network = assemble(&itemsets, colors, options);
    tracing::debug!(
        nodes = network.nodes.len(),
        edges = network.edges.len(),
        "network assembled"
    );
    Ok(network)
}

#[cfg(test)]
mod tests {
    use super::*;
    use litnet_model::{DEFAULT_EDGE_COLOR, EdgeViewOption};

    fn matrix() -> PresenceMatrix {
        PresenceMatrix::new(
            (0..6).map(|i| i.to_string()).collect(),
            vec!["Human".into(), "Rodents".into(), "Oral".into()],
            vec![
                vec![true, true, true, false, false, false],
                vec![true, true, false, true, false, false],
                vec![true, false, false, false, false, true],
            ],
        )
        .unwrap()
    }

    #[test]
    fn nodes_carry_size_and_title() {
        let network =
            build_network(&matrix(), &EdgeColorMap::default(), &NetworkOptions::default())
                .unwrap();
        let human = network.node("Human").unwrap();
        assert_eq!(human.count, 3);
        assert_eq!(human.title, "Human: 3");
        assert!((human.size - 25.0).abs() < 1e-12);
    }

    #[test]
    fn edges_need_min_count() {
        let network =
            build_network(&matrix(), &EdgeColorMap::default(), &NetworkOptions::default())
                .unwrap();
        assert_eq!(network.edges.len(), 1);
        let edge = network.edge("Rodents", "Human").unwrap();
        assert_eq!(edge.title, "Human <--> Rodents: 2");
        assert_eq!(edge.color, DEFAULT_EDGE_COLOR);
        assert_eq!(edge.label, None);
        assert!(network.edge("Human", "Oral").is_none());
    }

    #[test]
    fn edges_use_annotations() {
        let options = vec![EdgeViewOption {
            entity_1: "Rodents".into(),
            entity_2: "Human".into(),
            color: "red".into(),
            label: "Cross-species".into(),
        }];
        let colors = EdgeColorMap::from_options(&options);
        let network = build_network(&matrix(), &colors, &NetworkOptions::default()).unwrap();
        let edge = network.edge("Human", "Rodents").unwrap();
        assert_eq!(edge.color, "red");
        assert_eq!(edge.label.as_deref(), Some("Cross-species"));
    }

    #[test]
    fn lower_threshold_admits_single_record_edges() {
        let options = NetworkOptions {
            min_edge_count: 1,
            ..NetworkOptions::default()
        };
        let network = build_network(&matrix(), &EdgeColorMap::default(), &options).unwrap();
        assert_eq!(network.edges.len(), 3);
        assert!(network.edges.iter().all(|e| e.source != e.target));
    }
}
