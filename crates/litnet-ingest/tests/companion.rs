//! Tests for companion table loading.

use std::io::Write;

use litnet_ingest::{
    IngestError, load_edge_view_options, load_filter_groups, load_network_config,
};
use litnet_model::AnalysisError;
use tempfile::NamedTempFile;

fn temp_csv(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{content}").unwrap();
    file
}

#[test]
fn network_config_dedupes_in_order() {
    let file = temp_csv("columns_in_network\nHuman\nRodents\nHuman\n\nFish\n");
    let columns = load_network_config(file.path()).unwrap();
    assert_eq!(columns, vec!["Human", "Rodents", "Fish"]);
}

#[test]
fn network_config_requires_its_column() {
    let file = temp_csv("nodes\nHuman\n");
    let err = load_network_config(file.path()).unwrap_err();
    match err {
        IngestError::Analysis(AnalysisError::Schema { table, missing }) => {
            assert_eq!(table, "network_config");
            assert_eq!(missing, vec!["columns_in_network"]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn filter_groups_build_catalog() {
    let file = temp_csv(
        "filter_group_name,columns_in_group\n\
         Species,Human\n\
         Species,Rodents\n\
         Exposure , Oral \n",
    );
    let catalog = load_filter_groups(file.path()).unwrap();
    let names: Vec<&str> = catalog.group_names().collect();
    assert_eq!(names, vec!["Species", "Exposure"]);
    assert_eq!(catalog.columns("Exposure").unwrap(), &["Oral".to_string()]);
}

#[test]
fn edge_options_skip_incomplete_rows() {
    let file = temp_csv(
        "entity_1,entity_2,edge_color,edge_label\n\
         Human,Rodents,red,Cross-species\n\
         Human,,blue,Broken\n",
    );
    let options = load_edge_view_options(file.path()).unwrap();
    assert_eq!(options.len(), 1);
    assert_eq!(options[0].color, "red");
    assert_eq!(options[0].label, "Cross-species");
}

#[test]
fn edge_options_report_all_missing_columns() {
    let file = temp_csv("entity_1,entity_2\nA,B\n");
    let err = load_edge_view_options(file.path()).unwrap_err();
    assert!(err.to_string().contains("edge_color, edge_label"));
}
