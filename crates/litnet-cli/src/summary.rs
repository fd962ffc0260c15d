use std::collections::{BTreeMap, BTreeSet};

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use litnet_core::AnalysisView;
use litnet_model::{CanonicalRule, ColumnKind, TableSchema};

pub fn print_columns(schema: &TableSchema, records: usize) {
    println!("Records: {records}");
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Kind"),
        header_cell("Distinct values"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for column in &schema.columns {
        table.add_row(vec![
            Cell::new(&column.name),
            kind_cell(column.kind),
            Cell::new(column.distinct_values),
        ]);
    }
    println!("{table}");
}

fn kind_cell(kind: ColumnKind) -> Cell {
    match kind {
        ColumnKind::Flag => Cell::new(kind.as_str())
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        _ => dim_cell(kind.as_str()),
    }
}

pub fn print_view(view: &AnalysisView, legend: &BTreeMap<String, BTreeSet<String>>) {
    println!("Records: {} of {}", view.record_count, view.total_records);
    if view.network.is_empty() {
        println!("Network: no nodes for this selection");
    } else {
        print_nodes(view);
        print_edges(view);
    }
    print_legend(legend);
    print_pair_metrics(view);
    print_rules(&view.rules);
}

fn print_nodes(view: &AnalysisView) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Node"),
        header_cell("Records"),
        header_cell("Support"),
        header_cell("Size"),
    ]);
    apply_table_style(&mut table);
    for idx in 1..=3 {
        align_column(&mut table, idx, CellAlignment::Right);
    }
    for node in &view.network.nodes {
        table.add_row(vec![
            Cell::new(&node.label),
            Cell::new(node.count),
            Cell::new(format!("{:.4}", node.support)),
            Cell::new(format!("{:.2}", node.size)),
        ]);
    }
    println!("{table}");
}

fn print_edges(view: &AnalysisView) {
    if view.network.edges.is_empty() {
        println!("Edges: none");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Entity 1"),
        header_cell("Entity 2"),
        header_cell("Records"),
        header_cell("Weight"),
        header_cell("Color"),
        header_cell("Label"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for edge in &view.network.edges {
        table.add_row(vec![
            Cell::new(&edge.source_label),
            Cell::new(&edge.target_label),
            Cell::new(edge.count),
            Cell::new(format!("{:.4}", edge.weight)),
            Cell::new(&edge.color),
            edge.label.as_deref().map_or_else(|| dim_cell("-"), Cell::new),
        ]);
    }
    println!("{table}");
}

fn print_legend(legend: &BTreeMap<String, BTreeSet<String>>) {
    if legend.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Edge color"), header_cell("Labels")]);
    apply_table_style(&mut table);
    for (color, labels) in legend {
        let labels: Vec<&str> = labels.iter().map(String::as_str).collect();
        table.add_row(vec![Cell::new(color), Cell::new(labels.join(", "))]);
    }
    println!("{table}");
}

fn print_pair_metrics(view: &AnalysisView) {
    let Some(metrics) = view.pair_metrics.as_ref() else {
        println!("Pair metrics: N/A");
        return;
    };
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("PMI"),
        header_cell("Lift"),
        header_cell("Leverage"),
    ]);
    apply_table_style(&mut table);
    table.add_row(vec![
        metric_cell(metrics.pmi),
        metric_cell(metrics.lift),
        metric_cell(metrics.leverage),
    ]);
    println!("{table}");
}

pub fn print_rules(rules: &[CanonicalRule]) {
    if rules.is_empty() {
        println!("Rules: none");
        return;
    }
    let mut table = Table::new();
    table.set_header(CanonicalRule::COLUMNS.map(header_cell));
    apply_table_style(&mut table);
    for idx in 2..CanonicalRule::COLUMNS.len() {
        align_column(&mut table, idx, CellAlignment::Right);
    }
    for rule in rules {
        table.add_row(vec![
            Cell::new(&rule.entity_1),
            Cell::new(&rule.entity_2),
            Cell::new(rule.entity_1_count),
            Cell::new(rule.entity_2_count),
            Cell::new(rule.cooccurrence_count),
            metric_cell(rule.support),
            metric_cell(rule.lift),
            metric_cell(rule.leverage),
            metric_cell(rule.pmi),
        ]);
    }
    println!("{table}");
}

fn metric_cell(value: f64) -> Cell {
    Cell::new(format!("{value:.4}"))
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
