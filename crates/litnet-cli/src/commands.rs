use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use serde::Serialize;
use tracing::{info, info_span};

use litnet_cli::filter_args::build_filter_spec;
use litnet_core::{
    AnalysisState, AnalysisView, PreparedTable, Selection, canonicalize, derive_rules, mine,
    normalize,
};
use litnet_ingest::{
    load_edge_view_options, load_filter_groups, load_network_config, read_records,
};
use litnet_model::{AnalysisConfig, EdgeColorMap, FilterCatalog, PreprocessOptions};
use litnet_report::{
    ExportFormat, default_export_name, export_papers, export_rules, papers_from_frame,
};

use crate::cli::{ColumnsArgs, NetworkArgs, RulesArgs, ViewFormatArg};
use crate::summary::{print_columns, print_rules, print_view};

/// Loads `--config`, or the defaults when it is absent.
pub fn load_config(path: Option<&Path>) -> Result<AnalysisConfig> {
    match path {
        Some(path) => AnalysisConfig::load(path)
            .with_context(|| format!("load config {}", path.display())),
        None => Ok(AnalysisConfig::default()),
    }
}

/// Reads and normalizes the records table once per command.
fn prepare_records(path: &Path, options: &PreprocessOptions) -> Result<Arc<PreparedTable>> {
    let raw = read_records(path).with_context(|| format!("read {}", path.display()))?;
    let prepared = normalize(&raw, options).context("prepare records")?;
    Ok(Arc::new(prepared))
}

pub fn run_columns(args: &ColumnsArgs, config: &AnalysisConfig) -> Result<()> {
    let span = info_span!("columns", path = %args.records.display());
    let _guard = span.enter();
    let prepared = prepare_records(&args.records, &config.preprocess)?;
    print_columns(prepared.schema(), prepared.height());
    Ok(())
}

#[derive(Serialize)]
struct NetworkReport<'a> {
    #[serde(flatten)]
    view: &'a AnalysisView,
    legend: &'a BTreeMap<String, BTreeSet<String>>,
}

pub fn run_network(args: &NetworkArgs, config: &AnalysisConfig) -> Result<()> {
    let span = info_span!("network", path = %args.records.display());
    let _guard = span.enter();

    let prepared = prepare_records(&args.records, &config.preprocess)?;
    let network_columns = load_network_config(&args.network_config)
        .with_context(|| format!("load network config {}", args.network_config.display()))?;
    let colors = match &args.edge_options {
        Some(path) => {
            let options = load_edge_view_options(path)
                .with_context(|| format!("load edge options {}", path.display()))?;
            EdgeColorMap::from_options(&options)
        }
        None => EdgeColorMap::default(),
    };
    let catalog = match &args.filter_groups {
        Some(path) => load_filter_groups(path)
            .with_context(|| format!("load filter groups {}", path.display()))?,
        None => FilterCatalog::default(),
    };

    let mut selection = Selection {
        filters: build_filter_spec(&args.filters, &catalog).context("invalid --filter")?,
        node_pair: None,
    };
    if let (Some(first), Some(second)) = (&args.node1, &args.node2) {
        selection = selection.with_node_pair(first.as_str(), second.as_str());
    }

    let mut network_options = config.network;
    if let Some(min_edge_count) = args.min_edge_count {
        network_options.min_edge_count = min_edge_count;
    }
    let state = AnalysisState::new(Arc::clone(&prepared), network_columns, colors)
        .context("build analysis state")?
        .with_network_options(network_options)
        .with_rule_options(config.rules)
        .apply(selection)
        .context("apply selection")?;
    let view = state
        .view()
        .ok_or_else(|| anyhow!("selection produced no view"))?;
    let legend = state.colors().legend();

    match args.format {
        ViewFormatArg::Table => print_view(view, &legend),
        ViewFormatArg::Json => {
            let report = NetworkReport {
                view,
                legend: &legend,
            };
            let json = serde_json::to_string_pretty(&report).context("serialize view")?;
            println!("{json}");
        }
    }

    let exports = [
        (args.export_csv.as_ref(), ExportFormat::Csv),
        (args.export_ris.as_ref(), ExportFormat::Ris),
    ];
    if exports.iter().any(|(path, _)| path.is_some()) {
        let frame = prepared
            .select_rows(&view.selected)
            .context("select exported records")?;
        let papers = papers_from_frame(&frame, &config.preprocess.identifier_column)
            .context("collect exported records")?;
        for (path, format) in exports {
            let Some(path) = path else {
                continue;
            };
            let path = export_path(path, format);
            export_papers(&path, &papers, format)
                .with_context(|| format!("export {}", path.display()))?;
            println!("Exported {} papers to {}", papers.len(), path.display());
        }
    }
    Ok(())
}

/// `-` asks for a timestamped name in the working directory.
fn export_path(path: &Path, format: ExportFormat) -> PathBuf {
    if path == Path::new("-") {
        default_export_name(chrono::Local::now().naive_local(), format)
    } else {
        path.to_path_buf()
    }
}

pub fn run_rules(args: &RulesArgs, config: &AnalysisConfig) -> Result<()> {
    let span = info_span!("rules", path = %args.records.display());
    let _guard = span.enter();

    let mut options = config.rules;
    if let Some(min_support) = args.min_support {
        options.mining = options.mining.with_min_support(min_support);
    }
    if let Some(max_len) = args.max_len {
        options.mining = options.mining.with_max_itemset_size(max_len);
    }
    if let Some(sort_by) = args.sort_by {
        options.sort_by = sort_by.into();
    }

    let prepared = prepare_records(&args.records, &config.preprocess)?;
    let matrix = prepared
        .presence_matrix(&args.columns)
        .context("select rule columns")?;
    let itemsets = mine(&matrix, &options.mining).context("mine itemsets")?;
    let rules = canonicalize(&derive_rules(&itemsets), options.sort_by);
    info!(rules = rules.len(), "rule table ready");

    match &args.output {
        Some(path) => {
            export_rules(path, &rules).with_context(|| format!("export {}", path.display()))?;
            println!("Wrote {} rules to {}", rules.len(), path.display());
        }
        None => print_rules(&rules),
    }
    Ok(())
}
