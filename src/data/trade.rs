//! Trade Flow Aggregator Module
//! Collapses a bilateral trade-flow table to its largest participants and
//! builds a weighted digraph for the chapter charts.

use petgraph::graph::{DiGraph, NodeIndex};
use polars::prelude::*;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Number of exporters retained in the trade graph.
pub const TOP_EXPORTERS: usize = 10;
/// Number of importers retained before the ROW aggregate is added.
pub const TOP_IMPORTERS: usize = 21;

/// Catch-all code for trade partners outside the retained importer set.
pub const REST_OF_WORLD: &str = "ROW";

#[derive(Error, Debug)]
pub enum TradeError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("No display name for country code {0}")]
    UnknownCode(String),
}

/// Load a bilateral trade-flow table with `export_value`, `location_code`
/// and `partner_code` columns.
pub fn load_trade_flows(path: impl AsRef<Path>) -> Result<DataFrame, TradeError> {
    let df = LazyCsvReader::new(path.as_ref().to_path_buf())
        .with_infer_schema_length(Some(10000))
        .with_ignore_errors(true)
        .finish()?
        .collect()?;

    debug!(path = %path.as_ref().display(), rows = df.height(), "loaded trade flows");
    Ok(df)
}

/// ISO alpha-3 code to display name, from a regions CSV with `alpha-3`
/// and `name` columns. Includes the manual overrides the charts expect.
pub fn read_country_names(path: impl AsRef<Path>) -> Result<HashMap<String, String>, TradeError> {
    let df = LazyCsvReader::new(path.as_ref().to_path_buf())
        .with_infer_schema_length(Some(10000))
        .finish()?
        .collect()?;

    let codes = df.column("alpha-3")?;
    let display = df.column("name")?;

    let mut names = HashMap::new();
    for i in 0..df.height() {
        let code = codes.get(i)?.to_string().trim_matches('"').to_string();
        let name = display.get(i)?.to_string().trim_matches('"').to_string();
        names.insert(code, name);
    }

    names.insert(REST_OF_WORLD.to_string(), "Rest of World".to_string());
    names.insert("TWN".to_string(), "Taiwan".to_string());
    names.insert("GBR".to_string(), "United Kingdom".to_string());
    Ok(names)
}

/// The `k` entities with the largest summed `export_value`, keyed by
/// `key_column`. Ties are broken by sort order, as in the source charts.
fn top_entities(
    flows: &DataFrame,
    key_column: &str,
    k: usize,
) -> Result<HashSet<String>, TradeError> {
    let ranked = flows
        .clone()
        .lazy()
        .group_by([col(key_column)])
        .agg([col("export_value").sum()])
        .sort(
            ["export_value"],
            SortMultipleOptions::default().with_order_descending(true),
        )
        .limit(k as u32)
        .collect()?;

    let keys = ranked.column(key_column)?;
    let mut retained = HashSet::new();
    for i in 0..ranked.height() {
        retained.insert(keys.get(i)?.to_string().trim_matches('"').to_string());
    }
    Ok(retained)
}

/// Build the weighted trade digraph.
///
/// Retains the `top_exporters` largest exporters and `top_importers`
/// largest importers by total value. Every other importer is reassigned
/// to the ROW aggregate before the per-pair sum; exporters outside the
/// retained set are dropped from the graph entirely.
pub fn build_trade_graph(
    flows: &DataFrame,
    names: &HashMap<String, String>,
    top_exporters: usize,
    top_importers: usize,
) -> Result<DiGraph<String, f64>, TradeError> {
    let exporters = top_entities(flows, "location_code", top_exporters)?;
    let mut importers = top_entities(flows, "partner_code", top_importers)?;

    let locations = flows.column("location_code")?;
    let partners = flows.column("partner_code")?;
    let values = flows.column("export_value")?.cast(&DataType::Float64)?;
    let values = values.f64()?;

    // Per-pair totals with non-retained importers folded into ROW.
    let mut pair_totals: BTreeMap<(String, String), f64> = BTreeMap::new();
    for i in 0..flows.height() {
        let exporter = locations.get(i)?.to_string().trim_matches('"').to_string();
        let mut importer = partners.get(i)?.to_string().trim_matches('"').to_string();
        if !importers.contains(&importer) {
            importer = REST_OF_WORLD.to_string();
        }
        let value = values.get(i).unwrap_or(0.0);
        *pair_totals.entry((exporter, importer)).or_insert(0.0) += value;
    }
    importers.insert(REST_OF_WORLD.to_string());

    let mut graph = DiGraph::new();
    let mut nodes: HashMap<String, NodeIndex> = HashMap::new();
    let mut node = |graph: &mut DiGraph<String, f64>, name: &str| {
        *nodes
            .entry(name.to_string())
            .or_insert_with(|| graph.add_node(name.to_string()))
    };

    for ((exporter, importer), total) in pair_totals {
        if !exporters.contains(&exporter) || !importers.contains(&importer) {
            continue;
        }
        let from = names
            .get(&exporter)
            .ok_or_else(|| TradeError::UnknownCode(exporter.clone()))?;
        let to = names
            .get(&importer)
            .ok_or_else(|| TradeError::UnknownCode(importer.clone()))?;

        let from = node(&mut graph, from);
        let to = node(&mut graph, to);
        graph.add_edge(from, to, total);
    }

    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "built trade graph"
    );
    Ok(graph)
}
