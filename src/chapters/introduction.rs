//! Introduction Chapter
//! Crude-oil trade graph, commercial-aircraft network, Forbes Global 2000
//! financials, and the cross-country adjacency matrix.

use petgraph::graph::DiGraph;
use polars::prelude::*;
use std::collections::HashMap;
use std::path::Path;

use crate::data::gexf;
use crate::data::tables::{self, FlowTable};
use crate::data::trade::{self, TOP_EXPORTERS, TOP_IMPORTERS};
use crate::error::DataError;

/// Datasets behind the Introduction chapter's charts.
#[derive(Debug)]
pub struct IntroductionData {
    /// Crude-oil exports among the largest traders, ROW-aggregated.
    pub crude_oil: DiGraph<String, f64>,
    /// Commercial aircraft trade network.
    pub aircraft_network: DiGraph<String, f64>,
    /// Precomputed plot positions for the aircraft network nodes.
    pub aircraft_network_pos: HashMap<String, [f64; 2]>,
    /// Firm financials: Country, Sales, Profits, Assets, Market Value.
    pub forbes_global_2000: DataFrame,
    /// Cross-country trade adjacency matrix, unthresholded.
    pub adjacency_matrix: FlowTable,
}

fn read_forbes(path: &Path) -> Result<DataFrame, PolarsError> {
    LazyCsvReader::new(path.to_path_buf())
        .with_infer_schema_length(Some(10000))
        .with_ignore_errors(true)
        .finish()?
        .select([
            col("Country"),
            col("Sales"),
            col("Profits"),
            col("Assets"),
            col("Market Value"),
        ])
        .sort(
            ["Market Value"],
            SortMultipleOptions::default().with_order_descending(true),
        )
        .collect()
}

pub fn load(data_dir: &Path) -> Result<IntroductionData, DataError> {
    let flows = trade::load_trade_flows(data_dir.join("crude_oil/data.csv"))?;
    let names = trade::read_country_names(data_dir.join("crude_oil/regions-iso3c.csv"))?;
    let crude_oil = trade::build_trade_graph(&flows, &names, TOP_EXPORTERS, TOP_IMPORTERS)?;

    let aircraft_network =
        gexf::read_gexf(data_dir.join("commercial_aircraft/aircraft_network.gexf"))?;
    let aircraft_network_pos =
        gexf::read_layout(data_dir.join("commercial_aircraft/aircraft_network_layout.json"))?;

    let forbes_global_2000 = read_forbes(&data_dir.join("csv_files/forbes-global2000.csv"))?;

    let adjacency_matrix = tables::read_flow_matrix(
        data_dir.join("csv_files/adjacency_matrix.csv"),
        0.0,
        Some(("CH", "SW")),
    )?;

    Ok(IntroductionData {
        crude_oil,
        aircraft_network,
        aircraft_network_pos,
        forbes_global_2000,
        adjacency_matrix,
    })
}
