//! Crate-Level Error Type
//! Aggregates the per-module errors for the chapter assemblers.

use polars::prelude::PolarsError;
use thiserror::Error;

use crate::data::gexf::GexfError;
use crate::data::tables::TableError;
use crate::data::trade::TradeError;
use crate::remote::worldbank::RemoteError;

#[derive(Error, Debug)]
pub enum DataError {
    #[error("table error: {0}")]
    Table(#[from] TableError),
    #[error("trade flow error: {0}")]
    Trade(#[from] TradeError),
    #[error("graph file error: {0}")]
    Gexf(#[from] GexfError),
    #[error("remote statistics error: {0}")]
    Remote(#[from] RemoteError),
    #[error("data frame error: {0}")]
    Frame(#[from] PolarsError),
}
