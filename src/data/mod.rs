//! Data module - packaged file loading and reshaping

pub mod coefficients;
pub mod gexf;
pub mod tables;
pub mod trade;

pub use coefficients::build_coefficient_matrices;
pub use tables::{read_flow_matrix, read_output_column, read_use_table, FlowTable};
