//! econ-networks-data - Economic Network Dataset Loaders
//!
//! Loads and reshapes tabular economic datasets (input-output use/make
//! tables, trade flows, firm financials, GDP time series) into in-memory
//! matrices, weighted digraphs, and data frames consumed by chapter
//! plotting code.

pub mod catalog;
pub mod chapters;
pub mod data;
pub mod error;
pub mod remote;

pub use catalog::DataCatalog;
pub use error::DataError;
