//! Remote module - blocking statistics-API access and reshaping

pub mod worldbank;

pub use worldbank::{Observation, WorldBankClient};
