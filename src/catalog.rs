//! Data Catalog Module
//! Entry point for the chapter plotting code: owns the data directory and
//! the statistics-API client, and exposes one loader per chapter.

use std::path::PathBuf;

use crate::chapters::{
    introduction, markov, production, EmptyChapter, IntroductionData, MarkovChainsData,
    ProductionData,
};
use crate::error::DataError;
use crate::remote::worldbank::WorldBankClient;

/// Loads the per-chapter datasets from a packaged data directory and the
/// World Bank API. Every chapter call re-reads and re-fetches from
/// scratch; no state is shared or cached between calls.
pub struct DataCatalog {
    data_dir: PathBuf,
    worldbank: WorldBankClient,
}

impl Default for DataCatalog {
    fn default() -> Self {
        Self::new("data")
    }
}

impl DataCatalog {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            worldbank: WorldBankClient::default(),
        }
    }

    /// Use a non-default statistics client (e.g. a mirror endpoint).
    pub fn with_client(data_dir: impl Into<PathBuf>, worldbank: WorldBankClient) -> Self {
        Self {
            data_dir: data_dir.into(),
            worldbank,
        }
    }

    pub fn introduction(&self) -> Result<IntroductionData, DataError> {
        introduction::load(&self.data_dir)
    }

    pub fn production(&self) -> Result<ProductionData, DataError> {
        production::load(&self.data_dir, &self.worldbank)
    }

    pub fn optimal_flows(&self) -> EmptyChapter {
        EmptyChapter
    }

    pub fn markov_chains_and_networks(&self) -> Result<MarkovChainsData, DataError> {
        markov::load(&self.worldbank)
    }

    pub fn nonlinear_interactions(&self) -> EmptyChapter {
        EmptyChapter
    }

    pub fn appendix(&self) -> EmptyChapter {
        EmptyChapter
    }
}
