//! Markov Chains and Networks Chapter
//! GDP per capita for every non-aggregate country, relative to the world
//! aggregate.

use polars::prelude::DataFrame;

use crate::error::DataError;
use crate::remote::worldbank::{self, WorldBankClient, WORLD_AGGREGATE};

/// GDP per capita (current US$).
const GDP_PER_CAPITA: &str = "NY.GDP.PCAP.CD";

/// Datasets behind the Markov Chains and Networks chapter's charts.
#[derive(Debug)]
pub struct MarkovChainsData {
    /// Long frame: country, year, gdppc, gdppc_w, gdppc_r (ratio to the
    /// world aggregate), 1960-2019.
    pub gdppc: DataFrame,
}

pub fn load(worldbank: &WorldBankClient) -> Result<MarkovChainsData, DataError> {
    let countries = worldbank.countries()?;
    let iso2: Vec<String> = countries
        .into_iter()
        .filter(|c| c.region != "Aggregates")
        .map(|c| c.iso2)
        .collect();
    let codes: Vec<&str> = iso2.iter().map(String::as_str).collect();

    let observations = worldbank.indicator(GDP_PER_CAPITA, &codes, 1960, 2019)?;
    let world = worldbank.indicator(GDP_PER_CAPITA, &[WORLD_AGGREGATE], 1960, 2019)?;

    Ok(MarkovChainsData {
        gdppc: worldbank::relative_to_world(&observations, &world)?,
    })
}
