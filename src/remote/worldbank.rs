//! World Bank Client Module
//! Blocking downloads of indicator time series, plus the wide/long
//! reshaping the chapter assemblers need. No retry, no caching; failures
//! propagate to the caller.

use polars::prelude::*;
use serde::Deserialize;
use std::collections::{BTreeSet, HashMap};
use thiserror::Error;
use tracing::debug;

/// Public v2 endpoint of the World Bank statistics API.
pub const WORLD_BANK_API: &str = "https://api.worldbank.org/v2";

/// Country code of the world aggregate series.
pub const WORLD_AGGREGATE: &str = "WLD";

#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API returned status {0}")]
    Status(reqwest::StatusCode),
    #[error("Unexpected API payload: {0}")]
    Payload(#[from] serde_json::Error),
    #[error("Unparseable observation date {0:?}")]
    InvalidDate(String),
    #[error("Failed to assemble frame: {0}")]
    Frame(#[from] PolarsError),
}

/// One country from the API's country listing.
#[derive(Debug, Clone)]
pub struct Country {
    pub iso2: String,
    pub iso3: String,
    pub name: String,
    pub region: String,
}

/// One indicator value for a country and year. Suppressed values stay
/// `None`.
#[derive(Debug, Clone)]
pub struct Observation {
    pub country: String,
    pub iso3: String,
    pub year: i32,
    pub value: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct Page {
    page: u32,
    pages: u32,
}

#[derive(Debug, Deserialize)]
struct IdValue {
    value: String,
}

#[derive(Debug, Deserialize)]
struct IndicatorRow {
    country: IdValue,
    countryiso3code: String,
    date: String,
    value: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct CountryRow {
    id: String,
    #[serde(rename = "iso2Code")]
    iso2_code: String,
    name: String,
    region: IdValue,
}

fn parse_indicator_page(body: &str) -> Result<(Page, Vec<Observation>), RemoteError> {
    let (meta, rows): (Page, Vec<IndicatorRow>) = serde_json::from_str(body)?;

    let mut observations = Vec::with_capacity(rows.len());
    for row in rows {
        let year = row
            .date
            .parse()
            .map_err(|_| RemoteError::InvalidDate(row.date.clone()))?;
        observations.push(Observation {
            country: row.country.value,
            iso3: row.countryiso3code,
            year,
            value: row.value,
        });
    }
    Ok((meta, observations))
}

fn parse_country_page(body: &str) -> Result<(Page, Vec<Country>), RemoteError> {
    let (meta, rows): (Page, Vec<CountryRow>) = serde_json::from_str(body)?;

    let countries = rows
        .into_iter()
        .map(|row| Country {
            iso2: row.iso2_code,
            iso3: row.id,
            name: row.name,
            region: row.region.value.trim().to_string(),
        })
        .collect();
    Ok((meta, countries))
}

/// Blocking client for the World Bank statistics API.
pub struct WorldBankClient {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl Default for WorldBankClient {
    fn default() -> Self {
        Self::new(WORLD_BANK_API)
    }
}

impl WorldBankClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            client: reqwest::blocking::Client::new(),
        }
    }

    fn get(&self, path: &str, page: u32, extra: &[(&str, &str)]) -> Result<String, RemoteError> {
        let url = format!("{}/{}", self.base_url, path);
        let page = page.to_string();
        let mut query: Vec<(&str, &str)> =
            vec![("format", "json"), ("per_page", "20000"), ("page", &page)];
        query.extend_from_slice(extra);

        debug!(%url, page = %page, "fetching statistics page");
        let response = self.client.get(&url).query(&query).send()?;
        if !response.status().is_success() {
            return Err(RemoteError::Status(response.status()));
        }
        Ok(response.text()?)
    }

    /// Full country listing. Aggregate pseudo-countries are kept; callers
    /// filter on `region != "Aggregates"`.
    pub fn countries(&self) -> Result<Vec<Country>, RemoteError> {
        let mut all = Vec::new();
        let mut page = 1;
        loop {
            let body = self.get("country", page, &[])?;
            let (meta, countries) = parse_country_page(&body)?;
            all.extend(countries);
            if meta.page >= meta.pages {
                break;
            }
            page += 1;
        }
        Ok(all)
    }

    /// Download one indicator for a country list (ISO codes, or `all`)
    /// over an inclusive year range.
    pub fn indicator(
        &self,
        indicator: &str,
        countries: &[&str],
        start: i32,
        end: i32,
    ) -> Result<Vec<Observation>, RemoteError> {
        let path = format!("country/{}/indicator/{}", countries.join(";"), indicator);
        let date = format!("{start}:{end}");

        let mut all = Vec::new();
        let mut page = 1;
        loop {
            let body = self.get(&path, page, &[("date", &date)])?;
            let (meta, observations) = parse_indicator_page(&body)?;
            all.extend(observations);
            if meta.page >= meta.pages {
                break;
            }
            page += 1;
        }

        debug!(indicator, rows = all.len(), "downloaded indicator");
        Ok(all)
    }
}

/// Reshape observations to wide form: one `year` column plus one value
/// column per requested country display name.
pub fn to_wide(observations: &[Observation], countries: &[&str]) -> Result<DataFrame, RemoteError> {
    let years: Vec<i32> = observations
        .iter()
        .map(|o| o.year)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut columns = vec![Column::new("year".into(), years.clone())];
    for country in countries {
        let by_year: HashMap<i32, f64> = observations
            .iter()
            .filter(|o| o.country == *country)
            .filter_map(|o| o.value.map(|v| (o.year, v)))
            .collect();
        let values: Vec<Option<f64>> = years.iter().map(|y| by_year.get(y).copied()).collect();
        columns.push(Column::new((*country).into(), values));
    }

    Ok(DataFrame::new(columns)?)
}

/// Reshape observations to long form with columns `country`, `year` and
/// `value_name`.
pub fn to_long(observations: &[Observation], value_name: &str) -> Result<DataFrame, RemoteError> {
    let countries: Vec<&str> = observations.iter().map(|o| o.country.as_str()).collect();
    let years: Vec<i32> = observations.iter().map(|o| o.year).collect();
    let values: Vec<Option<f64>> = observations.iter().map(|o| o.value).collect();

    Ok(DataFrame::new(vec![
        Column::new("country".into(), countries),
        Column::new("year".into(), years),
        Column::new(value_name.into(), values),
    ])?)
}

/// Merge a per-country series with the world aggregate on year and add
/// the ratio column `gdppc_r = gdppc / gdppc_w`. Years absent from the
/// world series are dropped, as in an inner join.
pub fn relative_to_world(
    observations: &[Observation],
    world: &[Observation],
) -> Result<DataFrame, RemoteError> {
    let world_by_year: HashMap<i32, f64> = world
        .iter()
        .filter_map(|o| o.value.map(|v| (o.year, v)))
        .collect();

    let mut countries = Vec::new();
    let mut years = Vec::new();
    let mut values: Vec<Option<f64>> = Vec::new();
    let mut world_values = Vec::new();
    let mut ratios: Vec<Option<f64>> = Vec::new();

    for obs in observations {
        let Some(&world_value) = world_by_year.get(&obs.year) else {
            continue;
        };
        countries.push(obs.country.as_str());
        years.push(obs.year);
        values.push(obs.value);
        world_values.push(world_value);
        ratios.push(obs.value.map(|v| v / world_value));
    }

    Ok(DataFrame::new(vec![
        Column::new("country".into(), countries),
        Column::new("year".into(), years),
        Column::new("gdppc".into(), values),
        Column::new("gdppc_w".into(), world_values),
        Column::new("gdppc_r".into(), ratios),
    ])?)
}
