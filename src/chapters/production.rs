//! Production Chapter
//! US and Australian input-output sector accounts at three aggregation
//! levels, plus cross-country GDP growth rates.

use ndarray::{Array1, Array2};
use polars::prelude::DataFrame;
use std::path::Path;

use crate::data::coefficients::build_coefficient_matrices;
use crate::data::tables::{read_output_column, read_use_table};
use crate::error::DataError;
use crate::remote::worldbank::{self, WorldBankClient};

/// GDP growth (annual %).
const GDP_GROWTH: &str = "NY.GDP.MKTP.KD.ZG";

/// Countries shown in the GDP growth charts, by display name.
const GDP_COUNTRIES: [&str; 10] = [
    "Brazil",
    "United States",
    "United Kingdom",
    "France",
    "Japan",
    "Indonesia",
    "Argentina",
    "Mexico",
    "Australia",
    "South Africa",
];

/// Non-sector columns of the 15-sector US use table (final demand and
/// totals).
const US_15_DROP: [&str; 8] = [
    "Name",
    "Total Intermediate",
    "Personal consumption expenditures",
    "Private fixed investment",
    "Change in private inventories",
    "Exports of goods and services",
    "Government consumption expenditures and gross investment",
    "Total use of products",
];

/// Non-sector columns of the 71-sector US use table. The table's first
/// header cell is blank.
const US_71_DROP: [&str; 22] = [
    "", "T001", "F010", "F02E", "F02N", "F02R", "F02S", "F030", "F040", "F06C", "F06E", "F06N",
    "F06S", "F07C", "F07E", "F07N", "F07S", "F10C", "F10E", "F10N", "F10S", "T019",
];

pub const US_SECTOR_CODES_15: [&str; 15] = [
    "ag", "mi", "ut", "co", "ma", "wh", "re", "tr", "in", "fi", "pr", "ed", "ar", "ot", "go",
];

pub const US_SECTOR_CODES_71: [&str; 71] = [
    "111CA", "113FF", "211", "212", "213", "22", "23", "321", "327", "331", "332", "333", "334",
    "335", "3361MV", "3364OT", "337", "339", "311FT", "313TT", "315AL", "322", "323", "324",
    "325", "326", "42", "441", "445", "452", "4A0", "481", "482", "483", "484", "485", "486",
    "487OS", "493", "511", "512", "513", "514", "521CI", "523", "524", "525", "HS", "ORE",
    "532RL", "5411", "5415", "5412OP", "55", "561", "562", "61", "621", "622", "623", "624",
    "711AS", "713", "721", "722", "81", "GFGD", "GFGN", "GFE", "GSLG", "GSLE",
];

pub const AU_SECTOR_CODES_114: [&str; 114] = [
    "0101", "0102", "0103", "0201", "0301", "0401", "0501", "0601", "0701", "0801", "0802",
    "0901", "1001", "1101", "1102", "1103", "1104", "1105", "1106", "1107", "1108", "1109",
    "1201", "1202", "1205", "1301", "1302", "1303", "1304", "1305", "1306", "1401", "1402",
    "1501", "1502", "1601", "1701", "1801", "1802", "1803", "1804", "1901", "1902", "2001",
    "2002", "2003", "2004", "2005", "2101", "2102", "2201", "2202", "2203", "2204", "2301",
    "2302", "2303", "2304", "2401", "2403", "2404", "2405", "2501", "2502", "2601", "2605",
    "2701", "2801", "2901", "3001", "3002", "3101", "3201", "3301", "3901", "4401", "4501",
    "4601", "4701", "4801", "4901", "5101", "5201", "5401", "5501", "5601", "5701", "5801",
    "6001", "6201", "6301", "6401", "6601", "6701", "6702", "6901", "7001", "7210", "7310",
    "7501", "7601", "7701", "8010", "8110", "8210", "8401", "8601", "8901", "9101", "9201",
    "9401", "9402", "9501", "9502",
];

/// One input-output account: an adjacency matrix (raw flows or derived
/// coefficients), total industry sales, and the sector code labels.
#[derive(Debug, Clone)]
pub struct SectorAccounts {
    pub adjacency_matrix: Array2<f64>,
    pub total_industry_sales: Array1<f64>,
    pub codes: &'static [&'static str],
}

/// Datasets behind the Production chapter's charts.
#[derive(Debug)]
pub struct ProductionData {
    /// 15-sector US accounts, raw flow matrix.
    pub us_sectors_15: SectorAccounts,
    /// 71-sector US accounts, A-coefficient matrix.
    pub us_sectors_71: SectorAccounts,
    /// 114-sector Australian accounts, A-coefficient matrix.
    pub au_sectors_114: SectorAccounts,
    /// GDP growth rates 1961-2020, one column per charted country.
    pub gdp_growth: DataFrame,
}

pub fn load(data_dir: &Path, worldbank: &WorldBankClient) -> Result<ProductionData, DataError> {
    let z_15 = read_use_table(
        data_dir.join("csv_files/use_15.csv"),
        15,
        Some(US_15_DROP.as_slice()),
    )?;
    let x_15 = read_output_column(
        data_dir.join("csv_files/make_15.csv"),
        "Total Industry Output",
        15,
    )?;
    let us_sectors_15 = SectorAccounts {
        adjacency_matrix: z_15,
        total_industry_sales: x_15,
        codes: &US_SECTOR_CODES_15,
    };

    let z_71 = read_use_table(
        data_dir.join("csv_files/use_71.csv"),
        71,
        Some(US_71_DROP.as_slice()),
    )?;
    let x_71 = read_output_column(
        data_dir.join("csv_files/make_71.csv"),
        "Total Industry Output",
        71,
    )?;
    let (a_71, _f_71) = build_coefficient_matrices(&z_71, &x_71);
    let us_sectors_71 = SectorAccounts {
        adjacency_matrix: a_71,
        total_industry_sales: x_71,
        codes: &US_SECTOR_CODES_71,
    };

    let z_114 = read_use_table(data_dir.join("csv_files/use_114_aus.csv"), 114, None)?;
    let x_114 = read_output_column(data_dir.join("csv_files/make_114_aus.csv"), "total", 114)?;
    let (a_114, _f_114) = build_coefficient_matrices(&z_114, &x_114);
    let au_sectors_114 = SectorAccounts {
        adjacency_matrix: a_114,
        total_industry_sales: x_114,
        codes: &AU_SECTOR_CODES_114,
    };

    let observations = worldbank.indicator(GDP_GROWTH, &["all"], 1961, 2020)?;
    let gdp_growth = worldbank::to_wide(&observations, &GDP_COUNTRIES)?;

    Ok(ProductionData {
        us_sectors_15,
        us_sectors_71,
        au_sectors_114,
        gdp_growth,
    })
}
