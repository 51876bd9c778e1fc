//! End-to-end assembly of the Introduction chapter from a synthetic data
//! directory.

use anyhow::Result;
use econ_networks_data::DataCatalog;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(dir: &Path, relative: &str, contents: &str) {
    let path = dir.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

/// A data directory with every file the Introduction chapter reads.
fn synthetic_data_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    write(
        root,
        "crude_oil/data.csv",
        "product_id,location_code,partner_code,export_value\n\
         2709,SAU,CHN,120.0\n\
         2709,SAU,JPN,80.0\n\
         2709,RUS,CHN,90.0\n\
         2709,RUS,DEU,40.0\n\
         2709,NOR,GBR,5.0\n",
    );
    write(
        root,
        "crude_oil/regions-iso3c.csv",
        "name,alpha-3,region\n\
         Saudi Arabia,SAU,Asia\n\
         Russia,RUS,Europe\n\
         Norway,NOR,Europe\n\
         China,CHN,Asia\n\
         Japan,JPN,Asia\n\
         Germany,DEU,Europe\n\
         United Kingdom of Great Britain,GBR,Europe\n",
    );
    write(
        root,
        "commercial_aircraft/aircraft_network.gexf",
        r#"<?xml version="1.0" encoding="UTF-8"?>
<gexf xmlns="http://www.gexf.net/1.2draft" version="1.2">
  <graph defaultedgetype="directed">
    <nodes>
      <node id="USA" label="United States" />
      <node id="FRA" label="France" />
      <node id="BRA" label="Brazil" />
    </nodes>
    <edges>
      <edge id="0" source="USA" target="BRA" weight="3.0" />
      <edge id="1" source="FRA" target="USA" weight="1.5" />
    </edges>
  </graph>
</gexf>
"#,
    );
    write(
        root,
        "commercial_aircraft/aircraft_network_layout.json",
        r#"{"nodes": [
            {"id": "USA", "x": 0.0, "y": 1.0},
            {"id": "FRA", "x": -1.0, "y": 0.5},
            {"id": "BRA", "x": 0.5, "y": -1.0}
        ]}"#,
    );
    write(
        root,
        "csv_files/forbes-global2000.csv",
        "Company,Country,Sales,Profits,Assets,Market Value\n\
         Acme,United States,50.0,5.0,100.0,200.0\n\
         Globex,Japan,80.0,2.0,300.0,150.0\n\
         Initech,Germany,20.0,1.0,50.0,400.0\n",
    );
    write(
        root,
        "csv_files/adjacency_matrix.csv",
        "country,AU,CH,DE\n\
         AU,0,12,---\n\
         CH,7,0,3\n\
         DE,4,,0\n",
    );

    dir
}

#[test]
fn introduction_assembles_every_dataset() -> Result<()> {
    let dir = synthetic_data_dir();
    let catalog = DataCatalog::new(dir.path());

    let data = catalog.introduction()?;

    // Trade graph: all three exporters fall inside the top-10 cutoff and
    // all importers inside the top-21, so nothing is ROW-aggregated.
    assert_eq!(data.crude_oil.edge_count(), 5);
    let labels: Vec<&str> = data.crude_oil.node_weights().map(|s| s.as_str()).collect();
    assert!(labels.contains(&"Saudi Arabia"));
    // Manual override beats the regions file.
    assert!(labels.contains(&"United Kingdom"));

    // Aircraft network and its layout agree on the node set: every
    // graph node can be positioned, even where label and id differ.
    assert_eq!(data.aircraft_network.node_count(), 3);
    assert_eq!(data.aircraft_network_pos.len(), 3);
    assert_eq!(data.aircraft_network_pos["FRA"], [-1.0, 0.5]);
    for node in data.aircraft_network.node_weights() {
        assert!(
            data.aircraft_network_pos.contains_key(node),
            "no position for node {node:?}"
        );
    }

    // Forbes frame: selected columns only, sorted by Market Value.
    assert_eq!(data.forbes_global_2000.shape(), (3, 5));
    let first_country = data
        .forbes_global_2000
        .column("Country")?
        .get(0)?
        .to_string();
    assert_eq!(first_country.trim_matches('"'), "Germany");

    // Adjacency matrix: placeholders and blanks zeroed, finite and
    // non-negative throughout, CH relabeled.
    let table = &data.adjacency_matrix;
    assert_eq!(table.z.dim(), (3, 3));
    assert_eq!(table.z[[0, 2]], 0.0);
    assert_eq!(table.z[[2, 1]], 0.0);
    assert!(table.z.iter().all(|v| v.is_finite() && *v >= 0.0));
    assert_eq!(table.countries, vec!["AU", "SW", "DE"]);

    // Threshold 0 keeps the visual variant identical to the raw matrix.
    assert_eq!(table.z, table.z_visual);

    Ok(())
}

#[test]
fn introduction_fails_on_missing_data_dir() {
    let catalog = DataCatalog::new("/no/such/dir");
    assert!(catalog.introduction().is_err());
}

#[test]
fn placeholder_chapters_are_empty() {
    let catalog = DataCatalog::default();
    let _ = catalog.optimal_flows();
    let _ = catalog.nonlinear_interactions();
    let _ = catalog.appendix();
}
