//! Graph-Exchange Loader Module
//! Reads GEXF network files into weighted digraphs, plus the JSON layout
//! files that position their nodes.

use petgraph::graph::{DiGraph, NodeIndex};
use quick_xml::events::attributes::AttrError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum GexfError {
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("Malformed attribute: {0}")]
    Attr(#[from] AttrError),
    #[error("Malformed layout JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Element <{0}> is missing attribute {1}")]
    MissingAttribute(&'static str, &'static str),
    #[error("Edge has unparseable weight {0:?}")]
    InvalidWeight(String),
    #[error("Edge references unknown node {0}")]
    UnknownNode(String),
}

fn attribute(element: &BytesStart, name: &[u8]) -> Result<Option<String>, GexfError> {
    for attr in element.attributes() {
        let attr = attr?;
        if attr.key.local_name().as_ref() == name {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

/// Read a GEXF file as a weighted digraph. Node payloads are the GEXF
/// ids, so they share a key space with the layout files; edge weights
/// default to 1.0 when the attribute is absent.
pub fn read_gexf(path: impl AsRef<Path>) -> Result<DiGraph<String, f64>, GexfError> {
    let mut reader = Reader::from_file(path.as_ref())?;
    let mut buf = Vec::new();

    let mut graph = DiGraph::new();
    let mut nodes: HashMap<String, NodeIndex> = HashMap::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) | Event::Empty(e) => match e.local_name().as_ref() {
                b"node" => {
                    let id = attribute(&e, b"id")?
                        .ok_or(GexfError::MissingAttribute("node", "id"))?;
                    let index = graph.add_node(id.clone());
                    nodes.insert(id, index);
                }
                b"edge" => {
                    let source = attribute(&e, b"source")?
                        .ok_or(GexfError::MissingAttribute("edge", "source"))?;
                    let target = attribute(&e, b"target")?
                        .ok_or(GexfError::MissingAttribute("edge", "target"))?;
                    let weight: f64 = match attribute(&e, b"weight")? {
                        Some(w) => w.parse().map_err(|_| GexfError::InvalidWeight(w))?,
                        None => 1.0,
                    };

                    let from = *nodes
                        .get(&source)
                        .ok_or_else(|| GexfError::UnknownNode(source.clone()))?;
                    let to = *nodes
                        .get(&target)
                        .ok_or_else(|| GexfError::UnknownNode(target.clone()))?;
                    graph.add_edge(from, to, weight);
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    debug!(
        path = %path.as_ref().display(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "loaded gexf"
    );
    Ok(graph)
}

#[derive(Debug, Deserialize)]
struct LayoutFile {
    nodes: Vec<LayoutNode>,
}

#[derive(Debug, Deserialize)]
struct LayoutNode {
    id: String,
    x: f64,
    y: f64,
}

/// Read a layout file mapping node ids to plot positions.
pub fn read_layout(path: impl AsRef<Path>) -> Result<HashMap<String, [f64; 2]>, GexfError> {
    let file = File::open(path.as_ref())?;
    let layout: LayoutFile = serde_json::from_reader(file)?;

    Ok(layout
        .nodes
        .into_iter()
        .map(|node| (node.id, [node.x, node.y]))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const SMALL_GEXF: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<gexf xmlns="http://www.gexf.net/1.2draft" version="1.2">
  <graph defaultedgetype="directed">
    <nodes>
      <node id="0" label="Boeing" />
      <node id="1" label="Airbus" />
      <node id="2" />
    </nodes>
    <edges>
      <edge id="e0" source="0" target="1" weight="2.5" />
      <edge id="e1" source="1" target="2" />
    </edges>
  </graph>
</gexf>
"#;

    #[test]
    fn gexf_parses_nodes_and_weighted_edges() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("network.gexf");
        fs::write(&path, SMALL_GEXF).unwrap();

        let graph = read_gexf(&path).unwrap();
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);

        let ids: Vec<&str> = graph.node_weights().map(|s| s.as_str()).collect();
        assert_eq!(ids, vec!["0", "1", "2"]);

        let mut weights: Vec<f64> = graph.edge_weights().copied().collect();
        weights.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(weights, vec![1.0, 2.5]);
    }

    #[test]
    fn gexf_nodes_share_the_layout_key_space() {
        let dir = TempDir::new().unwrap();
        let gexf_path = dir.path().join("network.gexf");
        fs::write(
            &gexf_path,
            r#"<gexf><graph defaultedgetype="directed">
              <nodes>
                <node id="USA" label="United States" />
                <node id="FRA" label="France" />
              </nodes>
              <edges><edge source="USA" target="FRA" weight="2.0" /></edges>
            </graph></gexf>"#,
        )
        .unwrap();
        let layout_path = dir.path().join("layout.json");
        fs::write(
            &layout_path,
            r#"{"nodes": [{"id": "USA", "x": 0.0, "y": 1.0}, {"id": "FRA", "x": -1.0, "y": 0.5}]}"#,
        )
        .unwrap();

        let graph = read_gexf(&gexf_path).unwrap();
        let pos = read_layout(&layout_path).unwrap();

        // Nodes are keyed by id, so every node can be positioned even
        // when its label differs from the id.
        for node in graph.node_weights() {
            assert!(pos.contains_key(node), "no position for node {node:?}");
        }
    }

    #[test]
    fn unparseable_weight_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.gexf");
        fs::write(
            &path,
            r#"<gexf><graph><nodes><node id="0"/><node id="1"/></nodes>
               <edges><edge source="0" target="1" weight="heavy"/></edges></graph></gexf>"#,
        )
        .unwrap();

        assert!(matches!(
            read_gexf(&path),
            Err(GexfError::InvalidWeight(w)) if w == "heavy"
        ));
    }

    #[test]
    fn edge_to_unknown_node_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.gexf");
        fs::write(
            &path,
            r#"<gexf><graph><nodes><node id="0"/></nodes>
               <edges><edge source="0" target="9"/></edges></graph></gexf>"#,
        )
        .unwrap();

        assert!(matches!(
            read_gexf(&path),
            Err(GexfError::UnknownNode(id)) if id == "9"
        ));
    }

    #[test]
    fn layout_maps_ids_to_positions() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("layout.json");
        fs::write(
            &path,
            r#"{"nodes": [{"id": "0", "x": 1.5, "y": -2.0}, {"id": "1", "x": 0.0, "y": 3.25}]}"#,
        )
        .unwrap();

        let pos = read_layout(&path).unwrap();
        assert_eq!(pos.len(), 2);
        assert_eq!(pos["0"], [1.5, -2.0]);
        assert_eq!(pos["1"], [0.0, 3.25]);
    }
}
