use crate::graph::{EdgeColor, NodeColor, RenderGraph};
use crate::label_placement::StationLabel;
use crate::lif::Layout;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct GraphDump {
    pub layout_id: String,
    pub layout_name: String,
    pub nodes: Vec<NodeDump>,
    pub edges: Vec<EdgeDump>,
    pub labels: Vec<StationLabel>,
}

#[derive(Debug, Serialize)]
pub struct NodeDump {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub color: NodeColor,
}

#[derive(Debug, Serialize)]
pub struct EdgeDump {
    pub from: String,
    pub to: String,
    pub color: EdgeColor,
    pub weight: f32,
}

impl GraphDump {
    pub fn from_graph(layout: &Layout, graph: &RenderGraph, labels: &[StationLabel]) -> Self {
        let nodes = graph
            .nodes
            .iter()
            .map(|node| NodeDump {
                id: node.id.clone(),
                x: node.x,
                y: node.y,
                color: node.color,
            })
            .collect();

        let edges = graph
            .edges
            .iter()
            .map(|edge| EdgeDump {
                from: edge.from.clone(),
                to: edge.to.clone(),
                color: edge.color,
                weight: edge.weight,
            })
            .collect();

        GraphDump {
            layout_id: layout.layout_id.clone(),
            layout_name: layout.layout_name.clone(),
            nodes,
            edges,
            labels: labels.to_vec(),
        }
    }
}

pub fn write_graph_dump(
    path: &Path,
    layout: &Layout,
    graph: &RenderGraph,
    labels: &[StationLabel],
) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = GraphDump::from_graph(layout, graph, labels);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::build_graph;
    use crate::label_placement::{LabelOptions, place_labels};
    use crate::lif::{LifDocument, VehicleSelector};
    use crate::station_index::build_index;

    #[test]
    fn dump_serializes_colors_as_names() {
        let layout = LifDocument::from_json(
            r#"{ "layouts": [{ "layoutId": "L", "layoutName": "Yard",
                "nodes": [
                    { "nodeId": "A", "nodePosition": { "x": 0, "y": 0 } },
                    { "nodeId": "B", "nodePosition": { "x": 2, "y": 0 } }
                ],
                "edges": [{ "startNodeId": "B", "endNodeId": "A",
                    "vehicleTypeEdgeProperties": [{ "vehicleOrientation": 3.14 }] }],
                "stations": [{ "stationName": "Gate", "interactionNodeIds": ["B"] }] }] }"#,
        )
        .unwrap()
        .layouts
        .remove(0);
        let index = build_index(&layout.stations);
        let graph = build_graph(&layout, &index, &VehicleSelector::First).unwrap();
        let labels = place_labels(&index, &graph.positions(), &LabelOptions::default()).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dump.json");
        write_graph_dump(&path, &layout, &graph, &labels).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["layout_name"], "Yard");
        assert_eq!(value["nodes"][0]["color"], "plain");
        assert_eq!(value["nodes"][1]["color"], "station");
        assert_eq!(value["edges"][0]["color"], "reverse");
        assert_eq!(value["edges"][0]["weight"], 2.0);
        assert_eq!(value["labels"][0]["station"], "Gate");
    }
}
