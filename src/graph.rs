use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::error::{LifError, Result};
use crate::lif::{Layout, TraversalDirection, VehicleSelector};
use crate::station_index::StationIndex;

/// Stroke weight applied to every edge.
pub const EDGE_WEIGHT: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeColor {
    Station,
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeColor {
    Forward,
    Reverse,
}

impl From<TraversalDirection> for EdgeColor {
    fn from(direction: TraversalDirection) -> Self {
        match direction {
            TraversalDirection::Forward => EdgeColor::Forward,
            TraversalDirection::Reverse => EdgeColor::Reverse,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RenderNode {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub color: NodeColor,
}

#[derive(Debug, Clone)]
pub struct RenderEdge {
    pub from: String,
    pub to: String,
    pub color: EdgeColor,
    pub weight: f32,
}

/// Directed graph of one layout, ready to be drawn.
#[derive(Debug, Clone, Default)]
pub struct RenderGraph {
    pub nodes: Vec<RenderNode>,
    pub edges: Vec<RenderEdge>,
    lookup: HashMap<String, usize>,
}

impl RenderGraph {
    pub fn new() -> Self {
        Self::default()
    }

    fn add_node(&mut self, node: RenderNode) -> Result<()> {
        if self.lookup.contains_key(&node.id) {
            return Err(LifError::DuplicateNode(node.id));
        }
        self.lookup.insert(node.id.clone(), self.nodes.len());
        self.nodes.push(node);
        Ok(())
    }

    pub fn node(&self, id: &str) -> Option<&RenderNode> {
        self.lookup.get(id).map(|&idx| &self.nodes[idx])
    }

    pub fn position(&self, id: &str) -> Option<(f64, f64)> {
        self.node(id).map(|node| (node.x, node.y))
    }

    pub fn positions(&self) -> HashMap<&str, (f64, f64)> {
        self.nodes
            .iter()
            .map(|node| (node.id.as_str(), (node.x, node.y)))
            .collect()
    }

    /// `(min_x, min_y, max_x, max_y)` over all nodes.
    pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        let first = self.nodes.first()?;
        let mut bounds = (first.x, first.y, first.x, first.y);
        for node in &self.nodes[1..] {
            bounds.0 = bounds.0.min(node.x);
            bounds.1 = bounds.1.min(node.y);
            bounds.2 = bounds.2.max(node.x);
            bounds.3 = bounds.3.max(node.y);
        }
        Some(bounds)
    }
}

pub fn build_graph(
    layout: &Layout,
    stations: &StationIndex,
    vehicle: &VehicleSelector,
) -> Result<RenderGraph> {
    let mut graph = RenderGraph::new();

    for node in &layout.nodes {
        let color = if stations.contains(&node.node_id) {
            NodeColor::Station
        } else {
            NodeColor::Plain
        };
        graph.add_node(RenderNode {
            id: node.node_id.clone(),
            x: node.node_position.x,
            y: node.node_position.y,
            color,
        })?;
    }

    for edge in &layout.edges {
        for endpoint in [&edge.start_node_id, &edge.end_node_id] {
            if graph.node(endpoint).is_none() {
                return Err(LifError::UnknownNode {
                    edge: edge.describe(),
                    node: endpoint.clone(),
                });
            }
        }
        let properties =
            edge.properties_for(vehicle)
                .ok_or_else(|| LifError::MissingVehicleProperties {
                    edge: edge.describe(),
                    vehicle: vehicle.to_string(),
                })?;
        graph.edges.push(RenderEdge {
            from: edge.start_node_id.clone(),
            to: edge.end_node_id.clone(),
            color: properties.traversal.into(),
            weight: EDGE_WEIGHT,
        });
    }

    debug!(
        layout_id = %layout.layout_id,
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        "built render graph"
    );
    Ok(graph)
}
