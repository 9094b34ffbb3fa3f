use serde::{Deserialize, Serialize};

/// Orientation value that marks an edge as traversed backwards.
#[allow(clippy::approx_constant)]
pub const REVERSE_ORIENTATION: f64 = 3.14;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifDocument {
    #[serde(default)]
    pub meta_information: Option<MetaInformation>,
    pub layouts: Vec<Layout>,
}

impl LifDocument {
    pub fn from_json(input: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(input)?)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaInformation {
    pub project_identification: Option<String>,
    pub creator: Option<String>,
    pub export_timestamp: Option<String>,
    pub lif_version: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    pub layout_id: String,
    #[serde(default)]
    pub layout_name: String,
    pub layout_version: Option<String>,
    pub layout_level_id: Option<String>,
    pub layout_description: Option<String>,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    #[serde(default)]
    pub stations: Vec<Station>,
}

impl Layout {
    /// Window title for this layout, falling back to the id.
    pub fn title(&self) -> &str {
        if self.layout_name.trim().is_empty() {
            &self.layout_id
        } else {
            &self.layout_name
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub node_id: String,
    pub node_name: Option<String>,
    pub node_position: NodePosition,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct NodePosition {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub edge_id: Option<String>,
    pub edge_name: Option<String>,
    pub start_node_id: String,
    pub end_node_id: String,
    pub vehicle_type_edge_properties: Vec<VehicleTypeEdgeProperties>,
}

impl Edge {
    /// Human readable handle used in error messages.
    pub fn describe(&self) -> String {
        match &self.edge_id {
            Some(id) => format!("'{id}'"),
            None => format!("'{}->{}'", self.start_node_id, self.end_node_id),
        }
    }

    pub fn properties_for(&self, vehicle: &VehicleSelector) -> Option<&VehicleTypeEdgeProperties> {
        match vehicle {
            VehicleSelector::First => self.vehicle_type_edge_properties.first(),
            VehicleSelector::Type(id) => self
                .vehicle_type_edge_properties
                .iter()
                .find(|props| props.vehicle_type_id.as_deref() == Some(id.as_str())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TraversalDirection {
    Forward,
    Reverse,
}

impl TraversalDirection {
    #[allow(clippy::float_cmp)]
    pub fn from_orientation(orientation: f64) -> Self {
        if orientation == REVERSE_ORIENTATION {
            Self::Reverse
        } else {
            Self::Forward
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(from = "RawVehicleTypeEdgeProperties")]
pub struct VehicleTypeEdgeProperties {
    pub vehicle_type_id: Option<String>,
    pub vehicle_orientation: f64,
    pub traversal: TraversalDirection,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawVehicleTypeEdgeProperties {
    vehicle_type_id: Option<String>,
    vehicle_orientation: f64,
}

impl From<RawVehicleTypeEdgeProperties> for VehicleTypeEdgeProperties {
    fn from(raw: RawVehicleTypeEdgeProperties) -> Self {
        Self {
            vehicle_type_id: raw.vehicle_type_id,
            vehicle_orientation: raw.vehicle_orientation,
            traversal: TraversalDirection::from_orientation(raw.vehicle_orientation),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    pub station_id: Option<String>,
    pub station_name: String,
    pub station_description: Option<String>,
    #[serde(default)]
    pub interaction_node_ids: Vec<String>,
}

/// Which vehicle type's edge properties drive edge styling.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum VehicleSelector {
    #[default]
    First,
    Type(String),
}

impl std::fmt::Display for VehicleSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VehicleSelector::First => write!(f, "the default vehicle type"),
            VehicleSelector::Type(id) => write!(f, "vehicle type '{id}'"),
        }
    }
}
