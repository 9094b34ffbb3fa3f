// Station label placement: decides which station names get drawn, skipping
// labels that would land on top of an already accepted one.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{LifError, Result};
use crate::station_index::StationIndex;

pub const DEFAULT_OVERLAP_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LabelOptions {
    /// Suppress labels closer than `threshold` to an accepted label.
    pub hide_overlapping: bool,
    /// Minimum distance, in layout units, between two drawn labels.
    pub threshold: f64,
}

impl Default for LabelOptions {
    fn default() -> Self {
        Self {
            hide_overlapping: false,
            threshold: DEFAULT_OVERLAP_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationLabel {
    pub station: String,
    pub node_id: String,
    pub x: f64,
    pub y: f64,
}

/// Walks the index in order and keeps each label whose nearest accepted
/// neighbour is at least `threshold` away. Candidates are only compared
/// against labels accepted before them.
pub fn place_labels(
    stations: &StationIndex,
    positions: &HashMap<&str, (f64, f64)>,
    options: &LabelOptions,
) -> Result<Vec<StationLabel>> {
    let mut accepted: Vec<StationLabel> = Vec::with_capacity(stations.len());

    for (node_id, station) in stations.iter() {
        let &(x, y) = positions
            .get(node_id)
            .ok_or_else(|| LifError::UnknownStationNode {
                station: station.to_string(),
                node: node_id.to_string(),
            })?;

        if options.hide_overlapping {
            let nearest = accepted
                .iter()
                .map(|label| distance((label.x, label.y), (x, y)))
                .fold(f64::INFINITY, f64::min);
            if nearest < options.threshold {
                debug!(station, node_id, nearest, "suppressed overlapping station label");
                continue;
            }
        }

        accepted.push(StationLabel {
            station: station.to_string(),
            node_id: node_id.to_string(),
            x,
            y,
        });
    }

    Ok(accepted)
}

fn distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    (a.0 - b.0).hypot(a.1 - b.1)
}
