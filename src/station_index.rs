use std::collections::HashMap;

use tracing::debug;

use crate::lif::Station;

/// Mapping from node id to the display name of the station claiming it.
///
/// Iteration follows the order in which node ids were first claimed. When two
/// stations claim the same node the later one wins but keeps the slot of the
/// first claim.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StationIndex {
    entries: Vec<(String, String)>,
    slots: HashMap<String, usize>,
}

impl StationIndex {
    pub fn build(stations: &[Station]) -> Self {
        let mut index = Self::default();
        for station in stations {
            for node_id in &station.interaction_node_ids {
                index.insert(node_id, &station.station_name);
            }
        }
        index
    }

    fn insert(&mut self, node_id: &str, station_name: &str) {
        match self.slots.get(node_id) {
            Some(&slot) => {
                let previous = &mut self.entries[slot].1;
                if previous != station_name {
                    debug!(node_id, previous = %previous, station = station_name, "node claimed by a later station");
                }
                *previous = station_name.to_string();
            }
            None => {
                self.slots.insert(node_id.to_string(), self.entries.len());
                self.entries
                    .push((node_id.to_string(), station_name.to_string()));
            }
        }
    }

    pub fn get(&self, node_id: &str) -> Option<&str> {
        self.slots
            .get(node_id)
            .map(|&slot| self.entries[slot].1.as_str())
    }

    pub fn contains(&self, node_id: &str) -> bool {
        self.slots.contains_key(node_id)
    }

    /// `(node_id, station_name)` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(node, station)| (node.as_str(), station.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn build_index(stations: &[Station]) -> StationIndex {
    StationIndex::build(stations)
}
