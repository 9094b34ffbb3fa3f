use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LifError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed JSON, or a document without the required keys.
    #[error("invalid LIF document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("layout '{0}' not found")]
    LayoutNotFound(String),

    #[error("edge {edge} references unknown node '{node}'")]
    UnknownNode { edge: String, node: String },

    #[error("node '{0}' is defined more than once")]
    DuplicateNode(String),

    #[error("edge {edge} has no vehicle type properties for {vehicle}")]
    MissingVehicleProperties { edge: String, vehicle: String },

    #[error("station '{station}' references unknown node '{node}'")]
    UnknownStationNode { station: String, node: String },

    #[error("terminal I/O failed: {0}")]
    Terminal(#[source] std::io::Error),

    #[error("no layouts loaded")]
    NoLayouts,

    #[error("layout selection aborted: input closed")]
    SelectionAborted,
}

pub type Result<T> = std::result::Result<T, LifError>;
