use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{LifError, Result};
use crate::lif::{LifDocument, Layout, MetaInformation};

/// Parsed layouts keyed by `layoutId`.
///
/// Ids are listed in the order they were first loaded. Loading a layout whose
/// id is already present replaces it in place.
#[derive(Debug, Default)]
pub struct LayoutStore {
    layouts: HashMap<String, Layout>,
    order: Vec<String>,
    meta: Option<MetaInformation>,
}

impl LayoutStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a LIF JSON document and register its layouts.
    pub fn load(&mut self, input: &str) -> Result<usize> {
        let document = LifDocument::from_json(input)?;
        Ok(self.load_document(document))
    }

    pub fn load_file(&mut self, path: &Path) -> Result<usize> {
        let contents = std::fs::read_to_string(path).map_err(|source| LifError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let count = self.load(&contents)?;
        info!(path = %path.display(), layouts = count, "loaded LIF file");
        Ok(count)
    }

    pub fn load_document(&mut self, document: LifDocument) -> usize {
        if document.meta_information.is_some() {
            self.meta = document.meta_information;
        }
        let count = document.layouts.len();
        for layout in document.layouts {
            let id = layout.layout_id.clone();
            if self.layouts.insert(id.clone(), layout).is_some() {
                debug!(layout_id = %id, "replaced previously loaded layout");
            } else {
                debug!(layout_id = %id, "registered layout");
                self.order.push(id);
            }
        }
        count
    }

    pub fn get(&self, layout_id: &str) -> Result<&Layout> {
        self.layouts
            .get(layout_id)
            .ok_or_else(|| LifError::LayoutNotFound(layout_id.to_string()))
    }

    pub fn list(&self) -> &[String] {
        &self.order
    }

    pub fn meta_information(&self) -> Option<&MetaInformation> {
        self.meta.as_ref()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
