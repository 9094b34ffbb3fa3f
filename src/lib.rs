#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod graph;
pub mod graph_dump;
pub mod label_placement;
pub mod lif;
pub mod render;
pub mod select;
pub mod station_index;
pub mod store;
pub mod text_metrics;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, RenderConfig, load_config};
pub use error::LifError;
pub use graph::{EdgeColor, NodeColor, RenderGraph, build_graph};
pub use label_placement::{LabelOptions, StationLabel, place_labels};
pub use lif::{Layout, LifDocument, TraversalDirection, VehicleSelector};
pub use render::render_svg;
pub use station_index::{StationIndex, build_index};
pub use store::LayoutStore;
pub use theme::Theme;

/// A layout turned into a drawable graph with its station annotations.
#[derive(Debug, Clone)]
pub struct Visualization {
    pub title: String,
    pub graph: RenderGraph,
    pub labels: Vec<StationLabel>,
}

/// Rebuilds the station index for `layout`, then its graph and labels.
pub fn visualize(
    layout: &Layout,
    vehicle: &VehicleSelector,
    labels: &LabelOptions,
) -> error::Result<Visualization> {
    let index = build_index(&layout.stations);
    let graph = build_graph(layout, &index, vehicle)?;
    let labels = place_labels(&index, &graph.positions(), labels)?;
    Ok(Visualization {
        title: layout.title().to_string(),
        graph,
        labels,
    })
}

impl Visualization {
    pub fn to_svg(&self, config: &Config) -> String {
        render_svg(&self.graph, &self.labels, &self.title, &config.theme, &config.render)
    }
}
