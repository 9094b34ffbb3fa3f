use crate::config::RenderConfig;
use crate::graph::{EdgeColor, RenderGraph};
use crate::label_placement::StationLabel;
use crate::text_metrics::text_width_or_estimate;
use crate::theme::Theme;
use anyhow::Result;
use std::path::Path;
use tracing::debug;

const EDGE_COLORS: [EdgeColor; 2] = [EdgeColor::Forward, EdgeColor::Reverse];
const MIN_CANVAS: f32 = 200.0;

/// Maps layout coordinates onto the canvas. LIF y grows upwards, SVG y downwards.
#[derive(Debug, Clone, Copy)]
struct Viewport {
    min_x: f64,
    min_y: f64,
    scale: f64,
    origin_x: f64,
    origin_y: f64,
}

impl Viewport {
    fn fit(graph: &RenderGraph, config: &RenderConfig, top: f64) -> Self {
        let (width, height) = canvas_size(config);
        let (width, height) = (width as f64, height as f64);
        let pad = config.padding as f64;
        let avail_w = (width - 2.0 * pad).max(1.0);
        let avail_h = (height - 2.0 * pad - top).max(1.0);

        let Some((min_x, min_y, max_x, max_y)) = graph.bounds() else {
            return Self {
                min_x: 0.0,
                min_y: 0.0,
                scale: 1.0,
                origin_x: width / 2.0,
                origin_y: height / 2.0,
            };
        };
        let span_x = max_x - min_x;
        let span_y = max_y - min_y;
        let scale = match (span_x > f64::EPSILON, span_y > f64::EPSILON) {
            (true, true) => (avail_w / span_x).min(avail_h / span_y),
            (true, false) => avail_w / span_x,
            (false, true) => avail_h / span_y,
            (false, false) => 1.0,
        };
        let used_w = span_x * scale;
        let used_h = span_y * scale;
        Self {
            min_x,
            min_y,
            scale,
            origin_x: pad + (avail_w - used_w) / 2.0,
            origin_y: pad + top + (avail_h - used_h) / 2.0 + used_h,
        }
    }

    fn project(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.origin_x + (x - self.min_x) * self.scale,
            self.origin_y - (y - self.min_y) * self.scale,
        )
    }
}

pub fn render_svg(
    graph: &RenderGraph,
    labels: &[StationLabel],
    title: &str,
    theme: &Theme,
    config: &RenderConfig,
) -> String {
    let mut svg = String::new();
    let (width, height) = canvas_size(config);
    let title_band = if title.is_empty() {
        0.0
    } else {
        theme.title_font_size as f64 * 1.8
    };
    let viewport = Viewport::fit(graph, config, title_band);

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));
    svg.push_str(&format!("<title>{}</title>", escape_xml(title)));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        theme.background
    ));

    svg.push_str("<defs>");
    for color in EDGE_COLORS {
        svg.push_str(&format!(
            "<marker id=\"{}\" viewBox=\"0 0 10 10\" refX=\"10\" refY=\"5\" markerWidth=\"5\" markerHeight=\"5\" orient=\"auto-start-reverse\"><path d=\"M 0 0 L 10 5 L 0 10 z\" fill=\"{}\"/></marker>",
            marker_id(color),
            theme.edge_stroke(color)
        ));
    }
    svg.push_str("</defs>");

    if !title.is_empty() {
        svg.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
            width / 2.0,
            config.padding as f64 / 2.0 + theme.title_font_size as f64,
            theme.font_family,
            theme.title_font_size,
            theme.node_text_color,
            escape_xml(title)
        ));
    }

    let radius = config.node_radius as f64;
    for edge in &graph.edges {
        let (Some(from), Some(to)) = (graph.position(&edge.from), graph.position(&edge.to)) else {
            continue;
        };
        let start = viewport.project(from.0, from.1);
        let end = viewport.project(to.0, to.1);
        let Some(d) = arc_path(start, end, config.arc_rad as f64, radius) else {
            debug!(from = %edge.from, to = %edge.to, "skipped zero-length edge");
            continue;
        };
        svg.push_str(&format!(
            "<path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\" marker-end=\"url(#{})\"/>",
            d,
            theme.edge_stroke(edge.color),
            edge.weight,
            marker_id(edge.color)
        ));
    }

    for node in &graph.nodes {
        let (cx, cy) = viewport.project(node.x, node.y);
        svg.push_str(&format!(
            "<circle cx=\"{cx:.2}\" cy=\"{cy:.2}\" r=\"{radius:.2}\" fill=\"{}\"/>",
            theme.node_fill(node.color)
        ));
        if config.show_node_ids {
            svg.push_str(&format!(
                "<text x=\"{cx:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
                cy + theme.font_size as f64 / 3.0,
                theme.font_family,
                theme.font_size * 0.8,
                theme.node_text_color,
                escape_xml(&node.id)
            ));
        }
    }

    for label in labels {
        let (x, y) = viewport.project(label.x, label.y);
        svg.push_str(&station_label_svg(x, y, &label.station, theme, config));
    }

    svg.push_str("</svg>");
    debug!(
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        labels = labels.len(),
        bytes = svg.len(),
        "rendered svg"
    );
    svg
}

fn canvas_size(config: &RenderConfig) -> (f32, f32) {
    (config.width.max(MIN_CANVAS), config.height.max(MIN_CANVAS))
}

fn marker_id(color: EdgeColor) -> &'static str {
    match color {
        EdgeColor::Forward => "arrow-forward",
        EdgeColor::Reverse => "arrow-reverse",
    }
}

/// Quadratic arc from `start` to `end`, bent by `rad` times the chord length
/// and trimmed by `inset` at both ends so arrowheads stay visible. Chords too
/// short to trim are drawn untrimmed; only a zero-length chord yields `None`.
fn arc_path(start: (f64, f64), end: (f64, f64), rad: f64, inset: f64) -> Option<String> {
    let dx = end.0 - start.0;
    let dy = end.1 - start.1;
    let len = dx.hypot(dy);
    if len <= f64::EPSILON {
        return None;
    }
    let inset = if len <= 2.0 * inset { 0.0 } else { inset };
    let (ux, uy) = (dx / len, dy / len);
    let from = (start.0 + ux * inset, start.1 + uy * inset);
    let to = (end.0 - ux * inset, end.1 - uy * inset);
    let mid = ((start.0 + end.0) / 2.0, (start.1 + end.1) / 2.0);
    let control = (mid.0 + rad * dy, mid.1 - rad * dx);
    Some(format!(
        "M {:.2} {:.2} Q {:.2} {:.2} {:.2} {:.2}",
        from.0, from.1, control.0, control.1, to.0, to.1
    ))
}

fn station_label_svg(x: f64, y: f64, text: &str, theme: &Theme, config: &RenderConfig) -> String {
    let text_w = text_width_or_estimate(text, theme.font_size, &theme.font_family) as f64;
    let text_h = theme.font_size as f64;
    let pad_x = config.label_padding_x as f64;
    let pad_y = config.label_padding_y as f64;
    let offset = config.label_offset as f64;

    let rect_x = x + offset;
    let rect_y = y - offset - text_h - 2.0 * pad_y;
    let rect_w = text_w + 2.0 * pad_x;
    let rect_h = text_h + 2.0 * pad_y;

    format!(
        "<g class=\"station-label\"><rect x=\"{rect_x:.2}\" y=\"{rect_y:.2}\" width=\"{rect_w:.2}\" height=\"{rect_h:.2}\" rx=\"3\" ry=\"3\" fill=\"{}\" stroke=\"{}\" stroke-width=\"0.8\"/><text x=\"{:.2}\" y=\"{:.2}\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text></g>",
        theme.label_background,
        theme.label_border,
        rect_x + pad_x,
        rect_y + pad_y + text_h * 0.85,
        theme.font_family,
        theme.font_size,
        theme.label_text_color,
        escape_xml(text)
    )
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
            debug!(path = %path.display(), "wrote svg");
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();
    opt.default_size = usvg::Size::from_wh(render_cfg.width, render_cfg.height)
        .ok_or_else(|| anyhow::anyhow!("Invalid canvas size"))?;

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    debug!(path = %output.display(), "wrote png");
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::build_graph;
    use crate::label_placement::{LabelOptions, place_labels};
    use crate::lif::{LifDocument, VehicleSelector};
    use crate::station_index::build_index;

    const DOC: &str = r#"{ "layouts": [{
        "layoutId": "L", "layoutName": "Hall <1>",
        "nodes": [
            { "nodeId": "A", "nodePosition": { "x": 0.0, "y": 0.0 } },
            { "nodeId": "B", "nodePosition": { "x": 10.0, "y": 5.0 } }
        ],
        "edges": [
            { "startNodeId": "A", "endNodeId": "B",
              "vehicleTypeEdgeProperties": [{ "vehicleOrientation": 0.0 }] },
            { "startNodeId": "B", "endNodeId": "A",
              "vehicleTypeEdgeProperties": [{ "vehicleOrientation": 3.14 }] }
        ],
        "stations": [{ "stationName": "Dock & Load", "interactionNodeIds": ["A"] }]
    }] }"#;

    fn render(theme: &Theme) -> String {
        let layout = LifDocument::from_json(DOC).unwrap().layouts.remove(0);
        let index = build_index(&layout.stations);
        let graph = build_graph(&layout, &index, &VehicleSelector::First).unwrap();
        let labels = place_labels(&index, &graph.positions(), &LabelOptions::default()).unwrap();
        render_svg(&graph, &labels, layout.title(), theme, &RenderConfig::default())
    }

    #[test]
    fn render_svg_basic() {
        let svg = render(&Theme::classic());
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("Hall &lt;1&gt;"));
        assert!(svg.contains("Dock &amp; Load"));
        assert_eq!(svg.matches("<circle").count(), 2);
        assert_eq!(svg.matches("marker-end=").count(), 2);
    }

    #[test]
    fn uses_theme_colors_for_nodes_and_edges() {
        let svg = render(&Theme::classic());
        assert!(svg.contains("fill=\"green\""));
        assert!(svg.contains("fill=\"grey\""));
        assert!(svg.contains("stroke=\"black\" stroke-width=\"2\" marker-end=\"url(#arrow-forward)\""));
        assert!(svg.contains("stroke=\"red\" stroke-width=\"2\" marker-end=\"url(#arrow-reverse)\""));
    }

    #[test]
    fn viewport_flips_y_and_stays_inside_canvas() {
        let layout = LifDocument::from_json(DOC).unwrap().layouts.remove(0);
        let graph = build_graph(&layout, &build_index(&[]), &VehicleSelector::First).unwrap();
        let config = RenderConfig::default();
        let viewport = Viewport::fit(&graph, &config, 0.0);
        let (ax, ay) = viewport.project(0.0, 0.0);
        let (bx, by) = viewport.project(10.0, 5.0);
        assert!(bx > ax);
        assert!(by < ay);
        for (x, y) in [(ax, ay), (bx, by)] {
            assert!(x >= config.padding as f64 - 1e-9 && x <= (config.width - config.padding) as f64 + 1e-9);
            assert!(y >= config.padding as f64 - 1e-9 && y <= (config.height - config.padding) as f64 + 1e-9);
        }
    }

    #[test]
    fn single_node_is_centered() {
        let graph_doc = r#"{ "layouts": [{ "layoutId": "L",
            "nodes": [{ "nodeId": "A", "nodePosition": { "x": 3.0, "y": 3.0 } }], "edges": [] }] }"#;
        let layout = LifDocument::from_json(graph_doc).unwrap().layouts.remove(0);
        let graph = build_graph(&layout, &build_index(&[]), &VehicleSelector::First).unwrap();
        let config = RenderConfig::default();
        let (x, y) = Viewport::fit(&graph, &config, 0.0).project(3.0, 3.0);
        assert!((x - config.width as f64 / 2.0).abs() < 1e-9);
        assert!((y - config.height as f64 / 2.0).abs() < 1e-9);
    }

    #[test]
    fn arc_bends_off_the_chord() {
        let d = arc_path((0.0, 0.0), (100.0, 0.0), 0.02, 0.0).unwrap();
        assert_eq!(d, "M 0.00 0.00 Q 50.00 -2.00 100.00 0.00");
        assert_eq!(
            arc_path((0.0, 0.0), (1.0, 0.0), 0.02, 6.0).as_deref(),
            Some("M 0.00 0.00 Q 0.50 -0.02 1.00 0.00")
        );
        assert!(arc_path((5.0, 5.0), (5.0, 5.0), 0.02, 6.0).is_none());
    }

    #[test]
    fn closely_spaced_edges_are_still_drawn() {
        let doc = r#"{ "layouts": [{ "layoutId": "L",
            "nodes": [
                { "nodeId": "A", "nodePosition": { "x": 0.0, "y": 0.0 } },
                { "nodeId": "B", "nodePosition": { "x": 100.0, "y": 0.0 } },
                { "nodeId": "C", "nodePosition": { "x": 100.5, "y": 0.0 } }
            ],
            "edges": [
                { "startNodeId": "A", "endNodeId": "B",
                  "vehicleTypeEdgeProperties": [{ "vehicleOrientation": 0.0 }] },
                { "startNodeId": "B", "endNodeId": "C",
                  "vehicleTypeEdgeProperties": [{ "vehicleOrientation": 3.14 }] }
            ] }] }"#;
        let layout = LifDocument::from_json(doc).unwrap().layouts.remove(0);
        let graph = build_graph(&layout, &build_index(&[]), &VehicleSelector::First).unwrap();
        let svg = render_svg(&graph, &[], "", &Theme::classic(), &RenderConfig::default());
        assert_eq!(svg.matches("marker-end=").count(), 2);
        assert!(svg.contains("marker-end=\"url(#arrow-reverse)\""));
    }

    #[test]
    fn narrow_canvas_fits_to_clamped_size() {
        let doc = r#"{ "layouts": [{ "layoutId": "L",
            "nodes": [
                { "nodeId": "A", "nodePosition": { "x": 0.0, "y": 0.0 } },
                { "nodeId": "B", "nodePosition": { "x": 10.0, "y": 0.0 } }
            ],
            "edges": [] }] }"#;
        let layout = LifDocument::from_json(doc).unwrap().layouts.remove(0);
        let graph = build_graph(&layout, &build_index(&[]), &VehicleSelector::First).unwrap();
        let config = RenderConfig {
            width: 100.0,
            height: 100.0,
            ..RenderConfig::default()
        };
        let svg = render_svg(&graph, &[], "", &Theme::classic(), &config);
        assert!(svg.contains("width=\"200\" height=\"200\""));

        let viewport = Viewport::fit(&graph, &config, 0.0);
        let (ax, _) = viewport.project(0.0, 0.0);
        let (bx, _) = viewport.project(10.0, 0.0);
        assert!((ax - 48.0).abs() < 1e-9);
        assert!((bx - 152.0).abs() < 1e-9);
    }
}
