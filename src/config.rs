use crate::label_placement::LabelOptions;
use crate::theme::Theme;
use anyhow::Context;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub width: f32,
    pub height: f32,
    pub padding: f32,
    pub node_radius: f32,
    /// Curvature of edge arcs relative to edge length.
    pub arc_rad: f32,
    pub show_node_ids: bool,
    pub label_offset: f32,
    pub label_padding_x: f32,
    pub label_padding_y: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            padding: 48.0,
            node_radius: 6.0,
            arc_rad: 0.02,
            show_node_ids: true,
            label_offset: 10.0,
            label_padding_x: 4.0,
            label_padding_y: 2.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub theme: Theme,
    pub render: RenderConfig,
    pub labels: LabelOptions,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    render: Option<RenderConfigFile>,
    labels: Option<LabelOptions>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    font_size: Option<f32>,
    title_font_size: Option<f32>,
    station_color: Option<String>,
    plain_color: Option<String>,
    forward_color: Option<String>,
    reverse_color: Option<String>,
    node_text_color: Option<String>,
    label_text_color: Option<String>,
    label_background: Option<String>,
    label_border: Option<String>,
    background: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct RenderConfigFile {
    width: Option<f32>,
    height: Option<f32>,
    padding: Option<f32>,
    node_radius: Option<f32>,
    arc_rad: Option<f32>,
    show_node_ids: Option<bool>,
    label_offset: Option<f32>,
    label_padding_x: Option<f32>,
    label_padding_y: Option<f32>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let parsed: ConfigFile = serde_json::from_str(contents)?;

    if let Some(theme_name) = parsed.theme.as_deref() {
        match theme_name {
            "modern" => config.theme = Theme::modern(),
            "classic" | "default" => config.theme = Theme::classic(),
            other => anyhow::bail!("unknown theme '{other}'"),
        }
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.font_family {
            config.theme.font_family = v;
        }
        if let Some(v) = vars.font_size {
            config.theme.font_size = v;
        }
        if let Some(v) = vars.title_font_size {
            config.theme.title_font_size = v;
        }
        if let Some(v) = vars.station_color {
            config.theme.station_color = v;
        }
        if let Some(v) = vars.plain_color {
            config.theme.plain_color = v;
        }
        if let Some(v) = vars.forward_color {
            config.theme.forward_color = v;
        }
        if let Some(v) = vars.reverse_color {
            config.theme.reverse_color = v;
        }
        if let Some(v) = vars.node_text_color {
            config.theme.node_text_color = v;
        }
        if let Some(v) = vars.label_text_color {
            config.theme.label_text_color = v;
        }
        if let Some(v) = vars.label_background {
            config.theme.label_background = v;
        }
        if let Some(v) = vars.label_border {
            config.theme.label_border = v;
        }
        if let Some(v) = vars.background {
            config.theme.background = v;
        }
    }

    if let Some(render) = parsed.render {
        if let Some(v) = render.width {
            config.render.width = v;
        }
        if let Some(v) = render.height {
            config.render.height = v;
        }
        if let Some(v) = render.padding {
            config.render.padding = v;
        }
        if let Some(v) = render.node_radius {
            config.render.node_radius = v;
        }
        if let Some(v) = render.arc_rad {
            config.render.arc_rad = v;
        }
        if let Some(v) = render.show_node_ids {
            config.render.show_node_ids = v;
        }
        if let Some(v) = render.label_offset {
            config.render.label_offset = v;
        }
        if let Some(v) = render.label_padding_x {
            config.render.label_padding_x = v;
        }
        if let Some(v) = render.label_padding_y {
            config.render.label_padding_y = v;
        }
    }

    if let Some(labels) = parsed.labels {
        config.labels = labels;
    }

    Ok(config)
}
