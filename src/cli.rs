use crate::config::load_config;
use crate::graph_dump::write_graph_dump;
use crate::lif::VehicleSelector;
use crate::render::write_output_svg;
use crate::select::select_layout;
use crate::store::LayoutStore;
use crate::visualize;
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "lifviz", version, about = "Visualize Layout Interchange Format (LIF) layouts")]
pub struct Args {
    /// LIF file (.json)
    pub input: PathBuf,

    /// Layout id to render. Prompts when the file holds several layouts.
    #[arg(short = 'l', long = "layout")]
    pub layout: Option<String>,

    /// List layout ids and exit
    #[arg(long = "list")]
    pub list: bool,

    /// Output file (svg/png). Defaults to stdout for SVG if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "output-format", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON file (theme, render and label settings)
    #[arg(short = 'c', long = "config-file")]
    pub config: Option<PathBuf>,

    /// Vehicle type whose edge properties are used (first entry if omitted)
    #[arg(long = "vehicle-type")]
    pub vehicle_type: Option<String>,

    /// Hide station labels that overlap an already drawn label
    #[arg(long = "hide-overlapping")]
    pub hide_overlapping: bool,

    /// Minimum distance between station labels, in layout units
    #[arg(long = "overlap-threshold")]
    pub overlap_threshold: Option<f64>,

    /// Write the built graph and labels as JSON
    #[arg(long = "dump")]
    pub dump: Option<PathBuf>,

    /// Width
    #[arg(short = 'w', long = "width")]
    pub width: Option<f32>,

    /// Height
    #[arg(short = 'H', long = "height")]
    pub height: Option<f32>,

    /// Verbose logging
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Svg,
    Png,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let mut config = load_config(args.config.as_deref())
        .with_context(|| "failed to load config")?;
    if let Some(width) = args.width {
        config.render.width = width;
    }
    if let Some(height) = args.height {
        config.render.height = height;
    }
    if args.hide_overlapping {
        config.labels.hide_overlapping = true;
    }
    if let Some(threshold) = args.overlap_threshold {
        config.labels.threshold = threshold;
    }

    let mut store = LayoutStore::new();
    store.load_file(&args.input)?;

    if args.list {
        for id in store.list() {
            println!("{id}");
        }
        return Ok(());
    }

    let layout_id = match args.layout {
        Some(id) => id,
        None => choose_layout(&store)?,
    };
    let layout = store.get(&layout_id)?;

    let vehicle = match args.vehicle_type {
        Some(id) => VehicleSelector::Type(id),
        None => VehicleSelector::First,
    };
    let view = visualize(layout, &vehicle, &config.labels)
        .with_context(|| format!("failed to build layout '{layout_id}'"))?;
    info!(
        layout_id = %layout_id,
        nodes = view.graph.nodes.len(),
        edges = view.graph.edges.len(),
        labels = view.labels.len(),
        "visualizing layout"
    );

    if let Some(path) = args.dump.as_deref() {
        write_graph_dump(path, layout, &view.graph, &view.labels)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    let svg = view.to_svg(&config);
    match args.output_format {
        OutputFormat::Svg => write_output_svg(&svg, args.output.as_deref())?,
        OutputFormat::Png => {
            let output = ensure_output(args.output.as_deref(), "png")?;
            write_png(&svg, output, &config.render)?;
        }
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn choose_layout(store: &LayoutStore) -> Result<String> {
    if let [only] = store.list() {
        return Ok(only.clone());
    }
    let stdin = io::stdin();
    let chosen = select_layout(store.list(), stdin.lock(), io::stdout())?;
    Ok(chosen)
}

fn ensure_output<'a>(output: Option<&'a Path>, ext: &str) -> Result<&'a Path> {
    output.ok_or_else(|| anyhow::anyhow!("Output path required for {} output", ext))
}

#[cfg(feature = "png")]
fn write_png(svg: &str, output: &Path, render: &crate::config::RenderConfig) -> Result<()> {
    crate::render::write_output_png(svg, output, render)
}

#[cfg(not(feature = "png"))]
fn write_png(_svg: &str, _output: &Path, _render: &crate::config::RenderConfig) -> Result<()> {
    Err(anyhow::anyhow!("PNG output requires the `png` feature"))
}
