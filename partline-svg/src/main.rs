//! partline-svg: render an LDraw part as an SVG line drawing
//!
//! Resolves the part from a local LDraw library and writes the drawing to
//! stdout or a file. Set `RUST_LOG=debug` to see per-file resolution.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use partline_core::{PartLibrary, DEFAULT_MAX_DEPTH};
use partline_svg::{load_config, RenderConfig, SvgRenderer};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "partline-svg")]
#[command(about = "Render an LDraw part as an SVG line drawing")]
#[command(version)]
struct Args {
    /// Part number or file name, e.g. 3001 or 3001.dat
    item: String,

    /// LDraw library root (contains parts/ and p/)
    #[arg(long, default_value = "./data/ldraw")]
    library: PathBuf,

    /// Write the SVG here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// TOML file with render options
    #[arg(long)]
    config: Option<PathBuf>,

    /// Canvas width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Canvas height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Padding on every side in pixels
    #[arg(long)]
    padding: Option<u32>,

    #[arg(long)]
    stroke_width: Option<f64>,

    #[arg(long)]
    stroke_color: Option<String>,

    /// Maximum sub-part nesting depth
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Fail when the part itself is missing instead of writing a placeholder
    #[arg(long)]
    strict: bool,
}

impl Args {
    fn overrides(&self) -> RenderConfig {
        RenderConfig {
            width: self.width,
            height: self.height,
            padding: self.padding,
            stroke_width: self.stroke_width,
            stroke_color: self.stroke_color.clone(),
            background_color: None,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();

    let file_config = match &args.config {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load render config {}", path.display()))?,
        None => RenderConfig::default(),
    };
    let options = file_config.merge(args.overrides()).into_options();

    let library = PartLibrary::new(&args.library).with_max_depth(args.max_depth);
    debug!(
        root = %library.root().display(),
        max_depth = library.max_depth(),
        "Opened part library"
    );
    let resolved = if args.strict {
        library
            .try_resolve(&args.item)
            .with_context(|| format!("Failed to resolve part {}", args.item))?
    } else {
        library.resolve(&args.item)
    };

    if resolved.edges.is_empty() {
        warn!(item = %args.item, "No edges resolved, writing placeholder");
    }
    info!(
        item = %args.item,
        name = %resolved.name,
        edges = resolved.edges.len(),
        warnings = resolved.warnings.len(),
        "Resolved part"
    );

    let svg = SvgRenderer::new(options).render(&resolved.edges);

    match &args.output {
        Some(path) => fs::write(path, &svg)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{svg}").context("Failed to write SVG to stdout")?;
        }
    }

    Ok(())
}
