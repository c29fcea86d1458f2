//! dimtag - measure STL parts, lay out a dimension tag and a product pack
//!
//! With no input file, a 2-unit demo cube is measured.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use dimtag_core::{Axis, ProjectionMode};
use dimtag_cli::{demo_store, init_logging, load_fragments, measure, Config};
use tracing::debug;

#[derive(Parser)]
#[command(name = "dimtag")]
#[command(about = "Measure an element and lay out its dimension tag and pack", long_about = None)]
struct Cli {
    /// STL files; each becomes one fragment of the element, the first is dimensioned
    files: Vec<PathBuf>,

    /// TOML config with [pack] and [camera] sections
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Products in the pack, the original included
    #[arg(short, long)]
    quantity: Option<usize>,

    /// Gap between copies, in model units
    #[arg(short, long)]
    buffer: Option<f64>,

    /// Axis the pack is laid out along (x, y or z)
    #[arg(short, long)]
    axis: Option<Axis>,

    /// Use an orthographic camera
    #[arg(long)]
    ortho: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn resolve_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        if let Some(quantity) = self.quantity {
            config.pack.quantity = quantity;
        }
        if let Some(buffer) = self.buffer {
            config.pack.buffer = buffer;
        }
        if let Some(axis) = self.axis {
            config.pack.axis = axis;
        }
        if self.ortho {
            config.camera.mode = ProjectionMode::Orthographic;
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let config = cli.resolve_config()?;
    debug!(?config, "resolved configuration");

    let store = if cli.files.is_empty() {
        demo_store()
    } else {
        load_fragments(&cli.files)?
    };

    let report = measure(&store, &config)?;
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        report.write_text(&mut std::io::stdout())?;
    }

    Ok(())
}
