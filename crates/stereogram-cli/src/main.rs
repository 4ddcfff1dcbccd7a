mod config;
mod session;

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use stereogram_core::{DepthMap, Pix};
use stereogram_synth::{shift_synthesize, tiw_synthesize};

use crate::config::{ParamOverrides, StereogramConfig};
use crate::session::{DEFAULT_SAVE_PATH, Session};

#[derive(Parser)]
#[command(
    name = "stereogram",
    version,
    about = "Render single-image stereograms from a background and a depth map"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a stereogram and write it as PNG
    Render {
        /// Background texture (PNG)
        #[arg(short, long, default_value = "BG.png")]
        background: PathBuf,

        /// Depth map (PNG, same size as the background; green carries depth)
        #[arg(short, long, default_value = "DepthMap.png")]
        depth: PathBuf,

        /// Synthesis engine
        #[arg(short, long, value_enum, default_value_t = Algorithm::Tiw)]
        algorithm: Algorithm,

        /// Output file path
        #[arg(short, long, default_value = DEFAULT_SAVE_PATH)]
        output: PathBuf,

        /// TOML file with [tiw] and [shift] parameters
        #[arg(short, long)]
        config: Option<PathBuf>,

        #[command(flatten)]
        overrides: ParamOverrides,
    },

    /// Compute both stereograms and switch between views from stdin
    Session {
        /// Background texture (PNG)
        #[arg(short, long, default_value = "BG.png")]
        background: PathBuf,

        /// Depth map (PNG, same size as the background)
        #[arg(short, long, default_value = "DepthMap.png")]
        depth: PathBuf,

        /// TOML file with [tiw] and [shift] parameters
        #[arg(short, long)]
        config: Option<PathBuf>,

        #[command(flatten)]
        overrides: ParamOverrides,
    },

    /// Write the default configuration file
    Config {
        /// Destination path
        #[arg(short, long, default_value = "stereogram.toml")]
        output: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Algorithm {
    /// Thimbleby-Inglis-Witten constraint linking
    Tiw,
    /// Depth-dependent shifting of tiled panels
    Shift,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            background,
            depth,
            algorithm,
            output,
            config,
            overrides,
        } => cmd_render(
            &background,
            &depth,
            algorithm,
            &output,
            config.as_deref(),
            &overrides,
        ),
        Commands::Session {
            background,
            depth,
            config,
            overrides,
        } => cmd_session(&background, &depth, config.as_deref(), &overrides),
        Commands::Config { output } => cmd_config(&output),
    }
}

/// Load the background and a depth map of matching size.
fn load_inputs(background: &Path, depth: &Path) -> Result<(Pix, DepthMap)> {
    let bg = stereogram_io::read_image(background)
        .with_context(|| format!("Failed to load background {}", background.display()))?;
    let depth_pix = stereogram_io::read_image(depth)
        .with_context(|| format!("Failed to load depth map {}", depth.display()))?;
    let depth_map = DepthMap::paired_with(&bg, depth_pix).with_context(|| {
        format!(
            "Depth map {} does not match background {}",
            depth.display(),
            background.display()
        )
    })?;
    Ok((bg, depth_map))
}

fn cmd_render(
    background: &Path,
    depth: &Path,
    algorithm: Algorithm,
    output: &Path,
    config: Option<&Path>,
    overrides: &ParamOverrides,
) -> Result<()> {
    let config = StereogramConfig::resolve(config, overrides)?;
    let (bg, depth_map) = load_inputs(background, depth)?;

    let start = Instant::now();
    let result = match algorithm {
        Algorithm::Tiw => tiw_synthesize(&bg, &depth_map, &config.tiw),
        Algorithm::Shift => shift_synthesize(&bg, &depth_map, &config.shift),
    }
    .with_context(|| format!("{algorithm:?} synthesis failed"))?;
    tracing::info!(
        ?algorithm,
        width = result.width(),
        height = result.height(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "rendered stereogram"
    );

    stereogram_io::write_image(&result, output)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!("Wrote {}", output.display());
    Ok(())
}

fn cmd_session(
    background: &Path,
    depth: &Path,
    config: Option<&Path>,
    overrides: &ParamOverrides,
) -> Result<()> {
    let config = StereogramConfig::resolve(config, overrides)?;
    let (bg, depth_map) = load_inputs(background, depth)?;
    let mut session = Session::new(bg, depth_map, &config)?;

    let mut out = io::stdout().lock();
    session.run(io::stdin().lock(), &mut out)?;
    out.flush()?;
    tracing::debug!(view = session.view().name(), "session ended");
    Ok(())
}

fn cmd_config(output: &Path) -> Result<()> {
    StereogramConfig::default().save_to_file(output)?;
    println!("Wrote default configuration to {}", output.display());
    Ok(())
}
